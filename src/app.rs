use eframe::egui::{self, Ui};

use crate::state::{AppState, ChartTab, MainTab, TableTab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SchoolDashApp {
    pub state: AppState,
}

impl SchoolDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SchoolDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: reload + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selector_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: overview, tables, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::overview(ui);
            main_tabs(ui, &mut self.state);
        });
    }
}

fn main_tabs(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.main_tab, MainTab::Table, "表");
        ui.selectable_value(&mut state.main_tab, MainTab::Chart, "グラフ");
    });
    ui.separator();

    match state.main_tab {
        MainTab::Table => {
            ui.horizontal(|ui: &mut Ui| {
                ui.selectable_value(&mut state.table_tab, TableTab::ByYear, "年度別");
                ui.selectable_value(&mut state.table_tab, TableTab::ByCategory, "設置区分別");
            });
            ui.add_space(4.0);
            match state.table_tab {
                TableTab::ByYear => table::year_table(ui, &state.views.year_view),
                TableTab::ByCategory => table::category_table(ui, &state.views.category_view),
            }
        }
        MainTab::Chart => {
            ui.horizontal(|ui: &mut Ui| {
                ui.selectable_value(&mut state.chart_tab, ChartTab::Students, "学生数推移");
                ui.selectable_value(&mut state.chart_tab, ChartTab::Schools, "学校数推移");
                ui.selectable_value(&mut state.chart_tab, ChartTab::Categories, "設置区分比較");
            });
            ui.add_space(4.0);
            match state.chart_tab {
                ChartTab::Students => plot::student_trend(ui, &state.views.year_view),
                ChartTab::Schools => plot::school_trend(ui, &state.views.year_view),
                ChartTab::Categories => {
                    plot::category_comparison(ui, &state.views.category_view, &state.color_map)
                }
            }
        }
    }
}
