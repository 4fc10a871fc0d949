use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, LoadStatus};

// ---------------------------------------------------------------------------
// Left side panel – selectors
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("絞り込み");
    ui.separator();

    // Clone the option lists so the event methods can borrow `state` mutably.
    let school_types = state.datasets.school_types().to_vec();
    let years = state.datasets.years.years.clone();
    let categories = state.datasets.categories.categories.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- School type: single select, never empty ----
            ui.strong("学校種を1つ選択してください");
            let current = state.selection.school_type.clone();
            egui::ComboBox::from_id_salt("school_type")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for school_type in &school_types {
                        if ui
                            .selectable_label(current == *school_type, school_type)
                            .clicked()
                        {
                            state.select_school_type(school_type);
                        }
                    }
                });
            ui.separator();

            // ---- Years ----
            let n_years = state.selection.years.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("年度を選択してください  ({n_years}/{})", years.len()))
                    .strong(),
            )
            .id_salt("years")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("全選択").clicked() {
                        state.select_all_years();
                    }
                    if ui.small_button("全解除").clicked() {
                        state.select_no_years();
                    }
                });
                for year in &years {
                    let mut checked = state.selection.years.contains(year);
                    if ui.checkbox(&mut checked, year).changed() {
                        state.toggle_year(year);
                    }
                }
            });
            ui.separator();

            // ---- Establishment categories ----
            let n_categories = state.selection.categories.len();
            egui::CollapsingHeader::new(
                RichText::new(format!(
                    "設置区分を選択してください  ({n_categories}/{})",
                    categories.len()
                ))
                .strong(),
            )
            .id_salt("categories")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("全選択").clicked() {
                        state.select_all_categories();
                    }
                    if ui.small_button("全解除").clicked() {
                        state.select_no_categories();
                    }
                });
                for category in &categories {
                    let mut checked = state.selection.categories.contains(category);
                    let text = RichText::new(category).color(state.color_map.color_for(category));
                    if ui.checkbox(&mut checked, text).changed() {
                        state.toggle_category(category);
                    }
                }
            });

            if state.selection.years.is_empty() || state.selection.categories.is_empty() {
                ui.add_space(6.0);
                ui.label(RichText::new("未選択の項目はすべて表示されます").weak().small());
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: reload trigger and load status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui.button("再読み込み").clicked() {
            log::info!("Reload requested");
            state.reload();
        }

        ui.separator();

        match &state.status {
            LoadStatus::Loaded(elapsed) => {
                ui.label(
                    RichText::new(format!(
                        "読み込みに成功しました ({:.1} ms)",
                        elapsed.as_secs_f64() * 1000.0
                    ))
                    .color(Color32::from_rgb(60, 160, 90)),
                );
            }
            LoadStatus::ReloadFailed(msg) => {
                ui.label(RichText::new(format!("再読み込みに失敗しました: {msg}")).color(Color32::RED));
            }
        }

        ui.separator();

        ui.label(format!(
            "年度別 {} 行 / 設置区分別 {} 行",
            state.views.year_view.len(),
            state.views.category_view.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

const OVERVIEW: &[(&str, &str)] = &[
    (
        "概要",
        "このアプリはe-Statから得られた学校基本調査を利用し、学校種別ごとの学生数や学校数の推移、設置区分別の比較を可視化するためのものです。",
    ),
    (
        "目的",
        "主に学校数や学生数の変化、設置区分での学生数の差を表とグラフの両方で把握することを目的としています。",
    ),
    (
        "使い方",
        "最初はサイドバーの項目がすべて選択された状態から始まります。絞り込みたい場合は選択を外してください。「表」では「年度別」「設置区分別」の表を、「グラフ」では「学生数推移」「学校数推移」「設置区分比較」のグラフを見ることができます。",
    ),
    (
        "注意点",
        "年度や設置区分の選択をすべて外した場合は、絞り込みを行わずすべての行を表示します。",
    ),
    (
        "データの確認",
        "学校基本調査は、全国の学校を対象に学校数や在学者数などを毎年調査し、教育行政や将来の教育計画に活用される基礎資料を提供する統計調査です。",
    ),
];

/// Title and the collapsible description sections.
pub fn overview(ui: &mut Ui) {
    ui.heading(RichText::new("学校に関するデータ").size(26.0));
    egui::CollapsingHeader::new("このアプリについて")
        .id_salt("overview")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            for (title, body) in OVERVIEW {
                ui.strong(*title);
                ui.label(*body);
                ui.add_space(6.0);
            }
        });
    ui.separator();
}
