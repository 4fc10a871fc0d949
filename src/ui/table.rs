use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{
    COL_CATEGORY, COL_SCHOOL_COUNT, COL_SCHOOL_TYPE, COL_STUDENT_COUNT, COL_YEAR,
    SchoolCategoryRecord, SchoolYearRecord,
};

/// 年度別 table.
pub fn year_table(ui: &mut Ui, rows: &[SchoolYearRecord]) {
    let headers = [COL_SCHOOL_TYPE, COL_YEAR, COL_STUDENT_COUNT, COL_SCHOOL_COUNT];
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.school_type.clone(),
                r.year.clone(),
                r.student_count.to_string(),
                r.school_count.to_string(),
            ]
        })
        .collect();
    ui.push_id("year_table", |ui: &mut Ui| data_table(ui, &headers, &cells));
}

/// 設置区分別 table. The 年度 column is shown only if the source has one.
pub fn category_table(ui: &mut Ui, rows: &[SchoolCategoryRecord]) {
    let with_year = rows.iter().any(|r| r.year.is_some());
    let mut headers = vec![COL_SCHOOL_TYPE, COL_CATEGORY, COL_STUDENT_COUNT];
    if with_year {
        headers.push(COL_YEAR);
    }
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let mut row = vec![
                r.school_type.clone(),
                r.category.clone(),
                r.student_count.to_string(),
            ];
            if with_year {
                row.push(r.year.clone().unwrap_or_default());
            }
            row
        })
        .collect();
    ui.push_id("category_table", |ui: &mut Ui| data_table(ui, &headers, &cells));
}

fn data_table(ui: &mut Ui, headers: &[&str], cells: &[Vec<String>]) {
    if cells.is_empty() {
        ui.label(RichText::new("該当するデータがありません").weak());
        return;
    }

    let text_height = egui::TextStyle::Body.resolve(ui.style()).size;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(80.0).clip(true), headers.len())
        .header(24.0, |mut header| {
            for name in headers {
                header.col(|ui| {
                    ui.label(RichText::new(*name).strong());
                });
            }
        })
        .body(|body| {
            body.rows(text_height + 8.0, cells.len(), |mut row| {
                let values = &cells[row.index()];
                for value in values {
                    row.col(|ui| {
                        ui.label(value);
                    });
                }
            });
        });
}
