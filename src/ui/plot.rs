use std::ops::RangeInclusive;

use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::model::{
    COL_CATEGORY, COL_SCHOOL_COUNT, COL_STUDENT_COUNT, COL_YEAR, SchoolCategoryRecord,
    SchoolYearRecord,
};

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Label integer grid marks with `labels[i]`; every other mark stays blank.
fn label_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn empty_notice(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new("該当するデータがありません").weak());
    });
}

// ---------------------------------------------------------------------------
// Line charts (年度別)
// ---------------------------------------------------------------------------

/// One-line reading of a series, e.g. `令和3から令和7にかけて学生数は12,000人増加しました。`
fn trend_caption(
    rows: &[SchoolYearRecord],
    noun: &str,
    unit: &str,
    value: impl Fn(&SchoolYearRecord) -> u64,
) -> Option<String> {
    let (first, last) = (rows.first()?, rows.last()?);
    if rows.len() < 2 {
        return None;
    }
    let (from, to) = (value(first), value(last));
    let change = match to.cmp(&from) {
        std::cmp::Ordering::Greater => format!("{}{unit}増加しました", group_digits(to - from)),
        std::cmp::Ordering::Less => format!("{}{unit}減少しました", group_digits(from - to)),
        std::cmp::Ordering::Equal => "変化していません".to_string(),
    };
    Some(format!("{}から{}にかけて{noun}は{change}。", first.year, last.year))
}

/// Category with the most students, e.g. `学生数が最も多いのは私立です。`
fn largest_category_caption(rows: &[SchoolCategoryRecord]) -> Option<String> {
    let top = rows.iter().max_by_key(|r| r.student_count)?;
    Some(format!("学生数が最も多いのは{}です。", category_label(top)))
}

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn caption(ui: &mut Ui, text: Option<String>) {
    if let Some(text) = text {
        ui.label(RichText::new(text).weak());
    }
}

#[allow(clippy::too_many_arguments)]
fn count_by_year_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    column: &str,
    noun: &str,
    unit: &str,
    rows: &[SchoolYearRecord],
    value: impl Fn(&SchoolYearRecord) -> u64,
) {
    ui.label(RichText::new(title).heading());
    if rows.is_empty() {
        empty_notice(ui);
        return;
    }
    caption(ui, trend_caption(rows, noun, unit, &value));

    let labels: Vec<String> = rows.iter().map(|r| r.year.clone()).collect();
    let points: Vec<[f64; 2]> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| [i as f64, value(r) as f64])
        .collect();

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(COL_YEAR)
        .y_axis_label(column)
        .x_axis_formatter(label_formatter(labels))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(column)
                    .width(2.0),
            );
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(4.0));
        });
}

/// 年度ごとの学生数の推移.
pub fn student_trend(ui: &mut Ui, rows: &[SchoolYearRecord]) {
    count_by_year_chart(
        ui,
        "student_trend",
        "年度ごとの学生数の推移",
        COL_STUDENT_COUNT,
        "学生数",
        "人",
        rows,
        |r| r.student_count,
    );
}

/// 年度ごとの学校数の推移.
pub fn school_trend(ui: &mut Ui, rows: &[SchoolYearRecord]) {
    count_by_year_chart(
        ui,
        "school_trend",
        "年度ごとの学校数の推移",
        COL_SCHOOL_COUNT,
        "学校数",
        "校",
        rows,
        |r| r.school_count,
    );
}

// ---------------------------------------------------------------------------
// Bar chart (設置区分別)
// ---------------------------------------------------------------------------

/// Bar label; the year is appended when the source carries one.
fn category_label(r: &SchoolCategoryRecord) -> String {
    match &r.year {
        Some(year) => format!("{} ({year})", r.category),
        None => r.category.clone(),
    }
}

/// 設置区分別の人数比較.
pub fn category_comparison(ui: &mut Ui, rows: &[SchoolCategoryRecord], colors: &ColorMap) {
    ui.label(RichText::new("設置区分別の人数比較").heading());
    if rows.is_empty() {
        empty_notice(ui);
        return;
    }
    caption(ui, largest_category_caption(rows));

    let labels: Vec<String> = rows.iter().map(category_label).collect();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.student_count as f64)
                .name(category_label(r))
                .fill(colors.color_for(&r.category))
                .width(0.6)
        })
        .collect();

    Plot::new("category_comparison")
        .x_axis_label(COL_CATEGORY)
        .y_axis_label(COL_STUDENT_COUNT)
        .x_axis_formatter(label_formatter(labels))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(COL_STUDENT_COUNT));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_integer_marks_get_labels() {
        let fmt = label_formatter(vec!["令和6".to_string(), "令和7".to_string()]);
        let range = 0.0..=1.0;
        let mark = |value| GridMark {
            value,
            step_size: 0.5,
        };
        assert_eq!(fmt(mark(0.0), &range), "令和6");
        assert_eq!(fmt(mark(1.0), &range), "令和7");
        assert_eq!(fmt(mark(0.5), &range), "");
        assert_eq!(fmt(mark(2.0), &range), "");
        assert_eq!(fmt(mark(-1.0), &range), "");
    }

    fn year_row(year: &str, students: u64, schools: u64) -> SchoolYearRecord {
        SchoolYearRecord {
            school_type: "大学".to_string(),
            year: year.to_string(),
            student_count: students,
            school_count: schools,
        }
    }

    #[test]
    fn trend_caption_describes_first_to_last_change() {
        let rows = vec![
            year_row("令和5", 2_930_000, 810),
            year_row("令和6", 2_945_000, 813),
            year_row("令和7", 2_950_500, 812),
        ];
        assert_eq!(
            trend_caption(&rows, "学生数", "人", |r| r.student_count).as_deref(),
            Some("令和5から令和7にかけて学生数は20,500人増加しました。")
        );
        assert_eq!(
            trend_caption(&rows, "学校数", "校", |r| r.school_count).as_deref(),
            Some("令和5から令和7にかけて学校数は2校増加しました。")
        );
        assert_eq!(
            trend_caption(&rows[1..], "学校数", "校", |r| r.school_count).as_deref(),
            Some("令和6から令和7にかけて学校数は1校減少しました。")
        );
        assert!(trend_caption(&rows[..1], "学生数", "人", |r| r.student_count).is_none());
    }

    #[test]
    fn largest_category_caption_names_top_category() {
        let rows: Vec<_> = [("国立", 590_000), ("公立", 170_000), ("私立", 2_190_000)]
            .iter()
            .map(|&(category, students)| SchoolCategoryRecord {
                school_type: "大学".to_string(),
                category: category.to_string(),
                student_count: students,
                year: None,
            })
            .collect();
        assert_eq!(
            largest_category_caption(&rows).as_deref(),
            Some("学生数が最も多いのは私立です。")
        );
        assert!(largest_category_caption(&[]).is_none());
    }

    #[test]
    fn group_digits_inserts_thousands_separators() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(2_950_000), "2,950,000");
    }

    #[test]
    fn category_label_appends_year_when_present() {
        let mut record = SchoolCategoryRecord {
            school_type: "大学".to_string(),
            category: "私立".to_string(),
            student_count: 1,
            year: None,
        };
        assert_eq!(category_label(&record), "私立");
        record.year = Some("令和7".to_string());
        assert_eq!(category_label(&record), "私立 (令和7)");
    }
}
