use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names as they appear in the e-Stat export
// ---------------------------------------------------------------------------

pub const COL_SCHOOL_TYPE: &str = "学校種";
pub const COL_YEAR: &str = "年度";
pub const COL_STUDENT_COUNT: &str = "学生数(単位:人)";
pub const COL_SCHOOL_COUNT: &str = "学校数(単位:校)";
pub const COL_CATEGORY: &str = "設置区分";

// ---------------------------------------------------------------------------
// Records – one row of each source table
// ---------------------------------------------------------------------------

/// Students and schools for one (school type, year) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolYearRecord {
    #[serde(rename = "学校種")]
    pub school_type: String,
    /// Era-year label, e.g. `令和6`. Kept as text, never parsed.
    #[serde(rename = "年度")]
    pub year: String,
    #[serde(rename = "学生数(単位:人)")]
    pub student_count: u64,
    #[serde(rename = "学校数(単位:校)")]
    pub school_count: u64,
}

/// Students for one (school type, establishment category) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolCategoryRecord {
    #[serde(rename = "学校種")]
    pub school_type: String,
    /// 国立 / 公立 / 私立.
    #[serde(rename = "設置区分")]
    pub category: String,
    #[serde(rename = "学生数(単位:人)")]
    pub student_count: u64,
    /// Present only when the source carries a 年度 column.
    #[serde(rename = "年度", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

// ---------------------------------------------------------------------------
// Base tables
// ---------------------------------------------------------------------------

/// Push `value` onto `out` unless already seen. Keeps first-appearance order,
/// which is what the selectors list.
fn push_distinct(seen: &mut BTreeSet<String>, out: &mut Vec<String>, value: &str) {
    if seen.insert(value.to_string()) {
        out.push(value.to_string());
    }
}

/// The full 年度別 table plus the distinct values offered by the selectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearTable {
    pub rows: Vec<SchoolYearRecord>,
    pub school_types: Vec<String>,
    pub years: Vec<String>,
}

impl YearTable {
    pub fn from_rows(rows: Vec<SchoolYearRecord>) -> Self {
        let mut school_types = Vec::new();
        let mut years = Vec::new();
        let (mut seen_types, mut seen_years) = (BTreeSet::new(), BTreeSet::new());
        for row in &rows {
            push_distinct(&mut seen_types, &mut school_types, &row.school_type);
            push_distinct(&mut seen_years, &mut years, &row.year);
        }
        YearTable {
            rows,
            school_types,
            years,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The full 設置区分別 table plus its distinct values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable {
    pub rows: Vec<SchoolCategoryRecord>,
    pub school_types: Vec<String>,
    pub categories: Vec<String>,
}

impl CategoryTable {
    pub fn from_rows(rows: Vec<SchoolCategoryRecord>) -> Self {
        let mut school_types = Vec::new();
        let mut categories = Vec::new();
        let (mut seen_types, mut seen_categories) = (BTreeSet::new(), BTreeSet::new());
        for row in &rows {
            push_distinct(&mut seen_types, &mut school_types, &row.school_type);
            push_distinct(&mut seen_categories, &mut categories, &row.category);
        }
        CategoryTable {
            rows,
            school_types,
            categories,
        }
    }

    /// Whether any row carries a 年度 value.
    pub fn has_year_column(&self) -> bool {
        self.rows.iter().any(|r| r.year.is_some())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Both base tables, read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub years: YearTable,
    pub categories: CategoryTable,
    /// Wall-clock time spent reading both files.
    pub load_time: Duration,
}

impl Datasets {
    /// Selectable school types: those of the year table, falling back to the
    /// category table when the year table is empty.
    pub fn school_types(&self) -> &[String] {
        if self.years.school_types.is_empty() {
            &self.categories.school_types
        } else {
            &self.years.school_types
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year_row(school_type: &str, year: &str) -> SchoolYearRecord {
        SchoolYearRecord {
            school_type: school_type.to_string(),
            year: year.to_string(),
            student_count: 1,
            school_count: 1,
        }
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let table = YearTable::from_rows(vec![
            year_row("大学", "令和6"),
            year_row("大学", "令和5"),
            year_row("短期大学", "令和6"),
            year_row("短期大学", "令和5"),
        ]);
        assert_eq!(table.school_types, vec!["大学", "短期大学"]);
        assert_eq!(table.years, vec!["令和6", "令和5"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn school_types_fall_back_to_category_table() {
        let datasets = Datasets {
            categories: CategoryTable::from_rows(vec![SchoolCategoryRecord {
                school_type: "大学".to_string(),
                category: "国立".to_string(),
                student_count: 3,
                year: None,
            }]),
            ..Datasets::default()
        };
        assert_eq!(datasets.school_types(), ["大学".to_string()]);
        assert!(!datasets.categories.has_year_column());
    }
}
