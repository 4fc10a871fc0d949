use std::collections::BTreeSet;

use super::model::{CategoryTable, Datasets, SchoolCategoryRecord, SchoolYearRecord, YearTable};

// ---------------------------------------------------------------------------
// Selection: what the side panel currently has chosen
// ---------------------------------------------------------------------------

/// Current selector state.
///
/// An empty `years` or `categories` set means "no filter" (show all), never
/// "show nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub school_type: String,
    pub years: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl Selection {
    /// First school type, every year and every category selected.
    pub fn initial(datasets: &Datasets) -> Self {
        Selection {
            school_type: datasets.school_types().first().cloned().unwrap_or_default(),
            years: datasets.years.years.iter().cloned().collect(),
            categories: datasets.categories.categories.iter().cloned().collect(),
        }
    }

    /// Adjust the selection to freshly reloaded tables.
    ///
    /// A multi-select that held every value of `previous` is widened to every
    /// value of `datasets`, so new years or categories show up. Otherwise only
    /// values that still exist are kept. The school type falls back to the
    /// first one if the current one is gone.
    pub fn reconcile(&mut self, previous: &Datasets, datasets: &Datasets) {
        let types = datasets.school_types();
        if !types.contains(&self.school_type) {
            self.school_type = types.first().cloned().unwrap_or_default();
        }
        reconcile_set(&mut self.years, &previous.years.years, &datasets.years.years);
        reconcile_set(
            &mut self.categories,
            &previous.categories.categories,
            &datasets.categories.categories,
        );
    }
}

fn reconcile_set(selected: &mut BTreeSet<String>, previous: &[String], current: &[String]) {
    let was_full = !previous.is_empty() && previous.iter().all(|v| selected.contains(v));
    if was_full {
        *selected = current.iter().cloned().collect();
    } else {
        selected.retain(|v| current.contains(v));
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// The two filtered tables handed to the renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Views {
    pub year_view: Vec<SchoolYearRecord>,
    pub category_view: Vec<SchoolCategoryRecord>,
}

/// `true` when `value` passes a multi-select; an empty set passes everything.
fn passes(selected: &BTreeSet<String>, value: &str) -> bool {
    selected.is_empty() || selected.contains(value)
}

/// Derive both views from the base tables.
///
/// Both views are scoped to `selection.school_type`. The year filter applies
/// only to the year view and the category filter only to the category view;
/// the two are independent. Rows keep their source order.
pub fn compute_views(years: &YearTable, categories: &CategoryTable, selection: &Selection) -> Views {
    let year_view = years
        .rows
        .iter()
        .filter(|r| r.school_type == selection.school_type)
        .filter(|r| passes(&selection.years, &r.year))
        .cloned()
        .collect();

    let category_view = categories
        .rows
        .iter()
        .filter(|r| r.school_type == selection.school_type)
        .filter(|r| passes(&selection.categories, &r.category))
        .cloned()
        .collect();

    Views {
        year_view,
        category_view,
    }
}
