use std::time::Duration;

use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::data::filter::{Selection, Views, compute_views};
use crate::data::loader::load_datasets;
use crate::data::model::Datasets;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainTab {
    #[default]
    Table,
    Chart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableTab {
    #[default]
    ByYear,
    ByCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTab {
    #[default]
    Students,
    Schools,
    Categories,
}

/// Outcome of the most recent load, shown in the top bar.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loaded(Duration),
    ReloadFailed(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every user interaction goes through one of the event methods below, each
/// of which leaves `views` consistent with `selection`.
pub struct AppState {
    pub config: AppConfig,

    /// Base tables, replaced only by a successful reload.
    pub datasets: Datasets,

    pub selection: Selection,

    /// Filtered tables for the current selection.
    pub views: Views,

    /// Colours for the establishment categories.
    pub color_map: ColorMap,

    pub status: LoadStatus,

    pub main_tab: MainTab,
    pub table_tab: TableTab,
    pub chart_tab: ChartTab,
}

impl AppState {
    /// Build the initial state: first school type, everything else selected.
    pub fn new(config: AppConfig, datasets: Datasets) -> Self {
        let selection = Selection::initial(&datasets);
        let views = compute_views(&datasets.years, &datasets.categories, &selection);
        let color_map = ColorMap::new(&datasets.categories.categories);
        let status = LoadStatus::Loaded(datasets.load_time);
        Self {
            config,
            datasets,
            selection,
            views,
            color_map,
            status,
            main_tab: MainTab::default(),
            table_tab: TableTab::default(),
            chart_tab: ChartTab::default(),
        }
    }

    /// Recompute `views` after a selection or data change.
    pub fn refresh(&mut self) {
        self.views = compute_views(
            &self.datasets.years,
            &self.datasets.categories,
            &self.selection,
        );
        log::debug!(
            "{}: {} year rows, {} category rows",
            self.selection.school_type,
            self.views.year_view.len(),
            self.views.category_view.len()
        );
    }

    pub fn select_school_type(&mut self, school_type: &str) {
        if self.selection.school_type != school_type {
            self.selection.school_type = school_type.to_string();
            self.refresh();
        }
    }

    pub fn toggle_year(&mut self, year: &str) {
        if !self.selection.years.remove(year) {
            self.selection.years.insert(year.to_string());
        }
        self.refresh();
    }

    pub fn select_all_years(&mut self) {
        self.selection.years = self.datasets.years.years.iter().cloned().collect();
        self.refresh();
    }

    pub fn select_no_years(&mut self) {
        self.selection.years.clear();
        self.refresh();
    }

    pub fn toggle_category(&mut self, category: &str) {
        if !self.selection.categories.remove(category) {
            self.selection.categories.insert(category.to_string());
        }
        self.refresh();
    }

    pub fn select_all_categories(&mut self) {
        self.selection.categories = self
            .datasets
            .categories
            .categories
            .iter()
            .cloned()
            .collect();
        self.refresh();
    }

    pub fn select_no_categories(&mut self) {
        self.selection.categories.clear();
        self.refresh();
    }

    /// Re-read both files from the configured paths.
    pub fn reload(&mut self) {
        let result = load_datasets(&self.config);
        self.apply_reload(result);
    }

    /// Swap in freshly loaded tables, or keep the current ones on failure.
    pub fn apply_reload(&mut self, result: Result<Datasets, LoadError>) {
        match result {
            Ok(datasets) => {
                self.selection.reconcile(&self.datasets, &datasets);
                self.color_map = ColorMap::new(&datasets.categories.categories);
                self.status = LoadStatus::Loaded(datasets.load_time);
                self.datasets = datasets;
                self.refresh();
            }
            Err(e) => {
                log::error!("Reload failed: {e}");
                self.status = LoadStatus::ReloadFailed(e.to_string());
            }
        }
    }
}
