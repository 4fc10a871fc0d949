//! Dashboard for the 学校基本調査 (School Basic Survey) datasets.
//!
//! Two tables are loaded once ([`data::loader`]), filtered per interaction
//! ([`data::filter::compute_views`]) and rendered with egui ([`app`]).

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use config::AppConfig;
pub use data::filter::{Selection, Views, compute_views};
pub use data::loader::load_datasets;
pub use data::model::{Datasets, SchoolCategoryRecord, SchoolYearRecord};
pub use error::{ConfigError, LoadError};
