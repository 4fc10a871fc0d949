//! Application configuration.
//!
//! Looked up in this order:
//! 1. the file named by `SCHOOL_DASH_CONFIG` (errors are fatal),
//! 2. `school-dash.json` in the working directory (errors fall back to defaults),
//! 3. built-in defaults.
//!
//! Relative data and font paths in a config file are resolved against the
//! directory containing that file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "SCHOOL_DASH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "school-dash.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 年度別 table: 学校種, 年度, 学生数(単位:人), 学校数(単位:校).
    pub year_data_path: PathBuf,
    /// 設置区分別 table: 学校種, 設置区分, 学生数(単位:人).
    pub category_data_path: PathBuf,
    /// Font with Japanese glyphs. Well-known system fonts are tried if unset.
    pub font_path: Option<PathBuf>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            year_data_path: PathBuf::from("hi0001_2025.csv"),
            category_data_path: PathBuf::from("hi0001_2025_2.csv"),
            font_path: None,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl AppConfig {
    /// Resolve the configuration for this process.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if !default_path.exists() {
            log::info!("No {DEFAULT_CONFIG_FILE} found, using default dataset paths");
            return Ok(Self::default());
        }

        match Self::from_file(default_path) {
            Ok(config) => Ok(config),
            Err(e) => {
                log::warn!("{e}; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read a JSON config file. Missing fields take their default values.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: AppConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.year_data_path);
        resolve(&mut self.category_data_path);
        if let Some(font) = self.font_path.as_mut() {
            resolve(font);
        }
    }
}
