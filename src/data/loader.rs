use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use super::model::{
    COL_CATEGORY, COL_SCHOOL_COUNT, COL_SCHOOL_TYPE, COL_STUDENT_COUNT, COL_YEAR, CategoryTable,
    Datasets, SchoolCategoryRecord, SchoolYearRecord, YearTable,
};
use crate::config::AppConfig;
use crate::error::LoadError;

const YEAR_COLUMNS: &[&str] = &[COL_SCHOOL_TYPE, COL_YEAR, COL_STUDENT_COUNT, COL_SCHOOL_COUNT];
const CATEGORY_COLUMNS: &[&str] = &[COL_SCHOOL_TYPE, COL_CATEGORY, COL_STUDENT_COUNT];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load both base tables named by the configuration.
pub fn load_datasets(config: &AppConfig) -> Result<Datasets, LoadError> {
    let started = Instant::now();
    let years = load_year_table(&config.year_data_path)?;
    let categories = load_category_table(&config.category_data_path)?;
    let load_time = started.elapsed();

    log::info!(
        "Loaded {} year rows ({} school types) and {} category rows in {:?}",
        years.len(),
        years.school_types.len(),
        categories.len(),
        load_time
    );

    Ok(Datasets {
        years,
        categories,
        load_time,
    })
}

/// Load the 年度別 table.
pub fn load_year_table(path: &Path) -> Result<YearTable, LoadError> {
    let rows: Vec<SchoolYearRecord> = load_records(path, YEAR_COLUMNS)?;
    Ok(YearTable::from_rows(rows))
}

/// Load the 設置区分別 table.
pub fn load_category_table(path: &Path) -> Result<CategoryTable, LoadError> {
    let rows: Vec<SchoolCategoryRecord> = load_records(path, CATEGORY_COLUMNS)?;
    Ok(CategoryTable::from_rows(rows))
}

/// Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the Japanese column names
/// * `.json` – `[{ "学校種": "...", ... }, ...]`
fn load_records<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, required),
        "json" => load_json(path, required),
        other => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: other.to_string(),
        }),
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Strip surrounding whitespace and a leading byte-order mark.
fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn load_csv<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(open(path)?);

    let headers: StringRecord = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(normalize_header)
        .collect();

    if let Some(missing) = required
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: missing.to_string(),
        });
    }
    reader.set_headers(headers);

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_err)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records', force_ascii=False)`.
/// Every record must carry the required keys.
fn load_json<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, LoadError> {
    let json_err = |source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    };

    let root: JsonValue = serde_json::from_reader(BufReader::new(open(path)?)).map_err(json_err)?;

    let records = root.as_array().map(Vec::as_slice).unwrap_or_default();
    for record in records.iter().filter_map(JsonValue::as_object) {
        if let Some(missing) = required.iter().find(|col| !record.contains_key(**col)) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: missing.to_string(),
            });
        }
    }

    serde_json::from_value(root).map_err(json_err)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_year_csv_with_bom_and_padding() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "years.csv",
            "\u{feff}学校種, 年度 ,学生数(単位:人),学校数(単位:校)\n\
             大学,令和6, 2950000 ,813\n\
             大学,令和7,2960000,812\n",
        );

        let table = load_year_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].student_count, 2_950_000);
        assert_eq!(table.rows[1].school_count, 812);
        assert_eq!(table.years, vec!["令和6", "令和7"]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "cats.csv",
            "表章項目,学校種,設置区分,学生数(単位:人)\n在学者数,大学,国立,590000\n",
        );

        let table = load_category_table(&path).unwrap();
        assert_eq!(table.categories, vec!["国立"]);
        assert_eq!(table.rows[0].year, None);
    }

    #[test]
    fn optional_year_column_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "cats.csv",
            "学校種,設置区分,学生数(単位:人),年度\n大学,私立,2200000,令和7\n",
        );

        let table = load_category_table(&path).unwrap();
        assert_eq!(table.rows[0].year.as_deref(), Some("令和7"));
        assert!(table.has_year_column());
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "years.csv", "学校種,年度,学生数(単位:人)\n大学,令和6,1\n");

        match load_year_table(&path) {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, COL_SCHOOL_COUNT),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn non_integer_count_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "years.csv",
            "学校種,年度,学生数(単位:人),学校数(単位:校)\n大学,令和6,many,3\n",
        );

        assert!(matches!(load_year_table(&path), Err(LoadError::Csv { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_year_table(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "years.xlsx", "");

        match load_year_table(&path) {
            Err(LoadError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, "xlsx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn reads_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "cats.json",
            r#"[
                {"学校種": "大学", "設置区分": "国立", "学生数(単位:人)": 590000},
                {"学校種": "大学", "設置区分": "公立", "学生数(単位:人)": 170000}
            ]"#,
        );

        let table = load_category_table(&path).unwrap();
        assert_eq!(table.categories, vec!["国立", "公立"]);
        assert_eq!(table.rows[1].student_count, 170_000);
    }

    #[test]
    fn json_record_without_required_key_is_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "years.json",
            r#"[
                {"学校種": "大学", "年度": "令和6", "学生数(単位:人)": 10, "学校数(単位:校)": 1},
                {"学校種": "大学", "年度": "令和7", "学生数(単位:人)": 11}
            ]"#,
        );

        match load_year_table(&path) {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, COL_SCHOOL_COUNT),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn json_that_is_not_an_array_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "years.json", r#"{"学校種": "大学"}"#);

        assert!(matches!(load_year_table(&path), Err(LoadError::Json { .. })));
    }

    #[test]
    fn load_datasets_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            year_data_path: write(
                &dir,
                "years.csv",
                "学校種,年度,学生数(単位:人),学校数(単位:校)\n大学,令和7,10,1\n",
            ),
            category_data_path: write(
                &dir,
                "cats.csv",
                "学校種,設置区分,学生数(単位:人)\n大学,国立,4\n",
            ),
            ..AppConfig::default()
        };

        let datasets = load_datasets(&config).unwrap();
        assert_eq!(datasets.years.len(), 1);
        assert_eq!(datasets.categories.len(), 1);
    }

    #[test]
    fn load_datasets_fails_when_either_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            year_data_path: write(
                &dir,
                "years.csv",
                "学校種,年度,学生数(単位:人),学校数(単位:校)\n大学,令和7,10,1\n",
            ),
            category_data_path: dir.path().join("absent.csv"),
            ..AppConfig::default()
        };

        assert!(matches!(load_datasets(&config), Err(LoadError::Io { .. })));
    }
}
