//! Writes `hi0001_2025.csv` and `hi0001_2025_2.csv` with plausible numbers
//! into the directory given as the first argument (default: `.`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use school_dash::{SchoolCategoryRecord, SchoolYearRecord};

const YEARS: &[&str] = &["令和3", "令和4", "令和5", "令和6", "令和7"];
const LATEST_YEAR: &str = "令和7";

/// (school type, students in the first year, yearly change, schools in the first year, yearly change)
const SCHOOL_TYPES: &[(&str, i64, i64, i64, i64)] = &[
    ("大学", 2_917_998, 12_500, 803, 3),
    ("短期大学", 102_232, -7_800, 315, -6),
    ("高等専門学校", 56_905, 150, 57, 0),
];

/// Share of students per establishment category, in permille.
const CATEGORY_SHARES: &[(&str, &[(&str, i64)])] = &[
    ("大学", &[("国立", 203), ("公立", 57), ("私立", 740)]),
    ("短期大学", &[("国立", 0), ("公立", 52), ("私立", 948)]),
    ("高等専門学校", &[("国立", 902), ("公立", 67), ("私立", 31)]),
];

fn year_rows() -> Vec<SchoolYearRecord> {
    SCHOOL_TYPES
        .iter()
        .flat_map(|&(school_type, students, d_students, schools, d_schools)| {
            YEARS.iter().enumerate().map(move |(i, year)| {
                let step = i as i64;
                SchoolYearRecord {
                    school_type: school_type.to_string(),
                    year: year.to_string(),
                    student_count: (students + d_students * step).max(0) as u64,
                    school_count: (schools + d_schools * step).max(0) as u64,
                }
            })
        })
        .collect()
}

fn category_rows(years: &[SchoolYearRecord]) -> Vec<SchoolCategoryRecord> {
    CATEGORY_SHARES
        .iter()
        .flat_map(|&(school_type, shares)| {
            let total = years
                .iter()
                .find(|r| r.school_type == school_type && r.year == LATEST_YEAR)
                .map_or(0, |r| r.student_count);
            shares.iter().map(move |&(category, permille)| SchoolCategoryRecord {
                school_type: school_type.to_string(),
                category: category.to_string(),
                student_count: total * permille as u64 / 1000,
                year: Some(LATEST_YEAR.to_string()),
            })
        })
        .collect()
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let years = year_rows();
    let categories = category_rows(&years);

    let year_path = out_dir.join("hi0001_2025.csv");
    let category_path = out_dir.join("hi0001_2025_2.csv");
    write_csv(&year_path, &years)?;
    write_csv(&category_path, &categories)?;

    log::info!(
        "Wrote {} rows to {} and {} rows to {}",
        years.len(),
        year_path.display(),
        categories.len(),
        category_path.display()
    );
    println!("Sample data written to {}", out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use school_dash::{AppConfig, load_datasets};

    use super::*;

    #[test]
    fn category_shares_add_up_to_latest_total() {
        let years = year_rows();
        let categories = category_rows(&years);

        for &(school_type, ..) in SCHOOL_TYPES {
            let total = years
                .iter()
                .find(|r| r.school_type == school_type && r.year == LATEST_YEAR)
                .map(|r| r.student_count)
                .expect("latest year row");
            let split: u64 = categories
                .iter()
                .filter(|r| r.school_type == school_type)
                .map(|r| r.student_count)
                .sum();
            // Each share rounds down, so at most one student per category is lost.
            assert!(split <= total && total - split < 3, "{school_type}: {split} vs {total}");
        }
    }

    #[test]
    fn every_school_type_has_every_year() {
        let years = year_rows();
        assert_eq!(years.len(), SCHOOL_TYPES.len() * YEARS.len());
    }

    #[test]
    fn written_files_load_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let years = year_rows();
        let categories = category_rows(&years);
        let config = AppConfig {
            year_data_path: dir.path().join("hi0001_2025.csv"),
            category_data_path: dir.path().join("hi0001_2025_2.csv"),
            ..AppConfig::default()
        };
        write_csv(&config.year_data_path, &years).expect("write years");
        write_csv(&config.category_data_path, &categories).expect("write categories");

        let datasets = load_datasets(&config).expect("load");
        assert_eq!(datasets.years.rows, years);
        assert_eq!(datasets.categories.rows, categories);
        assert_eq!(datasets.years.years, YEARS);
        assert_eq!(datasets.categories.categories, vec!["国立", "公立", "私立"]);
    }
}
