//! Fixed-shape bundle of series handed to the rendering layer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::analyzers::types::{CityRanking, SalaryDynamics};

/// Number of series in a [`ReportBundle`].
pub const SLOT_COUNT: usize = 10;

/// The first five slots fill the yearly sheet, the last five the city sheet.
pub const YEARLY_SLOTS: std::ops::Range<usize> = 0..5;
pub const CITY_SLOTS: std::ops::Range<usize> = 5..10;

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Ratio(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{v}"),
            // Whole ratios keep a trailing `.0`, e.g. a single city with share 1.0.
            Cell::Ratio(v) if v.fract() == 0.0 => write!(f, "{v:.1}"),
            Cell::Ratio(v) => write!(f, "{v}"),
            Cell::Text(v) => f.write_str(v),
        }
    }
}

/// Ten ordered series. Keys and values of each mapping were produced by one
/// traversal, so they zip positionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportBundle {
    pub years: Vec<i32>,
    pub avg_salary: Vec<u64>,
    /// Aligned to `years`; 0 where the profession had no vacancies that year.
    pub profession_avg_salary: Vec<u64>,
    pub vacancies: Vec<usize>,
    /// Aligned to `years`; 0 where the profession had no vacancies that year.
    pub profession_vacancies: Vec<usize>,
    pub salary_cities: Vec<String>,
    pub city_salaries: Vec<u64>,
    pub separator: Vec<String>,
    pub share_cities: Vec<String>,
    pub city_shares: Vec<f64>,
}

impl ReportBundle {
    pub fn assemble(dynamics: &SalaryDynamics, ranking: &CityRanking) -> Self {
        let mut bundle = ReportBundle {
            separator: vec![String::new()],
            ..Default::default()
        };

        for figure in &dynamics.all {
            let profession = dynamics.profession_for(figure.year);

            bundle.years.push(figure.year);
            bundle.avg_salary.push(figure.avg_salary);
            bundle
                .profession_avg_salary
                .push(profession.map_or(0, |p| p.avg_salary));
            bundle.vacancies.push(figure.vacancies);
            bundle
                .profession_vacancies
                .push(profession.map_or(0, |p| p.vacancies));
        }

        for entry in &ranking.by_salary {
            bundle.salary_cities.push(entry.city.clone());
            bundle.city_salaries.push(entry.value);
        }

        for entry in &ranking.by_share {
            bundle.share_cities.push(entry.city.clone());
            bundle.city_shares.push(entry.value);
        }

        bundle
    }

    /// The series in their fixed rendering order.
    pub fn slots(&self) -> [Vec<Cell>; SLOT_COUNT] {
        fn ints<T: Copy + Into<i128>>(values: &[T]) -> Vec<Cell> {
            values
                .iter()
                .map(|v| {
                    let wide: i128 = (*v).into();
                    Cell::Int(i64::try_from(wide).unwrap_or(i64::MAX))
                })
                .collect()
        }
        fn texts(values: &[String]) -> Vec<Cell> {
            values.iter().cloned().map(Cell::Text).collect()
        }
        let counts = |values: &[usize]| -> Vec<Cell> {
            values.iter().map(|v| Cell::Int(*v as i64)).collect()
        };

        [
            ints(&self.years),
            ints(&self.avg_salary),
            ints(&self.profession_avg_salary),
            counts(&self.vacancies),
            counts(&self.profession_vacancies),
            texts(&self.salary_cities),
            ints(&self.city_salaries),
            texts(&self.separator),
            texts(&self.share_cities),
            self.city_shares.iter().map(|v| Cell::Ratio(*v)).collect(),
        ]
    }
}

/// JSON envelope for the `summary` command.
#[derive(Debug, Serialize)]
pub struct ReportSummary<'a> {
    pub generated_at: DateTime<Utc>,
    pub profession: &'a str,
    pub total_vacancies: usize,
    pub skipped_rows: usize,
    pub bundle: &'a ReportBundle,
}
