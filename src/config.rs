//! Pipeline configuration.
//!
//! Everything the pipeline needs is carried by [`PipelineConfig`]; nothing is
//! read from process-wide state once the entry point has been called.

use std::ops::RangeInclusive;
use std::env;
use std::path::PathBuf;

pub const FIRST_YEAR: i32 = 2007;
pub const LAST_YEAR: i32 = 2022;

/// Cities with fewer than this share of all vacancies are left out of the rankings.
pub const MIN_CITY_SHARE: f64 = 0.01;

pub const TOP_CITIES: usize = 10;

pub const DEFAULT_OUTPUT: &str = "report.xlsx";

/// Environment variables consulted when a CLI argument is absent.
pub const INPUT_ENV: &str = "VACANCY_INPUT";
pub const PROFESSION_ENV: &str = "VACANCY_PROFESSION";

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub profession: String,
    pub years: RangeInclusive<i32>,
    pub min_city_share: f64,
    pub top_cities: usize,
}

impl PipelineConfig {
    pub fn new(input: impl Into<PathBuf>, profession: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            profession: profession.into(),
            years: FIRST_YEAR..=LAST_YEAR,
            min_city_share: MIN_CITY_SHARE,
            top_cities: TOP_CITIES,
        }
    }

    pub fn with_years(mut self, years: RangeInclusive<i32>) -> Self {
        self.years = years;
        self
    }
}

/// Returns the CLI value if given, otherwise a non-empty value of `env_key`.
pub fn resolve_setting(cli_value: Option<String>, env_key: &str) -> Option<String> {
    cli_value.or_else(|| env::var(env_key).ok().filter(|v| !v.trim().is_empty()))
}

/// Path flavour of [`resolve_setting`]. The CLI path is kept as given, so
/// names that are not valid UTF-8 still reach the reader intact.
pub fn resolve_path(cli_value: Option<PathBuf>, env_key: &str) -> Option<PathBuf> {
    cli_value.or_else(|| {
        env::var_os(env_key)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}
