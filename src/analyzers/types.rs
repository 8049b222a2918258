//! Data types used by the aggregation pipeline.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use crate::analyzers::utility::floor_mean;
use crate::error::{ReportError, Result};

/// Running sum and count of normalized salaries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryAccumulator {
    pub sum: f64,
    pub count: usize,
}

impl SalaryAccumulator {
    pub fn push(&mut self, salary_rub: f64) {
        self.sum += salary_rub;
        self.count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `floor(sum / count)`, or 0 for an empty accumulator.
    pub fn floor_mean(&self) -> u64 {
        floor_mean(self.sum, self.count)
    }
}

/// Salary accumulators keyed by year, pre-seeded for every year of a fixed range.
///
/// Keys outside the range are never inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSeries {
    range: RangeInclusive<i32>,
    years: BTreeMap<i32, SalaryAccumulator>,
}

impl YearSeries {
    pub fn seeded(range: RangeInclusive<i32>) -> Self {
        let years = range
            .clone()
            .map(|year| (year, SalaryAccumulator::default()))
            .collect();
        Self { range, years }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.range.contains(&year)
    }

    pub fn check(&self, year: i32) -> Result<()> {
        if self.contains(year) {
            Ok(())
        } else {
            Err(ReportError::YearOutOfRange {
                year,
                first: *self.range.start(),
                last: *self.range.end(),
            })
        }
    }

    pub fn push(&mut self, year: i32, salary_rub: f64) -> Result<()> {
        self.check(year)?;
        self.years.entry(year).or_default().push(salary_rub);
        Ok(())
    }

    pub fn get(&self, year: i32) -> Option<&SalaryAccumulator> {
        self.years.get(&year)
    }

    /// Ascending by year, including seeded years that never got a sample.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &SalaryAccumulator)> {
        self.years.iter().map(|(year, acc)| (*year, acc))
    }

    pub fn total_count(&self) -> usize {
        self.years.values().map(|acc| acc.count).sum()
    }
}

/// Salary accumulators keyed by city, iterated in first-seen order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CityStats {
    entries: Vec<(String, SalaryAccumulator)>,
    index: HashMap<String, usize>,
}

impl CityStats {
    pub fn push(&mut self, city: &str, salary_rub: f64) {
        let slot = match self.index.get(city) {
            Some(&slot) => slot,
            None => {
                self.entries.push((city.to_string(), SalaryAccumulator::default()));
                self.index.insert(city.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].1.push(salary_rub);
    }

    pub fn get(&self, city: &str) -> Option<&SalaryAccumulator> {
        self.index.get(city).map(|&slot| &self.entries[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SalaryAccumulator)> {
        self.entries.iter().map(|(city, acc)| (city.as_str(), acc))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of the single aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct VacancyAggregate {
    pub total_vacancies: usize,
    pub all: YearSeries,
    pub profession: YearSeries,
    pub cities: CityStats,
}

/// Finalized figures for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearFigure {
    pub year: i32,
    pub avg_salary: u64,
    pub vacancies: usize,
}

/// Per-year figures for all vacancies and for the profession, ascending by year.
/// Years without samples are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalaryDynamics {
    pub all: Vec<YearFigure>,
    pub profession: Vec<YearFigure>,
}

impl SalaryDynamics {
    pub fn profession_for(&self, year: i32) -> Option<&YearFigure> {
        self.profession.iter().find(|f| f.year == year)
    }
}

/// Finalized figures for one city that passed the minimum-presence filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityFigure {
    pub city: String,
    pub avg_salary: u64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCity<T> {
    pub city: String,
    pub value: T,
}

/// Top cities by average salary and by vacancy share, ranked independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CityRanking {
    pub by_salary: Vec<RankedCity<u64>>,
    pub by_share: Vec<RankedCity<f64>>,
}
