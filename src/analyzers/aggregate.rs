use std::ops::RangeInclusive;
use tracing::trace;

use crate::analyzers::types::{CityStats, VacancyAggregate, YearSeries};
use crate::error::Result;
use crate::vacancy::VacancyRecord;

/// Accumulates vacancies into per-year and per-city salary series in one pass.
pub struct Aggregator {
    profession: String,
    profession_lower: String,
    acc: VacancyAggregate,
}

impl Aggregator {
    pub fn new(profession: &str, years: RangeInclusive<i32>) -> Self {
        Self {
            profession: profession.to_string(),
            profession_lower: profession.to_lowercase(),
            acc: VacancyAggregate {
                total_vacancies: 0,
                all: YearSeries::seeded(years.clone()),
                profession: YearSeries::seeded(years),
                cities: CityStats::default(),
            },
        }
    }

    /// Adds one vacancy. A year outside the tracked range leaves every
    /// accumulator untouched and returns an error.
    pub fn push(&mut self, vacancy: &VacancyRecord) -> Result<()> {
        let year = vacancy.published_year;
        self.acc.all.check(year)?;

        let salary = vacancy.salary_rub();
        let matched = self.matches(&vacancy.name);
        trace!(year, salary, matched, city = %vacancy.area_name, "Vacancy accumulated");

        self.acc.total_vacancies += 1;
        self.acc.all.push(year, salary)?;
        if matched {
            self.acc.profession.push(year, salary)?;
        }
        self.acc.cities.push(&vacancy.area_name, salary);

        Ok(())
    }

    /// The profession matches when it, or its lowercase form, occurs in the vacancy name.
    pub fn matches(&self, vacancy_name: &str) -> bool {
        vacancy_name.contains(&self.profession) || vacancy_name.contains(&self.profession_lower)
    }

    pub fn finish(self) -> VacancyAggregate {
        self.acc
    }
}

/// Folds a stream of parsed vacancies into a [`VacancyAggregate`].
///
/// Stops at the first error, whether it came from parsing or from an
/// out-of-range year.
pub fn aggregate_vacancies<I>(
    records: I,
    profession: &str,
    years: RangeInclusive<i32>,
) -> Result<VacancyAggregate>
where
    I: IntoIterator<Item = Result<VacancyRecord>>,
{
    let mut aggregator = Aggregator::new(profession, years);

    for record in records {
        aggregator.push(&record?)?;
    }

    Ok(aggregator.finish())
}
