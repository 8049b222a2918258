use crate::analyzers::types::{SalaryDynamics, VacancyAggregate, YearFigure, YearSeries};

/// Averages each year that has at least one sample. Empty years are dropped,
/// not zero-filled, so the result may cover fewer years than the tracked range.
pub fn finalize_years(series: &YearSeries) -> Vec<YearFigure> {
    series
        .iter()
        .filter(|(_, acc)| !acc.is_empty())
        .map(|(year, acc)| YearFigure {
            year,
            avg_salary: acc.floor_mean(),
            vacancies: acc.count,
        })
        .collect()
}

pub fn salary_dynamics(aggregate: &VacancyAggregate) -> SalaryDynamics {
    SalaryDynamics {
        all: finalize_years(&aggregate.all),
        profession: finalize_years(&aggregate.profession),
    }
}
