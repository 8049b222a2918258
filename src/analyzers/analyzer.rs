use tracing::info;

use crate::analyzers::aggregate::aggregate_vacancies;
use crate::analyzers::dynamics::salary_dynamics;
use crate::analyzers::rank::Ranker;
use crate::analyzers::types::VacancyAggregate;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::parser::VacancyReader;
use crate::report::ReportBundle;

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub bundle: ReportBundle,
    pub total_vacancies: usize,
    pub skipped_rows: usize,
}

/// Streams the input once, then finalizes, ranks and assembles the bundle.
#[tracing::instrument(skip(config), fields(input = %config.input.display(), profession = %config.profession))]
pub fn analyze(config: &PipelineConfig) -> Result<PipelineRun> {
    let (aggregate, skipped_rows) = load_aggregate(config)?;

    info!(
        total_vacancies = aggregate.total_vacancies,
        skipped_rows,
        cities = aggregate.cities.len(),
        "Input aggregated"
    );

    let bundle = build_bundle(config, &aggregate);

    Ok(PipelineRun {
        bundle,
        total_vacancies: aggregate.total_vacancies,
        skipped_rows,
    })
}

/// The reader lives only inside this function, so the file is closed before
/// the aggregate is returned or an error propagates.
fn load_aggregate(config: &PipelineConfig) -> Result<(VacancyAggregate, usize)> {
    let mut reader = VacancyReader::open(&config.input)?;
    let aggregate = aggregate_vacancies(
        reader.by_ref(),
        &config.profession,
        config.years.clone(),
    )?;
    Ok((aggregate, reader.skipped()))
}

pub fn build_bundle(config: &PipelineConfig, aggregate: &VacancyAggregate) -> ReportBundle {
    let dynamics = salary_dynamics(aggregate);
    let ranking = Ranker::new(config.min_city_share, config.top_cities)
        .rank_cities(aggregate.total_vacancies, &aggregate.cities);

    ReportBundle::assemble(&dynamics, &ranking)
}
