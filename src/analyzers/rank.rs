use std::cmp::Ordering;
use tracing::debug;

use crate::analyzers::types::{CityFigure, CityRanking, CityStats, RankedCity};
use crate::analyzers::utility::share;

/// Filters long-tail cities and ranks the rest by salary and by vacancy share.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    /// Fraction of all vacancies a city needs to be ranked at all.
    pub min_share: f64,
    pub top: usize,
}

impl Ranker {
    pub fn new(min_share: f64, top: usize) -> Self {
        Self { min_share, top }
    }

    /// `floor(min_share * total)`.
    pub fn min_count(&self, total_vacancies: usize) -> usize {
        (self.min_share * total_vacancies as f64).floor() as usize
    }

    /// Average salary and share for every city at or above the minimum count,
    /// in first-seen order.
    pub fn city_figures(&self, total_vacancies: usize, cities: &CityStats) -> Vec<CityFigure> {
        let min_count = self.min_count(total_vacancies);

        let figures: Vec<CityFigure> = cities
            .iter()
            .filter(|(_, acc)| acc.count >= min_count)
            .map(|(city, acc)| CityFigure {
                city: city.to_string(),
                avg_salary: acc.floor_mean(),
                share: share(acc.count, total_vacancies),
            })
            .collect();

        debug!(
            min_count,
            cities = cities.len(),
            retained = figures.len(),
            "Minimum-presence filter applied"
        );
        figures
    }

    /// Sorts salaries and shares independently, descending and stable on ties,
    /// then keeps the first `top` of each.
    pub fn rank(&self, figures: &[CityFigure]) -> CityRanking {
        let by_salary = top_by(
            figures.iter().map(|f| RankedCity {
                city: f.city.clone(),
                value: f.avg_salary,
            }),
            self.top,
            |a, b| b.cmp(a),
        );

        let by_share = top_by(
            figures.iter().map(|f| RankedCity {
                city: f.city.clone(),
                value: f.share,
            }),
            self.top,
            |a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal),
        );

        CityRanking { by_salary, by_share }
    }

    pub fn rank_cities(&self, total_vacancies: usize, cities: &CityStats) -> CityRanking {
        self.rank(&self.city_figures(total_vacancies, cities))
    }
}

fn top_by<T, F>(items: impl Iterator<Item = RankedCity<T>>, top: usize, cmp: F) -> Vec<RankedCity<T>>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut ranked: Vec<RankedCity<T>> = items.collect();
    ranked.sort_by(|a, b| cmp(&a.value, &b.value));
    ranked.truncate(top);
    ranked
}
