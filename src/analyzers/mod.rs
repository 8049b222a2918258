//! Vacancy aggregation and city ranking.
//!
//! This module streams parsed vacancies into per-year and per-city salary
//! accumulators, finalizes yearly averages, filters and ranks cities, and
//! assembles the result into a [`crate::report::ReportBundle`].

pub mod aggregate;
pub mod analyzer;
pub mod dynamics;
pub mod rank;
pub mod types;
pub mod utility;
