use serde::Serialize;

use crate::currency::Currency;
use crate::error::{ReportError, Result};

/// One vacancy row in canonical field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacancyRecord {
    pub name: String,
    pub salary_from: i64,
    pub salary_to: i64,
    pub currency: Currency,
    pub area_name: String,
    pub published_year: i32,
}

impl VacancyRecord {
    /// Builds a record from the six canonical fields:
    /// name, salary_from, salary_to, currency, area, published date.
    pub fn from_fields(fields: [&str; 6]) -> Result<Self> {
        let [name, salary_from, salary_to, currency, area_name, published_at] = fields;

        Ok(VacancyRecord {
            name: name.to_string(),
            salary_from: parse_salary(salary_from)?,
            salary_to: parse_salary(salary_to)?,
            currency: currency.parse()?,
            area_name: area_name.to_string(),
            published_year: parse_year(published_at)?,
        })
    }

    /// Mid-point of the salary bounds converted to roubles. Not rounded.
    pub fn salary_rub(&self) -> f64 {
        (self.salary_from as f64 + self.salary_to as f64) * self.currency.rub_rate() * 0.5
    }
}

/// Salary bounds may carry a fractional part (`"30000.0"`); it is truncated.
fn parse_salary(raw: &str) -> Result<i64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ReportError::MalformedSalary(raw.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(ReportError::MalformedSalary(raw.to_string()));
    }

    Ok(value.trunc() as i64)
}

/// Year is the leading `-`-separated token, e.g. `2022-07-05T18:19:30+0300`.
fn parse_year(raw: &str) -> Result<i32> {
    raw.split('-')
        .next()
        .map(str::trim)
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| ReportError::MalformedDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(from: &str, to: &str, currency: &str, date: &str) -> Result<VacancyRecord> {
        VacancyRecord::from_fields(["Engineer", from, to, currency, "Moscow", date])
    }

    #[test]
    fn test_from_fields_canonical_row() {
        let v = record("1000", "2000", "RUR", "2020-01-01").unwrap();

        assert_eq!(v.name, "Engineer");
        assert_eq!(v.salary_from, 1000);
        assert_eq!(v.salary_to, 2000);
        assert_eq!(v.currency, Currency::Rur);
        assert_eq!(v.area_name, "Moscow");
        assert_eq!(v.published_year, 2020);
        assert_relative_eq!(v.salary_rub(), 1500.0);
    }

    #[test]
    fn test_salary_rub_usd() {
        let v = record("100", "200", "USD", "2019-05-01").unwrap();
        assert_relative_eq!(v.salary_rub(), 150.0 * 60.66, epsilon = 1e-9);
        assert_eq!(v.salary_rub().floor() as i64, 9099);
    }

    #[test]
    fn test_salary_rub_matches_rate_for_every_currency() {
        for currency in Currency::ALL {
            let v = record("30000", "50000", currency.code(), "2015-01-01").unwrap();
            assert_relative_eq!(v.salary_rub(), 40000.0 * currency.rub_rate(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_huge_salary_bounds_do_not_overflow() {
        let v = record("1e19", "1e19", "RUR", "2020").unwrap();

        assert_eq!(v.salary_from, i64::MAX);
        assert!(v.salary_rub().is_finite());
        assert_relative_eq!(v.salary_rub(), i64::MAX as f64);
    }

    #[test]
    fn test_fractional_salary_is_truncated() {
        let v = record("1000.9", "2000.5", "RUR", "2020").unwrap();
        assert_eq!(v.salary_from, 1000);
        assert_eq!(v.salary_to, 2000);
    }

    #[test]
    fn test_year_from_full_timestamp() {
        let v = record("1", "1", "RUR", "2022-07-05T18:19:30+0300").unwrap();
        assert_eq!(v.published_year, 2022);
    }

    #[test]
    fn test_malformed_date() {
        let err = record("1", "1", "RUR", "05.07.2022").unwrap_err();
        assert!(matches!(err, ReportError::MalformedDate(_)));
    }

    #[test]
    fn test_malformed_salary() {
        assert!(matches!(
            record("abc", "1", "RUR", "2020").unwrap_err(),
            ReportError::MalformedSalary(_)
        ));
        assert!(matches!(
            record("-5", "1", "RUR", "2020").unwrap_err(),
            ReportError::MalformedSalary(_)
        ));
    }

    #[test]
    fn test_unknown_currency() {
        let err = record("1", "1", "XXX", "2020").unwrap_err();
        assert!(matches!(err, ReportError::UnknownCurrency(_)));
    }
}
