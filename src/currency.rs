//! Fixed currency table used to normalize salaries to roubles.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;

/// Currency codes that appear in the vacancy exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Currency {
    Azn,
    Byr,
    Eur,
    Gel,
    Kgs,
    Kzt,
    Rur,
    Uah,
    Usd,
    Uzs,
}

impl Currency {
    pub const ALL: [Currency; 10] = [
        Currency::Azn,
        Currency::Byr,
        Currency::Eur,
        Currency::Gel,
        Currency::Kgs,
        Currency::Kzt,
        Currency::Rur,
        Currency::Uah,
        Currency::Usd,
        Currency::Uzs,
    ];

    /// Conversion rate into RUR.
    ///
    /// | Code | Rate   |
    /// |------|--------|
    /// | AZN  | 35.68  |
    /// | BYR  | 23.91  |
    /// | EUR  | 59.90  |
    /// | GEL  | 21.74  |
    /// | KGS  | 0.76   |
    /// | KZT  | 0.13   |
    /// | RUR  | 1      |
    /// | UAH  | 1.64   |
    /// | USD  | 60.66  |
    /// | UZS  | 0.0055 |
    pub fn rub_rate(self) -> f64 {
        match self {
            Currency::Azn => 35.68,
            Currency::Byr => 23.91,
            Currency::Eur => 59.90,
            Currency::Gel => 21.74,
            Currency::Kgs => 0.76,
            Currency::Kzt => 0.13,
            Currency::Rur => 1.0,
            Currency::Uah => 1.64,
            Currency::Usd => 60.66,
            Currency::Uzs => 0.0055,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Azn => "AZN",
            Currency::Byr => "BYR",
            Currency::Eur => "EUR",
            Currency::Gel => "GEL",
            Currency::Kgs => "KGS",
            Currency::Kzt => "KZT",
            Currency::Rur => "RUR",
            Currency::Uah => "UAH",
            Currency::Usd => "USD",
            Currency::Uzs => "UZS",
        }
    }
}

impl FromStr for Currency {
    type Err = ReportError;

    /// Codes are matched exactly; there is no case folding and no fallback rate.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| ReportError::UnknownCurrency(code.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_round_trips_through_parse() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn test_rates() {
        assert_eq!(Currency::Rur.rub_rate(), 1.0);
        assert_eq!(Currency::Usd.rub_rate(), 60.66);
        assert_eq!(Currency::Uzs.rub_rate(), 0.0055);
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = "JPY".parse::<Currency>().unwrap_err();
        assert!(matches!(err, ReportError::UnknownCurrency(code) if code == "JPY"));
    }

    #[test]
    fn test_lowercase_code_is_rejected() {
        assert!("usd".parse::<Currency>().is_err());
    }
}
