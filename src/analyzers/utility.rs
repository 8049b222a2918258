/// `floor(sum / count)` as an unsigned integer. Returns 0 for an empty sample.
pub fn floor_mean(sum: f64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    (sum / count as f64).floor() as u64
}

/// `part / total` rounded to four decimal places. Returns 0.0 when `total` is 0.
pub fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64, 4)
}

/// Rounds the exact binary value of `value` to `places` decimal digits.
///
/// Scaling by a power of ten first would turn values just below a decimal
/// tie (e.g. 2.675, stored as 2.67499...) into an exact tie and round them up.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_mean() {
        assert_eq!(floor_mean(3001.0, 2), 1500);
        assert_eq!(floor_mean(9099.000000000002, 1), 9099);
        assert_eq!(floor_mean(10.0, 0), 0);
    }

    #[test]
    fn test_share() {
        assert_eq!(share(200, 10_000), 0.02);
        assert_eq!(share(1, 3), 0.3333);
        assert_eq!(share(2, 3), 0.6667);
        assert_eq!(share(5, 0), 0.0);
    }

    #[test]
    fn test_round_to_uses_exact_binary_value() {
        // Both are stored slightly below the decimal tie.
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(0.00015, 4), 0.0001);
        assert_eq!(round_to(0.12345678, 4), 0.1235);
        assert_eq!(round_to(1.0, 4), 1.0);
    }
}
