//! Percentage helpers shared by achievement and dashboard figures.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero, the way the reports present figures.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `part / whole * 100` rounded to `dp` places, or zero when `whole` is not positive.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal, dp: u32) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_half_up(part / whole * Decimal::ONE_HUNDRED, dp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(7000), dec!(10000), 2), dec!(70.00));
        assert_eq!(percent_of(dec!(82000), dec!(200000), 2), dec!(41.00));
        assert_eq!(percent_of(dec!(1), dec!(3), 1), dec!(33.3));
    }

    #[test]
    fn test_percent_of_zero_whole() {
        assert_eq!(percent_of(dec!(500), Decimal::ZERO, 2), Decimal::ZERO);
        assert_eq!(percent_of(dec!(500), dec!(-10), 2), Decimal::ZERO);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(round_half_up(dec!(0.125), 2), dec!(0.13));
        assert_eq!(round_half_up(dec!(70.05), 1), dec!(70.1));
        assert_eq!(round_half_up(dec!(-0.125), 2), dec!(-0.13));
    }
}
