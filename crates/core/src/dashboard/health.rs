//! Health classification shared by KPIs, alerts, and reports.

use rust_decimal::Decimal;

use super::types::HealthStatus;

/// Highest utilization still classed healthy.
pub const HEALTHY_MAX: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
/// Highest utilization still classed warning.
pub const WARNING_MAX: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Classifies a utilization percentage.
///
/// `<= 70` healthy, `(70, 90]` warning, `> 90` critical.
#[must_use]
pub fn classify_health(utilization: Decimal) -> HealthStatus {
    if utilization <= HEALTHY_MAX {
        HealthStatus::Healthy
    } else if utilization <= WARNING_MAX {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), HealthStatus::Healthy)]
    #[case(dec!(70.0), HealthStatus::Healthy)]
    #[case(dec!(70.01), HealthStatus::Warning)]
    #[case(dec!(90.0), HealthStatus::Warning)]
    #[case(dec!(90.01), HealthStatus::Critical)]
    #[case(dec!(250), HealthStatus::Critical)]
    #[case(dec!(-5), HealthStatus::Healthy)]
    fn test_health_boundaries(#[case] utilization: Decimal, #[case] expected: HealthStatus) {
        assert_eq!(classify_health(utilization), expected);
    }
}
