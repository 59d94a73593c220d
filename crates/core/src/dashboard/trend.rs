//! Bucketed spending and volume trends.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::service::DashboardService;
use super::snapshot::LedgerSnapshot;
use super::types::{Timeframe, TrendMetric, TrendPoint, TrendSeries};
use crate::documents::Document;

/// Days per bucket of the month view.
const MONTH_BUCKET_DAYS: i64 = 5;
/// Buckets of the month view.
const MONTH_BUCKETS: i64 = 6;
/// Buckets of the year view.
const YEAR_BUCKETS: u32 = 12;

/// An empty trend bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Display label.
    pub label: String,
    /// First day.
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl Bucket {
    fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Buckets ending with `today`, oldest first.
///
/// - week: 7 daily buckets
/// - month: 6 buckets of 5 days covering 30 days
/// - year: 12 calendar months ending with the current month
#[must_use]
pub fn buckets(timeframe: Timeframe, today: NaiveDate) -> Vec<Bucket> {
    match timeframe {
        Timeframe::Week => (0..7)
            .rev()
            .map(|back| {
                let day = today - Duration::days(back);
                Bucket {
                    label: day.format("%a %d").to_string(),
                    start: day,
                    end: day,
                }
            })
            .collect(),
        Timeframe::Month => {
            let first = today - Duration::days(MONTH_BUCKETS * MONTH_BUCKET_DAYS - 1);
            (0..MONTH_BUCKETS)
                .map(|i| {
                    let start = first + Duration::days(i * MONTH_BUCKET_DAYS);
                    let end = start + Duration::days(MONTH_BUCKET_DAYS - 1);
                    Bucket {
                        label: format!("{} - {}", start.format("%b %d"), end.format("%b %d")),
                        start,
                        end,
                    }
                })
                .collect()
        }
        Timeframe::Year => {
            let Some(current) = today.with_day(1) else {
                return Vec::new();
            };
            (0..YEAR_BUCKETS)
                .rev()
                .filter_map(|back| {
                    let start = current.checked_sub_months(Months::new(back))?;
                    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
                    Some(Bucket {
                        label: start.format("%b %Y").to_string(),
                        start,
                        end,
                    })
                })
                .collect()
        }
    }
}

impl DashboardService {
    /// Builds a trend series over posted purchase orders and vendor bills.
    #[must_use]
    pub fn trend(
        snapshot: &LedgerSnapshot,
        metric: TrendMetric,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> TrendSeries {
        let buckets = buckets(timeframe, now.date_naive());
        let since = buckets.first().map_or(now, |b| {
            b.start.and_hms_opt(0, 0, 0).map_or(now, |t| t.and_utc())
        });
        let documents: Vec<&Document> = snapshot.spend_since(since).collect();

        let points = buckets
            .into_iter()
            .map(|bucket| {
                let in_bucket = documents
                    .iter()
                    .filter(|d| bucket.contains(d.created_on()));
                let value: Decimal = match metric {
                    TrendMetric::Spending => in_bucket.map(|d| d.total_amount).sum(),
                    TrendMetric::TransactionVolume => Decimal::from(in_bucket.count()),
                };
                TrendPoint {
                    label: bucket.label,
                    start: bucket.start,
                    end: bucket.end,
                    value,
                }
            })
            .collect();

        TrendSeries {
            metric,
            timeframe,
            points,
        }
    }
}
