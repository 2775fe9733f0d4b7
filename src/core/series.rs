//! Historical rate series assembly

use anyhow::{Result, anyhow, ensure};
use async_trait::async_trait;
use chrono::NaiveDate;
use indicatif::ProgressBar;
use tracing::debug;

/// One (date, rate) observation. The date is the one echoed by the remote
/// service, which is authoritative over the requested date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// An ascending-by-date series of rate observations. Dates with no data are
/// absent rather than null-filled; `skipped` counts how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    pub points: Vec<RatePoint>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub latest: f64,
    pub highest: f64,
    pub lowest: f64,
    pub average: f64,
}

impl RateSeries {
    pub fn stats(&self) -> Option<SeriesStats> {
        let latest = self.points.last()?.rate;
        let mut highest = f64::MIN;
        let mut lowest = f64::MAX;
        let mut sum = 0.0;
        for point in &self.points {
            highest = highest.max(point.rate);
            lowest = lowest.min(point.rate);
            sum += point.rate;
        }
        Some(SeriesStats {
            latest,
            highest,
            lowest,
            average: sum / self.points.len() as f64,
        })
    }
}

#[async_trait]
pub trait HistoricalRateProvider: Send + Sync {
    async fn rate_on(&self, date: NaiveDate, from: &str, to: &str) -> Result<RatePoint>;
}

/// Builds a rate series for an inclusive date range, one provider call per
/// calendar day, issued sequentially in ascending order.
///
/// A failed date is skipped and iteration continues; only a range that yields
/// zero points is an error. The progress bar is advisory and is incremented
/// once per date regardless of outcome.
///
/// The remote service echoes the date it resolved, so weekend and holiday
/// requests can repeat the prior business day. A point whose echoed date is
/// not after the last collected date is dropped to keep the series strictly
/// increasing.
pub async fn build_series(
    provider: &(dyn HistoricalRateProvider + Send + Sync),
    from: &str,
    to: &str,
    start: NaiveDate,
    end: NaiveDate,
    pb: ProgressBar,
) -> Result<RateSeries> {
    ensure!(
        start <= end,
        "Invalid date range: {} is after {}",
        start,
        end
    );

    let mut points: Vec<RatePoint> = Vec::new();
    let mut skipped = 0usize;

    for date in start.iter_days().take_while(|d| *d <= end) {
        pb.set_message(format!("Fetching {date}"));
        match provider.rate_on(date, from, to).await {
            Ok(point) => match points.last() {
                Some(last) if point.date <= last.date => {
                    debug!(
                        "Skipping {date}: echoed date {} repeats {}",
                        point.date, last.date
                    );
                    skipped += 1;
                }
                _ => points.push(point),
            },
            Err(e) => {
                debug!("Skipping {date}: {e}");
                skipped += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if points.is_empty() {
        return Err(anyhow!(
            "No historical data for {} to {} between {} and {}",
            from,
            to,
            start,
            end
        ));
    }

    Ok(RateSeries { points, skipped })
}
