//! Live rate lookup and amount conversion

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Latest rates for a base currency, as reported by the live-rate service.
#[derive(Debug, Clone)]
pub struct LatestRates {
    pub base: String,
    pub rates: HashMap<String, f64>,
}

#[async_trait]
pub trait LiveRateProvider: Send + Sync {
    async fn latest_rates(&self, base: &str) -> Result<LatestRates>;
}

/// A completed conversion between two currencies.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub converted: f64,
    pub rate: f64,
    pub from: String,
    pub to: String,
}

/// Converts `amount` from one currency to another using a single live-rate
/// lookup. Fails when the target code is absent from the response.
pub async fn convert(
    provider: &(dyn LiveRateProvider + Send + Sync),
    amount: f64,
    from: &str,
    to: &str,
) -> Result<Conversion> {
    let latest = provider.latest_rates(from).await?;
    let rate = latest
        .rates
        .get(to)
        .copied()
        .ok_or_else(|| anyhow!("Currency not found: no rate for {} with base {}", to, from))?;

    debug!("Latest rate {from} -> {to}: {rate}");

    Ok(Conversion {
        amount,
        converted: amount * rate,
        rate,
        from: from.to_string(),
        to: to.to_string(),
    })
}
