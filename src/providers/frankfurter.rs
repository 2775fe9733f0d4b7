use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::core::series::{HistoricalRateProvider, RatePoint};

// FrankfurterProvider implementation for HistoricalRateProvider
pub struct FrankfurterProvider {
    base_url: String,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HistoricalRateResponse {
    // The service echoes the date it actually resolved, which may differ from
    // the requested date (weekends and holidays resolve to the prior business
    // day). The echoed date is authoritative.
    date: NaiveDate,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl HistoricalRateProvider for FrankfurterProvider {
    async fn rate_on(&self, date: NaiveDate, from: &str, to: &str) -> Result<RatePoint> {
        let endpoint = format!("/{}?from={}&to={}", date.format("%Y-%m-%d"), from, to);
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Requesting historical rate from {}", url);

        let client = reqwest::Client::builder().user_agent("globex/1.0").build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for {} to {} on {}", e, from, to, date))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for {} to {} on {}",
                response.status(),
                from,
                to,
                date
            ));
        }

        let text = response.text().await?;

        let data: HistoricalRateResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", date, e))?;

        let rate = data
            .rates
            .get(to)
            .copied()
            .ok_or_else(|| anyhow!("No rate for {} on {}", to, date))?;

        Ok(RatePoint {
            date: data.date,
            rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_server = MockServer::start().await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        let mock_response = r#"{
            "amount": 1.0,
            "base": "USD",
            "date": "2025-01-03",
            "rates": {
                "INR": 83.25
            }
        }"#;

        Mock::given(method("GET"))
            .and(path("/2025-01-03"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "INR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let point = provider
            .rate_on(date("2025-01-03"), "USD", "INR")
            .await
            .unwrap();
        assert_eq!(point.date, date("2025-01-03"));
        assert_eq!(point.rate, 83.25);
    }

    #[tokio::test]
    async fn test_echoed_date_wins_over_requested_date() {
        let mock_server = MockServer::start().await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        // A Sunday request resolves to the prior Friday
        let mock_response = r#"{
            "amount": 1.0,
            "base": "USD",
            "date": "2025-01-03",
            "rates": {
                "INR": 83.25
            }
        }"#;

        Mock::given(method("GET"))
            .and(path("/2025-01-05"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let point = provider
            .rate_on(date("2025-01-05"), "USD", "INR")
            .await
            .unwrap();
        assert_eq!(point.date, date("2025-01-03"));
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/2025-01-03"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = provider.rate_on(date("2025-01-03"), "USD", "INR").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 404 Not Found for USD to INR on 2025-01-03"
        );
    }

    #[tokio::test]
    async fn test_missing_target_code() {
        let mock_server = MockServer::start().await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        let mock_response = r#"{
            "amount": 1.0,
            "base": "USD",
            "date": "2025-01-03",
            "rates": {
                "EUR": 0.92
            }
        }"#;

        Mock::given(method("GET"))
            .and(path("/2025-01-03"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let result = provider.rate_on(date("2025-01-03"), "USD", "INR").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rate for INR on 2025-01-03"
        );
    }
}
