use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::rates::{LatestRates, LiveRateProvider};

// ExchangeRateApiProvider implementation for LiveRateProvider
pub struct ExchangeRateApiProvider {
    base_url: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: String,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl LiveRateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "LatestRatesFetch",
        skip(self),
        fields(base = %base)
    )]
    async fn latest_rates(&self, base: &str) -> Result<LatestRates> {
        let endpoint = format!("/v4/latest/{base}");
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Requesting latest rates from {}", url);

        let client = reqwest::Client::builder().user_agent("globex/1.0").build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        Ok(LatestRates {
            base: data.base,
            rates: data.rates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(base: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/v4/latest/{base}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "base": "USD",
            "date": "2025-08-29",
            "rates": {
                "INR": 83.0,
                "EUR": 0.92
            }
        }"#;

        let mock_server = create_mock_server("USD", mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let latest = provider.latest_rates("USD").await.unwrap();
        assert_eq!(latest.base, "USD");
        assert_eq!(latest.rates.get("INR"), Some(&83.0));
        assert_eq!(latest.rates.get("EUR"), Some(&0.92));
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = provider.latest_rates("USD").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_api_malformed_response() {
        let mock_response = r#"{"base": "USD"}"#; // no "rates" mapping

        let mock_server = create_mock_server("USD", mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri());

        let result = provider.latest_rates("USD").await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for USD")
        );
    }
}
