pub mod cli;
pub mod core;
pub mod providers;

use anyhow::{Result, ensure};
use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::currency;
use crate::providers::exchangerate_api::ExchangeRateApiProvider;
use crate::providers::frankfurter::FrankfurterProvider;

pub enum AppCommand {
    Convert {
        amount: f64,
        from: Option<String>,
        to: Option<String>,
        history: bool,
    },
    History {
        from: Option<String>,
        to: Option<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("globex starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let live_base_url = config
        .providers
        .exchange_rate
        .as_ref()
        .map_or("https://api.exchangerate-api.com", |p| &p.base_url);
    let live_provider = ExchangeRateApiProvider::new(live_base_url);

    let historical_base_url = config
        .providers
        .frankfurter
        .as_ref()
        .map_or("https://api.frankfurter.app", |p| &p.base_url);
    let historical_provider = FrankfurterProvider::new(historical_base_url);

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            history,
        } => {
            ensure!(amount >= 0.0, "Amount must be non-negative: {}", amount);
            let from = resolve_code(from, &config.base_currency)?;
            let to = resolve_code(to, &config.target_currency)?;

            cli::convert::run(&live_provider, amount, &from, &to).await?;

            if history {
                let (start, end) = resolve_range(None, None);
                cli::history::run(&historical_provider, &from, &to, start, end).await?;
            }
        }
        AppCommand::History {
            from,
            to,
            start,
            end,
        } => {
            let from = resolve_code(from, &config.base_currency)?;
            let to = resolve_code(to, &config.target_currency)?;
            let (start, end) = resolve_range(start, end);

            cli::history::run(&historical_provider, &from, &to, start, end).await?;
        }
    }

    Ok(())
}

fn resolve_code(code: Option<String>, fallback: &str) -> Result<String> {
    let code = code.unwrap_or_else(|| fallback.to_string()).to_uppercase();
    ensure!(
        currency::is_supported(&code),
        "Unsupported currency code: {}",
        code
    );
    Ok(code)
}

// Defaults to the trailing 30 days ending today.
fn resolve_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> (NaiveDate, NaiveDate) {
    let end = end.unwrap_or_else(|| Local::now().date_naive());
    let start = start.unwrap_or(end - Duration::days(29));
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_code_uses_fallback() {
        assert_eq!(resolve_code(None, "USD").unwrap(), "USD");
        assert_eq!(resolve_code(Some("inr".to_string()), "USD").unwrap(), "INR");
    }

    #[test]
    fn test_resolve_code_rejects_unknown() {
        let result = resolve_code(Some("ZZZ".to_string()), "USD");
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Unsupported currency code: ZZZ"
        );
    }

    #[test]
    fn test_resolve_range_defaults_to_trailing_30_days() {
        let (start, end) = resolve_range(None, None);
        assert_eq!((end - start).num_days(), 29);

        let explicit_end: NaiveDate = "2025-02-01".parse().unwrap();
        let (start, end) = resolve_range(None, Some(explicit_end));
        assert_eq!(end, explicit_end);
        assert_eq!(start, "2025-01-03".parse::<NaiveDate>().unwrap());
    }
}
