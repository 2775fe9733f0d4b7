use super::ui;
use crate::core::rates::{self, Conversion, LiveRateProvider};
use anyhow::Result;

/// Runs a live conversion and prints the result line.
pub async fn run(
    provider: &(dyn LiveRateProvider + Send + Sync),
    amount: f64,
    from: &str,
    to: &str,
) -> Result<Conversion> {
    let conversion = rates::convert(provider, amount, from, to).await?;

    println!(
        "{}",
        ui::style_text(
            &format!(
                "{} {} = {:.2} {}",
                conversion.amount, conversion.from, conversion.converted, conversion.to
            ),
            ui::StyleType::ResultValue
        )
    );
    println!(
        "{}",
        ui::style_text(
            &format!("1 {} = {:.4} {}", conversion.from, conversion.rate, conversion.to),
            ui::StyleType::Subtle
        )
    );

    Ok(conversion)
}
