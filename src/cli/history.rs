use super::ui;
use crate::core::series::{self, HistoricalRateProvider};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;

/// Builds and displays the rate history for a currency pair over an inclusive
/// date range: a (date, rate) table followed by summary metrics.
pub async fn run(
    provider: &(dyn HistoricalRateProvider + Send + Sync),
    from: &str,
    to: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<()> {
    let days = (end - start).num_days() + 1;
    let pb = ui::new_progress_bar(days.max(0) as u64, true);
    pb.set_message("Fetching historical rates...");

    let series = series::build_series(provider, from, to, start, end, pb).await?;

    println!(
        "\n{}",
        ui::style_text(
            &format!("{from} to {to} exchange rate history"),
            ui::StyleType::Title
        )
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("Rate ({to})")),
    ]);
    for point in &series.points {
        table.add_row(vec![
            Cell::new(point.date.to_string()),
            ui::value_cell(&format!("{:.4}", point.rate)),
        ]);
    }
    println!("{table}");

    if series.skipped > 0 {
        println!(
            "{}",
            ui::style_text(
                &format!("{} of {} days had no data", series.skipped, days),
                ui::StyleType::Subtle
            )
        );
    }

    if let Some(stats) = series.stats() {
        let mut metrics = ui::new_styled_table();
        metrics.set_header(vec![
            ui::header_cell("Latest"),
            ui::header_cell("Highest"),
            ui::header_cell("Lowest"),
            ui::header_cell("Average"),
        ]);
        metrics.add_row(vec![
            ui::value_cell(&format!("{:.4}", stats.latest)),
            ui::value_cell(&format!("{:.4}", stats.highest)),
            ui::value_cell(&format!("{:.4}", stats.lowest)),
            ui::value_cell(&format!("{:.4}", stats.average)),
        ]);
        println!("{metrics}");
    }

    Ok(())
}
