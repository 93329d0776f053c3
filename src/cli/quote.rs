use super::ui;
use crate::core::currency::RateProvider;
use anyhow::Result;

/// Fetches and prints the current rate for one foreign currency.
pub async fn run(
    rates: &(dyn RateProvider + Send + Sync),
    from: &str,
    local_currency: &str,
) -> Result<()> {
    let rate = rates.get_rate(from, local_currency).await?;

    println!(
        "{}: {} = {}",
        ui::style_text(&rate.pair(), ui::StyleType::Title),
        ui::format_money(1.0, from),
        ui::style_text(
            &ui::format_money(rate.rate, local_currency),
            ui::StyleType::TotalValue
        )
    );
    println!(
        "{}",
        ui::style_text(
            &format!("fetched at {}", rate.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")),
            ui::StyleType::Subtle
        )
    );

    Ok(())
}
