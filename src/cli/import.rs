use super::ui;
use crate::core::config::AppConfig;
use crate::core::currency::RateProvider;
use crate::core::offer::Offer;
use anyhow::Result;
use comfy_table::Cell;

/// Computes and prints the landed local-currency cost of a foreign-priced
/// product under the configured tax rule set.
pub async fn run(
    config: &AppConfig,
    rates: &(dyn RateProvider + Send + Sync),
    price: f64,
    currency: &str,
) -> Result<()> {
    let rate = rates.get_rate(currency, &config.currency).await?;

    // One-off offer for the ad-hoc price being quoted
    let offer = Offer {
        retailer: "import".to_string(),
        cash_price: price,
        installment_price: price,
        installment_count: 1,
        currency: currency.to_string(),
        interest_free: true,
        url: None,
    };
    let landed = config.tax.landed_cost(&offer, &rate)?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Cost component"), ui::header_cell("Amount")]);
    table.add_row(vec![
        Cell::new(format!("Price ({currency})")),
        ui::money_cell(price, currency),
    ]);
    table.add_row(vec![
        Cell::new(format!("Converted at {:.4}", rate.rate)),
        ui::money_cell(landed.converted_price, &config.currency),
    ]);
    table.add_row(vec![
        Cell::new(format!("Import duty ({:.0}%)", landed.duty_rate * 100.0)),
        ui::money_cell(landed.duty, &config.currency),
    ]);
    table.add_row(vec![
        Cell::new(format!("State tax ({:.0}%)", config.tax.state_tax_rate * 100.0)),
        ui::money_cell(landed.state_tax, &config.currency),
    ]);
    println!("{table}");

    println!(
        "\nLanded cost: {}  {}",
        ui::style_text(
            &ui::format_money(landed.total, &config.currency),
            ui::StyleType::TotalValue
        ),
        ui::style_text(&format!("[rules {}]", landed.rule_version), ui::StyleType::Subtle)
    );

    Ok(())
}
