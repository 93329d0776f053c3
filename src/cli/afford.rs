use super::ui;
use crate::core::affordability::InstallmentPlan;
use crate::core::config::AppConfig;
use crate::core::profile;
use anyhow::Result;
use comfy_table::Cell;

/// Checks a target price against the configured financial profile and
/// prints the snapshot alongside the verdict.
pub fn run(config: &AppConfig, price: f64, installments: Option<u32>) -> Result<()> {
    if installments == Some(0) {
        anyhow::bail!("Installment count must be at least 1");
    }

    let snapshot = profile::aggregate(&config.profile)?;
    let plan = installments.map(|count| InstallmentPlan { price, count });
    let verdict = config.policy.analyze(&snapshot, price, plan.as_ref());

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Free cash flow"),
        ui::header_cell("Commitment"),
        ui::header_cell("Tier"),
    ]);
    table.add_row(vec![
        ui::money_cell(snapshot.free_cash_flow, &config.currency),
        Cell::new(format!("{:.1}%", snapshot.commitment_ratio * 100.0)),
        Cell::new(snapshot.alert_tier.to_string()),
    ]);
    println!("{table}");

    match &plan {
        Some(plan) => println!(
            "\n{} in {}x of {}: {}",
            ui::format_money(price, &config.currency),
            plan.count,
            ui::format_money(plan.per_installment(), &config.currency),
            ui::style_text(&verdict.to_string(), ui::StyleType::TotalLabel)
        ),
        None => {
            println!(
                "\n{} cash ({} months of savings): {}",
                ui::format_money(price, &config.currency),
                config.policy.horizon_months,
                ui::style_text(&verdict.to_string(), ui::StyleType::TotalLabel)
            );
            match config.policy.suggest_installments(&snapshot, price) {
                Some(suggestion) => println!(
                    "{}",
                    ui::style_text(
                        &format!(
                            "In parts: fits from {}x of {}, comfortable at {}x of {}",
                            suggestion.minimum,
                            ui::format_money(
                                price / f64::from(suggestion.minimum),
                                &config.currency
                            ),
                            suggestion.comfortable,
                            ui::format_money(
                                price / f64::from(suggestion.comfortable),
                                &config.currency
                            ),
                        ),
                        ui::StyleType::Subtle
                    )
                ),
                None => println!(
                    "{}",
                    ui::style_text(
                        &format!(
                            "No installment run up to {}x brings the payment within budget",
                            config.policy.max_installments
                        ),
                        ui::StyleType::Subtle
                    )
                ),
            }
        }
    }

    Ok(())
}
