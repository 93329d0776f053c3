use super::ui;
use crate::core::config::AppConfig;
use crate::core::currency::RateProvider;
use crate::core::error::EngineError;
use crate::core::offer::Item;
use crate::core::profile::{self, Snapshot};
use crate::core::recommend::{Recommendation, SmartChoice};
use anyhow::Result;
use comfy_table::Cell;

/// Ranks offers for one named item, or for every configured item when no
/// name is given.
pub async fn run(
    config: &AppConfig,
    rates: &(dyn RateProvider + Send + Sync),
    item_name: Option<&str>,
) -> Result<()> {
    let snapshot = profile::aggregate(&config.profile)?;
    let engine = SmartChoice::new(rates, &config.tax, &config.policy, &config.currency);

    let items: Vec<&Item> = match item_name {
        Some(name) => {
            let item = config
                .find_item(name)
                .ok_or_else(|| anyhow::anyhow!("No item named '{name}' in any project"))?;
            vec![item]
        }
        None => config
            .projects
            .iter()
            .flat_map(|p| p.items.iter())
            .collect(),
    };

    if items.is_empty() {
        println!("No items configured. Add a project to your config file.");
        return Ok(());
    }

    let pb = ui::new_progress_bar(items.len() as u64, true);
    pb.set_message("Evaluating offers...");

    let mut results = Vec::new();
    for item in &items {
        results.push((*item, engine.recommend(item, &snapshot).await));
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "Financial snapshot: {} free, tier {}",
        ui::format_money(snapshot.free_cash_flow, &config.currency),
        ui::tier_text(snapshot.alert_tier)
    );

    let num_results = results.len();
    for (i, (item, result)) in results.into_iter().enumerate() {
        match result {
            Ok(rec) => display_recommendation(&rec, item, &snapshot, config),
            Err(EngineError::NoRankableOffers) => println!(
                "\n{}: {}",
                ui::style_text(&item.name, ui::StyleType::Title),
                ui::style_text("cannot evaluate this item right now", ui::StyleType::Error)
            ),
            Err(e) => return Err(e.into()),
        }
        if i < num_results - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}

fn display_recommendation(
    rec: &Recommendation,
    item: &Item,
    snapshot: &Snapshot,
    config: &AppConfig,
) {
    println!("\n{}", ui::style_text(&rec.item, ui::StyleType::Title));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Retailer"),
        ui::header_cell("Verdict"),
        ui::header_cell(&format!("Cost ({})", config.currency)),
        ui::header_cell("Import duty"),
        ui::header_cell("Plan"),
        ui::header_cell("Pay"),
        ui::header_cell("Notes"),
    ]);

    for ranked in &rec.ranked {
        let source = item.offers.iter().find(|o| o.retailer == ranked.retailer);

        let duty_cell = match &ranked.landed {
            Some(landed) => ui::money_cell(landed.duty + landed.state_tax, &config.currency),
            None => Cell::new("-").set_alignment(comfy_table::CellAlignment::Right),
        };
        let (plan_cell, pay_cell) = match source {
            Some(offer) if offer.installment_count > 1 => {
                let mut plan = format!(
                    "{}x of {}",
                    offer.installment_count,
                    ui::format_money(offer.per_installment(), &offer.currency)
                );
                if !offer.interest_free {
                    plan.push_str(" +interest");
                }
                (
                    Cell::new(plan),
                    Cell::new(config.policy.payment_strategy(snapshot, offer).to_string()),
                )
            }
            _ => (Cell::new("cash only"), Cell::new("pay cash")),
        };

        let mut notes = Vec::new();
        if let Some(offer) = source {
            if offer.cash_discount() > 0.0 {
                notes.push(format!(
                    "cash saves {} ({:.1}%)",
                    ui::format_money(offer.cash_discount(), &offer.currency),
                    offer.cash_discount_pct()
                ));
            }
        }
        notes.extend(ranked.flags.iter().map(ToString::to_string));

        let retailer_cell = if item.selected.as_deref() == Some(ranked.retailer.as_str()) {
            Cell::new(format!("{} *", ranked.retailer))
        } else {
            Cell::new(&ranked.retailer)
        };

        table.add_row(vec![
            retailer_cell,
            ui::verdict_cell(ranked.verdict),
            ui::money_cell(ranked.comparison_cost, &config.currency),
            duty_cell,
            plan_cell,
            pay_cell,
            Cell::new(notes.join("; ")),
        ]);
    }
    println!("{table}");

    let choices = rec.smart_choices();
    let names: Vec<&str> = choices.iter().map(|c| c.retailer.as_str()).collect();
    println!(
        "Smart Choice: {}",
        ui::style_text(&names.join(", "), ui::StyleType::TotalValue)
    );

    if let Some(selected) = item.selected_offer() {
        println!(
            "{}",
            ui::style_text(
                &format!("* currently selected: {}", selected.retailer),
                ui::StyleType::Subtle
            )
        );
    }

    for excluded in &rec.unrankable {
        println!(
            "{}",
            ui::style_text(
                &format!("  excluded {}: {}", excluded.retailer, excluded.reason),
                ui::StyleType::Error
            )
        );
    }
}
