//! Offers and items as supplied by the surrounding application. The engine
//! only reads them; creation and editing happen elsewhere.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

fn default_installment_count() -> u32 {
    1
}

fn default_interest_free() -> bool {
    true
}

/// One retailer's pricing for an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub retailer: String,
    pub cash_price: f64,
    pub installment_price: f64,
    #[serde(default = "default_installment_count")]
    pub installment_count: u32,
    /// ISO-style currency code the prices are denominated in.
    pub currency: String,
    #[serde(default = "default_interest_free")]
    pub interest_free: bool,
    #[serde(default)]
    pub url: Option<String>,
}

/// Data-quality findings on a single offer. Violations are flagged for the
/// caller, never silently corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferFlag {
    /// Installment price below the cash price with more than one installment.
    InstallmentBelowCash,
    /// Installment count of zero supplied where at least one is required.
    ZeroInstallments,
}

impl Display for OfferFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OfferFlag::InstallmentBelowCash => "installment price below cash price",
                OfferFlag::ZeroInstallments => "installment count is zero",
            }
        )
    }
}

impl Offer {
    pub fn flags(&self) -> Vec<OfferFlag> {
        let mut flags = Vec::new();
        if self.installment_count > 1 && self.installment_price < self.cash_price {
            flags.push(OfferFlag::InstallmentBelowCash);
        }
        if self.installment_count == 0 {
            flags.push(OfferFlag::ZeroInstallments);
        }
        flags
    }

    /// Monthly amount when paying in parts.
    pub fn per_installment(&self) -> f64 {
        self.installment_price / f64::from(self.installment_count.max(1))
    }

    /// Saved amount when paying cash instead of in installments.
    pub fn cash_discount(&self) -> f64 {
        self.installment_price - self.cash_price
    }

    /// Cash discount as a percentage of the installment price.
    pub fn cash_discount_pct(&self) -> f64 {
        if self.installment_price > 0.0 {
            self.cash_discount() / self.installment_price * 100.0
        } else {
            0.0
        }
    }
}

/// A logical product the user wants, with zero or more candidate offers.
/// At most one offer is selected at a time; selection is explicit caller
/// state, never inferred by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub offers: Vec<Offer>,
    /// Retailer id of the explicitly selected offer, if any.
    #[serde(default)]
    pub selected: Option<String>,
}

impl Item {
    pub fn selected_offer(&self) -> Option<&Offer> {
        let retailer = self.selected.as_deref()?;
        self.offers.iter().find(|o| o.retailer == retailer)
    }
}
