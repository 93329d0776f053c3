//! Affordability analysis: does a price fit a financial snapshot, and how
//! should it be paid?

use crate::core::offer::Offer;
use crate::core::profile::Snapshot;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Categorical affordability verdict. Variant order is severity order, so
/// the derived `Ord` ranks `Affordable` before `OverBudget`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verdict {
    Affordable,
    Tight,
    OverBudget,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Verdict::Affordable => "AFFORDABLE",
                Verdict::Tight => "TIGHT",
                Verdict::OverBudget => "OVER_BUDGET",
            }
        )
    }
}

/// A concrete payment structure under consideration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InstallmentPlan {
    pub price: f64,
    pub count: u32,
}

impl InstallmentPlan {
    /// Callers validate `count >= 1` at the boundary; a zero count divides
    /// to infinity and can only make the verdict stricter.
    pub fn per_installment(&self) -> f64 {
        self.price / f64::from(self.count)
    }
}

/// How an offer is best paid, cash or in parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStrategy {
    /// The cash discount or avoided interest beats spreading the payments.
    Cash,
    /// Interest-free installments fit the monthly budget; keep the cash.
    Installments,
    /// No meaningful difference; pay whichever way suits the cash flow.
    Either,
}

impl Display for PaymentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PaymentStrategy::Cash => "pay cash",
                PaymentStrategy::Installments => "pay in installments",
                PaymentStrategy::Either => "either",
            }
        )
    }
}

/// Installment counts derived from the current budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentSuggestion {
    /// Fewest installments whose payment fits inside the free cash flow.
    pub minimum: u32,
    /// Fewest installments whose payment stays at a comfortable share of it.
    pub comfortable: u32,
}

/// Tunable thresholds for the analyzer. The defaults are a product choice,
/// not fixed law; callers may override them per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityPolicy {
    /// Months of free cash flow a cash purchase may consume.
    pub horizon_months: f64,
    /// Multiple of the budget up to which a price is merely tight.
    pub tight_multiplier: f64,
    /// Longest installment run retailers commonly offer.
    #[serde(default = "default_max_installments")]
    pub max_installments: u32,
}

fn default_max_installments() -> u32 {
    24
}

/// Share of free cash flow a comfortable installment may take.
const COMFORTABLE_SHARE: f64 = 0.30;

/// Cash discount, in percent, above which paying cash always wins.
const CASH_DISCOUNT_CUTOFF_PCT: f64 = 10.0;

impl Default for AffordabilityPolicy {
    fn default() -> Self {
        AffordabilityPolicy {
            horizon_months: 3.0,
            tight_multiplier: 2.0,
            max_installments: default_max_installments(),
        }
    }
}

impl AffordabilityPolicy {
    /// Pure verdict for a target price against a snapshot.
    ///
    /// Without a plan the price is compared against `horizon_months` worth of
    /// free cash flow; with a plan the per-installment amount is compared
    /// against one month of it. Boundary values resolve to the stricter
    /// (lower) tier.
    pub fn analyze(
        &self,
        snapshot: &Snapshot,
        target_price: f64,
        plan: Option<&InstallmentPlan>,
    ) -> Verdict {
        let (value, budget) = match plan {
            Some(plan) => (plan.per_installment(), snapshot.free_cash_flow),
            None => (target_price, snapshot.free_cash_flow * self.horizon_months),
        };

        if value <= budget {
            Verdict::Affordable
        } else if value <= budget * self.tight_multiplier {
            Verdict::Tight
        } else {
            Verdict::OverBudget
        }
    }

    /// Suggests installment counts for a price, capped at `max_installments`.
    ///
    /// Counts are rounded up so the resulting payment actually fits. Returns
    /// `None` when there is no free cash flow or even the longest run leaves
    /// the payment above it.
    pub fn suggest_installments(
        &self,
        snapshot: &Snapshot,
        price: f64,
    ) -> Option<InstallmentSuggestion> {
        if snapshot.free_cash_flow <= 0.0 || price <= 0.0 || self.max_installments == 0 {
            return None;
        }

        let minimum = (price / snapshot.free_cash_flow).ceil().max(1.0) as u32;
        if minimum > self.max_installments {
            return None;
        }

        let comfortable_payment = snapshot.free_cash_flow * COMFORTABLE_SHARE;
        let comfortable = ((price / comfortable_payment).ceil().max(1.0) as u32)
            .min(self.max_installments);

        Some(InstallmentSuggestion {
            minimum,
            comfortable,
        })
    }

    /// Picks between cash and installments for one offer.
    ///
    /// A cash discount at or above the cutoff wins outright, as does avoiding
    /// charged interest. Interest-free installments that fit the monthly free
    /// cash flow defer cost at no premium. Anything else is a wash.
    pub fn payment_strategy(&self, snapshot: &Snapshot, offer: &Offer) -> PaymentStrategy {
        if offer.cash_discount_pct() >= CASH_DISCOUNT_CUTOFF_PCT {
            return PaymentStrategy::Cash;
        }
        if !offer.interest_free {
            return PaymentStrategy::Cash;
        }
        if offer.installment_count > 1 && offer.per_installment() <= snapshot.free_cash_flow {
            return PaymentStrategy::Installments;
        }
        PaymentStrategy::Either
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::AlertTier;

    fn snapshot(free_cash_flow: f64) -> Snapshot {
        Snapshot {
            free_cash_flow,
            commitment_ratio: 0.4,
            alert_tier: AlertTier::Neutral,
        }
    }

    #[test]
    fn test_cash_purchase_tier_boundaries() {
        let policy = AffordabilityPolicy::default();
        let snap = snapshot(1000.0);

        // Budget is 3 months of free cash flow; ties go to the lower tier
        assert_eq!(policy.analyze(&snap, 3000.0, None), Verdict::Affordable);
        assert_eq!(policy.analyze(&snap, 3000.01, None), Verdict::Tight);
        assert_eq!(policy.analyze(&snap, 6000.0, None), Verdict::Tight);
        assert_eq!(policy.analyze(&snap, 6000.01, None), Verdict::OverBudget);
    }

    #[test]
    fn test_installment_plan_compares_per_installment() {
        let policy = AffordabilityPolicy::default();
        let snap = snapshot(500.0);

        let fits = InstallmentPlan {
            price: 6000.0,
            count: 12,
        };
        assert_eq!(policy.analyze(&snap, 6000.0, Some(&fits)), Verdict::Affordable);

        let tight = InstallmentPlan {
            price: 6000.0,
            count: 6,
        };
        assert_eq!(policy.analyze(&snap, 6000.0, Some(&tight)), Verdict::Tight);

        let heavy = InstallmentPlan {
            price: 6000.0,
            count: 2,
        };
        assert_eq!(policy.analyze(&snap, 6000.0, Some(&heavy)), Verdict::OverBudget);
    }

    #[test]
    fn test_negative_free_cash_flow_is_always_over_budget() {
        let policy = AffordabilityPolicy::default();
        let snap = snapshot(-100.0);
        assert_eq!(policy.analyze(&snap, 10.0, None), Verdict::OverBudget);
    }

    #[test]
    fn test_custom_horizon() {
        let policy = AffordabilityPolicy {
            horizon_months: 6.0,
            ..AffordabilityPolicy::default()
        };
        let snap = snapshot(1000.0);
        assert_eq!(policy.analyze(&snap, 6000.0, None), Verdict::Affordable);
    }

    fn offer(cash: f64, installment: f64, count: u32, interest_free: bool) -> Offer {
        Offer {
            retailer: "loja".to_string(),
            cash_price: cash,
            installment_price: installment,
            installment_count: count,
            currency: "BRL".to_string(),
            interest_free,
            url: None,
        }
    }

    #[test]
    fn test_suggest_installments_rounds_up_to_fit() {
        let policy = AffordabilityPolicy::default();
        let snap = snapshot(1000.0);

        // 2500 / 1000 rounds up to 3x; comfortable payment is 300, so 9x
        let suggestion = policy.suggest_installments(&snap, 2500.0).unwrap();
        assert_eq!(suggestion.minimum, 3);
        assert_eq!(suggestion.comfortable, 9);
        assert!(2500.0 / f64::from(suggestion.minimum) <= snap.free_cash_flow);
    }

    #[test]
    fn test_suggest_installments_caps_at_max() {
        let policy = AffordabilityPolicy {
            max_installments: 12,
            ..AffordabilityPolicy::default()
        };
        let snap = snapshot(1000.0);

        // Comfortable count would be 20x; the cap pulls it back to 12x
        let suggestion = policy.suggest_installments(&snap, 6000.0).unwrap();
        assert_eq!(suggestion.minimum, 6);
        assert_eq!(suggestion.comfortable, 12);

        // Even the longest run cannot fit this price
        assert!(policy.suggest_installments(&snap, 13_000.0).is_none());
    }

    #[test]
    fn test_suggest_installments_requires_free_cash_flow() {
        let policy = AffordabilityPolicy::default();
        assert!(policy.suggest_installments(&snapshot(0.0), 100.0).is_none());
        assert!(policy.suggest_installments(&snapshot(-50.0), 100.0).is_none());
    }

    #[test]
    fn test_cheap_price_suggests_single_installment() {
        let policy = AffordabilityPolicy::default();
        let suggestion = policy
            .suggest_installments(&snapshot(1000.0), 200.0)
            .unwrap();
        assert_eq!(suggestion.minimum, 1);
        assert_eq!(suggestion.comfortable, 1);
    }

    #[test]
    fn test_big_cash_discount_wins() {
        let policy = AffordabilityPolicy::default();
        // 10% discount exactly: 900 cash vs 1000 in parts
        let strategy = policy.payment_strategy(&snapshot(1000.0), &offer(900.0, 1000.0, 10, true));
        assert_eq!(strategy, PaymentStrategy::Cash);
    }

    #[test]
    fn test_charged_interest_means_cash() {
        let policy = AffordabilityPolicy::default();
        let strategy = policy.payment_strategy(&snapshot(1000.0), &offer(980.0, 1040.0, 10, false));
        assert_eq!(strategy, PaymentStrategy::Cash);
    }

    #[test]
    fn test_interest_free_fit_means_installments() {
        let policy = AffordabilityPolicy::default();
        // 100 per installment against 1000 of free cash flow, no discount
        let strategy =
            policy.payment_strategy(&snapshot(1000.0), &offer(1000.0, 1000.0, 10, true));
        assert_eq!(strategy, PaymentStrategy::Installments);
    }

    #[test]
    fn test_oversized_installment_is_a_wash() {
        let policy = AffordabilityPolicy::default();
        // 500 per installment does not fit 300 of free cash flow; the small
        // discount does not clear the cutoff either
        let strategy = policy.payment_strategy(&snapshot(300.0), &offer(980.0, 1000.0, 2, true));
        assert_eq!(strategy, PaymentStrategy::Either);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let policy = AffordabilityPolicy::default();
        let snap = snapshot(1234.56);
        let first = policy.analyze(&snap, 2500.0, None);
        for _ in 0..10 {
            assert_eq!(policy.analyze(&snap, 2500.0, None), first);
        }
    }
}
