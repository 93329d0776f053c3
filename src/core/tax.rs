//! Jurisdictional import-tax rules and landed-cost computation

use crate::core::currency::ExchangeRate;
use crate::core::error::{EngineError, Result};
use crate::core::offer::Offer;
use serde::{Deserialize, Serialize};

/// Versioned import-tax rule set. Rates and band limits are configuration so
/// historical landed costs stay reproducible under the rule set that
/// produced them.
///
/// Bands apply to the converted (local currency) price with inclusive lower
/// bounds: `[0, exempt_below)` pays no duty, `[exempt_below, full_above)`
/// pays the reduced rate, `[full_above, ..)` pays the full rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRuleSet {
    pub version: String,
    pub exempt_below: f64,
    pub reduced_rate: f64,
    pub full_above: f64,
    pub full_rate: f64,
    /// ICMS-style state tax applied to the duty-inclusive subtotal.
    pub state_tax_rate: f64,
}

impl Default for TaxRuleSet {
    fn default() -> Self {
        // Remessa Conforme bands, expressed in local currency
        TaxRuleSet {
            version: "remessa-conforme-2024".to_string(),
            exempt_below: 275.0,
            reduced_rate: 0.20,
            full_above: 16_500.0,
            full_rate: 0.60,
            state_tax_rate: 0.17,
        }
    }
}

/// Landed local-currency cost of a foreign-priced offer. Immutable once
/// computed for a given (offer, rate, rule version) triple; recomputed, not
/// mutated, when any input changes.
#[derive(Debug, Clone, PartialEq)]
pub struct LandedCost {
    pub converted_price: f64,
    pub duty_rate: f64,
    pub duty: f64,
    pub state_tax: f64,
    pub total: f64,
    pub rule_version: String,
}

impl TaxRuleSet {
    pub fn duty_rate_for(&self, converted_price: f64) -> f64 {
        if converted_price >= self.full_above {
            self.full_rate
        } else if converted_price >= self.exempt_below {
            self.reduced_rate
        } else {
            0.0
        }
    }

    pub fn landed_cost(&self, offer: &Offer, rate: &ExchangeRate) -> Result<LandedCost> {
        let converted = offer.cash_price * rate.rate;
        if !converted.is_finite() || converted <= 0.0 {
            return Err(EngineError::InvalidOfferPrice(format!(
                "converted price {} for retailer {} is not a positive amount",
                converted, offer.retailer
            )));
        }

        let duty_rate = self.duty_rate_for(converted);
        let duty = converted * duty_rate;
        let state_tax = (converted + duty) * self.state_tax_rate;

        Ok(LandedCost {
            converted_price: converted,
            duty_rate,
            duty,
            state_tax,
            total: converted + duty + state_tax,
            rule_version: self.version.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn usd_offer(cash_price: f64) -> Offer {
        Offer {
            retailer: "usstore".to_string(),
            cash_price,
            installment_price: cash_price,
            installment_count: 1,
            currency: "USD".to_string(),
            interest_free: true,
            url: None,
        }
    }

    fn rate(value: f64) -> ExchangeRate {
        ExchangeRate {
            from: "USD".to_string(),
            to: "BRL".to_string(),
            rate: value,
            fetched_at: Utc::now(),
        }
    }

    fn rules() -> TaxRuleSet {
        TaxRuleSet {
            version: "test-v1".to_string(),
            exempt_below: 100.0,
            reduced_rate: 0.20,
            full_above: 1000.0,
            full_rate: 0.60,
            state_tax_rate: 0.17,
        }
    }

    #[test]
    fn test_below_exempt_threshold_pays_no_duty() {
        let cost = rules().landed_cost(&usd_offer(19.0), &rate(5.0)).unwrap();
        assert_eq!(cost.converted_price, 95.0);
        assert_eq!(cost.duty, 0.0);
        assert!((cost.state_tax - 95.0 * 0.17).abs() < 1e-9);
        assert!((cost.total - 95.0 * 1.17).abs() < 1e-9);
    }

    #[test]
    fn test_exact_threshold_pays_reduced_rate() {
        // Inclusive lower bound: the boundary belongs to the reduced band,
        // not the exempt one
        let cost = rules().landed_cost(&usd_offer(20.0), &rate(5.0)).unwrap();
        assert_eq!(cost.converted_price, 100.0);
        assert_eq!(cost.duty_rate, 0.20);
        assert_eq!(cost.duty, 20.0);
    }

    #[test]
    fn test_exact_ceiling_pays_full_rate() {
        let cost = rules().landed_cost(&usd_offer(200.0), &rate(5.0)).unwrap();
        assert_eq!(cost.converted_price, 1000.0);
        assert_eq!(cost.duty_rate, 0.60);
        assert_eq!(cost.duty, 600.0);
        assert!((cost.state_tax - 1600.0 * 0.17).abs() < 1e-9);
        assert!((cost.total - 1600.0 * 1.17).abs() < 1e-9);
    }

    #[test]
    fn test_rule_version_recorded_on_result() {
        let cost = rules().landed_cost(&usd_offer(10.0), &rate(5.0)).unwrap();
        assert_eq!(cost.rule_version, "test-v1");
    }

    #[test]
    fn test_zero_converted_price_is_invalid() {
        let result = rules().landed_cost(&usd_offer(0.0), &rate(5.0));
        assert!(matches!(result, Err(EngineError::InvalidOfferPrice(_))));
    }

    #[test]
    fn test_negative_converted_price_is_invalid() {
        let result = rules().landed_cost(&usd_offer(-10.0), &rate(5.0));
        assert!(matches!(result, Err(EngineError::InvalidOfferPrice(_))));
    }
}
