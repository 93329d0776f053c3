//! Smart Choice: ranks an item's offers against a financial snapshot.

use crate::core::affordability::{AffordabilityPolicy, Verdict};
use crate::core::currency::RateProvider;
use crate::core::error::{EngineError, Result};
use crate::core::offer::{Item, Offer, OfferFlag};
use crate::core::profile::Snapshot;
use crate::core::tax::{LandedCost, TaxRuleSet};
use futures::future::join_all;
use tracing::{debug, warn};

/// One offer that survived cost resolution, with its comparison cost in
/// local currency and the resulting verdict.
#[derive(Debug, Clone)]
pub struct RankedOffer {
    pub retailer: String,
    pub verdict: Verdict,
    pub comparison_cost: f64,
    /// Present only for foreign-currency offers.
    pub landed: Option<LandedCost>,
    pub flags: Vec<OfferFlag>,
}

/// An offer excluded from ranking, reported with its failure reason rather
/// than silently dropped.
#[derive(Debug, Clone)]
pub struct UnrankableOffer {
    pub retailer: String,
    pub reason: EngineError,
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub item: String,
    /// Best first: verdict severity, then cost, then retailer id.
    pub ranked: Vec<RankedOffer>,
    pub unrankable: Vec<UnrankableOffer>,
}

impl Recommendation {
    /// All offers tied at the top rank. Ties on verdict and cost are
    /// co-recommendations; the engine never picks one arbitrarily.
    pub fn smart_choices(&self) -> &[RankedOffer] {
        let Some(best) = self.ranked.first() else {
            return &[];
        };
        let ties = self
            .ranked
            .iter()
            .take_while(|r| r.verdict == best.verdict && r.comparison_cost == best.comparison_cost)
            .count();
        &self.ranked[..ties]
    }
}

/// The recommendation engine. Borrows its collaborators per call; the only
/// shared state lives behind the rate provider.
pub struct SmartChoice<'a> {
    rates: &'a dyn RateProvider,
    rules: &'a TaxRuleSet,
    policy: &'a AffordabilityPolicy,
    local_currency: &'a str,
}

impl<'a> SmartChoice<'a> {
    pub fn new(
        rates: &'a dyn RateProvider,
        rules: &'a TaxRuleSet,
        policy: &'a AffordabilityPolicy,
        local_currency: &'a str,
    ) -> Self {
        SmartChoice {
            rates,
            rules,
            policy,
            local_currency,
        }
    }

    /// Ranks every resolvable offer on the item. A single offer failing rate
    /// or tax resolution is excluded and reported, not fatal; the call fails
    /// with `NoRankableOffers` only when nothing survives.
    pub async fn recommend(&self, item: &Item, snapshot: &Snapshot) -> Result<Recommendation> {
        let resolutions = join_all(
            item.offers
                .iter()
                .map(|offer| self.resolve_offer(offer, snapshot)),
        )
        .await;

        let mut ranked = Vec::new();
        let mut unrankable = Vec::new();
        for (offer, resolution) in item.offers.iter().zip(resolutions) {
            match resolution {
                Ok(entry) => ranked.push(entry),
                Err(reason) => {
                    warn!(
                        retailer = %offer.retailer,
                        %reason,
                        "Offer excluded from ranking"
                    );
                    unrankable.push(UnrankableOffer {
                        retailer: offer.retailer.clone(),
                        reason,
                    });
                }
            }
        }

        if ranked.is_empty() {
            return Err(EngineError::NoRankableOffers);
        }

        ranked.sort_by(|a, b| {
            a.verdict
                .cmp(&b.verdict)
                .then_with(|| a.comparison_cost.total_cmp(&b.comparison_cost))
                .then_with(|| a.retailer.cmp(&b.retailer))
        });

        debug!(
            item = %item.name,
            ranked = ranked.len(),
            unrankable = unrankable.len(),
            "Ranked offers"
        );

        Ok(Recommendation {
            item: item.name.clone(),
            ranked,
            unrankable,
        })
    }

    async fn resolve_offer(&self, offer: &Offer, snapshot: &Snapshot) -> Result<RankedOffer> {
        let (comparison_cost, landed) = if offer.currency == self.local_currency {
            if !offer.cash_price.is_finite() || offer.cash_price <= 0.0 {
                return Err(EngineError::InvalidOfferPrice(format!(
                    "cash price {} for retailer {} is not a positive amount",
                    offer.cash_price, offer.retailer
                )));
            }
            (offer.cash_price, None)
        } else {
            let rate = self
                .rates
                .get_rate(&offer.currency, self.local_currency)
                .await?;
            let landed = self.rules.landed_cost(offer, &rate)?;
            (landed.total, Some(landed))
        };

        let verdict = self.policy.analyze(snapshot, comparison_cost, None);

        Ok(RankedOffer {
            retailer: offer.retailer.clone(),
            verdict,
            comparison_cost,
            landed,
            flags: offer.flags(),
        })
    }
}
