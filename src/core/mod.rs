//! Core decision-engine logic

pub mod affordability;
pub mod cache;
pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod offer;
pub mod profile;
pub mod recommend;
pub mod tax;

// Re-export main types for cleaner imports
pub use affordability::{
    AffordabilityPolicy, InstallmentPlan, InstallmentSuggestion, PaymentStrategy, Verdict,
};
pub use currency::{ExchangeRate, RateProvider};
pub use error::EngineError;
pub use offer::{Item, Offer, OfferFlag};
pub use profile::{AlertTier, FinancialProfile, Snapshot, aggregate};
pub use recommend::{RankedOffer, Recommendation, SmartChoice, UnrankableOffer};
pub use tax::{LandedCost, TaxRuleSet};
