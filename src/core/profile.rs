//! Financial profile aggregation

use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Raw financial inputs as maintained by the surrounding application.
/// All amounts are monthly, in local currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub monthly_income: f64,
    pub fixed_expenses: f64,
    #[serde(default)]
    pub safety_margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTier {
    Critical,
    Warning,
    Positive,
    Neutral,
}

impl Display for AlertTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AlertTier::Critical => "CRITICAL",
                AlertTier::Warning => "WARNING",
                AlertTier::Positive => "POSITIVE",
                AlertTier::Neutral => "NEUTRAL",
            }
        )
    }
}

/// Normalized financial snapshot derived from a profile. Transient; derived
/// per call and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Income left after fixed expenses and the safety margin. May be
    /// negative; it is never clamped.
    pub free_cash_flow: f64,
    /// Fraction of income already obligated to expenses and margin.
    pub commitment_ratio: f64,
    pub alert_tier: AlertTier,
}

/// Derives a snapshot from raw profile fields.
///
/// Tier thresholds: CRITICAL at commitment ratio >= 1.0, WARNING above 0.5,
/// POSITIVE when free cash flow > 500 with ratio <= 0.3, NEUTRAL otherwise.
pub fn aggregate(profile: &FinancialProfile) -> Result<Snapshot> {
    if !profile.monthly_income.is_finite() || profile.monthly_income <= 0.0 {
        return Err(EngineError::InvalidProfile(format!(
            "monthly income must be a positive amount, got {}",
            profile.monthly_income
        )));
    }
    if !profile.fixed_expenses.is_finite() || profile.fixed_expenses < 0.0 {
        return Err(EngineError::InvalidProfile(format!(
            "fixed expenses must be a non-negative amount, got {}",
            profile.fixed_expenses
        )));
    }
    if !profile.safety_margin.is_finite()
        || profile.safety_margin < 0.0
        || profile.safety_margin > profile.monthly_income
    {
        return Err(EngineError::InvalidProfile(format!(
            "safety margin must be between 0 and the monthly income, got {}",
            profile.safety_margin
        )));
    }

    let free_cash_flow =
        profile.monthly_income - profile.fixed_expenses - profile.safety_margin;
    let commitment_ratio =
        (profile.fixed_expenses + profile.safety_margin) / profile.monthly_income;

    let alert_tier = if commitment_ratio >= 1.0 {
        AlertTier::Critical
    } else if commitment_ratio > 0.5 {
        AlertTier::Warning
    } else if free_cash_flow > 500.0 && commitment_ratio <= 0.3 {
        AlertTier::Positive
    } else {
        AlertTier::Neutral
    };

    Ok(Snapshot {
        free_cash_flow,
        commitment_ratio,
        alert_tier,
    })
}
