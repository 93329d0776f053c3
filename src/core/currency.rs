//! Currency conversion abstractions

use crate::core::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A quote for one currency pair. Never mutated after creation; a stale
/// quote is replaced, not edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
}

impl ExchangeRate {
    pub fn pair(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<ExchangeRate>;
}
