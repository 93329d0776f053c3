use crate::core::currency::{ExchangeRate, RateProvider};
use crate::core::error::{EngineError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Exchange rates from an AwesomeAPI-style endpoint:
/// `GET {base_url}/json/last/{FROM}-{TO}` returns a map keyed by the
/// concatenated pair, with the rate in a string `bid` field.
pub struct AwesomeApiProvider {
    base_url: String,
    timeout: Duration,
}

// The API quotes numbers as strings
#[derive(Debug, Deserialize)]
struct PairQuote {
    bid: String,
}

impl AwesomeApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        AwesomeApiProvider {
            base_url: base_url.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl RateProvider for AwesomeApiProvider {
    #[instrument(
        name = "AwesomeApiRateFetch",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn get_rate(&self, from: &str, to: &str) -> Result<ExchangeRate> {
        let url = format!("{}/json/last/{}-{}", self.base_url, from, to);
        debug!("Requesting exchange rate from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fsniper/0.2")
            .timeout(self.timeout)
            .build()
            .map_err(|e| EngineError::RateUnavailable(e.to_string()))?;

        let response = client.get(&url).send().await.map_err(|e| {
            EngineError::RateUnavailable(format!("request error: {e} for pair {from}-{to}"))
        })?;

        if !response.status().is_success() {
            return Err(EngineError::RateUnavailable(format!(
                "HTTP {} for pair {}-{}",
                response.status(),
                from,
                to
            )));
        }

        let payload: HashMap<String, PairQuote> = response.json().await.map_err(|e| {
            EngineError::RateUnavailable(format!(
                "unparsable payload for pair {from}-{to}: {e}"
            ))
        })?;

        let key = format!("{from}{to}");
        let quote = payload.get(&key).ok_or_else(|| {
            EngineError::RateUnavailable(format!("no quote for pair {key} in payload"))
        })?;

        let rate: f64 = quote.bid.parse().map_err(|_| {
            EngineError::RateUnavailable(format!(
                "non-numeric bid {:?} for pair {key}",
                quote.bid
            ))
        })?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EngineError::RateUnavailable(format!(
                "non-positive rate {rate} for pair {key}"
            )));
        }

        Ok(ExchangeRate {
            from: from.to_string(),
            to: to.to_string(),
            rate,
            fetched_at: Utc::now(),
        })
    }
}
