use thiserror::Error;

/// Failure taxonomy for the decision engine. Every variant is scoped to a
/// single request; none of them is fatal for the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Bad financial inputs. Not retryable; surface as a validation message.
    #[error("invalid financial profile: {0}")]
    InvalidProfile(String),

    /// Malformed offer data. Not retryable; excludes the offer from ranking.
    #[error("invalid offer price: {0}")]
    InvalidOfferPrice(String),

    /// Transient upstream failure. Retryable on the next request; within a
    /// recommendation call it downgrades the offer to unrankable.
    #[error("exchange rate unavailable: {0}")]
    RateUnavailable(String),

    /// Every offer on the item failed rate or tax resolution.
    #[error("no rankable offers for this item")]
    NoRankableOffers,
}

pub type Result<T> = std::result::Result<T, EngineError>;
