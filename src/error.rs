use thiserror::Error;

use crate::analysis::benchmark::Metric;
use crate::domain::rank::Tier;

/// Raised when a value object is built from data that breaks its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} cannot be blank")]
    Blank(&'static str),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    #[error("match {match_id} must have exactly {expected} participants, got {actual}")]
    ParticipantCount {
        match_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("participant {player_id} belongs to match {found}, not {expected}")]
    ForeignParticipant {
        player_id: String,
        expected: String,
        found: String,
    },

    #[error("participant {player_id} lasted {found}s in match {match_id}, which lasted {expected}s")]
    DurationMismatch {
        player_id: String,
        match_id: String,
        expected: i64,
        found: i64,
    },

    #[error("{tier} has no divisions")]
    UnexpectedDivision { tier: Tier },

    #[error("{tier} requires a division")]
    MissingDivision { tier: Tier },

    #[error("league points must be within 0-100 for {tier}, got {lp}")]
    LeaguePointsOutOfRange { tier: Tier, lp: i32 },

    #[error("unknown tier: {0}")]
    UnknownTier(String),

    #[error("unknown division: {0}")]
    UnknownDivision(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("player {player_id} not found in match {match_id}")]
    NotFound { player_id: String, match_id: String },
}

/// Failures that make a benchmark comparison meaningless.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("benchmark for {tier} is missing metric {metric}")]
    MissingMetric { tier: Tier, metric: Metric },

    #[error("benchmark for {tier} has invalid value {value} for {metric}")]
    InvalidBenchmark { tier: Tier, metric: Metric, value: f64 },

    #[error("no benchmark configured for {0}")]
    MissingTier(Tier),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Player {0} has no ranked solo entry, pass --tier to pick a benchmark")]
    Unranked(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid provider data: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}
