/// Error types for the evodrop engine
use alloy_primitives::U256;
use thiserror::Error;

/// Top-level error type for the drop engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Allowlist error: {0}")]
    Allowlist(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Claim rejected: {0}")]
    Claim(#[from] ClaimError),
}

/// Rejection taxonomy for claim processing and registry updates.
///
/// Every variant is a rejected transaction with no partial state change;
/// callers must treat these as expected-and-catchable, never as a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("no claim condition is currently active")]
    NoActiveCondition,

    #[error("claim condition {0} is not active")]
    ConditionNotActive(usize),

    #[error("claimer is not on the allowlist for this condition")]
    NotWhitelisted,

    #[error("requested quantity {requested} exceeds the allowed limit {limit}")]
    QuantityExceeded { requested: u64, limit: u64 },

    #[error("claim would exceed max claimable supply ({claimed}/{max} claimed, {requested} requested)")]
    SupplyExceeded {
        claimed: u64,
        max: u64,
        requested: u64,
    },

    #[error("claimer must wait {wait}s between claims ({elapsed}s elapsed)")]
    ClaimTooSoon { wait: u64, elapsed: u64 },

    #[error("payment does not match the configured price or currency")]
    InvalidPrice,

    #[error("insufficient balance of card {card} to redeem")]
    InsufficientRedeemBalance { card: U256 },

    #[error("invalid condition list: {0}")]
    InvalidConditionList(String),

    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("card {0} is not claimable under this condition")]
    InvalidCardId(U256),
}
