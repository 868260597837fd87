use agora_token::TokenError;
use agora_types::{Address, Amount, Timestamp};
use thiserror::Error;

/// Errors that can occur in stake ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StakingError {
    #[error("Unauthorized: {0}")]
    Unauthorized(Address),

    #[error("No stake for account {0}")]
    NotFound(Address),

    #[error("Stake below minimum: {amount} < {minimum}")]
    BelowMinimum { amount: Amount, minimum: Amount },

    #[error("Claim window not elapsed: available at {available_at}")]
    ClaimWindowNotElapsed { available_at: Timestamp },

    #[error("Unstake window not elapsed: unlocks at {unlocks_at}")]
    UnstakeWindowNotElapsed { unlocks_at: Timestamp },

    #[error("Wrong token: expected {expected}, got {actual}")]
    WrongToken { expected: Address, actual: Address },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Invalid call data: {0}")]
    InvalidCallData(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}
