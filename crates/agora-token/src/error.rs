use agora_types::{Address, Amount};
use thiserror::Error;

/// Errors reported by token and swap collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Zero address not allowed")]
    ZeroAddress,

    #[error("{account} is missing role {role}")]
    MissingRole { role: String, account: Address },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Invalid call data: {0}")]
    InvalidCallData(String),

    #[error("Swap failed: {0}")]
    SwapFailed(String),
}
