use agora_governance::GovernanceError;
use agora_staking::StakingError;
use agora_token::TokenError;
use agora_types::Address;
use thiserror::Error;

/// Errors surfaced by the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Staking error: {0}")]
    Staking(#[from] StakingError),

    #[error("Governance error: {0}")]
    Governance(#[from] GovernanceError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Address already in use: {0}")]
    AddressInUse(Address),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// The governance error, if this is one.
    pub fn as_governance(&self) -> Option<&GovernanceError> {
        match self {
            EngineError::Governance(e) => Some(e),
            _ => None,
        }
    }
}
