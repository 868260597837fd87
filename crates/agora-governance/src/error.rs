use agora_staking::StakingError;
use agora_types::{Address, Amount, Timestamp};
use thiserror::Error;

/// Errors that can occur in governance operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("Unauthorized: {0}")]
    Unauthorized(Address),

    #[error("Proposal not found: {0}")]
    NotFound(u64),

    #[error("Proposal already finalized")]
    AlreadyFinalized,

    #[error("Debate period ended")]
    DebatePeriodEnded,

    #[error("Debate period not over: ends at {ends_at}")]
    DebateNotOver { ends_at: Timestamp },

    #[error("Account already voted on this proposal")]
    DoubleVote,

    #[error("Insufficient voting power: requested {requested}, available {available}")]
    InsufficientVotingPower { requested: Amount, available: Amount },

    /// Turnout below quorum. Both operands are shares of total stake at
    /// `SCALE`: the observed ratio and the configured minimum.
    #[error("MinimalVotingQuorum({actual}, {required})")]
    MinimalVotingQuorum { actual: Amount, required: Amount },

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Must be called through a proposal")]
    MustGoThroughProposal,

    #[error("Invalid proposal: {0}")]
    InvalidProposal(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Staking error: {0}")]
    Staking(#[from] StakingError),
}
