//! Agora Engine - a stake-weighted governance engine.
//!
//! Wires the stake ledger, the DAO and their token collaborators into one
//! state machine, routes dispatched proposal calls to their targets, and
//! carries configuration and telemetry.
//!
//! Every operation takes the caller's current time explicitly.

pub mod config;
pub mod engine;
pub mod error;
pub mod router;
pub mod shared;
pub mod telemetry;

pub use config::{EngineConfig, LoggingConfig, TokenConfig};
pub use engine::{Engine, ExternalCallHandler};
pub use error::EngineError;
pub use shared::SharedEngine;
pub use telemetry::init_telemetry;

pub use agora_governance::{GovernanceAction, Proposal, ProposalStatus, VoteReceipt};
pub use agora_staking::{StakeRecord, StakingCall};
pub use agora_token::TokenCall;
pub use agora_types::{Address, Amount, Timestamp, SCALE};
