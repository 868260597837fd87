//! Agora Governance - stake-weighted proposals.
//!
//! This crate provides:
//! - Access control (admin and elected chairman)
//! - Proposal registry with clamped debate periods
//! - Vote accounting that extends the voter's stake lock
//! - One-shot resolution with quorum check and call dispatch
//! - Chairman elections as self-targeted proposals

pub mod access;
pub mod action;
pub mod dao;
pub mod election;
pub mod error;
pub mod executor;
pub mod host;
pub mod params;
pub mod proposal;
pub mod voting;

#[cfg(test)]
mod testing;

pub use access::{AccessPolicy, Role};
pub use action::{GovernanceAction, ProposalAction};
pub use dao::Dao;
pub use error::GovernanceError;
pub use executor::quorum_ratio;
pub use host::ExecutionHost;
pub use params::GovernanceParams;
pub use proposal::{Proposal, ProposalRegistry, ProposalStatus};
pub use voting::{VoteReceipt, VoteSupport};
