//! Proposal lifecycle management.
//!
//! Proposals go through states: Open -> Passed/Rejected/QuorumFailed.
//! The terminal transition happens exactly once.

use std::collections::BTreeMap;

use agora_types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};

use crate::action::ProposalAction;
use crate::error::GovernanceError;
use crate::voting::VoteSupport;

/// Proposal status in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Debate running or awaiting finalization
    Open,
    /// More stake for than against; action was dispatched
    Passed,
    /// Quorum met but not enough support
    Rejected,
    /// Too little of the total stake voted
    QuorumFailed,
}

impl ProposalStatus {
    /// Check if this is a terminal status.
    pub fn is_final(&self) -> bool {
        !matches!(self, ProposalStatus::Open)
    }
}

/// A governance proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique proposal ID, starting at 1
    pub id: u64,
    pub proposer: Address,
    pub description: String,
    /// What happens if it passes
    pub action: ProposalAction,
    pub created_at: Timestamp,
    /// Votes are accepted strictly before this instant
    pub debate_end_time: Timestamp,
    /// Stake-weighted support
    pub for_votes: Amount,
    /// Stake-weighted opposition
    pub against_votes: Amount,
    pub status: ProposalStatus,
    pub finalized: bool,
}

impl Proposal {
    /// Create an open proposal whose debate ends at `created_at + duration`.
    pub fn new(
        id: u64,
        proposer: Address,
        description: String,
        action: ProposalAction,
        created_at: Timestamp,
        duration: Timestamp,
    ) -> Result<Self, GovernanceError> {
        let debate_end_time = created_at
            .checked_add(duration)
            .ok_or(GovernanceError::Overflow)?;

        Ok(Self {
            id,
            proposer,
            description,
            action,
            created_at,
            debate_end_time,
            for_votes: 0,
            against_votes: 0,
            status: ProposalStatus::Open,
            finalized: false,
        })
    }

    /// Check that votes are still accepted at `now`.
    pub fn ensure_votable(&self, now: Timestamp) -> Result<(), GovernanceError> {
        if self.finalized {
            return Err(GovernanceError::AlreadyFinalized);
        }
        if now >= self.debate_end_time {
            return Err(GovernanceError::DebatePeriodEnded);
        }
        Ok(())
    }

    /// Check that the proposal may be finalized at `now`.
    pub fn ensure_finishable(&self, now: Timestamp) -> Result<(), GovernanceError> {
        if self.finalized {
            return Err(GovernanceError::AlreadyFinalized);
        }
        if now < self.debate_end_time {
            return Err(GovernanceError::DebateNotOver {
                ends_at: self.debate_end_time,
            });
        }
        Ok(())
    }

    /// Add `amount` to one side of the tally.
    pub fn add_votes(&mut self, support: VoteSupport, amount: Amount) -> Result<(), GovernanceError> {
        let side = match support {
            VoteSupport::For => &mut self.for_votes,
            VoteSupport::Against => &mut self.against_votes,
        };
        *side = side.checked_add(amount).ok_or(GovernanceError::Overflow)?;
        Ok(())
    }

    /// Undo a previous [`Proposal::add_votes`].
    pub(crate) fn remove_votes(&mut self, support: VoteSupport, amount: Amount) {
        let side = match support {
            VoteSupport::For => &mut self.for_votes,
            VoteSupport::Against => &mut self.against_votes,
        };
        *side = side.saturating_sub(amount);
    }

    /// Get total votes cast.
    pub fn total_votes(&self) -> Amount {
        self.for_votes.saturating_add(self.against_votes)
    }

    /// Strict majority; a tie does not pass.
    pub fn has_majority(&self) -> bool {
        self.for_votes > self.against_votes
    }

    pub(crate) fn finalize(&mut self, status: ProposalStatus) {
        self.status = status;
        self.finalized = true;
    }
}

/// Proposal registry managing all proposals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalRegistry {
    proposals: BTreeMap<u64, Proposal>,
    next_id: u64,
}

impl ProposalRegistry {
    /// Create a new registry.
    pub fn new() -> Self {
        Self {
            proposals: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Store a new proposal and return its id.
    pub fn create(
        &mut self,
        proposer: Address,
        description: String,
        action: ProposalAction,
        created_at: Timestamp,
        duration: Timestamp,
    ) -> Result<u64, GovernanceError> {
        let id = self.next_id;
        let proposal = Proposal::new(id, proposer, description, action, created_at, duration)?;

        self.proposals.insert(id, proposal);
        self.next_id += 1;
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        self.proposals.get(&id).ok_or(GovernanceError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: u64) -> Result<&mut Proposal, GovernanceError> {
        self.proposals.get_mut(&id).ok_or(GovernanceError::NotFound(id))
    }

    /// Id of the most recently created proposal, 0 if none.
    pub fn last_index(&self) -> u64 {
        self.next_id - 1
    }

    /// Get proposals by status.
    pub fn by_status(&self, status: ProposalStatus) -> Vec<&Proposal> {
        self.proposals
            .values()
            .filter(|p| p.status == status)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

impl Default for ProposalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action() -> ProposalAction {
        ProposalAction::External {
            target: Address::from_bytes([3u8; 20]),
            call_data: vec![1],
        }
    }

    #[test]
    fn test_proposal_creation() {
        let proposal = Proposal::new(1, Address::ZERO, "Test".to_string(), action(), 100, 50).unwrap();

        assert_eq!(proposal.debate_end_time, 150);
        assert_eq!(proposal.status, ProposalStatus::Open);
        assert!(!proposal.finalized);
        assert_eq!(proposal.total_votes(), 0);
    }

    #[test]
    fn test_debate_end_overflow() {
        let err = Proposal::new(1, Address::ZERO, String::new(), action(), u64::MAX, 1).unwrap_err();
        assert_eq!(err, GovernanceError::Overflow);
    }

    #[test]
    fn test_vote_window_boundaries() {
        let proposal = Proposal::new(1, Address::ZERO, String::new(), action(), 100, 50).unwrap();

        assert!(proposal.ensure_votable(149).is_ok());
        assert_eq!(proposal.ensure_votable(150), Err(GovernanceError::DebatePeriodEnded));

        assert_eq!(
            proposal.ensure_finishable(149),
            Err(GovernanceError::DebateNotOver { ends_at: 150 })
        );
        assert!(proposal.ensure_finishable(150).is_ok());
    }

    #[test]
    fn test_tie_does_not_pass() {
        let mut proposal = Proposal::new(1, Address::ZERO, String::new(), action(), 0, 10).unwrap();
        proposal.add_votes(VoteSupport::For, 5).unwrap();
        proposal.add_votes(VoteSupport::Against, 5).unwrap();
        assert!(!proposal.has_majority());

        proposal.add_votes(VoteSupport::For, 1).unwrap();
        assert!(proposal.has_majority());
        assert_eq!(proposal.total_votes(), 11);
    }

    #[test]
    fn test_registry_ids_are_sequential() {
        let mut registry = ProposalRegistry::new();
        assert_eq!(registry.last_index(), 0);
        assert!(registry.is_empty());

        let first = registry.create(Address::ZERO, "a".into(), action(), 0, 10).unwrap();
        let second = registry.create(Address::ZERO, "b".into(), action(), 0, 10).unwrap();

        assert_eq!((first, second), (1, 2));
        assert_eq!(registry.last_index(), 2);
        assert_eq!(registry.get(2).unwrap().description, "b");
        assert_eq!(registry.get(3), Err(GovernanceError::NotFound(3)));
    }

    #[test]
    fn test_failed_create_keeps_counter() {
        let mut registry = ProposalRegistry::new();
        assert!(registry.create(Address::ZERO, String::new(), action(), u64::MAX, 1).is_err());
        assert_eq!(registry.last_index(), 0);
        assert_eq!(registry.create(Address::ZERO, String::new(), action(), 0, 1).unwrap(), 1);
    }
}
