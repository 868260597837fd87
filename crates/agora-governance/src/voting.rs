//! Stake-weighted vote accounting.
//!
//! Voting power is the voter's current stake. A vote pushes the voter's lock
//! expiry to the proposal's debate end, so the backing collateral stays in
//! place until the outcome is known.

use agora_staking::StakeView;
use agora_types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dao::Dao;
use crate::error::GovernanceError;

/// Vote support options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteSupport {
    /// Vote in favor
    For,
    /// Vote against
    Against,
}

impl From<bool> for VoteSupport {
    fn from(support: bool) -> Self {
        if support {
            VoteSupport::For
        } else {
            VoteSupport::Against
        }
    }
}

/// Immutable record of one account's vote on one proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub amount_committed: Amount,
    pub support: VoteSupport,
    pub cast_at: Timestamp,
}

impl Dao {
    /// Cast `amount` of `account`'s stake for or against proposal `id`.
    ///
    /// `amount` must be non-zero and at most the current stake; a zero-power
    /// vote is refused with `InsufficientVotingPower`. Either the vote is
    /// recorded and the lock extended, or nothing changes.
    pub fn vote<S: StakeView + ?Sized>(
        &mut self,
        stakes: &mut S,
        account: Address,
        id: u64,
        amount: Amount,
        support: impl Into<VoteSupport>,
        now: Timestamp,
    ) -> Result<VoteReceipt, GovernanceError> {
        let support = support.into();
        let governance = self.address();

        let proposal = self.proposals.get_mut(id)?;
        proposal.ensure_votable(now)?;

        if self.receipts.contains_key(&(id, account)) {
            return Err(GovernanceError::DoubleVote);
        }

        let available = stakes.staked_amount(&account);
        if amount == 0 || amount > available {
            return Err(GovernanceError::InsufficientVotingPower {
                requested: amount,
                available,
            });
        }

        proposal.add_votes(support, amount)?;
        let debate_end_time = proposal.debate_end_time;
        let receipt = VoteReceipt {
            amount_committed: amount,
            support,
            cast_at: now,
        };
        self.receipts.insert((id, account), receipt);

        match stakes.extend_lock(governance, account, debate_end_time) {
            Ok(lock_expiry) => {
                debug!(id, voter = %account, amount, ?support, lock_expiry, "Vote cast");
                Ok(receipt)
            }
            Err(e) => {
                self.receipts.remove(&(id, account));
                if let Ok(proposal) = self.proposals.get_mut(id) {
                    proposal.remove_votes(support, amount);
                }
                Err(e.into())
            }
        }
    }

    /// Amount `account` committed to proposal `id`, zero if it did not vote.
    pub fn get_votes(&self, id: u64, account: &Address) -> Amount {
        self.receipts
            .get(&(id, *account))
            .map(|r| r.amount_committed)
            .unwrap_or(0)
    }

    pub fn receipt(&self, id: u64, account: &Address) -> Option<&VoteReceipt> {
        self.receipts.get(&(id, *account))
    }

    pub fn has_voted(&self, id: u64, account: &Address) -> bool {
        self.receipts.contains_key(&(id, *account))
    }
}
