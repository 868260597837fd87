//! The capability governance holds over the ledger.

use agora_types::{Address, Amount, Timestamp};

use crate::error::StakingError;

/// Read stake for voting power and push lock expiry later. Nothing else:
/// governance never mutates stake amounts.
pub trait StakeView {
    /// Currently staked amount of `account` (zero when absent).
    fn staked_amount(&self, account: &Address) -> Amount;

    /// Sum of all staked amounts.
    fn total_staked(&self) -> Amount;

    /// Lock expiry of `account`, if it has a stake.
    fn lock_expiry(&self, account: &Address) -> Option<Timestamp>;

    /// Set `lock_expiry = max(lock_expiry, candidate_expiry)` for `account`.
    /// Only the registered governance address may call this.
    fn extend_lock(
        &mut self,
        caller: Address,
        account: Address,
        candidate_expiry: Timestamp,
    ) -> Result<Timestamp, StakingError>;
}
