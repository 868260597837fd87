//! In-memory host used by the unit tests.

use std::collections::HashMap;

use agora_staking::{StakeView, StakingError};
use agora_types::{Address, Amount, Timestamp};

use crate::host::ExecutionHost;

#[derive(Debug, Default)]
pub struct MockHost {
    pub governance: Address,
    pub stakes: HashMap<Address, Amount>,
    pub locks: HashMap<Address, Timestamp>,
    pub calls: Vec<(Address, Address, Vec<u8>)>,
    pub fail_calls: bool,
    pub burned: Amount,
}

impl MockHost {
    pub fn new(governance: Address) -> Self {
        Self {
            governance,
            ..Default::default()
        }
    }

    pub fn with_stake(mut self, account: Address, amount: Amount) -> Self {
        self.stakes.insert(account, amount);
        self.locks.insert(account, 0);
        self
    }
}

impl StakeView for MockHost {
    fn staked_amount(&self, account: &Address) -> Amount {
        self.stakes.get(account).copied().unwrap_or(0)
    }

    fn total_staked(&self) -> Amount {
        self.stakes.values().sum()
    }

    fn lock_expiry(&self, account: &Address) -> Option<Timestamp> {
        self.locks.get(account).copied()
    }

    fn extend_lock(
        &mut self,
        caller: Address,
        account: Address,
        candidate_expiry: Timestamp,
    ) -> Result<Timestamp, StakingError> {
        if caller != self.governance {
            return Err(StakingError::Unauthorized(caller));
        }
        let lock = self.locks.get_mut(&account).ok_or(StakingError::NotFound(account))?;
        *lock = (*lock).max(candidate_expiry);
        Ok(*lock)
    }
}

impl ExecutionHost for MockHost {
    fn call(&mut self, caller: Address, target: Address, data: &[u8], _now: Timestamp) -> Result<(), String> {
        if self.fail_calls {
            return Err("reverted".to_string());
        }
        self.calls.push((caller, target, data.to_vec()));
        Ok(())
    }

    fn buy_back_and_burn(&mut self, _caller: Address, native_amount: Amount) -> Result<Amount, String> {
        if self.fail_calls {
            return Err("swap reverted".to_string());
        }
        self.burned += native_amount * 2;
        Ok(native_amount * 2)
    }
}
