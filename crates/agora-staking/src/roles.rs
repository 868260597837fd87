//! Admin and changer capabilities of the ledger.

use std::collections::HashSet;

use agora_types::Address;

use crate::error::StakingError;

/// Ledger roles. The admin may grant and revoke the changer capability;
/// admin and changers may tune parameters.
#[derive(Debug, Clone)]
pub struct StakingRoles {
    admin: Address,
    changers: HashSet<Address>,
}

impl StakingRoles {
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            changers: HashSet::new(),
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn is_changer(&self, account: &Address) -> bool {
        self.changers.contains(account)
    }

    pub fn require_admin(&self, caller: Address) -> Result<(), StakingError> {
        if caller == self.admin {
            Ok(())
        } else {
            Err(StakingError::Unauthorized(caller))
        }
    }

    /// Admin or changer.
    pub fn require_changer(&self, caller: Address) -> Result<(), StakingError> {
        if caller == self.admin || self.changers.contains(&caller) {
            Ok(())
        } else {
            Err(StakingError::Unauthorized(caller))
        }
    }

    pub fn grant(&mut self, caller: Address, account: Address) -> Result<(), StakingError> {
        self.require_admin(caller)?;
        self.changers.insert(account);
        Ok(())
    }

    pub fn revoke(&mut self, caller: Address, account: Address) -> Result<(), StakingError> {
        self.require_admin(caller)?;
        self.changers.remove(&account);
        Ok(())
    }
}
