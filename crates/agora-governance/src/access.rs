//! Access control policy shared by every governance entry point.

use agora_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

/// Governance roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Superuser, normally the deployer
    Admin,
    /// Elected through a proposal
    Chairman,
}

/// Who may do what. Holds the governance contract's own address so that
/// self-dispatched calls can be told apart from direct ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessPolicy {
    admin: Address,
    chairman: Address,
    governance: Address,
}

impl AccessPolicy {
    /// The admin starts out as chairman.
    pub fn new(admin: Address, governance: Address) -> Self {
        Self {
            admin,
            chairman: admin,
            governance,
        }
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn chairman(&self) -> Address {
        self.chairman
    }

    pub fn governance(&self) -> Address {
        self.governance
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        match role {
            Role::Admin => *account == self.admin,
            Role::Chairman => *account == self.chairman,
        }
    }

    /// Admin or chairman.
    pub fn require_officer(&self, caller: Address) -> Result<(), GovernanceError> {
        if self.has_role(Role::Admin, &caller) || self.has_role(Role::Chairman, &caller) {
            Ok(())
        } else {
            Err(GovernanceError::Unauthorized(caller))
        }
    }

    /// Admin, chairman, or governance itself executing a proposal.
    pub fn require_officer_or_self(&self, caller: Address) -> Result<(), GovernanceError> {
        if caller == self.governance {
            return Ok(());
        }
        self.require_officer(caller)
    }

    /// Only governance itself executing a proposal.
    pub fn require_self(&self, caller: Address) -> Result<(), GovernanceError> {
        if caller == self.governance {
            Ok(())
        } else {
            Err(GovernanceError::MustGoThroughProposal)
        }
    }

    pub fn set_chairman(&mut self, caller: Address, chairman: Address) -> Result<(), GovernanceError> {
        self.require_self(caller)?;
        self.chairman = chairman;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    #[test]
    fn test_admin_starts_as_chairman() {
        let policy = AccessPolicy::new(addr(1), addr(9));
        assert!(policy.has_role(Role::Admin, &addr(1)));
        assert!(policy.has_role(Role::Chairman, &addr(1)));
        assert!(policy.require_officer(addr(1)).is_ok());
    }

    #[test]
    fn test_stranger_is_rejected_by_name() {
        let policy = AccessPolicy::new(addr(1), addr(9));
        assert_eq!(
            policy.require_officer(addr(2)),
            Err(GovernanceError::Unauthorized(addr(2)))
        );
        assert!(policy.require_officer_or_self(addr(9)).is_ok());
    }

    #[test]
    fn test_chairman_changes_only_through_self() {
        let mut policy = AccessPolicy::new(addr(1), addr(9));
        assert_eq!(
            policy.set_chairman(addr(1), addr(2)),
            Err(GovernanceError::MustGoThroughProposal)
        );

        policy.set_chairman(addr(9), addr(2)).unwrap();
        assert_eq!(policy.chairman(), addr(2));
        // Admin keeps its powers after an election
        assert!(policy.require_officer(addr(1)).is_ok());
        assert!(policy.require_officer(addr(2)).is_ok());
    }
}
