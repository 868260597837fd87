//! The governance contract state.

use std::collections::HashMap;

use agora_types::{Address, Amount, Timestamp};
use tracing::info;

use crate::access::AccessPolicy;
use crate::action::ProposalAction;
use crate::error::GovernanceError;
use crate::params::GovernanceParams;
use crate::proposal::{Proposal, ProposalRegistry};
use crate::voting::VoteReceipt;

/// Single governance instance: roles, parameters, proposals, vote receipts
/// and the native balance spent by buy-backs.
#[derive(Debug, Clone)]
pub struct Dao {
    pub(crate) access: AccessPolicy,
    pub(crate) params: GovernanceParams,
    pub(crate) proposals: ProposalRegistry,
    pub(crate) receipts: HashMap<(u64, Address), VoteReceipt>,
    pub(crate) native_balance: Amount,
}

impl Dao {
    /// Create a DAO living at `address`. The admin is also the first chairman.
    pub fn new(address: Address, admin: Address, params: GovernanceParams) -> Result<Self, GovernanceError> {
        params.validate()?;
        Ok(Self {
            access: AccessPolicy::new(admin, address),
            params,
            proposals: ProposalRegistry::new(),
            receipts: HashMap::new(),
            native_balance: 0,
        })
    }

    pub fn address(&self) -> Address {
        self.access.governance()
    }

    pub fn access(&self) -> &AccessPolicy {
        &self.access
    }

    pub fn chairman(&self) -> Address {
        self.access.chairman()
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    pub fn minimum_quorum(&self) -> Amount {
        self.params.minimum_quorum
    }

    pub fn minimum_duration(&self) -> Timestamp {
        self.params.minimum_duration
    }

    pub fn native_balance(&self) -> Amount {
        self.native_balance
    }

    /// Submit a proposal calling `target` with `call_data` if it passes.
    ///
    /// The requested duration is raised to the configured minimum.
    pub fn create_proposal(
        &mut self,
        caller: Address,
        description: String,
        duration: Timestamp,
        target: Address,
        call_data: Vec<u8>,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        self.access.require_officer(caller)?;
        let action = ProposalAction::from_call(self.address(), target, call_data)?;
        self.submit(caller, description, duration, action, now)
    }

    pub(crate) fn submit(
        &mut self,
        caller: Address,
        description: String,
        duration: Timestamp,
        action: ProposalAction,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        let duration = duration.max(self.params.minimum_duration);
        let id = self.proposals.create(caller, description, action, now, duration)?;

        info!(
            id,
            proposer = %caller,
            debate_end_time = now.saturating_add(duration),
            "Proposal created"
        );
        Ok(id)
    }

    pub fn get_proposal(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        self.proposals.get(id)
    }

    pub fn last_index(&self) -> u64 {
        self.proposals.last_index()
    }

    pub fn proposals(&self) -> &ProposalRegistry {
        &self.proposals
    }

    /// Credit native currency sent to the governance contract.
    pub fn deposit_native(&mut self, amount: Amount) -> Result<(), GovernanceError> {
        self.native_balance = self
            .native_balance
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        Ok(())
    }
}
