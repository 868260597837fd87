//! Typed call payloads accepted by the ledger.
//!
//! These are the ledger's admin entry points reachable from a dispatched
//! proposal. The caller is whoever dispatched the call, so governance needs
//! changer rights for the parameter setters to succeed.

use agora_types::{Address, Amount, Timestamp};
use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::StakingError;
use crate::ledger::StakeLedger;

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum StakingCall {
    ChangeClaimTime(Timestamp),
    ChangeUnstakeTime(Timestamp),
    ChangeRewardPercent(Amount),
    SetGovernanceAddress(Address),
    GrantChanger(Address),
    RevokeChanger(Address),
}

impl StakingCall {
    /// Borsh encoding. Writing into a `Vec` has no I/O failure and these
    /// types have no fallible field encoders, so the result is never empty.
    pub fn encode(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    pub fn decode(data: &[u8]) -> Result<Self, StakingError> {
        borsh::from_slice(data).map_err(|e| StakingError::InvalidCallData(e.to_string()))
    }
}

impl StakeLedger {
    /// Decode `data` and run it on behalf of `caller`.
    pub fn execute(&mut self, caller: Address, data: &[u8]) -> Result<(), StakingError> {
        match StakingCall::decode(data)? {
            StakingCall::ChangeClaimTime(v) => self.change_claim_time(caller, v),
            StakingCall::ChangeUnstakeTime(v) => self.change_unstake_time(caller, v),
            StakingCall::ChangeRewardPercent(v) => self.change_reward_percent(caller, v),
            StakingCall::SetGovernanceAddress(a) => self.set_governance_address(caller, a),
            StakingCall::GrantChanger(a) => self.grant_changer(caller, a),
            StakingCall::RevokeChanger(a) => self.revoke_changer(caller, a),
        }
    }
}
