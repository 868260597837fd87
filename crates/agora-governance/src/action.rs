//! What a passed proposal does.
//!
//! Self-targeted actions are a closed enum applied by governance itself;
//! anything aimed at another contract stays an opaque `(target, call_data)`
//! pair that is routed, never interpreted.

use agora_types::{Address, Amount, Timestamp};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

/// Entry points of the governance contract reachable only through a proposal
/// (or, for the parameter setters, directly by an officer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum GovernanceAction {
    SetChairman(Address),
    SetMinimumQuorum(Amount),
    SetMinimumDuration(Timestamp),
    /// Spend the whole native balance on the governed token and burn it
    BuyBackAndBurn,
}

impl GovernanceAction {
    /// Borsh encoding. Writing into a `Vec` has no I/O failure and these
    /// types have no fallible field encoders, so the result is never empty.
    pub fn encode(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    pub fn decode(data: &[u8]) -> Result<Self, GovernanceError> {
        borsh::from_slice(data).map_err(|e| GovernanceError::InvalidProposal(e.to_string()))
    }
}

/// Dispatch target of a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalAction {
    Internal(GovernanceAction),
    External { target: Address, call_data: Vec<u8> },
}

impl ProposalAction {
    /// Classify a raw `(target, call_data)` pair. Calls aimed at the
    /// governance contract itself must decode to a [`GovernanceAction`].
    pub fn from_call(
        governance: Address,
        target: Address,
        call_data: Vec<u8>,
    ) -> Result<Self, GovernanceError> {
        if target.is_zero() {
            return Err(GovernanceError::InvalidProposal("zero target".to_string()));
        }
        if target == governance {
            return Ok(ProposalAction::Internal(GovernanceAction::decode(&call_data)?));
        }
        Ok(ProposalAction::External { target, call_data })
    }

    pub fn target(&self, governance: Address) -> Address {
        match self {
            ProposalAction::Internal(_) => governance,
            ProposalAction::External { target, .. } => *target,
        }
    }

    pub fn call_data(&self) -> Vec<u8> {
        match self {
            ProposalAction::Internal(action) => action.encode(),
            ProposalAction::External { call_data, .. } => call_data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    #[test]
    fn test_self_target_becomes_internal() {
        let gov = addr(9);
        let data = GovernanceAction::SetChairman(addr(2)).encode();
        let action = ProposalAction::from_call(gov, gov, data.clone()).unwrap();

        assert_eq!(action, ProposalAction::Internal(GovernanceAction::SetChairman(addr(2))));
        assert_eq!(action.target(gov), gov);
        assert_eq!(action.call_data(), data);
    }

    #[test]
    fn test_encoding_is_tag_then_fields() {
        assert_eq!(GovernanceAction::BuyBackAndBurn.encode(), vec![3]);
        assert_eq!(
            GovernanceAction::SetMinimumDuration(10).encode(),
            vec![2, 10, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_self_target_with_unknown_payload_is_rejected() {
        let gov = addr(9);
        let err = ProposalAction::from_call(gov, gov, vec![0xde, 0xad]).unwrap_err();
        assert!(matches!(err, GovernanceError::InvalidProposal(_)));
    }

    #[test]
    fn test_external_payload_is_opaque() {
        let action = ProposalAction::from_call(addr(9), addr(3), vec![1, 2, 3]).unwrap();
        assert_eq!(
            action,
            ProposalAction::External { target: addr(3), call_data: vec![1, 2, 3] }
        );
        assert!(ProposalAction::from_call(addr(9), Address::ZERO, vec![]).is_err());
    }
}
