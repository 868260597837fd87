//! Typed call payloads accepted by tokens.
//!
//! Proposals store these borsh-encoded; the engine routes the bytes to the
//! target token without looking inside.

use agora_types::{Address, Amount};
use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::TokenError;
use crate::token::{FungibleToken, Role};

/// Token entry points reachable through a dispatched call.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum TokenCall {
    Transfer { to: Address, amount: Amount },
    Approve { spender: Address, amount: Amount },
    TransferFrom { from: Address, to: Address, amount: Amount },
    Mint { to: Address, amount: Amount },
    Burn { owner: Address, amount: Amount },
    GrantRole { role: Role, account: Address },
}

impl TokenCall {
    /// Borsh encoding. Writing into a `Vec` has no I/O failure and these
    /// types have no fallible field encoders, so the result is never empty.
    pub fn encode(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    pub fn decode(data: &[u8]) -> Result<Self, TokenError> {
        borsh::from_slice(data).map_err(|e| TokenError::InvalidCallData(e.to_string()))
    }

    /// Apply this call to `token` on behalf of `caller`.
    pub fn apply<T: FungibleToken + ?Sized>(self, token: &mut T, caller: Address) -> Result<(), TokenError> {
        match self {
            TokenCall::Transfer { to, amount } => token.transfer(caller, to, amount),
            TokenCall::Approve { spender, amount } => token.approve(caller, spender, amount),
            TokenCall::TransferFrom { from, to, amount } => token.transfer_from(caller, from, to, amount),
            TokenCall::Mint { to, amount } => token.mint(caller, to, amount),
            TokenCall::Burn { owner, amount } => token.burn(caller, owner, amount),
            TokenCall::GrantRole { role, account } => token.grant_role(caller, role, account),
        }
    }
}

/// Decode `data` and apply it to `token`.
pub fn execute<T: FungibleToken + ?Sized>(token: &mut T, caller: Address, data: &[u8]) -> Result<(), TokenError> {
    TokenCall::decode(data)?.apply(token, caller)
}
