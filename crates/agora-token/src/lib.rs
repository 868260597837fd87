//! Agora Token - external collaborators reached by the governance engine.
//!
//! This crate provides:
//! - The `FungibleToken` capability surface (transfer, allowance, mint, burn, roles)
//! - `Erc20Token`, an in-memory token implementing it
//! - `TokenCall`, the typed payload a proposal dispatches to a token
//! - `SwapRouter`, the pluggable AMM used by the buy-back action

pub mod call;
pub mod error;
pub mod swap;
pub mod token;

pub use call::TokenCall;
pub use error::TokenError;
pub use swap::{FixedRateSwap, SwapRouter};
pub use token::{Erc20Token, FungibleToken, Role};
