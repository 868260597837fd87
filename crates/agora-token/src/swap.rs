//! Swap collaborator used by the buy-back action.
//!
//! Price-impact math belongs to the AMM; the engine only needs "spend this
//! much native currency, deliver tokens to that recipient".

use agora_types::amount::mul_div;
use agora_types::{Address, Amount, SCALE};

use crate::error::TokenError;
use crate::token::FungibleToken;

/// Pluggable AMM surface.
pub trait SwapRouter {
    /// Swap exactly `amount_in` native units for `token`, paying the output
    /// to `recipient`. Returns the amount of tokens delivered.
    fn swap_exact_native_for_tokens(
        &mut self,
        token: &mut dyn FungibleToken,
        amount_in: Amount,
        recipient: Address,
    ) -> Result<Amount, TokenError>;
}

/// Swap that quotes a constant rate out of its own token inventory.
#[derive(Debug, Clone)]
pub struct FixedRateSwap {
    /// Address holding the token inventory
    pub address: Address,
    /// Tokens delivered per native unit, at `SCALE`
    pub rate: Amount,
    /// Native currency received so far
    pub native_reserve: Amount,
}

impl FixedRateSwap {
    pub fn new(address: Address, rate: Amount) -> Self {
        Self {
            address,
            rate,
            native_reserve: 0,
        }
    }

    /// Output for `amount_in` at the configured rate.
    pub fn quote(&self, amount_in: Amount) -> Result<Amount, TokenError> {
        mul_div(amount_in, self.rate, SCALE).map_err(|e| TokenError::SwapFailed(e.to_string()))
    }
}

impl SwapRouter for FixedRateSwap {
    fn swap_exact_native_for_tokens(
        &mut self,
        token: &mut dyn FungibleToken,
        amount_in: Amount,
        recipient: Address,
    ) -> Result<Amount, TokenError> {
        let out = self.quote(amount_in)?;
        if out == 0 {
            return Err(TokenError::SwapFailed("insufficient output amount".to_string()));
        }

        token.transfer(self.address, recipient, out)?;
        self.native_reserve = self
            .native_reserve
            .checked_add(amount_in)
            .ok_or(TokenError::Overflow)?;
        tracing::debug!(amount_in, out, %recipient, "swapped native for tokens");
        Ok(out)
    }
}
