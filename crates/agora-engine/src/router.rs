//! Call routing for dispatched proposals.

use std::collections::HashMap;

use agora_governance::ExecutionHost;
use agora_staking::{StakeLedger, StakeView, StakingError};
use agora_token::{call, Erc20Token, FungibleToken, Role, SwapRouter};
use agora_types::{Address, Amount, Timestamp};
use tracing::debug;

use crate::engine::ExternalCallHandler;

/// Mutable view of every contract a proposal can reach.
pub(crate) struct Router<'a> {
    pub ledger: &'a mut StakeLedger,
    pub lp_token: &'a mut Erc20Token,
    pub token: &'a mut Erc20Token,
    pub swap: &'a mut Box<dyn SwapRouter + Send>,
    pub external: &'a mut HashMap<Address, Box<dyn ExternalCallHandler>>,
}

impl StakeView for Router<'_> {
    fn staked_amount(&self, account: &Address) -> Amount {
        self.ledger.staked_amount(account)
    }

    fn total_staked(&self) -> Amount {
        self.ledger.total_staked()
    }

    fn lock_expiry(&self, account: &Address) -> Option<Timestamp> {
        self.ledger.lock_expiry(account)
    }

    fn extend_lock(
        &mut self,
        caller: Address,
        account: Address,
        candidate_expiry: Timestamp,
    ) -> Result<Timestamp, StakingError> {
        self.ledger.extend_lock(caller, account, candidate_expiry)
    }
}

impl ExecutionHost for Router<'_> {
    fn call(&mut self, caller: Address, target: Address, data: &[u8], now: Timestamp) -> Result<(), String> {
        debug!(%caller, %target, len = data.len(), "Routing call");

        if target == self.ledger.address() {
            self.ledger.execute(caller, data).map_err(|e| e.to_string())
        } else if target == self.token.address() {
            call::execute(&mut *self.token, caller, data).map_err(|e| e.to_string())
        } else if target == self.lp_token.address() {
            call::execute(&mut *self.lp_token, caller, data).map_err(|e| e.to_string())
        } else if let Some(handler) = self.external.get_mut(&target) {
            handler.handle(caller, data, now)
        } else {
            Err(format!("no contract at {}", target))
        }
    }

    fn buy_back_and_burn(&mut self, caller: Address, native_amount: Amount) -> Result<Amount, String> {
        // Checked up front so a swap is never left unburned
        if !self.token.has_role(Role::Burner, &caller) {
            return Err(format!("{} is missing {}", caller, Role::Burner));
        }

        let bought = self
            .swap
            .swap_exact_native_for_tokens(&mut *self.token, native_amount, caller)
            .map_err(|e| e.to_string())?;
        self.token.burn(caller, caller, bought).map_err(|e| e.to_string())?;
        Ok(bought)
    }
}
