//! The governance engine.
//!
//! Owns every contract and processes one operation at a time to completion.

use std::collections::HashMap;

use agora_governance::{Dao, GovernanceAction, Proposal, ProposalStatus, VoteReceipt};
use agora_staking::{StakeLedger, StakeRecord, StakeView};
use agora_token::{Erc20Token, FixedRateSwap, FungibleToken, Role, SwapRouter};
use agora_types::{Address, Amount, Timestamp};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::router::Router;

/// A contract outside the engine that proposals may call, such as a sale
/// platform. Payloads are passed through uninterpreted.
pub trait ExternalCallHandler: Send {
    /// Handle `data` sent by `caller`. An error is a revert reason.
    fn handle(&mut self, caller: Address, data: &[u8], now: Timestamp) -> Result<(), String>;
}

/// Well-known contract addresses.
pub mod addresses {
    use agora_types::Address;

    pub fn governance() -> Address {
        Address::derive("agora.governance")
    }

    pub fn staking() -> Address {
        Address::derive("agora.staking")
    }

    pub fn staking_token() -> Address {
        Address::derive("agora.staking-token")
    }

    pub fn governed_token() -> Address {
        Address::derive("agora.governed-token")
    }

    pub fn swap() -> Address {
        Address::derive("agora.swap")
    }
}

/// Stake ledger, DAO, both tokens, the swap and any external targets.
pub struct Engine {
    admin: Address,
    dao: Dao,
    ledger: StakeLedger,
    lp_token: Erc20Token,
    token: Erc20Token,
    swap: Box<dyn SwapRouter + Send>,
    external: HashMap<Address, Box<dyn ExternalCallHandler>>,
}

impl Engine {
    /// Deploy every contract from `config`, which must pass
    /// [`EngineConfig::validate`].
    ///
    /// The DAO is registered as the ledger's governance address, granted
    /// changer rights on the ledger and the burner role on the governed token.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        let admin = config.admin;
        let governance = addresses::governance();

        let lp_token = Erc20Token::new(
            &config.staking_token.name,
            &config.staking_token.symbol,
            config.staking_token.decimals,
            addresses::staking_token(),
            admin,
        );
        let mut token = Erc20Token::new(
            &config.governed_token.name,
            &config.governed_token.symbol,
            config.governed_token.decimals,
            addresses::governed_token(),
            admin,
        );
        token.grant_role(admin, Role::Burner, governance)?;

        let mut ledger = StakeLedger::new(
            addresses::staking(),
            lp_token.address(),
            token.address(),
            admin,
            config.staking.clone(),
        );
        ledger.set_governance_address(admin, governance)?;
        ledger.grant_changer(admin, governance)?;

        let dao = Dao::new(governance, admin, config.governance.clone())?;
        let swap = FixedRateSwap::new(addresses::swap(), config.swap_rate);

        info!(
            %admin,
            %governance,
            ledger = %ledger.address(),
            "Engine initialized"
        );

        Ok(Self {
            admin,
            dao,
            ledger,
            lp_token,
            token,
            swap: Box::new(swap),
            external: HashMap::new(),
        })
    }

    /// Replace the built-in fixed-rate swap.
    pub fn with_swap(mut self, swap: Box<dyn SwapRouter + Send>) -> Self {
        self.swap = swap;
        self
    }

    /// Make `target` reachable from proposals.
    pub fn register_external(
        &mut self,
        target: Address,
        handler: Box<dyn ExternalCallHandler>,
    ) -> Result<(), EngineError> {
        let reserved = [
            self.dao.address(),
            self.ledger.address(),
            self.lp_token.address(),
            self.token.address(),
        ];
        if target.is_zero() || reserved.contains(&target) || self.external.contains_key(&target) {
            return Err(EngineError::AddressInUse(target));
        }
        self.external.insert(target, handler);
        info!(%target, "External contract registered");
        Ok(())
    }

    fn router(&mut self) -> (&mut Dao, Router<'_>) {
        let router = Router {
            ledger: &mut self.ledger,
            lp_token: &mut self.lp_token,
            token: &mut self.token,
            swap: &mut self.swap,
            external: &mut self.external,
        };
        (&mut self.dao, router)
    }

    // ---- Staking ----

    /// Stake `amount` of the staking token. `account` must have approved the
    /// ledger for at least `amount`.
    pub fn stake(&mut self, account: Address, amount: Amount, now: Timestamp) -> Result<(), EngineError> {
        self.ledger.stake(&mut self.lp_token, account, amount, now)?;
        Ok(())
    }

    pub fn claim(&mut self, account: Address, now: Timestamp) -> Result<Amount, EngineError> {
        Ok(self.ledger.claim(&mut self.token, account, now)?)
    }

    pub fn unstake(&mut self, account: Address, now: Timestamp) -> Result<Amount, EngineError> {
        Ok(self.ledger.unstake(&mut self.lp_token, account, now)?)
    }

    // ---- Governance ----

    pub fn create_proposal(
        &mut self,
        caller: Address,
        description: impl Into<String>,
        duration: Timestamp,
        target: Address,
        call_data: Vec<u8>,
        now: Timestamp,
    ) -> Result<u64, EngineError> {
        Ok(self
            .dao
            .create_proposal(caller, description.into(), duration, target, call_data, now)?)
    }

    pub fn vote(
        &mut self,
        account: Address,
        id: u64,
        amount: Amount,
        support: bool,
        now: Timestamp,
    ) -> Result<VoteReceipt, EngineError> {
        Ok(self.dao.vote(&mut self.ledger, account, id, amount, support, now)?)
    }

    pub fn finish_proposal(&mut self, caller: Address, id: u64, now: Timestamp) -> Result<ProposalStatus, EngineError> {
        let (dao, mut router) = self.router();
        Ok(dao.finish_proposal(&mut router, caller, id, now)?)
    }

    pub fn start_election(
        &mut self,
        caller: Address,
        candidate: Address,
        duration: Timestamp,
        now: Timestamp,
    ) -> Result<u64, EngineError> {
        Ok(self.dao.start_election(caller, candidate, duration, now)?)
    }

    pub fn set_minimum_quorum(&mut self, caller: Address, minimum_quorum: Amount) -> Result<(), EngineError> {
        Ok(self.dao.set_minimum_quorum(caller, minimum_quorum)?)
    }

    pub fn set_minimum_duration(&mut self, caller: Address, minimum_duration: Timestamp) -> Result<(), EngineError> {
        Ok(self.dao.set_minimum_duration(caller, minimum_duration)?)
    }

    /// Direct call into a governance entry point. Self-only actions fail
    /// unless they arrive through a proposal.
    pub fn governance_call(&mut self, caller: Address, action: GovernanceAction) -> Result<(), EngineError> {
        let (dao, mut router) = self.router();
        Ok(dao.apply(&mut router, caller, action)?)
    }

    /// Send native currency to the DAO.
    pub fn deposit_native(&mut self, amount: Amount) -> Result<(), EngineError> {
        self.dao.deposit_native(amount)?;
        info!(amount, balance = self.dao.native_balance(), "Native deposit");
        Ok(())
    }

    // ---- Observers ----

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn governance_address(&self) -> Address {
        self.dao.address()
    }

    pub fn chairman(&self) -> Address {
        self.dao.chairman()
    }

    pub fn minimum_quorum(&self) -> Amount {
        self.dao.minimum_quorum()
    }

    pub fn minimum_duration(&self) -> Timestamp {
        self.dao.minimum_duration()
    }

    pub fn native_balance(&self) -> Amount {
        self.dao.native_balance()
    }

    pub fn get_proposal(&self, id: u64) -> Result<&Proposal, EngineError> {
        Ok(self.dao.get_proposal(id)?)
    }

    pub fn last_index(&self) -> u64 {
        self.dao.last_index()
    }

    pub fn get_votes(&self, id: u64, account: &Address) -> Amount {
        self.dao.get_votes(id, account)
    }

    pub fn staking_provider(&self, account: &Address) -> Option<&StakeRecord> {
        self.ledger.staking_provider(account)
    }

    pub fn total_staked(&self) -> Amount {
        self.ledger.total_staked()
    }

    pub fn dao(&self) -> &Dao {
        &self.dao
    }

    pub fn ledger(&self) -> &StakeLedger {
        &self.ledger
    }

    /// Admin entry points of the ledger.
    pub fn ledger_mut(&mut self) -> &mut StakeLedger {
        &mut self.ledger
    }

    pub fn staking_token(&self) -> &Erc20Token {
        &self.lp_token
    }

    pub fn staking_token_mut(&mut self) -> &mut Erc20Token {
        &mut self.lp_token
    }

    pub fn governed_token(&self) -> &Erc20Token {
        &self.token
    }

    pub fn governed_token_mut(&mut self) -> &mut Erc20Token {
        &mut self.token
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("admin", &self.admin)
            .field("governance", &self.dao.address())
            .field("proposals", &self.dao.last_index())
            .field("total_staked", &self.ledger.total_staked())
            .field("external", &self.external.len())
            .finish()
    }
}
