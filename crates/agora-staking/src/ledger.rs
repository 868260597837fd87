//! Stake ledger.
//!
//! Holds one [`StakeRecord`] per account and custody of the staked and
//! reward tokens. Every operation validates first and mutates last, so a
//! failed call leaves the ledger untouched.

use std::collections::HashMap;

use agora_token::FungibleToken;
use agora_types::amount::mul_div;
use agora_types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StakingError;
use crate::params::{StakingParams, REWARD_SCALE};
use crate::roles::StakingRoles;
use crate::view::StakeView;

/// Per-account stake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    /// Staked collateral in base units
    pub staked_amount: Amount,
    /// Time of the latest stake
    pub deposit_time: Timestamp,
    /// Earliest time unstake is permitted
    pub lock_expiry: Timestamp,
    /// Start of the current reward period
    pub last_reward_checkpoint: Timestamp,
}

/// The stake ledger contract.
#[derive(Debug)]
pub struct StakeLedger {
    address: Address,
    staking_token: Address,
    reward_token: Address,
    governance: Option<Address>,
    params: StakingParams,
    roles: StakingRoles,
    providers: HashMap<Address, StakeRecord>,
    total_staked: Amount,
}

impl StakeLedger {
    pub fn new(
        address: Address,
        staking_token: Address,
        reward_token: Address,
        admin: Address,
        params: StakingParams,
    ) -> Self {
        Self {
            address,
            staking_token,
            reward_token,
            governance: None,
            params,
            roles: StakingRoles::new(admin),
            providers: HashMap::new(),
            total_staked: 0,
        }
    }

    fn check_token(expected: Address, actual: Address) -> Result<(), StakingError> {
        if expected == actual {
            Ok(())
        } else {
            Err(StakingError::WrongToken { expected, actual })
        }
    }

    /// Lock `amount` of the staking token from `account`.
    ///
    /// The ledger must hold an allowance from `account` on `token`.
    pub fn stake<T: FungibleToken + ?Sized>(
        &mut self,
        token: &mut T,
        account: Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<(), StakingError> {
        Self::check_token(self.staking_token, token.address())?;
        if amount < self.params.minimum_stake {
            return Err(StakingError::BelowMinimum {
                amount,
                minimum: self.params.minimum_stake,
            });
        }

        let current = self.providers.get(&account).cloned().unwrap_or_default();
        let staked_amount = current
            .staked_amount
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        let base_expiry = now
            .checked_add(self.params.unstake_time)
            .ok_or(StakingError::Overflow)?;

        token.transfer_from(self.address, account, self.address, amount)?;

        let record = StakeRecord {
            staked_amount,
            deposit_time: now,
            lock_expiry: current.lock_expiry.max(base_expiry),
            last_reward_checkpoint: now,
        };
        info!(
            %account,
            amount,
            staked = record.staked_amount,
            lock_expiry = record.lock_expiry,
            "Staked"
        );
        self.providers.insert(account, record);
        self.total_staked = total_staked;
        Ok(())
    }

    /// Pay one period's reward on the current stake and restart the period.
    pub fn claim<T: FungibleToken + ?Sized>(
        &mut self,
        reward_token: &mut T,
        account: Address,
        now: Timestamp,
    ) -> Result<Amount, StakingError> {
        Self::check_token(self.reward_token, reward_token.address())?;
        let record = self
            .providers
            .get(&account)
            .ok_or(StakingError::NotFound(account))?;

        let available_at = record
            .last_reward_checkpoint
            .saturating_add(self.params.claim_period);
        if now < available_at {
            return Err(StakingError::ClaimWindowNotElapsed { available_at });
        }

        let reward = mul_div(record.staked_amount, self.params.reward_percent, REWARD_SCALE)
            .map_err(|_| StakingError::Overflow)?;
        if reward > 0 {
            reward_token.transfer(self.address, account, reward)?;
        }

        if let Some(record) = self.providers.get_mut(&account) {
            record.last_reward_checkpoint = now;
        }
        info!(%account, reward, "Reward claimed");
        Ok(reward)
    }

    /// Return the whole stake once the lock has expired.
    pub fn unstake<T: FungibleToken + ?Sized>(
        &mut self,
        token: &mut T,
        account: Address,
        now: Timestamp,
    ) -> Result<Amount, StakingError> {
        Self::check_token(self.staking_token, token.address())?;
        let record = self
            .providers
            .get(&account)
            .ok_or(StakingError::NotFound(account))?;

        if now < record.lock_expiry {
            return Err(StakingError::UnstakeWindowNotElapsed {
                unlocks_at: record.lock_expiry,
            });
        }

        let amount = record.staked_amount;
        token.transfer(self.address, account, amount)?;

        self.providers.remove(&account);
        self.total_staked -= amount;
        info!(%account, amount, "Unstaked");
        Ok(amount)
    }

    pub fn change_claim_time(&mut self, caller: Address, claim_period: Timestamp) -> Result<(), StakingError> {
        self.roles.require_changer(caller)?;
        self.params.claim_period = claim_period;
        info!(%caller, claim_period, "Claim period changed");
        Ok(())
    }

    pub fn change_unstake_time(&mut self, caller: Address, unstake_time: Timestamp) -> Result<(), StakingError> {
        self.roles.require_changer(caller)?;
        self.params.unstake_time = unstake_time;
        info!(%caller, unstake_time, "Unstake time changed");
        Ok(())
    }

    pub fn change_reward_percent(&mut self, caller: Address, reward_percent: Amount) -> Result<(), StakingError> {
        self.roles.require_changer(caller)?;
        self.params.reward_percent = reward_percent;
        info!(%caller, reward_percent, "Reward percent changed");
        Ok(())
    }

    /// Register the only address allowed to extend locks.
    pub fn set_governance_address(&mut self, caller: Address, governance: Address) -> Result<(), StakingError> {
        self.roles.require_changer(caller)?;
        self.governance = Some(governance);
        info!(%caller, %governance, "Governance address set");
        Ok(())
    }

    pub fn grant_changer(&mut self, caller: Address, account: Address) -> Result<(), StakingError> {
        self.roles.grant(caller, account)?;
        info!(%caller, %account, "Changer rights granted");
        Ok(())
    }

    pub fn revoke_changer(&mut self, caller: Address, account: Address) -> Result<(), StakingError> {
        self.roles.revoke(caller, account)?;
        info!(%caller, %account, "Changer rights revoked");
        Ok(())
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn staking_token(&self) -> Address {
        self.staking_token
    }

    pub fn reward_token(&self) -> Address {
        self.reward_token
    }

    pub fn governance(&self) -> Option<Address> {
        self.governance
    }

    pub fn params(&self) -> &StakingParams {
        &self.params
    }

    pub fn roles(&self) -> &StakingRoles {
        &self.roles
    }

    /// Full stake record of `account`.
    pub fn staking_provider(&self, account: &Address) -> Option<&StakeRecord> {
        self.providers.get(account)
    }
}

impl StakeView for StakeLedger {
    fn staked_amount(&self, account: &Address) -> Amount {
        self.providers
            .get(account)
            .map(|r| r.staked_amount)
            .unwrap_or(0)
    }

    fn total_staked(&self) -> Amount {
        self.total_staked
    }

    fn lock_expiry(&self, account: &Address) -> Option<Timestamp> {
        self.providers.get(account).map(|r| r.lock_expiry)
    }

    fn extend_lock(
        &mut self,
        caller: Address,
        account: Address,
        candidate_expiry: Timestamp,
    ) -> Result<Timestamp, StakingError> {
        if self.governance != Some(caller) {
            return Err(StakingError::Unauthorized(caller));
        }
        let record = self
            .providers
            .get_mut(&account)
            .ok_or(StakingError::NotFound(account))?;

        record.lock_expiry = record.lock_expiry.max(candidate_expiry);
        debug!(%account, candidate_expiry, lock_expiry = record.lock_expiry, "Lock extended");
        Ok(record.lock_expiry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_token::{Erc20Token, TokenError};
    use proptest::prelude::*;

    const WEEK: Timestamp = 604_800;

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    struct Fixture {
        ledger: StakeLedger,
        lp: Erc20Token,
        reward: Erc20Token,
    }

    fn admin() -> Address {
        addr(1)
    }

    fn user() -> Address {
        addr(2)
    }

    fn dao() -> Address {
        addr(9)
    }

    fn setup() -> Fixture {
        let ledger_addr = addr(200);
        let mut lp = Erc20Token::new("Uniswap V2", "UNI-V2", 18, addr(101), admin());
        let mut reward = Erc20Token::new("XXX Coin", "XXX", 18, addr(102), admin());

        lp.mint(admin(), user(), 1_000_000_000_000).unwrap();
        lp.approve(user(), ledger_addr, 1_000_000_000_000).unwrap();
        reward.mint(admin(), ledger_addr, 1_000_000_000_000).unwrap();

        let mut ledger = StakeLedger::new(
            ledger_addr,
            lp.address(),
            reward.address(),
            admin(),
            StakingParams::default(),
        );
        ledger.set_governance_address(admin(), dao()).unwrap();

        Fixture { ledger, lp, reward }
    }

    #[test]
    fn test_stake_moves_tokens_into_custody() {
        let mut f = setup();
        f.ledger.stake(&mut f.lp, user(), 1_000_000_000_000, 1_000).unwrap();

        let record = f.ledger.staking_provider(&user()).unwrap();
        assert_eq!(record.staked_amount, 1_000_000_000_000);
        assert_eq!(record.deposit_time, 1_000);
        assert_eq!(record.lock_expiry, 1_000 + WEEK);
        assert_eq!(f.ledger.total_staked(), 1_000_000_000_000);
        assert_eq!(f.lp.balance_of(&user()), 0);
        assert_eq!(f.lp.balance_of(&f.ledger.address()), 1_000_000_000_000);
    }

    #[test]
    fn test_stake_below_minimum() {
        let mut f = setup();
        let err = f.ledger.stake(&mut f.lp, user(), 99_999, 0).unwrap_err();
        assert_eq!(err, StakingError::BelowMinimum { amount: 99_999, minimum: 100_000 });
        assert!(f.ledger.staking_provider(&user()).is_none());
    }

    #[test]
    fn test_stake_without_allowance_leaves_ledger_untouched() {
        let mut f = setup();
        f.lp.approve(user(), f.ledger.address(), 0).unwrap();
        let err = f.ledger.stake(&mut f.lp, user(), 100_000, 0).unwrap_err();
        assert!(matches!(
            err,
            StakingError::Token(TokenError::InsufficientAllowance { .. })
        ));
        assert_eq!(f.ledger.total_staked(), 0);
        assert!(f.ledger.staking_provider(&user()).is_none());
    }

    #[test]
    fn test_stake_rejects_wrong_token() {
        let mut f = setup();
        let err = f.ledger.stake(&mut f.reward, user(), 100_000, 0).unwrap_err();
        assert!(matches!(err, StakingError::WrongToken { .. }));
    }

    #[test]
    fn test_restake_never_shortens_lock() {
        let mut f = setup();
        f.ledger.stake(&mut f.lp, user(), 100_000, 0).unwrap();
        f.ledger.extend_lock(dao(), user(), 10 * WEEK).unwrap();

        f.ledger.stake(&mut f.lp, user(), 100_000, 10).unwrap();
        let record = f.ledger.staking_provider(&user()).unwrap();
        assert_eq!(record.staked_amount, 200_000);
        assert_eq!(record.deposit_time, 10);
        assert_eq!(record.lock_expiry, 10 * WEEK);
    }

    #[test]
    fn test_claim_after_period_pays_reward() {
        let mut f = setup();
        f.ledger.stake(&mut f.lp, user(), 1_000_000_000_000, 0).unwrap();

        let reward = f.ledger.claim(&mut f.reward, user(), WEEK + 1).unwrap();
        assert_eq!(reward, 30_000_000_000);
        assert_eq!(f.reward.balance_of(&user()), 30_000_000_000);
        assert_eq!(
            f.ledger.staking_provider(&user()).unwrap().last_reward_checkpoint,
            WEEK + 1
        );
    }

    #[test]
    fn test_claim_before_period_fails() {
        let mut f = setup();
        f.ledger.stake(&mut f.lp, user(), 1_000_000_000_000, 0).unwrap();
        let err = f.ledger.claim(&mut f.reward, user(), WEEK - 1).unwrap_err();
        assert_eq!(err, StakingError::ClaimWindowNotElapsed { available_at: WEEK });
    }

    #[test]
    fn test_claim_is_guarded_by_checkpoint() {
        let mut f = setup();
        f.ledger.stake(&mut f.lp, user(), 1_000_000_000_000, 0).unwrap();
        f.ledger.claim(&mut f.reward, user(), WEEK).unwrap();
        assert!(f.ledger.claim(&mut f.reward, user(), WEEK + 5).is_err());
        assert_eq!(f.reward.balance_of(&user()), 30_000_000_000);
    }

    #[test]
    fn test_claim_with_empty_reward_pool_keeps_checkpoint() {
        let mut f = setup();
        let mut empty = Erc20Token::new("XXX Coin", "XXX", 18, addr(102), admin());
        f.ledger.stake(&mut f.lp, user(), 1_000_000_000_000, 0).unwrap();

        let err = f.ledger.claim(&mut empty, user(), WEEK).unwrap_err();
        assert!(matches!(err, StakingError::Token(TokenError::InsufficientBalance { .. })));
        assert_eq!(f.ledger.staking_provider(&user()).unwrap().last_reward_checkpoint, 0);
    }

    #[test]
    fn test_unstake_after_lock() {
        let mut f = setup();
        f.ledger.stake(&mut f.lp, user(), 100_000_000_000, 0).unwrap();

        let amount = f.ledger.unstake(&mut f.lp, user(), WEEK + 1).unwrap();
        assert_eq!(amount, 100_000_000_000);
        assert_eq!(f.lp.balance_of(&user()), 1_000_000_000_000);
        assert!(f.ledger.staking_provider(&user()).is_none());
        assert_eq!(f.ledger.total_staked(), 0);
    }

    #[test]
    fn test_unstake_before_lock_fails() {
        let mut f = setup();
        f.ledger.stake(&mut f.lp, user(), 1_000_000_000_000, 0).unwrap();
        let err = f.ledger.unstake(&mut f.lp, user(), 100).unwrap_err();
        assert_eq!(err, StakingError::UnstakeWindowNotElapsed { unlocks_at: WEEK });
    }

    #[test]
    fn test_unstake_without_stake() {
        let mut f = setup();
        assert_eq!(
            f.ledger.unstake(&mut f.lp, user(), 0),
            Err(StakingError::NotFound(user()))
        );
    }

    #[test]
    fn test_extend_lock_only_by_governance() {
        let mut f = setup();
        f.ledger.stake(&mut f.lp, user(), 100_000, 0).unwrap();

        assert_eq!(
            f.ledger.extend_lock(user(), user(), 0),
            Err(StakingError::Unauthorized(user()))
        );
        assert_eq!(f.ledger.extend_lock(dao(), user(), 5), Ok(WEEK));
        assert_eq!(f.ledger.extend_lock(dao(), user(), 2 * WEEK), Ok(2 * WEEK));
        assert_eq!(f.ledger.lock_expiry(&user()), Some(2 * WEEK));
    }

    #[test]
    fn test_admin_setters() {
        let mut f = setup();
        f.ledger.change_claim_time(admin(), 600).unwrap();
        f.ledger.change_unstake_time(admin(), 600).unwrap();
        f.ledger.change_reward_percent(admin(), 10).unwrap();
        assert_eq!(f.ledger.params().claim_period, 600);
        assert_eq!(f.ledger.params().unstake_time, 600);
        assert_eq!(f.ledger.params().reward_percent, 10);

        let stranger = addr(3);
        assert_eq!(
            f.ledger.change_claim_time(stranger, 1),
            Err(StakingError::Unauthorized(stranger))
        );
        assert_eq!(
            f.ledger.set_governance_address(stranger, stranger),
            Err(StakingError::Unauthorized(stranger))
        );
        assert_eq!(f.ledger.governance(), Some(dao()));
        assert_eq!(f.ledger.params().claim_period, 600);
    }

    #[test]
    fn test_changer_rights() {
        let mut f = setup();
        let changer = addr(3);
        f.ledger.grant_changer(admin(), changer).unwrap();
        f.ledger.change_reward_percent(changer, 10).unwrap();
        f.ledger.change_claim_time(changer, 600).unwrap();

        f.ledger.revoke_changer(admin(), changer).unwrap();
        assert_eq!(
            f.ledger.change_reward_percent(changer, 50),
            Err(StakingError::Unauthorized(changer))
        );
        assert_eq!(
            f.ledger.revoke_changer(changer, changer),
            Err(StakingError::Unauthorized(changer))
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Stake(Amount, Timestamp),
        Extend(Timestamp),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (100_000u128..1_000_000u128, 0u64..10 * WEEK).prop_map(|(a, dt)| Op::Stake(a, dt)),
            (0u64..20 * WEEK).prop_map(Op::Extend),
        ]
    }

    proptest! {
        #[test]
        fn prop_lock_expiry_is_monotone(ops in proptest::collection::vec(op(), 1..32)) {
            let mut f = setup();
            f.lp.mint(admin(), user(), 1_000_000_000_000).unwrap();
            f.lp.approve(user(), f.ledger.address(), u128::MAX).unwrap();
            f.ledger.stake(&mut f.lp, user(), 100_000, 0).unwrap();

            let mut now = 0;
            let mut last = f.ledger.lock_expiry(&user()).unwrap();
            for op in ops {
                match op {
                    Op::Stake(amount, dt) => {
                        now += dt;
                        f.ledger.stake(&mut f.lp, user(), amount, now).unwrap();
                    }
                    Op::Extend(candidate) => {
                        f.ledger.extend_lock(dao(), user(), candidate).unwrap();
                    }
                }
                let expiry = f.ledger.lock_expiry(&user()).unwrap();
                prop_assert!(expiry >= last);
                prop_assert!(expiry >= f.ledger.staking_provider(&user()).unwrap().deposit_time + WEEK);
                last = expiry;
            }
        }
    }
}
