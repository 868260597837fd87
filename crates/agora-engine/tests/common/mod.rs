#![allow(dead_code)]

use agora_engine::{Address, Amount, Engine, EngineConfig, Timestamp};
use agora_token::FungibleToken;

pub const T0: Timestamp = 1_700_000_000;
pub const DAY: Timestamp = 86_400;
pub const WEEK: Timestamp = 7 * DAY;
pub const BALANCE: Amount = 1_000_000_000_000;

pub fn user(n: u8) -> Address {
    Address::from_bytes([n; 20])
}

/// Engine with default config; users 1..=5 hold and have approved
/// `BALANCE` staking tokens and the ledger holds a reward pool.
pub fn engine() -> Engine {
    engine_with(EngineConfig::default())
}

pub fn engine_with(config: EngineConfig) -> Engine {
    let mut engine = Engine::new(&config).unwrap();
    let admin = engine.admin();
    let ledger = engine.ledger().address();

    for n in 1..=5 {
        let account = user(n);
        engine.staking_token_mut().mint(admin, account, BALANCE).unwrap();
        engine.staking_token_mut().approve(account, ledger, BALANCE).unwrap();
    }
    engine.governed_token_mut().mint(admin, ledger, BALANCE).unwrap();
    engine
}

/// Stake `amount` for each of `accounts` at `T0`.
pub fn stake_all(engine: &mut Engine, accounts: &[Address], amount: Amount) {
    for account in accounts {
        engine.stake(*account, amount, T0).unwrap();
    }
}
