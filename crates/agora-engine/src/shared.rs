//! Thread-safe handle to an [`Engine`].
//!
//! One global lock serializes every operation, so the validation and lock
//! extension of a vote never interleave with another vote or an unstake.

use std::sync::Arc;

use agora_governance::{ProposalStatus, VoteReceipt};
use agora_types::{Address, Amount, Timestamp};
use parking_lot::Mutex;

use crate::engine::Engine;
use crate::error::EngineError;

#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let mut engine = self.inner.lock();
        f(&mut engine)
    }

    pub fn stake(&self, account: Address, amount: Amount, now: Timestamp) -> Result<(), EngineError> {
        self.with(|e| e.stake(account, amount, now))
    }

    pub fn unstake(&self, account: Address, now: Timestamp) -> Result<Amount, EngineError> {
        self.with(|e| e.unstake(account, now))
    }

    pub fn vote(
        &self,
        account: Address,
        id: u64,
        amount: Amount,
        support: bool,
        now: Timestamp,
    ) -> Result<VoteReceipt, EngineError> {
        self.with(|e| e.vote(account, id, amount, support, now))
    }

    pub fn finish_proposal(&self, caller: Address, id: u64, now: Timestamp) -> Result<ProposalStatus, EngineError> {
        self.with(|e| e.finish_proposal(caller, id, now))
    }
}

impl std::fmt::Debug for SharedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEngine")
            .field("strong_count", &Arc::strong_count(&self.inner))
            .finish()
    }
}
