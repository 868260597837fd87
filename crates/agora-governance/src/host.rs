//! The environment a proposal executes in.

use agora_staking::StakeView;
use agora_types::{Address, Amount, Timestamp};

/// Everything governance needs from the outside world while finishing a
/// proposal: the stake capability for the quorum denominator, an opaque call
/// primitive, and the swap-and-burn primitive behind the buy-back action.
///
/// Errors are revert reasons; governance surfaces them as `ExecutionFailed`.
pub trait ExecutionHost: StakeView {
    /// Route `data` to `target` with `caller` as the immediate caller.
    fn call(&mut self, caller: Address, target: Address, data: &[u8], now: Timestamp) -> Result<(), String>;

    /// Swap `native_amount` of `caller`'s native balance for the governed
    /// token and burn the proceeds. Returns the amount burned.
    fn buy_back_and_burn(&mut self, caller: Address, native_amount: Amount) -> Result<Amount, String>;
}
