//! Ledger parameters.

use agora_types::{Amount, Timestamp};
use serde::{Deserialize, Serialize};

/// Denominator of `reward_percent` (100_000 = 100%).
pub const REWARD_SCALE: Amount = 100_000;

/// Tunable ledger parameters. Changed at runtime by the admin or a changer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingParams {
    /// Seconds between reward claims
    pub claim_period: Timestamp,
    /// Base lock applied on every stake, in seconds
    pub unstake_time: Timestamp,
    /// Reward paid per claim period, over `REWARD_SCALE`
    #[serde(with = "agora_types::amount::decimal_string")]
    pub reward_percent: Amount,
    /// Smallest accepted stake, in base units
    #[serde(with = "agora_types::amount::decimal_string")]
    pub minimum_stake: Amount,
}

impl Default for StakingParams {
    fn default() -> Self {
        Self {
            claim_period: 604_800, // 7 days
            unstake_time: 604_800,
            reward_percent: 3_000, // 3%
            minimum_stake: 100_000,
        }
    }
}
