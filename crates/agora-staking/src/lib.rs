//! Agora Staking - the stake ledger.
//!
//! Accounts lock collateral to earn a periodic reward and to acquire voting
//! power. Lock timing is monotone: staking and governance votes can only push
//! an account's lock expiry later.
//!
//! Governance reaches the ledger exclusively through [`StakeView`].

pub mod call;
pub mod error;
pub mod ledger;
pub mod params;
pub mod roles;
pub mod view;

pub use call::StakingCall;
pub use error::StakingError;
pub use ledger::{StakeLedger, StakeRecord};
pub use params::{StakingParams, REWARD_SCALE};
pub use roles::StakingRoles;
pub use view::StakeView;
