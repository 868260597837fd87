//! Governance parameters.

use agora_types::{Amount, Timestamp, SCALE};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

/// Tunable governance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceParams {
    /// Minimum share of total stake that must vote, at `SCALE`
    #[serde(with = "agora_types::amount::decimal_string")]
    pub minimum_quorum: Amount,
    /// Minimum debate period in seconds
    pub minimum_duration: Timestamp,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            minimum_quorum: 2_000_000_000_000_000, // 0.2%
            minimum_duration: 259_200,             // 3 days
        }
    }
}

impl GovernanceParams {
    pub fn validate(&self) -> Result<(), GovernanceError> {
        check_minimum_quorum(self.minimum_quorum)
    }
}

/// Quorum is a share of total stake at `SCALE`, so it cannot exceed 1.
pub(crate) fn check_minimum_quorum(minimum_quorum: Amount) -> Result<(), GovernanceError> {
    if minimum_quorum > SCALE {
        return Err(GovernanceError::InvalidParameter(format!(
            "minimum quorum {} above {}",
            minimum_quorum, SCALE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quorum_cap() {
        assert!(GovernanceParams::default().validate().is_ok());

        let full = GovernanceParams { minimum_quorum: SCALE, ..Default::default() };
        assert!(full.validate().is_ok());

        let over = GovernanceParams { minimum_quorum: SCALE + 1, ..Default::default() };
        assert!(matches!(over.validate(), Err(GovernanceError::InvalidParameter(_))));
    }
}
