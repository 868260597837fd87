//! Engine configuration.
//!
//! Handles loading and validation of engine configuration from TOML files.

use std::path::Path;

use agora_governance::GovernanceParams;
use agora_staking::StakingParams;
use agora_types::{Address, Amount, SCALE};
use serde::{Deserialize, Serialize};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deployer; admin of the ledger, the DAO and both tokens
    pub admin: Address,
    /// Governed tokens per native unit paid by the built-in swap, at `SCALE`
    #[serde(with = "agora_types::amount::decimal_string")]
    pub swap_rate: Amount,
    /// Token locked in the ledger
    pub staking_token: TokenConfig,
    /// Reward token, also the target of buy-backs
    pub governed_token: TokenConfig,
    pub staking: StakingParams,
    pub governance: GovernanceParams,
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            admin: Address::derive("agora.admin"),
            swap_rate: SCALE,
            staking_token: TokenConfig {
                name: "Uniswap V2".to_string(),
                symbol: "UNI-V2".to_string(),
                decimals: 18,
            },
            governed_token: TokenConfig {
                name: "XXX Coin".to_string(),
                symbol: "XXX".to_string(),
                decimals: 18,
            },
            staking: StakingParams::default(),
            governance: GovernanceParams::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from file.
    /// Path is validated to prevent directory traversal attacks.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        check_path(path)?;
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: EngineConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        check_path(path)?;
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e))?;
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.admin.is_zero() {
            anyhow::bail!("Admin address cannot be zero");
        }
        if self.staking_token.symbol == self.governed_token.symbol {
            anyhow::bail!("Staking and governed token must differ");
        }
        if self.governance.minimum_quorum > SCALE {
            anyhow::bail!(
                "Minimum quorum {} exceeds {}",
                self.governance.minimum_quorum,
                SCALE
            );
        }
        if self.staking.minimum_stake == 0 {
            anyhow::bail!("Minimum stake cannot be 0");
        }
        if self.staking.claim_period == 0 {
            anyhow::bail!("Claim period cannot be 0");
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => anyhow::bail!("Unknown log format '{}'", other),
        }
        Ok(())
    }
}

fn check_path(path: &Path) -> anyhow::Result<()> {
    if path.to_string_lossy().contains("..") {
        anyhow::bail!("Invalid path: directory traversal detected");
    }
    Ok(())
}

/// Token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    pub level: String,
    /// Log format (json|pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
