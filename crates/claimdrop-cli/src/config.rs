//! # Ledger Configuration File
//!
//! The YAML file passed with the global `--config` flag:
//!
//! ```yaml
//! name: RewardsLedger
//! version: "1"
//! chain_id: 1
//! address: "0x1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d1d"
//! owner: "0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a"
//! token: "0x7070707070707070707070707070707070707070"
//! root: "0x…"
//! deadline: 2025-01-31T00:00:00Z   # or Unix seconds; 0 or absent means none
//! ```
//!
//! `name`, `version`, `chain_id` and `address` form the signing domain and
//! are all that `digest`, `sign` and `recover` need. `owner`, `token` and
//! `root` are required only to open a ledger.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use claimdrop_core::{Address, Deadline, Digest32, Timestamp};
use claimdrop_crypto::Eip712Domain;
use claimdrop_state::LedgerParams;

/// A deadline as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeadlineSetting {
    /// Unix seconds. `0` means no deadline.
    Secs(u64),
    /// RFC 3339 instant.
    Instant(String),
}

impl DeadlineSetting {
    /// Resolve to a [`Deadline`].
    pub fn resolve(&self) -> Result<Deadline> {
        match self {
            Self::Secs(secs) => Ok(Deadline::from_secs(*secs)),
            Self::Instant(s) => {
                let ts = Timestamp::parse_rfc3339(s)
                    .with_context(|| format!("invalid deadline {s:?}"))?;
                Ok(Deadline::from_secs(ts.as_secs()))
            }
        }
    }
}

/// Parsed contents of the ledger configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// EIP-712 domain name.
    pub name: String,
    /// EIP-712 domain version.
    pub version: String,
    /// Chain identifier.
    pub chain_id: u64,
    /// The ledger's own address and EIP-712 verifying contract.
    pub address: Address,
    /// Administrative account.
    #[serde(default)]
    pub owner: Option<Address>,
    /// Distributed token.
    #[serde(default)]
    pub token: Option<Address>,
    /// Commitment root.
    #[serde(default)]
    pub root: Option<Digest32>,
    /// Claim deadline.
    #[serde(default)]
    pub deadline: Option<DeadlineSetting>,
}

impl LedgerConfig {
    /// Parse from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("failed to parse ledger configuration YAML")
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), name = %config.name, chain_id = config.chain_id, "loaded ledger configuration");
        Ok(config)
    }

    /// The signing domain.
    pub fn domain(&self) -> Eip712Domain {
        Eip712Domain {
            name: self.name.clone(),
            version: self.version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.address,
        }
    }

    /// The configured deadline, unset when absent.
    pub fn deadline(&self) -> Result<Deadline> {
        self.deadline
            .as_ref()
            .map_or(Ok(Deadline::Unset), DeadlineSetting::resolve)
    }

    /// Assemble ledger construction parameters. Value checks are left to
    /// the ledger itself; this only requires the fields to be present.
    pub fn to_params(&self) -> Result<LedgerParams> {
        let Some(owner) = self.owner else {
            bail!("config is missing `owner`");
        };
        let Some(token) = self.token else {
            bail!("config is missing `token`");
        };
        let Some(root) = self.root else {
            bail!("config is missing `root`");
        };
        Ok(LedgerParams {
            owner,
            token,
            address: self.address,
            root,
            deadline: self.deadline()?,
            domain: self.domain(),
        })
    }
}
