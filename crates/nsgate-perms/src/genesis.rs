//! Genesis bootstrap configuration.
//!
//! The initial set of state updaters is supplied as JSON:
//!
//! ```json
//! {
//!   "state_updaters": [
//!     { "public_key": "04…", "namespaces": ["finance", "hr"] }
//!   ]
//! }
//! ```

use std::path::Path;

use nsgate_core::PublicKey;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PermsError, Result};
use crate::registry::PermissionRegistry;

/// One identity and the namespaces it starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisUpdater {
    /// Hex of the identity's encoded form.
    pub public_key: PublicKey,

    /// Initial namespaces. Empty names are ignored.
    #[serde(default)]
    pub namespaces: Vec<String>,
}

/// Genesis configuration for the permission registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    #[serde(default)]
    pub state_updaters: Vec<GenesisUpdater>,
}

impl GenesisConfig {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that cannot be encoded.
    pub fn validate(&self) -> Result<()> {
        if u32::try_from(self.state_updaters.len()).is_err() {
            return Err(PermsError::Config("too many state updaters".into()));
        }
        for updater in &self.state_updaters {
            if updater.namespaces.iter().any(|ns| ns.len() > u32::MAX as usize) {
                return Err(PermsError::Config(format!(
                    "namespace too long for {}",
                    updater.public_key
                )));
            }
        }
        Ok(())
    }

    /// Build the genesis registry.
    pub fn build_registry(&self) -> PermissionRegistry {
        let registry = PermissionRegistry::new(
            self.state_updaters
                .iter()
                .map(|u| (u.public_key, u.namespaces.iter().cloned())),
        );
        info!(updaters = registry.len(), "genesis permission registry built");
        registry
    }
}
