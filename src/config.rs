//! Configuration
//!
//! JSON configuration file. Every field has a default, so a missing file
//! yields a working configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::access::{AccessError, AccessResult, DEFAULT_STORAGE_KEY};

/// opsgate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpsgateConfig {
    /// File backing the role store (default: "./opsgate-state.json")
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Key the selected role id is stored under (default: "selectedRole")
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Append-only audit log; disabled when absent
    #[serde(default)]
    pub audit_file: Option<PathBuf>,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./opsgate-state.json")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for OpsgateConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            storage_key: default_storage_key(),
            audit_file: None,
        }
    }
}

impl OpsgateConfig {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> AccessResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AccessError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: OpsgateConfig = serde_json::from_str(&content)
            .map_err(|e| AccessError::InvalidConfig(format!("invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from file, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> AccessResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> AccessResult<()> {
        if self.state_file.as_os_str().is_empty() {
            return Err(AccessError::InvalidConfig(
                "state_file must not be empty".to_string(),
            ));
        }

        if self.storage_key.trim().is_empty() {
            return Err(AccessError::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }

        if let Some(audit) = &self.audit_file {
            if audit.as_os_str().is_empty() {
                return Err(AccessError::InvalidConfig(
                    "audit_file must not be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }
}
