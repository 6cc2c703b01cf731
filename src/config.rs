use crate::core::exclusion::ExclusionList;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine configuration.
///
/// The only tunable of the selection rules is the list of gilts excluded as
/// inappropriate. Every field is defaulted, so `{}` (or no config at all)
/// means "every gilt is appropriate".
///
/// ```json
/// { "excluded_isins": ["GB0004893086"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub excluded_isins: ExclusionList,
}

impl EngineConfig {
    pub fn new(excluded_isins: ExclusionList) -> Self {
        Self { excluded_isins }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        log::debug!(
            "loaded config from {} ({} excluded gilt(s))",
            path.display(),
            config.excluded_isins.len()
        );
        Ok(config)
    }

    pub fn exclusions(&self) -> &ExclusionList {
        &self.excluded_isins
    }
}
