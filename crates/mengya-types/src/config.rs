//! Session configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock behaviour: a 10-entry history, a 200 ms page transition and a
//! seven-day expiry window under the `mengya` namespace.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::clock::DAY_MS;
use crate::error::{MengyaError, Result};

/// Tunables for one navigation/storage session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MengyaConfig {
    /// Prefix for persisted keys (`<namespace>_<path>`).
    pub namespace: String,
    /// Page identifier used when there is nothing to go back to.
    pub home_page: String,
    /// Maximum number of history entries kept.
    pub history_limit: usize,
    /// Delay between starting a transition and changing location.
    pub transition_delay_ms: u64,
    /// Delay before restoring a saved scroll offset on load.
    pub restore_delay_ms: u64,
    /// Age after which timestamped entries are swept.
    pub expiry_ms: u64,
    /// Default toast lifetime.
    pub toast_duration_ms: u32,
    /// Snapshot the history stack into the store between page loads.
    pub persist_history: bool,
    /// Backing file for the persisted tier.
    pub storage_path: PathBuf,
}

impl Default for MengyaConfig {
    fn default() -> Self {
        Self {
            namespace: "mengya".to_string(),
            home_page: "home".to_string(),
            history_limit: 10,
            transition_delay_ms: 200,
            restore_delay_ms: 100,
            expiry_ms: 7 * DAY_MS,
            toast_duration_ms: 3000,
            persist_history: false,
            storage_path: PathBuf::from("mengya-storage.json"),
        }
    }
}

impl MengyaConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(MengyaError::Config(
                "history_limit must be at least 1".into(),
            ));
        }
        if self.namespace.is_empty() {
            return Err(MengyaError::Config("namespace must not be empty".into()));
        }
        if self.home_page.is_empty() {
            return Err(MengyaError::Config("home_page must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_values_are_sensible() {
        let cfg = MengyaConfig::default();
        assert_eq!(cfg.namespace, "mengya");
        assert_eq!(cfg.home_page, "home");
        assert_eq!(cfg.history_limit, 10);
        assert_eq!(cfg.transition_delay_ms, 200);
        assert_eq!(cfg.restore_delay_ms, 100);
        assert_eq!(cfg.expiry_ms, 604_800_000);
        assert_eq!(cfg.toast_duration_ms, 3000);
        assert!(!cfg.persist_history);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = MengyaConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, MengyaConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_fields() {
        let cfg = MengyaConfig::from_toml_str(
            r#"
namespace = "sprout"
history_limit = 5
persist_history = true
"#,
        )
        .unwrap();
        assert_eq!(cfg.namespace, "sprout");
        assert_eq!(cfg.history_limit, 5);
        assert!(cfg.persist_history);
        assert_eq!(cfg.transition_delay_ms, 200);
    }

    #[test]
    fn zero_history_limit_is_rejected() {
        let err = MengyaConfig::from_toml_str("history_limit = 0").unwrap_err();
        assert!(matches!(err, MengyaError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = MengyaConfig::from_toml_str("history_limit = [").unwrap_err();
        assert!(matches!(err, MengyaError::TomlParse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "home_page = \"ipad-main\"").unwrap();
        let cfg = MengyaConfig::load(file.path()).unwrap();
        assert_eq!(cfg.home_page, "ipad-main");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = MengyaConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, MengyaError::Io(_)));
    }
}
