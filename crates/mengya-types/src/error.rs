//! Error types for the Mengya page shell.

use std::io;

/// Errors produced by the Mengya crates.
#[derive(Debug, thiserror::Error)]
pub enum MengyaError {
    #[error("page not found: {0}")]
    UnknownPage(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, MengyaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_page_display() {
        let e = MengyaError::UnknownPage("space-station".into());
        assert_eq!(format!("{e}"), "page not found: space-station");
    }

    #[test]
    fn storage_error_display() {
        let e = MengyaError::Storage("quota exceeded".into());
        assert_eq!(format!("{e}"), "storage error: quota exceeded");
    }

    #[test]
    fn serialization_error_display() {
        let e = MengyaError::Serialization("key must be a string".into());
        assert_eq!(format!("{e}"), "serialization error: key must be a string");
    }

    #[test]
    fn invalid_path_display() {
        let e = MengyaError::InvalidPath("x.y: x is a number".into());
        assert_eq!(format!("{e}"), "invalid path: x.y: x is a number");
    }

    #[test]
    fn config_error_display() {
        let e = MengyaError::Config("history_limit must be positive".into());
        assert_eq!(
            format!("{e}"),
            "config error: history_limit must be positive"
        );
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: MengyaError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: MengyaError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: MengyaError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<()> = Err(MengyaError::Storage("oops".into()));
        assert!(r.is_err());
    }
}
