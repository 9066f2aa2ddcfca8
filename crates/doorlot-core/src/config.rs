//! Runtime configuration from environment variables.

use std::path::PathBuf;

use crate::domain::{
    AssignmentRange, DoorlotError, Result, DEFAULT_MAX_SLOT, DEFAULT_MIN_SLOT,
};

/// Default location of the store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = ".doorlot/store.json";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorlotConfig {
    /// Path of the JSON store file.
    pub store_path: PathBuf,
    /// Range used when a draw does not specify one.
    pub default_range: AssignmentRange,
}

impl Default for DoorlotConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            default_range: AssignmentRange::default(),
        }
    }
}

impl DoorlotConfig {
    /// Create from environment variables
    ///
    /// Reads:
    /// - DOORLOT_STORE (optional, default: ".doorlot/store.json")
    /// - DOORLOT_MIN_SLOT (optional, default: 1)
    /// - DOORLOT_MAX_SLOT (optional, default: 100)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`DoorlotConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store_path = lookup("DOORLOT_STORE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
        let min = parse_slot(&lookup, "DOORLOT_MIN_SLOT", DEFAULT_MIN_SLOT)?;
        let max = parse_slot(&lookup, "DOORLOT_MAX_SLOT", DEFAULT_MAX_SLOT)?;

        Ok(Self {
            store_path,
            default_range: AssignmentRange::new(min, max)?,
        })
    }
}

fn parse_slot(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: i64) -> Result<i64> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DoorlotError::InvalidConfig(format!("{name}={raw} is not an integer"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DoorlotConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DoorlotConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = DoorlotConfig::from_lookup(lookup(&[
            ("DOORLOT_STORE", "/tmp/doors.json"),
            ("DOORLOT_MIN_SLOT", "10"),
            ("DOORLOT_MAX_SLOT", " 20 "),
        ]))
        .unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/doors.json"));
        assert_eq!(config.default_range, AssignmentRange::new(10, 20).unwrap());
    }

    #[test]
    fn test_non_numeric_slot_rejected() {
        let err = DoorlotConfig::from_lookup(lookup(&[("DOORLOT_MIN_SLOT", "one")])).unwrap_err();
        assert!(matches!(err, DoorlotError::InvalidConfig(_)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DoorlotConfig::from_lookup(lookup(&[
            ("DOORLOT_MIN_SLOT", "50"),
            ("DOORLOT_MAX_SLOT", "5"),
        ]))
        .unwrap_err();
        assert!(matches!(err, DoorlotError::Assign(_)));
    }
}
