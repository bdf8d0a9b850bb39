//! Runtime configuration read from the environment.

use std::path::PathBuf;

use thiserror::Error;

use crate::dataset::{Dataset, DatasetError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_AUTH_TOKEN: &str = "my-token";

const BASE_URL_VAR: &str = "CATALOG_BASE_URL";
const AUTH_TOKEN_VAR: &str = "CATALOG_AUTH_TOKEN";
const DATASET_VAR: &str = "CATALOG_DATASET";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header of single-book lookups.
    pub auth_token: String,
    /// JSON dataset to preload instead of the built-in roster.
    pub dataset_path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
            dataset_path: None,
        }
    }
}

/// Values given explicitly (command-line flags); each one that is set wins
/// over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub auth_token: Option<String>,
    pub dataset_path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_overrides(ConfigOverrides::default())
    }

    pub fn from_env_with_overrides(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup_with_overrides(|key| std::env::var(key).ok(), overrides)
    }

    /// Build from an arbitrary variable source; unset or empty variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup_with_overrides(lookup, ConfigOverrides::default())
    }

    /// Validation runs once, on the merged result, so a bad variable that an
    /// override replaces is never reported.
    pub fn from_lookup_with_overrides(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = Self::default();
        let config = Self {
            base_url: overrides
                .base_url
                .or_else(|| var(BASE_URL_VAR))
                .unwrap_or(defaults.base_url),
            auth_token: overrides
                .auth_token
                .or_else(|| var(AUTH_TOKEN_VAR))
                .unwrap_or(defaults.auth_token),
            dataset_path: overrides
                .dataset_path
                .or_else(|| var(DATASET_VAR).map(PathBuf::from)),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }

    pub fn load_dataset(&self) -> Result<Dataset, DatasetError> {
        match &self.dataset_path {
            Some(path) => Dataset::from_json_file(path),
            None => Ok(Dataset::builtin()),
        }
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
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = CatalogConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = CatalogConfig::from_lookup(lookup(&[
            ("CATALOG_BASE_URL", "https://books.example.com"),
            ("CATALOG_AUTH_TOKEN", "Bearer abc"),
            ("CATALOG_DATASET", "/etc/catalog.json"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://books.example.com");
        assert_eq!(config.auth_token, "Bearer abc");
        assert_eq!(config.dataset_path, Some(PathBuf::from("/etc/catalog.json")));
    }

    #[test]
    fn empty_variables_are_ignored() {
        let config = CatalogConfig::from_lookup(lookup(&[("CATALOG_AUTH_TOKEN", "")])).unwrap();
        assert_eq!(config.auth_token, DEFAULT_AUTH_TOKEN);
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = CatalogConfig::from_lookup(lookup(&[("CATALOG_BASE_URL", "ftp://x")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidBaseUrl("ftp://x".to_string()));
    }

    #[test]
    fn overrides_win_over_variables() {
        let config = CatalogConfig::from_lookup_with_overrides(
            lookup(&[
                ("CATALOG_BASE_URL", "http://env.example.com"),
                ("CATALOG_AUTH_TOKEN", "env-token"),
                ("CATALOG_DATASET", "/env/catalog.json"),
            ]),
            ConfigOverrides {
                base_url: Some("http://flag.example.com".to_string()),
                auth_token: Some("flag-token".to_string()),
                dataset_path: Some(PathBuf::from("/flag/catalog.json")),
            },
        )
        .unwrap();
        assert_eq!(config.base_url, "http://flag.example.com");
        assert_eq!(config.auth_token, "flag-token");
        assert_eq!(config.dataset_path, Some(PathBuf::from("/flag/catalog.json")));
    }

    #[test]
    fn unset_overrides_fall_back_to_variables() {
        let config = CatalogConfig::from_lookup_with_overrides(
            lookup(&[("CATALOG_AUTH_TOKEN", "env-token")]),
            ConfigOverrides {
                base_url: Some("https://flag.example.com".to_string()),
                ..ConfigOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(config.base_url, "https://flag.example.com");
        assert_eq!(config.auth_token, "env-token");
        assert_eq!(config.dataset_path, None);
    }

    #[test]
    fn valid_override_replaces_invalid_variable() {
        let config = CatalogConfig::from_lookup_with_overrides(
            lookup(&[("CATALOG_BASE_URL", "ftp://x")]),
            ConfigOverrides {
                base_url: Some("http://ok".to_string()),
                ..ConfigOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(config.base_url, "http://ok");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let err = CatalogConfig::from_lookup_with_overrides(
            lookup(&[]),
            ConfigOverrides {
                base_url: Some("books.example.com".to_string()),
                ..ConfigOverrides::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBaseUrl("books.example.com".to_string()));
    }

    #[test]
    fn builtin_dataset_without_path() {
        let dataset = CatalogConfig::default().load_dataset().unwrap();
        assert_eq!(dataset, Dataset::builtin());
    }
}
