//! Generator configuration
//!
//! The embedding service owns configuration parsing (file, environment,
//! flags). This crate owns the typed shape it hands over: which generator
//! mode to run, whether the remote path may fall back to the local one, and
//! the remote endpoint parameters. The API credential itself never appears
//! in configuration: `RemoteConfig` names the environment variable that
//! holds it, and resolution happens at selection time.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which generator implementation serves requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorMode {
    /// Deterministic in-process generator; no network
    #[default]
    Local,
    /// LLM-backed generator over an OpenAI-compatible API
    Remote,
}

impl fmt::Display for GeneratorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorMode::Local => write!(f, "local"),
            GeneratorMode::Remote => write!(f, "remote"),
        }
    }
}

/// Remote endpoint parameters.
///
/// Field defaults mirror the reference deployment, so an empty table is a
/// working OpenAI configuration apart from the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Response token ceiling per generation attempt
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_max_output_tokens() -> u32 {
    1200
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the API key from the configured environment variable.
    ///
    /// Unset and empty both count as absent.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }
}

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Generator mode; defaults to local
    #[serde(default)]
    pub mode: GeneratorMode,
    /// In remote mode, silently substitute the local generator when the
    /// credential is absent (counted as a fallback event)
    #[serde(default)]
    pub fallback_to_local: bool,
    /// Remote parameters; required when `mode` is remote
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

impl GeneratorConfig {
    /// A purely local configuration.
    #[must_use]
    pub fn local() -> Self {
        Self::default()
    }

    /// Structural validation, intended to run at startup.
    ///
    /// Credential presence is a selection-time concern (it depends on the
    /// process environment); this checks everything knowable from the
    /// configuration alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when remote mode lacks a remote table or a
    /// remote parameter is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode == GeneratorMode::Remote && self.remote.is_none() {
            return Err(ConfigError::MissingRemoteConfig);
        }

        if let Some(remote) = &self.remote {
            if remote.api_key_env.is_empty() {
                return Err(ConfigError::Invalid(
                    "api_key_env must name an environment variable".to_string(),
                ));
            }
            if remote.max_output_tokens == 0 {
                return Err(ConfigError::Invalid(
                    "max_output_tokens must be positive".to_string(),
                ));
            }
            if remote.timeout_secs == 0 {
                return Err(ConfigError::Invalid(
                    "timeout_secs must be positive".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration problems surfaced at startup, never at request time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("generator mode is \"remote\" but no remote configuration was provided")]
    MissingRemoteConfig,
    #[error(
        "environment variable {env} is not set; set it or enable fallback_to_local"
    )]
    MissingCredential { env: String },
    #[error("invalid generator configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_empty_document_yields_local_defaults() {
        let config: GeneratorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.mode, GeneratorMode::Local);
        assert!(!config.fallback_to_local);
        assert!(config.remote.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_defaults_mirror_reference_deployment() {
        let remote: RemoteConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(remote.api_key_env, "OPENAI_API_KEY");
        assert_eq!(remote.base_url, "https://api.openai.com/v1");
        assert_eq!(remote.model, "gpt-4.1-mini");
        assert_eq!(remote.max_output_tokens, 1200);
        assert_eq!(remote.request_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_mode_parses_lowercase_names_only() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"mode": "remote", "remote": {}}"#).unwrap();
        assert_eq!(config.mode, GeneratorMode::Remote);

        let invalid = serde_json::from_str::<GeneratorConfig>(r#"{"mode": "stub"}"#);
        assert!(invalid.is_err(), "unknown mode should be rejected");
    }

    #[test]
    fn test_remote_mode_without_remote_table_fails_validation() {
        let config = GeneratorConfig {
            mode: GeneratorMode::Remote,
            fallback_to_local: false,
            remote: None,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRemoteConfig)
        ));
    }

    #[test]
    fn test_out_of_range_remote_values_fail_validation() {
        let config = GeneratorConfig {
            mode: GeneratorMode::Remote,
            fallback_to_local: false,
            remote: Some(RemoteConfig {
                max_output_tokens: 0,
                ..RemoteConfig::default()
            }),
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn test_resolve_api_key_requires_non_empty_value() {
        let remote = RemoteConfig {
            api_key_env: "LADLE_CONFIG_TEST_KEY".to_string(),
            ..RemoteConfig::default()
        };

        unsafe {
            std::env::remove_var("LADLE_CONFIG_TEST_KEY");
        }
        assert_eq!(remote.resolve_api_key(), None);

        unsafe {
            std::env::set_var("LADLE_CONFIG_TEST_KEY", "");
        }
        assert_eq!(remote.resolve_api_key(), None, "empty counts as absent");

        unsafe {
            std::env::set_var("LADLE_CONFIG_TEST_KEY", "test-key");
        }
        assert_eq!(remote.resolve_api_key(), Some("test-key".to_string()));

        unsafe {
            std::env::remove_var("LADLE_CONFIG_TEST_KEY");
        }
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(GeneratorMode::Local.to_string(), "local");
        assert_eq!(GeneratorMode::Remote.to_string(), "remote");
    }
}
