//! Generator selection.
//!
//! Resolves configuration and environment into a concrete generator at
//! startup. Credential problems surface here, not on the request path: a
//! remote configuration without a usable key either falls back to the
//! local generator (when allowed) or refuses to start.

use std::sync::Arc;

use ladle_config::{ConfigError, GeneratorConfig, GeneratorMode};
use tracing::{debug, warn};

use crate::deterministic::DeterministicGenerator;
use crate::generator::RecipeGenerator;
use crate::orchestrator::LlmRecipeGenerator;
use crate::telemetry::GenerationMetrics;

/// Select the generator that will serve requests.
///
/// # Errors
///
/// Returns [`ConfigError`] when the configuration is structurally invalid
/// or remote mode has no resolvable credential and fallback is disabled.
pub fn select_generator(
    config: &GeneratorConfig,
    metrics: Arc<GenerationMetrics>,
) -> Result<Box<dyn RecipeGenerator>, ConfigError> {
    config.validate()?;

    match config.mode {
        GeneratorMode::Local => {
            debug!(mode = %config.mode, "selected local generator");
            Ok(Box::new(DeterministicGenerator::new(metrics)))
        }
        GeneratorMode::Remote => {
            let remote = config
                .remote
                .as_ref()
                .ok_or(ConfigError::MissingRemoteConfig)?;

            match remote.resolve_api_key() {
                Some(api_key) => {
                    debug!(mode = %config.mode, model = %remote.model, "selected remote generator");
                    let generator =
                        LlmRecipeGenerator::from_remote_config(remote, api_key, metrics)?;
                    Ok(Box::new(generator))
                }
                None if config.fallback_to_local => {
                    warn!(
                        env = %remote.api_key_env,
                        "remote credential missing, falling back to local generator"
                    );
                    metrics.record_fallback();
                    Ok(Box::new(DeterministicGenerator::new(metrics)))
                }
                None => Err(ConfigError::MissingCredential {
                    env: remote.api_key_env.clone(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_mode_selects_deterministic_generator() {
        let metrics = Arc::new(GenerationMetrics::new());
        let generator = select_generator(&GeneratorConfig::local(), metrics).unwrap();
        assert_eq!(generator.mode(), GeneratorMode::Local);
    }

    #[test]
    fn test_remote_mode_without_remote_table_is_rejected() {
        let config = GeneratorConfig {
            mode: GeneratorMode::Remote,
            fallback_to_local: true,
            remote: None,
        };
        let result = select_generator(&config, Arc::new(GenerationMetrics::new()));
        assert!(matches!(result, Err(ConfigError::MissingRemoteConfig)));
    }

    #[test]
    fn test_structurally_invalid_remote_config_is_rejected() {
        let config = GeneratorConfig {
            mode: GeneratorMode::Remote,
            fallback_to_local: false,
            remote: Some(ladle_config::RemoteConfig {
                timeout_secs: 0,
                ..ladle_config::RemoteConfig::default()
            }),
        };
        let result = select_generator(&config, Arc::new(GenerationMetrics::new()));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
