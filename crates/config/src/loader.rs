//! Configuration loading utilities

use crate::{settings::ConfigValidationError, Settings};
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Default config file location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config";

/// Prefix for environment overrides, e.g. `SWAP_AGGREGATOR_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "SWAP_AGGREGATOR";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("Failed to read configuration: {0}")]
	Config(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from the config file and environment
///
/// The file path can be overridden with `CONFIG_PATH`. A missing file is not an
/// error; every section falls back to its defaults.
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
	load_config_from(&path)
}

/// Load configuration from `path` (extension optional) and the environment
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.prefix_separator("_")
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_file_yields_defaults() {
		let settings = load_config_from("does/not/exist/swap-config").unwrap();
		assert_eq!(settings.server.port, 3000);
		assert_eq!(settings.providers.len(), 5);
	}

	#[test]
	fn test_shipped_sample_config_loads() {
		let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/config.json");
		let settings = load_config_from(path).unwrap();
		assert_eq!(settings.quotes.ttl_secs, 60);
		assert!(!settings.environment.rate_limiting.enabled);
		assert_eq!(settings.environment.rate_limiting.requests_per_minute, 100);
	}

	#[test]
	fn test_unapplied_rate_limit_keys_are_rejected() {
		let path = std::env::temp_dir().join(format!(
			"swap-config-burst-{}.json",
			std::process::id()
		));
		std::fs::write(
			&path,
			r#"{"environment": {"profile": "development", "rate_limiting": {"enabled": true, "requests_per_minute": 100, "burst_size": 10}}}"#,
		)
		.unwrap();

		let result = load_config_from(path.to_str().unwrap());
		std::fs::remove_file(&path).ok();

		assert!(matches!(result, Err(ConfigLoadError::Config(_))));
	}
}
