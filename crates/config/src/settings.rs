//! Configuration settings structures

use crate::{configurable_value::ConfigurableValue, ConfigurableValueError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use swap_types::constants::limits::{
	DEFAULT_AGGREGATION_TIMEOUT_MS, DEFAULT_BUILD_TIMEOUT_MS, DEFAULT_QUOTE_TTL_SECS,
	MAX_AGGREGATION_TIMEOUT_MS, MAX_BUILD_TIMEOUT_MS, MIN_TIMEOUT_MS,
};
use swap_types::{ProviderConfig, SecretString};
use thiserror::Error;
use tracing::warn;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	/// Provider id (`0x`, `bebop`, `1inch`, `kyberswap`, `jupiter`) to its settings
	pub providers: BTreeMap<String, ProviderSettings>,
	pub timeouts: TimeoutSettings,
	pub quotes: QuoteSettings,
	pub cors: CorsSettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
	pub security: SecuritySettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// Individual provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
	#[serde(default = "default_true")]
	pub enabled: bool,
	/// Overrides the provider's public API endpoint
	#[serde(default)]
	pub base_url: Option<String>,
	/// API key; the provider is queried without one when it cannot be resolved
	#[serde(default)]
	pub api_key: Option<ConfigurableValue>,
	#[serde(default)]
	pub headers: Option<HashMap<String, String>>,
}

fn default_true() -> bool {
	true
}

impl ProviderSettings {
	pub fn with_api_key_env(env_var_name: &str) -> Self {
		Self {
			enabled: true,
			base_url: None,
			api_key: Some(ConfigurableValue::from_env(env_var_name)),
			headers: None,
		}
	}

	/// Resolve into the runtime adapter configuration
	///
	/// `default_base_url` is used when no override is configured.
	pub fn to_provider_config(
		&self,
		provider_id: &str,
		default_base_url: Option<&str>,
	) -> Result<ProviderConfig, ConfigValidationError> {
		let base_url = self
			.base_url
			.as_deref()
			.or(default_base_url)
			.ok_or_else(|| ConfigValidationError::MissingBaseUrl {
				provider: provider_id.to_string(),
			})?;

		let api_key = match &self.api_key {
			Some(value) => match value.resolve_for_secret() {
				Ok(secret) => Some(secret),
				Err(e) => {
					warn!(
						"No API key for provider {} ({}), continuing without one",
						provider_id, e
					);
					None
				},
			},
			None => None,
		};

		Ok(ProviderConfig::new(base_url)
			.with_api_key(api_key)
			.with_headers(self.headers.clone().unwrap_or_default()))
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Shared deadline for one quote aggregation
	pub aggregation_ms: u64,
	/// Upper bound for a provider build call
	pub build_ms: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			aggregation_ms: DEFAULT_AGGREGATION_TIMEOUT_MS,
			build_ms: DEFAULT_BUILD_TIMEOUT_MS,
		}
	}
}

/// Quote lifetime configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuoteSettings {
	/// Seconds a quote can be built after it was issued
	pub ttl_secs: u64,
}

impl Default for QuoteSettings {
	fn default() -> Self {
		Self {
			ttl_secs: DEFAULT_QUOTE_TTL_SECS,
		}
	}
}

/// Allowed browser origins
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CorsSettings {
	/// Exact origins, or `"*"` for any
	pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
	fn default() -> Self {
		Self {
			allowed_origins: vec!["*".to_string()],
		}
	}
}

impl CorsSettings {
	pub fn allows_any(&self) -> bool {
		self.allowed_origins.iter().any(|origin| origin == "*")
	}
}

/// Environment-specific settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
	pub rate_limiting: RateLimitSettings,
}

/// Environment profiles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

/// Global rate limit, applied per connection-accepting service
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RateLimitSettings {
	pub enabled: bool,
	pub requests_per_minute: u32,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Security configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SecuritySettings {
	/// Secret key for HMAC quote integrity
	///
	/// Example configurations:
	/// - Environment variable: `{"type": "env", "value": "INTEGRITY_SECRET"}`
	/// - Plain value: `{"type": "plain", "value": "your-secret-here"}`
	pub integrity_secret: ConfigurableValue,
}

/// Validation errors for loaded settings
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("server.port must not be 0")]
	InvalidPort,

	#[error("{field} must be between {min} and {max} ms, got {value}")]
	TimeoutOutOfRange {
		field: String,
		value: u64,
		min: u64,
		max: u64,
	},

	#[error("quotes.ttl_secs must be greater than 0")]
	InvalidQuoteTtl,

	#[error("provider {provider}: invalid base_url '{url}': {reason}")]
	InvalidBaseUrl {
		provider: String,
		url: String,
		reason: String,
	},

	#[error("provider {provider}: no base_url configured and no default is known")]
	MissingBaseUrl { provider: String },

	#[error("cors.allowed_origins must not be empty")]
	EmptyCorsOrigins,
}

/// Built-in providers, each reading its key from a conventional variable
pub fn default_providers() -> BTreeMap<String, ProviderSettings> {
	[
		("0x", "ZEROX_API_KEY"),
		("bebop", "BEBOP_API_KEY"),
		("1inch", "ONEINCH_API_KEY"),
		("kyberswap", "KYBERSWAP_CLIENT_ID"),
		("jupiter", "JUPITER_API_KEY"),
	]
	.into_iter()
	.map(|(id, env)| (id.to_string(), ProviderSettings::with_api_key_env(env)))
	.collect()
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings {
				host: "0.0.0.0".to_string(),
				port: 3000,
			},
			providers: default_providers(),
			timeouts: TimeoutSettings::default(),
			quotes: QuoteSettings::default(),
			cors: CorsSettings::default(),
			environment: EnvironmentSettings {
				profile: EnvironmentProfile::Development,
				rate_limiting: RateLimitSettings {
					enabled: false,
					requests_per_minute: 100,
				},
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
			security: SecuritySettings {
				integrity_secret: ConfigurableValue::from_env("INTEGRITY_SECRET"),
			},
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Get enabled providers only
	pub fn enabled_providers(&self) -> BTreeMap<String, ProviderSettings> {
		self.providers
			.iter()
			.filter(|(_, config)| config.enabled)
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Check if running in production
	pub fn is_production(&self) -> bool {
		self.environment.profile == EnvironmentProfile::Production
	}

	/// Get integrity secret for secure handling
	pub fn get_integrity_secret_secure(&self) -> Result<SecretString, ConfigurableValueError> {
		self.security.integrity_secret.resolve_for_secret()
	}

	/// Check ranges and formats the type system cannot express
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.server.port == 0 {
			return Err(ConfigValidationError::InvalidPort);
		}

		for (field, value, max) in [
			(
				"timeouts.aggregation_ms",
				self.timeouts.aggregation_ms,
				MAX_AGGREGATION_TIMEOUT_MS,
			),
			("timeouts.build_ms", self.timeouts.build_ms, MAX_BUILD_TIMEOUT_MS),
		] {
			if !(MIN_TIMEOUT_MS..=max).contains(&value) {
				return Err(ConfigValidationError::TimeoutOutOfRange {
					field: field.to_string(),
					value,
					min: MIN_TIMEOUT_MS,
					max,
				});
			}
		}

		if self.quotes.ttl_secs == 0 {
			return Err(ConfigValidationError::InvalidQuoteTtl);
		}

		if self.cors.allowed_origins.is_empty() {
			return Err(ConfigValidationError::EmptyCorsOrigins);
		}

		for (provider, config) in &self.providers {
			if let Some(url) = &config.base_url {
				let parsed = url::Url::parse(url).map_err(|e| ConfigValidationError::InvalidBaseUrl {
					provider: provider.clone(),
					url: url.clone(),
					reason: e.to_string(),
				})?;
				if !matches!(parsed.scheme(), "http" | "https") {
					return Err(ConfigValidationError::InvalidBaseUrl {
						provider: provider.clone(),
						url: url.clone(),
						reason: "scheme must be http or https".to_string(),
					});
				}
			}
		}

		if self.security.integrity_secret.is_insecure_default() {
			warn!("Integrity secret is an insecure placeholder; replace it before production use");
		}

		Ok(())
	}
}
