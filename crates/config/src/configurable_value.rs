//! Credentials that are either written into the config file or read from the environment
//!
//! ```json
//! { "type": "env", "value": "ZEROX_API_KEY" }
//! { "type": "plain", "value": "my-key" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use swap_types::SecretString;

/// Placeholder prefix used by sample configs; never acceptable in production
pub const INSECURE_DEFAULT_PREFIX: &str = "WARNING-INSECURE-DEFAULT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurableValue {
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Variable name for `env`, the literal for `plain`
	pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),

	#[error("Configured value {0} is empty")]
	EmptyValue(String),
}

impl ConfigurableValue {
	pub fn from_env(name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: name.to_string(),
		}
	}

	pub fn from_plain(value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: value.to_string(),
		}
	}

	/// Resolve into a secret, rejecting unset variables and blank values
	pub fn resolve_for_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		let raw = match self.value_type {
			ValueType::Env => std::env::var(&self.value)
				.map_err(|_| ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone()))?,
			ValueType::Plain => self.value.clone(),
		};

		let secret = SecretString::from(raw);
		if secret.is_empty() {
			return Err(ConfigurableValueError::EmptyValue(self.to_string()));
		}
		Ok(secret)
	}

	pub fn is_insecure_default(&self) -> bool {
		self.value_type == ValueType::Plain && self.value.starts_with(INSECURE_DEFAULT_PREFIX)
	}

	/// Where the value comes from, safe to log
	pub fn description(&self) -> String {
		match (self.value_type, self.is_insecure_default()) {
			(ValueType::Env, _) => format!("environment variable '{}'", self.value),
			(ValueType::Plain, true) => "insecure default value".to_string(),
			(ValueType::Plain, false) => "configured plain value".to_string(),
		}
	}
}

impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.value_type, self.is_insecure_default()) {
			(ValueType::Env, _) => write!(f, "env:{}", self.value),
			(ValueType::Plain, true) => f.write_str("plain:[INSECURE-DEFAULT]"),
			(ValueType::Plain, false) => f.write_str("plain:[REDACTED]"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_env_value_resolves_from_environment() {
		std::env::set_var("SWAP_CONFIG_TEST_API_KEY", "key-from-env");
		let value = ConfigurableValue::from_env("SWAP_CONFIG_TEST_API_KEY");
		assert_eq!(value.resolve_for_secret().unwrap().expose_secret(), "key-from-env");
		std::env::remove_var("SWAP_CONFIG_TEST_API_KEY");
	}

	#[test]
	fn test_missing_and_blank_values_are_errors() {
		let missing = ConfigurableValue::from_env("SWAP_CONFIG_NON_EXISTENT_VAR");
		assert!(matches!(
			missing.resolve_for_secret(),
			Err(ConfigurableValueError::EnvironmentVariableNotFound(name)) if name == "SWAP_CONFIG_NON_EXISTENT_VAR"
		));

		let blank = ConfigurableValue::from_plain("   ");
		assert!(matches!(
			blank.resolve_for_secret(),
			Err(ConfigurableValueError::EmptyValue(_))
		));
	}

	#[test]
	fn test_plain_values_never_printed() {
		let key = ConfigurableValue::from_plain("k3y");
		assert_eq!(key.to_string(), "plain:[REDACTED]");
		assert_eq!(key.description(), "configured plain value");

		let placeholder = ConfigurableValue::from_plain("WARNING-INSECURE-DEFAULT-change-me");
		assert!(placeholder.is_insecure_default());
		assert_eq!(placeholder.to_string(), "plain:[INSECURE-DEFAULT]");

		let env = ConfigurableValue::from_env("BEBOP_API_KEY");
		assert!(!env.is_insecure_default());
		assert_eq!(env.to_string(), "env:BEBOP_API_KEY");
		assert_eq!(env.description(), "environment variable 'BEBOP_API_KEY'");
	}

	#[test]
	fn test_json_shape() {
		let value: ConfigurableValue =
			serde_json::from_str(r#"{"type":"env","value":"JUPITER_API_KEY"}"#).unwrap();
		assert_eq!(value.value_type, ValueType::Env);
		assert_eq!(value.value, "JUPITER_API_KEY");

		let json = serde_json::to_value(ConfigurableValue::from_plain("x")).unwrap();
		assert_eq!(json, serde_json::json!({ "type": "plain", "value": "x" }));
	}
}
