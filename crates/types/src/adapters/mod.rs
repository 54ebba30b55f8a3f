//! Provider adapter domain model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub mod errors;
pub mod traits;

pub use errors::{AdapterError, AdapterFactoryError};
pub use traits::ProviderAdapter;

use crate::{ChainId, SecretString};

/// Result types for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
pub type AdapterFactoryResult<T> = Result<T, AdapterFactoryError>;

/// Runtime configuration handed to an adapter at construction
///
/// Only what the adapter needs to reach its provider; the settings layer
/// resolves secrets and defaults before building this.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
	/// Base URL of the provider API (no trailing path expected)
	pub base_url: String,

	/// API key sent in the provider-specific header
	pub api_key: Option<SecretString>,

	/// Extra HTTP headers sent with every request
	pub headers: HashMap<String, String>,
}

impl ProviderConfig {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			api_key: None,
			headers: HashMap::new(),
		}
	}

	pub fn with_api_key(mut self, api_key: Option<SecretString>) -> Self {
		self.api_key = api_key.filter(|key| !key.is_empty());
		self
	}

	pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
		self.headers = headers;
		self
	}
}

/// Static description of an adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
	/// Provider name used in quotes and prefer/exclude lists
	pub adapter_id: String,
	pub name: String,
	pub description: Option<String>,
	pub version: String,
}

impl Adapter {
	pub fn new(adapter_id: &str, name: &str, description: &str, version: &str) -> Self {
		Self {
			adapter_id: adapter_id.to_string(),
			name: name.to_string(),
			description: Some(description.to_string()),
			version: version.to_string(),
		}
	}
}

/// Adapter listing entry for `GET /providers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AdapterResponse {
	pub adapter_id: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub version: String,
	pub supported_chains: Vec<ChainId>,
}

impl AdapterResponse {
	pub fn from_adapter(adapter: &dyn ProviderAdapter) -> Self {
		let info = adapter.adapter_info();
		Self {
			adapter_id: info.adapter_id.clone(),
			name: info.name.clone(),
			description: info.description.clone(),
			version: info.version.clone(),
			supported_chains: adapter.supported_chains(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_blank_api_key_is_dropped() {
		let config = ProviderConfig::new("https://api.0x.org")
			.with_api_key(Some(SecretString::from("  ")));
		assert!(config.api_key.is_none());

		let config = ProviderConfig::new("https://api.0x.org")
			.with_api_key(Some(SecretString::from("key")));
		assert!(config.api_key.is_some());
	}
}
