//! Shared HTTP plumbing for provider adapters
//!
//! Every adapter owns one pooled client built here at construction. Response
//! handling is centralized so that status and decode failures surface with the
//! same error variants whatever the provider.

use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Client, ClientBuilder, RequestBuilder,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use swap_types::{AdapterError, AdapterResult, ProviderConfig, SecretString};
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = "swap-aggregator/0.1";
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Connection settings for a provider client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	/// Maximum number of idle connections per host
	pub max_idle_per_host: usize,
	/// Connection keep-alive timeout
	pub keep_alive_timeout_ms: u64,
	pub connect_timeout_ms: u64,
	/// Additional headers (for auth, etc.)
	pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			max_idle_per_host: 10,
			keep_alive_timeout_ms: 90_000,
			connect_timeout_ms: 5_000,
			headers: vec![
				("User-Agent".to_string(), USER_AGENT.to_string()),
				("Accept".to_string(), "application/json".to_string()),
			],
		}
	}
}

/// How a provider expects its API key
#[derive(Debug, Clone)]
pub enum AuthConfig {
	/// No authentication
	None,
	/// `Authorization: Bearer <key>`
	Bearer { token: SecretString },
	/// API key in a provider-specific header
	ApiKey { header: String, key: SecretString },
}

impl AuthConfig {
	pub fn bearer(token: Option<&SecretString>) -> Self {
		match token {
			Some(t) => Self::Bearer { token: t.clone() },
			None => Self::None,
		}
	}

	pub fn api_key(header: &str, key: Option<&SecretString>) -> Self {
		match key {
			Some(k) => Self::ApiKey {
				header: header.to_string(),
				key: k.clone(),
			},
			None => Self::None,
		}
	}
}

impl ClientConfig {
	/// Defaults plus the provider's configured headers and credentials
	pub fn for_provider(provider: &ProviderConfig, auth: &AuthConfig) -> Self {
		let mut config = Self::default();

		match auth {
			AuthConfig::None => {},
			AuthConfig::Bearer { token } => {
				config.headers.push((
					"Authorization".to_string(),
					format!("Bearer {}", token.expose_secret()),
				));
			},
			AuthConfig::ApiKey { header, key } => {
				config
					.headers
					.push((header.clone(), key.expose_secret().to_string()));
			},
		}

		let mut extra: Vec<_> = provider.headers.iter().collect();
		extra.sort();
		for (key, value) in extra {
			config.headers.push((key.clone(), value.clone()));
		}

		config
	}

	pub fn with_header(mut self, key: &str, value: &str) -> Self {
		self.headers.push((key.to_string(), value.to_string()));
		self
	}
}

/// Create a pooled HTTP client for the given configuration
pub fn build_client(config: &ClientConfig) -> AdapterResult<Client> {
	let mut header_map = HeaderMap::new();
	for (key, value) in &config.headers {
		match (
			HeaderName::from_bytes(key.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(mut value)) => {
				if name == reqwest::header::AUTHORIZATION || key.to_lowercase().contains("key") {
					value.set_sensitive(true);
				}
				header_map.insert(name, value);
			},
			_ => warn!("Skipping invalid HTTP header '{}'", key),
		}
	}

	ClientBuilder::new()
		.pool_max_idle_per_host(config.max_idle_per_host)
		.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
		.tcp_keepalive(Duration::from_secs(60))
		.connect_timeout(Duration::from_millis(config.connect_timeout_ms))
		.default_headers(header_map)
		.build()
		.map_err(AdapterError::HttpError)
}

/// Properly construct URL by joining base endpoint with a relative path
pub fn build_url(base_url: &str, path: &str) -> AdapterResult<Url> {
	let mut base = Url::parse(base_url).map_err(|e| AdapterError::InvalidRequest {
		reason: format!("Invalid base URL '{}': {}", base_url, e),
	})?;

	// Ensure the base URL is treated as a directory by ensuring it ends with a slash
	if !base.path().ends_with('/') {
		base.set_path(&format!("{}/", base.path()));
	}

	base.join(path.trim_start_matches('/'))
		.map_err(|e| AdapterError::InvalidRequest {
			reason: format!(
				"Failed to join URL path '{}' to base '{}': {}",
				path, base_url, e
			),
		})
}

/// Send a request and decode a JSON body
///
/// Non-2xx responses become [`AdapterError::HttpStatusError`] carrying the
/// (truncated) body as reason, so adapters can recognise provider-specific
/// "no route" answers.
pub async fn send_json<T: DeserializeOwned>(
	request: RequestBuilder,
	provider: &str,
) -> AdapterResult<T> {
	let response = request.send().await.map_err(AdapterError::HttpError)?;
	let status = response.status();
	let body = response.bytes().await.map_err(AdapterError::HttpError)?;

	if !status.is_success() {
		let text = String::from_utf8_lossy(&body);
		let text = text.trim();
		debug!(
			provider = provider,
			status = status.as_u16(),
			"Provider returned error status"
		);
		return Err(if text.is_empty() {
			AdapterError::from_status(status)
		} else {
			AdapterError::http_failure(
				status.as_u16(),
				text.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>(),
			)
		});
	}

	serde_json::from_slice(&body).map_err(|e| AdapterError::InvalidResponse {
		reason: format!("Failed to parse {} response: {}", provider, e),
	})
}

/// Turn a client-error status whose body matches `is_no_route` into `NoRoute`
pub fn classify_no_route(error: AdapterError, is_no_route: impl Fn(&str) -> bool) -> AdapterError {
	match error {
		AdapterError::HttpStatusError {
			status_code,
			reason,
		} if (400..500).contains(&status_code) && is_no_route(&reason.to_lowercase()) => {
			AdapterError::NoRoute { reason }
		},
		other => other,
	}
}

/// Required string field in a provider response
pub fn required<T>(value: Option<T>, provider: &str, field: &str) -> AdapterResult<T> {
	value.ok_or_else(|| AdapterError::InvalidResponse {
		reason: format!("{} response is missing '{}'", provider, field),
	})
}

/// Parse a decimal amount reported by a provider
pub fn parse_amount(value: &str, provider: &str, field: &str) -> AdapterResult<swap_types::Amount> {
	swap_types::Amount::parse(value).map_err(|e| AdapterError::InvalidResponse {
		reason: format!("{} returned invalid {} '{}': {}", provider, field, value, e),
	})
}

/// Parse an amount some providers send as a JSON number and others as a string
pub fn parse_amount_value(
	value: &serde_json::Value,
	provider: &str,
	field: &str,
) -> AdapterResult<swap_types::Amount> {
	match value {
		serde_json::Value::String(text) => parse_amount(text, provider, field),
		serde_json::Value::Number(number) => match number.as_u64() {
			Some(n) => Ok(swap_types::Amount::from(n)),
			None => parse_amount(&number.to_string(), provider, field),
		},
		other => Err(AdapterError::InvalidResponse {
			reason: format!("{} returned non-numeric {}: {}", provider, field, other),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn test_build_url_joins_relative_paths() {
		let url = build_url("https://api.example.com", "swap/v1/quote").unwrap();
		assert_eq!(url.as_str(), "https://api.example.com/swap/v1/quote");

		let url = build_url("https://api.example.com/v6.0/", "/1/quote").unwrap();
		assert_eq!(url.as_str(), "https://api.example.com/v6.0/1/quote");

		let url = build_url("https://api.example.com/prefix", "quote").unwrap();
		assert_eq!(url.as_str(), "https://api.example.com/prefix/quote");

		assert!(build_url("not a url", "quote").is_err());
	}

	#[test]
	fn test_client_config_includes_auth_and_headers() {
		let mut headers = HashMap::new();
		headers.insert("x-partner".to_string(), "acme".to_string());
		let provider = ProviderConfig::new("https://api.example.com")
			.with_api_key(Some(SecretString::from("k123")))
			.with_headers(headers);

		let config =
			ClientConfig::for_provider(&provider, &AuthConfig::bearer(provider.api_key.as_ref()));
		assert!(config
			.headers
			.contains(&("Authorization".to_string(), "Bearer k123".to_string())));
		assert!(config
			.headers
			.contains(&("x-partner".to_string(), "acme".to_string())));
		assert!(build_client(&config).is_ok());
	}

	#[test]
	fn test_missing_key_means_no_auth() {
		assert!(matches!(AuthConfig::bearer(None), AuthConfig::None));
		assert!(matches!(
			AuthConfig::api_key("0x-api-key", None),
			AuthConfig::None
		));
	}

	#[test]
	fn test_parse_amount_value_accepts_strings_and_integers() {
		let big = serde_json::json!("340282366920938463463374607431768211456");
		let amount = parse_amount_value(&big, "p", "f").unwrap();
		assert_eq!(amount.to_string(), "340282366920938463463374607431768211456");
		let amount = parse_amount_value(&serde_json::json!(128000), "p", "f").unwrap();
		assert_eq!(amount.to_string(), "128000");
		assert!(parse_amount_value(&serde_json::json!(1.5), "p", "f").is_err());
		assert!(parse_amount_value(&serde_json::json!(null), "p", "f").is_err());
	}

	#[test]
	fn test_classify_no_route() {
		let error = AdapterError::http_failure(400, "Insufficient liquidity");
		assert!(matches!(
			classify_no_route(error, |body| body.contains("liquidity")),
			AdapterError::NoRoute { .. }
		));

		let error = AdapterError::http_failure(500, "insufficient liquidity");
		assert!(matches!(
			classify_no_route(error, |body| body.contains("liquidity")),
			AdapterError::HttpStatusError { .. }
		));
	}
}
