//! Error types for adapter operations

use reqwest::StatusCode;
use thiserror::Error;

use crate::ChainId;

/// Why a single provider produced no quote or route
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Provider returned error: {code} - {message}")]
	ProviderError { code: String, message: String },

	/// The provider answered but has no route for the pair or amount
	#[error("No route available: {reason}")]
	NoRoute { reason: String },

	#[error("{operation} is not supported by {adapter_id}")]
	UnsupportedOperation {
		operation: String,
		adapter_id: String,
	},

	#[error("{adapter_id} does not serve chain {chain_id}")]
	ChainNotSupported {
		chain_id: ChainId,
		adapter_id: String,
	},

	#[error("Invalid request: {reason}")]
	InvalidRequest { reason: String },

	#[error("Unknown provider: {0}")]
	UnsupportedAdapter(String),
}

impl AdapterError {
	/// HTTP status reported by the provider, if the failure carried one
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatusError { status_code, .. } => Some(*status_code),
			AdapterError::HttpError(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	pub fn http_failure(status_code: u16, reason: impl Into<String>) -> Self {
		Self::HttpStatusError {
			status_code,
			reason: reason.into(),
		}
	}

	/// Failure for a status whose response body said nothing useful
	pub fn from_status(status: StatusCode) -> Self {
		let reason = status
			.canonical_reason()
			.map(str::to_string)
			.unwrap_or_else(|| format!("status {}", status.as_u16()));
		Self::http_failure(status.as_u16(), reason)
	}

	pub fn invalid_response(reason: impl Into<String>) -> Self {
		Self::InvalidResponse {
			reason: reason.into(),
		}
	}

	pub fn no_route(reason: impl Into<String>) -> Self {
		Self::NoRoute {
			reason: reason.into(),
		}
	}
}

/// Registry construction errors
#[derive(Error, Debug)]
pub enum AdapterFactoryError {
	#[error("Provider id already registered: {adapter_id}")]
	AlreadyRegistered { adapter_id: String },
}
