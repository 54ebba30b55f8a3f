//! Error types for route building

use thiserror::Error;

/// Why a selected quote could not be turned into a signable payload
///
/// Every variant is distinct from "no quotes found" so callers can tell a
/// stale selection apart from a provider the aggregator cannot build for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
	#[error("Invalid build request: {0}")]
	Validation(String),

	#[error("Quote {quote_id} failed verification: {reason}")]
	InvalidQuote { quote_id: String, reason: String },

	#[error("Quote {quote_id} expired")]
	QuoteExpired { quote_id: String },

	#[error("No route builder for provider '{provider}'")]
	UnsupportedProvider { provider: String },

	#[error("Provider '{provider}' failed to build the route: {reason}")]
	BuildFailed { provider: String, reason: String },
}

impl BuildError {
	/// Stable machine-readable code for API responses
	pub fn code(&self) -> &'static str {
		match self {
			BuildError::Validation(_) => "VALIDATION_ERROR",
			BuildError::InvalidQuote { .. } => "INVALID_QUOTE",
			BuildError::QuoteExpired { .. } => "QUOTE_EXPIRED",
			BuildError::UnsupportedProvider { .. } => "UNSUPPORTED_PROVIDER",
			BuildError::BuildFailed { .. } => "BUILD_FAILED",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_codes_are_distinct() {
		let errors = [
			BuildError::Validation("bad wallet".to_string()),
			BuildError::InvalidQuote {
				quote_id: "q".to_string(),
				reason: "checksum".to_string(),
			},
			BuildError::QuoteExpired {
				quote_id: "q".to_string(),
			},
			BuildError::UnsupportedProvider {
				provider: "paraswap".to_string(),
			},
			BuildError::BuildFailed {
				provider: "1inch".to_string(),
				reason: "HTTP 500".to_string(),
			},
		];
		let mut codes: Vec<&str> = errors.iter().map(BuildError::code).collect();
		codes.sort_unstable();
		codes.dedup();
		assert_eq!(codes.len(), errors.len());
	}

	#[test]
	fn test_error_messages() {
		let error = BuildError::UnsupportedProvider {
			provider: "paraswap".to_string(),
		};
		assert!(error.to_string().contains("paraswap"));
	}
}
