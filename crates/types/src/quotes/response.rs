//! Quote response model for the API layer

use chrono::Utc;
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::ScoredQuote;

/// Statistics about one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AggregationMetadata {
	pub total_duration_ms: u64,
	pub timeout_ms: u64,
	/// Providers registered with the aggregator
	pub providers_available: usize,
	/// Providers applicable to the request after chain and list filtering
	pub providers_queried: usize,
	/// Providers that produced a usable quote
	pub providers_responded: usize,
	pub queried_providers: Vec<String>,
}

/// Response body for `POST /quote`, best quote first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuotesResponse {
	pub quotes: Vec<ScoredQuote>,
	pub total_quotes: usize,
	pub timestamp: i64,
	pub metadata: AggregationMetadata,
}

impl QuotesResponse {
	pub fn new(quotes: Vec<ScoredQuote>, metadata: AggregationMetadata) -> Self {
		Self {
			total_quotes: quotes.len(),
			quotes,
			timestamp: Utc::now().timestamp(),
			metadata,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.quotes.is_empty()
	}
}
