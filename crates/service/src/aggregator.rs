//! Core aggregation service logic

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant as StdInstant;
use swap_adapters::AdapterRegistry;
use swap_types::{AggregationMetadata, Quote, QuoteRequest, QuoteValidationError};
use thiserror::Error;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::integrity::{stamp_quote, IntegrityTrait};

#[derive(Debug, Error)]
pub enum AggregatorServiceError {
	#[error("Invalid quote request: {0}")]
	Validation(#[from] QuoteValidationError),

	#[error("Internal error: {0}")]
	Internal(String),
}

pub type AggregatorResult<T> = Result<T, AggregatorServiceError>;

/// Service for aggregating quotes from multiple providers
pub struct AggregatorService {
	adapter_registry: Arc<AdapterRegistry>,
	timeout_ms: u64,
	quote_ttl_secs: u64,
	integrity_service: Arc<dyn IntegrityTrait>,
}

impl AggregatorService {
	pub fn new(
		adapter_registry: Arc<AdapterRegistry>,
		timeout_ms: u64,
		quote_ttl_secs: u64,
		integrity_service: Arc<dyn IntegrityTrait>,
	) -> Self {
		Self {
			adapter_registry,
			timeout_ms,
			quote_ttl_secs,
			integrity_service,
		}
	}

	/// Fetch quotes concurrently from every applicable provider
	///
	/// Each provider runs in its own task against one shared deadline; a
	/// provider that fails, panics or misses the deadline contributes nothing
	/// and never affects the others. Quotes come back in registry order.
	pub async fn fetch_quotes(
		&self,
		request: &QuoteRequest,
	) -> AggregatorResult<(Vec<Quote>, AggregationMetadata)> {
		request.validate()?;

		let started = StdInstant::now();
		let deadline = Instant::now() + Duration::from_millis(self.timeout_ms);

		let adapters: Vec<_> = self
			.adapter_registry
			.get_all()
			.filter(|adapter| adapter.supports_chain(request.chain_id))
			.filter(|adapter| request.allows_provider(adapter.id()))
			.cloned()
			.collect();
		let queried_providers: Vec<String> =
			adapters.iter().map(|adapter| adapter.id().to_string()).collect();

		info!(
			"Fetching {} quotes for {} -> {} from {} providers",
			request.chain_id,
			request.sell_token,
			request.buy_token,
			adapters.len()
		);

		let tasks = adapters.into_iter().map(|adapter| {
			let request = request.clone();
			tokio::spawn(async move {
				debug!("Starting quote fetch from provider {}", adapter.id());
				// `quote` already honours the deadline; the outer bound covers
				// adapters that override it
				tokio::time::timeout_at(deadline, adapter.quote(&request, deadline))
					.await
					.ok()
					.flatten()
			})
		});

		let results = join_all(tasks).await;

		let mut quotes = Vec::new();
		for (provider, result) in queried_providers.iter().zip(results) {
			match result {
				Ok(Some(quote)) => {
					let quote = stamp_quote(
						self.integrity_service.as_ref(),
						quote.with_ttl(self.quote_ttl_secs),
					)
					.map_err(|e| {
						AggregatorServiceError::Internal(format!(
							"failed to sign quote from {}: {}",
							provider, e
						))
					})?;
					quotes.push(quote);
				},
				Ok(None) => debug!("Provider {} returned no quote", provider),
				Err(e) => warn!("Quote task for provider {} failed: {}", provider, e),
			}
		}

		let metadata = AggregationMetadata {
			total_duration_ms: started.elapsed().as_millis() as u64,
			timeout_ms: self.timeout_ms,
			providers_available: self.adapter_registry.len(),
			providers_queried: queried_providers.len(),
			providers_responded: quotes.len(),
			queried_providers,
		};

		info!(
			"Quote aggregation completed: {} quotes from {} providers in {}ms",
			metadata.providers_responded, metadata.providers_queried, metadata.total_duration_ms
		);

		Ok((quotes, metadata))
	}
}
