//! Core adapter trait implemented by every provider integration

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::{Adapter, AdapterError, AdapterResult};
use crate::build::BuiltRoute;
use crate::quotes::{Quote, QuoteRequest};
use crate::ChainId;

/// Core trait for swap provider adapters
///
/// Adapters translate the canonical [`QuoteRequest`] into one provider's API
/// and normalize the answer into a [`Quote`]. They hold their own HTTP client
/// and configuration, so the trait methods take only request data.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + Debug {
	/// Get adapter configuration information
	fn adapter_info(&self) -> &Adapter;

	/// Provider id used in quotes and prefer/exclude lists
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	/// Get human-readable name for this adapter
	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	/// Get adapter version
	fn version(&self) -> &str {
		&self.adapter_info().version
	}

	/// Chains this provider can quote on
	fn supported_chains(&self) -> Vec<ChainId>;

	fn supports_chain(&self, chain_id: ChainId) -> bool {
		self.supported_chains().contains(&chain_id)
	}

	/// Fetch and normalize a quote from the provider
	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote>;

	/// Produce the executable payload for a quote that did not carry one
	///
	/// Default implementation returns UnsupportedOperation error.
	/// Override this method if the provider has a separate build endpoint.
	async fn build_route(
		&self,
		_quote: &Quote,
		_wallet_address: &str,
	) -> AdapterResult<BuiltRoute> {
		Err(AdapterError::UnsupportedOperation {
			operation: "build_route".to_string(),
			adapter_id: self.id().to_string(),
		})
	}

	/// Quote with failure isolation
	///
	/// Returns `None` when the chain is unsupported, the provider fails, or
	/// `deadline` passes first. Errors are logged, never propagated.
	async fn quote(&self, request: &QuoteRequest, deadline: Instant) -> Option<Quote> {
		if !self.supports_chain(request.chain_id) {
			debug!(
				provider = self.id(),
				chain = %request.chain_id,
				"Skipping provider: chain not supported"
			);
			return None;
		}

		match tokio::time::timeout_at(deadline, self.fetch_quote(request)).await {
			Ok(Ok(quote)) => Some(quote),
			Ok(Err(AdapterError::NoRoute { reason })) => {
				debug!(provider = self.id(), reason = %reason, "Provider has no route");
				None
			},
			Ok(Err(e)) => {
				warn!(provider = self.id(), error = %e, "Provider quote failed");
				None
			},
			Err(_) => {
				warn!(provider = self.id(), "Provider quote timed out");
				None
			},
		}
	}
}
