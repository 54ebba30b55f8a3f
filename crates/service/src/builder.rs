//! Route building for a selected quote

use std::sync::Arc;
use swap_adapters::AdapterRegistry;
use swap_types::models::{addresses_equal, is_valid_address};
use swap_types::{BuildError, BuildRequest, BuildResponse, BuiltRoute, ChainFamily};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::integrity::{verify_quote, IntegrityTrait};

/// Turns a previously issued quote into an unsigned payload
pub struct RouteBuilder {
	adapter_registry: Arc<AdapterRegistry>,
	integrity_service: Arc<dyn IntegrityTrait>,
	build_timeout_ms: u64,
}

impl RouteBuilder {
	pub fn new(
		adapter_registry: Arc<AdapterRegistry>,
		integrity_service: Arc<dyn IntegrityTrait>,
		build_timeout_ms: u64,
	) -> Self {
		Self {
			adapter_registry,
			integrity_service,
			build_timeout_ms,
		}
	}

	/// Build the route for `request.quote`
	///
	/// Quotes that already carry a payload are passed through unchanged;
	/// otherwise the originating provider is asked to build one.
	pub async fn build(&self, request: BuildRequest) -> Result<BuildResponse, BuildError> {
		let BuildRequest {
			quote,
			wallet_address,
		} = request;
		let family = quote.chain_id.family();

		if !is_valid_address(family, &wallet_address) {
			return Err(BuildError::Validation(format!(
				"invalid walletAddress for {}: '{}'",
				quote.chain_id, wallet_address
			)));
		}

		verify_quote(self.integrity_service.as_ref(), &quote).map_err(|e| {
			warn!("Rejecting quote {} for build: {}", quote.quote_id, e);
			BuildError::InvalidQuote {
				quote_id: quote.quote_id.clone(),
				reason: e.to_string(),
			}
		})?;

		if quote.is_expired() {
			return Err(BuildError::QuoteExpired {
				quote_id: quote.quote_id.clone(),
			});
		}

		let route = match &quote.to_sign {
			Some(to_sign) => {
				// The payload was built for the quote's wallet
				if !addresses_equal(family, &wallet_address, &quote.wallet_address) {
					return Err(BuildError::InvalidQuote {
						quote_id: quote.quote_id.clone(),
						reason: "walletAddress does not match the quoted wallet".to_string(),
					});
				}
				debug!("Passing through prebuilt payload for quote {}", quote.quote_id);
				BuiltRoute {
					to_sign: to_sign.clone(),
					approvals: quote.approvals.clone(),
				}
			},
			None => {
				let adapter = self.adapter_registry.get(&quote.provider).ok_or_else(|| {
					BuildError::UnsupportedProvider {
						provider: quote.provider.clone(),
					}
				})?;

				let build_failed = |reason: String| BuildError::BuildFailed {
					provider: quote.provider.clone(),
					reason,
				};
				timeout(
					Duration::from_millis(self.build_timeout_ms),
					adapter.build_route(&quote, &wallet_address),
				)
				.await
				.map_err(|_| build_failed(format!("timed out after {}ms", self.build_timeout_ms)))?
				.map_err(|e| build_failed(e.to_string()))?
			},
		};

		let route = match family {
			ChainFamily::Solana => BuiltRoute {
				approvals: Vec::new(),
				..route
			},
			ChainFamily::Evm => route,
		};

		info!(
			"Built {} route for quote {} with {} approvals",
			quote.provider,
			quote.quote_id,
			route.approvals.len()
		);
		Ok(BuildResponse::from_route(&quote, route))
	}
}
