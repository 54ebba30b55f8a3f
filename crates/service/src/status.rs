//! Transaction status resolution

use async_trait::async_trait;
use swap_types::{StatusError, TxStatus, TxStatusRequest, TxStatusResponse};
use tracing::debug;

/// Reports the settlement state of a submitted transaction
///
/// Implementations must be idempotent and free of side effects: clients poll
/// the same hash repeatedly.
#[async_trait]
pub trait TxStatusResolver: Send + Sync {
	async fn status(&self, request: &TxStatusRequest) -> Result<TxStatusResponse, StatusError>;
}

/// Resolver that never looks on-chain and always answers `unknown`
#[derive(Debug, Default, Clone)]
pub struct StubStatusResolver;

#[async_trait]
impl TxStatusResolver for StubStatusResolver {
	async fn status(&self, request: &TxStatusRequest) -> Result<TxStatusResponse, StatusError> {
		request.validate()?;
		debug!(
			"Status requested for {} transaction {}",
			request.chain_id, request.tx_hash
		);

		Ok(TxStatusResponse {
			chain_id: request.chain_id,
			tx_hash: request.tx_hash.clone(),
			status: TxStatus::Unknown,
			explorer_url: Some(request.chain_id.explorer_tx_url(&request.tx_hash)),
		})
	}
}
