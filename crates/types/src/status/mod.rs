//! Transaction status models

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::models::is_valid_tx_hash;
use crate::ChainId;

/// Settlement state of a submitted transaction
///
/// Transitions only `unknown -> pending -> {success, failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
	Unknown,
	Pending,
	Success,
	Failed,
}

impl TxStatus {
	pub fn is_final(&self) -> bool {
		matches!(self, TxStatus::Success | TxStatus::Failed)
	}

	/// Whether a resolver may report `next` after having reported `self`
	pub fn can_transition_to(&self, next: TxStatus) -> bool {
		match (self, next) {
			(a, b) if *a == b => true,
			(TxStatus::Unknown, _) => true,
			(TxStatus::Pending, TxStatus::Success | TxStatus::Failed) => true,
			_ => false,
		}
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
	#[error("Invalid transaction hash for {chain_id}: '{tx_hash}'")]
	InvalidTxHash { chain_id: ChainId, tx_hash: String },
}

/// API request body for `POST /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TxStatusRequest {
	pub chain_id: ChainId,
	pub tx_hash: String,
}

impl TxStatusRequest {
	pub fn validate(&self) -> Result<(), StatusError> {
		if is_valid_tx_hash(self.chain_id.family(), &self.tx_hash) {
			Ok(())
		} else {
			Err(StatusError::InvalidTxHash {
				chain_id: self.chain_id,
				tx_hash: self.tx_hash.clone(),
			})
		}
	}
}

/// Response body for `POST /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TxStatusResponse {
	pub chain_id: ChainId,
	pub tx_hash: String,
	pub status: TxStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub explorer_url: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_transitions() {
		use TxStatus::*;
		assert!(Unknown.can_transition_to(Pending));
		assert!(Unknown.can_transition_to(Success));
		assert!(Pending.can_transition_to(Failed));
		assert!(Pending.can_transition_to(Pending));
		assert!(!Success.can_transition_to(Pending));
		assert!(!Failed.can_transition_to(Success));
		assert!(!Pending.can_transition_to(Unknown));
		assert!(Success.is_final() && Failed.is_final());
		assert!(!Pending.is_final());
	}

	#[test]
	fn test_request_validation() {
		let request = TxStatusRequest {
			chain_id: ChainId::Base,
			tx_hash: format!("0x{}", "1f".repeat(32)),
		};
		assert!(request.validate().is_ok());

		let request = TxStatusRequest {
			chain_id: ChainId::Solana,
			tx_hash: format!("0x{}", "1f".repeat(32)),
		};
		assert!(matches!(
			request.validate(),
			Err(StatusError::InvalidTxHash { .. })
		));
	}

	#[test]
	fn test_status_wire_format() {
		let response = TxStatusResponse {
			chain_id: ChainId::Ethereum,
			tx_hash: "0xabc".to_string(),
			status: TxStatus::Unknown,
			explorer_url: None,
		};
		let json = serde_json::to_value(&response).unwrap();
		assert_eq!(json["status"], "unknown");
		assert_eq!(json["chainId"], "ethereum");
		assert!(json.get("explorerUrl").is_none());
	}
}
