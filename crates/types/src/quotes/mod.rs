//! Canonical quote model shared by every provider adapter

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;
use uuid::Uuid;

pub mod errors;
pub mod request;
pub mod response;
pub mod score;

pub use errors::QuoteValidationError;
pub use request::QuoteRequest;
pub use response::{AggregationMetadata, QuotesResponse};
pub use score::{Score, ScoredQuote};

use crate::constants::limits::DEFAULT_QUOTE_TTL_SECS;
use crate::integrity::IntegrityPayload;
use crate::models::Amount;
use crate::ChainId;

/// Result type for quote validation operations
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;

/// How the unsigned payload of a route is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
	EvmCall,
	SolanaTx,
}

impl TxKind {
	pub fn for_chain(chain_id: ChainId) -> Self {
		if chain_id.is_evm() {
			TxKind::EvmCall
		} else {
			TxKind::SolanaTx
		}
	}
}

/// Unsigned EVM call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EvmTransaction {
	pub chain_id: u64,
	pub to: String,
	/// Hex-encoded calldata
	pub data: String,
	/// Native value in wei
	pub value: Amount,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_limit: Option<Amount>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gas_price: Option<Amount>,
}

/// Serialized, unsigned Solana versioned transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SolanaTransaction {
	/// Base64-encoded transaction
	pub transaction: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_valid_block_height: Option<u64>,
}

/// Payload a wallet must sign and submit to execute a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ToSign {
	Evm(EvmTransaction),
	Solana(SolanaTransaction),
}

impl ToSign {
	pub fn tx_kind(&self) -> TxKind {
		match self {
			ToSign::Evm(_) => TxKind::EvmCall,
			ToSign::Solana(_) => TxKind::SolanaTx,
		}
	}
}

/// Allowance the wallet must grant before the swap can move its tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Approval {
	pub token: String,
	pub spender: String,
	pub amount: Amount,
	/// Provider-supplied permit (signed approval) data, when offered
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub permit: Option<serde_json::Value>,
}

impl Approval {
	pub fn new(token: impl Into<String>, spender: impl Into<String>, amount: Amount) -> Self {
		Self {
			token: token.into(),
			spender: spender.into(),
			amount,
			permit: None,
		}
	}
}

/// Normalized quote from one provider
///
/// Quotes are immutable snapshots: adapters assemble them with the `with_*`
/// builders and nothing downstream mutates them, apart from the coordinator
/// stamping the integrity checksum before the quote leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	pub quote_id: String,
	/// Provider that produced the quote (`0x`, `1inch`, ...)
	pub provider: String,
	pub chain_id: ChainId,
	pub sell_token: String,
	pub buy_token: String,
	pub wallet_address: String,
	pub slippage_bps: u32,
	pub amount_in: Amount,
	pub amount_out: Amount,
	/// Gas units the swap is expected to consume
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub estimated_gas: Option<Amount>,
	/// Protocol fee in `buy_token` units
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub protocol_fee: Option<Amount>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub to_sign: Option<ToSign>,
	#[serde(default)]
	pub approvals: Vec<Approval>,
	pub tx_kind: TxKind,
	#[serde(default)]
	pub metadata: serde_json::Value,
	pub created_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub integrity_checksum: Option<String>,
}

impl Quote {
	/// Start a quote for `request` with the provider's reported amounts
	pub fn new(
		provider: impl Into<String>,
		request: &QuoteRequest,
		amount_in: Amount,
		amount_out: Amount,
	) -> Self {
		let created_at = Utc::now();
		Self {
			quote_id: Uuid::new_v4().to_string(),
			provider: provider.into(),
			chain_id: request.chain_id,
			sell_token: request.sell_token.clone(),
			buy_token: request.buy_token.clone(),
			wallet_address: request.wallet_address.clone(),
			slippage_bps: request.slippage_bps,
			amount_in,
			amount_out,
			estimated_gas: None,
			protocol_fee: None,
			to_sign: None,
			approvals: Vec::new(),
			tx_kind: TxKind::for_chain(request.chain_id),
			metadata: serde_json::Value::Null,
			created_at,
			expires_at: created_at + Duration::seconds(DEFAULT_QUOTE_TTL_SECS as i64),
			integrity_checksum: None,
		}
	}

	pub fn with_estimated_gas(mut self, gas: Option<Amount>) -> Self {
		self.estimated_gas = gas;
		self
	}

	pub fn with_protocol_fee(mut self, fee: Option<Amount>) -> Self {
		self.protocol_fee = fee;
		self
	}

	pub fn with_to_sign(mut self, to_sign: ToSign) -> Self {
		self.tx_kind = to_sign.tx_kind();
		self.to_sign = Some(to_sign);
		self
	}

	pub fn with_approval(mut self, approval: Approval) -> Self {
		self.approvals.push(approval);
		self
	}

	pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
		self.metadata = metadata;
		self
	}

	pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
		self.expires_at = self.created_at + Duration::seconds(ttl_secs as i64);
		self
	}

	pub fn with_integrity_checksum(mut self, checksum: String) -> Self {
		self.integrity_checksum = Some(checksum);
		self
	}

	pub fn is_expired(&self) -> bool {
		Utc::now() >= self.expires_at
	}
}

impl IntegrityPayload for Quote {
	fn to_integrity_payload(&self) -> String {
		// serde_json renders these deterministically (maps are key-sorted)
		let to_sign = serde_json::to_string(&self.to_sign).unwrap_or_default();
		let approvals = serde_json::to_string(&self.approvals).unwrap_or_default();
		let metadata = serde_json::to_string(&self.metadata).unwrap_or_default();
		let optional = |value: &Option<Amount>| value.map(|a| a.to_string()).unwrap_or_default();

		[
			self.quote_id.clone(),
			self.provider.clone(),
			self.chain_id.to_string(),
			self.sell_token.clone(),
			self.buy_token.clone(),
			self.wallet_address.clone(),
			self.slippage_bps.to_string(),
			self.amount_in.to_string(),
			self.amount_out.to_string(),
			optional(&self.estimated_gas),
			optional(&self.protocol_fee),
			serde_json::to_string(&self.tx_kind).unwrap_or_default(),
			to_sign,
			approvals,
			metadata,
			self.created_at.timestamp().to_string(),
			self.expires_at.timestamp().to_string(),
		]
		.join("|")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::{QuoteBuilder, QuoteRequestBuilder};

	#[test]
	fn test_quote_carries_request_context() {
		let request = QuoteRequestBuilder::evm().slippage_bps(75).build();
		let quote = Quote::new("0x", &request, request.sell_amount, Amount::from(42u64));

		assert_eq!(quote.provider, "0x");
		assert_eq!(quote.chain_id, request.chain_id);
		assert_eq!(quote.sell_token, request.sell_token);
		assert_eq!(quote.slippage_bps, 75);
		assert_eq!(quote.tx_kind, TxKind::EvmCall);
		assert!(quote.estimated_gas.is_none());
		assert!(quote.protocol_fee.is_none());
		assert!(!quote.is_expired());
	}

	#[test]
	fn test_solana_quotes_default_to_solana_tx() {
		let request = QuoteRequestBuilder::solana().build();
		let quote = Quote::new("jupiter", &request, request.sell_amount, Amount::from(1u64));
		assert_eq!(quote.tx_kind, TxKind::SolanaTx);
	}

	#[test]
	fn test_to_sign_serialization_is_tagged() {
		let to_sign = ToSign::Solana(SolanaTransaction {
			transaction: "AQID".to_string(),
			last_valid_block_height: Some(12),
		});
		let json = serde_json::to_value(&to_sign).unwrap();
		assert_eq!(json["kind"], "solana");
		assert_eq!(json["transaction"], "AQID");
		assert_eq!(json["lastValidBlockHeight"], 12);

		let back: ToSign = serde_json::from_value(json).unwrap();
		assert_eq!(back.tx_kind(), TxKind::SolanaTx);
	}

	#[test]
	fn test_absent_optional_fields_are_omitted() {
		let quote = QuoteBuilder::new("1inch", 1000).build();
		let json = serde_json::to_value(&quote).unwrap();
		assert!(json.get("protocolFee").is_none());
		assert!(json.get("estimatedGas").is_none());
		assert!(json.get("toSign").is_none());
		assert_eq!(json["amountOut"], "1000");
		assert_eq!(json["txKind"], "evm_call");
	}

	#[test]
	fn test_integrity_payload_survives_json_round_trip() {
		let quote = QuoteBuilder::new("0x", 1200)
			.fee(50)
			.with_evm_payload()
			.build()
			.with_metadata(serde_json::json!({"zeta": 1, "alpha": {"b": 2, "a": [1, 2]}}));

		let json = serde_json::to_string(&quote).unwrap();
		let back: Quote = serde_json::from_str(&json).unwrap();
		assert_eq!(quote.to_integrity_payload(), back.to_integrity_payload());
	}

	#[test]
	fn test_integrity_payload_detects_tampering() {
		let quote = QuoteBuilder::new("0x", 1200).build();
		let mut tampered = quote.clone();
		tampered.amount_out = Amount::from(1300u64);
		assert_ne!(quote.to_integrity_payload(), tampered.to_integrity_payload());
	}
}
