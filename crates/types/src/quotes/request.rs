//! Quote request model and validation

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
#[allow(unused_imports)]
use serde_json::json;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::{QuoteValidationError, QuoteValidationResult};
use crate::constants::limits::MAX_SLIPPAGE_BPS;
use crate::models::{addresses_equal, is_valid_address, Amount};
use crate::ChainId;

/// API request body for `POST /quote`
///
/// Malformed chain ids and amounts are rejected while decoding; everything
/// else is checked by [`QuoteRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[cfg_attr(feature = "openapi", schema(example = json!({
    "chainId": "ethereum",
    "sellToken": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
    "buyToken": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
    "sellAmount": "1000000000000000000",
    "walletAddress": "0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03",
    "slippageBps": 50,
    "preferAggregators": ["1inch", "0x"]
})))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuoteRequest {
	pub chain_id: ChainId,
	/// Token address (EVM) or mint (Solana) being sold
	pub sell_token: String,
	/// Token address (EVM) or mint (Solana) being bought
	pub buy_token: String,
	/// Amount of `sell_token` in its smallest unit
	pub sell_amount: Amount,
	pub wallet_address: String,
	pub slippage_bps: u32,
	/// Restrict the query to these providers
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub prefer_aggregators: Option<Vec<String>>,
	/// Never query these providers
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exclude_aggregators: Option<Vec<String>>,
}

impl QuoteRequest {
	/// Validate the request
	///
	/// - slippage must be within `0..=MAX_SLIPPAGE_BPS`
	/// - wallet, sell and buy token must be valid identifiers for the chain family
	/// - sell and buy token must differ
	/// - provider lists must not contain blank names
	pub fn validate(&self) -> QuoteValidationResult<()> {
		if self.slippage_bps > MAX_SLIPPAGE_BPS {
			return Err(QuoteValidationError::InvalidSlippage {
				value: self.slippage_bps,
				max: MAX_SLIPPAGE_BPS,
			});
		}

		let family = self.chain_id.family();
		for (field, value) in [
			("walletAddress", &self.wallet_address),
			("sellToken", &self.sell_token),
			("buyToken", &self.buy_token),
		] {
			if !is_valid_address(family, value) {
				return Err(QuoteValidationError::InvalidAddress {
					field: field.to_string(),
					chain_id: self.chain_id,
					value: value.clone(),
				});
			}
		}

		if addresses_equal(family, &self.sell_token, &self.buy_token) {
			return Err(QuoteValidationError::IdenticalTokens);
		}

		for (field, list) in [
			("preferAggregators", &self.prefer_aggregators),
			("excludeAggregators", &self.exclude_aggregators),
		] {
			if let Some(names) = list {
				if names.iter().any(|name| name.trim().is_empty()) {
					return Err(QuoteValidationError::InvalidProviderList {
						field: field.to_string(),
						reason: "provider names cannot be blank".to_string(),
					});
				}
			}
		}

		Ok(())
	}

	/// Whether the prefer/exclude lists allow querying `provider_id`
	///
	/// Names are compared case-insensitively; an absent prefer list allows all.
	pub fn allows_provider(&self, provider_id: &str) -> bool {
		let listed = |names: &Vec<String>| {
			names
				.iter()
				.any(|name| name.trim().eq_ignore_ascii_case(provider_id))
		};

		let preferred = self.prefer_aggregators.as_ref().map_or(true, listed);
		let excluded = self.exclude_aggregators.as_ref().is_some_and(listed);

		preferred && !excluded
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::QuoteRequestBuilder;

	#[test]
	fn test_valid_evm_request() {
		let request = QuoteRequestBuilder::evm().build();
		assert!(request.validate().is_ok());
	}

	#[test]
	fn test_valid_solana_request() {
		let request = QuoteRequestBuilder::solana().build();
		assert!(request.validate().is_ok());
	}

	#[test]
	fn test_slippage_boundaries() {
		assert!(QuoteRequestBuilder::evm()
			.slippage_bps(0)
			.build()
			.validate()
			.is_ok());
		assert!(QuoteRequestBuilder::evm()
			.slippage_bps(5000)
			.build()
			.validate()
			.is_ok());
		assert_eq!(
			QuoteRequestBuilder::evm().slippage_bps(5001).build().validate(),
			Err(QuoteValidationError::InvalidSlippage {
				value: 5001,
				max: 5000
			})
		);
	}

	#[test]
	fn test_negative_slippage_rejected_when_decoding() {
		let mut body = serde_json::to_value(QuoteRequestBuilder::evm().build()).unwrap();
		body["slippageBps"] = serde_json::json!(-1);
		assert!(serde_json::from_value::<QuoteRequest>(body).is_err());
	}

	#[test]
	fn test_malformed_amount_and_chain_rejected_when_decoding() {
		let valid = serde_json::to_value(QuoteRequestBuilder::evm().build()).unwrap();

		let mut body = valid.clone();
		body["sellAmount"] = serde_json::json!("1e18");
		assert!(serde_json::from_value::<QuoteRequest>(body).is_err());

		let mut body = valid.clone();
		body["sellAmount"] = serde_json::json!(1000);
		assert!(serde_json::from_value::<QuoteRequest>(body).is_err());

		let mut body = valid;
		body["chainId"] = serde_json::json!("fantom");
		assert!(serde_json::from_value::<QuoteRequest>(body).is_err());
	}

	#[test]
	fn test_wallet_format_checked_per_family() {
		let request = QuoteRequestBuilder::evm()
			.wallet("7EcDhSYGxXyscszYEp35KHN8vvw3svAuLKTzXwCFLtV")
			.build();
		assert!(matches!(
			request.validate(),
			Err(QuoteValidationError::InvalidAddress { ref field, .. }) if field == "walletAddress"
		));

		let request = QuoteRequestBuilder::solana()
			.wallet("0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03")
			.build();
		assert!(request.validate().is_err());
	}

	#[test]
	fn test_identical_tokens_rejected() {
		let request = QuoteRequestBuilder::evm()
			.tokens(
				"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
				"0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
			)
			.build();
		assert_eq!(request.validate(), Err(QuoteValidationError::IdenticalTokens));
	}

	#[test]
	fn test_blank_provider_names_rejected() {
		let request = QuoteRequestBuilder::evm().prefer(&["0x", " "]).build();
		assert!(matches!(
			request.validate(),
			Err(QuoteValidationError::InvalidProviderList { .. })
		));
	}

	#[test]
	fn test_provider_filters() {
		let request = QuoteRequestBuilder::evm().build();
		assert!(request.allows_provider("0x"));

		let request = QuoteRequestBuilder::evm().prefer(&["1INCH"]).build();
		assert!(request.allows_provider("1inch"));
		assert!(!request.allows_provider("0x"));

		let request = QuoteRequestBuilder::evm()
			.prefer(&["1inch", "0x"])
			.exclude(&["0x"])
			.build();
		assert!(request.allows_provider("1inch"));
		assert!(!request.allows_provider("0x"));
	}

	#[test]
	fn test_unknown_fields_rejected() {
		let mut body = serde_json::to_value(QuoteRequestBuilder::evm().build()).unwrap();
		body["slippage"] = serde_json::json!(0.5);
		assert!(serde_json::from_value::<QuoteRequest>(body).is_err());
	}
}
