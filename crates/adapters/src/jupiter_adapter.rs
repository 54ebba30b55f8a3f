//! Jupiter adapter (Solana only)

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use swap_types::{
	Adapter, AdapterError, AdapterResult, BuiltRoute, ChainId, ProviderAdapter, ProviderConfig,
	Quote, QuoteRequest, SolanaTransaction, ToSign,
};
use tracing::debug;

use crate::http::{self, AuthConfig, ClientConfig};

pub const JUPITER_ID: &str = "jupiter";
pub const JUPITER_DEFAULT_BASE_URL: &str = "https://lite-api.jup.ag";

// ================================
// JUPITER API MODELS
// ================================

/// Subset of the quote response we read; the full body is kept for `/swap`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JupiterQuoteResponse {
	pub in_amount: String,
	pub out_amount: String,
	#[serde(default)]
	pub platform_fee: Option<JupiterPlatformFee>,
	#[serde(default)]
	pub price_impact_pct: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JupiterPlatformFee {
	pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JupiterSwapRequest<'a> {
	pub quote_response: &'a serde_json::Value,
	pub user_public_key: &'a str,
	pub wrap_and_unwrap_sol: bool,
	pub dynamic_compute_unit_limit: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JupiterSwapResponse {
	pub swap_transaction: String,
	#[serde(default)]
	pub last_valid_block_height: Option<u64>,
}

fn is_no_route(body: &str) -> bool {
	body.contains("could_not_find_any_route")
		|| body.contains("could not find any route")
		|| body.contains("token_not_tradable")
}

/// Jupiter aggregator adapter for Solana swaps
#[derive(Debug)]
pub struct JupiterAdapter {
	config: Adapter,
	provider: ProviderConfig,
	client: Client,
}

impl JupiterAdapter {
	pub fn new(provider: ProviderConfig) -> AdapterResult<Self> {
		let auth = AuthConfig::api_key("x-api-key", provider.api_key.as_ref());
		let client_config = ClientConfig::for_provider(&provider, &auth);

		Ok(Self {
			config: Adapter::new(JUPITER_ID, "Jupiter", "Jupiter Swap API v1", "1.0.0"),
			client: http::build_client(&client_config)?,
			provider,
		})
	}

	pub fn with_default_config() -> AdapterResult<Self> {
		Self::new(ProviderConfig::new(JUPITER_DEFAULT_BASE_URL))
	}

	fn require_solana(chain_id: ChainId) -> AdapterResult<()> {
		match chain_id {
			ChainId::Solana => Ok(()),
			other => Err(AdapterError::ChainNotSupported {
				chain_id: other,
				adapter_id: JUPITER_ID.to_string(),
			}),
		}
	}

	/// Raw quote body, needed verbatim by the swap endpoint
	async fn fetch_raw_quote(
		&self,
		input_mint: &str,
		output_mint: &str,
		amount: &str,
		slippage_bps: u32,
	) -> AdapterResult<serde_json::Value> {
		let url = http::build_url(&self.provider.base_url, "swap/v1/quote")?;
		debug!(
			"Fetching Jupiter quote from {} - {} -> {}",
			url, input_mint, output_mint
		);

		http::send_json(
			self.client.get(url).query(&[
				("inputMint", input_mint.to_string()),
				("outputMint", output_mint.to_string()),
				("amount", amount.to_string()),
				("slippageBps", slippage_bps.to_string()),
			]),
			JUPITER_ID,
		)
		.await
		.map_err(|e| http::classify_no_route(e, is_no_route))
	}
}

#[async_trait]
impl ProviderAdapter for JupiterAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn supported_chains(&self) -> Vec<ChainId> {
		vec![ChainId::Solana]
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		Self::require_solana(request.chain_id)?;

		let raw = self
			.fetch_raw_quote(
				&request.sell_token,
				&request.buy_token,
				&request.sell_amount.to_string(),
				request.slippage_bps,
			)
			.await?;
		let parsed: JupiterQuoteResponse =
			serde_json::from_value(raw.clone()).map_err(|e| AdapterError::InvalidResponse {
				reason: format!("Failed to parse jupiter quote: {}", e),
			})?;

		let amount_in = http::parse_amount(&parsed.in_amount, JUPITER_ID, "inAmount")?;
		let amount_out = http::parse_amount(&parsed.out_amount, JUPITER_ID, "outAmount")?;
		let protocol_fee = parsed
			.platform_fee
			.as_ref()
			.map(|fee| http::parse_amount(&fee.amount, JUPITER_ID, "platformFee.amount"))
			.transpose()?;

		Ok(Quote::new(JUPITER_ID, request, amount_in, amount_out)
			.with_protocol_fee(protocol_fee)
			.with_metadata(serde_json::json!({
				"priceImpactPct": parsed.price_impact_pct,
				"quoteResponse": raw,
			})))
	}

	async fn build_route(&self, quote: &Quote, wallet_address: &str) -> AdapterResult<BuiltRoute> {
		Self::require_solana(quote.chain_id)?;

		let quote_response = match quote.metadata.get("quoteResponse") {
			Some(raw) if raw.is_object() => raw.clone(),
			_ => {
				debug!(
					"Quote {} has no Jupiter quote response, fetching a fresh one",
					quote.quote_id
				);
				self.fetch_raw_quote(
					&quote.sell_token,
					&quote.buy_token,
					&quote.amount_in.to_string(),
					quote.slippage_bps,
				)
				.await?
			},
		};

		let url = http::build_url(&self.provider.base_url, "swap/v1/swap")?;
		let body = JupiterSwapRequest {
			quote_response: &quote_response,
			user_public_key: wallet_address,
			wrap_and_unwrap_sol: true,
			dynamic_compute_unit_limit: true,
		};
		let response: JupiterSwapResponse =
			http::send_json(self.client.post(url).json(&body), JUPITER_ID).await?;

		base64::engine::general_purpose::STANDARD
			.decode(&response.swap_transaction)
			.map_err(|e| AdapterError::InvalidResponse {
				reason: format!("jupiter swapTransaction is not valid base64: {}", e),
			})?;

		Ok(BuiltRoute {
			to_sign: ToSign::Solana(SolanaTransaction {
				transaction: response.swap_transaction,
				last_valid_block_height: response.last_valid_block_height,
			}),
			approvals: Vec::new(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use swap_types::test_utils::{
		QuoteBuilder, QuoteRequestBuilder, TEST_SOLANA_WALLET, TEST_USDC_MINT, TEST_WSOL_MINT,
	};
	use swap_types::{Amount, TxKind};
	use wiremock::matchers::{body_partial_json, method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn quote_body() -> serde_json::Value {
		serde_json::json!({
			"inputMint": TEST_WSOL_MINT,
			"inAmount": "1000000000",
			"outputMint": TEST_USDC_MINT,
			"outAmount": "187654321",
			"otherAmountThreshold": "186716049",
			"swapMode": "ExactIn",
			"slippageBps": 50,
			"platformFee": { "amount": "12345", "feeBps": 10 },
			"priceImpactPct": "0.0001",
			"routePlan": [],
			"contextSlot": 301234567u64
		})
	}

	fn adapter(server: &MockServer) -> JupiterAdapter {
		JupiterAdapter::new(ProviderConfig::new(server.uri())).unwrap()
	}

	#[test]
	fn test_only_solana_is_supported() {
		let adapter = JupiterAdapter::with_default_config().unwrap();
		assert_eq!(adapter.supported_chains(), vec![ChainId::Solana]);
		assert!(!adapter.supports_chain(ChainId::Ethereum));
	}

	#[tokio::test]
	async fn test_quote_is_normalized() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/swap/v1/quote"))
			.and(query_param("inputMint", TEST_WSOL_MINT))
			.and(query_param("outputMint", TEST_USDC_MINT))
			.and(query_param("amount", "1000000000"))
			.and(query_param("slippageBps", "50"))
			.respond_with(ResponseTemplate::new(200).set_body_json(quote_body()))
			.expect(1)
			.mount(&server)
			.await;

		let quote = adapter(&server)
			.fetch_quote(&QuoteRequestBuilder::solana().build())
			.await
			.unwrap();

		assert_eq!(quote.provider, "jupiter");
		assert_eq!(quote.amount_in, Amount::from(1_000_000_000u64));
		assert_eq!(quote.amount_out, Amount::from(187_654_321u64));
		assert_eq!(quote.protocol_fee, Some(Amount::from(12_345u64)));
		assert!(quote.estimated_gas.is_none());
		assert_eq!(quote.tx_kind, TxKind::SolanaTx);
		assert!(quote.approvals.is_empty());
		assert_eq!(quote.metadata["quoteResponse"]["outAmount"], "187654321");
	}

	#[tokio::test]
	async fn test_no_route_error() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/swap/v1/quote"))
			.respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
				"error": "Could not find any route",
				"errorCode": "COULD_NOT_FIND_ANY_ROUTE"
			})))
			.mount(&server)
			.await;

		let result = adapter(&server)
			.fetch_quote(&QuoteRequestBuilder::solana().build())
			.await;
		assert!(matches!(result, Err(AdapterError::NoRoute { .. })));
	}

	#[tokio::test]
	async fn test_build_route_returns_serialized_transaction() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/swap/v1/swap"))
			.and(body_partial_json(serde_json::json!({
				"userPublicKey": TEST_SOLANA_WALLET,
				"wrapAndUnwrapSol": true,
				"quoteResponse": { "outAmount": "187654321" }
			})))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"swapTransaction": "AQAAAAAAAAAAAAAA",
				"lastValidBlockHeight": 279000123u64,
				"prioritizationFeeLamports": 5000
			})))
			.expect(1)
			.mount(&server)
			.await;

		let request = QuoteRequestBuilder::solana().build();
		let quote = QuoteBuilder::new("jupiter", 187_654_321)
			.request(request)
			.build()
			.with_metadata(serde_json::json!({ "quoteResponse": quote_body() }));

		let route = adapter(&server)
			.build_route(&quote, TEST_SOLANA_WALLET)
			.await
			.unwrap();
		assert_eq!(
			route.to_sign,
			ToSign::Solana(SolanaTransaction {
				transaction: "AQAAAAAAAAAAAAAA".to_string(),
				last_valid_block_height: Some(279_000_123),
			})
		);
		assert!(route.approvals.is_empty());
	}

	#[tokio::test]
	async fn test_invalid_base64_transaction_is_rejected() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/swap/v1/swap"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"swapTransaction": "not base64!!"
			})))
			.mount(&server)
			.await;

		let quote = QuoteBuilder::new("jupiter", 1)
			.request(QuoteRequestBuilder::solana().build())
			.build()
			.with_metadata(serde_json::json!({ "quoteResponse": quote_body() }));
		let result = adapter(&server)
			.build_route(&quote, TEST_SOLANA_WALLET)
			.await;
		assert!(matches!(result, Err(AdapterError::InvalidResponse { .. })));
	}
}
