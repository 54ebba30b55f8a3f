//! KyberSwap aggregator adapter
//!
//! The route summary returned at quote time is kept in the quote metadata and
//! sent back to the build endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use swap_types::{
	Adapter, AdapterError, AdapterResult, Amount, BuiltRoute, ChainId, EvmTransaction,
	ProviderAdapter, ProviderConfig, Quote, QuoteRequest, ToSign,
};
use tracing::debug;

use crate::approvals::sell_token_approvals;
use crate::http::{self, AuthConfig, ClientConfig};

pub const KYBERSWAP_ID: &str = "kyberswap";
pub const KYBERSWAP_DEFAULT_BASE_URL: &str = "https://aggregator-api.kyberswap.com";

/// Response codes KyberSwap uses for unroutable pairs
const NO_ROUTE_CODES: [i64; 3] = [4008, 4009, 4011];

// ================================
// KYBERSWAP API MODELS
// ================================

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct KyberEnvelope<T> {
	pub code: i64,
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KyberRoutesData {
	/// Opaque route summary, echoed back verbatim when building
	pub route_summary: serde_json::Value,
	pub router_address: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KyberBuildRequest<'a> {
	pub route_summary: &'a serde_json::Value,
	pub sender: &'a str,
	pub recipient: &'a str,
	/// In basis points
	pub slippage_tolerance: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KyberBuildData {
	pub data: String,
	pub router_address: String,
	#[serde(default)]
	pub amount_in: Option<String>,
	#[serde(default)]
	pub gas: Option<serde_json::Value>,
	#[serde(default)]
	pub transaction_value: Option<serde_json::Value>,
}

impl<T> KyberEnvelope<T> {
	fn into_data(self) -> AdapterResult<T> {
		let message = self.message.unwrap_or_default();
		if NO_ROUTE_CODES.contains(&self.code) {
			return Err(AdapterError::no_route(message));
		}
		if self.code != 0 {
			return Err(AdapterError::ProviderError {
				code: self.code.to_string(),
				message,
			});
		}
		http::required(self.data, KYBERSWAP_ID, "data")
	}
}

/// KyberSwap error bodies carry the same numeric codes as success envelopes
fn is_no_route(body: &str) -> bool {
	body.contains("route not found")
		|| NO_ROUTE_CODES
			.iter()
			.any(|code| body.contains(&format!("\"code\":{}", code)))
}

/// KyberSwap adapter for EVM swaps
#[derive(Debug)]
pub struct KyberSwapAdapter {
	config: Adapter,
	provider: ProviderConfig,
	client: Client,
}

impl KyberSwapAdapter {
	pub fn new(provider: ProviderConfig) -> AdapterResult<Self> {
		let auth = AuthConfig::api_key("x-client-id", provider.api_key.as_ref());
		let client_config = ClientConfig::for_provider(&provider, &auth);

		Ok(Self {
			config: Adapter::new(
				KYBERSWAP_ID,
				"KyberSwap",
				"KyberSwap Aggregator API v1",
				"1.0.0",
			),
			client: http::build_client(&client_config)?,
			provider,
		})
	}

	pub fn with_default_config() -> AdapterResult<Self> {
		Self::new(ProviderConfig::new(KYBERSWAP_DEFAULT_BASE_URL))
	}

	/// KyberSwap routes by chain name in the path
	fn chain_param(chain_id: ChainId) -> Option<&'static str> {
		match chain_id {
			ChainId::Ethereum => Some("ethereum"),
			ChainId::Optimism => Some("optimism"),
			ChainId::Bsc => Some("bsc"),
			ChainId::Polygon => Some("polygon"),
			ChainId::Base => Some("base"),
			ChainId::Arbitrum => Some("arbitrum"),
			ChainId::Avalanche => Some("avalanche"),
			ChainId::Solana => None,
		}
	}

	fn require_chain(chain_id: ChainId) -> AdapterResult<&'static str> {
		Self::chain_param(chain_id).ok_or_else(|| AdapterError::ChainNotSupported {
			chain_id,
			adapter_id: KYBERSWAP_ID.to_string(),
		})
	}

	async fn fetch_routes(&self, request: &QuoteRequest) -> AdapterResult<KyberRoutesData> {
		let chain = Self::require_chain(request.chain_id)?;
		let url = http::build_url(
			&self.provider.base_url,
			&format!("{}/api/v1/routes", chain),
		)?;
		debug!(
			"Fetching KyberSwap routes from {} - {} -> {}",
			url, request.sell_token, request.buy_token
		);

		let envelope: KyberEnvelope<KyberRoutesData> = http::send_json(
			self.client.get(url).query(&[
				("tokenIn", request.sell_token.clone()),
				("tokenOut", request.buy_token.clone()),
				("amountIn", request.sell_amount.to_string()),
			]),
			KYBERSWAP_ID,
		)
		.await
		.map_err(|e| http::classify_no_route(e, is_no_route))?;

		envelope.into_data()
	}

	/// Request equivalent to the one that produced `quote`
	fn request_for(quote: &Quote, wallet_address: &str) -> QuoteRequest {
		QuoteRequest {
			chain_id: quote.chain_id,
			sell_token: quote.sell_token.clone(),
			buy_token: quote.buy_token.clone(),
			sell_amount: quote.amount_in,
			wallet_address: wallet_address.to_string(),
			slippage_bps: quote.slippage_bps,
			prefer_aggregators: None,
			exclude_aggregators: None,
		}
	}
}

#[async_trait]
impl ProviderAdapter for KyberSwapAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn supported_chains(&self) -> Vec<ChainId> {
		ChainId::ALL
			.into_iter()
			.filter(|chain| Self::chain_param(*chain).is_some())
			.collect()
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		let routes = self.fetch_routes(request).await?;
		let summary = &routes.route_summary;

		let amount_out = http::parse_amount_value(
			http::required(summary.get("amountOut"), KYBERSWAP_ID, "routeSummary.amountOut")?,
			KYBERSWAP_ID,
			"routeSummary.amountOut",
		)?;
		let gas = summary
			.get("gas")
			.map(|value| http::parse_amount_value(value, KYBERSWAP_ID, "routeSummary.gas"))
			.transpose()?;

		Ok(
			Quote::new(KYBERSWAP_ID, request, request.sell_amount, amount_out)
				.with_estimated_gas(gas)
				.with_metadata(serde_json::json!({
					"routeSummary": routes.route_summary,
					"routerAddress": routes.router_address,
				})),
		)
	}

	async fn build_route(&self, quote: &Quote, wallet_address: &str) -> AdapterResult<BuiltRoute> {
		let chain = Self::require_chain(quote.chain_id)?;
		let evm_chain_id = http::required(quote.chain_id.evm_chain_id(), KYBERSWAP_ID, "chainId")?;

		let route_summary = match quote.metadata.get("routeSummary") {
			Some(summary) if summary.is_object() => summary.clone(),
			_ => {
				debug!(
					"Quote {} has no KyberSwap route summary, fetching a fresh one",
					quote.quote_id
				);
				self.fetch_routes(&Self::request_for(quote, wallet_address))
					.await?
					.route_summary
			},
		};

		let url = http::build_url(
			&self.provider.base_url,
			&format!("{}/api/v1/route/build", chain),
		)?;
		let body = KyberBuildRequest {
			route_summary: &route_summary,
			sender: wallet_address,
			recipient: wallet_address,
			slippage_tolerance: quote.slippage_bps,
		};

		let envelope: KyberEnvelope<KyberBuildData> =
			http::send_json(self.client.post(url).json(&body), KYBERSWAP_ID)
				.await
				.map_err(|e| http::classify_no_route(e, is_no_route))?;
		let built = envelope.into_data()?;

		let gas = built
			.gas
			.as_ref()
			.map(|value| http::parse_amount_value(value, KYBERSWAP_ID, "gas"))
			.transpose()?;
		let value = match built.transaction_value.as_ref() {
			Some(value) => http::parse_amount_value(value, KYBERSWAP_ID, "transactionValue")?,
			None => Amount::ZERO,
		};
		let amount_in = match built.amount_in.as_deref() {
			Some(value) => http::parse_amount(value, KYBERSWAP_ID, "amountIn")?,
			None => quote.amount_in,
		};

		Ok(BuiltRoute {
			approvals: sell_token_approvals(
				quote.chain_id,
				&quote.sell_token,
				Some(&built.router_address),
				amount_in,
			),
			to_sign: ToSign::Evm(EvmTransaction {
				chain_id: evm_chain_id,
				to: built.router_address,
				data: built.data,
				value,
				gas_limit: gas,
				gas_price: None,
			}),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use swap_types::test_utils::{QuoteBuilder, QuoteRequestBuilder, TEST_EVM_WALLET, TEST_WETH};
	use swap_types::SecretString;
	use wiremock::matchers::{body_partial_json, header, method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	const ROUTER: &str = "0x6131B5fae19EA4f9D964eAc0408E4408b66337b5";

	fn adapter(server: &MockServer) -> KyberSwapAdapter {
		KyberSwapAdapter::new(
			ProviderConfig::new(server.uri()).with_api_key(Some(SecretString::from("my-dapp"))),
		)
		.unwrap()
	}

	fn routes_body() -> serde_json::Value {
		serde_json::json!({
			"code": 0,
			"message": "successfully",
			"data": {
				"routeSummary": {
					"tokenIn": TEST_WETH,
					"amountIn": "1000000000000000000",
					"amountOut": "2507111222",
					"gas": "215000",
					"route": [[{ "pool": "0xpool", "exchange": "uniswapv3" }]]
				},
				"routerAddress": ROUTER
			}
		})
	}

	#[tokio::test]
	async fn test_quote_keeps_route_summary() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/avalanche/api/v1/routes"))
			.and(query_param("tokenIn", TEST_WETH))
			.and(header("x-client-id", "my-dapp"))
			.respond_with(ResponseTemplate::new(200).set_body_json(routes_body()))
			.expect(1)
			.mount(&server)
			.await;

		let request = QuoteRequestBuilder::evm().chain(ChainId::Avalanche).build();
		let quote = adapter(&server).fetch_quote(&request).await.unwrap();

		assert_eq!(quote.provider, "kyberswap");
		assert_eq!(quote.amount_out, Amount::from(2_507_111_222u64));
		assert_eq!(quote.estimated_gas, Some(Amount::from(215_000u64)));
		assert!(quote.to_sign.is_none());
		assert_eq!(quote.metadata["routerAddress"], ROUTER);
		assert_eq!(quote.metadata["routeSummary"]["amountOut"], "2507111222");
	}

	#[tokio::test]
	async fn test_route_not_found_is_no_route() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/ethereum/api/v1/routes"))
			.respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
				"code": 4008,
				"message": "route not found"
			})))
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/base/api/v1/routes"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"code": 4011,
				"message": "token not found"
			})))
			.mount(&server)
			.await;

		let adapter = adapter(&server);
		assert!(matches!(
			adapter.fetch_quote(&QuoteRequestBuilder::evm().build()).await,
			Err(AdapterError::NoRoute { .. })
		));
		let request = QuoteRequestBuilder::evm().chain(ChainId::Base).build();
		assert!(matches!(
			adapter.fetch_quote(&request).await,
			Err(AdapterError::NoRoute { .. })
		));
	}

	#[tokio::test]
	async fn test_build_route_posts_summary() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/ethereum/api/v1/route/build"))
			.and(body_partial_json(serde_json::json!({
				"sender": TEST_EVM_WALLET,
				"recipient": TEST_EVM_WALLET,
				"slippageTolerance": 50,
				"routeSummary": { "amountOut": "2507111222" }
			})))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"code": 0,
				"message": "successfully",
				"data": {
					"amountIn": "1000000000000000000",
					"amountOut": "2507111222",
					"gas": "230000",
					"data": "0xe21fd0e9",
					"routerAddress": ROUTER,
					"transactionValue": "0"
				}
			})))
			.expect(1)
			.mount(&server)
			.await;

		let quote = QuoteBuilder::new("kyberswap", 2_507_111_222)
			.build()
			.with_metadata(routes_body()["data"].clone());
		let route = adapter(&server)
			.build_route(&quote, TEST_EVM_WALLET)
			.await
			.unwrap();

		assert!(matches!(route.to_sign, ToSign::Evm(ref tx) if tx.to == ROUTER && tx.data == "0xe21fd0e9"));
		assert_eq!(route.approvals.len(), 1);
		assert_eq!(route.approvals[0].spender, ROUTER);
	}

	#[tokio::test]
	async fn test_build_route_refetches_missing_summary() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/ethereum/api/v1/routes"))
			.respond_with(ResponseTemplate::new(200).set_body_json(routes_body()))
			.expect(1)
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.and(path("/ethereum/api/v1/route/build"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"code": 0,
				"data": { "data": "0xe21fd0e9", "routerAddress": ROUTER }
			})))
			.expect(1)
			.mount(&server)
			.await;

		let quote = QuoteBuilder::new("kyberswap", 2_507_111_222).build();
		let route = adapter(&server)
			.build_route(&quote, TEST_EVM_WALLET)
			.await
			.unwrap();
		assert!(matches!(route.to_sign, ToSign::Evm(_)));
	}
}
