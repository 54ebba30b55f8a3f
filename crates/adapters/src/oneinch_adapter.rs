//! 1inch Swap API v6 adapter
//!
//! Quotes carry no transaction; the route is built on demand via the swap and
//! approve/spender endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use swap_types::{
	chain::is_native_token, Adapter, AdapterError, AdapterResult, Amount, BuiltRoute, ChainId,
	EvmTransaction, ProviderAdapter, ProviderConfig, Quote, QuoteRequest, ToSign,
};
use tracing::debug;

use crate::approvals::sell_token_approvals;
use crate::http::{self, AuthConfig, ClientConfig};

pub const ONEINCH_ID: &str = "1inch";
pub const ONEINCH_DEFAULT_BASE_URL: &str = "https://api.1inch.dev";

// ================================
// 1INCH API MODELS
// ================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneInchQuoteResponse {
	pub dst_amount: String,
	#[serde(default)]
	pub gas: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneInchSwapResponse {
	pub dst_amount: String,
	pub tx: OneInchTransaction,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneInchTransaction {
	pub to: String,
	pub data: String,
	#[serde(default)]
	pub value: Option<serde_json::Value>,
	#[serde(default)]
	pub gas: Option<serde_json::Value>,
	#[serde(default)]
	pub gas_price: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OneInchSpenderResponse {
	pub address: String,
}

/// 1inch rejects unroutable pairs with a 400 and a description
fn is_no_route(body: &str) -> bool {
	body.contains("insufficient liquidity") || body.contains("cannot estimate")
}

/// Slippage as the percentage string 1inch expects (50 bps -> "0.50")
pub fn slippage_percent(slippage_bps: u32) -> String {
	format!("{}.{:02}", slippage_bps / 100, slippage_bps % 100)
}

/// 1inch aggregation router adapter for EVM swaps
#[derive(Debug)]
pub struct OneInchAdapter {
	config: Adapter,
	provider: ProviderConfig,
	client: Client,
}

impl OneInchAdapter {
	pub fn new(provider: ProviderConfig) -> AdapterResult<Self> {
		let auth = AuthConfig::bearer(provider.api_key.as_ref());
		let client_config = ClientConfig::for_provider(&provider, &auth);

		Ok(Self {
			config: Adapter::new(ONEINCH_ID, "1inch", "1inch Swap API v6.0", "6.0.0"),
			client: http::build_client(&client_config)?,
			provider,
		})
	}

	pub fn with_default_config() -> AdapterResult<Self> {
		Self::new(ProviderConfig::new(ONEINCH_DEFAULT_BASE_URL))
	}

	/// 1inch puts the numeric chain id in the path
	fn chain_param(chain_id: ChainId) -> Option<u64> {
		match chain_id {
			ChainId::Ethereum
			| ChainId::Optimism
			| ChainId::Bsc
			| ChainId::Polygon
			| ChainId::Base
			| ChainId::Arbitrum
			| ChainId::Avalanche => chain_id.evm_chain_id(),
			ChainId::Solana => None,
		}
	}

	fn require_chain(chain_id: ChainId) -> AdapterResult<u64> {
		Self::chain_param(chain_id).ok_or_else(|| AdapterError::ChainNotSupported {
			chain_id,
			adapter_id: ONEINCH_ID.to_string(),
		})
	}

	fn endpoint(&self, evm_chain_id: u64, operation: &str) -> AdapterResult<url::Url> {
		http::build_url(
			&self.provider.base_url,
			&format!("swap/v6.0/{}/{}", evm_chain_id, operation),
		)
	}

	async fn fetch_spender(&self, evm_chain_id: u64) -> AdapterResult<String> {
		let url = self.endpoint(evm_chain_id, "approve/spender")?;
		let response: OneInchSpenderResponse =
			http::send_json(self.client.get(url), ONEINCH_ID).await?;
		Ok(response.address)
	}
}

#[async_trait]
impl ProviderAdapter for OneInchAdapter {
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
		let evm_chain_id = Self::require_chain(request.chain_id)?;
		let url = self.endpoint(evm_chain_id, "quote")?;
		debug!(
			"Fetching 1inch quote from {} - {} -> {}",
			url, request.sell_token, request.buy_token
		);

		let response: OneInchQuoteResponse = http::send_json(
			self.client.get(url).query(&[
				("src", request.sell_token.clone()),
				("dst", request.buy_token.clone()),
				("amount", request.sell_amount.to_string()),
				("includeGas", "true".to_string()),
			]),
			ONEINCH_ID,
		)
		.await
		.map_err(|e| http::classify_no_route(e, is_no_route))?;

		let amount_out = http::parse_amount(&response.dst_amount, ONEINCH_ID, "dstAmount")?;
		let gas = response
			.gas
			.as_ref()
			.map(|value| http::parse_amount_value(value, ONEINCH_ID, "gas"))
			.transpose()?;

		Ok(
			Quote::new(ONEINCH_ID, request, request.sell_amount, amount_out)
				.with_estimated_gas(gas),
		)
	}

	async fn build_route(&self, quote: &Quote, wallet_address: &str) -> AdapterResult<BuiltRoute> {
		let evm_chain_id = Self::require_chain(quote.chain_id)?;
		let url = self.endpoint(evm_chain_id, "swap")?;
		debug!("Building 1inch route for quote {} via {}", quote.quote_id, url);

		let response: OneInchSwapResponse = http::send_json(
			self.client.get(url).query(&[
				("src", quote.sell_token.clone()),
				("dst", quote.buy_token.clone()),
				("amount", quote.amount_in.to_string()),
				("from", wallet_address.to_string()),
				("origin", wallet_address.to_string()),
				("slippage", slippage_percent(quote.slippage_bps)),
				("disableEstimate", "true".to_string()),
			]),
			ONEINCH_ID,
		)
		.await
		.map_err(|e| http::classify_no_route(e, is_no_route))?;

		let parse_optional = |value: &Option<serde_json::Value>, field: &str| {
			value
				.as_ref()
				.map(|v| http::parse_amount_value(v, ONEINCH_ID, field))
				.transpose()
		};
		let to_sign = ToSign::Evm(EvmTransaction {
			chain_id: evm_chain_id,
			to: response.tx.to,
			data: response.tx.data,
			value: parse_optional(&response.tx.value, "tx.value")?.unwrap_or(Amount::ZERO),
			gas_limit: parse_optional(&response.tx.gas, "tx.gas")?,
			gas_price: parse_optional(&response.tx.gas_price, "tx.gasPrice")?,
		});

		let spender = if is_native_token(&quote.sell_token) {
			None
		} else {
			Some(self.fetch_spender(evm_chain_id).await?)
		};

		Ok(BuiltRoute {
			to_sign,
			approvals: sell_token_approvals(
				quote.chain_id,
				&quote.sell_token,
				spender.as_deref(),
				quote.amount_in,
			),
		})
	}
}
