//! Bebop PMM adapter
//!
//! Bebop answers with a firm, executable quote, so the transaction is attached
//! at quote time.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use swap_types::{
	Adapter, AdapterError, AdapterResult, Amount, ChainId, EvmTransaction, ProviderAdapter,
	ProviderConfig, Quote, QuoteRequest, ToSign,
};
use tracing::debug;

use crate::approvals::sell_token_approvals;
use crate::http::{self, AuthConfig, ClientConfig};

pub const BEBOP_ID: &str = "bebop";
pub const BEBOP_DEFAULT_BASE_URL: &str = "https://api.bebop.xyz";

// ================================
// BEBOP API MODELS
// ================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BebopQuoteResponse {
	#[serde(default)]
	pub quote_id: Option<String>,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub expiry: Option<u64>,
	#[serde(default)]
	pub buy_tokens: HashMap<String, BebopTokenAmount>,
	#[serde(default)]
	pub sell_tokens: HashMap<String, BebopTokenAmount>,
	#[serde(default)]
	pub approval_target: Option<String>,
	#[serde(default)]
	pub settlement_address: Option<String>,
	#[serde(default)]
	pub tx: Option<BebopTransaction>,
	#[serde(default)]
	pub error: Option<BebopError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BebopTokenAmount {
	pub amount: String,
	#[serde(default)]
	pub minimum_amount: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BebopTransaction {
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
#[serde(rename_all = "camelCase")]
pub struct BebopError {
	#[serde(default)]
	pub error_code: Option<i64>,
	#[serde(default)]
	pub message: Option<String>,
}

impl BebopError {
	fn is_no_route(&self) -> bool {
		let message = self.message.as_deref().unwrap_or_default().to_lowercase();
		message.contains("liquidity")
			|| message.contains("not supported")
			|| message.contains("no route")
	}
}

/// Bebop adapter for EVM request-for-quote swaps
#[derive(Debug)]
pub struct BebopAdapter {
	config: Adapter,
	provider: ProviderConfig,
	client: Client,
}

impl BebopAdapter {
	pub fn new(provider: ProviderConfig) -> AdapterResult<Self> {
		let auth = AuthConfig::api_key("source-auth", provider.api_key.as_ref());
		let client_config = ClientConfig::for_provider(&provider, &auth);

		Ok(Self {
			config: Adapter::new(BEBOP_ID, "Bebop", "Bebop PMM v3 firm quotes", "3.0.0"),
			client: http::build_client(&client_config)?,
			provider,
		})
	}

	pub fn with_default_config() -> AdapterResult<Self> {
		Self::new(ProviderConfig::new(BEBOP_DEFAULT_BASE_URL))
	}

	/// Bebop routes by chain name in the path
	fn chain_param(chain_id: ChainId) -> Option<&'static str> {
		match chain_id {
			ChainId::Ethereum => Some("ethereum"),
			ChainId::Optimism => Some("optimism"),
			ChainId::Bsc => Some("bsc"),
			ChainId::Polygon => Some("polygon"),
			ChainId::Base => Some("base"),
			ChainId::Arbitrum => Some("arbitrum"),
			ChainId::Avalanche | ChainId::Solana => None,
		}
	}

	/// Amount entry for `token`, tolerating checksum-case differences
	fn token_entry<'a>(
		tokens: &'a HashMap<String, BebopTokenAmount>,
		token: &str,
	) -> Option<&'a BebopTokenAmount> {
		tokens
			.iter()
			.find(|(address, _)| address.eq_ignore_ascii_case(token))
			.map(|(_, entry)| entry)
	}

	fn convert_quote(
		&self,
		response: BebopQuoteResponse,
		request: &QuoteRequest,
	) -> AdapterResult<Quote> {
		if let Some(error) = response.error {
			let message = error.message.clone().unwrap_or_default();
			return Err(if error.is_no_route() {
				AdapterError::no_route(message)
			} else {
				AdapterError::ProviderError {
					code: error.error_code.map(|c| c.to_string()).unwrap_or_default(),
					message,
				}
			});
		}

		let buy = http::required(
			Self::token_entry(&response.buy_tokens, &request.buy_token),
			BEBOP_ID,
			"buyTokens",
		)?;
		let amount_out = http::parse_amount(&buy.amount, BEBOP_ID, "buyTokens.amount")?;
		let amount_in = match Self::token_entry(&response.sell_tokens, &request.sell_token) {
			Some(sell) => http::parse_amount(&sell.amount, BEBOP_ID, "sellTokens.amount")?,
			None => request.sell_amount,
		};

		let tx = http::required(response.tx, BEBOP_ID, "tx")?;
		let parse_optional = |value: &Option<serde_json::Value>, field: &str| {
			value
				.as_ref()
				.map(|v| http::parse_amount_value(v, BEBOP_ID, field))
				.transpose()
		};
		let gas = parse_optional(&tx.gas, "tx.gas")?;
		let gas_price = parse_optional(&tx.gas_price, "tx.gasPrice")?;
		let value = parse_optional(&tx.value, "tx.value")?.unwrap_or(Amount::ZERO);

		let evm_chain_id = http::required(request.chain_id.evm_chain_id(), BEBOP_ID, "chainId")?;
		let spender = response
			.approval_target
			.clone()
			.or_else(|| response.settlement_address.clone());

		let mut quote = Quote::new(BEBOP_ID, request, amount_in, amount_out)
			.with_estimated_gas(gas)
			.with_metadata(serde_json::json!({
				"quoteId": response.quote_id,
				"status": response.status,
				"expiry": response.expiry,
				"minimumAmount": buy.minimum_amount,
				"settlementAddress": response.settlement_address,
			}))
			.with_to_sign(ToSign::Evm(EvmTransaction {
				chain_id: evm_chain_id,
				to: tx.to,
				data: tx.data,
				value,
				gas_limit: gas,
				gas_price,
			}));

		for approval in sell_token_approvals(
			request.chain_id,
			&request.sell_token,
			spender.as_deref(),
			amount_in,
		) {
			quote = quote.with_approval(approval);
		}

		Ok(quote)
	}
}

#[async_trait]
impl ProviderAdapter for BebopAdapter {
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
		let chain = Self::chain_param(request.chain_id).ok_or_else(|| {
			AdapterError::ChainNotSupported {
				chain_id: request.chain_id,
				adapter_id: BEBOP_ID.to_string(),
			}
		})?;

		let url = http::build_url(&self.provider.base_url, &format!("pmm/{}/v3/quote", chain))?;
		debug!(
			"Fetching Bebop quote from {} - {} -> {}",
			url, request.sell_token, request.buy_token
		);

		let response: BebopQuoteResponse = http::send_json(
			self.client.get(url).query(&[
				("sell_tokens", request.sell_token.clone()),
				("buy_tokens", request.buy_token.clone()),
				("sell_amounts", request.sell_amount.to_string()),
				("taker_address", request.wallet_address.clone()),
				("approval_type", "Standard".to_string()),
				("gasless", "false".to_string()),
			]),
			BEBOP_ID,
		)
		.await
		.map_err(|e| {
			http::classify_no_route(e, |body| {
				body.contains("liquidity") || body.contains("not supported")
			})
		})?;

		self.convert_quote(response, request)
	}
}
