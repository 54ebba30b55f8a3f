//! 0x Swap API adapter
//!
//! Uses the allowance-holder flow, which returns an executable transaction
//! with every quote, so no separate build call is needed.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use swap_types::{
	Adapter, AdapterError, AdapterResult, Amount, ChainId, EvmTransaction, ProviderAdapter,
	ProviderConfig, Quote, QuoteRequest, ToSign,
};
use tracing::debug;

use crate::approvals::sell_token_approvals;
use crate::http::{self, AuthConfig, ClientConfig};

pub const ZEROX_ID: &str = "0x";
pub const ZEROX_DEFAULT_BASE_URL: &str = "https://api.0x.org";

// ================================
// 0x API MODELS
// ================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroXQuoteResponse {
	pub liquidity_available: bool,
	#[serde(default)]
	pub buy_amount: Option<String>,
	#[serde(default)]
	pub sell_amount: Option<String>,
	#[serde(default)]
	pub min_buy_amount: Option<String>,
	#[serde(default)]
	pub transaction: Option<ZeroXTransaction>,
	#[serde(default)]
	pub issues: Option<ZeroXIssues>,
	#[serde(default)]
	pub fees: Option<ZeroXFees>,
	#[serde(default)]
	pub zid: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroXTransaction {
	pub to: String,
	pub data: String,
	#[serde(default)]
	pub value: Option<String>,
	#[serde(default)]
	pub gas: Option<String>,
	#[serde(default)]
	pub gas_price: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZeroXIssues {
	#[serde(default)]
	pub allowance: Option<ZeroXAllowanceIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZeroXAllowanceIssue {
	pub spender: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroXFees {
	#[serde(default)]
	pub integrator_fee: Option<ZeroXFee>,
	#[serde(default)]
	pub zero_ex_fee: Option<ZeroXFee>,
}

impl ZeroXFees {
	/// Sum of the fees charged in `buy_token`; `None` when there are none
	fn in_buy_token(&self, buy_token: &str) -> AdapterResult<Option<Amount>> {
		let charged = [
			(&self.integrator_fee, "fees.integratorFee.amount"),
			(&self.zero_ex_fee, "fees.zeroExFee.amount"),
		];

		let mut total: Option<Amount> = None;
		for (fee, field) in charged {
			let Some(fee) = fee.as_ref().filter(|fee| fee.token.eq_ignore_ascii_case(buy_token)) else {
				continue;
			};
			let amount = http::parse_amount(&fee.amount, ZEROX_ID, field)?;
			let sum = total
				.unwrap_or(Amount::ZERO)
				.value()
				.checked_add(amount.value())
				.ok_or_else(|| AdapterError::invalid_response("0x fee total overflows"))?;
			total = Some(Amount::new(sum));
		}
		Ok(total)
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZeroXFee {
	pub amount: String,
	pub token: String,
}

/// 0x adapter for EVM swaps
#[derive(Debug)]
pub struct ZeroXAdapter {
	config: Adapter,
	provider: ProviderConfig,
	client: Client,
}

impl ZeroXAdapter {
	pub fn new(provider: ProviderConfig) -> AdapterResult<Self> {
		let auth = AuthConfig::api_key("0x-api-key", provider.api_key.as_ref());
		let client_config =
			ClientConfig::for_provider(&provider, &auth).with_header("0x-version", "v2");

		Ok(Self {
			config: Adapter::new(ZEROX_ID, "0x", "0x Swap API v2 (allowance holder)", "2.0.0"),
			client: http::build_client(&client_config)?,
			provider,
		})
	}

	pub fn with_default_config() -> AdapterResult<Self> {
		Self::new(ProviderConfig::new(ZEROX_DEFAULT_BASE_URL))
	}

	/// 0x identifies chains by their numeric EVM chain id
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

	fn convert_quote(
		&self,
		response: ZeroXQuoteResponse,
		request: &QuoteRequest,
		evm_chain_id: u64,
	) -> AdapterResult<Quote> {
		if !response.liquidity_available {
			return Err(AdapterError::no_route(
				"0x reports no liquidity for this pair",
			));
		}

		let buy_amount = http::required(response.buy_amount.as_deref(), ZEROX_ID, "buyAmount")?;
		let amount_out = http::parse_amount(buy_amount, ZEROX_ID, "buyAmount")?;
		let amount_in = match response.sell_amount.as_deref() {
			Some(value) => http::parse_amount(value, ZEROX_ID, "sellAmount")?,
			None => request.sell_amount,
		};
		let transaction = http::required(response.transaction, ZEROX_ID, "transaction")?;

		let gas = transaction
			.gas
			.as_deref()
			.map(|value| http::parse_amount(value, ZEROX_ID, "transaction.gas"))
			.transpose()?;
		let gas_price = transaction
			.gas_price
			.as_deref()
			.map(|value| http::parse_amount(value, ZEROX_ID, "transaction.gasPrice"))
			.transpose()?;
		let value = match transaction.value.as_deref() {
			Some(value) => http::parse_amount(value, ZEROX_ID, "transaction.value")?,
			None => Amount::ZERO,
		};

		// Only fees charged in the buy token are comparable with the output
		let protocol_fee = match &response.fees {
			Some(fees) => fees.in_buy_token(&request.buy_token)?,
			None => None,
		};

		let spender = response
			.issues
			.and_then(|issues| issues.allowance)
			.map(|allowance| allowance.spender)
			.unwrap_or_else(|| transaction.to.clone());

		let mut quote = Quote::new(ZEROX_ID, request, amount_in, amount_out)
			.with_estimated_gas(gas)
			.with_protocol_fee(protocol_fee)
			.with_metadata(serde_json::json!({
				"zid": response.zid,
				"minBuyAmount": response.min_buy_amount,
				"allowanceTarget": spender,
			}))
			.with_to_sign(ToSign::Evm(EvmTransaction {
				chain_id: evm_chain_id,
				to: transaction.to,
				data: transaction.data,
				value,
				gas_limit: gas,
				gas_price,
			}));

		for approval in
			sell_token_approvals(request.chain_id, &request.sell_token, Some(&spender), amount_in)
		{
			quote = quote.with_approval(approval);
		}

		Ok(quote)
	}
}

#[async_trait]
impl ProviderAdapter for ZeroXAdapter {
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
		let evm_chain_id =
			Self::chain_param(request.chain_id).ok_or_else(|| AdapterError::ChainNotSupported {
				chain_id: request.chain_id,
				adapter_id: ZEROX_ID.to_string(),
			})?;

		let url = http::build_url(&self.provider.base_url, "swap/allowance-holder/quote")?;
		debug!(
			"Fetching 0x quote from {} - chain {} {} -> {}",
			url, evm_chain_id, request.sell_token, request.buy_token
		);

		let response: ZeroXQuoteResponse = http::send_json(
			self.client.get(url).query(&[
				("chainId", evm_chain_id.to_string()),
				("sellToken", request.sell_token.clone()),
				("buyToken", request.buy_token.clone()),
				("sellAmount", request.sell_amount.to_string()),
				("taker", request.wallet_address.clone()),
				("slippageBps", request.slippage_bps.to_string()),
			]),
			ZEROX_ID,
		)
		.await?;

		self.convert_quote(response, request, evm_chain_id)
	}
}
