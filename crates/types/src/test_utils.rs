//! Test utilities for creating common test objects
//!
//! Builders with sensible defaults for quote requests and quotes, shared by
//! the unit tests of every crate in the workspace.

use crate::{
	quotes::{Approval, EvmTransaction, Quote, QuoteRequest, SolanaTransaction, ToSign},
	Amount, ChainId,
};

pub const TEST_EVM_WALLET: &str = "0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03";
pub const TEST_WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
pub const TEST_USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
pub const TEST_SOLANA_WALLET: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";
pub const TEST_WSOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const TEST_USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// Builder for creating test QuoteRequest objects with sensible defaults
#[derive(Debug, Clone)]
pub struct QuoteRequestBuilder {
	request: QuoteRequest,
}

impl QuoteRequestBuilder {
	/// WETH -> USDC on Ethereum, 1 WETH, 50 bps
	pub fn evm() -> Self {
		Self {
			request: QuoteRequest {
				chain_id: ChainId::Ethereum,
				sell_token: TEST_WETH.to_string(),
				buy_token: TEST_USDC.to_string(),
				sell_amount: Amount::from(1_000_000_000_000_000_000u128),
				wallet_address: TEST_EVM_WALLET.to_string(),
				slippage_bps: 50,
				prefer_aggregators: None,
				exclude_aggregators: None,
			},
		}
	}

	/// wSOL -> USDC on Solana, 1 SOL, 50 bps
	pub fn solana() -> Self {
		Self {
			request: QuoteRequest {
				chain_id: ChainId::Solana,
				sell_token: TEST_WSOL_MINT.to_string(),
				buy_token: TEST_USDC_MINT.to_string(),
				sell_amount: Amount::from(1_000_000_000u64),
				wallet_address: TEST_SOLANA_WALLET.to_string(),
				slippage_bps: 50,
				prefer_aggregators: None,
				exclude_aggregators: None,
			},
		}
	}

	pub fn chain(mut self, chain_id: ChainId) -> Self {
		self.request.chain_id = chain_id;
		self
	}

	pub fn tokens(mut self, sell_token: &str, buy_token: &str) -> Self {
		self.request.sell_token = sell_token.to_string();
		self.request.buy_token = buy_token.to_string();
		self
	}

	pub fn sell_amount(mut self, amount: Amount) -> Self {
		self.request.sell_amount = amount;
		self
	}

	pub fn wallet(mut self, wallet_address: &str) -> Self {
		self.request.wallet_address = wallet_address.to_string();
		self
	}

	pub fn slippage_bps(mut self, slippage_bps: u32) -> Self {
		self.request.slippage_bps = slippage_bps;
		self
	}

	pub fn prefer(mut self, providers: &[&str]) -> Self {
		self.request.prefer_aggregators = Some(providers.iter().map(|p| p.to_string()).collect());
		self
	}

	pub fn exclude(mut self, providers: &[&str]) -> Self {
		self.request.exclude_aggregators = Some(providers.iter().map(|p| p.to_string()).collect());
		self
	}

	pub fn build(self) -> QuoteRequest {
		self.request
	}
}

/// Builder for creating test Quote objects
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
	provider: String,
	request: QuoteRequest,
	amount_out: Amount,
	protocol_fee: Option<Amount>,
	estimated_gas: Option<Amount>,
	to_sign: Option<ToSign>,
	approvals: Vec<Approval>,
	ttl_secs: Option<u64>,
}

impl QuoteBuilder {
	/// EVM quote from `provider` with the given output amount
	pub fn new(provider: &str, amount_out: u64) -> Self {
		Self::with_amount(provider, Amount::from(amount_out))
	}

	pub fn with_amount(provider: &str, amount_out: Amount) -> Self {
		Self {
			provider: provider.to_string(),
			request: QuoteRequestBuilder::evm().build(),
			amount_out,
			protocol_fee: None,
			estimated_gas: None,
			to_sign: None,
			approvals: Vec::new(),
			ttl_secs: None,
		}
	}

	pub fn request(mut self, request: QuoteRequest) -> Self {
		self.request = request;
		self
	}

	pub fn fee(mut self, fee: u64) -> Self {
		self.protocol_fee = Some(Amount::from(fee));
		self
	}

	pub fn gas(mut self, gas: u64) -> Self {
		self.estimated_gas = Some(Amount::from(gas));
		self
	}

	pub fn ttl_secs(mut self, ttl_secs: u64) -> Self {
		self.ttl_secs = Some(ttl_secs);
		self
	}

	/// Attach an executable EVM call plus a matching allowance
	pub fn with_evm_payload(mut self) -> Self {
		let chain_id = self.request.chain_id.evm_chain_id().unwrap_or(1);
		self.to_sign = Some(ToSign::Evm(EvmTransaction {
			chain_id,
			to: "0x0000000000001fF3684f28c67538d4D072C22734".to_string(),
			data: "0x2213bc0b".to_string(),
			value: Amount::ZERO,
			gas_limit: Some(Amount::from(210_000u64)),
			gas_price: None,
		}));
		self.approvals.push(Approval::new(
			self.request.sell_token.clone(),
			"0x0000000000001fF3684f28c67538d4D072C22734",
			self.request.sell_amount,
		));
		self
	}

	pub fn with_solana_payload(mut self) -> Self {
		self.to_sign = Some(ToSign::Solana(SolanaTransaction {
			transaction: "AQAAAA==".to_string(),
			last_valid_block_height: Some(279_000_000),
		}));
		self
	}

	pub fn build(self) -> Quote {
		let mut quote = Quote::new(
			self.provider,
			&self.request,
			self.request.sell_amount,
			self.amount_out,
		)
		.with_protocol_fee(self.protocol_fee)
		.with_estimated_gas(self.estimated_gas);

		if let Some(to_sign) = self.to_sign {
			quote = quote.with_to_sign(to_sign);
		}
		for approval in self.approvals {
			quote = quote.with_approval(approval);
		}
		if let Some(ttl) = self.ttl_secs {
			quote = quote.with_ttl(ttl);
		}
		quote
	}
}
