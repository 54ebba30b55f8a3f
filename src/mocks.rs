//! Mock adapters for demos and tests
//!
//! [`MockProviderAdapter`] answers from memory after a configurable delay and
//! counts how often it was asked, which is enough to drive the coordinator
//! through every timing and failure scenario without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use swap_types::{
	Adapter, AdapterError, AdapterResult, Amount, Approval, BuiltRoute, ChainId, EvmTransaction,
	ProviderAdapter, Quote, QuoteRequest, SolanaTransaction, ToSign,
};

/// Spender used in mock approvals
pub const MOCK_SPENDER: &str = "0x1111111254EEB25477B68fb85Ed929f73A960582";

/// Shared call counter, cloned out of an adapter before it is registered
#[derive(Debug, Clone, Default)]
pub struct CallTracker(Arc<AtomicUsize>);

impl CallTracker {
	pub fn count(&self) -> usize {
		self.0.load(Ordering::SeqCst)
	}

	fn record(&self) {
		self.0.fetch_add(1, Ordering::SeqCst);
	}
}

#[derive(Debug, Clone)]
enum MockBehavior {
	Quote,
	NoRoute,
	Fail(String),
	Panic,
}

/// Configurable in-memory provider
#[derive(Debug, Clone)]
pub struct MockProviderAdapter {
	adapter: Adapter,
	chains: Vec<ChainId>,
	behavior: MockBehavior,
	amount_out: Amount,
	protocol_fee: Option<Amount>,
	estimated_gas: Option<Amount>,
	delay: Duration,
	prebuilt: bool,
	calls: CallTracker,
	build_calls: CallTracker,
}

impl MockProviderAdapter {
	/// Provider quoting 1000 units on the given chains
	pub fn new(id: &str, chains: Vec<ChainId>) -> Self {
		Self {
			adapter: Adapter::new(id, &format!("Mock {}", id), "In-memory mock provider", "1.0.0"),
			chains,
			behavior: MockBehavior::Quote,
			amount_out: Amount::from(1000u64),
			protocol_fee: None,
			estimated_gas: None,
			delay: Duration::ZERO,
			prebuilt: false,
			calls: CallTracker::default(),
			build_calls: CallTracker::default(),
		}
	}

	/// Provider for every EVM chain
	pub fn evm(id: &str) -> Self {
		Self::new(
			id,
			ChainId::ALL.into_iter().filter(ChainId::is_evm).collect(),
		)
	}

	/// Solana-only provider
	pub fn solana(id: &str) -> Self {
		Self::new(id, vec![ChainId::Solana])
	}

	pub fn with_output(mut self, amount_out: u64) -> Self {
		self.amount_out = Amount::from(amount_out);
		self
	}

	pub fn with_output_amount(mut self, amount_out: Amount) -> Self {
		self.amount_out = amount_out;
		self
	}

	pub fn with_fee(mut self, fee: u64) -> Self {
		self.protocol_fee = Some(Amount::from(fee));
		self
	}

	pub fn with_gas(mut self, gas: u64) -> Self {
		self.estimated_gas = Some(Amount::from(gas));
		self
	}

	/// Answer only after `delay`
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	/// Attach the signable payload to the quote itself
	pub fn with_prebuilt_payload(mut self) -> Self {
		self.prebuilt = true;
		self
	}

	pub fn failing(mut self, message: &str) -> Self {
		self.behavior = MockBehavior::Fail(message.to_string());
		self
	}

	pub fn without_route(mut self) -> Self {
		self.behavior = MockBehavior::NoRoute;
		self
	}

	pub fn panicking(mut self) -> Self {
		self.behavior = MockBehavior::Panic;
		self
	}

	/// Counter of `fetch_quote` calls
	pub fn calls(&self) -> CallTracker {
		self.calls.clone()
	}

	/// Counter of `build_route` calls
	pub fn build_calls(&self) -> CallTracker {
		self.build_calls.clone()
	}

	fn payload(&self, chain_id: ChainId, sell_token: &str, amount: Amount) -> BuiltRoute {
		match chain_id.evm_chain_id() {
			Some(evm_chain_id) => BuiltRoute {
				to_sign: ToSign::Evm(EvmTransaction {
					chain_id: evm_chain_id,
					to: MOCK_SPENDER.to_string(),
					data: format!("0x12aa3caf{}", hex_id(self.id())),
					value: Amount::ZERO,
					gas_limit: self.estimated_gas,
					gas_price: None,
				}),
				approvals: vec![Approval::new(sell_token, MOCK_SPENDER, amount)],
			},
			None => BuiltRoute {
				to_sign: ToSign::Solana(SolanaTransaction {
					transaction: "AQAAAAAAAAA=".to_string(),
					last_valid_block_height: None,
				}),
				approvals: Vec::new(),
			},
		}
	}
}

fn hex_id(id: &str) -> String {
	id.bytes().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
impl ProviderAdapter for MockProviderAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	fn supported_chains(&self) -> Vec<ChainId> {
		self.chains.clone()
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		self.calls.record();

		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}

		match &self.behavior {
			MockBehavior::Quote => {},
			MockBehavior::NoRoute => return Err(AdapterError::no_route("mock has no liquidity")),
			MockBehavior::Fail(message) => return Err(AdapterError::invalid_response(message)),
			MockBehavior::Panic => panic!("mock provider {} panicked", self.id()),
		}

		let mut quote = Quote::new(self.id(), request, request.sell_amount, self.amount_out)
			.with_protocol_fee(self.protocol_fee)
			.with_estimated_gas(self.estimated_gas);

		if self.prebuilt {
			let route = self.payload(request.chain_id, &request.sell_token, request.sell_amount);
			quote = quote.with_to_sign(route.to_sign);
			for approval in route.approvals {
				quote = quote.with_approval(approval);
			}
		}

		Ok(quote)
	}

	async fn build_route(&self, quote: &Quote, _wallet_address: &str) -> AdapterResult<BuiltRoute> {
		self.build_calls.record();

		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}
		if let MockBehavior::Fail(message) = &self.behavior {
			return Err(AdapterError::invalid_response(message));
		}

		Ok(self.payload(quote.chain_id, &quote.sell_token, quote.amount_in))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use swap_types::test_utils::QuoteRequestBuilder;

	#[tokio::test]
	async fn test_mock_counts_calls_and_quotes() {
		let adapter = MockProviderAdapter::evm("mock").with_output(1200).with_fee(50);
		let calls = adapter.calls();

		let quote = adapter
			.fetch_quote(&QuoteRequestBuilder::evm().build())
			.await
			.unwrap();

		assert_eq!(calls.count(), 1);
		assert_eq!(quote.provider, "mock");
		assert_eq!(quote.amount_out, Amount::from(1200u64));
		assert_eq!(quote.protocol_fee, Some(Amount::from(50u64)));
		assert!(quote.to_sign.is_none());
	}

	#[tokio::test]
	async fn test_solana_payload_has_no_approvals() {
		let adapter = MockProviderAdapter::solana("mock-sol").with_prebuilt_payload();
		let quote = adapter
			.fetch_quote(&QuoteRequestBuilder::solana().build())
			.await
			.unwrap();

		assert!(matches!(quote.to_sign, Some(ToSign::Solana(_))));
		assert!(quote.approvals.is_empty());
	}

	#[test]
	fn test_chain_sets() {
		assert!(!MockProviderAdapter::evm("a").supports_chain(ChainId::Solana));
		assert!(MockProviderAdapter::evm("a").supports_chain(ChainId::Arbitrum));
		assert!(!MockProviderAdapter::solana("b").supports_chain(ChainId::Ethereum));
	}
}
