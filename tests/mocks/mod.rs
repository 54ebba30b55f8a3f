//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
	body::Body,
	http::{Request, Response},
	Router,
};
use serde_json::{json, Value};
use swap_aggregator::config::ConfigurableValue;
use swap_aggregator::mocks::MockProviderAdapter;
use swap_aggregator::service::integrity::stamp_quote;
use swap_aggregator::service::{IntegrityService, IntegrityTrait};
use swap_aggregator::{
	AdapterRegistry, AggregatorBuilder, AggregatorService, AppState, ProviderAdapter, Quote,
	Settings,
};
use swap_types::SecretString;
use tower::ServiceExt;

pub const INTEGRITY_SECRET: &str = "swap-aggregator-integration-test-secret-0123456789";

/// Settings with no built-in providers and a plain integrity secret
pub fn test_settings(aggregation_ms: u64) -> Settings {
	let mut settings = Settings::default();
	settings.providers.clear();
	settings.timeouts.aggregation_ms = aggregation_ms;
	settings.timeouts.build_ms = 1000;
	settings.security.integrity_secret = ConfigurableValue::from_plain(INTEGRITY_SECRET);
	settings
}

pub fn integrity() -> Arc<dyn IntegrityTrait> {
	Arc::new(IntegrityService::new(SecretString::from(INTEGRITY_SECRET)))
}

/// Sign `quote` the way the running service would
pub fn stamp(quote: Quote) -> Quote {
	stamp_quote(integrity().as_ref(), quote).unwrap()
}

pub fn registry(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Arc<AdapterRegistry> {
	let mut registry = AdapterRegistry::new();
	for adapter in adapters {
		registry.register(adapter).unwrap();
	}
	Arc::new(registry)
}

pub fn aggregator(adapters: Vec<Arc<dyn ProviderAdapter>>, timeout_ms: u64) -> AggregatorService {
	AggregatorService::new(registry(adapters), timeout_ms, 60, integrity())
}

/// Router backed by the given mock providers
pub async fn router_with(adapters: Vec<MockProviderAdapter>) -> (Router, AppState) {
	let mut builder = AggregatorBuilder::new().with_settings(test_settings(1000));
	for adapter in adapters {
		builder = builder.with_adapter(Arc::new(adapter));
	}
	builder.start().await.unwrap()
}

pub async fn post_json(router: Router, uri: &str, body: Value) -> Response<Body> {
	router
		.oneshot(
			Request::builder()
				.method("POST")
				.uri(uri)
				.header("content-type", "application/json")
				.body(Body::from(body.to_string()))
				.unwrap(),
		)
		.await
		.unwrap()
}

pub async fn get(router: Router, uri: &str) -> Response<Body> {
	router
		.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
		.await
		.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

/// WETH -> USDC on Ethereum
pub fn evm_quote_request() -> Value {
	json!({
		"chainId": "ethereum",
		"sellToken": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
		"buyToken": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
		"sellAmount": "1000000000000000000",
		"walletAddress": "0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03",
		"slippageBps": 50
	})
}

/// SOL -> USDC on Solana
pub fn solana_quote_request() -> Value {
	json!({
		"chainId": "solana",
		"sellToken": "So11111111111111111111111111111111111111112",
		"buyToken": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
		"sellAmount": "1000000000",
		"walletAddress": "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4",
		"slippageBps": 50
	})
}
