use std::sync::Arc;

use swap_adapters::AdapterRegistry;
use swap_service::{AggregatorService, RouteBuilder, TxStatusResolver};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub aggregator_service: Arc<AggregatorService>,
	pub route_builder: Arc<RouteBuilder>,
	pub status_resolver: Arc<dyn TxStatusResolver>,
	pub adapter_registry: Arc<AdapterRegistry>,
}
