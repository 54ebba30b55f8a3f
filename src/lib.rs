//! Swap Aggregator Library
//!
//! Multi-provider DEX quote aggregation for EVM chains and Solana: fan a swap
//! request out to every applicable provider, rank the answers and turn the
//! chosen one into an unsigned transaction.

use swap_service::{IntegrityService, IntegrityTrait, RouteBuilder, StubStatusResolver};

// Core domain types - the most commonly used types
pub use swap_types::{
	chrono,
	serde_json,
	Adapter,
	AdapterError,
	AdapterResponse,
	AggregationMetadata,
	Amount,
	Approval,
	BuildError,
	BuildRequest,
	BuildResponse,
	BuiltRoute,
	ChainFamily,
	ChainId,
	ProviderAdapter,
	ProviderConfig,
	Quote,
	QuoteRequest,
	QuoteValidationError,
	QuotesResponse,
	Score,
	ScoredQuote,
	ToSign,
	TxKind,
	TxStatus,
	TxStatusRequest,
	TxStatusResponse,
};

// Service layer
pub use swap_service::{
	rank, score, AggregatorService, AggregatorServiceError, TxStatusResolver,
};

// API layer
pub use swap_api::{create_router, create_router_with_origins, AppState};

// Adapters
pub use swap_adapters::{AdapterFactory, AdapterRegistry, BUILTIN_PROVIDERS};

// Config
pub use swap_config::{load_config, log_service_info, log_startup_complete, Settings};

pub mod models {
	pub use swap_types::*;
}

pub mod config {
	pub use swap_config::*;
}

pub mod adapters {
	pub use swap_adapters::*;
}

pub mod api {
	pub use swap_api::*;
}

pub mod service {
	pub use swap_service::*;
}

pub mod mocks;

use std::net::SocketAddr;
use std::sync::Arc;
use swap_config::{log_service_shutdown, log_settings_summary, settings::LogFormat};
use tracing::{info, warn};

// Re-export external dependencies for custom adapters
pub use async_trait;

/// Builder pattern for configuring the aggregator
#[derive(Default)]
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	adapter_registry: Option<AdapterRegistry>,
	adapters: Vec<Arc<dyn ProviderAdapter>>,
	status_resolver: Option<Arc<dyn TxStatusResolver>>,
}

impl AggregatorBuilder {
	/// Create a builder that uses the built-in providers as configured
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a builder from configuration settings
	pub fn from_config(settings: Settings) -> Self {
		Self::new().with_settings(settings)
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Use `registry` instead of building one from the provider settings
	pub fn with_registry(mut self, registry: AdapterRegistry) -> Self {
		self.adapter_registry = Some(registry);
		self
	}

	/// Register an additional adapter; its id must not clash with another one
	pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	pub fn with_status_resolver(mut self, resolver: Arc<dyn TxStatusResolver>) -> Self {
		self.status_resolver = Some(resolver);
		self
	}

	/// Create adapters for every enabled provider in `settings`
	pub fn registry_from_settings(
		settings: &Settings,
	) -> Result<AdapterRegistry, Box<dyn std::error::Error>> {
		let mut registry = AdapterRegistry::new();

		for (id, provider) in settings.enabled_providers() {
			let config = provider.to_provider_config(&id, AdapterFactory::default_base_url(&id))?;
			let adapter = AdapterFactory::create_adapter(&id, config)
				.map_err(|e| format!("Failed to create adapter for provider '{}': {}", id, e))?;
			registry.register(adapter)?;
		}

		Ok(registry)
	}

	/// Initialize tracing based on configuration settings
	pub fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		// RUST_LOG wins over the configured level
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				} else {
					subscriber.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				} else {
					subscriber.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				} else {
					subscriber.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Wire settings, adapters and services into a router with state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let mut registry = match self.adapter_registry {
			Some(registry) => registry,
			None => Self::registry_from_settings(&settings)?,
		};
		for adapter in self.adapters {
			registry.register(adapter)?;
		}
		if registry.is_empty() {
			warn!("No providers registered; every quote request will return an empty list");
		}
		info!("Registered providers: {}", registry.ids().join(", "));
		let adapter_registry = Arc::new(registry);

		let integrity_secret = settings.get_integrity_secret_secure().map_err(|e| {
			format!(
				"Failed to resolve integrity secret: {}. Please set the INTEGRITY_SECRET environment variable with a secure random string (minimum 32 characters).",
				e
			)
		})?;
		let integrity_service =
			Arc::new(IntegrityService::new(integrity_secret)) as Arc<dyn IntegrityTrait>;

		let aggregator_service = AggregatorService::new(
			Arc::clone(&adapter_registry),
			settings.timeouts.aggregation_ms,
			settings.quotes.ttl_secs,
			Arc::clone(&integrity_service),
		);
		let route_builder = RouteBuilder::new(
			Arc::clone(&adapter_registry),
			integrity_service,
			settings.timeouts.build_ms,
		);

		let app_state = AppState {
			aggregator_service: Arc::new(aggregator_service),
			route_builder: Arc::new(route_builder),
			status_resolver: self
				.status_resolver
				.unwrap_or_else(|| Arc::new(StubStatusResolver) as Arc<dyn TxStatusResolver>),
			adapter_registry,
		};

		let router =
			create_router_with_origins(&settings.cors.allowed_origins).with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Load configuration, initialize tracing and serve until shutdown
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		self.init_tracing_from_settings(&settings)?;
		log_service_info();
		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);
		log_settings_summary(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		let rate_cfg = settings.environment.rate_limiting.clone();
		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /providers");
		info!("  POST /quote");
		info!("  POST /build");
		info!("  POST /status");
		if cfg!(feature = "openapi") {
			info!("  GET  /swagger-ui");
			info!("  GET  /api-docs/openapi.json");
		}

		// Global rate limiting is applied at the make_service level
		if rate_cfg.enabled {
			use std::time::Duration;
			use tower::limit::RateLimitLayer;
			use tower::ServiceBuilder;
			info!(
				"Rate limiting enabled: {} connections per minute",
				rate_cfg.requests_per_minute
			);
			let make_svc = ServiceBuilder::new()
				.layer(RateLimitLayer::new(
					rate_cfg.requests_per_minute as u64,
					Duration::from_secs(60),
				))
				.service(app.into_make_service());
			axum::serve(listener, make_svc)
				.with_graceful_shutdown(shutdown_signal())
				.await?;
		} else {
			axum::serve(listener, app)
				.with_graceful_shutdown(shutdown_signal())
				.await?;
		}

		log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		warn!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}
