//! Service startup logging for the swap aggregator

use crate::Settings;
use std::env;
use tracing::{info, warn};

/// Logs service information at startup
pub fn log_service_info() {
	// Use the root package name and version, not the current crate
	let service_name = "swap-aggregator";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Swap Aggregator Service Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {}", env::consts::OS);
	info!("🏗️ Architecture: {}", env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the effective provider and timeout configuration
pub fn log_settings_summary(settings: &Settings) {
	info!(
		"⏱️ Aggregation timeout: {}ms, build timeout: {}ms, quote TTL: {}s",
		settings.timeouts.aggregation_ms, settings.timeouts.build_ms, settings.quotes.ttl_secs
	);

	for (id, provider) in &settings.providers {
		if !provider.enabled {
			info!("⏸️ Provider {} disabled", id);
			continue;
		}
		let key = provider
			.api_key
			.as_ref()
			.map(|value| value.description())
			.unwrap_or_else(|| "none".to_string());
		info!("🔌 Provider {} enabled (api key: {})", id, key);
	}

	if settings.is_production() && settings.cors.allows_any() {
		warn!("🌐 CORS allows any origin in production");
	}
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 Swap Aggregator Service Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs additional startup completion information
pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Swap Aggregator Service Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
	info!("📡 Ready to accept requests");
}
