//! Swap Configuration
//!
//! Configuration management and startup utilities for the swap aggregator.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	default_providers, ConfigValidationError, CorsSettings, EnvironmentProfile, LogFormat,
	ProviderSettings, QuoteSettings, Settings, TimeoutSettings,
};
pub use startup_logger::{
	log_service_info, log_service_shutdown, log_settings_summary, log_startup_complete,
};
