//! Global limits and defaults for configuration and runtime

/// Highest accepted slippage tolerance (50%)
pub const MAX_SLIPPAGE_BPS: u32 = 5_000;

/// Minimum allowed aggregation or build timeout in milliseconds
pub const MIN_TIMEOUT_MS: u64 = 100; // 100ms

/// Maximum allowed aggregation timeout in milliseconds
pub const MAX_AGGREGATION_TIMEOUT_MS: u64 = 30_000; // 30s

/// Maximum allowed build timeout in milliseconds
pub const MAX_BUILD_TIMEOUT_MS: u64 = 60_000; // 60s

/// Default shared deadline for one aggregation request
pub const DEFAULT_AGGREGATION_TIMEOUT_MS: u64 = 4_000; // 4s

/// Default deadline for re-deriving build data from a provider
pub const DEFAULT_BUILD_TIMEOUT_MS: u64 = 10_000; // 10s

/// Default lifetime of a quote before it can no longer be built
pub const DEFAULT_QUOTE_TTL_SECS: u64 = 60;
