//! Error types for quote operations

use thiserror::Error;

use crate::ChainId;

/// Validation errors for quote requests, raised before any provider is called
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteValidationError {
	#[error("Invalid {field} for {chain_id}: '{value}'")]
	InvalidAddress {
		field: String,
		chain_id: ChainId,
		value: String,
	},

	#[error("Invalid slippage tolerance: {value} bps (must be between 0 and {max})")]
	InvalidSlippage { value: u32, max: u32 },

	#[error("Sell and buy token must differ")]
	IdenticalTokens,

	#[error("Invalid provider list {field}: {reason}")]
	InvalidProviderList { field: String, reason: String },
}
