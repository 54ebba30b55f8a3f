//! Swap Types
//!
//! Shared models and traits for the swap aggregator.
//! This crate contains all domain models organized by business entity.

pub mod adapters;
pub mod build;
pub mod chain;
pub mod constants;
pub mod integrity;
pub mod models;
pub mod quotes;
pub mod status;
pub mod test_utils;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use chain::{ChainFamily, ChainId, UnknownChainError};

pub use models::{Amount, AmountError, SecretString};

pub use quotes::{
	AggregationMetadata, Approval, EvmTransaction, Quote, QuoteRequest, QuoteValidationError,
	QuoteValidationResult, QuotesResponse, Score, ScoredQuote, SolanaTransaction, ToSign, TxKind,
};

pub use build::{BuildError, BuildRequest, BuildResponse, BuiltRoute};

pub use status::{StatusError, TxStatus, TxStatusRequest, TxStatusResponse};

pub use adapters::{
	Adapter, AdapterError, AdapterFactoryError, AdapterFactoryResult, AdapterResponse,
	AdapterResult, ProviderAdapter, ProviderConfig,
};

pub use integrity::IntegrityPayload;
