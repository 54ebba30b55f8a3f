//! Swap Service
//!
//! Core logic for quote aggregation, scoring and route building.

pub mod aggregator;
pub mod builder;
pub mod integrity;
pub mod scorer;
pub mod status;

pub use aggregator::{AggregatorResult, AggregatorService, AggregatorServiceError};
pub use builder::RouteBuilder;
pub use integrity::{IntegrityError, IntegrityService, IntegrityTrait};
pub use scorer::{rank, score};
pub use status::{StubStatusResolver, TxStatusResolver};
pub use swap_types::IntegrityPayload;
