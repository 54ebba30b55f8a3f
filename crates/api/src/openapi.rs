use crate::handlers::{build, health, providers, quotes, status};
use utoipa::OpenApi;

use crate::handlers::common::ErrorResponse;
use crate::handlers::providers::ProvidersResponse;
use swap_types::{
	AdapterResponse, AggregationMetadata, Approval, BuildRequest, BuildResponse, ChainId,
	EvmTransaction, Quote, QuoteRequest, QuotesResponse, Score, ScoredQuote, SolanaTransaction,
	ToSign, TxKind, TxStatus, TxStatusRequest, TxStatusResponse,
};

#[derive(OpenApi)]
#[openapi(
	paths(
		health::health,
		providers::get_providers,
		quotes::post_quote,
		build::post_build,
		status::post_status,
	),
	components(schemas(
		ChainId, QuoteRequest, Quote, Score, ScoredQuote, QuotesResponse, AggregationMetadata,
		ToSign, EvmTransaction, SolanaTransaction, TxKind, Approval,
		BuildRequest, BuildResponse, TxStatusRequest, TxStatusResponse, TxStatus,
		AdapterResponse, ProvidersResponse, ErrorResponse
	)),
	tags(
		(name = "quotes", description = "Quote aggregation"),
		(name = "build", description = "Unsigned transaction building"),
		(name = "status", description = "Transaction status"),
		(name = "providers", description = "Registered providers"),
		(name = "health", description = "Liveness")
	)
)]
pub struct ApiDoc;
