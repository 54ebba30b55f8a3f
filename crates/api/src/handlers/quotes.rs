use axum::{extract::rejection::JsonRejection, extract::State, response::Json};
use tracing::info;

use crate::handlers::common::{from_aggregation_error, from_json_rejection, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use swap_service::rank;
use swap_types::{QuoteRequest, QuotesResponse};

/// POST /quote - Aggregate quotes from every applicable provider, best first
///
/// An empty `quotes` list is a normal response: no provider had a route.
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/quote",
	request_body = QuoteRequest,
	responses(
		(status = 200, description = "Quotes aggregated and ranked", body = QuotesResponse),
		(status = 400, description = "Invalid request", body = ErrorResponse),
		(status = 500, description = "Internal error", body = ErrorResponse)
	),
	tag = "quotes"
))]
pub async fn post_quote(
	State(state): State<AppState>,
	payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuotesResponse>, ApiError> {
	let Json(request) = payload.map_err(from_json_rejection)?;

	info!(
		"Received quote request on {}: {} {} -> {}",
		request.chain_id, request.sell_amount, request.sell_token, request.buy_token
	);

	let (quotes, metadata) = state
		.aggregator_service
		.fetch_quotes(&request)
		.await
		.map_err(from_aggregation_error)?;

	let response = QuotesResponse::new(rank(quotes), metadata);

	info!(
		"Returning {} quotes (duration: {}ms, {} providers queried)",
		response.total_quotes,
		response.metadata.total_duration_ms,
		response.metadata.providers_queried
	);
	Ok(Json(response))
}
