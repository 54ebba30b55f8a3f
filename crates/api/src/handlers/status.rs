use axum::{extract::rejection::JsonRejection, extract::State, response::Json};

use crate::handlers::common::{from_json_rejection, from_status_error, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use swap_types::{TxStatusRequest, TxStatusResponse};

/// POST /status - Report the settlement state of a submitted transaction
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/status",
	request_body = TxStatusRequest,
	responses(
		(status = 200, description = "Transaction status", body = TxStatusResponse),
		(status = 400, description = "Invalid request", body = ErrorResponse)
	),
	tag = "status"
))]
pub async fn post_status(
	State(state): State<AppState>,
	payload: Result<Json<TxStatusRequest>, JsonRejection>,
) -> Result<Json<TxStatusResponse>, ApiError> {
	let Json(request) = payload.map_err(from_json_rejection)?;
	state
		.status_resolver
		.status(&request)
		.await
		.map(Json)
		.map_err(from_status_error)
}
