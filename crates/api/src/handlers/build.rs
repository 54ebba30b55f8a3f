use axum::{extract::rejection::JsonRejection, extract::State, response::Json};
use tracing::{info, warn};

use crate::handlers::common::{from_build_error, from_json_rejection, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;
use swap_types::{BuildRequest, BuildResponse};

/// POST /build - Turn a selected quote into an unsigned transaction
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/build",
	request_body = BuildRequest,
	responses(
		(status = 200, description = "Route built", body = BuildResponse),
		(status = 400, description = "Invalid request", body = ErrorResponse),
		(status = 410, description = "Quote expired", body = ErrorResponse),
		(status = 422, description = "Quote failed verification or provider unknown", body = ErrorResponse),
		(status = 502, description = "Provider could not build the route", body = ErrorResponse)
	),
	tag = "build"
))]
pub async fn post_build(
	State(state): State<AppState>,
	payload: Result<Json<BuildRequest>, JsonRejection>,
) -> Result<Json<BuildResponse>, ApiError> {
	let Json(request) = payload.map_err(from_json_rejection)?;
	let quote_id = request.quote.quote_id.clone();
	let provider = request.quote.provider.clone();

	info!("Building route for quote {} from {}", quote_id, provider);

	match state.route_builder.build(request).await {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			warn!("Build for quote {} from {} failed: {}", quote_id, provider, e);
			Err(from_build_error(e))
		},
	}
}
