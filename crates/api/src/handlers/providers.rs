//! Provider listing handler

use axum::{extract::State, response::Json};
use serde::Serialize;
use swap_types::AdapterResponse;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::state::AppState;

/// Registered providers, in the order they are queried
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProvidersResponse {
	pub providers: Vec<AdapterResponse>,
	pub total_providers: usize,
	pub timestamp: i64,
}

/// GET /providers - List registered providers and their chains
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/providers",
	responses((status = 200, description = "Registered providers", body = ProvidersResponse)),
	tag = "providers"
))]
pub async fn get_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
	let providers: Vec<AdapterResponse> = state
		.adapter_registry
		.get_all()
		.map(|adapter| AdapterResponse::from_adapter(adapter.as_ref()))
		.collect();

	Json(ProvidersResponse {
		total_providers: providers.len(),
		providers,
		timestamp: chrono::Utc::now().timestamp(),
	})
}
