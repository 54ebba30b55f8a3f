//! HTTP router and common middleware

use std::any::Any;

use axum::{
	http::{header, HeaderValue, Method, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
	Router,
};
use tower::ServiceBuilder;
use tower_http::{
	catch_panic::CatchPanicLayer,
	compression::CompressionLayer,
	cors::{AllowOrigin, CorsLayer},
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::{error, warn, Level};

use crate::handlers::common::{error_response, INTERNAL_ERROR};
use crate::handlers::{get_providers, health, post_build, post_quote, post_status};
use crate::security::add_security_headers;
use crate::state::AppState;
#[cfg(feature = "openapi")]
use crate::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
#[cfg(feature = "openapi")]
use utoipa_swagger_ui::SwaggerUi;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Router allowing any origin
pub fn create_router() -> Router<AppState> {
	create_router_with_origins(&["*".to_string()])
}

/// Router whose CORS policy allows only `allowed_origins` (`"*"` allows any)
pub fn create_router_with_origins(allowed_origins: &[String]) -> Router<AppState> {
	let cors = cors_layer(allowed_origins);
	let body_limit = RequestBodyLimitLayer::new(MAX_BODY_BYTES);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	let base_router = Router::new()
		.route("/health", get(health))
		.route("/health/", get(health))
		.route("/providers", get(get_providers))
		.route("/providers/", get(get_providers))
		.route("/quote", post(post_quote))
		.route("/quote/", post(post_quote))
		.route("/build", post(post_build))
		.route("/build/", post(post_build))
		.route("/status", post(post_status))
		.route("/status/", post(post_status));

	#[cfg(feature = "openapi")]
	let router = base_router
		.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

	#[cfg(not(feature = "openapi"))]
	let router = base_router;

	let router = router
		.layer(CatchPanicLayer::custom(handle_panic))
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit);

	add_security_headers(router)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
	if allowed_origins.iter().any(|origin| origin == "*") {
		return CorsLayer::permissive();
	}

	let origins: Vec<HeaderValue> = allowed_origins
		.iter()
		.filter_map(|origin| match HeaderValue::from_str(origin) {
			Ok(value) => Some(value),
			Err(_) => {
				warn!("Ignoring invalid CORS origin '{}'", origin);
				None
			},
		})
		.collect();

	CorsLayer::new()
		.allow_origin(AllowOrigin::list(origins))
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
		.allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
	let detail = if let Some(s) = err.downcast_ref::<String>() {
		s.as_str()
	} else if let Some(s) = err.downcast_ref::<&str>() {
		s
	} else {
		"unknown panic"
	};
	error!("Request handler panicked: {}", detail);

	error_response(
		StatusCode::INTERNAL_SERVER_ERROR,
		INTERNAL_ERROR,
		"Internal server error",
	)
	.into_response()
}
