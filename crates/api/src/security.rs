//! Response headers added to every API response

use axum::{
	http::header::{self, HeaderName, HeaderValue},
	Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Set unless a handler already chose a value
const DEFAULT_HEADERS: [(&str, &str); 4] = [
	("strict-transport-security", "max-age=31536000; includeSubDomains"),
	("x-content-type-options", "nosniff"),
	("x-frame-options", "DENY"),
	("referrer-policy", "no-referrer"),
];

/// Apply the security headers to `router`
///
/// Quotes and built transactions are wallet-specific, so `cache-control` is
/// always forced to `no-store`.
pub fn add_security_headers<S>(router: Router<S>) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	let router = DEFAULT_HEADERS
		.into_iter()
		.fold(router, |router, (name, value)| {
			router.layer(SetResponseHeaderLayer::if_not_present(
				HeaderName::from_static(name),
				HeaderValue::from_static(value),
			))
		});

	router.layer(SetResponseHeaderLayer::overriding(
		header::CACHE_CONTROL,
		HeaderValue::from_static("no-store"),
	))
}
