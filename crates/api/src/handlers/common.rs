use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Json};
use serde::Serialize;
use swap_service::AggregatorServiceError;
use swap_types::{BuildError, StatusError};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

/// Rejection returned by every handler
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
	(
		status,
		Json(ErrorResponse {
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp(),
		}),
	)
}

/// Undecodable bodies, wrong content types and schema mismatches are all 400s
pub fn from_json_rejection(rejection: JsonRejection) -> ApiError {
	error_response(
		StatusCode::BAD_REQUEST,
		VALIDATION_ERROR,
		format!("Invalid request: {}", rejection.body_text()),
	)
}

pub fn from_aggregation_error(error: AggregatorServiceError) -> ApiError {
	match error {
		AggregatorServiceError::Validation(e) => error_response(
			StatusCode::BAD_REQUEST,
			VALIDATION_ERROR,
			format!("Invalid request: {}", e),
		),
		AggregatorServiceError::Internal(e) => {
			tracing::error!("Quote aggregation failed: {}", e);
			error_response(
				StatusCode::INTERNAL_SERVER_ERROR,
				INTERNAL_ERROR,
				"Internal server error",
			)
		},
	}
}

/// Build failures keep their own codes so an unbuildable route never looks like "no quotes"
pub fn from_build_error(error: BuildError) -> ApiError {
	let status = match &error {
		BuildError::Validation(_) => StatusCode::BAD_REQUEST,
		BuildError::InvalidQuote { .. } | BuildError::UnsupportedProvider { .. } => {
			StatusCode::UNPROCESSABLE_ENTITY
		},
		BuildError::QuoteExpired { .. } => StatusCode::GONE,
		BuildError::BuildFailed { .. } => StatusCode::BAD_GATEWAY,
	};
	error_response(status, error.code(), error.to_string())
}

pub fn from_status_error(error: StatusError) -> ApiError {
	error_response(
		StatusCode::BAD_REQUEST,
		VALIDATION_ERROR,
		format!("Invalid request: {}", error),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_errors_map_to_distinct_statuses() {
		let cases = [
			(
				BuildError::Validation("bad wallet".to_string()),
				StatusCode::BAD_REQUEST,
			),
			(
				BuildError::InvalidQuote {
					quote_id: "q".to_string(),
					reason: "checksum mismatch".to_string(),
				},
				StatusCode::UNPROCESSABLE_ENTITY,
			),
			(
				BuildError::QuoteExpired {
					quote_id: "q".to_string(),
				},
				StatusCode::GONE,
			),
			(
				BuildError::BuildFailed {
					provider: "1inch".to_string(),
					reason: "timeout".to_string(),
				},
				StatusCode::BAD_GATEWAY,
			),
		];

		for (error, expected) in cases {
			let code = error.code();
			let (status, Json(body)) = from_build_error(error);
			assert_eq!(status, expected);
			assert_eq!(body.error, code);
		}
	}

	#[test]
	fn test_internal_errors_are_generic() {
		let (status, Json(body)) =
			from_aggregation_error(AggregatorServiceError::Internal("hmac key rejected".to_string()));
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body.error, INTERNAL_ERROR);
		assert!(!body.message.contains("hmac"));
	}
}
