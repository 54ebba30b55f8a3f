//! Build request/response models

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub mod errors;

pub use errors::BuildError;

use crate::quotes::{Approval, Quote, ToSign, TxKind};

/// API request body for `POST /build`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildRequest {
	/// Quote exactly as returned by `POST /quote`
	pub quote: Quote,
	pub wallet_address: String,
}

/// Unsigned payload plus the allowances it depends on, as produced by an adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRoute {
	pub to_sign: ToSign,
	pub approvals: Vec<Approval>,
}

/// Response body for `POST /build`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BuildResponse {
	pub quote_id: String,
	pub provider: String,
	pub tx_kind: TxKind,
	/// Allowances to check (and raise if needed) before submitting `to_sign`
	pub approvals: Vec<Approval>,
	pub to_sign: ToSign,
}

impl BuildResponse {
	pub fn from_route(quote: &Quote, route: BuiltRoute) -> Self {
		Self {
			quote_id: quote.quote_id.clone(),
			provider: quote.provider.clone(),
			tx_kind: route.to_sign.tx_kind(),
			approvals: route.approvals,
			to_sign: route.to_sign,
		}
	}
}
