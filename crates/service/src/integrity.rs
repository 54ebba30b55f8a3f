//! Quote integrity verification using HMAC-SHA256
//!
//! Quotes leave the service stamped with a checksum over their canonical
//! payload. A quote sent back to `/build` is only trusted when the checksum
//! still matches, which stops clients from editing amounts or payloads.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use swap_types::integrity::constant_time_eq;
use swap_types::{IntegrityPayload, Quote, SecretString};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur during integrity operations
#[derive(Debug, Error)]
pub enum IntegrityError {
	#[error("Failed to create HMAC: {0}")]
	HmacCreation(String),

	#[error("Checksum verification failed")]
	VerificationFailed,

	#[error("Missing integrity checksum")]
	MissingChecksum,
}

#[cfg_attr(test, mockall::automock)]
pub trait IntegrityTrait: Send + Sync {
	/// Generate checksum directly from a payload string
	fn generate_checksum_from_payload(&self, payload: &str) -> Result<String, IntegrityError>;

	/// Verify checksum directly from a payload string
	fn verify_checksum_from_payload(
		&self,
		payload: &str,
		expected_checksum: &str,
	) -> Result<bool, IntegrityError>;
}

/// HMAC-SHA256 integrity service keyed by a server-side secret
pub struct IntegrityService {
	secret_key: SecretString,
}

impl IntegrityService {
	/// Create a new integrity service with the given secret key
	pub fn new(secret_key: SecretString) -> Self {
		Self { secret_key }
	}
}

impl IntegrityTrait for IntegrityService {
	fn generate_checksum_from_payload(&self, payload: &str) -> Result<String, IntegrityError> {
		let mut mac = HmacSha256::new_from_slice(self.secret_key.expose_secret().as_bytes())
			.map_err(|e| IntegrityError::HmacCreation(e.to_string()))?;
		mac.update(payload.as_bytes());
		Ok(hex::encode(mac.finalize().into_bytes()))
	}

	fn verify_checksum_from_payload(
		&self,
		payload: &str,
		expected_checksum: &str,
	) -> Result<bool, IntegrityError> {
		let calculated_checksum = self.generate_checksum_from_payload(payload)?;
		Ok(constant_time_eq(
			calculated_checksum.as_bytes(),
			expected_checksum.as_bytes(),
		))
	}
}

/// Attach a checksum over the quote's canonical payload
pub fn stamp_quote(integrity: &dyn IntegrityTrait, quote: Quote) -> Result<Quote, IntegrityError> {
	let checksum = integrity.generate_checksum_from_payload(&quote.to_integrity_payload())?;
	Ok(quote.with_integrity_checksum(checksum))
}

/// Check that a quote is unmodified since it was stamped
pub fn verify_quote(integrity: &dyn IntegrityTrait, quote: &Quote) -> Result<(), IntegrityError> {
	let checksum = quote
		.integrity_checksum
		.as_deref()
		.ok_or(IntegrityError::MissingChecksum)?;
	if integrity.verify_checksum_from_payload(&quote.to_integrity_payload(), checksum)? {
		Ok(())
	} else {
		Err(IntegrityError::VerificationFailed)
	}
}
