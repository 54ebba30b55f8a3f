//! Zeroizing string for provider API keys and the quote integrity secret

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::integrity::constant_time_eq;

/// Secret value cleared from memory on drop and redacted from every
/// `Debug`, `Display` and `Serialize` rendering.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	/// Borrow the underlying value; keep the borrow short-lived
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString([REDACTED])")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret.to_string())
	}
}

impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("[REDACTED]")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString::new)
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
	}
}

impl Eq for SecretString {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_secret_is_redacted_everywhere() {
		let secret = SecretString::from("0x-api-key-123");
		assert_eq!(secret.expose_secret(), "0x-api-key-123");
		assert!(!format!("{:?}", secret).contains("api-key"));
		assert_eq!(secret.to_string(), "[REDACTED]");
		assert_eq!(serde_json::to_string(&secret).unwrap(), "\"[REDACTED]\"");
	}

	#[test]
	fn test_secret_deserializes_raw_value() {
		let secret: SecretString = serde_json::from_str("\"bebop-key\"").unwrap();
		assert_eq!(secret.expose_secret(), "bebop-key");
		assert_eq!(secret.len(), 9);
	}

	#[test]
	fn test_blank_secret_is_empty() {
		assert!(SecretString::from("   ").is_empty());
		assert!(!SecretString::from("k").is_empty());
	}

	#[test]
	fn test_secret_equality() {
		assert_eq!(SecretString::from("same"), SecretString::from("same"));
		assert_ne!(SecretString::from("same"), SecretString::from("other"));
	}
}
