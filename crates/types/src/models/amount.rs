//! Token amounts in smallest on-chain units

use alloy_primitives::U256;
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Errors produced when parsing an amount string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
	#[error("amount cannot be empty")]
	Empty,

	#[error("amount must be a base-10 integer string, got '{0}'")]
	NotDecimal(String),

	#[error("amount '{0}' exceeds 256 bits")]
	Overflow(String),
}

/// Non-negative integer amount in the token's smallest unit (wei, lamports, ...)
///
/// Carried as a decimal string on the wire to preserve precision; arithmetic and
/// comparisons are exact over 256 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, example = "1000000000000000000"))]
pub struct Amount(U256);

impl Amount {
	pub const ZERO: Amount = Amount(U256::ZERO);

	pub fn new(value: U256) -> Self {
		Self(value)
	}

	pub fn value(&self) -> U256 {
		self.0
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	/// Parse a strict base-10 integer string (no sign, no prefix, no whitespace)
	pub fn parse(value: &str) -> Result<Self, AmountError> {
		if value.is_empty() {
			return Err(AmountError::Empty);
		}
		if !value.bytes().all(|b| b.is_ascii_digit()) {
			return Err(AmountError::NotDecimal(value.to_string()));
		}
		U256::from_str_radix(value, 10)
			.map(Self)
			.map_err(|_| AmountError::Overflow(value.to_string()))
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for Amount {
	type Err = AmountError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl From<u64> for Amount {
	fn from(value: u64) -> Self {
		Self(U256::from(value))
	}
}

impl From<u128> for Amount {
	fn from(value: u128) -> Self {
		Self(U256::from(value))
	}
}

impl From<U256> for Amount {
	fn from(value: U256) -> Self {
		Self(value)
	}
}

// Serialized as a decimal string, never as a JSON number
impl serde::Serialize for Amount {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_str(&self.0)
	}
}

impl<'de> serde::Deserialize<'de> for Amount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = String::deserialize(deserializer)?;
		Self::parse(&value).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_amount_parsing() {
		let val = Amount::parse("1000000000000000000").unwrap();
		assert_eq!(val.to_string(), "1000000000000000000");
		assert!(Amount::parse("0").unwrap().is_zero());
		assert!(Amount::parse("000").unwrap().is_zero());
	}

	#[test]
	fn test_amount_rejects_malformed_input() {
		assert_eq!(Amount::parse(""), Err(AmountError::Empty));
		assert!(matches!(
			Amount::parse("-1"),
			Err(AmountError::NotDecimal(_))
		));
		assert!(matches!(
			Amount::parse("0x10"),
			Err(AmountError::NotDecimal(_))
		));
		assert!(matches!(
			Amount::parse("1.5"),
			Err(AmountError::NotDecimal(_))
		));
		assert!(matches!(
			Amount::parse(" 1"),
			Err(AmountError::NotDecimal(_))
		));
		// 2^256
		let too_big = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
		assert!(matches!(Amount::parse(too_big), Err(AmountError::Overflow(_))));
	}

	#[test]
	fn test_amount_ordering_beyond_f64_precision() {
		// 2^53 + 1 and 2^53 + 2 collapse to the same f64
		let a = Amount::parse("9007199254740993").unwrap();
		let b = Amount::parse("9007199254740994").unwrap();
		assert!(a < b);

		let large = Amount::parse("340282366920938463463374607431768211457").unwrap();
		assert!(large > Amount::from(u128::MAX));
	}

	#[test]
	fn test_amount_serde() {
		let val = Amount::from(2500000000u64);
		let json = serde_json::to_string(&val).unwrap();
		assert_eq!(json, "\"2500000000\"");

		let parsed: Amount = serde_json::from_str("\"123456789\"").unwrap();
		assert_eq!(parsed, Amount::from(123456789u64));

		assert!(serde_json::from_str::<Amount>("\"abc\"").is_err());
		assert!(serde_json::from_str::<Amount>("\"\"").is_err());
		assert!(serde_json::from_str::<Amount>("42").is_err());
	}
}
