//! Exact signed route scores

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::Quote;
use crate::models::Amount;

/// Signed score computed from smallest-unit amounts
///
/// Stored as sign + 256-bit magnitude so that `output - fee` never loses
/// precision or overflows, whatever the sizes involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, example = "1150"))]
pub struct Score {
	negative: bool,
	magnitude: U256,
}

impl Score {
	pub const ZERO: Score = Score {
		negative: false,
		magnitude: U256::ZERO,
	};

	/// `minuend - subtrahend`, exactly
	pub fn difference(minuend: Amount, subtrahend: Amount) -> Self {
		let (a, b) = (minuend.value(), subtrahend.value());
		if a >= b {
			Self {
				negative: false,
				magnitude: a - b,
			}
		} else {
			Self {
				negative: true,
				magnitude: b - a,
			}
		}
	}

	pub fn is_negative(&self) -> bool {
		self.negative
	}

	pub fn magnitude(&self) -> U256 {
		self.magnitude
	}
}

impl Ord for Score {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self.negative, other.negative) {
			(false, false) => self.magnitude.cmp(&other.magnitude),
			(true, true) => other.magnitude.cmp(&self.magnitude),
			(false, true) => Ordering::Greater,
			(true, false) => Ordering::Less,
		}
	}
}

impl PartialOrd for Score {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl fmt::Display for Score {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.negative {
			write!(f, "-{}", self.magnitude)
		} else {
			write!(f, "{}", self.magnitude)
		}
	}
}

impl Serialize for Score {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Score {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		let (negative, digits) = match raw.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, raw.as_str()),
		};
		let magnitude = Amount::parse(digits)
			.map_err(serde::de::Error::custom)?
			.value();
		Ok(Self {
			negative: negative && !magnitude.is_zero(),
			magnitude,
		})
	}
}

/// Quote with its ranking score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ScoredQuote {
	pub quote: Quote,
	pub score: Score,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn amount(value: &str) -> Amount {
		Amount::parse(value).unwrap()
	}

	#[test]
	fn test_difference() {
		let score = Score::difference(amount("1200"), amount("50"));
		assert_eq!(score.to_string(), "1150");
		assert!(!score.is_negative());

		let score = Score::difference(amount("50"), amount("1200"));
		assert_eq!(score.to_string(), "-1150");
		assert!(score.is_negative());

		assert_eq!(Score::difference(amount("7"), amount("7")), Score::ZERO);
	}

	#[test]
	fn test_ordering_across_signs() {
		let mut scores = vec![
			Score::difference(amount("0"), amount("10")),
			Score::difference(amount("5"), amount("0")),
			Score::difference(amount("0"), amount("3")),
			Score::ZERO,
		];
		scores.sort();
		let rendered: Vec<String> = scores.iter().map(ToString::to_string).collect();
		assert_eq!(rendered, vec!["-10", "-3", "0", "5"]);
	}

	#[test]
	fn test_large_values_compare_exactly() {
		let a = Score::difference(amount("100000000000000000000000000001"), Amount::ZERO);
		let b = Score::difference(amount("100000000000000000000000000000"), Amount::ZERO);
		assert!(a > b);
	}

	#[test]
	fn test_serde() {
		let score = Score::difference(amount("3"), amount("10"));
		let json = serde_json::to_string(&score).unwrap();
		assert_eq!(json, "\"-7\"");
		let back: Score = serde_json::from_str(&json).unwrap();
		assert_eq!(back, score);

		let zero: Score = serde_json::from_str("\"-0\"").unwrap();
		assert_eq!(zero, Score::ZERO);
	}
}
