//! Supported chains and chain families

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Sentinel address used by EVM aggregators for the chain's native asset
pub const NATIVE_TOKEN_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Check whether an EVM token identifier refers to the native asset
pub fn is_native_token(token: &str) -> bool {
	token.eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS)
}

/// Address and transaction encoding family a chain belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
	Evm,
	Solana,
}

/// Chains the aggregator can route on
///
/// The lowercase name is the canonical wire form. EVM chains also accept their
/// numeric chain id (as a JSON number or string) on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, example = "ethereum"))]
pub enum ChainId {
	Ethereum,
	Optimism,
	Bsc,
	Polygon,
	Base,
	Arbitrum,
	Avalanche,
	Solana,
}

impl ChainId {
	pub const ALL: [ChainId; 8] = [
		ChainId::Ethereum,
		ChainId::Optimism,
		ChainId::Bsc,
		ChainId::Polygon,
		ChainId::Base,
		ChainId::Arbitrum,
		ChainId::Avalanche,
		ChainId::Solana,
	];

	pub fn family(&self) -> ChainFamily {
		match self {
			ChainId::Solana => ChainFamily::Solana,
			_ => ChainFamily::Evm,
		}
	}

	pub fn is_evm(&self) -> bool {
		self.family() == ChainFamily::Evm
	}

	/// Numeric EIP-155 chain id, `None` for non-EVM chains
	pub fn evm_chain_id(&self) -> Option<u64> {
		match self {
			ChainId::Ethereum => Some(1),
			ChainId::Optimism => Some(10),
			ChainId::Bsc => Some(56),
			ChainId::Polygon => Some(137),
			ChainId::Base => Some(8453),
			ChainId::Arbitrum => Some(42161),
			ChainId::Avalanche => Some(43114),
			ChainId::Solana => None,
		}
	}

	pub fn from_evm_chain_id(id: u64) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|chain| chain.evm_chain_id() == Some(id))
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			ChainId::Ethereum => "ethereum",
			ChainId::Optimism => "optimism",
			ChainId::Bsc => "bsc",
			ChainId::Polygon => "polygon",
			ChainId::Base => "base",
			ChainId::Arbitrum => "arbitrum",
			ChainId::Avalanche => "avalanche",
			ChainId::Solana => "solana",
		}
	}

	/// Block explorer URL for a transaction on this chain
	pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
		let base = match self {
			ChainId::Ethereum => "https://etherscan.io/tx/",
			ChainId::Optimism => "https://optimistic.etherscan.io/tx/",
			ChainId::Bsc => "https://bscscan.com/tx/",
			ChainId::Polygon => "https://polygonscan.com/tx/",
			ChainId::Base => "https://basescan.org/tx/",
			ChainId::Arbitrum => "https://arbiscan.io/tx/",
			ChainId::Avalanche => "https://snowtrace.io/tx/",
			ChainId::Solana => "https://solscan.io/tx/",
		};
		format!("{}{}", base, tx_hash)
	}
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a chain identifier is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized chain id: {0}")]
pub struct UnknownChainError(pub String);

impl FromStr for ChainId {
	type Err = UnknownChainError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.trim().to_ascii_lowercase();
		if let Some(chain) = Self::ALL
			.into_iter()
			.find(|chain| chain.as_str() == normalized)
		{
			return Ok(chain);
		}

		normalized
			.parse::<u64>()
			.ok()
			.and_then(Self::from_evm_chain_id)
			.ok_or_else(|| UnknownChainError(s.to_string()))
	}
}

impl Serialize for ChainId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for ChainId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Name(String),
			Numeric(u64),
		}

		match Raw::deserialize(deserializer)? {
			Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
			Raw::Numeric(id) => Self::from_evm_chain_id(id).ok_or_else(|| {
				serde::de::Error::custom(UnknownChainError(id.to_string()))
			}),
		}
	}
}
