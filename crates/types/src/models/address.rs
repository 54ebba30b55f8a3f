//! Per-family address and transaction hash validation

use alloy_primitives::Address;
use std::str::FromStr;

use crate::chain::ChainFamily;

/// Check that `value` is a `0x`-prefixed 20-byte hex address
pub fn is_valid_evm_address(value: &str) -> bool {
	value.len() == 42
		&& value.starts_with("0x")
		&& Address::from_str(value).is_ok()
}

/// Check that `value` is a base58 string decoding to a 32-byte public key
pub fn is_valid_solana_pubkey(value: &str) -> bool {
	decoded_base58_len(value) == Some(32)
}

/// Validate an account or token identifier for the given chain family
pub fn is_valid_address(family: ChainFamily, value: &str) -> bool {
	match family {
		ChainFamily::Evm => is_valid_evm_address(value),
		ChainFamily::Solana => is_valid_solana_pubkey(value),
	}
}

/// Validate a transaction hash (EVM) or signature (Solana) for the given family
pub fn is_valid_tx_hash(family: ChainFamily, value: &str) -> bool {
	match family {
		ChainFamily::Evm => {
			value.len() == 66
				&& value.starts_with("0x")
				&& value[2..].bytes().all(|b| b.is_ascii_hexdigit())
		},
		ChainFamily::Solana => decoded_base58_len(value) == Some(64),
	}
}

/// Compare two addresses of the same family; EVM addresses are case-insensitive
pub fn addresses_equal(family: ChainFamily, a: &str, b: &str) -> bool {
	match family {
		ChainFamily::Evm => a.eq_ignore_ascii_case(b),
		ChainFamily::Solana => a == b,
	}
}

fn decoded_base58_len(value: &str) -> Option<usize> {
	if value.is_empty() {
		return None;
	}
	bs58::decode(value).into_vec().ok().map(|bytes| bytes.len())
}
