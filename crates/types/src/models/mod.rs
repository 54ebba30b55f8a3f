//! Shared value types used by quotes, builds and adapters

pub mod address;
pub mod amount;
pub mod secret_string;

pub use address::{
	addresses_equal, is_valid_address, is_valid_evm_address, is_valid_solana_pubkey,
	is_valid_tx_hash,
};
pub use amount::{Amount, AmountError};
pub use secret_string::SecretString;
