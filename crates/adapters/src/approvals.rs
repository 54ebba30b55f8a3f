//! Allowance requirements for EVM routes

use swap_types::{chain::is_native_token, Amount, Approval, ChainId};

/// Allowance the wallet must grant `spender` to sell `sell_token`
///
/// Native-asset sales and Solana routes need none.
pub fn sell_token_approvals(
	chain_id: ChainId,
	sell_token: &str,
	spender: Option<&str>,
	amount: Amount,
) -> Vec<Approval> {
	match spender {
		Some(spender) if chain_id.is_evm() && !is_native_token(sell_token) => {
			vec![Approval::new(sell_token, spender, amount)]
		},
		_ => Vec::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use swap_types::chain::NATIVE_TOKEN_ADDRESS;

	const SPENDER: &str = "0x0000000000001fF3684f28c67538d4D072C22734";
	const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

	#[test]
	fn test_erc20_sale_requires_approval() {
		let approvals =
			sell_token_approvals(ChainId::Ethereum, WETH, Some(SPENDER), Amount::from(5u64));
		assert_eq!(approvals.len(), 1);
		assert_eq!(approvals[0].spender, SPENDER);
		assert_eq!(approvals[0].amount, Amount::from(5u64));
	}

	#[test]
	fn test_native_and_solana_sales_need_none() {
		assert!(sell_token_approvals(
			ChainId::Base,
			NATIVE_TOKEN_ADDRESS,
			Some(SPENDER),
			Amount::from(5u64)
		)
		.is_empty());
		assert!(sell_token_approvals(
			ChainId::Solana,
			"So11111111111111111111111111111111111111112",
			Some(SPENDER),
			Amount::from(5u64)
		)
		.is_empty());
		assert!(sell_token_approvals(ChainId::Ethereum, WETH, None, Amount::from(5u64)).is_empty());
	}
}
