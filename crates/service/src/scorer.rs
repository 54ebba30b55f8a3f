//! Quote scoring and ranking

use swap_types::{Amount, Quote, Score, ScoredQuote};

/// Net output of a quote: `amount_out - protocol_fee`
///
/// Gas is deliberately left out until it can be priced in the buy token.
pub fn score(quote: &Quote) -> Score {
	Score::difference(quote.amount_out, quote.protocol_fee.unwrap_or(Amount::ZERO))
}

/// Score quotes and order them best first
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank(quotes: Vec<Quote>) -> Vec<ScoredQuote> {
	let mut scored: Vec<ScoredQuote> = quotes
		.into_iter()
		.map(|quote| ScoredQuote {
			score: score(&quote),
			quote,
		})
		.collect();
	scored.sort_by(|a, b| b.score.cmp(&a.score));
	scored
}

#[cfg(test)]
mod tests {
	use super::*;
	use swap_types::test_utils::QuoteBuilder;

	fn providers(ranked: &[ScoredQuote]) -> Vec<&str> {
		ranked.iter().map(|s| s.quote.provider.as_str()).collect()
	}

	#[test]
	fn test_fee_is_subtracted() {
		let ranked = rank(vec![
			QuoteBuilder::new("a", 1000).build(),
			QuoteBuilder::new("b", 1200).fee(50).build(),
		]);
		assert_eq!(providers(&ranked), vec!["b", "a"]);
		assert_eq!(ranked[0].score.to_string(), "1150");
		assert_eq!(ranked[1].score.to_string(), "1000");
	}

	#[test]
	fn test_gas_does_not_affect_score() {
		let cheap = QuoteBuilder::new("cheap", 1000).gas(100_000).build();
		let costly = QuoteBuilder::new("costly", 1000).gas(900_000).build();
		assert_eq!(score(&cheap), score(&costly));
	}

	#[test]
	fn test_fee_larger_than_output_scores_negative() {
		let quote = QuoteBuilder::new("a", 10).fee(25).build();
		assert_eq!(score(&quote).to_string(), "-15");

		let ranked = rank(vec![quote, QuoteBuilder::new("b", 0).build()]);
		assert_eq!(providers(&ranked), vec!["b", "a"]);
	}

	#[test]
	fn test_ties_keep_input_order() {
		let ranked = rank(vec![
			QuoteBuilder::new("first", 500).build(),
			QuoteBuilder::new("second", 600).fee(100).build(),
			QuoteBuilder::new("third", 500).build(),
		]);
		assert_eq!(providers(&ranked), vec!["first", "second", "third"]);
	}

	#[test]
	fn test_amounts_beyond_f64_precision() {
		// 2^53 + 1 and 2^53 are indistinguishable as f64
		let ranked = rank(vec![
			QuoteBuilder::with_amount("low", Amount::parse("9007199254740992").unwrap()).build(),
			QuoteBuilder::with_amount("high", Amount::parse("9007199254740993").unwrap()).build(),
		]);
		assert_eq!(providers(&ranked), vec!["high", "low"]);

		let ranked = rank(vec![
			QuoteBuilder::with_amount(
				"a",
				Amount::parse("115792089237316195423570985008687907853269984665640564039457584007913129639935")
					.unwrap(),
			)
			.build(),
			QuoteBuilder::new("b", 1).build(),
		]);
		assert_eq!(providers(&ranked), vec!["a", "b"]);
	}

	#[test]
	fn test_empty_input() {
		assert!(rank(Vec::new()).is_empty());
	}
}
