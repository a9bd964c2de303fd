//! Relevance scoring and ranking of search candidates.

use std::cmp::Ordering;

use crate::item::{SearchableItem, term_tokens};

/// How strongly a candidate matches the search term.
///
/// Variants are listed from strongest to weakest; the first applicable rule
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
	/// Name equals the term.
	Exact,
	/// Name starts with the term.
	Prefix,
	/// One of the term's words is a stored search token.
	Token,
	/// Name contains the term somewhere.
	Substring,
	/// Surfaced by a source for some other reason.
	None,
}

impl MatchTier {
	#[must_use]
	pub const fn score(self) -> u8 {
		match self {
			MatchTier::Exact => 100,
			MatchTier::Prefix => 90,
			MatchTier::Token => 80,
			MatchTier::Substring => 70,
			MatchTier::None => 0,
		}
	}

	/// Classify `item` against an already normalized term.
	#[must_use]
	pub fn classify(item: &SearchableItem, term: &str) -> Self {
		let name = item.name.to_lowercase();
		if name == term {
			return MatchTier::Exact;
		}
		if name.starts_with(term) {
			return MatchTier::Prefix;
		}
		if term_tokens(term).any(|token| item.search_tokens.iter().any(|stored| stored == token)) {
			return MatchTier::Token;
		}
		if name.contains(term) {
			return MatchTier::Substring;
		}
		MatchTier::None
	}
}

/// Score `item` against a normalized (trimmed, lowercased) term.
///
/// Always one of `0`, `70`, `80`, `90` or `100`.
#[must_use]
pub fn score(item: &SearchableItem, normalized_term: &str) -> u8 {
	MatchTier::classify(item, normalized_term).score()
}

/// Sort `items` by descending score, breaking ties by case-insensitive name
/// and finally by identity so the order is total.
pub fn rank(items: &mut Vec<SearchableItem>, normalized_term: &str) {
	let mut scored: Vec<(u8, String, SearchableItem)> = items
		.drain(..)
		.map(|item| (score(&item, normalized_term), item.name.to_lowercase(), item))
		.collect();
	scored.sort_by(|(score_a, name_a, a), (score_b, name_b, b)| {
		score_b
			.cmp(score_a)
			.then_with(|| name_a.cmp(name_b))
			.then_with(|| tie_break(a, b))
	});
	items.extend(scored.into_iter().map(|(_, _, item)| item));
}

fn tie_break(a: &SearchableItem, b: &SearchableItem) -> Ordering {
	a.key().cmp(&b.key())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn names(items: &[SearchableItem]) -> Vec<&str> {
		items.iter().map(|item| item.name.as_str()).collect()
	}

	#[test]
	fn rules_apply_in_order() {
		let exact = SearchableItem::food("1", "Mela");
		let prefix = SearchableItem::food("2", "Mela Verde");
		let token = SearchableItem::food("3", "Succo di mela").with_tokens(["succo", "di", "mela"]);
		let substring = SearchableItem::food("4", "Caramelata").with_tokens(["caramelata"]);
		let none = SearchableItem::food("5", "Marmellata di mele");

		assert_eq!(score(&exact, "mela"), 100);
		assert_eq!(score(&prefix, "mela"), 90);
		assert_eq!(score(&token, "mela"), 80);
		assert_eq!(score(&substring, "mela"), 70);
		assert_eq!(score(&none, "mela"), 0);
	}

	#[test]
	fn exact_match_beats_substring() {
		let item = SearchableItem::food("1", "PANE");
		assert_eq!(MatchTier::classify(&item, "pane"), MatchTier::Exact);
	}

	#[test]
	fn any_term_word_can_hit_a_token() {
		let item = SearchableItem::food("1", "Yogurt greco").with_tokens(["yogurt", "greco"]);
		assert_eq!(score(&item, "bianco greco"), 80);
	}

	#[test]
	fn missing_tokens_do_not_panic() {
		let mut item = SearchableItem::food("1", "Zucchine");
		item.search_tokens.clear();
		assert_eq!(score(&item, "zucc"), 90);
		assert_eq!(score(&item, "olio"), 0);
	}

	#[test]
	fn ranking_breaks_ties_by_name() {
		let mut items = vec![
			SearchableItem::food("1", "mela rossa"),
			SearchableItem::food("2", "Mela gialla"),
			SearchableItem::food("3", "Mela"),
			SearchableItem::food("4", "Marmellata di mele"),
		];
		rank(&mut items, "mela");
		assert_eq!(
			names(&items),
			vec!["Mela", "Mela gialla", "mela rossa", "Marmellata di mele"]
		);
	}

	#[test]
	fn ranking_is_repeatable() {
		let build = || {
			vec![
				SearchableItem::food("b", "Pasta"),
				SearchableItem::recipe("b", "Pasta"),
				SearchableItem::food("a", "Pasta"),
			]
		};
		let mut first = build();
		let mut second = build();
		second.reverse();
		rank(&mut first, "pasta");
		rank(&mut second, "pasta");
		let keys = |items: &[SearchableItem]| {
			items
				.iter()
				.map(|item| item.key().to_string())
				.collect::<Vec<_>>()
		};
		assert_eq!(keys(&first), keys(&second));
		assert_eq!(keys(&first), vec!["a", "b", "recipe-b"]);
	}
}
