//! Property-based integration tests for market parsing, collection naming
//! and search matching.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use std::collections::HashSet;
use unistock_core::markets::{collection_name, Market, RecordKind};
use unistock_core::stocks::{SearchPattern, SourceRanking};

// =============================================================================
// Generators
// =============================================================================

fn arb_market() -> impl Strategy<Value = Market> {
    prop_oneof![
        Just(Market::Cn),
        Just(Market::Hk),
        Just(Market::Us),
        Just(Market::My),
    ]
}

fn arb_kind() -> impl Strategy<Value = RecordKind> {
    prop_oneof![
        Just(RecordKind::BasicInfo),
        Just(RecordKind::Quotes),
        Just(RecordKind::Daily),
        Just(RecordKind::Financial),
        Just(RecordKind::News),
    ]
}

/// Market code with random letter case and surrounding whitespace.
fn arb_market_input() -> impl Strategy<Value = (Market, String)> {
    (arb_market(), any::<[bool; 2]>(), " {0,2}", " {0,2}").prop_map(
        |(market, upper, lead, trail)| {
            let cased: String = market
                .code()
                .chars()
                .zip(upper)
                .map(|(c, up)| if up { c } else { c.to_ascii_lowercase() })
                .collect();
            (market, format!("{}{}{}", lead, cased, trail))
        },
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_market_codes_parse_regardless_of_case((market, input) in arb_market_input()) {
        prop_assert_eq!(input.parse::<Market>().unwrap(), market);
    }

    #[test]
    fn prop_unknown_codes_are_rejected(code in "[A-Z]{3,5}") {
        prop_assert!(code.parse::<Market>().is_err());
    }

    #[test]
    fn prop_collection_suffix_matches_market(market in arb_market(), kind in arb_kind()) {
        let name = collection_name(market, kind);
        match market {
            Market::Cn => prop_assert!(!name.ends_with("_hk") && !name.ends_with("_us") && !name.ends_with("_my")),
            other => {
                let suffix = format!("_{}", other.code().to_lowercase());
                prop_assert!(name.ends_with(&suffix));
            }
        }
    }

    #[test]
    fn prop_search_pattern_never_panics_and_finds_literal_text(
        prefix in "[a-z0-9 ]{0,8}",
        needle in "[a-zA-Z0-9()\\[\\]*+?.]{1,6}",
        suffix in "[a-z0-9 ]{0,8}",
    ) {
        let pattern = SearchPattern::new(&needle);
        let escaped_needle = needle
            .chars()
            .all(|c| c.is_ascii_alphanumeric());
        let haystack = format!("{}{}{}", prefix, needle, suffix);
        if escaped_needle {
            prop_assert!(pattern.is_match(&haystack));
            prop_assert!(pattern.is_match(&haystack.to_uppercase()));
        } else {
            // Regex or literal, matching must not panic.
            let _ = pattern.is_match(&haystack);
        }
    }

    #[test]
    fn prop_ranking_positions_follow_first_occurrence(
        sources in prop::collection::vec("[a-c]{1,2}", 0..10),
    ) {
        let ranking = SourceRanking::new(&sources);
        let mut seen = HashSet::new();
        let mut expected = Vec::new();
        for s in &sources {
            if seen.insert(s.clone()) {
                expected.push(s.clone());
            }
        }
        prop_assert_eq!(ranking.sources(), expected.as_slice());
        for (i, s) in expected.iter().enumerate() {
            prop_assert_eq!(ranking.rank(Some(s)), Some(i));
        }
    }
}
