//! Instrument search matching and per-code deduplication.

use std::collections::HashMap;

use log::debug;
use regex::{Regex, RegexBuilder};

use super::model::InstrumentRecord;

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// Lower-cased literal used when the query is not a valid regex
    Literal(String),
}

/// Case-insensitive, unanchored pattern over code, name and English name.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    query: String,
    matcher: Matcher,
}

impl SearchPattern {
    pub fn new(query: &str) -> Self {
        let matcher = match RegexBuilder::new(query).case_insensitive(true).build() {
            Ok(regex) => Matcher::Regex(regex),
            Err(e) => {
                debug!("Search query '{}' is not a valid regex ({}), matching literally", query, e);
                Matcher::Literal(query.to_lowercase())
            }
        };

        Self {
            query: query.to_string(),
            matcher,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(text),
            Matcher::Literal(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }

    /// True if the code, name or English name matches.
    pub fn matches(&self, record: &InstrumentRecord) -> bool {
        self.is_match(&record.code)
            || record.name.as_deref().is_some_and(|n| self.is_match(n))
            || record.name_en.as_deref().is_some_and(|n| self.is_match(n))
    }
}

/// Resolved source order with cached positions.
///
/// Duplicate names keep their first position.
#[derive(Debug, Clone, Default)]
pub struct SourceRanking {
    sources: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl SourceRanking {
    pub fn new(sources: &[String]) -> Self {
        let mut ordered = Vec::with_capacity(sources.len());
        let mut ranks = HashMap::with_capacity(sources.len());
        for source in sources {
            if !ranks.contains_key(source) {
                ranks.insert(source.clone(), ordered.len());
                ordered.push(source.clone());
            }
        }

        Self {
            sources: ordered,
            ranks,
        }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Position of `source`, lower is preferred. `None` for unranked sources.
    pub fn rank(&self, source: Option<&str>) -> Option<usize> {
        source.and_then(|s| self.ranks.get(s).copied())
    }
}

/// Keep one record per code, preferring the source ranked earliest.
///
/// A later record replaces the kept one only when both sources are ranked
/// and the later one ranks strictly better. Codes keep the position where
/// they were first seen.
pub fn dedup_by_source_priority(
    records: Vec<InstrumentRecord>,
    ranking: &SourceRanking,
) -> Vec<InstrumentRecord> {
    let mut kept: Vec<InstrumentRecord> = Vec::new();
    let mut slot_by_code: HashMap<String, usize> = HashMap::new();

    for record in records {
        match slot_by_code.get(&record.code) {
            None => {
                slot_by_code.insert(record.code.clone(), kept.len());
                kept.push(record);
            }
            Some(&slot) => {
                let candidate = ranking.rank(record.source.as_deref());
                let current = ranking.rank(kept[slot].source.as_deref());
                if let (Some(candidate), Some(current)) = (candidate, current) {
                    if candidate < current {
                        kept[slot] = record;
                    }
                }
            }
        }
    }

    kept
}
