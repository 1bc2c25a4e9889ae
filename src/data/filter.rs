use anyhow::Result;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::data::path::resolve_path;
use crate::data::value::search_text;

/// Minimum fuzzy score for a row to count as a match.
const FUZZY_SCORE_THRESHOLD: i64 = 0;

/// How the search term is matched against a field's string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum MatchMode {
    /// Case-insensitive substring containment.
    #[default]
    Contains,
    /// The term is a regular expression.
    Regex,
    /// Skim-style fuzzy matching.
    Fuzzy,
}

/// Validate a search term for the given mode.
///
/// Only the regex mode can reject a term; the result carries the compile
/// error so the caller can surface it instead of silently matching nothing.
pub fn validate_term(term: &str, mode: MatchMode) -> Result<()> {
    if mode == MatchMode::Regex && !term.is_empty() {
        Regex::new(term)?;
    }
    Ok(())
}

/// Filter rows by a search term over the given field paths.
///
/// Returns indices into `rows` for rows where at least one field resolves to
/// a value whose string form matches the term. A pure function of its
/// inputs: empty term or empty field list passes every row through.
pub fn filter_rows(rows: &[Value], term: &str, fields: &[String]) -> Vec<usize> {
    filter_rows_with(rows, term, fields, MatchMode::Contains)
}

/// Filter with an explicit match mode. In regex mode an invalid pattern
/// matches nothing; `validate_term` is the place to catch it beforehand.
pub fn filter_rows_with(
    rows: &[Value],
    term: &str,
    fields: &[String],
    mode: MatchMode,
) -> Vec<usize> {
    if term.is_empty() || fields.is_empty() {
        return (0..rows.len()).collect();
    }

    match mode {
        MatchMode::Contains => {
            let needle = term.to_lowercase();
            collect_matching(rows, fields, |text| text.to_lowercase().contains(&needle))
        }
        MatchMode::Regex => match Regex::new(term) {
            Ok(regex) => collect_matching(rows, fields, |text| regex.is_match(text)),
            Err(err) => {
                warn!(target: "filter", "Invalid regex {:?}: {}", term, err);
                Vec::new()
            }
        },
        MatchMode::Fuzzy => {
            let matcher = SkimMatcherV2::default();
            collect_matching(rows, fields, |text| {
                matcher
                    .fuzzy_match(text, term)
                    .is_some_and(|score| score > FUZZY_SCORE_THRESHOLD)
            })
        }
    }
}

fn collect_matching<F>(rows: &[Value], fields: &[String], matches: F) -> Vec<usize>
where
    F: Fn(&str) -> bool,
{
    let mut kept = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let hit = fields.iter().any(|field| {
            resolve_path(row, field)
                .map(|value| matches(&search_text(value)))
                .unwrap_or(false)
        });
        if hit {
            kept.push(idx);
        }
    }

    kept
}
