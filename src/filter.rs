use color_eyre::eyre::Result;
use tracing::debug;

use crate::charset::CharSet;
use crate::matching::{classify, Classification};

/// Keys and candidates are bounded; anything longer is reported back to the
/// caller rather than processed.
pub const MAX_ITEM_LEN: usize = 100;

/// Outcome of one full sweep over the candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterResult {
    /// A candidate broke the length bound or produced a non-printable next
    /// character.  Carries the offending candidate; nothing after it was read.
    Invalid(String),
    NotFound,
    Found(String),
    /// Several candidates share the key as a prefix; carries the characters
    /// which may legally extend the key at the next position.
    Ambiguous(CharSet),
}

#[derive(Debug, Default)]
pub struct FilterEngine {
    trace: bool,
}

impl FilterEngine {
    /// The diagnostic trace toggle is supplied up front and only ever gates
    /// log events; it must not influence the computed result.
    pub fn new(trace: bool) -> Self {
        Self { trace }
    }

    /// Sweeps the candidates in source order, classifying each against the
    /// key and accumulating the next-character set from partial matches.
    ///
    /// The first full match encountered wins; later full matches are
    /// ignored.  A single partial match with no full match promotes to
    /// `Found`, since no ambiguity remains.  The sweep halts on the first
    /// invalid candidate without pulling any further items from the source.
    pub fn run<I>(&self, key: &str, candidates: I) -> Result<FilterResult>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut next_chars = CharSet::new();
        let mut partial_matches = 0usize;
        let mut latest_partial: Option<String> = None;
        let mut full_match: Option<String> = None;

        for candidate in candidates {
            let candidate = candidate?;

            if candidate.len() > MAX_ITEM_LEN {
                return Ok(FilterResult::Invalid(candidate));
            }

            match classify(key, &candidate) {
                Classification::NoMatch => {
                    if self.trace {
                        debug!(%candidate, "no match");
                    }
                }
                Classification::FullMatch => {
                    if self.trace {
                        debug!(%candidate, "full match");
                    }
                    if full_match.is_none() {
                        full_match = Some(candidate);
                    }
                }
                Classification::PartialMatch { next } => {
                    if self.trace {
                        debug!(%candidate, next = %char::from(next), "partial match");
                    }
                    if !next_chars.add(next) {
                        return Ok(FilterResult::Invalid(candidate));
                    }
                    partial_matches += 1;
                    latest_partial = Some(candidate);
                }
            }
        }

        if let Some(item) = full_match {
            return Ok(FilterResult::Found(item));
        }

        if partial_matches == 1 {
            if let Some(item) = latest_partial {
                return Ok(FilterResult::Found(item));
            }
        }

        if partial_matches == 0 {
            Ok(FilterResult::NotFound)
        } else {
            Ok(FilterResult::Ambiguous(next_chars))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;

    fn items(values: &[&str]) -> Vec<Result<String>> {
        values.iter().map(|v| Ok(v.to_string())).collect()
    }

    fn run(key: &str, values: &[&str]) -> FilterResult {
        FilterEngine::new(false).run(key, items(values)).unwrap()
    }

    fn chars(result: &FilterResult) -> Vec<char> {
        match result {
            FilterResult::Ambiguous(set) => set.iter().collect(),
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_key_over_shared_prefix_is_ambiguous() {
        let result = run("", &["APPLE", "APRICOT"]);
        assert_eq!(chars(&result), vec!['A']);
    }

    #[test]
    fn test_partial_matches_collect_next_chars() {
        let result = run("AP", &["APPLE", "APRICOT"]);
        assert_eq!(chars(&result), vec!['P', 'R']);
    }

    #[test]
    fn test_full_match_wins_over_partials() {
        let result = run("APPLE", &["APPLE", "APRICOT"]);
        assert_eq!(result, FilterResult::Found("APPLE".into()));
    }

    #[test]
    fn test_no_matching_candidates_is_not_found() {
        assert_eq!(run("ZZ", &["APPLE", "APRICOT"]), FilterResult::NotFound);
    }

    #[test]
    fn test_no_candidates_is_not_found() {
        assert_eq!(run("A", &[]), FilterResult::NotFound);
    }

    #[test]
    fn test_singleton_partial_promotes_to_found() {
        let result = run("", &["ONLYONE"]);
        assert_eq!(result, FilterResult::Found("ONLYONE".into()));
    }

    #[test]
    fn test_first_full_match_wins() {
        let result = run("apple", &["apple", "APPLE"]);
        assert_eq!(result, FilterResult::Found("apple".into()));
    }

    #[test]
    fn test_full_match_suppresses_next_chars() {
        // Two further partial matches exist beyond the exact one; the full
        // match is reported alone.
        let result = run("A", &["A", "AB", "AC"]);
        assert_eq!(result, FilterResult::Found("A".into()));
    }

    #[test]
    fn test_over_long_candidate_halts_sweep() {
        let too_long = "X".repeat(MAX_ITEM_LEN + 1);
        // The sentinel error would propagate out of run if the engine pulled
        // anything past the invalid candidate.
        let candidates = vec![
            Ok(too_long.clone()),
            Err(eyre!("sentinel candidate was read")),
        ];
        let result = FilterEngine::new(false).run("", candidates).unwrap();
        assert_eq!(result, FilterResult::Invalid(too_long));
    }

    #[test]
    fn test_candidate_at_bound_is_valid() {
        let at_bound = "X".repeat(MAX_ITEM_LEN);
        let result = run("", &[at_bound.as_str()]);
        assert_eq!(result, FilterResult::Found(at_bound));
    }

    #[test]
    fn test_non_printable_next_char_is_invalid() {
        // The character after the key is a space, which is outside the
        // printable range.
        let result = run("A", &["A b"]);
        assert_eq!(result, FilterResult::Invalid("A b".into()));
    }

    #[test]
    fn test_non_printable_next_char_halts_sweep() {
        let candidates = vec![
            Ok("A b".to_string()),
            Err(eyre!("sentinel candidate was read")),
        ];
        let result = FilterEngine::new(false).run("A", candidates).unwrap();
        assert_eq!(result, FilterResult::Invalid("A b".into()));
    }

    #[test]
    fn test_lowercase_key_matches_like_uppercase() {
        assert_eq!(run("ap", &["APPLE", "APRICOT"]), run("AP", &["APPLE", "APRICOT"]));
    }

    #[test]
    fn test_next_chars_fold_to_uppercase() {
        let result = run("AP", &["apple", "APRICOT"]);
        assert_eq!(chars(&result), vec!['P', 'R']);
    }

    #[test]
    fn test_candidate_shorter_than_key_is_skipped() {
        assert_eq!(run("APPLE", &["APP"]), FilterResult::NotFound);
    }

    #[test]
    fn test_empty_candidate_fully_matches_empty_key() {
        let result = run("", &["", "A"]);
        assert_eq!(result, FilterResult::Found("".into()));
    }

    #[test]
    fn test_source_error_propagates() {
        let candidates = vec![Ok("APPLE".to_string()), Err(eyre!("stream broke"))];
        let result = FilterEngine::new(false).run("AP", candidates);
        assert!(result.is_err());
    }

    #[test]
    fn test_trace_does_not_alter_results() {
        let cases: &[(&str, &[&str])] = &[
            ("", &["APPLE", "APRICOT"]),
            ("AP", &["APPLE", "APRICOT"]),
            ("APPLE", &["APPLE", "APRICOT"]),
            ("ZZ", &["APPLE", "APRICOT"]),
            ("", &["ONLYONE"]),
        ];
        for (key, values) in cases {
            let quiet = FilterEngine::new(false).run(key, items(values)).unwrap();
            let traced = FilterEngine::new(true).run(key, items(values)).unwrap();
            assert_eq!(quiet, traced);
        }
    }
}
