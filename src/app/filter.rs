//! Filter engine: narrows an item list to the entries matching the filter text.
//!
//! # Filtering Algorithm
//!
//! 1. **Tokenization**: split the filter on whitespace, dropping empty tokens
//! 2. **Folding**: in case-insensitive mode, lower-case tokens and item text
//! 3. **Token Matching**: an item matches iff every token is a contiguous
//!    substring of its text
//! 4. **Ordering**: matches keep their original relative order (no scoring)
//!
//! A filter with no tokens (empty or whitespace-only) matches every item.
//!
//! # Example
//!
//! ```rust
//! use pickmenu::app::filter::filter;
//! use pickmenu::FilterMode;
//!
//! let items = [(0, "foobar"), (1, "foo"), (2, "bar baz"), (3, "xyz")];
//! let matched = filter(items, "foo bar", FilterMode::CaseInsensitive);
//! assert_eq!(matched, vec![0]);
//! ```

use super::keys::FilterMode;

/// Pre-tokenized filter, reusable across many items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    tokens: Vec<String>,
    mode: FilterMode,
}

impl Matcher {
    /// Tokenizes `filter_text` for the given mode.
    #[must_use]
    pub fn new(filter_text: &str, mode: FilterMode) -> Self {
        let tokens = filter_text
            .split_whitespace()
            .map(|token| match mode {
                FilterMode::CaseSensitive => token.to_string(),
                FilterMode::CaseInsensitive => fold(token),
            })
            .collect();

        Self { tokens, mode }
    }

    /// Returns `true` when the filter has no tokens and matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in filter order, folded when the mode is case-insensitive.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns `true` if every token occurs in `text`.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        if self.tokens.is_empty() {
            return true;
        }

        match self.mode {
            FilterMode::CaseSensitive => self.tokens.iter().all(|t| text.contains(t.as_str())),
            FilterMode::CaseInsensitive => {
                let folded = fold(text);
                self.tokens.iter().all(|t| folded.contains(t.as_str()))
            }
        }
    }

    /// Computes codepoint ranges of `text` covered by the first occurrence of
    /// each token.
    ///
    /// Ranges are `(start, end)` with exclusive end, sorted and merged. Returns
    /// an empty vector when the text does not match.
    #[must_use]
    pub fn match_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        if self.tokens.is_empty() {
            return vec![];
        }

        // Folding may expand one codepoint into several, so keep a map from
        // every folded codepoint back to its source codepoint.
        let (haystack, origin): (String, Vec<usize>) = match self.mode {
            FilterMode::CaseSensitive => (text.to_string(), (0..text.chars().count()).collect()),
            FilterMode::CaseInsensitive => {
                let mut folded = String::with_capacity(text.len());
                let mut origin = Vec::with_capacity(text.len());
                for (idx, c) in text.chars().enumerate() {
                    for lower in c.to_lowercase() {
                        folded.push(lower);
                        origin.push(idx);
                    }
                }
                (folded, origin)
            }
        };

        let mut ranges = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            let Some(byte_start) = haystack.find(token.as_str()) else {
                return vec![];
            };
            let start = haystack[..byte_start].chars().count();
            let len = token.chars().count();
            let first = origin[start];
            let last = origin[start + len - 1];
            ranges.push((first, last + 1));
        }

        ranges.sort_unstable();
        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
        for (start, end) in ranges {
            match merged.last_mut() {
                Some(prev) if start <= prev.1 => prev.1 = prev.1.max(end),
                _ => merged.push((start, end)),
            }
        }
        merged
    }
}

/// Filters `items` by `filter_text`, preserving their order.
///
/// `items` yields `(key, text)` pairs; the keys of matching entries are
/// returned. The function is pure and never reorders.
pub fn filter<K, S, I>(items: I, filter_text: &str, mode: FilterMode) -> Vec<K>
where
    I: IntoIterator<Item = (K, S)>,
    S: AsRef<str>,
{
    let matcher = Matcher::new(filter_text, mode);

    let _span = tracing::trace_span!("filter", tokens = matcher.tokens.len(), mode = ?mode).entered();

    items
        .into_iter()
        .filter(|(_, text)| matcher.matches(text.as_ref()))
        .map(|(key, _)| key)
        .collect()
}

/// Lower-cases codepoint by codepoint so item text and tokens fold the same way.
fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(items: &[&str], filter_text: &str, mode: FilterMode) -> Vec<usize> {
        filter(items.iter().copied().enumerate(), filter_text, mode)
    }

    #[test]
    fn empty_filter_matches_everything_in_order() {
        let items = ["b", "a", "", "c"];
        assert_eq!(run(&items, "", FilterMode::CaseSensitive), vec![0, 1, 2, 3]);
        assert_eq!(run(&items, "  \t ", FilterMode::CaseInsensitive), vec![0, 1, 2, 3]);
    }

    #[test]
    fn every_token_must_match() {
        let items = ["foobar", "foo", "bar baz", "xyz"];
        assert_eq!(run(&items, "foo bar", FilterMode::CaseInsensitive), vec![0]);
        assert_eq!(run(&items, "bar", FilterMode::CaseInsensitive), vec![0, 2]);
    }

    #[test]
    fn consecutive_whitespace_does_not_produce_empty_tokens() {
        let matcher = Matcher::new("  foo   bar ", FilterMode::CaseSensitive);
        assert_eq!(matcher.tokens(), ["foo", "bar"]);
    }

    #[test]
    fn case_sensitivity_follows_mode() {
        let items = ["Firefox", "firefox", "FIREFOX"];
        assert_eq!(run(&items, "fire", FilterMode::CaseSensitive), vec![1]);
        assert_eq!(run(&items, "FiRe", FilterMode::CaseInsensitive), vec![0, 1, 2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = ["alpha", "beta", "gamma", "delta"];
        let once = run(&items, "ta", FilterMode::CaseInsensitive);
        let narrowed: Vec<(usize, &str)> = once.iter().map(|&i| (i, items[i])).collect();
        let twice = filter(narrowed, "ta", FilterMode::CaseInsensitive);
        assert_eq!(once, twice);
    }

    #[test]
    fn match_ranges_cover_each_token_once() {
        let matcher = Matcher::new("ba fo", FilterMode::CaseSensitive);
        assert_eq!(matcher.match_ranges("foobar"), vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn match_ranges_merge_overlaps() {
        let matcher = Matcher::new("oob bar", FilterMode::CaseSensitive);
        assert_eq!(matcher.match_ranges("foobar"), vec![(1, 6)]);
    }

    #[test]
    fn match_ranges_use_codepoint_indices() {
        let matcher = Matcher::new("ÉT", FilterMode::CaseInsensitive);
        assert_eq!(matcher.match_ranges("café-été"), vec![(5, 7)]);
    }

    #[test]
    fn match_ranges_empty_when_no_match() {
        let matcher = Matcher::new("zz", FilterMode::CaseSensitive);
        assert!(matcher.match_ranges("foobar").is_empty());
    }
}
