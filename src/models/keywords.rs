//! Relevance keywords.
//!
//! Keywords come from configuration as plain strings. A trailing `*` asks for
//! prefix matching (`ракет*` matches `ракета`, `ракети`, ...). Everything else
//! in a keyword is literal text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single relevance keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword {
    term: String,
    prefix: bool,
}

impl Keyword {
    /// Parses one configured keyword.
    ///
    /// Returns `None` when nothing searchable remains after trimming and
    /// stripping the prefix marker.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let without_marker = trimmed.trim_end_matches('*');
        let prefix = without_marker.len() != trimmed.len();
        let term = without_marker.trim();

        if !term.chars().any(char::is_alphanumeric) {
            return None;
        }

        Some(Self {
            term: term.to_string(),
            prefix,
        })
    }

    /// The literal term, without the prefix marker.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether the term matches as a prefix.
    #[must_use]
    pub const fn is_prefix(&self) -> bool {
        self.prefix
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix {
            write!(f, "{}*", self.term)
        } else {
            f.write_str(&self.term)
        }
    }
}

/// Ordered, de-duplicated keyword list used by relevance queries.
///
/// An empty set is valid and means "no filter available".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    /// Creates an empty keyword set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keywords: Vec::new(),
        }
    }

    /// Builds a keyword set from raw configured strings.
    ///
    /// Unsearchable entries are dropped; repeated entries keep their first
    /// position.
    pub fn parse<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<Keyword> = Vec::new();
        for keyword in raw.into_iter().filter_map(|s| Keyword::parse(s.as_ref())) {
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        Self { keywords }
    }

    /// Returns true if there is nothing to match on.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Iterates keywords in configured order.
    pub fn iter(&self) -> std::slice::Iter<'_, Keyword> {
        self.keywords.iter()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a Keyword;
    type IntoIter = std::slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("NATO", "NATO", false ; "plain term")]
    #[test_case("  ракета  ", "ракета", false ; "trimmed")]
    #[test_case("удар*", "удар", true ; "prefix marker")]
    #[test_case("shell**", "shell", true ; "repeated marker")]
    #[test_case("Zelensk *", "Zelensk", true ; "space before marker")]
    #[test_case("air defense", "air defense", false ; "inner space kept")]
    fn test_keyword_parse(raw: &str, term: &str, prefix: bool) {
        let keyword = Keyword::parse(raw).unwrap();
        assert_eq!(keyword.term(), term);
        assert_eq!(keyword.is_prefix(), prefix);
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "whitespace")]
    #[test_case("*" ; "bare marker")]
    #[test_case("\"-:()" ; "punctuation only")]
    fn test_keyword_parse_rejects(raw: &str) {
        assert!(Keyword::parse(raw).is_none());
    }

    #[test]
    fn test_keyword_display() {
        assert_eq!(Keyword::parse("дрон*").unwrap().to_string(), "дрон*");
        assert_eq!(Keyword::parse("UAV").unwrap().to_string(), "UAV");
    }

    #[test]
    fn test_keyword_set_keeps_order_and_drops_duplicates() {
        let set = KeywordSet::parse(["фронт", "", "NATO", "фронт", " * ", "aid*"]);
        let rendered: Vec<String> = set.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["фронт", "NATO", "aid*"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_empty_keyword_set() {
        let set = KeywordSet::parse(Vec::<String>::new());
        assert!(set.is_empty());
        assert_eq!(set, KeywordSet::new());
    }
}
