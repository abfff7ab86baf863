//! Class token un-escaping.
//!
//! Menu editors reject `:` inside CSS class names, so utility classes such as
//! `hover:text-primary` are authored as `hover___text-primary`. The rules here
//! turn them back after every class source has been merged.

use regex_lite::Regex;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;

use crate::error::MergeError;

/// Default escaped sequence.
pub const DEFAULT_PATTERN: &str = "___";

/// Default replacement for [`DEFAULT_PATTERN`].
pub const DEFAULT_REPLACEMENT: &str = ":";

/// One regex substitution.
#[derive(Debug, Clone)]
pub struct UnescapeRule {
    pattern: Regex,
    replacement: String,
}

impl UnescapeRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, MergeError> {
        let regex = Regex::new(pattern).map_err(|e| MergeError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            pattern: regex,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    fn apply<'t>(&self, token: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(token, self.replacement.as_str())
    }
}

impl Serialize for UnescapeRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("UnescapeRule", 2)?;
        state.serialize_field("pattern", self.pattern())?;
        state.serialize_field("replacement", self.replacement())?;
        state.end()
    }
}

/// Replacement side of a pattern list.
///
/// A single string is shared by every pattern. A list pairs up with the
/// patterns by position: patterns past its end get the empty string and
/// surplus entries are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Replacement {
    Single(String),
    List(Vec<String>),
}

impl Default for Replacement {
    fn default() -> Self {
        Replacement::Single(DEFAULT_REPLACEMENT.to_string())
    }
}

impl Replacement {
    /// Replacement used by the pattern at `index`.
    pub fn for_pattern(&self, index: usize) -> &str {
        match self {
            Replacement::Single(s) => s,
            Replacement::List(items) => items.get(index).map(String::as_str).unwrap_or(""),
        }
    }
}

/// Ordered substitutions applied to every class token.
///
/// Rules run in sequence, each on the output of the previous one.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct UnescapeRules {
    rules: Vec<UnescapeRule>,
}

impl Default for UnescapeRules {
    fn default() -> Self {
        let rule = UnescapeRule {
            pattern: Regex::new(DEFAULT_PATTERN).expect("default pattern is a valid regex"),
            replacement: DEFAULT_REPLACEMENT.to_string(),
        };
        Self { rules: vec![rule] }
    }
}

impl UnescapeRules {
    /// Rules from explicit pattern/replacement pairs.
    pub fn new<P, R, I>(pairs: I) -> Result<Self, MergeError>
    where
        P: AsRef<str>,
        R: Into<String>,
        I: IntoIterator<Item = (P, R)>,
    {
        let rules = pairs
            .into_iter()
            .map(|(p, r)| UnescapeRule::new(p.as_ref(), r))
            .collect::<Result<Vec<_>, _>>()?;
        if rules.is_empty() {
            return Err(MergeError::NoPatterns);
        }
        Ok(Self { rules })
    }

    /// Rules from a pattern list and its replacement, see [`Replacement`].
    pub fn from_lists<P>(patterns: &[P], replacement: &Replacement) -> Result<Self, MergeError>
    where
        P: AsRef<str>,
    {
        if patterns.is_empty() {
            return Err(MergeError::NoPatterns);
        }

        Self::new(
            patterns
                .iter()
                .enumerate()
                .map(|(i, p)| (p.as_ref(), replacement.for_pattern(i).to_string())),
        )
    }

    pub fn rules(&self) -> &[UnescapeRule] {
        &self.rules
    }

    /// Un-escape one token.
    pub fn apply(&self, token: &str) -> String {
        let mut current = token.to_string();
        for rule in &self.rules {
            let replaced = match rule.apply(&current) {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = replaced {
                current = s;
            }
        }
        current
    }

    /// Un-escape a whole token list in one pass.
    pub fn apply_all(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().map(|t| self.apply(&t)).collect()
    }
}
