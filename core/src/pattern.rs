//! Fixture pattern-key grammar.
//!
//! A key in a fixture's `patterns` table takes one of these forms, selected
//! by prefix:
//!
//! | Form | Matches |
//! |------|---------|
//! | `<identifier>` | field id, literally |
//! | `pattern:contains:<text>` | field ids containing `<text>` |
//! | `pattern:regex:<expr>` | field ids matching `<expr>` |
//! | `pattern:placeholder:<text>` | fields whose placeholder is `<text>` |
//! | `pattern:label:<text>` | fields whose label is `<text>` |
//! | `semantic:<type>` | fields inferred as `<type>` |
//! | `screen:<screen>\|field:<name>` | field `<name>` on screen `<screen>` |
//!
//! Prefixes are checked in the order `pattern:regex:`, `semantic:`,
//! `screen:`, then the remaining `pattern:` sub-forms.
//!
//! # Examples
//!
//! ```
//! use explore_fixtures_core::{PatternKey, PatternKind, SemanticType};
//!
//! let key = PatternKey::parse("semantic:email").unwrap();
//! assert_eq!(key, PatternKey::Semantic(SemanticType::Email));
//!
//! let key = PatternKey::parse("screen:login|field:password").unwrap();
//! assert_eq!(key.kind(), PatternKind::Screen);
//!
//! assert!(PatternKey::parse("pattern:regex:[unclosed").is_err());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::SemanticType;

pub const REGEX_PREFIX: &str = "pattern:regex:";
pub const CONTAINS_PREFIX: &str = "pattern:contains:";
pub const PLACEHOLDER_PREFIX: &str = "pattern:placeholder:";
pub const LABEL_PREFIX: &str = "pattern:label:";
pub const PATTERN_PREFIX: &str = "pattern:";
pub const SEMANTIC_PREFIX: &str = "semantic:";
pub const SCREEN_PREFIX: &str = "screen:";
pub const FIELD_SEPARATOR: &str = "|field:";

static ENV_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex must compile")
});

/// Reasons a pattern key is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// `pattern:regex:` expression does not compile.
    #[error("invalid regex in pattern '{key}': {reason}")]
    InvalidRegex { key: String, reason: String },
    /// `semantic:` names a type outside the vocabulary.
    #[error("unknown semantic type '{ty}' in pattern '{key}'")]
    UnknownSemanticType { key: String, ty: String },
    /// `screen:` key without the `|field:` separator.
    #[error("screen pattern '{0}' must have the form screen:<screenType>|field:<fieldName>")]
    MissingFieldSeparator(String),
    /// `pattern:contains:` with nothing to search for.
    #[error("contains pattern '{0}' has an empty substring")]
    EmptyContains(String),
    /// `pattern:<kind>:` where `<kind>` is not a known sub-form.
    #[error("unknown pattern type in '{0}' (expected contains, regex, placeholder or label)")]
    UnknownPatternKind(String),
}

/// Grammar form of a key, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Exact,
    Contains,
    Regex,
    Placeholder,
    Label,
    Semantic,
    Screen,
}

/// A parsed pattern key.
#[derive(Debug, Clone)]
pub enum PatternKey {
    Exact(String),
    Contains(String),
    Regex(Regex),
    Placeholder(String),
    Label(String),
    Semantic(SemanticType),
    Screen { screen: String, field: String },
}

impl PatternKey {
    /// Parses and validates a key from a fixture's `patterns` table.
    pub fn parse(key: &str) -> Result<Self, PatternError> {
        if let Some(expr) = key.strip_prefix(REGEX_PREFIX) {
            return Regex::new(expr)
                .map(Self::Regex)
                .map_err(|err| PatternError::InvalidRegex {
                    key: key.to_string(),
                    reason: err.to_string(),
                });
        }

        if let Some(raw) = key.strip_prefix(SEMANTIC_PREFIX) {
            return SemanticType::parse(raw).map(Self::Semantic).ok_or_else(|| {
                PatternError::UnknownSemanticType {
                    key: key.to_string(),
                    ty: raw.to_string(),
                }
            });
        }

        if let Some(rest) = key.strip_prefix(SCREEN_PREFIX) {
            let (screen, field) = rest
                .split_once(FIELD_SEPARATOR)
                .ok_or_else(|| PatternError::MissingFieldSeparator(key.to_string()))?;
            return Ok(Self::Screen {
                screen: screen.to_string(),
                field: field.to_string(),
            });
        }

        if key.starts_with(PATTERN_PREFIX) {
            if let Some(text) = key.strip_prefix(CONTAINS_PREFIX) {
                if text.is_empty() {
                    return Err(PatternError::EmptyContains(key.to_string()));
                }
                return Ok(Self::Contains(text.to_string()));
            }
            if let Some(text) = key.strip_prefix(PLACEHOLDER_PREFIX) {
                return Ok(Self::Placeholder(text.to_string()));
            }
            if let Some(text) = key.strip_prefix(LABEL_PREFIX) {
                return Ok(Self::Label(text.to_string()));
            }
            return Err(PatternError::UnknownPatternKind(key.to_string()));
        }

        Ok(Self::Exact(key.to_string()))
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Exact(_) => PatternKind::Exact,
            Self::Contains(_) => PatternKind::Contains,
            Self::Regex(_) => PatternKind::Regex,
            Self::Placeholder(_) => PatternKind::Placeholder,
            Self::Label(_) => PatternKind::Label,
            Self::Semantic(_) => PatternKind::Semantic,
            Self::Screen { .. } => PatternKind::Screen,
        }
    }

    /// Renders the key back into its textual form.
    pub fn to_key(&self) -> String {
        match self {
            Self::Exact(id) => id.clone(),
            Self::Contains(text) => format!("{CONTAINS_PREFIX}{text}"),
            Self::Regex(re) => format!("{REGEX_PREFIX}{}", re.as_str()),
            Self::Placeholder(text) => format!("{PLACEHOLDER_PREFIX}{text}"),
            Self::Label(text) => format!("{LABEL_PREFIX}{text}"),
            Self::Semantic(ty) => format!("{SEMANTIC_PREFIX}{ty}"),
            Self::Screen { screen, field } => {
                format!("{SCREEN_PREFIX}{screen}{FIELD_SEPARATOR}{field}")
            }
        }
    }
}

impl PartialEq for PatternKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_key() == other.to_key()
    }
}

impl Eq for PatternKey {}

/// Returns `true` when `key` would not parse as an exact identifier.
pub fn has_reserved_prefix(key: &str) -> bool {
    key.starts_with(PATTERN_PREFIX)
        || key.starts_with(SEMANTIC_PREFIX)
        || key.starts_with(SCREEN_PREFIX)
}

/// Environment variable names referenced as `${NAME}` in a value, in order
/// of first appearance and without duplicates.
///
/// # Examples
///
/// ```
/// use explore_fixtures_core::env_references;
///
/// assert_eq!(env_references("${USER}:${TOKEN}@${USER}"), vec!["USER", "TOKEN"]);
/// assert!(env_references("$HOME").is_empty());
/// ```
pub fn env_references(value: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for caps in ENV_REFERENCE_RE.captures_iter(value) {
        if let Some(name) = caps.get(1).map(|m| m.as_str()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Replaces each `${NAME}` in `value` using `lookup`; references `lookup`
/// cannot resolve are left verbatim.
pub fn expand_env_references(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    ENV_REFERENCE_RE
        .replace_all(value, |caps: &regex::Captures<'_>| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_identifier() {
        let key = PatternKey::parse("loginEmailField").unwrap();
        assert_eq!(key, PatternKey::Exact("loginEmailField".to_string()));
        assert_eq!(key.kind(), PatternKind::Exact);
    }

    #[test]
    fn test_parse_pattern_sub_forms() {
        assert_eq!(
            PatternKey::parse("pattern:contains:email").unwrap().kind(),
            PatternKind::Contains
        );
        assert_eq!(
            PatternKey::parse("pattern:placeholder:Enter your email").unwrap(),
            PatternKey::Placeholder("Enter your email".to_string())
        );
        assert_eq!(
            PatternKey::parse("pattern:label:Email").unwrap(),
            PatternKey::Label("Email".to_string())
        );
        let regex = PatternKey::parse("pattern:regex:^user.*$").unwrap();
        assert_eq!(regex.kind(), PatternKind::Regex);
        assert_eq!(regex.to_key(), "pattern:regex:^user.*$");
    }

    #[test]
    fn test_parse_rejects_invalid_regex() {
        let err = PatternKey::parse("pattern:regex:([a-z]").unwrap_err();
        assert!(matches!(err, PatternError::InvalidRegex { .. }));
        assert!(err.to_string().contains("regex"));
    }

    #[test]
    fn test_parse_rejects_unknown_semantic_type() {
        let err = PatternKey::parse("semantic:shoeSize").unwrap_err();
        assert_eq!(
            err,
            PatternError::UnknownSemanticType {
                key: "semantic:shoeSize".to_string(),
                ty: "shoeSize".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_screen_requires_field_separator() {
        assert_eq!(
            PatternKey::parse("screen:login|field:email").unwrap(),
            PatternKey::Screen {
                screen: "login".to_string(),
                field: "email".to_string(),
            }
        );
        assert_eq!(
            PatternKey::parse("screen:login").unwrap_err(),
            PatternError::MissingFieldSeparator("screen:login".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_empty_contains_and_unknown_kind() {
        assert_eq!(
            PatternKey::parse("pattern:contains:").unwrap_err(),
            PatternError::EmptyContains("pattern:contains:".to_string())
        );
        assert_eq!(
            PatternKey::parse("pattern:prefix:user").unwrap_err(),
            PatternError::UnknownPatternKind("pattern:prefix:user".to_string())
        );
    }

    #[test]
    fn test_regex_prefix_is_checked_before_generic_pattern() {
        // A regex whose body looks like another form is still a regex.
        let key = PatternKey::parse("pattern:regex:semantic:.*").unwrap();
        assert_eq!(key.kind(), PatternKind::Regex);
    }

    #[test]
    fn test_expand_env_references_leaves_unknown_names() {
        let expanded = expand_env_references("${USER}/${MISSING}", |name| {
            (name == "USER").then(|| "qa".to_string())
        });
        assert_eq!(expanded, "qa/${MISSING}");
    }

    #[test]
    fn test_has_reserved_prefix() {
        assert!(has_reserved_prefix("semantic:email"));
        assert!(has_reserved_prefix("screen:x|field:y"));
        assert!(!has_reserved_prefix("emailField"));
    }
}
