//! Fixture and suggestion type definitions.
//!
//! This module defines the data model shared by the validator, the
//! analyzer and the fixture compiler. Wire names follow the JSON documents
//! produced and consumed by exploration runs (camelCase keys and enum
//! values).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Version written into every generated fixture document.
pub const FIXTURE_FORMAT_VERSION: &str = "1.0";

/// Meaning of an input field, usable as a `semantic:<type>` pattern or as a
/// key of the `defaults` table.
///
/// # Examples
///
/// ```
/// use explore_fixtures_core::SemanticType;
///
/// assert_eq!(SemanticType::parse("creditCard"), Some(SemanticType::CreditCard));
/// assert_eq!(SemanticType::ZipCode.as_str(), "zipCode");
/// assert_eq!(SemanticType::parse("shoeSize"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticType {
    Email,
    Password,
    Phone,
    Url,
    CreditCard,
    ZipCode,
    Name,
    Address,
    City,
    State,
    Country,
    Username,
    Search,
    Date,
    Number,
}

/// Keyword table used to infer a semantic type from a field identifier.
///
/// Order is significant: the first keyword contained in the lowercased
/// identifier wins, so `phoneNumber` resolves to `phone`, not `number`.
const KEYWORDS: &[(&str, SemanticType)] = &[
    ("email", SemanticType::Email),
    ("password", SemanticType::Password),
    ("phone", SemanticType::Phone),
    ("url", SemanticType::Url),
    ("card", SemanticType::CreditCard),
    ("credit", SemanticType::CreditCard),
    ("zip", SemanticType::ZipCode),
    ("postal", SemanticType::ZipCode),
    ("name", SemanticType::Name),
    ("address", SemanticType::Address),
    ("city", SemanticType::City),
    ("state", SemanticType::State),
    ("country", SemanticType::Country),
    ("username", SemanticType::Username),
    ("search", SemanticType::Search),
    ("date", SemanticType::Date),
    ("number", SemanticType::Number),
];

impl SemanticType {
    /// Every semantic type, in vocabulary order.
    pub const ALL: [SemanticType; 15] = [
        Self::Email,
        Self::Password,
        Self::Phone,
        Self::Url,
        Self::CreditCard,
        Self::ZipCode,
        Self::Name,
        Self::Address,
        Self::City,
        Self::State,
        Self::Country,
        Self::Username,
        Self::Search,
        Self::Date,
        Self::Number,
    ];

    /// Wire name of the type (`"creditCard"`, `"zipCode"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::CreditCard => "creditCard",
            Self::ZipCode => "zipCode",
            Self::Name => "name",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::Username => "username",
            Self::Search => "search",
            Self::Date => "date",
            Self::Number => "number",
        }
    }

    /// Parses a wire name. Matching is exact (case-sensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == raw)
    }

    /// Infers a semantic type from free text such as a field identifier,
    /// placeholder or label.
    ///
    /// Matching is a case-insensitive substring search against a fixed
    /// keyword table; the first keyword in table order wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use explore_fixtures_core::SemanticType;
    ///
    /// assert_eq!(SemanticType::infer("userEmail"), Some(SemanticType::Email));
    /// assert_eq!(SemanticType::infer("phoneNumber"), Some(SemanticType::Phone));
    /// assert_eq!(SemanticType::infer("apartmentNumber"), Some(SemanticType::Number));
    /// assert_eq!(SemanticType::infer("notes"), None);
    /// ```
    pub fn infer(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, ty)| *ty)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last-resort value strategy applied when no fixture entry matches a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackMode {
    /// Ask the model to generate a plausible value (the default).
    #[default]
    AiGenerated,
    /// Use the built-in value for the inferred semantic type.
    SemanticDefaults,
    /// Type a generic placeholder string.
    Generic,
    /// Fail the step instead of inventing a value.
    Strict,
}

impl FallbackMode {
    pub const ALL: [FallbackMode; 4] = [
        Self::AiGenerated,
        Self::SemanticDefaults,
        Self::Generic,
        Self::Strict,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AiGenerated => "aiGenerated",
            Self::SemanticDefaults => "semanticDefaults",
            Self::Generic => "generic",
            Self::Strict => "strict",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == raw)
    }
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of a value typed during exploration.
///
/// Parsed once from the `valueSource.type` wire string. Strings outside the
/// known vocabulary are kept verbatim in [`ValueSource::Unrecognized`] so
/// they survive a serialization round trip.
///
/// # Examples
///
/// ```
/// use explore_fixtures_core::ValueSource;
///
/// assert_eq!(ValueSource::from("fallback"), ValueSource::Fallback);
/// assert_eq!(
///     ValueSource::from("legacyImport"),
///     ValueSource::Unrecognized("legacyImport".into())
/// );
/// assert_eq!(ValueSource::FixtureSemantic.to_string(), "fixtureSemantic");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueSource {
    FixtureExact,
    EnvironmentVariable,
    FixturePattern,
    FixtureContext,
    FixtureSemantic,
    FixtureDefault,
    AiGenerated,
    Fallback,
    Unrecognized(String),
}

impl ValueSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FixtureExact => "fixtureExact",
            Self::EnvironmentVariable => "environmentVariable",
            Self::FixturePattern => "fixturePattern",
            Self::FixtureContext => "fixtureContext",
            Self::FixtureSemantic => "fixtureSemantic",
            Self::FixtureDefault => "fixtureDefault",
            Self::AiGenerated => "aiGenerated",
            Self::Fallback => "fallback",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for ValueSource {
    fn from(raw: &str) -> Self {
        match raw {
            "fixtureExact" => Self::FixtureExact,
            "environmentVariable" => Self::EnvironmentVariable,
            "fixturePattern" => Self::FixturePattern,
            "fixtureContext" => Self::FixtureContext,
            "fixtureSemantic" => Self::FixtureSemantic,
            "fixtureDefault" => Self::FixtureDefault,
            "aiGenerated" => Self::AiGenerated,
            "fallback" => Self::Fallback,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for ValueSource {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<ValueSource> for String {
    fn from(source: ValueSource) -> Self {
        match source {
            ValueSource::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently a suggestion should be promoted into a fixture.
///
/// Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted fixture document.
///
/// `patterns` maps a pattern key (see [`PatternKey`](crate::PatternKey)) to
/// the literal value typed into matching fields; `defaults` maps semantic
/// type names to values. Any other top-level keys are carried in `extra`.
///
/// # Examples
///
/// ```
/// use explore_fixtures_core::{FallbackMode, FixtureDocument};
///
/// let doc: FixtureDocument = serde_json::from_str(
///     r#"{"patterns": {"emailField": "qa@example.com"}, "fallbackMode": "strict"}"#,
/// )
/// .unwrap();
/// assert_eq!(doc.patterns["emailField"], "qa@example.com");
/// assert_eq!(doc.fallback_mode, FallbackMode::Strict);
/// assert!(doc.defaults.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub patterns: BTreeMap<String, String>,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    #[serde(default)]
    pub fallback_mode: FallbackMode,
    /// Top-level keys this model does not know about, kept so that
    /// rewriting a loaded document leaves them in place.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FixtureDocument {
    /// Creates an empty document stamped with [`FIXTURE_FORMAT_VERSION`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: Some(FIXTURE_FORMAT_VERSION.to_string()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Adds a pattern entry.
    pub fn with_pattern(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.patterns.insert(key.into(), value.into());
        self
    }

    /// Adds a semantic default.
    pub fn with_default(mut self, ty: SemanticType, value: impl Into<String>) -> Self {
        self.defaults.insert(ty.as_str().to_string(), value.into());
        self
    }
}

/// A candidate fixture entry derived from exploration logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSuggestion {
    /// Identifier of the UI element the value was typed into.
    pub field_id: String,
    /// First value observed for the field.
    pub value: String,
    /// Pattern key proposed for the fixture.
    pub pattern_suggestion: String,
    pub priority: Priority,
    /// Provenance of the value that triggered the suggestion.
    pub source: ValueSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<String>,
    /// Number of qualifying occurrences across all analyzed logs.
    pub frequency: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_type_wire_names_roundtrip() {
        for ty in SemanticType::ALL {
            assert_eq!(SemanticType::parse(ty.as_str()), Some(ty));
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn test_infer_is_case_insensitive_and_ordered() {
        assert_eq!(SemanticType::infer("EMAIL_INPUT"), Some(SemanticType::Email));
        assert_eq!(SemanticType::infer("cardHolder"), Some(SemanticType::CreditCard));
        assert_eq!(SemanticType::infer("postalCode"), Some(SemanticType::ZipCode));
        // "username" contains "name", which is declared first.
        assert_eq!(SemanticType::infer("username"), Some(SemanticType::Name));
        assert_eq!(SemanticType::infer("updateDate"), Some(SemanticType::Date));
        assert_eq!(SemanticType::infer("comment"), None);
    }

    #[test]
    fn test_fallback_mode_parse_and_default() {
        assert_eq!(FallbackMode::default(), FallbackMode::AiGenerated);
        assert_eq!(
            FallbackMode::parse("semanticDefaults"),
            Some(FallbackMode::SemanticDefaults)
        );
        assert_eq!(FallbackMode::parse("AIGenerated"), None);
    }

    #[test]
    fn test_value_source_serde_keeps_unrecognized_string() {
        let source: ValueSource = serde_json::from_str("\"manualEntry\"").unwrap();
        assert_eq!(source, ValueSource::Unrecognized("manualEntry".to_string()));
        assert_eq!(serde_json::to_string(&source).unwrap(), "\"manualEntry\"");

        let known: ValueSource = serde_json::from_str("\"environmentVariable\"").unwrap();
        assert_eq!(known, ValueSource::EnvironmentVariable);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_fixture_document_serializes_camel_case() {
        let doc = FixtureDocument::new("login")
            .with_pattern("semantic:email", "qa@example.com")
            .with_default(SemanticType::Email, "qa@example.com");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["fallbackMode"], "aiGenerated");
        assert_eq!(json["version"], FIXTURE_FORMAT_VERSION);
        assert!(json.get("description").is_none());
        assert!(json.get("extra").is_none());
    }

    #[test]
    fn test_fixture_document_keeps_unknown_top_level_keys() {
        let raw = r#"{"patterns": {"promo": "SAVE5"}, "fallbackMode": "strict",
            "metadata": {"owner": "qa-team"}, "environment": "staging"}"#;
        let doc: FixtureDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.patterns["promo"], "SAVE5");
        assert_eq!(doc.extra.len(), 2);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["metadata"]["owner"], "qa-team");
        assert_eq!(json["environment"], "staging");
        assert_eq!(json["fallbackMode"], "strict");
    }
}
