//! Fixture document validation.
//!
//! Checks a fixture document against the pattern-key grammar, its
//! structural schema and value-level constraints. Problems that would break
//! a test run are reported as [`ValidationError`]s; advisory findings are
//! [`ValidationWarning`]s. Validation never stops at the first problem: every
//! entry is inspected and every finding collected.
//!
//! # Examples
//!
//! ```
//! use explore_fixtures_core::validate_fixture;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "version": "1.0",
//!     "patterns": { "semantic:email": "qa@example.com" },
//!     "defaults": { "email": "qa@example.com" },
//!     "fallbackMode": "aiGenerated"
//! });
//! let result = validate_fixture(&doc, false);
//! assert!(result.is_valid());
//! assert!(result.errors.is_empty());
//!
//! // Unknown semantic type is an error
//! let bad = json!({ "patterns": { "semantic:shoeSize": "42" } });
//! assert!(!validate_fixture(&bad, false).is_valid());
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::pattern::{PatternError, PatternKey, env_references};
use crate::{FallbackMode, FixtureDocument, SemanticType};

/// Build-breaking fixture problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The fixture file does not exist.
    #[error("fixture file not found: {0}")]
    FileNotFound(String),
    /// The fixture file exists but could not be read.
    #[error("failed to read fixture file '{path}': {reason}")]
    Unreadable { path: String, reason: String },
    /// The content is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    /// The JSON root is not an object.
    #[error("fixture root must be a JSON object")]
    InvalidRoot,
    /// The mandatory `patterns` table is absent.
    #[error("missing required field 'patterns'")]
    MissingPatterns,
    #[error("'patterns' must be an object mapping pattern keys to values")]
    PatternsNotObject,
    #[error("value for pattern '{0}' must be a string")]
    NonStringPatternValue(String),
    #[error("'defaults' must be an object mapping semantic types to values")]
    DefaultsNotObject,
    #[error("value for default '{0}' must be a string")]
    NonStringDefaultValue(String),
    /// A `patterns` key violates the grammar.
    #[error("{0}")]
    InvalidPattern(#[from] PatternError),
    #[error("invalid fallbackMode '{0}' (expected one of: aiGenerated, semanticDefaults, generic, strict)")]
    InvalidFallbackMode(String),
}

/// Advisory fixture findings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationWarning {
    #[error("missing 'version' field")]
    MissingVersion,
    #[error("'patterns' is empty; this fixture will have no effect")]
    EmptyPatterns,
    #[error("missing 'defaults' field")]
    MissingDefaults,
    #[error("missing 'fallbackMode' field; aiGenerated will be used")]
    MissingFallbackMode,
    /// A value references `${NAME}` and `NAME` is not set.
    #[error("environment variable '{var}' referenced by '{key}' is not set")]
    UnsetEnvironmentVariable { key: String, var: String },
    /// A `defaults` key is not a recognized semantic type.
    #[error("unknown semantic type '{0}' in defaults")]
    UnknownDefaultType(String),
}

/// Outcome of validating one fixture document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    /// In strict mode warnings also invalidate the document.
    pub strict: bool,
}

impl ValidationResult {
    /// Creates a result holding a single short-circuit error.
    pub fn failure(error: ValidationError, strict: bool) -> Self {
        Self {
            errors: vec![error],
            warnings: Vec::new(),
            strict,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && (!self.strict || self.warnings.is_empty())
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Validates a parsed fixture document against the process environment.
pub fn validate_fixture(doc: &Value, strict: bool) -> ValidationResult {
    validate_fixture_with_env(doc, strict, |name| std::env::var_os(name).is_some())
}

/// Validates a typed fixture document.
///
/// Documents built by [`generate_fixture`](crate::generate_fixture) always
/// pass with zero errors.
pub fn validate_document(doc: &FixtureDocument, strict: bool) -> ValidationResult {
    match serde_json::to_value(doc) {
        Ok(value) => validate_fixture(&value, strict),
        Err(err) => {
            ValidationResult::failure(ValidationError::InvalidJson(err.to_string()), strict)
        }
    }
}

/// Validates a parsed fixture document.
///
/// `env_is_set` reports whether an environment variable exists; it is
/// consulted for every `${NAME}` reference in `patterns` and `defaults`
/// values.
pub fn validate_fixture_with_env(
    doc: &Value,
    strict: bool,
    env_is_set: impl Fn(&str) -> bool,
) -> ValidationResult {
    let mut result = ValidationResult {
        strict,
        ..ValidationResult::default()
    };

    let Some(root) = doc.as_object() else {
        result.errors.push(ValidationError::InvalidRoot);
        return result;
    };

    if !root.contains_key("version") {
        result.warnings.push(ValidationWarning::MissingVersion);
    }

    match root.get("patterns") {
        None => result.errors.push(ValidationError::MissingPatterns),
        Some(Value::Object(patterns)) => {
            if patterns.is_empty() {
                result.warnings.push(ValidationWarning::EmptyPatterns);
            }
            for (key, value) in patterns {
                if let Err(err) = PatternKey::parse(key) {
                    result.errors.push(err.into());
                }
                match value.as_str() {
                    Some(text) => check_env_references(key, text, &env_is_set, &mut result),
                    None => result
                        .errors
                        .push(ValidationError::NonStringPatternValue(key.clone())),
                }
            }
        }
        Some(_) => result.errors.push(ValidationError::PatternsNotObject),
    }

    match root.get("defaults") {
        None => result.warnings.push(ValidationWarning::MissingDefaults),
        Some(Value::Object(defaults)) => {
            for (key, value) in defaults {
                if SemanticType::parse(key).is_none() {
                    result
                        .warnings
                        .push(ValidationWarning::UnknownDefaultType(key.clone()));
                }
                match value.as_str() {
                    Some(text) => check_env_references(key, text, &env_is_set, &mut result),
                    None => result
                        .errors
                        .push(ValidationError::NonStringDefaultValue(key.clone())),
                }
            }
        }
        Some(_) => result.errors.push(ValidationError::DefaultsNotObject),
    }

    match root.get("fallbackMode") {
        None => result.warnings.push(ValidationWarning::MissingFallbackMode),
        Some(Value::String(mode)) => {
            if FallbackMode::parse(mode).is_none() {
                result
                    .errors
                    .push(ValidationError::InvalidFallbackMode(mode.clone()));
            }
        }
        Some(other) => result
            .errors
            .push(ValidationError::InvalidFallbackMode(other.to_string())),
    }

    result
}

fn check_env_references(
    key: &str,
    value: &str,
    env_is_set: &impl Fn(&str) -> bool,
    result: &mut ValidationResult,
) {
    for var in env_references(value) {
        if !env_is_set(var) {
            result
                .warnings
                .push(ValidationWarning::UnsetEnvironmentVariable {
                    key: key.to_string(),
                    var: var.to_string(),
                });
        }
    }
}
