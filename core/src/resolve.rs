//! Resolving fixture values for a concrete field.
//!
//! Mirrors how a fixture is consumed during exploration: the most specific
//! matching entry supplies the value, and its provenance is reported as a
//! [`ValueSource`]. Precedence, highest first:
//!
//! 1. exact field id ([`ValueSource::FixtureExact`], or
//!    [`ValueSource::EnvironmentVariable`] when the value references `${VAR}`)
//! 2. `screen:<screen>|field:<field>` ([`ValueSource::FixtureContext`])
//! 3. `pattern:` keys ([`ValueSource::FixturePattern`])
//! 4. `semantic:<type>` ([`ValueSource::FixtureSemantic`])
//! 5. `defaults[<type>]` ([`ValueSource::FixtureDefault`])
//!
//! # Example
//!
//! ```
//! use explore_fixtures_core::*;
//!
//! let doc = FixtureDocument::new("login")
//!     .with_pattern("pattern:contains:mail", "qa@example.com")
//!     .with_default(SemanticType::Phone, "555-0100");
//! let resolver = FixtureResolver::new(&doc).unwrap();
//!
//! let hit = resolver.resolve(&FieldContext::new("workMailInput"));
//! assert_eq!(
//!     hit,
//!     Resolution::Resolved {
//!         value: "qa@example.com".into(),
//!         source: ValueSource::FixturePattern,
//!         matched_key: "pattern:contains:mail".into(),
//!     }
//! );
//!
//! let miss = resolver.resolve(&FieldContext::new("notes"));
//! assert_eq!(miss, Resolution::Unresolved(FallbackMode::AiGenerated));
//! ```

use std::collections::BTreeMap;

use crate::pattern::{PatternError, PatternKey, env_references, expand_env_references};
use crate::{FallbackMode, FixtureDocument, SemanticType, ValueSource};

/// What is known about the field being filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldContext {
    pub field_id: String,
    pub placeholder: Option<String>,
    pub label: Option<String>,
    pub screen_type: Option<String>,
}

impl FieldContext {
    pub fn new(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            ..Self::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_screen(mut self, screen_type: impl Into<String>) -> Self {
        self.screen_type = Some(screen_type.into());
        self
    }

    /// Semantic type inferred from the field id, then placeholder, then label.
    pub fn inferred_type(&self) -> Option<SemanticType> {
        SemanticType::infer(&self.field_id)
            .or_else(|| self.placeholder.as_deref().and_then(SemanticType::infer))
            .or_else(|| self.label.as_deref().and_then(SemanticType::infer))
    }
}

/// Result of resolving one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        value: String,
        source: ValueSource,
        matched_key: String,
    },
    /// No entry matched; the caller applies the document's fallback mode.
    Unresolved(FallbackMode),
}

/// Compiled view of a fixture document.
#[derive(Debug, Clone)]
pub struct FixtureResolver {
    exact: BTreeMap<String, String>,
    contextual: Vec<(String, String, String, String)>,
    patterns: Vec<(PatternKey, String, String)>,
    semantic: BTreeMap<SemanticType, (String, String)>,
    defaults: BTreeMap<String, String>,
    fallback_mode: FallbackMode,
}

impl FixtureResolver {
    /// Compiles every pattern key of `doc`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] encountered, in key order.
    pub fn new(doc: &FixtureDocument) -> Result<Self, PatternError> {
        let mut resolver = Self {
            exact: BTreeMap::new(),
            contextual: Vec::new(),
            patterns: Vec::new(),
            semantic: BTreeMap::new(),
            defaults: doc.defaults.clone(),
            fallback_mode: doc.fallback_mode,
        };

        for (key, value) in &doc.patterns {
            match PatternKey::parse(key)? {
                PatternKey::Exact(id) => {
                    resolver.exact.insert(id, value.clone());
                }
                PatternKey::Screen { screen, field } => {
                    resolver
                        .contextual
                        .push((screen, field, key.clone(), value.clone()));
                }
                PatternKey::Semantic(ty) => {
                    resolver.semantic.insert(ty, (key.clone(), value.clone()));
                }
                other => resolver.patterns.push((other, key.clone(), value.clone())),
            }
        }

        Ok(resolver)
    }

    /// Resolves a field using the process environment for `${VAR}` expansion.
    pub fn resolve(&self, field: &FieldContext) -> Resolution {
        self.resolve_with_env(field, |name| std::env::var(name).ok())
    }

    pub fn resolve_with_env(
        &self,
        field: &FieldContext,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Resolution {
        if let Some(value) = self.exact.get(&field.field_id) {
            let source = if env_references(value).is_empty() {
                ValueSource::FixtureExact
            } else {
                ValueSource::EnvironmentVariable
            };
            return resolved(expand_env_references(value, &lookup), source, &field.field_id);
        }

        if let Some(screen_type) = field.screen_type.as_deref() {
            let hit = self
                .contextual
                .iter()
                .find(|(screen, name, _, _)| screen == screen_type && *name == field.field_id);
            if let Some((_, _, key, value)) = hit {
                return resolved(
                    expand_env_references(value, &lookup),
                    ValueSource::FixtureContext,
                    key,
                );
            }
        }

        let lower_id = field.field_id.to_lowercase();
        for (pattern, key, value) in &self.patterns {
            let matched = match pattern {
                PatternKey::Contains(text) => lower_id.contains(&text.to_lowercase()),
                PatternKey::Regex(re) => re.is_match(&field.field_id),
                PatternKey::Placeholder(text) => {
                    field.placeholder.as_deref() == Some(text.as_str())
                }
                PatternKey::Label(text) => field.label.as_deref() == Some(text.as_str()),
                _ => false,
            };
            if matched {
                return resolved(
                    expand_env_references(value, &lookup),
                    ValueSource::FixturePattern,
                    key,
                );
            }
        }

        if let Some(ty) = field.inferred_type() {
            if let Some((key, value)) = self.semantic.get(&ty) {
                return resolved(
                    expand_env_references(value, &lookup),
                    ValueSource::FixtureSemantic,
                    key,
                );
            }
            if let Some(value) = self.defaults.get(ty.as_str()) {
                return resolved(
                    expand_env_references(value, &lookup),
                    ValueSource::FixtureDefault,
                    ty.as_str(),
                );
            }
        }

        Resolution::Unresolved(self.fallback_mode)
    }
}

fn resolved(value: String, source: ValueSource, key: &str) -> Resolution {
    Resolution::Resolved {
        value,
        source,
        matched_key: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FixtureDocument {
        let mut doc = FixtureDocument::new("sample")
            .with_pattern("loginPassword", "${APP_PASSWORD}")
            .with_pattern("emailField", "exact@example.com")
            .with_pattern("screen:signup|field:emailField", "context@example.com")
            .with_pattern("screen:checkout|field:cardNumber", "4111111111111111")
            .with_pattern("pattern:regex:^promo[A-Z]", "SAVE10")
            .with_pattern("pattern:placeholder:Your city", "Springfield")
            .with_pattern("semantic:phone", "555-0100")
            .with_default(SemanticType::Country, "Freedonia");
        doc.fallback_mode = FallbackMode::Strict;
        doc
    }

    fn source_of(resolution: &Resolution) -> Option<&ValueSource> {
        match resolution {
            Resolution::Resolved { source, .. } => Some(source),
            Resolution::Unresolved(_) => None,
        }
    }

    #[test]
    fn test_exact_match_beats_screen_context() {
        let resolver = FixtureResolver::new(&sample()).unwrap();
        let field = FieldContext::new("emailField").with_screen("signup");
        let hit = resolver.resolve_with_env(&field, |_| None);
        assert_eq!(source_of(&hit), Some(&ValueSource::FixtureExact));
    }

    #[test]
    fn test_env_reference_is_expanded() {
        let resolver = FixtureResolver::new(&sample()).unwrap();
        let hit = resolver.resolve_with_env(&FieldContext::new("loginPassword"), |name| {
            (name == "APP_PASSWORD").then(|| "hunter2".to_string())
        });
        assert_eq!(
            hit,
            Resolution::Resolved {
                value: "hunter2".to_string(),
                source: ValueSource::EnvironmentVariable,
                matched_key: "loginPassword".to_string(),
            }
        );
    }

    #[test]
    fn test_screen_context_requires_matching_screen() {
        let resolver = FixtureResolver::new(&sample()).unwrap();
        let on_checkout = FieldContext::new("cardNumber").with_screen("checkout");
        assert_eq!(
            source_of(&resolver.resolve_with_env(&on_checkout, |_| None)),
            Some(&ValueSource::FixtureContext)
        );
        let elsewhere = FieldContext::new("cardNumber").with_screen("profile");
        assert_eq!(
            resolver.resolve_with_env(&elsewhere, |_| None),
            Resolution::Unresolved(FallbackMode::Strict)
        );
    }

    #[test]
    fn test_pattern_forms() {
        let resolver = FixtureResolver::new(&sample()).unwrap();
        assert_eq!(
            source_of(&resolver.resolve_with_env(&FieldContext::new("promoCode"), |_| None)),
            Some(&ValueSource::FixturePattern)
        );
        let by_placeholder = FieldContext::new("field7").with_placeholder("Your city");
        match resolver.resolve_with_env(&by_placeholder, |_| None) {
            Resolution::Resolved { value, .. } => assert_eq!(value, "Springfield"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_semantic_then_defaults() {
        let resolver = FixtureResolver::new(&sample()).unwrap();
        let phone = FieldContext::new("contactPhone");
        assert_eq!(
            source_of(&resolver.resolve_with_env(&phone, |_| None)),
            Some(&ValueSource::FixtureSemantic)
        );
        let country = FieldContext::new("field3").with_label("Country of residence");
        assert_eq!(
            resolver.resolve_with_env(&country, |_| None),
            Resolution::Resolved {
                value: "Freedonia".to_string(),
                source: ValueSource::FixtureDefault,
                matched_key: "country".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_key_fails_compilation() {
        let doc = FixtureDocument::new("bad").with_pattern("semantic:shoeSize", "42");
        assert!(FixtureResolver::new(&doc).is_err());
    }
}
