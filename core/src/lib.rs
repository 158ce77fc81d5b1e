//! Core fixture types, pattern grammar, validation and compilation.
//!
//! This crate holds the I/O-free model behind exploration fixtures:
//!
//! - [`FixtureDocument`]: the persisted fixture (patterns, semantic
//!   defaults, fallback mode).
//! - [`PatternKey`]: the key grammar of the `patterns` table (exact ids,
//!   `pattern:*`, `semantic:*` and `screen:*|field:*` forms).
//! - [`FixtureSuggestion`]: a candidate entry mined from exploration logs,
//!   with its [`Priority`] and [`ValueSource`] provenance.
//!
//! Validation ([`validate_fixture`], [`validate_document`]) reports grammar,
//! schema and value problems as errors and advisory warnings.
//!
//! Compilation ([`generate_fixture`], [`merge_into_fixture`]) turns ranked
//! suggestions into a fixture document, never overwriting existing entries
//! when merging.
//!
//! Resolution ([`FixtureResolver`]) answers which value a field would
//! receive from a fixture, and why.
//!
//! # Example
//!
//! ```
//! use explore_fixtures_core::*;
//!
//! let doc = FixtureDocument::new("checkout")
//!     .with_pattern("semantic:zipCode", "94105")
//!     .with_pattern("screen:payment|field:cardNumber", "4111111111111111")
//!     .with_default(SemanticType::ZipCode, "94105");
//!
//! let result = validate_document(&doc, false);
//! assert!(result.is_valid());
//!
//! let resolver = FixtureResolver::new(&doc).unwrap();
//! let field = FieldContext::new("cardNumber").with_screen("payment");
//! assert!(matches!(
//!     resolver.resolve(&field),
//!     Resolution::Resolved { source: ValueSource::FixtureContext, .. }
//! ));
//! ```

mod merge;
mod pattern;
mod resolve;
mod types;
mod validate;

pub use merge::{generate_fixture, merge_into_fixture};
pub use pattern::{
    PatternError, PatternKey, PatternKind, env_references, expand_env_references,
    has_reserved_prefix,
};
pub use resolve::{FieldContext, FixtureResolver, Resolution};
pub use types::*;
pub use validate::{
    ValidationError, ValidationResult, ValidationWarning, validate_document, validate_fixture,
    validate_fixture_with_env,
};
