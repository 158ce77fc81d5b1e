//! File workflows for exploration logs and fixture documents.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use explore_fixtures_core::{
    FallbackMode, FixtureDocument, FixtureSuggestion, SemanticType, ValidationError,
    ValidationResult, merge_into_fixture, validate_fixture,
};
use tracing::debug;

/// Typed error for fixture file operations.
#[derive(Debug, thiserror::Error)]
pub enum FixtureFileError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The fixture file does not exist.
    #[error("fixture file not found: {0}")]
    NotFound(String),

    /// Refusing to replace an existing file.
    #[error("'{0}' already exists (use --force to overwrite)")]
    AlreadyExists(String),
}

/// Lists `.json` files directly inside `dir`, sorted by path.
pub fn collect_log_paths(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension() == Some(OsStr::new("json")) {
            paths.push(path);
        }
    }
    paths.sort();
    debug!(dir = %dir.display(), count = paths.len(), "collected exploration logs");
    Ok(paths)
}

/// Reads and validates a fixture file.
///
/// A missing, unreadable or unparsable file yields a result with exactly
/// one error and no further checks.
pub fn validate_fixture_file(path: &Path, strict: bool) -> ValidationResult {
    if !path.exists() {
        return ValidationResult::failure(
            ValidationError::FileNotFound(path.display().to_string()),
            strict,
        );
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            return ValidationResult::failure(
                ValidationError::Unreadable {
                    path: path.display().to_string(),
                    reason: err.to_string(),
                },
                strict,
            );
        }
    };

    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(doc) => validate_fixture(&doc, strict),
        Err(err) => {
            ValidationResult::failure(ValidationError::InvalidJson(err.to_string()), strict)
        }
    }
}

/// Loads a fixture document.
pub fn load_fixture(path: &Path) -> Result<FixtureDocument, FixtureFileError> {
    if !path.exists() {
        return Err(FixtureFileError::NotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Loads an existing fixture and adds suggestions without replacing any
/// entry it already contains.
pub fn merge_into_fixture_file(
    suggestions: &[FixtureSuggestion],
    path: &Path,
) -> Result<FixtureDocument, FixtureFileError> {
    let existing = load_fixture(path)?;
    let before = existing.patterns.len();
    let merged = merge_into_fixture(existing, suggestions);
    debug!(
        path = %path.display(),
        added = merged.patterns.len() - before,
        "merged suggestions into fixture"
    );
    Ok(merged)
}

/// Writes `contents` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<(), FixtureFileError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Writes a fixture as pretty-printed JSON, creating parent directories.
pub fn write_fixture(doc: &FixtureDocument, path: &Path) -> Result<(), FixtureFileError> {
    let mut raw = serde_json::to_string_pretty(doc)?;
    raw.push('\n');
    write_output(path, &raw)
}

/// A starter fixture showing each key form. It validates without errors
/// or warnings.
pub fn starter_fixture(name: &str) -> FixtureDocument {
    let mut doc = FixtureDocument::new(name)
        .with_pattern("loginEmailField", "qa@example.com")
        .with_pattern("pattern:contains:search", "coffee")
        .with_pattern("pattern:regex:^promo(Code)?$", "WELCOME10")
        .with_pattern("pattern:placeholder:Enter your city", "Springfield")
        .with_pattern("pattern:label:Full name", "Alex Example")
        .with_pattern("semantic:phone", "555-0100")
        .with_pattern("screen:checkout|field:cardNumber", "4111111111111111")
        .with_default(SemanticType::Email, "qa@example.com")
        .with_default(SemanticType::ZipCode, "94105")
        .with_default(SemanticType::Country, "United States");
    doc.description = Some(
        "Values typed into matching fields during exploration. Values may reference environment variables as ${NAME}."
            .to_string(),
    );
    doc.fallback_mode = FallbackMode::AiGenerated;
    doc
}
