//! Exploration log analysis and fixture file workflows.
//!
//! This crate turns recorded exploration runs into fixture suggestions and
//! manages fixture files on disk.
//!
//! # Main entry points
//!
//! - [`analyzer::analyze_log_dir`]: scan a directory of exploration logs and
//!   return ranked [`FixtureSuggestion`]s plus the files that were skipped.
//! - [`analyzer::analyze_logs`]: the same over already-parsed logs.
//! - [`files::validate_fixture_file`]: validate a fixture file on disk.
//! - [`files::merge_into_fixture_file`]: fold suggestions into an existing
//!   fixture without overwriting its entries.
//! - [`output`]: human-readable and JSON renderings.
//!
//! # Example
//!
//! ```
//! use explore_fixtures_analysis::analyzer::analyze_logs;
//! use explore_fixtures_analysis::log::ExplorationLog;
//! use explore_fixtures_analysis::output::format_as_json;
//! use explore_fixtures_core::{generate_fixture, validate_document};
//!
//! let log = ExplorationLog::from_json(r#"{"steps": [
//!     {"action": {"type": "type", "elementId": "userEmail", "value": "qa@example.com",
//!                 "valueSource": {"type": "aiGenerated"}}, "screenType": "login"}
//! ]}"#).unwrap();
//!
//! let suggestions = analyze_logs(&[log], 0.7);
//! assert_eq!(suggestions[0].pattern_suggestion, "semantic:email");
//! assert!(format_as_json(&suggestions).unwrap().contains("\"screenType\": \"login\""));
//!
//! let fixture = generate_fixture(&suggestions, "login");
//! assert!(validate_document(&fixture, false).is_valid());
//! ```
//!
//! [`FixtureSuggestion`]: explore_fixtures_core::FixtureSuggestion

pub mod analyzer;
pub mod confidence;
pub mod config;
pub mod files;
pub mod log;
pub mod merge;
pub mod output;
pub mod report;
