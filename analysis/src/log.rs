//! Exploration log documents.
//!
//! A log is a JSON object with a `steps` array. Only steps whose action is
//! `"type"` and which carry an element id, a value and a value source are
//! of interest to the analyzer; everything else is tolerated and ignored.

use explore_fixtures_core::ValueSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Action type of a text-entry step.
pub const TYPE_ACTION: &str = "type";

/// Reasons a whole log file is unusable.
#[derive(Debug, Error)]
pub enum LogParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("log root must be a JSON object")]
    NotAnObject,
    #[error("log has no 'steps' array")]
    MissingSteps,
}

/// The `valueSource` object of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSourceTag {
    #[serde(rename = "type", default)]
    pub kind: Option<ValueSource>,
}

/// The recorded UI interaction of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub element_id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub value_source: Option<ValueSourceTag>,
}

/// One recorded exploration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationStep {
    pub action: StepAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_type: Option<String>,
}

/// A text-entry step with every field the analyzer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedInput<'a> {
    pub element_id: &'a str,
    pub value: &'a str,
    pub source: &'a ValueSource,
    pub screen_type: Option<&'a str>,
}

impl ExplorationStep {
    /// Returns the step as a text entry, or `None` when it is another kind
    /// of action or lacks a required field.
    pub fn typed_input(&self) -> Option<TypedInput<'_>> {
        if self.action.kind != TYPE_ACTION {
            return None;
        }
        Some(TypedInput {
            element_id: self.action.element_id.as_deref()?,
            value: self.action.value.as_deref()?,
            source: self.action.value_source.as_ref()?.kind.as_ref()?,
            screen_type: self.screen_type.as_deref(),
        })
    }
}

/// A parsed exploration log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorationLog {
    pub steps: Vec<ExplorationStep>,
    /// Steps whose shape could not be read.
    pub malformed_steps: usize,
}

impl ExplorationLog {
    /// Parses a log document.
    ///
    /// Individual steps that do not match the expected shape are counted in
    /// [`malformed_steps`](Self::malformed_steps) rather than failing the
    /// whole document.
    ///
    /// # Examples
    ///
    /// ```
    /// use explore_fixtures_analysis::log::ExplorationLog;
    ///
    /// let log = ExplorationLog::from_json(r#"{"steps": [
    ///     {"action": {"type": "tap", "elementId": "loginButton"}},
    ///     {"action": {"type": "type", "elementId": "email", "value": "a@b.c",
    ///                 "valueSource": {"type": "aiGenerated"}}, "screenType": "login"},
    ///     42
    /// ]}"#).unwrap();
    /// assert_eq!(log.steps.len(), 2);
    /// assert_eq!(log.malformed_steps, 1);
    /// assert_eq!(log.typed_inputs().count(), 1);
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, LogParseError> {
        let root: Value = serde_json::from_str(raw)?;
        let Value::Object(mut root) = root else {
            return Err(LogParseError::NotAnObject);
        };
        let Some(Value::Array(items)) = root.remove("steps") else {
            return Err(LogParseError::MissingSteps);
        };

        let mut log = Self::default();
        for item in items {
            match serde_json::from_value::<ExplorationStep>(item) {
                Ok(step) => log.steps.push(step),
                Err(_) => log.malformed_steps += 1,
            }
        }
        Ok(log)
    }

    pub fn typed_inputs(&self) -> impl Iterator<Item = TypedInput<'_>> {
        self.steps.iter().filter_map(ExplorationStep::typed_input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_rejects_non_object_root() {
        assert!(matches!(
            ExplorationLog::from_json("[1, 2]"),
            Err(LogParseError::NotAnObject)
        ));
    }

    #[test]
    fn test_from_json_requires_steps_array() {
        assert!(matches!(
            ExplorationLog::from_json(r#"{"steps": {}}"#),
            Err(LogParseError::MissingSteps)
        ));
        assert!(matches!(
            ExplorationLog::from_json(r#"{"session": "abc"}"#),
            Err(LogParseError::MissingSteps)
        ));
    }

    #[test]
    fn test_from_json_reports_invalid_json() {
        assert!(matches!(
            ExplorationLog::from_json("{not json"),
            Err(LogParseError::Json(_))
        ));
    }

    #[test]
    fn test_typed_input_requires_all_fields() {
        let log = ExplorationLog::from_json(
            r#"{"steps": [
                {"action": {"type": "type", "elementId": "a", "value": "x"}},
                {"action": {"type": "type", "value": "x", "valueSource": {"type": "fallback"}}},
                {"action": {"type": "type", "elementId": "b", "valueSource": {"type": "fallback"}}},
                {"action": {"type": "type", "elementId": "c", "value": "x", "valueSource": {}}},
                {"action": {"type": "type", "elementId": "d", "value": "y", "valueSource": {"type": "fallback"}}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(log.steps.len(), 5);
        let inputs: Vec<_> = log.typed_inputs().collect();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].element_id, "d");
        assert_eq!(inputs[0].source, &ValueSource::Fallback);
        assert_eq!(inputs[0].screen_type, None);
    }

    #[test]
    fn test_step_with_wrongly_typed_field_is_malformed() {
        let log = ExplorationLog::from_json(
            r#"{"steps": [{"action": {"type": "type", "elementId": 7, "value": "x"}}]}"#,
        )
        .unwrap();
        assert!(log.steps.is_empty());
        assert_eq!(log.malformed_steps, 1);
    }
}
