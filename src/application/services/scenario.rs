//! Scenario service
//!
//! The external interface of the engine: node tables, animated traces and
//! full-structure snapshots, addressed by domain key.

use std::path::Path;

use serde_json::{Map, Number, Value};
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{
    find_preset, full_structure_snapshot, AnimationStep, Attributes, ChestPain, Domain,
    DomainError, EcgResult, Level, Preset, Trace, TreeNode,
};

/// Service answering renderer requests against the fixed trees.
#[derive(Debug, Clone)]
pub struct ScenarioService {
    strict_input: bool,
}

impl Default for ScenarioService {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ScenarioService {
    /// Create a service. With `strict_input` the attribute ranges are
    /// checked before any traversal and out-of-range input is refused.
    pub fn new(strict_input: bool) -> Self {
        Self { strict_input }
    }

    pub fn domain(&self, key: &str) -> ApplicationResult<Domain> {
        Ok(key.parse::<Domain>()?)
    }

    /// The immutable node table for `key`.
    pub fn get_nodes(&self, key: &str) -> ApplicationResult<&'static [TreeNode]> {
        Ok(self.domain(key)?.tree().nodes())
    }

    /// Ordered animation steps for `attributes` walked through the `key` tree.
    pub fn execute_decision_tree(
        &self,
        key: &str,
        attributes: &Attributes,
    ) -> ApplicationResult<Vec<AnimationStep>> {
        Ok(self.trace(key, attributes)?.steps)
    }

    /// Like [`Self::execute_decision_tree`] but keeps the decision path and outcome.
    #[instrument(level = "debug", skip(self, attributes))]
    pub fn trace(&self, key: &str, attributes: &Attributes) -> ApplicationResult<Trace> {
        let domain = self.domain(key)?;
        if attributes.domain() != domain {
            return Err(DomainError::InvalidInput {
                field: "domain",
                reason: format!(
                    "{} attributes cannot be classified by the {} tree",
                    attributes.domain(),
                    domain
                ),
            }
            .into());
        }
        if self.strict_input {
            attributes.validate()?;
        }
        let trace = attributes.trace();
        debug!(steps = trace.steps.len(), leaf = trace.leaf, "trace: done");
        Ok(trace)
    }

    /// One step revealing every node and edge of the `key` tree.
    pub fn full_structure_snapshot(&self, key: &str) -> ApplicationResult<Vec<AnimationStep>> {
        Ok(full_structure_snapshot(self.domain(key)?.tree()))
    }

    pub fn preset(&self, key: &str, name: &str) -> ApplicationResult<&'static Preset> {
        Ok(find_preset(self.domain(key)?, name)?)
    }

    /// Read an attribute record from a JSON file.
    ///
    /// The file holds either a tagged record (`"domain": "student"`) or the bare
    /// fields of the `key` domain's record.
    pub fn load_attributes(&self, key: &str, path: &Path) -> ApplicationResult<Attributes> {
        let domain = self.domain(key)?;
        let content = std::fs::read_to_string(path).with_path_context("read attributes", path)?;
        let mut value: Value = serde_json::from_str(&content).map_err(|e| {
            DomainError::invalid_input("attributes", format!("{}: {e}", path.display()))
        })?;
        if let Value::Object(fields) = &mut value {
            fields
                .entry("domain")
                .or_insert_with(|| Value::String(domain.key().to_string()));
        }
        attributes_from_value(value)
    }

    /// Start from a preset (or the domain's first one) and apply `name=value` overrides.
    ///
    /// Values are parsed per attribute, so a bad value names the attribute;
    /// the record is then rebuilt through serde.
    pub fn attributes_with_overrides(
        &self,
        key: &str,
        base: Option<&str>,
        overrides: &[(String, String)],
    ) -> ApplicationResult<Attributes> {
        let domain = self.domain(key)?;
        let preset = find_preset(domain, base.unwrap_or("0"))?;
        let mut value = serde_json::to_value(preset.attributes).map_err(|e| {
            DomainError::invalid_input("attributes", e.to_string())
        })?;

        let fields: &mut Map<String, Value> = match &mut value {
            Value::Object(fields) => fields,
            _ => return Err(DomainError::invalid_input("attributes", "expected a record").into()),
        };
        for (name, raw) in overrides {
            let field = domain
                .attribute_names()
                .iter()
                .copied()
                .find(|known| known.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    DomainError::invalid_input(
                        "attributes",
                        format!("'{name}' is not a {domain} attribute"),
                    )
                })?;
            debug!(%field, %raw, "override");
            fields.insert(field.to_string(), override_value(field, raw)?);
        }
        attributes_from_value(value)
    }
}

/// Parse `raw` as the JSON value `field` expects, with case-insensitive categories.
fn override_value(field: &'static str, raw: &str) -> ApplicationResult<Value> {
    let raw = raw.trim();
    let category = match field {
        "parentInvolvement" | "participation" => Some(Level::parse_field(field, raw)?.to_string()),
        "chestPain" => Some(raw.parse::<ChestPain>()?.to_string()),
        "ecg" => Some(raw.parse::<EcgResult>()?.to_string()),
        _ => None,
    };
    if let Some(category) = category {
        return Ok(Value::String(category));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| DomainError::invalid_input(field, format!("'{raw}' is not a number")).into())
}

fn attributes_from_value(value: Value) -> ApplicationResult<Attributes> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::invalid_input("attributes", e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::application::ApplicationError;
    use crate::domain::StudentRecord;

    #[test]
    fn given_overrides_when_building_attributes_then_replaces_fields() {
        let service = ScenarioService::default();
        let overrides = vec![
            ("attendanceRate".to_string(), "55".to_string()),
            ("participation".to_string(), "medium".to_string()),
        ];
        let attrs = service
            .attributes_with_overrides("student", Some("Excellent Student"), &overrides)
            .unwrap();

        match attrs {
            Attributes::Student(StudentRecord {
                attendance_rate,
                participation,
                quiz_score,
                ..
            }) => {
                assert_eq!(attendance_rate, 55.0);
                assert_eq!(participation, Level::Medium);
                assert_eq!(quiz_score, 88.0);
            }
            other => panic!("expected student attributes, got {other:?}"),
        }
    }

    #[test]
    fn given_unknown_attribute_when_overriding_then_invalid_input() {
        let service = ScenarioService::default();
        let overrides = vec![("heartRate".to_string(), "80".to_string())];
        let err = service
            .attributes_with_overrides("cardiology", None, &overrides)
            .unwrap_err();
        assert!(err.to_string().contains("heartRate"));
    }

    #[test]
    fn given_bad_category_when_overriding_then_invalid_input() {
        let service = ScenarioService::default();
        let overrides = vec![("ecg".to_string(), "wobbly".to_string())];
        assert!(service
            .attributes_with_overrides("cardiology", None, &overrides)
            .is_err());
    }

    #[rstest]
    #[case("participation", "sometimes", "participation")]
    #[case("PARENTINVOLVEMENT", "lots", "parentInvolvement")]
    #[case("quizScore", "high", "quizScore")]
    fn given_bad_value_when_overriding_then_error_names_attribute(
        #[case] name: &str,
        #[case] raw: &str,
        #[case] expected_field: &str,
    ) {
        let overrides = vec![(name.to_string(), raw.to_string())];
        let err = ScenarioService::default()
            .attributes_with_overrides("student", None, &overrides)
            .unwrap_err();
        match err {
            ApplicationError::Domain(DomainError::InvalidInput { field, .. }) => {
                assert_eq!(field, expected_field)
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}
