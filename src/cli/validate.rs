// ABOUTME: CLI validate command - run one step's rule set against values from a JSON file
//
// Strings are taken as typed, numbers are stringified, null counts as empty.
// Prints the typed payload on success or the per-field messages on failure.

use super::{OutputFormat, ValidateArgs};
use crate::wizard::{FormValues, StepKind, StepPayload, ValidationErrors};
use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use tracing::info;

/// Result of validating one step
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub step: StepKind,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<StepPayload>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<&'static str, String>,
}

impl ValidationReport {
    pub fn new(step: StepKind, result: Result<StepPayload, ValidationErrors>) -> Self {
        match result {
            Ok(payload) => Self {
                step,
                valid: true,
                payload: Some(payload),
                errors: BTreeMap::new(),
            },
            Err(errors) => Self {
                step,
                valid: false,
                payload: None,
                errors: errors.iter().map(|e| (e.field.key(), e.message.clone())).collect(),
            },
        }
    }
}

/// Execute the validate command; returns an error when validation fails
pub fn execute(args: ValidateArgs, format: OutputFormat) -> Result<()> {
    let content = fs::read_to_string(&args.values)
        .with_context(|| format!("Failed to read values from {}", args.values.display()))?;
    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse values from {}", args.values.display()))?;

    let values = values_from_json(args.step, &json)?;
    let report = ValidationReport::new(args.step, StepPayload::build(args.step, &values));
    info!(step = ?args.step, valid = report.valid, "Validated step values from CLI");

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_text(&report)?),
    }

    if !report.valid {
        bail!("{} validation failed with {} error(s)", args.step, report.errors.len());
    }
    Ok(())
}

/// Map a JSON object onto the step's fields
pub fn values_from_json(step: StepKind, json: &Value) -> Result<FormValues> {
    let object = json.as_object().ok_or_else(|| anyhow!("Values must be a JSON object"))?;

    let mut values = FormValues::new();
    for (key, value) in object {
        let spec = step
            .fields()
            .iter()
            .find(|spec| spec.id.key() == key)
            .ok_or_else(|| anyhow!("Unknown field '{key}' for step {step}"))?;

        let raw = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Null => String::new(),
            other => bail!("Field '{key}' must be a string or number, got {other}"),
        };
        values.insert(spec.id, raw);
    }
    Ok(values)
}

fn render_text(report: &ValidationReport) -> Result<String> {
    let mut out = String::new();
    if let Some(payload) = &report.payload {
        out.push_str(&format!("✅ {} is valid\n", report.step));
        out.push_str(&serde_json::to_string_pretty(payload)?);
        out.push('\n');
    } else {
        out.push_str(&format!("❌ {} has errors\n", report.step));
        for (field, message) in &report.errors {
            out.push_str(&format!("   {field}: {message}\n"));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{DirectorInfo, FieldId};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_values_from_json_converts_numbers_and_null() {
        let values = values_from_json(StepKind::Director, &json!({"email": "a@b.com", "age": 30})).unwrap();
        assert_eq!(values.get(&FieldId::Email).map(String::as_str), Some("a@b.com"));
        assert_eq!(values.get(&FieldId::Age).map(String::as_str), Some("30"));

        let values = values_from_json(StepKind::Director, &json!({"email": null})).unwrap();
        assert_eq!(values.get(&FieldId::Email).map(String::as_str), Some(""));
    }

    #[test]
    fn test_values_from_json_rejects_other_steps_fields() {
        let err = values_from_json(StepKind::Director, &json!({"phone": "555"})).unwrap_err();
        assert!(err.to_string().contains("Unknown field 'phone'"));
    }

    #[test]
    fn test_values_from_json_requires_object() {
        assert!(values_from_json(StepKind::Document, &json!(["555"])).is_err());
        assert!(values_from_json(StepKind::Document, &json!({"phone": true})).is_err());
    }

    #[test]
    fn test_report_for_invalid_director() {
        let values = values_from_json(StepKind::Director, &json!({"email": "not-an-email", "age": "-5"})).unwrap();
        let report = ValidationReport::new(StepKind::Director, StepPayload::build(StepKind::Director, &values));

        assert!(!report.valid);
        assert_eq!(report.errors.get("email").map(String::as_str), Some("Invalid email"));
        assert_eq!(report.errors.get("age").map(String::as_str), Some("Age must be positive"));

        let text = render_text(&report).unwrap();
        assert!(text.contains("age: Age must be positive"));
    }

    #[test]
    fn test_report_for_valid_director() {
        let values = values_from_json(StepKind::Director, &json!({"email": "a@b.com", "age": "30"})).unwrap();
        let report = ValidationReport::new(StepKind::Director, StepPayload::build(StepKind::Director, &values));

        assert!(report.valid);
        assert_eq!(
            report.payload,
            Some(StepPayload::Director(DirectorInfo { email: "a@b.com".into(), age: 30 }))
        );
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("errors").is_none());
        assert_eq!(json["payload"]["data"]["age"], 30);
    }

    #[test]
    fn test_execute_fails_on_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("document.json");
        fs::write(&path, r#"{"phone": ""}"#).unwrap();

        let args = ValidateArgs { step: StepKind::Document, values: path };
        assert!(execute(args, OutputFormat::Json).is_err());

        let args = ValidateArgs { step: StepKind::Document, values: PathBuf::from("/nonexistent/values.json") };
        let err = execute(args, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("Failed to read values"));
    }
}
