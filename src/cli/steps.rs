// ABOUTME: CLI steps command - print the wizard's step track with each step's fields

use super::OutputFormat;
use crate::wizard::{ChoiceOption, FieldKind, FieldSpec, StepKind};
use anyhow::Result;
use serde::Serialize;

/// One step as printed by `steps`
#[derive(Debug, Clone, Serialize)]
pub struct StepSummary {
    pub position: usize,
    pub step: StepKind,
    pub label: &'static str,
    pub heading: &'static str,
    pub fields: Vec<FieldSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
}

impl FieldSummary {
    fn from_spec(spec: &FieldSpec) -> Self {
        let options = match spec.kind {
            FieldKind::Choice { options, .. } => options.to_vec(),
            _ => Vec::new(),
        };
        Self {
            key: spec.id.key(),
            label: spec.label,
            kind: kind_name(spec.kind),
            options,
        }
    }
}

const fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::TextArea => "textarea",
        FieldKind::Email => "email",
        FieldKind::Number => "number",
        FieldKind::Phone => "phone",
        FieldKind::Choice { .. } => "choice",
        FieldKind::File => "file",
    }
}

pub fn summaries() -> Vec<StepSummary> {
    StepKind::all()
        .iter()
        .map(|kind| StepSummary {
            position: kind.number(),
            step: *kind,
            label: kind.label(),
            heading: kind.heading(),
            fields: kind.fields().iter().map(FieldSummary::from_spec).collect(),
        })
        .collect()
}

/// Execute the steps command
pub fn execute(format: OutputFormat) -> Result<()> {
    let steps = summaries();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&steps)?),
        OutputFormat::Text => print!("{}", render_text(&steps)),
    }
    Ok(())
}

fn render_text(steps: &[StepSummary]) -> String {
    let mut out = String::new();
    for step in steps {
        out.push_str(&format!("({}) {}\n", step.position, step.label));
        for field in &step.fields {
            out.push_str(&format!("    {:<18} {:<10} {}\n", field.key, field.kind, field.label));
            if !field.options.is_empty() {
                let values: Vec<&str> = field.options.iter().map(|o| o.value).collect();
                out.push_str(&format!("    {:<18} {}\n", "", values.join(", ")));
            }
        }
    }
    out
}
