// ABOUTME: Completion sinks receiving each successfully submitted step
// The default sink only logs; a JSON Lines file sink is enabled from config

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use super::payload::StepPayload;
use super::step::StepKind;

/// One submitted step, tagged with the wizard run it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub application_id: Uuid,
    pub step: StepKind,
    pub submitted_at: DateTime<Utc>,
    pub payload: StepPayload,
}

impl SubmissionRecord {
    pub fn new(application_id: Uuid, payload: StepPayload) -> Self {
        Self {
            application_id,
            step: payload.kind(),
            submitted_at: Utc::now(),
            payload,
        }
    }
}

/// Receives the payload of every successful submit
#[cfg_attr(test, mockall::automock)]
pub trait CompletionSink {
    fn complete(&mut self, record: &SubmissionRecord) -> Result<()>;
}

/// Logs submitted data as structured JSON
#[derive(Debug, Default)]
pub struct TracingSink;

impl CompletionSink for TracingSink {
    fn complete(&mut self, record: &SubmissionRecord) -> Result<()> {
        let payload = serde_json::to_string(&record.payload).context("Failed to serialize step payload")?;
        info!(
            application_id = %record.application_id,
            step = %record.step,
            payload = %payload,
            "Step submitted"
        );
        Ok(())
    }
}

/// Appends each record as one JSON line
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CompletionSink for JsonlSink {
    fn complete(&mut self, record: &SubmissionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let line = serde_json::to_string(record).context("Failed to serialize submission record")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        writeln!(file, "{line}").with_context(|| format!("Failed to write to {}", self.path.display()))?;
        Ok(())
    }
}

/// Fans a record out to several sinks; every sink runs even if an earlier one fails
#[derive(Default)]
pub struct SinkChain {
    sinks: Vec<Box<dyn CompletionSink>>,
}

impl SinkChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl CompletionSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl CompletionSink for SinkChain {
    fn complete(&mut self, record: &SubmissionRecord) -> Result<()> {
        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(e) = sink.complete(record) {
                tracing::warn!("Completion sink failed: {:#}", e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::payload::DocumentInfo;
    use tempfile::TempDir;

    fn record() -> SubmissionRecord {
        SubmissionRecord::new(
            Uuid::new_v4(),
            StepPayload::Document(DocumentInfo { phone: "+91 98400 00000".to_string() }),
        )
    }

    #[test]
    fn test_jsonl_sink_appends_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("submissions.jsonl");
        let mut sink = JsonlSink::new(&path);

        sink.complete(&record()).unwrap();
        sink.complete(&record()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["step"], "document");
        assert_eq!(parsed["payload"]["data"]["phone"], "+91 98400 00000");
        assert!(parsed["applicationId"].is_string());
    }

    #[test]
    fn test_chain_runs_every_sink_and_reports_failure() {
        let mut failing = MockCompletionSink::new();
        failing
            .expect_complete()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("disk full")));
        let mut healthy = MockCompletionSink::new();
        healthy.expect_complete().times(1).returning(|_| Ok(()));

        let mut chain = SinkChain::new().with(failing).with(healthy);
        let err = chain.complete(&record()).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_tracing_sink_accepts_record() {
        assert!(TracingSink.complete(&record()).is_ok());
    }
}
