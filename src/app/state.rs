// ABOUTME: Application state: owns the step sequencer, the mounted step form and the completion sink

use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::wizard::{
    CompletionSink, FieldKind, FormFocus, StepForm, StepKind, StepSequencer, SubmitOutcome, TracingSink,
};

/// Severity of the footer status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self { level, text: text.into() }
    }
}

pub struct AppState {
    pub sequencer: StepSequencer,
    /// Form for the active step; rebuilt on every transition
    pub form: StepForm,
    sink: Box<dyn CompletionSink>,
    /// Identifies this wizard run in submitted records
    pub application_id: Uuid,
    pub status: Option<StatusMessage>,
    /// Set once the final step has been submitted successfully
    pub finished: bool,
    pub should_quit: bool,
    pub show_key_hints: bool,
}

impl AppState {
    pub fn new(sink: Box<dyn CompletionSink>) -> Self {
        let sequencer = StepSequencer::new();
        let form = StepForm::new(sequencer.active_kind());
        Self {
            sequencer,
            form,
            sink,
            application_id: Uuid::new_v4(),
            status: None,
            finished: false,
            should_quit: false,
            show_key_hints: true,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut state = Self::new(config.completion_sink());
        state.show_key_hints = config.ui.show_key_hints;
        state
    }

    pub fn active_kind(&self) -> StepKind {
        self.sequencer.active_kind()
    }

    pub fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
    }

    /// Submit the mounted form; a successful submit moves to the next step
    pub fn submit_current_step(&mut self) {
        let before = self.sequencer.active_step();
        let was_last = self.sequencer.is_last();

        let outcome = self.form.submit(&mut self.sequencer, self.sink.as_mut(), self.application_id);

        match outcome {
            SubmitOutcome::Accepted { sink_error, .. } => {
                if self.sequencer.active_step() != before {
                    self.remount_form();
                }
                if was_last {
                    self.finished = true;
                    info!(application_id = %self.application_id, "Application completed");
                }
                self.status = match (sink_error, was_last) {
                    (Some(err), true) => Some(StatusMessage::new(
                        StatusLevel::Error,
                        format!("Application submitted; step saved to log only: {err}"),
                    )),
                    (Some(err), false) => Some(StatusMessage::new(
                        StatusLevel::Error,
                        format!("Step saved to log only: {err}"),
                    )),
                    (None, true) => Some(StatusMessage::new(StatusLevel::Success, "Application submitted")),
                    (None, false) => None,
                };
            }
            SubmitOutcome::Rejected(count) => {
                let noun = if count == 1 { "field needs" } else { "fields need" };
                self.status = Some(StatusMessage::new(StatusLevel::Error, format!("{count} {noun} attention")));
            }
        }
    }

    /// Back: always allowed, discards whatever the current step holds
    pub fn go_back(&mut self) {
        let before = self.sequencer.active_step();
        self.form.back(&mut self.sequencer);
        if self.sequencer.active_step() != before {
            self.remount_form();
            self.status = None;
        }
    }

    /// Enter: meaning depends on what has focus
    pub fn activate_focused(&mut self) {
        match self.form.focus {
            FormFocus::Back => self.go_back(),
            FormFocus::Submit => self.submit_current_step(),
            FormFocus::Field(_) => {
                let Some(spec) = self.form.focused_field() else { return };
                match spec.kind {
                    FieldKind::Choice { .. } if self.form.choice_open() => self.form.confirm_choice(),
                    FieldKind::Choice { .. } => self.form.open_choice(),
                    FieldKind::File => self.form.commit_file(),
                    _ => self.submit_current_step(),
                }
            }
        }
    }

    fn remount_form(&mut self) {
        self.form = StepForm::new(self.sequencer.active_kind());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Box::new(TracingSink))
    }
}

/// Top-level application wrapper used by the event loop
pub struct App {
    pub state: AppState,
    pub tick_rate: Duration,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: AppState::from_config(config),
            tick_rate: Duration::from_millis(config.tick_rate_ms),
        }
    }
}
