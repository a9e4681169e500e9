// ABOUTME: Step sequencer owning the active step index for the loan wizard
// Forms move the wizard only through the StepNavigator interface

use serde::Serialize;
use tracing::{debug, info};

use super::step::StepKind;

/// Transitions a step form may request. Implemented once, by the sequencer.
#[cfg_attr(test, mockall::automock)]
pub trait StepNavigator {
    /// Move to the next step; no-op on the last step
    fn advance(&mut self);
    /// Move to the previous step; no-op on the first step
    fn retreat(&mut self);
}

/// A labelled position in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub kind: StepKind,
    pub label: &'static str,
}

/// One entry on the progress track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepMarker {
    /// 1-based position
    pub position: usize,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequencer {
    active_step: usize,
    steps: Vec<StepDefinition>,
}

impl StepSequencer {
    pub fn new() -> Self {
        let steps = StepKind::all()
            .iter()
            .map(|kind| StepDefinition { kind: *kind, label: kind.label() })
            .collect();
        Self { active_step: 0, steps }
    }

    /// Start at `kind` instead of the first step
    pub fn starting_at(kind: StepKind) -> Self {
        let mut sequencer = Self::new();
        sequencer.active_step = kind.index();
        sequencer
    }

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    pub fn active_kind(&self) -> StepKind {
        self.steps[self.active_step].kind
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.active_step == 0
    }

    pub fn is_last(&self) -> bool {
        self.active_step + 1 == self.steps.len()
    }

    /// Progress track: one marker per step, only the active one flagged
    pub fn markers(&self) -> Vec<StepMarker> {
        self.steps
            .iter()
            .enumerate()
            .map(|(idx, step)| StepMarker {
                position: idx + 1,
                label: step.label,
                active: idx == self.active_step,
            })
            .collect()
    }
}

impl StepNavigator for StepSequencer {
    fn advance(&mut self) {
        if self.active_step + 1 < self.steps.len() {
            self.active_step += 1;
            info!(step = self.active_step, label = self.steps[self.active_step].label, "Advanced to step");
        } else {
            debug!(step = self.active_step, "Advance ignored on last step");
        }
    }

    fn retreat(&mut self) {
        if self.active_step > 0 {
            self.active_step -= 1;
            info!(step = self.active_step, label = self.steps[self.active_step].label, "Retreated to step");
        } else {
            debug!("Retreat ignored on first step");
        }
    }
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new()
    }
}
