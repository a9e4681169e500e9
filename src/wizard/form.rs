// ABOUTME: Per-step form state: raw values, inline errors, focus and submit handling
// A form validates only on submit and asks the navigator to advance only on success

use std::path::PathBuf;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::choice::ChoiceInput;
use super::payload::StepPayload;
use super::sequencer::StepNavigator;
use super::sink::{CompletionSink, SubmissionRecord};
use super::step::{FieldId, FieldKind, FieldSpec, StepKind};
use super::validation::{FormValues, ValidationErrors};

/// Editing state attached to one field
#[derive(Debug, Clone)]
pub enum FieldInput {
    /// Free text; the value itself lives in the form's value map
    Text { cursor: usize },
    Choice(ChoiceInput),
    /// Path typed by the user; becomes the field value once selected
    File { buffer: String, cursor: usize },
}

impl FieldInput {
    fn for_spec(spec: &FieldSpec) -> Self {
        match spec.kind {
            FieldKind::Choice { options, .. } => Self::Choice(ChoiceInput::new(options)),
            FieldKind::File => Self::File { buffer: String::new(), cursor: 0 },
            _ => Self::Text { cursor: 0 },
        }
    }
}

/// What currently has keyboard focus on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(usize),
    Back,
    Submit,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Values were valid and handed to the sink; the navigator was asked to advance
    Accepted {
        payload: StepPayload,
        /// Set when the sink reported a failure. Navigation still proceeds.
        sink_error: Option<String>,
    },
    /// Validation failed for this many fields; no transition was requested
    Rejected(usize),
}

#[derive(Debug, Clone)]
pub struct StepForm {
    kind: StepKind,
    values: FormValues,
    errors: ValidationErrors,
    inputs: Vec<FieldInput>,
    pub focus: FormFocus,
    submit_attempts: usize,
}

impl StepForm {
    pub fn new(kind: StepKind) -> Self {
        let inputs = kind.fields().iter().map(FieldInput::for_spec).collect();
        let values = kind.fields().iter().map(|f| (f.id, String::new())).collect();
        Self {
            kind,
            values,
            errors: ValidationErrors::default(),
            inputs,
            focus: FormFocus::Field(0),
            submit_attempts: 0,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.kind.fields()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.message_for(field)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn input(&self, idx: usize) -> Option<&FieldInput> {
        self.inputs.get(idx)
    }

    pub fn submit_attempts(&self) -> usize {
        self.submit_attempts
    }

    fn index_of(&self, field: FieldId) -> Option<usize> {
        self.fields().iter().position(|f| f.id == field)
    }

    /// Programmatically set a raw value, as the choice and file inputs do
    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        let value = value.into();
        if let Some(idx) = self.index_of(field) {
            match &mut self.inputs[idx] {
                FieldInput::Text { cursor } => *cursor = value.chars().count(),
                FieldInput::Choice(choice) => {
                    if value.is_empty() {
                        choice.clear();
                    } else {
                        choice.select_value(&value);
                    }
                }
                FieldInput::File { buffer, cursor } => {
                    buffer.clone_from(&value);
                    *cursor = buffer.chars().count();
                }
            }
        }
        self.values.insert(field, value);
    }

    /// A choice changed: Some(value) on selection, None when cleared
    pub fn select_choice(&mut self, field: FieldId, selected: Option<&str>) {
        debug!(field = %field, selected = ?selected, "Choice changed");
        self.set_value(field, selected.unwrap_or(""));
    }

    /// A file was picked (Some) or the selection removed (None)
    pub fn select_file(&mut self, path: Option<PathBuf>) {
        let value = path.map(|p| p.display().to_string()).unwrap_or_default();
        debug!(file = %value, "File selected");
        self.set_value(FieldId::FileAttachment, value);
    }

    /// Validate, hand the payload to `sink` and advance on success
    pub fn submit(
        &mut self,
        navigator: &mut dyn StepNavigator,
        sink: &mut dyn CompletionSink,
        application_id: Uuid,
    ) -> SubmitOutcome {
        self.submit_attempts += 1;

        match StepPayload::build(self.kind, &self.values) {
            Ok(payload) => {
                self.errors = ValidationErrors::default();
                info!(step = %self.kind, "Step validated");

                let record = SubmissionRecord::new(application_id, payload.clone());
                let sink_error = sink.complete(&record).err().map(|e| {
                    warn!("Failed to record submitted step: {:#}", e);
                    format!("{e:#}")
                });

                navigator.advance();
                SubmitOutcome::Accepted { payload, sink_error }
            }
            Err(errors) => {
                warn!(
                    step = %self.kind,
                    fields = ?errors.fields(),
                    attempt = self.submit_attempts,
                    "Step validation failed"
                );
                let count = errors.len();
                self.errors = errors;
                SubmitOutcome::Rejected(count)
            }
        }
    }

    /// Go back without validating; entered values are dropped with the form
    pub fn back(&self, navigator: &mut dyn StepNavigator) {
        navigator.retreat();
    }

    // --- focus ---

    fn focus_ring(&self) -> Vec<FormFocus> {
        let mut ring: Vec<FormFocus> = (0..self.inputs.len()).map(FormFocus::Field).collect();
        if self.kind.has_back() {
            ring.push(FormFocus::Back);
        }
        ring.push(FormFocus::Submit);
        ring
    }

    pub fn focus_next(&mut self) {
        self.close_choice();
        let ring = self.focus_ring();
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + 1) % ring.len()];
    }

    pub fn focus_previous(&mut self) {
        self.close_choice();
        let ring = self.focus_ring();
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(pos + ring.len() - 1) % ring.len()];
    }

    /// Spec of the focused field, if focus is on a field
    pub fn focused_field(&self) -> Option<&'static FieldSpec> {
        match self.focus {
            FormFocus::Field(idx) => self.fields().get(idx),
            _ => None,
        }
    }

    // --- choice dropdown ---

    pub fn choice_open(&self) -> bool {
        matches!(self.focused_input(), Some(FieldInput::Choice(c)) if c.is_open)
    }

    pub fn open_choice(&mut self) {
        if let Some(FieldInput::Choice(choice)) = self.focused_input_mut() {
            choice.open();
        }
    }

    pub fn close_choice(&mut self) {
        if let Some(FieldInput::Choice(choice)) = self.focused_input_mut() {
            choice.close();
        }
    }

    pub fn choice_highlight_up(&mut self) {
        if let Some(FieldInput::Choice(choice)) = self.focused_input_mut() {
            choice.move_highlight_up();
        }
    }

    pub fn choice_highlight_down(&mut self) {
        if let Some(FieldInput::Choice(choice)) = self.focused_input_mut() {
            choice.move_highlight_down();
        }
    }

    /// Select the highlighted dropdown entry into the focused field
    pub fn confirm_choice(&mut self) {
        let Some(spec) = self.focused_field() else { return };
        let chosen = match self.focused_input_mut() {
            Some(FieldInput::Choice(choice)) => choice.confirm(),
            _ => return,
        };
        if let Some(value) = chosen {
            self.select_choice(spec.id, Some(value));
        }
    }

    /// Clear the focused choice when the field allows it
    pub fn clear_choice(&mut self) {
        if let Some(spec) = self.focused_field() {
            if let FieldKind::Choice { clearable: true, .. } = spec.kind {
                self.select_choice(spec.id, None);
            }
        }
    }

    /// Commit the typed path of the focused file field
    pub fn commit_file(&mut self) {
        let path = match self.focused_input() {
            Some(FieldInput::File { buffer, .. }) => buffer.trim().to_string(),
            _ => return,
        };
        self.select_file((!path.is_empty()).then(|| PathBuf::from(path)));
    }

    // --- text editing ---

    pub fn input_char(&mut self, ch: char) {
        let Some(spec) = self.focused_field() else { return };
        let value = self.values.entry(spec.id).or_default();
        match self.inputs.get_mut(spec_index(self.focus)) {
            Some(FieldInput::Text { cursor }) => {
                insert_at(value, cursor, ch);
            }
            Some(FieldInput::File { buffer, cursor }) => {
                insert_at(buffer, cursor, ch);
            }
            Some(FieldInput::Choice(choice)) => {
                if !choice.is_open {
                    choice.open();
                }
                choice.add_char_to_query(ch);
            }
            None => {}
        }
    }

    /// Alt-Enter on a multi-line field
    pub fn insert_newline(&mut self) {
        if matches!(self.focused_field(), Some(spec) if spec.kind == FieldKind::TextArea) {
            self.input_char('\n');
        }
    }

    pub fn backspace(&mut self) {
        if self.focused_choice_closed() {
            self.clear_choice();
            return;
        }
        let Some(spec) = self.focused_field() else { return };
        let value = self.values.entry(spec.id).or_default();
        match self.inputs.get_mut(spec_index(self.focus)) {
            Some(FieldInput::Text { cursor }) => remove_before(value, cursor),
            Some(FieldInput::File { buffer, cursor }) => remove_before(buffer, cursor),
            Some(FieldInput::Choice(choice)) => choice.backspace_query(),
            None => {}
        }
    }

    pub fn delete(&mut self) {
        if self.focused_choice_closed() {
            self.clear_choice();
            return;
        }
        let Some(spec) = self.focused_field() else { return };
        let value = self.values.entry(spec.id).or_default();
        match self.inputs.get_mut(spec_index(self.focus)) {
            Some(FieldInput::Text { cursor }) => remove_at(value, *cursor),
            Some(FieldInput::File { buffer, cursor }) => remove_at(buffer, *cursor),
            _ => {}
        }
    }

    fn focused_choice_closed(&self) -> bool {
        matches!(self.focused_input(), Some(FieldInput::Choice(c)) if !c.is_open)
    }

    pub fn cursor_left(&mut self) {
        if let Some(FieldInput::Text { cursor } | FieldInput::File { cursor, .. }) = self.focused_input_mut() {
            *cursor = cursor.saturating_sub(1);
        }
    }

    pub fn cursor_right(&mut self) {
        let len = self.focused_text_len();
        if let Some(FieldInput::Text { cursor } | FieldInput::File { cursor, .. }) = self.focused_input_mut() {
            if *cursor < len {
                *cursor += 1;
            }
        }
    }

    pub fn cursor_home(&mut self) {
        if let Some(FieldInput::Text { cursor } | FieldInput::File { cursor, .. }) = self.focused_input_mut() {
            *cursor = 0;
        }
    }

    pub fn cursor_end(&mut self) {
        let len = self.focused_text_len();
        if let Some(FieldInput::Text { cursor } | FieldInput::File { cursor, .. }) = self.focused_input_mut() {
            *cursor = len;
        }
    }

    fn focused_text_len(&self) -> usize {
        match (self.focused_field(), self.focused_input()) {
            (Some(spec), Some(FieldInput::Text { .. })) => self.value(spec.id).chars().count(),
            (_, Some(FieldInput::File { buffer, .. })) => buffer.chars().count(),
            _ => 0,
        }
    }

    fn focused_input(&self) -> Option<&FieldInput> {
        match self.focus {
            FormFocus::Field(idx) => self.inputs.get(idx),
            _ => None,
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut FieldInput> {
        match self.focus {
            FormFocus::Field(idx) => self.inputs.get_mut(idx),
            _ => None,
        }
    }
}

fn spec_index(focus: FormFocus) -> usize {
    match focus {
        FormFocus::Field(idx) => idx,
        _ => usize::MAX,
    }
}

/// Byte offset of the `cursor`-th char
fn byte_offset(s: &str, cursor: usize) -> usize {
    s.char_indices().nth(cursor).map_or(s.len(), |(i, _)| i)
}

fn insert_at(s: &mut String, cursor: &mut usize, ch: char) {
    let at = byte_offset(s, *cursor);
    s.insert(at, ch);
    *cursor += 1;
}

fn remove_before(s: &mut String, cursor: &mut usize) {
    if *cursor > 0 {
        *cursor -= 1;
        let at = byte_offset(s, *cursor);
        s.remove(at);
    }
}

fn remove_at(s: &mut String, cursor: usize) {
    if cursor < s.chars().count() {
        let at = byte_offset(s, cursor);
        s.remove(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::sequencer::MockStepNavigator;
    use crate::wizard::sink::MockCompletionSink;

    fn type_str(form: &mut StepForm, text: &str) {
        for ch in text.chars() {
            form.input_char(ch);
        }
    }

    fn accepting_sink() -> MockCompletionSink {
        let mut sink = MockCompletionSink::new();
        sink.expect_complete().returning(|_| Ok(()));
        sink
    }

    #[test]
    fn test_invalid_submit_never_advances() {
        let mut form = StepForm::new(StepKind::Director);
        form.set_value(FieldId::Email, "not-an-email");
        form.set_value(FieldId::Age, "-5");

        let mut nav = MockStepNavigator::new();
        nav.expect_advance().times(0);
        let mut sink = MockCompletionSink::new();
        sink.expect_complete().times(0);

        let outcome = form.submit(&mut nav, &mut sink, Uuid::new_v4());
        assert_eq!(outcome, SubmitOutcome::Rejected(2));
        assert_eq!(form.error(FieldId::Email), Some("Invalid email"));
        assert_eq!(form.error(FieldId::Age), Some("Age must be positive"));
        // Entered values survive a failed submit
        assert_eq!(form.value(FieldId::Email), "not-an-email");
    }

    #[test]
    fn test_valid_submit_sinks_then_advances() {
        let mut form = StepForm::new(StepKind::Director);
        form.set_value(FieldId::Email, "a@b.com");
        form.set_value(FieldId::Age, "30");

        let mut nav = MockStepNavigator::new();
        nav.expect_advance().times(1).return_const(());
        let mut sink = MockCompletionSink::new();
        sink.expect_complete()
            .withf(|record| record.step == StepKind::Director)
            .times(1)
            .returning(|_| Ok(()));

        let outcome = form.submit(&mut nav, &mut sink, Uuid::new_v4());
        assert!(matches!(outcome, SubmitOutcome::Accepted { sink_error: None, .. }));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_sink_failure_does_not_block_navigation() {
        let mut form = StepForm::new(StepKind::Document);
        form.set_value(FieldId::Phone, "555-0100");

        let mut nav = MockStepNavigator::new();
        nav.expect_advance().times(1).return_const(());
        let mut sink = MockCompletionSink::new();
        sink.expect_complete().returning(|_| Err(anyhow::anyhow!("read-only file system")));

        match form.submit(&mut nav, &mut sink, Uuid::new_v4()) {
            SubmitOutcome::Accepted { sink_error, .. } => {
                assert!(sink_error.unwrap().contains("read-only"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_repeated_invalid_submits_report_same_errors() {
        let mut form = StepForm::new(StepKind::Financial);
        let mut nav = MockStepNavigator::new();
        nav.expect_advance().times(0);
        let mut sink = accepting_sink();

        let first = form.submit(&mut nav, &mut sink, Uuid::nil());
        let first_errors = form.errors().clone();
        let second = form.submit(&mut nav, &mut sink, Uuid::nil());

        assert_eq!(first, second);
        assert_eq!(&first_errors, form.errors());
        assert_eq!(form.submit_attempts(), 2);
    }

    #[test]
    fn test_back_skips_validation() {
        let form = StepForm::new(StepKind::Financial);
        let mut nav = MockStepNavigator::new();
        nav.expect_retreat().times(1).return_const(());
        nav.expect_advance().times(0);
        form.back(&mut nav);
    }

    #[test]
    fn test_cleared_property_type_is_required() {
        let mut form = StepForm::new(StepKind::Borrower);
        form.select_choice(FieldId::PropertyType, Some("commercial"));
        assert_eq!(form.value(FieldId::PropertyType), "commercial");

        form.select_choice(FieldId::PropertyType, None);
        assert_eq!(form.value(FieldId::PropertyType), "");

        let mut nav = MockStepNavigator::new();
        nav.expect_advance().times(0);
        form.submit(&mut nav, &mut accepting_sink(), Uuid::nil());
        assert_eq!(form.error(FieldId::PropertyType), Some("Property Type is required"));
    }

    #[test]
    fn test_fix_and_resubmit_clears_errors() {
        let mut form = StepForm::new(StepKind::Document);
        let mut nav = MockStepNavigator::new();
        nav.expect_advance().times(1).return_const(());
        let mut sink = accepting_sink();

        form.submit(&mut nav, &mut sink, Uuid::nil());
        assert!(form.error(FieldId::Phone).is_some());

        type_str(&mut form, "044 2345 6789");
        form.submit(&mut nav, &mut sink, Uuid::nil());
        assert!(form.error(FieldId::Phone).is_none());
    }

    #[test]
    fn test_text_editing_with_cursor() {
        let mut form = StepForm::new(StepKind::Document);
        type_str(&mut form, "12");
        form.cursor_home();
        form.input_char('+');
        assert_eq!(form.value(FieldId::Phone), "+12");

        form.cursor_end();
        form.backspace();
        assert_eq!(form.value(FieldId::Phone), "+1");

        form.cursor_home();
        form.delete();
        assert_eq!(form.value(FieldId::Phone), "1");
    }

    #[test]
    fn test_multibyte_input() {
        let mut form = StepForm::new(StepKind::Financial);
        type_str(&mut form, "Café");
        form.cursor_left();
        form.backspace();
        assert_eq!(form.value(FieldId::Address), "Caé");
    }

    #[test]
    fn test_newline_only_in_text_area() {
        let mut form = StepForm::new(StepKind::Borrower);
        form.insert_newline();
        assert_eq!(form.value(FieldId::PropertyName), "");

        form.focus = FormFocus::Field(3);
        type_str(&mut form, "1 Park Rd");
        form.insert_newline();
        type_str(&mut form, "Chennai");
        assert_eq!(form.value(FieldId::PropertyAddress), "1 Park Rd\nChennai");
    }

    #[test]
    fn test_dropdown_selection_sets_value() {
        let mut form = StepForm::new(StepKind::Financial);
        form.focus_next();
        assert_eq!(form.focused_field().map(|f| f.id), Some(FieldId::City));

        form.open_choice();
        assert!(form.choice_open());
        type_str(&mut form, "mum");
        form.confirm_choice();

        assert!(!form.choice_open());
        assert_eq!(form.value(FieldId::City), "mumbai");

        form.backspace();
        assert_eq!(form.value(FieldId::City), "");
    }

    #[test]
    fn test_unit_count_cannot_be_cleared() {
        let mut form = StepForm::new(StepKind::Borrower);
        form.focus = FormFocus::Field(2);
        form.open_choice();
        form.choice_highlight_down();
        form.confirm_choice();
        assert_eq!(form.value(FieldId::UnitCount), "2");

        form.delete();
        assert_eq!(form.value(FieldId::UnitCount), "2");
    }

    #[test]
    fn test_file_selection() {
        let mut form = StepForm::new(StepKind::Borrower);
        form.focus = FormFocus::Field(4);
        type_str(&mut form, "/tmp/deed.pdf");
        assert_eq!(form.value(FieldId::FileAttachment), "");

        form.commit_file();
        assert_eq!(form.value(FieldId::FileAttachment), "/tmp/deed.pdf");

        form.select_file(None);
        assert_eq!(form.value(FieldId::FileAttachment), "");
    }

    #[test]
    fn test_focus_ring_includes_buttons() {
        let mut form = StepForm::new(StepKind::Borrower);
        for _ in 0..5 {
            form.focus_next();
        }
        // First step has no Back button
        assert_eq!(form.focus, FormFocus::Submit);
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Field(0));

        let mut form = StepForm::new(StepKind::Document);
        form.focus_previous();
        assert_eq!(form.focus, FormFocus::Submit);
        form.focus_previous();
        assert_eq!(form.focus, FormFocus::Back);
    }
}
