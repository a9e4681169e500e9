// ABOUTME: Tests for event handling to ensure keyboard inputs map to the right wizard actions

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use loan_stepper::app::{AppEvent, AppState, EventHandler};
use loan_stepper::wizard::{FieldId, FormFocus, StepForm, StepKind, StepSequencer};

const fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

const fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn press(state: &mut AppState, code: KeyCode) {
    if let Some(event) = EventHandler::handle_key_event(create_key_event(code), state) {
        EventHandler::process_event(event, state);
    }
}

fn state_on(kind: StepKind) -> AppState {
    let mut state = AppState::default();
    state.sequencer = StepSequencer::starting_at(kind);
    state.form = StepForm::new(kind);
    state
}

#[test]
fn test_quit_key_events() {
    let mut state = AppState::default();

    let ctrl_c = EventHandler::handle_key_event(
        create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &mut state,
    );
    assert_eq!(ctrl_c, Some(AppEvent::Quit));

    // Plain 'q' is text, not quit
    let q = EventHandler::handle_key_event(create_key_event(KeyCode::Char('q')), &mut state);
    assert_eq!(q, Some(AppEvent::InputChar('q')));

    EventHandler::process_event(AppEvent::Quit, &mut state);
    assert!(state.should_quit);
}

#[test]
fn test_release_events_are_ignored() {
    let mut state = AppState::default();
    let release = KeyEvent::new_with_kind(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(EventHandler::handle_key_event(release, &mut state), None);
}

#[test]
fn test_focus_navigation_key_events() {
    let mut state = AppState::default();

    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Tab), &mut state),
        Some(AppEvent::NextField)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Down), &mut state),
        Some(AppEvent::NextField)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::BackTab), &mut state),
        Some(AppEvent::PreviousField)
    );

    press(&mut state, KeyCode::Tab);
    assert_eq!(state.form.focus, FormFocus::Field(1));
    press(&mut state, KeyCode::Up);
    assert_eq!(state.form.focus, FormFocus::Field(0));
}

#[test]
fn test_focus_ring_skips_back_on_first_step() {
    let mut state = AppState::default();
    // Borrower: five fields then the submit button
    for _ in 0..5 {
        press(&mut state, KeyCode::Tab);
    }
    assert_eq!(state.form.focus, FormFocus::Submit);
    press(&mut state, KeyCode::Tab);
    assert_eq!(state.form.focus, FormFocus::Field(0));

    let mut state = state_on(StepKind::Director);
    press(&mut state, KeyCode::BackTab);
    assert_eq!(state.form.focus, FormFocus::Submit);
    press(&mut state, KeyCode::BackTab);
    assert_eq!(state.form.focus, FormFocus::Back);
}

#[test]
fn test_typing_edits_focused_text_field() {
    let mut state = AppState::default();
    for ch in "Maple".chars() {
        press(&mut state, KeyCode::Char(ch));
    }
    press(&mut state, KeyCode::Backspace);
    press(&mut state, KeyCode::Home);
    press(&mut state, KeyCode::Delete);

    assert_eq!(state.form.value(FieldId::PropertyName), "apl");
}

#[test]
fn test_alt_enter_inserts_newline_only_in_address() {
    let mut state = AppState::default();
    let alt_enter = create_key_event_with_modifiers(KeyCode::Enter, KeyModifiers::ALT);

    // Property Address is the fourth field
    for _ in 0..3 {
        press(&mut state, KeyCode::Tab);
    }
    for ch in "12 Main St".chars() {
        press(&mut state, KeyCode::Char(ch));
    }
    let event = EventHandler::handle_key_event(alt_enter, &mut state);
    assert_eq!(event, Some(AppEvent::InsertNewline));
    EventHandler::process_event(AppEvent::InsertNewline, &mut state);
    press(&mut state, KeyCode::Char('X'));
    assert_eq!(state.form.value(FieldId::PropertyAddress), "12 Main St\nX");

    // Single-line field ignores it
    let mut state = AppState::default();
    EventHandler::process_event(AppEvent::InsertNewline, &mut state);
    assert_eq!(state.form.value(FieldId::PropertyName), "");
}

#[test]
fn test_dropdown_keys_when_open() {
    let mut state = AppState::default();
    press(&mut state, KeyCode::Tab);

    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char(' ')), &mut state),
        Some(AppEvent::OpenChoice)
    );
    press(&mut state, KeyCode::Char(' '));
    assert!(state.form.choice_open());

    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Esc), &mut state),
        Some(AppEvent::ChoiceClose)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Down), &mut state),
        Some(AppEvent::ChoiceDown)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Up), &mut state),
        Some(AppEvent::ChoiceUp)
    );

    press(&mut state, KeyCode::Esc);
    assert!(!state.form.choice_open());
    assert_eq!(state.active_kind(), StepKind::Borrower);
}

#[test]
fn test_typing_on_choice_filters_options() {
    let mut state = state_on(StepKind::Financial);
    press(&mut state, KeyCode::Tab);

    for ch in "hyd".chars() {
        press(&mut state, KeyCode::Char(ch));
    }
    assert!(state.form.choice_open());
    press(&mut state, KeyCode::Enter);

    assert!(!state.form.choice_open());
    assert_eq!(state.form.value(FieldId::City), "hyderabad");
}

#[test]
fn test_escape_retreats_when_no_dropdown_open() {
    let mut state = state_on(StepKind::Financial);
    press(&mut state, KeyCode::Esc);
    assert_eq!(state.active_kind(), StepKind::Director);

    // Nothing before the first step
    let mut state = AppState::default();
    press(&mut state, KeyCode::Esc);
    assert_eq!(state.active_kind(), StepKind::Borrower);
}
