// ABOUTME: Event handling system mapping keyboard input to wizard actions

use crate::app::AppState;
use crate::wizard::FieldKind;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    // Focus movement
    NextField,
    PreviousField,
    // Text editing
    InputChar(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    InsertNewline, // Alt-Enter in the multi-line address
    // Enter on the focused element: submit, open/confirm a dropdown, select a file, or Back
    Activate,
    Back,
    // Dropdown events
    OpenChoice,
    ChoiceUp,
    ChoiceDown,
    ChoiceClose,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        // Ignore release/repeat reports from terminals that send them
        if key_event.kind != KeyEventKind::Press {
            return None;
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('c' | 'q') => Some(AppEvent::Quit),
                _ => None,
            };
        }

        // Dropdown open: keys drive the option list
        if state.form.choice_open() {
            return match key_event.code {
                KeyCode::Esc => Some(AppEvent::ChoiceClose),
                KeyCode::Up => Some(AppEvent::ChoiceUp),
                KeyCode::Down => Some(AppEvent::ChoiceDown),
                KeyCode::Enter => Some(AppEvent::Activate),
                KeyCode::Backspace => Some(AppEvent::Backspace),
                KeyCode::Tab => Some(AppEvent::NextField),
                KeyCode::BackTab => Some(AppEvent::PreviousField),
                KeyCode::Char(ch) => Some(AppEvent::InputChar(ch)),
                _ => None,
            };
        }

        let on_choice = matches!(
            state.form.focused_field().map(|f| f.kind),
            Some(FieldKind::Choice { .. })
        );

        match key_event.code {
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::PreviousField),
            KeyCode::Enter if key_event.modifiers.contains(KeyModifiers::ALT) => Some(AppEvent::InsertNewline),
            KeyCode::Enter => Some(AppEvent::Activate),
            KeyCode::Esc => Some(AppEvent::Back),
            KeyCode::Backspace => Some(AppEvent::Backspace),
            KeyCode::Delete => Some(AppEvent::Delete),
            KeyCode::Left => Some(AppEvent::CursorLeft),
            KeyCode::Right => Some(AppEvent::CursorRight),
            KeyCode::Home => Some(AppEvent::CursorHome),
            KeyCode::End => Some(AppEvent::CursorEnd),
            KeyCode::Char(' ') if on_choice => Some(AppEvent::OpenChoice),
            KeyCode::Char(ch) => Some(AppEvent::InputChar(ch)),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        tracing::debug!("Event: {:?}", event);
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::NextField => state.form.focus_next(),
            AppEvent::PreviousField => state.form.focus_previous(),
            AppEvent::InputChar(ch) => state.form.input_char(ch),
            AppEvent::Backspace => state.form.backspace(),
            AppEvent::Delete => state.form.delete(),
            AppEvent::CursorLeft => state.form.cursor_left(),
            AppEvent::CursorRight => state.form.cursor_right(),
            AppEvent::CursorHome => state.form.cursor_home(),
            AppEvent::CursorEnd => state.form.cursor_end(),
            AppEvent::InsertNewline => state.form.insert_newline(),
            AppEvent::Activate => state.activate_focused(),
            AppEvent::Back => state.go_back(),
            AppEvent::OpenChoice => state.form.open_choice(),
            AppEvent::ChoiceUp => state.form.choice_highlight_up(),
            AppEvent::ChoiceDown => state.form.choice_highlight_down(),
            AppEvent::ChoiceClose => state.form.close_choice(),
        }
    }
}
