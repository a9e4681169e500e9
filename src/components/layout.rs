// ABOUTME: Main layout component: header with progress track, active step form, status footer

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::{StepFormComponent, StepperComponent};
use crate::app::{AppState, StatusLevel};

// Premium color palette (TUI Style Guide)
const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const DARK_BG: Color = Color::Rgb(25, 25, 35);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);

pub struct LayoutComponent {
    stepper: StepperComponent,
    step_form: StepFormComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            stepper: StepperComponent::new(),
            step_form: StepFormComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title + progress track
                Constraint::Min(10),   // Step form
                Constraint::Length(3), // Status + key hints
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        self.step_form.render(frame, layout[1], &state.form);
        self.render_footer(frame, layout[2], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("Loan Application", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  step {} of {}", state.sequencer.active_step() + 1, state.sequencer.len()),
                Style::default().fg(MUTED_GRAY),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, rows[0]);

        self.stepper.render(frame, rows[2], &state.sequencer);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(DARK_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        if let Some(status) = &state.status {
            let color = match status.level {
                StatusLevel::Info => SOFT_WHITE,
                StatusLevel::Success => SELECTION_GREEN,
                StatusLevel::Error => ERROR_RED,
            };
            let line = Paragraph::new(Line::from(Span::styled(status.text.as_str(), Style::default().fg(color))))
                .alignment(Alignment::Center);
            frame.render_widget(line, rows[0]);
        }

        if state.show_key_hints {
            let hints = if state.form.choice_open() {
                vec![("↑/↓", "Move"), ("Enter", "Select"), ("Esc", "Close")]
            } else {
                vec![
                    ("Tab", "Next field"),
                    ("Enter", "Continue"),
                    ("Esc", "Back"),
                    ("Ctrl-C", "Quit"),
                ]
            };

            let mut spans = Vec::new();
            for (idx, (key, action)) in hints.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)));
                }
                spans.push(Span::styled("[", Style::default().fg(SUBDUED_BORDER)));
                spans.push(Span::styled(*key, Style::default().fg(GOLD)));
                spans.push(Span::styled("]", Style::default().fg(SUBDUED_BORDER)));
                spans.push(Span::styled(format!(" {action}"), Style::default().fg(MUTED_GRAY)));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), rows[1]);
        }
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
