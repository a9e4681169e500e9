// ABOUTME: Renders the active step form: labelled inputs, inline errors beneath each field, and buttons

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::choice_popup::ChoicePopupComponent;
use crate::wizard::{FieldInput, FieldKind, FieldSpec, FormFocus, StepForm};

const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const INPUT_BG: Color = Color::Rgb(40, 40, 55);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);

const TEXT_AREA_ROWS: u16 = 3;

pub struct StepFormComponent {
    popup: ChoicePopupComponent,
}

impl StepFormComponent {
    pub fn new() -> Self {
        Self { popup: ChoicePopupComponent::new() }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, form: &StepForm) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" {} ", form.kind().heading()))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // label, value, optional error, spacer per field; then the button row
        let mut constraints = Vec::new();
        for spec in form.fields() {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(value_rows(spec)));
            constraints.push(Constraint::Length(u16::from(form.error(spec.id).is_some())));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(2)
            .constraints(constraints)
            .split(inner);

        let mut popup_anchor = None;

        for (idx, spec) in form.fields().iter().enumerate() {
            let base = idx * 4;
            let focused = form.focus == FormFocus::Field(idx);

            let label_style = if focused {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(SOFT_WHITE)
            };
            let label = Paragraph::new(Line::from(vec![
                Span::styled(if focused { "› " } else { "  " }, Style::default().fg(GOLD)),
                Span::styled(format!("{}:", spec.label), label_style),
            ]));
            frame.render_widget(label, rows[base]);

            let value_area = indent(rows[base + 1]);
            let value = Paragraph::new(value_lines(form, idx, spec, focused))
                .style(Style::default().bg(if focused { INPUT_BG } else { PANEL_BG }));
            frame.render_widget(value, value_area);

            if let Some(message) = form.error(spec.id) {
                let error = Paragraph::new(Line::from(Span::styled(message, Style::default().fg(ERROR_RED))));
                frame.render_widget(error, indent(rows[base + 2]));
            }

            if focused && form.choice_open() {
                popup_anchor = Some(value_area);
            }
        }

        let buttons_row = rows[form.fields().len() * 4];
        self.render_buttons(frame, buttons_row, form);

        if let (Some(anchor), FormFocus::Field(idx)) = (popup_anchor, form.focus) {
            if let Some(FieldInput::Choice(choice)) = form.input(idx) {
                self.popup.render(frame, anchor, inner, choice);
            }
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, form: &StepForm) {
        let mut spans = Vec::new();

        if form.kind().has_back() {
            spans.push(button("Back", form.focus == FormFocus::Back));
            spans.push(Span::styled("   ", Style::default()));
        }
        spans.push(button(form.kind().submit_caption(), form.focus == FormFocus::Submit));

        let row = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
        frame.render_widget(row, area);
    }
}

impl Default for StepFormComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn button(caption: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(SOFT_WHITE).bg(SUBDUED_BORDER)
    };
    Span::styled(format!("[ {caption} ]"), style)
}

fn value_rows(spec: &FieldSpec) -> u16 {
    if spec.kind == FieldKind::TextArea {
        TEXT_AREA_ROWS
    } else {
        1
    }
}

fn indent(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(2),
        width: area.width.saturating_sub(2),
        ..area
    }
}

/// Insert a bar at the char position `cursor`, as the text inputs show it
fn with_cursor(text: &str, cursor: usize) -> String {
    let at = text.char_indices().nth(cursor).map_or(text.len(), |(i, _)| i);
    format!("{}│{}", &text[..at], &text[at..])
}

fn placeholder(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), Style::default().fg(MUTED_GRAY)))
}

fn value_lines(form: &StepForm, idx: usize, spec: &FieldSpec, focused: bool) -> Vec<Line<'static>> {
    let value = form.value(spec.id);
    let text_style = Style::default().fg(SOFT_WHITE);

    match form.input(idx) {
        Some(FieldInput::Text { cursor }) => {
            let shown = if focused { with_cursor(value, *cursor) } else { value.to_string() };
            if shown.is_empty() {
                return vec![placeholder("…")];
            }
            shown.lines().map(|l| Line::from(Span::styled(l.to_string(), text_style))).collect()
        }
        Some(FieldInput::Choice(choice)) => {
            let clearable = matches!(spec.kind, FieldKind::Choice { clearable: true, .. });
            match choice.selected() {
                Some(option) => {
                    let mut spans = vec![
                        Span::styled(option.label, text_style),
                        Span::styled(" ▾", Style::default().fg(MUTED_GRAY)),
                    ];
                    if clearable && focused {
                        spans.push(Span::styled("  (Del to clear)", Style::default().fg(MUTED_GRAY)));
                    }
                    vec![Line::from(spans)]
                }
                None => vec![Line::from(vec![
                    Span::styled("Select...", Style::default().fg(MUTED_GRAY)),
                    Span::styled(" ▾", Style::default().fg(MUTED_GRAY)),
                ])],
            }
        }
        Some(FieldInput::File { buffer, cursor }) => {
            let mut spans = Vec::new();
            if focused {
                spans.push(Span::styled(with_cursor(buffer, *cursor), text_style));
                spans.push(Span::styled("  ", Style::default()));
            }
            if value.is_empty() {
                spans.push(Span::styled("No file chosen", Style::default().fg(MUTED_GRAY)));
            } else {
                spans.push(Span::styled("📎 ", Style::default()));
                spans.push(Span::styled(value.to_string(), Style::default().fg(SELECTION_GREEN)));
            }
            vec![Line::from(spans)]
        }
        None => Vec::new(),
    }
}
