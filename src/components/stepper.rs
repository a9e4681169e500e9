// ABOUTME: Linear progress track showing every step with the active one highlighted

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::wizard::StepSequencer;

const GOLD: Color = Color::Rgb(255, 215, 0);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);

pub struct StepperComponent;

impl StepperComponent {
    pub fn new() -> Self {
        Self
    }

    /// One marker per step: `(n) Label`. Only current vs not-current is shown.
    pub fn render(&self, frame: &mut Frame, area: Rect, sequencer: &StepSequencer) {
        let markers = sequencer.markers();
        let mut spans = Vec::with_capacity(markers.len() * 4);

        for (idx, marker) in markers.iter().enumerate() {
            let (number_style, label_style) = if marker.active {
                (
                    Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD),
                    Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
                )
            } else {
                (Style::default().fg(MUTED_GRAY), Style::default().fg(MUTED_GRAY))
            };

            spans.push(Span::styled(format!("({})", marker.position), number_style));
            spans.push(Span::styled(" ", Style::default()));
            spans.push(Span::styled(marker.label, label_style));

            if idx < markers.len() - 1 {
                spans.push(Span::styled(" ── ", Style::default().fg(SUBDUED_BORDER)));
            }
        }

        let track = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(track, area);
    }
}

impl Default for StepperComponent {
    fn default() -> Self {
        Self::new()
    }
}
