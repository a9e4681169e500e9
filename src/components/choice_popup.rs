// ABOUTME: Dropdown popup listing the options of a choice field filtered by the typed query

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::wizard::ChoiceInput;

const GOLD: Color = Color::Rgb(255, 215, 0);
const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
const PANEL_BG: Color = Color::Rgb(30, 30, 40);
const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);

const MAX_VISIBLE: u16 = 8;

pub struct ChoicePopupComponent;

impl ChoicePopupComponent {
    pub fn new() -> Self {
        Self
    }

    /// Draw the list just below `anchor`, clipped to `bounds`
    pub fn render(&self, frame: &mut Frame, anchor: Rect, bounds: Rect, choice: &ChoiceInput) {
        let rows = (choice.matches.len().max(1) as u16).min(MAX_VISIBLE);
        let y = anchor.y.saturating_add(anchor.height);
        let available = bounds.y.saturating_add(bounds.height).saturating_sub(y);
        if available < 3 {
            return;
        }

        let area = Rect {
            x: anchor.x,
            y,
            width: anchor.width.min(40).max(20).min(bounds.width),
            height: (rows + 2).min(available),
        };
        frame.render_widget(Clear, area);

        let title = if choice.query.is_empty() {
            " Type to search ".to_string()
        } else {
            format!(" Search: {} ", choice.query)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(GOLD))
            .style(Style::default().bg(PANEL_BG))
            .title(title);

        let selected_value = choice.selected().map(|o| o.value);
        let items: Vec<ListItem> = if choice.matches.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No options",
                Style::default().fg(MUTED_GRAY),
            )))]
        } else {
            choice
                .matches
                .iter()
                .map(|&idx| {
                    let option = &choice.options()[idx];
                    let marker = if Some(option.value) == selected_value { "✓ " } else { "  " };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, Style::default().fg(SELECTION_GREEN)),
                        Span::styled(option.label, Style::default().fg(SOFT_WHITE)),
                    ]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD));
        // Stateful render keeps the highlighted option scrolled into view
        let mut list_state = ListState::default();
        if !choice.matches.is_empty() {
            list_state.select(Some(choice.highlighted));
        }
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

impl Default for ChoicePopupComponent {
    fn default() -> Self {
        Self::new()
    }
}
