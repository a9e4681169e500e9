// ABOUTME: Searchable dropdown state for choice fields
// Filters a fixed option list by a typed query and reports the chosen value

use super::step::ChoiceOption;

#[derive(Debug, Clone)]
pub struct ChoiceInput {
    options: &'static [ChoiceOption],
    pub is_open: bool,
    pub query: String,
    /// Indices into `options` that match the query
    pub matches: Vec<usize>,
    pub highlighted: usize,
    selected: Option<usize>,
}

impl ChoiceInput {
    pub fn new(options: &'static [ChoiceOption]) -> Self {
        Self {
            options,
            is_open: false,
            query: String::new(),
            matches: (0..options.len()).collect(),
            highlighted: 0,
            selected: None,
        }
    }

    pub fn options(&self) -> &'static [ChoiceOption] {
        self.options
    }

    pub fn selected(&self) -> Option<&ChoiceOption> {
        self.selected.map(|idx| &self.options[idx])
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.query.clear();
        self.update_matches();
        // Start on the current selection when it is visible
        self.highlighted = self
            .selected
            .and_then(|sel| self.matches.iter().position(|&m| m == sel))
            .unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.query.clear();
        self.update_matches();
    }

    pub fn add_char_to_query(&mut self, ch: char) {
        if self.is_open {
            self.query.push(ch);
            self.update_matches();
            self.highlighted = 0;
        }
    }

    pub fn backspace_query(&mut self) {
        if self.is_open && !self.query.is_empty() {
            self.query.pop();
            self.update_matches();
            self.highlighted = 0;
        }
    }

    pub fn move_highlight_up(&mut self) {
        if self.is_open && !self.matches.is_empty() {
            self.highlighted = if self.highlighted > 0 {
                self.highlighted - 1
            } else {
                self.matches.len() - 1
            };
        }
    }

    pub fn move_highlight_down(&mut self) {
        if self.is_open && !self.matches.is_empty() {
            self.highlighted = if self.highlighted < self.matches.len() - 1 {
                self.highlighted + 1
            } else {
                0
            };
        }
    }

    /// Pick the highlighted option and close. Returns the chosen value, or None
    /// when nothing matches the query.
    pub fn confirm(&mut self) -> Option<&'static str> {
        let chosen = self.matches.get(self.highlighted).copied();
        if let Some(idx) = chosen {
            self.selected = Some(idx);
        }
        self.close();
        chosen.map(|idx| self.options[idx].value)
    }

    /// Select by option value, as when restoring a value from elsewhere
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o.value == value) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    fn update_matches(&mut self) {
        let query = self.query.to_lowercase();
        self.matches = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| query.is_empty() || o.label.to_lowercase().contains(&query))
            .map(|(idx, _)| idx)
            .collect();
    }
}
