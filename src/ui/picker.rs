//! Grouped branch list and filter input widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::Theme;

/// A row in the picker list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerItem {
    /// Non-selectable group heading
    Separator(&'static str),
    /// A selectable branch
    Branch {
        name: String,
        /// Whether this branch is currently checked out
        current: bool,
    },
}

impl PickerItem {
    pub fn is_branch(&self) -> bool {
        matches!(self, PickerItem::Branch { .. })
    }

    pub fn branch_name(&self) -> Option<&str> {
        match self {
            PickerItem::Branch { name, .. } => Some(name),
            PickerItem::Separator(_) => None,
        }
    }
}

/// Picker list widget state
pub struct PickerListState {
    pub list_state: ListState,
    pub items: Vec<PickerItem>,
}

impl PickerListState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            items: Vec::new(),
        }
    }

    /// Move the cursor to the next branch row, skipping separators
    pub fn select_next(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let start = self.list_state.selected().map(|i| i + 1).unwrap_or(0);
        for offset in 0..len {
            let idx = (start + offset) % len;
            if self.items[idx].is_branch() {
                self.list_state.select(Some(idx));
                return;
            }
        }
    }

    /// Move the cursor to the previous branch row, skipping separators
    pub fn select_previous(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let start = self.list_state.selected().unwrap_or(0);
        for offset in 1..=len {
            let idx = (start + len - offset) % len;
            if self.items[idx].is_branch() {
                self.list_state.select(Some(idx));
                return;
            }
        }
    }

    pub fn selected_branch(&self) -> Option<String> {
        self.list_state
            .selected()
            .and_then(|i| self.items.get(i))
            .and_then(|item| item.branch_name().map(str::to_string))
    }

    /// Replace the rows, keeping the cursor on the same branch if possible
    pub fn update_items(&mut self, items: Vec<PickerItem>) {
        let selected_name = self.selected_branch();
        self.items = items;

        if let Some(name) = selected_name {
            if let Some(idx) = self
                .items
                .iter()
                .position(|item| item.branch_name() == Some(name.as_str()))
            {
                self.list_state.select(Some(idx));
                return;
            }
        }

        // Fallback: first branch row, or nothing if only separators remain
        let first = self.items.iter().position(PickerItem::is_branch);
        self.list_state.select(first);
    }
}

impl Default for PickerListState {
    fn default() -> Self {
        Self::new()
    }
}

/// The grouped branch list widget
pub struct PickerListWidget<'a> {
    theme: &'a Theme,
}

impl<'a> PickerListWidget<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl StatefulWidget for PickerListWidget<'_> {
    type State = PickerListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let items: Vec<ListItem> = state
            .items
            .iter()
            .map(|item| match item {
                PickerItem::Separator(label) => ListItem::new(Line::from(Span::styled(
                    format!("────── {} ──────", label),
                    Style::default().fg(self.theme.muted),
                ))),
                PickerItem::Branch { name, current } => {
                    let mut spans =
                        vec![Span::styled(name.clone(), Style::default().fg(self.theme.fg))];
                    if *current {
                        spans.push(Span::styled(
                            " (current)",
                            Style::default().fg(self.theme.success),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                }
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.primary))
            .title(Span::styled(
                " Choose a branch ",
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(self.theme.primary)
                    .fg(self.theme.bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        StatefulWidget::render(list, area, buf, &mut state.list_state);
    }
}

/// Single-line display of the current filter query
pub struct FilterInputWidget<'a> {
    query: &'a str,
    theme: &'a Theme,
}

impl<'a> FilterInputWidget<'a> {
    pub fn new(query: &'a str, theme: &'a Theme) -> Self {
        Self { query, theme }
    }
}

impl Widget for FilterInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted))
            .title(Span::styled(" Filter ", Style::default().fg(self.theme.muted)));

        let line = Line::from(vec![
            Span::styled(self.query.to_string(), Style::default().fg(self.theme.fg)),
            Span::styled("█", Style::default().fg(self.theme.primary)),
        ]);

        Paragraph::new(line).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<PickerItem> {
        vec![
            PickerItem::Separator("Available locally"),
            PickerItem::Branch {
                name: "dev".to_string(),
                current: false,
            },
            PickerItem::Branch {
                name: "main".to_string(),
                current: true,
            },
            PickerItem::Separator("Available on remote"),
            PickerItem::Branch {
                name: "feature".to_string(),
                current: false,
            },
        ]
    }

    #[test]
    fn update_items_selects_first_branch_row() {
        let mut state = PickerListState::new();
        state.update_items(rows());
        assert_eq!(state.selected_branch().as_deref(), Some("dev"));
    }

    #[test]
    fn cursor_skips_separators_and_wraps() {
        let mut state = PickerListState::new();
        state.update_items(rows());

        state.select_next();
        assert_eq!(state.selected_branch().as_deref(), Some("main"));
        state.select_next();
        assert_eq!(state.selected_branch().as_deref(), Some("feature"));
        state.select_next();
        assert_eq!(state.selected_branch().as_deref(), Some("dev"));

        state.select_previous();
        assert_eq!(state.selected_branch().as_deref(), Some("feature"));
        state.select_previous();
        assert_eq!(state.selected_branch().as_deref(), Some("main"));
    }

    #[test]
    fn update_items_keeps_cursor_on_same_branch() {
        let mut state = PickerListState::new();
        state.update_items(rows());
        state.select_next();
        assert_eq!(state.selected_branch().as_deref(), Some("main"));

        state.update_items(vec![
            PickerItem::Separator("Available locally"),
            PickerItem::Branch {
                name: "main".to_string(),
                current: true,
            },
            PickerItem::Separator("Available on remote"),
        ]);
        assert_eq!(state.selected_branch().as_deref(), Some("main"));
    }

    #[test]
    fn separator_only_rows_leave_nothing_selected() {
        let mut state = PickerListState::new();
        state.update_items(vec![
            PickerItem::Separator("Available locally"),
            PickerItem::Separator("Available on remote"),
        ]);
        assert_eq!(state.selected_branch(), None);

        state.select_next();
        assert_eq!(state.selected_branch(), None);
    }
}
