//! Interactive branch picker
//!
//! Renders the filter input above the grouped branch list and recomputes
//! the fuzzy-filtered rows on every keystroke.

use color_eyre::eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};

use crate::git::BranchSet;
use crate::ui::{FilterInputWidget, PickerItem, PickerListState, PickerListWidget, Theme};

/// Number of branch list rows visible at once
const PAGE_SIZE: u16 = 20;

const LOCAL_SEPARATOR: &str = "Available locally";
const REMOTE_SEPARATOR: &str = "Available on remote";

/// Outcome of the interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The user confirmed the highlighted branch
    Branch(String),
    /// The user cancelled the prompt
    Cancelled,
}

/// Interactive picker over a set of branches
pub struct App {
    branches: BranchSet,
    query: String,
    matcher: SkimMatcherV2,
    picker_state: PickerListState,
    theme: Theme,
}

impl App {
    /// Create a picker showing the full branch set
    pub fn new(branches: BranchSet) -> Self {
        let mut app = Self {
            branches,
            query: String::new(),
            matcher: SkimMatcherV2::default(),
            picker_state: PickerListState::new(),
            theme: Theme::default(),
        };
        app.update_rows();
        app
    }

    /// Run the prompt loop until the user confirms or cancels
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<Selection> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(selection) = self.on_key_event(key) {
                    return Ok(selection);
                }
            }
        }
    }

    /// Handle a key press; returns a selection once the prompt is done
    fn on_key_event(&mut self, key: KeyEvent) -> Option<Selection> {
        match key.code {
            KeyCode::Esc => return Some(Selection::Cancelled),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Selection::Cancelled);
            }
            KeyCode::Enter => {
                if let Some(name) = self.picker_state.selected_branch() {
                    return Some(Selection::Branch(name));
                }
            }
            KeyCode::Up => self.picker_state.select_previous(),
            KeyCode::Down => self.picker_state.select_next(),
            KeyCode::Backspace => {
                self.query.pop();
                self.update_rows();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.update_rows();
            }
            _ => {}
        }
        None
    }

    /// Rebuild the visible rows from the current filter query.
    ///
    /// Separators stay in place even when a group has no matches, so the
    /// two-group structure remains visible.
    fn update_rows(&mut self) {
        let local = self.filter_group(&self.branches.local);
        let remote = self.filter_group(&self.branches.remote_only);
        let checked_out = self.branches.checked_out.clone();

        let mut rows = Vec::with_capacity(local.len() + remote.len() + 2);
        rows.push(PickerItem::Separator(LOCAL_SEPARATOR));
        rows.extend(local.into_iter().map(|name| PickerItem::Branch {
            current: checked_out.as_deref() == Some(name.as_str()),
            name,
        }));
        rows.push(PickerItem::Separator(REMOTE_SEPARATOR));
        rows.extend(remote.into_iter().map(|name| PickerItem::Branch {
            name,
            current: false,
        }));

        self.picker_state.update_items(rows);
    }

    /// Apply the fuzzy filter to one group of names.
    ///
    /// An empty query keeps the group's stored order; otherwise matches are
    /// ordered best score first, ties keeping stored order.
    fn filter_group(&self, names: &[String]) -> Vec<String> {
        if self.query.is_empty() {
            return names.to_vec();
        }

        let mut scored: Vec<(i64, &String)> = names
            .iter()
            .filter_map(|name| {
                self.matcher
                    .fuzzy_match(name, &self.query)
                    .map(|score| (score, name))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored.into_iter().map(|(_, name)| name.clone()).collect()
    }

    /// Render the filter input, the branch list, and the key hints
    fn render(&mut self, frame: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(PAGE_SIZE + 2),
            Constraint::Length(1),
        ])
        .split(frame.area());

        frame.render_widget(FilterInputWidget::new(&self.query, &self.theme), layout[0]);
        frame.render_stateful_widget(
            PickerListWidget::new(&self.theme),
            layout[1],
            &mut self.picker_state,
        );
        self.render_hints(frame, layout[2]);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled("↑/↓", Style::default().fg(self.theme.primary)),
            Span::styled(" move  ", Style::default().fg(self.theme.muted)),
            Span::styled("Enter", Style::default().fg(self.theme.primary)),
            Span::styled(" checkout  ", Style::default().fg(self.theme.muted)),
            Span::styled("Esc", Style::default().fg(self.theme.primary)),
            Span::styled(" cancel  ", Style::default().fg(self.theme.muted)),
            Span::styled("type", Style::default().fg(self.theme.primary)),
            Span::styled(" to filter", Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }
}
