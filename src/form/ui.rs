//! Terminal UI for the estimator form
//!
//! This module implements the interactive form using ratatui: a category
//! picker on the left, feature checkboxes on the right, the two buttons and
//! the total underneath.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::debug;

use crate::estimator::Estimator;
use crate::form::view::{FormView, CALCULATE_LABEL, RESET_LABEL, TITLE};

/// Which list the cursor keys move in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Categories,
    Features,
}

/// Application state for the form
pub struct FormApp {
    pub estimator: Estimator,
    pub focus: Pane,
    /// Index into the category options, 0 being the placeholder
    pub category_cursor: usize,
    pub feature_cursor: usize,
}

impl FormApp {
    pub fn new(estimator: Estimator) -> Self {
        Self {
            estimator,
            focus: Pane::Categories,
            category_cursor: 0,
            feature_cursor: 0,
        }
    }

    /// Apply finished fetches and keep both cursors inside their lists
    pub fn sync(&mut self) {
        if self.estimator.apply_ready() > 0 {
            self.clamp_cursors();
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true, // Quit
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Pane::Categories => Pane::Features,
                    Pane::Features => Pane::Categories,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if let Err(e) = self.estimator.compute_cost() {
                    debug!(error = %e, "Calculation rejected");
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.estimator.reset();
                self.focus = Pane::Categories;
                self.category_cursor = 0;
                self.feature_cursor = 0;
            }
            _ => {}
        }
        false // Don't quit
    }

    fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.focus {
            Pane::Categories => (
                &mut self.category_cursor,
                self.estimator.state().categories.len() + 1,
            ),
            Pane::Features => (
                &mut self.feature_cursor,
                self.estimator.state().features.len(),
            ),
        };
        if len == 0 {
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn activate(&mut self) {
        match self.focus {
            Pane::Categories => {
                let category_id = self
                    .category_cursor
                    .checked_sub(1)
                    .and_then(|i| self.estimator.state().categories.get(i))
                    .map(|c| c.id);
                self.estimator.select_category(category_id);
                self.feature_cursor = 0;
                if category_id.is_some() {
                    self.focus = Pane::Features;
                }
            }
            Pane::Features => {
                if let Err(e) = self.estimator.toggle_feature_at(self.feature_cursor) {
                    debug!(error = %e, "Toggle ignored");
                }
            }
        }
    }

    fn clamp_cursors(&mut self) {
        let state = self.estimator.state();
        self.category_cursor = self.category_cursor.min(state.categories.len());
        self.feature_cursor = self
            .feature_cursor
            .min(state.features.len().saturating_sub(1));
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let view = FormView::from_state(self.estimator.state());
        let alert_lines = view.notices.len() + usize::from(view.error_banner.is_some());
        let has_banner = alert_lines > 0;
        let alerts_height = if has_banner { alert_lines as u16 + 2 } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),             // Header
                Constraint::Length(alerts_height), // Alerts
                Constraint::Min(8),                // Lists
                Constraint::Length(3),             // Buttons
                Constraint::Length(3),             // Total
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        if has_banner {
            self.render_alerts(f, chunks[1], &view);
        }

        let lists = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);
        self.render_categories(f, lists[0], &view);
        self.render_features(f, lists[1], &view);

        self.render_buttons(f, chunks[3]);
        self.render_total(f, chunks[4], &view);
    }

    /// Render header with title and key hints
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let title = vec![
            Line::from(Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "↑/↓ move | Tab switch | Enter/Space select | c calculate | r reset | q quit",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Render the validation error and any fetch failures
    fn render_alerts(&self, f: &mut Frame, area: Rect, view: &FormView) {
        let mut lines = Vec::new();
        if let Some(error) = &view.error_banner {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }
        for notice in &view.notices {
            lines.push(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Yellow),
            )));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        f.render_widget(paragraph, area);
    }

    /// Render the category picker
    fn render_categories(&self, f: &mut Frame, area: Rect, view: &FormView) {
        let focused = self.focus == Pane::Categories;

        let lines: Vec<Line> = view
            .category_options
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let marker = if idx == view.selected_option { "(•) " } else { "( ) " };
                let mut style = Style::default();
                if focused && idx == self.category_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                if idx == 0 {
                    style = style.fg(Color::DarkGray);
                }
                Line::from(Span::styled(format!("{}{}", marker, name), style))
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(pane_block("App Category", focused));
        f.render_widget(paragraph, area);
    }

    /// Render feature checkboxes, or the placeholder when there are none
    fn render_features(&self, f: &mut Frame, area: Rect, view: &FormView) {
        let focused = self.focus == Pane::Features;

        let lines: Vec<Line> = match view.features_placeholder() {
            Some(placeholder) => vec![Line::from(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray),
            ))],
            None => view
                .feature_rows
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    let checkbox = if row.checked { "[x] " } else { "[ ] " };
                    let mut style = if row.checked {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default()
                    };
                    if focused && idx == self.feature_cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Line::from(Span::styled(format!("{}{}", checkbox, row.label), style))
                })
                .collect(),
        };

        let paragraph = Paragraph::new(lines).block(pane_block("App Features", focused));
        f.render_widget(paragraph, area);
    }

    /// Render the Calculate Cost and Reset buttons
    fn render_buttons(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                format!("[ {} ]", CALCULATE_LABEL),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" (c)", Style::default().fg(Color::DarkGray)),
            Span::raw("        "),
            Span::styled(format!("[ {} ]", RESET_LABEL), Style::default().fg(Color::Gray)),
            Span::styled(" (r)", Style::default().fg(Color::DarkGray)),
        ]);

        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Render the total cost line
    fn render_total(&self, f: &mut Frame, area: Rect, view: &FormView) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            view.total_line.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}
