//! UI widgets for the exercise browser.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;
use crate::data::Exercise;

/// Exercise list panel widget
pub struct ExerciseList<'a> {
    exercises: &'a [Exercise],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> ExerciseList<'a> {
    pub fn new(exercises: &'a [Exercise], selected: usize, theme: &'a Theme) -> Self {
        ExerciseList {
            exercises,
            selected,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let items: Vec<ListItem> = self
            .exercises
            .iter()
            .map(|e| {
                ListItem::new(Line::from(vec![
                    Span::raw(e.name.clone()),
                    Span::raw("  "),
                    Span::styled(e.difficulty.clone(), self.theme.difficulty_style(&e.difficulty)),
                    Span::raw("  "),
                    Span::styled(e.body_part.clone(), self.theme.dimmed_style()),
                ]))
            })
            .collect();

        let block = Block::default()
            .title(format!(" Exercises ({}) ", self.exercises.len()))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(if focused {
                self.theme.focused_border_style()
            } else {
                self.theme.border_style()
            });

        let list = List::new(items)
            .block(block)
            .style(self.theme.normal_style())
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Detail panel for a single exercise
pub struct DetailPanel<'a> {
    exercise: &'a Exercise,
    theme: &'a Theme,
}

impl<'a> DetailPanel<'a> {
    pub fn new(exercise: &'a Exercise, theme: &'a Theme) -> Self {
        DetailPanel { exercise, theme }
    }

    fn detail_row(&self, label: &str, value: Span<'a>) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{label:<20}"), self.theme.dimmed_style()),
            value,
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let e = self.exercise;

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(
            "Description",
            self.theme.title_style(),
        )));
        lines.push(Line::from(e.description.clone()));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Details", self.theme.title_style())));
        lines.push(self.detail_row("Body Part", Span::raw(e.body_part.clone())));
        lines.push(self.detail_row(
            "Difficulty",
            Span::styled(e.difficulty.clone(), self.theme.difficulty_style(&e.difficulty)),
        ));
        lines.push(self.detail_row("Equipment Needed", Span::raw(e.equipment_label())));
        lines.push(self.detail_row(
            "Image",
            Span::styled(e.image.clone(), self.theme.dimmed_style()),
        ));

        let block = Block::default()
            .title(format!(" {} ", e.name))
            .title_style(self.theme.title_style())
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(if focused {
                self.theme.focused_border_style()
            } else {
                self.theme.border_style()
            });

        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(self.theme.normal_style())
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    count: Option<usize>,
    synced_at: Option<DateTime<Utc>>,
    from_cache: bool,
    error: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        count: Option<usize>,
        synced_at: Option<DateTime<Utc>>,
        from_cache: bool,
        error: Option<&'a str>,
    ) -> Self {
        StatusBar {
            count,
            synced_at,
            from_cache,
            error,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let text = if let Some(e) = self.error {
            format!("Error: {e}")
        } else {
            let mut parts = vec!["workout-tui".to_string()];
            if let Some(count) = self.count {
                parts.push(format!("{count} exercises"));
            }
            if self.from_cache {
                parts.push("offline (cached)".to_string());
            }
            if let Some(synced_at) = self.synced_at {
                parts.push(format!("synced {}", synced_at.format("%Y-%m-%d %H:%M UTC")));
            }
            parts.push("[h] Help [q] Quit".to_string());
            parts.join(" | ")
        };

        let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}

/// Full-screen message shown while the catalog is being fetched
pub struct LoadingScreen<'a> {
    theme: &'a Theme,
}

impl<'a> LoadingScreen<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        LoadingScreen { theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new("Loading exercises...")
            .style(self.theme.title_style())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, vertically_centered(area));
    }
}

/// Full-screen message shown when the state is Error
pub struct ErrorScreen<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> ErrorScreen<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        ErrorScreen { message, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                format!("Error: {}", self.message),
                self.theme.error_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[r] Retry  [q] Quit",
                self.theme.dimmed_style(),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, vertically_centered(area));
    }
}

/// Carve out a band in the vertical middle of the area for splash text
fn vertically_centered(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);
    chunks[1]
}
