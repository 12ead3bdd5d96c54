//! Theme configuration for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub border: Color,
    pub title: Color,
    pub error: Color,
    pub difficulty_beginner: Color,
    pub difficulty_intermediate: Color,
    pub difficulty_advanced: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            bg: Color::Reset,
            fg: Color::White,
            highlight_bg: Color::Rgb(60, 60, 80),
            highlight_fg: Color::White,
            border: Color::Rgb(100, 100, 120),
            title: Color::Cyan,
            error: Color::Red,
            // Named colors for better terminal compatibility
            difficulty_beginner: Color::Green,
            difficulty_intermediate: Color::Yellow,
            difficulty_advanced: Color::Red,
        }
    }
}

impl Theme {
    /// Get style for normal text
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for highlighted/selected items
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for focused panel borders (distinct from normal borders)
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for titles
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Get style for error messages
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Get style for secondary text (labels, hints)
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.border).add_modifier(Modifier::DIM)
    }

    /// Get style for a difficulty label; unknown labels fall back to the
    /// normal foreground
    pub fn difficulty_style(&self, difficulty: &str) -> Style {
        let color = match difficulty.to_ascii_lowercase().as_str() {
            "beginner" | "easy" => self.difficulty_beginner,
            "intermediate" | "medium" => self.difficulty_intermediate,
            "advanced" | "hard" => self.difficulty_advanced,
            _ => self.fg,
        };
        Style::default().fg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_colors_are_distinct() {
        let theme = Theme::default();
        let beginner = theme.difficulty_style("Beginner");
        let intermediate = theme.difficulty_style("Intermediate");
        let advanced = theme.difficulty_style("Advanced");
        assert_ne!(beginner, intermediate);
        assert_ne!(intermediate, advanced);
        assert_ne!(beginner, advanced);
    }

    #[test]
    fn test_difficulty_matching_is_case_insensitive() {
        let theme = Theme::default();
        assert_eq!(
            theme.difficulty_style("beginner"),
            theme.difficulty_style("BEGINNER")
        );
    }

    #[test]
    fn test_unknown_difficulty_uses_normal_foreground() {
        let theme = Theme::default();
        assert_eq!(
            theme.difficulty_style("Impossible"),
            Style::default().fg(theme.fg)
        );
    }
}
