//! Color theme for the terminal front end.

use ratatui::style::{Color, Modifier, Style};

/// UI color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub active: Color,
    pub title: Color,
    pub border: Color,
    pub hint: Color,
    pub popup_success: Color,
    pub popup_error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Black,
            text: Color::Rgb(255, 105, 108),
            active: Color::Rgb(255, 20, 147),
            title: Color::White,
            border: Color::DarkGray,
            hint: Color::DarkGray,
            popup_success: Color::Green,
            popup_error: Color::Red,
        }
    }
}

impl Theme {
    /// Style for an entry in a selectable list.
    pub fn item_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text)
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }
}
