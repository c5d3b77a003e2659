use ratatui::style::{Color, Modifier, Style};

/// Colour palette for the interactive view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub heading_fg: Color,
    pub header_fg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub title_bar_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub scrollbar_fg: Color,
    pub hint_fg: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "Terang",
            background: Color::Rgb(250, 250, 245),
            foreground: Color::Rgb(40, 40, 40),
            heading_fg: Color::Rgb(46, 125, 50),
            header_fg: Color::Rgb(120, 110, 60),
            border: Color::Rgb(190, 190, 180),
            border_focused: Color::Rgb(46, 125, 50),
            highlight_bg: Color::Rgb(255, 235, 59),
            highlight_fg: Color::Rgb(20, 20, 20),
            title_bar_fg: Color::Rgb(46, 125, 50),
            status_bar_bg: Color::Rgb(46, 125, 50),
            status_bar_fg: Color::Rgb(255, 255, 255),
            scrollbar_fg: Color::Rgb(160, 160, 150),
            hint_fg: Color::Rgb(130, 130, 130),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "Gelap",
            background: Color::Rgb(24, 26, 27),
            foreground: Color::Rgb(220, 220, 220),
            heading_fg: Color::Rgb(129, 199, 132),
            header_fg: Color::Rgb(230, 200, 110),
            border: Color::Rgb(70, 70, 80),
            border_focused: Color::Rgb(129, 199, 132),
            highlight_bg: Color::Rgb(251, 192, 45),
            highlight_fg: Color::Rgb(20, 20, 20),
            title_bar_fg: Color::Rgb(129, 199, 132),
            status_bar_bg: Color::Rgb(40, 60, 45),
            status_bar_fg: Color::Rgb(230, 230, 230),
            scrollbar_fg: Color::Rgb(100, 100, 110),
            hint_fg: Color::Rgb(120, 120, 130),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }

    pub fn content_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Heading of the section Enter folds.
    pub fn focused_heading_style(&self) -> Style {
        self.heading_style()
            .fg(self.border_focused)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style of text inside a highlight marker.
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_fg)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .bg(self.status_bar_bg)
            .fg(self.status_bar_fg)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.hint_fg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
