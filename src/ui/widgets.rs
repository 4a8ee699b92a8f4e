use crate::keyboard::KeyboardAction;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Single line of text with optional background
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub foreground: Color,
    pub background: Color,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            foreground: Color::Reset,
            background: Color::Reset,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str) {
        let paragraph = Paragraph::new(self.text.as_str())
            .style(Style::default().fg(self.foreground).bg(self.background))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
    }
}

/// Tappable button bound to a keyboard action
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub title: String,
    pub action: KeyboardAction,
}

impl Button {
    pub fn new(title: impl Into<String>, action: KeyboardAction) -> Self {
        Self {
            title: title.into(),
            action,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let mut style = Style::default().fg(Color::White).bg(Color::Red);
        if selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }

        let paragraph = Paragraph::new(self.title.as_str())
            .alignment(Alignment::Center)
            .style(style);
        frame.render_widget(paragraph, area);
    }
}
