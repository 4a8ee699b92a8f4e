pub mod widgets;

pub use widgets::{Button, Label};

use crate::keyboard::{KeyboardAction, KeyboardManager};
use crate::mvvm::model::INITIAL_TITLE;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widgets of the page view
#[derive(Debug, Clone)]
pub struct Screen {
    pub status: Label,
    pub title: Label,
    pub buttons: Vec<Button>,
    selected: usize,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            status: Label::new(""),
            title: Label::new(INITIAL_TITLE),
            buttons: vec![
                Button::new("刷新", KeyboardAction::Refresh),
                Button::new("加载更多", KeyboardAction::LoadMore),
                Button::new("更新颜色", KeyboardAction::ChangeColor),
            ],
            selected: 0,
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.buttons.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + self.buttons.len() - 1) % self.buttons.len();
    }

    /// Action of the focused button
    pub fn selected_action(&self) -> KeyboardAction {
        self.buttons[self.selected].action
    }

    pub fn render(&self, frame: &mut Frame, keyboard: &KeyboardManager) {
        let button_count = self.buttons.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(button_count * 2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.size());

        self.status.render(frame, chunks[0], "Status");
        self.title.render(frame, chunks[1], "Data");
        self.render_buttons(frame, chunks[2]);
        self.render_footer(frame, chunks[4], keyboard);
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.buttons
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(area);

        for (i, button) in self.buttons.iter().enumerate() {
            let row = Rect {
                width: row_width(rows[i].width),
                height: 1,
                ..rows[i]
            };
            button.render(frame, row, i == self.selected);
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, keyboard: &KeyboardManager) {
        let hints: Vec<Span> = [
            KeyboardAction::Refresh,
            KeyboardAction::LoadMore,
            KeyboardAction::ChangeColor,
            KeyboardAction::Quit,
        ]
        .iter()
        .filter_map(|action| keyboard.hint(*action))
        .map(|hint| Span::styled(format!(" {} ", hint), Style::default().fg(Color::DarkGray)))
        .collect();

        frame.render_widget(Paragraph::new(Line::from(hints)), area);
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

fn row_width(available: u16) -> u16 {
    available.min(24)
}
