//! View controller wiring the terminal screen to a view-model

use crate::keyboard::KeyboardAction;
use crate::mvvm::{InputCommand, OutputBatch, OutputCommand, ViewModel};
use crate::ui::Screen;
use ratatui::style::Color;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::{debug, info};

/// Owns the screen widgets and a view-model, translating taps into inputs
/// and output batches into widget changes.
pub struct PageController<V> {
    view_model: V,
    screen: Rc<RefCell<Screen>>,
}

impl<V> PageController<V>
where
    V: ViewModel<Input = InputCommand, Output = OutputBatch>,
{
    pub fn new(view_model: V) -> Self {
        Self {
            view_model,
            screen: Rc::new(RefCell::new(Screen::new())),
        }
    }

    /// Register as the view-model's output and request the first page
    pub fn load(&self) {
        let screen = Rc::clone(&self.screen);
        self.view_model.set_output(Some(Rc::new(move |batch: OutputBatch| {
            apply_batch(&mut screen.borrow_mut(), batch);
        })));
        info!("Page view loaded");

        self.view_model.input(InputCommand::Request(true));
    }

    pub fn screen(&self) -> Ref<'_, Screen> {
        self.screen.borrow()
    }

    pub fn view_model(&self) -> &V {
        &self.view_model
    }

    /// Handle a button tap or focus change. Returns false for actions the page does not own.
    pub fn tap(&self, action: KeyboardAction) -> bool {
        match action {
            KeyboardAction::Refresh => self.view_model.input(InputCommand::Request(true)),
            KeyboardAction::LoadMore => self.view_model.input(InputCommand::Request(false)),
            KeyboardAction::ChangeColor => self.view_model.input(InputCommand::RequestColorChange),
            KeyboardAction::SelectNext => self.screen.borrow_mut().select_next(),
            KeyboardAction::SelectPrevious => self.screen.borrow_mut().select_previous(),
            KeyboardAction::Press => {
                let selected = self.screen.borrow().selected_action();
                return self.tap(selected);
            }
            KeyboardAction::Quit | KeyboardAction::ForceQuit => return false,
        }
        true
    }
}

/// Apply each command of a batch to the widgets, in order
pub fn apply_batch(screen: &mut Screen, batch: OutputBatch) {
    for command in batch {
        debug!("Applying {}", command.kind());
        match command {
            OutputCommand::Loading(message) | OutputCommand::Loaded(message) => {
                screen.status.foreground = Color::Reset;
                screen.status.set_text(message);
            }
            OutputCommand::Reload(model) => screen.title.set_text(model.title),
            OutputCommand::ColorChanged(color) => screen.title.set_background(color.to_color()),
            OutputCommand::Failed(message) => {
                screen.status.foreground = Color::Red;
                screen.status.set_text(message);
            }
        }
    }
}
