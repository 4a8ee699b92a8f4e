use crate::controller::PageController;
use crate::keyboard::{KeyboardAction, KeyboardManager};
use crate::mvvm::{InputCommand, OutputBatch, ViewModel};
use crossterm::event::{KeyEvent, KeyEventKind};

pub struct EventHandler {
    should_quit: bool,
    keyboard_manager: KeyboardManager,
}

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    /// The key was bound to a page action and forwarded
    Dispatched(KeyboardAction),
    /// The key has no binding
    Ignored,
    Quit,
}

impl EventHandler {
    pub fn new(keyboard_manager: KeyboardManager) -> Self {
        Self {
            should_quit: false,
            keyboard_manager,
        }
    }

    pub fn keyboard_manager(&self) -> &KeyboardManager {
        &self.keyboard_manager
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle a key event using the configured bindings
    pub fn handle_key_event<V>(&mut self, key: KeyEvent, controller: &PageController<V>) -> EventResult
    where
        V: ViewModel<Input = InputCommand, Output = OutputBatch>,
    {
        // Only presses; some terminals also report releases.
        if key.kind != KeyEventKind::Press {
            return EventResult::Continue;
        }

        let Some(action) = self.keyboard_manager.get_action(key.code, key.modifiers) else {
            tracing::trace!("Unbound key {:?}", key.code);
            return EventResult::Ignored;
        };

        match action {
            KeyboardAction::Quit | KeyboardAction::ForceQuit => {
                self.should_quit = true;
                EventResult::Quit
            }
            _ => {
                controller.tap(action);
                EventResult::Dispatched(action)
            }
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(KeyboardManager::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvvm::{OutputSink, ViewModel};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::RefCell;

    /// View-model that only records its inputs
    #[derive(Default)]
    struct RecordingViewModel {
        inputs: RefCell<Vec<InputCommand>>,
        output: RefCell<Option<OutputSink<OutputBatch>>>,
    }

    impl ViewModel for RecordingViewModel {
        type Input = InputCommand;
        type Output = OutputBatch;

        fn input(&self, input: InputCommand) {
            self.inputs.borrow_mut().push(input);
        }

        fn set_output(&self, output: Option<OutputSink<OutputBatch>>) {
            *self.output.borrow_mut() = output;
        }

        fn output(&self) -> Option<OutputSink<OutputBatch>> {
            self.output.borrow().clone()
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keys_map_to_inputs() {
        let controller = PageController::new(RecordingViewModel::default());
        let mut handler = EventHandler::default();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('r')), &controller),
            EventResult::Dispatched(KeyboardAction::Refresh)
        );
        handler.handle_key_event(press(KeyCode::Char('m')), &controller);
        handler.handle_key_event(press(KeyCode::Char('c')), &controller);

        assert_eq!(
            *controller.view_model().inputs.borrow(),
            vec![
                InputCommand::Request(true),
                InputCommand::Request(false),
                InputCommand::RequestColorChange,
            ]
        );
        assert!(!handler.should_quit());
    }

    #[test]
    fn test_enter_presses_selected_button() {
        let controller = PageController::new(RecordingViewModel::default());
        let mut handler = EventHandler::default();

        handler.handle_key_event(press(KeyCode::Down), &controller);
        handler.handle_key_event(press(KeyCode::Down), &controller);
        handler.handle_key_event(press(KeyCode::Enter), &controller);

        assert_eq!(
            *controller.view_model().inputs.borrow(),
            vec![InputCommand::RequestColorChange]
        );
    }

    #[test]
    fn test_quit_and_unbound_keys() {
        let controller = PageController::new(RecordingViewModel::default());
        let mut handler = EventHandler::default();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('x')), &controller),
            EventResult::Ignored
        );
        assert!(controller.view_model().inputs.borrow().is_empty());

        assert_eq!(
            handler.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &controller),
            EventResult::Quit
        );
        assert!(handler.should_quit());
    }

    #[test]
    fn test_load_registers_output_before_first_input() {
        let controller = PageController::new(RecordingViewModel::default());
        controller.load();

        let vm = controller.view_model();
        assert!(vm.output().is_some());
        assert_eq!(*vm.inputs.borrow(), vec![InputCommand::Request(true)]);

        // Batches delivered through the registered sink reach the screen
        let sink = vm.output().unwrap();
        sink(vec![crate::mvvm::OutputCommand::Loading("正在刷新".into())]);
        assert_eq!(controller.screen().status.text, "正在刷新");
    }
}
