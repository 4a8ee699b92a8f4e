use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::time::Duration;

use crate::config::AppConfig;
use crate::controller::PageController;
use crate::error::{PlaygroundError, PlaygroundResult};
use crate::events::{EventHandler, EventResult};
use crate::keyboard::KeyboardManager;
use crate::mvvm::PagedViewModel;

/// Interval between redraws while idle
const TICK_RATE: Duration = Duration::from_millis(50);

pub struct App {
    controller: PageController<PagedViewModel>,
    event_handler: EventHandler,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let view_model = PagedViewModel::from_config(&config.view_model);
        Self {
            controller: PageController::new(view_model),
            event_handler: EventHandler::new(KeyboardManager::with_config(config.keyboard)),
        }
    }

    /// Run the terminal UI until the user quits.
    ///
    /// Must be awaited inside a [`tokio::task::LocalSet`]: the view-model
    /// schedules its fetches on the local task set.
    pub async fn run(&mut self) -> Result<()> {
        ensure_tty(io::stdout().is_tty())?;

        enable_raw_mode()
            .map_err(|e| PlaygroundError::terminal(format!("Failed to enable raw mode: {}", e)))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| PlaygroundError::terminal(format!("Failed to setup terminal: {}", e)))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)
            .map_err(|e| PlaygroundError::terminal(format!("Failed to create terminal: {}", e)))?;

        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        self.controller.load();

        loop {
            let keyboard = self.event_handler.keyboard_manager();
            terminal.draw(|f| self.controller.screen().render(f, keyboard))?;

            // Never block here: pending fetches only progress while this task is suspended.
            if event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    let result = self.event_handler.handle_key_event(key, &self.controller);
                    tracing::trace!("Key {:?} -> {:?}", key.code, result);
                    if result == EventResult::Quit {
                        tracing::info!("Quit requested");
                    }
                }
            } else {
                tokio::time::sleep(TICK_RATE).await;
            }

            if self.event_handler.should_quit() {
                break;
            }
        }

        Ok(())
    }
}

/// The interactive UI needs a real terminal on stdout
fn ensure_tty(is_tty: bool) -> PlaygroundResult<()> {
    if is_tty {
        Ok(())
    } else {
        Err(PlaygroundError::terminal(
            "mvvm-playground requires a terminal (TTY). Use the `replay` subcommand for headless runs.",
        ))
    }
}
