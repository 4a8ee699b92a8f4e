pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod keyboard;
pub mod mvvm;
pub mod ui;

pub use app::App;
pub use error::{PlaygroundError, PlaygroundResult};
