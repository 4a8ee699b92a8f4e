//! Input and output commands exchanged between a view controller and a view-model
//!
//! Inputs flow from the view into the view-model; outputs flow back as ordered
//! batches that the view applies one command at a time.

use crate::mvvm::model::Model;
use crate::mvvm::palette::NamedColor;
use serde::{Deserialize, Serialize};

/// Status text shown while a refresh is in flight
pub const REFRESHING_MESSAGE: &str = "正在刷新";

/// Status text shown while the next page is in flight
pub const LOADING_MORE_MESSAGE: &str = "努力加载中...";

/// Status text shown once a fetch has completed
pub const LOADED_MESSAGE: &str = "已完成";

/// Commands a view sends to the view-model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCommand {
    /// Request page data. `true` resets to the first page, `false` loads the next one.
    Request(bool),

    /// Pick a new background color for the title
    RequestColorChange,
}

impl InputCommand {
    /// Refresh from the first page
    pub fn refresh() -> Self {
        InputCommand::Request(true)
    }

    /// Load the page after the current one
    pub fn load_more() -> Self {
        InputCommand::Request(false)
    }
}

/// Commands the view-model emits back to its view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputCommand {
    /// A fetch has started
    Loading(String),

    /// A fetch has finished
    Loaded(String),

    /// The model changed and should be redrawn
    Reload(Model),

    /// The title background color changed
    ColorChanged(NamedColor),

    /// A fetch failed; page and model are unchanged
    Failed(String),
}

impl OutputCommand {
    /// Short tag used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            OutputCommand::Loading(_) => "loading",
            OutputCommand::Loaded(_) => "loaded",
            OutputCommand::Reload(_) => "reload",
            OutputCommand::ColorChanged(_) => "color_changed",
            OutputCommand::Failed(_) => "failed",
        }
    }
}

/// Ordered group of output commands delivered in one callback
pub type OutputBatch = Vec<OutputCommand>;
