use serde::{Deserialize, Serialize};

/// Title shown before the first fetch completes
pub const INITIAL_TITLE: &str = "Hello World!";

/// Data displayed by the page view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub title: String,
}

impl Model {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }

    /// Title for a fetched page
    pub fn page_title(page: u32) -> String {
        format!("数据 页数:{}", page)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new("")
    }
}

/// Fetch lifecycle of a view-model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    /// A fetch for `page` is outstanding; only the completion carrying `token` is applied
    Pending { token: u64, page: u32 },
}

impl FetchPhase {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchPhase::Pending { .. })
    }
}

/// Page bookkeeping owned by a view-model
#[derive(Debug, Clone)]
pub struct PageState {
    pub page: u32,
    pub model: Model,
    pub phase: FetchPhase,
    next_token: u64,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            page: 1,
            model: Model::default(),
            phase: FetchPhase::Idle,
            next_token: 0,
        }
    }

    /// Page a request resolves to: 1 on refresh, otherwise the page after the stored one
    pub fn target_page(&self, refresh: bool) -> u32 {
        if refresh {
            1
        } else {
            self.page.saturating_add(1)
        }
    }

    /// Start a fetch for `page`, superseding any pending one
    pub fn begin(&mut self, page: u32) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        self.phase = FetchPhase::Pending { token, page };
        token
    }

    /// Whether `token` belongs to the latest outstanding fetch
    pub fn is_current(&self, token: u64) -> bool {
        matches!(self.phase, FetchPhase::Pending { token: t, .. } if t == token)
    }

    /// Apply a successful fetch and return to idle
    pub fn complete(&mut self, page: u32, title: String) -> Model {
        self.page = page;
        self.model.title = title;
        self.phase = FetchPhase::Idle;
        self.model.clone()
    }

    /// Drop the outstanding fetch without touching page or model
    pub fn abandon(&mut self) {
        self.phase = FetchPhase::Idle;
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}
