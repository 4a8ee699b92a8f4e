//! Page data sources for the view-model

use crate::mvvm::model::Model;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

/// Result type for page fetches
pub type FetchResult<T> = Result<T, FetchError>;

/// Ways a page fetch can fail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Page source unavailable: {message}")]
    Unavailable { message: String },

    #[error("Page fetch timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Requested page {requested} but received page {received}")]
    PageMismatch { requested: u32, received: u32 },
}

impl FetchError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        FetchError::Unavailable {
            message: message.into(),
        }
    }

    pub fn timeout(timeout: Duration) -> Self {
        FetchError::Timeout { timeout }
    }
}

/// Payload returned for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    pub page: u32,
    pub title: String,
}

/// Source of page data.
///
/// Fetches run on the UI task set, so implementations need not be `Send`.
#[async_trait(?Send)]
pub trait PageFetcher {
    async fn fetch(&self, page: u32) -> FetchResult<PageData>;
}

/// Fetcher that waits a fixed delay to imitate a network round trip and always succeeds
#[derive(Debug, Clone)]
pub struct SimulatedFetcher {
    delay: Duration,
}

impl SimulatedFetcher {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedFetcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait(?Send)]
impl PageFetcher for SimulatedFetcher {
    async fn fetch(&self, page: u32) -> FetchResult<PageData> {
        debug!("Simulating fetch of page {} ({:?})", page, self.delay);
        sleep(self.delay).await;

        Ok(PageData {
            page,
            title: Model::page_title(page),
        })
    }
}
