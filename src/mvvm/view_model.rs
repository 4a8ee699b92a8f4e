//! Paged view-model: a page counter and title behind a simulated fetch

use crate::config::ViewModelConfig;
use crate::mvvm::command::{
    InputCommand, OutputBatch, OutputCommand, LOADED_MESSAGE, LOADING_MORE_MESSAGE,
    REFRESHING_MESSAGE,
};
use crate::mvvm::fetcher::{FetchError, FetchResult, PageData, PageFetcher, SimulatedFetcher};
use crate::mvvm::model::{FetchPhase, Model, PageState};
use crate::mvvm::palette::Palette;
use crate::mvvm::{OutputSink, ViewModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// View-model owning a page counter, a [`Model`] and a random color source.
///
/// Requests spawn their fetch with [`tokio::task::spawn_local`], so the
/// view-model must be driven from inside a [`tokio::task::LocalSet`]. The
/// spawned continuation only holds a weak reference: dropping the view-model
/// while a fetch is outstanding silently discards its result.
///
/// A fetch that takes longer than the fetch timeout (10 s unless configured)
/// fails with [`FetchError::Timeout`].
pub struct PagedViewModel<F = SimulatedFetcher, R = StdRng> {
    inner: Rc<Inner<F, R>>,
}

struct Inner<F, R> {
    state: RefCell<PageState>,
    output: RefCell<Option<OutputSink<OutputBatch>>>,
    fetcher: Rc<F>,
    fetch_timeout: Cell<Duration>,
    rng: RefCell<R>,
}

/// Fetch timeout used unless configured otherwise
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

impl PagedViewModel<SimulatedFetcher, StdRng> {
    /// Build a view-model with the simulated fetcher and an entropy or seeded RNG
    pub fn from_config(config: &ViewModelConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let view_model = Self::new(SimulatedFetcher::new(config.fetch_delay()), rng);
        view_model.set_fetch_timeout(config.fetch_timeout());
        view_model
    }
}

impl<F, R> PagedViewModel<F, R>
where
    F: PageFetcher + 'static,
    R: Rng + 'static,
{
    pub fn new(fetcher: F, rng: R) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(PageState::new()),
                output: RefCell::new(None),
                fetcher: Rc::new(fetcher),
                fetch_timeout: Cell::new(DEFAULT_FETCH_TIMEOUT),
                rng: RefCell::new(rng),
            }),
        }
    }

    /// Last successfully loaded page
    pub fn page(&self) -> u32 {
        self.inner.state.borrow().page
    }

    /// Snapshot of the current model
    pub fn model(&self) -> Model {
        self.inner.state.borrow().model.clone()
    }

    pub fn phase(&self) -> FetchPhase {
        self.inner.state.borrow().phase
    }

    /// Longest a fetch may take before it is reported as failed
    pub fn set_fetch_timeout(&self, timeout: Duration) {
        self.inner.fetch_timeout.set(timeout);
    }

    fn request_data(&self, refresh: bool) {
        let (page, token) = {
            let mut state = self.inner.state.borrow_mut();
            if state.phase.is_pending() {
                debug!("Request issued while a fetch is pending; the earlier one will be discarded");
            }
            let page = state.target_page(refresh);
            (page, state.begin(page))
        };

        let message = if refresh {
            REFRESHING_MESSAGE
        } else {
            LOADING_MORE_MESSAGE
        };
        self.inner
            .emit(vec![OutputCommand::Loading(message.to_string())]);

        let weak: Weak<Inner<F, R>> = Rc::downgrade(&self.inner);
        let fetcher = Rc::clone(&self.inner.fetcher);
        let fetch_timeout = self.inner.fetch_timeout.get();
        tokio::task::spawn_local(async move {
            let result = match tokio::time::timeout(fetch_timeout, fetcher.fetch(page)).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::timeout(fetch_timeout)),
            };
            match weak.upgrade() {
                Some(inner) => inner.finish(token, page, result),
                None => debug!("View-model dropped before page {} arrived", page),
            }
        });
    }

    fn change_color(&self) {
        let color = Palette::pick(&mut *self.inner.rng.borrow_mut());
        self.inner.emit(vec![OutputCommand::ColorChanged(color)]);
    }
}

impl<F, R> Inner<F, R> {
    fn emit(&self, batch: OutputBatch) {
        // Clone the sink out so it may re-enter the view-model.
        let sink = self.output.borrow().clone();
        match sink {
            Some(sink) => {
                trace!(
                    "Emitting batch: {:?}",
                    batch.iter().map(OutputCommand::kind).collect::<Vec<_>>()
                );
                sink(batch);
            }
            None => trace!("No output registered, dropping {} command(s)", batch.len()),
        }
    }

    fn finish(&self, token: u64, page: u32, result: FetchResult<PageData>) {
        let batch = {
            let mut state = self.state.borrow_mut();
            if !state.is_current(token) {
                debug!("Discarding stale completion for page {} (token {})", page, token);
                return;
            }

            let result = result.and_then(|data| {
                if data.page == page {
                    Ok(data)
                } else {
                    Err(FetchError::PageMismatch {
                        requested: page,
                        received: data.page,
                    })
                }
            });

            match result {
                Ok(data) => {
                    let model = state.complete(page, data.title);
                    debug!("Page {} loaded", page);
                    vec![
                        OutputCommand::Loaded(LOADED_MESSAGE.to_string()),
                        OutputCommand::Reload(model),
                    ]
                }
                Err(e) => {
                    warn!("Fetching page {} failed: {}", page, e);
                    state.abandon();
                    vec![OutputCommand::Failed(e.to_string())]
                }
            }
        };

        self.emit(batch);
    }
}

impl<F, R> ViewModel for PagedViewModel<F, R>
where
    F: PageFetcher + 'static,
    R: Rng + 'static,
{
    type Input = InputCommand;
    type Output = OutputBatch;

    /// # Panics
    ///
    /// `Request` panics when called outside a [`tokio::task::LocalSet`].
    fn input(&self, input: InputCommand) {
        debug!("ViewModel input: {:?}", input);
        match input {
            InputCommand::Request(refresh) => self.request_data(refresh),
            InputCommand::RequestColorChange => self.change_color(),
        }
    }

    fn set_output(&self, output: Option<OutputSink<OutputBatch>>) {
        *self.inner.output.borrow_mut() = output;
    }

    fn output(&self) -> Option<OutputSink<OutputBatch>> {
        self.inner.output.borrow().clone()
    }
}
