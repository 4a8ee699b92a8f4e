//! Unidirectional Model-View-ViewModel core
//!
//! A view sends input commands to a view-model; the view-model updates its
//! model and answers with ordered batches of output commands delivered through
//! a single registered callback. Everything runs on the UI task set, so shared
//! state uses `Rc`/`RefCell` rather than locks.

pub mod command;
pub mod fetcher;
pub mod model;
pub mod palette;
pub mod view_model;

pub use command::{InputCommand, OutputBatch, OutputCommand};
pub use fetcher::{FetchError, FetchResult, PageData, PageFetcher, SimulatedFetcher};
pub use model::{FetchPhase, Model, PageState};
pub use palette::{NamedColor, Palette};
pub use view_model::PagedViewModel;

use std::rc::Rc;

/// Callback receiving everything a view-model emits
pub type OutputSink<O> = Rc<dyn Fn(O)>;

/// Contract between a view and its view-model.
///
/// Each implementer fixes one input message set and one output message set.
pub trait ViewModel {
    type Input;
    type Output;

    /// Hand a command to the view-model. Never blocks; results arrive through the output sink.
    ///
    /// Implementations that start asynchronous work spawn it on the current
    /// [`tokio::task::LocalSet`] and panic when called outside one. The sink
    /// may call `input` again while handling a batch.
    fn input(&self, input: Self::Input);

    /// Replace the output sink. Emissions made while no sink is set are dropped.
    fn set_output(&self, output: Option<OutputSink<Self::Output>>);

    /// Currently registered output sink
    fn output(&self) -> Option<OutputSink<Self::Output>>;
}
