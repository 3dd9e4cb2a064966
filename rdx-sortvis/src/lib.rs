//! # SortVis
//!
//! A paced, cancellable, event-emitting engine for animating classic sorting
//! algorithms.
//!
//! SortVis does not try to sort fast. It runs an algorithm one observable step at
//! a time so that a renderer can draw every comparison and every swap, while the
//! user changes the speed or abandons the run halfway through.
//!
//! ## Core Concepts
//!
//! - **Sort Engine**: Bubble, selection, insertion, quick and merge sort, each
//!   written as an interruptible stepper over an exclusively owned sequence.
//! - **Checkpoint**: After every comparison and every write the driver waits for
//!   the current pace. This is the only suspension point, and the only place
//!   cancellation is observed.
//! - **Run Controller**: Starts at most one run at a time, hands out `RunHandle`s,
//!   and broadcasts `RunEvent`s describing each run's lifecycle.
//! - **Step Events**: Each observable moment is reported synchronously to the
//!   run's observer as a snapshot plus highlighted indices and a highlight kind.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sortvis::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // 1. Generate something to sort.
//!     let sequence = sortvis::generator::generate(12, 1, 1000)?;
//!
//!     // 2. Create the controller.
//!     let controller: RunController = RunController::new();
//!
//!     // 3. Start a run; the observer plays the role of a renderer.
//!     let handle = controller
//!         .start(sequence, AlgorithmId::Quick, Pace::from_millis(50)?, |step| {
//!             println!("{:?} {:?} {:?}", step.kind, step.highlighted, step.snapshot);
//!         })
//!         .await?;
//!
//!     // 4. Speed it up while it runs, then wait for the result.
//!     controller.set_pace(&handle, Pace::from_millis(10)?)?;
//!     let outcome = handle.wait().await?;
//!     println!("{:?} after {} steps: {:?}", outcome.status, outcome.steps, outcome.sequence);
//!
//!     Ok(())
//! }
//! ```

pub const ENGINE_NAME: &str = "SortVis Engine";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Declare all the modules in the crate.
pub mod common;
pub mod components;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod events;
pub mod generator;
pub mod session;
pub mod time;

/// A prelude module for easy importing of the most common SortVis types.
pub mod prelude {
    pub use crate::common::{AlgorithmId, HighlightKind, RunId, SortItem};
    pub use crate::config::{SortvisConfig, VisualizationMode};
    pub use crate::content::UiLanguage;
    pub use crate::engine::{RunController, RunHandle, RunOutcome, RunStatus};
    pub use crate::error::SortvisError;
    pub use crate::events::{RunEvent, StepEvent};
    pub use crate::session::Session;
    pub use crate::time::Pace;
}
