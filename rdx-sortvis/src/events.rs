//! Defines the event types emitted by the SortVis engine.
//!
//! There are two streams. `StepEvent`s describe each observable moment of an
//! algorithm and are handed synchronously to the run's observer. `RunEvent`s
//! describe the lifecycle of runs and are broadcast to any number of subscribers.

use crate::common::{AlgorithmId, HighlightKind, RunId};
use crate::time::Pace;

/// The callback a run reports its steps to, normally a render adapter.
pub type StepObserver<T> = Box<dyn FnMut(&StepEvent<T>) + Send>;

/// One observable moment in an algorithm's execution.
///
/// The snapshot is a copy; observers can keep it without holding up the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEvent<T> {
    /// The working sequence as it stood when the event was emitted.
    pub snapshot: Vec<T>,
    /// Highlighted positions, sorted and free of duplicates.
    pub highlighted: Vec<usize>,
    pub kind: HighlightKind,
}

impl<T> StepEvent<T> {
    pub fn new(snapshot: Vec<T>, indices: &[usize], kind: HighlightKind) -> Self {
        let mut highlighted = indices.to_vec();
        highlighted.sort_unstable();
        highlighted.dedup();
        Self {
            snapshot,
            highlighted,
            kind,
        }
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.binary_search(&index).is_ok()
    }
}

/// Events related to the lifecycle of sort runs.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Fired once a run has been registered and its driver spawned.
    RunStarted {
        id: RunId,
        algorithm: AlgorithmId,
        len: usize,
        pace: Pace,
    },
    /// Fired when the pace of an active run is changed.
    PaceChanged { id: RunId, pace: Pace },
    /// Fired the first time cancellation is requested for a run.
    CancelRequested { id: RunId },
    /// Fired when the driver observed cancellation and stopped.
    RunCancelled { id: RunId, steps: u64 },
    /// Fired when the driver finished sorting.
    RunCompleted { id: RunId, steps: u64 },
    /// Fired when the driver task died (an observer panicked) before finishing.
    RunFailed { id: RunId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlighted_indices_behave_like_a_set() {
        let event = StepEvent::new(vec![1, 2, 3], &[2, 0, 2], HighlightKind::Swapping);
        assert_eq!(event.highlighted, vec![0, 2]);
        assert!(event.is_highlighted(0));
        assert!(!event.is_highlighted(1));
    }
}
