//! The run controller that owns the lifecycle of sort runs.

use crate::common::{AlgorithmId, RunId, SortItem};
use crate::components::checkpoint::{Cancelled, RunSignals};
use crate::components::sorter::SortEngine;
use crate::error::{Result, SortvisError};
use crate::events::{RunEvent, StepEvent, StepObserver};
use crate::time::Pace;
use slotmap::SlotMap;
use std::sync::Arc;
use tokio::sync::{broadcast, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Registered, driver not yet scheduled.
    Pending,
    Running,
    /// The driver observed cancellation and stopped.
    Cancelled,
    /// The driver finished sorting.
    Completed,
    /// The driver task died before it could publish an outcome.
    Failed,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Cancelled | RunStatus::Completed | RunStatus::Failed
        )
    }
}

/// What a run left behind once its driver exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome<T> {
    pub id: RunId,
    pub algorithm: AlgorithmId,
    /// Either `Cancelled` or `Completed`.
    pub status: RunStatus,
    /// The final working sequence. Sorted when completed, a permutation of the input
    /// either way.
    pub sequence: Vec<T>,
    /// Checkpoints passed before the driver exited.
    pub steps: u64,
}

#[doc(hidden)]
struct RunShared<T> {
    id: RunId,
    algorithm: AlgorithmId,
    signals: RunSignals,
    status: watch::Sender<RunStatus>,
    outcome: watch::Sender<Option<Result<RunOutcome<T>>>>,
}

/// A cheap, cloneable handle to one run.
///
/// Dropping every handle does not stop the run; use `cancel` for that.
pub struct RunHandle<T> {
    shared: Arc<RunShared<T>>,
}

impl<T> Clone for RunHandle<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> std::fmt::Debug for RunHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunHandle")
            .field("id", &self.shared.id)
            .field("algorithm", &self.shared.algorithm)
            .field("status", &*self.shared.status.borrow())
            .finish()
    }
}

impl<T: SortItem> RunHandle<T> {
    fn new(id: RunId, algorithm: AlgorithmId, pace: Pace) -> Self {
        let (status, _) = watch::channel(RunStatus::Pending);
        let (outcome, _) = watch::channel(None);
        Self {
            shared: Arc::new(RunShared {
                id,
                algorithm,
                signals: RunSignals::new(pace),
                status,
                outcome,
            }),
        }
    }

    pub fn id(&self) -> RunId {
        self.shared.id
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.shared.algorithm
    }

    pub fn status(&self) -> RunStatus {
        *self.shared.status.borrow()
    }

    pub fn pace(&self) -> Pace {
        self.shared.signals.pace()
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.shared.signals.is_cancelled()
    }

    /// Requests cancellation. Idempotent and non-blocking.
    ///
    /// Returns `true` only for the call that set the flag.
    pub fn cancel(&self) -> bool {
        self.shared.signals.cancel()
    }

    /// Waits until the driver has exited and returns what it left behind.
    ///
    /// Fails with `RunLost` if the driver task died without finishing.
    pub async fn wait(&self) -> Result<RunOutcome<T>> {
        let mut rx = self.shared.outcome.subscribe();
        loop {
            let published = rx.borrow_and_update().clone();
            if let Some(result) = published {
                return result;
            }
            if rx.changed().await.is_err() {
                return Err(SortvisError::RunLost(self.id()));
            }
        }
    }

    fn set_status(&self, status: RunStatus) {
        self.shared.status.send_replace(status);
    }

    /// Status goes first: whoever wakes on the outcome must already see it terminal.
    fn finish(&self, outcome: RunOutcome<T>) {
        self.set_status(outcome.status);
        self.shared.outcome.send_replace(Some(Ok(outcome)));
    }

    fn abandon(&self) {
        self.set_status(RunStatus::Failed);
        self.shared
            .outcome
            .send_replace(Some(Err(SortvisError::RunLost(self.id()))));
    }
}

/// The SortVis run controller.
///
/// This struct is the central point of control for sort runs. It enforces that at
/// most one run is active at a time, spawns a driver task for each run, and
/// broadcasts lifecycle events. Like the runs it controls, the controller is cheap
/// to clone and share across tasks.
pub struct RunController<T = i64> {
    run_event_sender: broadcast::Sender<RunEvent>,
    runs: Arc<RwLock<SlotMap<RunId, RunHandle<T>>>>,
}

impl<T> Clone for RunController<T> {
    fn clone(&self) -> Self {
        Self {
            run_event_sender: self.run_event_sender.clone(),
            runs: self.runs.clone(),
        }
    }
}

impl<T: SortItem> Default for RunController<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Core implementation block for internal logic.
impl<T: SortItem> RunController<T> {
    /// Creates a controller with no active run.
    pub fn new() -> Self {
        const CHANNEL_CAPACITY: usize = 64;
        let (run_event_sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            run_event_sender,
            runs: Arc::new(RwLock::new(SlotMap::with_key())),
        }
    }

    #[doc(hidden)]
    async fn drive(self, handle: RunHandle<T>, sequence: Vec<T>, observer: StepObserver<T>) {
        handle.set_status(RunStatus::Running);
        let mut engine = SortEngine::new(sequence, observer, handle.shared.signals.pacer());
        let status = match engine.run(handle.algorithm()).await {
            Ok(()) => RunStatus::Completed,
            Err(Cancelled) => RunStatus::Cancelled,
        };
        let steps = engine.steps();
        let sequence = engine.into_sequence();

        // Deregister before publishing, so whoever awaits the outcome may start anew.
        self.runs.write().await.remove(handle.id());

        let event = match status {
            RunStatus::Completed => {
                info!(id = ?handle.id(), steps, "Run completed.");
                RunEvent::RunCompleted {
                    id: handle.id(),
                    steps,
                }
            }
            _ => {
                info!(id = ?handle.id(), steps, "Run cancelled.");
                RunEvent::RunCancelled {
                    id: handle.id(),
                    steps,
                }
            }
        };
        handle.finish(RunOutcome {
            id: handle.id(),
            algorithm: handle.algorithm(),
            status,
            sequence,
            steps,
        });
        self.run_event_sender.send(event).ok();
    }

    /// Waits for the driver task and cleans up after it if it died mid-run.
    #[doc(hidden)]
    async fn supervise(self, handle: RunHandle<T>, driver: JoinHandle<()>) {
        let Err(error) = driver.await else {
            return;
        };
        self.runs.write().await.remove(handle.id());
        warn!(id = ?handle.id(), %error, "Run driver died before finishing.");
        handle.abandon();
        self.run_event_sender
            .send(RunEvent::RunFailed { id: handle.id() })
            .ok();
    }
}

// Public API implementation block.
impl<T: SortItem> RunController<T> {
    /// Starts a run of `algorithm` over `sequence`, reporting each step to `observer`.
    ///
    /// Fails with `AlreadyRunning` while a previous run's driver has not exited,
    /// including a run whose cancellation has been requested but not yet observed.
    /// A failed start touches neither the active run nor `sequence`'s contents.
    ///
    /// # Returns
    /// A `RunHandle` for cancelling, re-pacing and awaiting the run.
    pub async fn start(
        &self,
        sequence: Vec<T>,
        algorithm: AlgorithmId,
        pace: Pace,
        observer: impl FnMut(&StepEvent<T>) + Send + 'static,
    ) -> Result<RunHandle<T>> {
        let mut runs = self.runs.write().await;
        if let Some((active, _)) = runs.iter().next() {
            warn!(?active, %algorithm, "Refusing to start: a run is already active.");
            return Err(SortvisError::AlreadyRunning(active));
        }
        let id = runs.insert_with_key(|key| RunHandle::new(key, algorithm, pace));
        let handle = runs[id].clone();
        drop(runs);

        let len = sequence.len();
        info!(?id, %algorithm, len, %pace, "Run starting.");
        self.run_event_sender
            .send(RunEvent::RunStarted {
                id,
                algorithm,
                len,
                pace,
            })
            .ok();

        let driver = tokio::spawn(self.clone().drive(
            handle.clone(),
            sequence,
            Box::new(observer),
        ));
        tokio::spawn(self.clone().supervise(handle.clone(), driver));
        Ok(handle)
    }

    /// Requests cancellation of `handle`'s run. Idempotent and non-blocking.
    pub fn cancel(&self, handle: &RunHandle<T>) {
        if handle.cancel() {
            info!(id = ?handle.id(), "Cancellation requested.");
            self.run_event_sender
                .send(RunEvent::CancelRequested { id: handle.id() })
                .ok();
        } else {
            debug!(id = ?handle.id(), "Cancellation already requested.");
        }
    }

    /// Requests cancellation of whatever run is active.
    ///
    /// Returns the handle of the run that was asked to stop, if any.
    pub async fn cancel_active(&self) -> Option<RunHandle<T>> {
        let active = self.active().await?;
        self.cancel(&active);
        Some(active)
    }

    /// Changes the delay used by the run's subsequent checkpoints.
    ///
    /// Only valid while the run is active and not being cancelled.
    pub fn set_pace(&self, handle: &RunHandle<T>, pace: Pace) -> Result<()> {
        if handle.status().is_terminal() || handle.is_cancel_requested() {
            return Err(SortvisError::RunNotActive(handle.id()));
        }
        handle.shared.signals.set_pace(pace);
        info!(id = ?handle.id(), %pace, "Pace changed.");
        self.run_event_sender
            .send(RunEvent::PaceChanged {
                id: handle.id(),
                pace,
            })
            .ok();
        Ok(())
    }

    /// Returns the handle of the run whose driver has not yet exited, if any.
    pub async fn active(&self) -> Option<RunHandle<T>> {
        self.runs
            .read()
            .await
            .values()
            .next()
            .cloned()
    }

    pub async fn is_idle(&self) -> bool {
        self.runs.read().await.is_empty()
    }

    /// Subscribes to the `RunEvent` stream.
    pub fn subscribe_run_events(&self) -> broadcast::Receiver<RunEvent> {
        self.run_event_sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pace(millis: u64) -> Pace {
        Pace::from_millis(millis).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn run_moves_from_pending_to_completed() {
        let controller: RunController = RunController::new();
        let handle = controller
            .start(vec![2, 1], AlgorithmId::Bubble, pace(10), |_| {})
            .await
            .unwrap();
        assert_eq!(handle.status(), RunStatus::Pending);
        assert!(!controller.is_idle().await);

        let outcome = handle.wait().await.unwrap();
        assert_eq!(outcome.status, RunStatus::Completed);
        assert_eq!(outcome.sequence, vec![1, 2]);
        assert_eq!(outcome.steps, 2);
        assert_eq!(handle.status(), RunStatus::Completed);
        assert!(controller.is_idle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn set_pace_is_rejected_once_the_run_is_over() {
        let controller: RunController = RunController::new();
        let handle = controller
            .start(vec![3, 2, 1], AlgorithmId::Selection, pace(10), |_| {})
            .await
            .unwrap();
        controller.set_pace(&handle, pace(1)).unwrap();
        assert_eq!(handle.pace(), pace(1));

        handle.wait().await.unwrap();
        assert_eq!(
            controller.set_pace(&handle, pace(5)),
            Err(SortvisError::RunNotActive(handle.id()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn set_pace_is_rejected_after_cancel() {
        let controller: RunController = RunController::new();
        let handle = controller
            .start(vec![3, 2, 1], AlgorithmId::Quick, pace(10), |_| {})
            .await
            .unwrap();
        controller.cancel(&handle);
        assert!(controller.set_pace(&handle, pace(5)).is_err());
        assert_eq!(handle.wait().await.unwrap().status, RunStatus::Cancelled);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn status_is_terminal_as_soon_as_wait_returns() {
        let controller: RunController = RunController::new();
        for _ in 0..200 {
            let handle = controller
                .start(vec![3, 1, 2], AlgorithmId::Insertion, pace(1), |_| {})
                .await
                .unwrap();
            let outcome = handle.wait().await.unwrap();
            assert_eq!(handle.status(), outcome.status);
            assert!(controller.is_idle().await);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_observer_fails_the_run_and_frees_the_controller() {
        let controller: RunController = RunController::new();
        let mut events = controller.subscribe_run_events();
        let handle = controller
            .start(vec![2, 1], AlgorithmId::Bubble, pace(10), |_| {
                panic!("renderer crashed")
            })
            .await
            .unwrap();

        assert_eq!(
            handle.wait().await,
            Err(SortvisError::RunLost(handle.id()))
        );
        assert_eq!(handle.status(), RunStatus::Failed);
        assert!(controller.is_idle().await);
        assert!(matches!(
            events.recv().await.unwrap(),
            RunEvent::RunStarted { .. }
        ));
        assert_eq!(
            events.recv().await.unwrap(),
            RunEvent::RunFailed { id: handle.id() }
        );

        let next = controller
            .start(vec![2, 1], AlgorithmId::Bubble, pace(10), |_| {})
            .await
            .expect("controller usable after a failed run");
        assert_eq!(next.wait().await.unwrap().sequence, vec![1, 2]);
    }

    #[test]
    fn handle_debug_shows_status() {
        let handle: RunHandle<i64> =
            RunHandle::new(RunId::default(), AlgorithmId::Merge, pace(5));
        let rendered = format!("{handle:?}");
        assert!(rendered.contains("Merge"));
        assert!(rendered.contains("Pending"));
    }

    #[tokio::test(start_paused = true)]
    async fn lifecycle_events_are_broadcast() {
        let controller: RunController = RunController::new();
        let mut events = controller.subscribe_run_events();
        let handle = controller
            .start(vec![4, 3, 2, 1], AlgorithmId::Insertion, pace(100), |_| {})
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        controller.set_pace(&handle, pace(20)).unwrap();
        controller.cancel(&handle);
        controller.cancel(&handle);
        let outcome = handle.wait().await.unwrap();

        let id = handle.id();
        assert_eq!(
            events.recv().await.unwrap(),
            RunEvent::RunStarted {
                id,
                algorithm: AlgorithmId::Insertion,
                len: 4,
                pace: pace(100),
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            RunEvent::PaceChanged { id, pace: pace(20) }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            RunEvent::CancelRequested { id }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            RunEvent::RunCancelled {
                id,
                steps: outcome.steps
            }
        );
        assert_eq!(outcome.steps, 1);
    }
}
