//! The command layer a UI talks to.
//!
//! A `Session` remembers what the user has picked (the generated sequence, the
//! algorithm, the speed, the visualization mode) and turns UI commands into
//! `RunController` calls. Every run sorts a copy of the generated sequence, so
//! pressing "sort" again replays the same input.

use crate::common::{AlgorithmId, RunId};
use crate::config::{SortvisConfig, VisualizationMode};
use crate::content::{self, AlgorithmDescription};
use crate::engine::{RunController, RunHandle};
use crate::error::{Result, SortvisError};
use crate::events::StepEvent;
use crate::generator;
use crate::time::Pace;
use tracing::info;

pub struct Session {
    config: SortvisConfig,
    controller: RunController<i64>,
    sequence: Vec<i64>,
    algorithm: AlgorithmId,
    speed: f64,
    mode: VisualizationMode,
    current: Option<RunHandle<i64>>,
}

impl Session {
    /// Validates `config` and generates the first sequence from it.
    pub fn new(config: SortvisConfig) -> Result<Self> {
        Self::with_controller(config, RunController::new())
    }

    pub fn with_controller(
        config: SortvisConfig,
        controller: RunController<i64>,
    ) -> Result<Self> {
        config.validate()?;
        let sequence =
            generator::generate(config.element_count, config.min_value, config.max_value)?;
        Ok(Self {
            algorithm: config.algorithm,
            speed: config.speed,
            mode: config.visualization_mode,
            config,
            controller,
            sequence,
            current: None,
        })
    }

    pub fn config(&self) -> &SortvisConfig {
        &self.config
    }

    pub fn controller(&self) -> &RunController<i64> {
        &self.controller
    }

    /// The generated input every run starts from.
    pub fn sequence(&self) -> &[i64] {
        &self.sequence
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    pub fn pace(&self) -> Result<Pace> {
        self.config.pace_for_speed(self.speed)
    }

    pub fn current_run(&self) -> Option<&RunHandle<i64>> {
        self.current.as_ref()
    }

    /// The last run, if its driver has not exited yet.
    pub fn active_run(&self) -> Option<&RunHandle<i64>> {
        self.current
            .as_ref()
            .filter(|run| !run.status().is_terminal())
    }

    pub fn is_sorting(&self) -> bool {
        self.active_run().is_some()
    }

    pub fn describe(&self) -> AlgorithmDescription {
        content::describe(self.algorithm)
    }

    /// Replaces the sequence with `count` fresh values in `[min_value, max_value]`.
    ///
    /// Asking for new data mid-sort stops the sort instead: the run is cancelled,
    /// the sequence is left as it was, and `SortStopped` is returned.
    pub fn request_generate(
        &mut self,
        count: usize,
        min_value: i64,
        max_value: i64,
    ) -> Result<&[i64]> {
        if let Some(id) = self.request_cancel() {
            return Err(SortvisError::SortStopped(id));
        }
        if count == 0 {
            return Err(SortvisError::InvalidArgument(
                "element count must be a positive integer".to_string(),
            ));
        }
        self.sequence = generator::generate(count, min_value, max_value)?;
        info!(count, min_value, max_value, "Generated a new sequence.");
        Ok(&self.sequence)
    }

    /// Regenerates using the configured bounds.
    pub fn request_randomize(&mut self, count: usize) -> Result<&[i64]> {
        let (min_value, max_value) = (self.config.min_value, self.config.max_value);
        self.request_generate(count, min_value, max_value)
    }

    /// Starts sorting a copy of the sequence with the selected algorithm and speed.
    ///
    /// A run still in flight is cancelled and awaited first, so two drivers never
    /// overlap.
    pub async fn request_start(
        &mut self,
        observer: impl FnMut(&StepEvent<i64>) + Send + 'static,
    ) -> Result<RunHandle<i64>> {
        let pace = self.pace()?;
        if let Some(run) = self.active_run().cloned() {
            self.controller.cancel(&run);
            run.wait().await?;
        }
        let handle = self
            .controller
            .start(self.sequence.clone(), self.algorithm, pace, observer)
            .await?;
        self.current = Some(handle.clone());
        Ok(handle)
    }

    /// Cancels the active run, if any. Does not wait for it to stop.
    pub fn request_cancel(&mut self) -> Option<RunId> {
        let run = self.active_run()?.clone();
        self.controller.cancel(&run);
        Some(run.id())
    }

    /// Changes the speed multiplier. An active run picks it up at its next checkpoint.
    pub fn request_set_pace(&mut self, speed: f64) -> Result<Pace> {
        let pace = self.config.pace_for_speed(speed)?;
        self.speed = speed;
        if let Some(run) = self.active_run().filter(|run| !run.is_cancel_requested()) {
            self.controller.set_pace(run, pace)?;
        }
        Ok(pace)
    }

    /// Selects another algorithm. A run in flight is cancelled.
    ///
    /// Returns `true` if a run had to be stopped.
    pub fn select_algorithm(&mut self, algorithm: AlgorithmId) -> bool {
        let stopped = self.request_cancel().is_some();
        self.algorithm = algorithm;
        stopped
    }

    /// Presentational only; never interrupts a run.
    pub fn set_mode(&mut self, mode: VisualizationMode) {
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RunStatus;
    use std::time::Duration;

    fn session() -> Session {
        Session::new(SortvisConfig {
            element_count: 8,
            base_delay_ms: 100,
            ..Default::default()
        })
        .expect("session")
    }

    #[test]
    fn new_session_generates_from_config() {
        let session = session();
        assert_eq!(session.sequence().len(), 8);
        assert!(session.sequence().iter().all(|v| (1..=1000).contains(v)));
        assert_eq!(session.algorithm(), AlgorithmId::Bubble);
        assert!(!session.is_sorting());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = Session::new(SortvisConfig {
            speed: -2.0,
            ..Default::default()
        });
        assert!(matches!(result, Err(SortvisError::InvalidPace(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn completed_run_sorts_a_copy_of_the_sequence() {
        let mut session = session();
        let input = session.sequence().to_vec();
        let handle = session.request_start(|_| {}).await.unwrap();
        let outcome = handle.wait().await.unwrap();

        let mut expected = input.clone();
        expected.sort();
        assert_eq!(outcome.sequence, expected);
        assert_eq!(session.sequence(), &input[..]);
        assert!(!session.is_sorting());
    }

    #[tokio::test(start_paused = true)]
    async fn generating_mid_sort_stops_the_sort_and_keeps_the_input() {
        let mut session = session();
        let before = session.sequence().to_vec();
        let handle = session.request_start(|_| {}).await.unwrap();

        assert_eq!(
            session.request_randomize(5).unwrap_err(),
            SortvisError::SortStopped(handle.id())
        );
        assert!(handle.is_cancel_requested());
        assert_eq!(session.sequence(), &before[..]);

        assert_eq!(handle.wait().await.unwrap().status, RunStatus::Cancelled);
        assert!(!session.is_sorting());
        assert_eq!(session.request_randomize(5).unwrap().len(), 5);
        assert!(matches!(
            session.request_randomize(0),
            Err(SortvisError::InvalidArgument(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn starting_again_replaces_the_active_run() {
        let mut session = session();
        let first = session.request_start(|_| {}).await.unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;

        let second = session.request_start(|_| {}).await.unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(first.status(), RunStatus::Cancelled);
        assert_eq!(second.wait().await.unwrap().status, RunStatus::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_changes_reach_the_active_run() {
        let mut session = session();
        let handle = session.request_start(|_| {}).await.unwrap();
        let pace = session.request_set_pace(4.0).unwrap();
        assert_eq!(pace.as_duration(), Duration::from_millis(25));
        assert_eq!(handle.pace(), pace);
        assert!(session.request_set_pace(0.0).is_err());
        assert_eq!(session.speed(), 4.0);
        handle.wait().await.unwrap();

        // With no run active the speed is simply remembered for the next start.
        session.request_set_pace(2.0).unwrap();
        let next = session.request_start(|_| {}).await.unwrap();
        assert_eq!(next.pace().as_duration(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_an_algorithm_stops_the_current_run() {
        let mut session = session();
        assert!(!session.select_algorithm(AlgorithmId::Merge));
        let handle = session.request_start(|_| {}).await.unwrap();
        assert_eq!(handle.algorithm(), AlgorithmId::Merge);

        assert!(session.select_algorithm(AlgorithmId::Quick));
        assert_eq!(session.algorithm(), AlgorithmId::Quick);
        assert_eq!(handle.wait().await.unwrap().status, RunStatus::Cancelled);
        assert_eq!(session.describe().algorithm, AlgorithmId::Quick);
    }
}
