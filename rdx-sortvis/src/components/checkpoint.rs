//! The checkpoint: the only place a sort driver suspends.
//!
//! Every run owns one `RunSignals` (the controlling side: pace and cancellation
//! flag) and hands a `Pacer` (the observing side) to its driver. Both sides are
//! `tokio::sync::watch` channels, so a pace change is picked up at the next
//! checkpoint and a cancellation wakes a checkpoint that is already sleeping.

use crate::time::Pace;
use tokio::sync::watch;
use tracing::trace;

/// Returned by a checkpoint once cancellation has been requested.
///
/// Drivers propagate it with `?` and unwind without doing further work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// The controlling half of a run's pace and cancellation state.
#[derive(Debug)]
pub struct RunSignals {
    pace: watch::Sender<Pace>,
    cancel: watch::Sender<bool>,
}

impl RunSignals {
    pub fn new(pace: Pace) -> Self {
        let (pace, _) = watch::channel(pace);
        let (cancel, _) = watch::channel(false);
        Self { pace, cancel }
    }

    /// Creates the observing half handed to a driver.
    pub fn pacer(&self) -> Pacer {
        Pacer {
            pace: self.pace.subscribe(),
            cancel: self.cancel.subscribe(),
        }
    }

    /// Sets the cancellation flag. The flag is never cleared.
    ///
    /// Returns `true` only for the call that actually flipped it.
    pub fn cancel(&self) -> bool {
        !self.cancel.send_replace(true)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Replaces the delay used by subsequent checkpoints.
    pub fn set_pace(&self, pace: Pace) {
        self.pace.send_replace(pace);
    }

    pub fn pace(&self) -> Pace {
        *self.pace.borrow()
    }
}

/// The observing half of a run's signals, owned by the driver.
#[derive(Debug)]
pub struct Pacer {
    pace: watch::Receiver<Pace>,
    cancel: watch::Receiver<bool>,
}

impl Pacer {
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Waits for the current pace, then returns control to the driver.
    ///
    /// Fails with `Cancelled` if cancellation was requested before or during the
    /// wait. A pace change made while waiting applies from the next checkpoint on.
    pub async fn checkpoint(&mut self) -> Result<(), Cancelled> {
        if *self.cancel.borrow_and_update() {
            return Err(Cancelled);
        }
        let delay = self.pace.borrow_and_update().as_duration();
        trace!(?delay, "checkpoint");
        tokio::select! {
            biased;
            _ = cancellation(&mut self.cancel) => Err(Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

/// Resolves once the flag is set, or once every `RunSignals` owner is gone.
async fn cancellation(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn checkpoint_waits_for_the_current_pace() {
        let signals = RunSignals::new(Pace::from_millis(40).unwrap());
        let mut pacer = signals.pacer();

        let started = Instant::now();
        pacer.checkpoint().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_millis(40));

        signals.set_pace(Pace::from_millis(5).unwrap());
        let started = Instant::now();
        pacer.checkpoint().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_a_sleeping_checkpoint() {
        let signals = Arc::new(RunSignals::new(Pace::from_millis(1_000).unwrap()));
        let mut pacer = signals.pacer();

        let canceller = signals.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        assert_eq!(pacer.checkpoint().await, Err(Cancelled));
        assert_eq!(started.elapsed(), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_flag_fails_immediately_and_stays_set() {
        let signals = RunSignals::new(Pace::default());
        let mut pacer = signals.pacer();

        assert!(signals.cancel());
        assert!(!signals.cancel());
        assert!(signals.is_cancelled());
        assert!(pacer.is_cancelled());
        assert_eq!(pacer.checkpoint().await, Err(Cancelled));
        assert_eq!(pacer.checkpoint().await, Err(Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_signals_cancels_the_pacer() {
        let signals = RunSignals::new(Pace::from_millis(1_000).unwrap());
        let mut pacer = signals.pacer();
        drop(signals);
        assert_eq!(pacer.checkpoint().await, Err(Cancelled));
    }
}
