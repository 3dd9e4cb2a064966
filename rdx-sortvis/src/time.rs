//! Pacing primitives for the sort engine.
//!
//! A `Pace` is the delay a driver waits at every checkpoint. The UI talks in
//! speed multipliers instead, so `Pace::from_speed` converts between the two:
//! `delay = base_delay / multiplier`.

use crate::error::{Result, SortvisError};
use std::fmt;
use std::time::Duration;

/// The delay base used when a speed multiplier of `1.0` is selected.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// A strictly positive delay between two observable steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pace(Duration);

impl Pace {
    /// Creates a pace from a raw delay. Zero is rejected.
    pub fn new(delay: Duration) -> Result<Self> {
        if delay.is_zero() {
            return Err(SortvisError::InvalidPace(
                "the delay between steps must be greater than zero".to_string(),
            ));
        }
        Ok(Self(delay))
    }

    pub fn from_millis(millis: u64) -> Result<Self> {
        Self::new(Duration::from_millis(millis))
    }

    /// Converts a speed multiplier into a pace relative to `base_delay`.
    ///
    /// A multiplier of `2.0` halves the delay. Multipliers that are not finite and
    /// strictly positive, or that would shrink the delay to zero, are rejected.
    pub fn from_speed(base_delay: Duration, multiplier: f64) -> Result<Self> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(SortvisError::InvalidPace(format!(
                "speed multiplier must be a positive number, got {multiplier}"
            )));
        }
        let delay = Duration::try_from_secs_f64(base_delay.as_secs_f64() / multiplier)
            .map_err(|e| SortvisError::InvalidPace(e.to_string()))?;
        Self::new(delay)
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl Default for Pace {
    fn default() -> Self {
        Self(DEFAULT_BASE_DELAY)
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_multiplier_divides_the_base_delay() {
        let pace = Pace::from_speed(DEFAULT_BASE_DELAY, 2.0).unwrap();
        assert_eq!(pace.as_duration(), Duration::from_millis(250));

        let pace = Pace::from_speed(DEFAULT_BASE_DELAY, 0.5).unwrap();
        assert_eq!(pace.as_duration(), Duration::from_millis(1000));
    }

    #[test]
    fn rejects_non_positive_pace() {
        assert!(matches!(
            Pace::new(Duration::ZERO),
            Err(SortvisError::InvalidPace(_))
        ));
        assert!(Pace::from_speed(DEFAULT_BASE_DELAY, 0.0).is_err());
        assert!(Pace::from_speed(DEFAULT_BASE_DELAY, -1.0).is_err());
        assert!(Pace::from_speed(DEFAULT_BASE_DELAY, f64::NAN).is_err());
        assert!(Pace::from_speed(DEFAULT_BASE_DELAY, f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_speed_that_rounds_the_delay_to_zero() {
        assert!(Pace::from_speed(Duration::from_nanos(1), 10.0).is_err());
    }
}
