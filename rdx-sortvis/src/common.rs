//! Contains common, primitive types shared across the SortVis engine.
//!
//! This module defines the identifiers used to name runs, algorithms and highlight
//! kinds. Using distinct types instead of bare strings keeps the command layer and
//! the engine from disagreeing about what a value means.

use crate::error::SortvisError;
use serde::Deserialize;
use slotmap::new_key_type;
use std::fmt;
use std::str::FromStr;

new_key_type! {
    /// Uniquely and safely identifies a sort run started by the `RunController`.
    ///
    /// Keys are never reused, so a handle to a finished run can't be confused
    /// with a newer one.
    pub struct RunId;
}

/// Any element type the sort engine can animate.
///
/// Only ordering and cheap copies are needed; snapshots are cloned at every step.
pub trait SortItem: Ord + Clone + Send + Sync + 'static {}

impl<T> SortItem for T where T: Ord + Clone + Send + Sync + 'static {}

/// The five algorithms the engine knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
}

impl AlgorithmId {
    /// Every algorithm, in menu order.
    pub const ALL: [AlgorithmId; 5] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Insertion,
        AlgorithmId::Quick,
        AlgorithmId::Merge,
    ];

    /// The short identifier accepted by `FromStr` and the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Quick => "quick",
            AlgorithmId::Merge => "merge",
        }
    }

    /// A human-readable label such as "Bubble Sort".
    pub fn label(&self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "Bubble Sort",
            AlgorithmId::Selection => "Selection Sort",
            AlgorithmId::Insertion => "Insertion Sort",
            AlgorithmId::Quick => "Quick Sort",
            AlgorithmId::Merge => "Merge Sort",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = SortvisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized
            .strip_suffix("sort")
            .map(|rest| rest.trim_end_matches(['-', '_', ' ']))
            .unwrap_or(normalized.as_str());
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str() == name)
            .ok_or_else(|| SortvisError::UnknownAlgorithm(s.to_string()))
    }
}

/// How the indices of a `StepEvent` should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    /// Two elements are being compared.
    Comparing,
    /// Elements were just exchanged or overwritten.
    Swapping,
    /// An element has reached its final position.
    Settled,
}

impl fmt::Display for HighlightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HighlightKind::Comparing => "comparing",
            HighlightKind::Swapping => "swapping",
            HighlightKind::Settled => "settled",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_algorithm_names() {
        assert_eq!("bubble".parse::<AlgorithmId>().unwrap(), AlgorithmId::Bubble);
        assert_eq!("Quick".parse::<AlgorithmId>().unwrap(), AlgorithmId::Quick);
        assert_eq!(
            "merge-sort".parse::<AlgorithmId>().unwrap(),
            AlgorithmId::Merge
        );
        assert_eq!(
            " Insertion Sort ".parse::<AlgorithmId>().unwrap(),
            AlgorithmId::Insertion
        );
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let err = "heap".parse::<AlgorithmId>().unwrap_err();
        assert_eq!(err, SortvisError::UnknownAlgorithm("heap".to_string()));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.to_string().parse::<AlgorithmId>().unwrap(), id);
        }
    }
}
