//! The error type returned at the engine's boundaries.
//!
//! Cancellation is deliberately absent: a cancelled run is a normal terminal
//! status, reported through `RunStatus`, never as an error.

use crate::common::RunId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SortvisError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid pace: {0}")]
    InvalidPace(String),

    #[error("unknown algorithm '{0}' (expected bubble, selection, insertion, quick or merge)")]
    UnknownAlgorithm(String),

    #[error("unknown visualization mode '{0}' (expected boxes, bars or sized-boxes)")]
    UnknownMode(String),

    #[error("unknown interface language '{0}' (expected vi or en)")]
    UnknownLanguage(String),

    #[error("a sort run is already active ({0:?}); cancel it and wait for it to stop first")]
    AlreadyRunning(RunId),

    #[error("sorting stopped ({0:?}); the sequence was left unchanged")]
    SortStopped(RunId),

    #[error("run {0:?} is no longer active")]
    RunNotActive(RunId),

    #[error("run {0:?} stopped without publishing an outcome")]
    RunLost(RunId),
}

pub type Result<T, E = SortvisError> = std::result::Result<T, E>;
