//! Contains the building blocks of a sort run.
//!
//! This module provides the checkpoint (the pace and cancellation signals a run
//! is steered by) and the sort engine whose drivers step through an algorithm.
//! The `RunController` wires one of each together for every run it starts.

pub mod checkpoint;
pub mod sorter;
