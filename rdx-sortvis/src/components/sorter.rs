//! The five sort drivers.
//!
//! A `SortEngine` owns one run's working sequence and steps an algorithm over it,
//! reporting every observable moment to the run's observer and suspending at a
//! checkpoint after each comparison and each write. The recursive algorithms are
//! driven from an explicit frame stack, so a cancelled run unwinds by simply
//! leaving its loop.

use crate::common::{AlgorithmId, HighlightKind, SortItem};
use crate::components::checkpoint::{Cancelled, Pacer};
use crate::events::{StepEvent, StepObserver};
use tracing::{debug, trace};

/// A pending unit of merge sort work.
#[derive(Debug, Clone, Copy)]
enum MergeFrame {
    Split { low: usize, high: usize },
    Merge { low: usize, mid: usize, high: usize },
}

/// Read positions in the two scratch halves and the next write position.
#[derive(Debug)]
struct MergeCursor {
    left: usize,
    right: usize,
    dest: usize,
}

/// Executes one sort run over an exclusively owned sequence.
pub struct SortEngine<T> {
    sequence: Vec<T>,
    observer: StepObserver<T>,
    pacer: Pacer,
    steps: u64,
}

impl<T: SortItem> SortEngine<T> {
    pub fn new(sequence: Vec<T>, observer: StepObserver<T>, pacer: Pacer) -> Self {
        Self {
            sequence,
            observer,
            pacer,
            steps: 0,
        }
    }

    pub fn sequence(&self) -> &[T] {
        &self.sequence
    }

    /// Number of checkpoints passed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn into_sequence(self) -> Vec<T> {
        self.sequence
    }

    /// Drives `algorithm` to completion, or until cancellation is observed.
    ///
    /// On `Err(Cancelled)` the sequence is left partially sorted but is always a
    /// permutation of the input.
    pub async fn run(&mut self, algorithm: AlgorithmId) -> Result<(), Cancelled> {
        debug!(%algorithm, len = self.sequence.len(), "driver starting");
        match algorithm {
            AlgorithmId::Bubble => self.bubble().await,
            AlgorithmId::Selection => self.selection().await,
            AlgorithmId::Insertion => self.insertion().await,
            AlgorithmId::Quick => self.quick().await,
            AlgorithmId::Merge => self.merge_sort().await,
        }
    }

    fn emit(&mut self, indices: &[usize], kind: HighlightKind) {
        trace!(?indices, %kind, step = self.steps, "emit");
        let event = StepEvent::new(self.sequence.clone(), indices, kind);
        (self.observer)(&event);
    }

    /// Emits a comparing/swapping event and waits at the checkpoint behind it.
    async fn step(&mut self, indices: &[usize], kind: HighlightKind) -> Result<(), Cancelled> {
        if self.pacer.is_cancelled() {
            return Err(Cancelled);
        }
        self.emit(indices, kind);
        self.pacer.checkpoint().await?;
        self.steps += 1;
        Ok(())
    }

    /// Emits a settled event. No checkpoint follows, but a cancelled run stays silent.
    fn settle(&mut self, index: usize) -> Result<(), Cancelled> {
        if self.pacer.is_cancelled() {
            return Err(Cancelled);
        }
        self.emit(&[index], HighlightKind::Settled);
        Ok(())
    }

    async fn bubble(&mut self) -> Result<(), Cancelled> {
        let n = self.sequence.len();
        for i in 0..n.saturating_sub(1) {
            for j in 0..n - i - 1 {
                self.step(&[j, j + 1], HighlightKind::Comparing).await?;
                if self.sequence[j] > self.sequence[j + 1] {
                    self.sequence.swap(j, j + 1);
                    self.step(&[j, j + 1], HighlightKind::Swapping).await?;
                }
            }
            self.settle(n - i - 1)?;
        }
        if n > 0 {
            self.settle(0)?;
        }
        Ok(())
    }

    async fn selection(&mut self) -> Result<(), Cancelled> {
        let n = self.sequence.len();
        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            for j in i + 1..n {
                self.step(&[min, j], HighlightKind::Comparing).await?;
                if self.sequence[j] < self.sequence[min] {
                    min = j;
                }
            }
            if min != i {
                self.sequence.swap(i, min);
                self.step(&[i, min], HighlightKind::Swapping).await?;
            }
            self.settle(i)?;
        }
        if n > 0 {
            self.settle(n - 1)?;
        }
        Ok(())
    }

    /// Shifts are done as adjacent exchanges: the key travels left with each shift.
    async fn insertion(&mut self) -> Result<(), Cancelled> {
        for i in 1..self.sequence.len() {
            let mut key = i;
            while key > 0 && self.sequence[key - 1] > self.sequence[key] {
                self.step(&[key - 1, key], HighlightKind::Comparing).await?;
                self.sequence.swap(key - 1, key);
                self.step(&[key - 1, key], HighlightKind::Swapping).await?;
                key -= 1;
            }
            self.settle(key)?;
        }
        Ok(())
    }

    async fn quick(&mut self) -> Result<(), Cancelled> {
        let mut ranges = vec![(0, self.sequence.len().saturating_sub(1))];
        while let Some((low, high)) = ranges.pop() {
            if low >= high {
                continue;
            }
            let pivot = self.partition(low, high).await?;
            // Right first, so the left range is popped (and sorted) first.
            ranges.push((pivot + 1, high));
            if pivot > low {
                ranges.push((low, pivot - 1));
            }
        }
        Ok(())
    }

    /// Lomuto partition around the last element of `low..=high`.
    async fn partition(&mut self, low: usize, high: usize) -> Result<usize, Cancelled> {
        let mut store = low;
        for j in low..high {
            self.step(&[j, high], HighlightKind::Comparing).await?;
            if self.sequence[j] < self.sequence[high] {
                self.sequence.swap(store, j);
                self.step(&[store, j], HighlightKind::Swapping).await?;
                store += 1;
            }
        }
        self.sequence.swap(store, high);
        self.step(&[store, high], HighlightKind::Swapping).await?;
        Ok(store)
    }

    async fn merge_sort(&mut self) -> Result<(), Cancelled> {
        let mut frames = vec![MergeFrame::Split {
            low: 0,
            high: self.sequence.len().saturating_sub(1),
        }];
        while let Some(frame) = frames.pop() {
            match frame {
                MergeFrame::Split { low, high } => {
                    if low >= high {
                        continue;
                    }
                    let mid = low + (high - low) / 2;
                    frames.push(MergeFrame::Merge { low, mid, high });
                    frames.push(MergeFrame::Split { low: mid + 1, high });
                    frames.push(MergeFrame::Split { low, high: mid });
                }
                MergeFrame::Merge { low, mid, high } => self.merge(low, mid, high).await?,
            }
        }
        Ok(())
    }

    async fn merge(&mut self, low: usize, mid: usize, high: usize) -> Result<(), Cancelled> {
        let left = self.sequence[low..=mid].to_vec();
        let right = self.sequence[mid + 1..=high].to_vec();
        let mut cursor = MergeCursor {
            left: 0,
            right: 0,
            dest: low,
        };
        let outcome = self
            .merge_halves(&left, &right, low, mid, &mut cursor)
            .await;
        if outcome.is_err() {
            // Put the undrained scratch values back so nothing is lost or duplicated.
            let rest = left[cursor.left..]
                .iter()
                .chain(&right[cursor.right..])
                .cloned();
            for (slot, value) in self.sequence[cursor.dest..=high].iter_mut().zip(rest) {
                *slot = value;
            }
        }
        outcome
    }

    async fn merge_halves(
        &mut self,
        left: &[T],
        right: &[T],
        low: usize,
        mid: usize,
        cursor: &mut MergeCursor,
    ) -> Result<(), Cancelled> {
        while cursor.left < left.len() && cursor.right < right.len() {
            self.step(
                &[low + cursor.left, mid + 1 + cursor.right],
                HighlightKind::Comparing,
            )
            .await?;
            let value = if left[cursor.left] <= right[cursor.right] {
                cursor.left += 1;
                left[cursor.left - 1].clone()
            } else {
                cursor.right += 1;
                right[cursor.right - 1].clone()
            };
            self.place(value, &mut cursor.dest).await?;
        }
        while cursor.left < left.len() {
            cursor.left += 1;
            self.place(left[cursor.left - 1].clone(), &mut cursor.dest)
                .await?;
        }
        while cursor.right < right.len() {
            cursor.right += 1;
            self.place(right[cursor.right - 1].clone(), &mut cursor.dest)
                .await?;
        }
        Ok(())
    }

    async fn place(&mut self, value: T, dest: &mut usize) -> Result<(), Cancelled> {
        let at = *dest;
        self.sequence[at] = value;
        *dest += 1;
        self.step(&[at], HighlightKind::Swapping).await
    }
}
