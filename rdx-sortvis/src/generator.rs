//! Random sequence generation.

use crate::error::{Result, SortvisError};
use rand::Rng;

pub const DEFAULT_MIN_VALUE: i64 = 1;
pub const DEFAULT_MAX_VALUE: i64 = 1000;

/// Draws `count` independent values from `[min_value, max_value]` using the thread RNG.
pub fn generate(count: usize, min_value: i64, max_value: i64) -> Result<Vec<i64>> {
    generate_with(&mut rand::thread_rng(), count, min_value, max_value)
}

/// Same as [`generate`] but with a caller-supplied RNG, so runs can be reproduced from a seed.
pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    min_value: i64,
    max_value: i64,
) -> Result<Vec<i64>> {
    if min_value > max_value {
        return Err(SortvisError::InvalidArgument(format!(
            "min value {min_value} is greater than max value {max_value}"
        )));
    }
    Ok((0..count)
        .map(|_| rng.gen_range(min_value..=max_value))
        .collect())
}
