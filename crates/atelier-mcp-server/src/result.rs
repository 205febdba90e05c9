//! Aggregation helpers over `McpResult`.
//!
//! Rust's `Result` already provides the single-value combinators
//! (`map`, `and_then`, `map_err`, `unwrap_or`, `unwrap_or_else`), so this
//! module only adds what the standard library lacks: turning a sequence of
//! results into one result. Two distinct flavors exist on purpose:
//! [`collect_results`] stops at the first error, while
//! [`partition_results`] evaluates everything and hands back both sides.

use crate::error::{McpError, McpResult};

/// Collect an iterator of results into one result of a `Vec`, short-circuiting
/// on the first error. Elements after the failing one are not consumed.
pub fn collect_results<T, I>(results: I) -> McpResult<Vec<T>>
where
    I: IntoIterator<Item = McpResult<T>>,
{
    let iter = results.into_iter();
    let mut collected = Vec::with_capacity(iter.size_hint().0);
    for result in iter {
        collected.push(result?);
    }
    Ok(collected)
}

/// Partition an iterator of results into successes and errors without
/// short-circuiting. Every element is consumed.
pub fn partition_results<T, I>(results: I) -> (Vec<T>, Vec<McpError>)
where
    I: IntoIterator<Item = McpResult<T>>,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(error) => errors.push(error),
        }
    }
    (values, errors)
}
