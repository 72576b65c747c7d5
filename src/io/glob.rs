//! Glob expansion for sharded series files.
//!
//! A series split across shards is usually stored as one file per shard
//! (`cpu/host=a/part-*.jsonl`). Expanding a pattern gives every shard in a
//! deterministic, sorted order, ready to be opened as one sequence each.

use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Shard files matching `pattern`, sorted by path.
///
/// Directories that match are skipped. A pattern matching nothing yields an
/// empty list, which aggregates to an empty output.
///
/// # Errors
/// Returns an error if the pattern is malformed or a matched entry cannot be
/// inspected.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob(pattern)
        .with_context(|| format!("bad shard pattern {pattern:?}"))?;
    let mut shards = entries
        .filter_map(|entry| match entry {
            Ok(path) if !path.is_file() => None,
            other => Some(other),
        })
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("list shards for {pattern:?}"))?;
    shards.sort_unstable();
    Ok(shards)
}
