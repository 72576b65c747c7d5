//! File-backed sample sequences.
//!
//! Each file holds one series (or one shard of a series) in timestamp order.
//! Sequences open the file eagerly and decode samples lazily, one per pull,
//! so aggregation over many shards never holds more than one lookahead
//! sample per shard in memory.
//!
//! - [`jsonl`] -- JSON Lines (feature `io-jsonl`)
//! - [`csv`] -- `timestamp,kind,value` rows (feature `io-csv`)
//! - [`compression`] -- transparent gzip/zstd/bzip2/xz decoding
//! - [`glob`] -- one sequence per matching shard file

pub mod compression;
pub mod glob;

#[cfg(feature = "io-jsonl")]
pub mod jsonl;

#[cfg(feature = "io-csv")]
pub mod csv;
