//! CSV backed sample sequences.
//!
//! Each row is `timestamp,kind,value` where `kind` is `integer` or `real`:
//!
//! ```text
//! timestamp,kind,value
//! 1,integer,10
//! 1,real,20.5
//! ```
//!
//! Rows are deserialized one per pull with Serde. Errors carry the record
//! number (1-based, header excluded).

use crate::error::{AggregateError, Result};
use crate::io::compression::open_decompressed;
use crate::io::glob::expand_glob;
use crate::sample::{Sample, Value};
use crate::sequence::{BoxedSequence, SampleSequence, TryIterSequence};
use serde::Deserialize;
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Integer,
    Real,
}

#[derive(Debug, Deserialize)]
struct Row {
    timestamp: i64,
    kind: Kind,
    value: String,
}

impl Row {
    fn into_sample(self) -> std::result::Result<Sample, String> {
        let text = self.value.trim();
        let value = match self.kind {
            Kind::Integer => text.parse().map(Value::Integer).map_err(|e| e.to_string()),
            Kind::Real => text.parse().map(Value::Real).map_err(|e| e.to_string()),
        }?;
        Ok(Sample::new(self.timestamp, value))
    }
}

/// Decoding iterator over the records of one CSV file.
pub struct CsvSamples {
    records: csv::DeserializeRecordsIntoIter<Box<dyn BufRead>, Row>,
    path: PathBuf,
    record_no: usize,
}

impl Iterator for CsvSamples {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Result<Sample>> {
        let rec = self.records.next()?;
        self.record_no += 1;
        let decoded = rec.map_err(|e| e.to_string()).and_then(Row::into_sample);
        Some(decoded.map_err(|e| {
            AggregateError::Decode(format!(
                "parse CSV record #{} in {}: {e}",
                self.record_no,
                self.path.display()
            ))
        }))
    }
}

/// A series stored as a CSV file.
pub struct CsvSequence {
    path: PathBuf,
    inner: TryIterSequence<CsvSamples>,
}

impl CsvSequence {
    /// Open `path`. If `has_headers` the first row is skipped.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its codec set up.
    pub fn open(path: impl AsRef<Path>, has_headers: bool) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let reader = open_decompressed(&path)?;
        let records = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_deserialize::<Row>();
        let samples = CsvSamples {
            records,
            path: path.clone(),
            record_no: 0,
        };
        Ok(Self {
            path,
            inner: TryIterSequence::new(samples),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn boxed(self) -> BoxedSequence {
        Box::new(self)
    }
}

impl SampleSequence for CsvSequence {
    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next_sample(&mut self) -> Result<Sample> {
        self.inner.next_sample()
    }
}

/// Open one [`CsvSequence`] per file matching `pattern`, in path order.
///
/// # Errors
/// Returns an error for an invalid pattern or a file that cannot be opened.
pub fn open_csv_glob(pattern: &str, has_headers: bool) -> anyhow::Result<Vec<BoxedSequence>> {
    expand_glob(pattern)?
        .into_iter()
        .map(|p| CsvSequence::open(p, has_headers).map(CsvSequence::boxed))
        .collect()
}
