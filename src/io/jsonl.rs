//! JSON Lines backed sample sequences.
//!
//! One series per file, one [`Sample`] per line:
//!
//! ```text
//! {"timestamp":1,"value":{"integer":10}}
//! {"timestamp":1,"value":{"real":20.5}}
//! ```
//!
//! Lines are read and decoded lazily, one per pull. Empty/whitespace-only
//! lines are skipped. Compressed files are handled transparently (see
//! [`open_decompressed`]).

use crate::error::{AggregateError, Result};
use crate::io::compression::open_decompressed;
use crate::io::glob::expand_glob;
use crate::sample::Sample;
use crate::sequence::{BoxedSequence, SampleSequence, TryIterSequence};
use std::io::{BufRead, Lines};
use std::path::{Path, PathBuf};

/// Decoding iterator over the lines of one JSONL file.
pub struct JsonlSamples {
    lines: Lines<Box<dyn BufRead>>,
    path: PathBuf,
    line_no: usize,
}

impl Iterator for JsonlSamples {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Result<Sample>> {
        loop {
            let next = self.lines.next()?;
            self.line_no += 1;
            let line = match next {
                Ok(line) => line,
                Err(e) => return Some(Err(AggregateError::Io(e))),
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&line).map_err(|e| {
                AggregateError::Decode(format!(
                    "parse JSONL line {} in {}: {e}",
                    self.line_no,
                    self.path.display()
                ))
            }));
        }
    }
}

/// A series stored as a JSONL file.
pub struct JsonlSequence {
    path: PathBuf,
    inner: TryIterSequence<JsonlSamples>,
}

impl JsonlSequence {
    /// Open `path`. The file is opened now; samples are read on demand.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its codec set up.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let reader = open_decompressed(&path)?;
        let samples = JsonlSamples {
            lines: reader.lines(),
            path: path.clone(),
            line_no: 0,
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

impl SampleSequence for JsonlSequence {
    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next_sample(&mut self) -> Result<Sample> {
        self.inner.next_sample()
    }
}

/// Open one [`JsonlSequence`] per file matching `pattern`, in path order.
///
/// # Errors
/// Returns an error for an invalid pattern or a file that cannot be opened.
pub fn open_jsonl_glob(pattern: &str) -> anyhow::Result<Vec<BoxedSequence>> {
    expand_glob(pattern)?
        .into_iter()
        .map(|p| JsonlSequence::open(p).map(JsonlSequence::boxed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_lazily_and_skips_blank_lines() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("s.jsonl");
        let body = [
            r#"{"timestamp":1,"value":{"integer":10}}"#,
            "",
            "   ",
            r#"{"timestamp":2,"value":{"real":0.5}}"#,
        ];
        fs::write(&p, body.join("\n"))?;

        let mut seq = JsonlSequence::open(&p)?;
        assert_eq!(seq.path(), p.as_path());
        assert!(seq.has_next());
        assert_eq!(seq.next_sample()?, Sample::integer(1, 10));
        assert_eq!(seq.next_sample()?, Sample::real(2, 0.5));
        assert!(!seq.has_next());
        let past_end = seq.next_sample();
        assert!(matches!(past_end, Err(AggregateError::ExhaustedSequence)));
        Ok(())
    }

    #[test]
    fn decode_error_names_line() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("bad.jsonl");
        let body = "{\"timestamp\":1,\"value\":{\"integer\":1}}\nnot json\n";
        fs::write(&p, body)?;

        let mut seq = JsonlSequence::open(&p)?;
        seq.next_sample()?;
        match seq.next_sample() {
            Err(AggregateError::Decode(msg)) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("expected decode error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn unreadable_lines_still_count() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("mixed.jsonl");
        let mut body = b"{\"timestamp\":1,\"value\":{\"integer\":1}}\n".to_vec();
        body.extend_from_slice(b"\xff\xfe\n");
        body.extend_from_slice(b"not json\n");
        fs::write(&p, body)?;

        let mut seq = JsonlSequence::open(&p)?;
        assert_eq!(seq.next_sample()?, Sample::integer(1, 1));
        assert!(matches!(seq.next_sample(), Err(AggregateError::Io(_))));
        match seq.next_sample() {
            Err(AggregateError::Decode(msg)) => assert!(msg.contains("line 3"), "{msg}"),
            other => panic!("expected decode error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn missing_file_fails_to_open() {
        assert!(JsonlSequence::open("/definitely/not/here.jsonl").is_err());
    }
}
