//! Canned inputs for aggregation tests.
//!
//! The grouped fixtures hold several samples per timestamp in a single
//! sequence, which is the case a naive pairwise merge gets wrong.

use crate::sample::{Sample, TimestampMs};
use crate::testing::SequenceBuilder;

/// One integer sequence: `t=1: 10,20,3`, `t=2: 1,3,5`, `t=3: 25`.
///
/// Sums to `[(1, 33), (2, 9), (3, 25)]`.
#[must_use]
pub fn integer_groups() -> Vec<Sample> {
    SequenceBuilder::new("group")
        .integers(1, &[10, 20, 3])
        .integers(2, &[1, 3, 5])
        .integer(3, 25)
        .samples()
        .to_vec()
}

/// One real sequence: `t=1: 10.0,20.3,3.0`, `t=2: 1.0,3.2,5.0`, `t=3: 25.1`.
///
/// Sums to `[(1, 33.3), (2, 9.2), (3, 25.1)]`.
#[must_use]
pub fn real_groups() -> Vec<Sample> {
    SequenceBuilder::new("group")
        .reals(1, &[10.0, 20.3, 3.0])
        .reals(2, &[1.0, 3.2, 5.0])
        .real(3, 25.1)
        .samples()
        .to_vec()
}

/// One sequence mixing integers and reals at every timestamp.
///
/// Sums to reals `[(1, 33.3), (2, 9.2), (3, 25.1)]`.
#[must_use]
pub fn mixed_groups() -> Vec<Sample> {
    SequenceBuilder::new("group")
        .reals(1, &[10.0, 20.3])
        .integer(1, 3)
        .integer(2, 1)
        .reals(2, &[3.2, 5.0])
        .real(3, 25.1)
        .samples()
        .to_vec()
}

/// Two integer sequences offset from `base` that only sum correctly when
/// merged across inputs.
///
/// Sums to `[(base+1, 33), (base+2, 9), (base+3, 25)]`.
#[must_use]
pub fn split_groups(base: TimestampMs) -> (Vec<Sample>, Vec<Sample>) {
    let a = SequenceBuilder::new("group")
        .integers(base + 1, &[10, 3])
        .integers(base + 2, &[1, 5])
        .integer(base + 3, 25);
    let b = SequenceBuilder::new("group")
        .integer(base + 1, 20)
        .integer(base + 2, 3);
    (a.samples().to_vec(), b.samples().to_vec())
}

/// Write `samples` as a JSONL file named `name` inside `dir`.
///
/// # Errors
/// Returns an error if the file cannot be written.
#[cfg(feature = "io-jsonl")]
pub fn write_jsonl_fixture(
    dir: &tempfile::TempDir,
    name: &str,
    samples: &[Sample],
) -> anyhow::Result<std::path::PathBuf> {
    use std::io::Write;

    let path = dir.path().join(name);
    let mut f = std::io::BufWriter::new(std::fs::File::create(&path)?);
    for s in samples {
        serde_json::to_writer(&mut f, s)?;
        f.write_all(b"\n")?;
    }
    f.flush()?;
    Ok(path)
}
