//! Merge statistics reported by aggregated sequences.

use anyhow::Result;
use serde_json::json;
use tsmerge::testing::*;
use tsmerge::*;


fn drained_stats() -> Result<MergeStats> {
    let (a, b) = split_groups(0);
    let sum = SumAggregator::new();
    let mut out = sum.create_aggregator_group(Some(vec![
        VecSequence::from_samples("a", a).boxed(),
        VecSequence::from_samples("b", b).boxed(),
        VecSequence::new("empty").boxed(),
    ]))?;
    collect_samples(&mut out)?;
    Ok(out.stats())
}

#[test]
fn test_stats_after_full_merge() -> Result<()> {
    let stats = drained_stats()?;
    assert_eq!(stats.inputs, 3);
    assert_eq!(stats.samples_in, 7);
    assert_eq!(stats.samples_out, 3);
    assert_eq!(stats.batches, 3);
    assert_eq!(stats.max_batch_len, 3);
    assert_approx_eq!(stats.mean_batch_len(), 7.0 / 3.0);
    Ok(())
}

#[test]
fn test_stats_track_partial_pulls() -> Result<()> {
    let a = VecSequence::from_samples("a", integer_groups()).boxed();
    let mut out = SumAggregator::new().create_aggregator_group(Some(vec![a]))?;
    assert_eq!(out.stats().samples_in, 0);
    out.next_sample()?;
    assert_eq!(out.stats().samples_in, 3);
    assert_eq!(out.stats().samples_out, 1);
    Ok(())
}

#[test]
fn test_stats_json_and_file() -> Result<()> {
    let stats = drained_stats()?;
    let j = stats.to_json();
    assert_eq!(j["samples_out"]["value"], json!(3));
    assert_eq!(j["max_batch_len"]["value"], json!(3));

    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("stats.json");
    stats.save_to_file(&path)?;
    let back: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(back, j);

    stats.print();
    Ok(())
}

#[test]
fn test_stats_serialize_plainly() -> Result<()> {
    let stats = drained_stats()?;
    let back: MergeStats = serde_json::from_value(serde_json::to_value(stats)?)?;
    assert_eq!(back, stats);
    Ok(())
}
