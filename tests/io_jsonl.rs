//! Aggregating JSON Lines shards, plain and compressed.

#![cfg(feature = "io-jsonl")]

use anyhow::Result;
use std::fs;
use std::path::Path;
use tsmerge::testing::*;
use tsmerge::*;

/// Sum a single JSONL shard on its own.
fn sum_shard(path: &Path) -> Result<Vec<Sample>> {
    let shard = JsonlSequence::open(path)?.boxed();
    Ok(collect_samples(SumAggregator::new().aggregate([shard]))?)
}

#[test]
fn test_jsonl_shards_sum() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let (a, b) = split_groups(1_000);
    let pa = write_jsonl_fixture(&tmp, "part-0.jsonl", &a)?;
    let pb = write_jsonl_fixture(&tmp, "part-1.jsonl", &b)?;

    let sum = SumAggregator::new();
    let out = sum.create_aggregator_group(Some(vec![
        JsonlSequence::open(&pa)?.boxed(),
        JsonlSequence::open(&pb)?.boxed(),
    ]))?;
    let got = collect_samples(out)?;

    let want = [
        Sample::integer(1_001, 33),
        Sample::integer(1_002, 9),
        Sample::integer(1_003, 25),
    ];
    assert_samples_equal(&got, &want);
    Ok(())
}

#[test]
fn test_jsonl_glob_opens_every_shard() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let inputs = pseudo_random_sorted(11, 4, 30, 25, 0);
    for (i, samples) in inputs.iter().enumerate() {
        write_jsonl_fixture(&tmp, &format!("part-{i}.jsonl"), samples)?;
    }
    fs::write(tmp.path().join("notes.txt"), "ignored")?;

    let pattern = format!("{}/part-*.jsonl", tmp.path().display());
    let shards = open_jsonl_glob(&pattern)?;
    assert_eq!(shards.len(), 4);

    let got = collect_samples(SumAggregator::new().aggregate(shards))?;
    assert_samples_equal(&got, &reference_sum(&inputs));
    Ok(())
}

#[test]
fn test_jsonl_glob_without_matches_is_empty_output() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let pattern = format!("{}/*.jsonl", tmp.path().display());
    let shards = open_jsonl_glob(&pattern)?;
    let mut out = SumAggregator::new().create_aggregator_group(Some(shards))?;
    assert!(!out.has_next());
    Ok(())
}

#[test]
fn test_jsonl_decode_error_fails_the_pull() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("bad.jsonl");
    fs::write(
        &path,
        "{\"timestamp\":1,\"value\":{\"integer\":1}}\n\
         {\"timestamp\":2,\"value\":{\"text\":\"x\"}}\n",
    )?;

    let shard = JsonlSequence::open(&path)?.boxed();
    let mut out = SumAggregator::new().aggregate([shard]);
    // Refilling after the first sample hits the bad line.
    match out.next_sample() {
        Err(AggregateError::Decode(msg)) => assert!(msg.contains("line 2"), "{msg}"),
        other => panic!("expected decode error, got {other:?}"),
    }
    assert!(!out.has_next());
    Ok(())
}

#[cfg(feature = "compression-gzip")]
#[test]
fn test_gzip_shard_is_decompressed() -> Result<()> {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let tmp = tempfile::tempdir()?;
    let plain = write_jsonl_fixture(&tmp, "plain.jsonl", &real_groups())?;
    let gz_path = tmp.path().join("shard.jsonl.gz");
    let file = fs::File::create(&gz_path)?;
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(&fs::read(&plain)?)?;
    enc.finish()?;

    let got = sum_shard(&gz_path)?;
    let want = [
        Sample::real(1, 33.3),
        Sample::real(2, 9.2),
        Sample::real(3, 25.1),
    ];
    assert_samples_approx_equal(&got, &want, 1e-10);
    Ok(())
}

#[cfg(feature = "compression-zstd")]
#[test]
fn test_zstd_shard_is_decompressed() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let plain = write_jsonl_fixture(&tmp, "plain.jsonl", &integer_groups())?;
    let zst_path = tmp.path().join("shard.jsonl.zst");
    let packed = zstd::encode_all(fs::read(&plain)?.as_slice(), 0)?;
    fs::write(&zst_path, packed)?;

    let got = collect_samples(JsonlSequence::open(&zst_path)?)?;
    assert_samples_equal(&got, &integer_groups());
    Ok(())
}

#[cfg(feature = "compression-bzip2")]
#[test]
fn test_bzip2_shard_is_decompressed() -> Result<()> {
    use bzip2::Compression;
    use bzip2::write::BzEncoder;
    use std::io::Write;

    let tmp = tempfile::tempdir()?;
    let (a, _) = split_groups(0);
    let plain = write_jsonl_fixture(&tmp, "plain.jsonl", &a)?;
    let bz_path = tmp.path().join("shard.jsonl.bz2");
    let file = fs::File::create(&bz_path)?;
    let mut enc = BzEncoder::new(file, Compression::default());
    enc.write_all(&fs::read(&plain)?)?;
    enc.finish()?;

    let got = sum_shard(&bz_path)?;
    let want = [
        Sample::integer(1, 13),
        Sample::integer(2, 6),
        Sample::integer(3, 25),
    ];
    assert_samples_equal(&got, &want);
    Ok(())
}

#[cfg(feature = "compression-xz")]
#[test]
fn test_xz_shard_is_decompressed() -> Result<()> {
    use std::io::Write;
    use xz2::write::XzEncoder;

    let tmp = tempfile::tempdir()?;
    let plain = write_jsonl_fixture(&tmp, "plain.jsonl", &mixed_groups())?;
    // No extension: the codec is found from the stream header.
    let xz_path = tmp.path().join("shard.bin");
    let mut enc = XzEncoder::new(fs::File::create(&xz_path)?, 6);
    enc.write_all(&fs::read(&plain)?)?;
    enc.finish()?;

    let got = sum_shard(&xz_path)?;
    let want = [
        Sample::real(1, 33.3),
        Sample::real(2, 9.2),
        Sample::real(3, 25.1),
    ];
    assert_samples_approx_equal(&got, &want, 1e-10);
    Ok(())
}
