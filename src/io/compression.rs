//! Transparent decompression for file-backed sequences.
//!
//! Stored series are often shipped compressed. [`open_decompressed`] opens a
//! file and wraps it in the matching decoder, detected by extension first and
//! by magic bytes when the extension says nothing.
//!
//! Codecs compiled in depend on feature flags:
//! - **Gzip** (`.gz`) via `flate2` (feature `compression-gzip`)
//! - **Zstd** (`.zst`) via `zstd` (feature `compression-zstd`)
//! - **Bzip2** (`.bz2`) via `bzip2` (feature `compression-bzip2`)
//! - **Xz** (`.xz`) via `xz2` (feature `compression-xz`)

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// A supported compression format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    Gzip,
    Zstd,
    Bzip2,
    Xz,
}

impl Codec {
    /// Codecs compiled into this build, in detection order.
    pub fn enabled() -> Vec<Codec> {
        vec![
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip,
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd,
            #[cfg(feature = "compression-bzip2")]
            Codec::Bzip2,
            #[cfg(feature = "compression-xz")]
            Codec::Xz,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Codec::Gzip => "gzip",
            Codec::Zstd => "zstd",
            Codec::Bzip2 => "bzip2",
            Codec::Xz => "xz",
        }
    }

    fn extensions(self) -> &'static [&'static str] {
        match self {
            Codec::Gzip => &[".gz", ".gzip"],
            Codec::Zstd => &[".zst", ".zstd"],
            Codec::Bzip2 => &[".bz2", ".bzip2"],
            Codec::Xz => &[".xz"],
        }
    }

    fn magic_bytes(self) -> &'static [u8] {
        match self {
            Codec::Gzip => &[0x1f, 0x8b],
            Codec::Zstd => &[0x28, 0xb5, 0x2f, 0xfd],
            Codec::Bzip2 => &[0x42, 0x5a, 0x68],
            Codec::Xz => &[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00],
        }
    }

    /// Match an enabled codec by file extension (case-insensitive).
    pub fn from_path(path: impl AsRef<Path>) -> Option<Codec> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        Self::enabled()
            .into_iter()
            .find(|c| c.extensions().iter().any(|ext| name.ends_with(ext)))
    }

    /// Match an enabled codec by the leading bytes of a stream.
    pub fn from_magic(head: &[u8]) -> Option<Codec> {
        Self::enabled()
            .into_iter()
            .find(|c| head.starts_with(c.magic_bytes()))
    }

    /// Wrap `reader` with this codec's decoder.
    #[allow(unreachable_patterns)]
    pub fn wrap_reader(self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>> {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => Ok(Box::new(flate2::read::GzDecoder::new(reader))),
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => {
                let decoder = zstd::stream::read::Decoder::new(reader)?;
                Ok(Box::new(decoder))
            }
            #[cfg(feature = "compression-bzip2")]
            Codec::Bzip2 => Ok(Box::new(bzip2::read::BzDecoder::new(reader))),
            #[cfg(feature = "compression-xz")]
            Codec::Xz => Ok(Box::new(xz2::read::XzDecoder::new(reader))),
            other => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("{} support not compiled in", other.name()),
            )),
        }
    }
}

/// Open `path` for buffered reading, decompressing if a codec matches.
///
/// # Errors
/// Returns an error if the file cannot be opened or the decoder cannot be set up.
pub fn open_decompressed(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let f = File::open(path)
        .with_context(|| format!("open {}", path.display()))?;

    if let Some(codec) = Codec::from_path(path) {
        let r = codec
            .wrap_reader(Box::new(f))
            .with_context(|| format!("wrap {} with {} codec", path.display(), codec.name()))?;
        return Ok(Box::new(BufReader::new(r)));
    }

    let mut buffered = BufReader::new(f);
    let head = buffered
        .fill_buf()
        .with_context(|| format!("read {}", path.display()))?;
    if let Some(codec) = Codec::from_magic(head) {
        let r = codec
            .wrap_reader(Box::new(buffered))
            .with_context(|| format!("wrap {} with {} codec", path.display(), codec.name()))?;
        return Ok(Box::new(BufReader::new(r)));
    }
    Ok(Box::new(buffered))
}
