//! huffpack: byte-oriented Huffman compression with a self-describing
//! file container.
//!
//! The pipeline counts byte frequencies, builds a prefix tree by
//! greedy minimum-weight merging, derives a prefix-free code table,
//! packs the input bit by bit and frames the result as magic marker,
//! tree blob, padding count and payload. Decompression reverses the
//! steps, rebuilding the tree from the stored blob.
//!
//! [`encode`]/[`decode`] run the codec over in-memory buffers;
//! [`Compressor`] is the file front door with the skip policy
//! (container re-input, known-compressed extensions, results that
//! would not shrink) and per-phase timing reports.

pub mod bitpack;
pub mod code;
pub mod config;
pub mod container;
pub mod error;
pub mod freq;
pub mod tree;
pub mod tree_codec;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use crate::config::CompressorConfig;
pub use crate::error::{CompressError, FormatError};
pub use crate::freq::FrequencyTable;
pub use crate::tree::HuffNode;

/// In-memory result of running the full encoding pipeline.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// The assembled container bytes.
    pub container: Vec<u8>,
    /// Root of the prefix tree, `None` for empty input.
    pub tree: Option<HuffNode>,
    /// Distinct byte values observed in the input.
    pub unique_symbols: usize,
    /// Zero bits appended to fill the final payload byte.
    pub pad_count: u8,
}

/// Encode `data` into container bytes. Empty input yields the 9-byte
/// container with an empty tree blob and no payload.
pub fn encode(data: &[u8]) -> Result<Encoded, CompressError> {
    let freq = FrequencyTable::from_bytes(data);
    let root = tree::build_tree(&freq);
    let codes = code::build_codes(root.as_ref());
    let (payload, pad_count) = bitpack::pack(data, &codes)?;
    let blob = tree_codec::serialize(root.as_ref());
    let container = container::assemble(&blob, pad_count, &payload);
    Ok(Encoded {
        container,
        tree: root,
        unique_symbols: freq.unique_symbols(),
        pad_count,
    })
}

/// Decode container bytes back into the original input.
pub fn decode(raw: &[u8]) -> Result<Vec<u8>, CompressError> {
    let parsed = container::parse(raw)?;
    let root = tree_codec::deserialize(parsed.tree_blob)?;
    let data = bitpack::unpack(parsed.payload, parsed.pad_count, root.as_ref())?;
    Ok(data)
}

/// Wall-clock seconds spent in each compression phase. Phases that did
/// not run (skipped inputs) stay at zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CompressTimings {
    pub read: f64,
    pub tree_build: f64,
    pub codes: f64,
    pub pack: f64,
    pub write: f64,
    pub total: f64,
}

/// Wall-clock seconds spent in each decompression phase.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DecompressTimings {
    pub read: f64,
    pub parse: f64,
    pub tree: f64,
    pub decode: f64,
    pub write: f64,
    pub total: f64,
}

/// Statistics record for one compression call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub unique_symbols: usize,
    /// Padding count of the assembled container, when one was built.
    pub pad_count: Option<u8>,
    /// Compressed over original size; `None` when the input was empty
    /// or skipped before a size comparison made sense.
    pub ratio: Option<f64>,
    pub space_saved_percent: Option<f64>,
    /// True when compression was skipped; `note` says why.
    pub skipped: bool,
    pub note: Option<String>,
    pub timings: CompressTimings,
}

impl CompressionReport {
    /// Render the record for collaborators that consume JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Statistics record for one decompression call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecompressionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub compressed_bytes: u64,
    pub restored_bytes: u64,
    pub pad_count: u8,
    pub timings: DecompressTimings,
}

impl DecompressionReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of [`Compressor::compress_file`]: the statistics record plus
/// the prefix tree for collaborators that render it. The tree is
/// `None` whenever compression was skipped.
#[derive(Debug)]
pub struct CompressionOutcome {
    pub tree: Option<HuffNode>,
    pub report: CompressionReport,
}

/// File-oriented front door around the codec.
///
/// Every call operates on its own frequency table, tree and code
/// table; nothing is shared between invocations.
pub struct Compressor {
    config: CompressorConfig,
}

impl Compressor {
    /// Create a compressor with the given skip policy.
    pub fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// Compress `src` into `dst`.
    ///
    /// Inputs that already carry the magic marker or the container
    /// extension are skipped without writing `dst`; inputs with a
    /// known-compressed extension likewise. When the assembled
    /// container would not be smaller than the input, the original
    /// bytes are copied to `dst` verbatim instead. Such copies carry
    /// no marker and cannot be fed back through
    /// [`Compressor::decompress_file`].
    pub fn compress_file(&self, src: &Path, dst: &Path) -> Result<CompressionOutcome, CompressError> {
        let t0 = Instant::now();
        let raw = fs::read(src)?;
        let read_secs = t0.elapsed().as_secs_f64();
        let original_bytes = raw.len() as u64;
        let src_name = src.to_string_lossy().to_lowercase();

        // 1) already a container: refuse to double-encode
        if raw.starts_with(&container::MAGIC) || src_name.ends_with(&self.config.container_extension)
        {
            debug!(path = %src.display(), "input already a container, skipping");
            let report = CompressionReport {
                input: src.to_path_buf(),
                output: dst.to_path_buf(),
                original_bytes,
                compressed_bytes: original_bytes,
                unique_symbols: 0,
                pad_count: None,
                ratio: None,
                space_saved_percent: None,
                skipped: true,
                note: Some(
                    "input is already a compressed container; double compression prevented"
                        .to_string(),
                ),
                timings: CompressTimings {
                    read: read_secs,
                    total: t0.elapsed().as_secs_f64(),
                    ..Default::default()
                },
            };
            return Ok(CompressionOutcome { tree: None, report });
        }

        // 2) file type that is almost certainly compressed already
        if self
            .config
            .skip_extensions
            .iter()
            .any(|ext| src_name.ends_with(ext.as_str()))
        {
            debug!(path = %src.display(), "known compressed file type, skipping");
            let report = CompressionReport {
                input: src.to_path_buf(),
                output: dst.to_path_buf(),
                original_bytes,
                compressed_bytes: original_bytes,
                unique_symbols: 0,
                pad_count: None,
                ratio: Some(1.0),
                space_saved_percent: Some(0.0),
                skipped: true,
                note: Some(
                    "this file type is likely already compressed; compression skipped".to_string(),
                ),
                timings: CompressTimings {
                    read: read_secs,
                    total: t0.elapsed().as_secs_f64(),
                    ..Default::default()
                },
            };
            return Ok(CompressionOutcome { tree: None, report });
        }

        // full pipeline, assembled in memory before any write
        let phase = Instant::now();
        let freq = FrequencyTable::from_bytes(&raw);
        let root = tree::build_tree(&freq);
        let tree_secs = phase.elapsed().as_secs_f64();

        let phase = Instant::now();
        let codes = code::build_codes(root.as_ref());
        let codes_secs = phase.elapsed().as_secs_f64();

        let phase = Instant::now();
        let (payload, pad_count) = bitpack::pack(&raw, &codes)?;
        let blob = tree_codec::serialize(root.as_ref());
        let container_bytes = container::assemble(&blob, pad_count, &payload);
        let pack_secs = phase.elapsed().as_secs_f64();
        let compressed_bytes = container_bytes.len() as u64;

        // 3) keep the original when the container would not shrink it
        if compressed_bytes >= original_bytes {
            debug!(
                container = compressed_bytes,
                original = original_bytes,
                "container would not shrink input, copying original verbatim"
            );
            let phase = Instant::now();
            fs::write(dst, &raw)?;
            let write_secs = phase.elapsed().as_secs_f64();
            let report = CompressionReport {
                input: src.to_path_buf(),
                output: dst.to_path_buf(),
                original_bytes,
                compressed_bytes: original_bytes,
                unique_symbols: freq.unique_symbols(),
                pad_count: Some(pad_count),
                ratio: Some(1.0),
                space_saved_percent: Some(0.0),
                skipped: true,
                note: Some(
                    "compression cannot reduce this input; original copied verbatim".to_string(),
                ),
                timings: CompressTimings {
                    read: read_secs,
                    tree_build: tree_secs,
                    codes: codes_secs,
                    pack: pack_secs,
                    write: write_secs,
                    total: t0.elapsed().as_secs_f64(),
                },
            };
            return Ok(CompressionOutcome { tree: None, report });
        }

        let phase = Instant::now();
        fs::write(dst, &container_bytes)?;
        let write_secs = phase.elapsed().as_secs_f64();

        info!(
            original = original_bytes,
            compressed = compressed_bytes,
            unique_symbols = freq.unique_symbols(),
            "file compressed"
        );

        let ratio = if original_bytes > 0 {
            Some(compressed_bytes as f64 / original_bytes as f64)
        } else {
            None
        };
        let space_saved_percent = if original_bytes > 0 {
            Some(
                (original_bytes - compressed_bytes) as f64 / original_bytes as f64 * 100.0,
            )
        } else {
            None
        };

        let report = CompressionReport {
            input: src.to_path_buf(),
            output: dst.to_path_buf(),
            original_bytes,
            compressed_bytes,
            unique_symbols: freq.unique_symbols(),
            pad_count: Some(pad_count),
            ratio,
            space_saved_percent,
            skipped: false,
            note: None,
            timings: CompressTimings {
                read: read_secs,
                tree_build: tree_secs,
                codes: codes_secs,
                pack: pack_secs,
                write: write_secs,
                total: t0.elapsed().as_secs_f64(),
            },
        };
        Ok(CompressionOutcome { tree: root, report })
    }

    /// Decompress the container at `src` into `dst`.
    ///
    /// Fails with a [`FormatError`]-carrying [`CompressError`] before
    /// `dst` is created when the container is malformed.
    pub fn decompress_file(&self, src: &Path, dst: &Path) -> Result<DecompressionReport, CompressError> {
        let t0 = Instant::now();
        let raw = fs::read(src)?;
        let read_secs = t0.elapsed().as_secs_f64();

        let phase = Instant::now();
        let parsed = container::parse(&raw)?;
        let parse_secs = phase.elapsed().as_secs_f64();

        let phase = Instant::now();
        let root = tree_codec::deserialize(parsed.tree_blob)?;
        let tree_secs = phase.elapsed().as_secs_f64();

        let phase = Instant::now();
        let restored = bitpack::unpack(parsed.payload, parsed.pad_count, root.as_ref())?;
        let decode_secs = phase.elapsed().as_secs_f64();

        let phase = Instant::now();
        fs::write(dst, &restored)?;
        let write_secs = phase.elapsed().as_secs_f64();

        info!(
            compressed = raw.len(),
            restored = restored.len(),
            "file restored"
        );

        Ok(DecompressionReport {
            input: src.to_path_buf(),
            output: dst.to_path_buf(),
            compressed_bytes: raw.len() as u64,
            restored_bytes: restored.len() as u64,
            pad_count: parsed.pad_count,
            timings: DecompressTimings {
                read: read_secs,
                parse: parse_secs,
                tree: tree_secs,
                decode: decode_secs,
                write: write_secs,
                total: t0.elapsed().as_secs_f64(),
            },
        })
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(CompressorConfig::default())
    }
}
