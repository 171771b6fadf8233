//! On-disk block-entity documents with zstd compression.
//!
//! Each block entity lives in its own `.mbe` file: a 14-byte header followed
//! by a zstd-compressed JSON document. The header carries a CRC32 of the
//! compressed payload so truncated or corrupted files are rejected on load.

use crate::persist::Document;
use anyhow::{Context, Result};
use crc32fast::Hasher;
use milldustry_core::BlockPos;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Magic number for block-entity file identification ("MDBE").
const FILE_MAGIC: u32 = 0x4D444245;

/// Current block-entity file format version.
const FILE_VERSION: u16 = 1;

/// Header size in bytes.
const HEADER_LEN: usize = 14;

/// Block-entity file header structure.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    magic: u32,
    version: u16,
    crc32: u32,
    payload_len: u32,
}

impl FileHeader {
    fn new(crc32: u32, payload_len: u32) -> Self {
        Self {
            magic: FILE_MAGIC,
            version: FILE_VERSION,
            crc32,
            payload_len,
        }
    }

    fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..10].copy_from_slice(&self.crc32.to_le_bytes());
        bytes[10..14].copy_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            anyhow::bail!("Block entity header too short");
        }

        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != FILE_MAGIC {
            anyhow::bail!(
                "Invalid block entity magic: expected 0x{:08X}, got 0x{:08X}",
                FILE_MAGIC,
                magic
            );
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != FILE_VERSION {
            anyhow::bail!("Unsupported block entity file version {version}");
        }

        let crc32 = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        let payload_len = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);

        Ok(Self {
            magic,
            version,
            crc32,
            payload_len,
        })
    }
}

fn checksum(bytes: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

/// Encode a document into the framed, compressed file format.
pub fn encode_document(doc: &Document) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(doc).context("Failed to serialize block entity")?;

    // Compress with zstd (level 3 for balanced speed/compression).
    let compressed = zstd::encode_all(&json[..], 3).context("Failed to compress block entity")?;
    let payload_len =
        u32::try_from(compressed.len()).context("Block entity payload exceeds 4 GiB")?;

    let header = FileHeader::new(checksum(&compressed), payload_len);
    let mut bytes = Vec::with_capacity(HEADER_LEN + compressed.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(&compressed);
    Ok(bytes)
}

/// Decode bytes produced by [`encode_document`].
pub fn decode_document(bytes: &[u8]) -> Result<Document> {
    let header = FileHeader::from_bytes(bytes)?;
    let payload = &bytes[HEADER_LEN..];

    if payload.len() != header.payload_len as usize {
        anyhow::bail!(
            "Block entity payload length mismatch: header says {}, found {}",
            header.payload_len,
            payload.len()
        );
    }

    let computed_crc = checksum(payload);
    if computed_crc != header.crc32 {
        anyhow::bail!(
            "CRC32 mismatch: expected {:08X}, got {:08X}",
            header.crc32,
            computed_crc
        );
    }

    let json = zstd::decode_all(payload).context("Failed to decompress block entity")?;
    serde_json::from_slice(&json).context("Block entity payload is not a compound document")
}

/// Write a document to `path`, creating parent directories.
pub fn write_document_file(path: &Path, doc: &Document) -> Result<()> {
    let bytes = encode_document(doc)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create block entity file {}", path.display()))?;
    file.write_all(&bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote block entity");
    Ok(())
}

/// Read a document previously written with [`write_document_file`].
pub fn read_document_file(path: &Path) -> Result<Document> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open block entity file {}", path.display()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    decode_document(&bytes).with_context(|| format!("Invalid block entity file {}", path.display()))
}

/// Directory of block-entity files keyed by position.
pub struct BlockEntityStore {
    root: PathBuf,
}

impl BlockEntityStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).context("Failed to create block entity directory")?;
        Ok(Self { root })
    }

    /// File path for the block entity at `pos`.
    pub fn path_for(&self, pos: BlockPos) -> PathBuf {
        self.root
            .join(format!("be.{}.{}.{}.mbe", pos.x, pos.y, pos.z))
    }

    /// Persist the document for `pos`, replacing any previous one.
    pub fn save(&self, pos: BlockPos, doc: &Document) -> Result<()> {
        write_document_file(&self.path_for(pos), doc)
    }

    /// Load the document for `pos`.
    pub fn load(&self, pos: BlockPos) -> Result<Document> {
        read_document_file(&self.path_for(pos))
    }

    /// Whether a document has been saved for `pos`.
    pub fn exists(&self, pos: BlockPos) -> bool {
        self.path_for(pos).exists()
    }

    /// Delete the document for `pos` (no-op if absent).
    pub fn remove(&self, pos: BlockPos) -> Result<()> {
        let path = self.path_for(pos);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}
