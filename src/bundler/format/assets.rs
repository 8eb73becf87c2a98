//! Asset bundle (`assets.bin`) layout and builder.
//!
//! The asset bundle is the top-level artifact: a flat set of named files
//! (typically a model container plus the JSON manifest) behind a sorted
//! index table the device can binary-search without reading payloads:
//!
//! ```text
//! u32 total_files
//! u32 checksum        (additive, over everything after this header)
//! u32 payload_length  (bytes after this header)
//! repeat total_files:               // index region
//!     byte[32] name (NUL-padded)
//!     u32 size
//!     u32 offset     (relative to start of data region)
//!     u16 reserved_width  (0)
//!     u16 reserved_height (0)
//! <data region: repeat total_files: byte[2] marker 0x5A,0x5A + byte[size] content>
//! ```
//!
//! Files are sorted by `(extension, base_name)` ascending so same-type
//! assets sit together. The stored offset points at the file's marker
//! within the data region, not at an absolute file position.

use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::format::checksum::Checksum;
use crate::bundler::format::names::{self, NAME_WIDTH};
use crate::bundler::format::u32_field;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker prefixed to every payload in the data region.
pub const ASSET_MARKER: [u8; 2] = [0x5A, 0x5A];

/// Bundle header size in bytes.
pub const BUNDLE_HEADER_SIZE: usize = 12;

/// Size of one index record in bytes.
pub const ASSET_RECORD_SIZE: usize = NAME_WIDTH + 4 + 4 + 2 + 2;

/// One entry of the index region.
#[derive(Debug, Clone)]
struct AssetRecord {
    name: String,
    size: u32,
    offset: u32,
    /// Reserved image dimensions, always zero for non-image payloads.
    width: u16,
    height: u16,
}

impl AssetRecord {
    fn write_to_buffer(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&names::encode(&self.name, NAME_WIDTH));
        buffer.extend_from_slice(&self.size.to_le_bytes());
        buffer.extend_from_slice(&self.offset.to_le_bytes());
        buffer.extend_from_slice(&self.width.to_le_bytes());
        buffer.extend_from_slice(&self.height.to_le_bytes());
    }
}

/// Result of a successful bundle build.
#[derive(Debug, Clone)]
pub struct BundledAssets {
    /// Path of the written bundle
    pub path: PathBuf,

    /// Total size in bytes, header included
    pub size: u64,

    /// Number of files bundled
    pub total_files: u32,
}

/// Builds `assets.bin` from a flat directory of files.
///
/// Files named in the skip list are control files, not payload, and are
/// never bundled. An empty source directory is valid and yields an empty
/// bundle (`total_files = 0`).
pub struct AssetBundleBuilder {
    source_dir: PathBuf,
    skip_files: Vec<String>,
}

impl AssetBundleBuilder {
    /// Creates a builder over the given source directory.
    ///
    /// The default skip list excludes `config.json`.
    pub fn new<P: AsRef<Path>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
            skip_files: vec!["config.json".to_string()],
        }
    }

    /// Replaces the skip list.
    pub fn skip_files(mut self, skip_files: Vec<String>) -> Self {
        self.skip_files = skip_files;
        self
    }

    /// Packs the source directory and writes the bundle to `out_path`.
    ///
    /// Parent directories of `out_path` are created as needed.
    ///
    /// # Returns
    ///
    /// A [`BundledAssets`] with the written path and total size.
    pub fn build(&self, out_path: &Path) -> Result<BundledAssets> {
        let file_names = self.eligible_files()?;

        // 1. Data region: record each file's offset before its marker.
        let mut records = Vec::with_capacity(file_names.len());
        let mut data: Vec<u8> = Vec::new();

        for name in &file_names {
            let file_path = self.source_dir.join(name);
            let content = fs::read(&file_path).fs_context("reading asset", &file_path)?;

            records.push(AssetRecord {
                name: name.clone(),
                size: u32_field(content.len(), "size")?,
                offset: u32_field(data.len(), "offset")?,
                width: 0,
                height: 0,
            });
            data.extend_from_slice(&ASSET_MARKER);
            data.extend_from_slice(&content);
        }

        // 2. Index region.
        let mut index = Vec::with_capacity(records.len() * ASSET_RECORD_SIZE);
        for record in &records {
            record.write_to_buffer(&mut index);
        }

        // 3. Checksum and length cover index || data.
        let mut acc = Checksum::new();
        acc.update(&index);
        acc.update(&data);
        let payload_length = u32_field(index.len() + data.len(), "payload_length")?;

        // 4. Header + payload.
        let mut out =
            Vec::with_capacity(BUNDLE_HEADER_SIZE + payload_length as usize);
        out.extend_from_slice(&u32_field(records.len(), "total_files")?.to_le_bytes());
        out.extend_from_slice(&acc.finalize().to_le_bytes());
        out.extend_from_slice(&payload_length.to_le_bytes());
        out.extend_from_slice(&index);
        out.extend_from_slice(&data);

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).fs_context("creating output directory", parent)?;
        }
        fs::write(out_path, &out).fs_context("writing asset bundle", out_path)?;

        log::info!(
            "wrote {} ({:.2} KiB, {} files)",
            out_path.display(),
            out.len() as f64 / 1024.0,
            records.len()
        );
        Ok(BundledAssets {
            path: out_path.to_path_buf(),
            size: out.len() as u64,
            total_files: records.len() as u32,
        })
    }

    /// Lists bundleable file names, sorted by `(extension, base_name)`.
    fn eligible_files(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.source_dir)
            .fs_context("listing asset directory", &self.source_dir)?;

        let mut file_names = Vec::new();
        for entry in entries {
            let entry = entry.fs_context("listing asset directory", &self.source_dir)?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.skip_files.iter().any(|skip| skip == &name) {
                log::debug!("skipping control file {name}");
                continue;
            }
            file_names.push(name);
        }

        file_names.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        Ok(file_names)
    }
}

/// Sort key grouping files by extension, then alphabetically.
///
/// The extension includes its dot; a name without one, or with nothing but
/// leading dots before it, sorts under the empty extension.
fn sort_key(name: &str) -> (String, String) {
    if let Some(dot) = name.rfind('.') {
        if name[..dot].chars().any(|c| c != '.') {
            return (name[dot..].to_string(), name[..dot].to_string());
        }
    }
    (String::new(), name.to_string())
}
