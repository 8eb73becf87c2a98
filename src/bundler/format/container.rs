//! Model container (`srmodels.bin`) layout and builder.
//!
//! A model container packs one or more named model directories into a
//! single file the device maps straight from flash:
//!
//! ```text
//! u32 model_count
//! repeat model_count:
//!     byte[32] model_name (NUL-padded)
//!     u32 file_count
//!     repeat file_count:
//!         byte[32] file_name (NUL-padded, path relative to the model root)
//!         u32 offset   (absolute, from start of container)
//!         u32 length
//! <data region: file payloads in descriptor order>
//! ```
//!
//! All integers are little-endian. Offsets are assigned in the exact order
//! descriptors are emitted, so enumeration order is load-bearing: models in
//! read-dir order, files in walk order, held in vectors (never a hash map).

use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::format::names::{self, NAME_WIDTH};
use crate::bundler::format::u32_field;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default container file name.
pub const MODEL_CONTAINER_FILE: &str = "srmodels.bin";

/// One file discovered under a model directory.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the model root, as stored in the descriptor
    pub rel_path: String,

    /// Raw file content
    pub data: Vec<u8>,
}

/// A named model and its files, in traversal order.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    /// Model name (the subdirectory name)
    pub name: String,

    /// Files under the model root, in walk order
    pub files: Vec<FileEntry>,
}

/// Byte length of the container header for the given counts.
///
/// Fixed before any offset is assigned; this is the address where the data
/// region starts.
pub fn header_length(model_count: usize, total_file_count: usize) -> usize {
    4 + model_count * (NAME_WIDTH + 4) + total_file_count * (NAME_WIDTH + 4 + 4)
}

/// Builds `srmodels.bin` from a directory of model subtrees.
///
/// Immediate subdirectories of the root are the models; each subtree is
/// walked recursively and every file is stored under its path relative to
/// the model root. Plain files directly in the root are ignored.
pub struct ModelContainerBuilder {
    root: PathBuf,
}

impl ModelContainerBuilder {
    /// Creates a builder over the given model root directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Packs all models and writes the container into the root directory.
    ///
    /// # Returns
    ///
    /// Path of the written container file.
    ///
    /// # Errors
    ///
    /// - [`Error::PathNotFound`] if the root does not exist
    /// - [`Error::NoModelsFound`] if the root has no model subdirectories
    /// - [`Error::LayoutInconsistency`] if the serialized header does not
    ///   match the precomputed length (a layout bug, never corrected)
    /// - I/O errors with the failing path attached
    pub fn build(&self) -> Result<PathBuf> {
        let models = self.collect_models()?;
        let bytes = serialize(&models)?;

        let out_path = self.root.join(MODEL_CONTAINER_FILE);
        fs::write(&out_path, &bytes).fs_context("writing model container", &out_path)?;

        log::info!(
            "wrote {} ({:.2} KiB, {} models)",
            out_path.display(),
            bytes.len() as f64 / 1024.0,
            models.len()
        );
        Ok(out_path)
    }

    /// Enumerates models and reads their files into memory.
    ///
    /// Model order is read-dir order and file order is walk order; both are
    /// stable for a given directory snapshot and determine on-disk offsets.
    fn collect_models(&self) -> Result<Vec<ModelEntry>> {
        if !self.root.exists() {
            return Err(Error::PathNotFound(self.root.clone()));
        }

        let mut models = Vec::new();
        let entries =
            fs::read_dir(&self.root).fs_context("listing model root", &self.root)?;

        for entry in entries {
            let entry = entry.fs_context("listing model root", &self.root)?;
            let model_dir = entry.path();
            if !model_dir.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let files = collect_model_files(&model_dir)?;
            log::debug!("model {name}: {} files", files.len());
            models.push(ModelEntry { name, files });
        }

        if models.is_empty() {
            return Err(Error::NoModelsFound(self.root.clone()));
        }
        Ok(models)
    }
}

/// Walks one model subtree and returns its files with relative paths.
fn collect_model_files(model_dir: &Path) -> Result<Vec<FileEntry>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(model_dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::GenericError(format!("walking {}: {e}", model_dir.display()))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        // strip_prefix cannot fail: walkdir yields paths under model_dir.
        let rel_path = entry
            .path()
            .strip_prefix(model_dir)
            .map_err(|e| Error::GenericError(format!("relativizing path: {e}")))?
            .to_string_lossy()
            .into_owned();

        let data = fs::read(entry.path()).fs_context("reading model file", entry.path())?;
        files.push(FileEntry { rel_path, data });
    }

    Ok(files)
}

/// Serializes models into the container byte layout.
fn serialize(models: &[ModelEntry]) -> Result<Vec<u8>> {
    let model_count = models.len();
    let total_file_count: usize = models.iter().map(|m| m.files.len()).sum();
    let header_len = header_length(model_count, total_file_count);

    let mut header = Vec::with_capacity(header_len);
    header.extend_from_slice(&u32_field(model_count, "model_count")?.to_le_bytes());

    let mut data: Vec<u8> = Vec::new();
    for model in models {
        header.extend_from_slice(&names::encode(&model.name, NAME_WIDTH));
        header.extend_from_slice(&u32_field(model.files.len(), "file_count")?.to_le_bytes());

        for file in &model.files {
            header.extend_from_slice(&names::encode(&file.rel_path, NAME_WIDTH));
            let offset = header_len + data.len();
            header.extend_from_slice(&u32_field(offset, "offset")?.to_le_bytes());
            header.extend_from_slice(&u32_field(file.data.len(), "length")?.to_le_bytes());
            data.extend_from_slice(&file.data);
        }
    }

    // The precomputed length fixed the data region's start address. A
    // mismatch means the offsets above are wrong: abort, never patch up.
    if header.len() != header_len {
        return Err(Error::LayoutInconsistency {
            expected: header_len,
            actual: header.len(),
        });
    }

    let mut out = header;
    out.extend_from_slice(&data);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    #[test]
    fn missing_root_is_path_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ModelContainerBuilder::new(dir.path().join("absent"));
        assert!(matches!(builder.build(), Err(Error::PathNotFound(_))));
    }

    #[test]
    fn empty_root_is_no_models_found() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ModelContainerBuilder::new(dir.path());
        assert!(matches!(builder.build(), Err(Error::NoModelsFound(_))));
    }

    #[test]
    fn single_model_two_files_layout() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("mn6_cn");
        fs::create_dir(&model).unwrap();
        fs::write(model.join("a.bin"), b"aaaa").unwrap();
        fs::write(model.join("b.bin"), b"bbbbbb").unwrap();

        let out = ModelContainerBuilder::new(dir.path()).build().unwrap();
        let bytes = fs::read(out).unwrap();

        let header_len = header_length(1, 2);
        assert_eq!(read_u32(&bytes, 0), 1, "model_count");
        assert_eq!(names::decode(&bytes[4..36]).unwrap(), "mn6_cn");
        assert_eq!(read_u32(&bytes, 36), 2, "file_count");

        // Enumeration order is unspecified; whatever came first sits at
        // header_len, the second right behind it.
        let first_off = read_u32(&bytes, 40 + 32) as usize;
        let first_len = read_u32(&bytes, 40 + 36) as usize;
        let second_off = read_u32(&bytes, 80 + 32) as usize;
        let second_len = read_u32(&bytes, 80 + 36) as usize;

        assert_eq!(first_off, header_len);
        assert_eq!(second_off, header_len + first_len);
        assert_eq!(first_len + second_len, 10);
        assert_eq!(bytes.len(), header_len + 10);

        // Regions must not overlap and must stay in bounds.
        assert!(first_off + first_len <= second_off);
        assert!(second_off + second_len <= bytes.len());

        let names: Vec<String> = [40usize, 80]
            .iter()
            .map(|&at| names::decode(&bytes[at..at + 32]).unwrap())
            .collect();
        let payload: Vec<u8> = bytes[header_len..].to_vec();
        if names[0] == "a.bin" {
            assert_eq!(payload, b"aaaabbbbbb");
        } else {
            assert_eq!(payload, b"bbbbbbaaaa");
        }
    }

    #[test]
    fn nested_files_keep_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("wn9");
        fs::create_dir_all(model.join("sub")).unwrap();
        fs::write(model.join("sub").join("weights.bin"), b"123").unwrap();

        let out = ModelContainerBuilder::new(dir.path()).build().unwrap();
        let bytes = fs::read(out).unwrap();

        assert_eq!(read_u32(&bytes, 36), 1, "file_count");
        let stored = names::decode(&bytes[40..72]).unwrap();
        assert_eq!(PathBuf::from(stored), PathBuf::from("sub").join("weights.bin"));
    }

    #[test]
    fn model_with_no_files_still_counts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("empty_model")).unwrap();

        let out = ModelContainerBuilder::new(dir.path()).build().unwrap();
        let bytes = fs::read(out).unwrap();

        assert_eq!(read_u32(&bytes, 0), 1);
        assert_eq!(read_u32(&bytes, 36), 0);
        assert_eq!(bytes.len(), header_length(1, 0));
    }

    #[test]
    fn header_matches_precomputed_length_for_many_models() {
        let dir = tempfile::tempdir().unwrap();
        for m in 0..3 {
            let model = dir.path().join(format!("mn7_en_v{m}"));
            fs::create_dir(&model).unwrap();
            for f in 0..4 {
                fs::write(model.join(format!("f{f}.dat")), vec![m as u8; 10 + f]).unwrap();
            }
        }

        let out = ModelContainerBuilder::new(dir.path()).build().unwrap();
        let bytes = fs::read(out).unwrap();
        let header_len = header_length(3, 12);
        let total_data: usize = (0..3).map(|_| 10 + 11 + 12 + 13).sum();
        assert_eq!(bytes.len(), header_len + total_data);
    }
}
