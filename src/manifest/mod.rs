//! Bundle manifest (`index.json`) generation.
//!
//! The manifest is the JSON sidecar describing bundle contents and the
//! runtime-configurable voice commands. It is derived purely from the set
//! of model names plus the optional wake phrases; nothing in it is read
//! back during the build. Consumers treat absent keys as "unset", never as
//! zero or empty — a missing command list means "configure at runtime".

use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::settings::WakePhrases;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Manifest file name inside the asset bundle.
pub const MANIFEST_FILE: &str = "index.json";

/// Current manifest schema version.
pub const MANIFEST_VERSION: u32 = 1;

/// Default command-detection window in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 3000;

/// Name markers identifying Chinese model variants.
const CN_MARKERS: [&str; 2] = ["_cn", "cn_"];

/// Name markers identifying English model variants.
const EN_MARKERS: [&str; 2] = ["_en", "en_"];

/// Top-level manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Schema version, currently 1
    pub version: u32,

    /// File name of the embedded model container, if one was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srmodels: Option<String>,

    /// Command-recognition configuration, present only when at least one
    /// multi-command model was bundled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multinet_model: Option<MultinetModel>,
}

/// Configuration block for multi-command-recognition models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinetModel {
    /// Detected languages, sorted ("cn", "en")
    pub languages: Vec<String>,

    /// Command-detection window in milliseconds
    pub duration_ms: u32,

    /// Detection threshold (0.0-1.0)
    pub threshold: f32,

    /// Per-language command lists; a language key is present only when a
    /// wake phrase was explicitly supplied for it
    pub commands: BTreeMap<String, Vec<CommandEntry>>,
}

/// One voice command entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Phrase the recognizer listens for
    pub command: String,

    /// Display text
    pub text: String,

    /// Action identifier fired on detection
    pub action: String,
}

impl CommandEntry {
    /// Creates a wake command for the given phrase.
    pub fn wake(phrase: &str) -> Self {
        Self {
            command: phrase.to_string(),
            text: phrase.to_string(),
            action: "wake".to_string(),
        }
    }
}

impl BundleManifest {
    /// Derives the manifest from the bundled model set.
    ///
    /// # Arguments
    ///
    /// * `model_names` - Names of all bundled model directories
    /// * `srmodels` - File name of the produced model container, if any
    /// * `wake_phrases` - Optional per-language wake phrases
    /// * `threshold` - Detection threshold (0.0-1.0)
    /// * `duration_ms` - Command-detection window
    ///
    /// A wake phrase that is empty or whitespace-only counts as not
    /// supplied: the language's command list is omitted and the device
    /// configures commands at runtime.
    pub fn derive(
        model_names: &[String],
        srmodels: Option<String>,
        wake_phrases: &WakePhrases,
        threshold: f32,
        duration_ms: u32,
    ) -> Self {
        let multinet: Vec<&str> = model_names
            .iter()
            .map(String::as_str)
            .filter(|name| is_multinet(name))
            .collect();

        let multinet_model = if multinet.is_empty() {
            None
        } else {
            let languages = detect_languages(&multinet);
            log::info!("detected languages: {}", languages.join(", "));

            let mut commands = BTreeMap::new();
            let per_language = [
                ("cn", wake_phrases.cn.as_deref()),
                ("en", wake_phrases.en.as_deref()),
            ];
            for (lang, phrase) in per_language {
                if !languages.iter().any(|l| l == lang) {
                    continue;
                }
                match phrase.map(str::trim).filter(|p| !p.is_empty()) {
                    Some(phrase) => {
                        log::info!("{lang} wake phrase: {phrase}");
                        commands.insert(lang.to_string(), vec![CommandEntry::wake(phrase)]);
                    }
                    None => {
                        log::info!("no {lang} wake phrase configured; commands can be added at runtime");
                    }
                }
            }
            if commands.is_empty() {
                log::warn!("no wake phrases supplied; manifest carries no command lists");
            }

            Some(MultinetModel {
                languages,
                duration_ms,
                threshold,
                commands,
            })
        };

        Self {
            version: MANIFEST_VERSION,
            srmodels,
            multinet_model,
        }
    }

    /// Writes the manifest as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).fs_context("writing manifest", path)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

/// Whether a model name denotes a multi-command-recognition model.
fn is_multinet(name: &str) -> bool {
    name.starts_with("mn")
}

/// Scans multi-command model names for language markers.
///
/// Returns the sorted language list; a non-empty model set with no
/// recognized marker defaults to Chinese.
fn detect_languages(multinet_names: &[&str]) -> Vec<String> {
    let mut cn = false;
    let mut en = false;
    for name in multinet_names {
        cn |= CN_MARKERS.iter().any(|marker| name.contains(marker));
        en |= EN_MARKERS.iter().any(|marker| name.contains(marker));
    }

    let mut languages = Vec::new();
    if cn {
        languages.push("cn".to_string());
    }
    if en {
        languages.push("en".to_string());
    }
    if languages.is_empty() {
        languages.push("cn".to_string());
    }
    languages
}
