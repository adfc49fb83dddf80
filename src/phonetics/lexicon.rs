use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::app_dirs::AppDirs;

/// Word -> ARPABET phones lookup backed by a JSON cache file.
///
/// Strictly advisory: when the cache is missing or unreadable the caller
/// falls back to the grapheme estimate in `transcription`.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<String>>,
}

impl Lexicon {
    pub fn from_entries(entries: HashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).ok()?;
        match serde_json::from_slice::<HashMap<String, Vec<String>>>(&bytes) {
            Ok(entries) => {
                log::debug!(
                    "loaded {} phoneme entries from {}",
                    entries.len(),
                    path.display()
                );
                Some(Self { entries })
            }
            Err(err) => {
                log::warn!("ignoring malformed phoneme cache {}: {err}", path.display());
                None
            }
        }
    }

    /// Read-through from the user cache dir; absence is the normal case.
    pub fn load_default() -> Option<Self> {
        let path = AppDirs::lexicon_path()?;
        if !path.exists() {
            return None;
        }
        Self::load(path)
    }

    pub fn phones(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(|phones| phones.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
