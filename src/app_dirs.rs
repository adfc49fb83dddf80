use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where a user-retrained model artifact is stored.
    pub fn model_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let data_dir = PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("sayable");
            Some(data_dir.join("model.json"))
        } else {
            ProjectDirs::from("", "", "sayable")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("model.json"))
        }
    }

    /// Where the optional word -> phoneme cache lives.
    pub fn lexicon_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let cache_dir = PathBuf::from(home).join(".cache").join("sayable");
            Some(cache_dir.join("phonemes.json"))
        } else {
            ProjectDirs::from("", "", "sayable")
                .map(|proj_dirs| proj_dirs.cache_dir().join("phonemes.json"))
        }
    }
}
