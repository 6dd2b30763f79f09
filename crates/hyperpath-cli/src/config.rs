// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted CLI preferences.
//!
//! [`PrefsStore`] moves raw bytes by key; [`PrefsService`] turns them into
//! [`CliPrefs`] through `serde_json`. The binary stores `cli.json` in the
//! platform config directory, or in `--config-dir` when given.
use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use hyperpath_core::{Metric, SearchEngine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key the CLI stores its preferences under.
pub const PREFS_KEY: &str = "cli";

/// Byte storage for preference documents.
pub trait PrefsStore {
    /// Bytes stored under `key`, or `None` if nothing was saved yet.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PrefsError>;
    /// Replaces whatever is stored under `key`.
    fn write(&self, key: &str, data: &[u8]) -> Result<(), PrefsError>;
}

/// Failure to read or write preferences.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The platform has no per-user config directory.
    #[error("no configuration directory on this platform; pass --config-dir")]
    NoConfigDir,
    /// Reading or writing the preferences file failed.
    #[error("{path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The stored document is not valid preferences JSON.
    #[error("malformed preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads and saves [`CliPrefs`] through a [`PrefsStore`].
#[derive(Debug)]
pub struct PrefsService<S> {
    store: S,
}

impl<S: PrefsStore> PrefsService<S> {
    /// Service over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saved preferences, or `None` when nothing (or an empty file) is stored.
    pub fn load(&self) -> Result<Option<CliPrefs>, PrefsError> {
        match self.store.read(PREFS_KEY)? {
            Some(bytes) if !bytes.is_empty() => Ok(Some(serde_json::from_slice(&bytes)?)),
            _ => Ok(None),
        }
    }

    /// Writes `prefs` as pretty JSON.
    pub fn save(&self, prefs: &CliPrefs) -> Result<(), PrefsError> {
        self.store
            .write(PREFS_KEY, &serde_json::to_vec_pretty(prefs)?)
    }
}

/// Keeps each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct DirPrefsStore {
    dir: PathBuf,
}

impl DirPrefsStore {
    /// The per-user config directory, e.g. `~/.config/hyperpath`.
    pub fn platform() -> Result<Self, PrefsError> {
        let dirs = ProjectDirs::from("dev", "flyingrobots", "hyperpath")
            .ok_or(PrefsError::NoConfigDir)?;
        Ok(Self::at(dirs.config_dir().to_path_buf()))
    }

    /// Store in `dir`, created on the first write.
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn file(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PrefsStore for DirPrefsStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PrefsError> {
        let path = self.file(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PrefsError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), PrefsError> {
        let path = self.file(key);
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, data))
            .map_err(|source| PrefsError::Io { path, source })
    }
}

/// Defaults applied when a flag is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliPrefs {
    /// Metric for `distances`.
    pub metric: Metric,
    /// Engine for `distances`.
    pub engine: SearchEngine,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Iterations of `fuzz`.
    pub fuzz_runs: u32,
}

impl Default for CliPrefs {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            engine: SearchEngine::default(),
            log_filter: "info".to_owned(),
            fuzz_runs: 20_000,
        }
    }
}


#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::testing::MemoryPrefsStore;
    use super::*;

    #[test]
    fn nothing_saved_loads_as_none() {
        let service = PrefsService::new(MemoryPrefsStore::default());
        assert!(service.load().expect("load").is_none());
    }

    #[test]
    fn saved_prefs_load_back() {
        let store = MemoryPrefsStore::default();
        let service = PrefsService::new(store.clone());
        let prefs = CliPrefs {
            metric: Metric::Foremost,
            engine: SearchEngine::Hyperedge,
            log_filter: "hyperpath_core=trace".into(),
            fuzz_runs: 7,
        };
        service.save(&prefs).expect("save");
        assert_eq!(store.writes(), 1);
        assert_eq!(service.load().expect("load"), Some(prefs));
    }

    #[test]
    fn partial_prefs_fill_in_defaults() {
        let store = MemoryPrefsStore::default();
        store
            .write(PREFS_KEY, br#"{"metric": "fastest"}"#)
            .expect("seed");
        let loaded = PrefsService::new(store)
            .load()
            .expect("load")
            .expect("present");
        assert_eq!(loaded.metric, Metric::Fastest);
        assert_eq!(loaded.fuzz_runs, CliPrefs::default().fuzz_runs);
    }

    #[test]
    fn malformed_prefs_surface() {
        let store = MemoryPrefsStore::default();
        store.write(PREFS_KEY, b"{metric").expect("seed");
        let err = PrefsService::new(store).load().expect_err("not JSON");
        assert!(matches!(err, PrefsError::Json(_)));
    }

    #[test]
    fn dir_store_keeps_one_json_file_per_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DirPrefsStore::at(dir.path().join("nested"));
        assert_eq!(store.read(PREFS_KEY).expect("read"), None);
        store.write(PREFS_KEY, b"{}").expect("write");
        assert!(dir.path().join("nested").join("cli.json").is_file());
        assert_eq!(store.read(PREFS_KEY).expect("read"), Some(b"{}".to_vec()));
    }

    #[test]
    fn unreadable_prefs_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A directory where the file should be cannot be read as bytes.
        std::fs::create_dir(dir.path().join("cli.json")).expect("mkdir");
        let err = DirPrefsStore::at(dir.path().to_path_buf())
            .read(PREFS_KEY)
            .expect_err("directory");
        assert!(matches!(err, PrefsError::Io { .. }));
    }
}
