//! Cache manager for persisting fetched data to disk
//!
//! Provides a `CacheManager` that stores serializable data as JSON files.
//! Every write goes to a temporary file in the cache directory and is renamed
//! over the destination, so readers only ever see complete files.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

/// Errors raised by cache reads and writes
#[derive(Debug, Error)]
pub enum CacheError {
    /// The file exists but could not be read, or could not be written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but does not hold the expected JSON
    #[error("corrupt cache file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The data could not be serialized
    #[error("failed to serialize data for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The two cache families kept on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    /// Single file holding every persisted season schedule
    Schedule,
    /// One file per season holding play-by-play records keyed by game id
    PlayByPlay(i32),
}

impl CacheKind {
    pub fn file_name(self) -> String {
        match self {
            CacheKind::Schedule => "schedules.json".to_string(),
            CacheKind::PlayByPlay(year) => format!("pbp{}.json", year),
        }
    }
}

/// Manages reading and writing cached data to disk
///
/// The cache manager stores data as JSON files in an XDG-compliant cache
/// directory (`~/.cache/kkoutfinder/` on Linux) unless a directory is given.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "kkoutfinder")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path of the cache file for `kind`
    pub fn cache_path(&self, kind: CacheKind) -> PathBuf {
        self.cache_dir.join(kind.file_name())
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir).map_err(|source| CacheError::Io {
            path: self.cache_dir.clone(),
            source,
        })
    }

    /// Reads a previously flushed cache file
    ///
    /// # Returns
    /// * `Ok(None)` if nothing has been cached for `kind` yet
    /// * `Ok(Some(data))` if the file exists and parses
    /// * `Err` if the file exists but cannot be read or parsed
    pub fn load<T: DeserializeOwned>(&self, kind: CacheKind) -> Result<Option<T>, CacheError> {
        let path = self.cache_path(kind);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        info!(path = %path.display(), "reading cache");
        let data = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| CacheError::Corrupt { path, source })?;
        Ok(Some(data))
    }

    /// Atomically replaces the cache file for `kind` with `data`
    ///
    /// # Returns
    /// * `Ok(path)` of the written file
    /// * `Err` if serialization, directory creation or the write fails; the
    ///   previous file content is left untouched in that case
    pub fn flush<T: Serialize + ?Sized>(
        &self,
        kind: CacheKind,
        data: &T,
    ) -> Result<PathBuf, CacheError> {
        let path = self.cache_path(kind);
        let bytes = serde_json::to_vec(data).map_err(|source| CacheError::Serialize {
            path: path.clone(),
            source,
        })?;

        self.ensure_dir()?;
        info!(path = %path.display(), "writing cache");
        write_atomic(&path, &bytes)?;
        Ok(path)
    }
}

/// Writes `bytes` to a temporary file next to `path`, then renames it into place
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_err = |source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
