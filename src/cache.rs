//! On-disk cache of analysis results, one JSON file per video.
//!
//! A file's presence is the only cache-hit signal; entries are never
//! checked for staleness.

use crate::error::{Result, YtquizError};
use crate::quiz::AnalysisResult;
use crate::video::VideoId;
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FILE_PREFIX: &str = "questions_summary_";
const FILE_EXTENSION: &str = "json";

/// A cached analysis file.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub video_id: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Directory of cached analysis results.
#[derive(Debug, Clone)]
pub struct AnalysisCache {
    dir: PathBuf,
}

impl AnalysisCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file for a video.
    pub fn path_for(&self, id: &VideoId) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", FILE_PREFIX, id, FILE_EXTENSION))
    }

    pub fn contains(&self, id: &VideoId) -> bool {
        self.path_for(id).is_file()
    }

    /// Load a cached result. `Ok(None)` when there is no entry.
    pub fn load(&self, id: &VideoId) -> Result<Option<AnalysisResult>> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Ok(None);
        }

        debug!("Loading cached analysis from {:?}", path);
        let content = std::fs::read_to_string(&path)?;
        let result = serde_json::from_str(&content).map_err(|e| {
            YtquizError::Cache(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(Some(result))
    }

    /// Write a result, replacing any existing entry.
    ///
    /// The file is written to a temporary name and renamed into place, so
    /// readers never see a partial document.
    pub fn store(&self, id: &VideoId, result: &AnalysisResult) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(id);

        let json = serde_json::to_string_pretty(result)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(&path).map_err(|e| e.error)?;

        info!("Cached analysis at {:?}", path);
        Ok(path)
    }

    /// Remove the entry for a video. Returns whether one existed.
    pub fn remove(&self, id: &VideoId) -> Result<bool> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        Ok(true)
    }

    /// List cached entries, sorted by video ID.
    pub fn list(&self) -> Result<Vec<CacheEntry>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.dir)?.flatten() {
            let path = entry.path();
            let Some(video_id) = video_id_from_path(&path) else {
                continue;
            };
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }

            entries.push(CacheEntry {
                video_id,
                path,
                size_bytes: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
            });
        }

        entries.sort_by(|a, b| a.video_id.cmp(&b.video_id));
        Ok(entries)
    }

    /// Remove every cached entry. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let entries = self.list()?;
        for entry in &entries {
            std::fs::remove_file(&entry.path)?;
        }
        Ok(entries.len())
    }
}

fn video_id_from_path(path: &Path) -> Option<String> {
    if path.extension()? != FILE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let id = stem.strip_prefix(FILE_PREFIX)?;
    VideoId::parse(id).ok().map(String::from)
}
