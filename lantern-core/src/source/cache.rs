use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lantern_sheet::ScriptRow;
use crate::source::{SourceError, SourceProvider};

#[derive(Serialize, Deserialize, Default)]
struct RowCache {
    values: Vec<ScriptRow>,
}

/// Serves rows from a JSON cache, falling back to `inner` when the cache is missing,
/// unreadable, or a refresh is forced. Fresh rows are written back to the cache.
pub struct CachedSource<S> {
    inner: S,
    cache_path: PathBuf,
}

impl<S: SourceProvider> CachedSource<S> {
    pub fn new(inner: S, cache_path: impl Into<PathBuf>) -> Self {
        Self { inner, cache_path: cache_path.into() }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    fn read_cache(&self) -> anyhow::Result<Vec<ScriptRow>> {
        let reader = BufReader::new(File::open(&self.cache_path)?);
        let cache: RowCache = serde_json::from_reader(reader)?;
        Ok(cache.values)
    }

    fn write_cache(&self, rows: &[ScriptRow]) -> anyhow::Result<()> {
        if let Some(dir) = self.cache_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let mut writer = BufWriter::new(File::create(&self.cache_path)?);
        let cache = RowCache { values: rows.to_vec() };
        serde_json::to_writer_pretty(&mut writer, &cache)?;
        writer.flush()?;
        Ok(())
    }
}

impl<S: SourceProvider> SourceProvider for CachedSource<S> {
    fn load_rows(&mut self, force_refresh: bool) -> Result<Vec<ScriptRow>, SourceError> {
        if !force_refresh && self.cache_path.exists() {
            match self.read_cache() {
                Ok(rows) => {
                    log::info!("Row cache found at {:?}, using it", self.cache_path);
                    return Ok(rows);
                }
                Err(e) => log::warn!("Row cache {:?} unreadable: {}, reloading", self.cache_path, e),
            }
        }

        let rows = self.inner.load_rows(true)?;

        match self.write_cache(&rows) {
            Ok(()) => log::info!("Exported row cache to {:?}", self.cache_path),
            Err(e) => log::error!("Failed to write row cache {:?}: {}", self.cache_path, e),
        }
        Ok(rows)
    }
}
