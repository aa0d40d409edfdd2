use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use lantern_sheet::{parse_sheet, ScriptRow};
use crate::source::{SourceError, SourceProvider};

/// Reads a CSV sheet export, or every `*.csv` under a directory in file-name order.
#[derive(Debug, Clone)]
pub struct SheetSource {
    root: PathBuf,
}

impl SheetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn sheet_files(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")))
            .collect()
    }

    fn load_file(&self, path: &Path, rows: &mut Vec<ScriptRow>) -> Result<(), SourceError> {
        let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let sheet = parse_sheet(&content).map_err(|source| SourceError::Sheet {
            path: path.to_path_buf(),
            source,
        })?;

        if !sheet.skipped.is_empty() {
            warn!("{:?}: {} malformed rows skipped", path, sheet.skipped.len());
        }
        rows.extend(sheet.rows);
        Ok(())
    }
}

impl SourceProvider for SheetSource {
    fn load_rows(&mut self, _force_refresh: bool) -> Result<Vec<ScriptRow>, SourceError> {
        if !self.root.exists() {
            return Err(SourceError::NotFound(self.root.clone()));
        }
        info!("Scanning sheets at: {:?}", self.root);

        let files = self.sheet_files();
        if files.is_empty() {
            return Err(SourceError::Unavailable(format!("no csv sheets under {:?}", self.root)));
        }

        let mut rows = Vec::new();
        for path in &files {
            self.load_file(path, &mut rows)?;
        }

        info!("Sheets loaded. Files: {}, Rows: {}", files.len(), rows.len());
        Ok(rows)
    }
}
