pub mod sheet;
pub mod cache;

use std::path::PathBuf;
use thiserror::Error;
use lantern_sheet::{ScriptRow, SheetError};

pub use sheet::SheetSource;
pub use cache::CachedSource;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("script source not found at {0:?}")]
    NotFound(PathBuf),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sheet {path:?} rejected: {source}")]
    Sheet {
        path: PathBuf,
        #[source]
        source: SheetError,
    },
    #[error("{0}")]
    Unavailable(String),
}

/// Supplies the complete, ordered row list of a script.
pub trait SourceProvider {
    /// `force_refresh` bypasses any cache the provider keeps.
    fn load_rows(&mut self, force_refresh: bool) -> Result<Vec<ScriptRow>, SourceError>;
}

/// Rows held in memory, e.g. built by an embedding game or a test.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<ScriptRow>,
}

impl MemorySource {
    pub fn new(rows: Vec<ScriptRow>) -> Self {
        Self { rows }
    }
}

impl SourceProvider for MemorySource {
    fn load_rows(&mut self, _force_refresh: bool) -> Result<Vec<ScriptRow>, SourceError> {
        Ok(self.rows.clone())
    }
}
