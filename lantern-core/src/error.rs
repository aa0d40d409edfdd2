use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("script source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
    #[error("choice {index} out of range ({len} options)")]
    InvalidChoice { index: usize, len: usize },
    #[error("no choice is pending")]
    NoPendingChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("scene {scene} branch {branch} not found")]
pub struct BranchNotFound {
    pub scene: i32,
    pub branch: i32,
}
