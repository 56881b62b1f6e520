//! Error types for log analysis

use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a scene graph log into a summary
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Failed to read log file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("No frame data found in log.")]
    NoFrameData,
}
