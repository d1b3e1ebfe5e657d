use std::path::PathBuf;

use fprint_detect::DetectError;
use fprint_match::MatchError;

use crate::config::ConfigError;

#[derive(Debug)]
pub enum PipelineError {
    /// An image file could not be decoded; fatal for the probe
    Load { path: PathBuf, source: image::ImageError },
    /// A rendered artifact could not be written
    Save { path: PathBuf, source: image::ImageError },
    Io { path: PathBuf, source: std::io::Error },
    Detect(DetectError),
    Match(MatchError),
    Config(ConfigError),
    /// No candidate ever scored above zero
    NoMatchFound { candidates: usize },
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Load { path, source } => {
                write!(f, "Failed to decode image {}: {}", path.display(), source)
            }
            PipelineError::Save { path, source } => {
                write!(f, "Failed to write image {}: {}", path.display(), source)
            }
            PipelineError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            PipelineError::Detect(e) => write!(f, "Detection error: {}", e),
            PipelineError::Match(e) => write!(f, "Matching error: {}", e),
            PipelineError::Config(e) => write!(f, "Configuration error: {}", e),
            PipelineError::NoMatchFound { candidates } => {
                write!(f, "No match found among {} candidates", candidates)
            }
            PipelineError::ThreadPool(e) => write!(f, "Thread pool error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<DetectError> for PipelineError {
    fn from(err: DetectError) -> Self {
        PipelineError::Detect(err)
    }
}

impl From<MatchError> for PipelineError {
    fn from(err: MatchError) -> Self {
        PipelineError::Match(err)
    }
}

impl From<ConfigError> for PipelineError {
    fn from(err: ConfigError) -> Self {
        PipelineError::Config(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for PipelineError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        PipelineError::ThreadPool(err)
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
