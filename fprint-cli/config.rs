use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fprint_core::DetectConfig;
use serde::{Deserialize, Serialize};

/// Tunable parameters for the whole identification pipeline.
///
/// Loadable from TOML or JSON; missing fields fall back to the defaults,
/// so a config file only needs to name what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Lowe ratio threshold in (0, 1]; lower is stricter
    pub ratio_threshold: f32,
    /// Upscale factor applied to the rendered match overlay
    pub magnification: f32,
    pub detect: DetectConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ratio_threshold: 0.1,
            magnification: 4.0,
            detect: DetectConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ratio_threshold > 0.0 && self.ratio_threshold <= 1.0) {
            return Err(ConfigError::InvalidRatioThreshold(self.ratio_threshold));
        }
        if !(self.magnification > 0.0 && self.magnification.is_finite()) {
            return Err(ConfigError::InvalidMagnification(self.magnification));
        }
        Ok(())
    }

    pub fn load_toml(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let cfg: Self = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save_toml(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        fs::write(path, raw).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    pub fn load_json(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let cfg: Self = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save_json(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        fs::write(path, raw).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }
}

/// Creates a directory (and its parents) if it does not already exist.
/// Callers invoke this right before writing an artifact, never eagerly.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidRatioThreshold(f32),
    InvalidMagnification(f32),
    CandidateRootMissing(PathBuf),
    Unreadable { path: PathBuf, detail: String },
    Parse { path: PathBuf, detail: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidRatioThreshold(r) => {
                write!(f, "Ratio threshold {} outside (0, 1]", r)
            }
            ConfigError::InvalidMagnification(m) => {
                write!(f, "Magnification {} must be positive and finite", m)
            }
            ConfigError::CandidateRootMissing(path) => {
                write!(f, "Candidate directory {} does not exist", path.display())
            }
            ConfigError::Unreadable { path, detail } => {
                write!(f, "Cannot access config {}: {}", path.display(), detail)
            }
            ConfigError::Parse { path, detail } => {
                write!(f, "Malformed config {}: {}", path.display(), detail)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
