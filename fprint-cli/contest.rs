use std::fs;
use std::path::{Path, PathBuf};

use fprint_core::{Correspondence, Keypoint};
use fprint_match::{similarity_score, Contest, DescriptorMatcher, Ranked};
use image::GrayImage;
use rayon::prelude::*;

use crate::config::{ConfigError, PipelineConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::extract::{load_gray, FeatureExtractor};

/// The winning candidate with everything needed to report and render it
#[derive(Debug)]
pub struct CandidateMatch {
    pub name: String,
    pub score: f32,
    pub correspondences: Vec<Correspondence>,
    pub keypoints: Vec<Keypoint>,
    pub image: GrayImage,
}

/// A candidate that could not be scored; the contest goes on without it
#[derive(Debug, Clone)]
pub struct SkippedCandidate {
    pub name: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct MatchReport {
    pub best: CandidateMatch,
    pub probe_keypoints: Vec<Keypoint>,
    /// Candidates that produced a score, including zero scores
    pub candidates_scored: usize,
    pub skipped: Vec<SkippedCandidate>,
}

/// Lists regular files in `dir`, sorted by file name.
///
/// No extension filtering happens here; undecodable entries surface
/// later as skipped candidates.
pub fn list_candidates(dir: &Path) -> PipelineResult<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Err(ConfigError::CandidateRootMissing(dir.to_path_buf()).into());
    }

    let entries = fs::read_dir(dir).map_err(|source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PipelineError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push((name, path));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

enum Outcome {
    Scored(Ranked<CandidatePayload>),
    /// Scored but with no accepted correspondences
    Zero,
    Skipped(SkippedCandidate),
}

struct CandidatePayload {
    name: String,
    correspondences: Vec<Correspondence>,
    keypoints: Vec<Keypoint>,
    image: GrayImage,
}

/// Runs the one-vs-all contest: every candidate is scored against the
/// probe and the strictly best score wins.
///
/// Probe features are extracted once up front. Candidates that fail to
/// load, detect or score are skipped, not fatal; ties keep the
/// earliest candidate in enumeration order.
pub fn run_contest(
    probe: &GrayImage,
    candidates: &[(String, PathBuf)],
    cfg: &PipelineConfig,
) -> PipelineResult<MatchReport> {
    cfg.validate()?;
    let extractor = FeatureExtractor::new(cfg.detect.clone());
    let matcher = DescriptorMatcher::new(cfg.ratio_threshold)?;

    let (probe_kps, probe_descs) = extractor.extract(probe)?;
    log::info!("probe: {} keypoints", probe_kps.len());

    let outcomes: Vec<Outcome> = candidates
        .par_iter()
        .enumerate()
        .map(|(index, (name, path))| {
            score_candidate(&extractor, &matcher, &probe_kps, &probe_descs, index, name, path)
        })
        .collect();

    let mut skipped = Vec::new();
    let mut candidates_scored = 0usize;
    let mut best: Option<Ranked<CandidatePayload>> = None;
    for outcome in outcomes {
        match outcome {
            Outcome::Scored(entry) => {
                candidates_scored += 1;
                log::debug!("{}: score {:.3}", entry.payload.name, entry.score);
                best = Contest::merge(best, Some(entry));
            }
            Outcome::Zero => candidates_scored += 1,
            Outcome::Skipped(s) => {
                log::warn!("skipping {}: {}", s.name, s.reason);
                skipped.push(s);
            }
        }
    }

    let best = best.ok_or(PipelineError::NoMatchFound {
        candidates: candidates.len(),
    })?;

    Ok(MatchReport {
        best: CandidateMatch {
            name: best.payload.name,
            score: best.score,
            correspondences: best.payload.correspondences,
            keypoints: best.payload.keypoints,
            image: best.payload.image,
        },
        probe_keypoints: probe_kps,
        candidates_scored,
        skipped,
    })
}

fn score_candidate(
    extractor: &FeatureExtractor,
    matcher: &DescriptorMatcher,
    probe_kps: &[Keypoint],
    probe_descs: &[fprint_core::Descriptor],
    index: usize,
    name: &str,
    path: &Path,
) -> Outcome {
    let image = match load_gray(path) {
        Ok(img) => img,
        Err(e) => {
            return Outcome::Skipped(SkippedCandidate {
                name: name.to_string(),
                reason: e.to_string(),
            })
        }
    };

    let (keypoints, descriptors) = match extractor.extract(&image) {
        Ok(pair) => pair,
        Err(e) => {
            return Outcome::Skipped(SkippedCandidate {
                name: name.to_string(),
                reason: e.to_string(),
            })
        }
    };

    let correspondences = matcher.match_descriptors(probe_descs, &descriptors);
    // A keypoint-free candidate makes the score undefined; skip it
    let score = match similarity_score(&correspondences, probe_kps.len(), keypoints.len()) {
        Ok(s) => s,
        Err(e) => {
            return Outcome::Skipped(SkippedCandidate {
                name: name.to_string(),
                reason: e.to_string(),
            })
        }
    };

    if score > 0.0 {
        Outcome::Scored(Ranked {
            index,
            score,
            payload: CandidatePayload {
                name: name.to_string(),
                correspondences,
                keypoints,
                image,
            },
        })
    } else {
        Outcome::Zero
    }
}
