use fprint_core::Correspondence;
use crate::error::{MatchError, MatchResult};

/// Normalized correspondence score in percent.
///
/// `accepted / min(probe_keypoints, candidate_keypoints) * 100`, capped
/// at 100 so a candidate with fewer keypoints than accepted matches can
/// never exceed the scale. An empty keypoint set on either side makes
/// the score undefined and returns `DegenerateMatch`.
pub fn similarity_score(
    correspondences: &[Correspondence],
    probe_keypoints: usize,
    candidate_keypoints: usize,
) -> MatchResult<f32> {
    let denom = probe_keypoints.min(candidate_keypoints);
    if denom == 0 {
        return Err(MatchError::DegenerateMatch {
            probe_keypoints,
            candidate_keypoints,
        });
    }

    Ok((correspondences.len() as f32 / denom as f32 * 100.0).min(100.0))
}

/// Contest entry: a candidate's enumeration index, score and payload
#[derive(Debug, Clone)]
pub struct Ranked<T> {
    pub index: usize,
    pub score: f32,
    pub payload: T,
}

/// Best-candidate tracker.
///
/// The running best starts at score 0, so only strictly positive scores
/// qualify, and improvement is strict: a later candidate with an equal
/// score never displaces the incumbent.
pub struct Contest<T> {
    best: Option<Ranked<T>>,
}

impl<T> Default for Contest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Contest<T> {
    pub fn new() -> Self {
        Self { best: None }
    }

    /// Offer a candidate in enumeration order; returns whether it took
    /// the lead
    pub fn offer(&mut self, entry: Ranked<T>) -> bool {
        let current = self.best.as_ref().map_or(0.0, |b| b.score);
        if entry.score > current {
            self.best = Some(entry);
            true
        } else {
            false
        }
    }

    pub fn best(&self) -> Option<&Ranked<T>> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<Ranked<T>> {
        self.best
    }

    /// Order-stable merge for parallel reduction.
    ///
    /// Callers must only feed entries with positive scores. Higher score
    /// wins; equal scores keep the lower enumeration index, so the
    /// reduction is equivalent to the sequential first-seen rule
    /// regardless of reduction shape.
    pub fn merge(a: Option<Ranked<T>>, b: Option<Ranked<T>>) -> Option<Ranked<T>> {
        match (a, b) {
            (Some(a), Some(b)) => {
                if b.score > a.score || (b.score == a.score && b.index < a.index) {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }
}
