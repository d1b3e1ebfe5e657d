#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    /// Ratio threshold outside (0, 1]
    InvalidRatioThreshold(f32),
    /// One keypoint set is empty, the normalized score is undefined
    DegenerateMatch { probe_keypoints: usize, candidate_keypoints: usize },
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::InvalidRatioThreshold(r) => {
                write!(f, "Ratio threshold {} outside (0, 1]", r)
            }
            MatchError::DegenerateMatch { probe_keypoints, candidate_keypoints } => {
                write!(
                    f,
                    "Score undefined for keypoint counts {} (probe) and {} (candidate)",
                    probe_keypoints, candidate_keypoints
                )
            }
        }
    }
}

impl std::error::Error for MatchError {}

pub type MatchResult<T> = Result<T, MatchError>;
