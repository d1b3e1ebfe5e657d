use fprint_core::{Correspondence, Descriptor};
use crate::error::{MatchError, MatchResult};
use crate::knn::two_nearest;
use rayon::prelude::*;

/// Nearest-neighbor descriptor matcher with Lowe's ratio filter.
///
/// A probe descriptor is paired with its nearest candidate only when
/// the nearest distance is strictly below `ratio * second_nearest`;
/// ambiguous matches (including exact ties) are dropped.
pub struct DescriptorMatcher {
    ratio: f32,
}

impl DescriptorMatcher {
    /// Creates a matcher; the ratio threshold must lie in (0, 1]
    pub fn new(ratio_threshold: f32) -> MatchResult<Self> {
        if !(ratio_threshold > 0.0 && ratio_threshold <= 1.0) {
            return Err(MatchError::InvalidRatioThreshold(ratio_threshold));
        }
        Ok(Self {
            ratio: ratio_threshold,
        })
    }

    pub fn ratio_threshold(&self) -> f32 {
        self.ratio
    }

    /// Match every probe descriptor against the candidate set.
    ///
    /// Output order follows the probe iteration order. Empty inputs and
    /// candidate sets smaller than two yield an empty result, never an
    /// error.
    pub fn match_descriptors(
        &self,
        probe: &[Descriptor],
        candidate: &[Descriptor],
    ) -> Vec<Correspondence> {
        probe
            .par_iter()
            .enumerate()
            .filter_map(|(probe_idx, d)| {
                let (best, second) = two_nearest(d, candidate)?;
                (best.distance < self.ratio * second.distance).then_some(Correspondence {
                    probe_idx,
                    candidate_idx: best.index,
                    distance: best.distance,
                })
            })
            .collect()
    }
}
