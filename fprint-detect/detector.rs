use fprint_core::{DetectConfig, Image, Keypoint};
use crate::error::{DetectError, DetectResult};
use crate::pyramid::{ImagePyramid, ScaleLevel};
use crate::refinement::Refinement;
use crate::utils::has_arc;
use rayon::prelude::*;

/// FAST ring offsets, clockwise from 12 o'clock
const RING: [(i32, i32); 16] = [
    (0, -3), (1, -3), (2, -2), (3, -1),
    (3, 0), (3, 1), (2, 2), (1, 3),
    (0, 3), (-1, 3), (-2, 2), (-3, 1),
    (-3, 0), (-3, -1), (-2, -2), (-1, -3),
];

/// Contiguous arc length required on the ring
const ARC_LEN: usize = 12;

/// Radius used for per-level non-maximum suppression
const NMS_DISTANCE: f32 = 3.0;

/// Multi-scale FAST corner detector over an image pyramid.
///
/// Keypoints are detected at every pyramid level and reported in
/// base-image coordinates with the level scale attached, so descriptor
/// extraction can widen its sampling grid accordingly.
pub struct FastDetector {
    cfg: DetectConfig,
    w: usize,
    h: usize,
    levels: Vec<ScaleLevel>,
}

impl FastDetector {
    /// Creates a new detector with validation
    pub fn new(cfg: DetectConfig, width: usize, height: usize) -> DetectResult<Self> {
        // The ring test needs a 3-pixel border on each side
        const MIN_SIZE: usize = 7;
        if width < MIN_SIZE || height < MIN_SIZE {
            return Err(DetectError::BadDimensions {
                width,
                height,
                min_size: MIN_SIZE,
            });
        }

        if cfg.threshold == 0 || cfg.threshold > 127 {
            return Err(DetectError::BadThreshold(cfg.threshold));
        }

        let min_dim = width.min(height);
        if cfg.patch_size % 2 == 0 || cfg.patch_size >= min_dim {
            return Err(DetectError::BadPatchSize {
                patch_size: cfg.patch_size,
                min_image_dim: min_dim,
            });
        }

        let levels = ImagePyramid::generate_scale_levels(width, height);

        Ok(Self {
            cfg,
            w: width,
            h: height,
            levels,
        })
    }

    fn validate_image(&self, img: &Image) -> DetectResult<()> {
        let expected_len = self.w * self.h;
        if img.len() != expected_len {
            return Err(DetectError::DataLengthMismatch {
                expected_len,
                actual_len: img.len(),
            });
        }
        Ok(())
    }

    /// Detect keypoints across all pyramid levels.
    ///
    /// An image with no corners yields an empty vector, not an error.
    pub fn detect(&self, img: &Image) -> DetectResult<Vec<Keypoint>> {
        self.validate_image(img)?;

        let pyramid = ImagePyramid::build(img, self.w, self.h, &self.levels)?;

        let per_level: Vec<Vec<Keypoint>> = self
            .levels
            .par_iter()
            .zip(pyramid.par_iter())
            .map(|(level, level_img)| self.detect_at_level(level_img, level))
            .collect();

        Ok(per_level.into_iter().flatten().collect())
    }

    /// Detect, suppress and refine keypoints on a single level, then map
    /// them to base-image coordinates.
    fn detect_at_level(&self, img: &Image, level: &ScaleLevel) -> Vec<Keypoint> {
        let (lw, lh) = (level.width, level.height);
        let mut found = Vec::new();

        for y in 3..lh.saturating_sub(3) {
            for x in 3..lw.saturating_sub(3) {
                let center = img[y * lw + x];

                let mut bright: u16 = 0;
                let mut dark: u16 = 0;
                let mut diff_sum = 0.0f32;
                let mut diff_count = 0u32;

                for (i, &(dx, dy)) in RING.iter().enumerate() {
                    let q = img[(y as i32 + dy) as usize * lw + (x as i32 + dx) as usize];
                    if q >= center.saturating_add(self.cfg.threshold) {
                        bright |= 1 << i;
                    } else if q.saturating_add(self.cfg.threshold) <= center {
                        dark |= 1 << i;
                    } else {
                        continue;
                    }
                    let d = q as f32 - center as f32;
                    diff_sum += d * d;
                    diff_count += 1;
                }

                if !(has_arc(bright, ARC_LEN) || has_arc(dark, ARC_LEN)) {
                    continue;
                }

                let response = diff_sum / diff_count as f32;
                let angle = Refinement::compute_orientation(img, lw, lh, x, y, self.cfg.patch_size);

                found.push(Keypoint {
                    x: x as f32,
                    y: y as f32,
                    scale: level.scale,
                    angle,
                    response,
                });
            }
        }

        let suppressed = Refinement::non_maximum_suppression(&found, NMS_DISTANCE);

        suppressed
            .into_iter()
            .map(|kp| {
                let refined = Refinement::refine_subpixel(img, lw, lh, kp);
                Keypoint {
                    x: refined.x * level.scale,
                    y: refined.y * level.scale,
                    ..refined
                }
            })
            .collect()
    }

    /// Scale levels used by this detector
    pub fn scale_levels(&self) -> &[ScaleLevel] {
        &self.levels
    }

    /// Detector configuration
    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    /// Base image dimensions
    pub fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }
}
