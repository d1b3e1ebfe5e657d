use std::path::Path;

use fprint_core::{Descriptor, DetectConfig, Keypoint};
use fprint_detect::FastDetector;
use fprint_sift::SiftDescriptor;
use image::GrayImage;

use crate::error::{PipelineError, PipelineResult};

/// Loads an image from disk and converts it to 8-bit grayscale
pub fn load_gray(path: &Path) -> PipelineResult<GrayImage> {
    let img = image::open(path).map_err(|source| PipelineError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_luma8())
}

/// Detection and description in one step.
///
/// Builds a fresh detector per image since the scale pyramid layout
/// depends on the image dimensions.
pub struct FeatureExtractor {
    cfg: DetectConfig,
}

impl FeatureExtractor {
    pub fn new(cfg: DetectConfig) -> Self {
        Self { cfg }
    }

    pub fn extract(&self, img: &GrayImage) -> PipelineResult<(Vec<Keypoint>, Vec<Descriptor>)> {
        let (width, height) = img.dimensions();
        let detector = FastDetector::new(self.cfg.clone(), width as usize, height as usize)?;
        let keypoints = detector.detect(img.as_raw())?;

        let describer = SiftDescriptor::new(width as usize, height as usize);
        let descriptors = describer.describe(img.as_raw(), &keypoints);
        Ok((keypoints, descriptors))
    }
}
