use fprint_core::Image;
use crate::error::DetectResult;

/// Scale information for one pyramid level
#[derive(Debug, Clone, Copy)]
pub struct ScaleLevel {
    pub level: usize,
    pub scale: f32,
    pub width: usize,
    pub height: usize,
}

/// Image pyramid operations for multi-scale feature detection
pub struct ImagePyramid;

impl ImagePyramid {
    /// Scale ratio between consecutive pyramid levels
    pub const SCALE_FACTOR: f32 = 1.2;

    /// Smallest level dimension worth detecting on
    const MIN_LEVEL_DIM: usize = 32;

    /// Cap on pyramid depth
    const MAX_LEVELS: usize = 8;

    /// Generate scale levels down from the base resolution
    pub fn generate_scale_levels(width: usize, height: usize) -> Vec<ScaleLevel> {
        let mut levels = Vec::new();
        let mut current_scale = 1.0f32;
        let mut level = 0;

        loop {
            let scaled_width = ((width as f32) / current_scale) as usize;
            let scaled_height = ((height as f32) / current_scale) as usize;

            if scaled_width < Self::MIN_LEVEL_DIM || scaled_height < Self::MIN_LEVEL_DIM {
                break;
            }

            levels.push(ScaleLevel {
                level,
                scale: current_scale,
                width: scaled_width,
                height: scaled_height,
            });

            current_scale *= Self::SCALE_FACTOR;
            level += 1;

            if level >= Self::MAX_LEVELS {
                break;
            }
        }

        // An image below MIN_LEVEL_DIM still gets its base level
        if levels.is_empty() {
            levels.push(ScaleLevel {
                level: 0,
                scale: 1.0,
                width,
                height,
            });
        }

        levels
    }

    /// Build per-level images from the base image
    pub fn build(img: &Image, width: usize, height: usize, levels: &[ScaleLevel]) -> DetectResult<Vec<Image>> {
        let mut pyramid = Vec::with_capacity(levels.len());

        for level in levels {
            if level.level == 0 {
                pyramid.push(img.clone());
            } else {
                pyramid.push(Self::downsample(img, width, height, level.width, level.height));
            }
        }

        Ok(pyramid)
    }

    /// Downsample with bilinear interpolation
    fn downsample(img: &Image, src_width: usize, src_height: usize, dst_width: usize, dst_height: usize) -> Image {
        let mut out = vec![0u8; dst_width * dst_height];

        let x_ratio = src_width as f32 / dst_width as f32;
        let y_ratio = src_height as f32 / dst_height as f32;

        for y in 0..dst_height {
            for x in 0..dst_width {
                let src_x = x as f32 * x_ratio;
                let src_y = y as f32 * y_ratio;
                out[y * dst_width + x] = Self::bilinear(img, src_width, src_height, src_x, src_y) as u8;
            }
        }

        out
    }

    /// Sample at fractional coordinates using bilinear interpolation
    pub fn bilinear(img: &Image, width: usize, height: usize, x: f32, y: f32) -> f32 {
        let x1 = (x.floor() as usize).min(width - 1);
        let y1 = (y.floor() as usize).min(height - 1);
        let x2 = (x1 + 1).min(width - 1);
        let y2 = (y1 + 1).min(height - 1);

        let fx = (x - x1 as f32).clamp(0.0, 1.0);
        let fy = (y - y1 as f32).clamp(0.0, 1.0);

        let p11 = img[y1 * width + x1] as f32;
        let p12 = img[y1 * width + x2] as f32;
        let p21 = img[y2 * width + x1] as f32;
        let p22 = img[y2 * width + x2] as f32;

        let top = p11 * (1.0 - fx) + p12 * fx;
        let bottom = p21 * (1.0 - fx) + p22 * fx;

        top * (1.0 - fy) + bottom * fy
    }
}
