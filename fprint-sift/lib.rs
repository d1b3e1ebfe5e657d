use fprint_core::{Descriptor, Image, Keypoint, DESCRIPTOR_LEN};
use rayon::prelude::*;

/// Samples per side of the descriptor grid
const GRID: usize = 16;

/// Spatial cells per side (GRID / CELL = samples per cell side)
const CELLS: usize = 4;

/// Orientation bins per cell
const ORI_BINS: usize = 8;

/// Histogram clamp applied before the final renormalization
const CLAMP: f32 = 0.2;

/// SIFT-style descriptor generator.
///
/// For every keypoint a 16x16 sampling grid is laid over the image,
/// rotated by the keypoint angle and spaced by its pyramid scale.
/// Gradients are measured in the rotated frame, binned into a
/// 4x4 grid of 8-bin orientation histograms and L2-normalized with
/// the usual clamp-and-renormalize step. A featureless patch yields
/// the zero vector.
pub struct SiftDescriptor {
    w: usize,
    h: usize,
}

impl SiftDescriptor {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            w: width,
            h: height,
        }
    }

    /// Generate descriptors index-aligned with `kps`
    pub fn describe(&self, img: &Image, kps: &[Keypoint]) -> Vec<Descriptor> {
        kps.par_iter().map(|kp| self.describe_one(img, kp)).collect()
    }

    fn describe_one(&self, img: &Image, kp: &Keypoint) -> Descriptor {
        let (s, c) = kp.angle.sin_cos();
        let spacing = kp.scale.max(1.0);
        let half = (GRID as f32 - 1.0) / 2.0;
        let sigma = 0.5 * GRID as f32 * spacing;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let bin_width = std::f32::consts::TAU / ORI_BINS as f32;

        // Sample in the rotated keypoint frame
        let sample = |u: f32, v: f32| -> f32 {
            let x = kp.x + c * u - s * v;
            let y = kp.y + s * u + c * v;
            self.bilinear_sample(img, x, y)
        };

        let mut hist = [0.0f32; DESCRIPTOR_LEN];

        for i in 0..GRID {
            for j in 0..GRID {
                let u = (j as f32 - half) * spacing;
                let v = (i as f32 - half) * spacing;

                // Gradient measured along the rotated axes, so the
                // histogram is orientation-normalized by construction
                let gx = sample(u + spacing, v) - sample(u - spacing, v);
                let gy = sample(u, v + spacing) - sample(u, v - spacing);

                let mag = (gx * gx + gy * gy).sqrt();
                if mag == 0.0 {
                    continue;
                }

                let ori = gy.atan2(gx);
                let bin = (((ori + std::f32::consts::PI) / bin_width) as usize) % ORI_BINS;
                let weight = (-(u * u + v * v) / two_sigma_sq).exp();

                let cell = (i / CELLS) * CELLS + (j / CELLS);
                hist[cell * ORI_BINS + bin] += mag * weight;
            }
        }

        Self::normalize(&mut hist);
        hist
    }

    /// L2 normalize, clamp large bins, renormalize
    fn normalize(hist: &mut [f32; DESCRIPTOR_LEN]) {
        let norm = hist.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm < 1e-6 {
            // Flat patch: keep the zero vector rather than dividing by zero
            return;
        }
        for v in hist.iter_mut() {
            *v = (*v / norm).min(CLAMP);
        }
        let norm = hist.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm >= 1e-6 {
            for v in hist.iter_mut() {
                *v /= norm;
            }
        }
    }

    /// Bilinear interpolation with clamping at the image border
    fn bilinear_sample(&self, img: &Image, x: f32, y: f32) -> f32 {
        let x = x.clamp(0.0, (self.w - 1) as f32);
        let y = y.clamp(0.0, (self.h - 1) as f32);

        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(self.w - 1);
        let y1 = (y0 + 1).min(self.h - 1);

        let dx = x - x0 as f32;
        let dy = y - y0 as f32;

        let p00 = img[y0 * self.w + x0] as f32;
        let p10 = img[y0 * self.w + x1] as f32;
        let p01 = img[y1 * self.w + x0] as f32;
        let p11 = img[y1 * self.w + x1] as f32;

        let top = p00 * (1.0 - dx) + p10 * dx;
        let bottom = p01 * (1.0 - dx) + p11 * dx;

        top * (1.0 - dy) + bottom * dy
    }
}
