use fprint_core::{Image, Keypoint};

/// Subpixel refinement, orientation and non-maximum suppression
pub struct Refinement;

impl Refinement {
    /// Refine keypoint to subpixel accuracy using quadratic surface fitting
    pub fn refine_subpixel(img: &Image, width: usize, height: usize, kp: Keypoint) -> Keypoint {
        let x = kp.x as usize;
        let y = kp.y as usize;

        // Need a full 3x3 neighborhood
        if x < 1 || y < 1 || x >= width - 1 || y >= height - 1 {
            return kp;
        }

        let s = |dx: i32, dy: i32| -> f32 {
            let xx = (x as i32 + dx) as usize;
            let yy = (y as i32 + dy) as usize;
            img[yy * width + xx] as f32
        };

        let dx = (s(1, 0) - s(-1, 0)) / 2.0;
        let dy = (s(0, 1) - s(0, -1)) / 2.0;
        let dxx = s(1, 0) - 2.0 * s(0, 0) + s(-1, 0);
        let dyy = s(0, 1) - 2.0 * s(0, 0) + s(0, -1);
        let dxy = (s(1, 1) - s(-1, 1) - s(1, -1) + s(-1, -1)) / 4.0;

        let det = dxx * dyy - dxy * dxy;
        if det.abs() < 1e-6 {
            return kp;
        }

        let offset_x = (-(dyy * dx - dxy * dy) / det).clamp(-0.5, 0.5);
        let offset_y = (-(dxx * dy - dxy * dx) / det).clamp(-0.5, 0.5);

        Keypoint {
            x: kp.x + offset_x,
            y: kp.y + offset_y,
            ..kp
        }
    }

    /// Orientation via the intensity centroid of a square patch
    pub fn compute_orientation(
        img: &Image,
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        patch_size: usize,
    ) -> f32 {
        let half = (patch_size / 2) as i32;
        let (cx, cy) = (x as i32, y as i32);

        let mut m10 = 0i64;
        let mut m01 = 0i64;

        for dy in -half..=half {
            let yy = (cy + dy).clamp(0, height as i32 - 1) as usize;
            for dx in -half..=half {
                let xx = (cx + dx).clamp(0, width as i32 - 1) as usize;
                let val = img[yy * width + xx] as i64;
                m10 += dx as i64 * val;
                m01 += dy as i64 * val;
            }
        }

        if m10 == 0 && m01 == 0 {
            0.0
        } else {
            (m01 as f32).atan2(m10 as f32)
        }
    }

    /// Non-maximum suppression keyed on keypoint response
    pub fn non_maximum_suppression(keypoints: &[Keypoint], min_distance: f32) -> Vec<Keypoint> {
        if keypoints.is_empty() {
            return Vec::new();
        }

        let mut sorted = keypoints.to_vec();
        sorted.sort_by(|a, b| {
            b.response
                .partial_cmp(&a.response)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut kept: Vec<Keypoint> = Vec::new();
        let min_distance_sq = min_distance * min_distance;

        for candidate in sorted {
            let crowded = kept.iter().any(|existing| {
                let dx = candidate.x - existing.x;
                let dy = candidate.y - existing.y;
                dx * dx + dy * dy < min_distance_sq
            });

            if !crowded {
                kept.push(candidate);
            }
        }

        kept
    }
}
