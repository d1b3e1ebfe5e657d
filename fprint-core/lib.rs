/// Row-major 8-bit grayscale image
pub type Image = Vec<u8>;

/// Length of the gradient-histogram descriptor (4x4 cells x 8 orientation bins)
pub const DESCRIPTOR_LEN: usize = 128;

/// Fixed-length appearance vector attached to a keypoint, compared with
/// Euclidean distance
pub type Descriptor = [f32; DESCRIPTOR_LEN];

/// Detected local feature in base-image coordinates
#[derive(Debug, Clone, Copy)]
pub struct Keypoint {
    /// Subpixel x coordinate
    pub x: f32,
    /// Subpixel y coordinate
    pub y: f32,
    /// Pyramid scale the point was detected at (1.0 = base level)
    pub scale: f32,
    /// Orientation in radians
    pub angle: f32,
    /// Corner response strength
    pub response: f32,
}

/// Accepted pairing between a probe keypoint and a candidate keypoint.
///
/// Indexes refer to the keypoint/descriptor sequences the pairing was
/// computed from; `distance` is the descriptor distance of the nearest
/// neighbor that survived the ratio filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correspondence {
    pub probe_idx: usize,
    pub candidate_idx: usize,
    pub distance: f32,
}

/// Detection parameters shared by every pipeline stage
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectConfig {
    /// FAST intensity threshold
    pub threshold: u8,
    /// Patch size for orientation computation (odd)
    pub patch_size: usize,
    /// Rayon worker count
    pub n_threads: usize,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            threshold: 20,
            patch_size: 15,
            n_threads: num_cpus::get().max(1),
        }
    }
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}
