#[derive(Debug, Clone)]
pub enum DetectError {
    BadDimensions { width: usize, height: usize, min_size: usize },
    DataLengthMismatch { expected_len: usize, actual_len: usize },
    BadThreshold(u8),
    BadPatchSize { patch_size: usize, min_image_dim: usize },
}

impl std::fmt::Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectError::BadDimensions { width, height, min_size } => {
                write!(f, "Image {}x{} below minimum {}x{}", width, height, min_size, min_size)
            }
            DetectError::DataLengthMismatch { expected_len, actual_len } => {
                write!(f, "Image buffer length mismatch: expected {}, got {}", expected_len, actual_len)
            }
            DetectError::BadThreshold(t) => {
                write!(f, "FAST threshold {} outside 1-127", t)
            }
            DetectError::BadPatchSize { patch_size, min_image_dim } => {
                write!(f, "Patch size {} invalid for minimum image dimension {} (must be odd and smaller)", patch_size, min_image_dim)
            }
        }
    }
}

impl std::error::Error for DetectError {}

pub type DetectResult<T> = Result<T, DetectError>;
