pub mod error;
pub mod pyramid;
pub mod refinement;
pub mod utils;

mod detector;

pub use detector::FastDetector;
pub use error::{DetectError, DetectResult};
pub use pyramid::{ImagePyramid, ScaleLevel};
pub use refinement::Refinement;
