pub mod config;
pub mod contest;
pub mod error;
pub mod extract;
pub mod indexer;
pub mod render;

pub use config::{ensure_dir, ConfigError, PipelineConfig};
pub use contest::{
    list_candidates, run_contest, CandidateMatch, MatchReport, SkippedCandidate,
};
pub use error::{PipelineError, PipelineResult};
pub use extract::{load_gray, FeatureExtractor};
pub use indexer::{index_dataset, parse_sample_name, write_csv, SampleRecord, CSV_HEADER};
pub use render::render_matches;


#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{blob_image, other_blob_image};
    use std::fs;

    fn seed_candidates(dir: &std::path::Path) {
        blob_image(64, 64).save(dir.join("a.png")).unwrap();
        other_blob_image(64, 64).save(dir.join("b.png")).unwrap();
        // Featureless image: zero keypoints, score undefined
        image::GrayImage::from_pixel(64, 64, image::Luma([128]))
            .save(dir.join("blank.png"))
            .unwrap();
        fs::write(dir.join("junk.txt"), b"not an image").unwrap();
    }

    #[test]
    fn identical_candidate_wins_the_contest() {
        let dir = tempfile::tempdir().unwrap();
        seed_candidates(dir.path());

        let probe = blob_image(64, 64);
        let candidates = list_candidates(dir.path()).unwrap();
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].0, "a.png");

        let cfg = PipelineConfig::default();
        let report = run_contest(&probe, &candidates, &cfg).unwrap();

        assert_eq!(report.best.name, "a.png");
        assert!(report.best.score > 0.0 && report.best.score <= 100.0);
        assert!(!report.best.correspondences.is_empty());
        assert!(!report.probe_keypoints.is_empty());

        // the featureless image and the text file are skipped, the two
        // blob images are scored
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].name, "blank.png");
        assert!(report.skipped[0].reason.contains("undefined"));
        assert_eq!(report.skipped[1].name, "junk.txt");
        assert_eq!(report.candidates_scored, 2);
    }

    #[test]
    fn contest_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        seed_candidates(dir.path());

        let probe = blob_image(64, 64);
        let candidates = list_candidates(dir.path()).unwrap();
        let cfg = PipelineConfig::default();

        let first = run_contest(&probe, &candidates, &cfg).unwrap();
        let second = run_contest(&probe, &candidates, &cfg).unwrap();
        assert_eq!(first.best.name, second.best.name);
        assert_eq!(first.best.score.to_bits(), second.best.score.to_bits());
        assert_eq!(
            first.best.correspondences.len(),
            second.best.correspondences.len()
        );
    }

    #[test]
    fn empty_candidate_dir_yields_no_match() {
        let dir = tempfile::tempdir().unwrap();
        let probe = blob_image(64, 64);
        let candidates = list_candidates(dir.path()).unwrap();
        assert!(candidates.is_empty());

        let err = run_contest(&probe, &candidates, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::NoMatchFound { candidates: 0 }));
    }

    #[test]
    fn missing_candidate_dir_is_a_config_error() {
        let err = list_candidates(std::path::Path::new("/nonexistent/originals")).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Config(ConfigError::CandidateRootMissing(_))
        ));
    }

    #[test]
    fn invalid_config_aborts_the_contest() {
        let probe = blob_image(64, 64);
        let mut cfg = PipelineConfig::default();
        cfg.ratio_threshold = 0.0;
        let err = run_contest(&probe, &[], &cfg).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
