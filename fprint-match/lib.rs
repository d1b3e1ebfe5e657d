pub mod error;
pub mod knn;

mod matcher;
mod score;

pub use error::{MatchError, MatchResult};
pub use knn::{euclidean, two_nearest, Neighbor};
pub use matcher::DescriptorMatcher;
pub use score::{similarity_score, Contest, Ranked};

#[cfg(test)]
mod tests {
    use super::*;
    use fprint_core::{Correspondence, Descriptor, DESCRIPTOR_LEN};
    use proptest::prelude::*;

    fn desc(v: f32) -> Descriptor {
        let mut d = [0.0; DESCRIPTOR_LEN];
        d[0] = v;
        d
    }

    fn dummy_matches(n: usize) -> Vec<Correspondence> {
        (0..n)
            .map(|i| Correspondence {
                probe_idx: i,
                candidate_idx: i,
                distance: 0.0,
            })
            .collect()
    }

    #[test]
    fn ratio_threshold_is_validated() {
        assert!(DescriptorMatcher::new(0.1).is_ok());
        assert!(DescriptorMatcher::new(1.0).is_ok());
        assert!(matches!(
            DescriptorMatcher::new(0.0),
            Err(MatchError::InvalidRatioThreshold(_))
        ));
        assert!(matches!(
            DescriptorMatcher::new(1.5),
            Err(MatchError::InvalidRatioThreshold(_))
        ));
        assert!(matches!(
            DescriptorMatcher::new(f32::NAN),
            Err(MatchError::InvalidRatioThreshold(_))
        ));
    }

    #[test]
    fn empty_inputs_yield_no_correspondences() {
        let m = DescriptorMatcher::new(0.1).unwrap();
        assert!(m.match_descriptors(&[], &[desc(1.0), desc(2.0)]).is_empty());
        assert!(m.match_descriptors(&[desc(1.0)], &[]).is_empty());
        // A single candidate leaves the ratio test undefined
        assert!(m.match_descriptors(&[desc(1.0)], &[desc(1.0)]).is_empty());
    }

    #[test]
    fn unambiguous_match_is_accepted() {
        let m = DescriptorMatcher::new(0.1).unwrap();
        // nearest at 1.0, second at 20.0: 1.0 < 0.1 * 20.0
        let found = m.match_descriptors(&[desc(0.0)], &[desc(1.0), desc(20.0)]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].probe_idx, 0);
        assert_eq!(found[0].candidate_idx, 0);
        assert_eq!(found[0].distance, 1.0);
    }

    #[test]
    fn ambiguous_match_is_dropped() {
        let m = DescriptorMatcher::new(0.1).unwrap();
        // nearest at 1.0, second at 5.0: 1.0 >= 0.1 * 5.0
        assert!(m.match_descriptors(&[desc(0.0)], &[desc(1.0), desc(5.0)]).is_empty());
    }

    #[test]
    fn distance_ties_are_rejected_even_at_ratio_one() {
        let m = DescriptorMatcher::new(1.0).unwrap();
        // equidistant neighbors: strict inequality fails
        assert!(m.match_descriptors(&[desc(0.0)], &[desc(5.0), desc(-5.0)]).is_empty());
    }

    #[test]
    fn output_follows_probe_order() {
        let m = DescriptorMatcher::new(0.5).unwrap();
        let candidates = vec![desc(0.0), desc(10.0), desc(100.0)];
        let probes = vec![desc(100.0), desc(0.0), desc(10.0)];
        let found = m.match_descriptors(&probes, &candidates);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].probe_idx, 0);
        assert_eq!(found[0].candidate_idx, 2);
        assert_eq!(found[1].probe_idx, 1);
        assert_eq!(found[1].candidate_idx, 0);
        assert_eq!(found[2].probe_idx, 2);
        assert_eq!(found[2].candidate_idx, 1);
    }

    #[test]
    fn score_scenario_a() {
        // 30 accepted, probe 50 kps, candidate 60 kps -> 60.0
        let score = similarity_score(&dummy_matches(30), 50, 60).unwrap();
        assert!((score - 60.0).abs() < 1e-4);
    }

    #[test]
    fn score_scenario_b_does_not_displace_a() {
        let mut contest = Contest::new();
        let a = similarity_score(&dummy_matches(30), 50, 60).unwrap();
        let b = similarity_score(&dummy_matches(10), 50, 45).unwrap();
        assert!((b - 22.222).abs() < 1e-2);

        assert!(contest.offer(Ranked { index: 0, score: a, payload: "a" }));
        assert!(!contest.offer(Ranked { index: 1, score: b, payload: "b" }));
        assert_eq!(contest.best().unwrap().payload, "a");
    }

    #[test]
    fn equal_score_keeps_first_seen() {
        let mut contest = Contest::new();
        contest.offer(Ranked { index: 0, score: 60.0, payload: "a" });
        // Identical score enumerated later must not win
        assert!(!contest.offer(Ranked { index: 2, score: 60.0, payload: "c" }));
        assert_eq!(contest.best().unwrap().payload, "a");
    }

    #[test]
    fn zero_score_never_qualifies() {
        let mut contest: Contest<()> = Contest::new();
        assert!(!contest.offer(Ranked { index: 0, score: 0.0, payload: () }));
        assert!(contest.best().is_none());
    }

    #[test]
    fn degenerate_keypoint_sets_are_an_error() {
        assert!(matches!(
            similarity_score(&dummy_matches(0), 0, 10),
            Err(MatchError::DegenerateMatch { .. })
        ));
        assert!(matches!(
            similarity_score(&dummy_matches(3), 10, 0),
            Err(MatchError::DegenerateMatch { .. })
        ));
    }

    #[test]
    fn merge_is_order_stable() {
        let a = Some(Ranked { index: 0, score: 60.0, payload: "a" });
        let c = Some(Ranked { index: 2, score: 60.0, payload: "c" });
        // Lower index wins a tie from either side of the reduction
        assert_eq!(Contest::merge(a.clone(), c.clone()).unwrap().payload, "a");
        assert_eq!(Contest::merge(c, a).unwrap().payload, "a");

        let weak = Some(Ranked { index: 0, score: 10.0, payload: "w" });
        let strong = Some(Ranked { index: 5, score: 20.0, payload: "s" });
        assert_eq!(Contest::merge(weak, strong).unwrap().payload, "s");
        assert_eq!(Contest::merge(None, Some(Ranked { index: 1, score: 1.0, payload: "x" })).unwrap().payload, "x");
    }

    proptest! {
        #[test]
        fn tightening_the_ratio_never_adds_matches(
            probe_vals in prop::collection::vec(-50.0f32..50.0, 0..8),
            cand_vals in prop::collection::vec(-50.0f32..50.0, 0..8),
            lo in 0.05f32..0.5,
            hi in 0.5f32..1.0,
        ) {
            let probe: Vec<Descriptor> = probe_vals.iter().map(|&v| desc(v)).collect();
            let cand: Vec<Descriptor> = cand_vals.iter().map(|&v| desc(v)).collect();

            let tight = DescriptorMatcher::new(lo).unwrap().match_descriptors(&probe, &cand);
            let loose = DescriptorMatcher::new(hi).unwrap().match_descriptors(&probe, &cand);
            prop_assert!(tight.len() <= loose.len());
        }

        #[test]
        fn scores_stay_within_bounds(
            probe_vals in prop::collection::vec(-50.0f32..50.0, 1..10),
            cand_vals in prop::collection::vec(-50.0f32..50.0, 2..10),
            ratio in 0.05f32..1.0,
        ) {
            let probe: Vec<Descriptor> = probe_vals.iter().map(|&v| desc(v)).collect();
            let cand: Vec<Descriptor> = cand_vals.iter().map(|&v| desc(v)).collect();

            let found = DescriptorMatcher::new(ratio).unwrap().match_descriptors(&probe, &cand);
            let score = similarity_score(&found, probe.len(), cand.len()).unwrap();
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
