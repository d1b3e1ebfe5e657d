use fprint_core::Descriptor;

/// One answer of a nearest-neighbor query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f32,
}

/// Euclidean distance between two descriptors
pub fn euclidean(a: &Descriptor, b: &Descriptor) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// Exact two-nearest-neighbor query over `set`.
///
/// Returns `None` when the set holds fewer than two descriptors; the
/// ratio test is undefined without a second neighbor. On distance ties
/// the earlier index stays the nearest.
pub fn two_nearest(query: &Descriptor, set: &[Descriptor]) -> Option<(Neighbor, Neighbor)> {
    if set.len() < 2 {
        return None;
    }

    let mut best = Neighbor {
        index: 0,
        distance: f32::INFINITY,
    };
    let mut second = best;

    for (index, d) in set.iter().enumerate() {
        let distance = euclidean(query, d);
        if distance < best.distance {
            second = best;
            best = Neighbor { index, distance };
        } else if distance < second.distance {
            second = Neighbor { index, distance };
        }
    }

    Some((best, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fprint_core::DESCRIPTOR_LEN;

    fn desc(v: f32) -> Descriptor {
        let mut d = [0.0; DESCRIPTOR_LEN];
        d[0] = v;
        d
    }

    #[test]
    fn euclidean_of_axis_vectors() {
        assert_eq!(euclidean(&desc(0.0), &desc(3.0)), 3.0);
        assert_eq!(euclidean(&desc(1.0), &desc(1.0)), 0.0);
    }

    #[test]
    fn finds_the_two_closest() {
        let set = vec![desc(10.0), desc(1.0), desc(4.0)];
        let (best, second) = two_nearest(&desc(0.0), &set).unwrap();
        assert_eq!(best, Neighbor { index: 1, distance: 1.0 });
        assert_eq!(second, Neighbor { index: 2, distance: 4.0 });
    }

    #[test]
    fn undersized_set_has_no_answer() {
        assert!(two_nearest(&desc(0.0), &[]).is_none());
        assert!(two_nearest(&desc(0.0), &[desc(1.0)]).is_none());
    }

    #[test]
    fn tie_keeps_earlier_index_as_nearest() {
        let set = vec![desc(5.0), desc(-5.0)];
        let (best, second) = two_nearest(&desc(0.0), &set).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(second.index, 1);
        assert_eq!(best.distance, second.distance);
    }
}
