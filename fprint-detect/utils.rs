//! Bit tricks for the 16-pixel FAST ring.

/// Check whether `mask` contains a circular run of at least `min_len`
/// set bits (bit i = ring position i, wrap-around allowed).
pub fn has_arc(mask: u16, min_len: usize) -> bool {
    if min_len == 0 || min_len > 16 {
        return false;
    }

    // A run of length n survives ANDing the mask with its first n-1
    // circular rotations.
    let mut acc = mask;
    for i in 1..min_len {
        let rotated = mask.rotate_left(i as u32);
        acc &= rotated;
        if acc == 0 {
            return false;
        }
    }

    acc != 0
}
