//! Padding arithmetic for dense storage lanes

/// Round `offset` up to the next multiple of `boundary`
///
/// `boundary` must be a power of two.
pub const fn align_to_boundary(offset: usize, boundary: usize) -> usize {
    (offset + boundary - 1) & !(boundary - 1)
}
