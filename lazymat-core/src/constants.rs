//! Tunable constants shared by the traversal kernels and the parallel tier

/// Edge length of the square tiles used when operand and destination
/// storage orders disagree
pub const BLOCK_SIZE: usize = 64;

/// Byte width of the vector registers dense storage is padded for
pub const SIMD_BYTES: usize = 32;

/// Minimum number of destination elements before the parallel tier splits
/// an assignment across worker threads
pub const SMP_ASSIGN_THRESHOLD: usize = 48_000;

/// Default number of stripes handed to each worker thread
pub const STRIPES_PER_THREAD: usize = 2;

/// Number of `T` values that fill one vector register
pub const fn simd_lanes<T>() -> usize {
    let size = core::mem::size_of::<T>();
    if size == 0 || size >= SIMD_BYTES {
        1
    } else {
        SIMD_BYTES / size
    }
}

/// Larger of two static extents, used for shape deduction where 0 means
/// "known only at run time"
pub const fn max_extent(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}
