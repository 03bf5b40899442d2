//! Row-band partitioning for parallel frame rendering.
//!
//! A frame is split into contiguous horizontal bands, one per worker, so
//! each worker writes a disjoint slice of the pixel and accumulation buffers.

/// A contiguous range of image rows `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row of the band
    pub start: u32,
    /// One past the last row of the band
    pub end: u32,
    /// Index of this band in top-to-bottom order
    pub index: usize,
}

impl RowBand {
    pub fn new(start: u32, end: u32, index: usize) -> Self {
        Self { start, end, index }
    }

    /// Number of rows in this band.
    pub fn rows(&self) -> u32 {
        self.end - self.start
    }

    /// Seed for this band's sampler on a given frame tick.
    pub fn seed(&self, tick: u64) -> u64 {
        tick.wrapping_add(self.start as u64)
    }
}

/// Split `height` rows into `count` bands of `height / count` rows each,
/// the last band absorbing the remainder.
///
/// The count is clamped to `1..=height` so no band is empty.
pub fn row_bands(height: u32, count: usize) -> Vec<RowBand> {
    if height == 0 {
        return Vec::new();
    }

    let count = count.clamp(1, height as usize) as u32;
    let block = height / count;

    (0..count)
        .map(|i| {
            let start = i * block;
            let end = if i == count - 1 { height } else { start + block };
            RowBand::new(start, end, i as usize)
        })
        .collect()
}
