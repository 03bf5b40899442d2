//! Progressive accumulation and tone mapping.
//!
//! Every frame adds one radiance sample per pixel into a running sum. The
//! display value is the sum divided by the shared frame counter, clamped,
//! gamma corrected and packed into 8-bit channels.

use crate::{Color, RowBand};
use glint_math::Interval;
use std::sync::atomic::{AtomicU32, Ordering};

/// Display gamma.
pub const GAMMA: f32 = 2.2;

/// Convert a linear channel value to an 8-bit display value.
#[inline]
pub fn quantize(linear: f32) -> u8 {
    let encoded = Interval::UNIT.clamp(linear).powf(1.0 / GAMMA);
    (encoded * 255.0) as u8
}

/// Tone map an accumulated sum over `frame` samples to packed `0x00RRGGBB`.
#[inline]
pub fn tone_map(sum: Color, frame: u32) -> u32 {
    let avg = sum * (1.0 / frame.max(1) as f32);
    ((quantize(avg.x) as u32) << 16) | ((quantize(avg.y) as u32) << 8) | quantize(avg.z) as u32
}

/// Unpack `0x00RRGGBB` to `[r, g, b, 255]`.
#[inline]
pub fn unpack_rgba(packed: u32) -> [u8; 4] {
    [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8, 255]
}

/// Mutable slices of one row band plus the shared frame counter.
pub struct BandTarget<'a> {
    pub band: RowBand,
    pub sums: &'a mut [Color],
    pub pixels: &'a mut [u32],
}

/// Per-pixel radiance sums, the display buffer and the frame counter.
///
/// The counter starts at 1 and is the number of samples each pixel holds
/// once the current frame is written. Workers only read it; the owner
/// advances or resets it between frames.
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    sums: Vec<Color>,
    pixels: Vec<u32>,
    frame: AtomicU32,
}

impl AccumulationBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            sums: vec![Color::ZERO; len],
            pixels: vec![0; len],
            frame: AtomicU32::new(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel once the current frame is written.
    pub fn frame_count(&self) -> u32 {
        self.frame.load(Ordering::Acquire)
    }

    /// Discard all accumulated samples.
    pub fn reset(&mut self) {
        self.sums.fill(Color::ZERO);
        self.frame.store(1, Ordering::Release);
    }

    /// Move on to the next frame. Called once all workers have joined.
    pub fn advance(&self) {
        self.frame.fetch_add(1, Ordering::AcqRel);
    }

    pub fn sums(&self) -> &[Color] {
        &self.sums
    }

    /// Packed `0x00RRGGBB` display pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed display pixel at (x, y), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Mean radiance at (x, y) over the samples written so far.
    ///
    /// `completed` is the number of finished frames, i.e. one less than the
    /// counter after [`AccumulationBuffer::advance`].
    pub fn mean(&self, x: u32, y: u32, completed: u32) -> Option<Color> {
        self.index(x, y)
            .map(|i| self.sums[i] * (1.0 / completed.max(1) as f32))
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Display buffer expanded to RGBA8 for image output.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| unpack_rgba(*p)).collect()
    }

    /// Split both buffers into disjoint per-band slices.
    ///
    /// Bands must be contiguous from row 0 and cover the image, as produced
    /// by [`crate::row_bands`].
    pub fn split_bands(&mut self, bands: &[RowBand]) -> (Vec<BandTarget<'_>>, &AtomicU32) {
        let width = self.width as usize;
        let mut sums_rest: &mut [Color] = &mut self.sums;
        let mut pixels_rest: &mut [u32] = &mut self.pixels;
        let mut targets = Vec::with_capacity(bands.len());

        for band in bands {
            let len = (band.rows() as usize * width).min(sums_rest.len());
            let (sums, s_rest) = std::mem::take(&mut sums_rest).split_at_mut(len);
            let (pixels, p_rest) = std::mem::take(&mut pixels_rest).split_at_mut(len);
            sums_rest = s_rest;
            pixels_rest = p_rest;
            targets.push(BandTarget {
                band: *band,
                sums,
                pixels,
            });
        }

        (targets, &self.frame)
    }
}
