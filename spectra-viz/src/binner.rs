use alloc::vec::Vec;

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::{LOW_BAND_ELEMENT_DIVISOR, LOW_BAND_SPECTRUM_SHARE, SPECTRUM_CAP};

/// Half-open range `start..end` of raw spectrum indices feeding one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinRange {
    pub start: usize,
    pub end: usize,
}

impl BinRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of elements assigned to the linear low-frequency segment,
/// `ceil(element_count * 0.2)`.
pub fn low_band_count(element_count: usize) -> usize {
    element_count.div_ceil(LOW_BAND_ELEMENT_DIVISOR)
}

/// Fractional raw index where element `i` begins.
///
/// Below `low_count` the boundaries are linear over the first 10% of the cap.
/// From `low_count` on they follow the quadratic
/// `low_span + ((i - 0.2N) / 0.8N)^2 * (cap - low_span)`, so the last low
/// element ends where the quadratic segment starts. `boundary(N) == cap`.
fn boundary(i: usize, element_count: usize, low_count: usize, cap: f32) -> f32 {
    let low_span = cap * LOW_BAND_SPECTRUM_SHARE;
    if i < low_count {
        return i as f32 / low_count as f32 * low_span;
    }
    let low_share = element_count as f32 / LOW_BAND_ELEMENT_DIVISOR as f32;
    let t = (i as f32 - low_share) / (element_count as f32 - low_share);
    low_span + t * t * (cap - low_span)
}

/// Splits the first `min(raw_length, 512)` spectrum samples into
/// `element_count` contiguous ranges.
///
/// Ranges are non-overlapping and ordered; each holds at least one sample as
/// long as the capped spectrum has room, and the last one ends exactly at the
/// cap.
pub fn bin_for(element_count: usize, raw_length: usize) -> Vec<BinRange> {
    let mut ranges = Vec::with_capacity(element_count);
    if element_count == 0 {
        return ranges;
    }

    let cap = raw_length.min(SPECTRUM_CAP);
    let low_count = low_band_count(element_count);

    let mut start = 0;
    for i in 0..element_count {
        let end = if i + 1 == element_count {
            cap
        } else {
            let raw_end = boundary(i + 1, element_count, low_count, cap as f32).floor() as usize;
            raw_end.max(start + 1).min(cap)
        };
        let end = end.max(start);
        ranges.push(BinRange::new(start, end));
        start = end;
    }
    ranges
}

/// Arithmetic mean of the samples inside `range`.
///
/// Indices past the end of `samples` are skipped; no valid samples yields 0.
pub fn aggregate(samples: &[u8], range: BinRange) -> f32 {
    let end = range.end.min(samples.len());
    if range.start >= end {
        return 0.0;
    }
    let slice = &samples[range.start..end];
    let sum: u32 = slice.iter().map(|&s| s as u32).sum();
    sum as f32 / slice.len() as f32
}

/// Caches the ranges for the last `(element_count, raw_length)` pair.
#[derive(Debug, Default)]
pub struct FrequencyBinner {
    element_count: usize,
    raw_length: usize,
    ranges: Vec<BinRange>,
}

impl FrequencyBinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ranges(&mut self, element_count: usize, raw_length: usize) -> &[BinRange] {
        if element_count != self.element_count
            || raw_length != self.raw_length
            || self.ranges.len() != element_count
        {
            self.ranges = bin_for(element_count, raw_length);
            self.element_count = element_count;
            self.raw_length = raw_length;
        }
        &self.ranges
    }

    /// Aggregated value for each element of `frame`, written into `values`.
    pub fn aggregate_into(&mut self, frame: &[u8], element_count: usize, values: &mut Vec<f32>) {
        values.clear();
        let ranges = self.ranges(element_count, frame.len());
        values.extend(ranges.iter().map(|range| aggregate(frame, *range)));
    }
}
