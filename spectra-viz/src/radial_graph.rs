use alloc::vec::Vec;
use core::f32::consts::{FRAC_PI_2, PI};

#[cfg(feature = "logging")]
use defmt::info;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::binner::{aggregate, BinRange, FrequencyBinner};
use crate::color::{color_for, Color, Paint};
use crate::config::{
    RenderConfig, BASELINE_ALPHA, PEAK_DOT_RADIUS, RADIAL_STROKE_WIDTH, SPECTRUM_CAP,
};
use crate::peak::{FrameTime, PeakTracker};
use crate::renderer::{has_area, peak_dot_paint, Renderer};
use crate::surface::{Point2, Shape, Surface};

/// Raw spectrum band feeding the filler segment, as 32nds of the capped length.
const FILLER_BAND_32NDS: (usize, usize) = (15, 17);

/// Fixed mid-spectrum band drawn at the bottom pole to close the seam between
/// the two semicircles. It is not part of the binning curve.
pub fn filler_range(raw_length: usize) -> BinRange {
    let cap = raw_length.min(SPECTRUM_CAP);
    let start = cap * FILLER_BAND_32NDS.0 / 32;
    let end = (cap * FILLER_BAND_32NDS.1 / 32).max(start + 1);
    BinRange::new(start, end)
}

/// Angle of regular segment `i` of `half` on one semicircle.
///
/// Both halves start at the top pole (-π/2); `direction` +1 sweeps clockwise
/// on screen, -1 counter-clockwise.
pub fn segment_angle(i: usize, half: usize, direction: f32) -> f32 {
    if half == 0 {
        return -FRAC_PI_2;
    }
    -FRAC_PI_2 + direction * (i as f32 / half as f32) * PI
}

/// Radial segments around a baseline circle. Low frequencies start at the
/// top and sweep down both sides; a filler segment sits at the bottom.
///
/// Peak slots: `0..half` right side, `half..2*half` left side, and slot
/// `element_count` for the filler.
#[derive(Debug, Default)]
pub struct RadialBarsRenderer {
    binner: FrequencyBinner,
    peaks: PeakTracker,
    values: Vec<f32>,
    filler_value: f32,
}

struct Geometry {
    center: Point2,
    inner_radius: f32,
    max_length: f32,
}

impl Geometry {
    fn point_at(&self, angle: f32, radius: f32) -> Point2 {
        Point2::new(
            self.center.x + angle.cos() * radius,
            self.center.y + angle.sin() * radius,
        )
    }
}

impl RadialBarsRenderer {
    pub fn new() -> Self {
        #[cfg(feature = "logging")]
        info!("RadialBarsRenderer::new");
        Self::default()
    }

    /// Aggregated values of one semicircle from the last frame.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn filler_value(&self) -> f32 {
        self.filler_value
    }

    pub fn peaks(&self) -> &PeakTracker {
        &self.peaks
    }

    /// Matches the peak tracker to `element_count` plus the filler slot,
    /// discarding all peaks if it changed.
    pub fn sync_element_count(&mut self, element_count: usize) -> bool {
        let slots = if element_count == 0 { 0 } else { element_count + 1 };
        self.peaks.ensure_len(slots)
    }
}

/// One radial segment to draw: its peak slot, value, angle and color.
struct Segment {
    slot: usize,
    value: f32,
    angle: f32,
    color: Color,
}

fn draw_segment<S: Surface>(
    surface: &mut S,
    peaks: &mut PeakTracker,
    geometry: &Geometry,
    segment: Segment,
    config: &RenderConfig,
    time: FrameTime,
) -> Result<(), S::Error> {
    let length = segment.value / 255.0 * geometry.max_length;
    let line = Shape::Line {
        from: geometry.point_at(segment.angle, geometry.inner_radius),
        to: geometry.point_at(segment.angle, geometry.inner_radius + length),
    };
    surface.stroke(&line, &Paint::Solid(segment.color), RADIAL_STROKE_WIDTH)?;

    if !config.show_peaks {
        return Ok(());
    }
    let decay_ms = config.peak_decay_ms;
    peaks.update(segment.slot, segment.value, time, decay_ms);
    if let Some((peak, opacity)) = peaks.indicator(segment.slot, time.now_ms, decay_ms) {
        let radius = geometry.inner_radius + peak / 255.0 * geometry.max_length;
        let dot = Shape::Circle {
            center: geometry.point_at(segment.angle, radius),
            radius: PEAK_DOT_RADIUS,
        };
        surface.fill(&dot, &peak_dot_paint(opacity))?;
    }
    Ok(())
}

impl Renderer for RadialBarsRenderer {
    fn render<S: Surface>(
        &mut self,
        surface: &mut S,
        frame: &[u8],
        config: &RenderConfig,
        time: FrameTime,
    ) -> Result<(), S::Error> {
        let config = config.sanitized();
        let element_count = config.element_count;
        self.sync_element_count(element_count);

        let (width, height) = surface.size();
        if element_count == 0 || !has_area(width, height) {
            self.values.clear();
            self.filler_value = 0.0;
            return Ok(());
        }

        let inner_radius = width.min(height) / config.radial.inner_radius_factor;
        let max_length = inner_radius * (config.radial.max_bar_length_percent / 100.0);
        if !inner_radius.is_finite() || !max_length.is_finite() {
            self.values.clear();
            self.filler_value = 0.0;
            return Ok(());
        }
        let geometry = Geometry {
            center: Point2::new(width / 2.0, height / 2.0),
            inner_radius,
            max_length,
        };

        let baseline = Shape::Circle {
            center: geometry.center,
            radius: inner_radius,
        };
        surface.stroke(
            &baseline,
            &Paint::Solid(Color::rgba(255, 255, 255, BASELINE_ALPHA)),
            1.0,
        )?;

        let half = element_count / 2;
        self.binner.aggregate_into(frame, half, &mut self.values);

        for (offset, direction) in [(0, 1.0), (half, -1.0)] {
            for (i, &value) in self.values.iter().enumerate() {
                let slot = offset + i;
                let segment = Segment {
                    slot,
                    value,
                    angle: segment_angle(i, half, direction),
                    color: color_for(value, slot, half * 2, config.color_scheme),
                };
                draw_segment(surface, &mut self.peaks, &geometry, segment, &config, time)?;
            }
        }

        self.filler_value = aggregate(frame, filler_range(frame.len()));
        let filler = Segment {
            slot: element_count,
            value: self.filler_value,
            angle: FRAC_PI_2,
            color: color_for(
                self.filler_value,
                element_count,
                element_count + 1,
                config.color_scheme,
            ),
        };
        draw_segment(surface, &mut self.peaks, &geometry, filler, &config, time)
    }
}
