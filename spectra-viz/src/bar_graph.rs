use alloc::vec::Vec;

#[cfg(feature = "logging")]
use defmt::info;

use crate::binner::FrequencyBinner;
use crate::color::{color_for, Paint};
use crate::config::{RenderConfig, BAR_CORNER_FRACTION, BAR_PEAK_DOT_FRACTION};
use crate::peak::{FrameTime, PeakTracker};
use crate::renderer::{has_area, peak_dot_paint, Renderer};
use crate::surface::{Point2, Shape, Surface};

/// Vertical bars anchored at the bottom edge, one per frequency bin, with
/// fading peak dots above them.
#[derive(Debug, Default)]
pub struct LinearBarsRenderer {
    binner: FrequencyBinner,
    peaks: PeakTracker,
    values: Vec<f32>,
}

impl LinearBarsRenderer {
    pub fn new() -> Self {
        #[cfg(feature = "logging")]
        info!("LinearBarsRenderer::new");
        Self::default()
    }

    /// Aggregated bar values of the last rendered frame.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn peaks(&self) -> &PeakTracker {
        &self.peaks
    }

    /// Matches the peak tracker to `element_count`, discarding all peaks if it changed.
    pub fn sync_element_count(&mut self, element_count: usize) -> bool {
        self.peaks.ensure_len(element_count)
    }
}

impl Renderer for LinearBarsRenderer {
    fn render<S: Surface>(
        &mut self,
        surface: &mut S,
        frame: &[u8],
        config: &RenderConfig,
        time: FrameTime,
    ) -> Result<(), S::Error> {
        let config = config.sanitized();
        let bar_count = config.element_count;
        self.sync_element_count(bar_count);

        let (width, height) = surface.size();
        if bar_count == 0 || !has_area(width, height) {
            self.values.clear();
            return Ok(());
        }

        self.binner.aggregate_into(frame, bar_count, &mut self.values);

        let bar_width = width / bar_count as f32;
        let decay_ms = config.peak_decay_ms;

        for (i, &value) in self.values.iter().enumerate() {
            let bar_height = value / 255.0 * height;
            let x = i as f32 * bar_width;
            let y = height - bar_height;

            let bar = Shape::Bar {
                x,
                y,
                width: bar_width,
                height: bar_height,
                corner_radius: bar_width * BAR_CORNER_FRACTION,
            };
            let paint = Paint::Solid(color_for(value, i, bar_count, config.color_scheme));
            surface.fill(&bar, &paint)?;

            if !config.show_peaks {
                continue;
            }
            self.peaks.update(i, value, time, decay_ms);
            if let Some((peak, opacity)) = self.peaks.indicator(i, time.now_ms, decay_ms) {
                let dot = Shape::Circle {
                    center: Point2::new(x + bar_width / 2.0, height - peak / 255.0 * height),
                    radius: bar_width * BAR_PEAK_DOT_FRACTION,
                };
                surface.fill(&dot, &peak_dot_paint(opacity))?;
            }
        }
        Ok(())
    }
}
