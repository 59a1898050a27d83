use alloc::vec::Vec;

#[cfg(feature = "logging")]
use defmt::info;

use crate::color::waveform_paint;
use crate::config::{
    RenderConfig, PEAK_DOT_RADIUS, WAVEFORM_PEAK_STRIDE, WAVEFORM_STROKE_WIDTH,
    WAVEFORM_ZERO_LEVEL,
};
use crate::peak::{FrameTime, PeakTracker};
use crate::renderer::{has_area, peak_dot_paint, Renderer};
use crate::surface::{Point2, Shape, Surface};

/// Distance of a waveform sample from the zero crossing, scaled to `[0, 255]`.
pub fn deviation(sample: u8) -> f32 {
    let distance = (sample as i16 - WAVEFORM_ZERO_LEVEL as i16).unsigned_abs();
    (distance * 2).min(255) as f32
}

/// Time-domain amplitude as a single polyline across the surface width.
///
/// With `waveform_peaks` enabled every raw sample keeps a peak of its
/// deviation from the zero crossing, but only every
/// [`WAVEFORM_PEAK_STRIDE`]th one is drawn.
#[derive(Debug, Default)]
pub struct WaveformRenderer {
    peaks: PeakTracker,
}

impl WaveformRenderer {
    pub fn new() -> Self {
        #[cfg(feature = "logging")]
        info!("WaveformRenderer::new");
        Self::default()
    }

    pub fn peaks(&self) -> &PeakTracker {
        &self.peaks
    }
}

impl Renderer for WaveformRenderer {
    fn render<S: Surface>(
        &mut self,
        surface: &mut S,
        frame: &[u8],
        config: &RenderConfig,
        time: FrameTime,
    ) -> Result<(), S::Error> {
        let config = config.sanitized();
        let (width, height) = surface.size();
        if frame.is_empty() || !has_area(width, height) {
            return Ok(());
        }

        let slice_width = width / frame.len() as f32;
        let x_at = |i: usize| i as f32 * slice_width;
        let points: Vec<Point2> = frame
            .iter()
            .enumerate()
            .map(|(i, &sample)| Point2::new(x_at(i), sample as f32 / 128.0 * height / 2.0))
            .collect();
        surface.stroke(
            &Shape::Polyline(points),
            &waveform_paint(config.color_scheme, width),
            WAVEFORM_STROKE_WIDTH,
        )?;

        if !config.waveform_peaks {
            self.peaks.ensure_len(0);
            return Ok(());
        }

        let decay_ms = config.peak_decay_ms;
        self.peaks.ensure_len(frame.len());
        for (i, &sample) in frame.iter().enumerate() {
            self.peaks.update(i, deviation(sample), time, decay_ms);
        }
        let mid = height / 2.0;
        for i in (0..frame.len()).step_by(WAVEFORM_PEAK_STRIDE) {
            if let Some((peak, opacity)) = self.peaks.indicator(i, time.now_ms, decay_ms) {
                let dot = Shape::Circle {
                    center: Point2::new(x_at(i), mid - peak / 255.0 * mid),
                    radius: PEAK_DOT_RADIUS,
                };
                surface.fill(&dot, &peak_dot_paint(opacity))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, ColorScheme, Paint};
    use crate::surface::DrawList;
    use alloc::vec;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_deviation() {
        assert_eq!(deviation(128), 0.0);
        assert_eq!(deviation(0), 255.0);
        assert_eq!(deviation(255), 254.0);
        assert_eq!(deviation(100), 56.0);
    }

    #[test]
    fn test_polyline_vertices() {
        let mut renderer = WaveformRenderer::new();
        let mut list = DrawList::new(100.0, 200.0);
        let frame = [128u8, 0, 255, 64];
        renderer
            .render(&mut list, &frame, &RenderConfig::default(), FrameTime::default())
            .unwrap();

        assert_eq!(list.ops().len(), 1);
        let (shape, _, width) = list.strokes().next().unwrap();
        assert_eq!(width, WAVEFORM_STROKE_WIDTH);
        match shape {
            Shape::Polyline(points) => {
                assert_eq!(points.len(), 4);
                assert_eq!(points[0], Point2::new(0.0, 100.0));
                assert_eq!(points[1], Point2::new(25.0, 0.0));
                assert_abs_diff_eq!(points[2].y, 199.21875, epsilon = 1e-4);
                assert_eq!(points[3], Point2::new(75.0, 50.0));
            }
            other => panic!("expected a polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_waveform_color_variants() {
        let mut renderer = WaveformRenderer::new();
        let frame = [128u8; 16];

        let mut list = DrawList::new(100.0, 100.0);
        let config = RenderConfig::default().with_color_scheme(ColorScheme::Rainbow);
        renderer.render(&mut list, &frame, &config, FrameTime::default()).unwrap();
        let (_, paint, _) = list.strokes().next().unwrap();
        assert_eq!(*paint, Paint::Solid(Color::hsl(180.0, 100.0, 50.0)));

        let mut list = DrawList::new(100.0, 100.0);
        let config = RenderConfig::default().with_color_scheme(ColorScheme::Gradient);
        renderer.render(&mut list, &frame, &config, FrameTime::default()).unwrap();
        let (_, paint, _) = list.strokes().next().unwrap();
        assert!(matches!(paint, Paint::LinearGradient { .. }));
    }

    #[test]
    fn test_strided_peak_dots() {
        let mut renderer = WaveformRenderer::new();
        let mut list = DrawList::new(120.0, 100.0);
        let mut config = RenderConfig::default();
        config.waveform_peaks = true;
        let frame = vec![0u8; 120];
        renderer.render(&mut list, &frame, &config, FrameTime::default()).unwrap();

        assert_eq!(renderer.peaks().len(), 120);
        let dots: Vec<Point2> = list
            .fills()
            .filter_map(|(shape, _)| match shape {
                Shape::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        // Indices 0, 50 and 100.
        assert_eq!(dots.len(), 3);
        assert_eq!(dots[1], Point2::new(50.0, 0.0));
    }

    #[test]
    fn test_peaks_off_by_default() {
        let mut renderer = WaveformRenderer::new();
        let mut list = DrawList::new(120.0, 100.0);
        renderer
            .render(&mut list, &[0u8; 120], &RenderConfig::default(), FrameTime::default())
            .unwrap();
        assert!(renderer.peaks().is_empty());
        assert_eq!(list.fills().count(), 0);
    }

    #[test]
    fn test_empty_frame_is_noop() {
        let mut renderer = WaveformRenderer::new();
        let mut list = DrawList::new(120.0, 100.0);
        renderer
            .render(&mut list, &[], &RenderConfig::default(), FrameTime::default())
            .unwrap();
        assert!(list.ops().is_empty());
    }
}
