#[cfg(feature = "logging")]
use defmt::info;

use crate::bar_graph::LinearBarsRenderer;
use crate::config::{RenderConfig, VisualStyle};
use crate::peak::FrameTime;
use crate::radial_graph::RadialBarsRenderer;
use crate::renderer::Renderer;
use crate::surface::Surface;
use crate::waveform::WaveformRenderer;

/// Pull-based audio boundary. Frames are borrowed for the duration of one tick.
pub trait FrameSource {
    /// Frequency magnitudes, lowest bin first.
    fn spectrum_frame(&mut self) -> &[u8];
    /// Time-domain samples centered on 128.
    fn waveform_frame(&mut self) -> &[u8];
    /// `false` while no audio is playing; ticks are skipped.
    fn is_active(&self) -> bool {
        true
    }
}

/// Turns host timestamps or deltas into [`FrameTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub const fn new() -> Self {
        Self { last_ms: None }
    }

    /// Advances to an absolute timestamp.
    ///
    /// The first tick has no elapsed time, and a timestamp earlier than the
    /// previous one is held at the previous one.
    pub fn advance(&mut self, timestamp_ms: f64) -> FrameTime {
        let time = match self.last_ms {
            Some(last) if timestamp_ms.is_finite() => {
                let now = timestamp_ms.max(last);
                FrameTime::new(now, now - last)
            }
            Some(last) => FrameTime::new(last, 0.0),
            None if timestamp_ms.is_finite() => FrameTime::new(timestamp_ms, 0.0),
            None => FrameTime::new(0.0, 0.0),
        };
        self.last_ms = Some(time.now_ms);
        time
    }

    /// Advances by a delta; negative or invalid deltas count as zero.
    pub fn advance_by(&mut self, elapsed_ms: f64) -> FrameTime {
        let elapsed_ms = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
        let now = self.last_ms.unwrap_or(0.0) + elapsed_ms;
        self.last_ms = Some(now);
        FrameTime::new(now, elapsed_ms)
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[derive(Debug)]
enum ActiveRenderer {
    Bars(LinearBarsRenderer),
    Radial(RadialBarsRenderer),
    Waveform(WaveformRenderer),
}

impl ActiveRenderer {
    fn new(style: VisualStyle) -> Self {
        match style {
            VisualStyle::Bars => ActiveRenderer::Bars(LinearBarsRenderer::new()),
            VisualStyle::Radial => ActiveRenderer::Radial(RadialBarsRenderer::new()),
            VisualStyle::Waveform => ActiveRenderer::Waveform(WaveformRenderer::new()),
        }
    }

    fn style(&self) -> VisualStyle {
        match self {
            ActiveRenderer::Bars(_) => VisualStyle::Bars,
            ActiveRenderer::Radial(_) => VisualStyle::Radial,
            ActiveRenderer::Waveform(_) => VisualStyle::Waveform,
        }
    }

    fn render<S: Surface>(
        &mut self,
        surface: &mut S,
        frame: &[u8],
        config: &RenderConfig,
        time: FrameTime,
    ) -> Result<(), S::Error> {
        match self {
            ActiveRenderer::Bars(renderer) => renderer.render(surface, frame, config, time),
            ActiveRenderer::Radial(renderer) => renderer.render(surface, frame, config, time),
            ActiveRenderer::Waveform(renderer) => renderer.render(surface, frame, config, time),
        }
    }
}

/// Drives one renderer per display tick.
///
/// Exactly one renderer is alive at a time. Switching styles drops the old
/// renderer together with its peak state and starts a fresh one.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    active: Option<ActiveRenderer>,
    clock: FrameClock,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style of the live renderer, if any tick has run since the last stop.
    pub fn active_style(&self) -> Option<VisualStyle> {
        self.active.as_ref().map(ActiveRenderer::style)
    }

    pub fn bars(&self) -> Option<&LinearBarsRenderer> {
        match &self.active {
            Some(ActiveRenderer::Bars(renderer)) => Some(renderer),
            _ => None,
        }
    }

    pub fn radial(&self) -> Option<&RadialBarsRenderer> {
        match &self.active {
            Some(ActiveRenderer::Radial(renderer)) => Some(renderer),
            _ => None,
        }
    }

    pub fn waveform(&self) -> Option<&WaveformRenderer> {
        match &self.active {
            Some(ActiveRenderer::Waveform(renderer)) => Some(renderer),
            _ => None,
        }
    }

    /// Renders one frame `elapsed_ms` after the previous one.
    ///
    /// Returns `Ok(false)` without touching the surface when the source is inactive.
    pub fn tick<S: Surface, F: FrameSource + ?Sized>(
        &mut self,
        surface: &mut S,
        source: &mut F,
        config: &RenderConfig,
        elapsed_ms: f64,
    ) -> Result<bool, S::Error> {
        if !source.is_active() {
            return Ok(false);
        }
        let time = self.clock.advance_by(elapsed_ms);
        self.render_frame(surface, source, config, time)?;
        Ok(true)
    }

    /// Renders one frame at an absolute host timestamp.
    pub fn tick_at<S: Surface, F: FrameSource + ?Sized>(
        &mut self,
        surface: &mut S,
        source: &mut F,
        config: &RenderConfig,
        timestamp_ms: f64,
    ) -> Result<bool, S::Error> {
        if !source.is_active() {
            return Ok(false);
        }
        let time = self.clock.advance(timestamp_ms);
        self.render_frame(surface, source, config, time)?;
        Ok(true)
    }

    /// Clears the surface and drops all renderer state.
    pub fn stop<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        #[cfg(feature = "logging")]
        info!("scheduler stopped");
        #[cfg(feature = "std")]
        std::println!("scheduler stopped");
        self.active = None;
        self.clock.reset();
        surface.clear()
    }

    fn render_frame<S: Surface, F: FrameSource + ?Sized>(
        &mut self,
        surface: &mut S,
        source: &mut F,
        config: &RenderConfig,
        time: FrameTime,
    ) -> Result<(), S::Error> {
        let style = config.style;
        if self.active_style() != Some(style) {
            #[cfg(feature = "logging")]
            info!("switching to {} renderer", style.name());
            #[cfg(feature = "std")]
            std::println!("switching to {} renderer", style.name());
            self.active = None;
        }
        let renderer = self.active.get_or_insert_with(|| ActiveRenderer::new(style));

        surface.clear()?;
        let frame = if style.uses_spectrum() {
            source.spectrum_frame()
        } else {
            source.waveform_frame()
        };
        renderer.render(surface, frame, config, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawList, DrawOp};
    use alloc::{vec, vec::Vec};

    struct FixedSource {
        spectrum: Vec<u8>,
        waveform: Vec<u8>,
        active: bool,
    }

    impl FixedSource {
        fn new(spectrum: u8, waveform: u8) -> Self {
            Self {
                spectrum: vec![spectrum; 1024],
                waveform: vec![waveform; 256],
                active: true,
            }
        }
    }

    impl FrameSource for FixedSource {
        fn spectrum_frame(&mut self) -> &[u8] {
            &self.spectrum
        }

        fn waveform_frame(&mut self) -> &[u8] {
            &self.waveform
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    #[test]
    fn test_clock_first_tick_has_no_elapsed_time() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(5000.0), FrameTime::new(5000.0, 0.0));
        assert_eq!(clock.advance(5016.0), FrameTime::new(5016.0, 16.0));
    }

    #[test]
    fn test_clock_ignores_backwards_time() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        assert_eq!(clock.advance(40.0), FrameTime::new(100.0, 0.0));
        assert_eq!(clock.advance(f64::NAN), FrameTime::new(100.0, 0.0));
        assert_eq!(clock.advance(110.0), FrameTime::new(110.0, 10.0));
        clock.reset();
        assert_eq!(clock.advance(7.0).elapsed_ms, 0.0);
    }

    #[test]
    fn test_clock_deltas_accumulate() {
        let mut clock = FrameClock::new();
        clock.advance_by(16.0);
        clock.advance_by(-3.0);
        assert_eq!(clock.advance_by(4.0), FrameTime::new(20.0, 4.0));
    }

    #[test]
    fn test_tick_clears_then_draws() {
        let mut scheduler = FrameScheduler::new();
        let mut source = FixedSource::new(128, 128);
        let mut list = DrawList::new(100.0, 100.0);
        let config = RenderConfig::default().with_element_count(4);

        assert!(scheduler.tick(&mut list, &mut source, &config, 16.0).unwrap());
        assert_eq!(list.ops()[0], DrawOp::Clear);
        assert_eq!(scheduler.active_style(), Some(VisualStyle::Bars));
        assert_eq!(scheduler.bars().map(|b| b.values().len()), Some(4));
    }

    #[test]
    fn test_inactive_source_skips_frame() {
        let mut scheduler = FrameScheduler::new();
        let mut source = FixedSource::new(128, 128);
        source.active = false;
        let mut list = DrawList::new(100.0, 100.0);

        let drawn = scheduler
            .tick(&mut list, &mut source, &RenderConfig::default(), 16.0)
            .unwrap();
        assert!(!drawn);
        assert!(list.ops().is_empty());
        assert!(scheduler.active_style().is_none());
    }

    #[test]
    fn test_style_switch_recreates_renderer() {
        let mut scheduler = FrameScheduler::new();
        let mut source = FixedSource::new(200, 0);
        let mut list = DrawList::new(100.0, 100.0);
        let bars = RenderConfig::default().with_element_count(8);
        scheduler.tick(&mut list, &mut source, &bars, 0.0).unwrap();
        assert!(scheduler.bars().is_some());

        let mut waveform = bars.with_style(VisualStyle::Waveform);
        waveform.waveform_peaks = true;
        scheduler.tick(&mut list, &mut source, &waveform, 16.0).unwrap();
        assert!(scheduler.bars().is_none());
        assert_eq!(scheduler.waveform().map(|w| w.peaks().len()), Some(256));

        scheduler
            .tick(&mut list, &mut source, &bars.with_style(VisualStyle::Radial), 16.0)
            .unwrap();
        let radial = scheduler.radial().unwrap();
        assert_eq!(radial.peaks().len(), 9);
    }

    #[test]
    fn test_stop_clears_and_drops_state() {
        let mut scheduler = FrameScheduler::new();
        let mut source = FixedSource::new(200, 128);
        let mut list = DrawList::new(100.0, 100.0);
        scheduler
            .tick(&mut list, &mut source, &RenderConfig::default(), 16.0)
            .unwrap();
        list.take_ops();

        scheduler.stop(&mut list).unwrap();
        assert_eq!(list.ops(), &[DrawOp::Clear]);
        assert!(scheduler.active_style().is_none());
    }
}
