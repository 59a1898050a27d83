use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
#[allow(unused_imports)]
use micromath::F32Ext;
use rand::{rngs::ThreadRng, Rng};
use spectra_viz::{ColorScheme, FrameScheduler, FrameSource, RasterSurface, RenderConfig, VisualStyle};
use std::{
    thread,
    time::{Duration, Instant},
};

// Constants for visualization parameters
pub const WIDTH: u32 = 128;
pub const HEIGHT: u32 = 128;
pub const FRAME_DELAY_MS: u64 = 16;
pub const FRAMES_PER_STYLE: usize = 90;

const SPECTRUM_LEN: usize = 1024;
const WAVEFORM_LEN: usize = 2048;

/// Synthetic audio: a sweeping tone with a decaying spectrum and a little noise.
struct SynthSource {
    rng: ThreadRng,
    time: f32,
    spectrum: Vec<u8>,
    waveform: Vec<u8>,
}

impl SynthSource {
    fn new() -> Self {
        Self {
            rng: rand::rng(),
            time: 0.0,
            spectrum: vec![0; SPECTRUM_LEN],
            waveform: vec![128; WAVEFORM_LEN],
        }
    }

    fn advance(&mut self, now_ms: f64) {
        self.time = now_ms as f32 / 1000.0;
        let sweep = (self.time * 0.7).sin() * 0.5 + 0.5;
        let tone_bin = 8.0 + sweep * 200.0;

        for (i, bin) in self.spectrum.iter_mut().enumerate() {
            let distance = (i as f32 - tone_bin).abs();
            let tone = 230.0 / (1.0 + distance * 0.15);
            let floor = 120.0 / (1.0 + i as f32 * 0.02);
            let noise = self.rng.random_range(0.0..20.0);
            *bin = (tone + floor + noise).min(255.0) as u8;
        }

        let cycles = 4.0 + sweep * 12.0;
        for (i, sample) in self.waveform.iter_mut().enumerate() {
            let phase = i as f32 / WAVEFORM_LEN as f32 * cycles * 2.0 * core::f32::consts::PI;
            let amplitude = 90.0 * (self.time * 2.0).sin().abs() + 10.0;
            *sample = (128.0 + phase.sin() * amplitude).clamp(0.0, 255.0) as u8;
        }
    }
}

impl FrameSource for SynthSource {
    fn spectrum_frame(&mut self) -> &[u8] {
        &self.spectrum
    }

    fn waveform_frame(&mut self) -> &[u8] {
        &self.waveform
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut display: SimulatorDisplay<Rgb888> = SimulatorDisplay::new(Size::new(WIDTH, HEIGHT));
    let mut scheduler = FrameScheduler::new();
    let mut source = SynthSource::new();

    let runs = [
        (VisualStyle::Bars, ColorScheme::Rainbow, 32),
        (VisualStyle::Radial, ColorScheme::Gradient, 64),
        (VisualStyle::Waveform, ColorScheme::Gradient, 64),
        (VisualStyle::Bars, ColorScheme::CyanFade, 16),
    ];

    for (style, scheme, element_count) in runs {
        let mut config = RenderConfig::default()
            .with_style(style)
            .with_color_scheme(scheme)
            .with_element_count(element_count)
            .with_peak_decay_ms(800.0);
        config.waveform_peaks = true;

        println!(
            "rendering {} frames of {} / {} with {} elements",
            FRAMES_PER_STYLE,
            style.name(),
            scheme.name(),
            element_count
        );
        let start = Instant::now();
        for _ in 0..FRAMES_PER_STYLE {
            let now_ms = start.elapsed().as_secs_f64() * 1000.0;
            source.advance(now_ms);
            let mut surface = RasterSurface::new(&mut display);
            scheduler.tick_at(&mut surface, &mut source, &config, now_ms)?;
            thread::sleep(Duration::from_millis(FRAME_DELAY_MS));
        }

        let path = format!("spectra-{}-{}.png", style.name(), scheme.name());
        display
            .to_rgb_output_image(&OutputSettingsBuilder::new().build())
            .save_png(&path)?;
        println!("saved {}", path);

        let mut surface = RasterSurface::new(&mut display);
        scheduler.stop(&mut surface)?;
    }

    Ok(())
}
