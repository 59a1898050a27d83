#![allow(dead_code)]

use spectra_viz::{DrawList, FrameSource, Paint, Point2, Shape};

pub const SPECTRUM_LEN: usize = 1024;
pub const WAVEFORM_LEN: usize = 2048;

/// Frame source backed by owned buffers the test can rewrite between ticks.
pub struct BufferedSource {
    pub spectrum: Vec<u8>,
    pub waveform: Vec<u8>,
    pub active: bool,
}

impl BufferedSource {
    pub fn flat(level: u8) -> Self {
        Self {
            spectrum: vec![level; SPECTRUM_LEN],
            waveform: vec![level; WAVEFORM_LEN],
            active: true,
        }
    }

    pub fn silence(&mut self) {
        self.spectrum.fill(0);
        self.waveform.fill(128);
    }
}

impl FrameSource for BufferedSource {
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

/// Spectrum with energy falling off toward the high bins.
pub fn falling_spectrum() -> Vec<u8> {
    (0..SPECTRUM_LEN)
        .map(|i| 255u32.saturating_sub(i as u32 / 2) as u8)
        .collect()
}

pub fn bar_heights(list: &DrawList) -> Vec<f32> {
    list.fills()
        .filter_map(|(shape, _)| match shape {
            Shape::Bar { height, .. } => Some(*height),
            _ => None,
        })
        .collect()
}

pub fn lines(list: &DrawList) -> Vec<(Point2, Point2)> {
    list.strokes()
        .filter_map(|(shape, _, _)| match shape {
            Shape::Line { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

pub fn dot_alphas(list: &DrawList) -> Vec<f32> {
    list.fills()
        .filter_map(|(shape, paint)| match (shape, paint) {
            (Shape::Circle { .. }, Paint::Solid(color)) => Some(color.alpha()),
            _ => None,
        })
        .collect()
}
