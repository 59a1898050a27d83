use crate::color::ColorScheme;

// --- Spectrum Config ---
pub const SPECTRUM_CAP: usize = 512; // Only the lower part of the spectrum is ever displayed
pub const LOW_BAND_ELEMENT_DIVISOR: usize = 5; // ceil(N / 5), the lowest 20% of elements
pub const LOW_BAND_SPECTRUM_SHARE: f32 = 0.1; // Share of the capped spectrum those elements cover

// --- Element Config ---
pub const DEFAULT_ELEMENT_COUNT: usize = 64;
pub const DEFAULT_PEAK_DECAY_MS: f32 = 1000.0;

// --- Radial Config ---
pub const DEFAULT_INNER_RADIUS_FACTOR: f32 = 3.0; // inner radius = min(width, height) / factor
pub const MIN_INNER_RADIUS_FACTOR: f32 = 1.0; // the baseline circle never leaves the surface
pub const DEFAULT_MAX_BAR_LENGTH_PERCENT: f32 = 100.0; // of the inner radius
pub const RADIAL_STROKE_WIDTH: f32 = 2.0;
pub const BASELINE_ALPHA: f32 = 0.2;

// --- Peak Indicator Config ---
pub const PEAK_DOT_RADIUS: f32 = 3.0; // radial and waveform dots; bars scale with bar width
pub const BAR_PEAK_DOT_FRACTION: f32 = 1.0 / 3.0;
pub const BAR_CORNER_FRACTION: f32 = 1.0 / 4.0;

// --- Waveform Config ---
pub const WAVEFORM_STROKE_WIDTH: f32 = 2.0;
pub const WAVEFORM_ZERO_LEVEL: u8 = 128;
pub const WAVEFORM_PEAK_STRIDE: usize = 50; // one indicator drawn per stride samples

/// Which renderer draws the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualStyle {
    #[default]
    Bars,
    Radial,
    Waveform,
}

impl VisualStyle {
    /// Parses a control value. Unknown names fall back to [`VisualStyle::Bars`].
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "radial" | "circle" => VisualStyle::Radial,
            "waveform" | "wave" => VisualStyle::Waveform,
            _ => VisualStyle::Bars,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VisualStyle::Bars => "bars",
            VisualStyle::Radial => "radial",
            VisualStyle::Waveform => "waveform",
        }
    }

    /// Spectrum styles consume frequency frames, the waveform style time-domain frames.
    pub fn uses_spectrum(&self) -> bool {
        !matches!(self, VisualStyle::Waveform)
    }
}

impl From<&str> for VisualStyle {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// Geometry knobs of the radial style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGeometry {
    pub inner_radius_factor: f32,
    pub max_bar_length_percent: f32,
}

impl Default for RadialGeometry {
    fn default() -> Self {
        Self {
            inner_radius_factor: DEFAULT_INNER_RADIUS_FACTOR,
            max_bar_length_percent: DEFAULT_MAX_BAR_LENGTH_PERCENT,
        }
    }
}

/// Read-only snapshot of the user controls, taken once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub style: VisualStyle,
    /// Bar/segment count for the bar styles. Zero renders nothing.
    pub element_count: usize,
    pub color_scheme: ColorScheme,
    /// Time for a peak indicator to fade from opaque to invisible.
    pub peak_decay_ms: f32,
    /// Peak tracking and dots for the bar styles.
    pub show_peaks: bool,
    /// Strided peak dots along the waveform.
    pub waveform_peaks: bool,
    pub radial: RadialGeometry,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: VisualStyle::default(),
            element_count: DEFAULT_ELEMENT_COUNT,
            color_scheme: ColorScheme::default(),
            peak_decay_ms: DEFAULT_PEAK_DECAY_MS,
            show_peaks: true,
            waveform_peaks: false,
            radial: RadialGeometry::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_style(mut self, style: VisualStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_element_count(mut self, element_count: usize) -> Self {
        self.element_count = element_count;
        self
    }

    pub fn with_color_scheme(mut self, color_scheme: ColorScheme) -> Self {
        self.color_scheme = color_scheme;
        self
    }

    pub fn with_peak_decay_ms(mut self, peak_decay_ms: f32) -> Self {
        self.peak_decay_ms = peak_decay_ms;
        self
    }

    pub fn with_radial(mut self, radial: RadialGeometry) -> Self {
        self.radial = radial;
        self
    }

    /// Returns a copy whose numeric fields are safe to feed into geometry.
    ///
    /// A negative or non-finite decay becomes 0 (decay instantly); radial knobs
    /// that are non-positive or non-finite fall back to their defaults, and a
    /// positive radius factor below [`MIN_INNER_RADIUS_FACTOR`] is raised to it.
    pub fn sanitized(&self) -> Self {
        let mut config = *self;
        if !config.peak_decay_ms.is_finite() || config.peak_decay_ms < 0.0 {
            config.peak_decay_ms = 0.0;
        }
        let factor = config.radial.inner_radius_factor;
        config.radial.inner_radius_factor = if !factor.is_finite() || factor <= 0.0 {
            DEFAULT_INNER_RADIUS_FACTOR
        } else {
            factor.max(MIN_INNER_RADIUS_FACTOR)
        };
        if !config.radial.max_bar_length_percent.is_finite()
            || config.radial.max_bar_length_percent < 0.0
        {
            config.radial.max_bar_length_percent = DEFAULT_MAX_BAR_LENGTH_PERCENT;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names() {
        assert_eq!(VisualStyle::from_name("bars"), VisualStyle::Bars);
        assert_eq!(VisualStyle::from_name("circle"), VisualStyle::Radial);
        assert_eq!(VisualStyle::from_name("radial"), VisualStyle::Radial);
        assert_eq!(VisualStyle::from_name("wave"), VisualStyle::Waveform);
        assert_eq!(VisualStyle::from("waveform"), VisualStyle::Waveform);
        assert_eq!(VisualStyle::from_name("spiral"), VisualStyle::Bars);
    }

    #[test]
    fn test_sanitized_guards_degenerate_values() {
        let config = RenderConfig::default()
            .with_peak_decay_ms(f32::NAN)
            .with_radial(RadialGeometry {
                inner_radius_factor: 0.0,
                max_bar_length_percent: f32::INFINITY,
            })
            .sanitized();
        assert_eq!(config.peak_decay_ms, 0.0);
        assert_eq!(config.radial, RadialGeometry::default());

        let negative = RenderConfig::default().with_peak_decay_ms(-5.0).sanitized();
        assert_eq!(negative.peak_decay_ms, 0.0);
    }

    #[test]
    fn test_sanitized_floors_tiny_radius_factor() {
        for factor in [1e-40_f32, f32::MIN_POSITIVE, 0.25, 0.999] {
            let config = RenderConfig::default()
                .with_radial(RadialGeometry {
                    inner_radius_factor: factor,
                    max_bar_length_percent: 100.0,
                })
                .sanitized();
            assert_eq!(config.radial.inner_radius_factor, MIN_INNER_RADIUS_FACTOR);
        }
    }

    #[test]
    fn test_sanitized_keeps_valid_values() {
        let config = RenderConfig::default()
            .with_peak_decay_ms(250.0)
            .with_radial(RadialGeometry {
                inner_radius_factor: 4.5,
                max_bar_length_percent: 60.0,
            });
        assert_eq!(config.sanitized(), config);
    }
}
