use alloc::{vec, vec::Vec};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::surface::Point2;

/// A single draw color, either as HSL (rainbow hues) or as RGB with alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Hue in degrees, saturation and lightness in percent.
    Hsl {
        hue: f32,
        saturation: f32,
        lightness: f32,
    },
    Rgba { r: u8, g: u8, b: u8, alpha: f32 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba { r, g, b, alpha: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Color::Rgba { r, g, b, alpha }
    }

    pub const fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Color::Hsl {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Hsl { .. } => 1.0,
            Color::Rgba { alpha, .. } => alpha,
        }
    }

    /// Resolves the color to `(r, g, b, alpha)`.
    pub fn to_rgba(&self) -> (u8, u8, u8, f32) {
        match *self {
            Color::Rgba { r, g, b, alpha } => (r, g, b, alpha.clamp(0.0, 1.0)),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => {
                let (r, g, b) = hsl_to_rgb(hue, saturation / 100.0, lightness / 100.0);
                (r, g, b, 1.0)
            }
        }
    }

    /// Composites the color over `background` and returns an opaque pixel color.
    pub fn to_rgb888(&self, background: Rgb888) -> Rgb888 {
        let (r, g, b, alpha) = self.to_rgba();
        let blend = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * alpha + bg as f32 * (1.0 - alpha))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb888::new(
            blend(r, background.r()),
            blend(g, background.g()),
            blend(b, background.b()),
        )
    }
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let hue = ((hue % 360.0) + 360.0) % 360.0;
    let saturation = saturation.clamp(0.0, 1.0);
    let lightness = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let (r1, g1, b1) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let to_u8 = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r1), to_u8(g1), to_u8(b1))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

/// How a shape is filled or stroked.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient {
        from: Point2,
        to: Point2,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// Color of the paint at horizontal position `x`.
    ///
    /// Gradients are projected onto their `from`..`to` axis; stops are linearly
    /// interpolated in RGBA.
    pub fn sample_at(&self, x: f32) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::LinearGradient { from, to, stops } => {
                let Some(first) = stops.first() else {
                    return Color::rgba(0, 0, 0, 0.0);
                };
                let span = to.x - from.x;
                let t = if span.abs() > f32::EPSILON {
                    ((x - from.x) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                if t <= first.offset {
                    return first.color;
                }
                for pair in stops.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    if t <= b.offset {
                        let width = b.offset - a.offset;
                        let local = if width > 0.0 { (t - a.offset) / width } else { 1.0 };
                        return lerp_color(a.color, b.color, local);
                    }
                }
                stops[stops.len() - 1].color
            }
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let (ar, ag, ab, aa) = a.to_rgba();
    let (br, bg, bb, ba) = b.to_rgba();
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round().clamp(0.0, 255.0) as u8;
    Color::rgba(mix(ar, br), mix(ag, bg), mix(ab, bb), aa + (ba - aa) * t)
}

const ACCENT: Color = Color::rgb(0x4C, 0xAF, 0x50);

/// Named color schemes selectable from the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// Hue sweeps the color wheel by element position.
    Rainbow,
    /// Red and green rise with intensity, blue falls.
    Gradient,
    /// Fixed accent color.
    #[default]
    Single,
    WhiteFade,
    BlueFade,
    GreenFade,
    PurpleFade,
    CyanFade,
}

impl ColorScheme {
    /// Parses a control value. Unknown names fall back to [`ColorScheme::Single`].
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "rainbow" => ColorScheme::Rainbow,
            "gradient" => ColorScheme::Gradient,
            "single" => ColorScheme::Single,
            "white-fade" => ColorScheme::WhiteFade,
            "blue-fade" => ColorScheme::BlueFade,
            "green-fade" => ColorScheme::GreenFade,
            "purple-fade" => ColorScheme::PurpleFade,
            "cyan-fade" => ColorScheme::CyanFade,
            _ => ColorScheme::Single,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Gradient => "gradient",
            ColorScheme::Single => "single",
            ColorScheme::WhiteFade => "white-fade",
            ColorScheme::BlueFade => "blue-fade",
            ColorScheme::GreenFade => "green-fade",
            ColorScheme::PurpleFade => "purple-fade",
            ColorScheme::CyanFade => "cyan-fade",
        }
    }

    fn fade_rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            ColorScheme::WhiteFade => Some((255, 255, 255)),
            ColorScheme::BlueFade => Some((0, 100, 255)),
            ColorScheme::GreenFade => Some((0, 220, 100)),
            ColorScheme::PurpleFade => Some((180, 0, 255)),
            ColorScheme::CyanFade => Some((0, 220, 220)),
            _ => None,
        }
    }

    pub fn color(&self, context: &ColorContext) -> Color {
        let intensity = context.value.clamp(0.0, 255.0) / 255.0;
        match self {
            ColorScheme::Rainbow => {
                let hue = if context.num_elements > 0 {
                    360.0 * context.element_index as f32 / context.num_elements as f32
                } else {
                    0.0
                };
                Color::hsl(hue, 100.0, 50.0)
            }
            ColorScheme::Gradient => Color::rgb(
                (intensity * 255.0).round() as u8,
                (intensity * 100.0).round() as u8,
                (255.0 - intensity * 255.0).round() as u8,
            ),
            ColorScheme::Single => ACCENT,
            fade => {
                let (r, g, b) = fade.fade_rgb().unwrap_or((255, 255, 255));
                Color::rgba(r, g, b, 0.1 + intensity * 0.9)
            }
        }
    }
}

impl From<&str> for ColorScheme {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

/// What the color mapper knows about the element being drawn.
pub struct ColorContext {
    pub value: f32,
    pub element_index: usize,
    pub num_elements: usize,
}

/// Color of one bar or segment.
pub fn color_for(value: f32, index: usize, total: usize, scheme: ColorScheme) -> Color {
    scheme.color(&ColorContext {
        value,
        element_index: index,
        num_elements: total,
    })
}

/// Stroke paint for the waveform line spanning `width` pixels.
pub fn waveform_paint(scheme: ColorScheme, width: f32) -> Paint {
    match scheme {
        ColorScheme::Rainbow => Paint::Solid(Color::hsl(180.0, 100.0, 50.0)),
        ColorScheme::Gradient => Paint::LinearGradient {
            from: Point2::new(0.0, 0.0),
            to: Point2::new(width, 0.0),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: Color::rgb(0, 255, 255),
                },
                GradientStop {
                    offset: 0.5,
                    color: Color::rgb(255, 0, 255),
                },
                GradientStop {
                    offset: 1.0,
                    color: Color::rgb(255, 255, 0),
                },
            ],
        },
        other => Paint::Solid(color_for(200.0, 0, 1, other)),
    }
}
