use crate::color::{Color, Paint};
use crate::config::RenderConfig;
use crate::peak::FrameTime;
use crate::surface::Surface;

/// One visual style: turns a sample frame into draw calls.
///
/// Renderers keep their own peak state between frames; nothing is shared
/// across instances.
pub trait Renderer {
    fn render<S: Surface>(
        &mut self,
        surface: &mut S,
        frame: &[u8],
        config: &RenderConfig,
        time: FrameTime,
    ) -> Result<(), S::Error>;
}

/// Fill for a peak indicator at the given opacity.
pub(crate) fn peak_dot_paint(opacity: f32) -> Paint {
    Paint::Solid(Color::rgba(255, 255, 255, opacity))
}

/// `true` when the surface has an area to draw into.
pub(crate) fn has_area(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}
