//! Frame-driven audio visualization engine.
//!
//! A host hands over one spectrum or waveform frame per display tick together
//! with a [`RenderConfig`] snapshot and the elapsed time. The engine bins the
//! samples, runs the peak hold-and-decay state for every displayed element,
//! maps values to colors and issues draw primitives against a [`Surface`].
//!
//! Three visual styles are available: linear bars, radial bars and a waveform
//! polyline. [`FrameScheduler`] picks the renderer for the configured style
//! and owns its state.
#![no_std]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "logging")]
use defmt_rtt as _;

pub mod bar_graph;
pub mod binner;
pub mod color;
pub mod config;
pub mod peak;
pub mod radial_graph;
pub mod raster;
pub mod renderer;
pub mod scheduler;
pub mod surface;
pub mod waveform;

pub use bar_graph::LinearBarsRenderer;
pub use binner::{aggregate, bin_for, BinRange, FrequencyBinner};
pub use color::{color_for, waveform_paint, Color, ColorScheme, GradientStop, Paint};
pub use config::{RadialGeometry, RenderConfig, VisualStyle};
pub use peak::{FrameTime, PeakState, PeakTracker};
pub use radial_graph::RadialBarsRenderer;
pub use raster::RasterSurface;
pub use renderer::Renderer;
pub use scheduler::{FrameClock, FrameScheduler, FrameSource};
pub use surface::{DrawList, DrawOp, Point2, Shape, Surface};
pub use waveform::WaveformRenderer;
