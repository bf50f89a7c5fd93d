//! neonclock renders a live-wallpaper clock: a background image scaled to the surface with the
//! current time drawn on top as a neon sign (blurred glow, stroked outline, solid fill).
//!
//! The engine is host-agnostic:
//!
//! - Build a [`WallpaperService`] from a [`ResourceProvider`] and an [`EngineConfig`]
//! - Create one [`ClockEngine`] per [`SurfaceHost`]
//! - Forward host notifications (`on_visibility_changed`, `on_surface_changed`, ...) and drive
//!   time with [`ClockEngine::advance_to`]
//!
//! [`PixmapHost`] renders headlessly on the CPU; [`RecordingHost`] captures draw calls.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod clock;
mod engine;
mod foundation;
mod render;
mod scene;
mod transform;

pub use crate::foundation::core::{Affine, Point, Rect, Rgba8, Rgba8Premul, SurfaceSize, Vec2};
pub use crate::foundation::error::{ClockError, ClockResult};

pub use crate::clock::format::{FALLBACK_TEXT, TimeFormatter};
pub use crate::clock::locale::{ClockLocale, PeriodPlacement};
pub use crate::clock::source::{FixedClock, SystemClock, WallClock};

pub use crate::transform::builder::TransformBuilder;
pub use crate::transform::camera::{Camera, CameraPose};

pub use crate::scene::geometry::SceneGeometry;

pub use crate::render::canvas::Canvas;
pub use crate::render::compositor::FrameCompositor;
pub use crate::render::cpu::{FrameRGBA, PixmapCanvas};
pub use crate::render::layers::LayeredTextRenderer;
pub use crate::render::paint::{FontRef, Glow, Layer, PaintMode, PaintStyle, TextAlign, TextStack};
pub use crate::render::recording::{DrawOp, RecordingCanvas};

pub use crate::assets::decode::{BackgroundImage, decode_image};
pub use crate::assets::resources::{ResourceManifest, ResourceProvider, StaticResources};

pub use crate::engine::clock_engine::ClockEngine;
pub use crate::engine::config::{EngineConfig, LayerConfig};
pub use crate::engine::headless::{DEFAULT_FRAME_HISTORY, PixmapHost, RecordingHost};
pub use crate::engine::host::{SurfaceHost, SurfaceLock};
pub use crate::engine::scheduler::{RedrawScheduler, SchedulerState};
pub use crate::engine::service::WallpaperService;
pub use crate::engine::timer::{TickId, TickQueue};
