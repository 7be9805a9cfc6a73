//! The rendering backend boundary.
//!
//! The core never draws pixels itself: it hands polylines, text, markers,
//! and images to a [`RenderSurface`] and gets back opaque handles it can
//! later remove. Any 2-D vector canvas with these primitives and an
//! axis-limits query satisfies the contract.

use crate::core::geo::{PlotPoint, PlotRect};
use crate::core::params::Resolution;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a drawn overlay, issued by the surface.
///
/// A handle is live from the draw call that returned it until the single
/// `remove` that detaches it; the overlay manager guarantees exactly one
/// removal per handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayHandle(pub u64);

/// RGBA color for overlay primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }
}

/// Stroke style for polylines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    /// On/off dash lengths in points; empty means solid.
    pub dashes: Vec<f32>,
}

impl LineStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dashes: Vec::new(),
        }
    }

    pub fn dashed(color: Color, width: f32, on: f32, off: f32) -> Self {
        Self {
            color,
            width,
            dashes: vec![on, off],
        }
    }
}

/// Where a text overlay is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TextAnchor {
    /// Plot (data) coordinates; moves with pan/zoom.
    Data(PlotPoint),
    /// Fraction of the axes box, (0, 0) lower-left to (1, 1) upper-right;
    /// stays put while the view moves. Used by the cursor readout.
    AxesFraction(f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextRotation {
    #[default]
    Horizontal,
    Vertical,
}

/// Translucent box behind a text overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub alpha: f32,
    pub pad: f32,
    pub line_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f32,
    pub monospace: bool,
    pub color: Color,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub rotation: TextRotation,
    pub boxed: Option<TextBox>,
}

impl TextStyle {
    pub fn monospace(font_size: f32) -> Self {
        Self {
            font_size,
            monospace: true,
            color: Color::BLACK,
            h_align: HAlign::default(),
            v_align: VAlign::default(),
            rotation: TextRotation::default(),
            boxed: None,
        }
    }
}

/// Point-marker style for annotations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: Color,
    pub size: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::RED,
            size: 1.0,
        }
    }
}

/// Base imagery selection for the map background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseImagery {
    /// Startup/empty state: a plain stock background, no map data.
    Placeholder,
    BlueMarble,
    /// Coral continents over aqua lakes.
    FilledContinents,
}

/// Everything the surface needs to paint the base map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseMapStyle {
    pub imagery: BaseImagery,
    pub coastlines: bool,
    pub state_borders: bool,
    pub country_borders: bool,
    /// Minimum feature area (km²) worth rasterizing.
    pub area_threshold: f64,
    pub resolution: Resolution,
}

impl BaseMapStyle {
    pub fn placeholder() -> Self {
        Self {
            imagery: BaseImagery::Placeholder,
            coastlines: false,
            state_borders: false,
            country_borders: false,
            area_threshold: 10000.0,
            resolution: Resolution::Crude,
        }
    }
}

/// The drawing backend the controller talks to.
///
/// Implementations must hand out unique handles per draw call and tolerate
/// `remove` of a handle they no longer know (idempotent detach). Redraw
/// requests are cheap hints; the backend coalesces them.
pub trait RenderSurface {
    /// Current axis limits in plot coordinates.
    fn view_limits(&self) -> PlotRect;

    fn draw_polyline(&mut self, points: &[PlotPoint], style: &LineStyle) -> Result<OverlayHandle>;

    fn draw_text(&mut self, anchor: TextAnchor, text: &str, style: &TextStyle)
        -> Result<OverlayHandle>;

    fn draw_marker(&mut self, at: PlotPoint, style: &MarkerStyle) -> Result<OverlayHandle>;

    /// Draws an encoded raster (PNG bytes) centered at a plot position.
    fn draw_image(&mut self, at: PlotPoint, png: &[u8], zoom: f64, alpha: f32)
        -> Result<OverlayHandle>;

    /// Replaces the text of an existing text overlay in place.
    fn update_text(&mut self, handle: OverlayHandle, text: &str) -> Result<()>;

    /// Detaches one overlay from the canvas.
    fn remove(&mut self, handle: OverlayHandle) -> Result<()>;

    /// Paints the base map (imagery, coastlines, borders) below all overlays.
    fn draw_base_map(&mut self, style: &BaseMapStyle) -> Result<()>;

    /// Wipes the base map and every overlay the backend still holds.
    fn clear_base(&mut self);

    /// Schedules a repaint; safe to call redundantly.
    fn request_redraw(&mut self);
}
