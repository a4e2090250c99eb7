//! Appearance settings handed unchanged to the mesh builder on every draw.
//!
//! The core never interprets these beyond clamping. Curves, gradients and
//! textures are shared resources owned by the host.

use crate::constants::{
    DEFAULT_COLOR, DEFAULT_ROUND_PRECISION, DEFAULT_SHARP_LIMIT, DEFAULT_WIDTH,
    MIN_ROUND_PRECISION,
};
use glam::{Vec2, Vec4};
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJointMode {
    #[default]
    Sharp,
    Bevel,
    Round,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCapMode {
    #[default]
    None,
    Box,
    Round,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineTextureMode {
    #[default]
    None,
    Tile,
    Stretch,
}

/// Width multiplier sampled along the trail, `offset` in \[0, 1\] from head to tail.
pub trait WidthCurve: fmt::Debug {
    fn sample(&self, offset: f32) -> f32;
}

/// Color sampled along the trail, `offset` in \[0, 1\] from head to tail.
pub trait ColorGradient: fmt::Debug {
    fn sample(&self, offset: f32) -> Vec4;
}

/// Opaque handle to a host texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureRef {
    pub id: u64,
    pub size: Vec2,
}

impl TextureRef {
    pub fn new(id: u64, size: Vec2) -> Self {
        Self { id, size }
    }

    /// Width over height; 1.0 for a degenerate size.
    pub fn aspect(&self) -> f32 {
        if self.size.y > 0.0 {
            self.size.x / self.size.y
        } else {
            1.0
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrailStyle {
    width: f32,
    curve: Option<Rc<dyn WidthCurve>>,
    default_color: Vec4,
    gradient: Option<Rc<dyn ColorGradient>>,
    texture: Option<TextureRef>,
    texture_mode: LineTextureMode,
    joint_mode: LineJointMode,
    begin_cap_mode: LineCapMode,
    end_cap_mode: LineCapMode,
    sharp_limit: f32,
    round_precision: i32,
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            curve: None,
            default_color: DEFAULT_COLOR,
            gradient: None,
            texture: None,
            texture_mode: LineTextureMode::default(),
            joint_mode: LineJointMode::default(),
            begin_cap_mode: LineCapMode::default(),
            end_cap_mode: LineCapMode::default(),
            sharp_limit: DEFAULT_SHARP_LIMIT,
            round_precision: DEFAULT_ROUND_PRECISION,
        }
    }
}

impl TrailStyle {
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Negative (and NaN) widths clamp to 0.
    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
    }

    pub fn curve(&self) -> Option<&Rc<dyn WidthCurve>> {
        self.curve.as_ref()
    }

    pub fn set_curve(&mut self, curve: Option<Rc<dyn WidthCurve>>) {
        self.curve = curve;
    }

    pub fn default_color(&self) -> Vec4 {
        self.default_color
    }

    pub fn set_default_color(&mut self, color: Vec4) {
        self.default_color = color;
    }

    pub fn gradient(&self) -> Option<&Rc<dyn ColorGradient>> {
        self.gradient.as_ref()
    }

    pub fn set_gradient(&mut self, gradient: Option<Rc<dyn ColorGradient>>) {
        self.gradient = gradient;
    }

    pub fn texture(&self) -> Option<&TextureRef> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Option<TextureRef>) {
        self.texture = texture;
    }

    pub fn texture_mode(&self) -> LineTextureMode {
        self.texture_mode
    }

    pub fn set_texture_mode(&mut self, mode: LineTextureMode) {
        self.texture_mode = mode;
    }

    pub fn joint_mode(&self) -> LineJointMode {
        self.joint_mode
    }

    pub fn set_joint_mode(&mut self, mode: LineJointMode) {
        self.joint_mode = mode;
    }

    pub fn begin_cap_mode(&self) -> LineCapMode {
        self.begin_cap_mode
    }

    pub fn set_begin_cap_mode(&mut self, mode: LineCapMode) {
        self.begin_cap_mode = mode;
    }

    pub fn end_cap_mode(&self) -> LineCapMode {
        self.end_cap_mode
    }

    pub fn set_end_cap_mode(&mut self, mode: LineCapMode) {
        self.end_cap_mode = mode;
    }

    pub fn sharp_limit(&self) -> f32 {
        self.sharp_limit
    }

    pub fn set_sharp_limit(&mut self, limit: f32) {
        self.sharp_limit = limit.max(0.0);
    }

    pub fn round_precision(&self) -> i32 {
        self.round_precision
    }

    pub fn set_round_precision(&mut self, precision: i32) {
        self.round_precision = precision.max(MIN_ROUND_PRECISION);
    }

    pub fn tile_aspect(&self) -> Option<f32> {
        self.texture.map(|t| t.aspect())
    }
}
