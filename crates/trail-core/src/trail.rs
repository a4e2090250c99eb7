//! The trail node: owns the point buffer, emission state, configuration and style,
//! and is driven by the host through [`Trail::tick`] and [`Trail::draw`].

use crate::assembler::{CanvasSubmit, GeometryAssembler, MeshBuilder};
use crate::config::{ConfigError, TrailConfig};
use crate::edges::{EdgePoints, EdgeSynthesizer};
use crate::emission::{EmissionController, EmissionState, TrailEvent};
use crate::points::TrailPointBuffer;
use crate::redraw::RedrawHandle;
use crate::style::{
    ColorGradient, LineCapMode, LineJointMode, LineTextureMode, TextureRef, TrailStyle,
    WidthCurve,
};
use glam::{Affine2, Vec2, Vec4};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub recorded: bool,
    pub expired: usize,
    pub finished: bool,
}

#[derive(Debug)]
pub struct Trail {
    config: TrailConfig,
    style: TrailStyle,
    buffer: TrailPointBuffer,
    emission: EmissionController,
    assembler: GeometryAssembler,
    global_transform: Affine2,
    redraw: RedrawHandle,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TrailConfig::default(), TrailStyle::default())
    }
}

impl Trail {
    /// Create a trail at the world origin. Emission starts armed.
    pub fn new(config: TrailConfig, style: TrailStyle) -> Self {
        Self::with_transform(config, style, Affine2::IDENTITY)
    }

    pub fn with_transform(
        config: TrailConfig,
        style: TrailStyle,
        global_transform: Affine2,
    ) -> Self {
        let mut trail = Self {
            config,
            style,
            buffer: TrailPointBuffer::new(),
            emission: EmissionController::new(),
            assembler: GeometryAssembler::new(),
            global_transform,
            redraw: RedrawHandle::new(),
        };
        trail.set_emitting(true);
        trail
    }

    // ---------------- Emission ----------------

    pub fn set_emitting(&mut self, enable: bool) {
        let live = self.global_position();
        if self.emission.set_emitting(enable, &mut self.buffer, live) {
            self.redraw.request();
        }
    }

    pub fn is_emitting(&self) -> bool {
        self.emission.is_emitting()
    }

    pub fn state(&self) -> EmissionState {
        self.emission.state()
    }

    /// Whether the host should keep scheduling ticks.
    pub fn is_processing(&self) -> bool {
        self.emission.state().is_processing()
    }

    // ---------------- Emitter placement ----------------

    pub fn global_transform(&self) -> Affine2 {
        self.global_transform
    }

    pub fn set_global_transform(&mut self, transform: Affine2) {
        self.global_transform = transform;
    }

    pub fn global_position(&self) -> Vec2 {
        self.global_transform.translation
    }

    pub fn set_global_position(&mut self, position: Vec2) {
        self.global_transform.translation = position;
    }

    // ---------------- Per-frame update ----------------

    /// Advance the trail by `delta_sec` with the emitter now at `global_transform`.
    ///
    /// Records, ages and expires in that order, then requests a redraw. Finished
    /// notifications are appended to `out_events`.
    pub fn tick(
        &mut self,
        delta_sec: f64,
        global_transform: Affine2,
        out_events: &mut Vec<TrailEvent>,
    ) -> TickReport {
        self.global_transform = global_transform;
        let live = self.global_position();

        let recorded = self
            .emission
            .record(&mut self.buffer, live, self.config.segment_length());
        let had_points = !self.buffer.is_empty();

        self.buffer.age(delta_sec);
        let expiry = self.buffer.expire_stale(self.config.lifetime());
        if expiry.removed > 0 {
            log::trace!(
                "[trail] expired {} point(s), {} left",
                expiry.removed,
                self.buffer.len()
            );
        }

        let before = out_events.len();
        self.emission.settle(&self.buffer, had_points, out_events);
        self.redraw.request();

        TickReport {
            recorded,
            expired: expiry.removed,
            finished: out_events.len() > before,
        }
    }

    pub fn edge_points(&self) -> EdgePoints {
        EdgeSynthesizer::synthesize(
            &self.buffer,
            self.global_position(),
            self.is_emitting(),
            self.config.lifetime(),
        )
    }

    /// Local-space polyline that the next draw hands to the mesh builder.
    pub fn render_points(&mut self) -> Vec<Vec2> {
        let edges = self.edge_points();
        let world_to_local = self.global_transform.inverse();
        self.assembler
            .assemble(&self.buffer, edges, world_to_local, self.style.width())
            .to_vec()
    }

    /// Build and submit geometry. Clears any pending redraw request.
    /// Returns whether a mesh was submitted.
    pub fn draw(&mut self, builder: &mut dyn MeshBuilder, canvas: &mut dyn CanvasSubmit) -> bool {
        self.redraw.take();
        let edges = self.edge_points();
        let world_to_local = self.global_transform.inverse();
        self.assembler.draw(
            &self.buffer,
            edges,
            world_to_local,
            &self.style,
            builder,
            canvas,
        )
    }

    pub fn draw_if_requested(
        &mut self,
        builder: &mut dyn MeshBuilder,
        canvas: &mut dyn CanvasSubmit,
    ) -> bool {
        if !self.redraw.is_pending() {
            return false;
        }
        self.draw(builder, canvas)
    }

    pub fn redraw_handle(&self) -> RedrawHandle {
        self.redraw.clone()
    }

    pub fn buffer(&self) -> &TrailPointBuffer {
        &self.buffer
    }

    // ---------------- Configuration ----------------

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn lifetime(&self) -> f64 {
        self.config.lifetime()
    }

    pub fn set_lifetime(&mut self, lifetime_sec: f64) -> Result<(), ConfigError> {
        self.config.set_lifetime(lifetime_sec)
    }

    pub fn segment_length(&self) -> f32 {
        self.config.segment_length()
    }

    pub fn set_segment_length(&mut self, segment_length: f32) -> Result<(), ConfigError> {
        self.config.set_segment_length(segment_length)
    }

    // ---------------- Style ----------------

    pub fn style(&self) -> &TrailStyle {
        &self.style
    }

    /// Edit the style in place and request a redraw.
    pub fn update_style(&mut self, f: impl FnOnce(&mut TrailStyle)) {
        f(&mut self.style);
        self.redraw.request();
    }

    pub fn width(&self) -> f32 {
        self.style.width()
    }

    pub fn set_width(&mut self, width: f32) {
        self.update_style(|s| s.set_width(width));
    }

    pub fn set_curve(&mut self, curve: Option<Rc<dyn WidthCurve>>) {
        self.update_style(|s| s.set_curve(curve));
    }

    pub fn default_color(&self) -> Vec4 {
        self.style.default_color()
    }

    pub fn set_default_color(&mut self, color: Vec4) {
        self.update_style(|s| s.set_default_color(color));
    }

    pub fn set_gradient(&mut self, gradient: Option<Rc<dyn ColorGradient>>) {
        self.update_style(|s| s.set_gradient(gradient));
    }

    pub fn set_texture(&mut self, texture: Option<TextureRef>) {
        self.update_style(|s| s.set_texture(texture));
    }

    pub fn set_texture_mode(&mut self, mode: LineTextureMode) {
        self.update_style(|s| s.set_texture_mode(mode));
    }

    pub fn set_joint_mode(&mut self, mode: LineJointMode) {
        self.update_style(|s| s.set_joint_mode(mode));
    }

    pub fn set_begin_cap_mode(&mut self, mode: LineCapMode) {
        self.update_style(|s| s.set_begin_cap_mode(mode));
    }

    pub fn set_end_cap_mode(&mut self, mode: LineCapMode) {
        self.update_style(|s| s.set_end_cap_mode(mode));
    }

    pub fn sharp_limit(&self) -> f32 {
        self.style.sharp_limit()
    }

    pub fn set_sharp_limit(&mut self, limit: f32) {
        self.update_style(|s| s.set_sharp_limit(limit));
    }

    pub fn round_precision(&self) -> i32 {
        self.style.round_precision()
    }

    pub fn set_round_precision(&mut self, precision: i32) {
        self.update_style(|s| s.set_round_precision(precision));
    }
}
