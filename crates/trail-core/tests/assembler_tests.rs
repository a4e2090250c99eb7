// Tests for render-order assembly and the mesh builder / submission hand-off.

use glam::{Affine2, Vec2, Vec4};
use std::cell::RefCell;
use std::rc::Rc;
use trail_core::*;

fn line_buffer(xs: &[f32], step_age: f64) -> TrailPointBuffer {
    let mut buf = TrailPointBuffer::new();
    for &x in xs {
        buf.push(Vec2::new(x, 0.0));
        buf.age(step_age);
    }
    buf
}

fn approx(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < 1e-4
}

/// Records what it was asked to build and returns a single triangle (or nothing).
#[derive(Default)]
struct RecordingBuilder {
    calls: Vec<Vec<Vec2>>,
    widths: Vec<f32>,
    produce: bool,
}

impl MeshBuilder for RecordingBuilder {
    fn build(&mut self, points: &[Vec2], style: &TrailStyle) -> TrailMesh {
        self.calls.push(points.to_vec());
        self.widths.push(style.width());
        if !self.produce {
            return TrailMesh::default();
        }
        TrailMesh {
            vertices: points.iter().take(3).copied().collect(),
            colors: vec![style.default_color(); 3],
            uvs: vec![Vec2::ZERO; 3],
            indices: vec![0, 1, 2],
        }
    }
}

#[derive(Default)]
struct RecordingCanvas {
    submitted: Vec<(usize, Option<TextureRef>)>,
}

impl CanvasSubmit for RecordingCanvas {
    fn submit(&mut self, mesh: &TrailMesh, texture: Option<&TextureRef>) {
        self.submitted.push((mesh.indices.len(), texture.copied()));
    }
}

#[test]
fn assembles_head_to_tail_without_the_oldest_point() {
    let buf = line_buffer(&[0.0, 40.0, 80.0, 120.0], 0.1);
    let edges = EdgePoints {
        leading: Some(Vec2::new(130.0, 0.0)),
        trailing: Some(Vec2::new(20.0, 0.0)),
    };
    let world_to_local = Affine2::from_translation(Vec2::new(130.0, 0.0)).inverse();
    let mut assembler = GeometryAssembler::new();
    let pts = assembler.assemble(&buf, edges, world_to_local, 10.0).to_vec();

    let expected = [
        Vec2::ZERO,
        Vec2::new(-10.0, 0.0),
        Vec2::new(-50.0, 0.0),
        Vec2::new(-90.0, 0.0),
        Vec2::new(-110.0, 0.0),
    ];
    assert_eq!(pts.len(), expected.len());
    for (got, want) in pts.iter().zip(expected) {
        assert!(approx(*got, want), "{got} != {want}");
    }
}

#[test]
fn omits_missing_edges() {
    let buf = line_buffer(&[0.0, 40.0, 80.0], 0.1);
    let mut assembler = GeometryAssembler::new();
    let pts = assembler.assemble(&buf, EdgePoints::default(), Affine2::IDENTITY, 10.0);
    assert_eq!(pts, &[Vec2::new(80.0, 0.0), Vec2::new(40.0, 0.0)]);
}

#[test]
fn converts_through_rotated_emitter() {
    let mut buf = TrailPointBuffer::new();
    buf.push(Vec2::new(0.0, 0.0));
    buf.push(Vec2::new(100.0, 10.0));

    // emitter at (100, 0), rotated a quarter turn counter-clockwise
    let emitter =
        Affine2::from_angle_translation(std::f32::consts::FRAC_PI_2, Vec2::new(100.0, 0.0));
    let mut assembler = GeometryAssembler::new();
    let pts = assembler.assemble(&buf, EdgePoints::default(), emitter.inverse(), 4.0);
    assert_eq!(pts.len(), 1);
    assert!(approx(pts[0], Vec2::new(10.0, 0.0)), "{}", pts[0]);
}

#[test]
fn nothing_to_assemble_below_two_points_or_at_zero_width() {
    let mut assembler = GeometryAssembler::new();
    let one = line_buffer(&[0.0], 0.1);
    let edges = EdgePoints {
        leading: Some(Vec2::new(50.0, 0.0)),
        trailing: None,
    };
    assert!(assembler.assemble(&one, edges, Affine2::IDENTITY, 10.0).is_empty());

    let two = line_buffer(&[0.0, 40.0], 0.1);
    assert!(assembler.assemble(&two, edges, Affine2::IDENTITY, 0.0).is_empty());
    assert_eq!(assembler.assemble(&two, edges, Affine2::IDENTITY, 1.0).len(), 2);
}

#[test]
fn empty_mesh_is_not_submitted() {
    let buf = line_buffer(&[0.0, 40.0, 80.0], 0.1);
    let style = TrailStyle::default();
    let mut builder = RecordingBuilder::default();
    let mut canvas = RecordingCanvas::default();
    let mut assembler = GeometryAssembler::new();
    let drawn = assembler.draw(
        &buf,
        EdgePoints::default(),
        Affine2::IDENTITY,
        &style,
        &mut builder,
        &mut canvas,
    );
    assert!(!drawn);
    assert_eq!(builder.calls.len(), 1);
    assert!(canvas.submitted.is_empty());
}

#[test]
fn zero_width_skips_the_builder_entirely() {
    let buf = line_buffer(&[0.0, 40.0, 80.0], 0.1);
    let mut style = TrailStyle::default();
    style.set_width(0.0);
    let mut builder = RecordingBuilder {
        produce: true,
        ..Default::default()
    };
    let mut canvas = RecordingCanvas::default();
    let mut assembler = GeometryAssembler::new();
    assert!(!assembler.draw(
        &buf,
        EdgePoints::default(),
        Affine2::IDENTITY,
        &style,
        &mut builder,
        &mut canvas,
    ));
    assert!(builder.calls.is_empty());
}

#[test]
fn trail_draw_passes_style_and_texture_through() {
    let mut trail = Trail::default();
    let mut events = Vec::new();
    for i in 0..30 {
        let emitter = Affine2::from_translation(Vec2::new(8.0 * i as f32, 0.0));
        trail.tick(1.0 / 60.0, emitter, &mut events);
    }
    let texture = TextureRef::new(7, Vec2::new(64.0, 16.0));
    trail.set_width(6.0);
    trail.set_texture(Some(texture));
    trail.set_default_color(Vec4::new(1.0, 0.5, 0.0, 1.0));

    let mut builder = RecordingBuilder {
        produce: true,
        ..Default::default()
    };
    let mut canvas = RecordingCanvas::default();
    assert!(trail.draw(&mut builder, &mut canvas));
    assert_eq!(builder.widths, vec![6.0]);
    assert_eq!(canvas.submitted, vec![(3, Some(texture))]);
    assert_eq!(trail.style().tile_aspect(), Some(4.0));

    // the builder sees exactly the render points
    assert_eq!(builder.calls[0], trail.render_points());
    // leading point at the emitter's local origin
    assert_eq!(builder.calls[0][0], Vec2::ZERO);
}

#[derive(Debug)]
struct Taper {
    redraw: RefCell<Option<RedrawHandle>>,
    scale: RefCell<f32>,
}

impl Taper {
    fn set_scale(&self, scale: f32) {
        *self.scale.borrow_mut() = scale;
        if let Some(handle) = self.redraw.borrow().as_ref() {
            handle.request();
        }
    }
}

impl WidthCurve for Taper {
    fn sample(&self, offset: f32) -> f32 {
        (1.0 - offset) * *self.scale.borrow()
    }
}

#[test]
fn redraw_requests_collapse_and_resources_can_request() {
    let mut trail = Trail::default();
    let mut builder = RecordingBuilder {
        produce: true,
        ..Default::default()
    };
    let mut canvas = RecordingCanvas::default();
    let mut events = Vec::new();
    for i in 0..20 {
        let emitter = Affine2::from_translation(Vec2::new(10.0 * i as f32, 0.0));
        trail.tick(1.0 / 60.0, emitter, &mut events);
    }
    // twenty ticks, one draw
    assert!(trail.draw_if_requested(&mut builder, &mut canvas));
    assert!(!trail.draw_if_requested(&mut builder, &mut canvas));

    let curve = Rc::new(Taper {
        redraw: RefCell::new(None),
        scale: RefCell::new(1.0),
    });
    trail.set_curve(Some(curve.clone() as Rc<dyn WidthCurve>));
    assert!(trail.draw_if_requested(&mut builder, &mut canvas));

    *curve.redraw.borrow_mut() = Some(trail.redraw_handle());
    curve.set_scale(2.0);
    curve.set_scale(3.0);
    assert!(trail.draw_if_requested(&mut builder, &mut canvas));
    assert!(!trail.draw_if_requested(&mut builder, &mut canvas));
    assert_eq!(canvas.submitted.len(), 3);
    assert_eq!(trail.style().curve().unwrap().sample(0.5), 1.5);
}

#[test]
fn interleaved_vertices_fill_defaults() {
    let mesh = TrailMesh {
        vertices: vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)],
        colors: vec![Vec4::new(0.0, 0.0, 1.0, 1.0)],
        uvs: vec![],
        indices: vec![0, 1, 0],
    };
    let verts = mesh.interleaved();
    assert_eq!(verts.len(), 2);
    assert_eq!(verts[0].color, [0.0, 0.0, 1.0, 1.0]);
    assert_eq!(verts[1].color, [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(verts[1].pos, [3.0, 4.0]);
    assert_eq!(verts[1].uv, [0.0, 0.0]);
    assert_eq!(bytemuck::cast_slice::<TrailVertex, u8>(&verts).len(), 2 * 32);
}
