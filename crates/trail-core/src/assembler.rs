//! Render-order assembly and hand-off to the external mesh builder.

use crate::edges::EdgePoints;
use crate::points::TrailPointBuffer;
use crate::style::{TextureRef, TrailStyle};
use glam::{Affine2, Vec2, Vec4};

/// Triangulated trail produced by a [`MeshBuilder`], in the emitter's local space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrailMesh {
    pub vertices: Vec<Vec2>,
    pub colors: Vec<Vec4>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

/// Interleaved GPU vertex matching `TRAIL_WGSL`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TrailVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl TrailMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Interleave into GPU vertices. Missing colors/uvs fall back to white / zero.
    pub fn interleaved(&self) -> Vec<TrailVertex> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| TrailVertex {
                pos: v.to_array(),
                uv: self.uvs.get(i).copied().unwrap_or(Vec2::ZERO).to_array(),
                color: self.colors.get(i).copied().unwrap_or(Vec4::ONE).to_array(),
            })
            .collect()
    }
}

/// Turns an ordered polyline into triangles. Joints, caps and UVs are its business.
pub trait MeshBuilder {
    fn build(&mut self, points: &[Vec2], style: &TrailStyle) -> TrailMesh;
}

pub trait CanvasSubmit {
    fn submit(&mut self, mesh: &TrailMesh, texture: Option<&TextureRef>);
}

#[derive(Clone, Debug, Default)]
pub struct GeometryAssembler {
    points: Vec<Vec2>,
}

impl GeometryAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the local-space polyline: leading point, recorded points newest to
    /// oldest without the oldest, then the trailing point.
    ///
    /// Empty when fewer than two points are recorded or the width is 0.
    pub fn assemble(
        &mut self,
        buffer: &TrailPointBuffer,
        edges: EdgePoints,
        world_to_local: Affine2,
        width: f32,
    ) -> &[Vec2] {
        self.points.clear();
        if buffer.len() < 2 || width == 0.0 {
            return &self.points;
        }
        if edges.leading.is_some() {
            self.points.push(Vec2::ZERO);
        }
        // Reversed for head-to-tail texture mapping.
        self.points.extend(
            buffer
                .iter()
                .skip(1)
                .rev()
                .map(|p| world_to_local.transform_point2(p.position)),
        );
        if let Some(tail) = edges.trailing {
            self.points.push(world_to_local.transform_point2(tail));
        }
        &self.points
    }

    /// Assemble, build and submit. Returns whether anything was submitted.
    pub fn draw(
        &mut self,
        buffer: &TrailPointBuffer,
        edges: EdgePoints,
        world_to_local: Affine2,
        style: &TrailStyle,
        builder: &mut dyn MeshBuilder,
        canvas: &mut dyn CanvasSubmit,
    ) -> bool {
        let points = self.assemble(buffer, edges, world_to_local, style.width());
        if points.is_empty() {
            return false;
        }
        let mesh = builder.build(points, style);
        if mesh.is_empty() {
            return false;
        }
        canvas.submit(&mesh, style.texture());
        true
    }
}
