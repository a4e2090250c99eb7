// Plain triangle-strip mesh builder for the demo. No joints or caps: each point
// gets one averaged normal.

use glam::{Vec2, Vec4};
use trail_core::{ColorGradient, LineTextureMode, MeshBuilder, TrailMesh, TrailStyle, WidthCurve};

#[derive(Default)]
pub struct StripBuilder {
    lengths: Vec<f32>,
}

impl MeshBuilder for StripBuilder {
    fn build(&mut self, points: &[Vec2], style: &TrailStyle) -> TrailMesh {
        let mut mesh = TrailMesh::default();
        if points.len() < 2 || style.width() <= 0.0 {
            return mesh;
        }

        self.lengths.clear();
        self.lengths.push(0.0);
        let mut total = 0.0f32;
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            self.lengths.push(total);
        }
        if total <= f32::EPSILON {
            return mesh;
        }

        let last = points.len() - 1;
        for (i, p) in points.iter().enumerate() {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(last)];
            let normal = (next - prev).normalize_or_zero().perp();

            let offset = self.lengths[i] / total;
            let scale = style.curve().map_or(1.0, |c| c.sample(offset));
            let half = style.width() * 0.5 * scale.max(0.0);
            let color = style
                .gradient()
                .map_or(style.default_color(), |g| g.sample(offset));
            let u = match style.texture_mode() {
                LineTextureMode::Tile => {
                    self.lengths[i] / (style.width() * style.tile_aspect().unwrap_or(1.0))
                }
                _ => offset,
            };

            mesh.vertices.push(*p + normal * half);
            mesh.vertices.push(*p - normal * half);
            mesh.colors.push(color);
            mesh.colors.push(color);
            mesh.uvs.push(Vec2::new(u, 0.0));
            mesh.uvs.push(Vec2::new(u, 1.0));
        }

        for seg in 0..last as u32 {
            let a = seg * 2;
            mesh.indices
                .extend_from_slice(&[a, a + 1, a + 2, a + 1, a + 3, a + 2]);
        }
        mesh
    }
}

/// Width falls off linearly from head to tail.
#[derive(Debug)]
pub struct LinearTaper {
    pub tail_scale: f32,
}

impl WidthCurve for LinearTaper {
    fn sample(&self, offset: f32) -> f32 {
        1.0 + (self.tail_scale - 1.0) * offset.clamp(0.0, 1.0)
    }
}

#[derive(Debug)]
pub struct TwoStopGradient {
    pub head: Vec4,
    pub tail: Vec4,
}

impl ColorGradient for TwoStopGradient {
    fn sample(&self, offset: f32) -> Vec4 {
        self.head.lerp(self.tail, offset.clamp(0.0, 1.0))
    }
}
