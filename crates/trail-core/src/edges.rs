//! Synthetic head and tail points. Neither is stored in the buffer; both are
//! recomputed from the buffer on every draw.

use crate::constants::EDGE_POINT_MIN_DISTANCE;
use crate::points::TrailPointBuffer;
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgePoints {
    pub leading: Option<Vec2>,
    /// World-space tail point receding toward the second-oldest point.
    pub trailing: Option<Vec2>,
}

pub struct EdgeSynthesizer;

impl EdgeSynthesizer {
    /// Leading point, present only while emitting and clear of the newest point.
    pub fn leading_point(buffer: &TrailPointBuffer, live: Vec2, emitting: bool) -> Option<Vec2> {
        if !emitting {
            return None;
        }
        let newest = buffer.newest()?;
        (live.distance(newest.position) > EDGE_POINT_MIN_DISTANCE).then_some(live)
    }

    /// Interpolation factor from the second-oldest point (0) to the oldest point (1).
    ///
    /// Falls to 0 as the oldest point's age reaches `lifetime_sec`, so the tail shrinks
    /// continuously instead of jumping when that point expires.
    pub fn trailing_factor(buffer: &TrailPointBuffer, lifetime_sec: f64) -> Option<f32> {
        let oldest = buffer.oldest()?;
        buffer.second_oldest()?;
        let gap = buffer.end_age_diff();
        if !(gap.is_finite() && gap > 0.0) {
            return Some(0.0);
        }
        let t = (lifetime_sec - oldest.age) / gap;
        Some(t.clamp(0.0, 1.0) as f32)
    }

    pub fn trailing_position(buffer: &TrailPointBuffer, lifetime_sec: f64) -> Option<Vec2> {
        let t = Self::trailing_factor(buffer, lifetime_sec)?;
        let oldest = buffer.oldest()?.position;
        let next = buffer.second_oldest()?.position;
        Some(next.lerp(oldest, t))
    }

    /// Trailing point as rendered: dropped when it sits on top of the second-oldest point.
    pub fn trailing_point(buffer: &TrailPointBuffer, lifetime_sec: f64) -> Option<Vec2> {
        let tail = Self::trailing_position(buffer, lifetime_sec)?;
        let next = buffer.second_oldest()?.position;
        (tail.distance(next) > EDGE_POINT_MIN_DISTANCE).then_some(tail)
    }

    pub fn synthesize(
        buffer: &TrailPointBuffer,
        live: Vec2,
        emitting: bool,
        lifetime_sec: f64,
    ) -> EdgePoints {
        EdgePoints {
            leading: Self::leading_point(buffer, live, emitting),
            trailing: Self::trailing_point(buffer, lifetime_sec),
        }
    }
}
