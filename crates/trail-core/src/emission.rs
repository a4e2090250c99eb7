//! Emission lifecycle: whether new points are recorded and when a drain cycle ends.

use crate::constants::EDGE_POINT_MIN_DISTANCE;
use crate::points::TrailPointBuffer;
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmissionState {
    /// Nothing recorded, nothing left to drain. Ticks are not needed.
    #[default]
    Idle,
    Emitting,
    /// Recording stopped; remaining points are aging out.
    Draining,
}

impl EmissionState {
    pub fn is_emitting(self) -> bool {
        matches!(self, EmissionState::Emitting)
    }

    pub fn is_processing(self) -> bool {
        !matches!(self, EmissionState::Idle)
    }
}

/// Notifications produced by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrailEvent {
    /// The buffer ran empty. Fired once per drain cycle.
    Finished,
}

#[derive(Clone, Debug, Default)]
pub struct EmissionController {
    state: EmissionState,
}

impl EmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EmissionState {
        self.state
    }

    pub fn is_emitting(&self) -> bool {
        self.state.is_emitting()
    }

    /// Switch recording on or off. Returns `false` if nothing changed.
    pub fn set_emitting(
        &mut self,
        enable: bool,
        buffer: &mut TrailPointBuffer,
        live: Vec2,
    ) -> bool {
        if enable == self.is_emitting() {
            return false;
        }
        if enable {
            buffer.reset(live);
            log::debug!("[trail] {:?} -> Emitting", self.state);
            self.state = EmissionState::Emitting;
            return true;
        }

        // Keep the travel since the last sample so the trail does not visibly truncate.
        if let Some(newest) = buffer.newest() {
            if live.distance(newest.position) > EDGE_POINT_MIN_DISTANCE {
                buffer.push(live);
            }
        }
        self.state = if buffer.is_empty() {
            EmissionState::Idle
        } else {
            EmissionState::Draining
        };
        log::debug!("[trail] Emitting -> {:?}", self.state);
        true
    }

    pub fn record(&self, buffer: &mut TrailPointBuffer, live: Vec2, segment_length: f32) -> bool {
        self.is_emitting() && buffer.maybe_record(live, segment_length)
    }

    /// Resolve the end of a tick. `had_points` is whether the buffer held anything
    /// before expiry ran.
    pub fn settle(
        &mut self,
        buffer: &TrailPointBuffer,
        had_points: bool,
        out_events: &mut Vec<TrailEvent>,
    ) {
        if !buffer.is_empty() {
            return;
        }
        if had_points {
            log::debug!("[trail] finished");
            out_events.push(TrailEvent::Finished);
        }
        if self.state == EmissionState::Draining {
            log::debug!("[trail] Draining -> Idle");
            self.state = EmissionState::Idle;
        }
    }
}
