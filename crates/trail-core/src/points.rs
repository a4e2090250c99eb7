//! Timestamped history points and the buffer that ages and expires them.
//!
//! The buffer is ordered oldest-first: index 0 carries the largest age and the
//! back of the buffer is the most recently recorded point. Because every point is
//! aged by the same delta each tick, age is monotonic along that ordering and
//! expiry is always a contiguous prefix.

use crate::constants::END_AGE_DIFF_RESET;
use glam::Vec2;
use std::collections::{vec_deque, VecDeque};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub age: f64,
}

impl TrailPoint {
    pub fn new(position: Vec2) -> Self {
        Self { position, age: 0.0 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Expiry {
    pub removed: usize,
    pub emptied: bool,
}

#[derive(Clone, Debug)]
pub struct TrailPointBuffer {
    points: VecDeque<TrailPoint>,
    last_recorded: Vec2,
    end_age_diff: f64,
}

impl Default for TrailPointBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailPointBuffer {
    pub fn new() -> Self {
        Self {
            points: VecDeque::new(),
            last_recorded: Vec2::ZERO,
            end_age_diff: END_AGE_DIFF_RESET,
        }
    }

    /// Drop all history and start a new cycle anchored at `anchor`.
    pub fn reset(&mut self, anchor: Vec2) {
        self.points.clear();
        self.last_recorded = anchor;
        self.end_age_diff = END_AGE_DIFF_RESET;
    }

    /// Record `live` if the buffer is empty or the emitter travelled more than
    /// `segment_length` since the last recorded point. Returns whether a point was added.
    pub fn maybe_record(&mut self, live: Vec2, segment_length: f32) -> bool {
        if self.points.is_empty() || self.last_recorded.distance(live) > segment_length {
            self.push(live);
            true
        } else {
            false
        }
    }

    pub fn push(&mut self, position: Vec2) {
        self.points.push_back(TrailPoint::new(position));
        self.last_recorded = position;
    }

    pub fn age(&mut self, delta_sec: f64) {
        for p in self.points.iter_mut() {
            p.age += delta_sec;
        }
    }

    /// Remove the oldest points whose age strictly exceeds `lifetime_sec`.
    pub fn expire_stale(&mut self, lifetime_sec: f64) -> Expiry {
        let removed = self
            .points
            .iter()
            .take_while(|p| p.age > lifetime_sec)
            .count();
        if removed > 0 {
            self.points.drain(..removed);
            if self.points.len() >= 2 {
                self.end_age_diff = self.points[0].age - self.points[1].age;
            }
        }
        let emptied = self.points.is_empty();
        if emptied {
            self.end_age_diff = END_AGE_DIFF_RESET;
        }
        Expiry { removed, emptied }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn oldest(&self) -> Option<&TrailPoint> {
        self.points.front()
    }

    pub fn second_oldest(&self) -> Option<&TrailPoint> {
        self.points.get(1)
    }

    pub fn newest(&self) -> Option<&TrailPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, TrailPoint> {
        self.points.iter()
    }

    pub fn last_recorded(&self) -> Vec2 {
        self.last_recorded
    }

    /// Age gap between the two oldest points captured at the latest expiry.
    pub fn end_age_diff(&self) -> f64 {
        self.end_age_diff
    }
}
