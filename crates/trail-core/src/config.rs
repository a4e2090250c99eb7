//! Timing configuration. Invalid values are rejected and the previous value kept.

use crate::constants::{DEFAULT_LIFETIME_SEC, DEFAULT_SEGMENT_LENGTH};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("point lifetime must be greater than 0 (got {0})")]
    NonPositiveLifetime(f64),
    #[error("segment length must be greater than 0 (got {0})")]
    NonPositiveSegmentLength(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrailConfig {
    lifetime_sec: f64,
    segment_length: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            lifetime_sec: DEFAULT_LIFETIME_SEC,
            segment_length: DEFAULT_SEGMENT_LENGTH,
        }
    }
}

impl TrailConfig {
    pub fn new(lifetime_sec: f64, segment_length: f32) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.set_lifetime(lifetime_sec)?;
        config.set_segment_length(segment_length)?;
        Ok(config)
    }

    pub fn lifetime(&self) -> f64 {
        self.lifetime_sec
    }

    pub fn set_lifetime(&mut self, lifetime_sec: f64) -> Result<(), ConfigError> {
        // NaN fails the comparison as well
        if !(lifetime_sec > 0.0 && lifetime_sec.is_finite()) {
            log::warn!("[config] rejected lifetime {}", lifetime_sec);
            return Err(ConfigError::NonPositiveLifetime(lifetime_sec));
        }
        self.lifetime_sec = lifetime_sec;
        Ok(())
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    pub fn set_segment_length(&mut self, segment_length: f32) -> Result<(), ConfigError> {
        if !(segment_length > 0.0 && segment_length.is_finite()) {
            log::warn!("[config] rejected segment length {}", segment_length);
            return Err(ConfigError::NonPositiveSegmentLength(segment_length));
        }
        self.segment_length = segment_length;
        Ok(())
    }
}
