use glam::Vec4;

// Demo tuning constants for the native front-end.

// Trail timing (seconds / pixels)
pub const TRAIL_LIFETIME_SEC: f64 = 0.8;
pub const TRAIL_SEGMENT_LENGTH: f32 = 12.0;

// Trail appearance (pixels)
pub const TRAIL_WIDTH: f32 = 22.0;
pub const HEAD_COLOR: Vec4 = Vec4::new(1.0, 0.85, 0.35, 1.0); // warm yellow
pub const TAIL_COLOR: Vec4 = Vec4::new(0.25, 0.35, 0.95, 0.0); // fades out to blue

// Autopilot Lissajous path, as a fraction of the window size
pub const AUTOPILOT_AMPLITUDE: f32 = 0.35;
pub const AUTOPILOT_FREQ_X: f32 = 0.9; // cycles per second
pub const AUTOPILOT_FREQ_Y: f32 = 1.3;

// Longest frame step fed to the trail; avoids a mass expiry after a stall.
pub const MAX_FRAME_DT_SEC: f64 = 0.1;

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.04,
    a: 1.0,
};
