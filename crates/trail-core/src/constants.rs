use glam::Vec4;

// Shared trail tuning constants. These are the defaults a freshly created trail starts from.

// Timing
pub const DEFAULT_LIFETIME_SEC: f64 = 1.0; // how long a recorded point stays alive
pub const DEFAULT_SEGMENT_LENGTH: f32 = 30.0; // minimum travel between recorded points

// Appearance
pub const DEFAULT_WIDTH: f32 = 10.0;
pub const DEFAULT_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
pub const DEFAULT_SHARP_LIMIT: f32 = 2.0;
pub const DEFAULT_ROUND_PRECISION: i32 = 8;
pub const MIN_ROUND_PRECISION: i32 = 1;

// Edge synthesis
// Leading/trailing points closer than this to their neighbour are dropped (world units).
pub const EDGE_POINT_MIN_DISTANCE: f32 = 1.0;
// Gap memory value used before the first expiry of a drain cycle.
pub const END_AGE_DIFF_RESET: f64 = 1.0;
