// Sanity checks for the default tuning constants and their relationships.

use trail_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn defaults_are_valid_configuration() {
    assert!(DEFAULT_LIFETIME_SEC > 0.0);
    assert!(DEFAULT_SEGMENT_LENGTH > 0.0);
    assert!(DEFAULT_WIDTH >= 0.0);
    assert!(DEFAULT_SHARP_LIMIT >= 0.0);
    assert!(DEFAULT_ROUND_PRECISION >= MIN_ROUND_PRECISION);
    assert!(TrailConfig::new(DEFAULT_LIFETIME_SEC, DEFAULT_SEGMENT_LENGTH).is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn edge_threshold_is_below_segment_length() {
    // otherwise a freshly recorded point could never get a leading point ahead of it
    assert!(EDGE_POINT_MIN_DISTANCE > 0.0);
    assert!(EDGE_POINT_MIN_DISTANCE < DEFAULT_SEGMENT_LENGTH);
    assert!(END_AGE_DIFF_RESET > 0.0);
}
