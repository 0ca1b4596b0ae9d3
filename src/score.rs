//! Time-based scoring
//!
//! Faster runs score more. Every hundredth of a second costs one point, down
//! to a floor of 1000.

/// Points for a perfect (instant) run
pub const MAX_POINTS: i64 = 10_000;
/// Points never drop below this for a completed run
pub const MIN_POINTS: i64 = 1_000;
/// Points lost per second of play
pub const POINTS_PER_SECOND: f64 = 100.0;

/// Points awarded for completing the level in `elapsed_seconds`.
///
/// Negative elapsed time is not rejected and scores above `MAX_POINTS`.
pub fn calculate_points(elapsed_seconds: f64) -> i64 {
    let penalty = (elapsed_seconds * POINTS_PER_SECOND).floor() as i64;
    (MAX_POINTS - penalty).max(MIN_POINTS)
}
