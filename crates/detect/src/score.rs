//! Per-category score functions
//!
//! Pure functions over window contents producing scores in [0, 1].
//! Window-length minimums are guards, not errors: short histories yield
//! the neutral score silently.

use signal_stats::{clamp01, mean, Extent2D, WindowStats};

/// Floats per pose feature vector: 9 key points x (x, y, z)
pub const POSE_FEATURE_LEN: usize = 27;

/// One behavior pose feature sample
pub type PoseFeature = [f64; POSE_FEATURE_LEN];

// Feature layout: nose, left eye, right eye, left shoulder, right
// shoulder, left hip, right hip, left ankle, right ankle.
const NOSE_X: usize = 0;
const LEFT_SHOULDER_Y: usize = 10;
const RIGHT_SHOULDER_Y: usize = 13;

/// Tailgating score from a presence-count history.
///
/// Compares the mean of the most recent 10 samples against the 20
/// preceding them; a sustained jump of 2 saturates the score.
/// Needs at least 30 samples.
pub fn tailgating_score(presence: &[f64]) -> f64 {
    if presence.len() < 30 {
        return 0.0;
    }
    let recent = &presence[presence.len() - 10..];
    let previous = &presence[presence.len() - 30..presence.len() - 10];
    let increase = (mean(recent) - mean(previous)).max(0.0);
    clamp01(increase / 2.0)
}

/// Access risk as a static function of local hour-of-day.
///
/// [8, 22) normal hours, [22, 24) and [0, 5) late night, [5, 8) early
/// morning.
pub fn time_of_day_score(hour: u32) -> f64 {
    match hour {
        8..=21 => 0.1,
        22..=23 | 0..=4 => 0.8,
        _ => 0.5,
    }
}

/// Loitering score from a hip-center position history.
///
/// Tight movement sustained longer scores strictly higher; thresholds
/// are evaluated in order, first match wins. Needs at least 60 samples.
pub fn loitering_score(positions: &[(f64, f64)]) -> f64 {
    if positions.len() < 60 {
        return 0.0;
    }
    let area = Extent2D::of_points(positions.iter().copied())
        .map(|e| e.area())
        .unwrap_or(0.0);

    if area < 0.01 && positions.len() >= 150 {
        1.0
    } else if area < 0.03 && positions.len() >= 240 {
        0.8
    } else if area < 0.05 {
        0.5
    } else {
        0.0
    }
}

/// Swaying score from a pose-feature history.
///
/// Lateral instability of the nose plus vertical instability of the
/// shoulder line. Needs at least 15 samples.
pub fn swaying_score(poses: &[PoseFeature]) -> f64 {
    if poses.len() < 15 {
        return 0.0;
    }
    let nose_x: Vec<f64> = poses.iter().map(|p| p[NOSE_X]).collect();
    let shoulder_y: Vec<f64> = poses
        .iter()
        .map(|p| (p[LEFT_SHOULDER_Y] + p[RIGHT_SHOULDER_Y]) / 2.0)
        .collect();

    let lateral = WindowStats::compute(&nose_x).std_dev;
    let vertical = WindowStats::compute(&shoulder_y).std_dev;

    clamp01(5.0 * lateral + 3.0 * vertical)
}

/// Head nodding: high tilt-angle variance over the last 10 samples.
///
/// False with fewer than 10 samples.
pub fn head_nodding(tilts: &[f64]) -> bool {
    if tilts.len() < 10 {
        return false;
    }
    let last10 = &tilts[tilts.len() - 10..];
    WindowStats::compute(last10).variance > 0.01
}

/// Motion intensity from a mean optical-flow magnitude
pub fn motion_score(mean_magnitude: f64) -> f64 {
    clamp01(mean_magnitude / 10.0)
}
