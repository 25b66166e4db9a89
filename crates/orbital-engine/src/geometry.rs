//! Orbit geometry.
//!
//! Every function here is pure: the transform of a node depends only on
//! `(index, total, angle)` and the layout parameters.

use serde::{Deserialize, Serialize};

use crate::config::{OrbitalConfig, Range};

/// Full turn, in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Most decimal places an angle is rounded to.
pub const MAX_ANGLE_PRECISION: u32 = 9;

/// Screen transform of a single node, in layout units around the orbit centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    pub x: f64,
    pub y: f64,
    /// Higher values draw above lower ones.
    pub z_order: i32,
    pub opacity: f64,
    pub scale: f64,
}

/// Parameters of the position formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub radius: f64,
    pub opacity: Range,
    pub scale: Range,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::from(&OrbitalConfig::default())
    }
}

impl From<&OrbitalConfig> for LayoutParams {
    fn from(config: &OrbitalConfig) -> Self {
        Self {
            radius: config.radius,
            opacity: config.opacity,
            scale: config.scale,
        }
    }
}

impl LayoutParams {
    /// Transform of item `index` out of `total` with the ring rotated by `angle_deg`.
    ///
    /// `total == 0` is treated as a single-item ring.
    #[allow(clippy::cast_possible_truncation)]
    pub fn compute(&self, index: usize, total: usize, angle_deg: f64) -> NodeTransform {
        let radians = item_angle_deg(index, total, angle_deg).to_radians();
        let (sin, cos) = radians.sin_cos();

        NodeTransform {
            x: self.radius * cos,
            y: self.radius * sin,
            z_order: (100.0 + 50.0 * cos).round() as i32,
            opacity: self.opacity.lerp((1.0 + sin) / 2.0),
            scale: self.scale.lerp((1.0 + cos) / 2.0),
        }
    }
}

/// Compute a node transform with the default layout parameters.
pub fn compute_position(index: usize, total: usize, angle_deg: f64) -> NodeTransform {
    LayoutParams::default().compute(index, total, angle_deg)
}

/// Angle of item `index` on the ring, in degrees within `[0, 360)`.
#[allow(clippy::cast_precision_loss)]
pub fn item_angle_deg(index: usize, total: usize, angle_deg: f64) -> f64 {
    let total = total.max(1);
    let base = FULL_TURN_DEG * index as f64 / total as f64;
    wrap_deg(base + angle_deg)
}

/// Advance `angle_deg` by `step_deg`, wrapping into `[0, 360)` and rounding to
/// `precision` decimal places (at most [`MAX_ANGLE_PRECISION`]).
pub fn advance_angle(angle_deg: f64, step_deg: f64, precision: u32) -> f64 {
    let next = round_to(wrap_deg(angle_deg + step_deg), precision);
    // Rounding can land exactly on a full turn.
    if next >= FULL_TURN_DEG {
        next - FULL_TURN_DEG
    } else {
        next
    }
}

/// Wrap any finite angle into `[0, 360)`.
pub fn wrap_deg(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(FULL_TURN_DEG);
    if wrapped >= FULL_TURN_DEG {
        0.0
    } else {
        wrapped
    }
}

#[allow(clippy::cast_possible_wrap)]
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_ANGLE_PRECISION) as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_compute_is_deterministic() {
        for total in 1..8 {
            for index in 0..total {
                let a = compute_position(index, total, 123.456);
                let b = compute_position(index, total, 123.456);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_six_items_at_zero() {
        let front = compute_position(0, 6, 0.0);
        assert!((front.x - 280.0).abs() < EPS);
        assert!(front.y.abs() < EPS);
        assert_eq!(front.z_order, 150);
        assert!((front.scale - 1.15).abs() < EPS);
        // sin(0) sits in the middle of the opacity range.
        assert!((front.opacity - 0.75).abs() < EPS);

        let back = compute_position(3, 6, 0.0);
        assert!((back.x + 280.0).abs() < EPS);
        assert_eq!(back.z_order, 50);
        assert!((back.scale - 0.85).abs() < EPS);
    }

    #[test]
    fn test_opacity_extremes() {
        // Quarter turn: sin = 1, fully opaque.
        let bottom = compute_position(0, 4, 90.0);
        assert!((bottom.opacity - 1.0).abs() < EPS);
        assert!((bottom.y - 280.0).abs() < EPS);

        // Three quarters: sin = -1, faded but visible.
        let top = compute_position(0, 4, 270.0);
        assert!((top.opacity - 0.5).abs() < EPS);
    }

    #[test]
    fn test_depth_cues_stay_in_range() {
        let params = LayoutParams::default();
        for step in 0..720u32 {
            let t = params.compute(0, 1, f64::from(step) * 0.5);
            assert!((0.5..=1.0).contains(&t.opacity));
            assert!((0.85 - EPS..=1.15 + EPS).contains(&t.scale));
            assert!((50..=150).contains(&t.z_order));
            let r = (t.x * t.x + t.y * t.y).sqrt();
            assert!((r - 280.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_total_is_guarded() {
        let t = compute_position(0, 0, 0.0);
        assert!(t.x.is_finite() && t.y.is_finite());
        assert_eq!(t, compute_position(0, 1, 0.0));
    }

    #[test]
    fn test_custom_radius() {
        let params = LayoutParams {
            radius: 10.0,
            ..LayoutParams::default()
        };
        let t = params.compute(1, 4, 0.0);
        assert!(t.x.abs() < EPS);
        assert!((t.y - 10.0).abs() < EPS);
    }

    #[test]
    fn test_item_angle_spacing() {
        assert!((item_angle_deg(1, 6, 0.0) - 60.0).abs() < EPS);
        assert!((item_angle_deg(5, 6, 90.0) - 30.0).abs() < EPS);
    }

    #[test]
    fn test_advance_angle_wraps() {
        let mut angle = 0.0;
        for _ in 0..1300 {
            angle = advance_angle(angle, 0.3, 3);
            assert!((0.0..360.0).contains(&angle));
        }
        // 1300 * 0.3 = 390 degrees
        assert!((angle - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_advance_angle_rounds() {
        let angle = advance_angle(0.1, 0.2, 3);
        assert!((angle - 0.3).abs() < EPS);
        assert_eq!(angle.to_string(), "0.3");

        // Rounding up to a full turn folds back to zero.
        assert!(advance_angle(359.9996, 0.0, 3).abs() < EPS);
    }

    #[test]
    fn test_advance_angle_clamps_precision() {
        let angle = advance_angle(10.0, 0.3, 400);
        assert!(angle.is_finite());
        assert!((angle - 10.3).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_negative() {
        assert!((wrap_deg(-30.0) - 330.0).abs() < EPS);
        assert!((wrap_deg(720.0)).abs() < EPS);
    }
}
