//! Planar joint geometry
//!
//! Angle at a joint vertex via the dot product, midpoints, and the torso lean
//! measured against the image vertical.

use formcheck_common::Point2;

/// Vectors shorter than this are treated as zero-length.
const MIN_VECTOR_LENGTH: f64 = 1e-12;

/// Calculate the angle ∠AVB in degrees
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
/// with v1 = A − V and v2 = B − V. The cosine is clamped to [-1, 1] so
/// rounding at the boundary cannot push `acos` out of its domain.
///
/// Returns a value in [0, 180]:
/// - 180° = A, V, B collinear with V between A and B (straight limb)
/// - 90° = right angle at V
/// - 0.0 if A or B coincides with V (degenerate geometry)
#[must_use]
pub fn calculate_angle(a: Point2, vertex: Point2, b: Point2) -> f64 {
    let v1 = (a.x - vertex.x, a.y - vertex.y);
    let v2 = (b.x - vertex.x, b.y - vertex.y);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);

    if mag1 < MIN_VECTOR_LENGTH || mag2 < MIN_VECTOR_LENGTH {
        return 0.0;
    }

    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Midpoint of two landmarks
#[must_use]
pub fn midpoint(a: Point2, b: Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Deviation from vertical (degrees) of the segment from `lower` to `upper`
///
/// The segment direction is taken with `atan2(dy, dx)` and folded into
/// "degrees off vertical" as `|90 − |θ||`, so both a forward and a backward
/// lean give a positive value in [0, 90].
#[must_use]
pub fn lean_from_vertical(lower: Point2, upper: Point2) -> f64 {
    let dx = upper.x - lower.x;
    let dy = upper.y - lower.y;
    let from_horizontal = dy.atan2(dx).to_degrees();
    (90.0 - from_horizontal.abs()).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_straight_limb() {
        let angle = calculate_angle(p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0));
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_right_angle() {
        let angle = calculate_angle(p(0.0, 0.0), p(0.5, 0.0), p(0.5, 0.5));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_vertex_returns_zero() {
        assert_eq!(calculate_angle(p(0.3, 0.3), p(0.3, 0.3), p(0.9, 0.1)), 0.0);
        assert_eq!(calculate_angle(p(0.9, 0.1), p(0.3, 0.3), p(0.3, 0.3)), 0.0);
    }

    #[test]
    fn test_angle_is_symmetric() {
        let a = p(0.12, 0.34);
        let v = p(0.5, 0.61);
        let b = p(0.77, 0.2);
        assert!((calculate_angle(a, v, b) - calculate_angle(b, v, a)).abs() < 1e-12);
    }

    #[test]
    fn test_nearly_collinear_does_not_nan() {
        // Rounding can push the cosine slightly past -1 without the clamp
        let angle = calculate_angle(p(0.1, 0.1), p(0.2, 0.2), p(0.3, 0.3));
        assert!(angle.is_finite());
        assert!((angle - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(p(0.2, 0.4), p(0.6, 0.8));
        assert!((m.x - 0.4).abs() < 1e-12);
        assert!((m.y - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_lean_from_vertical() {
        // Upright torso: shoulders straight above hips
        assert!(lean_from_vertical(p(0.5, 0.6), p(0.5, 0.3)).abs() < 1e-9);
        // 45° lean either direction
        assert!((lean_from_vertical(p(0.5, 0.6), p(0.6, 0.5)) - 45.0).abs() < 1e-9);
        assert!((lean_from_vertical(p(0.5, 0.6), p(0.4, 0.5)) - 45.0).abs() < 1e-9);
        // Horizontal torso
        assert!((lean_from_vertical(p(0.5, 0.6), p(0.8, 0.6)) - 90.0).abs() < 1e-9);
    }
}
