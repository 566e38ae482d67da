use glam::Vec2;

/// Point at `fraction` of the way from `p1` to `p2`.
///
/// `fraction = 0` yields `p1` and `fraction = 1` yields `p2`, both exactly.
/// Values outside `[0, 1]` extrapolate along the same line and are not
/// clamped; keeping the fraction in range is up to the caller.
///
/// Typical use is picking a query point between two hand landmarks, e.g. the
/// distal joint and the tip of the index finger.
///
/// Example:
///
/// ```
/// use glam::Vec2;
/// use tactile_3d::interpolate::intermediate_point;
///
/// let mid = intermediate_point(Vec2::new(0.0, 0.0), Vec2::new(0.5, 1.0), 0.5);
/// assert_eq!(mid, Vec2::new(0.25, 0.5));
/// ```
#[inline]
pub fn intermediate_point(p1: Vec2, p2: Vec2, fraction: f32) -> Vec2 {
    p1 * (1.0 - fraction) + p2 * fraction
}
