//! Scalar helpers shared by every other math type.

pub const INFTY: f32 = f32::INFINITY;
pub const PI: f32 = std::f32::consts::PI;
pub const TWO_PI: f32 = 2.0 * PI;
pub const HALF_PI: f32 = 0.5 * PI;
/// Default tolerance for `compare`-style approximate equality.
pub const FLOAT_EPSILON: f32 = 1e-6;

#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `v` inside `[min, max]` as a fraction. Not guarded against `min == max`.
#[inline]
pub fn ratio(v: f32, min: f32, max: f32) -> f32 {
    (v - min) / (max - min)
}

/// Smallest power of two `>= v`. `0` maps to `1`; values above `2^31` saturate.
pub fn next_power_of_two(v: u32) -> u32 {
    if v > 1 << 31 {
        return 1 << 31;
    }
    v.max(1).next_power_of_two()
}

#[inline]
pub fn is_power_of_two(v: u32) -> bool {
    v.is_power_of_two()
}

/// Returns `(sin, cos)` of `angle` in radians.
#[inline]
pub fn sin_cos(angle: f32) -> (f32, f32) {
    angle.sin_cos()
}

#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * (180.0 / PI)
}

#[inline]
pub fn approx_eq(a: f32, b: f32, threshold: f32) -> bool {
    (a - b).abs() <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_and_lerp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(ratio(3.0, 2.0, 4.0), 0.5);
    }

    #[test]
    fn ratio_of_empty_range_is_not_guarded() {
        assert!(ratio(1.0, 2.0, 2.0).is_infinite());
    }

    #[test]
    fn power_of_two_rounding() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(64), 64);
        assert_eq!(next_power_of_two(65), 128);
        assert_eq!(next_power_of_two(u32::MAX), 1 << 31);
        assert!(is_power_of_two(256));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(12));
    }

    #[test]
    fn angle_conversions() {
        assert!(approx_eq(to_radians(180.0), PI, FLOAT_EPSILON));
        assert!(approx_eq(to_degrees(HALF_PI), 90.0, 1e-4));
        let (s, c) = sin_cos(HALF_PI);
        assert!(approx_eq(s, 1.0, FLOAT_EPSILON));
        assert!(approx_eq(c, 0.0, FLOAT_EPSILON));
    }
}
