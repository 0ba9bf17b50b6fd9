//! Rays for picking.

use glam::DVec3;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: DVec3,
    /// Unit direction.
    pub direction: DVec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    ///
    /// Returns `None` if `direction` is zero or not finite.
    pub fn new(origin: DVec3, direction: DVec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Ray from `origin` through `target`.
    pub fn towards(origin: DVec3, target: DVec3) -> Option<Self> {
        Self::new(origin, target - origin)
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_normalized() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -4.0)).unwrap();
        assert_eq!(ray.direction, DVec3::NEG_Z);
        assert_eq!(ray.at(2.0), DVec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_zero_direction_rejected() {
        assert!(Ray::new(DVec3::ONE, DVec3::ZERO).is_none());
        assert!(Ray::towards(DVec3::ONE, DVec3::ONE).is_none());
    }
}
