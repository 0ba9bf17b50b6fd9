//! Orbit camera and screen-to-world ray construction.
//!
//! The renderer owns the real camera; this mirror holds the same parameters
//! so clicks can be turned into pick rays without touching the renderer.

use glam::{DMat4, DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ray::Ray;

/// Camera placement and lens, as loaded from config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position.
    pub eye: DVec3,
    /// Point the camera looks at.
    pub target: DVec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Viewport width over height.
    pub aspect: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: DVec3::new(20.0, 10.0, 30.0),
            target: DVec3::ZERO,
            fov_y_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Orbit camera with a perspective lens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f64,
    /// Vertical rotation angle in radians.
    pub pitch: f64,
    /// Distance from the target point.
    pub distance: f64,
    /// Point the camera orbits around.
    pub target: DVec3,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    /// Viewport width over height.
    pub aspect: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
}

impl Camera {
    /// Create a camera with default positioning.
    pub fn new() -> Self {
        Self::from_eye(CameraConfig::default().eye, DVec3::ZERO)
    }

    /// Place the camera at `eye`, orbiting `target`, with the default lens.
    pub fn from_eye(eye: DVec3, target: DVec3) -> Self {
        let lens = CameraConfig::default();
        let offset = eye - target;
        let distance = offset.length();
        let pitch = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch,
            distance,
            target,
            fov_y: lens.fov_y_degrees.to_radians(),
            aspect: lens.aspect,
            near: lens.near,
            far: lens.far,
        }
    }

    /// Build a camera from config, rejecting a degenerate lens.
    pub fn from_config(config: &CameraConfig) -> Result<Self, ConfigError> {
        ConfigError::check_positive("camera.fov_y_degrees", config.fov_y_degrees)?;
        ConfigError::check_positive("camera.aspect", config.aspect)?;
        ConfigError::check_positive("camera.near", config.near)?;
        ConfigError::check_range("camera clip", config.near, config.far)?;
        if (config.eye - config.target).length_squared() == 0.0 {
            return Err(ConfigError::NotPositive {
                name: "camera distance",
                value: 0.0,
            });
        }
        let mut camera = Self::from_eye(config.eye, config.target);
        camera.fov_y = config.fov_y_degrees.to_radians();
        camera.aspect = config.aspect;
        camera.near = config.near;
        camera.far = config.far;
        Ok(camera)
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> DVec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + DVec3::new(x, y, z)
    }

    /// Calculate the view matrix.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position(), self.target, DVec3::Y)
    }

    /// Calculate the projection matrix (OpenGL clip depth, -1 to 1).
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Record a new viewport aspect ratio.
    pub fn set_aspect(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Ray from the eye through a point in normalized device coordinates.
    ///
    /// `ndc` is `(-1, -1)` at the bottom left and `(1, 1)` at the top right.
    pub fn ray_from_ndc(&self, ndc: DVec2) -> Option<Ray> {
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let far = inverse.project_point3(DVec3::new(ndc.x, ndc.y, 1.0));
        Ray::towards(self.position(), far)
    }

    /// Ray from the eye through a pixel of a `viewport`-sized window.
    pub fn ray_from_pixel(&self, pixel: DVec2, viewport: DVec2) -> Option<Ray> {
        self.ray_from_ndc(ndc_from_pixel(pixel, viewport))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert window pixel coordinates (origin top left) to normalized device
/// coordinates.
pub fn ndc_from_pixel(pixel: DVec2, viewport: DVec2) -> DVec2 {
    DVec2::new(
        pixel.x / viewport.x * 2.0 - 1.0,
        -(pixel.y / viewport.y) * 2.0 + 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_eye_round_trips_position() {
        let eye = DVec3::new(20.0, 10.0, 30.0);
        let camera = Camera::from_eye(eye, DVec3::ZERO);
        assert!(camera.position().distance(eye) < 1e-9);
    }

    #[test]
    fn test_center_ray_hits_target() {
        let camera = Camera::new();
        let ray = camera.ray_from_ndc(DVec2::ZERO).unwrap();
        let to_target = (camera.target - camera.position()).normalize();
        assert!(ray.direction.distance(to_target) < 1e-6);
        assert!(ray.origin.distance(camera.position()) < 1e-9);
    }

    #[test]
    fn test_ndc_from_pixel() {
        let viewport = DVec2::new(800.0, 600.0);
        assert_eq!(ndc_from_pixel(DVec2::new(400.0, 300.0), viewport), DVec2::ZERO);
        assert_eq!(ndc_from_pixel(DVec2::ZERO, viewport), DVec2::new(-1.0, 1.0));
        assert_eq!(ndc_from_pixel(viewport, viewport), DVec2::new(1.0, -1.0));
    }

    #[test]
    fn test_top_of_screen_looks_higher() {
        let camera = Camera::new();
        let center = camera.ray_from_ndc(DVec2::ZERO).unwrap();
        let top = camera.ray_from_ndc(DVec2::new(0.0, 0.9)).unwrap();
        assert!(top.direction.y > center.direction.y);
    }

    #[test]
    fn test_from_config_rejects_bad_lens() {
        let config = CameraConfig {
            near: 10.0,
            far: 1.0,
            ..CameraConfig::default()
        };
        assert!(Camera::from_config(&config).is_err());
        assert!(Camera::from_config(&CameraConfig::default()).is_ok());
    }
}
