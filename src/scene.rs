//! The winter scene: snow, decorations, camera and clock in one owner.
//!
//! A [`Scene`] is what an external renderer drives. Each frame it calls
//! [`Scene::frame`] and then reads [`Scene::field`] positions and
//! [`Scene::objects`] colors and scales; on each click it calls
//! [`Scene::click`].
//!
//! # Example
//!
//! ```ignore
//! let mut scene = Scene::new(&SceneConfig::default())?;
//!
//! loop {
//!     scene.frame(frame_time);
//!     renderer.draw_points(scene.field().positions());
//!     for obj in scene.objects() {
//!         renderer.draw_mesh(obj.shape(), obj.transform(), obj.current_color());
//!     }
//!     if let Some(click) = input.take_click() {
//!         scene.click(click, viewport);
//!     }
//! }
//! ```

use glam::{DVec2, DVec3};
use std::time::Duration;

use crate::camera::Camera;
use crate::config::{ScatterConfig, SceneConfig};
use crate::error::ConfigError;
use crate::field::ParticleField;
use crate::highlight::{PickHighlighter, PickResult};
use crate::object::{ObjectKind, PickableObject};
use crate::shape::BoundingShape;
use crate::spawn::{clock_seed, Bounds, SpawnContext};
use crate::time::Time;

/// Owns everything the frame loop touches.
#[derive(Debug)]
pub struct Scene {
    field: ParticleField,
    objects: Vec<PickableObject>,
    highlighter: PickHighlighter,
    camera: Camera,
    time: Time,
}

impl Scene {
    /// Build the scene described by `config`.
    pub fn new(config: &SceneConfig) -> Result<Self, ConfigError> {
        let field = config.field.build()?;
        let camera = Camera::from_config(&config.camera)?;

        let seed = config.scatter_seed.unwrap_or_else(clock_seed);
        let mut objects = Vec::new();
        scatter(&mut objects, ObjectKind::Rock, &config.rocks, seed)?;
        scatter(&mut objects, ObjectKind::Crystal, &config.crystals, seed)?;
        scatter(&mut objects, ObjectKind::Bush, &config.bushes, seed)?;

        let highlighter =
            PickHighlighter::new(Duration::from_millis(config.highlight_duration_ms))
                .with_style(config.highlight)?;

        let mut time = Time::new();
        if let Some(hz) = config.fixed_step_hz {
            time.set_fixed_delta(Some(fixed_step(hz)?));
        }

        log::info!(
            "scene ready: {} particles, {} pickable objects",
            field.len(),
            objects.len()
        );

        Ok(Self {
            field,
            objects,
            highlighter,
            camera,
            time,
        })
    }

    /// Run one frame that took `raw` of real time.
    ///
    /// Advances the clock and the snow, then reverts due highlights. Returns
    /// the indices of reverted objects.
    pub fn frame(&mut self, raw: Duration) -> Vec<usize> {
        let (_, delta) = self.time.tick(raw);
        self.field.advance(delta);
        self.highlighter
            .poll_reversions(self.time.elapsed_duration(), &mut self.objects)
    }

    /// Pick with a click at `pixel` in a window of size `viewport`.
    pub fn click(&mut self, pixel: DVec2, viewport: DVec2) -> Option<PickResult> {
        let ray = self.camera.ray_from_pixel(pixel, viewport)?;
        self.highlighter
            .pick(&ray, &mut self.objects, self.time.elapsed_duration())
    }

    /// Pick along a ray through normalized device coordinates.
    pub fn pick_ndc(&mut self, ndc: DVec2) -> Option<PickResult> {
        let ray = self.camera.ray_from_ndc(ndc)?;
        self.highlighter
            .pick(&ray, &mut self.objects, self.time.elapsed_duration())
    }

    /// Record a new window size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.set_aspect(width, height);
    }

    /// The snow.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Decorations, in pick order.
    pub fn objects(&self) -> &[PickableObject] {
        &self.objects
    }

    /// The highlighter.
    pub fn highlighter(&self) -> &PickHighlighter {
        &self.highlighter
    }

    /// The camera mirror.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera, for orbit controls.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The frame clock.
    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Mutable frame clock, for pausing and time scale.
    pub fn time_mut(&mut self) -> &mut Time {
        &mut self.time
    }
}

/// Frame length for a fixed simulation rate of `hz`.
fn fixed_step(hz: f64) -> Result<Duration, ConfigError> {
    ConfigError::check_positive("fixed_step_hz", hz)?;
    match Duration::try_from_secs_f64(1.0 / hz) {
        Ok(step) if !step.is_zero() => Ok(step),
        _ => Err(ConfigError::StepOutOfRange(hz)),
    }
}

fn scatter(
    objects: &mut Vec<PickableObject>,
    kind: ObjectKind,
    config: &ScatterConfig,
    seed: u64,
) -> Result<(), ConfigError> {
    config.validate(kind == ObjectKind::Rock)?;
    let seed = seed ^ kind_salt(kind);
    let bounds = Bounds::new(0.0, config.spread, config.y_min, config.y_max);

    for i in 0..config.count {
        let mut ctx = SpawnContext::new(i, seed, bounds, DVec3::ZERO);
        let y = ctx.random_height();
        let position = ctx.random_in_square(y);
        let radius = ctx.random_range(config.size_min, config.size_max);
        let shape = match kind {
            ObjectKind::Rock => BoundingShape::Cone {
                radius,
                height: ctx.random_range(config.length_min, config.length_max),
            },
            ObjectKind::Crystal => BoundingShape::Tetrahedron { radius },
            ObjectKind::Bush => BoundingShape::Sphere { radius },
        };
        objects.push(PickableObject::new(kind, shape, position, config.color)?);
    }
    Ok(())
}

fn kind_salt(kind: ObjectKind) -> u64 {
    match kind {
        ObjectKind::Rock => 0x5eed_0001 << 32,
        ObjectKind::Crystal => 0x5eed_0002 << 32,
        ObjectKind::Bush => 0x5eed_0003 << 32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SceneConfig {
        let mut config = SceneConfig::default().with_seed(21);
        config.field.count = 200;
        config
    }

    #[test]
    fn test_default_population() {
        let scene = Scene::new(&small_config()).unwrap();
        let count = |kind| scene.objects().iter().filter(|o| o.kind() == kind).count();
        assert_eq!(count(ObjectKind::Rock), 10);
        assert_eq!(count(ObjectKind::Crystal), 30);
        assert_eq!(count(ObjectKind::Bush), 15);
        assert_eq!(scene.field().len(), 200);
    }

    #[test]
    fn test_rocks_within_ranges() {
        let scene = Scene::new(&small_config()).unwrap();
        for rock in scene.objects().iter().filter(|o| o.kind() == ObjectKind::Rock) {
            let p = rock.position();
            assert!(p.x.abs() <= 25.0 && p.z.abs() <= 25.0);
            assert!((0.0..2.0).contains(&p.y));
            match *rock.shape() {
                BoundingShape::Cone { radius, height } => {
                    assert!((1.0..2.0).contains(&radius));
                    assert!((5.0..15.0).contains(&height));
                }
                ref other => panic!("rock with shape {other:?}"),
            }
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = Scene::new(&small_config()).unwrap();
        let b = Scene::new(&small_config()).unwrap();
        assert_eq!(a.objects(), b.objects());
        assert_eq!(a.field().positions(), b.field().positions());
    }

    #[test]
    fn test_frame_uses_fixed_step() {
        let mut scene = Scene::new(&small_config()).unwrap();
        scene.frame(Duration::from_millis(100));
        assert!((scene.time().delta() - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(scene.field().steps(), 1);
    }

    #[test]
    fn test_paused_frame_freezes_field() {
        let mut scene = Scene::new(&small_config()).unwrap();
        let before = scene.field().positions().to_vec();
        scene.time_mut().pause();
        scene.frame(Duration::from_millis(16));
        assert_eq!(scene.field().positions(), &before[..]);
    }

    #[test]
    fn test_invalid_highlight_scale_rejected() {
        let mut config = small_config();
        config.highlight.scale_factor = 0.0;
        assert!(Scene::new(&config).is_err());
    }

    #[test]
    fn test_unrepresentable_fixed_step_rejected() {
        for hz in [1e-300, 1e12, 0.0, f64::NAN] {
            let mut config = small_config();
            config.fixed_step_hz = Some(hz);
            assert!(Scene::new(&config).is_err(), "accepted fixed_step_hz {hz}");
        }
    }

    #[test]
    fn test_extreme_fixed_step_from_json_is_error() {
        let config = SceneConfig::from_json_str(r#"{ "fixed_step_hz": 1e-300 }"#).unwrap();
        assert_eq!(
            Scene::new(&config).unwrap_err(),
            ConfigError::StepOutOfRange(1e-300)
        );
    }

    #[test]
    fn test_fixed_step_length() {
        assert_eq!(fixed_step(50.0).unwrap(), Duration::from_millis(20));
        assert_eq!(fixed_step(1e9).unwrap(), Duration::from_nanos(1));
    }
}
