//! Integration tests for picking and timed highlight reversion.

use std::time::Duration;

use snowfield::{
    BoundingShape, DVec3, ObjectKind, PickHighlighter, PickableObject, Ray, Rgb, Scene,
    SceneConfig,
};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn bush(z: f64) -> PickableObject {
    PickableObject::new(
        ObjectKind::Bush,
        BoundingShape::Sphere { radius: 1.0 },
        DVec3::new(0.0, 0.0, z),
        Rgb::BUSH,
    )
    .unwrap()
}

fn rock(z: f64) -> PickableObject {
    PickableObject::new(
        ObjectKind::Rock,
        BoundingShape::Cone { radius: 1.0, height: 4.0 },
        DVec3::new(0.0, 0.0, z),
        Rgb::ROCK,
    )
    .unwrap()
}

fn down_neg_z() -> Ray {
    Ray::new(DVec3::ZERO, DVec3::NEG_Z).unwrap()
}

// ============================================================================
// Nearest Hit
// ============================================================================

#[test]
fn test_nearest_of_two_is_picked() {
    // Surfaces at distance 5 and 3; the far one is listed first.
    let mut objects = vec![bush(-6.0), bush(-4.0)];
    let mut h = PickHighlighter::default();

    let hit = h.pick(&down_neg_z(), &mut objects, ms(0)).unwrap();
    assert_eq!(hit.index, 1);
    assert!((hit.distance - 3.0).abs() < 1e-9);
    assert!(!objects[0].is_highlighted());
    assert!(objects[1].is_highlighted());
}

#[test]
fn test_miss_changes_nothing() {
    let mut objects = vec![bush(-4.0), rock(-10.0)];
    let before = objects.clone();
    let mut h = PickHighlighter::default();

    let away = Ray::new(DVec3::ZERO, DVec3::Z).unwrap();
    assert!(h.pick(&away, &mut objects, ms(0)).is_none());
    assert_eq!(objects, before);
    assert_eq!(h.pending(), 0);
    assert_eq!(h.next_reversion(), None);
}

#[test]
fn test_cone_side_hit_shrinks_after_highlight() {
    // At mid-height the cone is half as wide as its base.
    let mut objects = vec![rock(0.0)];
    let mut h = PickHighlighter::new(ms(1000)).with_style(snowfield::HighlightStyle {
        color: Rgb::HIGHLIGHT,
        scale_factor: 2.0,
    })
    .unwrap();
    let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z).unwrap();

    let first = h.pick(&ray, &mut objects, ms(0)).unwrap();
    assert!((first.distance - 9.5).abs() < 1e-9);

    let second = h.pick(&ray, &mut objects, ms(10)).unwrap();
    assert!((second.distance - 9.0).abs() < 1e-9);
}

// ============================================================================
// Reversion
// ============================================================================

#[test]
fn test_pick_then_revert() {
    let mut objects = vec![bush(-4.0)];
    let mut h = PickHighlighter::new(ms(2000));

    let hit = h.pick(&down_neg_z(), &mut objects, ms(500)).unwrap();
    assert_eq!(hit.revert_at, ms(2500));
    assert_eq!(objects[0].current_color(), Rgb::HIGHLIGHT);
    assert!(objects[0].current_scale().distance(DVec3::splat(1.2)) < 1e-12);

    assert!(h.poll_reversions(ms(2499), &mut objects).is_empty());
    assert!(objects[0].is_highlighted());

    assert_eq!(h.poll_reversions(ms(2500), &mut objects), vec![0]);
    assert_eq!(objects[0].current_color(), Rgb::BUSH);
    assert_eq!(objects[0].current_scale(), DVec3::ONE);
    assert_eq!(objects[0].revert_deadline(), None);
}

#[test]
fn test_repick_leaves_single_reversion_at_latest_deadline() {
    let mut objects = vec![bush(-4.0)];
    let mut h = PickHighlighter::new(ms(2000));

    h.pick(&down_neg_z(), &mut objects, ms(0));
    h.pick(&down_neg_z(), &mut objects, ms(1000));
    assert_eq!(h.pending(), 1);
    assert_eq!(h.next_reversion(), Some(ms(3000)));
    assert_eq!(objects[0].revert_deadline(), Some(ms(3000)));

    // The first deadline passes without effect.
    assert!(h.poll_reversions(ms(2000), &mut objects).is_empty());
    assert!(objects[0].is_highlighted());

    assert_eq!(h.poll_reversions(ms(3000), &mut objects), vec![0]);
    assert_eq!(objects[0].current_color(), Rgb::BUSH);
    assert_eq!(objects[0].current_scale(), DVec3::ONE);

    assert!(h.poll_reversions(ms(10_000), &mut objects).is_empty());
}

#[test]
fn test_highlight_reverts_after_earlier_object_removed() {
    let mut objects = vec![bush(50.0), bush(-4.0), rock(-20.0)];
    let mut h = PickHighlighter::new(ms(2000));

    let hit = h.pick(&down_neg_z(), &mut objects, ms(0)).unwrap();
    assert_eq!(hit.index, 1);

    objects.remove(0);
    assert_eq!(h.poll_reversions(ms(10_000), &mut objects), vec![0]);
    assert_eq!(objects[0].current_color(), Rgb::BUSH);
    assert_eq!(objects[0].current_scale(), DVec3::ONE);
    assert_eq!(objects[0].revert_deadline(), None);
    assert!(!objects[1].is_highlighted());
}

#[test]
fn test_independent_objects_revert_in_deadline_order() {
    let mut objects = vec![bush(-4.0), PickableObject::new(
        ObjectKind::Crystal,
        BoundingShape::Tetrahedron { radius: 0.5 },
        DVec3::new(0.0, 0.0, 4.0),
        Rgb::CRYSTAL,
    )
    .unwrap()];
    let mut h = PickHighlighter::new(ms(100));

    let back = Ray::new(DVec3::new(0.05, 0.02, 0.0), DVec3::Z).unwrap();
    h.pick(&back, &mut objects, ms(50));
    h.pick(&down_neg_z(), &mut objects, ms(0));
    assert_eq!(h.pending(), 2);

    assert_eq!(h.poll_reversions(ms(1000), &mut objects), vec![0, 1]);
}

// ============================================================================
// Scene
// ============================================================================

#[test]
fn test_scene_click_reverts_after_frames() {
    let mut config = SceneConfig::default().with_seed(5);
    config.field.count = 100;
    let mut scene = Scene::new(&config).unwrap();
    scene.frame(ms(16));

    let view_proj = scene.camera().projection_matrix() * scene.camera().view_matrix();
    let ndc = scene
        .objects()
        .iter()
        .map(|o| view_proj.project_point3(o.position()))
        .find(|p| p.x.abs() < 0.9 && p.y.abs() < 0.9 && p.z.abs() < 1.0)
        .expect("some object in view");

    let hit = scene.pick_ndc(ndc.truncate()).expect("ray through an object center");
    assert!(scene.objects()[hit.index].is_highlighted());
    assert_eq!(scene.highlighter().pending(), 1);

    let mut reverted = Vec::new();
    for _ in 0..130 {
        reverted.extend(scene.frame(ms(16)));
    }
    assert_eq!(reverted, vec![hit.index]);
    assert!(scene.objects().iter().all(|o| !o.is_highlighted()));
}
