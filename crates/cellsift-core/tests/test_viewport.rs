use approx::assert_relative_eq;

use cellsift_core::config::{ZoomConfig, ZoomPolicy};
use cellsift_core::geometry::{Point, Rect, Size};
use cellsift_core::viewport::{ViewportController, ZoomDirection, ZoomPhase};

fn scene() -> Rect {
    Rect::from_min_size(Point::new(10.0, 20.0), Size::new(400.0, 200.0))
}

fn shown(config: ZoomConfig) -> ViewportController {
    let mut vp = ViewportController::new(config, scene());
    vp.show(Size::new(300.0, 300.0));
    vp
}

fn assert_scene_fully_visible(vp: &ViewportController) {
    assert!(
        vp.visible_scene_rect().contains_rect(&vp.scene(), 1e-3),
        "visible {:?} does not contain scene {:?}",
        vp.visible_scene_rect(),
        vp.scene()
    );
}

// ---------------------------------------------------------------------------
// fit / reset
// ---------------------------------------------------------------------------

#[test]
fn test_show_fits_scene_preserving_aspect() {
    let vp = shown(ZoomConfig::default());
    assert_relative_eq!(vp.total_scale(), 0.75);
    assert_relative_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.state().scale, 1.0);
    assert!(vp.state().at_default);
    assert_scene_fully_visible(&vp);

    let center = vp.scene_to_screen(vp.scene().center());
    assert_relative_eq!(center.x, 150.0, epsilon = 1e-3);
    assert_relative_eq!(center.y, 150.0, epsilon = 1e-3);
}

#[test]
fn test_fit_after_zoom_restores_full_scene() {
    let mut vp = shown(ZoomConfig::default());
    for _ in 0..20 {
        vp.zoom_in();
    }
    vp.pan(Point::new(-500.0, 80.0));
    assert!(!vp.state().at_default);

    vp.fit();

    assert_eq!(vp.state().scale, 1.0);
    assert_relative_eq!(vp.zoom(), 1.0);
    assert!(vp.state().at_default);
    assert_eq!(vp.state().phase, ZoomPhase::Idle);
    assert_scene_fully_visible(&vp);
}

#[test]
fn test_reset_after_zoom_out_restores_full_scene() {
    let mut vp = shown(ZoomConfig::default());
    for _ in 0..10 {
        vp.zoom_out();
    }
    vp.reset();
    assert_eq!(vp.state().scale, 1.0);
    assert_relative_eq!(vp.total_scale(), 0.75);
    assert_scene_fully_visible(&vp);
}

// ---------------------------------------------------------------------------
// direction-aware stepping
// ---------------------------------------------------------------------------

#[test]
fn test_same_direction_accumulates_scale() {
    let mut vp = shown(ZoomConfig::default());
    vp.step(1);
    vp.step(1);
    vp.step(1);
    assert_relative_eq!(vp.state().scale, 1.03, epsilon = 1e-6);
    // Each step multiplies the view by the running scale.
    assert_relative_eq!(vp.zoom(), 1.01 * 1.02 * 1.03, epsilon = 1e-5);
    assert_eq!(vp.state().phase, ZoomPhase::ZoomingIn);
}

#[test]
fn test_direction_reversal_rebaselines() {
    let mut vp = shown(ZoomConfig::default());
    for _ in 0..7 {
        vp.step(1);
    }
    let zoom_before = vp.zoom();

    vp.step(-1);

    assert_relative_eq!(vp.state().scale, 0.99, epsilon = 1e-6);
    assert_eq!(vp.state().direction, Some(ZoomDirection::Out));
    assert_eq!(vp.state().phase, ZoomPhase::ZoomingOut);
    assert_relative_eq!(vp.zoom(), zoom_before * 0.99, epsilon = 1e-5);
    assert!(vp.zoom() < zoom_before);
}

#[test]
fn test_multi_step_wheel_event_applies_at_once() {
    let mut vp = shown(ZoomConfig::default());
    vp.wheel(30.0, Point::new(150.0, 150.0));
    assert_relative_eq!(vp.state().scale, 1.02, epsilon = 1e-6);
    vp.wheel(-15.0, Point::new(150.0, 150.0));
    assert_relative_eq!(vp.state().scale, 0.99, epsilon = 1e-6);
}

#[test]
fn test_partial_notch_does_not_swallow_reversed_wheel() {
    let mut vp = shown(ZoomConfig::default());
    let cursor = Point::new(150.0, 150.0);
    vp.wheel(7.5, cursor);
    assert_eq!(vp.state().direction, None);

    vp.wheel(-15.0, cursor);
    assert_eq!(vp.state().direction, Some(ZoomDirection::Out));
    assert_relative_eq!(vp.state().scale, 0.99, epsilon = 1e-6);
    assert!(!vp.state().at_default);
}

#[test]
fn test_partial_notches_accumulate_in_one_direction() {
    let mut vp = shown(ZoomConfig::default());
    let cursor = Point::new(150.0, 150.0);
    vp.wheel(7.5, cursor);
    vp.wheel(7.5, cursor);
    assert_eq!(vp.state().direction, Some(ZoomDirection::In));
    assert_relative_eq!(vp.state().scale, 1.01, epsilon = 1e-6);
}

#[test]
fn test_zoom_is_bounded() {
    let config = ZoomConfig::default();
    let (min, max) = (config.min_zoom, config.max_zoom);
    let mut vp = shown(config);
    for _ in 0..500 {
        vp.zoom_in();
    }
    assert_relative_eq!(vp.zoom(), max);
    vp.reset();
    for _ in 0..500 {
        vp.zoom_out();
    }
    assert_relative_eq!(vp.zoom(), min);
}

#[test]
fn test_wheel_zoom_keeps_point_under_cursor() {
    let mut vp = shown(ZoomConfig::default());
    let cursor = Point::new(40.0, 200.0);
    let under = vp.screen_to_scene(cursor);

    vp.wheel(45.0, cursor);

    let after = vp.scene_to_screen(under);
    assert_relative_eq!(after.x, cursor.x, epsilon = 1e-3);
    assert_relative_eq!(after.y, cursor.y, epsilon = 1e-3);
}

#[test]
fn test_clamp_policy_holds_scale_in_range() {
    let config = ZoomConfig {
        policy: ZoomPolicy::Clamp,
        ..ZoomConfig::default()
    };
    let mut vp = shown(config);
    for _ in 0..100 {
        vp.zoom_in();
    }
    assert_relative_eq!(vp.state().scale, 1.5);
    assert_relative_eq!(vp.zoom(), 1.5);

    vp.zoom_out();
    assert_relative_eq!(vp.state().scale, 1.49, epsilon = 1e-5);

    for _ in 0..200 {
        vp.zoom_out();
    }
    assert_relative_eq!(vp.state().scale, 0.5);
    assert_relative_eq!(vp.zoom(), 0.5);
}

// ---------------------------------------------------------------------------
// resize
// ---------------------------------------------------------------------------

#[test]
fn test_resize_refits_while_at_default() {
    let mut vp = shown(ZoomConfig::default());
    vp.resize(Size::new(800.0, 200.0));
    assert_relative_eq!(vp.total_scale(), 1.0);
    assert_scene_fully_visible(&vp);
}

#[test]
fn test_resize_after_zoom_keeps_zoom() {
    let mut vp = shown(ZoomConfig::default());
    vp.zoom_in();
    let scale = vp.total_scale();
    vp.resize(Size::new(800.0, 200.0));
    assert_relative_eq!(vp.total_scale(), scale);
    assert!(!vp.state().at_default);

    vp.reset();
    vp.resize(Size::new(300.0, 300.0));
    assert_relative_eq!(vp.total_scale(), 0.75);
}

#[test]
fn test_pan_does_not_leave_fit_mode() {
    let mut vp = shown(ZoomConfig::default());
    vp.pan(Point::new(25.0, 0.0));
    assert!(vp.state().at_default);
    vp.resize(Size::new(600.0, 600.0));
    assert_scene_fully_visible(&vp);
}
