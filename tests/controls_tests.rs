//! Navigation Handler Tests
//!
//! Tests for:
//! - Viewpoint presets and projection
//! - OrbitControls sync, auto-rotation, zoom
//! - TrackballControls drag rotation
//! - FirstPersonControls walking with no-fly
//! - FlyControls translation and roll

use std::f32::consts::PI;

use glam::Vec3;

use depot::app::input::{ButtonState, Input, Key, MouseButton};
use depot::controls::{
    CameraSettings, ControlHandler, FirstPersonControls, FirstPersonSettings, FlyControls,
    FlySettings, OrbitControls, OrbitSettings, Projection, TrackballControls, TrackballSettings,
    Viewpoint,
};

const EPSILON: f32 = 1e-2;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn perspective() -> Viewpoint {
    Viewpoint::perspective(&CameraSettings::default().perspective, 16.0 / 9.0)
}

fn sized_input() -> Input {
    let mut input = Input::new();
    input.inject_resize(800, 600);
    input
}

// ============================================================================
// Viewpoint
// ============================================================================

#[test]
fn camera_presets() {
    let settings = CameraSettings::default();

    let persp = Viewpoint::perspective(&settings.perspective, 2.0);
    assert_eq!(persp.label(), "Perspective");
    assert_eq!(persp.fov(), Some(45.0));
    assert_eq!(persp.position(), Vec3::new(0.0, 0.0, 2000.0));
    assert!(vec3_approx(persp.transform.forward(), Vec3::NEG_Z));

    let ortho = Viewpoint::orthographic(&settings.orthographic);
    assert_eq!(ortho.label(), "Orthographic");
    assert_eq!(ortho.fov(), None);
    assert_eq!(ortho.position(), Vec3::new(0.0, 0.0, 5000.0));
    assert!(matches!(
        ortho.projection,
        Projection::Orthographic { near, far, .. } if approx(near, 0.1) && approx(far, 10000.0)
    ));
}

#[test]
fn set_aspect_only_changes_perspective() {
    let mut persp = perspective();
    persp.set_aspect(1.0);
    assert!(matches!(persp.projection, Projection::Perspective { aspect, .. } if approx(aspect, 1.0)));

    let mut ortho = Viewpoint::orthographic(&CameraSettings::default().orthographic);
    let before = ortho.projection;
    ortho.set_aspect(3.0);
    assert_eq!(ortho.projection, before);
}

#[test]
fn view_matrix_maps_camera_to_origin() {
    let vp = perspective();
    let eye = vp.view_matrix().transform_point3(vp.position());
    assert!(vec3_approx(eye, Vec3::ZERO));
    let origin = vp.view_matrix().transform_point3(Vec3::ZERO);
    assert!(vec3_approx(origin, Vec3::new(0.0, 0.0, -2000.0)));
}

// ============================================================================
// Orbit
// ============================================================================

#[test]
fn orbit_enable_adopts_current_pose() {
    let mut vp = perspective();
    let mut orbit = OrbitControls::new(OrbitSettings {
        auto_rotate: false,
        ..OrbitSettings::default()
    });
    orbit.enable(&mut vp);

    assert!(approx(orbit.radius, 2000.0));
    assert!(approx(orbit.theta, 0.0));
    assert!(approx(orbit.phi, PI / 2.0));

    orbit.update(&mut vp, &sized_input(), 0.016);
    assert!(vec3_approx(vp.position(), Vec3::new(0.0, 0.0, 2000.0)));
}

#[test]
fn orbit_auto_rotation_circles_the_centre() {
    let mut vp = perspective();
    let mut orbit = OrbitControls::new(OrbitSettings::default());
    assert!(orbit.auto_rotate);
    orbit.enable(&mut vp);

    orbit.update(&mut vp, &sized_input(), 1.0);

    assert!(approx(vp.position().length(), 2000.0));
    assert!(vp.position().x.abs() > 1.0);
    let to_centre = (Vec3::ZERO - vp.position()).normalize();
    assert!(vec3_approx(vp.transform.forward(), to_centre));

    orbit.set_auto_rotate(false);
    let parked = vp.position();
    orbit.update(&mut vp, &sized_input(), 1.0);
    assert!(vec3_approx(vp.position(), parked));
}

#[test]
fn orbit_scroll_zooms_in() {
    let mut vp = perspective();
    let mut orbit = OrbitControls::new(OrbitSettings {
        auto_rotate: false,
        ..OrbitSettings::default()
    });
    orbit.enable(&mut vp);

    let mut input = sized_input();
    input.inject_scroll(0.0, 3.0);
    orbit.update(&mut vp, &input, 0.016);

    assert!(vp.position().length() < 2000.0);
    assert!(approx(vp.position().length(), orbit.radius));
}

// ============================================================================
// Trackball
// ============================================================================

#[test]
fn trackball_drag_rotates_around_target() {
    let mut vp = perspective();
    let mut trackball = TrackballControls::new(TrackballSettings::default());
    trackball.enable(&mut vp);
    assert!(vec3_approx(trackball.up(), Vec3::Y));

    let mut input = sized_input();
    input.inject_mouse_position(400.0, 300.0);
    input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
    input.inject_mouse_position(500.0, 300.0);
    trackball.update(&mut vp, &input, 0.016);

    assert!(approx(vp.position().length(), 2000.0));
    assert!(vp.position().x.abs() > 100.0);
    let to_target = (trackball.target - vp.position()).normalize();
    assert!(vec3_approx(vp.transform.forward(), to_target));

    // static moving: no coasting once the pointer stops
    input.start_frame();
    let parked = vp.position();
    trackball.update(&mut vp, &input, 0.016);
    assert!(vec3_approx(vp.position(), parked));
}

// ============================================================================
// First person
// ============================================================================

#[test]
fn first_person_walks_at_constant_height() {
    let mut vp = perspective();
    let mut fp = FirstPersonControls::new(FirstPersonSettings::default());
    fp.enable(&mut vp);
    let start = vp.position();

    let mut input = sized_input();
    input.inject_key(Key::W, ButtonState::Pressed);
    fp.update(&mut vp, &input, 1.0);

    let moved = vp.position() - start;
    assert!(approx(moved.y, 0.0), "no-fly keeps the height");
    assert!(moved.length() > 1.0);
    assert!(moved.length() <= 200.0 + EPSILON);
}

#[test]
fn first_person_look_follows_cursor_offset() {
    let mut vp = perspective();
    let mut fp = FirstPersonControls::new(FirstPersonSettings::default());
    fp.enable(&mut vp);
    let lon = fp.lon;

    // cursor parked at the centre: no turning
    let mut input = sized_input();
    input.inject_mouse_position(400.0, 300.0);
    fp.update(&mut vp, &input, 1.0);
    assert!(approx(fp.lon, lon));

    input.inject_mouse_position(600.0, 300.0);
    fp.update(&mut vp, &input, 1.0);
    assert!(approx(fp.lon, lon - 200.0 * 0.1));
}

// ============================================================================
// Fly
// ============================================================================

#[test]
fn fly_moves_along_local_forward() {
    let mut vp = perspective();
    let mut fly = FlyControls::new(FlySettings::default());
    fly.enable(&mut vp);

    let mut input = sized_input();
    input.inject_key(Key::W, ButtonState::Pressed);
    fly.update(&mut vp, &input, 1.0);

    assert!(vec3_approx(vp.position(), Vec3::new(0.0, 0.0, 1750.0)));
}

#[test]
fn fly_rolls_with_q() {
    let mut vp = perspective();
    let mut fly = FlyControls::new(FlySettings::default());
    fly.enable(&mut vp);

    let mut input = sized_input();
    input.inject_key(Key::Q, ButtonState::Pressed);
    fly.update(&mut vp, &input, 1.0);

    assert!(approx(vp.transform.rotation.z, PI / 24.0));
    assert!(vec3_approx(vp.transform.forward(), Vec3::NEG_Z));
}

#[test]
fn fly_drag_to_look_ignores_idle_cursor() {
    let mut vp = perspective();
    let mut fly = FlyControls::new(FlySettings::default());
    fly.enable(&mut vp);

    let mut input = sized_input();
    input.inject_mouse_position(800.0, 0.0);
    assert_eq!(fly.rotation_vector(&input), Vec3::ZERO);

    input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
    let rotation = fly.rotation_vector(&input);
    assert!(approx(rotation.y, -1.0));
    assert!(approx(rotation.x, 1.0));
}
