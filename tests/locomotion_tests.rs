//! Locomotion Animator Tests
//!
//! Tests for:
//! - Start preconditions (missing or stale target)
//! - Phase sequencing and overshoot carry-over
//! - Full-cycle return to the start pose
//! - Pause/resume preserving state and progress
//! - Cooperative cancellation and the animation system driver

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use depot::animation::{
    AnimationSystem, LocomotionAnimator, LocomotionState, PatrolAxis, PatrolSettings, TickControl,
    TravelDirection,
};
use depot::errors::DepotError;
use depot::models::{Anchor, RobotParams, build_robot};
use depot::scene::{NodeHandle, Scene};

const EPSILON: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn heading_approx(a: f32, b: f32) -> bool {
    let diff = (a - b).rem_euclid(TAU);
    diff < EPSILON || TAU - diff < EPSILON
}

const START: Vec3 = Vec3::new(100.0, 20.0, -300.0);

fn settings() -> PatrolSettings {
    PatrolSettings {
        axis: PatrolAxis::X,
        distance: 500.0,
        duration: 4.0,
    }
}

fn robot_scene() -> (Scene, NodeHandle) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut scene = Scene::new();
    let model = build_robot(RobotParams::default()).unwrap().at(START);
    let robot = scene.instantiate(&model, None).unwrap().anchor(Anchor::Robot).unwrap();
    (scene, robot)
}

fn position(scene: &Scene, robot: NodeHandle) -> Vec3 {
    scene.get_node(robot).unwrap().transform.position
}

fn heading(scene: &Scene, robot: NodeHandle) -> f32 {
    scene.get_node(robot).unwrap().transform.yaw()
}

fn run(animator: &mut LocomotionAnimator, scene: &mut Scene, dt: f32, ticks: usize) {
    for _ in 0..ticks {
        assert_eq!(animator.tick(scene, dt), TickControl::Continue);
    }
}

// ============================================================================
// Start
// ============================================================================

#[test]
fn start_without_target_reports_no_tracked_entity() {
    let (scene, _) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings());

    let err = animator.start(&scene).unwrap_err();
    assert!(matches!(err, DepotError::NoTrackedEntity(_)));
    assert_eq!(animator.state(), LocomotionState::Idle);
}

#[test]
fn start_with_removed_target_reports_no_tracked_entity() {
    let (mut scene, robot) = robot_scene();
    scene.remove_node(robot);
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);

    assert!(matches!(animator.start(&scene), Err(DepotError::NoTrackedEntity(_))));
    assert_eq!(animator.state(), LocomotionState::Idle);
}

#[test]
fn start_rejects_non_positive_duration() {
    let (scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(PatrolSettings {
        duration: 0.0,
        ..settings()
    })
    .tracking(robot);

    assert!(matches!(
        animator.start(&scene),
        Err(DepotError::InvalidDimension {
            parameter: "duration",
            ..
        })
    ));
    assert!(!animator.is_running());
}

#[test]
fn idle_animator_does_not_touch_the_node() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    run(&mut animator, &mut scene, 1.0, 5);
    assert_eq!(position(&scene, robot), START);
}

// ============================================================================
// Phases
// ============================================================================

#[test]
fn moves_linearly_then_turns() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();
    assert_eq!(animator.state(), LocomotionState::MovingForward);

    run(&mut animator, &mut scene, 1.0, 1);
    assert!(vec3_approx(position(&scene, robot), START + Vec3::new(125.0, 0.0, 0.0)));
    assert!(approx(animator.progress(), 0.25));

    run(&mut animator, &mut scene, 1.0, 3);
    assert_eq!(animator.state(), LocomotionState::TurningToBackward);
    assert!(vec3_approx(position(&scene, robot), START + Vec3::new(500.0, 0.0, 0.0)));

    // a turn takes half the leg duration
    run(&mut animator, &mut scene, 1.0, 1);
    assert!(approx(heading(&scene, robot), PI / 2.0));
    run(&mut animator, &mut scene, 1.0, 1);
    assert_eq!(animator.state(), LocomotionState::MovingBackward);
    assert_eq!(animator.direction(), TravelDirection::Backward);
    assert!(heading_approx(heading(&scene, robot), PI));

    run(&mut animator, &mut scene, 2.0, 1);
    assert!(vec3_approx(position(&scene, robot), START + Vec3::new(250.0, 0.0, 0.0)));
}

#[test]
fn overshoot_carries_into_the_next_phase() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();

    run(&mut animator, &mut scene, 3.0, 1);
    // 4 s forward + 2 s turn consumed by the second tick
    run(&mut animator, &mut scene, 3.0, 1);

    assert_eq!(animator.state(), LocomotionState::MovingBackward);
    assert!(approx(animator.progress(), 0.0));
    assert!(vec3_approx(position(&scene, robot), START + Vec3::new(500.0, 0.0, 0.0)));
    assert!(heading_approx(heading(&scene, robot), PI));
}

#[test]
fn full_cycle_returns_to_start_pose() {
    let (mut scene, robot) = robot_scene();
    let start_heading = heading(&scene, robot);
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();

    // 4 + 2 + 4 + 2 seconds
    run(&mut animator, &mut scene, 0.25, 48);

    assert_eq!(animator.state(), LocomotionState::MovingForward);
    assert_eq!(animator.direction(), TravelDirection::Forward);
    assert!(vec3_approx(position(&scene, robot), START));
    assert!(heading_approx(heading(&scene, robot), start_heading));
}

#[test]
fn cycles_repeat_without_drift() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();

    run(&mut animator, &mut scene, 0.1, 1200);

    // 120 s is ten whole cycles
    assert!((position(&scene, robot) - START).length() < 0.5);
    assert!(heading_approx(heading(&scene, robot), 0.0) || animator.state().is_turning());
    let h = heading(&scene, robot);
    assert!((0.0..TAU + EPSILON).contains(&h) || animator.state().is_turning());
}

#[test]
fn patrol_axis_is_configurable() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(PatrolSettings {
        axis: PatrolAxis::Z,
        ..settings()
    })
    .tracking(robot);
    animator.start(&scene).unwrap();
    run(&mut animator, &mut scene, 2.0, 1);
    assert!(vec3_approx(position(&scene, robot), START + Vec3::new(0.0, 0.0, 250.0)));
}

// ============================================================================
// Pause / Resume
// ============================================================================

#[test]
fn pause_and_resume_preserve_progress() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();
    run(&mut animator, &mut scene, 1.0, 1);

    animator.pause();
    // suspension lands on the next tick boundary, without moving the node
    assert_eq!(animator.state(), LocomotionState::MovingForward);
    run(&mut animator, &mut scene, 1.0, 1);
    assert_eq!(animator.state(), LocomotionState::Idle);
    assert!(animator.is_paused());
    assert_eq!(animator.suspended_state(), Some(LocomotionState::MovingForward));
    assert!(approx(animator.progress(), 0.25));
    let paused_at = position(&scene, robot);
    assert!(vec3_approx(paused_at, START + Vec3::new(125.0, 0.0, 0.0)));

    run(&mut animator, &mut scene, 1.0, 10);
    assert_eq!(position(&scene, robot), paused_at);

    animator.resume();
    assert_eq!(animator.state(), LocomotionState::MovingForward);
    assert!(approx(animator.progress(), 0.25));
    run(&mut animator, &mut scene, 1.0, 1);
    assert!(vec3_approx(position(&scene, robot), START + Vec3::new(250.0, 0.0, 0.0)));
}

#[test]
fn pause_mid_turn_resumes_the_turn() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();
    run(&mut animator, &mut scene, 1.0, 5);
    assert_eq!(animator.state(), LocomotionState::TurningToBackward);

    animator.pause();
    run(&mut animator, &mut scene, 1.0, 1);
    assert_eq!(animator.suspended_state(), Some(LocomotionState::TurningToBackward));

    animator.start(&scene).unwrap();
    assert_eq!(animator.state(), LocomotionState::TurningToBackward);
    run(&mut animator, &mut scene, 1.0, 1);
    assert_eq!(animator.state(), LocomotionState::MovingBackward);
}

#[test]
fn toggle_cycles_start_pause_resume() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);

    animator.toggle(&scene).unwrap();
    assert!(animator.is_running());
    run(&mut animator, &mut scene, 2.0, 1);

    animator.toggle(&scene).unwrap();
    run(&mut animator, &mut scene, 2.0, 1);
    assert!(!animator.is_running());

    animator.toggle(&scene).unwrap();
    assert_eq!(animator.state(), LocomotionState::MovingForward);
    assert!(approx(animator.progress(), 0.5));
}

#[test]
fn resume_before_the_boundary_cancels_the_pause() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();
    animator.pause();
    animator.resume();
    run(&mut animator, &mut scene, 1.0, 1);
    assert_eq!(animator.state(), LocomotionState::MovingForward);
    assert!(approx(animator.progress(), 0.25));
}

#[test]
fn second_toggle_before_the_boundary_withdraws_the_pause() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();
    run(&mut animator, &mut scene, 1.0, 1);

    animator.toggle(&scene).unwrap();
    animator.toggle(&scene).unwrap();
    run(&mut animator, &mut scene, 1.0, 1);
    assert_eq!(animator.state(), LocomotionState::MovingForward);
    assert!(!animator.is_paused());
    assert!(approx(animator.progress(), 0.5));
}

#[test]
fn start_while_running_withdraws_a_pending_pause() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();
    animator.pause();
    animator.start(&scene).unwrap();
    run(&mut animator, &mut scene, 1.0, 1);
    assert_eq!(animator.state(), LocomotionState::MovingForward);
}

#[test]
fn time_beyond_the_transition_cap_is_dropped() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();

    // one full cycle is 12 s; the rest of the tick is discarded
    run(&mut animator, &mut scene, 100.0, 1);
    assert_eq!(animator.state(), LocomotionState::MovingForward);
    assert_eq!(animator.direction(), TravelDirection::Forward);
    assert!(approx(animator.progress(), 0.0));
    assert!(vec3_approx(position(&scene, robot), START));
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn cancel_stops_without_mutating() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();
    run(&mut animator, &mut scene, 1.0, 1);
    let before = position(&scene, robot);

    animator.cancel();
    assert_eq!(animator.tick(&mut scene, 1.0), TickControl::Stop);
    assert_eq!(animator.tick(&mut scene, 1.0), TickControl::Stop);
    assert_eq!(position(&scene, robot), before);
    assert!(!animator.is_live());
}

#[test]
fn vanished_target_stops_the_loop() {
    let (mut scene, robot) = robot_scene();
    let mut animator = LocomotionAnimator::new(settings()).tracking(robot);
    animator.start(&scene).unwrap();

    scene.clear();
    assert_eq!(animator.tick(&mut scene, 1.0), TickControl::Stop);
    assert_eq!(animator.state(), LocomotionState::Idle);
}

#[test]
fn animation_system_drops_stopped_animators() {
    let (mut scene, robot) = robot_scene();
    let mut system = AnimationSystem::new();

    let mut running = LocomotionAnimator::new(settings()).tracking(robot);
    running.start(&scene).unwrap();
    let kept = system.add(running);

    let mut cancelled = LocomotionAnimator::new(settings()).tracking(robot);
    cancelled.cancel();
    let dropped = system.add(cancelled);

    system.update(&mut scene, 1.0);

    assert_eq!(system.len(), 1);
    assert!(system.get(kept).is_some());
    assert!(system.get(dropped).is_none());
    assert!(vec3_approx(position(&scene, robot), START + Vec3::new(125.0, 0.0, 0.0)));
}
