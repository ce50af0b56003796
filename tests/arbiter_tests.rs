//! Control Arbiter Tests
//!
//! Tests for:
//! - Exclusive activation and deactivate-before-enable ordering
//! - Idempotent activation
//! - Missing handler / missing viewpoint failures
//! - Routing updates to the active handler only
//! - Viewpoint replacement

use std::cell::RefCell;
use std::rc::Rc;

use depot::app::input::Input;
use depot::controls::{
    CameraSettings, ControlArbiter, ControlHandler, ControlKind, ControlSettings, OrbitControls,
    Viewpoint,
};
use depot::errors::DepotError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Enable(ControlKind),
    Disable(ControlKind),
    Update(ControlKind),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug)]
struct RecordingHandler {
    kind: ControlKind,
    enabled: bool,
    log: CallLog,
}

impl ControlHandler for RecordingHandler {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn enable(&mut self, _viewpoint: &mut Viewpoint) {
        self.enabled = true;
        self.log.borrow_mut().push(Call::Enable(self.kind));
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.log.borrow_mut().push(Call::Disable(self.kind));
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn update(&mut self, _viewpoint: &mut Viewpoint, _input: &Input, _dt: f32) {
        self.log.borrow_mut().push(Call::Update(self.kind));
    }
}

fn viewpoint() -> Viewpoint {
    Viewpoint::perspective(&CameraSettings::default().perspective, 16.0 / 9.0)
}

fn recording_arbiter() -> (ControlArbiter, CallLog) {
    let log: CallLog = Rc::default();
    let mut arbiter = ControlArbiter::new(Some(viewpoint()));
    for kind in ControlKind::ALL {
        arbiter.register(Box::new(RecordingHandler {
            kind,
            enabled: false,
            log: Rc::clone(&log),
        }));
    }
    (arbiter, log)
}

fn count(log: &CallLog, call: Call) -> usize {
    log.borrow().iter().filter(|&&c| c == call).count()
}

#[test]
fn switching_handlers_disables_each_previous_one_once() {
    let (mut arbiter, log) = recording_arbiter();

    arbiter.activate(ControlKind::Trackball).unwrap();
    arbiter.activate(ControlKind::Fly).unwrap();
    arbiter.activate(ControlKind::Orbit).unwrap();

    assert_eq!(count(&log, Call::Disable(ControlKind::Trackball)), 1);
    assert_eq!(count(&log, Call::Disable(ControlKind::Fly)), 1);
    assert_eq!(count(&log, Call::Disable(ControlKind::Orbit)), 0);
    assert_eq!(arbiter.active(), Some(ControlKind::Orbit));
    assert_eq!(arbiter.enabled_count(), 1);
}

#[test]
fn previous_handler_is_disabled_before_next_is_enabled() {
    let (mut arbiter, log) = recording_arbiter();

    arbiter.activate(ControlKind::Trackball).unwrap();
    arbiter.activate(ControlKind::Fly).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            Call::Enable(ControlKind::Trackball),
            Call::Disable(ControlKind::Trackball),
            Call::Enable(ControlKind::Fly),
        ]
    );
}

#[test]
fn activating_the_active_handler_is_a_no_op() {
    let (mut arbiter, log) = recording_arbiter();

    arbiter.activate(ControlKind::Orbit).unwrap();
    arbiter.activate(ControlKind::Orbit).unwrap();

    assert_eq!(count(&log, Call::Enable(ControlKind::Orbit)), 1);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn deactivate_only_affects_the_active_handler() {
    let (mut arbiter, log) = recording_arbiter();
    arbiter.activate(ControlKind::FirstPerson).unwrap();

    assert!(!arbiter.deactivate(ControlKind::Fly));
    assert_eq!(arbiter.active(), Some(ControlKind::FirstPerson));

    assert!(arbiter.deactivate(ControlKind::FirstPerson));
    assert_eq!(arbiter.active(), None);
    assert_eq!(arbiter.enabled_count(), 0);
    assert!(!arbiter.deactivate(ControlKind::FirstPerson));
    assert_eq!(count(&log, Call::Disable(ControlKind::FirstPerson)), 1);
}

#[test]
fn unregistered_handler_is_unavailable() {
    let log: CallLog = Rc::default();
    let mut arbiter = ControlArbiter::new(Some(viewpoint()));
    arbiter.register(Box::new(RecordingHandler {
        kind: ControlKind::Orbit,
        enabled: false,
        log: Rc::clone(&log),
    }));
    arbiter.activate(ControlKind::Orbit).unwrap();

    let err = arbiter.activate(ControlKind::Fly).unwrap_err();
    assert!(matches!(err, DepotError::HandlerUnavailable(ControlKind::Fly)));
    // state unchanged: orbit still active and never disabled
    assert_eq!(arbiter.active(), Some(ControlKind::Orbit));
    assert_eq!(count(&log, Call::Disable(ControlKind::Orbit)), 0);
}

#[test]
fn activation_without_viewpoint_reports_no_tracked_entity() {
    let log: CallLog = Rc::default();
    let mut arbiter = ControlArbiter::new(None);
    arbiter.register(Box::new(RecordingHandler {
        kind: ControlKind::Trackball,
        enabled: false,
        log: Rc::clone(&log),
    }));

    let err = arbiter.activate(ControlKind::Trackball).unwrap_err();
    assert!(matches!(err, DepotError::NoTrackedEntity(_)));
    assert_eq!(arbiter.active(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn only_the_active_handler_receives_updates() {
    let (mut arbiter, log) = recording_arbiter();
    let input = Input::new();

    arbiter.update(&input, 0.016);
    assert!(log.borrow().is_empty());

    arbiter.activate(ControlKind::Fly).unwrap();
    arbiter.update(&input, 0.016);
    arbiter.update(&input, 0.016);

    let updates: Vec<_> = log
        .borrow()
        .iter()
        .filter(|c| matches!(c, Call::Update(_)))
        .copied()
        .collect();
    assert_eq!(updates, vec![Call::Update(ControlKind::Fly); 2]);
}

#[test]
fn replacing_the_viewpoint_rebinds_the_active_handler() {
    let (mut arbiter, log) = recording_arbiter();
    arbiter.activate(ControlKind::Trackball).unwrap();
    log.borrow_mut().clear();

    let ortho = Viewpoint::orthographic(&CameraSettings::default().orthographic);
    let old = arbiter.replace_viewpoint(ortho).unwrap();

    assert!(old.is_perspective());
    assert_eq!(arbiter.viewpoint().unwrap().label(), "Orthographic");
    assert_eq!(arbiter.active(), Some(ControlKind::Trackball));
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Disable(ControlKind::Trackball),
            Call::Enable(ControlKind::Trackball)
        ]
    );
}

#[test]
fn replacing_the_active_handler_leaves_nothing_active() {
    let (mut arbiter, log) = recording_arbiter();
    arbiter.activate(ControlKind::Orbit).unwrap();

    let previous = arbiter.register(Box::new(RecordingHandler {
        kind: ControlKind::Orbit,
        enabled: false,
        log: Rc::clone(&log),
    }));

    assert!(previous.is_some());
    assert_eq!(arbiter.active(), None);
    assert_eq!(count(&log, Call::Disable(ControlKind::Orbit)), 1);
}

#[test]
fn default_handlers_stay_exclusive() {
    let mut arbiter = ControlArbiter::with_default_handlers(&ControlSettings::default(), viewpoint());
    let sequence = [
        ControlKind::Orbit,
        ControlKind::Fly,
        ControlKind::Fly,
        ControlKind::FirstPerson,
        ControlKind::Trackball,
        ControlKind::Orbit,
    ];
    for kind in sequence {
        arbiter.activate(kind).unwrap();
        assert_eq!(arbiter.enabled_count(), 1);
        assert!(arbiter.is_active(kind));
    }

    let orbit = arbiter.handler::<OrbitControls>(ControlKind::Orbit).unwrap();
    assert!(orbit.is_enabled());
    assert!(arbiter.handler::<OrbitControls>(ControlKind::Fly).is_none());
}

#[test]
fn control_identifiers_parse() {
    for kind in ControlKind::ALL {
        assert_eq!(kind.to_string().parse::<ControlKind>().unwrap(), kind);
    }
    assert_eq!("firstPerson".parse::<ControlKind>().unwrap(), ControlKind::FirstPerson);
    assert!(matches!(
        "joystick".parse::<ControlKind>(),
        Err(DepotError::UnknownControl(_))
    ));
}
