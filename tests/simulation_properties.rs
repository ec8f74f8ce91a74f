use std::cell::RefCell;
use std::rc::Rc;

use macroquad::math::Vec3;
use motion_lab::config::PendulumSettings;
use motion_lab::core::body::{BallisticBody, Floor};
use motion_lab::core::flight::{FlightPhase, FlightReport, RestCheck, RestDetection};
use motion_lab::core::launcher::LauncherSettings;
use motion_lab::core::pendulum::MIN_LENGTH_M;
use motion_lab::host::{run_launch, run_pendulum};
use motion_lab::{FlightTracker, Pendulum};
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn counting_tracker(start: Vec3) -> (FlightTracker, Rc<RefCell<Vec<FlightReport>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut tracker = FlightTracker::new(start, RestDetection::default());
    tracker.subscribe(move |report: &FlightReport| sink.borrow_mut().push(*report));
    (tracker, seen)
}

// =============================================================================
// Pendulum
// =============================================================================

proptest! {
    #[test]
    fn damped_peaks_strictly_decrease(
        damping in 0.98f32..0.999,
        angle in 5.0f32..60.0,
        length in 0.5f32..4.0,
    ) {
        let run = run_pendulum(
            &PendulumSettings { damping, angle_deg: angle, length_m: length, run_seconds: 8.0, ..PendulumSettings::default() },
            DT,
        );
        prop_assert!(run.peaks_deg.len() >= 2);
        for pair in run.peaks_deg.windows(2) {
            prop_assert!(pair[1] < pair[0], "peaks {:?}", run.peaks_deg);
        }
    }

    #[test]
    fn undamped_peaks_hold_amplitude(
        angle in 5.0f32..45.0,
        length in 1.0f32..4.0,
    ) {
        let run = run_pendulum(
            &PendulumSettings { damping: 1.0, angle_deg: angle, length_m: length, run_seconds: 8.0, ..PendulumSettings::default() },
            DT,
        );
        prop_assert!(!run.peaks_deg.is_empty());
        for peak in &run.peaks_deg {
            prop_assert!((peak - angle).abs() < angle * 0.03 + 0.1, "peak {} from {}", peak, angle);
        }
    }

    #[test]
    fn short_lengths_clamp_to_minimum(length in -10.0f32..=0.1, angle in -90.0f32..90.0) {
        let mut pendulum = Pendulum::default();
        pendulum.configure(angle, length);
        prop_assert_eq!(pendulum.length(), MIN_LENGTH_M);
    }

    #[test]
    fn second_stop_changes_nothing(ticks in 0usize..300) {
        let mut pendulum = Pendulum::default();
        pendulum.play();
        for _ in 0..ticks {
            pendulum.integrate(DT);
        }
        pendulum.stop();
        let once = pendulum.clone();
        pendulum.stop();
        prop_assert_eq!(pendulum, once);
    }
}

// =============================================================================
// Flight tracker
// =============================================================================

proptest! {
    #[test]
    fn range_ignores_height_along_the_way(heights in prop::collection::vec(-5.0f32..50.0, 0..40)) {
        let (mut tracker, _) = counting_tracker(Vec3::ZERO);
        tracker.launch(Vec3::new(3.0, 10.0, 4.0));
        let steps = heights.len() as f32 + 1.0;
        for (i, y) in heights.iter().enumerate() {
            let t = (i as f32 + 1.0) / steps;
            tracker.tick(DT, Vec3::new(3.0 * t, *y, 4.0 * t));
        }
        tracker.tick(DT, Vec3::new(3.0, 0.0, 4.0));
        let report = tracker.land().expect("first landing reports");
        prop_assert!((report.range - 5.0).abs() < 1e-5);
    }

    #[test]
    fn max_height_is_highest_sample(
        launch_y in 0.0f32..10.0,
        heights in prop::collection::vec(-5.0f32..50.0, 1..60),
    ) {
        let (mut tracker, _) = counting_tracker(Vec3::new(0.0, launch_y, 0.0));
        tracker.launch(Vec3::new(1.0, 1.0, 0.0));
        for y in &heights {
            tracker.tick(DT, Vec3::new(0.0, *y, 0.0));
        }
        let expected = heights.iter().copied().fold(launch_y, f32::max);
        prop_assert_eq!(tracker.max_height(), expected);
    }

    #[test]
    fn landing_twice_notifies_once(ticks in 1usize..120, extra_lands in 1usize..5) {
        let (mut tracker, seen) = counting_tracker(Vec3::ZERO);
        tracker.launch(Vec3::new(2.0, 5.0, 0.0));
        for i in 0..ticks {
            tracker.tick(DT, Vec3::new(i as f32 * 0.1, 1.0, 0.0));
        }
        let first = tracker.land().expect("first landing reports");
        for _ in 0..extra_lands {
            prop_assert!(tracker.land().is_none());
            tracker.on_contact(true);
        }
        prop_assert_eq!(seen.borrow().len(), 1);
        prop_assert_eq!(tracker.report(), Some(first));
        prop_assert_eq!(tracker.phase(), FlightPhase::Landed);
    }
}

#[test]
fn vertical_shot_lands_after_two_v_over_g() {
    let floor = Floor::default();
    let gravity = Vec3::new(0.0, -9.81, 0.0);
    let velocity = Vec3::new(0.0, 10.0, 0.0);

    let mut body = BallisticBody::new(Vec3::ZERO);
    body.launch(velocity);
    let (mut tracker, seen) = counting_tracker(Vec3::ZERO);
    tracker.launch(velocity);

    for _ in 0..600 {
        let contact = body.step(DT, gravity, &floor);
        tracker.tick(DT, body.position);
        if let Some(contact) = contact {
            tracker.on_contact(contact.ground);
        }
        if tracker.has_landed() {
            break;
        }
    }

    let report = tracker.report().expect("lands on ground");
    assert!((report.time_of_flight - 2.0 * 10.0 / 9.81).abs() < 2.0 * DT);
    assert!(report.range < 1e-4);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn deck_landing_needs_repeating_rest_check() {
    let deck = |mode| LauncherSettings {
        floor: Floor {
            ground: false,
            ..Floor::default()
        },
        rest: RestDetection {
            mode,
            ..RestDetection::default()
        },
        ..LauncherSettings::default()
    };

    let repeating = run_launch(&deck(RestCheck::Repeating), DT);
    let report = repeating.report.expect("comes to rest on the deck");
    assert!(report.range > 0.0);

    let one_shot = run_launch(&deck(RestCheck::OneShot), DT);
    assert!(one_shot.report.is_none());
}
