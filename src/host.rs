//! Fixed-step driving for the simulation core.
//!
//! The core only knows `integrate(dt)` / `step(dt)`; this module turns
//! variable frame times into whole fixed ticks and runs complete headless
//! sessions for the CLI and tests.

use macroquad::math::Vec3;
use tracing::debug;

use crate::config::PendulumSettings;
use crate::core::ballistics::{FlightPrediction, predict};
use crate::core::flight::FlightReport;
use crate::core::launcher::{Launcher, LauncherSettings};
use crate::core::pendulum::Pendulum;
use crate::error::SimResult;

/// Longest frame the clock will catch up on; anything beyond is dropped so
/// a stalled window does not trigger a burst of ticks.
pub const MAX_FRAME_S: f32 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    step_s: f32,
    sim_speed: f32,
    accumulator: f32,
}

impl FixedStepClock {
    pub fn new(step_s: f32) -> Self {
        Self {
            step_s,
            sim_speed: 1.0,
            accumulator: 0.0,
        }
    }

    pub fn step_s(&self) -> f32 {
        self.step_s
    }

    pub fn sim_speed(&self) -> f32 {
        self.sim_speed
    }

    pub fn set_sim_speed(&mut self, speed: f32) {
        self.sim_speed = speed.max(0.0);
    }

    /// Adds one frame's worth of time and returns how many fixed ticks are due.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += (frame_dt * self.sim_speed).clamp(0.0, MAX_FRAME_S);
        let mut due = 0;
        while self.accumulator >= self.step_s {
            self.accumulator -= self.step_s;
            due += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendulumRun {
    /// `(seconds, angle in degrees)` per tick, starting with the configured pose.
    pub trace: Vec<(f32, f32)>,
    /// Absolute angle at each turning point, in order.
    pub peaks_deg: Vec<f32>,
    pub oscillations: u32,
    pub small_angle_period_s: f32,
    pub final_angle_deg: f32,
}

pub fn run_pendulum(settings: &PendulumSettings, dt: f32) -> PendulumRun {
    let mut pendulum = Pendulum::new(settings.gravity, settings.damping);
    pendulum.configure(settings.angle_deg, settings.length_m);
    pendulum.play();

    let steps = (settings.run_seconds / dt).round() as usize;
    let mut trace = Vec::new();
    trace.push((0.0, pendulum.angle_deg()));
    let mut peaks_deg = Vec::new();

    let mut prev_velocity = pendulum.angular_velocity();
    for _ in 0..steps {
        pendulum.integrate(dt);
        let velocity = pendulum.angular_velocity();
        if is_turning_point(prev_velocity, velocity) {
            peaks_deg.push(pendulum.angle_deg().abs());
        }
        prev_velocity = velocity;
        trace.push((pendulum.elapsed_s(), pendulum.angle_deg()));
    }

    debug!(
        steps,
        oscillations = pendulum.oscillation_count(),
        "pendulum session finished"
    );
    PendulumRun {
        trace,
        peaks_deg,
        oscillations: pendulum.oscillation_count(),
        small_angle_period_s: pendulum.small_angle_period(),
        final_angle_deg: pendulum.angle_deg(),
    }
}

fn is_turning_point(prev: f32, current: f32) -> bool {
    (prev > 0.0 && current <= 0.0) || (prev < 0.0 && current >= 0.0)
}

#[derive(Debug)]
pub struct LaunchRun {
    pub trajectory: Vec<Vec3>,
    /// None when the shot was disposed before it landed.
    pub report: Option<FlightReport>,
    pub prediction: SimResult<FlightPrediction>,
    pub launch_velocity: Vec3,
    pub gravity: f32,
    pub elapsed_s: f32,
}

/// Fires one shot and ticks until it lands or is disposed.
pub fn run_launch(settings: &LauncherSettings, dt: f32) -> LaunchRun {
    let mut launcher = Launcher::new(*settings);
    let launch_velocity = launcher.muzzle_velocity();
    let gravity = settings.gravity.acceleration();
    let prediction = predict(
        launch_velocity,
        settings.muzzle_height_m - settings.floor.height,
        gravity,
    );

    let id = launcher.fire();
    let mut trajectory = vec![launcher.muzzle()];
    let mut elapsed_s = 0.0;
    let mut report = None;

    loop {
        let disposed = launcher.step(dt);
        elapsed_s += dt;
        if let Some(shot) = launcher.shot(id) {
            trajectory.push(shot.body.position);
        }
        if let Some(landing) = launcher.take_landings().into_iter().find(|l| l.shot == id) {
            report = Some(landing.report);
            break;
        }
        if disposed.contains(&id) {
            break;
        }
    }

    LaunchRun {
        trajectory,
        report,
        prediction,
        launch_velocity,
        gravity,
        elapsed_s,
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedStepClock, MAX_FRAME_S, run_launch, run_pendulum};
    use crate::config::PendulumSettings;
    use crate::core::gravity::GravityPreset;
    use crate::core::launcher::LauncherSettings;

    #[test]
    fn clock_carries_remainder() {
        let mut clock = FixedStepClock::new(0.01);
        assert_eq!(clock.advance(0.025), 2);
        assert_eq!(clock.advance(0.006), 1);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn clock_caps_long_frames() {
        let mut clock = FixedStepClock::new(0.03125);
        let due = clock.advance(5.0);
        assert_eq!(due, (MAX_FRAME_S / 0.03125).floor() as u32);
    }

    #[test]
    fn clock_scales_with_sim_speed() {
        let mut clock = FixedStepClock::new(0.01);
        clock.set_sim_speed(2.0);
        assert_eq!(clock.advance(0.0251), 5);
    }

    #[test]
    fn pendulum_session_records_decaying_peaks() {
        let run = run_pendulum(
            &PendulumSettings {
                run_seconds: 10.0,
                ..PendulumSettings::default()
            },
            1.0 / 60.0,
        );
        assert_eq!(run.trace.len(), 601);
        assert!(run.peaks_deg.len() > 4);
        assert!(run.peaks_deg.windows(2).all(|w| w[1] < w[0]));
        assert!(run.oscillations >= 3);
    }

    #[test]
    fn launch_session_matches_prediction() {
        let run = run_launch(&LauncherSettings::default(), 1.0 / 60.0);
        let report = run.report.expect("lands on ground");
        let prediction = run.prediction.expect("earth gravity lands");
        assert!((report.time_of_flight - prediction.time_of_flight).abs() < 2.0 / 60.0);
        assert!((report.range - prediction.range).abs() < 0.3);
    }

    #[test]
    fn zero_gravity_session_ends_unlanded() {
        let run = run_launch(
            &LauncherSettings {
                gravity: GravityPreset::Zero,
                auto_despawn_s: 1.0,
                ..LauncherSettings::default()
            },
            1.0 / 60.0,
        );
        assert!(run.report.is_none());
        assert!(run.prediction.is_err());
        assert!(run.elapsed_s >= 1.0 - 1e-3);
    }
}
