//! Flight metrics for a single projectile.
//!
//! A [`FlightTracker`] is owned by one projectile entity. It is told where the
//! entity is every fixed tick and what it touched; it never moves anything
//! itself. Landing happens once, either on contact with a ground surface or
//! when a deferred rest check finds the body (nearly) still.

use std::fmt;

use macroquad::math::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_SLEEP_VELOCITY_THRESHOLD: f32 = 0.2;
pub const DEFAULT_CHECK_SLEEP_DELAY_S: f32 = 0.25;

/// What to do when a rest check finds the body still moving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestCheck {
    /// Drop the check. Only a later contact arms another one.
    OneShot,
    /// Check again after another delay until the body lands.
    #[default]
    Repeating,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestDetection {
    pub velocity_threshold: f32,
    pub check_delay_s: f32,
    pub mode: RestCheck,
}

impl Default for RestDetection {
    fn default() -> Self {
        Self {
            velocity_threshold: DEFAULT_SLEEP_VELOCITY_THRESHOLD,
            check_delay_s: DEFAULT_CHECK_SLEEP_DELAY_S,
            mode: RestCheck::Repeating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    Idle,
    Launched,
    Landed,
}

/// Final metrics handed to landing observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightReport {
    pub time_of_flight: f32,
    pub range: f32,
    pub max_height: f32,
}

impl fmt::Display for FlightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time of Flight: {:.2} s | Range: {:.2} m | Max Height: {:.2} m",
            self.time_of_flight, self.range, self.max_height
        )
    }
}

/// Snapshot of the body a tracker follows, supplied by the host each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySample {
    pub position: Vec3,
    pub velocity: Vec3,
    pub sleeping: bool,
}

pub trait LandingObserver {
    fn on_landed(&mut self, report: &FlightReport);
}

impl<F> LandingObserver for F
where
    F: FnMut(&FlightReport),
{
    fn on_landed(&mut self, report: &FlightReport) {
        self(report);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub struct FlightTracker {
    rest: RestDetection,
    position: Vec3,
    launch_position: Vec3,
    launch_velocity: Vec3,
    time_of_flight: f32,
    max_height: f32,
    range: f32,
    launched: bool,
    has_landed: bool,
    // Seconds until the armed rest check comes due.
    rest_check_in: Option<f32>,
    observers: Vec<(ObserverId, Box<dyn LandingObserver>)>,
    next_observer: u64,
}

impl fmt::Debug for FlightTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlightTracker")
            .field("phase", &self.phase())
            .field("position", &self.position)
            .field("launch_position", &self.launch_position)
            .field("time_of_flight", &self.time_of_flight)
            .field("max_height", &self.max_height)
            .field("range", &self.range)
            .field("rest_check_in", &self.rest_check_in)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl FlightTracker {
    pub fn new(position: Vec3, rest: RestDetection) -> Self {
        Self {
            rest,
            position,
            launch_position: position,
            launch_velocity: Vec3::ZERO,
            time_of_flight: 0.0,
            max_height: position.y,
            range: 0.0,
            launched: false,
            has_landed: false,
            rest_check_in: None,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Registers an observer for the landing notification.
    pub fn subscribe(&mut self, observer: impl LandingObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false when the id was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Starts tracking from the current position. Legal from any phase.
    pub fn launch(&mut self, velocity: Vec3) {
        self.launch_position = self.position;
        self.launch_velocity = velocity;
        self.time_of_flight = 0.0;
        self.max_height = self.position.y;
        self.range = 0.0;
        self.launched = true;
        self.has_landed = false;
        self.rest_check_in = None;
        debug!(
            x = self.position.x,
            y = self.position.y,
            z = self.position.z,
            speed = velocity.length(),
            "projectile launched"
        );
    }

    pub fn tick(&mut self, dt: f32, position: Vec3) {
        self.position = position;
        if self.launched && !self.has_landed {
            self.time_of_flight += dt;
            self.max_height = self.max_height.max(position.y);
        }
    }

    /// Contact reported by the collision system.
    pub fn on_contact(&mut self, is_ground: bool) {
        if !self.launched || self.has_landed {
            return;
        }
        if is_ground {
            self.land();
            return;
        }
        if self.rest_check_in.is_none() {
            self.rest_check_in = Some(self.rest.check_delay_s);
            debug!(delay_s = self.rest.check_delay_s, "rest check armed");
        }
    }

    /// Advances the armed rest check, if any, and lands when it finds the
    /// body at rest.
    pub fn update_rest(&mut self, dt: f32, velocity: Vec3, sleeping: bool) {
        let Some(remaining) = self.rest_check_in else {
            return;
        };
        if !self.launched || self.has_landed {
            self.rest_check_in = None;
            return;
        }

        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.rest_check_in = Some(remaining);
            return;
        }

        if sleeping || velocity.length() <= self.rest.velocity_threshold {
            self.land();
            return;
        }

        self.rest_check_in = match self.rest.mode {
            RestCheck::OneShot => None,
            RestCheck::Repeating => Some(self.rest.check_delay_s),
        };
    }

    /// Tick followed by the rest check, for hosts that have a full body sample.
    pub fn track(&mut self, dt: f32, body: BodySample) {
        self.tick(dt, body.position);
        self.update_rest(dt, body.velocity, body.sleeping);
    }

    /// Ends the flight at the current position. Only the first call after a
    /// launch has any effect; it returns the report it sent to observers.
    pub fn land(&mut self) -> Option<FlightReport> {
        if !self.launched || self.has_landed {
            return None;
        }

        self.has_landed = true;
        self.launched = false;
        self.rest_check_in = None;

        let planar = Vec3::new(
            self.position.x - self.launch_position.x,
            0.0,
            self.position.z - self.launch_position.z,
        );
        self.range = planar.length();

        let report = FlightReport {
            time_of_flight: self.time_of_flight,
            range: self.range,
            max_height: self.max_height,
        };
        info!(
            time_s = report.time_of_flight,
            max_height_m = report.max_height,
            range_m = report.range,
            "projectile landed"
        );

        for (_, observer) in &mut self.observers {
            observer.on_landed(&report);
        }
        Some(report)
    }

    pub fn phase(&self) -> FlightPhase {
        if self.has_landed {
            FlightPhase::Landed
        } else if self.launched {
            FlightPhase::Launched
        } else {
            FlightPhase::Idle
        }
    }

    pub fn is_launched(&self) -> bool {
        self.launched
    }

    pub fn has_landed(&self) -> bool {
        self.has_landed
    }

    pub fn rest_check_pending(&self) -> bool {
        self.rest_check_in.is_some()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn launch_position(&self) -> Vec3 {
        self.launch_position
    }

    pub fn launch_velocity(&self) -> Vec3 {
        self.launch_velocity
    }

    pub fn time_of_flight(&self) -> f32 {
        self.time_of_flight
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn rest_detection(&self) -> RestDetection {
        self.rest
    }

    /// Final metrics, once landed.
    pub fn report(&self) -> Option<FlightReport> {
        self.has_landed.then_some(FlightReport {
            time_of_flight: self.time_of_flight,
            range: self.range,
            max_height: self.max_height,
        })
    }
}
