//! Damped nonlinear pendulum.
//!
//! The model integrates `θ'' = -(g / L) sin θ` with a per-tick velocity
//! damping factor. It knows nothing about rendering: a host reads
//! [`Pendulum::angle_rad`] and [`Pendulum::length`] (or [`Pendulum::pose`])
//! to place the arm and bob.

use std::f32::consts::TAU;

use macroquad::math::Vec3;
use tracing::debug;

pub const MIN_LENGTH_M: f32 = 0.1;
pub const DEFAULT_GRAVITY_MPS2: f32 = 9.81;
pub const DEFAULT_DAMPING: f32 = 0.995;
pub const DEFAULT_ANGLE_DEG: f32 = 20.0;
pub const DEFAULT_LENGTH_M: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Pendulum {
    gravity: f32,
    damping: f32,
    configured_angle_deg: f32,
    configured_length: f32,
    angle_rad: f32,
    angular_velocity: f32,
    angular_acceleration: f32,
    running: bool,
    elapsed_s: f32,
    zero_crossings: u32,
}

impl Default for Pendulum {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY_MPS2, DEFAULT_DAMPING)
    }
}

impl Pendulum {
    /// Creates a stopped pendulum configured at the default 20° / 2 m pose.
    pub fn new(gravity: f32, damping: f32) -> Self {
        let mut pendulum = Self {
            gravity,
            damping: clamp_damping(damping),
            configured_angle_deg: 0.0,
            configured_length: MIN_LENGTH_M,
            angle_rad: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            running: false,
            elapsed_s: 0.0,
            zero_crossings: 0,
        };
        pendulum.configure(DEFAULT_ANGLE_DEG, DEFAULT_LENGTH_M);
        pendulum
    }

    /// Sets the rest pose the pendulum starts from and snaps to it.
    ///
    /// Lengths below [`MIN_LENGTH_M`] (and NaN) are raised to the minimum.
    /// Calling this mid-run keeps the run going from the new pose.
    pub fn configure(&mut self, angle_deg: f32, length: f32) {
        self.configured_angle_deg = angle_deg;
        self.configured_length = length.max(MIN_LENGTH_M);

        self.angle_rad = angle_deg.to_radians();
        self.angular_velocity = 0.0;
        self.angular_acceleration = 0.0;
        self.elapsed_s = 0.0;
        self.zero_crossings = 0;
    }

    pub fn play(&mut self) {
        if !self.running {
            debug!(
                angle_deg = self.configured_angle_deg,
                length_m = self.configured_length,
                "pendulum started"
            );
        }
        self.running = true;
    }

    /// Halts the swing and snaps back to the configured pose.
    pub fn stop(&mut self) {
        if self.running {
            debug!(elapsed_s = self.elapsed_s, "pendulum stopped");
        }
        self.running = false;
        self.angular_velocity = 0.0;
        self.configure(self.configured_angle_deg, self.configured_length);
    }

    /// Re-applies the configured pose without touching the running flag.
    pub fn reset(&mut self) {
        self.configure(self.configured_angle_deg, self.configured_length);
    }

    /// One fixed tick. Does nothing while stopped.
    ///
    /// The update order (acceleration, velocity, damping, angle) is part of
    /// the model's behaviour: damping is applied once per tick, so its decay
    /// rate per second depends on the tick rate.
    pub fn integrate(&mut self, dt: f32) {
        if !self.running {
            return;
        }

        let previous_angle = self.angle_rad;

        self.angular_acceleration = -(self.gravity / self.configured_length) * self.angle_rad.sin();
        self.angular_velocity += self.angular_acceleration * dt;
        self.angular_velocity *= self.damping;
        self.angle_rad += self.angular_velocity * dt;

        self.elapsed_s += dt;
        if crossed_zero(previous_angle, self.angle_rad) {
            self.zero_crossings += 1;
        }
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.damping = clamp_damping(damping);
    }

    pub fn angle_rad(&self) -> f32 {
        self.angle_rad
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_rad.to_degrees()
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn angular_acceleration(&self) -> f32 {
        self.angular_acceleration
    }

    pub fn configured_angle_deg(&self) -> f32 {
        self.configured_angle_deg
    }

    /// Arm length in meters, never below [`MIN_LENGTH_M`].
    pub fn length(&self) -> f32 {
        self.configured_length
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds integrated since the last configure.
    pub fn elapsed_s(&self) -> f32 {
        self.elapsed_s
    }

    /// Full swings completed since the last configure.
    pub fn oscillation_count(&self) -> u32 {
        self.zero_crossings / 2
    }

    /// Period of the linearised pendulum, `2π·sqrt(L/g)`.
    pub fn small_angle_period(&self) -> f32 {
        if self.gravity <= 0.0 {
            return f32::INFINITY;
        }
        TAU * (self.configured_length / self.gravity).sqrt()
    }

    pub fn pose(&self) -> ArmPose {
        ArmPose::new(self.angle_rad, self.configured_length)
    }
}

fn clamp_damping(damping: f32) -> f32 {
    if damping.is_nan() {
        return DEFAULT_DAMPING;
    }
    damping.clamp(f32::MIN_POSITIVE, 1.0)
}

fn crossed_zero(previous: f32, current: f32) -> bool {
    (previous > 0.0 && current <= 0.0) || (previous < 0.0 && current >= 0.0)
}

/// Render-only projection of the pendulum state.
///
/// The arm is modelled as a unit cylinder hanging from the pivot: its y scale
/// is half the length and its centre sits half a length below the pivot, so
/// its top stays on the pivot. The bob hangs a full length below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmPose {
    pub angle_rad: f32,
    pub rotation_deg: f32,
    pub length: f32,
    pub arm_half_length: f32,
    pub arm_center: Vec3,
    pub bob_offset: Vec3,
}

impl ArmPose {
    fn new(angle_rad: f32, length: f32) -> Self {
        Self {
            angle_rad,
            rotation_deg: angle_rad.to_degrees(),
            length,
            arm_half_length: length / 2.0,
            arm_center: Vec3::new(0.0, -length / 2.0, 0.0),
            bob_offset: Vec3::new(0.0, -length, 0.0),
        }
    }

    /// Bob position after rotating the local offset about the pivot's z axis.
    pub fn bob_world(&self, pivot: Vec3) -> Vec3 {
        pivot + Vec3::new(self.length * self.angle_rad.sin(), -self.length * self.angle_rad.cos(), 0.0)
    }
}
