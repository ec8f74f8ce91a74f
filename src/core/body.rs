use macroquad::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::flight::BodySample;

/// Vertical rebound speed below which a bounce is absorbed and the body
/// stays on the floor.
pub const SETTLE_SPEED_MPS: f32 = 0.3;
/// Speed below which a grounded body counts towards falling asleep.
pub const SLEEP_SPEED_MPS: f32 = 0.05;
pub const SLEEP_TIME_S: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Floor {
    pub height: f32,
    pub restitution: f32,
    /// Coulomb friction coefficient applied while sliding on the floor.
    pub friction: f32,
    /// Tagged ground ends a flight on first contact; any other surface goes
    /// through the deferred rest check.
    pub ground: bool,
}

impl Default for Floor {
    fn default() -> Self {
        Self {
            height: 0.0,
            restitution: 0.4,
            friction: 0.6,
            ground: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub ground: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticBody {
    pub position: Vec3,
    pub velocity: Vec3,
    grounded: bool,
    sleeping: bool,
    slow_for_s: f32,
}

impl BallisticBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: false,
            sleeping: false,
            slow_for_s: 0.0,
        }
    }

    pub fn launch(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.grounded = false;
        self.sleeping = false;
        self.slow_for_s = 0.0;
    }

    /// Advances one fixed step. Returns a contact when the body touches down
    /// from the air; resting and sliding on the floor report nothing.
    pub fn step(&mut self, dt: f32, gravity: Vec3, floor: &Floor) -> Option<Contact> {
        if self.sleeping {
            return None;
        }

        let prev = self.position;
        self.velocity += gravity * dt;
        if self.grounded && self.velocity.y <= 0.0 {
            self.velocity.y = 0.0;
        }
        self.position += self.velocity * dt;

        let mut contact = None;
        if self.position.y <= floor.height && self.velocity.y <= 0.0 {
            let was_airborne = !self.grounded || prev.y > floor.height;
            self.position.y = floor.height;

            let rebound = -self.velocity.y * floor.restitution;
            if rebound > SETTLE_SPEED_MPS {
                self.velocity.y = rebound;
                self.grounded = false;
            } else {
                self.velocity.y = 0.0;
                self.grounded = true;
            }

            if was_airborne {
                contact = Some(Contact {
                    ground: floor.ground,
                });
            }
        } else if self.position.y > floor.height {
            self.grounded = false;
        }

        if self.grounded {
            self.apply_friction(dt, gravity, floor);
            self.update_sleep(dt);
        }

        contact
    }

    fn apply_friction(&mut self, dt: f32, gravity: Vec3, floor: &Floor) {
        let planar = Vec3::new(self.velocity.x, 0.0, self.velocity.z);
        let speed = planar.length();
        if speed <= f32::EPSILON {
            return;
        }
        let decel = floor.friction * gravity.y.abs() * dt;
        let scale = (speed - decel).max(0.0) / speed;
        self.velocity.x *= scale;
        self.velocity.z *= scale;
    }

    fn update_sleep(&mut self, dt: f32) {
        if self.velocity.length() < SLEEP_SPEED_MPS {
            self.slow_for_s += dt;
            if self.slow_for_s >= SLEEP_TIME_S {
                self.sleeping = true;
                self.velocity = Vec3::ZERO;
            }
        } else {
            self.slow_for_s = 0.0;
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn sample(&self) -> BodySample {
        BodySample {
            position: self.position,
            velocity: self.velocity,
            sleeping: self.sleeping,
        }
    }
}

#[cfg(test)]
mod tests {
    use macroquad::math::Vec3;

    use super::{BallisticBody, Floor};

    const EARTH: Vec3 = Vec3::new(0.0, -9.81, 0.0);

    #[test]
    fn integrates_velocity_before_position() {
        let mut body = BallisticBody::new(Vec3::new(0.0, 10.0, 0.0));
        body.launch(Vec3::new(1.0, 0.0, 0.0));
        body.step(0.5, EARTH, &Floor::default());
        assert_eq!(body.velocity, Vec3::new(1.0, -4.905, 0.0));
        assert_eq!(body.position, Vec3::new(0.5, 10.0 - 4.905 * 0.5, 0.0));
    }

    #[test]
    fn reports_one_contact_on_touchdown() {
        let floor = Floor {
            restitution: 0.0,
            ..Floor::default()
        };
        let mut body = BallisticBody::new(Vec3::new(0.0, 1.0, 0.0));
        let mut contacts = 0;
        for _ in 0..240 {
            if body.step(1.0 / 60.0, EARTH, &floor).is_some() {
                contacts += 1;
            }
        }
        assert_eq!(contacts, 1);
        assert_eq!(body.position.y, 0.0);
        assert!(body.is_grounded());
    }

    #[test]
    fn bounces_then_settles_and_sleeps() {
        let floor = Floor {
            restitution: 0.5,
            ground: false,
            ..Floor::default()
        };
        let mut body = BallisticBody::new(Vec3::new(0.0, 5.0, 0.0));
        body.launch(Vec3::new(3.0, 0.0, 0.0));
        let mut contacts = Vec::new();
        for _ in 0..(60 * 10) {
            if let Some(c) = body.step(1.0 / 60.0, EARTH, &floor) {
                contacts.push(c);
            }
        }
        assert!(contacts.len() > 1);
        assert!(contacts.iter().all(|c| !c.ground));
        assert!(body.is_sleeping());
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn zero_gravity_never_lands() {
        let mut body = BallisticBody::new(Vec3::new(0.0, 1.0, 0.0));
        body.launch(Vec3::new(1.0, 1.0, 0.0));
        for _ in 0..600 {
            assert!(body.step(1.0 / 60.0, Vec3::ZERO, &Floor::default()).is_none());
        }
        assert!(body.position.y > 1.0);
    }
}
