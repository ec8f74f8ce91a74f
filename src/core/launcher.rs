//! The launcher entity: aims, fires and retires projectiles.
//!
//! Each shot pairs a [`BallisticBody`] (moved here, as the host physics) with
//! a [`FlightTracker`]. When a shot is fired the launcher registers its
//! results sink as the tracker's landing observer; the registration goes away
//! with the shot when it is disposed.

use std::cell::RefCell;
use std::rc::Rc;

use macroquad::math::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::ballistics::launch_velocity;
use crate::core::body::{BallisticBody, Floor};
use crate::core::flight::{FlightPhase, FlightReport, FlightTracker, RestDetection};
use crate::core::gravity::GravityPreset;

pub const MIN_ANGLE_DEG: f32 = 0.0;
pub const MAX_ANGLE_DEG: f32 = 90.0;
pub const MIN_SPEED_MPS: f32 = 0.0;
pub const MAX_SPEED_MPS: f32 = 100.0;
pub const DEFAULT_AUTO_DESPAWN_S: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    pub angle_deg: f32,
    pub speed_mps: f32,
    pub gravity: GravityPreset,
    pub muzzle_height_m: f32,
    /// Seconds after firing at which a shot is disposed, landed or not.
    pub auto_despawn_s: f32,
    pub floor: Floor,
    pub rest: RestDetection,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            speed_mps: 10.0,
            gravity: GravityPreset::Earth,
            muzzle_height_m: 0.0,
            auto_despawn_s: DEFAULT_AUTO_DESPAWN_S,
            floor: Floor::default(),
            rest: RestDetection::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShotId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub shot: ShotId,
    pub report: FlightReport,
}

#[derive(Debug)]
pub struct Shot {
    pub id: ShotId,
    pub body: BallisticBody,
    pub tracker: FlightTracker,
    pub age_s: f32,
}

impl Shot {
    pub fn phase(&self) -> FlightPhase {
        self.tracker.phase()
    }
}

#[derive(Debug)]
pub struct Launcher {
    settings: LauncherSettings,
    shots: Vec<Shot>,
    next_id: u32,
    landings: Rc<RefCell<Vec<Landing>>>,
}

impl Launcher {
    pub fn new(settings: LauncherSettings) -> Self {
        let mut launcher = Self {
            settings,
            shots: Vec::new(),
            next_id: 1,
            landings: Rc::new(RefCell::new(Vec::new())),
        };
        launcher.set_angle(settings.angle_deg);
        launcher.set_speed(settings.speed_mps);
        launcher
    }

    pub fn settings(&self) -> &LauncherSettings {
        &self.settings
    }

    pub fn set_angle(&mut self, angle_deg: f32) {
        self.settings.angle_deg = angle_deg.clamp(MIN_ANGLE_DEG, MAX_ANGLE_DEG);
    }

    pub fn set_speed(&mut self, speed_mps: f32) {
        self.settings.speed_mps = speed_mps.clamp(MIN_SPEED_MPS, MAX_SPEED_MPS);
    }

    /// Applies to shots already in the air as well as future ones.
    pub fn set_gravity(&mut self, gravity: GravityPreset) {
        if gravity != self.settings.gravity {
            debug!(gravity = %gravity, "gravity changed");
        }
        self.settings.gravity = gravity;
    }

    pub fn muzzle(&self) -> Vec3 {
        Vec3::new(0.0, self.settings.muzzle_height_m, 0.0)
    }

    pub fn muzzle_velocity(&self) -> Vec3 {
        launch_velocity(self.settings.angle_deg, self.settings.speed_mps)
    }

    pub fn fire(&mut self) -> ShotId {
        let id = ShotId(self.next_id);
        self.next_id += 1;

        let muzzle = self.muzzle();
        let velocity = self.muzzle_velocity();

        let mut body = BallisticBody::new(muzzle);
        body.launch(velocity);

        let mut tracker = FlightTracker::new(muzzle, self.settings.rest);
        let sink = Rc::clone(&self.landings);
        tracker.subscribe(move |report: &FlightReport| {
            sink.borrow_mut().push(Landing { shot: id, report: *report });
        });
        tracker.launch(velocity);

        info!(
            shot = id.0,
            angle_deg = self.settings.angle_deg,
            speed_mps = self.settings.speed_mps,
            gravity = %self.settings.gravity,
            "shot fired"
        );
        self.shots.push(Shot {
            id,
            body,
            tracker,
            age_s: 0.0,
        });
        id
    }

    /// One fixed tick for every live shot. Returns the shots disposed this
    /// tick because they outlived the auto-despawn delay.
    pub fn step(&mut self, dt: f32) -> Vec<ShotId> {
        let gravity = self.settings.gravity.vector();
        let floor = self.settings.floor;

        for shot in &mut self.shots {
            shot.age_s += dt;
            let contact = shot.body.step(dt, gravity, &floor);
            shot.tracker.tick(dt, shot.body.position);
            if let Some(contact) = contact {
                shot.tracker.on_contact(contact.ground);
            }
            let sample = shot.body.sample();
            shot.tracker.update_rest(dt, sample.velocity, sample.sleeping);
        }

        let lifetime = self.settings.auto_despawn_s;
        let mut disposed = Vec::new();
        self.shots.retain(|shot| {
            if shot.age_s >= lifetime {
                disposed.push(shot.id);
                false
            } else {
                true
            }
        });
        if !disposed.is_empty() {
            debug!(count = disposed.len(), "shots disposed");
        }
        disposed
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn shot(&self, id: ShotId) -> Option<&Shot> {
        self.shots.iter().find(|s| s.id == id)
    }

    /// True while some shot is still in the air; a host can use this to
    /// gate its fire control.
    pub fn has_shot_in_flight(&self) -> bool {
        self.shots
            .iter()
            .any(|s| s.phase() == FlightPhase::Launched)
    }

    /// Landings reported since the previous call.
    pub fn take_landings(&mut self) -> Vec<Landing> {
        std::mem::take(&mut *self.landings.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::{Launcher, LauncherSettings, MAX_SPEED_MPS, ShotId};
    use crate::core::body::Floor;
    use crate::core::flight::FlightPhase;
    use crate::core::gravity::GravityPreset;

    const DT: f32 = 1.0 / 60.0;

    fn settings() -> LauncherSettings {
        LauncherSettings {
            angle_deg: 45.0,
            speed_mps: 10.0,
            auto_despawn_s: 10.0,
            ..LauncherSettings::default()
        }
    }

    #[test]
    fn clamps_aim_and_speed() {
        let mut launcher = Launcher::new(LauncherSettings {
            angle_deg: 120.0,
            speed_mps: 500.0,
            ..LauncherSettings::default()
        });
        assert_eq!(launcher.settings().angle_deg, 90.0);
        assert_eq!(launcher.settings().speed_mps, MAX_SPEED_MPS);
        launcher.set_angle(-5.0);
        assert_eq!(launcher.settings().angle_deg, 0.0);
    }

    #[test]
    fn shot_lands_on_ground_and_reports_once() {
        let mut launcher = Launcher::new(settings());
        let id = launcher.fire();
        assert!(launcher.has_shot_in_flight());

        let mut landings = Vec::new();
        for _ in 0..(60 * 3) {
            launcher.step(DT);
            landings.extend(launcher.take_landings());
        }

        assert_eq!(landings.len(), 1);
        assert_eq!(landings[0].shot, id);
        let report = landings[0].report;
        assert!((report.range - 10.2).abs() < 0.4, "range={}", report.range);
        assert!((report.time_of_flight - 1.44).abs() < 0.05);
        assert!(!launcher.has_shot_in_flight());
    }

    #[test]
    fn shots_are_disposed_after_lifetime() {
        let mut launcher = Launcher::new(LauncherSettings {
            auto_despawn_s: 0.5,
            gravity: GravityPreset::Zero,
            ..settings()
        });
        let id = launcher.fire();
        let mut disposed = Vec::new();
        for _ in 0..60 {
            disposed.extend(launcher.step(DT));
        }
        assert_eq!(disposed, vec![id]);
        assert!(launcher.shot(id).is_none());
        assert!(launcher.take_landings().is_empty());
    }

    #[test]
    fn deck_surface_lands_through_rest_check() {
        let mut launcher = Launcher::new(LauncherSettings {
            floor: Floor {
                ground: false,
                ..Floor::default()
            },
            ..settings()
        });
        let id = launcher.fire();
        let mut landed_at = None;
        for step in 0..(60 * 8) {
            launcher.step(DT);
            if !launcher.take_landings().is_empty() {
                landed_at = Some(step);
                break;
            }
        }
        let step = landed_at.expect("shot should come to rest and land");
        assert!(step as f32 * DT > 1.44);
        let shot = launcher.shot(id).expect("still alive before despawn");
        assert_eq!(shot.phase(), FlightPhase::Landed);
    }

    #[test]
    fn ids_are_unique() {
        let mut launcher = Launcher::new(settings());
        let a = launcher.fire();
        let b = launcher.fire();
        assert_ne!(a, b);
        assert_eq!(a, ShotId(1));
        assert_eq!(launcher.shots().len(), 2);
    }
}
