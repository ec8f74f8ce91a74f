use macroquad::math::Vec3;

use crate::error::{SimError, SimResult};

/// Closed-form flight over flat ground at the launch height's reference
/// level (y = 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightPrediction {
    pub time_of_flight: f32,
    pub max_height: f32,
    pub range: f32,
}

/// Muzzle velocity for an elevation angle above the +x axis, in the x/y plane.
pub fn launch_velocity(angle_deg: f32, speed_mps: f32) -> Vec3 {
    let theta = angle_deg.to_radians();
    Vec3::new(speed_mps * theta.cos(), speed_mps * theta.sin(), 0.0)
}

pub fn trajectory_at_time(origin: Vec3, velocity: Vec3, gravity: f32, time_s: f32) -> Vec3 {
    Vec3::new(
        origin.x + velocity.x * time_s,
        origin.y + (velocity.y * time_s) - (0.5 * gravity * time_s * time_s),
        origin.z + velocity.z * time_s,
    )
}

pub fn predict(velocity: Vec3, launch_height: f32, gravity: f32) -> SimResult<FlightPrediction> {
    if !velocity.is_finite() || !launch_height.is_finite() || !gravity.is_finite() {
        return Err(SimError::NoLanding("inputs must be finite numbers".to_string()));
    }
    if gravity <= 0.0 {
        return Err(SimError::NoLanding(format!(
            "gravity {gravity} m/s^2 never brings the projectile down"
        )));
    }

    let vy = velocity.y;
    let disc = vy * vy + 2.0 * gravity * launch_height;
    if disc < 0.0 {
        return Err(SimError::NoLanding(format!(
            "vy^2 + 2*g*h is negative ({disc})"
        )));
    }

    let t_land = (vy + disc.sqrt()) / gravity;
    if t_land < 0.0 {
        return Err(SimError::NoLanding(format!(
            "landing time computed as negative ({t_land})"
        )));
    }

    let apex = if vy > 0.0 {
        launch_height + (vy * vy) / (2.0 * gravity)
    } else {
        launch_height
    };
    let planar_speed = Vec3::new(velocity.x, 0.0, velocity.z).length();

    Ok(FlightPrediction {
        time_of_flight: t_land,
        max_height: apex,
        range: planar_speed * t_land,
    })
}

pub fn sample_trajectory(
    origin: Vec3,
    velocity: Vec3,
    gravity: f32,
    time_of_flight_s: f32,
    samples: usize,
) -> Vec<Vec3> {
    let sample_count = samples.max(2);
    (0..=sample_count)
        .map(|i| {
            let t = (i as f32 * time_of_flight_s) / sample_count as f32;
            trajectory_at_time(origin, velocity, gravity, t)
        })
        .collect()
}
