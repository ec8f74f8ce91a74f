use macroquad::prelude::*;
use tracing::info;

use motion_lab::core::flight::FlightPhase;
use motion_lab::core::gravity::GravityPreset;
use motion_lab::core::pendulum::MIN_LENGTH_M;

use crate::constants::{
    ANGLE_KEY_RATE_DEG, LENGTH_KEY_RATE_MPS, MAX_ARM_LENGTH_M, MAX_RELEASE_ANGLE_DEG,
    SPEED_KEY_RATE_MPS, TRAIL_MAX_POINTS,
};
use crate::controls::FrameActions;
use crate::state::{AppRuntime, Scene, Trail};

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if actions.toggle_scene {
        state.scene = state.scene.other();
        state.clock.reset();
        state.status_line = format!("Switched to {}", state.scene.title());
    }

    match state.scene {
        Scene::Pendulum => {
            if actions.primary {
                if state.pendulum.is_running() {
                    state.pendulum.stop();
                    state.status_line = String::from("Pendulum stopped");
                } else {
                    state.pendulum.play();
                    state.status_line = String::from("Pendulum running");
                }
            }
            if actions.reset {
                state.pendulum.reset();
                state.status_line = String::from("Pendulum reset");
            }
        }
        Scene::Launcher => {
            let picked = actions
                .gravity_index
                .and_then(GravityPreset::from_index)
                .or_else(|| {
                    actions
                        .cycle_gravity
                        .then(|| state.launcher.settings().gravity.next())
                });
            if let Some(gravity) = picked {
                state.launcher.set_gravity(gravity);
                state.status_line = format!("Gravity: {}", gravity.label());
            }
            if actions.reset {
                state.clear_launcher();
                state.status_line = String::from("Shots cleared");
            }
            if actions.primary {
                let id = state.launcher.fire();
                state.trails.push(Trail {
                    shot: id,
                    points: vec![state.launcher.muzzle()],
                });
                state.status_line = format!("Shot {} away", id.0);
            }
        }
    }
}

/// Held-key adjustments, scaled by frame time so they feel the same at
/// any refresh rate.
pub(crate) fn apply_keyboard_adjustments(state: &mut AppRuntime, frame_dt: f32) {
    match state.scene {
        Scene::Pendulum => {
            let mut angle = state.release_angle_deg;
            let mut length = state.arm_length_m;
            if is_key_down(KeyCode::Up) {
                angle += ANGLE_KEY_RATE_DEG * frame_dt;
            }
            if is_key_down(KeyCode::Down) {
                angle -= ANGLE_KEY_RATE_DEG * frame_dt;
            }
            if is_key_down(KeyCode::Right) {
                length += LENGTH_KEY_RATE_MPS * frame_dt;
            }
            if is_key_down(KeyCode::Left) {
                length -= LENGTH_KEY_RATE_MPS * frame_dt;
            }
            let angle = angle.clamp(-MAX_RELEASE_ANGLE_DEG, MAX_RELEASE_ANGLE_DEG);
            let length = length.clamp(MIN_LENGTH_M, MAX_ARM_LENGTH_M);
            if angle != state.release_angle_deg || length != state.arm_length_m {
                state.release_angle_deg = angle;
                state.arm_length_m = length;
                state.reconfigure_pendulum();
            }
        }
        Scene::Launcher => {
            let settings = *state.launcher.settings();
            if is_key_down(KeyCode::W) {
                state
                    .launcher
                    .set_angle(settings.angle_deg + ANGLE_KEY_RATE_DEG * frame_dt);
            }
            if is_key_down(KeyCode::S) {
                state
                    .launcher
                    .set_angle(settings.angle_deg - ANGLE_KEY_RATE_DEG * frame_dt);
            }
            if is_key_down(KeyCode::D) {
                state
                    .launcher
                    .set_speed(settings.speed_mps + SPEED_KEY_RATE_MPS * frame_dt);
            }
            if is_key_down(KeyCode::A) {
                state
                    .launcher
                    .set_speed(settings.speed_mps - SPEED_KEY_RATE_MPS * frame_dt);
            }
        }
    }
}

/// Runs every fixed tick due this frame. Both scenes keep simulating while
/// hidden.
pub(crate) fn step_simulation(state: &mut AppRuntime, frame_dt: f32) {
    let ticks = state.clock.advance(frame_dt);
    let dt = state.clock.step_s();

    for _ in 0..ticks {
        state.pendulum.integrate(dt);

        let disposed = state.launcher.step(dt);
        if !disposed.is_empty() {
            state.trails.retain(|trail| !disposed.contains(&trail.shot));
        }
        for trail in &mut state.trails {
            let Some(shot) = state.launcher.shot(trail.shot) else {
                continue;
            };
            if shot.phase() == FlightPhase::Launched && trail.points.len() < TRAIL_MAX_POINTS {
                trail.points.push(shot.body.position);
            }
        }
    }

    if let Some(landing) = state.launcher.take_landings().into_iter().last() {
        info!(shot = landing.shot.0, report = %landing.report, "landing shown");
        state.status_line = format!("Shot {} landed", landing.shot.0);
        state.last_landing = Some(landing);
    }
}
