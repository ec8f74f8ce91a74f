use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use motion_lab::core::launcher::{MAX_ANGLE_DEG, MAX_SPEED_MPS, MIN_ANGLE_DEG, MIN_SPEED_MPS};
use motion_lab::core::pendulum::MIN_LENGTH_M;

use crate::constants::{MAX_ARM_LENGTH_M, MAX_RELEASE_ANGLE_DEG};
use crate::state::{AppRuntime, Scene};

const GRAVITY_KEYS: [KeyCode; 5] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
];

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) toggle_scene: bool,
    /// Play/stop on the pendulum, fire on the launcher.
    pub(crate) primary: bool,
    pub(crate) reset: bool,
    pub(crate) cycle_gravity: bool,
    /// Preset list index picked with the number keys.
    pub(crate) gravity_index: Option<usize>,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            toggle_scene: self.toggle_scene || other.toggle_scene,
            primary: self.primary || other.primary,
            reset: self.reset || other.reset,
            cycle_gravity: self.cycle_gravity || other.cycle_gravity,
            gravity_index: self.gravity_index.or(other.gravity_index),
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        toggle_scene: is_key_pressed(KeyCode::Tab),
        primary: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
        cycle_gravity: is_key_pressed(KeyCode::G),
        gravity_index: GRAVITY_KEYS.iter().position(|key| is_key_pressed(*key)),
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let mut actions = FrameActions::default();
    let scene = state.scene;

    widgets::Window::new(hash!(), vec2(18.0, 120.0), vec2(370.0, 330.0))
        .label(&format!("{} Controls", scene.title()))
        .ui(&mut *root_ui(), |ui| {
            match scene {
                Scene::Pendulum => {
                    let before = (state.release_angle_deg, state.arm_length_m);
                    ui.slider(
                        hash!(),
                        "Angle (deg)",
                        -MAX_RELEASE_ANGLE_DEG..MAX_RELEASE_ANGLE_DEG,
                        &mut state.release_angle_deg,
                    );
                    ui.slider(
                        hash!(),
                        "Length (m)",
                        MIN_LENGTH_M..MAX_ARM_LENGTH_M,
                        &mut state.arm_length_m,
                    );
                    if before != (state.release_angle_deg, state.arm_length_m) {
                        state.reconfigure_pendulum();
                    }
                    ui.separator();
                    let label = if state.pendulum.is_running() {
                        "Stop (Space)"
                    } else {
                        "Play (Space)"
                    };
                    if ui.button(None, label) {
                        actions.primary = true;
                    }
                    if ui.button(None, "Reset (R)") {
                        actions.reset = true;
                    }
                    ui.label(
                        None,
                        &format!(
                            "g = {:.2} m/s^2 | damping = {:.3}",
                            state.pendulum.gravity(),
                            state.pendulum.damping()
                        ),
                    );
                }
                Scene::Launcher => {
                    let settings = *state.launcher.settings();
                    let mut angle = settings.angle_deg;
                    let mut speed = settings.speed_mps;
                    ui.slider(
                        hash!(),
                        "Angle (deg)",
                        MIN_ANGLE_DEG..MAX_ANGLE_DEG,
                        &mut angle,
                    );
                    ui.slider(
                        hash!(),
                        "Speed (m/s)",
                        MIN_SPEED_MPS..MAX_SPEED_MPS,
                        &mut speed,
                    );
                    state.launcher.set_angle(angle);
                    state.launcher.set_speed(speed);
                    ui.label(None, &format!("Gravity: {}", settings.gravity.label()));
                    ui.separator();
                    if ui.button(None, "Launch (Space)") {
                        actions.primary = true;
                    }
                    if ui.button(None, "Next Gravity (G)") {
                        actions.cycle_gravity = true;
                    }
                    if ui.button(None, "Clear Shots (R)") {
                        actions.reset = true;
                    }
                    if ui.button(None, "Toggle Preview") {
                        state.show_preview = !state.show_preview;
                    }
                }
            }

            ui.separator();
            let mut sim_speed = state.clock.sim_speed();
            ui.slider(hash!(), "Simulation Speed", 0.25..4.0, &mut sim_speed);
            state.clock.set_sim_speed(sim_speed);
            if ui.button(None, "Switch Scene (Tab)") {
                actions.toggle_scene = true;
            }
        });

    actions
}
