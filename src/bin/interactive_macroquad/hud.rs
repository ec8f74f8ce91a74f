use macroquad::prelude::*;

use motion_lab::report::format_clock;

use crate::constants::{CONTROLS_Y, LEFT_MARGIN, TITLE_Y};
use crate::render::draw_ui_text;
use crate::state::{AppRuntime, Scene};

pub(crate) fn draw_hud(state: &AppRuntime, screen_h: f32, font: Option<&Font>) {
    let header_color = Color::from_rgba(32, 36, 44, 255);
    draw_ui_text(state.scene.title(), 18.0, TITLE_Y, 34, header_color, font);

    let keys = match state.scene {
        Scene::Pendulum => "Up/Down angle | Left/Right length | Space play/stop | R reset | Tab switch",
        Scene::Launcher => "W/S angle | A/D speed | G/1-5 gravity | Space fire | R clear | Tab switch",
    };
    draw_ui_text(keys, 18.0, CONTROLS_Y, 20, DARKGRAY, font);

    let left = LEFT_MARGIN;
    match state.scene {
        Scene::Pendulum => draw_pendulum_readout(state, left, screen_h, header_color, font),
        Scene::Launcher => draw_launcher_readout(state, left, screen_h, header_color, font),
    }
    draw_ui_text(&state.status_line, left, screen_h - 14.0, 18, DARKGRAY, font);
}

fn draw_pendulum_readout(
    state: &AppRuntime,
    left: f32,
    screen_h: f32,
    color: Color,
    font: Option<&Font>,
) {
    let pendulum = &state.pendulum;
    draw_ui_text(
        &format!(
            "Oscillation Count: {} | Time Count: {}",
            pendulum.oscillation_count(),
            format_clock(pendulum.elapsed_s())
        ),
        left,
        screen_h - 70.0,
        26,
        color,
        font,
    );
    draw_ui_text(
        &format!(
            "Angle: {:.1} deg | Length: {:.2} m | Period: {:.2} s | {}",
            pendulum.pose().rotation_deg,
            pendulum.length(),
            pendulum.small_angle_period(),
            if pendulum.is_running() { "Running" } else { "Stopped" }
        ),
        left,
        screen_h - 40.0,
        20,
        BLUE,
        font,
    );
}

fn draw_launcher_readout(
    state: &AppRuntime,
    left: f32,
    screen_h: f32,
    color: Color,
    font: Option<&Font>,
) {
    let result = match state.last_landing {
        Some(landing) => landing.report.to_string(),
        None => String::from("Time of Flight: - | Range: - | Max Height: -"),
    };
    draw_ui_text(&result, left, screen_h - 70.0, 26, color, font);

    let settings = state.launcher.settings();
    draw_ui_text(
        &format!(
            "Angle: {:.1} deg | Speed: {:.1} m/s | Gravity: {} | Shots: {}{}",
            settings.angle_deg,
            settings.speed_mps,
            settings.gravity.label(),
            state.launcher.shots().len(),
            if state.launcher.has_shot_in_flight() {
                " | In flight"
            } else {
                ""
            }
        ),
        left,
        screen_h - 40.0,
        20,
        BLUE,
        font,
    );
}
