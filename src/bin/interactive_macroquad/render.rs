use macroquad::prelude::*;

use motion_lab::core::ballistics::{predict, sample_trajectory};
use motion_lab::core::flight::FlightPhase;
use motion_lab::core::window::{AxisWindow, DISTANCE_TO_HEIGHT_RATIO};

use crate::constants::{
    BOB_RADIUS_PX, MAX_ARM_LENGTH_M, PIVOT_DROP_PX, PREVIEW_SAMPLES, SHOT_RADIUS_PX,
    X_GRID_LINES, Y_GRID_LINES,
};
use crate::state::AppRuntime;

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_grid(left: f32, right: f32, top: f32, bottom: f32, color: Color) {
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = left + t * (right - left);
        draw_line(x, top, x, bottom, 1.0, color);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = bottom - t * (bottom - top);
        draw_line(left, y, right, y, 1.0, color);
    }
}

pub(crate) fn draw_axis_ticks(
    window: &AxisWindow,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    font: Option<&Font>,
) {
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let font_size: u16 = 16;

    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = left + t * (right - left);
        let label = format!("{:.1}", t * window.x_span);
        let size = measure_text(&label, font, font_size, 1.0);
        draw_ui_text(&label, x - size.width * 0.5, bottom + 22.0, font_size, label_color, font);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = bottom - t * (bottom - top);
        let label = format!("{:.1}", window.y_min + t * window.y_span());
        let size = measure_text(&label, font, font_size, 1.0);
        draw_ui_text(&label, left - size.width - 10.0, y + 5.0, font_size, label_color, font);
    }
}

/// Pivot at the top centre of the plot area; the scale fits the longest
/// arm the controls allow.
pub(crate) fn draw_pendulum(state: &AppRuntime, left: f32, right: f32, top: f32, bottom: f32) {
    let pivot = vec2((left + right) * 0.5, top + PIVOT_DROP_PX);
    let px_per_m = (bottom - pivot.y - BOB_RADIUS_PX) / MAX_ARM_LENGTH_M;
    let to_screen = |offset: Vec3| vec2(pivot.x + offset.x * px_per_m, pivot.y - offset.y * px_per_m);

    let pose = state.pendulum.pose();
    let release = state.pendulum.configured_angle_deg().to_radians();
    let release_tip = to_screen(Vec3::new(
        pose.length * release.sin(),
        -pose.length * release.cos(),
        0.0,
    ));
    draw_line(
        pivot.x,
        pivot.y,
        release_tip.x,
        release_tip.y,
        1.5,
        Color::from_rgba(76, 141, 245, 110),
    );
    draw_line(
        pivot.x,
        pivot.y,
        pivot.x,
        bottom,
        1.0,
        Color::from_rgba(190, 196, 204, 255),
    );

    let bob = to_screen(pose.bob_world(Vec3::ZERO));
    draw_line(pivot.x, pivot.y, bob.x, bob.y, 4.0, Color::from_rgba(64, 70, 80, 255));
    draw_rectangle(pivot.x - 40.0, pivot.y - 8.0, 80.0, 8.0, DARKGRAY);
    draw_circle(bob.x, bob.y, BOB_RADIUS_PX, Color::from_rgba(229, 83, 75, 255));
    draw_circle_lines(bob.x, bob.y, BOB_RADIUS_PX, 2.0, Color::from_rgba(32, 32, 36, 255));
}

pub(crate) fn draw_path(
    points: &[Vec3],
    window: &AxisWindow,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    thickness: f32,
    color: Color,
) {
    for pair in points.windows(2) {
        let (x1, y1) = window.to_screen(pair[0].x, pair[0].y, left, right, top, bottom);
        let (x2, y2) = window.to_screen(pair[1].x, pair[1].y, left, right, top, bottom);
        draw_line(x1, y1, x2, y2, thickness, color);
    }
}

/// Analytic arc for the current aim, or nothing when the shot never comes
/// down (zero gravity).
pub(crate) fn preview_path(state: &AppRuntime) -> Vec<Vec3> {
    let settings = state.launcher.settings();
    let gravity = settings.gravity.acceleration();
    let velocity = state.launcher.muzzle_velocity();
    match predict(velocity, settings.muzzle_height_m - settings.floor.height, gravity) {
        Ok(prediction) => sample_trajectory(
            state.launcher.muzzle(),
            velocity,
            gravity,
            prediction.time_of_flight,
            PREVIEW_SAMPLES,
        ),
        Err(_) => Vec::new(),
    }
}

/// View window that keeps the preview, every trail and the muzzle on screen.
pub(crate) fn launch_window(state: &AppRuntime, preview: &[Vec3]) -> AxisWindow {
    let muzzle = state.launcher.muzzle();
    let (max_x, max_y) = state
        .trails
        .iter()
        .flat_map(|trail| trail.points.iter())
        .chain(preview.iter())
        .fold((0.0f32, muzzle.y), |(mx, my), p| (mx.max(p.x), my.max(p.y)));
    AxisWindow::fixed_ratio(max_x, max_y, DISTANCE_TO_HEIGHT_RATIO)
}

pub(crate) fn draw_launch_scene(
    state: &AppRuntime,
    window: &AxisWindow,
    preview: &[Vec3],
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
) {
    let settings = state.launcher.settings();
    let (floor_left, floor_y) = window.to_screen(0.0, settings.floor.height, left, right, top, bottom);
    let floor_color = if settings.floor.ground {
        Color::from_rgba(81, 160, 92, 255)
    } else {
        Color::from_rgba(150, 110, 70, 255)
    };
    draw_line(floor_left, floor_y, right, floor_y, 3.0, floor_color);

    if state.show_preview {
        draw_path(
            preview,
            window,
            left,
            right,
            top,
            bottom,
            2.0,
            Color::from_rgba(76, 141, 245, 140),
        );
    }

    for trail in &state.trails {
        draw_path(
            &trail.points,
            window,
            left,
            right,
            top,
            bottom,
            2.5,
            Color::from_rgba(229, 83, 75, 200),
        );
    }

    for shot in state.launcher.shots() {
        let p = shot.body.position;
        let (x, y) = window.to_screen(p.x, p.y, left, right, top, bottom);
        let fill = match shot.phase() {
            FlightPhase::Landed => GRAY,
            _ => Color::from_rgba(229, 83, 75, 255),
        };
        draw_circle(x, y, SHOT_RADIUS_PX, fill);
    }

    let muzzle = state.launcher.muzzle();
    let (mx, my) = window.to_screen(muzzle.x, muzzle.y, left, right, top, bottom);
    let aim = state.launcher.muzzle_velocity().normalize_or_zero();
    draw_line(mx, my, mx + aim.x * 48.0, my - aim.y * 48.0, 6.0, DARKGRAY);
    draw_circle(mx, my, 10.0, Color::from_rgba(64, 70, 80, 255));
}
