use macroquad::prelude::*;
use tracing::warn;

use motion_lab::config::{self, DEFAULT_CONFIG_PATH};
use motion_lab::logging;

use crate::constants::{
    BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN, MSAA_SAMPLES,
    RIGHT_MARGIN, TOP_MARGIN, UI_FONT_PATH,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::gameplay::{apply_actions, apply_keyboard_adjustments, step_simulation};
use crate::hud::draw_hud;
use crate::render::{
    draw_axis_ticks, draw_grid, draw_launch_scene, draw_pendulum, launch_window, preview_path,
};
use crate::state::{AppRuntime, Scene};

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Motion Lab".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    logging::init(1);
    let config = config::load_or_default(DEFAULT_CONFIG_PATH);

    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!(path = UI_FONT_PATH, error = %err, "falling back to default font");
            None
        }
    };

    let mut state = AppRuntime::new(&config);

    loop {
        let frame_dt = get_frame_time();
        let screen_w = screen_width();
        let screen_h = screen_height();

        let left = LEFT_MARGIN;
        let right = screen_w - RIGHT_MARGIN;
        let top = TOP_MARGIN;
        let bottom = screen_h - BOTTOM_MARGIN;

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        apply_actions(&mut state, actions);
        apply_keyboard_adjustments(&mut state, frame_dt);
        step_simulation(&mut state, frame_dt);

        clear_background(Color::from_rgba(250, 251, 253, 255));
        draw_grid(
            left,
            right,
            top,
            bottom,
            Color::from_rgba(227, 231, 236, 255),
        );

        match state.scene {
            Scene::Pendulum => draw_pendulum(&state, left, right, top, bottom),
            Scene::Launcher => {
                let preview = preview_path(&state);
                let window = launch_window(&state, &preview);
                draw_line(left, bottom, right, bottom, 2.0, DARKGRAY);
                draw_line(left, top, left, bottom, 2.0, DARKGRAY);
                draw_axis_ticks(&window, left, right, top, bottom, ui_font.as_ref());
                draw_launch_scene(&state, &window, &preview, left, right, top, bottom);
            }
        }

        draw_hud(&state, screen_h, ui_font.as_ref());
        next_frame().await;
    }
}
