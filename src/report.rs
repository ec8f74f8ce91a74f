//! Text summaries and PNG charts for finished sessions.

use std::path::{Path, PathBuf};

use chrono::Local;
use plotters::prelude::*;
use tracing::info;

use crate::core::ballistics::sample_trajectory;
use crate::core::window::{AxisWindow, DISTANCE_TO_HEIGHT_RATIO};
use crate::error::{SimError, SimResult};
use crate::host::{LaunchRun, PendulumRun};

const CHART_SIZE: (u32, u32) = (1280, 720);
const TRAJECTORY_SAMPLES: usize = 200;

/// `MM:SS`, as shown by the pendulum timer readout.
pub fn format_clock(seconds: f32) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let minutes = (total / 60.0).floor() as u32;
    let secs = (total % 60.0).floor() as u32;
    format!("{minutes:02}:{secs:02}")
}

/// `<dir>/<stem>-YYYYMMDD-HHMMSS.<ext>` using local time.
pub fn timestamped_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("{stem}-{stamp}.{ext}"))
}

pub fn pendulum_lines(run: &PendulumRun) -> Vec<String> {
    let elapsed = run.trace.last().map_or(0.0, |(t, _)| *t);
    let mut lines = vec![
        format!("Oscillation Count: {}", run.oscillations),
        format!("Time Count: {}", format_clock(elapsed)),
        format!("Final angle: {:.4} deg", run.final_angle_deg),
    ];
    if run.small_angle_period_s.is_finite() {
        lines.push(format!(
            "Small-angle period: {:.4} s",
            run.small_angle_period_s
        ));
    }
    if let (Some(first), Some(last)) = (run.peaks_deg.first(), run.peaks_deg.last()) {
        lines.push(format!(
            "Amplitude: {first:.3} deg -> {last:.3} deg over {} turning points",
            run.peaks_deg.len()
        ));
    }
    lines
}

pub fn launch_lines(run: &LaunchRun) -> Vec<String> {
    let mut lines = Vec::new();
    match run.report {
        Some(report) => {
            lines.push(format!("Time of Flight: {:.2} s", report.time_of_flight));
            lines.push(format!("Range: {:.2} m", report.range));
            lines.push(format!("Max Height: {:.2} m", report.max_height));
        }
        None => lines.push(format!(
            "No landing within {:.2} s; projectile disposed",
            run.elapsed_s
        )),
    }
    match &run.prediction {
        Ok(p) => lines.push(format!(
            "Analytic: time {:.4} s | range {:.4} m | apex {:.4} m",
            p.time_of_flight, p.range, p.max_height
        )),
        Err(err) => lines.push(format!("Analytic: {err}")),
    }
    lines
}

fn plot_err<E: std::fmt::Display>(err: E) -> SimError {
    SimError::Plot(err.to_string())
}

fn ensure_parent(path: &Path) -> SimResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn plot_pendulum(run: &PendulumRun, path: &Path) -> SimResult<()> {
    ensure_parent(path)?;
    let duration = run.trace.last().map_or(0.0, |(t, _)| *t);
    let amplitude = run
        .trace
        .iter()
        .fold(0.0f32, |acc, (_, angle)| acc.max(angle.abs()));
    let window = AxisWindow::symmetric(duration, amplitude);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Pendulum angle", ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(44)
        .y_label_area_size(64)
        .build_cartesian_2d(0f32..window.x_span, window.y_min..window.y_max)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Angle (deg)")
        .draw()
        .map_err(plot_err)?;
    chart
        .draw_series(LineSeries::new(run.trace.iter().copied(), &BLUE))
        .map_err(plot_err)?;
    root.present().map_err(plot_err)?;

    info!(path = %path.display(), "pendulum chart written");
    Ok(())
}

pub fn plot_trajectory(run: &LaunchRun, path: &Path) -> SimResult<()> {
    ensure_parent(path)?;
    let origin = run.trajectory.first().copied().unwrap_or_default();
    let simulated: Vec<(f32, f32)> = run.trajectory.iter().map(|p| (p.x, p.y)).collect();
    let predicted: Vec<(f32, f32)> = match &run.prediction {
        Ok(p) => {
            sample_trajectory(
                origin,
                run.launch_velocity,
                run.gravity,
                p.time_of_flight,
                TRAJECTORY_SAMPLES,
            )
            .into_iter()
            .map(|v| (v.x, v.y))
            .collect()
        }
        Err(_) => Vec::new(),
    };

    let (raw_max_x, raw_max_y) = simulated
        .iter()
        .chain(predicted.iter())
        .fold((0.0f32, 0.0f32), |(mx, my), (x, y)| (mx.max(*x), my.max(*y)));
    let window = AxisWindow::fixed_ratio(raw_max_x, raw_max_y, DISTANCE_TO_HEIGHT_RATIO);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Projectile trajectory", ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(44)
        .y_label_area_size(64)
        .build_cartesian_2d(0f32..window.x_span, window.y_min..window.y_max)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(simulated, &BLUE))
        .map_err(plot_err)?
        .label("simulated")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
    if !predicted.is_empty() {
        chart
            .draw_series(LineSeries::new(predicted, &RED.mix(0.6)))
            .map_err(plot_err)?
            .label("analytic")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;
    root.present().map_err(plot_err)?;

    info!(path = %path.display(), "trajectory chart written");
    Ok(())
}
