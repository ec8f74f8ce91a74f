use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::debug;

use motion_lab::config::{self, DEFAULT_CONFIG_PATH, SimConfig};
use motion_lab::core::flight::RestCheck;
use motion_lab::host::{run_launch, run_pendulum};
use motion_lab::report::{
    launch_lines, pendulum_lines, plot_pendulum, plot_trajectory, timestamped_path,
};
use motion_lab::{SimResult, logging};

mod cli;

use cli::{Cli, Command, LaunchArgs, PendulumArgs, PlotArgs};

fn load_config(path: Option<&Path>) -> SimResult<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path),
        None => Ok(config::load_or_default(DEFAULT_CONFIG_PATH)),
    }
}

fn plot_target(args: &PlotArgs, stem: &str) -> Option<PathBuf> {
    match (&args.plot, &args.plot_dir) {
        (Some(file), _) => Some(file.clone()),
        (None, Some(dir)) => Some(timestamped_path(dir, stem, "png")),
        (None, None) => None,
    }
}

/// Config with the command-line overrides applied, validated again.
fn pendulum_config(config: &SimConfig, args: &PendulumArgs) -> SimResult<SimConfig> {
    let mut config = config.clone();
    let settings = &mut config.pendulum;
    if let Some(angle) = args.angle {
        settings.angle_deg = angle;
    }
    if let Some(length) = args.length {
        settings.length_m = length;
    }
    if let Some(damping) = args.damping {
        settings.damping = damping;
    }
    if let Some(gravity) = args.gravity {
        settings.gravity = gravity;
    }
    if let Some(seconds) = args.seconds {
        settings.run_seconds = seconds.max(0.0);
    }
    config.validate()?;
    Ok(config)
}

fn pendulum(config: &SimConfig, args: &PendulumArgs) -> SimResult<()> {
    let config = pendulum_config(config, args)?;
    let settings = config.pendulum;
    debug!(?settings, "pendulum run");

    let run = run_pendulum(&settings, config.fixed_step_s);
    println!();
    for line in pendulum_lines(&run) {
        println!("{line}");
    }

    if let Some(path) = plot_target(&args.plot, "pendulum") {
        plot_pendulum(&run, &path)?;
        println!("Chart: {}", path.display());
    }
    Ok(())
}

fn launch_config(config: &SimConfig, args: &LaunchArgs) -> SimResult<SimConfig> {
    let mut config = config.clone();
    let settings = &mut config.projectile;
    if let Some(angle) = args.angle {
        settings.angle_deg = angle;
    }
    if let Some(speed) = args.speed {
        settings.speed_mps = speed;
    }
    if let Some(gravity) = args.gravity {
        settings.gravity = gravity;
    }
    if let Some(height) = args.height {
        settings.muzzle_height_m = settings.floor.height + height.max(0.0);
    }
    if args.deck {
        settings.floor.ground = false;
    }
    if args.one_shot_rest {
        settings.rest.mode = RestCheck::OneShot;
    }
    config.validate()?;
    Ok(config)
}

fn launch(config: &SimConfig, args: &LaunchArgs) -> SimResult<()> {
    let config = launch_config(config, args)?;
    let settings = config.projectile;
    debug!(?settings, "launch run");

    let run = run_launch(&settings, config.fixed_step_s);
    println!();
    println!("Gravity: {}", settings.gravity);
    for line in launch_lines(&run) {
        println!("{line}");
    }

    if let Some(path) = plot_target(&args.plot, "trajectory") {
        plot_trajectory(&run, &path)?;
        println!("Chart: {}", path.display());
    }
    Ok(())
}

fn run(cli: Cli) -> SimResult<()> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Command::Pendulum(args) => pendulum(&config, args),
        Command::Launch(args) => launch(&config, args),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
