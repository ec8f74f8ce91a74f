//! Command-line interface for the headless simulator.
//!
//! ```bash
//! # Swing a 1.5 m pendulum from 30 degrees for a minute and chart it
//! motion_lab pendulum --angle 30 --length 1.5 --seconds 60 --plot-dir out
//!
//! # Fire on the Moon and land on a deck that needs the rest check
//! motion_lab launch --angle 40 --speed 25 --gravity moon --deck
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use motion_lab::core::gravity::GravityPreset;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "motion_lab",
    version,
    about = "Headless pendulum and projectile simulator"
)]
pub struct Cli {
    /// TOML config; defaults to assets/sim.toml when present
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the damped pendulum for a fixed duration
    Pendulum(PendulumArgs),
    /// Fire one projectile and report its flight
    Launch(LaunchArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlotArgs {
    /// Write a PNG chart to this file
    #[arg(long, conflicts_with = "plot_dir")]
    pub plot: Option<PathBuf>,

    /// Write a timestamped PNG chart into this directory
    #[arg(long)]
    pub plot_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PendulumArgs {
    /// Release angle from vertical (degrees)
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<f32>,

    /// Arm length (m); values below 0.1 are raised to 0.1
    #[arg(long, allow_negative_numbers = true)]
    pub length: Option<f32>,

    /// Per-tick velocity damping in (0, 1]
    #[arg(long)]
    pub damping: Option<f32>,

    /// Gravitational acceleration (m/s^2)
    #[arg(long)]
    pub gravity: Option<f32>,

    /// Simulated duration (s)
    #[arg(long)]
    pub seconds: Option<f32>,

    #[command(flatten)]
    pub plot: PlotArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LaunchArgs {
    /// Elevation above horizontal (degrees)
    #[arg(long)]
    pub angle: Option<f32>,

    /// Muzzle speed (m/s)
    #[arg(long)]
    pub speed: Option<f32>,

    /// Gravity preset: earth, moon, mars, jupiter or zero
    #[arg(long, value_parser = parse_gravity)]
    pub gravity: Option<GravityPreset>,

    /// Muzzle height above the floor (m)
    #[arg(long)]
    pub height: Option<f32>,

    /// Land on an untagged deck instead of ground (uses the rest check)
    #[arg(long)]
    pub deck: bool,

    /// Give up after a single rest check instead of repeating it
    #[arg(long)]
    pub one_shot_rest: bool,

    #[command(flatten)]
    pub plot: PlotArgs,
}

fn parse_gravity(value: &str) -> Result<GravityPreset, String> {
    value.parse().map_err(|err: motion_lab::SimError| err.to_string())
}
