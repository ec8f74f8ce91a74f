//! Pendulum and projectile simulation core with headless and interactive hosts.
//!
//! The [`core`] module holds the simulation state machines. Everything else
//! (fixed-step driving, reports, charts, configuration) is host plumbing
//! around them.

pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod logging;
pub mod report;

pub use crate::core::flight::{FlightReport, FlightTracker};
pub use crate::core::pendulum::Pendulum;
pub use crate::error::{SimError, SimResult};
