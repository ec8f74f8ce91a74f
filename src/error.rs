use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// The configuration file exists but could not be read.
    #[error("could not read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::SimConfig`].
    #[error("could not parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A setting parsed fine but is outside the range the simulation accepts.
    #[error("invalid setting `{name}` = {value}: {reason}")]
    InvalidSetting {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    #[error("unknown gravity preset '{0}' (expected earth, moon, mars, jupiter or zero)")]
    UnknownGravity(String),

    /// Analytic flight prediction has no real landing time.
    #[error("no landing: {0}")]
    NoLanding(String),

    #[error("plot export failed: {0}")]
    Plot(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
