use macroquad::math::Vec3;

use motion_lab::Pendulum;
use motion_lab::config::SimConfig;
use motion_lab::core::launcher::{Landing, Launcher, ShotId};
use motion_lab::host::FixedStepClock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scene {
    Pendulum,
    Launcher,
}

impl Scene {
    pub(crate) fn other(self) -> Self {
        match self {
            Self::Pendulum => Self::Launcher,
            Self::Launcher => Self::Pendulum,
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            Self::Pendulum => "Pendulum",
            Self::Launcher => "Projectile Launcher",
        }
    }
}

/// Positions a shot has passed through, for drawing its path.
pub(crate) struct Trail {
    pub(crate) shot: ShotId,
    pub(crate) points: Vec<Vec3>,
}

pub(crate) struct AppRuntime {
    pub(crate) scene: Scene,
    pub(crate) clock: FixedStepClock,
    pub(crate) pendulum: Pendulum,
    /// Slider values; pushed into the pendulum whenever they change.
    pub(crate) release_angle_deg: f32,
    pub(crate) arm_length_m: f32,
    pub(crate) launcher: Launcher,
    pub(crate) trails: Vec<Trail>,
    pub(crate) last_landing: Option<Landing>,
    pub(crate) show_preview: bool,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new(config: &SimConfig) -> Self {
        let settings = config.pendulum;
        let mut pendulum = Pendulum::new(settings.gravity, settings.damping);
        pendulum.configure(settings.angle_deg, settings.length_m);
        let arm_length_m = pendulum.length();

        Self {
            scene: Scene::Pendulum,
            clock: FixedStepClock::new(config.fixed_step_s),
            pendulum,
            release_angle_deg: settings.angle_deg,
            arm_length_m,
            launcher: Launcher::new(config.projectile),
            trails: Vec::new(),
            last_landing: None,
            show_preview: true,
            status_line: String::from("Ready"),
        }
    }

    pub(crate) fn reconfigure_pendulum(&mut self) {
        self.pendulum
            .configure(self.release_angle_deg, self.arm_length_m);
        self.arm_length_m = self.pendulum.length();
    }

    /// Drops every shot and its trail; aim and gravity are kept.
    pub(crate) fn clear_launcher(&mut self) {
        self.launcher = Launcher::new(*self.launcher.settings());
        self.trails.clear();
        self.last_landing = None;
    }
}
