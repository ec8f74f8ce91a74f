pub mod ballistics;
pub mod body;
pub mod flight;
pub mod gravity;
pub mod launcher;
pub mod pendulum;
pub mod window;
