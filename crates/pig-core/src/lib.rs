#![deny(warnings)]
pub mod game;
pub mod highscore;
pub mod model;
pub mod policy;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "pig"
    }

    pub const fn tagline() -> &'static str {
        "Roll, hold, or bust"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
