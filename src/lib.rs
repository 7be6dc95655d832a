//! Canvas Collision - bouncing circles on a 2D canvas
//!
//! Core modules:
//! - `sim`: Simulation (bodies, bounds, per-frame tick, pairwise collisions)
//! - `render`: Passive draw list handed to whatever paints the canvas
//! - `settings`: Data-driven spawn ranges and mode selection
//! - `error`: Configuration errors

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{Mode, Settings, ValueRange};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Bodies spawned in collision mode
    pub const COLLISION_BODY_COUNT: usize = 15;
    /// Bodies spawned in clicker mode
    pub const CLICKER_BODY_COUNT: usize = 12;

    /// Collision mode radius range (pixels)
    pub const COLLISION_RADIUS_MIN: f64 = 20.0;
    pub const COLLISION_RADIUS_MAX: f64 = 50.0;

    /// Clicker mode radius range (pixels)
    pub const CLICKER_RADIUS_MIN: f64 = 25.0;
    pub const CLICKER_RADIUS_MAX: f64 = 45.0;

    /// Speed range (pixels per tick, no dt scaling)
    pub const SPEED_MIN: f64 = 1.0;
    pub const SPEED_MAX: f64 = 5.0;

    /// Highlight for bodies that are touching this tick
    pub const HIGHLIGHT_RGB: u32 = 0x0000FF;

    /// Extra distance past the respawn edge a respawned body starts at (pixels)
    pub const RESPAWN_OFFSET_MIN: f64 = 0.0;
    pub const RESPAWN_OFFSET_MAX: f64 = 50.0;

    /// Vertical room reserved for the page title above the canvas
    pub const TITLE_MARGIN: f64 = 100.0;

    /// Stroke widths used by the draw list
    pub const COLLISION_LINE_WIDTH: f64 = 2.0;
    pub const CLICKER_LINE_WIDTH: f64 = 4.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}
