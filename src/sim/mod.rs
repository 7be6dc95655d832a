//! Simulation module
//!
//! All body motion and collision logic lives here:
//! - One call to `tick` per displayed frame, no dt
//! - Seeded RNG only
//! - Stable iteration order (by index)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod state;
pub mod tick;

pub use body::{Body, Bounds, Color, Edge};
pub use collision::{CollisionResult, circle_circle_collision, collide_pair, resolve_collisions};
pub use state::{SimState, initialize};
pub use tick::{TickInput, handle_click, tick, tick_bodies};
