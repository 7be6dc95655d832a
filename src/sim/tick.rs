//! Per-frame simulation tick
//!
//! One call advances every body by exactly one step. There is no dt: a body's
//! velocity is its displacement per frame.

use glam::DVec2;

use super::body::{Body, Bounds, Color};
use super::collision::resolve_collisions;
use super::state::SimState;
use crate::settings::Mode;

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer clicks, already in simulation coordinates, oldest first
    pub clicks: Vec<DVec2>,
}

/// Advance the simulation by one tick
pub fn tick(state: &mut SimState, input: &TickInput) {
    match state.settings.mode {
        Mode::Collision => {
            tick_bodies(&mut state.bodies, state.bounds, state.settings.highlight);
        }
        Mode::Clicker => {
            for &point in &input.clicks {
                handle_click(state, point);
            }
            advance_falling(state);
        }
    }

    state.time_ticks += 1;
}

/// Collision-mode step over a bare body slice.
///
/// Resets highlights, moves and reflects every body, then runs the pairwise
/// collision pass. Returns the number of colliding pairs.
pub fn tick_bodies(bodies: &mut [Body], bounds: Bounds, highlight: Color) -> usize {
    for body in bodies.iter_mut() {
        body.reset_color();
    }

    for body in bodies.iter_mut() {
        body.integrate();
        body.reflect_against_bounds(bounds);
    }

    resolve_collisions(bodies, highlight)
}

/// Clicker-mode motion: drift away from the respawn edge and come back in
/// once fully off the far side
fn advance_falling(state: &mut SimState) {
    let SimState {
        bodies,
        rng,
        settings,
        bounds,
        ..
    } = state;

    for body in bodies.iter_mut() {
        body.integrate();
        if body.has_exited(*bounds, settings.respawn_edge) {
            body.respawn(rng, settings, *bounds);
        }
    }
}

/// Respawn the first body (in index order) under `point`.
///
/// At most one body is respawned per click. Returns its index, or `None` on a
/// miss or outside clicker mode.
pub fn handle_click(state: &mut SimState, point: DVec2) -> Option<usize> {
    if state.settings.mode != Mode::Clicker {
        return None;
    }

    let index = state.bodies.iter().position(|b| b.hit_test(point))?;

    let SimState {
        bodies,
        rng,
        settings,
        bounds,
        hits,
        ..
    } = state;
    bodies[index].respawn(rng, settings, *bounds);
    *hits += 1;

    log::debug!(
        "Click at ({:.1}, {:.1}) respawned body {} (hits: {})",
        point.x,
        point.y,
        bodies[index].id,
        hits
    );

    Some(index)
}
