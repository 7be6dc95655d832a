//! Circle-circle collision detection and response
//!
//! Response pushes the pair apart by the overlap along the line between
//! centers, then reverses both velocities outright. Masses and the contact
//! normal play no part in the bounce.

use glam::DVec2;

use super::body::{Body, Color};
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Center-to-center distance
    pub distance: f64,
    /// Angle of the line from the first center to the second
    pub angle: f64,
    /// Overlap depth, `r1 + r2 - distance` (for position correction)
    pub penetration: f64,
}

impl CollisionResult {
    pub fn miss(distance: f64) -> Self {
        Self {
            hit: false,
            distance,
            angle: 0.0,
            penetration: 0.0,
        }
    }

    /// Displacement applied to the second circle; the first gets the negation
    pub fn separation(&self) -> DVec2 {
        polar_to_cartesian(self.penetration / 2.0, self.angle)
    }
}

/// Check whether two circles touch or overlap.
///
/// Touching counts: `distance == r1 + r2` is a hit.
pub fn circle_circle_collision(
    a_pos: DVec2,
    a_radius: f64,
    b_pos: DVec2,
    b_radius: f64,
) -> CollisionResult {
    let (distance, angle) = cartesian_to_polar(b_pos - a_pos);
    let reach = a_radius + b_radius;

    if distance > reach {
        return CollisionResult::miss(distance);
    }

    CollisionResult {
        hit: true,
        distance,
        angle,
        penetration: reach - distance,
    }
}

/// Test bodies `i` and `j` (`i < j`) and resolve them if they collide.
///
/// Returns whether the pair was colliding.
pub fn collide_pair(bodies: &mut [Body], i: usize, j: usize, highlight: Color) -> bool {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    let a = &mut head[i];
    let b = &mut tail[0];

    let result = circle_circle_collision(a.pos, a.radius, b.pos, b.radius);
    if !result.hit {
        return false;
    }

    a.color = highlight;
    b.color = highlight;

    let sep = result.separation();
    a.pos -= sep;
    b.pos += sep;

    a.vel = -a.vel;
    b.vel = -b.vel;

    true
}

/// One pass over every unordered pair in index order.
///
/// Later pairs see positions already moved by earlier ones. A body caught in
/// several overlaps at once may still overlap something afterwards; it gets
/// another go next tick. Returns the number of colliding pairs.
pub fn resolve_collisions(bodies: &mut [Body], highlight: Color) -> usize {
    let mut hits = 0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if collide_pair(bodies, i, j, highlight) {
                hits += 1;
            }
        }
    }
    hits
}
