//! Bodies, world bounds and the color token they carry
//!
//! A body is a circle with a fixed-per-tick velocity. Nothing here knows about
//! other bodies; pairwise work lives in `collision`.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::settings::Settings;

/// Opaque 24-bit RGB color token
///
/// The simulation only copies and compares these. Turning one into something
/// paintable is the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(u32);

impl Color {
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Any color below pure white
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(0..0x00FF_FFFF))
    }

    /// Soft color with every channel in 150..250
    pub fn pastel<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r: u32 = rng.random_range(150..250);
        let g: u32 = rng.random_range(150..250);
        let b: u32 = rng.random_range(150..250);
        Self((r << 16) | (g << 8) | b)
    }

    /// `#rrggbb`
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.0)
    }
}

/// Rectangular viewport `[0, width] x [0, height]` bodies live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("viewport width", self.width), ("viewport height", self.height)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::NonPositiveViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Viewport edge that respawned bodies enter through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Edge {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Unit direction pointing from this edge into the viewport
    pub fn inward(self) -> DVec2 {
        match self {
            Edge::Top => DVec2::Y,
            Edge::Bottom => DVec2::NEG_Y,
            Edge::Left => DVec2::X,
            Edge::Right => DVec2::NEG_X,
        }
    }
}

/// A moving circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: DVec2,
    /// Displacement per tick
    pub vel: DVec2,
    pub radius: f64,
    /// Resting color
    pub base_color: Color,
    /// Color shown this tick (highlight while colliding, else `base_color`)
    pub color: Color,
    /// Outline color (clicker chips)
    pub border_color: Color,
    pub label: Option<String>,
}

impl Body {
    pub fn new(id: u32, pos: DVec2, vel: DVec2, radius: f64, color: Color) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            base_color: color,
            color,
            border_color: color,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_border(mut self, border: Color) -> Self {
        self.border_color = border;
        self
    }

    /// Drop any highlight from the previous tick
    #[inline]
    pub fn reset_color(&mut self) {
        self.color = self.base_color;
    }

    /// Move by one tick's worth of velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Flip each velocity component whose leading edge is past a wall.
    ///
    /// Position is left alone, so a body moving faster than its own diameter
    /// can end up outside the viewport for a tick or more.
    pub fn reflect_against_bounds(&mut self, bounds: Bounds) {
        if self.pos.x + self.radius > bounds.width || self.pos.x - self.radius < 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y + self.radius > bounds.height || self.pos.y - self.radius < 0.0 {
            self.vel.y = -self.vel.y;
        }
    }

    /// Whether `point` lies inside the circle (edge inclusive)
    #[inline]
    pub fn hit_test(&self, point: DVec2) -> bool {
        self.pos.distance(point) <= self.radius
    }

    /// Whether the body has fully left through the edge opposite `entry`
    pub fn has_exited(&self, bounds: Bounds, entry: Edge) -> bool {
        match entry {
            Edge::Top => self.pos.y - self.radius > bounds.height,
            Edge::Bottom => self.pos.y + self.radius < 0.0,
            Edge::Left => self.pos.x - self.radius > bounds.width,
            Edge::Right => self.pos.x + self.radius < 0.0,
        }
    }

    /// Re-roll radius, speed and colors, and place the body just outside the
    /// respawn edge heading inward. `id` is kept.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, settings: &Settings, bounds: Bounds) {
        let edge = settings.respawn_edge;
        self.radius = settings.radius.sample(rng);
        let offset = self.radius + settings.respawn_offset.sample(rng);
        let along = rng.random::<f64>();

        self.pos = match edge {
            Edge::Top => DVec2::new(along * bounds.width, -offset),
            Edge::Bottom => DVec2::new(along * bounds.width, bounds.height + offset),
            Edge::Left => DVec2::new(-offset, along * bounds.height),
            Edge::Right => DVec2::new(bounds.width + offset, along * bounds.height),
        };
        self.vel = edge.inward() * settings.speed.sample(rng);

        self.base_color = Color::pastel(rng);
        self.border_color = Color::random(rng);
        self.color = self.base_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn body_at(x: f64, y: f64, dx: f64, dy: f64, radius: f64) -> Body {
        Body::new(1, DVec2::new(x, y), DVec2::new(dx, dy), radius, Color::from_rgb(0xff0000))
    }

    #[test]
    fn test_integrate_adds_velocity() {
        let mut body = body_at(100.0, 100.0, 3.0, -2.0, 10.0);
        body.integrate();
        assert_eq!(body.pos, DVec2::new(103.0, 98.0));
    }

    #[test]
    fn test_reflect_each_wall() {
        let bounds = Bounds::new(200.0, 100.0);

        // Right
        let mut body = body_at(195.0, 50.0, 2.0, 1.0, 10.0);
        body.reflect_against_bounds(bounds);
        assert_eq!(body.vel, DVec2::new(-2.0, 1.0));

        // Left
        let mut body = body_at(5.0, 50.0, -2.0, 1.0, 10.0);
        body.reflect_against_bounds(bounds);
        assert_eq!(body.vel, DVec2::new(2.0, 1.0));

        // Top
        let mut body = body_at(100.0, 5.0, 1.0, -3.0, 10.0);
        body.reflect_against_bounds(bounds);
        assert_eq!(body.vel, DVec2::new(1.0, 3.0));

        // Bottom
        let mut body = body_at(100.0, 95.0, 1.0, 3.0, 10.0);
        body.reflect_against_bounds(bounds);
        assert_eq!(body.vel, DVec2::new(1.0, -3.0));
    }

    #[test]
    fn test_reflect_touching_wall_is_not_crossing() {
        let bounds = Bounds::new(200.0, 100.0);
        let mut body = body_at(190.0, 50.0, 2.0, 0.0, 10.0);
        body.reflect_against_bounds(bounds);
        assert_eq!(body.vel, DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_reflect_does_not_clamp() {
        let bounds = Bounds::new(200.0, 100.0);
        // Moving more than a diameter per tick
        let mut body = body_at(185.0, 50.0, 60.0, 0.0, 10.0);
        body.integrate();
        body.reflect_against_bounds(bounds);
        assert_eq!(body.pos, DVec2::new(245.0, 50.0));
        assert_eq!(body.vel.x, -60.0);
    }

    #[test]
    fn test_oversized_body_flips_every_call() {
        let bounds = Bounds::new(50.0, 50.0);
        let mut body = body_at(25.0, 25.0, 1.0, 1.0, 40.0);
        body.reflect_against_bounds(bounds);
        assert_eq!(body.vel, DVec2::new(-1.0, -1.0));
        body.reflect_against_bounds(bounds);
        assert_eq!(body.vel, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_hit_test_edge_inclusive() {
        let body = body_at(0.0, 0.0, 0.0, 0.0, 5.0);
        assert!(body.hit_test(DVec2::new(3.0, 4.0)));
        assert!(body.hit_test(DVec2::ZERO));
        assert!(!body.hit_test(DVec2::new(3.0, 4.1)));
    }

    #[test]
    fn test_has_exited_opposite_edge() {
        let bounds = Bounds::new(200.0, 100.0);
        let body = body_at(50.0, 111.0, 0.0, 1.0, 10.0);
        assert!(body.has_exited(bounds, Edge::Top));
        assert!(!body.has_exited(bounds, Edge::Bottom));

        let body = body_at(50.0, 109.0, 0.0, 1.0, 10.0);
        assert!(!body.has_exited(bounds, Edge::Top));

        let body = body_at(-11.0, 50.0, -1.0, 0.0, 10.0);
        assert!(body.has_exited(bounds, Edge::Right));
    }

    #[test]
    fn test_respawn_above_top_heading_down() {
        let mut rng = Pcg32::seed_from_u64(3);
        let settings = Settings::clicker();
        let bounds = Bounds::new(800.0, 600.0);
        let mut body = body_at(400.0, 300.0, 0.0, 2.0, 30.0).with_label("keep");

        for _ in 0..100 {
            body.respawn(&mut rng, &settings, bounds);
            assert_eq!(body.id, 1);
            assert!(settings.radius.contains(body.radius));
            assert!(body.pos.y <= -body.radius);
            assert!(body.pos.y >= -body.radius - settings.respawn_offset.max);
            assert!(body.pos.x >= 0.0 && body.pos.x <= bounds.width);
            assert_eq!(body.vel.x, 0.0);
            assert!(settings.speed.contains(body.vel.y));
            assert_eq!(body.color, body.base_color);
        }
        assert_eq!(body.label.as_deref(), Some("keep"));
    }

    #[test]
    fn test_respawn_from_left_heads_right() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut settings = Settings::clicker();
        settings.respawn_edge = Edge::Left;
        let bounds = Bounds::new(800.0, 600.0);
        let mut body = body_at(400.0, 300.0, 0.0, 2.0, 30.0);

        body.respawn(&mut rng, &settings, bounds);
        assert!(body.pos.x <= -body.radius);
        assert!(body.vel.x > 0.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_pastel_channels() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let rgb = Color::pastel(&mut rng).rgb();
            for shift in [16, 8, 0] {
                let channel = (rgb >> shift) & 0xff;
                assert!((150..250).contains(&channel));
            }
        }
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::from_rgb(0x0000ff).to_css(), "#0000ff");
        assert_eq!(Color::from_rgb(0x1a2b3c).to_css(), "#1a2b3c");
        assert_eq!(Color::from_rgb(0xff00_0000).rgb(), 0);
    }
}
