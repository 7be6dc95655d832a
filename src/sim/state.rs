//! Simulation state and start-up spawning
//!
//! Bodies live in a plain `Vec` indexed by position. The collection is created
//! once and never grows or shrinks; respawns rewrite a body in place.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, Bounds, Color};
use crate::error::ConfigError;
use crate::polar_to_cartesian;
use crate::settings::{Mode, Settings};

/// Everything one running simulation owns
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub settings: Settings,
    pub bounds: Bounds,
    /// Bodies in stable index order
    pub bodies: Vec<Body>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Bodies respawned by a click (automatic recycling is not counted)
    pub hits: u64,
    pub(crate) rng: Pcg32,
}

impl SimState {
    /// Build from settings, using `settings.seed` when set and
    /// `fallback_seed` otherwise
    pub fn from_settings(
        settings: &Settings,
        width: f64,
        height: f64,
        fallback_seed: u64,
    ) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or(fallback_seed);
        initialize(settings.body_count, width, height, settings, seed)
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    /// Replace the viewport. Bodies are not moved; ones now outside will
    /// bounce (or recycle) back on the following ticks.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ConfigError> {
        let bounds = Bounds::new(width, height);
        bounds.validate()?;
        self.bounds = bounds;
        Ok(())
    }

    /// Bodies currently showing the collision highlight
    pub fn highlighted(&self) -> impl Iterator<Item = &Body> {
        let highlight = self.settings.highlight;
        self.bodies.iter().filter(move |b| b.color == highlight)
    }
}

/// Create `count` bodies inside a `width` x `height` viewport.
///
/// Radii and speeds are drawn uniformly from the settings' ranges and every
/// body starts fully inside the viewport given its own radius. Bad ranges or
/// an empty viewport are rejected; zero bodies is fine.
pub fn initialize(
    count: usize,
    width: f64,
    height: f64,
    settings: &Settings,
    seed: u64,
) -> Result<SimState, ConfigError> {
    let bounds = Bounds::new(width, height);
    settings.validate(bounds)?;

    let mut rng = Pcg32::seed_from_u64(seed);
    let bodies = (0..count)
        .map(|i| spawn_body(i as u32, &mut rng, settings, bounds))
        .collect();

    log::info!(
        "Spawned {} bodies in {}x{} ({} mode, seed {})",
        count,
        width,
        height,
        settings.mode.as_str(),
        seed
    );

    Ok(SimState {
        seed,
        settings: settings.clone(),
        bounds,
        bodies,
        time_ticks: 0,
        hits: 0,
        rng,
    })
}

/// Uniform position keeping a circle of `radius` inside `extent`.
///
/// A circle wider than the extent lands somewhere between the two walls it
/// cannot fit between.
fn inside<R: Rng + ?Sized>(rng: &mut R, radius: f64, extent: f64) -> f64 {
    radius + rng.random::<f64>() * (extent - 2.0 * radius)
}

fn spawn_body<R: Rng + ?Sized>(id: u32, rng: &mut R, settings: &Settings, bounds: Bounds) -> Body {
    let radius = settings.radius.sample(rng);
    let pos = DVec2::new(
        inside(rng, radius, bounds.width),
        inside(rng, radius, bounds.height),
    );
    let speed = settings.speed.sample(rng);

    match settings.mode {
        Mode::Collision => {
            let heading = rng.random::<f64>() * std::f64::consts::TAU;
            let vel = polar_to_cartesian(speed, heading);
            Body::new(id, pos, vel, radius, Color::random(rng)).with_label(format!("C{}", id + 1))
        }
        Mode::Clicker => {
            let vel = settings.respawn_edge.inward() * speed;
            Body::new(id, pos, vel, radius, Color::pastel(rng)).with_border(Color::random(rng))
        }
    }
}
