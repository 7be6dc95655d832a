//! Simulation settings
//!
//! Spawn ranges and mode selection. Persisted in LocalStorage on web.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Bounds, Color, Edge};

/// Which variant of the simulation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Bodies bounce off the walls and off each other
    #[default]
    Collision,
    /// Bodies drift across the screen; clicking one respawns it
    Clicker,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Collision => "collision",
            Mode::Clicker => "clicker",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "collision" | "collide" => Some(Mode::Collision),
            "clicker" | "click" => Some(Mode::Clicker),
            _ => None,
        }
    }
}

/// Closed interval `[min, max]` that spawn values are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max)`, or `min` for a degenerate range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + rng.random::<f64>() * (self.max - self.min)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Reject non-finite or inverted ranges, and minimums at or below `floor`
    /// (strictly, when `exclusive_floor` is set)
    fn check(&self, name: &'static str, floor: f64, exclusive_floor: bool) -> Result<(), ConfigError> {
        for value in [self.min, self.max] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        let below_floor = if exclusive_floor {
            self.min <= floor
        } else {
            self.min < floor
        };
        if below_floor {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
                reason: if exclusive_floor {
                    "minimum must be positive"
                } else {
                    "minimum must not be negative"
                },
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
                reason: "minimum is larger than maximum",
            });
        }
        Ok(())
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Collision or clicker variant
    pub mode: Mode,
    /// Number of bodies created at start (constant afterwards)
    pub body_count: usize,
    /// Radius range for spawned bodies
    pub radius: ValueRange,
    /// Speed range, in pixels per tick
    pub speed: ValueRange,
    /// Color shown by bodies that are colliding this tick
    pub highlight: Color,

    // === Clicker ===
    /// Edge that respawned bodies enter from
    pub respawn_edge: Edge,
    /// How far beyond the edge (past the body's own radius) respawns start
    pub respawn_offset: ValueRange,

    /// Fixed RNG seed; a time-based seed is used when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::collision()
    }
}

impl Settings {
    /// Bouncing circles that collide with each other
    pub fn collision() -> Self {
        Self {
            mode: Mode::Collision,
            body_count: COLLISION_BODY_COUNT,
            radius: ValueRange::new(COLLISION_RADIUS_MIN, COLLISION_RADIUS_MAX),
            speed: ValueRange::new(SPEED_MIN, SPEED_MAX),
            highlight: Color::from_rgb(HIGHLIGHT_RGB),
            respawn_edge: Edge::Top,
            respawn_offset: ValueRange::new(RESPAWN_OFFSET_MIN, RESPAWN_OFFSET_MAX),
            seed: None,
        }
    }

    /// Falling chips that respawn at the top when clicked
    pub fn clicker() -> Self {
        Self {
            mode: Mode::Clicker,
            body_count: CLICKER_BODY_COUNT,
            radius: ValueRange::new(CLICKER_RADIUS_MIN, CLICKER_RADIUS_MAX),
            ..Self::collision()
        }
    }

    /// Preset for the given mode
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Collision => Self::collision(),
            Mode::Clicker => Self::clicker(),
        }
    }

    /// Check ranges and the viewport before any body is spawned
    pub fn validate(&self, bounds: Bounds) -> Result<(), ConfigError> {
        bounds.validate()?;
        self.radius.check("radius", 0.0, true)?;
        self.speed.check("speed", 0.0, false)?;
        self.respawn_offset.check("respawn offset", 0.0, false)?;
        Ok(())
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "canvas_collision_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    #[test]
    fn test_presets_validate() {
        assert!(Settings::collision().validate(viewport()).is_ok());
        assert!(Settings::clicker().validate(viewport()).is_ok());
        assert_eq!(Settings::clicker().mode, Mode::Clicker);
        assert_eq!(Settings::clicker().body_count, 12);
        assert_eq!(Settings::default(), Settings::collision());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("Clicker"), Some(Mode::Clicker));
        assert_eq!(Mode::parse(" collision "), Some(Mode::Collision));
        assert_eq!(Mode::parse("pong"), None);
        assert_eq!(Mode::parse(Mode::Clicker.as_str()), Some(Mode::Clicker));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut settings = Settings::collision();
        settings.radius = ValueRange::new(0.0, 10.0);
        assert!(matches!(
            settings.validate(viewport()),
            Err(ConfigError::InvalidRange { name: "radius", .. })
        ));

        settings.radius = ValueRange::new(-5.0, 10.0);
        assert!(settings.validate(viewport()).is_err());
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let mut settings = Settings::collision();
        settings.speed = ValueRange::new(5.0, 1.0);
        assert!(matches!(
            settings.validate(viewport()),
            Err(ConfigError::InvalidRange { name: "speed", .. })
        ));
    }

    #[test]
    fn test_zero_speed_is_allowed() {
        let mut settings = Settings::collision();
        settings.speed = ValueRange::new(0.0, 0.0);
        assert!(settings.validate(viewport()).is_ok());
    }

    #[test]
    fn test_rejects_nan() {
        let mut settings = Settings::clicker();
        settings.respawn_offset = ValueRange::new(0.0, f64::NAN);
        assert!(matches!(
            settings.validate(viewport()),
            Err(ConfigError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_viewport() {
        let settings = Settings::collision();
        assert!(matches!(
            settings.validate(Bounds::new(0.0, 600.0)),
            Err(ConfigError::NonPositiveViewport { .. })
        ));
        assert!(settings.validate(Bounds::new(800.0, -1.0)).is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_seed() {
        let mut settings = Settings::clicker();
        settings.seed = Some(42);
        let json = settings.to_json().unwrap();
        let parsed = Settings::from_json(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_json_seed_is_optional() {
        let json = r#"{
            "mode": "Clicker",
            "body_count": 3,
            "radius": { "min": 10.0, "max": 12.0 },
            "speed": { "min": 1.0, "max": 2.0 },
            "highlight": 255,
            "respawn_edge": "Left",
            "respawn_offset": { "min": 0.0, "max": 10.0 }
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.seed, None);
        assert_eq!(settings.respawn_edge, Edge::Left);
        assert_eq!(settings.highlight, Color::from_rgb(0x0000FF));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_sample_stays_in_range() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let range = ValueRange::new(20.0, 50.0);
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }
        let point = ValueRange::new(3.0, 3.0);
        assert_eq!(point.sample(&mut rng), 3.0);
    }
}
