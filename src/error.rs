//! Configuration errors
//!
//! The simulation itself is total over well-formed numbers. The only thing
//! that can fail is building it from a bad configuration, so that is the only
//! error type the crate exposes.

use std::fmt;

/// Rejected configuration, reported by `initialize` and `Settings::from_json`
#[derive(Debug)]
pub enum ConfigError {
    /// Viewport has a zero or negative extent on at least one axis
    NonPositiveViewport { width: f64, height: f64 },
    /// A `[min, max]` range is inverted or out of its allowed domain
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
        reason: &'static str,
    },
    /// NaN or infinity where a finite number is required
    NonFinite { name: &'static str, value: f64 },
    /// Settings JSON could not be parsed
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveViewport { width, height } => {
                write!(f, "Viewport must be larger than zero, got {}x{}", width, height)
            }
            ConfigError::InvalidRange {
                name,
                min,
                max,
                reason,
            } => write!(f, "Invalid {} range [{}, {}]: {}", name, min, max, reason),
            ConfigError::NonFinite { name, value } => {
                write!(f, "{} must be a finite number, got {}", name, value)
            }
            ConfigError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_mentions_offending_values() {
        let err = ConfigError::InvalidRange {
            name: "radius",
            min: 0.0,
            max: 10.0,
            reason: "minimum must be positive",
        };
        let msg = err.to_string();
        assert!(msg.contains("radius"));
        assert!(msg.contains("minimum must be positive"));

        let err = ConfigError::NonPositiveViewport {
            width: 0.0,
            height: 600.0,
        };
        assert!(err.to_string().contains("0x600"));
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(err.source().is_some());
        assert!(
            ConfigError::NonFinite {
                name: "jitter",
                value: f64::NAN
            }
            .source()
            .is_none()
        );
    }
}
