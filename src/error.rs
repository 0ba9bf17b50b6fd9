//! Error types for snowfield.
//!
//! Construction is the only place anything can fail. Once a
//! [`ParticleField`](crate::ParticleField) or [`Scene`](crate::Scene) exists,
//! stepping and picking are total.

use thiserror::Error;

/// Invalid construction parameters.
///
/// Raised by constructors and `build()` methods, never by per-frame or
/// per-pick operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A particle field needs at least one particle.
    #[error("particle count must be positive, got {0}")]
    EmptyField(usize),

    /// A numeric parameter is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A `min..max` range is inverted.
    #[error("{name} range is inverted: {min} > {max}")]
    InvertedRange {
        /// Range name.
        name: &'static str,
        /// Lower end.
        min: f64,
        /// Upper end.
        max: f64,
    },

    /// A parameter that must be strictly positive is not.
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A fixed simulation rate whose frame length cannot be represented.
    #[error("fixed step rate {0} Hz gives a frame length outside 1ns..=u64::MAX s")]
    StepOutOfRange(f64),

    /// A parameter that must not be negative is.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

impl ConfigError {
    pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NonFinite { name, value })
        }
    }

    pub(crate) fn check_range(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
        Self::check_finite(name, min)?;
        Self::check_finite(name, max)?;
        if min > max {
            return Err(ConfigError::InvertedRange { name, min, max });
        }
        Ok(())
    }

    pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
        Self::check_finite(name, value)?;
        if value <= 0.0 {
            return Err(ConfigError::NotPositive { name, value });
        }
        Ok(())
    }

    pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
        Self::check_finite(name, value)?;
        if value < 0.0 {
            return Err(ConfigError::Negative { name, value });
        }
        Ok(())
    }
}

/// Errors that can occur while loading and building a [`Scene`](crate::Scene).
#[derive(Debug, Error)]
pub enum SceneError {
    /// Failed to read the config file.
    #[error("failed to read scene config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for a scene.
    #[error("failed to parse scene config: {0}")]
    Json(#[from] serde_json::Error),

    /// The config parsed but describes an invalid scene.
    #[error("invalid scene config: {0}")]
    Config(#[from] ConfigError),
}
