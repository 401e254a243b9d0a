use thiserror::Error;

/// Errors raised while configuring one of the curve generators. Every one of
/// them is an invalid argument caught before any command is emitted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("side count {0} is nonsensical (must be from 3 to 65536)")]
    InvalidSideCount(usize),

    #[error("recursion depth {depth} exceeds the ceiling of {limit}")]
    DepthTooLarge { depth: u32, limit: u32 },

    #[error("{name} must be a positive, finite number (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} of {value} rounds to zero")]
    RoundsToZero { name: &'static str, value: f64 },

    #[error("{name} must be finite (got {value})")]
    NonFinite { name: &'static str, value: f64 },

    #[error("predicted segment count {predicted:?} exceeds the limit of {limit}")]
    TooManySegments { predicted: Option<u64>, limit: u64 },

    #[error("division by zero")]
    DivisionByZero,
}

impl GeneratorError {
    /// Shorthand to validate that a parameter is a positive finite float.
    pub(crate) fn require_positive(
        name: &'static str,
        value: f64,
    ) -> Result<f64, GeneratorError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(GeneratorError::NonPositive { name, value })
        }
    }

    pub(crate) fn require_finite(
        name: &'static str,
        value: f64,
    ) -> Result<f64, GeneratorError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(GeneratorError::NonFinite { name, value })
        }
    }
}

/// Errors raised while loading a [`crate::scene::Scene`].
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to parse scene: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize scene: {0}")]
    Serialize(#[from] ron::Error),

    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
