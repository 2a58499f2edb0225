/// Error types for structure generation, tiling and the share boundary.

use thiserror::Error;

/// Errors produced by the Atomium core.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AtomiumError {
    /// A dimension input was non-finite or non-positive.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter {
        /// Name of the rejected parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A strut with coincident endpoints or a node index outside the structure.
    /// Recoverable: the strut is skipped.
    #[error("strut {strut} is degenerate: nodes {node_a} and {node_b} coincide or do not exist")]
    InvalidGeometry {
        /// Index of the strut in the structure.
        strut: usize,
        /// First endpoint node index.
        node_a: usize,
        /// Second endpoint node index.
        node_b: usize,
    },

    /// A host capability (native share, clipboard) is not present.
    #[error("environment capability unavailable: {0}")]
    EnvironmentUnavailable(String),

    /// The host capability exists but the operation failed.
    #[error("share failed: {0}")]
    ShareFailed(String),
}

impl AtomiumError {
    pub(crate) fn invalid(name: &'static str, value: impl Into<f64>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AtomiumError>;

/// Rejects non-finite and non-positive dimensions.
pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AtomiumError::invalid(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("spacing", 50.0), Ok(50.0));
        assert!(require_positive("spacing", 0.0).is_err());
        assert!(require_positive("spacing", -1.0).is_err());
        assert!(require_positive("spacing", f32::NAN).is_err());
        assert!(require_positive("spacing", f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_parameter() {
        let err = AtomiumError::invalid("corner_offset", -2.0f32);
        assert_eq!(err.to_string(), "invalid parameter `corner_offset`: -2");
    }
}
