//! Configuration errors
//!
//! All validation happens before the first tick. Once a [`crate::Simulation`] exists,
//! stepping cannot fail.

use thiserror::Error;

/// Invalid simulation input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 3x3 to have an interior, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },

    #[error("grid of {width}x{height} has more cells than fit in memory")]
    GridTooLarge { width: usize, height: usize },

    #[error("grid of {width}x{height} needs {expected} cells, got {actual}")]
    CellCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("species distribution weight for {state} must be finite and non-negative, got {value}")]
    InvalidWeight { state: &'static str, value: f64 },

    #[error("species distribution must sum to 1, got {sum}")]
    DistributionSum { sum: f64 },

    #[error("species distribution has no positive weight")]
    EmptyDistribution,

    #[error("unknown wind direction '{0}'")]
    UnknownWindDirection(String),
}

/// Check that `value` is a finite probability in `[0, 1]`
///
/// # Errors
///
/// Returns [`ConfigError::ProbabilityOutOfRange`] naming the offending parameter.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_probability_bounds() {
        assert!(check_probability("p", 0.0).is_ok());
        assert!(check_probability("p", 1.0).is_ok());
        assert_eq!(
            check_probability("p", 1.5),
            Err(ConfigError::ProbabilityOutOfRange { name: "p", value: 1.5 })
        );
        assert!(check_probability("p", -0.1).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn test_messages_name_parameter() {
        let err = ConfigError::ProbabilityOutOfRange {
            name: "lightning_probability",
            value: 2.0,
        };
        assert!(err.to_string().contains("lightning_probability"));
        let err = ConfigError::GridTooSmall { width: 2, height: 5 };
        assert_eq!(
            err.to_string(),
            "grid must be at least 3x3 to have an interior, got 2x5"
        );
    }
}
