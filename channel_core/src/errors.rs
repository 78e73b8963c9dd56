//! # Error Types
//!
//! Structured error types for channel_core. Every failure carries the
//! offending value and enough context to understand and fix the input
//! programmatically.
//!
//! ## Example
//!
//! ```rust
//! use channel_core::errors::{ChannelError, ChannelResult};
//!
//! fn validate_roughness(n: f64) -> ChannelResult<()> {
//!     if n <= 0.0 {
//!         return Err(ChannelError::InvalidRoughness { value: n });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for channel_core operations
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Structured error type for channel hydraulics operations.
///
/// Each variant maps to one condition in the validation taxonomy, so
/// callers can match on the failure instead of parsing a message.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ChannelError {
    /// A derived geometric property was read before the flow depth was set
    #[error("Undefined flow depth: set the flow depth before reading section properties")]
    UndefinedFlowDepth,

    /// Neither the section's flow depth nor the discharge is resolvable
    #[error("Undefined flow: either the cross section flow depth or the flow discharge must be specified")]
    UndefinedFlow,

    /// A section property was set to a disallowed value (e.g. negative)
    #[error("Invalid value {value} for '{property}': {reason}")]
    InvalidProperty {
        property: String,
        value: f64,
        reason: String,
    },

    /// A circular section's flow depth exceeds the available height
    #[error("Flow depth {flow_depth} exceeds the available height {available_height} (twice the radius of the cross section)")]
    UnavailableHeight {
        flow_depth: f64,
        available_height: f64,
    },

    /// Manning roughness coefficient must be strictly positive
    #[error("Invalid Manning roughness coefficient {value}: must be positive")]
    InvalidRoughness { value: f64 },

    /// Discharge cannot be negative
    #[error("Invalid discharge {value}: cannot be negative")]
    InvalidDischarge { value: f64 },

    /// Channel bottom slope cannot be negative
    #[error("Invalid channel slope {value}: cannot be negative")]
    InvalidChannelSlope { value: f64 },

    /// Solver precision thresholds cannot be negative
    #[error("Invalid solver precision {value}: must be non-negative")]
    InvalidPrecision { value: f64 },

    /// The normal-depth search exhausted its iteration budget
    #[error("Normal-depth search did not converge after {iterations} iterations")]
    DidNotConverge { iterations: usize },
}

impl ChannelError {
    /// Create an InvalidProperty error
    pub fn invalid_property(property: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        ChannelError::InvalidProperty {
            property: property.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create an UnavailableHeight error
    pub fn unavailable_height(flow_depth: f64, available_height: f64) -> Self {
        ChannelError::UnavailableHeight {
            flow_depth,
            available_height,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ChannelError::UndefinedFlowDepth => "UNDEFINED_FLOW_DEPTH",
            ChannelError::UndefinedFlow => "UNDEFINED_FLOW",
            ChannelError::InvalidProperty { .. } => "INVALID_PROPERTY",
            ChannelError::UnavailableHeight { .. } => "UNAVAILABLE_HEIGHT",
            ChannelError::InvalidRoughness { .. } => "INVALID_ROUGHNESS",
            ChannelError::InvalidDischarge { .. } => "INVALID_DISCHARGE",
            ChannelError::InvalidChannelSlope { .. } => "INVALID_CHANNEL_SLOPE",
            ChannelError::InvalidPrecision { .. } => "INVALID_PRECISION",
            ChannelError::DidNotConverge { .. } => "DID_NOT_CONVERGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = ChannelError::invalid_property("base_width", -5.0, "\"base_width\" cannot be negative");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: ChannelError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ChannelError::UndefinedFlowDepth.error_code(), "UNDEFINED_FLOW_DEPTH");
        assert_eq!(
            ChannelError::unavailable_height(3.0, 2.0).error_code(),
            "UNAVAILABLE_HEIGHT"
        );
        assert_eq!(
            ChannelError::DidNotConverge { iterations: 200 }.error_code(),
            "DID_NOT_CONVERGE"
        );
    }

    #[test]
    fn test_invalid_property_carries_value() {
        let error = ChannelError::invalid_property("radius", -0.5, "\"radius\" cannot be negative");
        match error {
            ChannelError::InvalidProperty { value, .. } => assert_eq!(value, -0.5),
            _ => panic!("expected InvalidProperty"),
        }
    }
}
