//! # Placement Errors
//!
//! Fatal error types for placement operations.
//!
//! ## Error Policy
//!
//! - Fatal errors mean required inputs could not be resolved at all; no
//!   placement is attempted.
//! - Conditions that merely produce nothing (zero steps, empty extents,
//!   degenerate segments) are not errors; they surface as warnings on
//!   [`crate::PlacementOutcome`].

use instancer_kernel::AxisParseError;
use thiserror::Error;

use crate::scene::SceneError;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that abort a placement call.
///
/// ## Example
///
/// ```rust
/// use instancer::{MemoryScene, NodeId, PlacementError, place_radial, RadialRequest};
///
/// let mut scene = MemoryScene::new();
/// let request = RadialRequest::new(NodeId::new("missing"), NodeId::new("also_missing"), 4);
/// match place_radial(&mut scene, &request) {
///     Err(PlacementError::MissingInput(msg)) => assert!(msg.contains("missing")),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum PlacementError {
    /// A node the operation needs does not exist or was not supplied.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Fewer resolvable inputs than the operation requires.
    #[error("Insufficient input for {operation}: need at least {required}, found {found}")]
    InsufficientInput {
        /// Operation that was attempted.
        operation: &'static str,
        /// Minimum number of inputs.
        required: usize,
        /// Number of inputs that could be resolved.
        found: usize,
    },

    /// An axis label outside `x`/`y`/`z`.
    #[error("Invalid axis: {0}")]
    InvalidAxis(#[from] AxisParseError),

    /// A parameter that cannot be interpreted (non-finite number, wrong
    /// placement mode for the operation, unknown option label).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The scene graph rejected a command mid-placement.
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

impl PlacementError {
    /// Creates a missing input error.
    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingInput(message.into())
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeId;

    /// Test error display messages.
    #[test]
    fn test_error_display() {
        let err = PlacementError::InsufficientInput {
            operation: "chain ordering",
            required: 2,
            found: 1,
        };
        assert!(err.to_string().contains("at least 2"));

        let err: PlacementError = "w".parse::<instancer_kernel::Axis>().unwrap_err().into();
        assert!(matches!(err, PlacementError::InvalidAxis(_)));
    }

    #[test]
    fn test_scene_error_converts() {
        let err: PlacementError = SceneError::NodeNotFound(NodeId::new("ghost")).into();
        assert!(err.to_string().contains("ghost"));
    }

    /// Test error types are Send + Sync.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PlacementError>();
    }
}
