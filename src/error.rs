//! Recoverable errors.
//!
//! Contract violations by the integrating code (zero key frames, identity
//! collisions, out-of-range key frames) panic at the point of detection and
//! never show up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnimationError {
    /// Custom data was stored as one type and requested as another
    #[error("custom data holds a {found}, not the requested {expected}")]
    InvalidDataType {
        expected: &'static str,
        found: &'static str,
    },
    /// The background runtime driving animations could not be started
    #[error("failed to start the animation runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T, E = AnimationError> = std::result::Result<T, E>;
