//! Host-side error types.
//!
//! These cover VM construction only (bad program image, unreadable ROM
//! file). Execution faults are reported through the terminal status and
//! the alert flag instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Spec(#[from] chip64_spec::Chip64Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
