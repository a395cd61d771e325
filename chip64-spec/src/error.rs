//! Error types for the Chip64 instruction set crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Chip64Error {
    #[error("Illegal opcode {word:#06x}")]
    IllegalOpcode { word: u16 },

    #[error("Program image is {len} bytes; the address space holds {}", crate::MEMORY_SIZE)]
    ProgramTooLarge { len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
