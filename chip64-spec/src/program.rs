//! Program images.

use crate::error::Chip64Error;
use crate::MEMORY_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A program image: raw bytes, at most 4096, loaded at address 0.
///
/// There is no header and no code/data separation; execution begins at
/// address 0 and the bytes past the image read as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    /// Wrap an image, rejecting one that does not fit the address space.
    pub fn new(bytes: Vec<u8>) -> Result<Self, Chip64Error> {
        if bytes.len() > MEMORY_SIZE {
            return Err(Chip64Error::ProgramTooLarge { len: bytes.len() });
        }
        Ok(Program { bytes })
    }

    /// Load a binary image from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Chip64Error> {
        Self::new(std::fs::read(path)?)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
