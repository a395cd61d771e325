//! Standard devices for the Chip64 bus.

mod console;
mod float;
mod memory_ext;
mod rom;

pub use console::ConsoleIo;
pub use float::FloatUnit;
pub use memory_ext::MemoryExtension;
pub use rom::{Rom, DEFAULT_ROM_PATH};

/// Backing store size of the memory-like devices.
pub const DEVICE_MEMORY_SIZE: usize = 1 << 16;
