//! The four-operation device protocol.

use thiserror::Error;

/// Failure inside a device operation.
///
/// Device faults surface as the VM alert flag; they are never raised to
/// the host. A failed read contributes zero bytes, a failed write is
/// dropped.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Unparseable token {token:?}")]
    Parse { token: String },

    #[error("Device is read-only")]
    ReadOnly,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// A peripheral attachable to one of the 16 bus slots.
///
/// The meaning of the pointer is device-specific: a format code for the
/// console, an address for the memory-like devices, a micro-operation
/// selector for the float unit.
pub trait Device {
    /// Consume bytes sent from VM memory.
    fn write(&mut self, bytes: &[u8]) -> DeviceResult<()>;

    /// Produce exactly `n` bytes for the VM to store.
    fn read(&mut self, n: usize) -> DeviceResult<Vec<u8>>;

    /// Set the device pointer.
    fn set_pointer(&mut self, value: u16);

    /// Read the device pointer back.
    fn get_pointer(&self) -> u16;
}
