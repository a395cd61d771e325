//! Read-only memory device backed by an image file.

use super::DEVICE_MEMORY_SIZE;
use crate::device::{Device, DeviceError, DeviceResult};
use std::io;
use std::path::Path;

/// Default image path, resolved against the working directory.
pub const DEFAULT_ROM_PATH: &str = "rom.crm";

/// A 64 KiB read-only store. Reads advance the pointer like
/// [`MemoryExtension`](super::MemoryExtension); writes fault.
pub struct Rom {
    memory: Box<[u8; DEVICE_MEMORY_SIZE]>,
    ptr: u16,
}

impl Rom {
    /// Load `rom.crm` from the working directory.
    pub fn open() -> io::Result<Self> {
        Self::from_path(DEFAULT_ROM_PATH)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::from_bytes(&std::fs::read(path)?))
    }

    /// Build a ROM from raw bytes; images past 64 KiB are truncated.
    pub fn from_bytes(image: &[u8]) -> Self {
        let mut memory = Box::new([0u8; DEVICE_MEMORY_SIZE]);
        let len = image.len().min(DEVICE_MEMORY_SIZE);
        memory[..len].copy_from_slice(&image[..len]);
        Self { memory, ptr: 0 }
    }
}

impl Device for Rom {
    fn write(&mut self, _bytes: &[u8]) -> DeviceResult<()> {
        Err(DeviceError::ReadOnly)
    }

    fn read(&mut self, n: usize) -> DeviceResult<Vec<u8>> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.memory[self.ptr as usize]);
            self.ptr = self.ptr.wrapping_add(1);
        }
        Ok(out)
    }

    fn set_pointer(&mut self, value: u16) {
        self.ptr = value;
    }

    fn get_pointer(&self) -> u16 {
        self.ptr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_from_image() {
        let mut rom = Rom::from_bytes(&[0x10, 0x20, 0x30]);
        assert_eq!(rom.read(2).unwrap(), vec![0x10, 0x20]);
        assert_eq!(rom.read(2).unwrap(), vec![0x30, 0x00]);
        assert_eq!(rom.get_pointer(), 4);
    }

    #[test]
    fn test_pointer_seek() {
        let mut rom = Rom::from_bytes(&[0xAA; 16]);
        rom.set_pointer(15);
        assert_eq!(rom.read(2).unwrap(), vec![0xAA, 0x00]);
    }

    #[test]
    fn test_write_faults() {
        let mut rom = Rom::from_bytes(&[1, 2, 3]);
        assert!(matches!(rom.write(&[9]), Err(DeviceError::ReadOnly)));
        // The image is untouched.
        rom.set_pointer(0);
        assert_eq!(rom.read(1).unwrap(), vec![1]);
    }

    #[test]
    fn test_oversize_image_truncated() {
        let rom = Rom::from_bytes(&vec![0x55; DEVICE_MEMORY_SIZE + 100]);
        assert_eq!(rom.memory[DEVICE_MEMORY_SIZE - 1], 0x55);
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join("chip64-rom-test.crm");
        std::fs::write(&path, [0xC0, 0xFF, 0xEE]).unwrap();
        let mut rom = Rom::from_path(&path).unwrap();
        assert_eq!(rom.read(3).unwrap(), vec![0xC0, 0xFF, 0xEE]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Rom::from_path("/nonexistent/rom.crm").is_err());
    }
}
