//! Device bus: a 16-slot table routing the four primitive operations.

use crate::device::{Device, DeviceError};
use crate::devices::ConsoleIo;
use chip64_spec::NUM_DEVICE_SLOTS;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("No device bound to slot {slot:#x}")]
    Absent { slot: u8 },

    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// The slot table. Holds no state of its own beyond the bound devices.
pub struct DeviceBus {
    slots: [Option<Box<dyn Device>>; NUM_DEVICE_SLOTS],
}

impl DeviceBus {
    /// A bus with every slot empty.
    pub fn empty() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Bind a device, replacing whatever the slot held.
    pub fn bind(&mut self, slot: u8, device: Box<dyn Device>) {
        self.slots[(slot & 0xF) as usize] = Some(device);
    }

    pub fn is_bound(&self, slot: u8) -> bool {
        self.slots[(slot & 0xF) as usize].is_some()
    }

    fn device(&mut self, slot: u8) -> Result<&'_ mut (dyn Device + 'static), BusError> {
        self.slots[(slot & 0xF) as usize]
            .as_deref_mut()
            .ok_or(BusError::Absent { slot })
    }

    pub fn write(&mut self, slot: u8, bytes: &[u8]) -> Result<(), BusError> {
        Ok(self.device(slot)?.write(bytes)?)
    }

    pub fn read(&mut self, slot: u8, n: usize) -> Result<Vec<u8>, BusError> {
        Ok(self.device(slot)?.read(n)?)
    }

    pub fn set_pointer(&mut self, slot: u8, value: u16) -> Result<(), BusError> {
        self.device(slot)?.set_pointer(value);
        Ok(())
    }

    pub fn get_pointer(&mut self, slot: u8) -> Result<u16, BusError> {
        Ok(self.device(slot)?.get_pointer())
    }
}

impl Default for DeviceBus {
    /// Slot 0 pre-bound to the console on the process standard streams.
    fn default() -> Self {
        let mut bus = Self::empty();
        bus.bind(0, Box::new(ConsoleIo::stdio()));
        bus
    }
}
