//! # Chip64 execution engine
//!
//! Runs Chip64 program images: the fetch/decode/dispatch loop over the
//! 4096-byte address space, the 16-register file with its flag semantics,
//! the call stack, and the 16-slot device bus with the standard
//! peripherals (console, memory extension, ROM, float unit).
//!
//! ## Example
//!
//! ```rust
//! use chip64_runtime::{Vm, VmConfig};
//! use chip64_spec::Program;
//!
//! // 6005: r0 <- 5; 0000: halt.
//! let program = Program::new(vec![0x60, 0x05, 0x00, 0x00]).unwrap();
//! let mut vm = Vm::new(&program, VmConfig::default());
//! let result = vm.run();
//! assert!(result.halted_cleanly());
//! assert_eq!(vm.state().regs[0], 5);
//! ```

pub mod bus;
pub mod device;
pub mod devices;
pub mod error;
pub mod execute;
pub mod memory;
pub mod state;
pub mod vm;

pub use bus::{BusError, DeviceBus};
pub use device::{Device, DeviceError, DeviceResult};
pub use error::RuntimeError;
pub use memory::AddressSpace;
pub use state::{HaltReason, VmState};
pub use vm::{ExecutionResult, Vm, VmConfig};

/// Run a program image over the default device map.
pub fn run(program: &chip64_spec::Program) -> ExecutionResult {
    let mut vm = Vm::new(program, VmConfig::default());
    vm.run()
}
