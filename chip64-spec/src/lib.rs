//! # Chip64 instruction set
//!
//! This crate defines the core types for the Chip64 bytecode format: the
//! register file layout, the instruction enum, the decoder, and the program
//! image container.
//!
//! Chip64 is a register machine in the CHIP-8 lineage, reworked for small
//! numerical programs: 16 general 16-bit registers, a 4096-byte address
//! space shared by code and data, a 16-deep call stack, and a 16-slot
//! device bus in place of the classic sprite/timer opcodes.
//!
//! ## Example
//!
//! ```rust
//! use chip64_spec::{decode, Instruction, Register};
//!
//! // 6A2A: load 0x2A into rA
//! let instr = decode(0x6A2A).unwrap();
//! assert_eq!(instr, Instruction::Acr { x: Register::RA, imm: 0x2A });
//! ```

pub mod decode;
pub mod error;
pub mod instruction;
pub mod program;
pub mod register;

pub use decode::{decode, word_from_bytes};
pub use error::Chip64Error;
pub use instruction::Instruction;
pub use program::Program;
pub use register::Register;

/// Size of the linear address space in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Mask for the 12-bit quantities: program counter, memory pointer, and
/// call stack entries.
pub const ADDR_MASK: u16 = 0x0FFF;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 16;

/// Number of device bus slots.
pub const NUM_DEVICE_SLOTS: usize = 16;

/// Call stack capacity in return addresses.
pub const STACK_DEPTH: usize = 16;
