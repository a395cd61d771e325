//! Instruction semantics.

use crate::bus::DeviceBus;
use crate::memory::AddressSpace;
use crate::state::{HaltReason, VmState};
use chip64_spec::{Instruction, Register, ADDR_MASK};
use rand::Rng;
use rand::RngCore;

/// Execute one decoded instruction.
///
/// Each arm decides the next PC: sequential operations advance by 2, taken
/// skips by 4, jumps and calls assign it. Opcodes that set the flag store
/// their result first and write rF last, so a destination of rF ends up
/// holding the flag. Faults (stack, device, truncated transfers) raise the
/// alert on `state` rather than returning an error.
pub fn execute(
    instr: &Instruction,
    state: &mut VmState,
    memory: &mut AddressSpace,
    bus: &mut DeviceBus,
    rng: &mut dyn RngCore,
) {
    match *instr {
        Instruction::Halt => {
            state.halt(HaltReason::Halt);
        }

        Instruction::Ret => {
            if let Some(addr) = state.pop_return() {
                state.pc = addr;
            }
        }

        Instruction::Goto { addr } => {
            state.pc = addr;
        }

        Instruction::Call { addr } => {
            if state.push_return(state.pc.wrapping_add(2) & ADDR_MASK) {
                state.pc = addr;
            }
        }

        Instruction::Snec { x, imm } => {
            state.pc += if state.read_reg(x) == u16::from(imm) { 4 } else { 2 };
        }

        Instruction::Snuec { x, imm } => {
            state.pc += if state.read_reg(x) != u16::from(imm) { 4 } else { 2 };
        }

        Instruction::Sne { x, y } => {
            state.pc += if state.read_reg(x) == state.read_reg(y) { 4 } else { 2 };
        }

        Instruction::Snue { x, y } => {
            state.pc += if state.read_reg(x) != state.read_reg(y) { 4 } else { 2 };
        }

        Instruction::Acr { x, imm } => {
            state.write_reg(x, u16::from(imm));
            state.pc += 2;
        }

        Instruction::Adc { x, imm } => {
            let value = state.read_reg(x).wrapping_add(u16::from(imm));
            state.write_reg(x, value);
            state.pc += 2;
        }

        Instruction::Ar { x, y } => {
            state.write_reg(x, state.read_reg(y));
            state.pc += 2;
        }

        Instruction::Or { x, y } => {
            state.write_reg(x, state.read_reg(x) | state.read_reg(y));
            state.pc += 2;
        }

        Instruction::And { x, y } => {
            state.write_reg(x, state.read_reg(x) & state.read_reg(y));
            state.pc += 2;
        }

        Instruction::Xor { x, y } => {
            state.write_reg(x, state.read_reg(x) ^ state.read_reg(y));
            state.pc += 2;
        }

        Instruction::Add { x, y } => {
            let sum = u32::from(state.read_reg(x)) + u32::from(state.read_reg(y));
            state.write_reg(x, sum as u16);
            state.set_flag(u16::from(sum > 0xFFFF));
            state.pc += 2;
        }

        Instruction::Sub { x, y } => {
            let (lhs, rhs) = (state.read_reg(x), state.read_reg(y));
            state.write_reg(x, lhs.wrapping_sub(rhs));
            state.set_flag(u16::from(lhs >= rhs));
            state.pc += 2;
        }

        Instruction::Rsub { x, y } => {
            let (lhs, rhs) = (state.read_reg(y), state.read_reg(x));
            state.write_reg(x, lhs.wrapping_sub(rhs));
            state.set_flag(u16::from(lhs >= rhs));
            state.pc += 2;
        }

        Instruction::Shr { x, amount } => {
            let value = state.read_reg(x);
            let captured = (value >> amount) & 1;
            state.write_reg(x, value >> amount);
            state.set_flag(captured);
            state.pc += 2;
        }

        Instruction::Shl { x, amount } => {
            let value = state.read_reg(x);
            let captured = if amount == 0 {
                0
            } else {
                (value >> (16 - amount)) & 1
            };
            state.write_reg(x, value << amount);
            state.set_flag(captured);
            state.pc += 2;
        }

        Instruction::Smp { addr } => {
            state.mp = addr;
            state.pc += 2;
        }

        Instruction::Cpac { addr } => {
            state.pc = state.read_reg(Register::R0).wrapping_add(addr) & ADDR_MASK;
        }

        Instruction::Bar { x, mask } => {
            let byte: u8 = rng.gen();
            state.write_reg(x, u16::from(byte & mask));
            state.pc += 2;
        }

        Instruction::Write { slot, len } => {
            let (bytes, truncated) = memory.read_range(state.mp, len as usize);
            if truncated {
                state.raise_alert();
            }
            if let Err(err) = bus.write(slot, bytes) {
                tracing::debug!("Device {slot:#x} write dropped: {err}");
                state.raise_alert();
            }
            state.pc += 2;
        }

        Instruction::Read { slot, len } => {
            // Clamp first so a truncated window asks the device for fewer
            // bytes.
            let avail = memory.clamped_len(state.mp, len as usize);
            if avail < len as usize {
                state.raise_alert();
            }
            match bus.read(slot, avail) {
                Ok(bytes) => {
                    memory.write_range(state.mp, &bytes);
                }
                Err(err) => {
                    tracing::debug!("Device {slot:#x} read failed: {err}");
                    state.raise_alert();
                }
            }
            state.pc += 2;
        }

        Instruction::Dps { slot } => {
            if let Err(err) = bus.set_pointer(slot, state.flag()) {
                tracing::debug!("Device {slot:#x} pointer set failed: {err}");
                state.raise_alert();
            }
            state.pc += 2;
        }

        Instruction::Dpg { slot } => {
            match bus.get_pointer(slot) {
                Ok(value) => state.set_flag(value),
                Err(err) => {
                    tracing::debug!("Device {slot:#x} pointer get failed: {err}");
                    state.raise_alert();
                }
            }
            state.pc += 2;
        }

        Instruction::Callr { x } => {
            let target = state.read_reg(x) & ADDR_MASK;
            if state.push_return(state.pc.wrapping_add(2) & ADDR_MASK) {
                state.pc = target;
            }
        }

        Instruction::Rmp { x } => {
            state.write_reg(x, state.mp);
            state.pc += 2;
        }

        Instruction::Mpar { x } => {
            state.mp = state.mp.wrapping_add(state.read_reg(x)) & ADDR_MASK;
            state.pc += 2;
        }

        Instruction::Spl { x } => {
            let bytes = state.read_reg(x).to_be_bytes();
            if memory.write_range(state.mp, &bytes) {
                state.raise_alert();
            }
            state.pc += 2;
        }

        Instruction::Ld { x } => {
            for k in 0..=x.index() {
                let addr = state.mp.wrapping_add(2 * k as u16);
                match memory.read_word(addr) {
                    Some(value) => state.write_reg(Register::from_nibble(k as u8), value),
                    None => {
                        state.raise_alert();
                        break;
                    }
                }
            }
            state.pc += 2;
        }
    }
}
