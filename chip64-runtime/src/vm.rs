//! Virtual machine driver: the fetch, decode, dispatch loop.

use crate::bus::DeviceBus;
use crate::execute::execute;
use crate::memory::AddressSpace;
use crate::state::{HaltReason, VmState};
use chip64_spec::{decode, Program};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// VM configuration.
#[derive(Debug, Clone)]
pub struct VmConfig {
    /// Maximum number of cycles before the run is cut off.
    pub max_cycles: u64,

    /// Print each executed instruction to stderr.
    pub trace: bool,

    /// Seed for the random source behind BAR; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_cycles: 1_000_000,
            trace: false,
            seed: None,
        }
    }
}

/// Terminal status of a run.
///
/// Execution faults never surface as host errors; they land here as the
/// halt reason and the alert flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of cycles executed.
    pub cycles: u64,

    /// Why the machine stopped.
    pub halt_reason: HaltReason,

    /// Whether any illegal opcode, fault, or device error was seen.
    pub alert: bool,
}

impl ExecutionResult {
    /// HALT reached (explicitly or fetched from zeroed memory) with the
    /// alert clear.
    pub fn halted_cleanly(&self) -> bool {
        self.halt_reason == HaltReason::Halt && !self.alert
    }

    pub fn out_of_bounds(&self) -> bool {
        matches!(self.halt_reason, HaltReason::OutOfBounds { .. })
    }

    /// Process exit status for hosts: 0 only on a clean HALT.
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.halted_cleanly())
    }
}

/// The Chip64 virtual machine.
pub struct Vm {
    state: VmState,
    memory: AddressSpace,
    bus: DeviceBus,
    rng: StdRng,
    config: VmConfig,
}

impl Vm {
    /// VM over a program image and the default device map (console at
    /// slot 0).
    pub fn new(program: &Program, config: VmConfig) -> Self {
        Self::with_bus(program, DeviceBus::default(), config)
    }

    /// VM over a program image and a caller-built device bus.
    pub fn with_bus(program: &Program, bus: DeviceBus, config: VmConfig) -> Self {
        let mut memory = AddressSpace::new();
        memory.load(program.bytes());
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: VmState::new(),
            memory,
            bus,
            rng,
            config,
        }
    }

    /// Run until a terminal state: HALT, a fault, the PC leaving the
    /// address space, or the cycle budget running out.
    pub fn run(&mut self) -> ExecutionResult {
        loop {
            if let Some(reason) = self.state.halt_reason.clone() {
                return self.result(reason);
            }
            if self.state.cycles >= self.config.max_cycles {
                return self.result(HaltReason::CycleLimit);
            }

            let pc = self.state.pc;
            let Some(word) = self.memory.read_word(pc) else {
                return self.result(HaltReason::OutOfBounds { pc });
            };

            match decode(word) {
                Ok(instr) => {
                    if self.config.trace {
                        eprintln!("[{:6}] PC={:#05x} {:?}", self.state.cycles, pc, instr);
                    }
                    execute(
                        &instr,
                        &mut self.state,
                        &mut self.memory,
                        &mut self.bus,
                        &mut self.rng,
                    );
                }
                Err(_) => {
                    tracing::debug!("Illegal opcode {word:#06x} at PC={pc:#05x}");
                    self.state.raise_alert();
                    self.state.pc += 2;
                }
            }

            self.state.inc_cycles();
        }
    }

    fn result(&mut self, reason: HaltReason) -> ExecutionResult {
        self.state.halt_reason = Some(reason.clone());
        ExecutionResult {
            cycles: self.state.cycles,
            halt_reason: reason,
            alert: self.state.alert,
        }
    }

    /// Execution state, for host inspection.
    pub fn state(&self) -> &VmState {
        &self.state
    }

    /// The address space, for host inspection.
    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    /// The device bus, for host inspection.
    pub fn bus(&self) -> &DeviceBus {
        &self.bus
    }

    /// The device bus, for rebinding between runs or poking devices in
    /// tests.
    pub fn bus_mut(&mut self) -> &mut DeviceBus {
        &mut self.bus
    }
}
