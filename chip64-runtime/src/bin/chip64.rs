//! Chip64 command-line host.
//!
//! Loads a program image, binds the requested devices, runs to a terminal
//! state, and maps it onto the process exit status: 0 on a clean HALT,
//! 1 on an alert or out-of-bounds termination, 2 on host errors.

use chip64_runtime::devices::{FloatUnit, MemoryExtension, Rom};
use chip64_runtime::{DeviceBus, RuntimeError, Vm, VmConfig};
use chip64_spec::Program;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Run a Chip64 program image.
#[derive(Parser, Debug)]
#[command(name = "chip64", version, about)]
struct Args {
    /// Program image, loaded at address 0.
    image: PathBuf,

    /// Leave slot 0 unbound instead of the console, for batch runs.
    #[arg(long)]
    no_console: bool,

    /// Bind the memory extension device to slot 1.
    #[arg(long)]
    memory_extension: bool,

    /// Bind the ROM device to slot 2, loading its image from PATH.
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "rom.crm")]
    rom: Option<PathBuf>,

    /// Bind the floating-point device to slot 3.
    #[arg(long)]
    float: bool,

    /// Cycle budget before the run is cut off.
    #[arg(long, default_value_t = 1_000_000)]
    max_cycles: u64,

    /// Print each executed instruction to stderr.
    #[arg(long)]
    trace: bool,

    /// Seed the random source for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn build_vm(args: &Args) -> Result<Vm, RuntimeError> {
    let program = Program::from_file(&args.image)?;

    let mut bus = if args.no_console {
        DeviceBus::empty()
    } else {
        DeviceBus::default()
    };
    if args.memory_extension {
        bus.bind(1, Box::new(MemoryExtension::new()));
    }
    if let Some(path) = &args.rom {
        bus.bind(2, Box::new(Rom::from_path(path)?));
    }
    if args.float {
        bus.bind(3, Box::new(FloatUnit::new()));
    }

    let config = VmConfig {
        max_cycles: args.max_cycles,
        trace: args.trace,
        seed: args.seed,
    };
    Ok(Vm::with_bus(&program, bus, config))
}

/// Build the VM and run it, mapping the outcome to the exit status.
fn run(args: &Args) -> u8 {
    match build_vm(args) {
        Ok(mut vm) => vm.run().exit_code() as u8,
        Err(err) => {
            eprintln!("chip64: {err}");
            2
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    ExitCode::from(run(&args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip64_spec::MEMORY_SIZE;
    use std::path::Path;

    fn args(image: impl AsRef<Path>) -> Args {
        Args {
            image: image.as_ref().to_path_buf(),
            no_console: true,
            memory_extension: false,
            rom: None,
            float: false,
            max_cycles: 1_000_000,
            trace: false,
            seed: None,
        }
    }

    /// Write a program image to a uniquely named temp file.
    fn image_file(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("chip64-cli-{name}.bin"));
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "chip64",
            "prog.bin",
            "--no-console",
            "--memory-extension",
            "--rom",
            "image.crm",
            "--float",
            "--max-cycles",
            "99",
            "--seed",
            "7",
        ])
        .unwrap();

        assert_eq!(args.image, PathBuf::from("prog.bin"));
        assert!(args.no_console);
        assert!(args.memory_extension);
        assert_eq!(args.rom, Some(PathBuf::from("image.crm")));
        assert!(args.float);
        assert_eq!(args.max_cycles, 99);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_rom_flag_defaults_its_path() {
        let args = Args::try_parse_from(["chip64", "prog.bin", "--rom"]).unwrap();
        assert_eq!(args.rom, Some(PathBuf::from("rom.crm")));
    }

    #[test]
    fn test_build_vm_binds_requested_slots() {
        let path = image_file("bindings", &[0x00, 0x00]);
        let mut args = args(&path);
        args.memory_extension = true;
        args.float = true;

        let vm = build_vm(&args).unwrap();
        assert!(!vm.bus().is_bound(0));
        assert!(vm.bus().is_bound(1));
        assert!(!vm.bus().is_bound(2));
        assert!(vm.bus().is_bound(3));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_console_bound_by_default() {
        let path = image_file("console", &[0x00, 0x00]);
        let mut args = args(&path);
        args.no_console = false;

        let vm = build_vm(&args).unwrap();
        assert!(vm.bus().is_bound(0));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_clean_halt_exits_zero() {
        let path = image_file("clean", &[0x60, 0x05, 0x00, 0x00]);
        assert_eq!(run(&args(&path)), 0);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_alert_exits_one() {
        // An undecodable word raises the alert before the HALT.
        let path = image_file("alert", &[0x00, 0x01, 0x00, 0x00]);
        assert_eq!(run(&args(&path)), 1);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_out_of_bounds_exits_one() {
        // GOTO 0xFFF: the fetch at the last byte falls off the end.
        let path = image_file("oob", &[0x1F, 0xFF]);
        assert_eq!(run(&args(&path)), 1);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_image_exits_two() {
        assert_eq!(run(&args("/nonexistent/prog.bin")), 2);
    }

    #[test]
    fn test_oversize_image_exits_two() {
        let path = image_file("oversize", &vec![0u8; MEMORY_SIZE + 1]);
        assert_eq!(run(&args(&path)), 2);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_rom_exits_two() {
        let path = image_file("norom", &[0x00, 0x00]);
        let mut args = args(&path);
        args.rom = Some(PathBuf::from("/nonexistent/rom.crm"));
        assert_eq!(run(&args), 2);
        std::fs::remove_file(&path).unwrap();
    }
}
