//! Machine boot and stepping helpers.

use turtle16_core::Computer;
use turtle16_core::common::constants::PIPELINE_DEPTH;
use turtle16_core::core::cpu::StepOutcome;
use turtle16_core::core::pipeline::hazards::HazardControl;
use turtle16_core::decoder::Decoder;

/// Cycles the reset drain occupies before the first real fetch.
pub const DRAIN: u64 = PIPELINE_DEPTH as u64;

/// Installs a tracing subscriber honoring `RUST_LOG`, once.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Steps `n` cycles, asserting the machine actually advances.
pub fn step_n(computer: &mut Computer, n: u64) {
    for _ in 0..n {
        assert_eq!(computer.step(), StepOutcome::Stepped, "machine halted early");
    }
}

/// Boots a machine over the default units: loads the program, arms
/// reset, and drains the pipeline so the next step fetches address zero.
pub fn boot(program: &[u16]) -> Computer {
    init_tracing();
    let mut computer = Computer::new();
    computer.load_program(program);
    computer.reset();
    step_n(&mut computer, DRAIN);
    computer
}

/// As [`boot`], over explicit decoder and hazard-control units.
pub fn boot_with(
    decoder: Box<dyn Decoder>,
    hazard: Box<dyn HazardControl>,
    program: &[u16],
) -> Computer {
    init_tracing();
    let mut computer = Computer::with_units(decoder, hazard);
    computer.load_program(program);
    computer.reset();
    step_n(&mut computer, DRAIN);
    computer
}
