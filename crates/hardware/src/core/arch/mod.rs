//! Architectural state of the processor.
//!
//! 1. **Registers:** The 8-entry general-purpose register file with its
//!    byte-granular write port.
//! 2. **Flags:** The carry/zero/overflow condition record consumed by the
//!    instruction decoder.
//! 3. **Machine state:** The reset/run/halt lifecycle.

/// Condition flags.
pub mod flags;
/// General-purpose register file.
pub mod gpr;
/// Machine run-state lifecycle.
pub mod state;

pub use flags::Flags;
pub use gpr::RegisterFile;
pub use state::MachineState;
