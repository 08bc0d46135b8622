//! Whole-machine simulation.
//!
//! 1. **Computer:** The CPU model wired to flat RAM and instruction
//!    memory through the bus callbacks, plus the accessors the embedding
//!    debug console and assembler consume.
//! 2. **Snapshots:** Deep, serializable captures of the full machine
//!    state for undo and state-comparison workflows.

/// The Turtle16 machine wrapper.
pub mod computer;
/// Full-machine state capture.
pub mod snapshot;

pub use computer::Computer;
pub use snapshot::Snapshot;
