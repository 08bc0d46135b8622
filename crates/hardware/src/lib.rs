//! Turtle16 system simulator library.
//!
//! This crate implements a cycle-accurate, schematic-level model of the
//! Turtle16 16-bit pipelined processor with the following:
//! 1. **Core:** Five pipeline stages (fetch, decode, execute, memory,
//!    writeback), hazard control, register file, and condition flags.
//! 2. **Control:** A generated 512-entry control ROM and an independent
//!    programmable-logic (sum-of-products) decoder that must agree with it
//!    bit for bit.
//! 3. **GAL:** A general-purpose ATF22V10 emulator driven by a fuse map,
//!    constructed from an explicit fuse array or a JEDEC fuse listing.
//!    Both the hazard unit and the logic decoder can be realized on it.
//! 4. **ISA:** Instruction field extraction and disassembly for the fixed
//!    16-bit instruction encoding.
//! 5. **Simulation:** A whole-machine wrapper with RAM, instruction memory,
//!    snapshot/restore, and statistics collection.

/// Common constants (instruction bit fields) and crate error types.
pub mod common;
/// CPU core (pipeline, architectural state, ALU, schematic-level model).
pub mod core;
/// Control-word derivation (ROM generator and programmable-logic decoder).
pub mod decoder;
/// Generic Array Logic emulation (ATF22V10, fuse maps, JEDEC parsing).
pub mod gal;
/// Instruction set (opcodes, field extraction, disassembly).
pub mod isa;
/// Whole-machine simulation (computer wrapper, snapshots).
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Schematic-level CPU model; steps the five pipeline stages per clock.
pub use crate::core::Cpu;
/// Top-level machine (CPU + RAM + instruction memory); construct with `Computer::new`.
pub use crate::sim::Computer;
