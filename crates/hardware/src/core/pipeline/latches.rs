//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the output record each of the five stages produces:
//! Fetch -> Decode -> Execute -> Memory -> Writeback. The CPU model owns
//! one instance of each record as the inter-stage latch: a stage's output
//! from cycle *n* is the downstream stage's input in cycle *n + 1*. No
//! stage mutates another stage's state; these immutable value types are
//! the only communication channel, apart from the explicitly modeled
//! forwarding taps the hazard unit controls.
//!
//! Default-constructed records are bubbles: a zero instruction word (NOP)
//! with the NOP control word.

use serde::{Deserialize, Serialize};

use crate::core::pipeline::signals::ControlWord;

/// Output of the fetch stage (the IF/ID latch).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchOutput {
    /// Fetched instruction word; zero for a suppressed (synthetic NOP) slot.
    pub ins: u16,
    /// Address the word was fetched from.
    pub pc: u16,
}

/// Output of the decode stage (the ID/EX latch).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecodeOutput {
    /// Control word looked up for this instruction (NOP for bubbles).
    pub ctl: ControlWord,
    /// Raw instruction word; the execute stage extracts immediates from it.
    pub ins: u16,
    /// Program counter of the instruction.
    pub pc: u16,
    /// Operand read from register port A, after any forwarding override.
    pub a: u16,
    /// Operand read from register port B, after any forwarding override.
    pub b: u16,
    /// Destination register index carried to writeback.
    pub sel_c: u8,
    /// Sign-extended relative jump offset for the fetch stage.
    pub jump_offset: u16,
}

/// Output of the execute stage (the EX/MEM latch).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecuteOutput {
    /// Control word, passed through unchanged.
    pub ctl: ControlWord,
    /// ALU result; the memory address for loads and stores, the jump
    /// target for absolute jumps.
    pub y: u16,
    /// Store operand (register B, PC, or immediate per the control word).
    pub store_op: u16,
    /// Carry flag value produced this cycle.
    pub carry: bool,
    /// Zero flag value produced this cycle.
    pub zero: bool,
    /// Overflow flag value produced this cycle.
    pub overflow: bool,
    /// Destination register index.
    pub sel_c: u8,
    /// Relative jump offset, passed through for the fetch stage.
    pub jump_offset: u16,
    /// Program counter of the instruction.
    pub pc: u16,
}

/// Output of the memory stage (the MEM/WB latch).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryOutput {
    /// Control word, passed through unchanged.
    pub ctl: ControlWord,
    /// ALU result, passed through.
    pub y: u16,
    /// Store operand; replaced by the loaded word for loads.
    pub store_op: u16,
    /// Destination register index.
    pub sel_c: u8,
    /// Program counter of the instruction.
    pub pc: u16,
}

/// Output of the writeback stage, consumed by the register file.
///
/// The byte strobes here are asserted-high: the writeback stage has
/// already folded the control word's active-low polarity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WritebackOutput {
    /// Value to write back (ALU result or store operand).
    pub c: u16,
    /// Destination register index.
    pub sel_c: u8,
    /// Write the low byte.
    pub wrl: bool,
    /// Write the high byte.
    pub wrh: bool,
    /// Write enable; nothing commits while clear.
    pub wben: bool,
}
