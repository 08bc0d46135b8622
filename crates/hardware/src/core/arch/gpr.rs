//! Turtle16 general-purpose register file.
//!
//! This module implements the 8-entry register file. It performs the
//! following:
//! 1. **Storage:** Maintains eight 16-bit registers (`r0`-`r7`).
//! 2. **Byte-granular writes:** The write port can commit the low byte,
//!    the high byte, or both, which is how `LI` and `LUI` differ.
//! 3. **Debugging:** Provides utilities for dumping the register state.

use serde::{Deserialize, Serialize};

use crate::common::constants::REGISTER_COUNT;
use crate::core::pipeline::latches::WritebackOutput;

/// General-purpose register file.
///
/// Eight 16-bit registers. The write port is driven exclusively by the
/// writeback stage's output; reads happen in the decode stage after the
/// previous cycle's write has committed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterFile {
    regs: [u16; REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a register file with all registers cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7); only the low three bits are used.
    pub const fn read(&self, idx: u8) -> u16 {
        self.regs[(idx & 0x7) as usize]
    }

    /// Writes a full 16-bit value to a register.
    ///
    /// Used by the embedding machine to preset state; the pipeline itself
    /// writes through [`Self::write_back`].
    pub fn write(&mut self, idx: u8, val: u16) {
        self.regs[(idx & 0x7) as usize] = val;
    }

    /// Commits a writeback-stage result through the byte-granular port.
    ///
    /// Nothing happens unless the write enable is asserted; with it
    /// asserted, `wrl` and `wrh` independently select the low and high
    /// byte, so a `LUI` can replace the upper byte while preserving the
    /// lower one.
    pub fn write_back(&mut self, wb: &WritebackOutput) {
        if !wb.wben {
            return;
        }
        let idx = (wb.sel_c & 0x7) as usize;
        let mut val = self.regs[idx];
        if wb.wrl {
            val = (val & 0xFF00) | (wb.c & 0x00FF);
        }
        if wb.wrh {
            val = (val & 0x00FF) | (wb.c & 0xFF00);
        }
        self.regs[idx] = val;
    }

    /// Clears every register to zero.
    pub fn clear(&mut self) {
        self.regs = [0; REGISTER_COUNT];
    }

    /// Returns a copy of the raw register array.
    pub const fn dump(&self) -> [u16; REGISTER_COUNT] {
        self.regs
    }
}
