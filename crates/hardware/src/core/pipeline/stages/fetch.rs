//! Instruction Fetch (IF) stage.
//!
//! Owns the program counter. Each cycle it fetches the instruction word at
//! the current PC through the injected bus and advances the PC by one,
//! modulo 2^16. A jump resolved by the execute stage in the previous cycle
//! replaces the PC before the fetch: relative jumps add the sign-extended
//! offset carried with the jump instruction, absolute jumps load the ALU
//! result.
//!
//! Two hold controls arrive from hazard control:
//! - `stall_pc` freezes the PC so the same address is fetched again once
//!   the stall clears.
//! - `stall_if` suppresses the fetch itself and emits a synthetic all-zero
//!   NOP word instead. The same suppression path covers the one-cycle jump
//!   shadow, so the wrong-path slot behind a taken jump never reaches the
//!   instruction bus.

use serde::{Deserialize, Serialize};

use crate::core::bus::SystemBus;
use crate::core::pipeline::latches::FetchOutput;

/// Control inputs to the fetch stage for one cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchInput {
    /// Hold the program counter this cycle.
    pub stall_pc: bool,
    /// Suppress the fetch and emit a synthetic NOP word.
    pub stall_if: bool,
    /// A jump is in the execute stage this cycle: suppress the slot that
    /// would otherwise fetch from the wrong path.
    pub jump_shadow: bool,
    /// Jump strobe latched from the previous cycle's execute output.
    pub j: bool,
    /// Absolute-jump strobe latched alongside `j`.
    pub jabs: bool,
    /// Sign-extended relative offset of the jumping instruction.
    pub offset: u16,
    /// Absolute target (the jumping instruction's ALU result).
    pub target: u16,
}

/// The fetch stage and its program counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fetch {
    pc: u16,
}

impl Fetch {
    /// Creates a fetch stage with the PC at zero.
    pub const fn new() -> Self {
        Self { pc: 0 }
    }

    /// Current program counter (the next fetch address).
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Resets the program counter to zero.
    pub fn reset(&mut self) {
        self.pc = 0;
    }

    /// Executes one fetch cycle.
    ///
    /// # Arguments
    ///
    /// * `input` - Stall and jump controls for this cycle.
    /// * `bus`   - Instruction memory access, injected by the embedding
    ///   machine.
    pub fn step(&mut self, input: &FetchInput, bus: &mut dyn SystemBus) -> FetchOutput {
        if input.j {
            self.pc = if input.jabs {
                input.target
            } else {
                self.pc.wrapping_add(input.offset)
            };
        }

        let out = if input.stall_if || input.jump_shadow {
            // Suppressed slot: no bus traffic, a zero word (NOP) flows on.
            FetchOutput {
                ins: 0,
                pc: self.pc,
            }
        } else {
            FetchOutput {
                ins: bus.load_instruction(self.pc),
                pc: self.pc,
            }
        };

        if !input.stall_pc {
            self.pc = self.pc.wrapping_add(1);
        }

        out
    }
}
