//! The Turtle16 machine.
//!
//! Wraps the schematic-level CPU with a flat 65,536-word RAM and a
//! separate instruction memory, implements the bus contract over them,
//! and exposes the surface the embedding tools consume: load a program,
//! read and write registers and memory, single-step or run with a
//! caller-supplied bound, snapshot and restore, and disassemble.

use crate::core::bus::SystemBus;
use crate::core::cpu::{Cpu, RunOutcome, StepOutcome};
use crate::core::pipeline::hazards::HazardControl;
use crate::decoder::Decoder;
use crate::isa::disasm;
use crate::sim::snapshot::Snapshot;
use crate::stats::SimStats;

/// Words in each of RAM and instruction memory (the full 16-bit space).
pub const MEMORY_WORDS: usize = 1 << 16;

/// Bus adapter over the computer's memories.
///
/// Both accesses are combinational within a cycle; instruction reads are
/// idempotent, so a stalled fetch may repeat an address freely.
struct MemoryBus<'a> {
    ram: &'a mut [u16],
    instructions: &'a [u16],
}

impl SystemBus for MemoryBus<'_> {
    fn load_instruction(&mut self, addr: u16) -> u16 {
        self.instructions[addr as usize]
    }

    fn load(&mut self, addr: u16) -> u16 {
        self.ram[addr as usize]
    }

    fn store(&mut self, value: u16, addr: u16) {
        self.ram[addr as usize] = value;
    }
}

/// A complete Turtle16 machine.
#[derive(Debug)]
pub struct Computer {
    cpu: Cpu,
    ram: Vec<u16>,
    instructions: Vec<u16>,
}

impl Computer {
    /// Creates a machine with zeroed memories, reset armed.
    pub fn new() -> Self {
        Self::with_cpu(Cpu::new())
    }

    /// Creates a machine around an explicitly configured CPU, for
    /// swapping in the programmable-logic decoder or the GAL hazard unit.
    pub fn with_units(decoder: Box<dyn Decoder>, hazard: Box<dyn HazardControl>) -> Self {
        Self::with_cpu(Cpu::with_units(decoder, hazard))
    }

    fn with_cpu(cpu: Cpu) -> Self {
        Self {
            cpu,
            ram: vec![0; MEMORY_WORDS],
            instructions: vec![0; MEMORY_WORDS],
        }
    }

    /// Copies a program into instruction memory starting at address zero;
    /// the remainder stays zero (NOP).
    pub fn load_program(&mut self, words: &[u16]) {
        self.instructions.fill(0);
        self.instructions[..words.len()].copy_from_slice(words);
    }

    /// Writes one instruction word.
    pub fn set_instruction(&mut self, addr: u16, word: u16) {
        self.instructions[addr as usize] = word;
    }

    /// Reads one instruction word.
    pub fn instruction(&self, addr: u16) -> u16 {
        self.instructions[addr as usize]
    }

    /// Reads one RAM word.
    pub fn ram(&self, addr: u16) -> u16 {
        self.ram[addr as usize]
    }

    /// Writes one RAM word.
    pub fn set_ram(&mut self, addr: u16, value: u16) {
        self.ram[addr as usize] = value;
    }

    /// Reads a general-purpose register.
    pub const fn register(&self, idx: u8) -> u16 {
        self.cpu.register(idx)
    }

    /// Presets a general-purpose register.
    pub fn set_register(&mut self, idx: u8, val: u16) {
        self.cpu.set_register(idx, val);
    }

    /// Current program counter.
    pub const fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    /// Whether the machine has halted.
    pub const fn is_halted(&self) -> bool {
        self.cpu.is_halted()
    }

    /// The CPU model itself.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Statistics collected so far.
    pub const fn stats(&self) -> &SimStats {
        self.cpu.stats()
    }

    /// Resets the CPU; memories are left intact.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Advances the machine one clock edge.
    pub fn step(&mut self) -> StepOutcome {
        let mut bus = MemoryBus {
            ram: &mut self.ram,
            instructions: &self.instructions,
        };
        self.cpu.step(&mut bus)
    }

    /// Steps until halt or until the caller's bound is exhausted.
    pub fn run(&mut self, max_steps: u64) -> RunOutcome {
        let mut bus = MemoryBus {
            ram: &mut self.ram,
            instructions: &self.instructions,
        };
        self.cpu.run(&mut bus, max_steps)
    }

    /// Disassembles the instruction word at an address.
    pub fn disassemble(&self, addr: u16) -> String {
        disasm::disassemble(self.instructions[addr as usize])
    }

    /// Captures the full machine state as a deep copy.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cpu: self.cpu.capture(),
            ram: self.ram.clone(),
            instructions: self.instructions.clone(),
        }
    }

    /// Restores a previously captured machine state.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.cpu.restore(&snapshot.cpu);
        self.ram.clone_from(&snapshot.ram);
        self.instructions.clone_from(&snapshot.instructions);
    }
}

impl Default for Computer {
    fn default() -> Self {
        Self::new()
    }
}
