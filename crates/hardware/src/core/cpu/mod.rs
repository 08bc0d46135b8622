//! Schematic-level CPU model.
//!
//! Composes the five pipeline stages, hazard control, the register file,
//! and the condition flags, and advances them one clock edge per
//! [`Cpu::step`]. Stage inputs are the previous cycle's latched outputs;
//! the only same-cycle data flow is the modeled forwarding taps and the
//! jump/flush strobes hazard control derives from the in-flight control
//! words.
//!
//! Within one step, the stages evaluate oldest first:
//! 1. Writeback produces the commit for the oldest instruction; the
//!    register file applies it at the top of decode, before the reads.
//! 2. Memory and execute transform their latched inputs.
//! 3. Hazard control inspects the decode slot against the execute and
//!    memory occupants and picks forwarding, stall, or flush.
//! 4. Decode reads (or receives forwarded) operands.
//! 5. Fetch advances the PC, honoring stalls, the one-cycle jump shadow,
//!    and the redirect latched from the jump's execute cycle.
//!
//! The run-state machine is `Resetting -> Running -> Halted`: the reset
//! drain holds NOP control words through every stage for one full
//! pipeline depth, and the machine halts the cycle an asserted `HLT`
//! reaches execute. Stepping a halted machine is a reported no-op.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::common::constants::PIPELINE_DEPTH;
use crate::core::arch::{Flags, MachineState, RegisterFile};
use crate::core::bus::SystemBus;
use crate::core::pipeline::hazards::{HazardControl, HazardControlLogic, HazardInput};
use crate::core::pipeline::latches::{DecodeOutput, ExecuteOutput, FetchOutput, MemoryOutput};
use crate::core::pipeline::signals::ControlWord;
use crate::core::pipeline::stages::{
    DecodeInput, Fetch, FetchInput, decode, decode_stage, execute_stage, memory_stage,
    writeback_stage,
};
use crate::core::pipeline::OperandForward;
use crate::decoder::{Decoder, DecoderGenerator};
use crate::isa::{Opcode, disasm, fields};
use crate::stats::SimStats;

/// Result of a single-step request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The clock advanced one edge.
    Stepped,
    /// The machine is halted; nothing happened.
    Halted,
}

/// Result of a bounded run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The machine halted within the step budget.
    Halted,
    /// The step budget ran out first.
    StepLimit,
}

/// Serializable architectural and microarchitectural state of the CPU.
///
/// Everything [`Cpu::restore`] needs to reproduce the machine exactly:
/// PC, registers, flags, run state, the four inter-stage latches, and the
/// statistics counters. The decoder and hazard unit are wiring, not
/// state, and are not captured.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CpuState {
    /// Fetch stage (program counter).
    pub fetch: Fetch,
    /// Register file contents.
    pub regs: RegisterFile,
    /// Condition flags.
    pub flags: Flags,
    /// Run-state machine position.
    pub state: MachineState,
    /// IF/ID latch.
    pub if_id: FetchOutput,
    /// ID/EX latch.
    pub id_ex: DecodeOutput,
    /// EX/MEM latch.
    pub ex_mem: ExecuteOutput,
    /// MEM/WB latch.
    pub mem_wb: MemoryOutput,
    /// Statistics counters.
    pub stats: SimStats,
}

/// The schematic-level CPU model.
#[derive(Debug)]
pub struct Cpu {
    fetch: Fetch,
    regs: RegisterFile,
    flags: Flags,
    state: MachineState,
    if_id: FetchOutput,
    id_ex: DecodeOutput,
    ex_mem: ExecuteOutput,
    mem_wb: MemoryOutput,
    decoder: Box<dyn Decoder>,
    hazard: Box<dyn HazardControl>,
    stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with the generated control ROM and the boolean-logic
    /// hazard unit, reset armed.
    pub fn new() -> Self {
        Self::with_units(
            Box::new(DecoderGenerator::new().generate()),
            Box::new(HazardControlLogic::new()),
        )
    }

    /// Creates a CPU over explicit decoder and hazard-control units.
    ///
    /// The ROM and programmable-logic decoders are interchangeable here,
    /// as are the boolean and GAL hazard units.
    pub fn with_units(decoder: Box<dyn Decoder>, hazard: Box<dyn HazardControl>) -> Self {
        let mut cpu = Self {
            fetch: Fetch::new(),
            regs: RegisterFile::new(),
            flags: Flags::default(),
            state: MachineState::Resetting(PIPELINE_DEPTH),
            if_id: FetchOutput::default(),
            id_ex: DecodeOutput::default(),
            ex_mem: ExecuteOutput::default(),
            mem_wb: MemoryOutput::default(),
            decoder,
            hazard,
            stats: SimStats::default(),
        };
        cpu.reset();
        cpu
    }

    /// Re-initializes the machine: PC to zero, registers and flags
    /// cleared, latches bubbled, and the reset countdown re-armed for one
    /// full pipeline depth of NOP drain.
    pub fn reset(&mut self) {
        self.fetch.reset();
        self.regs.clear();
        self.flags.clear();
        self.state = MachineState::Resetting(PIPELINE_DEPTH);
        self.if_id = FetchOutput::default();
        self.id_ex = DecodeOutput::default();
        self.ex_mem = ExecuteOutput::default();
        self.mem_wb = MemoryOutput::default();
    }

    /// Current program counter (next fetch address).
    pub const fn pc(&self) -> u16 {
        self.fetch.pc()
    }

    /// Current condition flags.
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Current run state.
    pub const fn state(&self) -> MachineState {
        self.state
    }

    /// Whether the machine has halted.
    pub const fn is_halted(&self) -> bool {
        matches!(self.state, MachineState::Halted)
    }

    /// Reads a general-purpose register.
    pub const fn register(&self, idx: u8) -> u16 {
        self.regs.read(idx)
    }

    /// Presets a general-purpose register.
    pub fn set_register(&mut self, idx: u8, val: u16) {
        self.regs.write(idx, val);
    }

    /// Statistics collected so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Advances the machine one clock edge.
    ///
    /// A halted machine does not advance; the call reports
    /// [`StepOutcome::Halted`] instead.
    pub fn step(&mut self, bus: &mut dyn SystemBus) -> StepOutcome {
        if self.is_halted() {
            return StepOutcome::Halted;
        }
        self.stats.cycles += 1;

        // Oldest first: the writeback result of the instruction leaving
        // the pipeline, committed inside decode below.
        let wb_out = writeback_stage(&self.mem_wb);
        if self.mem_wb.ctl != ControlWord::NOP {
            self.stats.instructions_retired += 1;
        }

        let mem_out = memory_stage(&self.ex_mem, bus);
        let ex_out = execute_stage(&self.id_ex);

        let run = self.state.run_bit();
        let ctl_id = decode::lookup(&*self.decoder, run, self.flags, self.if_id.ins);

        let hz = self.hazard.step(&HazardInput {
            sel_a: fields::port_a(self.if_id.ins),
            sel_b: fields::port_b(self.if_id.ins),
            left_unused: ctl_id.left_operand_unused,
            right_unused: ctl_id.right_operand_unused,
            consumes_flags: Opcode::of(self.if_id.ins)
                .is_some_and(Opcode::is_conditional_branch),
            ex_sel_c: self.id_ex.sel_c,
            ex_wben: self.id_ex.ctl.writes_back(),
            ex_wb_store_op: self.id_ex.ctl.write_back_selects_store_op(),
            ex_fi: self.id_ex.ctl.updates_flags(),
            ex_j: self.id_ex.ctl.jumps(),
            mem_sel_c: self.ex_mem.sel_c,
            mem_wben: self.ex_mem.ctl.writes_back(),
        });
        if hz.stall {
            self.stats.stalls += 1;
            debug!(pc = self.if_id.pc, ins = self.if_id.ins, "pipeline stall");
        }
        if hz.flush {
            self.stats.flushes += 1;
            debug!(pc = self.if_id.pc, ins = self.if_id.ins, "jump flush");
        }

        // The memory stage forwards whatever it will write back; the
        // execute stage can only forward its ALU result, the delayed
        // store-operand path stalls instead.
        let mem_value = if self.ex_mem.ctl.write_back_selects_store_op() {
            mem_out.store_op
        } else {
            mem_out.y
        };
        let pick = |fwd: OperandForward| match fwd {
            OperandForward::RegisterFile => None,
            OperandForward::FromEx => Some(ex_out.y),
            OperandForward::FromMem => Some(mem_value),
        };

        let id_out = decode_stage(
            &DecodeInput {
                ins: self.if_id.ins,
                pc: self.if_id.pc,
                ctl: ctl_id,
                flush: hz.flush,
                stall: hz.stall,
                forward_a: pick(hz.forward_a),
                forward_b: pick(hz.forward_b),
                writeback: wb_out,
            },
            &mut self.regs,
        );

        let resetting = matches!(self.state, MachineState::Resetting(_));
        let if_out = self.fetch.step(
            &FetchInput {
                stall_pc: hz.stall || resetting,
                stall_if: hz.stall || resetting,
                jump_shadow: self.id_ex.ctl.jumps(),
                j: self.ex_mem.ctl.jumps(),
                jabs: self.ex_mem.ctl.jumps_absolute(),
                offset: self.ex_mem.jump_offset,
                target: self.ex_mem.y,
            },
            bus,
        );

        // Edge: latch the new stage outputs and the flag register.
        if self.id_ex.ctl.updates_flags() {
            self.flags = Flags {
                carry: ex_out.carry,
                zero: ex_out.zero,
                overflow: ex_out.overflow,
            };
        }
        let halting = ex_out.ctl.halts();

        self.mem_wb = mem_out;
        self.ex_mem = ex_out;
        self.id_ex = id_out;
        if !hz.stall {
            self.if_id = if_out;
        }

        trace!(
            pc = self.fetch.pc(),
            ins = self.if_id.ins,
            stall = hz.stall,
            flush = hz.flush,
            "cycle"
        );

        self.state = match self.state {
            MachineState::Resetting(n) if n > 1 => MachineState::Resetting(n - 1),
            MachineState::Resetting(_) => MachineState::Running,
            MachineState::Running if halting => {
                debug!(pc = self.fetch.pc(), "halted");
                MachineState::Halted
            }
            other => other,
        };

        StepOutcome::Stepped
    }

    /// Steps until the machine halts or the caller's budget runs out.
    ///
    /// The bound is the embedder's safety limit; the core imposes none of
    /// its own.
    pub fn run(&mut self, bus: &mut dyn SystemBus, max_steps: u64) -> RunOutcome {
        for _ in 0..max_steps {
            if self.step(bus) == StepOutcome::Halted || self.is_halted() {
                return RunOutcome::Halted;
            }
        }
        RunOutcome::StepLimit
    }

    /// One-line view of the pipeline occupancy, youngest first.
    pub fn pipeline_diagram(&self) -> String {
        let id = if self.if_id.ins == 0 {
            "nop".to_string()
        } else {
            disasm::disassemble(self.if_id.ins)
        };
        let ex = if self.id_ex.ins == 0 {
            "nop".to_string()
        } else {
            disasm::disassemble(self.id_ex.ins)
        };
        format!(
            "IF pc={:#06x} | ID [{id}] | EX [{ex}] | MEM pc={:#06x} | WB pc={:#06x}",
            self.fetch.pc(),
            self.ex_mem.pc,
            self.mem_wb.pc,
        )
    }

    /// Captures the full serializable machine state.
    pub fn capture(&self) -> CpuState {
        CpuState {
            fetch: self.fetch,
            regs: self.regs.clone(),
            flags: self.flags,
            state: self.state,
            if_id: self.if_id,
            id_ex: self.id_ex,
            ex_mem: self.ex_mem,
            mem_wb: self.mem_wb,
            stats: self.stats,
        }
    }

    /// Restores a previously captured machine state.
    pub fn restore(&mut self, state: &CpuState) {
        self.fetch = state.fetch;
        self.regs = state.regs.clone();
        self.flags = state.flags;
        self.state = state.state;
        self.if_id = state.if_id;
        self.id_ex = state.id_ex;
        self.ex_mem = state.ex_mem;
        self.mem_wb = state.mem_wb;
        self.stats = state.stats;
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
