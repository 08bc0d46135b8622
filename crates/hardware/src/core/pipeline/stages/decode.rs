//! Instruction Decode (ID) stage.
//!
//! Splits the fetched word into its fields, looks the control word up in
//! the decoder (ROM or programmable logic, interchangeably), and reads the
//! register file. Hazard control has already decided, before this stage
//! runs, whether either operand must be overridden with a value forwarded
//! from the execute or memory stage, or whether the slot stalls or is
//! flushed; those decisions arrive as inputs.
//!
//! The register file's write port is also exercised here: the previous
//! cycle's writeback result commits at the top of the stage, before the
//! read ports are sampled, matching a synchronous register file where the
//! write lands on the edge ahead of the dependent read.

use crate::core::arch::{Flags, RegisterFile};
use crate::core::pipeline::latches::{DecodeOutput, WritebackOutput};
use crate::core::pipeline::signals::ControlWord;
use crate::decoder::{Decoder, address};
use crate::isa::fields;

/// Inputs to the decode stage for one cycle.
#[derive(Clone, Copy, Debug)]
pub struct DecodeInput {
    /// Instruction word under decode.
    pub ins: u16,
    /// Its fetch address.
    pub pc: u16,
    /// Control word already looked up for `{run, flags, opcode}`.
    pub ctl: ControlWord,
    /// Replace this slot with a bubble (jump flush).
    pub flush: bool,
    /// Hold this slot (hazard stall); the output is a bubble and the
    /// instruction is re-presented next cycle.
    pub stall: bool,
    /// Forwarded override for register port A.
    pub forward_a: Option<u16>,
    /// Forwarded override for register port B.
    pub forward_b: Option<u16>,
    /// Previous cycle's writeback result, committed before the reads.
    pub writeback: WritebackOutput,
}

/// Looks up the control word for an instruction.
///
/// The decoder address is `{run, carry, zero, overflow, opcode}`; with the
/// run bit low every address maps to the NOP word, which is how the reset
/// drain holds the pipeline quiet.
pub fn lookup(decoder: &dyn Decoder, run: bool, flags: Flags, ins: u16) -> ControlWord {
    decoder.decode(address(run, flags, ins))
}

/// Executes the decode stage.
///
/// The writeback commit happens unconditionally; stall and flush only
/// suppress the decoded output, never an older instruction's register
/// write.
pub fn decode_stage(input: &DecodeInput, regs: &mut RegisterFile) -> DecodeOutput {
    regs.write_back(&input.writeback);

    if input.flush || input.stall {
        return DecodeOutput::default();
    }

    let a = input
        .forward_a
        .unwrap_or_else(|| regs.read(fields::port_a(input.ins)));
    let b = input
        .forward_b
        .unwrap_or_else(|| regs.read(fields::port_b(input.ins)));

    DecodeOutput {
        ctl: input.ctl,
        ins: input.ins,
        pc: input.pc,
        a,
        b,
        sel_c: fields::rd(input.ins),
        jump_offset: fields::jump_offset(input.ins),
    }
}
