//! Execute (EX) stage.
//!
//! Pure ALU stage. Selects the right operand and the store operand per the
//! control word's mux fields, evaluates the ALU, and passes the control
//! word through unchanged for the memory and writeback stages. The jump
//! strobes it re-exports are consumed by the fetch stage on the following
//! cycle; the flag outputs are latched into the flag register at the end
//! of the cycle when `FI` is asserted.

use crate::common::constants::IMM8_MASK;
use crate::core::pipeline::latches::{DecodeOutput, ExecuteOutput};
use crate::core::pipeline::signals::{
    RIGHT_OP_IMM4, RIGHT_OP_IMM8, RIGHT_OP_REGISTER_B, STORE_OP_IMM8, STORE_OP_PC,
    STORE_OP_REGISTER_B,
};
use crate::core::units::alu;
use crate::isa::fields;

/// Executes the EX stage on the previous cycle's decode output.
pub fn execute_stage(input: &DecodeOutput) -> ExecuteOutput {
    let ctl = input.ctl;

    let right = match ctl.sel_right_op {
        RIGHT_OP_REGISTER_B => input.b,
        RIGHT_OP_IMM4 => fields::imm4(input.ins),
        RIGHT_OP_IMM8 => fields::imm8(input.ins),
        _ => fields::imm10(input.ins),
    };

    let store_op = match ctl.sel_store_op {
        STORE_OP_REGISTER_B => input.b,
        // A linking jump saves its own fetch address; return sequences
        // account for issue latency in the assembler.
        STORE_OP_PC => input.pc,
        STORE_OP_IMM8 => fields::imm8(input.ins),
        _ => (input.ins & IMM8_MASK) << 8,
    };

    let alu = alu::execute(ctl.alu_func, ctl.alu_rs, ctl.c0, input.a, right);

    ExecuteOutput {
        ctl,
        y: alu.y,
        store_op,
        carry: alu.carry,
        zero: alu.zero,
        overflow: alu.overflow,
        sel_c: input.sel_c,
        jump_offset: input.jump_offset,
        pc: input.pc,
    }
}
