//! Decoder ROM generation.
//!
//! Enumerates the full 9-bit address space and applies one declarative
//! rule per opcode. Most opcodes ignore the condition bits: every flag
//! combination under such an opcode yields the same word. The conditional
//! branches select between the NOP word and the relative-jump word from
//! their predicate over `{carry, zero, overflow}`, and the carry-chained
//! arithmetic pair (`ADC`/`SBC`) folds the carry flag into the ALU
//! carry-in. Addresses with the run bit low always yield the NOP word,
//! which models synchronous reset.

use tracing::debug;

use crate::common::constants::{
    ADDR_CARRY_BIT, ADDR_OVF_BIT, ADDR_RUN_BIT, ADDR_ZERO_BIT, DECODER_ENTRIES, OPCODE_MASK,
};
use crate::core::pipeline::signals::{
    ControlWord, RIGHT_OP_IMM4, RIGHT_OP_REGISTER_B, STORE_OP_IMM8, STORE_OP_IMM8_SHIFTED,
    STORE_OP_PC, STORE_OP_REGISTER_B,
};
use crate::core::units::alu::{FN_ADD, FN_AND, FN_NOT, FN_OR, FN_SUB, FN_XOR};
use crate::decoder::DecoderRom;
use crate::isa::Opcode;

/// Builds the reference control ROM.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecoderGenerator;

impl DecoderGenerator {
    /// Creates the generator.
    pub const fn new() -> Self {
        Self
    }

    /// Generates all 512 control words.
    pub fn generate(&self) -> DecoderRom {
        let words = (0..DECODER_ENTRIES as u16)
            .map(Self::control_word_at)
            .collect();
        debug!(entries = DECODER_ENTRIES, "decoder ROM generated");
        DecoderRom::new(words)
    }

    /// The control word for one decoder address.
    pub fn control_word_at(address: u16) -> ControlWord {
        let run = address >> ADDR_RUN_BIT & 1 != 0;
        if !run {
            return ControlWord::NOP;
        }
        let carry = address >> ADDR_CARRY_BIT & 1 != 0;
        let zero = address >> ADDR_ZERO_BIT & 1 != 0;
        let overflow = address >> ADDR_OVF_BIT & 1 != 0;
        let Some(op) = Opcode::from_bits((address & OPCODE_MASK) as u8) else {
            return ControlWord::NOP;
        };
        Self::rule(op, carry, zero, overflow)
    }

    /// The per-opcode control rule.
    fn rule(op: Opcode, carry: bool, zero: bool, overflow: bool) -> ControlWord {
        let nop = ControlWord::NOP;
        match op {
            Opcode::Nop => nop,

            Opcode::Hlt => ControlWord { hlt: false, ..nop },

            Opcode::Load => ControlWord {
                sel_right_op: RIGHT_OP_IMM4,
                c0: false,
                alu_func: FN_ADD,
                mem_load: false,
                wrl: false,
                wrh: false,
                wben: false,
                left_operand_unused: false,
                ..nop
            },

            Opcode::Store => ControlWord {
                sel_store_op: STORE_OP_REGISTER_B,
                sel_right_op: RIGHT_OP_IMM4,
                c0: false,
                alu_func: FN_ADD,
                mem_store: false,
                assert_store_op: false,
                left_operand_unused: false,
                right_operand_unused: false,
                ..nop
            },

            Opcode::Li => ControlWord {
                sel_store_op: STORE_OP_IMM8,
                wrl: false,
                wrh: false,
                wben: false,
                ..nop
            },

            Opcode::Lui => ControlWord {
                sel_store_op: STORE_OP_IMM8_SHIFTED,
                wrh: false,
                wben: false,
                ..nop
            },

            Opcode::Cmp => ControlWord {
                sel_right_op: RIGHT_OP_REGISTER_B,
                fi: false,
                alu_func: FN_SUB,
                left_operand_unused: false,
                right_operand_unused: false,
                ..nop
            },

            Opcode::Add => Self::alu_reg(FN_ADD, false),
            Opcode::Sub => Self::alu_reg(FN_SUB, true),
            Opcode::And => Self::alu_reg(FN_AND, true),
            Opcode::Or => Self::alu_reg(FN_OR, true),
            Opcode::Xor => Self::alu_reg(FN_XOR, true),

            Opcode::Not => ControlWord {
                fi: false,
                alu_func: FN_NOT,
                alu_rs: 0b01,
                write_back_src: false,
                wrl: false,
                wrh: false,
                wben: false,
                left_operand_unused: false,
                ..nop
            },

            Opcode::Cmpi => ControlWord {
                sel_right_op: RIGHT_OP_IMM4,
                fi: false,
                alu_func: FN_SUB,
                left_operand_unused: false,
                ..nop
            },

            Opcode::Addi => Self::alu_imm(FN_ADD, false),
            Opcode::Subi => Self::alu_imm(FN_SUB, true),
            Opcode::Andi => Self::alu_imm(FN_AND, true),
            Opcode::Ori => Self::alu_imm(FN_OR, true),
            Opcode::Xori => Self::alu_imm(FN_XOR, true),

            // The carry flag holds the borrow sense, so the true carry
            // chain re-enters the adder inverted.
            Opcode::Adc => Self::alu_reg(FN_ADD, !carry),
            Opcode::Sbc => Self::alu_reg(FN_SUB, !carry),

            Opcode::Jmp => ControlWord { j: false, ..nop },

            Opcode::Jr => ControlWord {
                sel_right_op: RIGHT_OP_IMM4,
                c0: false,
                alu_func: FN_ADD,
                j: false,
                jabs: false,
                left_operand_unused: false,
                ..nop
            },

            Opcode::Jalr => ControlWord {
                sel_store_op: STORE_OP_PC,
                sel_right_op: RIGHT_OP_IMM4,
                c0: false,
                alu_func: FN_ADD,
                j: false,
                jabs: false,
                wrl: false,
                wrh: false,
                wben: false,
                left_operand_unused: false,
                ..nop
            },

            Opcode::Beq => Self::branch(zero),
            Opcode::Bne => Self::branch(!zero),
            Opcode::Blt => Self::branch(overflow),
            Opcode::Bge => Self::branch(!overflow),
            Opcode::Bltu => Self::branch(carry),
            Opcode::Bgeu => Self::branch(!carry),
        }
    }

    /// Three-register ALU rule: flags update, ALU-path writeback, both
    /// register ports live.
    const fn alu_reg(func: u8, c0: bool) -> ControlWord {
        ControlWord {
            sel_right_op: RIGHT_OP_REGISTER_B,
            fi: false,
            c0,
            alu_func: func,
            write_back_src: false,
            wrl: false,
            wrh: false,
            wben: false,
            left_operand_unused: false,
            right_operand_unused: false,
            ..ControlWord::NOP
        }
    }

    /// Register-immediate ALU rule: as [`Self::alu_reg`] with the 4-bit
    /// immediate on the right port and port B idle.
    const fn alu_imm(func: u8, c0: bool) -> ControlWord {
        ControlWord {
            sel_right_op: RIGHT_OP_IMM4,
            fi: false,
            c0,
            alu_func: func,
            write_back_src: false,
            wrl: false,
            wrh: false,
            wben: false,
            left_operand_unused: false,
            ..ControlWord::NOP
        }
    }

    /// Conditional-branch rule: the relative-jump word when taken, the
    /// NOP word otherwise.
    const fn branch(taken: bool) -> ControlWord {
        if taken {
            ControlWord {
                j: false,
                ..ControlWord::NOP
            }
        } else {
            ControlWord::NOP
        }
    }
}
