//! Disassembly of instruction words.
//!
//! One word in, one mnemonic line out. Offsets and immediates are printed
//! signed, matching assembler input syntax.

use super::{Opcode, fields};

/// Renders an instruction word as its assembler mnemonic.
///
/// Unassigned opcodes render as `NOP` with the raw word appended, since
/// the hardware executes them as no-ops.
///
/// # Examples
///
/// ```
/// use turtle16_core::isa::disasm::disassemble;
///
/// assert_eq!(disassemble(0x3944), "ADD r1, r2, r1");
/// assert_eq!(disassemble(0x0000), "NOP");
/// ```
pub fn disassemble(word: u16) -> String {
    let Some(op) = Opcode::of(word) else {
        return format!("NOP ; unassigned {word:#06x}");
    };

    let rd = fields::rd(word);
    let ra = fields::ra(word);
    let rb = fields::rb(word);
    let imm4 = fields::imm4(word) as i16;
    let imm8 = fields::imm8(word) as i16;

    match op {
        Opcode::Nop | Opcode::Hlt => op.mnemonic().to_string(),
        Opcode::Load => format!("LOAD r{rd}, r{ra}, {imm4}"),
        Opcode::Store => format!("STORE r{rd}, r{ra}, {imm4}"),
        Opcode::Li | Opcode::Lui => format!("{} r{rd}, {imm8}", op.mnemonic()),
        Opcode::Cmp => format!("CMP r{ra}, r{rb}"),
        Opcode::Add
        | Opcode::Sub
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Adc
        | Opcode::Sbc => format!("{} r{rd}, r{ra}, r{rb}", op.mnemonic()),
        Opcode::Not => format!("NOT r{rd}, r{ra}"),
        Opcode::Cmpi => format!("CMPI r{ra}, {imm4}"),
        Opcode::Addi | Opcode::Subi | Opcode::Andi | Opcode::Ori | Opcode::Xori => {
            format!("{} r{rd}, r{ra}, {imm4}", op.mnemonic())
        }
        Opcode::Jmp => format!("JMP {}", fields::imm11(word) as i16),
        Opcode::Jr => format!("JR r{ra}, {imm4}"),
        Opcode::Jalr => format!("JALR r{rd}, r{ra}, {imm4}"),
        Opcode::Beq | Opcode::Bne | Opcode::Blt | Opcode::Bge | Opcode::Bltu | Opcode::Bgeu => {
            format!("{} {}", op.mnemonic(), fields::imm10(word) as i16)
        }
    }
}
