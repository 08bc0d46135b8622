//! Turtle16 instruction set.
//!
//! This module defines the instruction surface of the processor:
//! 1. **Opcodes:** A closed enumeration of the 5-bit opcode space, so the
//!    control-word generator can match exhaustively.
//! 2. **Fields:** Extraction of register indices and sign-extended
//!    immediates from the 16-bit instruction word.
//! 3. **Disassembly:** Rendering an instruction word back to its mnemonic.

/// Disassembly of instruction words to mnemonics.
pub mod disasm;
/// Instruction-word field extraction (registers, immediates, port indices).
pub mod fields;

use serde::{Deserialize, Serialize};

use crate::common::constants::{OPCODE_MASK, OPCODE_SHIFT};

/// The closed set of Turtle16 opcodes.
///
/// Values match the 5-bit opcode field of the instruction word. The two
/// encodings left unassigned by the hardware (`0b11110` and `0b11111`)
/// decode as NOP and are deliberately absent from the enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    /// No operation.
    Nop = 0,
    /// Halt the processor.
    Hlt = 1,
    /// Load a word from memory: `rd <- mem[ra + imm4]`.
    Load = 2,
    /// Store a word to memory: `mem[ra + imm4] <- rb`.
    Store = 3,
    /// Load an 8-bit sign-extended immediate into both register bytes.
    Li = 4,
    /// Load an 8-bit immediate into the upper register byte only.
    Lui = 5,
    /// Compare `ra` with `rb`, updating flags without a register write.
    Cmp = 6,
    /// Add: `rd <- ra + rb`.
    Add = 7,
    /// Subtract: `rd <- ra - rb`.
    Sub = 8,
    /// Bitwise AND: `rd <- ra & rb`.
    And = 9,
    /// Bitwise OR: `rd <- ra | rb`.
    Or = 10,
    /// Bitwise XOR: `rd <- ra ^ rb`.
    Xor = 11,
    /// Bitwise complement: `rd <- !ra`.
    Not = 12,
    /// Compare `ra` with a 4-bit immediate.
    Cmpi = 13,
    /// Add immediate: `rd <- ra + imm4`.
    Addi = 14,
    /// Subtract immediate: `rd <- ra - imm4`.
    Subi = 15,
    /// AND immediate: `rd <- ra & imm4`.
    Andi = 16,
    /// OR immediate: `rd <- ra | imm4`.
    Ori = 17,
    /// XOR immediate: `rd <- ra ^ imm4`.
    Xori = 18,
    /// Add with carry: `rd <- ra + rb + carry`.
    Adc = 19,
    /// Subtract with borrow: `rd <- ra - rb - borrow`.
    Sbc = 20,
    /// Unconditional relative jump with an 11-bit offset.
    Jmp = 21,
    /// Unconditional absolute jump to `ra + imm4`.
    Jr = 22,
    /// Absolute jump to `ra + imm4`, linking the return address in `rd`.
    Jalr = 23,
    /// Branch if equal (zero flag set).
    Beq = 24,
    /// Branch if not equal (zero flag clear).
    Bne = 25,
    /// Branch if less than, signed (overflow flag set).
    Blt = 26,
    /// Branch if greater or equal, signed (overflow flag clear).
    Bge = 27,
    /// Branch if less than, unsigned (carry flag set).
    Bltu = 28,
    /// Branch if greater or equal, unsigned (carry flag clear).
    Bgeu = 29,
}

impl Opcode {
    /// All assigned opcodes, in encoding order.
    pub const ALL: [Self; 30] = [
        Self::Nop,
        Self::Hlt,
        Self::Load,
        Self::Store,
        Self::Li,
        Self::Lui,
        Self::Cmp,
        Self::Add,
        Self::Sub,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Not,
        Self::Cmpi,
        Self::Addi,
        Self::Subi,
        Self::Andi,
        Self::Ori,
        Self::Xori,
        Self::Adc,
        Self::Sbc,
        Self::Jmp,
        Self::Jr,
        Self::Jalr,
        Self::Beq,
        Self::Bne,
        Self::Blt,
        Self::Bge,
        Self::Bltu,
        Self::Bgeu,
    ];

    /// Decodes a 5-bit opcode value.
    ///
    /// # Returns
    ///
    /// `None` for the two unassigned encodings (30 and 31), which the
    /// control unit treats as NOP.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits < 30 {
            Some(Self::ALL[bits as usize])
        } else {
            None
        }
    }

    /// Extracts the opcode from a full 16-bit instruction word.
    pub const fn of(word: u16) -> Option<Self> {
        Self::from_bits(((word >> OPCODE_SHIFT) & OPCODE_MASK) as u8)
    }

    /// Returns the 5-bit encoding of this opcode.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Whether this opcode is a flag-consuming conditional branch.
    pub const fn is_conditional_branch(self) -> bool {
        matches!(
            self,
            Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Bltu | Self::Bgeu
        )
    }

    /// The assembler mnemonic for this opcode.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Hlt => "HLT",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::Li => "LI",
            Self::Lui => "LUI",
            Self::Cmp => "CMP",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
            Self::Cmpi => "CMPI",
            Self::Addi => "ADDI",
            Self::Subi => "SUBI",
            Self::Andi => "ANDI",
            Self::Ori => "ORI",
            Self::Xori => "XORI",
            Self::Adc => "ADC",
            Self::Sbc => "SBC",
            Self::Jmp => "JMP",
            Self::Jr => "JR",
            Self::Jalr => "JALR",
            Self::Beq => "BEQ",
            Self::Bne => "BNE",
            Self::Blt => "BLT",
            Self::Bge => "BGE",
            Self::Bltu => "BLTU",
            Self::Bgeu => "BGEU",
        }
    }
}
