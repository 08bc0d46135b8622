//! Programmable-logic realization of the instruction decoder.
//!
//! Three ATF22V10 devices reproduce the generated ROM's address-to-word
//! function from hand-derived sum-of-products equations, one control
//! signal per OLMC. Every output is active low, and every product term
//! carries the run-bit literal, so any address with the run bit low
//! drives all 23 signals high: exactly the NOP word, with no dedicated
//! reset terms needed.
//!
//! The nine address inputs arrive identically on all three chips:
//!
//! | pin | signal | pin | signal |
//! |-----|--------|-----|--------|
//! | 2   | run    | 7   | op3    |
//! | 3   | carry  | 8   | op2    |
//! | 4   | zero   | 9   | op1    |
//! | 5   | ovf    | 10  | op0    |
//! | 6   | op4    |     |        |
//!
//! Equations are written over opcode cubes: `single` matches one opcode,
//! `pair` an even opcode and its odd neighbor (one don't-care bit), and
//! `when` pins a condition flag, which is how the branch predicates and
//! the carry-chained `ADC`/`SBC` carry-in are expressed.

use crate::common::constants::{ADDR_CARRY_BIT, ADDR_OVF_BIT, ADDR_RUN_BIT, ADDR_ZERO_BIT};
use crate::core::pipeline::signals::ControlWord;
use crate::decoder::Decoder;
use crate::gal::atf22v10::PIN_COUNT;
use crate::gal::{Atf22v10, FuseMapBuilder, Signal};
use crate::isa::Opcode;

/// GAL input pin carrying the run bit.
const RUN_PIN: usize = 2;

/// GAL input pin for a decoder-address bit below the run bit.
const fn pin_for_addr_bit(bit: u32) -> usize {
    10 - bit as usize
}

/// One product term over the decoder address: matches when
/// `address & mask == value`. The run-bit literal is implicit.
#[derive(Clone, Copy, Debug)]
struct Term {
    mask: u16,
    value: u16,
}

/// Term matching exactly one opcode.
const fn single(op: Opcode) -> Term {
    Term {
        mask: 0x1F,
        value: op as u16,
    }
}

/// Term matching an even opcode and its odd neighbor.
const fn pair(op: Opcode) -> Term {
    Term {
        mask: 0x1E,
        value: (op as u16) & 0x1E,
    }
}

/// Adds a condition-flag literal to a term.
const fn when(term: Term, flag_bit: u32, level: bool) -> Term {
    Term {
        mask: term.mask | 1 << flag_bit,
        value: term.value | (level as u16) << flag_bit,
    }
}

/// One control signal's equation: output OLMC and ON-set terms.
#[derive(Debug)]
struct SignalEquation {
    /// Control-word wire bit this OLMC produces.
    bit: u32,
    /// OLMC index on the owning chip.
    olmc: usize,
    /// Product terms asserting the signal (driving the wire bit low).
    terms: &'static [Term],
}

/// Chip U1: control-word bits 0 through 7.
const U1: &[SignalEquation] = &[
    SignalEquation {
        bit: 0, // HLT
        olmc: 0,
        terms: &[single(Opcode::Hlt)],
    },
    SignalEquation {
        bit: 1, // SelStoreOpA
        olmc: 1,
        terms: &[single(Opcode::Store), single(Opcode::Li)],
    },
    SignalEquation {
        bit: 2, // SelStoreOpB
        olmc: 2,
        terms: &[single(Opcode::Store), single(Opcode::Jalr)],
    },
    SignalEquation {
        bit: 3, // SelRightOpA
        olmc: 3,
        terms: &[
            pair(Opcode::Cmp),
            pair(Opcode::Sub),
            pair(Opcode::Or),
            single(Opcode::Adc),
            single(Opcode::Sbc),
        ],
    },
    SignalEquation {
        bit: 4, // SelRightOpB
        olmc: 4,
        terms: &[
            pair(Opcode::Load),
            pair(Opcode::Cmp),
            pair(Opcode::Sub),
            pair(Opcode::Or),
            single(Opcode::Cmpi),
            pair(Opcode::Addi),
            pair(Opcode::Andi),
            pair(Opcode::Xori),
            single(Opcode::Sbc),
            pair(Opcode::Jr),
        ],
    },
    SignalEquation {
        bit: 5, // FI
        olmc: 5,
        terms: &[
            pair(Opcode::Cmp),
            pair(Opcode::Sub),
            pair(Opcode::Or),
            pair(Opcode::Not),
            pair(Opcode::Addi),
            pair(Opcode::Andi),
            pair(Opcode::Xori),
            single(Opcode::Sbc),
        ],
    },
    SignalEquation {
        bit: 6, // C0
        olmc: 6,
        terms: &[
            pair(Opcode::Load),
            single(Opcode::Add),
            single(Opcode::Addi),
            pair(Opcode::Jr),
            when(single(Opcode::Adc), ADDR_CARRY_BIT, true),
            when(single(Opcode::Sbc), ADDR_CARRY_BIT, true),
        ],
    },
    SignalEquation {
        bit: 7, // I0
        olmc: 7,
        terms: &[
            pair(Opcode::Load),
            single(Opcode::Add),
            single(Opcode::Addi),
            single(Opcode::Adc),
            pair(Opcode::Jr),
            single(Opcode::Xor),
            single(Opcode::Xori),
            single(Opcode::And),
            single(Opcode::Andi),
        ],
    },
];

/// Chip U2: control-word bits 8 through 15.
const U2: &[SignalEquation] = &[
    SignalEquation {
        bit: 10, // RS0: no opcode gates the left operand.
        olmc: 0,
        terms: &[],
    },
    SignalEquation {
        bit: 11, // RS1
        olmc: 1,
        terms: &[single(Opcode::Not)],
    },
    SignalEquation {
        bit: 13, // JABS
        olmc: 2,
        terms: &[pair(Opcode::Jr)],
    },
    SignalEquation {
        bit: 12, // J
        olmc: 3,
        terms: &[
            single(Opcode::Jmp),
            pair(Opcode::Jr),
            when(single(Opcode::Beq), ADDR_ZERO_BIT, true),
            when(single(Opcode::Bne), ADDR_ZERO_BIT, false),
            when(single(Opcode::Blt), ADDR_OVF_BIT, true),
            when(single(Opcode::Bge), ADDR_OVF_BIT, false),
            when(single(Opcode::Bltu), ADDR_CARRY_BIT, true),
            when(single(Opcode::Bgeu), ADDR_CARRY_BIT, false),
        ],
    },
    SignalEquation {
        bit: 8, // I1
        olmc: 4,
        terms: &[
            pair(Opcode::Load),
            pair(Opcode::Cmp),
            pair(Opcode::Sub),
            pair(Opcode::Not),
            pair(Opcode::Addi),
            single(Opcode::Andi),
            single(Opcode::Adc),
            single(Opcode::Sbc),
            pair(Opcode::Jr),
        ],
    },
    SignalEquation {
        bit: 9, // I2
        olmc: 5,
        terms: &[
            pair(Opcode::Load),
            pair(Opcode::Cmp),
            single(Opcode::Sub),
            pair(Opcode::Or),
            single(Opcode::Cmpi),
            pair(Opcode::Addi),
            single(Opcode::Ori),
            pair(Opcode::Xori),
            single(Opcode::Sbc),
            pair(Opcode::Jr),
        ],
    },
    SignalEquation {
        bit: 14, // MemLoad
        olmc: 6,
        terms: &[single(Opcode::Load)],
    },
    SignalEquation {
        bit: 15, // MemStore
        olmc: 7,
        terms: &[single(Opcode::Store)],
    },
];

/// Chip U3: control-word bits 16 through 22.
const U3: &[SignalEquation] = &[
    SignalEquation {
        bit: 16, // AssertStoreOp
        olmc: 0,
        terms: &[single(Opcode::Store)],
    },
    SignalEquation {
        bit: 17, // WriteBackSrcFlag
        olmc: 1,
        terms: &[
            single(Opcode::Add),
            pair(Opcode::Sub),
            pair(Opcode::Or),
            single(Opcode::Not),
            pair(Opcode::Addi),
            pair(Opcode::Andi),
            pair(Opcode::Xori),
            single(Opcode::Sbc),
        ],
    },
    SignalEquation {
        bit: 18, // WRL
        olmc: 2,
        terms: &[
            single(Opcode::Load),
            single(Opcode::Li),
            single(Opcode::Add),
            pair(Opcode::Sub),
            pair(Opcode::Or),
            single(Opcode::Not),
            pair(Opcode::Addi),
            pair(Opcode::Andi),
            pair(Opcode::Xori),
            single(Opcode::Sbc),
            single(Opcode::Jalr),
        ],
    },
    SignalEquation {
        bit: 19, // WRH
        olmc: 3,
        terms: &[
            single(Opcode::Load),
            pair(Opcode::Li),
            single(Opcode::Add),
            pair(Opcode::Sub),
            pair(Opcode::Or),
            single(Opcode::Not),
            pair(Opcode::Addi),
            pair(Opcode::Andi),
            pair(Opcode::Xori),
            single(Opcode::Sbc),
            single(Opcode::Jalr),
        ],
    },
    SignalEquation {
        bit: 20, // WBEN
        olmc: 4,
        terms: &[
            single(Opcode::Load),
            pair(Opcode::Li),
            single(Opcode::Add),
            pair(Opcode::Sub),
            pair(Opcode::Or),
            single(Opcode::Not),
            pair(Opcode::Addi),
            pair(Opcode::Andi),
            pair(Opcode::Xori),
            single(Opcode::Sbc),
            single(Opcode::Jalr),
        ],
    },
    SignalEquation {
        bit: 21, // LeftOperandIsUnused
        olmc: 5,
        terms: &[
            pair(Opcode::Load),
            pair(Opcode::Cmp),
            pair(Opcode::Sub),
            pair(Opcode::Or),
            pair(Opcode::Not),
            pair(Opcode::Addi),
            pair(Opcode::Andi),
            pair(Opcode::Xori),
            single(Opcode::Sbc),
            pair(Opcode::Jr),
        ],
    },
    SignalEquation {
        bit: 22, // RightOperandIsUnused
        olmc: 6,
        terms: &[
            single(Opcode::Store),
            pair(Opcode::Cmp),
            pair(Opcode::Sub),
            pair(Opcode::Or),
            single(Opcode::Adc),
            single(Opcode::Sbc),
        ],
    },
];

/// The three-chip programmable-logic decoder.
#[derive(Debug)]
pub struct ProgrammableLogicDecoder {
    u1: Atf22v10,
    u2: Atf22v10,
    u3: Atf22v10,
}

impl ProgrammableLogicDecoder {
    /// Programs the three devices from the signal equations.
    pub fn new() -> Self {
        Self {
            u1: program(U1),
            u2: program(U2),
            u3: program(U3),
        }
    }
}

impl Default for ProgrammableLogicDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ProgrammableLogicDecoder {
    fn decode(&self, address: u16) -> ControlWord {
        let mut pins: [Option<bool>; PIN_COUNT] = [None; PIN_COUNT];
        pins[RUN_PIN - 1] = Some(address >> ADDR_RUN_BIT & 1 != 0);
        for bit in 0..8 {
            pins[pin_for_addr_bit(bit) - 1] = Some(address >> bit & 1 != 0);
        }

        let mut word = 0u32;
        for (chip, equations) in [(&self.u1, U1), (&self.u2, U2), (&self.u3, U3)] {
            let outs = chip.evaluate(&pins);
            for eq in equations {
                if outs[eq.olmc].unwrap_or(true) {
                    word |= 1 << eq.bit;
                }
            }
        }
        ControlWord::unpack(word)
    }
}

/// Programs one chip from its signal equations.
fn program(equations: &[SignalEquation]) -> Atf22v10 {
    let mut builder = FuseMapBuilder::new();
    for eq in equations {
        builder.set_mode(eq.olmc, false, false);
        builder.enable_output(eq.olmc);
        for term in eq.terms {
            let mut literals = vec![(Signal::Pin(RUN_PIN), true)];
            for bit in 0..8 {
                if term.mask >> bit & 1 != 0 {
                    literals.push((Signal::Pin(pin_for_addr_bit(bit)), term.value >> bit & 1 != 0));
                }
            }
            builder.add_term(eq.olmc, &literals);
        }
    }
    builder.build()
}
