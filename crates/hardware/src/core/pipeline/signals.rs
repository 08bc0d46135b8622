//! The decoded control word.
//!
//! One control word steers one instruction through the execute, memory,
//! and writeback stages. Internally it is a struct of named fields holding
//! the *wire-level* bit values (several signals are active-low, as on the
//! board); [`ControlWord::pack`] and [`ControlWord::unpack`] convert to and
//! from the 23-bit integer stored in the decoder ROM.
//!
//! The all-ones pattern is the NOP word: every active-low strobe inactive,
//! both operand-unused bits set, both ALU operand gates open. It is what
//! the decoder emits for `reset = 0` addresses, for not-taken branches,
//! and what the pipeline injects for stall bubbles and jump flushes.

use serde::{Deserialize, Serialize};

/// Store-operand mux select: register port B value.
pub const STORE_OP_REGISTER_B: u8 = 0;
/// Store-operand mux select: the instruction's program counter.
pub const STORE_OP_PC: u8 = 1;
/// Store-operand mux select: sign-extended 8-bit immediate.
pub const STORE_OP_IMM8: u8 = 2;
/// Store-operand mux select: 8-bit immediate shifted into the high byte.
pub const STORE_OP_IMM8_SHIFTED: u8 = 3;

/// Right-operand mux select: register port B value.
pub const RIGHT_OP_REGISTER_B: u8 = 0;
/// Right-operand mux select: sign-extended 4-bit immediate.
pub const RIGHT_OP_IMM4: u8 = 1;
/// Right-operand mux select: sign-extended 8-bit immediate.
pub const RIGHT_OP_IMM8: u8 = 2;
/// Right-operand mux select: sign-extended 10-bit immediate.
pub const RIGHT_OP_IMM10: u8 = 3;

/// Names of the 23 control signals, in wire-bit order (bit 0 first).
pub const SIGNAL_NAMES: [&str; 23] = [
    "HLT",
    "SelStoreOpA",
    "SelStoreOpB",
    "SelRightOpA",
    "SelRightOpB",
    "FI",
    "C0",
    "I0",
    "I1",
    "I2",
    "RS0",
    "RS1",
    "J",
    "JABS",
    "MemLoad",
    "MemStore",
    "AssertStoreOp",
    "WriteBackSrcFlag",
    "WRL",
    "WRH",
    "WBEN",
    "LeftOperandIsUnused",
    "RightOperandIsUnused",
];

/// Number of bits in the packed control word.
pub const CONTROL_WORD_BITS: u32 = 23;

/// The decoded control word for one instruction.
///
/// Fields hold wire-level values: for the active-low strobes (`hlt`, `fi`,
/// `j`, `jabs`, `mem_load`, `mem_store`, `assert_store_op`, `wrl`, `wrh`,
/// `wben`) a `true` bit means *inactive*. Prefer the semantic accessors
/// when asking what an instruction does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlWord {
    /// Halt strobe (active low).
    pub hlt: bool,
    /// Store-operand mux select, 2 bits.
    pub sel_store_op: u8,
    /// Right-operand mux select, 2 bits.
    pub sel_right_op: u8,
    /// Flag-register load strobe (active low).
    pub fi: bool,
    /// ALU carry-in.
    pub c0: bool,
    /// ALU function code `I2..I0`, 3 bits.
    pub alu_func: u8,
    /// ALU operand gates `RS1..RS0`, 2 bits; a clear bit zeroes an operand.
    pub alu_rs: u8,
    /// Jump strobe (active low); redirects the fetch stage.
    pub j: bool,
    /// Absolute-jump strobe (active low); target comes from the ALU result.
    pub jabs: bool,
    /// Memory-load strobe (active low).
    pub mem_load: bool,
    /// Memory-store strobe (active low).
    pub mem_store: bool,
    /// Store-operand bus-assert strobe (active low).
    pub assert_store_op: bool,
    /// Writeback source: high selects the store operand, low the ALU result.
    pub write_back_src: bool,
    /// Register low-byte write strobe (active low).
    pub wrl: bool,
    /// Register high-byte write strobe (active low).
    pub wrh: bool,
    /// Register write enable (active low).
    pub wben: bool,
    /// High when the instruction does not read register port A.
    pub left_operand_unused: bool,
    /// High when the instruction does not read register port B.
    pub right_operand_unused: bool,
}

impl ControlWord {
    /// The NOP control word: the all-ones wire pattern.
    pub const NOP: Self = Self {
        hlt: true,
        sel_store_op: 0b11,
        sel_right_op: 0b11,
        fi: true,
        c0: true,
        alu_func: 0b111,
        alu_rs: 0b11,
        j: true,
        jabs: true,
        mem_load: true,
        mem_store: true,
        assert_store_op: true,
        write_back_src: true,
        wrl: true,
        wrh: true,
        wben: true,
        left_operand_unused: true,
        right_operand_unused: true,
    };

    /// Packs the control word into its 23-bit wire representation.
    pub const fn pack(&self) -> u32 {
        (self.hlt as u32)
            | ((self.sel_store_op & 0b11) as u32) << 1
            | ((self.sel_right_op & 0b11) as u32) << 3
            | (self.fi as u32) << 5
            | (self.c0 as u32) << 6
            | ((self.alu_func & 0b111) as u32) << 7
            | ((self.alu_rs & 0b11) as u32) << 10
            | (self.j as u32) << 12
            | (self.jabs as u32) << 13
            | (self.mem_load as u32) << 14
            | (self.mem_store as u32) << 15
            | (self.assert_store_op as u32) << 16
            | (self.write_back_src as u32) << 17
            | (self.wrl as u32) << 18
            | (self.wrh as u32) << 19
            | (self.wben as u32) << 20
            | (self.left_operand_unused as u32) << 21
            | (self.right_operand_unused as u32) << 22
    }

    /// Unpacks a 23-bit wire representation; bits above 22 are ignored.
    pub const fn unpack(word: u32) -> Self {
        Self {
            hlt: word & 1 != 0,
            sel_store_op: (word >> 1 & 0b11) as u8,
            sel_right_op: (word >> 3 & 0b11) as u8,
            fi: word >> 5 & 1 != 0,
            c0: word >> 6 & 1 != 0,
            alu_func: (word >> 7 & 0b111) as u8,
            alu_rs: (word >> 10 & 0b11) as u8,
            j: word >> 12 & 1 != 0,
            jabs: word >> 13 & 1 != 0,
            mem_load: word >> 14 & 1 != 0,
            mem_store: word >> 15 & 1 != 0,
            assert_store_op: word >> 16 & 1 != 0,
            write_back_src: word >> 17 & 1 != 0,
            wrl: word >> 18 & 1 != 0,
            wrh: word >> 19 & 1 != 0,
            wben: word >> 20 & 1 != 0,
            left_operand_unused: word >> 21 & 1 != 0,
            right_operand_unused: word >> 22 & 1 != 0,
        }
    }

    /// Value of the named signal bit, by wire-bit index (see
    /// [`SIGNAL_NAMES`]).
    pub const fn bit(&self, index: u32) -> bool {
        self.pack() >> index & 1 != 0
    }

    /// Whether the instruction halts the processor.
    pub const fn halts(&self) -> bool {
        !self.hlt
    }

    /// Whether the flag register latches this instruction's ALU flags.
    pub const fn updates_flags(&self) -> bool {
        !self.fi
    }

    /// Whether the instruction redirects the fetch stage.
    pub const fn jumps(&self) -> bool {
        !self.j
    }

    /// Whether a taken jump is absolute (target from the ALU result).
    pub const fn jumps_absolute(&self) -> bool {
        !self.jabs
    }

    /// Whether the memory stage performs a load.
    pub const fn loads_memory(&self) -> bool {
        !self.mem_load
    }

    /// Whether the memory stage performs a store.
    pub const fn stores_memory(&self) -> bool {
        !self.mem_store
    }

    /// Whether the store operand drives the memory data bus.
    pub const fn asserts_store_op(&self) -> bool {
        !self.assert_store_op
    }

    /// Whether the instruction writes a register.
    pub const fn writes_back(&self) -> bool {
        !self.wben
    }

    /// Whether the writeback value rides the delayed store-operand path
    /// (not available for forwarding until the memory stage).
    pub const fn write_back_selects_store_op(&self) -> bool {
        self.write_back_src
    }

    /// Whether the low register byte is written.
    pub const fn writes_low_byte(&self) -> bool {
        !self.wrl
    }

    /// Whether the high register byte is written.
    pub const fn writes_high_byte(&self) -> bool {
        !self.wrh
    }

    /// Whether register port A feeds this instruction.
    pub const fn uses_left_operand(&self) -> bool {
        !self.left_operand_unused
    }

    /// Whether register port B feeds this instruction.
    pub const fn uses_right_operand(&self) -> bool {
        !self.right_operand_unused
    }
}

impl Default for ControlWord {
    /// The default control word is the NOP pattern, so default-constructed
    /// pipeline latches behave as bubbles.
    fn default() -> Self {
        Self::NOP
    }
}
