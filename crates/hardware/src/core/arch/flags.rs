//! Condition flags.
//!
//! Three flags are latched from the execute stage's arithmetic result once
//! per cycle when the control word asserts `FI`, and consumed by the
//! instruction decoder when resolving conditional branches.
//!
//! Flag conventions (fixed by the branch predicates the decoder encodes):
//! - `carry` latches the *borrow* sense of the adder: after `CMP ra, rb`
//!   it is set exactly when `ra < rb` unsigned, so `BLTU` branches on
//!   `carry = 1`. `ADC`/`SBC` re-derive the true carry-in from it.
//! - `overflow` latches sign XOR two's-complement overflow, i.e. the
//!   signed less-than indicator: after `CMP` it is set exactly when
//!   `ra < rb` signed, so `BLT` branches on `overflow = 1`.
//! - `zero` is set when the 16-bit result is zero.

use serde::{Deserialize, Serialize};

/// The processor condition flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flags {
    /// Borrow-sense carry flag; `BLTU`/`BGEU` test it.
    pub carry: bool,
    /// Zero flag; `BEQ`/`BNE` test it.
    pub zero: bool,
    /// Signed less-than flag; `BLT`/`BGE` test it.
    pub overflow: bool,
}

impl Flags {
    /// Clears all flags.
    pub fn clear(&mut self) {
        *self = Self {
            carry: false,
            zero: false,
            overflow: false,
        };
    }
}
