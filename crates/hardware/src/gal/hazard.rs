//! Fuse-programmed hazard control.
//!
//! The same hazard contract as
//! [`HazardControlLogic`](crate::core::pipeline::hazards::HazardControlLogic),
//! realized as a programmed ATF22V10 instead of direct boolean code. As on
//! the board, the three-bit register-index equality comparisons are done
//! by comparators outside the array; the GAL sees only match bits and
//! control strobes. Control inputs keep their board polarity (write
//! enable, flag load, and jump strobes are active low), and all six
//! outputs are active low.
//!
//! Pinout:
//!
//! | pin | signal                        | pin    | signal                  |
//! |-----|-------------------------------|--------|-------------------------|
//! | 1   | A matches EX dest             | 8      | port A unused           |
//! | 2   | A matches MEM dest            | 9      | port B unused           |
//! | 3   | B matches EX dest             | 10     | decode slot is a branch |
//! | 4   | B matches MEM dest            | 11     | /FI from EX             |
//! | 5   | /WBEN from EX                 | 13     | /J from EX              |
//! | 6   | /WBEN from MEM                | 23..18 | outputs (active low)    |
//! | 7   | EX writeback is store-op path |        |                         |

use crate::core::pipeline::hazards::{HazardControl, HazardInput, HazardOutput, resolve};
use crate::gal::atf22v10::{Atf22v10, PIN_COUNT};
use crate::gal::fuses::{FuseMapBuilder, Signal};

const A_EX: Signal = Signal::Pin(1);
const A_MEM: Signal = Signal::Pin(2);
const B_EX: Signal = Signal::Pin(3);
const B_MEM: Signal = Signal::Pin(4);
const WBEN_EX_N: Signal = Signal::Pin(5);
const WBEN_MEM_N: Signal = Signal::Pin(6);
const WBSRC_EX: Signal = Signal::Pin(7);
const UNUSED_A: Signal = Signal::Pin(8);
const UNUSED_B: Signal = Signal::Pin(9);
const BRANCH_ID: Signal = Signal::Pin(10);
const FI_EX_N: Signal = Signal::Pin(11);
const J_EX_N: Signal = Signal::Pin(13);

const OLMC_FWD_A_EX: usize = 0;
const OLMC_FWD_A_MEM: usize = 1;
const OLMC_FWD_B_EX: usize = 2;
const OLMC_FWD_B_MEM: usize = 3;
const OLMC_STALL: usize = 4;
const OLMC_FLUSH: usize = 5;

/// Hazard control realized on an ATF22V10.
#[derive(Clone, Debug)]
pub struct HazardControlGal {
    gal: Atf22v10,
}

impl HazardControlGal {
    /// Programs the device and returns the unit.
    pub fn new() -> Self {
        let mut b = FuseMapBuilder::new();
        for olmc in [
            OLMC_FWD_A_EX,
            OLMC_FWD_A_MEM,
            OLMC_FWD_B_EX,
            OLMC_FWD_B_MEM,
            OLMC_STALL,
            OLMC_FLUSH,
        ] {
            b.set_mode(olmc, false, false);
            b.enable_output(olmc);
        }

        // Forward A from EX: EX writes A's source via the ALU path.
        b.add_term(
            OLMC_FWD_A_EX,
            &[
                (A_EX, true),
                (WBEN_EX_N, false),
                (WBSRC_EX, false),
                (UNUSED_A, false),
            ],
        );
        // Forward A from MEM: MEM writes A's source and EX does not. The
        // EX qualifier keeps this line off while the newer producer is
        // still in flight, which is what gives EX its priority.
        b.add_term(
            OLMC_FWD_A_MEM,
            &[
                (A_MEM, true),
                (WBEN_MEM_N, false),
                (UNUSED_A, false),
                (A_EX, false),
            ],
        );
        b.add_term(
            OLMC_FWD_A_MEM,
            &[
                (A_MEM, true),
                (WBEN_MEM_N, false),
                (UNUSED_A, false),
                (WBEN_EX_N, true),
            ],
        );
        // Forward B, mirrored.
        b.add_term(
            OLMC_FWD_B_EX,
            &[
                (B_EX, true),
                (WBEN_EX_N, false),
                (WBSRC_EX, false),
                (UNUSED_B, false),
            ],
        );
        b.add_term(
            OLMC_FWD_B_MEM,
            &[
                (B_MEM, true),
                (WBEN_MEM_N, false),
                (UNUSED_B, false),
                (B_EX, false),
            ],
        );
        b.add_term(
            OLMC_FWD_B_MEM,
            &[
                (B_MEM, true),
                (WBEN_MEM_N, false),
                (UNUSED_B, false),
                (WBEN_EX_N, true),
            ],
        );
        // Stall: an EX producer on the store-operand path feeds either
        // port, or a branch is decoding while EX is changing the flags.
        // Every term carries the /J qualifier: a flushed slot is dead
        // and must never be held for re-decode.
        b.add_term(
            OLMC_STALL,
            &[
                (A_EX, true),
                (WBEN_EX_N, false),
                (WBSRC_EX, true),
                (UNUSED_A, false),
                (J_EX_N, true),
            ],
        );
        b.add_term(
            OLMC_STALL,
            &[
                (B_EX, true),
                (WBEN_EX_N, false),
                (WBSRC_EX, true),
                (UNUSED_B, false),
                (J_EX_N, true),
            ],
        );
        b.add_term(
            OLMC_STALL,
            &[(BRANCH_ID, true), (FI_EX_N, false), (J_EX_N, true)],
        );
        // Flush: a jump is in EX.
        b.add_term(OLMC_FLUSH, &[(J_EX_N, false)]);

        Self { gal: b.build() }
    }
}

impl Default for HazardControlGal {
    fn default() -> Self {
        Self::new()
    }
}

impl HazardControl for HazardControlGal {
    fn step(&mut self, input: &HazardInput) -> HazardOutput {
        // Board-level index comparators.
        let a_ex = input.sel_a == input.ex_sel_c;
        let a_mem = input.sel_a == input.mem_sel_c;
        let b_ex = input.sel_b == input.ex_sel_c;
        let b_mem = input.sel_b == input.mem_sel_c;

        let mut pins: [Option<bool>; PIN_COUNT] = [None; PIN_COUNT];
        pins[0] = Some(a_ex);
        pins[1] = Some(a_mem);
        pins[2] = Some(b_ex);
        pins[3] = Some(b_mem);
        pins[4] = Some(!input.ex_wben);
        pins[5] = Some(!input.mem_wben);
        pins[6] = Some(input.ex_wb_store_op);
        pins[7] = Some(input.left_unused);
        pins[8] = Some(input.right_unused);
        pins[9] = Some(input.consumes_flags);
        pins[10] = Some(!input.ex_fi);
        pins[12] = Some(!input.ex_j);

        let outs = self.gal.step(&pins);
        let asserted = |olmc: usize| !outs[olmc].unwrap_or(true);

        HazardOutput {
            forward_a: resolve(asserted(OLMC_FWD_A_EX), asserted(OLMC_FWD_A_MEM)),
            forward_b: resolve(asserted(OLMC_FWD_B_EX), asserted(OLMC_FWD_B_MEM)),
            stall: asserted(OLMC_STALL),
            flush: asserted(OLMC_FLUSH),
        }
    }
}
