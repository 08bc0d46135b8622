//! Hazard-control equivalence: fuse-programmed versus boolean logic.
//!
//! The GAL's array inputs are the four comparator match bits plus eight
//! control strobes. The exhaustive sweep drives every reachable match
//! combination (matches on the same producer index are correlated, so
//! two index scenarios cover the space) under all 256 strobe settings;
//! the property test hammers the comparator layer with arbitrary
//! register indices on top.

use proptest::prelude::*;
use turtle16_core::core::pipeline::hazards::{HazardControl, HazardControlLogic, HazardInput};
use turtle16_core::gal::HazardControlGal;

fn inputs_for(scenario: usize, sel_a: u8, sel_b: u8, bits: u8) -> HazardInput {
    let (ex_sel_c, mem_sel_c) = if scenario == 0 { (1, 2) } else { (1, 1) };
    HazardInput {
        sel_a,
        sel_b,
        left_unused: bits & 0x01 != 0,
        right_unused: bits & 0x02 != 0,
        consumes_flags: bits & 0x04 != 0,
        ex_sel_c,
        ex_wben: bits & 0x08 != 0,
        ex_wb_store_op: bits & 0x10 != 0,
        ex_fi: bits & 0x20 != 0,
        ex_j: bits & 0x40 != 0,
        mem_sel_c,
        mem_wben: bits & 0x80 != 0,
    }
}

#[test]
fn gal_matches_logic_exhaustively() {
    let mut logic = HazardControlLogic::new();
    let mut gal = HazardControlGal::new();

    for scenario in 0..2 {
        for sel_a in [0u8, 1, 2] {
            for sel_b in [0u8, 1, 2] {
                for bits in 0..=255u8 {
                    let input = inputs_for(scenario, sel_a, sel_b, bits);
                    assert_eq!(
                        gal.step(&input),
                        logic.step(&input),
                        "diverged on {input:?}"
                    );
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn gal_matches_logic_on_arbitrary_indices(
        sel_a in 0u8..8,
        sel_b in 0u8..8,
        ex_sel_c in 0u8..8,
        mem_sel_c in 0u8..8,
        bits: u8,
    ) {
        let input = HazardInput {
            sel_a,
            sel_b,
            left_unused: bits & 0x01 != 0,
            right_unused: bits & 0x02 != 0,
            consumes_flags: bits & 0x04 != 0,
            ex_sel_c,
            ex_wben: bits & 0x08 != 0,
            ex_wb_store_op: bits & 0x10 != 0,
            ex_fi: bits & 0x20 != 0,
            ex_j: bits & 0x40 != 0,
            mem_sel_c,
            mem_wben: bits & 0x80 != 0,
        };
        prop_assert_eq!(
            HazardControlGal::new().step(&input),
            HazardControlLogic::new().step(&input)
        );
    }
}
