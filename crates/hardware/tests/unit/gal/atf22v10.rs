//! ATF22V10 behavior tests.
//!
//! Built entirely through the fuse-map builder, the way the configured
//! units are: a two-input AND gate, polarity, multi-term sums, tri-state
//! outputs usable as array inputs, and a registered toggle flip-flop
//! driven purely by fuse configuration.

use turtle16_core::common::error::FuseMapError;
use turtle16_core::gal::atf22v10::{FUSE_COUNT, PIN_COUNT};
use turtle16_core::gal::{Atf22v10, FuseMapBuilder, Signal};

/// Pin array with every entry unconstrained.
fn no_pins() -> [Option<bool>; PIN_COUNT] {
    [None; PIN_COUNT]
}

/// Pin array driving pins 2 and 3.
fn pins_2_3(p2: bool, p3: bool) -> [Option<bool>; PIN_COUNT] {
    let mut pins = no_pins();
    pins[1] = Some(p2);
    pins[2] = Some(p3);
    pins
}

#[test]
fn rejects_wrong_fuse_count() {
    let result = Atf22v10::from_fuses(vec![false; 100]);
    assert_eq!(
        result.err(),
        Some(FuseMapError::WrongLength {
            got: 100,
            expected: FUSE_COUNT,
        })
    );
}

#[test]
fn accepts_exact_fuse_count() {
    assert!(Atf22v10::from_fuses(vec![false; FUSE_COUNT]).is_ok());
}

#[test]
fn unprogrammed_outputs_are_tristated() {
    let mut gal = Atf22v10::from_fuses(vec![false; FUSE_COUNT]).unwrap();
    assert_eq!(gal.step(&no_pins()), [None; 10]);
}

#[test]
fn two_input_and_gate_truth_table() {
    let mut b = FuseMapBuilder::new();
    b.set_mode(0, false, true);
    b.enable_output(0);
    b.add_term(0, &[(Signal::Pin(2), true), (Signal::Pin(3), true)]);
    let mut gal = b.build();

    for (p2, p3) in [(false, false), (false, true), (true, false), (true, true)] {
        let outs = gal.step(&pins_2_3(p2, p3));
        assert_eq!(outs[0], Some(p2 && p3), "AND({p2}, {p3})");
    }
}

#[test]
fn active_low_polarity_inverts_the_sum() {
    let mut b = FuseMapBuilder::new();
    b.set_mode(0, false, false);
    b.enable_output(0);
    b.add_term(0, &[(Signal::Pin(2), true), (Signal::Pin(3), true)]);
    let mut gal = b.build();

    for (p2, p3) in [(false, false), (false, true), (true, false), (true, true)] {
        let outs = gal.step(&pins_2_3(p2, p3));
        assert_eq!(outs[0], Some(!(p2 && p3)), "NAND({p2}, {p3})");
    }
}

#[test]
fn multiple_terms_sum_as_or() {
    let mut b = FuseMapBuilder::new();
    b.set_mode(1, false, true);
    b.enable_output(1);
    b.add_term(1, &[(Signal::Pin(2), true)]);
    b.add_term(1, &[(Signal::Pin(3), true)]);
    let mut gal = b.build();

    for (p2, p3) in [(false, false), (false, true), (true, false), (true, true)] {
        let outs = gal.step(&pins_2_3(p2, p3));
        assert_eq!(outs[1], Some(p2 || p3), "OR({p2}, {p3})");
    }
}

#[test]
fn complemented_literals_read_the_low_sense() {
    let mut b = FuseMapBuilder::new();
    b.set_mode(0, false, true);
    b.enable_output(0);
    b.add_term(0, &[(Signal::Pin(2), false)]);
    let mut gal = b.build();

    assert_eq!(gal.step(&pins_2_3(false, false))[0], Some(true));
    assert_eq!(gal.step(&pins_2_3(true, false))[0], Some(false));
}

#[test]
fn empty_term_is_constant_true() {
    let mut b = FuseMapBuilder::new();
    b.set_mode(9, false, true);
    b.enable_output(9);
    b.add_term(9, &[]);
    let mut gal = b.build();
    assert_eq!(gal.step(&no_pins())[9], Some(true));
}

#[test]
fn tristated_olmc_pin_feeds_the_array_as_an_input() {
    // OLMC 9 is combinational with its driver disabled (tri-stated);
    // its pin 14 drives a term on OLMC 0 through the feedback column.
    let mut b = FuseMapBuilder::new();
    b.set_mode(9, false, true);
    b.set_mode(0, false, true);
    b.enable_output(0);
    b.add_term(0, &[(Signal::Olmc(9), true)]);
    let mut gal = b.build();

    let mut pins = no_pins();
    pins[13] = Some(true);
    assert_eq!(gal.step(&pins)[0], Some(true));

    pins[13] = Some(false);
    assert_eq!(gal.step(&pins)[0], Some(false));

    // Unconstrained external drive reads low.
    pins[13] = None;
    assert_eq!(gal.step(&pins)[0], Some(false));
}

#[test]
fn external_drive_does_not_override_a_driven_output() {
    let mut b = FuseMapBuilder::new();
    b.set_mode(0, false, true);
    b.enable_output(0);
    b.add_term(0, &[(Signal::Pin(2), true)]);
    let mut gal = b.build();

    // Pin 23 belongs to OLMC 0; supplying a value for it must not
    // replace the computed output.
    let mut pins = pins_2_3(true, false);
    pins[22] = Some(false);
    assert_eq!(gal.step(&pins)[0], Some(true));
}

#[test]
fn toggle_flip_flop_from_fuses_alone() {
    // Registered OLMC 3: q' = (q & !t) | (!q & t), toggle input on pin 2.
    let mut b = FuseMapBuilder::new();
    b.set_mode(3, true, true);
    b.enable_output(3);
    b.add_term(3, &[(Signal::Olmc(3), true), (Signal::Pin(2), false)]);
    b.add_term(3, &[(Signal::Olmc(3), false), (Signal::Pin(2), true)]);
    let mut gal = b.build();

    let toggle = pins_2_3(true, false);
    let hold = pins_2_3(false, false);

    // Hold with t low: stays at the reset value.
    assert_eq!(gal.step(&hold)[3], Some(false));
    assert_eq!(gal.step(&hold)[3], Some(false));

    // Inverts on each rising edge with t high.
    assert_eq!(gal.step(&toggle)[3], Some(true));
    assert_eq!(gal.step(&toggle)[3], Some(false));
    assert_eq!(gal.step(&toggle)[3], Some(true));

    // Holds again once t drops.
    assert_eq!(gal.step(&hold)[3], Some(true));
    assert_eq!(gal.step(&hold)[3], Some(true));
}

#[test]
fn evaluate_is_combinational_and_stateless() {
    let mut b = FuseMapBuilder::new();
    b.set_mode(0, false, true);
    b.enable_output(0);
    b.add_term(0, &[(Signal::Pin(2), true)]);
    let gal = b.build();

    assert_eq!(gal.evaluate(&pins_2_3(true, false))[0], Some(true));
    assert_eq!(gal.evaluate(&pins_2_3(false, false))[0], Some(false));
    assert_eq!(gal.evaluate(&pins_2_3(true, false))[0], Some(true));
}
