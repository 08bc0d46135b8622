//! Programmable-logic decoder equivalence.
//!
//! The correctness contract of the sum-of-products decoder: for every one
//! of the 512 addresses, every named control signal must match the
//! generated ROM exactly. A divergence anywhere is a defect, so failures
//! name the address and the signal.

use turtle16_core::common::constants::DECODER_ENTRIES;
use turtle16_core::core::pipeline::signals::{CONTROL_WORD_BITS, SIGNAL_NAMES};
use turtle16_core::decoder::{Decoder, DecoderGenerator, ProgrammableLogicDecoder};

#[test]
fn pld_matches_the_rom_on_every_address_and_signal() {
    let rom = DecoderGenerator::new().generate();
    let pld = ProgrammableLogicDecoder::new();

    for address in 0..DECODER_ENTRIES as u16 {
        let expected = rom.decode(address);
        let got = pld.decode(address);
        for bit in 0..CONTROL_WORD_BITS {
            assert_eq!(
                got.bit(bit),
                expected.bit(bit),
                "signal {} diverges at address {address:#05x}",
                SIGNAL_NAMES[bit as usize]
            );
        }
        assert_eq!(got, expected, "address {address:#05x}");
    }
}

#[test]
fn pld_reset_addresses_are_quiet() {
    let pld = ProgrammableLogicDecoder::new();
    for address in 0..DECODER_ENTRIES as u16 / 2 {
        assert_eq!(
            pld.decode(address),
            turtle16_core::core::pipeline::signals::ControlWord::NOP,
            "address {address:#05x}"
        );
    }
}
