//! ATF22V10 device model.
//!
//! A 24-pin, 10-output Generic Array Logic device, emulated at the level
//! of its synchronous, clocked logical behavior. The device is entirely
//! described by its 5,892-fuse map:
//!
//! - Fuses `0..5808` form the programmable AND array: 132 rows of 44
//!   columns (22 signals, true and complement). Row 0 is the asynchronous
//!   reset term and row 131 the synchronous preset term; in between, each
//!   output logic macrocell (OLMC) owns one output-enable row followed by
//!   its product-term rows (8, 10, 12, 14, 16, 16, 14, 12, 10, 8 terms
//!   for OLMC 0 through 9).
//! - Fuses `5808..5828` are the per-OLMC `S0`/`S1` pairs: `S0` selects
//!   output polarity (high = active high), `S1` selects combinational
//!   (high) or registered (low) mode.
//! - Fuses `5828..5892` are the 64-bit user signature, ignored logically.
//!
//! A fuse value of `1` means blown (input disconnected from the AND row),
//! `0` means intact. A fully blown row is therefore the constant-true
//! term and a fully intact row the constant-false term.
//!
//! One [`Atf22v10::step`] call is one rising clock edge. Registered OLMCs
//! latch their sum term at the edge and feed the register back into the
//! array, which is what lets a fuse map alone express sequential circuits
//! such as toggle flip-flops. Combinational feedback is sampled from the
//! previous step. An OLMC whose output-enable term is false tri-states:
//! its output reads `None` and its board pin, if driven externally via
//! the pin array, feeds the array instead.

use crate::common::error::{FuseMapError, JedecError};
use crate::gal::jedec;

/// Number of device pins.
pub const PIN_COUNT: usize = 24;

/// Number of output logic macrocells.
pub const OLMC_COUNT: usize = 10;

/// Number of AND-array columns (22 signals, true and complement).
pub const COLUMN_COUNT: usize = 44;

/// Number of AND-array rows (reset, per-OLMC enable + terms, preset).
pub const ROW_COUNT: usize = 132;

/// Product-term capacity of each OLMC, in OLMC order.
pub const OLMC_TERM_COUNTS: [usize; OLMC_COUNT] = [8, 10, 12, 14, 16, 16, 14, 12, 10, 8];

/// Board pin driven by each OLMC, in OLMC order.
pub const OLMC_PINS: [usize; OLMC_COUNT] = [23, 22, 21, 20, 19, 18, 17, 16, 15, 14];

/// First fuse of the `S0`/`S1` mode pairs.
pub const MODE_FUSE_BASE: usize = ROW_COUNT * COLUMN_COUNT;

/// First fuse of the user signature.
pub const SIGNATURE_BASE: usize = MODE_FUSE_BASE + 2 * OLMC_COUNT;

/// Total fuse count of the device.
pub const FUSE_COUNT: usize = SIGNATURE_BASE + 64;

/// Row index of the asynchronous reset term.
const AR_ROW: usize = 0;

/// Row index of the synchronous preset term.
const SP_ROW: usize = ROW_COUNT - 1;

/// One AND-array input signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SignalSource {
    /// A device pin, numbered 1-24.
    Pin(usize),
    /// An OLMC feedback, by OLMC index.
    Feedback(usize),
}

/// AND-array signal order: column `2*i` is the true sense of signal `i`,
/// column `2*i + 1` its complement. Dedicated inputs interleave with the
/// OLMC feedbacks, mirroring the physical column arrangement.
pub(crate) const COLUMN_SIGNALS: [SignalSource; 22] = [
    SignalSource::Pin(1),
    SignalSource::Feedback(0),
    SignalSource::Pin(2),
    SignalSource::Feedback(1),
    SignalSource::Pin(3),
    SignalSource::Feedback(2),
    SignalSource::Pin(4),
    SignalSource::Feedback(3),
    SignalSource::Pin(5),
    SignalSource::Feedback(4),
    SignalSource::Pin(6),
    SignalSource::Feedback(5),
    SignalSource::Pin(7),
    SignalSource::Feedback(6),
    SignalSource::Pin(8),
    SignalSource::Feedback(7),
    SignalSource::Pin(9),
    SignalSource::Feedback(8),
    SignalSource::Pin(10),
    SignalSource::Feedback(9),
    SignalSource::Pin(11),
    SignalSource::Pin(13),
];

/// Row index of an OLMC's output-enable term.
pub(crate) const fn oe_row(olmc: usize) -> usize {
    let mut row = AR_ROW + 1;
    let mut k = 0;
    while k < olmc {
        row += 1 + OLMC_TERM_COUNTS[k];
        k += 1;
    }
    row
}

/// Row index of an OLMC's first product term.
pub(crate) const fn first_term_row(olmc: usize) -> usize {
    oe_row(olmc) + 1
}

/// An emulated ATF22V10.
///
/// Owns its fuse map exclusively; the map is immutable after
/// construction. The only mutable state is the ten OLMC registers and the
/// previous-step outputs used for combinational feedback.
#[derive(Clone, Debug)]
pub struct Atf22v10 {
    fuses: Vec<bool>,
    registers: [bool; OLMC_COUNT],
    outputs: [Option<bool>; OLMC_COUNT],
}

impl Atf22v10 {
    /// Constructs a device from an explicit fuse array.
    ///
    /// # Errors
    ///
    /// Fails when the array is not exactly [`FUSE_COUNT`] fuses long.
    pub fn from_fuses(fuses: Vec<bool>) -> Result<Self, FuseMapError> {
        if fuses.len() != FUSE_COUNT {
            return Err(FuseMapError::WrongLength {
                got: fuses.len(),
                expected: FUSE_COUNT,
            });
        }
        Ok(Self::from_parts(fuses))
    }

    /// Constructs a device from a JEDEC fuse listing.
    ///
    /// # Errors
    ///
    /// Fails fast on any malformed `*L` record; see
    /// [`JedecError`].
    pub fn from_jedec(listing: &str) -> Result<Self, JedecError> {
        let fuses = jedec::parse(listing, FUSE_COUNT)?;
        Ok(Self::from_fuses(fuses)?)
    }

    /// Internal constructor for fuse arrays of known-correct length.
    pub(crate) fn from_parts(fuses: Vec<bool>) -> Self {
        Self {
            fuses,
            registers: [false; OLMC_COUNT],
            outputs: [None; OLMC_COUNT],
        }
    }

    /// The raw fuse map.
    pub fn fuses(&self) -> &[bool] {
        &self.fuses
    }

    /// Whether an OLMC is in registered mode (`S1` fuse low).
    fn registered(&self, olmc: usize) -> bool {
        !self.fuses[MODE_FUSE_BASE + 2 * olmc + 1]
    }

    /// Whether an OLMC is active-high (`S0` fuse high).
    fn active_high(&self, olmc: usize) -> bool {
        self.fuses[MODE_FUSE_BASE + 2 * olmc]
    }

    /// Applies an OLMC's polarity fuse to a raw value.
    fn polarity(&self, olmc: usize, value: bool) -> bool {
        if self.active_high(olmc) {
            value
        } else {
            !value
        }
    }

    /// Resolves the 22 array signal values for this evaluation.
    ///
    /// Feedback for a registered OLMC is its register; for a
    /// combinational OLMC it is the previous step's output, falling back
    /// to the externally driven pin value when the output is tri-stated.
    fn signal_values(&self, pins: &[Option<bool>; PIN_COUNT]) -> [bool; 22] {
        let mut values = [false; 22];
        for (i, source) in COLUMN_SIGNALS.iter().enumerate() {
            values[i] = match *source {
                SignalSource::Pin(pin) => pins[pin - 1].unwrap_or(false),
                SignalSource::Feedback(olmc) => {
                    if self.registered(olmc) {
                        self.registers[olmc]
                    } else {
                        self.outputs[olmc]
                            .unwrap_or_else(|| pins[OLMC_PINS[olmc] - 1].unwrap_or(false))
                    }
                }
            };
        }
        values
    }

    /// Evaluates one AND-array row against the resolved signal values.
    fn row(&self, row: usize, signals: &[bool; 22]) -> bool {
        let base = row * COLUMN_COUNT;
        for col in 0..COLUMN_COUNT {
            if self.fuses[base + col] {
                // Blown: this input is disconnected from the row.
                continue;
            }
            let value = if col % 2 == 0 {
                signals[col / 2]
            } else {
                !signals[col / 2]
            };
            if !value {
                return false;
            }
        }
        true
    }

    /// OR of an OLMC's product terms.
    fn sum(&self, olmc: usize, signals: &[bool; 22]) -> bool {
        let first = first_term_row(olmc);
        (first..first + OLMC_TERM_COUNTS[olmc]).any(|r| self.row(r, signals))
    }

    /// Combinationally evaluates the device without clocking it.
    ///
    /// Registered OLMCs present their current register contents;
    /// combinational OLMCs present the sum of their product terms for the
    /// given pin values. `None` marks a tri-stated output.
    pub fn evaluate(&self, pins: &[Option<bool>; PIN_COUNT]) -> [Option<bool>; OLMC_COUNT] {
        let signals = self.signal_values(pins);
        let mut outs = [None; OLMC_COUNT];
        for olmc in 0..OLMC_COUNT {
            if !self.row(oe_row(olmc), &signals) {
                continue;
            }
            let raw = if self.registered(olmc) {
                self.registers[olmc]
            } else {
                self.sum(olmc, &signals)
            };
            outs[olmc] = Some(self.polarity(olmc, raw));
        }
        outs
    }

    /// Advances the device by one rising clock edge.
    ///
    /// # Arguments
    ///
    /// * `pins` - The 24 pin values; entries for pins configured as
    ///   driven outputs may be `None` and never override the computed
    ///   value. Pins 12 and 24 are the supply pins and are ignored.
    ///
    /// # Returns
    ///
    /// The ten OLMC outputs after the edge, `None` where tri-stated.
    pub fn step(&mut self, pins: &[Option<bool>; PIN_COUNT]) -> [Option<bool>; OLMC_COUNT] {
        let signals = self.signal_values(pins);

        let mut sums = [false; OLMC_COUNT];
        let mut enabled = [false; OLMC_COUNT];
        for olmc in 0..OLMC_COUNT {
            sums[olmc] = self.sum(olmc, &signals);
            enabled[olmc] = self.row(oe_row(olmc), &signals);
        }
        let preset = self.row(SP_ROW, &signals);
        let reset = self.row(AR_ROW, &signals);

        let mut outs = [None; OLMC_COUNT];
        for olmc in 0..OLMC_COUNT {
            if self.registered(olmc) {
                let mut q = sums[olmc];
                if preset {
                    q = true;
                }
                if reset {
                    q = false;
                }
                self.registers[olmc] = q;
                if enabled[olmc] {
                    outs[olmc] = Some(self.polarity(olmc, q));
                }
            } else if enabled[olmc] {
                outs[olmc] = Some(self.polarity(olmc, sums[olmc]));
            }
        }

        self.outputs = outs;
        outs
    }

    /// Clears the OLMC registers and feedback history.
    pub fn reset(&mut self) {
        self.registers = [false; OLMC_COUNT];
        self.outputs = [None; OLMC_COUNT];
    }
}
