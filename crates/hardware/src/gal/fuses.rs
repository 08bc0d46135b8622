//! Product-term to fuse-array builder.
//!
//! Programming a GAL by hand means deciding, per OLMC, its mode fuses and
//! the set of product terms, then translating each term into a 44-column
//! fuse row. This builder does the translation so the units configured on
//! the device ([`crate::gal::HazardControlGal`], the programmable-logic
//! decoder) can be written as lists of `(signal, level)` literals.
//!
//! A fresh builder has every fuse intact: all terms constant-false and
//! all outputs tri-stated. Each added term starts from the fully blown
//! (constant-true) row and reconnects only the listed literals.

use crate::gal::atf22v10::{
    Atf22v10, COLUMN_COUNT, COLUMN_SIGNALS, FUSE_COUNT, MODE_FUSE_BASE, OLMC_COUNT, OLMC_PINS,
    OLMC_TERM_COUNTS, SignalSource, first_term_row, oe_row,
};

/// An AND-array input, as named on the schematic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// A dedicated input pin (1-11 or 13).
    Pin(usize),
    /// An OLMC feedback, by OLMC index (0-9).
    Olmc(usize),
}

impl Signal {
    /// AND-array signal index of this source.
    fn index(self) -> usize {
        let want = match self {
            Self::Pin(pin) => SignalSource::Pin(pin),
            Self::Olmc(olmc) => SignalSource::Feedback(olmc),
        };
        for (i, source) in COLUMN_SIGNALS.iter().enumerate() {
            if *source == want {
                return i;
            }
        }
        panic!("{self:?} is not an AND-array input");
    }
}

/// Incremental fuse-map builder for one ATF22V10.
#[derive(Clone, Debug)]
pub struct FuseMapBuilder {
    fuses: Vec<bool>,
    used_terms: [usize; OLMC_COUNT],
}

impl FuseMapBuilder {
    /// Creates a builder with every fuse intact.
    pub fn new() -> Self {
        Self {
            fuses: vec![false; FUSE_COUNT],
            used_terms: [0; OLMC_COUNT],
        }
    }

    /// Sets an OLMC's mode fuses.
    ///
    /// # Arguments
    ///
    /// * `olmc`        - OLMC index (0-9; OLMC 0 drives pin 23).
    /// * `registered`  - Latch the sum in the OLMC register per clock.
    /// * `active_high` - Output polarity.
    pub fn set_mode(&mut self, olmc: usize, registered: bool, active_high: bool) {
        self.fuses[MODE_FUSE_BASE + 2 * olmc] = active_high;
        self.fuses[MODE_FUSE_BASE + 2 * olmc + 1] = !registered;
    }

    /// Permanently enables an OLMC's output driver by blowing its entire
    /// output-enable row.
    pub fn enable_output(&mut self, olmc: usize) {
        self.blow_row(oe_row(olmc));
    }

    /// Adds one product term to an OLMC.
    ///
    /// The term is the AND of the listed literals: `(signal, true)`
    /// requires the signal high, `(signal, false)` requires it low. An
    /// empty literal list yields the constant-true term.
    ///
    /// # Panics
    ///
    /// Panics when the OLMC's product-term capacity is exceeded or a
    /// literal names a source that is not an array input; both are
    /// programming errors in the unit being built.
    pub fn add_term(&mut self, olmc: usize, literals: &[(Signal, bool)]) {
        let used = self.used_terms[olmc];
        assert!(
            used < OLMC_TERM_COUNTS[olmc],
            "OLMC {olmc} (pin {}) has only {} product terms",
            OLMC_PINS[olmc],
            OLMC_TERM_COUNTS[olmc],
        );
        let row = first_term_row(olmc) + used;
        self.used_terms[olmc] = used + 1;

        self.blow_row(row);
        for &(signal, level) in literals {
            let column = 2 * signal.index() + usize::from(!level);
            self.fuses[row * COLUMN_COUNT + column] = false;
        }
    }

    /// Finishes the map and constructs the device.
    pub fn build(self) -> Atf22v10 {
        Atf22v10::from_parts(self.fuses)
    }

    /// Blows every fuse in one row.
    fn blow_row(&mut self, row: usize) {
        let base = row * COLUMN_COUNT;
        for fuse in &mut self.fuses[base..base + COLUMN_COUNT] {
            *fuse = true;
        }
    }
}

impl Default for FuseMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
