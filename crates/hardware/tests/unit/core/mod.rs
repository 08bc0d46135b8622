//! Core datapath and pipeline tests.

/// Register file byte-granular writes.
pub mod gpr;
/// Boolean-logic hazard control.
pub mod hazards;
