//! Decoder generation and cross-implementation equivalence.

/// Equivalence of the programmable-logic decoder with the ROM.
pub mod equivalence;
