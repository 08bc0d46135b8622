//! Generic Array Logic emulation.
//!
//! 1. **Device:** A general-purpose ATF22V10 model driven by a fuse map:
//!    programmable AND array, ten output logic macrocells with polarity
//!    and optional registers, tri-state outputs, and feedback.
//! 2. **Fuse maps:** A builder that turns product terms into the flat
//!    fuse array, and a line-oriented JEDEC fuse-listing parser.
//! 3. **Hazard unit:** The fuse-programmed realization of the pipeline
//!    hazard-control contract.

/// ATF22V10 device model.
pub mod atf22v10;
/// Product-term to fuse-array builder.
pub mod fuses;
/// Fuse-programmed hazard control.
pub mod hazard;
/// JEDEC fuse-listing parser.
pub mod jedec;

pub use atf22v10::Atf22v10;
pub use fuses::{FuseMapBuilder, Signal};
pub use hazard::HazardControlGal;
