//! The instruction pipeline.
//!
//! 1. **Signals:** The 23-bit control word and its named fields.
//! 2. **Latches:** The per-stage output records the CPU model holds as
//!    inter-stage registers.
//! 3. **Stages:** The five stage transformations.
//! 4. **Hazards:** Forwarding, stall, and flush control.

/// Hazard detection and forwarding control.
pub mod hazards;
/// Inter-stage latch records.
pub mod latches;
/// Control word and signal definitions.
pub mod signals;
/// Stage transformations.
pub mod stages;

pub use hazards::{HazardControl, HazardControlLogic, HazardInput, HazardOutput, OperandForward};
pub use signals::ControlWord;
