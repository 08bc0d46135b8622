//! Machine run-state lifecycle.

use serde::{Deserialize, Serialize};

/// The run state of the CPU model.
///
/// The lifecycle is `Resetting -> Running -> Halted`. While resetting, the
/// decoder address is formed with the run bit low, which forces NOP control
/// words through every stage until the pipeline is drained of stale state.
/// The transition to `Halted` happens the cycle the execute stage sees an
/// asserted `HLT` signal; from then on, stepping is a reported no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineState {
    /// Reset drain in progress; the payload counts remaining drain cycles.
    Resetting(u32),
    /// Normal execution.
    Running,
    /// An `HLT` instruction reached the execute stage.
    Halted,
}

impl MachineState {
    /// Whether the run bit presented to the decoder is high.
    pub const fn run_bit(self) -> bool {
        matches!(self, Self::Running | Self::Halted)
    }
}
