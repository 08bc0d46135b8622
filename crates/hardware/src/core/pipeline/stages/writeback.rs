//! Writeback (WB) stage.
//!
//! Selects the final writeback value between the ALU result and the store
//! operand, and folds the control word's active-low byte strobes into the
//! asserted-high enables the register file's write port consumes. The
//! write itself commits at the top of the next decode cycle.

use crate::core::pipeline::latches::{MemoryOutput, WritebackOutput};

/// Executes the WB stage on the previous cycle's memory output.
pub fn writeback_stage(input: &MemoryOutput) -> WritebackOutput {
    let c = if input.ctl.write_back_selects_store_op() {
        input.store_op
    } else {
        input.y
    };

    WritebackOutput {
        c,
        sel_c: input.sel_c,
        wrl: input.ctl.writes_low_byte(),
        wrh: input.ctl.writes_high_byte(),
        wben: input.ctl.writes_back(),
    }
}
