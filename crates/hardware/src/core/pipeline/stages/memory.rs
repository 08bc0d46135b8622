//! Memory (MEM) stage.
//!
//! Performs the single memory access an instruction is allowed: a load
//! replaces the store operand with the word read at the ALU-computed
//! address, a store drives the store operand onto the data bus. Both are
//! gated by the control word; everything else passes through.

use crate::core::bus::SystemBus;
use crate::core::pipeline::latches::{ExecuteOutput, MemoryOutput};

/// Executes the MEM stage on the previous cycle's execute output.
pub fn memory_stage(input: &ExecuteOutput, bus: &mut dyn SystemBus) -> MemoryOutput {
    let mut store_op = input.store_op;

    if input.ctl.loads_memory() {
        store_op = bus.load(input.y);
    }
    if input.ctl.stores_memory() && input.ctl.asserts_store_op() {
        bus.store(input.store_op, input.y);
    }

    MemoryOutput {
        ctl: input.ctl,
        y: input.y,
        store_op,
        sel_c: input.sel_c,
        pc: input.pc,
    }
}
