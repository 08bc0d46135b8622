//! Boolean-logic hazard control tests.
//!
//! Covers each rule in isolation: EX and MEM forwarding per port, the
//! execute-over-memory priority, the store-operand-path stall, the flags
//! hazard, the jump flush, and the unused-operand suppressions.

use turtle16_core::core::pipeline::hazards::{
    HazardControl, HazardControlLogic, HazardInput, OperandForward,
};

/// A quiet pipeline: nothing in flight writes anything.
fn idle() -> HazardInput {
    HazardInput {
        sel_a: 1,
        sel_b: 2,
        ..HazardInput::default()
    }
}

fn step(input: &HazardInput) -> turtle16_core::core::pipeline::hazards::HazardOutput {
    HazardControlLogic::new().step(input)
}

#[test]
fn no_producers_reads_register_file() {
    let out = step(&idle());
    assert_eq!(out.forward_a, OperandForward::RegisterFile);
    assert_eq!(out.forward_b, OperandForward::RegisterFile);
    assert!(!out.stall);
    assert!(!out.flush);
}

#[test]
fn ex_alu_producer_forwards_to_port_a() {
    let input = HazardInput {
        ex_sel_c: 1,
        ex_wben: true,
        ..idle()
    };
    let out = step(&input);
    assert_eq!(out.forward_a, OperandForward::FromEx);
    assert_eq!(out.forward_b, OperandForward::RegisterFile);
    assert!(!out.stall);
}

#[test]
fn ex_store_op_producer_stalls_instead_of_forwarding() {
    let input = HazardInput {
        ex_sel_c: 1,
        ex_wben: true,
        ex_wb_store_op: true,
        ..idle()
    };
    let out = step(&input);
    assert_eq!(out.forward_a, OperandForward::RegisterFile);
    assert!(out.stall, "delayed-path value is not ready at EX");
}

#[test]
fn mem_producer_forwards_to_port_b() {
    let input = HazardInput {
        mem_sel_c: 2,
        mem_wben: true,
        ..idle()
    };
    let out = step(&input);
    assert_eq!(out.forward_b, OperandForward::FromMem);
    assert!(!out.stall);
}

#[test]
fn ex_wins_over_mem_for_the_same_port() {
    let input = HazardInput {
        ex_sel_c: 1,
        ex_wben: true,
        mem_sel_c: 1,
        mem_wben: true,
        ..idle()
    };
    let out = step(&input);
    assert_eq!(
        out.forward_a,
        OperandForward::FromEx,
        "the newer value wins and the MEM line stays deasserted"
    );
}

#[test]
fn ports_forward_independently() {
    let input = HazardInput {
        ex_sel_c: 1,
        ex_wben: true,
        mem_sel_c: 2,
        mem_wben: true,
        ..idle()
    };
    let out = step(&input);
    assert_eq!(out.forward_a, OperandForward::FromEx);
    assert_eq!(out.forward_b, OperandForward::FromMem);
}

#[test]
fn unused_ports_never_forward_or_stall() {
    let input = HazardInput {
        left_unused: true,
        right_unused: true,
        ex_sel_c: 1,
        ex_wben: true,
        ex_wb_store_op: true,
        mem_sel_c: 2,
        mem_wben: true,
        ..idle()
    };
    let out = step(&input);
    assert_eq!(out.forward_a, OperandForward::RegisterFile);
    assert_eq!(out.forward_b, OperandForward::RegisterFile);
    assert!(!out.stall);
}

#[test]
fn producer_without_write_enable_is_ignored() {
    let input = HazardInput {
        ex_sel_c: 1,
        ex_wben: false,
        ex_wb_store_op: true,
        ..idle()
    };
    let out = step(&input);
    assert_eq!(out.forward_a, OperandForward::RegisterFile);
    assert!(!out.stall);
}

#[test]
fn branch_behind_flag_writer_stalls() {
    let input = HazardInput {
        consumes_flags: true,
        ex_fi: true,
        ..idle()
    };
    assert!(step(&input).stall);
}

#[test]
fn branch_with_settled_flags_does_not_stall() {
    let input = HazardInput {
        consumes_flags: true,
        ex_fi: false,
        ..idle()
    };
    assert!(!step(&input).stall);
}

#[test]
fn jump_in_ex_flushes_decode() {
    let input = HazardInput {
        ex_j: true,
        ..idle()
    };
    assert!(step(&input).flush);
}

#[test]
fn flush_overrides_every_stall_condition() {
    // A linking jump in EX looks like a delayed-path producer, but the
    // decode slot it would stall is the one being flushed.
    let input = HazardInput {
        consumes_flags: true,
        ex_sel_c: 1,
        ex_wben: true,
        ex_wb_store_op: true,
        ex_fi: true,
        ex_j: true,
        ..idle()
    };
    let out = step(&input);
    assert!(out.flush);
    assert!(!out.stall, "a flushed slot is never held");
}
