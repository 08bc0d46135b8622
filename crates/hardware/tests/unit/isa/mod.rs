//! Instruction field extraction and disassembly tests.

use crate::common::asm;
use turtle16_core::isa::{Opcode, disasm::disassemble, fields};

#[test]
fn opcode_round_trips_through_its_encoding() {
    for op in Opcode::ALL {
        assert_eq!(Opcode::from_bits(op.bits()), Some(op));
    }
    assert_eq!(Opcode::from_bits(30), None);
    assert_eq!(Opcode::from_bits(31), None);
}

#[test]
fn register_fields_unpack() {
    let ins = asm::add(3, 5, 7);
    assert_eq!(Opcode::of(ins), Some(Opcode::Add));
    assert_eq!(fields::rd(ins), 3);
    assert_eq!(fields::ra(ins), 5);
    assert_eq!(fields::rb(ins), 7);
}

#[test]
fn immediates_sign_extend_per_width() {
    assert_eq!(fields::imm4(asm::addi(0, 0, -1)), 0xFFFF);
    assert_eq!(fields::imm4(asm::addi(0, 0, 7)), 7);
    assert_eq!(fields::imm8(asm::li(0, -128)), 0xFF80);
    assert_eq!(fields::imm8(asm::li(0, 127)), 127);
    assert_eq!(fields::imm10(asm::beq(-1)), 0xFFFF);
    assert_eq!(fields::imm10(asm::beq(511)), 511);
    assert_eq!(fields::imm11(asm::jmp(-1024)), 0xFC00);
    assert_eq!(fields::imm11(asm::jmp(1023)), 1023);
}

#[test]
fn store_steers_port_b_to_the_rd_slot() {
    let store = asm::store(6, 1, 0);
    assert_eq!(fields::port_b(store), 6);
    assert_eq!(fields::port_a(store), 1);

    let add = asm::add(6, 1, 2);
    assert_eq!(fields::port_b(add), 2);
}

#[test]
fn jump_offsets_resolve_per_opcode_class() {
    assert_eq!(fields::jump_offset(asm::jmp(5)), 5);
    assert_eq!(fields::jump_offset(asm::bne(-3)), 0xFFFD);
    assert_eq!(fields::jump_offset(asm::add(1, 2, 3)), 0);
}

#[test]
fn disassembly_renders_mnemonics() {
    assert_eq!(disassemble(asm::nop()), "NOP");
    assert_eq!(disassemble(asm::hlt()), "HLT");
    assert_eq!(disassemble(asm::add(1, 2, 3)), "ADD r1, r2, r3");
    assert_eq!(disassemble(asm::addi(1, 2, -3)), "ADDI r1, r2, -3");
    assert_eq!(disassemble(asm::li(4, -1)), "LI r4, -1");
    assert_eq!(disassemble(asm::lui(4, 16)), "LUI r4, 16");
    assert_eq!(disassemble(asm::load(2, 3, 1)), "LOAD r2, r3, 1");
    assert_eq!(disassemble(asm::store(2, 3, -2)), "STORE r2, r3, -2");
    assert_eq!(disassemble(asm::cmp(1, 2)), "CMP r1, r2");
    assert_eq!(disassemble(asm::jmp(-6)), "JMP -6");
    assert_eq!(disassemble(asm::jr(3, 0)), "JR r3, 0");
    assert_eq!(disassemble(asm::jalr(7, 3, 0)), "JALR r7, r3, 0");
    assert_eq!(disassemble(asm::beq(4)), "BEQ 4");
    assert_eq!(disassemble(0b11110_00000000000), "NOP ; unassigned 0xf000");
}
