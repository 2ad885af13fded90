//! Error flagging: illegal opcodes, LOCK misuse, operand constraints, and
//! length overflow.

use super::pad;
use crate::{Immediate, InstructionFlags, decode};

#[test]
fn test_invalid_primary_opcode() {
    // 0x82 is not a 64-bit encoding.
    let insn = decode(&pad([0x82, 0x00]));
    assert_eq!(insn.length, 1);
    assert!(insn.flags.contains(
        InstructionFlags::ERROR | InstructionFlags::ERROR_OPCODE
    ));
}

#[test]
fn test_invalid_secondary_opcode() {
    let insn = decode(&pad([0x0F, 0x04]));
    assert_eq!(insn.length, 2);
    assert_eq!(insn.opcode2, 0x04);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPCODE));

    let insn = decode(&pad([0x0F, 0xFF]));
    assert_eq!(insn.length, 2);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPCODE));
}

#[test]
fn test_lock_without_modrm() {
    // LOCK NOP (F0 90)
    let insn = decode(&pad([0xF0, 0x90]));
    assert_eq!(insn.length, 2);
    assert_eq!(insn.opcode, 0x90);
    assert_eq!(
        insn.flags,
        InstructionFlags::ERROR
            | InstructionFlags::ERROR_LOCK
            | InstructionFlags::PREFIX_LOCK
    );
}

#[test]
fn test_lock_register_operand() {
    // LOCK ADD EBX, EAX (F0 01 C3): lockable opcode, register form.
    let insn = decode(&pad([0xF0, 0x01, 0xC3]));
    assert_eq!(insn.length, 3);
    assert!(insn.flags.contains(InstructionFlags::ERROR_LOCK));
}

#[test]
fn test_lock_non_lockable_opcode() {
    // LOCK MOV EAX, [RBX] (F0 8B 03): memory operand, wrong opcode.
    let insn = decode(&pad([0xF0, 0x8B, 0x03]));
    assert_eq!(insn.length, 3);
    assert!(insn.flags.contains(InstructionFlags::ERROR_LOCK));
}

#[test]
fn test_lock_legal_forms() {
    // LOCK ADD [RBX], EAX (F0 01 03)
    let insn = decode(&pad([0xF0, 0x01, 0x03]));
    assert!(insn.is_ok());

    // LOCK CMPXCHG [RBX], ECX (F0 0F B1 0B)
    let insn = decode(&pad([0xF0, 0x0F, 0xB1, 0x0B]));
    assert_eq!(insn.length, 4);
    assert!(insn.is_ok());

    // LOCK INC BYTE PTR [RAX] (F0 FE 00)
    let insn = decode(&pad([0xF0, 0xFE, 0x00]));
    assert!(insn.is_ok());
}

#[test]
fn test_lock_two_byte_non_lockable() {
    // LOCK MOVDQA-ish (F0 0F 6F 03)
    let insn = decode(&pad([0xF0, 0x0F, 0x6F, 0x03]));
    assert!(insn.flags.contains(InstructionFlags::ERROR_LOCK));
}

#[test]
fn test_mov_sreg_invalid_reg() {
    // MOV r/m16, Sreg with reg = 6 (8C F0)
    let insn = decode(&pad([0x8C, 0xF0]));
    assert_eq!(insn.length, 2);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));

    // MOV Sreg, r/m16 with reg = 1, i.e. CS as destination (8E C8)
    let insn = decode(&pad([0x8E, 0xC8]));
    assert_eq!(insn.length, 2);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));

    // reg = 2 (SS) is fine both ways.
    assert!(decode(&pad([0x8C, 0xD0])).is_ok());
    assert!(decode(&pad([0x8E, 0xD0])).is_ok());
}

#[test]
fn test_mov_control_register_constraints() {
    // MOV RAX, CR0 (0F 20 C0)
    let insn = decode(&pad([0x0F, 0x20, 0xC0]));
    assert_eq!(insn.length, 3);
    assert!(insn.is_ok());

    // CR1 does not exist (0F 20 C8).
    let insn = decode(&pad([0x0F, 0x20, 0xC8]));
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));

    // Memory form is not a thing for control-register moves (0F 20 00).
    let insn = decode(&pad([0x0F, 0x20, 0x00]));
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));

    // CR5 and up are out of range (0F 22 E8).
    let insn = decode(&pad([0x0F, 0x22, 0xE8]));
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));
}

#[test]
fn test_mov_debug_register_constraints() {
    // MOV RAX, DR7 (0F 21 F8)
    let insn = decode(&pad([0x0F, 0x21, 0xF8]));
    assert!(insn.is_ok());

    // DR4/DR5 are reserved (0F 21 E0, 0F 23 E8).
    let insn = decode(&pad([0x0F, 0x21, 0xE0]));
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));
    let insn = decode(&pad([0x0F, 0x23, 0xE8]));
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));
}

#[test]
fn test_memory_only_with_register_operand() {
    // MOV r/m8, imm8 register form is in the memory-only set (C6 C0 01).
    let insn = decode(&pad([0xC6, 0xC0, 0x01]));
    assert_eq!(insn.length, 3);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));

    // CMPXCHG8B needs memory (0F C7 C8).
    let insn = decode(&pad([0x0F, 0xC7, 0xC8]));
    assert_eq!(insn.length, 3);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));

    // LSS with a register source (0F B2 C0).
    let insn = decode(&pad([0x0F, 0xB2, 0xC0]));
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));

    // The memory forms are clean.
    assert!(decode(&pad([0xC6, 0x00, 0x01])).is_ok());
    assert!(decode(&pad([0x0F, 0xC7, 0x08])).is_ok());
}

#[test]
fn test_group_reserved_encodings() {
    // POP r/m (8F) only defines reg = 0; 8F C8 selects reg = 1.
    let insn = decode(&pad([0x8F, 0xC8]));
    assert_eq!(insn.length, 2);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPCODE));

    // Group 5 reg = 7 is reserved (FF F8).
    let insn = decode(&pad([0xFF, 0xF8]));
    assert_eq!(insn.length, 2);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPCODE));

    // Group 2 reg = 6 is reserved; the imm8 is still consumed so the
    // length stays accurate (C0 F0 05).
    let insn = decode(&pad([0xC0, 0xF0, 0x05]));
    assert_eq!(insn.length, 3);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPCODE));

    // Group 12 reg = 0 is reserved (0F 71 C0 05), same story.
    let insn = decode(&pad([0x0F, 0x71, 0xC0, 0x05]));
    assert_eq!(insn.length, 4);
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPCODE));
}

#[test]
fn test_prefix_flood_overflows() {
    // 15 operand-size prefixes followed by an opcode: the opcode byte
    // falls outside the 15-byte window.
    let mut window = [0x66u8; 16];
    window[15] = 0xFF;
    let insn = decode(&window);
    assert_eq!(insn.length, 15);
    assert!(insn.flags.contains(
        InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH
    ));
}

#[test]
fn test_immediate_overflows() {
    // Six prefixes + REX.W + B8 leave only 7 bytes for an 8-byte
    // immediate.
    let window = pad([
        0x2E, 0x36, 0x3E, 0x26, 0x65, 0x64, 0x48, 0xB8, 0x01, 0x02, 0x03,
        0x04, 0x05, 0x06, 0x07, 0x08,
    ]);
    let insn = decode(&window);
    assert_eq!(insn.length, 8);
    assert!(insn.flags.contains(InstructionFlags::ERROR_LENGTH));
    assert_eq!(insn.immediate, Immediate::None);
}

#[test]
fn test_exactly_fifteen_bytes_is_legal() {
    // Five segment prefixes + REX.W + MOV RAX, imm64 = 15 bytes.
    let window = pad([
        0x2E, 0x36, 0x3E, 0x26, 0x65, 0x48, 0xB8, 0x88, 0x77, 0x66, 0x55,
        0x44, 0x33, 0x22, 0x11,
    ]);
    let insn = decode(&window);
    assert_eq!(insn.length, 15);
    assert!(insn.is_ok());
    assert_eq!(insn.immediate, Immediate::Imm64(0x1122_3344_5566_7788));
}

#[test]
fn test_truncated_buffer() {
    // A one-byte slice cannot hold the ModR/M byte MOV needs.
    let insn = decode(&[0x8B]);
    assert_eq!(insn.length, 1);
    assert!(insn.flags.contains(InstructionFlags::ERROR_LENGTH));

    let insn = decode(&[]);
    assert_eq!(insn.length, 0);
    assert!(insn.flags.contains(InstructionFlags::ERROR_LENGTH));
}

#[test]
fn test_errors_accumulate() {
    // LOCK MOV Sreg: bad reg field and illegal LOCK at once
    // (F0 8E F0: mod = 3, reg = 6).
    let insn = decode(&pad([0xF0, 0x8E, 0xF0]));
    assert!(insn.flags.contains(InstructionFlags::ERROR_OPERAND));
    assert!(insn.flags.contains(InstructionFlags::ERROR_LOCK));
    assert!(insn.flags.contains(InstructionFlags::ERROR));
}
