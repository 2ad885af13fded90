// Copyright 2025 The Axvisor Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The instruction-parse state machine.
//!
//! A linear pipeline over the byte cursor:
//! `prefixes -> REX? -> opcode -> 0F opcode2? -> ModR/M? -> SIB? ->
//! displacement? -> immediate? -> done`. Errors never abort the walk;
//! they are ORed into the record's flags while the cursor keeps moving,
//! so the reported length stays believable for linear disassembly.

use axerrno::{AxResult, ax_err};

use crate::MAX_INSTRUCTION_LENGTH;
use crate::flags::InstructionFlags;
use crate::insn::{Displacement, Immediate, Instruction, ModRm, Sib};
use crate::prefix::{LegacyPrefix, Prefixes, RexPrefix};
use crate::tables::{
    FPU_MEM_ATTR, FPU_REG_ATTR, GROUP_ATTR, OPCODE_ATTR, OPCODE2_ATTR, OpcodeAttr,
    group_index,
};
use crate::validate::{lock_allowed, memory_only, operand_valid};

/// Byte cursor over the caller's buffer, capped at the architectural
/// 15-byte instruction limit. Every fetch is bounded by both the cap and
/// the end of the slice.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        MAX_INSTRUCTION_LENGTH
            .min(self.buf.len())
            .saturating_sub(self.pos)
    }

    fn peek(&self) -> Option<u8> {
        (self.remaining() > 0).then(|| self.buf[self.pos])
    }

    fn read_u8(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn take<const LEN: usize>(&mut self) -> Option<[u8; LEN]> {
        if self.remaining() < LEN {
            return None;
        }
        let mut bytes = [0; LEN];
        bytes.copy_from_slice(&self.buf[self.pos..self.pos + LEN]);
        self.pos += LEN;
        Some(bytes)
    }

    fn read_u16(&mut self) -> Option<u16> {
        self.take().map(u16::from_le_bytes)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }
}

/// Decode one instruction from `code`.
///
/// `code` should hold the instruction plus padding up to
/// [`MAX_INSTRUCTION_LENGTH`] bytes; if the slice runs out mid-decode the
/// record is flagged `ERROR_LENGTH` instead of reading out of bounds.
/// The decoder is pure and allocation-free; errors are reported as flag
/// bits on the returned record, never as an aborted decode.
pub fn decode(code: &[u8]) -> Instruction {
    let mut insn = Instruction::default();
    let mut cursor = Cursor::new(code);
    run(&mut cursor, &mut insn);

    // Finalize: total length and a copy of the consumed bytes.
    let length = cursor.pos();
    insn.length = length as u8;
    insn.bytes[..length].copy_from_slice(&code[..length]);
    insn
}

/// C-style entry point: zeroes `insn`, decodes, returns the length.
pub fn decode_into(code: &[u8], insn: &mut Instruction) -> usize {
    *insn = decode(code);
    insn.length as usize
}

/// Length of the instruction at the start of `code`, failing on any
/// decode error.
///
/// Suitable for walking code where only clean instruction boundaries are
/// acceptable, e.g. sizing the faulting instruction on a guest exit.
pub fn instruction_length(code: &[u8]) -> AxResult<usize> {
    let insn = decode(code);
    if insn.is_ok() {
        Ok(insn.length as usize)
    } else {
        ax_err!(InvalidInput, "not a valid x86 instruction")
    }
}

fn run(cursor: &mut Cursor, insn: &mut Instruction) {
    // Step 1: legacy prefixes. Within a category the last byte wins.
    let mut prefixes = Prefixes::empty();
    while let Some(byte) = cursor.peek() {
        let Ok(prefix) = LegacyPrefix::try_from(byte) else {
            break;
        };
        match prefix {
            LegacyPrefix::Lock => {
                insn.prefix_lock = byte;
                prefixes |= Prefixes::LOCK;
            }
            LegacyPrefix::RepNe => {
                insn.prefix_rep = byte;
                prefixes |= Prefixes::REPNZ;
            }
            LegacyPrefix::Rep => {
                insn.prefix_rep = byte;
                prefixes |= Prefixes::REP;
            }
            LegacyPrefix::EsOverride => {
                insn.prefix_seg = byte;
                prefixes |= Prefixes::SEG_ES;
            }
            LegacyPrefix::CsOverride => {
                insn.prefix_seg = byte;
                prefixes |= Prefixes::SEG_CS;
            }
            LegacyPrefix::SsOverride => {
                insn.prefix_seg = byte;
                prefixes |= Prefixes::SEG_SS;
            }
            LegacyPrefix::DsOverride => {
                insn.prefix_seg = byte;
                prefixes |= Prefixes::SEG_DS;
            }
            LegacyPrefix::FsOverride => {
                insn.prefix_seg = byte;
                prefixes |= Prefixes::SEG_FS;
            }
            LegacyPrefix::GsOverride => {
                insn.prefix_seg = byte;
                prefixes |= Prefixes::SEG_GS;
            }
            LegacyPrefix::OperandSizeOverride => {
                insn.prefix_66 = byte;
                prefixes |= Prefixes::OP_SIZE;
            }
            LegacyPrefix::AddressSizeOverride => {
                insn.prefix_67 = byte;
                prefixes |= Prefixes::ADDR_SIZE;
            }
        }
        cursor.read_u8();
    }

    // Mirror the scanned categories into the record flags.
    if prefixes.contains(Prefixes::REPNZ) {
        insn.flags |= InstructionFlags::PREFIX_REPNZ;
    }
    if prefixes.contains(Prefixes::REP) {
        insn.flags |= InstructionFlags::PREFIX_REP;
    }
    if prefixes.contains(Prefixes::OP_SIZE) {
        insn.flags |= InstructionFlags::PREFIX_OP_SIZE;
    }
    if prefixes.contains(Prefixes::ADDR_SIZE) {
        insn.flags |= InstructionFlags::PREFIX_ADDR_SIZE;
    }
    if prefixes.contains(Prefixes::LOCK) {
        insn.flags |= InstructionFlags::PREFIX_LOCK;
    }
    if prefixes.intersects(Prefixes::ANY_SEG) {
        insn.flags |= InstructionFlags::PREFIX_SEG;
    }

    // Step 2: REX (64-bit mode). A REX followed by another REX is
    // invalid; the second byte is recorded as the opcode.
    let mut op64 = false;
    if let Some(byte) = cursor.peek() {
        if let Some(rex) = RexPrefix::from_byte(byte) {
            cursor.read_u8();
            prefixes |= Prefixes::REX;
            insn.flags |= InstructionFlags::PREFIX_REX;
            insn.rex = byte;
            insn.rex_w = rex.w;
            insn.rex_r = rex.r;
            insn.rex_x = rex.x;
            insn.rex_b = rex.b;

            // REX.W + B8..BF is MOV r64, imm64: 8-byte immediate.
            if rex.w && matches!(cursor.peek(), Some(0xB8..=0xBF)) {
                op64 = true;
            }

            if let Some(next) = cursor.peek() {
                if RexPrefix::from_byte(next).is_some() {
                    insn.flags |=
                        InstructionFlags::ERROR | InstructionFlags::ERROR_OPCODE;
                    insn.opcode = next;
                    cursor.read_u8();
                    return;
                }
            }
        }
    }

    // Step 3: opcode, with the 0F escape for two-byte opcodes.
    let Some(opcode) = cursor.read_u8() else {
        insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
        return;
    };
    insn.opcode = opcode;

    if opcode == 0x0F {
        let Some(opcode2) = cursor.read_u8() else {
            insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
            return;
        };
        insn.opcode2 = opcode2;
    } else if (0xA0..=0xA3).contains(&opcode) {
        // MOV moffs forms: the offset width follows address size, so the
        // effective 0x66 bit tracks 0x67 for the immediate phase.
        op64 = true;
        if prefixes.contains(Prefixes::ADDR_SIZE) {
            prefixes |= Prefixes::OP_SIZE;
        } else {
            prefixes.remove(Prefixes::OP_SIZE);
        }
    }

    // Step 4: opcode attributes. The escape byte itself selects the
    // secondary table, so 0F 00 resolves through it as well.
    let mut attr = if opcode == 0x0F {
        OPCODE2_ATTR[insn.opcode2 as usize]
    } else {
        OPCODE_ATTR[opcode as usize]
    };

    if attr == OpcodeAttr::INVALID {
        insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_OPCODE;
        if (opcode & !0x03) == 0xCC {
            // INT3/INT/INTO/IRET still decode structurally.
            attr = OpcodeAttr::empty();
        } else {
            trace!("invalid opcode {:#04x} {:#04x}", opcode, insn.opcode2);
            return;
        }
    }

    // Step 5: ModR/M, SIB, displacement.
    if attr.contains(OpcodeAttr::MODRM) {
        let Some(byte) = cursor.read_u8() else {
            insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
            return;
        };
        insn.flags |= InstructionFlags::MODRM;
        insn.modrm = byte;
        let modrm = ModRm::from_byte(byte);
        insn.modrm_mod = modrm.mode;
        insn.modrm_reg = modrm.reg | ((insn.rex_r as u8) << 3);
        insn.modrm_rm = modrm.rm | ((insn.rex_b as u8) << 3);

        // Group opcodes: ModR/M.reg refines the attribute. The refined
        // entry replaces the attribute downstream; the pre-group entry
        // still picks the immediate width, since a row shared between
        // 8-bit and operand-sized opcodes (Group 1, Group 3) cannot.
        if attr.contains(OpcodeAttr::GROUP) {
            if let Some(row) = group_index(opcode, insn.opcode2) {
                let entries = &GROUP_ATTR[row];
                let refined = entries[modrm.reg as usize];
                if refined == OpcodeAttr::INVALID {
                    trace!(
                        "invalid group encoding {:#04x} {:#04x} /{}",
                        opcode, insn.opcode2, modrm.reg
                    );
                    insn.flags |=
                        InstructionFlags::ERROR | InstructionFlags::ERROR_OPCODE;
                } else {
                    // A row that marks immediates per sub-opcode (Group 3:
                    // only TEST takes one) gates them; a uniform row
                    // (Group 1, Group 2) applies the opcode entry's
                    // immediate to every sub-opcode.
                    let row_gates_imm = entries.iter().any(|entry| {
                        *entry != OpcodeAttr::INVALID
                            && entry.intersects(OpcodeAttr::IMM_BITS)
                    });
                    attr = if row_gates_imm
                        && !refined.intersects(OpcodeAttr::IMM_BITS)
                    {
                        refined
                    } else {
                        refined | (attr & OpcodeAttr::IMM_BITS)
                    };
                }
            }
        }

        if !operand_valid(opcode, insn.opcode2, insn.modrm_reg, modrm.mode) {
            insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_OPERAND;
        }

        if prefixes.contains(Prefixes::LOCK)
            && !lock_allowed(opcode, insn.opcode2, modrm.mode)
        {
            insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LOCK;
        }

        if modrm.mode == 3 && memory_only(opcode, insn.opcode2) {
            insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_OPERAND;
        }

        // FPU escapes D8-DF: the reg field (mod == 3) or the escape byte
        // alone (mod != 3) selects the entry.
        if (0xD8..=0xDF).contains(&opcode) {
            let escape = (opcode - 0xD8) as usize;
            let fpu_attr = if modrm.mode == 3 {
                FPU_REG_ATTR[escape][modrm.reg as usize]
            } else {
                FPU_MEM_ATTR[escape]
            };
            if fpu_attr == OpcodeAttr::INVALID {
                insn.flags |=
                    InstructionFlags::ERROR | InstructionFlags::ERROR_OPCODE;
            }
        }

        // SIB byte when mod != 3 and r/m = 4.
        let mut disp_size = 0;
        if modrm.mode != 3 && insn.modrm_rm == 4 {
            let Some(sib_byte) = cursor.read_u8() else {
                insn.flags |=
                    InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                return;
            };
            insn.flags |= InstructionFlags::SIB;
            insn.sib = sib_byte;
            let sib = Sib::from_byte(sib_byte);
            insn.sib_scale = sib.scale;
            insn.sib_index = sib.index | ((insn.rex_x as u8) << 3);
            insn.sib_base = sib.base | ((insn.rex_b as u8) << 3);

            // No base register: a 32-bit displacement is mandatory.
            if insn.sib_base == 5 && modrm.mode == 0 {
                disp_size = 4;
            }
        }

        match modrm.mode {
            0 => {
                if insn.modrm_rm == 5 {
                    // [disp32] / RIP-relative in 64-bit mode.
                    disp_size = if prefixes.contains(Prefixes::ADDR_SIZE) {
                        2
                    } else {
                        4
                    };
                }
            }
            1 => disp_size = 1,
            2 => {
                disp_size = if prefixes.contains(Prefixes::ADDR_SIZE) {
                    2
                } else {
                    4
                };
            }
            _ => {}
        }

        match disp_size {
            1 => {
                let Some(value) = cursor.read_u8() else {
                    insn.flags |=
                        InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                    return;
                };
                insn.flags |= InstructionFlags::DISP8;
                insn.displacement = Displacement::Disp8(value);
            }
            2 => {
                let Some(value) = cursor.read_u16() else {
                    insn.flags |=
                        InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                    return;
                };
                insn.flags |= InstructionFlags::DISP16;
                insn.displacement = Displacement::Disp16(value);
            }
            4 => {
                let Some(value) = cursor.read_u32() else {
                    insn.flags |=
                        InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                    return;
                };
                insn.flags |= InstructionFlags::DISP32;
                insn.displacement = Displacement::Disp32(value);
            }
            _ => {}
        }
    } else if prefixes.contains(Prefixes::LOCK) {
        // LOCK with no ModR/M operand is always invalid.
        insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LOCK;
    }

    // Step 6: immediate. The first matching width wins.
    if attr.contains(OpcodeAttr::IMM_P66) {
        if attr.contains(OpcodeAttr::REL32) {
            // Relative jump/call with an override-selected offset width.
            if prefixes.contains(Prefixes::OP_SIZE) {
                let Some(value) = cursor.read_u16() else {
                    insn.flags |=
                        InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                    return;
                };
                insn.flags |= InstructionFlags::IMM16 | InstructionFlags::RELATIVE;
                insn.immediate = Immediate::Imm16(value);
            } else {
                let Some(value) = cursor.read_u32() else {
                    insn.flags |=
                        InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                    return;
                };
                insn.flags |= InstructionFlags::IMM32 | InstructionFlags::RELATIVE;
                insn.immediate = Immediate::Imm32(value);
            }
        } else if op64 {
            let Some(value) = cursor.read_u64() else {
                insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                return;
            };
            insn.flags |= InstructionFlags::IMM64;
            insn.immediate = Immediate::Imm64(value);
        } else if prefixes.contains(Prefixes::OP_SIZE) {
            let Some(value) = cursor.read_u16() else {
                insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                return;
            };
            insn.flags |= InstructionFlags::IMM16;
            insn.immediate = Immediate::Imm16(value);
        } else {
            let Some(value) = cursor.read_u32() else {
                insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                return;
            };
            insn.flags |= InstructionFlags::IMM32;
            insn.immediate = Immediate::Imm32(value);
        }
    } else if attr.contains(OpcodeAttr::IMM16) {
        let Some(value) = cursor.read_u16() else {
            insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
            return;
        };
        if attr.contains(OpcodeAttr::IMM8) {
            // ENTER carries imm16 then imm8; the record keeps the
            // trailing byte and its width flag.
            let Some(trailing) = cursor.read_u8() else {
                insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
                return;
            };
            insn.flags |= InstructionFlags::IMM8;
            insn.immediate = Immediate::Imm8(trailing);
        } else {
            insn.flags |= InstructionFlags::IMM16;
            insn.immediate = Immediate::Imm16(value);
        }
    } else if attr.contains(OpcodeAttr::IMM8) {
        let Some(value) = cursor.read_u8() else {
            insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
            return;
        };
        insn.flags |= InstructionFlags::IMM8;
        insn.immediate = Immediate::Imm8(value);
    } else if attr.contains(OpcodeAttr::REL32) {
        let Some(value) = cursor.read_u32() else {
            insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
            return;
        };
        insn.flags |= InstructionFlags::IMM32 | InstructionFlags::RELATIVE;
        insn.immediate = Immediate::Imm32(value);
    } else if attr.contains(OpcodeAttr::REL8) {
        let Some(value) = cursor.read_u8() else {
            insn.flags |= InstructionFlags::ERROR | InstructionFlags::ERROR_LENGTH;
            return;
        };
        insn.flags |= InstructionFlags::IMM8 | InstructionFlags::RELATIVE;
        insn.immediate = Immediate::Imm8(value);
    }
}
