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

//! Flag bits describing what a decoded instruction contains and what went
//! wrong while decoding it.

use bitflags::bitflags;

bitflags! {
    /// Properties of a decoded instruction.
    ///
    /// Three families share the word: presence bits (which byte groups the
    /// instruction carries), prefix-seen bits (which prefix categories were
    /// scanned), and error bits. [`InstructionFlags::ERROR`] accompanies
    /// every specific `ERROR_*` bit; errors taint the record but never
    /// abort decoding.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct InstructionFlags: u32 {
        /// Instruction has a ModR/M byte.
        const MODRM = 0x0000_0001;
        /// Instruction has a SIB byte.
        const SIB = 0x0000_0002;
        /// 8-bit immediate.
        const IMM8 = 0x0000_0004;
        /// 16-bit immediate.
        const IMM16 = 0x0000_0008;
        /// 32-bit immediate.
        const IMM32 = 0x0000_0010;
        /// 64-bit immediate (MOV r64, imm64 only).
        const IMM64 = 0x0000_0020;
        /// 8-bit displacement.
        const DISP8 = 0x0000_0040;
        /// 16-bit displacement.
        const DISP16 = 0x0000_0080;
        /// 32-bit displacement.
        const DISP32 = 0x0000_0100;
        /// The immediate is a PC-relative offset (short/near jumps, calls).
        const RELATIVE = 0x0000_0200;

        /// Some error bit below is set.
        const ERROR = 0x0000_1000;
        /// Illegal opcode, group sub-encoding, or FPU escape entry.
        const ERROR_OPCODE = 0x0000_2000;
        /// Instruction would exceed 15 bytes (or the buffer ran out).
        const ERROR_LENGTH = 0x0000_4000;
        /// LOCK prefix on an encoding that does not allow it.
        const ERROR_LOCK = 0x0000_8000;
        /// ModR/M operand violates an encoding constraint.
        const ERROR_OPERAND = 0x0001_0000;

        /// REPNZ/REPNE (F2) prefix seen.
        const PREFIX_REPNZ = 0x0100_0000;
        /// REP/REPE/REPZ (F3) prefix seen.
        const PREFIX_REP = 0x0200_0000;
        /// Operand-size override (66) seen.
        const PREFIX_OP_SIZE = 0x0400_0000;
        /// Address-size override (67) seen.
        const PREFIX_ADDR_SIZE = 0x0800_0000;
        /// LOCK (F0) seen.
        const PREFIX_LOCK = 0x1000_0000;
        /// Some segment override seen.
        const PREFIX_SEG = 0x2000_0000;
        /// REX (40-4F) seen.
        const PREFIX_REX = 0x4000_0000;

        /// Any immediate width.
        const ANY_IMM = Self::IMM8.bits() | Self::IMM16.bits()
            | Self::IMM32.bits() | Self::IMM64.bits();
        /// Any displacement width.
        const ANY_DISP = Self::DISP8.bits() | Self::DISP16.bits()
            | Self::DISP32.bits();
        /// Any error.
        const ANY_ERROR = Self::ERROR.bits() | Self::ERROR_OPCODE.bits()
            | Self::ERROR_LENGTH.bits() | Self::ERROR_LOCK.bits()
            | Self::ERROR_OPERAND.bits();
        /// Any prefix-seen bit.
        const ANY_PREFIX = Self::PREFIX_REPNZ.bits() | Self::PREFIX_REP.bits()
            | Self::PREFIX_OP_SIZE.bits() | Self::PREFIX_ADDR_SIZE.bits()
            | Self::PREFIX_LOCK.bits() | Self::PREFIX_SEG.bits()
            | Self::PREFIX_REX.bits();
    }
}

impl InstructionFlags {
    /// Returns `true` if any error bit is set.
    pub fn has_error(&self) -> bool {
        self.intersects(Self::ANY_ERROR)
    }
}
