//! Opcode attribute tables.
//!
//! Four dense tables drive the decoder: the primary and secondary (0F)
//! opcode attribute tables, the group-refinement table dispatched through
//! ModR/M.reg, and the FPU escape tables for D8-DF. Alongside them sit the
//! LOCK-allowed and memory-only opcode sets used by the validators.

use bitflags::bitflags;

bitflags! {
    /// What follows an opcode: a bit-bag, since attributes co-occur
    /// (e.g. `MODRM | GROUP | IMM8`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct OpcodeAttr: u8 {
        /// Instruction has a ModR/M byte.
        const MODRM = 0x01;
        /// 8-bit immediate.
        const IMM8 = 0x02;
        /// 16-bit immediate.
        const IMM16 = 0x04;
        /// Variable-size immediate: 64-bit for MOV r64, imm64 under
        /// REX.W, 16-bit under an operand-size override, 32-bit
        /// otherwise.
        const IMM_P66 = 0x10;
        /// 8-bit relative offset.
        const REL8 = 0x20;
        /// 32-bit relative offset.
        const REL32 = 0x40;
        /// Meaning refined through ModR/M.reg (opcode group).
        const GROUP = 0x80;
        /// Illegal opcode.
        const INVALID = 0xFF;
    }
}

impl OpcodeAttr {
    /// The width-selecting bits carried from a pre-group attribute
    /// through group refinement.
    pub(crate) const IMM_BITS: Self = Self::IMM8
        .union(Self::IMM16)
        .union(Self::IMM_P66)
        .union(Self::REL8)
        .union(Self::REL32);
}

// Table shorthands.
const N: OpcodeAttr = OpcodeAttr::empty();
const M: OpcodeAttr = OpcodeAttr::MODRM;
const I8: OpcodeAttr = OpcodeAttr::IMM8;
const I16: OpcodeAttr = OpcodeAttr::IMM16;
const P66: OpcodeAttr = OpcodeAttr::IMM_P66;
const R8: OpcodeAttr = OpcodeAttr::REL8;
const R32: OpcodeAttr = OpcodeAttr::REL32;
const BAD: OpcodeAttr = OpcodeAttr::INVALID;
const M_I8: OpcodeAttr = M.union(I8);
const M_P66: OpcodeAttr = M.union(P66);
const M_G: OpcodeAttr = M.union(OpcodeAttr::GROUP);
const M_G_I8: OpcodeAttr = M_G.union(I8);
const M_G_P66: OpcodeAttr = M_G.union(P66);
const I16_I8: OpcodeAttr = I16.union(I8);

/// Primary (1-byte) opcode attributes.
pub(crate) static OPCODE_ATTR: [OpcodeAttr; 256] = [
    M,       // 00: ADD r/m8, r8
    M,       // 01: ADD r/m16/32, r16/32
    M,       // 02: ADD r8, r/m8
    M,       // 03: ADD r16/32, r/m16/32
    I8,      // 04: ADD AL, imm8
    P66,     // 05: ADD AX/EAX, imm16/32
    N,       // 06: PUSH ES (invalid in 64-bit mode)
    N,       // 07: POP ES (invalid in 64-bit mode)
    M,       // 08: OR r/m8, r8
    M,       // 09: OR r/m16/32, r16/32
    M,       // 0A: OR r8, r/m8
    M,       // 0B: OR r16/32, r/m16/32
    I8,      // 0C: OR AL, imm8
    P66,     // 0D: OR AX/EAX, imm16/32
    N,       // 0E: PUSH CS (invalid in 64-bit mode)
    N,       // 0F: two-byte escape
    M,       // 10: ADC r/m8, r8
    M,       // 11: ADC r/m16/32, r16/32
    M,       // 12: ADC r8, r/m8
    M,       // 13: ADC r16/32, r/m16/32
    I8,      // 14: ADC AL, imm8
    P66,     // 15: ADC AX/EAX, imm16/32
    N,       // 16: PUSH SS (invalid in 64-bit mode)
    N,       // 17: POP SS (invalid in 64-bit mode)
    M,       // 18: SBB r/m8, r8
    M,       // 19: SBB r/m16/32, r16/32
    M,       // 1A: SBB r8, r/m8
    M,       // 1B: SBB r16/32, r/m16/32
    I8,      // 1C: SBB AL, imm8
    P66,     // 1D: SBB AX/EAX, imm16/32
    N,       // 1E: PUSH DS (invalid in 64-bit mode)
    N,       // 1F: POP DS (invalid in 64-bit mode)
    M,       // 20: AND r/m8, r8
    M,       // 21: AND r/m16/32, r16/32
    M,       // 22: AND r8, r/m8
    M,       // 23: AND r16/32, r/m16/32
    I8,      // 24: AND AL, imm8
    P66,     // 25: AND AX/EAX, imm16/32
    N,       // 26: ES segment override prefix
    N,       // 27: DAA (invalid in 64-bit mode)
    M,       // 28: SUB r/m8, r8
    M,       // 29: SUB r/m16/32, r16/32
    M,       // 2A: SUB r8, r/m8
    M,       // 2B: SUB r16/32, r/m16/32
    I8,      // 2C: SUB AL, imm8
    P66,     // 2D: SUB AX/EAX, imm16/32
    N,       // 2E: CS segment override prefix
    N,       // 2F: DAS (invalid in 64-bit mode)
    M,       // 30: XOR r/m8, r8
    M,       // 31: XOR r/m16/32, r16/32
    M,       // 32: XOR r8, r/m8
    M,       // 33: XOR r16/32, r/m16/32
    I8,      // 34: XOR AL, imm8
    P66,     // 35: XOR AX/EAX, imm16/32
    N,       // 36: SS segment override prefix
    N,       // 37: AAA (invalid in 64-bit mode)
    M,       // 38: CMP r/m8, r8
    M,       // 39: CMP r/m16/32, r16/32
    M,       // 3A: CMP r8, r/m8
    M,       // 3B: CMP r16/32, r/m16/32
    I8,      // 3C: CMP AL, imm8
    P66,     // 3D: CMP AX/EAX, imm16/32
    N,       // 3E: DS segment override prefix
    N,       // 3F: AAS (invalid in 64-bit mode)
    // 40-4F: REX prefixes in 64-bit mode, INC/DEC r16/32 elsewhere
    N, N, N, N, N, N, N, N, // 40-47
    N, N, N, N, N, N, N, N, // 48-4F
    // 50-5F: PUSH/POP r16/32/64
    N, N, N, N, N, N, N, N, // 50-57: PUSH
    N, N, N, N, N, N, N, N, // 58-5F: POP
    N,       // 60: PUSHA/PUSHAD (invalid in 64-bit mode)
    N,       // 61: POPA/POPAD (invalid in 64-bit mode)
    M,       // 62: BOUND (invalid in 64-bit mode)
    M,       // 63: MOVSXD r64, r/m32 (64-bit) / ARPL (32-bit)
    N,       // 64: FS segment override prefix
    N,       // 65: GS segment override prefix
    N,       // 66: operand-size override prefix
    N,       // 67: address-size override prefix
    P66,     // 68: PUSH imm16/32
    M_P66,   // 69: IMUL r16/32, r/m16/32, imm16/32
    I8,      // 6A: PUSH imm8
    M_I8,    // 6B: IMUL r16/32, r/m16/32, imm8
    N,       // 6C: INSB
    N,       // 6D: INSW/INSD
    N,       // 6E: OUTSB
    N,       // 6F: OUTSW/OUTSD
    // 70-7F: Jcc rel8
    R8, R8, R8, R8, R8, R8, R8, R8, // 70-77
    R8, R8, R8, R8, R8, R8, R8, R8, // 78-7F
    M_G_I8,  // 80: Group 1 r/m8, imm8
    M_G_P66, // 81: Group 1 r/m16/32, imm16/32
    BAD,     // 82: invalid in 64-bit mode
    M_G_I8,  // 83: Group 1 r/m16/32, imm8
    M,       // 84: TEST r/m8, r8
    M,       // 85: TEST r/m16/32, r16/32
    M,       // 86: XCHG r/m8, r8
    M,       // 87: XCHG r/m16/32, r16/32
    M,       // 88: MOV r/m8, r8
    M,       // 89: MOV r/m16/32, r16/32
    M,       // 8A: MOV r8, r/m8
    M,       // 8B: MOV r16/32, r/m16/32
    M,       // 8C: MOV r/m16, Sreg
    M,       // 8D: LEA r16/32, m
    M,       // 8E: MOV Sreg, r/m16
    M_G,     // 8F: Group 1A: POP r/m16/32/64
    // 90-97: NOP / XCHG rAX, r
    N, N, N, N, N, N, N, N,
    N,       // 98: CBW/CWDE/CDQE
    N,       // 99: CWD/CDQ/CQO
    N,       // 9A: CALL far (invalid in 64-bit mode)
    N,       // 9B: FWAIT/WAIT
    N,       // 9C: PUSHF/PUSHFD/PUSHFQ
    N,       // 9D: POPF/POPFD/POPFQ
    N,       // 9E: SAHF
    N,       // 9F: LAHF
    N,       // A0: MOV AL, moffs8
    N,       // A1: MOV AX/EAX/RAX, moffs16/32/64
    N,       // A2: MOV moffs8, AL
    N,       // A3: MOV moffs16/32/64, AX/EAX/RAX
    N,       // A4: MOVSB
    N,       // A5: MOVSW/MOVSD/MOVSQ
    N,       // A6: CMPSB
    N,       // A7: CMPSW/CMPSD/CMPSQ
    I8,      // A8: TEST AL, imm8
    P66,     // A9: TEST AX/EAX/RAX, imm16/32
    N,       // AA: STOSB
    N,       // AB: STOSW/STOSD/STOSQ
    N,       // AC: LODSB
    N,       // AD: LODSW/LODSD/LODSQ
    N,       // AE: SCASB
    N,       // AF: SCASW/SCASD/SCASQ
    // B0-B7: MOV r8, imm8
    I8, I8, I8, I8, I8, I8, I8, I8,
    // B8-BF: MOV r16/32/64, imm16/32/64
    P66, P66, P66, P66, P66, P66, P66, P66,
    M_G_I8,  // C0: Group 2 r/m8, imm8
    M_G_I8,  // C1: Group 2 r/m16/32, imm8
    I16,     // C2: RET imm16
    N,       // C3: RET
    M,       // C4: LES (invalid in 64-bit mode) / VEX 3-byte escape
    M,       // C5: LDS (invalid in 64-bit mode) / VEX 2-byte escape
    M_G_I8,  // C6: Group 11: MOV r/m8, imm8
    M_G_P66, // C7: Group 11: MOV r/m16/32/64, imm16/32
    I16_I8,  // C8: ENTER imm16, imm8
    N,       // C9: LEAVE
    I16,     // CA: RET far imm16
    N,       // CB: RET far
    N,       // CC: INT 3
    I8,      // CD: INT imm8
    N,       // CE: INTO (invalid in 64-bit mode)
    N,       // CF: IRET/IRETD/IRETQ
    M_G,     // D0: Group 2 r/m8, 1
    M_G,     // D1: Group 2 r/m16/32, 1
    M_G,     // D2: Group 2 r/m8, CL
    M_G,     // D3: Group 2 r/m16/32, CL
    I8,      // D4: AAM imm8 (invalid in 64-bit mode)
    I8,      // D5: AAD imm8 (invalid in 64-bit mode)
    N,       // D6: reserved
    N,       // D7: XLAT/XLATB
    // D8-DF: FPU escapes, refined through the FPU tables
    M, M, M, M, M, M, M, M,
    R8,      // E0: LOOPNE/LOOPNZ rel8
    R8,      // E1: LOOPE/LOOPZ rel8
    R8,      // E2: LOOP rel8
    R8,      // E3: JCXZ/JECXZ/JRCXZ rel8
    I8,      // E4: IN AL, imm8
    I8,      // E5: IN AX/EAX, imm8
    I8,      // E6: OUT imm8, AL
    I8,      // E7: OUT imm8, AX/EAX
    R32,     // E8: CALL rel16/32
    R32,     // E9: JMP rel16/32
    N,       // EA: JMP far (invalid in 64-bit mode)
    R8,      // EB: JMP rel8
    N,       // EC: IN AL, DX
    N,       // ED: IN AX/EAX, DX
    N,       // EE: OUT DX, AL
    N,       // EF: OUT DX, AX/EAX
    N,       // F0: LOCK prefix
    N,       // F1: INT1/ICEBP
    N,       // F2: REPNE/REPNZ prefix
    N,       // F3: REP/REPE/REPZ prefix
    N,       // F4: HLT
    N,       // F5: CMC
    M_G_I8,  // F6: Group 3 r/m8, TEST imm8
    M_G_P66, // F7: Group 3 r/m16/32/64, TEST imm16/32
    N,       // F8: CLC
    N,       // F9: STC
    N,       // FA: CLI
    N,       // FB: STI
    N,       // FC: CLD
    N,       // FD: STD
    M_G,     // FE: Group 4: INC/DEC r/m8
    M_G,     // FF: Group 5
];

/// Secondary (0F-escape) opcode attributes.
pub(crate) static OPCODE2_ATTR: [OpcodeAttr; 256] = [
    M_G,     // 00: Group 6: SLDT/STR/LLDT/LTR/VERR/VERW
    M_G,     // 01: Group 7: SGDT/SIDT/LGDT/LIDT/SMSW/LMSW/INVLPG
    M,       // 02: LAR
    M,       // 03: LSL
    BAD,     // 04: invalid
    N,       // 05: SYSCALL
    N,       // 06: CLTS
    N,       // 07: SYSRET
    N,       // 08: INVD
    N,       // 09: WBINVD
    BAD,     // 0A: invalid
    N,       // 0B: UD2
    BAD,     // 0C: invalid
    M,       // 0D: prefetch (3DNow! hint)
    N,       // 0E: FEMMS
    M,       // 0F: 3DNow! escape
    M,       // 10: MOVUPS/MOVSS/MOVUPD/MOVSD
    M,       // 11: MOVUPS/MOVSS/MOVUPD/MOVSD
    M,       // 12: MOVLPS/MOVHLPS/MOVLPD/MOVSLDUP/MOVDDUP
    M,       // 13: MOVLPS/MOVLPD
    M,       // 14: UNPCKLPS/UNPCKLPD
    M,       // 15: UNPCKHPS/UNPCKHPD
    M,       // 16: MOVHPS/MOVSHDUP/MOVHPD
    M,       // 17: MOVHPS/MOVHPD
    M_G,     // 18: Group 16: prefetch hints
    M,       // 19: NOP r/m16/32
    M,       // 1A: NOP r/m16/32
    M,       // 1B: NOP r/m16/32
    M,       // 1C: NOP r/m16/32
    M,       // 1D: NOP r/m16/32
    M,       // 1E: NOP r/m16/32
    M,       // 1F: NOP r/m16/32
    M,       // 20: MOV r, CRn
    M,       // 21: MOV r, DRn
    M,       // 22: MOV CRn, r
    M,       // 23: MOV DRn, r
    BAD,     // 24: invalid
    BAD,     // 25: invalid
    BAD,     // 26: invalid
    BAD,     // 27: invalid
    M,       // 28: MOVAPS/MOVAPD
    M,       // 29: MOVAPS/MOVAPD
    M,       // 2A: CVTPI2PS/CVTSI2SS/CVTPI2PD/CVTSI2SD
    M,       // 2B: MOVNTPS/MOVNTPD
    M,       // 2C: CVTTPS2PI/CVTTSS2SI/CVTTPD2PI/CVTTSD2SI
    M,       // 2D: CVTPS2PI/CVTSS2SI/CVTPD2PI/CVTSD2SI
    M,       // 2E: UCOMISS/UCOMISD
    M,       // 2F: COMISS/COMISD
    N,       // 30: WRMSR
    N,       // 31: RDTSC
    N,       // 32: RDMSR
    N,       // 33: RDPMC
    N,       // 34: SYSENTER
    N,       // 35: SYSEXIT
    BAD,     // 36: invalid
    N,       // 37: GETSEC
    M,       // 38: SSSE3/SSE4 escape
    BAD,     // 39: reserved
    M,       // 3A: SSSE3/SSE4 escape
    BAD,     // 3B: reserved
    BAD,     // 3C: reserved
    BAD,     // 3D: reserved
    BAD,     // 3E: reserved
    BAD,     // 3F: reserved
    // 40-4F: CMOVcc r16/32/64, r/m16/32/64
    M, M, M, M, M, M, M, M,
    M, M, M, M, M, M, M, M,
    M,       // 50: MOVMSKPS/MOVMSKPD
    M,       // 51: SQRTPS/SQRTSS/SQRTPD/SQRTSD
    M,       // 52: RSQRTPS/RSQRTSS
    M,       // 53: RCPPS/RCPSS
    M,       // 54: ANDPS/ANDPD
    M,       // 55: ANDNPS/ANDNPD
    M,       // 56: ORPS/ORPD
    M,       // 57: XORPS/XORPD
    M,       // 58: ADDPS/ADDSS/ADDPD/ADDSD
    M,       // 59: MULPS/MULSS/MULPD/MULSD
    M,       // 5A: CVTPS2PD/CVTSS2SD/CVTPD2PS/CVTSD2SS
    M,       // 5B: CVTDQ2PS/CVTPS2DQ/CVTTPD2DQ
    M,       // 5C: SUBPS/SUBSS/SUBPD/SUBSD
    M,       // 5D: MINPS/MINSS/MINPD/MINSD
    M,       // 5E: DIVPS/DIVSS/DIVPD/DIVSD
    M,       // 5F: MAXPS/MAXSS/MAXPD/MAXSD
    M,       // 60: PUNPCKLBW
    M,       // 61: PUNPCKLWD
    M,       // 62: PUNPCKLDQ
    M,       // 63: PACKSSWB
    M,       // 64: PCMPGTB
    M,       // 65: PCMPGTW
    M,       // 66: PCMPGTD
    M,       // 67: PACKUSWB
    M,       // 68: PUNPCKHBW
    M,       // 69: PUNPCKHWD
    M,       // 6A: PUNPCKHDQ
    M,       // 6B: PACKSSDW
    M,       // 6C: PUNPCKLQDQ
    M,       // 6D: PUNPCKHQDQ
    M,       // 6E: MOVD/MOVQ
    M,       // 6F: MOVQ/MOVDQA/MOVDQU
    M_I8,    // 70: PSHUFW/PSHUFD/PSHUFHW/PSHUFLW
    M_G_I8,  // 71: Group 12: PSRLW/PSRAW/PSLLW
    M_G_I8,  // 72: Group 13: PSRLD/PSRAD/PSLLD
    M_G_I8,  // 73: Group 14: PSRLQ/PSRLDQ/PSLLQ/PSLLDQ
    M,       // 74: PCMPEQB
    M,       // 75: PCMPEQW
    M,       // 76: PCMPEQD
    N,       // 77: EMMS
    M,       // 78: VMREAD
    M,       // 79: VMWRITE
    BAD,     // 7A: reserved
    BAD,     // 7B: reserved
    M,       // 7C: HADDPD/HADDPS
    M,       // 7D: HSUBPD/HSUBPS
    M,       // 7E: MOVD/MOVQ
    M,       // 7F: MOVQ/MOVDQA/MOVDQU
    // 80-8F: Jcc rel16/32
    R32, R32, R32, R32, R32, R32, R32, R32,
    R32, R32, R32, R32, R32, R32, R32, R32,
    // 90-9F: SETcc r/m8
    M, M, M, M, M, M, M, M,
    M, M, M, M, M, M, M, M,
    N,       // A0: PUSH FS
    N,       // A1: POP FS
    N,       // A2: CPUID
    M,       // A3: BT
    M_I8,    // A4: SHLD r/m, r, imm8
    M,       // A5: SHLD r/m, r, CL
    BAD,     // A6: reserved
    BAD,     // A7: reserved
    N,       // A8: PUSH GS
    N,       // A9: POP GS
    N,       // AA: RSM
    M,       // AB: BTS
    M_I8,    // AC: SHRD r/m, r, imm8
    M,       // AD: SHRD r/m, r, CL
    M_G,     // AE: Group 15: FXSAVE/FXRSTOR/LDMXCSR/fences
    M,       // AF: IMUL r16/32/64, r/m16/32/64
    M,       // B0: CMPXCHG r/m8, r8
    M,       // B1: CMPXCHG r/m16/32/64, r16/32/64
    M,       // B2: LSS
    M,       // B3: BTR
    M,       // B4: LFS
    M,       // B5: LGS
    M,       // B6: MOVZX r16/32/64, r/m8
    M,       // B7: MOVZX r16/32/64, r/m16
    BAD,     // B8: JMPE (IA-64)
    M_G,     // B9: Group 10: UD1
    M_G_I8,  // BA: Group 8: BT/BTS/BTR/BTC r/m, imm8
    M,       // BB: BTC
    M,       // BC: BSF
    M,       // BD: BSR
    M,       // BE: MOVSX r16/32/64, r/m8
    M,       // BF: MOVSX r16/32/64, r/m16
    M,       // C0: XADD r/m8, r8
    M,       // C1: XADD r/m16/32/64, r16/32/64
    M_I8,    // C2: CMPPS/CMPSS/CMPPD/CMPSD xmm, r/m, imm8
    M,       // C3: MOVNTI
    M_I8,    // C4: PINSRW
    M_I8,    // C5: PEXTRW
    M_I8,    // C6: SHUFPS/SHUFPD
    M_G,     // C7: Group 9: CMPXCHG8B/CMPXCHG16B
    // C8-CF: BSWAP r32/64
    N, N, N, N, N, N, N, N,
    M,       // D0: ADDSUBPD/ADDSUBPS
    M,       // D1: PSRLW
    M,       // D2: PSRLD
    M,       // D3: PSRLQ
    M,       // D4: PADDQ
    M,       // D5: PMULLW
    M,       // D6: MOVQ2DQ/MOVQ/MOVDQ2Q
    M,       // D7: PMOVMSKB
    M,       // D8: PSUBUSB
    M,       // D9: PSUBUSW
    M,       // DA: PMINUB
    M,       // DB: PAND
    M,       // DC: PADDUSB
    M,       // DD: PADDUSW
    M,       // DE: PMAXUB
    M,       // DF: PANDN
    M,       // E0: PAVGB
    M,       // E1: PSRAW
    M,       // E2: PSRAD
    M,       // E3: PAVGW
    M,       // E4: PMULHUW
    M,       // E5: PMULHW
    M,       // E6: CVTDQ2PD/CVTTPD2DQ/CVTPD2DQ
    M,       // E7: MOVNTQ/MOVNTDQ
    M,       // E8: PSUBSB
    M,       // E9: PSUBSW
    M,       // EA: PMINSW
    M,       // EB: POR
    M,       // EC: PADDSB
    M,       // ED: PADDSW
    M,       // EE: PMAXSW
    M,       // EF: PXOR
    M,       // F0: LDDQU
    M,       // F1: PSLLW
    M,       // F2: PSLLD
    M,       // F3: PSLLQ
    M,       // F4: PMULUDQ
    M,       // F5: PMADDWD
    M,       // F6: PSADBW
    M,       // F7: MASKMOVQ/MASKMOVDQU
    M,       // F8: PSUBB
    M,       // F9: PSUBW
    M,       // FA: PSUBD
    M,       // FB: PSUBQ
    M,       // FC: PADDB
    M,       // FD: PADDW
    M,       // FE: PADDD
    BAD,     // FF: reserved
];

/// Row of [`GROUP_ATTR`] selected by an opcode with the GROUP attribute,
/// `None` for non-group opcodes.
pub(crate) fn group_index(opcode: u8, opcode2: u8) -> Option<usize> {
    let row = if opcode == 0x0F {
        match opcode2 {
            0x00 => 6,  // Group 6
            0x01 => 7,  // Group 7
            0x18 => 16, // Group 16
            0x71 => 12, // Group 12
            0x72 => 13, // Group 13
            0x73 => 14, // Group 14
            0xAE => 15, // Group 15
            0xB9 => 10, // Group 10
            0xBA => 8,  // Group 8
            0xC7 => 9,  // Group 9
            _ => return None,
        }
    } else {
        match opcode {
            0x80..=0x83 => 0,          // Group 1
            0x8F => 1,                 // Group 1A
            0xC0 | 0xC1 => 2,          // Group 2
            0xD0..=0xD3 => 2,          // Group 2
            0xC6 | 0xC7 => 11,         // Group 11
            0xF6 | 0xF7 => 3,          // Group 3
            0xFE => 4,                 // Group 4
            0xFF => 5,                 // Group 5
            _ => return None,
        }
    };
    Some(row)
}

/// Group-refined attributes, one row per group, indexed by ModR/M.reg.
pub(crate) static GROUP_ATTR: [[OpcodeAttr; 8]; 32] = [
    // Group 1 (0): ADD/OR/ADC/SBB/AND/SUB/XOR/CMP r/m, imm
    [M, M, M, M, M, M, M, M],
    // Group 1A (1): POP r/m
    [M, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    // Group 2 (2): ROL/ROR/RCL/RCR/SHL/SHR/-/SAR
    [M, M, M, M, M, M, BAD, M],
    // Group 3 (3): TEST/-/NOT/NEG/MUL/IMUL/DIV/IDIV
    [M_I8, BAD, M, M, M, M, M, M],
    // Group 4 (4): INC/DEC r/m8
    [M, M, BAD, BAD, BAD, BAD, BAD, BAD],
    // Group 5 (5): INC/DEC/CALL/CALL far/JMP/JMP far/PUSH
    [M, M, M, M, M, M, M, BAD],
    // Group 6 (6): SLDT/STR/LLDT/LTR/VERR/VERW
    [M, M, M, M, M, M, BAD, BAD],
    // Group 7 (7): SGDT/SIDT/LGDT/LIDT/SMSW/LMSW/INVLPG
    [M, M, M, M, M, M, M, M],
    // Group 8 (8): BT/BTS/BTR/BTC r/m, imm8
    [M_I8, M_I8, M_I8, M_I8, M_I8, M_I8, M_I8, M_I8],
    // Group 9 (9): CMPXCHG8B/CMPXCHG16B
    [BAD, M, BAD, BAD, BAD, BAD, BAD, BAD],
    // Group 10 (10): UD1
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    // Group 11 (11): MOV r/m, imm
    [M_I8, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    // Group 12 (12): -/-/PSRLW/-/PSRAW/-/PSLLW/-
    [BAD, BAD, M_I8, BAD, M_I8, BAD, M_I8, BAD],
    // Group 13 (13): -/-/PSRLD/-/PSRAD/-/PSLLD/-
    [BAD, BAD, M_I8, BAD, M_I8, BAD, M_I8, BAD],
    // Group 14 (14): -/-/PSRLQ/PSRLDQ/-/-/PSLLQ/PSLLDQ
    [BAD, BAD, M_I8, M_I8, BAD, BAD, M_I8, M_I8],
    // Group 15 (15): FXSAVE/FXRSTOR/LDMXCSR/STMXCSR/-/fences
    [M, M, M, M, BAD, M, M, M],
    // Group 16 (16): prefetch hints
    [M, M, M, M, M, M, M, M],
    // Group 17 (17): MPX / non-temporal moves
    [M, M, M, M, M, M, M, M],
    // Group P (18): PREFETCH (3DNow!)
    [M, M, M, M, M, M, M, M],
    // 19-31: reserved
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
    [BAD, BAD, BAD, BAD, BAD, BAD, BAD, BAD],
];

/// FPU escapes D8-DF with a memory operand (mod != 3), one entry per
/// escape byte.
pub(crate) static FPU_MEM_ATTR: [OpcodeAttr; 8] = [
    M, // D8: FADD/FMUL/FCOM/FCOMP/FSUB/FSUBR/FDIV/FDIVR m32
    M, // D9: FLD/FST/FSTP/FLDENV/FLDCW/FSTENV/FSTCW m
    M, // DA: FIADD/FIMUL/FICOM/FICOMP/FISUB/FISUBR/FIDIV/FIDIVR m32
    M, // DB: FILD/FISTTP/FIST/FISTP/FLD/FSTP m
    M, // DC: FADD/FMUL/FCOM/FCOMP/FSUB/FSUBR/FDIV/FDIVR m64
    M, // DD: FLD/FISTTP/FST/FSTP/FRSTOR/FSAVE/FSTSW m
    M, // DE: FIADD/FIMUL/FICOM/FICOMP/FISUB/FISUBR/FIDIV/FIDIVR m16
    M, // DF: FILD/FISTTP/FIST/FISTP/FBLD/FBSTP/FSTSW m
];

/// FPU escapes D8-DF with a register operand (mod == 3), indexed by
/// ModR/M.reg.
pub(crate) static FPU_REG_ATTR: [[OpcodeAttr; 8]; 8] = [
    [N, N, N, N, N, N, N, N], // D8: FADD/FMUL/FCOM/FCOMP/FSUB/FSUBR/FDIV/FDIVR ST, ST(i)
    [N, N, N, N, N, N, N, N], // D9: FLD/FXCH/FNOP/arithmetic ST(i)
    [N, N, N, N, N, N, N, N], // DA: FCMOVB/FCMOVE/FCMOVBE/FCMOVU/FUCOMPP
    [N, N, N, N, N, N, N, N], // DB: FCMOVNB/FCMOVNE/FCMOVNBE/FCMOVNU/FCOMI
    [N, N, N, N, N, N, N, N], // DC: FADD/FMUL/FSUB/FSUBR/FDIV/FDIVR ST(i), ST
    [N, N, N, N, N, N, N, N], // DD: FFREE/FST/FSTP/FUCOM/FUCOMP ST(i)
    [N, N, N, N, N, N, N, N], // DE: FADDP/FMULP/FCOMPP/FSUBP/FDIVP ST(i), ST
    [N, N, N, N, N, N, N, N], // DF: FFREEP/FSTSW AX/FCOMIP/FUCOMIP
];

/// 1-byte opcodes that accept a LOCK prefix (with a memory operand).
pub(crate) static LOCKABLE_1BYTE: &[u8] = &[
    0x00, 0x01, 0x02, 0x03, // ADD
    0x08, 0x09, 0x0A, 0x0B, // OR
    0x10, 0x11, 0x12, 0x13, // ADC
    0x18, 0x19, 0x1A, 0x1B, // SBB
    0x20, 0x21, 0x22, 0x23, // AND
    0x28, 0x29, 0x2A, 0x2B, // SUB
    0x30, 0x31, 0x32, 0x33, // XOR
    0x80, 0x81, 0x83, // Group 1
    0x86, 0x87, // XCHG
    0xF6, 0xF7, // Group 3
    0xFE, 0xFF, // Group 4/5
];

/// 0F-escape opcodes that accept a LOCK prefix (with a memory operand).
pub(crate) static LOCKABLE_2BYTE: &[u8] = &[
    0xB0, 0xB1, // CMPXCHG
    0xC0, 0xC1, // XADD
    0xC7, // Group 9 (CMPXCHG8B/CMPXCHG16B)
];

/// 1-byte opcodes whose ModR/M operand must be memory.
pub(crate) static MEMORY_ONLY_1BYTE: &[u8] = &[
    0xA0, 0xA1, 0xA2, 0xA3, // MOV moffs
    0xA4, 0xA5, 0xA6, 0xA7, // MOVS/CMPS
    0xAA, 0xAB, 0xAC, 0xAD, // STOS/LODS
    0xAE, 0xAF, // SCAS
    0xC4, 0xC5, // LES/LDS
    0xC6, 0xC7, // MOV r/m, imm
];

/// 0F-escape opcodes whose ModR/M operand must be memory.
pub(crate) static MEMORY_ONLY_2BYTE: &[u8] = &[
    0x00, 0x01, // Group 6/7 descriptor-table forms
    0x12, 0x13, // MOVLPS
    0x16, 0x17, // MOVHPS
    0x2B, // MOVNTPS
    0xB2, 0xB4, 0xB5, // LSS/LFS/LGS
    0xC3, // MOVNTI
    0xC7, // CMPXCHG8B/CMPXCHG16B
    0xE7, // MOVNTQ
];
