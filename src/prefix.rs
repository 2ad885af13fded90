//! Legacy and REX prefix recognition.

use bit_field::BitField;
use bitflags::bitflags;
use numeric_enum_macro::numeric_enum;

numeric_enum! {
    #[repr(u8)]
    /// Legacy instruction prefixes, by literal byte value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum LegacyPrefix {
        /// Lock prefix (0xF0)
        Lock = 0xF0,
        /// REPNE/REPNZ prefix (0xF2)
        RepNe = 0xF2,
        /// REP/REPE/REPZ prefix (0xF3)
        Rep = 0xF3,
        /// ES segment override (0x26)
        EsOverride = 0x26,
        /// CS segment override (0x2E)
        CsOverride = 0x2E,
        /// SS segment override (0x36)
        SsOverride = 0x36,
        /// DS segment override (0x3E)
        DsOverride = 0x3E,
        /// FS segment override (0x64)
        FsOverride = 0x64,
        /// GS segment override (0x65)
        GsOverride = 0x65,
        /// Operand size override (0x66)
        OperandSizeOverride = 0x66,
        /// Address size override (0x67)
        AddressSizeOverride = 0x67,
    }
}

impl LegacyPrefix {
    /// Returns `true` for the six segment-override prefixes.
    pub fn is_segment(&self) -> bool {
        matches!(
            self,
            Self::EsOverride
                | Self::CsOverride
                | Self::SsOverride
                | Self::DsOverride
                | Self::FsOverride
                | Self::GsOverride
        )
    }
}

bitflags! {
    /// Prefix categories observed while scanning, one bit per category.
    ///
    /// This is the scanner's working state; the record mirrors it through
    /// the `PREFIX_*` bits of
    /// [`InstructionFlags`](crate::InstructionFlags).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Prefixes: u16 {
        const LOCK = 0x001;
        const REPNZ = 0x002;
        const REP = 0x004;
        const OP_SIZE = 0x008;
        const ADDR_SIZE = 0x010;
        const SEG_CS = 0x020;
        const SEG_SS = 0x040;
        const SEG_DS = 0x080;
        const SEG_ES = 0x100;
        const SEG_FS = 0x200;
        const SEG_GS = 0x400;
        const REX = 0x800;

        /// Any segment override.
        const ANY_SEG = Self::SEG_CS.bits() | Self::SEG_SS.bits()
            | Self::SEG_DS.bits() | Self::SEG_ES.bits()
            | Self::SEG_FS.bits() | Self::SEG_GS.bits();
    }
}

/// REX prefix (0x40-0x4F), 64-bit mode only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RexPrefix {
    /// 64-bit operand size (MOV r64, imm64 selects an 8-byte immediate).
    pub w: bool,
    /// Extension of the ModR/M reg field.
    pub r: bool,
    /// Extension of the SIB index field.
    pub x: bool,
    /// Extension of the ModR/M r/m field or SIB base field.
    pub b: bool,
}

impl RexPrefix {
    /// Parse a REX prefix from a byte, `None` if the byte is not a REX.
    pub fn from_byte(byte: u8) -> Option<Self> {
        if byte & 0xF0 == 0x40 {
            Some(Self {
                w: byte.get_bit(3),
                r: byte.get_bit(2),
                x: byte.get_bit(1),
                b: byte.get_bit(0),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rex_from_byte() {
        assert_eq!(RexPrefix::from_byte(0x90), None);
        assert_eq!(
            RexPrefix::from_byte(0x48),
            Some(RexPrefix {
                w: true,
                r: false,
                x: false,
                b: false
            })
        );
        assert_eq!(
            RexPrefix::from_byte(0x45),
            Some(RexPrefix {
                w: false,
                r: true,
                x: false,
                b: true
            })
        );
    }

    #[test]
    fn test_legacy_prefix_bytes() {
        assert_eq!(LegacyPrefix::try_from(0xF0), Ok(LegacyPrefix::Lock));
        assert_eq!(LegacyPrefix::try_from(0x65), Ok(LegacyPrefix::GsOverride));
        assert!(LegacyPrefix::try_from(0x90).is_err());
        assert!(LegacyPrefix::GsOverride.is_segment());
        assert!(!LegacyPrefix::Lock.is_segment());
    }
}
