#![no_std]
#![doc = include_str!("../README.md")]

#[macro_use]
extern crate log;

mod decode;
mod flags;
mod insn;
mod prefix;
mod tables;
mod validate;

#[cfg(test)]
mod tests;

pub use decode::{decode, decode_into, instruction_length};
pub use flags::InstructionFlags;
pub use insn::{Displacement, Immediate, Instruction, ModRm, Sib};
pub use prefix::{LegacyPrefix, Prefixes, RexPrefix};

/// Maximum instruction length in x86-64 (15 bytes).
pub const MAX_INSTRUCTION_LENGTH: usize = 15;
