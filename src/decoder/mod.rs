//! Instruction decoder boundary.
//!
//! Code mode hands a decoder one byte window per page and walks the records it
//! yields. Backends live in submodules; only x86 (iced-x86) ships today.

pub mod iced;

pub use self::iced::IcedDecoder;

/// One successfully decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: u64,
    /// Number of bytes consumed, always at least one.
    pub length: u32,
    pub text: String,
}

/// A record produced by [`Decoder::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeItem {
    Decoded(Instruction),
    /// The byte at `address` starts no valid instruction. Decoding resumes
    /// at `address + 1`.
    Undecodable { address: u64 },
}

impl DecodeItem {
    pub fn address(&self) -> u64 {
        match self {
            DecodeItem::Decoded(instruction) => instruction.address,
            DecodeItem::Undecodable { address } => *address,
        }
    }

    pub fn length(&self) -> usize {
        match self {
            DecodeItem::Decoded(instruction) => std::cmp::max(1, instruction.length as usize),
            DecodeItem::Undecodable { .. } => 1,
        }
    }
}

pub trait Decoder {
    /// Decodes `window` as if it were loaded at `base_address`.
    ///
    /// The sequence is lazy and must be deterministic for the same inputs.
    /// Records are contiguous: each one starts where the previous ended.
    fn decode<'a>(
        &'a self,
        window: &'a [u8],
        base_address: u64,
    ) -> Box<dyn Iterator<Item = DecodeItem> + 'a>;

    /// Upper bound of a single instruction's length, used to size the
    /// window read for a page.
    fn max_instruction_length(&self) -> usize;

    fn name(&self) -> &str;
}
