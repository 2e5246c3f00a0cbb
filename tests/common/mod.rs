//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use hexitch::{AddressSpace, DecodeItem, Decoder, Instruction, ModeKind, Session};

/// Deterministic decoder: an instruction is `(first & 3) + 1` bytes long and
/// `0xff` never decodes. An instruction cut short by the window end does not
/// decode either.
pub struct NibbleDecoder;

pub const NIBBLE_MAX_LENGTH: usize = 4;

impl Decoder for NibbleDecoder {
    fn decode<'a>(
        &'a self,
        window: &'a [u8],
        base_address: u64,
    ) -> Box<dyn Iterator<Item = DecodeItem> + 'a> {
        let mut offset = 0usize;
        Box::new(std::iter::from_fn(move || {
            let first = *window.get(offset)?;
            let address = base_address + offset as u64;
            let length = (first & 3) as usize + 1;
            if first == 0xff || offset + length > window.len() {
                offset += 1;
                return Some(DecodeItem::Undecodable { address });
            }
            offset += length;
            Some(DecodeItem::Decoded(Instruction {
                address,
                length: length as u32,
                text: format!("insn{}", length),
            }))
        }))
    }

    fn max_instruction_length(&self) -> usize {
        NIBBLE_MAX_LENGTH
    }

    fn name(&self) -> &str {
        "nibble"
    }
}

/// Bytes from a small LCG, so every run sees the same file.
pub fn pseudo_random_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
        .collect()
}

pub fn session(bytes: Vec<u8>, kind: ModeKind, rows: usize) -> Session {
    Session::new(
        AddressSpace::from_bytes(bytes),
        Rc::new(NibbleDecoder),
        kind,
        0,
        rows,
    )
    .expect("in-memory session")
}

/// Creates a temporary file holding `content`; it is removed on drop.
pub fn create_temp_file(content: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut temp_file = tempfile::NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
