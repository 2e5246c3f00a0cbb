use iced_x86::{Formatter, IntelFormatter};
use tracing::warn;

use super::{DecodeItem, Decoder, Instruction};
use crate::error::{HexitchError, Result};

/// x86 decoder backed by iced-x86, formatting with Intel syntax.
pub struct IcedDecoder {
    bitness: u32,
}

impl IcedDecoder {
    pub fn new(bitness: u32) -> Result<Self> {
        match bitness {
            16 | 32 | 64 => Ok(Self { bitness }),
            other => Err(HexitchError::UnsupportedBitness(other)),
        }
    }

    pub fn bitness(&self) -> u32 {
        self.bitness
    }
}

impl Decoder for IcedDecoder {
    fn decode<'a>(
        &'a self,
        window: &'a [u8],
        base_address: u64,
    ) -> Box<dyn Iterator<Item = DecodeItem> + 'a> {
        Box::new(IcedStream {
            decoder: iced_x86::Decoder::with_ip(
                self.bitness,
                window,
                base_address,
                iced_x86::DecoderOptions::NONE,
            ),
            formatter: IntelFormatter::new(),
            instruction: iced_x86::Instruction::default(),
            base_address,
            exhausted: false,
        })
    }

    fn max_instruction_length(&self) -> usize {
        15
    }

    fn name(&self) -> &str {
        "iced-x86"
    }
}

struct IcedStream<'a> {
    decoder: iced_x86::Decoder<'a>,
    formatter: IntelFormatter,
    instruction: iced_x86::Instruction,
    base_address: u64,
    exhausted: bool,
}

impl Iterator for IcedStream<'_> {
    type Item = DecodeItem;

    fn next(&mut self) -> Option<DecodeItem> {
        if self.exhausted || !self.decoder.can_decode() {
            return None;
        }

        let position = self.decoder.position();
        let address = self.base_address + position as u64;
        self.decoder.decode_out(&mut self.instruction);

        if self.instruction.is_invalid() {
            // Resynchronize one byte further on.
            if let Err(e) = self.decoder.set_position(position + 1) {
                warn!(address, error = %e, "cannot resynchronize decoder");
                self.exhausted = true;
            }
            self.decoder.set_ip(address + 1);
            return Some(DecodeItem::Undecodable { address });
        }

        let mut text = String::new();
        self.formatter.format(&self.instruction, &mut text);
        Some(DecodeItem::Decoded(Instruction {
            address,
            length: self.instruction.len() as u32,
            text,
        }))
    }
}
