use std::rc::Rc;

use tracing::debug;

use crate::address_space::AddressSpace;
use crate::decoder::{DecodeItem, Decoder};
use crate::error::Result;

use super::{Page, Row};

/// One instruction per row.
///
/// Row boundaries are only discoverable by decoding forward from the page
/// base, so every width comes out of a single materialization batch.
#[derive(Clone)]
pub struct CodeMode {
    decoder: Rc<dyn Decoder>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowText {
    Decoded(String),
    Undecodable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRow {
    pub address: u64,
    pub length: usize,
    pub bytes: Vec<u8>,
    pub text: RowText,
}

impl CodeMode {
    pub fn new(decoder: Rc<dyn Decoder>) -> CodeMode {
        CodeMode { decoder }
    }

    pub fn decoder(&self) -> &dyn Decoder {
        self.decoder.as_ref()
    }

    /// Reads a window big enough for `row_count` worst-case instructions and
    /// runs the decoder over it once.
    pub fn decode_rows(
        &self,
        space: &AddressSpace,
        page_base: u64,
        row_count: usize,
    ) -> Result<Vec<Row>> {
        let window = space.read(
            page_base,
            row_count * self.decoder.max_instruction_length(),
        )?;
        let bytes = window.bytes();

        let mut rows = Vec::with_capacity(row_count);
        let mut offset = 0usize;
        for item in self.decoder.decode(bytes, page_base) {
            if rows.len() == row_count || offset >= bytes.len() {
                break;
            }
            let length = std::cmp::min(item.length(), bytes.len() - offset);
            let address = page_base + offset as u64;
            let text = match item {
                DecodeItem::Decoded(instruction) => RowText::Decoded(instruction.text),
                DecodeItem::Undecodable { .. } => {
                    debug!(address, decoder = self.decoder.name(), "undecodable byte");
                    RowText::Undecodable
                }
            };
            rows.push(Row::Code(CodeRow {
                address,
                length,
                bytes: bytes[offset..offset + length].to_vec(),
                text,
            }));
            offset += length;
        }
        Ok(rows)
    }

    pub fn locate(&self, page: &Page, address: u64) -> Option<(usize, usize)> {
        if address < page.base() {
            return None;
        }
        let rows = page.rows();
        let last = match rows.len().checked_sub(1) {
            Some(last) => last,
            None => return (address == page.base()).then(|| (0, 0)),
        };

        for (index, row) in rows.iter().enumerate() {
            let start = row.address();
            if address >= start && address < start + row.width() as u64 {
                return Some((index, (address - start) as usize));
            }
        }

        // just past the last byte, only when that is the end of the file
        (address == page.end() && page.reaches_end()).then(|| (last, rows[last].width()))
    }
}
