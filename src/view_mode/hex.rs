use crate::address_space::AddressSpace;
use crate::error::Result;

use super::{Page, Row};

pub const HEX_ROW_WIDTH: usize = 16;

/// Fixed-width hex/ASCII rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HexMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexRow {
    pub address: u64,
    /// `None` for positions past end-of-file.
    pub cells: [Option<u8>; HEX_ROW_WIDTH],
}

/// How a byte shows up in the ASCII column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Printable(char),
    NotPrintable,
}

impl Glyph {
    pub fn of(byte: u8) -> Glyph {
        if byte.is_ascii_graphic() || byte == b' ' {
            Glyph::Printable(char::from(byte))
        } else {
            Glyph::NotPrintable
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Glyph::Printable(c) => c,
            Glyph::NotPrintable => '.',
        }
    }
}

impl HexMode {
    /// Materializes up to `row_count` rows; rows starting at or past
    /// end-of-file are not produced.
    pub fn decode_rows(
        &self,
        space: &AddressSpace,
        page_base: u64,
        row_count: usize,
    ) -> Result<Vec<Row>> {
        let window = space.read(page_base, row_count * HEX_ROW_WIDTH)?;
        let rows = window
            .bytes()
            .chunks(HEX_ROW_WIDTH)
            .enumerate()
            .map(|(index, _)| {
                let offset = index * HEX_ROW_WIDTH;
                let mut cells = [None; HEX_ROW_WIDTH];
                for (column, cell) in cells.iter_mut().enumerate() {
                    *cell = window.get(offset + column);
                }
                Row::Hex(HexRow {
                    address: page_base + offset as u64,
                    cells,
                })
            })
            .collect();
        Ok(rows)
    }

    pub fn locate(&self, page: &Page, address: u64) -> Option<(usize, usize)> {
        let offset = address.checked_sub(page.base())?;
        let row = offset / HEX_ROW_WIDTH as u64;
        if row >= page.capacity() as u64 {
            return None;
        }
        Some((row as usize, (offset % HEX_ROW_WIDTH as u64) as usize))
    }

    /// Page base used when the view has to jump: the row holding `address`,
    /// pulled back so that a jump near the end still fills the screen.
    pub fn anchor_for(&self, address: u64, total_size: u64, row_count: usize) -> u64 {
        let width = HEX_ROW_WIDTH as u64;
        let aligned = address - address % width;
        let tail = (total_size - total_size % width)
            .saturating_sub(row_count.saturating_sub(1) as u64 * width);
        std::cmp::min(aligned, tail)
    }
}
