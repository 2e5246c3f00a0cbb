//! The two ways of laying a page of bytes out in rows.
//!
//! Hex rows are always 16 bytes wide. Code rows are one instruction each, so
//! their widths are only known once the page has been decoded. Both go
//! through the same capability set so the navigation engine never needs to
//! know which one is active beyond picking its movement deltas.

pub mod code;
pub mod hex;

use std::rc::Rc;

use crate::address_space::AddressSpace;
use crate::decoder::Decoder;
use crate::error::Result;

pub use self::code::{CodeMode, CodeRow, RowText};
pub use self::hex::{Glyph, HexMode, HexRow, HEX_ROW_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Hex,
    Code,
}

#[derive(Clone)]
pub enum ViewMode {
    Hex(HexMode),
    Code(CodeMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Hex(HexRow),
    Code(CodeRow),
}

impl Row {
    pub fn address(&self) -> u64 {
        match self {
            Row::Hex(row) => row.address,
            Row::Code(row) => row.address,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Row::Hex(_) => HEX_ROW_WIDTH,
            Row::Code(row) => std::cmp::max(1, row.length),
        }
    }
}

/// One materialization batch: the rows decoded from `base` for a view that
/// can show `capacity` of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    base: u64,
    capacity: usize,
    total_size: u64,
    rows: Vec<Row>,
}

impl Page {
    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// First address after the last decoded row.
    pub fn end(&self) -> u64 {
        self.base + self.rows.iter().map(|row| row.width() as u64).sum::<u64>()
    }

    /// Whether the decoded rows run up to the end of the file.
    pub fn reaches_end(&self) -> bool {
        self.end() == self.total_size
    }
}

impl ViewMode {
    pub fn hex() -> ViewMode {
        ViewMode::Hex(HexMode)
    }

    pub fn code(decoder: Rc<dyn Decoder>) -> ViewMode {
        ViewMode::Code(CodeMode::new(decoder))
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            ViewMode::Hex(_) => ModeKind::Hex,
            ViewMode::Code(_) => ModeKind::Code,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Hex(_) => "Hex",
            ViewMode::Code(_) => "Code",
        }
    }

    pub fn decode_rows(
        &self,
        space: &AddressSpace,
        page_base: u64,
        row_count: usize,
    ) -> Result<Page> {
        let rows = match self {
            ViewMode::Hex(mode) => mode.decode_rows(space, page_base, row_count)?,
            ViewMode::Code(mode) => mode.decode_rows(space, page_base, row_count)?,
        };
        Ok(Page {
            base: page_base,
            capacity: row_count,
            total_size: space.size(),
            rows,
        })
    }

    /// Bytes consumed by row `row_index` of `page`.
    ///
    /// Code rows that were not decoded in this batch count as one byte, the
    /// minimum width, so the cursor can never get stuck on them.
    pub fn row_width_at(&self, page: &Page, row_index: usize) -> usize {
        match self {
            ViewMode::Hex(_) => HEX_ROW_WIDTH,
            ViewMode::Code(_) => page.rows.get(row_index).map_or(1, Row::width),
        }
    }

    /// Sum of the widths of the rows before `row_index`.
    pub fn span(&self, page: &Page, row_index: usize) -> u64 {
        match self {
            ViewMode::Hex(_) => (row_index * HEX_ROW_WIDTH) as u64,
            ViewMode::Code(_) => {
                let decoded = std::cmp::min(row_index, page.rows.len());
                let known: u64 = page.rows[..decoded]
                    .iter()
                    .map(|row| row.width() as u64)
                    .sum();
                known + (row_index - decoded) as u64
            }
        }
    }

    /// Row and column of `address` on `page`, if it is visible there.
    pub fn locate(&self, page: &Page, address: u64) -> Option<(usize, usize)> {
        match self {
            ViewMode::Hex(mode) => mode.locate(page, address),
            ViewMode::Code(mode) => mode.locate(page, address),
        }
    }

    /// Where a page should start when the view jumps to `address`.
    pub fn anchor_for(&self, address: u64, total_size: u64, row_count: usize) -> u64 {
        match self {
            ViewMode::Hex(mode) => mode.anchor_for(address, total_size, row_count),
            ViewMode::Code(_) => address,
        }
    }
}
