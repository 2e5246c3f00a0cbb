//! Cursor movement and paging.
//!
//! Every step works on a flattened column: the movement delta is added to the
//! cursor column, overflow in either direction turns into row movement, and
//! row movement past the top or bottom of the view turns into paging. The
//! resulting address is clamped to the end of the file and the cursor is
//! re-derived from it, so `current_address` can never leave
//! `[page_address, total_size]`.

use std::cmp;
use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::address_space::AddressSpace;
use crate::error::Result;
use crate::view_mode::{Page, ViewMode, HEX_ROW_WIDTH};
use crate::viewport::Viewport;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

const SCROLL_BACK_LIMIT: usize = 1 << 16;

#[derive(Debug, Default, Clone)]
pub struct NavigationEngine {
    // Page addresses left behind while scrolling forward in code mode, most
    // recent last. Instruction starts cannot be found by decoding backwards,
    // so this is the only record of the width of the row above the page.
    scroll_back: VecDeque<u64>,
}

impl NavigationEngine {
    pub fn new() -> NavigationEngine {
        NavigationEngine::default()
    }

    /// Forgets recorded row widths; needed whenever the page moves other than
    /// one row at a time.
    pub fn reset(&mut self) {
        self.scroll_back.clear();
    }

    pub fn apply(
        &mut self,
        viewport: &mut Viewport,
        mode: &ViewMode,
        space: &AddressSpace,
        direction: Direction,
    ) -> Result<()> {
        let total = space.size();
        let visible = viewport.visible_row_count();
        let mut page_address = viewport.page_address();
        let mut page = mode.decode_rows(space, page_address, visible)?;

        let row = viewport.cursor_row();
        let col = viewport.cursor_col() as i64;
        let width = mode.row_width_at(&page, row) as i64;
        let back_width = self.back_width(mode, page_address);

        let delta = match (mode, direction) {
            (_, Direction::Left) => -1,
            (_, Direction::Right) => 1,
            (ViewMode::Hex(_), Direction::Up) => -(HEX_ROW_WIDTH as i64),
            (ViewMode::Hex(_), Direction::Down) => HEX_ROW_WIDTH as i64,
            (ViewMode::Code(_), Direction::Up) => {
                if row == 0 && page_address == 0 {
                    trace!("already on the first instruction");
                    return Ok(());
                }
                let above = if row == 0 {
                    back_width
                } else {
                    mode.row_width_at(&page, row - 1)
                };
                -(col + above as i64)
            }
            (ViewMode::Code(_), Direction::Down) => width - col,
        };

        let (mut row, col) = normalize(mode, &page, row as i64, col + delta, back_width);

        if row < 0 {
            if page_address == 0 {
                trace!(?direction, "top of file");
                return Ok(());
            }
            page_address = self.retreat(mode, page_address, back_width);
            page = mode.decode_rows(space, page_address, visible)?;
            row = 0;
        } else if row as usize >= visible && mode.locate(&page, total).is_none() {
            let leaving = mode.row_width_at(&page, 0);
            page_address = self.advance(mode, page_address, leaving);
            page = mode.decode_rows(space, page_address, visible)?;
            row = visible as i64 - 1;
        }
        // A row still below the view means the end of the file is already on
        // screen: the address runs past it and gets clamped.

        let address = cmp::min(
            page_address + mode.span(&page, row as usize) + col as u64,
            total,
        );
        trace!(?direction, page_address, row, col, address, "step");

        self.settle(viewport, mode, space, page_address, &page, address)
    }

    /// Moves the cursor to `address` (clamped to the end of the file),
    /// keeping the page when the address is already visible.
    pub fn jump_to(
        &mut self,
        viewport: &mut Viewport,
        mode: &ViewMode,
        space: &AddressSpace,
        address: u64,
    ) -> Result<()> {
        let address = cmp::min(address, space.size());
        let page_address = viewport.page_address();
        if address >= page_address {
            let page = mode.decode_rows(space, page_address, viewport.visible_row_count())?;
            if let Some((row, col)) = mode.locate(&page, address) {
                viewport.place(page_address, row, col, address);
                return Ok(());
            }
        }
        self.reanchor(viewport, mode, space, address)
    }

    /// Jumps to the start of the file (`Up`), its end (`Down`), or the first
    /// (`Left`) or last (`Right`) byte of the cursor's row.
    pub fn jump_to_boundary(
        &mut self,
        viewport: &mut Viewport,
        mode: &ViewMode,
        space: &AddressSpace,
        direction: Direction,
    ) -> Result<()> {
        let row_start = viewport.current_address() - viewport.cursor_col() as u64;
        let target = match direction {
            Direction::Up => 0,
            Direction::Down => space.size(),
            Direction::Left => row_start,
            Direction::Right => {
                let page = mode.decode_rows(
                    space,
                    viewport.page_address(),
                    viewport.visible_row_count(),
                )?;
                let width = mode.row_width_at(&page, viewport.cursor_row());
                row_start + width as u64 - 1
            }
        };
        self.jump_to(viewport, mode, space, target)
    }

    /// Re-derives the cursor from the current address after the row count or
    /// the mode changed.
    pub fn reconcile(
        &mut self,
        viewport: &mut Viewport,
        mode: &ViewMode,
        space: &AddressSpace,
    ) -> Result<()> {
        let address = viewport.current_address();
        self.jump_to(viewport, mode, space, address)
    }

    fn back_width(&self, mode: &ViewMode, page_address: u64) -> usize {
        match mode {
            ViewMode::Hex(_) => cmp::min(HEX_ROW_WIDTH as u64, page_address) as usize,
            ViewMode::Code(_) if page_address == 0 => 0,
            ViewMode::Code(_) => match self.scroll_back.back() {
                Some(&previous) if previous < page_address => (page_address - previous) as usize,
                // boundary unknown: back off a single byte
                _ => 1,
            },
        }
    }

    fn retreat(&mut self, mode: &ViewMode, page_address: u64, width: usize) -> u64 {
        let previous = page_address - width as u64;
        if matches!(mode, ViewMode::Code(_)) && self.scroll_back.back() == Some(&previous) {
            self.scroll_back.pop_back();
        }
        debug!(from = page_address, to = previous, "page scrolled back");
        previous
    }

    fn advance(&mut self, mode: &ViewMode, page_address: u64, width: usize) -> u64 {
        if matches!(mode, ViewMode::Code(_)) {
            self.scroll_back.push_back(page_address);
            if self.scroll_back.len() > SCROLL_BACK_LIMIT {
                self.scroll_back.pop_front();
            }
        }
        let next = page_address + width as u64;
        debug!(from = page_address, to = next, "page scrolled forward");
        next
    }

    fn settle(
        &mut self,
        viewport: &mut Viewport,
        mode: &ViewMode,
        space: &AddressSpace,
        page_address: u64,
        page: &Page,
        address: u64,
    ) -> Result<()> {
        match mode.locate(page, address) {
            Some((row, col)) => {
                viewport.place(page_address, row, col, address);
                Ok(())
            }
            None => self.reanchor(viewport, mode, space, address),
        }
    }

    fn reanchor(
        &mut self,
        viewport: &mut Viewport,
        mode: &ViewMode,
        space: &AddressSpace,
        address: u64,
    ) -> Result<()> {
        let visible = viewport.visible_row_count();
        let page_address = mode.anchor_for(address, space.size(), visible);
        self.reset();

        let page = mode.decode_rows(space, page_address, visible)?;
        let (row, col) = mode
            .locate(&page, address)
            .unwrap_or((0, (address - page_address) as usize));

        debug!(address, page_address, "page re-anchored");
        viewport.place(page_address, row, col, address);
        Ok(())
    }
}

/// Turns a flattened column into a row and a non-negative column.
///
/// Negative overflow moves exactly one row up, using `back_width` for the row
/// above the page. Positive overflow walks forward through the row widths.
fn normalize(
    mode: &ViewMode,
    page: &Page,
    mut row: i64,
    mut col: i64,
    back_width: usize,
) -> (i64, usize) {
    if col < 0 {
        row -= 1;
        let above = if row < 0 {
            back_width
        } else {
            mode.row_width_at(page, row as usize)
        };
        return (row, cmp::max(0, col + above as i64) as usize);
    }

    loop {
        let width = mode.row_width_at(page, row as usize) as i64;
        if col < width {
            return (row, col as usize);
        }
        col -= width;
        row += 1;
    }
}
