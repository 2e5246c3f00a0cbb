/// Rows above the body: title, status and column ruler.
pub const HEADER_ROWS: usize = 3;
/// Rows below the body: the function-key menu.
pub const MENU_ROWS: usize = 1;

const DEFAULT_VISIBLE_ROWS: usize = 20;

/// What part of the file is on screen and where the cursor sits in it.
///
/// Only the navigation engine moves a viewport, and it always sets the page,
/// the cursor and the derived address together through [`Viewport::place`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    page_address: u64,
    cursor_row: usize,
    cursor_col: usize,
    current_address: u64,
    visible_rows: usize,
}

impl Viewport {
    pub fn new(page_address: u64) -> Viewport {
        Viewport {
            page_address,
            cursor_row: 0,
            cursor_col: 0,
            current_address: page_address,
            visible_rows: DEFAULT_VISIBLE_ROWS,
        }
    }

    pub fn page_address(&self) -> u64 {
        self.page_address
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    pub fn current_address(&self) -> u64 {
        self.current_address
    }

    pub fn visible_row_count(&self) -> usize {
        self.visible_rows
    }

    /// Body rows left by a terminal `height` rows tall; never less than one.
    pub fn rows_for_height(height: u16) -> usize {
        std::cmp::max(1, (height as usize).saturating_sub(HEADER_ROWS + MENU_ROWS))
    }

    /// Resamples the visible row count. Returns whether it changed, in which
    /// case the cursor has to be reconciled by the engine.
    pub fn resize(&mut self, terminal_height: u16) -> bool {
        let rows = Viewport::rows_for_height(terminal_height);
        if rows == self.visible_rows {
            return false;
        }
        self.visible_rows = rows;
        true
    }

    pub fn set_visible_row_count(&mut self, rows: usize) {
        self.visible_rows = std::cmp::max(1, rows);
    }

    pub(crate) fn place(&mut self, page_address: u64, row: usize, col: usize, address: u64) {
        self.page_address = page_address;
        self.cursor_row = row;
        self.cursor_col = col;
        self.current_address = address;
    }

    /// Moves the page start without touching the cursor. Callers reconcile
    /// right after.
    pub(crate) fn rebase(&mut self, page_address: u64) {
        self.page_address = page_address;
    }

    /// Position of the cursor through the file, one decimal, `0.0%` for an
    /// empty file.
    pub fn percentage(&self, total_size: u64) -> String {
        if total_size == 0 {
            return "0.0%".to_string();
        }
        let ratio = 100.0 * self.current_address as f64 / total_size as f64;
        format!("{:.1}%", ratio)
    }
}
