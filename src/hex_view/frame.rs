//! Builds one screenful of draw instructions from a session.
//!
//! Nothing here touches the terminal, so a frame can be checked in tests
//! cell by cell. The view replays [`Frame::ops`] with crossterm.

use std::cmp;

use crate::error::Result;
use crate::session::Session;
use crate::view_mode::{Glyph, ModeKind, Page, Row, RowText, HEX_ROW_WIDTH};
use crate::viewport::HEADER_ROWS;

use super::{format_size, Style};

const HEX_COLUMN: u16 = 11;
const ASCII_COLUMN: u16 = 64;
const INSTRUCTION_COLUMN: u16 = 40;
/// Instruction bytes that fit between the address and the text columns.
const CODE_BYTES_SHOWN: usize = ((INSTRUCTION_COLUMN - HEX_COLUMN) / 2) as usize;

const MENU: [(&str, &str); 10] = [
    ("1", "      "),
    (" 2", "      "),
    (" 3", "      "),
    (" 4", "Mode  "),
    (" 5", "Goto  "),
    (" 6", "      "),
    (" 7", "      "),
    (" 8", "      "),
    (" 9", "      "),
    ("10", "Quit  "),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOp {
    pub row: u16,
    pub col: u16,
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frame {
    pub ops: Vec<DrawOp>,
    /// `(col, row)` of the terminal caret, when it is on screen.
    pub caret: Option<(u16, u16)>,
    width: u16,
    height: u16,
}

impl Frame {
    fn new(width: u16, height: u16) -> Frame {
        Frame {
            width,
            height,
            ..Frame::default()
        }
    }

    /// Queues `text` at `(row, col)`, clipped to the terminal.
    fn put(&mut self, row: u16, col: u16, text: impl Into<String>, style: Style) {
        if row >= self.height || col >= self.width {
            return;
        }
        let room = (self.width - col) as usize;
        let text: String = text.into().chars().take(room).collect();
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp {
            row,
            col,
            text,
            style,
        });
    }

    /// Queues `text` padded with spaces to the full width.
    fn put_line(&mut self, row: u16, text: &str, style: Style) {
        let line = format!("{:<width$}", text, width = self.width as usize);
        self.put(row, 0, line, style);
    }

    fn place_caret(&mut self, col: u16, row: u16) {
        if col < self.width && row < self.height {
            self.caret = Some((col, row));
        }
    }

    /// Text found at `row`, with gaps between ops filled by spaces.
    pub fn row_text(&self, row: u16) -> String {
        let mut line: Vec<char> = Vec::new();
        for op in self.ops.iter().filter(|op| op.row == row) {
            let start = op.col as usize;
            for (i, c) in op.text.chars().enumerate() {
                if line.len() <= start + i {
                    line.resize(start + i + 1, ' ');
                }
                line[start + i] = c;
            }
        }
        line.into_iter().collect::<String>().trim_end().to_string()
    }
}

pub struct FrameRenderer {
    width: u16,
    height: u16,
}

impl FrameRenderer {
    pub fn new(width: u16, height: u16) -> FrameRenderer {
        FrameRenderer { width, height }
    }

    /// Lays out the whole screen. The page is materialized exactly once.
    pub fn render(&self, session: &Session, info: Option<&str>) -> Result<Frame> {
        let viewport = session.viewport();
        let page = session.mode().decode_rows(
            session.space(),
            viewport.page_address(),
            viewport.visible_row_count(),
        )?;

        let mut frame = Frame::new(self.width, self.height);
        self.header(&mut frame, session);
        match session.mode().kind() {
            ModeKind::Hex => self.hex_body(&mut frame, session, &page),
            ModeKind::Code => self.code_body(&mut frame, session, &page),
        }
        self.menu(&mut frame, info);
        Ok(frame)
    }

    fn header(&self, frame: &mut Frame, session: &Session) {
        let viewport = session.viewport();
        let total = session.space().size();
        let current = viewport.current_address();

        frame.put_line(
            0,
            &format!(
                "Selected : {:08X}h -= hexitch v{} =- {}",
                current,
                env!("CARGO_PKG_VERSION"),
                format_size(total)
            ),
            Style::Title,
        );
        frame.put_line(
            1,
            &format!(
                "{:08X}/{:08X}  {:<4}  {:>6}  {}",
                current,
                total,
                session.mode().name(),
                viewport.percentage(total),
                session.space().name()
            ),
            Style::Status,
        );
    }

    fn hex_body(&self, frame: &mut Frame, session: &Session, page: &Page) {
        let viewport = session.viewport();
        let cursor_row = viewport.cursor_row();
        let cursor_col = viewport.cursor_col();

        for column in 0..HEX_ROW_WIDTH {
            let style = if column == cursor_col {
                Style::RulerActive
            } else {
                Style::Ruler
            };
            frame.put(2, hex_cell_column(column), format!("{:02X}", column), style);
            frame.put(2, ASCII_COLUMN + column as u16, format!("{:X}", column), style);
        }

        for index in 0..viewport.visible_row_count() {
            let screen_row = (HEADER_ROWS + index) as u16;
            let row = match page.rows().get(index) {
                Some(Row::Hex(row)) => Some(row),
                _ => None,
            };
            // end-of-file can leave the cursor on a row with no bytes
            if row.is_none() && index != cursor_row {
                continue;
            }

            let address = page.base() + (index * HEX_ROW_WIDTH) as u64;
            let active = index == cursor_row;
            frame.put(
                screen_row,
                0,
                format!("{:08X}", address),
                if active { Style::AddressActive } else { Style::Address },
            );

            let cells = match row {
                Some(row) => row.cells,
                None => continue,
            };
            for (column, cell) in cells.iter().enumerate() {
                let byte = match cell {
                    Some(byte) => *byte,
                    None => continue,
                };
                let style = if active && column == cursor_col {
                    Style::Caret
                } else if active {
                    Style::ByteActive
                } else {
                    Style::Byte
                };
                frame.put(screen_row, hex_cell_column(column), format!("{:02X}", byte), style);
                frame.put(
                    screen_row,
                    ASCII_COLUMN + column as u16,
                    Glyph::of(byte).as_char().to_string(),
                    style,
                );
            }
        }

        frame.place_caret(
            hex_cell_column(cursor_col),
            (HEADER_ROWS + cursor_row) as u16,
        );
    }

    fn code_body(&self, frame: &mut Frame, session: &Session, page: &Page) {
        let viewport = session.viewport();
        let cursor_row = viewport.cursor_row();
        let cursor_col = viewport.cursor_col();

        frame.put(2, 0, "<Active>", Style::RulerActive);
        frame.put(2, HEX_COLUMN, "Bytes", Style::Ruler);
        frame.put(2, INSTRUCTION_COLUMN, "Instruction", Style::Ruler);

        if page.rows().is_empty() {
            frame.put(
                HEADER_ROWS as u16,
                0,
                format!("{:08X}", page.base()),
                Style::AddressActive,
            );
        }

        for (index, row) in page.rows().iter().enumerate() {
            let row = match row {
                Row::Code(row) => row,
                Row::Hex(_) => continue,
            };
            let screen_row = (HEADER_ROWS + index) as u16;
            let active = index == cursor_row;
            frame.put(
                screen_row,
                0,
                format!("{:08X}", row.address),
                if active { Style::AddressActive } else { Style::Address },
            );

            for (i, byte) in row.bytes.iter().take(CODE_BYTES_SHOWN).enumerate() {
                let style = if active && i == cursor_col {
                    Style::Caret
                } else if active {
                    Style::ByteActive
                } else {
                    Style::Byte
                };
                frame.put(screen_row, HEX_COLUMN + 2 * i as u16, format!("{:02X}", byte), style);
            }

            match &row.text {
                RowText::Decoded(text) => frame.put(
                    screen_row,
                    INSTRUCTION_COLUMN,
                    text.as_str(),
                    if active {
                        Style::InstructionActive
                    } else {
                        Style::Instruction
                    },
                ),
                RowText::Undecodable => {
                    frame.put(screen_row, INSTRUCTION_COLUMN, "(bad)", Style::Undecodable)
                }
            }
        }

        let shown = cmp::min(cursor_col, CODE_BYTES_SHOWN);
        frame.place_caret(
            HEX_COLUMN + 2 * shown as u16,
            (HEADER_ROWS + cursor_row) as u16,
        );
    }

    fn menu(&self, frame: &mut Frame, info: Option<&str>) {
        let row = self.height.saturating_sub(1);
        if let Some(info) = info {
            frame.put_line(row, info, Style::Info);
            return;
        }

        let mut col = 0u16;
        for (key, label) in MENU.iter() {
            frame.put(row, col, *key, Style::MenuKey);
            col += key.len() as u16;
            frame.put(row, col, *label, Style::MenuLabel);
            col += label.len() as u16;
        }
        if col < self.width {
            frame.put(row, col, " ".repeat((self.width - col) as usize), Style::MenuLabel);
        }
    }
}

fn hex_cell_column(column: usize) -> u16 {
    HEX_COLUMN + 3 * column as u16 + column as u16 / 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_space::AddressSpace;
    use crate::decoder::testing::ScriptedDecoder;
    use crate::decoder::Decoder;
    use std::rc::Rc;

    fn session_with(bytes: Vec<u8>, kind: ModeKind) -> (Session, Rc<ScriptedDecoder>) {
        let decoder = Rc::new(ScriptedDecoder::default());
        let session = Session::new(
            AddressSpace::from_bytes(bytes),
            decoder.clone() as Rc<dyn Decoder>,
            kind,
            0,
            4,
        )
        .unwrap();
        (session, decoder)
    }

    #[test]
    fn hex_frame_layout() {
        let (mut session, _) = session_with(b"Hello, hexitch!\x00\x01".to_vec(), ModeKind::Hex);
        session.jump_to(5).unwrap();
        let frame = FrameRenderer::new(80, 8).render(&session, None).unwrap();

        assert!(frame
            .row_text(0)
            .starts_with("Selected : 00000005h -= hexitch v"));
        assert!(frame.row_text(0).ends_with("=- 17"));
        assert_eq!(
            frame.row_text(1),
            "00000005/00000011  Hex    29.4%  *memory*"
        );
        assert_eq!(
            frame.row_text(3),
            "00000000   48 65 6C 6C  6F 2C 20 68  65 78 69 74  63 68 21 00   Hello, hexitch!."
        );
        assert_eq!(frame.row_text(4), format!("00000010   01{:51}.", ""));
        // caret on the sixth byte
        assert_eq!(frame.caret, Some((11 + 3 * 5 + 1, 3)));

        let caret = frame
            .ops
            .iter()
            .find(|op| op.style == Style::Caret && op.col == 27)
            .unwrap();
        assert_eq!(caret.text, "2C");
    }

    #[test]
    fn code_frame_layout() {
        let (mut session, _) = session_with(vec![2, 0, 0xff, 1], ModeKind::Code);
        session.jump_to(1).unwrap();
        let frame = FrameRenderer::new(80, 8).render(&session, None).unwrap();

        assert!(frame.row_text(2).starts_with("<Active>   Bytes"));
        assert_eq!(frame.row_text(3), format!("00000000   0200{:25}op2", ""));
        assert_eq!(frame.row_text(4), format!("00000002   FF{:27}(bad)", ""));
        assert_eq!(frame.caret, Some((13, 3)));
    }

    #[test]
    fn one_decode_per_frame() {
        let (session, decoder) = session_with(vec![1; 64], ModeKind::Code);
        let before = decoder.calls.get();
        FrameRenderer::new(80, 8).render(&session, None).unwrap();
        assert_eq!(decoder.calls.get(), before + 1);
    }

    #[test]
    fn empty_file() {
        let (session, _) = session_with(Vec::new(), ModeKind::Hex);
        let frame = FrameRenderer::new(80, 8).render(&session, None).unwrap();
        assert!(frame.row_text(1).contains(" 0.0%"));
        assert_eq!(frame.row_text(3), "00000000");
        assert_eq!(frame.caret, Some((11, 3)));

        let (session, _) = session_with(Vec::new(), ModeKind::Code);
        let frame = FrameRenderer::new(80, 8).render(&session, None).unwrap();
        assert!(frame.row_text(1).contains(" 0.0%"));
        assert_eq!(frame.row_text(3), "00000000");
    }

    #[test]
    fn text_is_clipped_to_width() {
        let (session, _) = session_with(vec![0x41; 64], ModeKind::Hex);
        let frame = FrameRenderer::new(30, 8)
            .render(&session, Some("a very long info message that overflows"))
            .unwrap();
        assert!(frame.ops.iter().all(|op| op.col as usize + op.text.chars().count() <= 30));
        assert_eq!(frame.row_text(7), "a very long info message that");
    }

    #[test]
    fn menu_shows_function_keys() {
        let (session, _) = session_with(vec![0; 16], ModeKind::Hex);
        let frame = FrameRenderer::new(80, 8).render(&session, None).unwrap();
        let menu = frame.row_text(7);
        assert!(menu.starts_with("1       2       3       4Mode   5Goto"));
        assert!(menu.contains("10Quit"));
    }
}
