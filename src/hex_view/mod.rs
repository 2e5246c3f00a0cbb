use std::collections::HashMap;

use crossterm::style::{Color, ContentStyle, Stylize};
use maplit::hashmap;

pub mod frame;
pub mod view;

/// Roles a piece of screen text can play; the colorizer turns them into
/// terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Title,
    Status,
    Ruler,
    RulerActive,
    Address,
    AddressActive,
    Byte,
    ByteActive,
    Caret,
    Instruction,
    InstructionActive,
    Undecodable,
    MenuKey,
    MenuLabel,
    Info,
    Prompt,
}

pub struct OutputColorizer {
    styles: HashMap<Style, ContentStyle>,
}

impl OutputColorizer {
    pub fn new() -> OutputColorizer {
        let on_black = |fg: Color| ContentStyle::new().with(fg).on(Color::Black);
        OutputColorizer {
            styles: hashmap! {
                Style::Title => ContentStyle::new().with(Color::White).on(Color::Blue),
                Style::Status => ContentStyle::new().with(Color::White).on(Color::DarkRed),
                Style::Ruler => on_black(Color::DarkBlue),
                Style::RulerActive => on_black(Color::Blue),
                Style::Address => on_black(Color::DarkBlue),
                Style::AddressActive => on_black(Color::Blue),
                Style::Byte => on_black(Color::DarkGrey),
                Style::ByteActive => on_black(Color::Grey),
                Style::Caret => ContentStyle::new().with(Color::Black).on(Color::White),
                Style::Instruction => on_black(Color::DarkGrey),
                Style::InstructionActive => on_black(Color::White),
                Style::Undecodable => on_black(Color::DarkYellow),
                Style::MenuKey => on_black(Color::White),
                Style::MenuLabel => ContentStyle::new().with(Color::Black).on(Color::DarkCyan),
                Style::Info => ContentStyle::new().with(Color::White).on(Color::Blue),
                Style::Prompt => ContentStyle::new().with(Color::White).on(Color::Blue),
            },
        }
    }

    pub fn style(&self, style: Style) -> ContentStyle {
        self.styles.get(&style).copied().unwrap_or_default()
    }
}

impl Default for OutputColorizer {
    fn default() -> OutputColorizer {
        OutputColorizer::new()
    }
}

/// File size for the title line: `G`, `M` and `k` with one decimal, plain
/// bytes up to 1k.
pub fn format_size(size: u64) -> String {
    const KIB: f64 = 1024.0;
    let bytes = size as f64;
    if size > 1 << 30 {
        format!("{:.1}G", bytes / (KIB * KIB * KIB))
    } else if size > 1 << 20 {
        format!("{:.1}M", bytes / (KIB * KIB))
    } else if size > 1 << 10 {
        format!("{:.1}k", bytes / KIB)
    } else {
        size.to_string()
    }
}
