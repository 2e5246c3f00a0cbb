#[macro_use]
mod keymap;

pub mod address_space;
pub mod config;
pub mod decoder;
pub mod error;
pub mod hex_view;
pub mod logging;
pub mod modes;
pub mod navigation;
pub mod session;
pub mod view_mode;
pub mod viewport;

pub use address_space::{parse_address, AddressSpace, Window};
pub use decoder::{DecodeItem, Decoder, IcedDecoder, Instruction};
pub use error::{HexitchError, Result};
pub use navigation::{Direction, NavigationEngine};
pub use session::Session;
pub use view_mode::{ModeKind, ViewMode, HEX_ROW_WIDTH};
pub use viewport::Viewport;
