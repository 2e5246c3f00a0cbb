use std::borrow::Cow;

use crossterm::event::Event;

use crate::error::Result;
use crate::session::Session;

/// An input mode: decides what a terminal event does to the session and
/// which mode handles the next one.
pub trait Mode {
    fn name(&self) -> Cow<'static, str>;

    /// `Ok(None)` means the mode did not handle `evt`.
    fn transition(&self, evt: &Event, session: &mut Session) -> Result<Option<ModeTransition>>;

    fn takes_input(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any;
}

pub enum ModeTransition {
    None,
    NewMode(Box<dyn Mode>),
    ModeAndInfo(Box<dyn Mode>, String),
}

impl ModeTransition {
    pub fn new_mode(mode: impl Mode + 'static) -> ModeTransition {
        ModeTransition::NewMode(Box::new(mode))
    }

    pub fn new_mode_and_info(mode: impl Mode + 'static, info: String) -> ModeTransition {
        ModeTransition::ModeAndInfo(Box::new(mode), info)
    }
}
