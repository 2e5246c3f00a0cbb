use std::borrow::Cow;

use crossterm::event::Event;

use crate::error::Result;
use crate::modes::mode::{Mode, ModeTransition};
use crate::session::Session;

pub struct Quitting();

impl Mode for Quitting {
    fn name(&self) -> Cow<'static, str> {
        "QUITTING".into()
    }

    fn transition(&self, _: &Event, _: &mut Session) -> Result<Option<ModeTransition>> {
        Ok(None)
    }

    fn takes_input(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
