use std::borrow::Cow;

use crossterm::event::{Event, KeyCode};
use lazy_static::lazy_static;

use crate::error::Result;
use crate::keymap::KeyMap;
use crate::modes::{
    mode::{Mode, ModeTransition},
    normal::Normal,
};
use crate::navigation::Direction;
use crate::session::Session;

/// Waits for one direction key and jumps to that boundary: file start or
/// end for up/down, row start or end for left/right.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct JumpTo {}

fn default_maps() -> KeyMap<Direction> {
    KeyMap {
        maps: keys!(
            (key KeyCode::Left => Direction::Left),
            ('h' => Direction::Left),
            (key KeyCode::Down => Direction::Down),
            ('j' => Direction::Down),
            (key KeyCode::Up => Direction::Up),
            ('k' => Direction::Up),
            (key KeyCode::Right => Direction::Right),
            ('l' => Direction::Right)
        ),
    }
}

lazy_static! {
    static ref DEFAULT_MAPS: KeyMap<Direction> = default_maps();
}

impl Mode for JumpTo {
    fn name(&self) -> Cow<'static, str> {
        "JUMP".into()
    }

    fn transition(&self, evt: &Event, session: &mut Session) -> Result<Option<ModeTransition>> {
        if let Some(direction) = DEFAULT_MAPS.event_to_action(evt) {
            session.jump_to_boundary(direction)?;
            Ok(Some(ModeTransition::new_mode(Normal::new())))
        } else if let Event::Key(_) = evt {
            Ok(Some(ModeTransition::new_mode(Normal::new())))
        } else {
            Ok(None)
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
