use std::borrow::Cow;

use crossterm::event::{Event, KeyCode};
use lazy_static::lazy_static;

use crate::error::Result;
use crate::keymap::KeyMap;
use crate::modes::{
    command::Command,
    jumpto::JumpTo,
    mode::{Mode, ModeTransition},
    quitting::Quitting,
};
use crate::navigation::Direction;
use crate::session::Session;

pub struct Normal();

impl Normal {
    pub fn new() -> Normal {
        Normal()
    }
}

impl Default for Normal {
    fn default() -> Normal {
        Normal::new()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Action {
    Move(Direction),
    JumpToMode,
    CommandMode,
    GotoPrompt,
    ToggleViewMode,
    Quit,
}

fn default_maps() -> KeyMap<Action> {
    KeyMap {
        maps: keys!(
            (key KeyCode::Left => Action::Move(Direction::Left)),
            ('h' => Action::Move(Direction::Left)),
            (key KeyCode::Down => Action::Move(Direction::Down)),
            ('j' => Action::Move(Direction::Down)),
            (key KeyCode::Up => Action::Move(Direction::Up)),
            ('k' => Action::Move(Direction::Up)),
            (key KeyCode::Right => Action::Move(Direction::Right)),
            ('l' => Action::Move(Direction::Right)),
            ('g' => Action::JumpToMode),
            (':' => Action::CommandMode),
            (key KeyCode::F(5) => Action::GotoPrompt),
            (key KeyCode::Tab => Action::ToggleViewMode),
            (key KeyCode::F(4) => Action::ToggleViewMode),
            ('q' => Action::Quit),
            (key KeyCode::F(10) => Action::Quit),
            (ctrl 'c' => Action::Quit)
        ),
    }
}

lazy_static! {
    static ref DEFAULT_MAPS: KeyMap<Action> = default_maps();
}

impl Mode for Normal {
    fn name(&self) -> Cow<'static, str> {
        "NORMAL".into()
    }

    fn transition(&self, evt: &Event, session: &mut Session) -> Result<Option<ModeTransition>> {
        let action = match DEFAULT_MAPS.event_to_action(evt) {
            Some(action) => action,
            None => return Ok(None),
        };
        let transition = match action {
            Action::Move(direction) => {
                session.navigate(direction)?;
                ModeTransition::None
            }
            Action::JumpToMode => ModeTransition::new_mode(JumpTo {}),
            Action::CommandMode => ModeTransition::new_mode(Command::new()),
            Action::GotoPrompt => ModeTransition::new_mode(Command::with_text("goto ")),
            Action::ToggleViewMode => {
                session.toggle_mode()?;
                ModeTransition::None
            }
            Action::Quit => ModeTransition::new_mode(Quitting()),
        };
        Ok(Some(transition))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
