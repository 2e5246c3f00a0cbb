use std::borrow::Cow;
use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use lazy_static::lazy_static;
use maplit::hashmap;

use crate::address_space::parse_address;
use crate::error::{HexitchError, Result};
use crate::keymap::KeyMap;
use crate::modes::{
    mode::{Mode, ModeTransition},
    normal::Normal,
};
use crate::session::Session;

pub struct Command {
    pub command: String,
    pub cursor: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Action {
    RemoveLast,
    RemoveThis,
    CursorLeft,
    CursorRight,
    Finish,
    Cancel,
}

fn default_maps() -> KeyMap<Action> {
    KeyMap {
        maps: keys!(
            (key KeyCode::Backspace => Action::RemoveLast),
            (key KeyCode::Delete => Action::RemoveThis),
            (key KeyCode::Enter => Action::Finish),
            (key KeyCode::Esc => Action::Cancel),
            (key KeyCode::Left => Action::CursorLeft),
            (key KeyCode::Right => Action::CursorRight)
        ),
    }
}

mod cmd {
    use super::*;
    use crate::modes::quitting;
    use crate::view_mode::ModeKind;

    pub fn quit(_: &mut Session, _: &str) -> Result<ModeTransition> {
        Ok(ModeTransition::new_mode(quitting::Quitting()))
    }

    pub fn goto(session: &mut Session, argument: &str) -> Result<ModeTransition> {
        match parse_address(argument) {
            Ok(address) => {
                session.jump_to(address)?;
                Ok(ModeTransition::new_mode(Normal::new()))
            }
            Err(HexitchError::InvalidAddress(text)) if text.trim().is_empty() => Ok(
                ModeTransition::new_mode_and_info(Normal::new(), "goto needs an address".into()),
            ),
            Err(e) => Ok(ModeTransition::new_mode_and_info(
                Normal::new(),
                e.to_string(),
            )),
        }
    }

    pub fn hex(session: &mut Session, _: &str) -> Result<ModeTransition> {
        session.set_mode(ModeKind::Hex)?;
        Ok(ModeTransition::new_mode(Normal::new()))
    }

    pub fn code(session: &mut Session, _: &str) -> Result<ModeTransition> {
        session.set_mode(ModeKind::Code)?;
        Ok(ModeTransition::new_mode(Normal::new()))
    }

    pub fn toggle(session: &mut Session, _: &str) -> Result<ModeTransition> {
        session.toggle_mode()?;
        Ok(ModeTransition::new_mode(Normal::new()))
    }
}

type CommandHandler = fn(&mut Session, &str) -> Result<ModeTransition>;

macro_rules! make_commands {
    ($($string:tt => $cmd:ident,)*) => {
        hashmap![
            $($string.to_string() => (cmd::$cmd as CommandHandler),)*
        ]
    }
}

fn default_commands() -> HashMap<String, CommandHandler> {
    make_commands![
        "q" => quit,
        "quit" => quit,
        "g" => goto,
        "goto" => goto,
        "hex" => hex,
        "code" => code,
        "mode" => toggle,
    ]
}

lazy_static! {
    static ref DEFAULT_MAPS: KeyMap<Action> = default_maps();
    static ref DEFAULT_COMMANDS: HashMap<String, CommandHandler> = default_commands();
}

impl Command {
    pub fn new() -> Command {
        Command {
            cursor: 0,
            command: String::new(),
        }
    }

    /// A prompt pre-filled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Command {
        Command {
            cursor: text.len(),
            command: text.to_string(),
        }
    }

    fn finish(&self, session: &mut Session) -> Result<ModeTransition> {
        let line = self.command.trim();
        if line.is_empty() {
            return Ok(ModeTransition::new_mode(Normal::new()));
        }
        let (name, rest) = line.split_at(line.find(' ').unwrap_or(line.len()));
        if let Some(handler) = DEFAULT_COMMANDS.get(name) {
            handler(session, rest.trim_start())
        } else if parse_address(line).is_ok() {
            cmd::goto(session, line)
        } else {
            Ok(ModeTransition::new_mode_and_info(
                Normal::new(),
                format!("Unknown command {}", name),
            ))
        }
    }
}

impl Default for Command {
    fn default() -> Command {
        Command::new()
    }
}

impl Mode for Command {
    fn name(&self) -> Cow<'static, str> {
        "COMMAND".into()
    }

    fn transition(&self, evt: &Event, session: &mut Session) -> Result<Option<ModeTransition>> {
        if let Some(action) = DEFAULT_MAPS.event_to_action(evt) {
            let mut cursor = self.cursor;
            let mut command = self.command.to_owned();

            match action {
                Action::RemoveLast if cursor != 0 => {
                    command.remove(cursor - 1);
                    cursor -= 1;
                }
                Action::RemoveLast => return Ok(Some(ModeTransition::None)),
                Action::RemoveThis if cursor < command.len() => {
                    command.remove(cursor);
                }
                Action::RemoveThis => {}
                Action::CursorLeft if cursor != 0 => {
                    cursor -= 1;
                }
                Action::CursorLeft => {}
                Action::CursorRight if cursor < command.len() => {
                    cursor += 1;
                }
                Action::CursorRight => {}
                Action::Cancel => return Ok(Some(ModeTransition::new_mode(Normal::new()))),
                Action::Finish => return self.finish(session).map(Some),
            }
            Ok(Some(ModeTransition::new_mode(Command { command, cursor })))
        } else if let Event::Key(KeyEvent {
            code: KeyCode::Char(ch),
            modifiers,
        }) = evt
        {
            // the prompt is indexed by byte
            if !(*modifiers & !KeyModifiers::SHIFT).is_empty() || !ch.is_ascii() {
                return Ok(None);
            }
            let mut command = self.command.to_owned();
            let mut cursor = self.cursor;
            command.insert(cursor, *ch);
            cursor += 1;
            Ok(Some(ModeTransition::new_mode(Command { command, cursor })))
        } else {
            Ok(None)
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::testing::{ch, hex_session, key};
    use crate::view_mode::ModeKind;

    /// Feeds `text` then Enter through the prompt, following mode changes.
    fn run(session: &mut Session, text: &str) -> Option<String> {
        let mut prompt = Command::new();
        for c in text.chars() {
            match prompt.transition(&ch(c), session).unwrap() {
                Some(ModeTransition::NewMode(mode)) => {
                    let next = mode.as_any().downcast_ref::<Command>().unwrap();
                    prompt = Command::with_text(&next.command);
                }
                _ => panic!("typing should stay in the prompt"),
            }
        }
        match prompt.transition(&key(KeyCode::Enter), session).unwrap() {
            Some(ModeTransition::ModeAndInfo(_, info)) => Some(info),
            Some(_) => None,
            None => panic!("enter was not handled"),
        }
    }

    #[test]
    fn goto_moves_cursor() {
        let mut session = hex_session(0x1000);
        assert_eq!(run(&mut session, "goto 0x800"), None);
        assert_eq!(session.viewport().current_address(), 0x800);

        assert_eq!(run(&mut session, "g #16"), None);
        assert_eq!(session.viewport().current_address(), 0x10);
    }

    #[test]
    fn bare_address_is_a_goto() {
        let mut session = hex_session(0x1000);
        assert_eq!(run(&mut session, "3f0"), None);
        assert_eq!(session.viewport().current_address(), 0x3f0);
    }

    #[test]
    fn mode_commands() {
        let mut session = hex_session(0x100);
        run(&mut session, "code");
        assert_eq!(session.mode().kind(), ModeKind::Code);
        run(&mut session, "mode");
        assert_eq!(session.mode().kind(), ModeKind::Hex);
    }

    #[test]
    fn errors_become_info_messages() {
        let mut session = hex_session(0x100);
        assert_eq!(
            run(&mut session, "frobnicate").as_deref(),
            Some("Unknown command frobnicate")
        );
        assert_eq!(
            run(&mut session, "goto zz").as_deref(),
            Some("invalid address: \"zz\"")
        );
        assert_eq!(
            run(&mut session, "goto").as_deref(),
            Some("goto needs an address")
        );
    }

    #[test]
    fn editing_keys() {
        let mut session = hex_session(0x100);
        let prompt = Command::with_text("goto");
        let next = |prompt: &Command, evt, session: &mut Session| match prompt
            .transition(&evt, session)
            .unwrap()
        {
            Some(ModeTransition::NewMode(mode)) => {
                let next = mode.as_any().downcast_ref::<Command>().unwrap();
                Command {
                    command: next.command.clone(),
                    cursor: next.cursor,
                }
            }
            _ => panic!("expected to stay in the prompt"),
        };

        let prompt = next(&prompt, key(KeyCode::Left), &mut session);
        let prompt = next(&prompt, key(KeyCode::Backspace), &mut session);
        assert_eq!(prompt.command, "goo");
        assert_eq!(prompt.cursor, 2);

        let prompt = next(&prompt, key(KeyCode::Delete), &mut session);
        assert_eq!(prompt.command, "go");

        // nothing under the cursor at the end of the line
        let prompt = next(&prompt, key(KeyCode::Delete), &mut session);
        assert_eq!(prompt.command, "go");
    }
}
