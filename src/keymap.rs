use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Builds a `HashMap<KeyEvent, T>` from entries of the form
/// `(key KeyCode::Enter => action)`, `('h' => action)` or
/// `(ctrl 'c' => action)`.
macro_rules! keys {
    (@insert $map:ident, (key $code:expr => $action:expr)) => {
        $map.insert(
            crossterm::event::KeyEvent::new($code, crossterm::event::KeyModifiers::NONE),
            $action,
        );
    };
    (@insert $map:ident, (ctrl $ch:literal => $action:expr)) => {
        $map.insert(
            crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char($ch),
                crossterm::event::KeyModifiers::CONTROL,
            ),
            $action,
        );
    };
    (@insert $map:ident, ($ch:literal => $action:expr)) => {
        $map.insert(
            crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char($ch),
                crossterm::event::KeyModifiers::NONE,
            ),
            $action,
        );
    };
    ($($entry:tt),* $(,)?) => {{
        let mut map = std::collections::HashMap::new();
        $(keys!(@insert map, $entry);)*
        map
    }};
}

pub struct KeyMap<T> {
    pub maps: HashMap<KeyEvent, T>,
}

impl<T: Copy> KeyMap<T> {
    /// Looks an event up. Characters typed with Shift also match their
    /// unshifted entry, since terminals disagree on reporting it.
    pub fn event_to_action(&self, evt: &Event) -> Option<T> {
        let key = match evt {
            Event::Key(key) => key,
            _ => return None,
        };
        if let Some(action) = self.maps.get(key) {
            return Some(*action);
        }
        match key.code {
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::SHIFT) => self
                .maps
                .get(&KeyEvent::new(key.code, key.modifiers & !KeyModifiers::SHIFT))
                .copied(),
            _ => None,
        }
    }
}
