//! Keyboard decoding into engine actions.
//!
//! The engine never sees key events; everything funnels through `decode`,
//! which is mode-aware so the same key can mean different things while the
//! inventory screen is open.

use core::types::{Action, Direction};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Decode one key event. Returns `None` for keys with no meaning in the
/// current mode; those consume no turn.
pub fn decode(key: KeyEvent, inventory_open: bool) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if inventory_open {
        return decode_inventory(key.code);
    }
    decode_main(key.code)
}

fn decode_main(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Up | KeyCode::Char('k') => Action::Move(Direction::North),
        KeyCode::Down | KeyCode::Char('j') => Action::Move(Direction::South),
        KeyCode::Left | KeyCode::Char('h') => Action::Move(Direction::West),
        KeyCode::Right | KeyCode::Char('l') => Action::Move(Direction::East),
        KeyCode::Char('y') => Action::Move(Direction::NorthWest),
        KeyCode::Char('u') => Action::Move(Direction::NorthEast),
        KeyCode::Char('b') => Action::Move(Direction::SouthWest),
        KeyCode::Char('n') => Action::Move(Direction::SouthEast),
        KeyCode::Char('.') => Action::Wait,
        KeyCode::Char('i') => Action::OpenInventory,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('S') => Action::Save,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

fn decode_inventory(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Char(c @ '1'..='9') => {
            Action::SelectSlot(c as usize - '1' as usize)
        }
        KeyCode::Char('0') => Action::SelectSlot(9),
        KeyCode::Char('u') | KeyCode::Enter => Action::UseSelected,
        KeyCode::Char('d') => Action::DropSelected,
        KeyCode::Char('i') | KeyCode::Esc => Action::Cancel,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn vi_keys_and_arrows_agree() {
        assert_eq!(decode(press(KeyCode::Char('h')), false), decode(press(KeyCode::Left), false));
        assert_eq!(decode(press(KeyCode::Char('j')), false), decode(press(KeyCode::Down), false));
        assert_eq!(decode(press(KeyCode::Char('k')), false), decode(press(KeyCode::Up), false));
        assert_eq!(decode(press(KeyCode::Char('l')), false), decode(press(KeyCode::Right), false));
    }

    #[test]
    fn diagonals_decode_in_main_mode() {
        assert_eq!(
            decode(press(KeyCode::Char('y')), false),
            Some(Action::Move(Direction::NorthWest))
        );
        assert_eq!(
            decode(press(KeyCode::Char('n')), false),
            Some(Action::Move(Direction::SouthEast))
        );
    }

    #[test]
    fn mode_changes_key_meaning() {
        // 'u' is a diagonal move in the main mode and "use" in the inventory.
        assert_eq!(
            decode(press(KeyCode::Char('u')), false),
            Some(Action::Move(Direction::NorthEast))
        );
        assert_eq!(decode(press(KeyCode::Char('u')), true), Some(Action::UseSelected));

        // Esc quits the run in the main mode but only closes the inventory.
        assert_eq!(decode(press(KeyCode::Esc), false), Some(Action::Quit));
        assert_eq!(decode(press(KeyCode::Esc), true), Some(Action::Cancel));
    }

    #[test]
    fn digit_keys_map_to_zero_based_slots() {
        assert_eq!(decode(press(KeyCode::Char('1')), true), Some(Action::SelectSlot(0)));
        assert_eq!(decode(press(KeyCode::Char('9')), true), Some(Action::SelectSlot(8)));
        assert_eq!(decode(press(KeyCode::Char('0')), true), Some(Action::SelectSlot(9)));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(decode(press(KeyCode::Char('z')), false), None);
        assert_eq!(decode(press(KeyCode::Char('z')), true), None);
        assert_eq!(decode(press(KeyCode::Tab), false), None);
    }

    #[test]
    fn key_release_events_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(decode(release, false), None);
    }
}
