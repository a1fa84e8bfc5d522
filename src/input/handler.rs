use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;
use crate::render::Screen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Start,
    Pause,
    Resume,
    /// Abandon the current game and go back to the start screen
    QuitGame,
    Restart,
    Submit,
    NicknameChar(char),
    NicknameBackspace,
    /// Leave the program
    Exit,
    None,
}

/// Maps key presses to actions. The same key means different things on
/// different screens, so the screen in front is passed along with the key.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, screen: Screen) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Exit;
        }

        match screen {
            Screen::Start => match key.code {
                KeyCode::Enter => KeyAction::Start,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Exit,
                _ => KeyAction::None,
            },
            Screen::Playing => match key.code {
                KeyCode::Up => KeyAction::Turn(Direction::Up),
                KeyCode::Down => KeyAction::Turn(Direction::Down),
                KeyCode::Left => KeyAction::Turn(Direction::Left),
                KeyCode::Right => KeyAction::Turn(Direction::Right),

                KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => KeyAction::Pause,
                _ => KeyAction::None,
            },
            Screen::Paused => match key.code {
                KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') | KeyCode::Enter => {
                    KeyAction::Resume
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::QuitGame,
                _ => KeyAction::None,
            },
            // The nickname field has focus, so letters are typed, not commands
            Screen::GameOver => match key.code {
                KeyCode::Enter => KeyAction::Submit,
                KeyCode::Esc => KeyAction::QuitGame,
                KeyCode::Backspace => KeyAction::NicknameBackspace,
                KeyCode::Char('r') | KeyCode::Char('R') if key.modifiers.contains(KeyModifiers::ALT) => {
                    KeyAction::Restart
                }
                KeyCode::F(5) => KeyAction::Restart,
                KeyCode::Char(c)
                    if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    KeyAction::NicknameChar(c)
                }
                _ => KeyAction::None,
            },
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_while_playing() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up), Screen::Playing),
            KeyAction::Turn(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down), Screen::Playing),
            KeyAction::Turn(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left), Screen::Playing),
            KeyAction::Turn(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right), Screen::Playing),
            KeyAction::Turn(Direction::Right)
        );
    }

    #[test]
    fn test_arrow_keys_ignored_off_the_board() {
        let handler = InputHandler::new();

        for screen in [Screen::Start, Screen::Paused, Screen::GameOver] {
            assert_eq!(
                handler.handle_key_event(press(KeyCode::Up), screen),
                KeyAction::None
            );
        }
    }

    #[test]
    fn test_start_screen_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Enter), Screen::Start),
            KeyAction::Start
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('q')), Screen::Start),
            KeyAction::Exit
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Esc), Screen::Start),
            KeyAction::Exit
        );
    }

    #[test]
    fn test_pause_and_resume_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('p')), Screen::Playing),
            KeyAction::Pause
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' ')), Screen::Playing),
            KeyAction::Pause
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' ')), Screen::Paused),
            KeyAction::Resume
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Enter), Screen::Paused),
            KeyAction::Resume
        );

        let q_upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(q_upper, Screen::Paused),
            KeyAction::QuitGame
        );
    }

    #[test]
    fn test_game_over_types_nickname() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('r')), Screen::GameOver),
            KeyAction::NicknameChar('r')
        );
        let upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(upper, Screen::GameOver),
            KeyAction::NicknameChar('Q')
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Backspace), Screen::GameOver),
            KeyAction::NicknameBackspace
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Enter), Screen::GameOver),
            KeyAction::Submit
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Esc), Screen::GameOver),
            KeyAction::QuitGame
        );
    }

    #[test]
    fn test_modified_letters_are_not_typed() {
        let handler = InputHandler::new();

        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_a, Screen::GameOver), KeyAction::None);

        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(handler.handle_key_event(alt_x, Screen::GameOver), KeyAction::None);
    }

    #[test]
    fn test_restart_key() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::F(5)), Screen::GameOver),
            KeyAction::Restart
        );
        let alt_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::ALT);
        assert_eq!(
            handler.handle_key_event(alt_r, Screen::GameOver),
            KeyAction::Restart
        );
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        let x = press(KeyCode::Char('x'));
        assert_eq!(handler.handle_key_event(x, Screen::Playing), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for screen in [Screen::Start, Screen::Playing, Screen::Paused, Screen::GameOver] {
            assert_eq!(handler.handle_key_event(ctrl_c, screen), KeyAction::Exit);
        }
    }
}
