use crate::models::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means on the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MenuUp,
    MenuDown,
    SwitchMode,
    Start,
    OptionUp,
    OptionDown,
    /// Answer with the option at this position.
    Choose(usize),
    /// Answer with the highlighted option.
    Submit,
    Next,
    Previous,
    Retry,
    BackToStart,
    ScrollUp,
    ScrollDown,
    None,
}

pub fn map_key(state: AppState, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match state {
        AppState::Start => match key.code {
            KeyCode::Up => Action::MenuUp,
            KeyCode::Down => Action::MenuDown,
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => Action::SwitchMode,
            KeyCode::Enter => Action::Start,
            KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        },
        AppState::Quiz => match key.code {
            KeyCode::Up => Action::OptionUp,
            KeyCode::Down => Action::OptionDown,
            KeyCode::Enter => Action::Submit,
            KeyCode::Right | KeyCode::Char('n') => Action::Next,
            KeyCode::Left | KeyCode::Char('p') => Action::Previous,
            KeyCode::Char('r') => Action::Retry,
            KeyCode::Esc | KeyCode::Char('b') => Action::BackToStart,
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(d) if d > 0 => Action::Choose(d as usize - 1),
                _ => Action::None,
            },
            _ => Action::None,
        },
        AppState::Results => match key.code {
            KeyCode::Up => Action::ScrollUp,
            KeyCode::Down => Action::ScrollDown,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('b') => Action::BackToStart,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        },
    }
}
