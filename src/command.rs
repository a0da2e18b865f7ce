use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Abstract input handed to [`NavState::apply`](crate::state::NavState::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    /// New viewport size for the tree area (status row already taken off).
    Resize { width: usize, height: usize },
    ToggleSelection,
    Quit,
}

impl Command {
    /// Map a raw terminal event; `None` for anything without a binding.
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Resize(width, height) => Some(Command::Resize {
                width: usize::from(*width),
                height: usize::from(height.saturating_sub(1)),
            }),
            _ => None,
        }
    }

    fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Command::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::MoveDown),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::ToggleSelection),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}
