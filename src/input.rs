use glam::Vec2;

/// Identifier for a physical keyboard key, decoupled from the
/// windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Character(char),
    Escape,
}

/// Snapshot of keyboard and mouse state owned by the application shell.
///
/// Mouse-look is armed while the left button is held: the press records
/// the cursor so the first reported delta is zero, and every cursor
/// move afterwards yields the offset from the previous position.
#[derive(Debug, Default)]
pub struct InputState {
    keys: std::collections::HashSet<KeyCode>,
    cursor: Vec2,
    look_anchor: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key_down(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    pub fn set_key_up(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Arms mouse-look, anchoring deltas at the current cursor.
    pub fn begin_mouse_look(&mut self) {
        self.look_anchor = Some(self.cursor);
    }

    pub fn end_mouse_look(&mut self) {
        self.look_anchor = None;
    }

    pub fn mouse_look_active(&self) -> bool {
        self.look_anchor.is_some()
    }

    /// Records a cursor move and returns the look delta while
    /// mouse-look is armed.
    pub fn cursor_moved(&mut self, position: Vec2) -> Option<Vec2> {
        self.cursor = position;
        let anchor = self.look_anchor.as_mut()?;
        let delta = position - *anchor;
        *anchor = position;
        Some(delta)
    }

    pub fn cursor_position(&self) -> Vec2 {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_pressed_keys() {
        let mut state = InputState::new();
        state.set_key_down(KeyCode::Character('W'));
        assert!(state.is_key_down(KeyCode::Character('W')));
        assert!(!state.is_key_down(KeyCode::Character('A')));
        state.set_key_up(KeyCode::Character('W'));
        assert!(!state.is_key_down(KeyCode::Character('W')));
    }

    #[test]
    fn cursor_moves_are_ignored_without_mouse_look() {
        let mut state = InputState::new();
        assert_eq!(state.cursor_moved(Vec2::new(10.0, 20.0)), None);
        assert_eq!(state.cursor_position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn mouse_look_yields_incremental_deltas() {
        let mut state = InputState::new();
        state.cursor_moved(Vec2::new(100.0, 100.0));
        state.begin_mouse_look();
        assert!(state.mouse_look_active());

        assert_eq!(
            state.cursor_moved(Vec2::new(110.0, 90.0)),
            Some(Vec2::new(10.0, -10.0))
        );
        assert_eq!(
            state.cursor_moved(Vec2::new(110.0, 95.0)),
            Some(Vec2::new(0.0, 5.0))
        );

        state.end_mouse_look();
        assert_eq!(state.cursor_moved(Vec2::new(0.0, 0.0)), None);
    }
}
