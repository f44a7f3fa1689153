use std::collections::HashMap;

use crate::sim::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn key_name(self) -> &'static str {
        match self {
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
        }
    }

    /// Unit step in world space (+y is down).
    pub const fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2 { x: 0.0, y: -1.0 },
            Direction::Down => Vec2 { x: 0.0, y: 1.0 },
            Direction::Left => Vec2 { x: -1.0, y: 0.0 },
            Direction::Right => Vec2 { x: 1.0, y: 0.0 },
        }
    }
}

/// Held state per key name. Written by key events, read once per frame by the actor step.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.set(key, false);
    }

    fn set(&mut self, key: &str, is_down: bool) {
        match self.held.get_mut(key) {
            Some(state) => *state = is_down,
            None => {
                self.held.insert(key.to_string(), is_down);
            }
        }
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    pub fn is_direction_held(&self, direction: Direction) -> bool {
        self.is_held(direction.key_name())
    }

    pub fn any_direction_held(&self) -> bool {
        Direction::ALL
            .iter()
            .any(|direction| self.is_direction_held(*direction))
    }

    pub fn with_key_down(mut self, key: &str) -> Self {
        self.key_down(key);
        self
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_reads_as_released() {
        let input = InputState::new();
        assert!(!input.is_held("ArrowUp"));
        assert!(!input.any_direction_held());
    }

    #[test]
    fn key_down_then_up_toggles_held_state() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        assert!(input.is_direction_held(Direction::Left));

        input.key_up("ArrowLeft");
        assert!(!input.is_direction_held(Direction::Left));
        assert!(!input.any_direction_held());
    }

    #[test]
    fn repeated_key_down_keeps_key_held() {
        let mut input = InputState::new();
        input.key_down("ArrowDown");
        input.key_down("ArrowDown");
        assert!(input.is_direction_held(Direction::Down));
        input.key_up("ArrowDown");
        assert!(!input.is_direction_held(Direction::Down));
    }

    #[test]
    fn non_directional_keys_are_tracked_but_do_not_count_as_movement() {
        let input = InputState::new().with_key_down("Shift");
        assert!(input.is_held("Shift"));
        assert!(!input.any_direction_held());
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::new()
            .with_key_down("ArrowUp")
            .with_key_down("ArrowRight");
        input.clear();
        assert!(!input.any_direction_held());
    }

    #[test]
    fn key_names_match_browser_arrow_keys() {
        let names: Vec<_> = Direction::ALL.iter().map(|d| d.key_name()).collect();
        assert_eq!(names, ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"]);
    }
}
