/// Logical keys the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Interact,
}

/// Per-step snapshot of player intent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intents {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Fires once per press.
    pub jump: bool,
    /// Fires once per press.
    pub interact: bool,
    /// Yaw change in radians to apply this step.
    pub turn: f32,
}

/// Accumulates raw key events between steps.
///
/// Movement keys are level-triggered. Jump and interact latch on the press
/// edge and are consumed by [`InputState::take_intents`], so a held key fires
/// once.
#[derive(Debug, Default)]
pub struct InputState {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
    jump_held: bool,
    interact_held: bool,
    jump_latched: bool,
    interact_latched: bool,
    turn: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Forward => self.forward = true,
            Key::Back => self.back = true,
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Jump => {
                if !self.jump_held {
                    self.jump_latched = true;
                }
                self.jump_held = true;
            }
            Key::Interact => {
                if !self.interact_held {
                    self.interact_latched = true;
                }
                self.interact_held = true;
            }
        }
    }

    pub fn release(&mut self, key: Key) {
        match key {
            Key::Forward => self.forward = false,
            Key::Back => self.back = false,
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Jump => self.jump_held = false,
            Key::Interact => self.interact_held = false,
        }
    }

    /// Accumulate look rotation (radians about the vertical axis).
    pub fn turn(&mut self, delta: f32) {
        self.turn += delta;
    }

    /// Snapshot for one step. Clears latched edges and accumulated turn.
    pub fn take_intents(&mut self) -> Intents {
        let intents = Intents {
            forward: self.forward,
            back: self.back,
            left: self.left,
            right: self.right,
            jump: self.jump_latched,
            interact: self.interact_latched,
            turn: self.turn,
        };
        self.jump_latched = false;
        self.interact_latched = false;
        self.turn = 0.0;
        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_is_level_triggered() {
        let mut input = InputState::new();
        input.press(Key::Forward);
        input.press(Key::Right);
        assert!(input.take_intents().forward);
        let held = input.take_intents();
        assert!(held.forward && held.right);
        input.release(Key::Forward);
        assert!(!input.take_intents().forward);
    }

    #[test]
    fn jump_fires_once_per_press() {
        let mut input = InputState::new();
        input.press(Key::Jump);
        assert!(input.take_intents().jump);
        // Key repeat while held does not re-fire.
        input.press(Key::Jump);
        assert!(!input.take_intents().jump);
        input.release(Key::Jump);
        input.press(Key::Jump);
        assert!(input.take_intents().jump);
    }

    #[test]
    fn tap_between_steps_is_not_lost() {
        let mut input = InputState::new();
        input.press(Key::Interact);
        input.release(Key::Interact);
        let intents = input.take_intents();
        assert!(intents.interact);
        assert!(!input.take_intents().interact);
    }

    #[test]
    fn turn_accumulates_and_resets() {
        let mut input = InputState::new();
        input.turn(0.1);
        input.turn(0.25);
        assert!((input.take_intents().turn - 0.35).abs() < 1e-6);
        assert_eq!(input.take_intents().turn, 0.0);
    }
}
