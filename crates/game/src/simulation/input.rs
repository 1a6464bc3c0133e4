use bitflags::bitflags;

use crate::player::MoveIntent;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP = 1 << 2;
    }
}

/// Held-button state fed by the UI layer. Jump fires once per press.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: Buttons,
    jump_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Buttons {
        self.held
    }

    pub fn set_left_held(&mut self, held: bool) {
        self.held.set(Buttons::LEFT, held);
    }

    pub fn set_right_held(&mut self, held: bool) {
        self.held.set(Buttons::RIGHT, held);
    }

    pub fn set_jump_held(&mut self, held: bool) {
        if held && !self.held.contains(Buttons::JUMP) {
            self.jump_pending = true;
        }
        self.held.set(Buttons::JUMP, held);
    }

    /// Consumes the pending jump edge.
    pub fn take_intent(&mut self) -> MoveIntent {
        let jump = std::mem::take(&mut self.jump_pending);
        MoveIntent::from_held(
            self.held.contains(Buttons::LEFT),
            self.held.contains(Buttons::RIGHT),
            jump,
        )
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_fires_once_per_press() {
        let mut input = InputState::new();

        input.set_jump_held(true);
        assert!(input.take_intent().jump);
        assert!(!input.take_intent().jump);

        input.set_jump_held(true);
        assert!(!input.take_intent().jump);

        input.set_jump_held(false);
        input.set_jump_held(true);
        assert!(input.take_intent().jump);
    }

    #[test]
    fn tap_between_ticks_still_jumps() {
        let mut input = InputState::new();
        input.set_jump_held(true);
        input.set_jump_held(false);
        assert!(input.take_intent().jump);
    }

    #[test]
    fn both_directions_cancel() {
        let mut input = InputState::new();
        input.set_left_held(true);
        assert_eq!(input.take_intent().direction, -1);
        input.set_right_held(true);
        assert_eq!(input.take_intent().direction, 0);
        input.set_left_held(false);
        assert_eq!(input.take_intent().direction, 1);
        assert_eq!(input.held(), Buttons::RIGHT);
    }
}
