use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Pressure plate; `pressed` is re-derived every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoopButton {
    pub rect: Rect,
    #[serde(skip)]
    pub pressed: bool,
}

impl CoopButton {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            pressed: false,
        }
    }

    pub fn update<'a>(&mut self, bodies: impl IntoIterator<Item = &'a Rect>) {
        self.pressed = bodies.into_iter().any(|b| self.rect.overlaps(b));
    }
}

/// AND-gate door over a set of button indices. Links that do not name an
/// existing button are never satisfied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoopDoor {
    pub rect: Rect,
    pub linked_buttons: Vec<i32>,
    #[serde(skip)]
    pub open: bool,
}

impl CoopDoor {
    pub fn new(rect: Rect, linked_buttons: Vec<i32>) -> Self {
        Self {
            rect,
            linked_buttons,
            open: false,
        }
    }

    pub fn update(&mut self, buttons: &[CoopButton]) {
        self.open = self.linked_buttons.iter().all(|&index| {
            usize::try_from(index)
                .ok()
                .and_then(|i| buttons.get(i))
                .is_some_and(|b| b.pressed)
        });
    }

    pub fn blocks(&self, body: &Rect) -> bool {
        !self.open && self.rect.overlaps(body)
    }

    pub fn solid_rect(&self) -> Option<Rect> {
        (!self.open).then_some(self.rect)
    }
}

pub fn update_coop(buttons: &mut [CoopButton], doors: &mut [CoopDoor], bodies: &[Rect]) {
    for button in buttons.iter_mut() {
        button.update(bodies);
    }
    for door in doors.iter_mut() {
        door.update(buttons);
    }
}
