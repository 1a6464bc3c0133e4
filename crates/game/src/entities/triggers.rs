use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub rect: Rect,
}

impl Spike {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn hits(&self, body: &Rect) -> bool {
        self.rect.overlaps(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluxOrb {
    pub position: Vec2,
    pub radius: f32,
    #[serde(skip)]
    pub collected: bool,
}

impl FluxOrb {
    pub const DEFAULT_RADIUS: f32 = 10.0;

    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            radius: Self::DEFAULT_RADIUS,
            collected: false,
        }
    }

    /// Returns true only on the tick the orb becomes collected.
    pub fn try_collect(&mut self, body: &Rect) -> bool {
        if self.collected || !body.touches_circle(self.position, self.radius) {
            return false;
        }
        self.collected = true;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub position: Vec2,
    pub radius: f32,
    #[serde(skip)]
    pub activated: bool,
}

impl Checkpoint {
    pub const DEFAULT_RADIUS: f32 = 16.0;

    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            radius: Self::DEFAULT_RADIUS,
            activated: false,
        }
    }

    /// Returns true only on the tick the checkpoint becomes active.
    pub fn try_activate(&mut self, body: &Rect) -> bool {
        if self.activated || !body.touches_circle(self.position, self.radius) {
            return false;
        }
        self.activated = true;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitGate {
    pub rect: Rect,
    #[serde(skip)]
    pub unlocked: bool,
}

impl ExitGate {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            unlocked: false,
        }
    }

    pub fn passes(&self, body: &Rect) -> bool {
        self.unlocked && self.rect.overlaps(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Rect {
        Rect::new(0.0, 0.0, 20.0, 20.0)
    }

    #[test]
    fn orb_collects_once() {
        let mut orb = FluxOrb::new(Vec2::new(25.0, 10.0));
        assert!(orb.try_collect(&body()));
        assert!(orb.collected);
        assert!(!orb.try_collect(&body()));
        assert!(orb.collected);
    }

    #[test]
    fn orb_out_of_reach_stays() {
        let mut orb = FluxOrb::new(Vec2::new(31.0, 10.0));
        assert!(!orb.try_collect(&body()));
        assert!(!orb.collected);
    }

    #[test]
    fn checkpoint_activation_is_monotonic() {
        let mut cp = Checkpoint::new(Vec2::new(10.0, 10.0));
        assert!(cp.try_activate(&body()));
        assert!(!cp.try_activate(&Rect::new(500.0, 500.0, 1.0, 1.0)));
        assert!(cp.activated);
    }

    #[test]
    fn locked_gate_does_not_pass() {
        let mut gate = ExitGate::new(Rect::new(10.0, 0.0, 20.0, 40.0));
        assert!(!gate.passes(&body()));
        gate.unlocked = true;
        assert!(gate.passes(&body()));
        assert!(!gate.passes(&Rect::new(100.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn spike_uses_strict_overlap() {
        let spike = Spike::new(Rect::new(20.0, 0.0, 10.0, 10.0));
        assert!(!spike.hits(&body()));
        assert!(spike.hits(&Rect::new(19.0, 0.0, 2.0, 2.0)));
    }
}
