use crate::entities::{ExitGate, FluxOrb};
use crate::geometry::Rect;

use super::Medal;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectiveUpdate {
    pub collected: Vec<usize>,
    pub unlocked: bool,
}

/// Owns the level's orbs and exit gate. The gate is unlocked only here, and
/// only once every orb is collected.
#[derive(Debug, Clone)]
pub struct ObjectiveTracker {
    orbs: Vec<FluxOrb>,
    exit: ExitGate,
    par_time: f32,
    elapsed: f32,
    active: bool,
}

impl ObjectiveTracker {
    pub fn new(orbs: Vec<FluxOrb>, exit: ExitGate, par_time: f32) -> Self {
        Self {
            orbs,
            exit,
            par_time,
            elapsed: 0.0,
            active: true,
        }
    }

    pub fn orbs(&self) -> &[FluxOrb] {
        &self.orbs
    }

    pub fn exit(&self) -> &ExitGate {
        &self.exit
    }

    pub fn par_time(&self) -> f32 {
        self.par_time
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn collected_count(&self) -> usize {
        self.orbs.iter().filter(|o| o.collected).count()
    }

    pub fn total_orbs(&self) -> usize {
        self.orbs.len()
    }

    /// Bit `i` is set when orb `i` is collected; orbs past index 63 are not
    /// represented.
    pub fn orb_mask(&self) -> u64 {
        self.orbs
            .iter()
            .take(64)
            .enumerate()
            .filter(|(_, o)| o.collected)
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }

    pub fn update(&mut self, dt: f32, body: &Rect) -> ObjectiveUpdate {
        if !self.active {
            return ObjectiveUpdate::default();
        }

        self.elapsed += dt;

        let collected = self
            .orbs
            .iter_mut()
            .enumerate()
            .filter_map(|(i, orb)| orb.try_collect(body).then_some(i))
            .collect();

        ObjectiveUpdate {
            collected,
            unlocked: self.refresh_gate(),
        }
    }

    /// Marks orbs a peer reported as collected.
    pub fn apply_remote_mask(&mut self, mask: u64) -> ObjectiveUpdate {
        let mut collected = Vec::new();
        for (i, orb) in self.orbs.iter_mut().take(64).enumerate() {
            if !orb.collected && mask & (1 << i) != 0 {
                orb.collected = true;
                collected.push(i);
            }
        }

        ObjectiveUpdate {
            collected,
            unlocked: self.refresh_gate(),
        }
    }

    /// Returns the graded run when the body passes through the unlocked gate.
    pub fn check_exit(&mut self, body: &Rect) -> Option<(f32, Option<Medal>)> {
        if !self.active || !self.exit.passes(body) {
            return None;
        }
        self.active = false;
        Some((self.elapsed, self.medal()))
    }

    pub fn medal(&self) -> Option<Medal> {
        Medal::grade(self.elapsed, self.par_time)
    }

    fn refresh_gate(&mut self) -> bool {
        if self.exit.unlocked || self.collected_count() < self.orbs.len() {
            return false;
        }
        self.exit.unlocked = true;
        true
    }
}
