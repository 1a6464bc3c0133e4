use crate::gravity::GravityDirection;
use crate::level::Edge;
use crate::objective::Medal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Hazard,
    KillPlane,
}

impl DeathCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::Hazard => "hit a hazard",
            DeathCause::KillPlane => "fell into the void",
        }
    }
}

/// Something a tick did that a HUD or audio adapter may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelEvent {
    Warped {
        edge: Edge,
        gravity: GravityDirection,
        used_fallback: bool,
    },
    Respawned {
        cause: DeathCause,
        deaths: u32,
    },
    CheckpointActivated {
        index: usize,
    },
    OrbCollected {
        index: usize,
        by_peer: bool,
    },
    ExitUnlocked,
    Completed {
        elapsed: f32,
        medal: Option<Medal>,
    },
}

impl LevelEvent {
    pub fn is_death(&self) -> bool {
        matches!(self, LevelEvent::Respawned { .. })
    }
}
