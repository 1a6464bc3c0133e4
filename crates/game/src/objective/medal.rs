use serde::{Deserialize, Serialize};

/// Ordered worst to best so `>` means "better tier".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Medal {
    Bronze,
    Silver,
    Gold,
}

impl Medal {
    pub const SILVER_FACTOR: f32 = 1.25;
    pub const BRONZE_FACTOR: f32 = 1.5;

    pub fn grade(elapsed: f32, par: f32) -> Option<Medal> {
        if elapsed <= par {
            Some(Medal::Gold)
        } else if elapsed <= par * Self::SILVER_FACTOR {
            Some(Medal::Silver)
        } else if elapsed <= par * Self::BRONZE_FACTOR {
            Some(Medal::Bronze)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Medal::Bronze => "bronze",
            Medal::Silver => "silver",
            Medal::Gold => "gold",
        }
    }
}

/// Best run for one level, as handed to the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub best_time: f32,
    pub medal: Option<Medal>,
    pub deaths: u32,
}

impl LevelRecord {
    pub fn from_run(elapsed: f32, par: f32, deaths: u32) -> Self {
        Self {
            best_time: elapsed,
            medal: Medal::grade(elapsed, par),
            deaths,
        }
    }

    /// Each field only improves; ties keep the stored value.
    pub fn merge(&mut self, run: &LevelRecord) -> bool {
        let mut improved = false;

        if run.best_time < self.best_time {
            self.best_time = run.best_time;
            improved = true;
        }
        if run.medal > self.medal {
            self.medal = run.medal;
            improved = true;
        }
        if run.deaths < self.deaths {
            self.deaths = run.deaths;
            improved = true;
        }

        improved
    }
}
