use std::time::{Duration, Instant};

use gravflux::{FixedTimestep, GameSession, LevelData, LevelEvent, LevelRecord, PeerSession};

use crate::config::{DriverConfig, Hold};

/// Runs a list of levels headlessly, mirroring state with an optional peer.
pub struct Driver {
    config: DriverConfig,
    levels: Vec<LevelData>,
    records: Vec<Option<LevelRecord>>,
    current: usize,
    session: GameSession,
    peer: Option<PeerSession>,
    timestep: FixedTimestep,
    ticks: u64,
    finished: bool,
}

impl Driver {
    /// `levels` must not be empty.
    pub fn new(levels: Vec<LevelData>, config: DriverConfig, peer: Option<PeerSession>) -> Self {
        let first = levels.first().cloned().unwrap_or_default();
        let mut session = GameSession::with_config(first, config.session.clone());
        apply_hold(&mut session, config.hold);

        Self {
            records: vec![None; levels.len()],
            timestep: FixedTimestep::new(config.tick_rate),
            current: 0,
            ticks: 0,
            finished: false,
            session,
            levels,
            peer,
            config,
        }
    }

    pub fn records(&self) -> &[Option<LevelRecord>] {
        &self.records
    }

    pub fn levels(&self) -> &[LevelData] {
        &self.levels
    }

    pub fn run(&mut self) {
        let start = Instant::now();
        let mut last = start;

        log::info!(
            "playing {} level(s) at {} Hz, starting with {}",
            self.levels.len(),
            self.timestep.tick_rate(),
            self.session.level().name
        );

        while !self.finished {
            if self.config.run_for.is_some_and(|limit| start.elapsed() >= limit) {
                log::info!("time limit reached after {} ticks", self.ticks);
                break;
            }

            let now = Instant::now();
            self.timestep.accumulate((now - last).as_secs_f32());
            last = now;

            while !self.finished && self.timestep.consume_tick() {
                self.step(self.timestep.dt());
            }

            std::thread::sleep(Duration::from_millis(1));
        }

        if let Some(mut peer) = self.peer.take() {
            peer.close();
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.sync_peer();

        let events = self.session.tick(dt);
        self.ticks += 1;
        self.report(&events);

        if let Some(peer) = &self.peer {
            let position = self.session.position();
            peer.send_state(position.x, position.y, self.session.gravity(), self.session.orb_mask());
        }

        if let Some(LevelEvent::Completed { elapsed, .. }) =
            events.iter().find(|e| matches!(e, LevelEvent::Completed { .. }))
        {
            self.record_run(*elapsed);
            self.advance();
        }
    }

    fn sync_peer(&mut self) {
        let Some(peer) = &self.peer else {
            return;
        };

        if !peer.is_alive() {
            log::warn!("peer {} went away, continuing alone", peer.peer_addr());
            self.peer = None;
            self.session.clear_peer();
            return;
        }

        let remote = peer.poll();
        if let Some(index) = remote.level_index {
            if self.follow_peer_level(index) {
                return;
            }
        }

        let events = self.session.apply_remote(&remote);
        self.report(&events);
    }

    /// Returns true when a different level was loaded.
    fn follow_peer_level(&mut self, index: i32) -> bool {
        match usize::try_from(index) {
            Ok(index) if index < self.levels.len() => {
                if index == self.current {
                    return false;
                }
                log::info!("peer switched to level {}", index);
                self.load(index);
                true
            }
            _ => {
                log::warn!("peer asked for unknown level {}", index);
                false
            }
        }
    }

    fn record_run(&mut self, elapsed: f32) {
        let run = LevelRecord::from_run(elapsed, self.session.par_time(), self.session.deaths());

        let slot = &mut self.records[self.current];
        match slot {
            Some(record) => {
                if record.merge(&run) {
                    log::info!("new best for {}: {:?}", self.session.level().name, record);
                }
            }
            None => *slot = Some(run),
        }
    }

    fn advance(&mut self) {
        let next = self.current + 1;
        if next >= self.levels.len() {
            log::info!("all levels completed in {} ticks", self.ticks);
            self.finished = true;
            return;
        }

        self.load(next);
        if let Some(peer) = &self.peer {
            peer.send_level(next as i32);
        }
    }

    fn load(&mut self, index: usize) {
        self.current = index;
        self.session = GameSession::with_config(self.levels[index].clone(), self.config.session.clone());
        apply_hold(&mut self.session, self.config.hold);
        log::info!("loaded level {} ({})", index, self.session.level().name);
    }

    fn report(&self, events: &[LevelEvent]) {
        for event in events {
            match event {
                LevelEvent::Warped {
                    edge,
                    gravity,
                    used_fallback,
                } => {
                    log::debug!("warped through {:?}, gravity now {} (fallback: {})", edge, gravity, used_fallback);
                }
                LevelEvent::Respawned { cause, deaths } => {
                    log::info!("{}, {} death(s)", cause.as_str(), deaths);
                }
                LevelEvent::CheckpointActivated { index } => log::info!("checkpoint {} reached", index),
                LevelEvent::OrbCollected { index, by_peer } => {
                    let who = if *by_peer { "peer" } else { "local" };
                    log::info!(
                        "orb {} collected by {} ({}/{})",
                        index,
                        who,
                        self.session.objective().collected_count(),
                        self.session.objective().total_orbs()
                    );
                }
                LevelEvent::ExitUnlocked => log::info!("exit unlocked"),
                LevelEvent::Completed { elapsed, medal } => {
                    let medal = medal.map_or("no medal", |m| m.name());
                    log::info!("{} completed in {:.2}s, {}", self.session.level().name, elapsed, medal);
                }
            }
        }
    }
}

fn apply_hold(session: &mut GameSession, hold: Hold) {
    session.set_left_held(hold == Hold::Left);
    session.set_right_held(hold == Hold::Right);
}
