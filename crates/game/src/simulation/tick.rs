/// Accumulator that turns variable frame deltas into fixed simulation steps.
pub struct FixedTimestep {
    tick_rate: u32,
    dt: f32,
    max_frame: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_FRAME: f32 = 0.25;

    pub fn new(tick_rate: u32) -> Self {
        Self::with_max_frame(tick_rate, Self::DEFAULT_MAX_FRAME)
    }

    pub fn with_max_frame(tick_rate: u32, max_frame: f32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_rate,
            dt: 1.0 / tick_rate as f32,
            max_frame,
            accumulator: 0.0,
        }
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta.clamp(0.0, self.max_frame);
    }

    pub fn should_tick(&self) -> bool {
        self.accumulator >= self.dt
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            true
        } else {
            false
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_timestep_accumulation() {
        let mut ts = FixedTimestep::new(60);

        ts.accumulate(1.0 / 30.0);
        assert!(ts.should_tick());
        assert!(ts.consume_tick());
        assert!(ts.consume_tick());
        assert!(!ts.consume_tick());
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut ts = FixedTimestep::with_max_frame(10, 0.25);

        ts.accumulate(5.0);
        let mut ticks = 0;
        while ts.consume_tick() {
            ticks += 1;
        }
        assert_eq!(ticks, 2);

        let mut ts = FixedTimestep::new(10);
        ts.accumulate(-1.0);
        assert!(!ts.should_tick());
    }
}
