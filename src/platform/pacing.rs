//! Frame pacing
//!
//! Every display refresh asks the pacer how many simulation frames to run.
//! Unthrottled, that is always one. With a target rate, elapsed time is
//! accumulated and spent in whole frame intervals.

/// Maximum frames run for one refresh to prevent spiral of death
pub const MAX_CATCHUP_FRAMES: u32 = 4;

/// Longest gap (ms) credited after a stall (tab hidden, debugger)
const MAX_GAP_MS: f64 = 250.0;

#[derive(Debug, Clone)]
pub struct FramePacer {
    interval_ms: Option<f64>,
    accumulator: f64,
    last_time: Option<f64>,
}

impl FramePacer {
    /// `target_fps = None` steps once per refresh
    pub fn new(target_fps: Option<u32>) -> Self {
        Self {
            interval_ms: target_fps.filter(|&fps| fps > 0).map(|fps| 1000.0 / fps as f64),
            accumulator: 0.0,
            last_time: None,
        }
    }

    pub fn interval_ms(&self) -> Option<f64> {
        self.interval_ms
    }

    /// Number of simulation frames to run for a refresh at `now_ms`
    pub fn frames_due(&mut self, now_ms: f64) -> u32 {
        let elapsed = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_GAP_MS),
            None => 0.0,
        };
        let first = self.last_time.is_none();
        self.last_time = Some(now_ms);

        let Some(interval) = self.interval_ms else {
            return 1;
        };
        if first {
            return 1;
        }

        self.accumulator += elapsed;
        let mut frames = 0;
        while self.accumulator >= interval && frames < MAX_CATCHUP_FRAMES {
            self.accumulator -= interval;
            frames += 1;
        }
        // Drop whatever could not be caught up
        if frames == MAX_CATCHUP_FRAMES {
            self.accumulator = self.accumulator.min(interval);
        }
        frames
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unthrottled_steps_every_refresh() {
        let mut pacer = FramePacer::new(None);
        assert_eq!(pacer.frames_due(0.0), 1);
        assert_eq!(pacer.frames_due(3.0), 1);
        assert_eq!(pacer.frames_due(100.0), 1);
    }

    #[test]
    fn test_throttle_halves_a_120hz_display() {
        let mut pacer = FramePacer::new(Some(60));
        let mut total = pacer.frames_due(0.0);
        let refresh = 1000.0 / 120.0;
        for i in 1..=120 {
            total += pacer.frames_due(i as f64 * refresh);
        }
        // One second at 60 fps, plus the first refresh
        assert!((60..=61).contains(&total), "stepped {} frames", total);
    }

    #[test]
    fn test_catchup_is_capped() {
        let mut pacer = FramePacer::new(Some(60));
        pacer.frames_due(0.0);
        assert_eq!(pacer.frames_due(5000.0), MAX_CATCHUP_FRAMES);
        // Backlog was dropped
        assert!(pacer.frames_due(5001.0) <= 1);
    }

    #[test]
    fn test_zero_fps_means_unthrottled() {
        let pacer = FramePacer::new(Some(0));
        assert_eq!(pacer.interval_ms(), None);
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut pacer = FramePacer::new(Some(30));
        pacer.frames_due(1000.0);
        assert_eq!(pacer.frames_due(900.0), 0);
    }
}
