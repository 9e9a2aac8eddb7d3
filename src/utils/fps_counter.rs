use std::time::{Duration, Instant};

/// Counts presented frames and reports the total once per elapsed second.
pub struct FpsCounter {
    last_report: Instant,
    frame_count: u32,
    interval: Duration,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            last_report: Instant::now(),
            frame_count: 0,
            interval,
        }
    }

    /// Records one frame. Returns the number of frames counted since the
    /// previous report once at least one interval has passed.
    pub fn update(&mut self) -> Option<u32> {
        self.tick(Instant::now())
    }

    fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frame_count += 1;

        if now.duration_since(self.last_report) >= self.interval {
            let frames = self.frame_count;
            self.frame_count = 0;
            self.last_report = now;
            log::info!("FPS: {frames}");
            return Some(frames);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_after_interval_and_resets() {
        let start = Instant::now();
        let mut counter = FpsCounter::with_interval(Duration::from_secs(1));
        counter.last_report = start;

        for i in 1..60 {
            assert_eq!(counter.tick(start + Duration::from_millis(i * 10)), None);
        }
        assert_eq!(counter.tick(start + Duration::from_millis(1000)), Some(60));
        assert_eq!(counter.frame_count, 0);
        assert_eq!(counter.tick(start + Duration::from_millis(1010)), None);
    }
}
