//! Frame clock
//!
//! An infinite iterator of ticks paced to a nominal interval. Pacing goes
//! through a `TimeSource` so tests can script time instead of sleeping.

use std::time::{Duration, Instant};

/// One clock step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Milliseconds on the clock's time source
    pub time: u64,
    /// Seconds since the previous tick (`None` on the first tick)
    pub delta_time: Option<f32>,
}

impl Tick {
    /// Integration step in seconds; the first tick integrates nothing
    #[inline]
    pub fn dt(&self) -> f32 {
        self.delta_time.unwrap_or(0.0)
    }
}

/// Where the clock reads time from and how it waits
pub trait TimeSource {
    /// Current monotonic time in milliseconds
    fn now_ms(&mut self) -> u64;
    /// Suspend until `deadline_ms` (must not busy-wait)
    fn sleep_until(&mut self, deadline_ms: u64);
}

/// Wall-clock source backed by `Instant` and thread sleeps
#[derive(Debug, Clone)]
pub struct RealTime {
    epoch: Instant,
}

impl RealTime {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for RealTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for RealTime {
    fn now_ms(&mut self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn sleep_until(&mut self, deadline_ms: u64) {
        let now = self.now_ms();
        if deadline_ms > now {
            std::thread::sleep(Duration::from_millis(deadline_ms - now));
        }
    }
}

/// Scripted source: sleeping jumps straight to the deadline, plus an
/// optional repeating lag pattern to simulate slow frames
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: u64,
    lag: Vec<u64>,
    sleeps: usize,
}

impl ManualTime {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: start_ms,
            lag: Vec::new(),
            sleeps: 0,
        }
    }

    /// Add `lag[i % len]` ms after the i-th sleep
    pub fn with_lag(mut self, lag: Vec<u64>) -> Self {
        self.lag = lag;
        self
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&mut self) -> u64 {
        self.now
    }

    fn sleep_until(&mut self, deadline_ms: u64) {
        self.now = self.now.max(deadline_ms);
        if !self.lag.is_empty() {
            self.now += self.lag[self.sleeps % self.lag.len()];
        }
        self.sleeps += 1;
    }
}

/// Lazy, infinite, non-restartable tick sequence
#[derive(Debug)]
pub struct Clock<S: TimeSource> {
    source: S,
    interval_ms: u64,
    next_deadline: Option<u64>,
    previous: Option<u64>,
}

impl<S: TimeSource> Clock<S> {
    pub fn new(source: S, interval_ms: u64) -> Self {
        Self {
            source,
            interval_ms: interval_ms.max(1),
            next_deadline: None,
            previous: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Current time on the underlying source
    pub fn now_ms(&mut self) -> u64 {
        self.source.now_ms()
    }
}

impl Clock<RealTime> {
    /// Clock paced by the wall clock
    pub fn real(interval_ms: u64) -> Self {
        Self::new(RealTime::new(), interval_ms)
    }
}

impl<S: TimeSource> Iterator for Clock<S> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        let deadline = match self.next_deadline {
            Some(deadline) => deadline,
            None => self.source.now_ms() + self.interval_ms,
        };
        self.source.sleep_until(deadline);
        let time = self.source.now_ms();

        // Fell a whole interval behind: re-anchor instead of bursting
        self.next_deadline = Some(if time >= deadline + self.interval_ms {
            time + self.interval_ms
        } else {
            deadline + self.interval_ms
        });

        let delta_time = self
            .previous
            .map(|previous| time.saturating_sub(previous) as f32 / 1000.0);
        self.previous = Some(time);

        Some(Tick { time, delta_time })
    }
}

/// Fixed-cadence sample points, anchored at the first poll
///
/// Missed points are skipped rather than replayed.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    period_ms: u64,
    next_ms: Option<u64>,
}

impl SampleGrid {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_ms: None,
        }
    }

    /// True when `now_ms` reached the next sample point
    pub fn due(&mut self, now_ms: u64) -> bool {
        let next = *self.next_ms.get_or_insert(now_ms);
        if now_ms < next {
            return false;
        }
        let missed = (now_ms - next) / self.period_ms;
        self.next_ms = Some(next + (missed + 1) * self.period_ms);
        true
    }
}
