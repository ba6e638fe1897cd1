// Cosmetic HP/EN readouts: bounded random walks nudged on a fixed interval.

use std::time::{Duration, Instant};

use rand::Rng;

pub const TICK_INTERVAL: Duration = Duration::from_millis(2000);
pub const GAUGE_CEILING: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    pub value: f32,
    pub floor: f32,
    /// Width of the per-tick step; each tick moves by `(u - 0.5) * step`.
    pub step: f32,
}

impl Gauge {
    /// Advance one tick. The value stays within `[floor, GAUGE_CEILING]`.
    #[must_use]
    pub fn nudged(self, rng: &mut impl Rng) -> Self {
        let delta = (rng.gen_range(0.0..1.0_f32) - 0.5) * self.step;
        Self {
            value: (self.value + delta).clamp(self.floor, GAUGE_CEILING),
            ..self
        }
    }

    pub fn rounded(&self) -> i32 {
        self.value.round() as i32
    }

    pub fn fraction(&self) -> f32 {
        self.value / GAUGE_CEILING
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauges {
    pub health: Gauge,
    pub energy: Gauge,
}

impl Default for Gauges {
    fn default() -> Self {
        Self {
            health: Gauge { value: 100.0, floor: 95.0, step: 2.0 },
            energy: Gauge { value: 85.0, floor: 80.0, step: 3.0 },
        }
    }
}

impl Gauges {
    #[must_use]
    pub fn tick(self, rng: &mut impl Rng) -> Self {
        Self {
            health: self.health.nudged(rng),
            energy: self.energy.nudged(rng),
        }
    }
}

/// Repeating timer polled from the frame loop. Dropping it cancels it.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Instant,
}

impl IntervalTimer {
    pub fn start(period: Duration, now: Instant) -> Self {
        Self { period, next_due: now + period }
    }

    /// True at most once per call when the deadline has passed.
    /// A late poll fires once and reschedules from `now` rather than replaying missed ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }
}

/// Gauges plus the timer that drives them.
pub struct GaugeTicker<R: Rng> {
    gauges: Gauges,
    timer: IntervalTimer,
    rng: R,
}

impl<R: Rng> GaugeTicker<R> {
    pub fn start(rng: R, now: Instant) -> Self {
        Self {
            gauges: Gauges::default(),
            timer: IntervalTimer::start(TICK_INTERVAL, now),
            rng,
        }
    }

    pub fn gauges(&self) -> Gauges {
        self.gauges
    }

    /// Returns true when a tick fired.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.gauges = self.gauges.tick(&mut self.rng);
        log::trace!(
            "gauges: hp {:.1} en {:.1}",
            self.gauges.health.value,
            self.gauges.energy.value
        );
        true
    }
}
