use instant::Instant;

/// Which phase of the simulation step is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemPhase {
    Movement = 0,
    Collection = 1,
}

impl SystemPhase {
    pub const ALL: [SystemPhase; 2] = [Self::Movement, Self::Collection];

    pub fn label(self) -> &'static str {
        match self {
            Self::Movement => "Movement",
            Self::Collection => "Collection",
        }
    }
}

/// Per-system timing with exponential moving average smoothing.
pub struct SystemTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; 2],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl SystemTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; 2],
            start: Instant::now(),
        }
    }

    /// Call before a system runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a system finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: SystemPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    fn record(&mut self, phase: SystemPhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }

    /// One-line summary, e.g. `Movement 1.2us | Collection 0.4us`.
    pub fn summary(&self) -> String {
        SystemPhase::ALL
            .iter()
            .map(|&p| format!("{} {:.1}us", p.label(), self.durations_us[p as usize]))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_moves_toward_samples() {
        let mut timers = SystemTimers::new();
        timers.record(SystemPhase::Collection, 100.0);
        assert!((timers.durations_us[1] - 10.0).abs() < 1e-9);
        timers.record(SystemPhase::Collection, 100.0);
        assert!((timers.durations_us[1] - 19.0).abs() < 1e-9);
        assert_eq!(timers.durations_us[0], 0.0);
        assert!((timers.total_us() - 19.0).abs() < 1e-9);
        assert!(timers.summary().starts_with("Movement 0.0us | Collection 19.0us"));
    }
}
