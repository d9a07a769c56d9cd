//! Simulated clock with explicit timer handles
//!
//! Time only moves when the host calls [`SimClock::advance`], so tests drive spawning
//! and effect expiry deterministically. Timestamps are milliseconds since run start.

use crate::consts::MAX_TIMER_CATCHUP;
use crate::whole_seconds;

/// Handle returned by [`SimClock::schedule_repeating`], used to cancel the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Spawn one ambient enemy
    AmbientSpawn,
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    period_ms: f64,
    next_due_ms: f64,
}

/// Run-local simulated time plus the repeating timers scheduled against it
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now_ms: f64,
    timers: Vec<Timer>,
    next_handle: u32,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since run start
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Whole seconds since run start
    pub fn elapsed_secs(&self) -> u64 {
        whole_seconds(0.0, self.now_ms)
    }

    /// Schedule a timer firing every `period_ms`, first fire one period from now
    pub fn schedule_repeating(&mut self, kind: TimerKind, period_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            kind,
            period_ms,
            next_due_ms: self.now_ms + period_ms,
        });
        handle
    }

    /// Cancel a timer; returns false if it was not scheduled
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Advance time and return the timers that came due, in firing order
    ///
    /// A single timer fires at most `MAX_TIMER_CATCHUP` times per call; after that
    /// its schedule is resynced to the current time instead of bursting.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<TimerKind> {
        self.now_ms += dt_ms.max(0.0);

        let mut fired = Vec::new();
        for timer in &mut self.timers {
            let mut fires = 0;
            while timer.next_due_ms <= self.now_ms && fires < MAX_TIMER_CATCHUP {
                fired.push(timer.kind);
                timer.next_due_ms += timer.period_ms;
                fires += 1;
            }
            if timer.next_due_ms <= self.now_ms {
                timer.next_due_ms = self.now_ms + timer.period_ms;
            }
        }
        fired
    }
}
