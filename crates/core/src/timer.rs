//! Countdown clock driven by elapsed time reported from the outside.

use std::time::Duration;

use crate::error::{GameError, GameResult};

const SECOND: Duration = Duration::from_secs(1);

/// Signals produced while the countdown runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed.
    Tick {
        /// Seconds left after this tick.
        remaining: u32,
    },
    /// The countdown reached zero. Fired once per run.
    Timeout,
}

/// Countdown with pause support.
///
/// The timer never reads a clock; callers feed it elapsed time through
/// [`Timer::advance`]. Partial seconds carry over between calls.
#[derive(Debug, Clone)]
pub struct Timer {
    limit: u32,
    remaining: u32,
    running: bool,
    paused: bool,
    carry: Duration,
}

impl Timer {
    /// Create an idle timer with `limit` seconds on the clock.
    pub fn new(limit: u32) -> GameResult<Self> {
        if limit == 0 {
            return Err(GameError::InvalidArgument(
                "time limit must be positive".to_string(),
            ));
        }
        Ok(Self {
            limit,
            remaining: limit,
            running: false,
            paused: false,
            carry: Duration::ZERO,
        })
    }

    /// Configured limit in seconds.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Seconds left on the clock.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the countdown is active (it may still be paused).
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether decrementing is suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the clock is currently counting down.
    pub fn is_counting(&self) -> bool {
        self.running && !self.paused && self.remaining > 0
    }

    /// Begin counting down from the current remaining time.
    pub fn start(&mut self) {
        self.running = true;
        self.paused = false;
        self.carry = Duration::ZERO;
    }

    /// Suspend decrementing without stopping the run.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue after [`Timer::pause`].
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Halt the countdown and keep the remaining time.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = true;
        self.carry = Duration::ZERO;
    }

    /// Refill the clock. The running state is left untouched.
    pub fn reset(&mut self) {
        self.remaining = self.limit;
        self.paused = false;
        self.carry = Duration::ZERO;
    }

    /// Refill the clock and halt it.
    pub fn remove(&mut self) {
        self.remaining = self.limit;
        self.running = false;
        self.paused = true;
        self.carry = Duration::ZERO;
    }

    /// Time until the next decrement, or `None` when the clock is not counting.
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.is_counting().then(|| SECOND - self.carry)
    }

    /// Feed elapsed wall time into the countdown.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if !self.is_counting() {
            return events;
        }

        self.carry += elapsed;
        while self.carry >= SECOND {
            self.carry -= SECOND;
            self.remaining -= 1;
            events.push(TimerEvent::Tick {
                remaining: self.remaining,
            });
            if self.remaining == 0 {
                self.running = false;
                self.carry = Duration::ZERO;
                events.push(TimerEvent::Timeout);
                break;
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn timeouts(events: &[TimerEvent]) -> usize {
        events
            .iter()
            .filter(|event| **event == TimerEvent::Timeout)
            .count()
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(matches!(Timer::new(0), Err(GameError::InvalidArgument(_))));
    }

    #[test]
    fn counts_down_once_per_second() {
        let mut timer = Timer::new(10).unwrap();
        assert!(timer.advance(secs(3)).is_empty());

        timer.start();
        let events = timer.advance(Duration::from_millis(2500));
        assert_eq!(
            events,
            vec![
                TimerEvent::Tick { remaining: 9 },
                TimerEvent::Tick { remaining: 8 }
            ]
        );
        assert_eq!(timer.until_next_tick(), Some(Duration::from_millis(500)));
        timer.advance(Duration::from_millis(500));
        assert_eq!(timer.remaining(), 7);
    }

    #[test]
    fn paused_clock_does_not_move() {
        let mut timer = Timer::new(10).unwrap();
        timer.start();
        timer.pause();
        assert!(timer.advance(secs(5)).is_empty());
        assert_eq!(timer.remaining(), 10);
        assert!(timer.is_running());
        assert_eq!(timer.until_next_tick(), None);

        timer.resume();
        timer.advance(secs(1));
        assert_eq!(timer.remaining(), 9);
    }

    #[test]
    fn timeout_fires_exactly_once() {
        let mut timer = Timer::new(5).unwrap();
        timer.start();
        let mut events = Vec::new();
        for _ in 0..5 {
            events.extend(timer.advance(secs(1)));
        }
        assert_eq!(timeouts(&events), 1);
        assert_eq!(timer.remaining(), 0);
        assert!(!timer.is_running());
        assert!(timer.advance(secs(10)).is_empty());
    }

    #[test]
    fn large_step_stops_at_zero() {
        let mut timer = Timer::new(3).unwrap();
        timer.start();
        let events = timer.advance(secs(60));
        assert_eq!(events.len(), 4);
        assert_eq!(timeouts(&events), 1);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn stop_reset_and_remove() {
        let mut timer = Timer::new(30).unwrap();
        timer.start();
        timer.advance(secs(4));

        timer.stop();
        assert_eq!(timer.remaining(), 26);
        assert!(timer.is_paused() && !timer.is_running());
        assert!(timer.advance(secs(4)).is_empty());

        timer.reset();
        assert_eq!(timer.remaining(), 30);
        assert!(!timer.is_paused() && !timer.is_running());

        timer.start();
        timer.advance(secs(2));
        timer.reset();
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 30);

        timer.advance(secs(2));
        timer.remove();
        assert_eq!(timer.remaining(), 30);
        assert!(timer.is_paused() && !timer.is_running());
    }
}
