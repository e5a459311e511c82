use std::{cell::RefCell, rc::Rc, time::Instant};

use crate::api::units::{TimeDelta, Timestamp};

/// Source of time for a session, and the only way it is allowed to wait.
pub trait Clock {
    fn now(&self) -> Timestamp;

    /// Blocks the caller for `duration`. Non-positive durations return
    /// immediately.
    fn sleep(&mut self, duration: TimeDelta);
}

/// Wall clock. Timestamps count from the moment the clock was created.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.start.elapsed().as_micros() as i64)
    }

    fn sleep(&mut self, duration: TimeDelta) {
        if let Some(duration) = duration.to_std() {
            std::thread::sleep(duration);
        }
    }
}

#[derive(Debug)]
struct SimulatedState {
    now: Timestamp,
    sleeps: Vec<TimeDelta>,
}

/// Virtual clock that only moves when told to, or when slept on.
///
/// Clones share the same time, so a test can keep a handle while the session
/// owns another one.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    state: Rc<RefCell<SimulatedState>>,
}

impl SimulatedClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimulatedState {
                now: start,
                sleeps: Vec::new(),
            })),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        self.state.borrow_mut().now += delta;
    }

    /// Every wait requested through `sleep`, in order.
    pub fn sleeps(&self) -> Vec<TimeDelta> {
        self.state.borrow().sleeps.clone()
    }

    pub fn total_slept(&self) -> TimeDelta {
        self.state
            .borrow()
            .sleeps
            .iter()
            .fold(TimeDelta::zero(), |total, sleep| total + *sleep)
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Timestamp {
        self.state.borrow().now
    }

    fn sleep(&mut self, duration: TimeDelta) {
        if duration <= TimeDelta::zero() {
            return;
        }
        let mut state = self.state.borrow_mut();
        state.now += duration;
        state.sleeps.push(duration);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn simulated_clock_is_shared_between_clones() {
        let clock = SimulatedClock::new(Timestamp::from_seconds(10));
        let mut owned = clock.clone();

        clock.advance(TimeDelta::from_millis(500));
        assert_eq!(owned.now(), Timestamp::from_millis(10_500));

        owned.sleep(TimeDelta::from_millis(250));
        assert_eq!(clock.now(), Timestamp::from_millis(10_750));
        assert_eq!(clock.sleeps(), vec![TimeDelta::from_millis(250)]);
    }

    #[test]
    fn simulated_clock_ignores_non_positive_sleeps() {
        let mut clock = SimulatedClock::new(Timestamp::zero());
        clock.sleep(TimeDelta::zero());
        clock.sleep(TimeDelta::from_millis(-5));
        assert!(clock.sleeps().is_empty());
        assert_eq!(clock.total_slept(), TimeDelta::zero());
        assert_eq!(clock.now(), Timestamp::zero());
    }

    #[test]
    fn system_clock_moves_forward() {
        let mut clock = SystemClock::new();
        let before = clock.now();
        clock.sleep(TimeDelta::from_millis(2));
        assert!(clock.now() - before >= TimeDelta::from_millis(2));
    }
}
