use gloo_timers::callback::Interval;

/// Countdown length the timer starts with and resets to.
pub const REST_SECONDS: u32 = 90;

/// Countdown between sets.
///
/// The timer holds no clock of its own. It is advanced by an external
/// per-second tick, see [`second_interval`]. Reaching zero reports expiry
/// and snaps back to the full countdown, stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestTimer {
    seconds: u32,
    running: bool,
}

impl RestTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seconds: REST_SECONDS,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.start_for(REST_SECONDS);
    }

    pub fn start_for(&mut self, seconds: u32) {
        self.seconds = seconds;
        self.running = true;
    }

    /// Pauses or resumes without losing the remaining time.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn reset(&mut self) {
        self.seconds = REST_SECONDS;
        self.running = false;
    }

    /// Advances the countdown by one second while running.
    ///
    /// Returns `true` when the countdown expires on this tick, so the
    /// caller can signal the user.
    pub fn tick(&mut self) -> bool {
        if self.running && self.seconds > 0 {
            self.seconds -= 1;
            if self.seconds == 0 {
                self.reset();
                return true;
            }
        }
        false
    }

    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining time as `m:ss`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Calls back once per second, typically to advance a [`RestTimer`].
/// Dropping the handle stops the ticking.
pub fn second_interval<F: FnMut() + 'static>(callback: F) -> Interval {
    Interval::new(1000, callback)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_initial_state() {
        let timer = RestTimer::new();
        assert_eq!(timer.seconds(), REST_SECONDS);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_tick_while_stopped() {
        let mut timer = RestTimer::new();
        assert!(!timer.tick());
        assert_eq!(timer.seconds(), REST_SECONDS);
    }

    #[test]
    fn test_countdown_and_expiry() {
        let mut timer = RestTimer::new();
        timer.start_for(3);

        assert!(!timer.tick());
        assert!(!timer.tick());
        assert_eq!(timer.seconds(), 1);

        assert!(timer.tick());
        assert_eq!(timer.seconds(), REST_SECONDS);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut timer = RestTimer::new();
        timer.start();
        assert!(!timer.tick());

        timer.toggle();
        assert!(!timer.tick());
        assert_eq!(timer.seconds(), REST_SECONDS - 1);

        timer.toggle();
        assert!(!timer.tick());
        assert_eq!(timer.seconds(), REST_SECONDS - 2);
    }

    #[test]
    fn test_reset() {
        let mut timer = RestTimer::new();
        timer.start();
        timer.tick();
        timer.reset();

        assert_eq!(timer.seconds(), REST_SECONDS);
        assert!(!timer.is_running());
    }

    #[rstest]
    #[case::full(90, "1:30")]
    #[case::padded(5, "0:05")]
    #[case::minute_boundary(60, "1:00")]
    #[case::long(600, "10:00")]
    fn test_display(#[case] seconds: u32, #[case] expected: &str) {
        let mut timer = RestTimer::new();
        timer.start_for(seconds);
        assert_eq!(timer.display(), expected);
    }
}
