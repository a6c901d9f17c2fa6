//! Text-backed filter criteria with a committed value.
//!
//! The input buffer follows every keystroke; the committed value is what the pipeline
//! reads. Commits come from [`DebouncedCriterion::apply`] (explicit confirmation) or from
//! [`DebouncedCriterion::poll`] once the debounce deadline passes. Both parse the current
//! buffer, and a confirmation cancels the pending deadline, so a stale timer can never
//! overwrite a newer commit.

use crate::filter::debounce::Debouncer;
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Values that can be parsed from a criterion's input buffer.
pub trait CriterionValue: Copy + PartialEq + Debug {
    /// Parse trimmed input. Blank or invalid input yields `None`.
    fn parse_input(text: &str) -> Option<Self>;
}

impl CriterionValue for u32 {
    fn parse_input(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }
}

impl CriterionValue for f64 {
    fn parse_input(text: &str) -> Option<Self> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

#[derive(Debug, Clone)]
pub struct DebouncedCriterion<T> {
    input: String,
    committed: Option<T>,
    debounce: Debouncer,
}

impl<T: CriterionValue> DebouncedCriterion<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            input: String::new(),
            committed: None,
            debounce: Debouncer::new(delay),
        }
    }

    /// Raw text bound to the input field.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Value the pipeline filters on.
    pub fn committed(&self) -> Option<T> {
        self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Replace the buffer and restart the debounce countdown.
    pub fn set_input(&mut self, text: impl Into<String>, now: Instant) {
        self.input = text.into();
        self.debounce.schedule(now);
    }

    /// Commit the buffer now and cancel any pending countdown.
    ///
    /// Returns true when the committed value changed.
    pub fn apply(&mut self) -> bool {
        self.debounce.cancel();
        self.commit()
    }

    /// Commit the buffer if the countdown has expired.
    ///
    /// Returns true when the committed value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.debounce.fire_if_due(now) {
            self.commit()
        } else {
            false
        }
    }

    /// Empty the buffer and the committed value, dropping any countdown.
    pub fn clear(&mut self) {
        self.input.clear();
        self.committed = None;
        self.debounce.cancel();
    }

    fn commit(&mut self) -> bool {
        let parsed = T::parse_input(&self.input);
        let changed = parsed != self.committed;
        self.committed = parsed;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn input_does_not_commit_immediately() {
        let now = Instant::now();
        let mut c = DebouncedCriterion::<u32>::new(DELAY);
        c.set_input("101", now);
        assert_eq!(c.input(), "101");
        assert_eq!(c.committed(), None);
        assert!(c.is_pending());
    }

    #[test]
    fn debounce_commits_after_quiet_period() {
        let now = Instant::now();
        let mut c = DebouncedCriterion::<u32>::new(DELAY);
        c.set_input("1", now);
        c.set_input("10", now + ms(100));
        c.set_input("101", now + ms(200));

        assert!(!c.poll(now + ms(400)));
        assert!(c.poll(now + ms(500)));
        assert_eq!(c.committed(), Some(101));
    }

    #[test]
    fn confirmation_cancels_stale_timer() {
        let now = Instant::now();
        let mut c = DebouncedCriterion::<f64>::new(DELAY);
        c.set_input("2.5", now);
        assert!(c.apply());
        assert_eq!(c.committed(), Some(2.5));
        assert!(!c.is_pending());

        // The superseded deadline never fires.
        assert!(!c.poll(now + ms(1_000)));
        assert_eq!(c.committed(), Some(2.5));
    }

    #[test]
    fn typing_after_confirmation_commits_later_value() {
        let now = Instant::now();
        let mut c = DebouncedCriterion::<f64>::new(DELAY);
        c.set_input("2.5", now);
        c.apply();
        c.set_input("3.0", now + ms(50));
        assert!(c.poll(now + ms(350)));
        assert_eq!(c.committed(), Some(3.0));
    }

    #[test]
    fn blank_or_invalid_commits_none() {
        let now = Instant::now();
        let mut c = DebouncedCriterion::<f64>::new(DELAY);
        c.set_input("1.5", now);
        c.apply();

        c.set_input("abc", now);
        c.apply();
        assert_eq!(c.committed(), None);

        c.set_input("1.5", now);
        c.apply();
        c.set_input("   ", now);
        c.apply();
        assert_eq!(c.committed(), None);
    }

    #[test]
    fn dive_number_rejects_decimals() {
        assert_eq!(u32::parse_input(" 5132 "), Some(5132));
        assert_eq!(u32::parse_input("101.5"), None);
        assert_eq!(u32::parse_input("-3"), None);
        assert_eq!(f64::parse_input("NaN"), None);
    }

    #[test]
    fn clear_resets_everything() {
        let now = Instant::now();
        let mut c = DebouncedCriterion::<u32>::new(DELAY);
        c.set_input("101", now);
        c.apply();
        c.set_input("102", now);
        c.clear();
        assert_eq!(c.input(), "");
        assert_eq!(c.committed(), None);
        assert!(!c.poll(now + ms(1_000)));
    }
}
