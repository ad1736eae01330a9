use chrono::{Datelike, Local};

/// Source of the calendar month used for the seasonal PSH factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MonthClock {
    /// Month of the server's local wall clock, read on every call
    System,
    /// Always the same month (1–12)
    Fixed(u32),
}

impl MonthClock {
    pub fn current_month(&self) -> u32 {
        match self {
            MonthClock::System => Local::now().month(),
            MonthClock::Fixed(month) => *month,
        }
    }
}

/// Immutable state shared by all handlers. Cloned per request.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Month source handed to the estimator
    pub clock: MonthClock,
}

impl AppState {
    pub fn new(clock: MonthClock) -> Self {
        Self { clock }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        assert_eq!(MonthClock::Fixed(7).current_month(), 7);
    }

    #[test]
    fn test_system_clock_in_range() {
        let m = MonthClock::System.current_month();
        assert!((1..=12).contains(&m));
    }
}
