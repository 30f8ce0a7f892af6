use std::time::Duration;

use chrono::NaiveDateTime;

/// Source of wall-clock time for the alarm loop.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
    fn sleep(&self, duration: Duration);
}

/// Local system time, sleeping the calling thread between polls.
#[derive(Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
