use std::time::Duration;

use chrono::NaiveDateTime;

use crate::{
    alarm_time::AlarmTime,
    audio::{AudioError, AudioSourceDecoded, SoundPlayer},
    clock::Clock,
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    Waiting,
    Triggered,
}

pub struct AlarmLoop {
    target: AlarmTime,
    poll_interval: Duration,
    state: AlarmState,
}

impl AlarmLoop {
    pub fn new(target: AlarmTime, poll_interval: Duration) -> Self {
        Self {
            target,
            poll_interval,
            state: AlarmState::Waiting,
        }
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    /// Samples the clock once. `Triggered` is terminal.
    pub fn poll<C: Clock + ?Sized>(&mut self, clock: &C) -> AlarmState {
        if self.state == AlarmState::Waiting && self.target.matches(&clock.now().time()) {
            self.state = AlarmState::Triggered;
        }

        self.state
    }

    pub fn time_remaining(&self, now: NaiveDateTime) -> chrono::Duration {
        self.target.next_occurrence(now) - now
    }

    pub fn wait<C: Clock + ?Sized>(&mut self, clock: &C) {
        while self.poll(clock) == AlarmState::Waiting {
            let now = clock.now();
            log::debug!(
                "{}, alarm in {}s",
                now.format("%H:%M:%S"),
                self.time_remaining(now).num_seconds()
            );
            clock.sleep(self.poll_interval);
        }
    }

    /// Blocks until the target time, then plays `audio_source` exactly once.
    pub fn run<C, P>(
        mut self,
        clock: &C,
        player: &P,
        audio_source: &AudioSourceDecoded,
    ) -> Result<(), AudioError>
    where
        C: Clock + ?Sized,
        P: SoundPlayer + ?Sized,
    {
        let now = clock.now();
        let fires_at = self.target.next_occurrence(now);
        let day = if fires_at.date() == now.date() {
            "today"
        } else {
            "tomorrow"
        };
        log::info!("Alarm set for {} at {}", day, self.target);

        self.wait(clock);

        log::info!("Alarm triggered at {}", clock.now().format("%H:%M:%S"));
        player.play(audio_source)
    }
}
