use anyhow::Context;
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub mod alarm_loop;
pub mod alarm_time;
pub mod audio;
pub mod cli;
pub mod clock;
pub mod prompt;

use alarm_loop::{AlarmLoop, DEFAULT_POLL_INTERVAL};
use alarm_time::AlarmTime;
use audio::{DevicePlayer, SilentPlayer, SoundPlayer};
use clock::LocalClock;

pub const DEFAULT_SOUND_PATH: &str = "mixkit-alert-alarm-1005.wav";
pub const DEFAULT_CONFIG_PATH: &str = "alarm.toml";

const MIN_POLL_INTERVAL_MS: u64 = 10;
// Must stay well under a minute or polls can step over the alarm minute
const MAX_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    pub sound_path: PathBuf,
    pub poll_interval_ms: u64,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            sound_path: DEFAULT_SOUND_PATH.into(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

impl AlarmConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.poll_interval_ms
                .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS),
        )
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub enabled: bool,
    pub volume: f32,
}

impl SoundConfig {
    /// Volume as an amplitude ratio in 0..=1, non-finite values play at full volume.
    pub fn volume(&self) -> f32 {
        if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub alarm: AlarmConfig,
    pub sound: SoundConfig,
}

pub fn load_config(path: &Path) -> Config {
    let toml_str = match std::fs::read_to_string(path) {
        Ok(toml_str) => toml_str,
        Err(error) => {
            log::info!(
                "Using default configuration, could not read {}: {}",
                path.to_string_lossy(),
                error
            );
            return Config::default();
        }
    };

    match toml::from_str(&toml_str) {
        Ok(config) => {
            log::info!("Read configuration from {}", path.to_string_lossy());
            config
        }
        Err(error) => {
            log::warn!(
                "Failed to load configuration from {} with error: {}",
                path.to_string_lossy(),
                error
            );
            Config::default()
        }
    }
}

pub fn run_alarm(config: &Config, alarm_time: AlarmTime) -> Result<(), anyhow::Error> {
    let sound_path = &config.alarm.sound_path;
    let audio_source = audio::load_wav(sound_path).with_context(|| {
        format!(
            "Alarm sound {} must be readable before the alarm is set",
            sound_path.to_string_lossy()
        )
    })?;

    let player: Box<dyn SoundPlayer> = if config.sound.enabled {
        Box::new(DevicePlayer::new(config.sound.volume()))
    } else {
        Box::new(SilentPlayer)
    };

    AlarmLoop::new(alarm_time, config.alarm.poll_interval())
        .run(&LocalClock, player.as_ref(), &audio_source)
        .context("Failed to play alarm sound")
}
