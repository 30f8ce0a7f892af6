use std::path::Path;

use anyhow::Context;

use crate::{alarm_time::AlarmTime, Config, DEFAULT_CONFIG_PATH};

pub fn build_command() -> clap::Command<'static> {
    clap::Command::new("rose-alarm")
        .about("Waits until the given time of day, then plays the alarm sound")
        .arg(
            clap::Arg::new("time")
                .long("time")
                .help("Alarm time as HH:MM, skips the interactive prompt")
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("sound")
                .long("sound")
                .help("Path to the alarm .wav file")
                .takes_value(true),
        )
        .arg(
            clap::Arg::new("config")
                .long("config")
                .help("Path to config file")
                .takes_value(true)
                .default_value(DEFAULT_CONFIG_PATH),
        )
        .arg(
            clap::Arg::new("silent")
                .long("silent")
                .help("Do not open an audio device, only report when the alarm fires"),
        )
}

pub fn config_path(matches: &clap::ArgMatches) -> &Path {
    Path::new(matches.value_of("config").unwrap_or(DEFAULT_CONFIG_PATH))
}

/// Command line flags take precedence over the config file.
pub fn apply_matches(matches: &clap::ArgMatches, config: &mut Config) {
    if let Some(sound_path) = matches.value_of("sound") {
        config.alarm.sound_path = sound_path.into();
    }

    if matches.is_present("silent") {
        config.sound.enabled = false;
    }
}

/// `None` when no `--time` was given and the user should be prompted.
pub fn alarm_time(matches: &clap::ArgMatches) -> Result<Option<AlarmTime>, anyhow::Error> {
    matches
        .value_of("time")
        .map(|time| {
            time.parse::<AlarmTime>()
                .with_context(|| format!("Invalid --time value {:?}", time))
        })
        .transpose()
}
