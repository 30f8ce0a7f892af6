use rose_alarm::{cli, load_config, prompt, run_alarm};

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli::build_command().get_matches();

    let mut config = load_config(cli::config_path(&matches));
    cli::apply_matches(&matches, &mut config);

    let alarm_time = match cli::alarm_time(&matches)? {
        Some(alarm_time) => alarm_time,
        None => prompt::read_alarm_time(std::io::stdin().lock(), std::io::stdout())?,
    };

    run_alarm(&config, alarm_time)
}
