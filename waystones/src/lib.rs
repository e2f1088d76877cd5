use std::str::FromStr;

use log::{Level, LevelFilter};
use waystones_config::logging::LoggingConfig;

pub mod block;
pub mod entity;
pub mod inspect;
pub mod world;

/// The level to log at: `RUST_LOG` if it holds a valid level, the configured one otherwise.
pub fn log_level(env_level: Option<&str>, logging: &LoggingConfig) -> LevelFilter {
    env_level
        .map(LevelFilter::from_str)
        .and_then(Result::ok)
        .unwrap_or(logging.level)
}

pub fn logger_config(logging: &LoggingConfig) -> simplelog::Config {
    let mut config = simplelog::ConfigBuilder::new();

    if logging.timestamp {
        config.set_time_format_custom(time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));
        config.set_time_level(LevelFilter::Trace);
    } else {
        config.set_time_level(LevelFilter::Off);
    }

    if !logging.color {
        for level in Level::iter() {
            config.set_level_color(level, None);
        }
    }

    if logging.threads {
        config.set_thread_level(LevelFilter::Info);
    } else {
        config.set_thread_level(LevelFilter::Off);
    }

    config.build()
}

/// Installs the global logger. Does nothing if logging is disabled.
pub fn init_log(logging: &LoggingConfig) {
    if !logging.enabled {
        return;
    }
    let level = log_level(std::env::var("RUST_LOG").ok().as_deref(), logging);
    if let Err(err) = simplelog::SimpleLogger::init(level, logger_config(logging)) {
        eprintln!("Failed to initialize logger: {err}");
    }
}
