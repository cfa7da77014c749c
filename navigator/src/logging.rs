use chrono::Local;
use colog::format::CologStyle;
use colored::Colorize;
use log::{Level, LevelFilter};

/// colog's level tokens, preceded by a wall-clock timestamp
struct TimestampedStyle;

impl CologStyle for TimestampedStyle {
    fn prefix_token(&self, level: &Level) -> String {
        let now = Local::now().format("%H:%M:%S%.3f").to_string();
        format!(
            "{} {}{}{}",
            now.dimmed(),
            "[".blue().bold(),
            self.level_color(level, self.level_token(level)),
            "]".blue().bold()
        )
    }
}

pub struct Logger;

impl Logger {
    /// installs the global logger; `RUST_LOG` still refines the filter
    pub fn init(verbosity: LevelFilter) {
        let mut builder = colog::basic_builder();
        builder.format(colog::formatter(TimestampedStyle));
        builder.filter(None, verbosity);
        builder.parse_env(env_logger::Env::default());

        if let Err(e) = builder.try_init() {
            eprintln!("logger already initialised: {}", e);
        }
    }
}
