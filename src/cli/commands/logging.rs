use clap::{builder::ValueParser, Arg, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order; the index is the `-v` count.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name or its index in `LEVELS` (0 to 4).
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        let level = level.trim().to_lowercase();
        let index = match level.parse::<usize>() {
            Ok(index) if index < LEVELS.len() => Some(index),
            Ok(_) => None,
            Err(_) => LEVELS.iter().position(|name| *name == level),
        };

        index
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("invalid log level, expected 0-4 or one of: {}", LEVELS.join(", ")))
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR); GATEHOUSE_LOG_LEVEL also takes 0-4")
            .env("GATEHOUSE_LOG_LEVEL")
            .global(true)
            .action(clap::ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
