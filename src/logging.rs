use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Environment variable consulted when no `--log-level` is given.
pub const LOG_ENV: &str = "BURLY_DEV_LOG";

/// Resolve the log level: explicit flag, then `BURLY_DEV_LOG`, then info.
/// A blank environment value counts as unset.
pub fn resolve_level(flag: Option<&str>, env: Option<&str>) -> Result<LevelFilter, String> {
    let env = env.filter(|v| !v.trim().is_empty());
    match flag.or(env) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| format!("invalid log level: {value}")),
        None => Ok(LevelFilter::Info),
    }
}

/// Install the stderr terminal logger.
/// Best-effort: a logger that is already set is left in place.
pub fn init(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment() {
        assert_eq!(
            resolve_level(Some("debug"), Some("error")),
            Ok(LevelFilter::Debug)
        );
    }

    #[test]
    fn environment_used_without_flag() {
        assert_eq!(resolve_level(None, Some("warn")), Ok(LevelFilter::Warn));
    }

    #[test]
    fn blank_environment_is_unset() {
        assert_eq!(resolve_level(None, Some("")), Ok(LevelFilter::Info));
        assert_eq!(resolve_level(None, Some("  ")), Ok(LevelFilter::Info));
    }

    #[test]
    fn defaults_to_info() {
        assert_eq!(resolve_level(None, None), Ok(LevelFilter::Info));
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(resolve_level(Some("chatty"), None).is_err());
    }
}
