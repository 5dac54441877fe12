use color_eyre::eyre;
use termcolor::ColorChoice;
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogFormat {
    Json,
    PrettyCompact,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = eyre::Report;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s.eq_ignore_ascii_case("json") => Ok(LogFormat::Json),
            s if s.eq_ignore_ascii_case("pretty") => Ok(LogFormat::Pretty),
            s if s.eq_ignore_ascii_case("pretty-compact") => Ok(LogFormat::PrettyCompact),
            other => Err(eyre::eyre!("unknown log format: {other:?}")),
        }
    }
}

/// Default filter directive, enabling `level` for the line reader only.
fn default_directive(level: tracing::metadata::Level) -> String {
    let level = level.to_string().to_ascii_lowercase();
    format!("none,line_reader={level}")
}

/// Setup logging
///
/// Logs are written to stderr, keeping stdout for the lines being read.
///
/// # Errors
/// - If the logging directive cannot be parsed.
/// - If the global tracing subscriber cannot be installed.
pub fn setup(
    log_level: Option<tracing::metadata::Level>,
    log_format: Option<LogFormat>,
    color_choice: ColorChoice,
) -> eyre::Result<(LogFormat, bool)> {
    let default_log_level = log_level.unwrap_or(tracing::metadata::Level::WARN);
    let default_env_filter = tracing_subscriber::filter::EnvFilter::builder()
        .with_regex(true)
        .with_default_directive(default_log_level.into())
        .parse(default_directive(default_log_level))?;

    let env_filter_directive = std::env::var("RUST_LOG").ok();
    let env_filter = match env_filter_directive {
        Some(directive) => match tracing_subscriber::filter::EnvFilter::try_new(directive) {
            Ok(env_filter) => env_filter,
            Err(err) => {
                eprintln!("invalid log filter: {err}");
                eprintln!("falling back to default logging");
                default_env_filter
            }
        },
        None => default_env_filter,
    };

    let log_format = log_format.unwrap_or(LogFormat::PrettyCompact);
    let use_color = match color_choice {
        ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            use std::io::IsTerminal;
            std::io::stderr().is_terminal()
        }
    };

    let fmt_layer = match log_format {
        LogFormat::Json => tracing_subscriber::fmt::Layer::new()
            .json()
            .without_time()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::PrettyCompact => tracing_subscriber::fmt::Layer::new()
            .compact()
            .without_time()
            .with_ansi(use_color)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::Layer::new()
            .pretty()
            .without_time()
            .with_ansi(use_color)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok((log_format, use_color))
}

#[cfg(test)]
mod tests {
    use super::{default_directive, LogFormat};
    use color_eyre::eyre;
    use similar_asserts::assert_eq as sim_assert_eq;

    #[test]
    fn test_parse_log_format() -> eyre::Result<()> {
        sim_assert_eq!("json".parse::<LogFormat>()?, LogFormat::Json);
        sim_assert_eq!("Pretty".parse::<LogFormat>()?, LogFormat::Pretty);
        sim_assert_eq!(
            "pretty-compact".parse::<LogFormat>()?,
            LogFormat::PrettyCompact
        );
        assert!("yaml".parse::<LogFormat>().is_err());
        Ok(())
    }

    #[test]
    fn test_default_directive_parses() -> eyre::Result<()> {
        let directive = default_directive(tracing::metadata::Level::DEBUG);
        sim_assert_eq!(directive, "none,line_reader=debug");
        tracing_subscriber::filter::EnvFilter::builder().parse(directive)?;
        Ok(())
    }
}
