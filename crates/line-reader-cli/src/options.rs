use clap::Parser;
use std::path::PathBuf;

/// Logging flags to `#[command(flatten)]` into your CLI
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct Verbosity {
    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity",
        long_help = None,
    )]
    pub verbose: u8,

    #[arg(
        long,
        short = 'q',
        action = clap::ArgAction::Count,
        global = true,
        help = "Decrease logging verbosity",
        long_help = None,
        conflicts_with = "verbose",
    )]
    pub quiet: u8,
}

impl Verbosity {
    /// Log level selected by the flags, if any were given.
    pub fn log_level(&self) -> Option<tracing::metadata::Level> {
        use tracing::metadata::Level;
        match (self.verbose, self.quiet) {
            (0, 0) => None,
            (0, _) => Some(Level::ERROR),
            (1, _) => Some(Level::INFO),
            (2, _) => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "line-reader",
    version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
    about = "read a text file line by line",
    author = "romnn <contact@romnn.com>",
)]
pub struct Options {
    #[arg(
        long = "file",
        env = "LINE_READER_FILE",
        default_value = "test.txt",
        help = "text file to read"
    )]
    pub file: PathBuf,

    #[arg(
        long = "write-demo",
        env = "LINE_READER_WRITE_DEMO",
        help = "write a two line demo file before reading",
        action = clap::ArgAction::SetTrue,
    )]
    pub write_demo: bool,

    #[arg(
        long = "limit",
        env = "LINE_READER_LIMIT",
        help = "stop after reading this many lines"
    )]
    pub limit: Option<usize>,

    #[arg(
        long = "max-line-length",
        env = "LINE_READER_MAX_LINE_LENGTH",
        help = "fail on lines longer than this many bytes"
    )]
    pub max_line_length: Option<usize>,

    #[arg(
        long = "strict-utf8",
        env = "LINE_READER_STRICT_UTF8",
        help = "fail on lines that are not valid UTF-8 instead of replacing invalid bytes",
        action = clap::ArgAction::SetTrue,
    )]
    pub strict_utf8: bool,

    #[arg(
        long = "buffer-capacity",
        env = "LINE_READER_BUFFER_CAPACITY",
        default_value_t = line_reader::options::DEFAULT_BUFFER_CAPACITY,
        help = "capacity of the read buffer in bytes"
    )]
    pub buffer_capacity: usize,

    #[arg(
        long = "color",
        env = "LINE_READER_COLOR",
        help = "enable or disable color"
    )]
    pub color_choice: Option<termcolor::ColorChoice>,

    #[command(flatten)]
    pub verbosity: Verbosity,

    #[arg(
        long = "log",
        env = "LINE_READER_LOG_LEVEL",
        aliases = ["log-level"],
        help = "Log level. When using a more sophisticated logging setup using RUST_LOG environment variable, this option is overwritten."
    )]
    pub log_level: Option<tracing::metadata::Level>,

    #[arg(
        long = "log-format",
        env = "LINE_READER_LOG_FORMAT",
        help = "log format (json, pretty, or pretty-compact)"
    )]
    pub log_format: Option<crate::logging::LogFormat>,
}

impl Options {
    pub fn reader_options(&self) -> line_reader::Options {
        line_reader::Options::default()
            .with_buffer_capacity(self.buffer_capacity)
            .with_max_line_length(self.max_line_length)
            .with_strict_utf8(self.strict_utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::{Options, Verbosity};
    use clap::{CommandFactory, Parser};
    use color_eyre::eyre;
    use similar_asserts::assert_eq as sim_assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_command() {
        Options::command().debug_assert();
    }

    #[test]
    fn test_parse_options() -> eyre::Result<()> {
        let options = Options::try_parse_from([
            "line-reader",
            "--file",
            "lines.txt",
            "--limit",
            "1",
            "--max-line-length",
            "80",
            "--strict-utf8",
            "-vv",
        ])?;
        sim_assert_eq!(options.file, PathBuf::from("lines.txt"));
        sim_assert_eq!(options.limit, Some(1));
        sim_assert_eq!(
            options.verbosity.log_level(),
            Some(tracing::metadata::Level::DEBUG)
        );
        sim_assert_eq!(
            options.reader_options(),
            line_reader::Options::default()
                .with_max_line_length(80)
                .with_strict_utf8(true)
        );
        Ok(())
    }

    #[test]
    fn test_verbosity_log_level() {
        use tracing::metadata::Level;
        let verbosity = |verbose, quiet| Verbosity { verbose, quiet }.log_level();
        sim_assert_eq!(verbosity(0, 0), None);
        sim_assert_eq!(verbosity(0, 1), Some(Level::ERROR));
        sim_assert_eq!(verbosity(1, 0), Some(Level::INFO));
        sim_assert_eq!(verbosity(3, 0), Some(Level::TRACE));
    }
}
