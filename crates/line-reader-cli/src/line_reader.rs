#![forbid(unsafe_code)]

mod logging;
mod options;

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use line_reader::{Errors, LineReader};
use std::io::Write;
use std::path::Path;

const DEMO_CONTENTS: &str = "one\ntwo\n";

/// Write the demo file, readable and writable by the owner only.
fn write_demo_file(path: &Path) -> eyre::Result<()> {
    let mut open_options = std::fs::OpenOptions::new();
    open_options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        open_options.mode(0o600);
    }
    let mut file = open_options
        .open(path)
        .wrap_err_with(|| eyre::eyre!("failed to create {path:?}"))?;
    file.write_all(DEMO_CONTENTS.as_bytes())
        .wrap_err_with(|| eyre::eyre!("failed to write {path:?}"))?;
    tracing::debug!(?path, "wrote demo file");
    Ok(())
}

/// Print up to `limit` lines to `out`.
///
/// Stops at the first failed write. The line source is dropped before returning,
/// so its errors are in the caller's slot either way.
fn print_lines<I>(lines: I, limit: Option<usize>, out: &mut impl Write) -> std::io::Result<usize>
where
    I: IntoIterator<Item = String>,
{
    let mut count = 0;
    for line in lines.into_iter().take(limit.unwrap_or(usize::MAX)) {
        writeln!(out, "iterator line: {line}")?;
        count += 1;
    }
    Ok(count)
}

fn main() -> eyre::Result<()> {
    if std::env::var("RUST_SPANTRACE").is_err() {
        std::env::set_var("RUST_SPANTRACE", "0");
    }
    color_eyre::install()?;

    let options = options::Options::parse();
    let color_choice = options.color_choice.unwrap_or(termcolor::ColorChoice::Auto);
    let log_level = options.log_level.or_else(|| options.verbosity.log_level());
    let (log_format, use_color) = logging::setup(log_level, options.log_format, color_choice)?;
    tracing::debug!(?log_format, use_color, "logging initialized");

    if options.write_demo {
        write_demo_file(&options.file)?;
    }

    let start = std::time::Instant::now();
    let mut errors = Errors::new();
    let reader =
        LineReader::new(&options.file, &mut errors).with_options(options.reader_options());
    let written = {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        print_lines(reader, options.limit, &mut out)
    };
    tracing::info!(elapsed = ?start.elapsed(), errors = errors.len(), "done");

    let mut failed = !errors.is_empty();
    if let Err(err) = written {
        eprintln!("failed to write lines: {err}");
        failed = true;
    }
    if !errors.is_empty() {
        eprintln!("{errors}");
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
