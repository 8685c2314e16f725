//! Logging for the invoice CLI.
//!
//! Records go to stderr so that a rendered invoice on stdout can be piped
//! or redirected untouched. The filter and the optional log file are fixed
//! from the command line before the first record is written.

use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info";

/// Logging choices taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// EnvFilter directive. Falls back to `RUST_LOG`, then `info`.
    pub filter: Option<String>,
    /// File that receives a plain copy of every record, appended to.
    pub file: Option<PathBuf>,
}

// --- Formatter ---

/// `<time> <LEVEL> <target> <fields>`.
///
/// A single CLI run rarely crosses midnight, so the terminal gets the time
/// of day only; log files keep the full date and offset.
struct LocalFmt {
    timestamp: &'static str,
}

impl LocalFmt {
    const TERMINAL: LocalFmt = LocalFmt {
        timestamp: "%H:%M:%S%.3f",
    };
    const FILE: LocalFmt = LocalFmt {
        timestamp: "%Y-%m-%dT%H:%M:%S%.3f%:z",
    };
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let timestamp = Local::now().format(self.timestamp);

        if writer.has_ansi_escapes() {
            let color = match *meta.level() {
                Level::ERROR => "\x1b[1;31m",
                Level::WARN => "\x1b[1;33m",
                Level::INFO => "\x1b[1;32m",
                Level::DEBUG => "\x1b[1;34m",
                Level::TRACE => "\x1b[1;35m",
            };
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {color}{:>5}\x1b[0m \x1b[36m{}\x1b[0m ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Setup ---

/// Builds the level filter.
///
/// An explicit directive must parse; a malformed `RUST_LOG` falls back to
/// `info` so a stray environment variable never stops an invoice run.
fn build_filter(directive: Option<&str>) -> Result<EnvFilter> {
    match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter '{directive}'")),
        None => {
            Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        }
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber. Call once, before any work is logged.
///
/// - Stderr: colored when attached to a terminal, plain when redirected.
/// - File: plain text, only when [`LogOptions::file`] is set.
///
/// # Errors
///
/// Fails on a malformed filter directive, an unopenable log file, or when a
/// global subscriber is already installed.
pub fn init_logging(options: &LogOptions) -> Result<()> {
    let filter = build_filter(options.filter.as_deref())?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt::TERMINAL)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = options
        .file
        .as_deref()
        .map(open_log_file)
        .transpose()?
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .event_format(LocalFmt::FILE)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging is already initialized")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn explicit_filter_is_accepted() {
        assert!(build_filter(Some("gst_core=debug,warn")).is_ok());
    }

    #[test]
    fn malformed_filter_is_rejected() {
        let err = build_filter(Some("gst_core=loud")).unwrap_err();

        assert!(err.to_string().contains("invalid log filter 'gst_core=loud'"));
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let err = open_log_file(Path::new("no/such/dir/gst.log")).unwrap_err();

        assert!(err.to_string().contains("no/such/dir/gst.log"));
    }

    #[test]
    fn plain_format_has_level_target_and_fields() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(LocalFmt::FILE)
            .with_writer(captured.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "gst_cli::app", count = 2, "invoice failed validation");
        });

        let line = captured.text();
        assert!(line.ends_with(" WARN gst_cli::app invoice failed validation count=2\n"), "{line}");
        assert!(!line.contains('\x1b'));
    }
}
