//! Tracing initialization.
//!
//! Two layers on one registry:
//! - error log file: ERROR events only, written through `tracing_appender::non_blocking`;
//! - console (stderr): verbosity from `LogLevel`, off entirely when quiet.
//!
//! `json_logs` switches both layers to JSON events. Timestamps are local time.

use chrono::Local;
use file_sorter::output as out;
use file_sorter::platform::open_log_file_secure_append;
use file_sorter::{Config, LogLevel};
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Timestamp formatter: `YYYY-MM-DD HH:MM:SS,mmm` in local time.
struct LocalTime;
impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))
    }
}

#[inline]
fn console_filter(lvl: LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::OFF,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

fn fmt_layer<W>(writer: W, json: bool, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        tsfmt::layer()
            .with_writer(writer)
            .fmt_fields(tsfmt::format::JsonFields::new())
            .event_format(
                tsfmt::format()
                    .json()
                    .with_timer(LocalTime)
                    .with_level(true)
                    .with_target(false),
            )
            .boxed()
    } else {
        tsfmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_timer(LocalTime)
            .with_level(true)
            .with_target(false)
            .compact()
            .boxed()
    }
}

/// Open the error log; on failure warn and carry on with console logging only.
fn file_layer(path: &Path, json: bool) -> Option<(BoxedLayer, WorkerGuard)> {
    match open_log_file_secure_append(path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt_layer(writer, json, false)
                .with_filter(LevelFilter::ERROR)
                .boxed();
            Some((layer, guard))
        }
        Err(e) => {
            out::print_warn(&format!(
                "Error log '{}' could not be opened ({e}); failures will not be recorded to a file.",
                path.display()
            ));
            None
        }
    }
}

/// Install the global subscriber. Returns the file writer's guard, which must
/// be held until shutdown so buffered log lines get flushed.
pub fn init_tracing(cfg: &Config) -> Option<WorkerGuard> {
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    let mut guard = None;

    if let Some(path) = cfg.log_file.as_deref() {
        if let Some((layer, g)) = file_layer(path, cfg.json_logs) {
            layers.push(layer);
            guard = Some(g);
        }
    }

    let ansi = atty::is(atty::Stream::Stderr);
    layers.push(
        fmt_layer(std::io::stderr, cfg.json_logs, ansi)
            .with_filter(console_filter(cfg.log_level))
            .boxed(),
    );

    if tracing_subscriber::registry().with(layers).try_init().is_err() {
        out::print_warn("A global tracing subscriber was already installed; keeping it.");
    }
    guard
}
