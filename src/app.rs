//! Application orchestrator.
//! Loads ambient config, initializes logging, installs the interrupt handler,
//! runs the sort, and maps the outcome to an exit status.

use file_sorter::cli::Args;
use file_sorter::config::load_settings;
use file_sorter::output as out;
use file_sorter::{sort_tree, ConsoleReporter, SortError};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::logging::init_tracing;

/// Exit status after SIGINT, matching the shell convention (128 + 2).
const INTERRUPTED_EXIT: i32 = 130;

/// Run the CLI application.
pub fn run(args: Args) -> ExitCode {
    let mut cfg = args.to_config();

    // Config problems surface before logging exists, so they go to stderr directly.
    match load_settings() {
        Ok(Some(settings)) => settings.apply(&mut cfg),
        Ok(None) => {}
        Err(e) => return fail(&e),
    }

    let guard_slot: Arc<Mutex<Option<WorkerGuard>>> = Arc::new(Mutex::new(init_tracing(&cfg)));
    {
        let guard_slot = Arc::clone(&guard_slot);
        let installed = ctrlc::set_handler(move || {
            out::print_warn("Interrupted; in-flight copies are abandoned.");
            if let Ok(mut g) = guard_slot.lock() {
                // Dropping the guard flushes the error log.
                let _ = g.take();
            }
            std::process::exit(INTERRUPTED_EXIT);
        });
        if let Err(e) = installed {
            warn!(error = %e, "could not install interrupt handler");
        }
    }

    debug!("Starting file_sorter: {:?}", cfg);

    let code = match sort_tree(&cfg, &ConsoleReporter) {
        Ok(summary) => {
            debug!(?summary, "run complete");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    };

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    code
}

fn fail(e: &SortError) -> ExitCode {
    out::print_error(&e.to_string());
    ExitCode::from(e.exit_code())
}
