//! Run orchestration: validate, walk, fan copies out to a worker pool, join.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error, info};

use super::copier::Copier;
use super::report::Reporter;
use super::walker::TreeWalker;
use crate::config::Config;
use crate::errors::SortError;

/// Counts for one completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Regular files discovered by the walk.
    pub files_seen: usize,
    /// Files copied into a bucket.
    pub copied: usize,
    /// Files whose copy failed (each reported to the `Reporter`).
    pub failed: usize,
    /// Entries the walk could not read.
    pub walk_errors: usize,
}

/// Sort every regular file under `config.source` into
/// `config.destination/<extension>/`.
///
/// Only run-level conditions are returned as errors (missing source, unusable
/// destination root, pool construction). Per-file failures go to `reporter`
/// and are counted in the summary. Returns once every dispatched copy has
/// finished.
pub fn sort_tree(config: &Config, reporter: &dyn Reporter) -> Result<RunSummary, SortError> {
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .thread_name(|i| format!("file_sorter-copy-{i}"))
        .build()
        .map_err(|e| {
            error!(code = 30u16, error = %e, "Failed to build copy worker pool");
            SortError::WorkerPool(e.to_string())
        })?;

    let copier = Copier::new(&config.destination);
    let walker = TreeWalker::new(&config.source)
        .excluding(nested_destination(&config.source, &config.destination));

    info!(
        source = %config.source.display(),
        destination = %config.destination.display(),
        workers = pool.current_num_threads(),
        "Sorting files"
    );

    let copied = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let mut files_seen = 0;
    let mut walk_errors = 0;

    // The walk stays on this thread; copies run on the pool. The scope does
    // not return until every spawned copy has.
    pool.in_place_scope(|scope| {
        let copier = &copier;
        let copied = &copied;
        let failed = &failed;
        for found in walker {
            let item = match found {
                Ok(item) => item,
                Err(e) => {
                    walk_errors += 1;
                    reporter.walk_failed(&e);
                    continue;
                }
            };
            files_seen += 1;
            debug!(path = %item.path.display(), depth = item.depth, "discovered");
            scope.spawn(move |_| match copier.copy(&item) {
                Ok(dest) => {
                    copied.fetch_add(1, Ordering::Relaxed);
                    reporter.copied(&item.path, &dest);
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    reporter.copy_failed(&item.path, copier.destination(), &e);
                }
            });
        }
    });

    let summary = RunSummary {
        files_seen,
        copied: copied.into_inner(),
        failed: failed.into_inner(),
        walk_errors,
    };
    info!(
        files = summary.files_seen,
        copied = summary.copied,
        failed = summary.failed,
        walk_errors = summary.walk_errors,
        "Sorting finished"
    );
    Ok(summary)
}

/// When the destination lives inside the source, the path under which the
/// walker will meet it; that subtree must not be walked.
fn nested_destination(source: &Path, destination: &Path) -> Option<PathBuf> {
    let src_real = fs::canonicalize(source).ok()?;
    let dest_real = fs::canonicalize(destination).ok()?;
    let rel = dest_real.strip_prefix(&src_real).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(source.join(rel))
}
