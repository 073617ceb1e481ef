use rayon::prelude::*;

use crate::{
    foundation::error::{FrameshotError, FrameshotResult},
    render::compositor::{ComposeRequest, ComposedImage, Compositor},
};

/// One named compose job.
#[derive(Clone, Debug)]
pub struct BatchJob {
    /// Label used in logs and in the report, usually the output file name.
    pub name: String,
    /// What to compose.
    pub request: ComposeRequest,
}

/// Outcome of one job.
#[derive(Debug)]
pub struct BatchItem {
    /// Job label.
    pub name: String,
    /// Encoded image or the error that stopped this job.
    pub result: FrameshotResult<ComposedImage>,
}

/// Outcome of a batch, in job order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Jobs that produced an image.
    pub succeeded: usize,
    /// Jobs that failed.
    pub failed: usize,
    /// Per-job results.
    pub results: Vec<BatchItem>,
}

/// Compose every job on a rayon pool of `threads` workers (rayon's default when `None`).
///
/// A failing job is logged and counted; it never stops the others.
#[tracing::instrument(skip_all, fields(jobs = jobs.len(), threads = ?threads))]
pub fn compose_all(
    compositor: &Compositor,
    jobs: Vec<BatchJob>,
    threads: Option<usize>,
) -> FrameshotResult<BatchReport> {
    let pool = build_thread_pool(threads)?;
    let results: Vec<BatchItem> = pool.install(|| {
        jobs.into_par_iter()
            .map(|job| {
                let result = compositor.compose(&job.request);
                if let Err(err) = &result {
                    tracing::warn!(job = %job.name, "compose failed: {err}");
                }
                BatchItem {
                    name: job.name,
                    result,
                }
            })
            .collect()
    });

    let failed = results.iter().filter(|item| item.result.is_err()).count();
    let report = BatchReport {
        succeeded: results.len() - failed,
        failed,
        results,
    };
    tracing::info!(succeeded = report.succeeded, failed = report.failed, "batch finished");
    Ok(report)
}

fn build_thread_pool(threads: Option<usize>) -> FrameshotResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(FrameshotError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FrameshotError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
