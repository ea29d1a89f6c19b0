//! Concurrent batch processing of independent image jobs.
//!
//! A bounded worker pool fans the job list out, each worker handling one
//! file end to end. Jobs share nothing mutable (the engine's alpha maps are
//! read-only after construction), so a failing job is recorded in its own
//! result and never cancels or corrupts the others.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::engine::WatermarkEngine;
use crate::error::{Error, Result};

/// One file to process: where to read it and where to write the result.
#[derive(Debug, Clone)]
pub struct Job {
    /// Path of the watermarked input image.
    pub input: PathBuf,
    /// Path the cleaned image is written to.
    pub output: PathBuf,
}

impl Job {
    /// Create a job from an input and output path.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Terminal outcome of one job.
#[derive(Debug)]
pub struct JobResult {
    /// Input path of the job this result belongs to.
    pub input: PathBuf,
    /// A human-readable label on success, or the error that failed the job.
    pub outcome: std::result::Result<String, Error>,
}

impl JobResult {
    /// Whether the job produced its output.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Aggregate counts over a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of jobs submitted.
    pub attempted: usize,
    /// Jobs that wrote their output.
    pub succeeded: usize,
    /// Jobs that failed at decode, processing or write.
    pub failed: usize,
}

/// Process every job with a pool of `workers` threads.
///
/// Pass `workers = 0` to use all available CPU parallelism. Returns exactly
/// one result per job; ordering follows pool scheduling, not submission
/// order. Per-job failures are captured in the corresponding [`JobResult`]
/// and never abort the batch.
///
/// # Errors
///
/// Returns [`Error::WorkerPool`] if the thread pool cannot be built. This is
/// the only error path; everything after pool construction is infallible at
/// the batch level.
pub fn run(engine: &WatermarkEngine, jobs: &[Job], workers: usize) -> Result<Vec<JobResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    info!(
        jobs = jobs.len(),
        workers = pool.current_num_threads(),
        "starting batch"
    );

    let results = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let outcome = engine.process_file(&job.input, &job.output);
                if let Err(e) = &outcome {
                    warn!(input = %job.input.display(), error = %e, "job failed");
                }
                JobResult {
                    input: job.input.clone(),
                    outcome,
                }
            })
            .collect()
    });

    Ok(results)
}

/// Count successes and failures over a batch's results.
#[must_use]
pub fn summarize(results: &[JobResult]) -> BatchSummary {
    let succeeded = results.iter().filter(|r| r.is_success()).count();
    BatchSummary {
        attempted: results.len(),
        succeeded,
        failed: results.len() - succeeded,
    }
}
