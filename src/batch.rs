//src/batch.rs

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use rayon::prelude::*;

use crate::error::SequenceError;
use crate::types::SequenceRecord;
use crate::{analyze_record, analyze_text, AnalysisResult};

/// Analyzes many records in parallel on the rayon pool.
///
/// Records are independent, so this returns exactly what a sequential loop
/// over [`analyze_record`] would, in input order.
pub fn analyze_batch(records: Vec<SequenceRecord>) -> Vec<AnalysisResult> {
    records.into_par_iter().map(analyze_record).collect()
}

type ResultSlot = Mutex<Option<Result<AnalysisResult, SequenceError>>>;

/// Handle to one analysis job submitted to the rayon pool.
///
/// The worker publishes into a shared slot; `wait` blocks on a condvar
/// until the slot fills. Load and analysis errors arrive through the same
/// slot as successes, never through a side channel.
pub struct AnalysisHandle {
    slot: Arc<(ResultSlot, Condvar)>,
}

impl AnalysisHandle {
    /// Blocks until the job finishes and takes its result.
    pub fn wait(self) -> Result<AnalysisResult, SequenceError> {
        let (lock, cvar) = &*self.slot;
        let mut guard = lock.lock();
        loop {
            if let Some(result) = guard.take() {
                return result;
            }
            cvar.wait(&mut guard);
        }
    }

    /// `true` once the job has published its result.
    pub fn is_finished(&self) -> bool {
        self.slot.0.lock().is_some()
    }
}

fn spawn_job<F>(job: F) -> AnalysisHandle
where
    F: FnOnce() -> Result<AnalysisResult, SequenceError> + Send + 'static,
{
    let slot = Arc::new((Mutex::new(None), Condvar::new()));
    let worker_slot = Arc::clone(&slot);
    rayon::spawn(move || {
        let result = job();
        let (lock, cvar) = &*worker_slot;
        *lock.lock() = Some(result);
        cvar.notify_all();
    });
    AnalysisHandle { slot }
}

/// Submits one validated record for analysis on the rayon pool.
pub fn submit(record: SequenceRecord) -> AnalysisHandle {
    spawn_job(move || Ok(analyze_record(record)))
}

/// Submits pasted text for parsing and analysis. Parsing runs on the
/// worker, so load errors arrive through the handle like any other result.
pub fn submit_text(text: String) -> AnalysisHandle {
    spawn_job(move || analyze_text(&text))
}

/// Submits a FASTA file path for loading and analysis.
pub fn submit_file(path: std::path::PathBuf) -> AnalysisHandle {
    spawn_job(move || crate::analyze_file(path))
}
