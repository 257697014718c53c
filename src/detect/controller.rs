use anyhow::{bail, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::classifier::{classify, ClassificationResult};
use crate::signals::{collect_snapshot, HostSurfaces};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Runs the collect-then-classify pipeline, one run at a time.
///
/// The design assumes a single run per host snapshot; an overlapping
/// second run is refused rather than raced. Sequential re-runs are fine:
/// the flag clears when a run finishes either way.
pub struct Detector {
    in_flight: AtomicBool,
}

impl Detector {
    pub fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    /// Collect a snapshot from the host and classify it.
    ///
    /// This is the crate's single entry point for collaborators. Probe
    /// failures never surface here (the collector degrades them); any
    /// error returned is run-level and leaves the caller fully usable.
    pub async fn run(&self, host: &dyn HostSurfaces) -> Result<ClassificationResult> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            bail!("a detection run is already in flight");
        }
        let outcome = self.run_inner(host).await;
        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_inner(&self, host: &dyn HostSurfaces) -> Result<ClassificationResult> {
        let run_id = Uuid::new_v4();
        let snapshot = collect_snapshot(host).await;
        let result = classify(&snapshot);
        log_info!(
            "detection run {run_id}: {} (score {}, {}% confidence, {} of {} rules triggered)",
            result.top_category,
            result.top_score,
            result.confidence,
            result.votes.iter().filter(|vote| vote.triggered).count(),
            result.votes.len(),
        );
        Ok(result)
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}
