//! Messages passed from pipeline tasks back to the UI thread

use crate::error::PipelineError;
use crate::pipeline::{ImageReference, OcrResult};

/// A finished pipeline run
#[derive(Debug, Clone)]
pub struct PipelineCompletion {
    /// What the run was started for
    pub reference: ImageReference,
    /// Recognized text or the failure that stopped the run
    pub outcome: Result<OcrResult, PipelineError>,
}
