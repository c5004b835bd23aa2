//! Application Coordinator
//!
//! Runs OCR pipelines in the background and hands their results back to the
//! UI thread.

use anyhow::Result;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::config::SettingsStore;
use crate::error::PipelineError;
use crate::pipeline::{ImageReference, OcrPipeline, OcrResult};
use crate::shared::PipelineCompletion;

/// Owns the async runtime and the completion channel
pub struct OcrService {
    runtime: Runtime,
    pipeline: Arc<OcrPipeline>,
    /// Channel pipeline tasks report on
    completion_tx: Sender<PipelineCompletion>,
    /// Drained by the UI thread
    completion_rx: Receiver<PipelineCompletion>,
    in_flight: usize,
}

impl OcrService {
    pub fn new(pipeline: OcrPipeline) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("ocr-worker")
            .enable_all()
            .build()?;
        let (completion_tx, completion_rx) = unbounded();

        info!("OCR service started");

        Ok(Self {
            runtime,
            pipeline: Arc::new(pipeline),
            completion_tx,
            completion_rx,
            in_flight: 0,
        })
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        self.pipeline.settings()
    }

    /// Start a pipeline run. `on_complete` is called from the worker after
    /// the completion was queued, typically to wake the UI.
    ///
    /// Runs are never de-duplicated or cancelled.
    pub fn submit<F>(&mut self, reference: ImageReference, on_complete: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let pipeline = self.pipeline.clone();
        let tx = self.completion_tx.clone();
        self.in_flight += 1;
        debug!("Submitting {} run ({} in flight)", reference.kind(), self.in_flight);

        self.runtime.spawn(async move {
            let outcome = pipeline.run(reference.clone()).await;
            let _ = tx.send(PipelineCompletion { reference, outcome });
            on_complete();
        });
    }

    /// Next finished run, if any
    pub fn try_next_completion(&mut self) -> Option<PipelineCompletion> {
        let completion = self.completion_rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
    }

    /// Number of runs submitted but not yet collected
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Run blocking work (engine queries, file reads) on the runtime's blocking
    /// pool. The value arrives on the returned channel, then `on_complete` runs.
    pub fn spawn_query<T, F, W>(&self, query: F, on_complete: W) -> Receiver<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
        W: FnOnce() + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        self.runtime.spawn_blocking(move || {
            let _ = tx.send(query());
            on_complete();
        });
        rx
    }

    /// Run one pipeline to completion on the calling thread
    pub fn run_blocking(&self, reference: ImageReference) -> Result<OcrResult, PipelineError> {
        self.runtime.block_on(self.pipeline.run(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::pipeline::tests::MockRecognizer;
    use crate::vault::memory::MemoryVault;
    use std::time::Duration;

    fn service(vault: MemoryVault, recognizer: MockRecognizer) -> OcrService {
        let pipeline = OcrPipeline::new(
            Arc::new(vault),
            Arc::new(recognizer),
            Arc::new(SettingsStore::in_memory(Settings::default())),
        );
        OcrService::new(pipeline).unwrap()
    }

    fn wait_for_completion(service: &mut OcrService) -> PipelineCompletion {
        for _ in 0..200 {
            if let Some(completion) = service.try_next_completion() {
                return completion;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("pipeline did not complete");
    }

    #[test]
    fn test_submit_reports_completion() {
        let vault = MemoryVault::new().with_file("a.png", vec![1]);
        let mut service = service(vault, MockRecognizer::ok("done"));

        service.submit(ImageReference::TypedPath("a.png".into()), || {});
        assert_eq!(service.in_flight(), 1);

        let completion = wait_for_completion(&mut service);
        assert_eq!(completion.reference, ImageReference::TypedPath("a.png".into()));
        assert_eq!(completion.outcome.unwrap().text, "done");
        assert_eq!(service.in_flight(), 0);
    }

    #[test]
    fn test_failures_come_back_as_completions() {
        let mut service = service(MemoryVault::new(), MockRecognizer::ok("unused"));

        service.submit(ImageReference::LastInNote, || {});

        let completion = wait_for_completion(&mut service);
        assert!(matches!(completion.outcome, Err(PipelineError::Locate(_))));
    }

    #[test]
    fn test_on_complete_is_called() {
        let vault = MemoryVault::new().with_file("a.png", vec![1]);
        let mut service = service(vault, MockRecognizer::ok("x"));
        let (tx, rx) = crossbeam_channel::bounded(1);

        service.submit(ImageReference::TypedPath("a.png".into()), move || {
            let _ = tx.send(());
        });

        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn test_spawn_query_runs_off_thread() {
        let service = service(MemoryVault::new(), MockRecognizer::ok("unused"));
        let caller = std::thread::current().id();
        let (woke_tx, woke_rx) = crossbeam_channel::bounded(1);

        let rx = service.spawn_query(
            move || std::thread::current().id() != caller,
            move || {
                let _ = woke_tx.send(());
            },
        );

        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(true));
        assert!(woke_rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn test_run_blocking() {
        let vault = MemoryVault::new().with_file("a.png", vec![1]);
        let service = service(vault, MockRecognizer::ok("sync"));

        let result = service.run_blocking(ImageReference::TypedPath("a.png".into())).unwrap();
        assert_eq!(result.text, "sync");
    }
}
