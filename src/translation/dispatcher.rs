/*!
 * Parallel multi-service translation dispatch.
 *
 * This is the orchestrator core: it builds the cross product of text chunks
 * and requested services, executes each (chunk, service) unit on a bounded
 * worker pool, absorbs per-unit provider failures as inline error markers,
 * and reassembles each service's output strictly in chunk order regardless
 * of completion order.
 *
 * Configuration mistakes (unknown service, out-of-range bounds) are returned
 * synchronously before any work is dispatched; once a batch is running it
 * always completes and always yields one result per requested service.
 */

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::app_config::{
    CHUNK_SIZE_MAX, CHUNK_SIZE_MIN, MAX_WORKERS_MAX, MAX_WORKERS_MIN,
};
use crate::errors::BatchError;
use crate::services::ServiceRegistry;

use super::assembler::{self, ServiceBatchResult};
use super::chunker;
use super::glossary::Glossary;

/// Progress callback invoked once per completed unit
///
/// Called from whichever worker task completed the unit; the consumer must
/// not assume any particular thread and is responsible for marshalling to a
/// UI-affinity thread if it needs one. The `completed` argument is
/// monotonically non-decreasing and reaches `total` on the final call.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Cooperative cancellation flag shared with a running batch
///
/// Checked at the per-unit boundary: units that have not started when the
/// flag is raised complete immediately with a cancellation marker, so the
/// one-result-per-unit invariant still holds.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a new, unraised flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag; in-flight network calls still run to completion
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the flag has been raised
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Tuning options for a dispatch run
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Worker pool size
    pub max_workers: usize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            max_workers: 3,
        }
    }
}

/// The unit of concurrent work: one chunk paired with one service
#[derive(Debug, Clone)]
struct TranslationUnit {
    chunk_index: usize,
    service_id: String,
    chunk_text: String,
}

/// Outcome of one unit; errors are already folded into the text
#[derive(Debug)]
struct UnitResult {
    chunk_index: usize,
    service_id: String,
    text: String,
}

/// Format a provider failure as the inline error marker
fn error_marker(message: &str) -> String {
    format!("[Error: {}]", message)
}

/// Parallel dispatcher translating chunks through multiple services at once
pub struct ParallelDispatcher {
    registry: Arc<ServiceRegistry>,
    glossary: Glossary,
    options: DispatchOptions,
    cancel: CancelFlag,
}

impl ParallelDispatcher {
    /// Create a dispatcher over a service registry with default options
    pub fn new(registry: Arc<ServiceRegistry>, glossary: Glossary) -> Self {
        Self::with_options(registry, glossary, DispatchOptions::default())
    }

    /// Create a dispatcher with explicit options
    pub fn with_options(
        registry: Arc<ServiceRegistry>,
        glossary: Glossary,
        options: DispatchOptions,
    ) -> Self {
        Self {
            registry,
            glossary,
            options,
            cancel: CancelFlag::new(),
        }
    }

    /// Get a handle to this dispatcher's cancellation flag
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Validate options and the requested service set before dispatching
    fn validate(&self, services: &[String]) -> Result<(), BatchError> {
        if self.options.chunk_size < CHUNK_SIZE_MIN || self.options.chunk_size > CHUNK_SIZE_MAX {
            return Err(BatchError::InvalidChunkSize {
                value: self.options.chunk_size,
                min: CHUNK_SIZE_MIN,
                max: CHUNK_SIZE_MAX,
            });
        }
        if self.options.max_workers < MAX_WORKERS_MIN || self.options.max_workers > MAX_WORKERS_MAX
        {
            return Err(BatchError::InvalidWorkerCount {
                value: self.options.max_workers,
                min: MAX_WORKERS_MIN,
                max: MAX_WORKERS_MAX,
            });
        }
        if services.is_empty() {
            return Err(BatchError::NoServicesRequested);
        }
        for service_id in services {
            let service = self
                .registry
                .get(service_id)
                .ok_or_else(|| BatchError::UnknownService(service_id.clone()))?;
            if !service.is_configured() {
                return Err(BatchError::ServiceNotConfigured(service_id.clone()));
            }
        }
        Ok(())
    }

    /// Translate text through every requested service concurrently
    ///
    /// Returns one `ServiceBatchResult` per requested service. Individual
    /// unit failures never abort the batch; their slots hold an
    /// `[Error: ...]` marker instead.
    pub async fn translate_parallel(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        services: &[String],
        progress_callback: Option<ProgressCallback>,
    ) -> Result<HashMap<String, ServiceBatchResult>, BatchError> {
        self.validate(services)?;

        // Duplicate ids would double-count units and collide in the result
        // map, so the batch runs over the deduplicated set.
        let mut service_ids: Vec<String> = Vec::new();
        for service_id in services {
            if !service_ids.contains(service_id) {
                service_ids.push(service_id.clone());
            }
        }

        let chunks = chunker::split_text(text, self.options.chunk_size);
        let chunk_count = chunks.len();
        let total = chunk_count * service_ids.len();
        debug!(
            "Dispatching batch: {} chunks x {} services = {} units, {} workers",
            chunk_count,
            service_ids.len(),
            total,
            self.options.max_workers
        );

        let mut units = Vec::with_capacity(total);
        for chunk in &chunks {
            for service_id in &service_ids {
                units.push(TranslationUnit {
                    chunk_index: chunk.index,
                    service_id: service_id.clone(),
                    chunk_text: chunk.text.clone(),
                });
            }
        }

        // Create a semaphore to limit concurrent requests
        let semaphore = Arc::new(Semaphore::new(self.options.max_workers));
        // The counter and the callback invocation share one lock so the
        // consumer never observes progress going backwards.
        let completed = Arc::new(Mutex::new(0usize));
        let source_lang = source_lang.to_string();
        let target_lang = target_lang.to_string();

        let results: Vec<UnitResult> = stream::iter(units)
            .map(|unit| {
                let registry = Arc::clone(&self.registry);
                let semaphore = Arc::clone(&semaphore);
                let completed = Arc::clone(&completed);
                let progress_callback = progress_callback.clone();
                let cancel = self.cancel.clone();
                let source_lang = source_lang.clone();
                let target_lang = target_lang.clone();

                async move {
                    // Acquire a permit from the semaphore
                    let _permit = semaphore.acquire().await.unwrap();

                    let text = if cancel.is_cancelled() {
                        error_marker("cancelled")
                    } else {
                        match registry.get(&unit.service_id) {
                            Some(service) => {
                                match service
                                    .translate(&unit.chunk_text, &source_lang, &target_lang)
                                    .await
                                {
                                    Ok(translated) => translated,
                                    Err(e) => {
                                        warn!(
                                            "Unit (chunk {}, service '{}') failed: {}",
                                            unit.chunk_index, unit.service_id, e
                                        );
                                        error_marker(&e.to_string())
                                    }
                                }
                            }
                            // Unreachable after validation; the registry is
                            // read-only while a batch is in flight.
                            None => error_marker(&format!(
                                "Service '{}' is not available",
                                unit.service_id
                            )),
                        }
                    };

                    {
                        let mut current = completed.lock().unwrap();
                        *current += 1;
                        if let Some(callback) = &progress_callback {
                            callback(*current, total);
                        }
                    }

                    UnitResult {
                        chunk_index: unit.chunk_index,
                        service_id: unit.service_id,
                        text,
                    }
                }
            })
            .buffer_unordered(self.options.max_workers)
            .collect::<Vec<_>>()
            .await;

        // Index results by service, then restore chunk order explicitly;
        // completion order carries no meaning.
        let mut per_service: HashMap<String, HashMap<usize, String>> = service_ids
            .iter()
            .map(|id| (id.clone(), HashMap::new()))
            .collect();
        for result in results {
            if let Some(slots) = per_service.get_mut(&result.service_id) {
                slots.insert(result.chunk_index, result.text);
            }
        }

        let mut output = HashMap::new();
        for service_id in &service_ids {
            let mut slots = per_service.remove(service_id).unwrap_or_default();
            let ordered: Vec<String> = (0..chunk_count)
                .map(|index| {
                    slots
                        .remove(&index)
                        .unwrap_or_else(|| error_marker("missing result"))
                })
                .collect();
            output.insert(
                service_id.clone(),
                assembler::assemble(service_id, ordered, &self.glossary),
            );
        }

        Ok(output)
    }
}
