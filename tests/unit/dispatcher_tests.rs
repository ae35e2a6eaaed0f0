/*!
 * Tests for the parallel dispatcher
 */

use std::sync::{Arc, Mutex};

use crate::common::{registry_with_working_mock, sample_document};
use multitrans::errors::BatchError;
use multitrans::services::ServiceRegistry;
use multitrans::services::mock::MockService;
use multitrans::translation::chunker;
use multitrans::translation::{DispatchOptions, Glossary, ParallelDispatcher, ProgressCallback};

fn options(chunk_size: usize, max_workers: usize) -> DispatchOptions {
    DispatchOptions {
        chunk_size,
        max_workers,
    }
}

#[tokio::test]
async fn test_translateParallel_withSlowService_shouldPreserveChunkOrder() {
    let mut registry = ServiceRegistry::new();
    registry.register("slow", Arc::new(MockService::slow(30)));
    let dispatcher = ParallelDispatcher::with_options(
        Arc::new(registry),
        Glossary::new(),
        options(100, 5),
    );

    let text = sample_document(20);
    let results = dispatcher
        .translate_parallel(&text, "en", "ru", &["slow".to_string()], None)
        .await
        .unwrap();

    // The mock echoes its input, so ordered output must mirror chunk order
    // even though units complete in arbitrary order
    let expected: Vec<String> = chunker::split_text(&text, 100)
        .into_iter()
        .map(|chunk| format!("[ru] {}", chunk.text))
        .collect();
    assert_eq!(results["slow"].ordered_text, expected);
}

#[tokio::test]
async fn test_translateParallel_shouldReportMonotonicProgress() {
    let registry = registry_with_working_mock("mock");
    let dispatcher =
        ParallelDispatcher::with_options(registry, Glossary::new(), options(100, 3));

    let observed: Arc<Mutex<Vec<(usize, usize)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&observed);
    let callback: ProgressCallback = Arc::new(move |completed, total| {
        sink.lock().unwrap().push((completed, total));
    });

    let text = sample_document(12);
    let chunk_count = chunker::split_text(&text, 100).len();
    dispatcher
        .translate_parallel(&text, "en", "ru", &["mock".to_string()], Some(callback))
        .await
        .unwrap();

    let calls = observed.lock().unwrap();
    assert_eq!(calls.len(), chunk_count);
    let mut previous = 0;
    for (completed, total) in calls.iter() {
        assert_eq!(*total, chunk_count);
        assert!(*completed > previous, "progress went backwards");
        previous = *completed;
    }
    assert_eq!(calls.last().unwrap().0, chunk_count);
}

#[tokio::test]
async fn test_translateParallel_withOneFailingService_shouldNotAffectOthers() {
    let mut registry = ServiceRegistry::new();
    registry.register("good", Arc::new(MockService::working()));
    registry.register("bad", Arc::new(MockService::failing()));
    let dispatcher = ParallelDispatcher::with_options(
        Arc::new(registry),
        Glossary::new(),
        options(100, 3),
    );

    let text = sample_document(6);
    let services = vec!["good".to_string(), "bad".to_string()];
    let results = dispatcher
        .translate_parallel(&text, "en", "ru", &services, None)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    for slot in &results["bad"].ordered_text {
        assert!(slot.starts_with("[Error: "), "expected marker, got {:?}", slot);
    }
    for slot in &results["good"].ordered_text {
        assert!(slot.starts_with("[ru] "), "good service was affected: {:?}", slot);
    }
}

#[tokio::test]
async fn test_translateParallel_withIntermittentFailures_shouldIsolateFailedUnits() {
    let mut registry = ServiceRegistry::new();
    registry.register("flaky", Arc::new(MockService::intermittent(3)));
    let dispatcher = ParallelDispatcher::with_options(
        Arc::new(registry),
        Glossary::new(),
        // One worker makes the failure pattern deterministic
        options(100, 1),
    );

    let text = sample_document(12);
    let chunk_count = chunker::split_text(&text, 100).len();
    let results = dispatcher
        .translate_parallel(&text, "en", "ru", &["flaky".to_string()], None)
        .await
        .unwrap();

    let slots = &results["flaky"].ordered_text;
    assert_eq!(slots.len(), chunk_count);
    let failed = slots.iter().filter(|s| s.starts_with("[Error: ")).count();
    let succeeded = slots.iter().filter(|s| s.starts_with("[ru] ")).count();
    assert_eq!(failed + succeeded, chunk_count);
    assert_eq!(failed, chunk_count / 3);
}

#[tokio::test]
async fn test_translateParallel_withUnconfiguredService_shouldFailBeforeDispatch() {
    let mut registry = ServiceRegistry::new();
    registry.register("mock", Arc::new(MockService::unconfigured()));
    let dispatcher = ParallelDispatcher::new(Arc::new(registry), Glossary::new());

    let result = dispatcher
        .translate_parallel("Hello.", "en", "ru", &["mock".to_string()], None)
        .await;
    assert!(matches!(result, Err(BatchError::ServiceNotConfigured(_))));
}

#[tokio::test]
async fn test_translateParallel_cancelledMidBatch_shouldStillYieldOneSlotPerChunk() {
    let mut registry = ServiceRegistry::new();
    registry.register("slow", Arc::new(MockService::slow(20)));
    let dispatcher = ParallelDispatcher::with_options(
        Arc::new(registry),
        Glossary::new(),
        options(100, 1),
    );

    // Raise the flag from the progress callback after the first unit
    let cancel = dispatcher.cancel_flag();
    let callback: ProgressCallback = Arc::new(move |completed, _total| {
        if completed == 1 {
            cancel.cancel();
        }
    });

    let text = sample_document(10);
    let chunk_count = chunker::split_text(&text, 100).len();
    let results = dispatcher
        .translate_parallel(&text, "en", "ru", &["slow".to_string()], Some(callback))
        .await
        .unwrap();

    let slots = &results["slow"].ordered_text;
    assert_eq!(slots.len(), chunk_count);
    assert!(slots.iter().any(|s| s == "[Error: cancelled]"));
    assert!(slots.iter().any(|s| s.starts_with("[ru] ")));
}
