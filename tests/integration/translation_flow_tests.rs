/*!
 * End-to-end translation flow tests: document in, per-service results out
 */

use std::sync::Arc;

use crate::common::sample_document;
use multitrans::services::ServiceRegistry;
use multitrans::services::mock::MockService;
use multitrans::translation::chunker;
use multitrans::translation::{DispatchOptions, Glossary, ParallelDispatcher};

fn dispatcher_with(
    services: &[(&str, MockService)],
    glossary: Glossary,
    chunk_size: usize,
) -> ParallelDispatcher {
    let mut registry = ServiceRegistry::new();
    for (id, service) in services {
        registry.register(id, Arc::new(service.clone()));
    }
    let options = DispatchOptions {
        chunk_size,
        max_workers: 3,
    };
    ParallelDispatcher::with_options(Arc::new(registry), glossary, options)
}

#[tokio::test]
async fn test_flow_multiChunkDocument_shouldReassembleInOriginalOrder() {
    let dispatcher = dispatcher_with(&[("mock", MockService::working())], Glossary::new(), 120);

    let text = sample_document(15);
    let results = dispatcher
        .translate_parallel(&text, "en", "de", &["mock".to_string()], None)
        .await
        .unwrap();

    let chunks = chunker::split_text(&text, 120);
    assert!(chunks.len() > 1, "document should span several chunks");

    let result = &results["mock"];
    assert_eq!(result.ordered_text.len(), chunks.len());
    for (slot, chunk) in result.ordered_text.iter().zip(&chunks) {
        assert_eq!(slot, &format!("[de] {}", chunk.text));
    }
    let expected_joined = result.ordered_text.join(" ");
    assert_eq!(result.joined_text, expected_joined);
}

#[tokio::test]
async fn test_flow_threeServicesOneFailing_shouldYieldThreeIndependentResults() {
    let dispatcher = dispatcher_with(
        &[
            ("alpha", MockService::fixed("OK")),
            ("beta", MockService::failing()),
            ("gamma", MockService::working()),
        ],
        Glossary::new(),
        150,
    );

    let text = sample_document(8);
    let services = vec![
        "alpha".to_string(),
        "beta".to_string(),
        "gamma".to_string(),
    ];
    let results = dispatcher
        .translate_parallel(&text, "en", "ru", &services, None)
        .await
        .unwrap();
    assert_eq!(results.len(), 3);

    let chunk_count = chunker::split_text(&text, 150).len();
    for id in ["alpha", "beta", "gamma"] {
        assert_eq!(results[id].ordered_text.len(), chunk_count);
    }
    assert!(results["alpha"].ordered_text.iter().all(|s| s == "OK"));
    assert!(
        results["beta"]
            .ordered_text
            .iter()
            .all(|s| s.starts_with("[Error: "))
    );
    assert!(
        results["gamma"]
            .ordered_text
            .iter()
            .all(|s| s.starts_with("[ru] "))
    );
}

#[tokio::test]
async fn test_flow_emptyDocument_shouldStillProduceOneResultSlot() {
    let dispatcher = dispatcher_with(&[("mock", MockService::working())], Glossary::new(), 1000);

    let results = dispatcher
        .translate_parallel("", "auto", "ru", &["mock".to_string()], None)
        .await
        .unwrap();

    let result = &results["mock"];
    assert_eq!(result.ordered_text.len(), 1);
    assert_eq!(result.ordered_text[0], "[ru] ");
}

#[tokio::test]
async fn test_flow_withGlossary_shouldApplyTermsToFinalOutput() {
    let mut glossary = Glossary::new();
    glossary.add_entry("Hello", "Привет").unwrap();
    glossary.set_case_sensitive(false);

    let dispatcher = dispatcher_with(
        &[("mock", MockService::fixed("HELLO world"))],
        glossary,
        1000,
    );

    let results = dispatcher
        .translate_parallel("Hi there.", "en", "ru", &["mock".to_string()], None)
        .await
        .unwrap();

    let result = &results["mock"];
    assert_eq!(result.joined_text, "Привет world");
    // Raw per-chunk output is kept unprocessed
    assert_eq!(result.ordered_text[0], "HELLO world");
}

#[tokio::test]
async fn test_flow_sameServiceTwice_sharedCounterSeesEveryUnit() {
    let mock = MockService::working();
    let dispatcher = dispatcher_with(&[("mock", mock.clone())], Glossary::new(), 120);

    let text = sample_document(10);
    let chunk_count = chunker::split_text(&text, 120).len();
    dispatcher
        .translate_parallel(&text, "en", "ru", &["mock".to_string()], None)
        .await
        .unwrap();

    assert_eq!(mock.request_count(), chunk_count);
}
