/*!
 * Common test utilities for the multitrans test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use multitrans::services::ServiceRegistry;
use multitrans::services::mock::MockService;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A registry with a single always-working mock under the given id
pub fn registry_with_working_mock(id: &str) -> Arc<ServiceRegistry> {
    let mut registry = ServiceRegistry::new();
    registry.register(id, Arc::new(MockService::working()));
    Arc::new(registry)
}

/// A multi-sentence document long enough to split into several chunks
pub fn sample_document(sentences: usize) -> String {
    (0..sentences)
        .map(|i| format!("This is sentence number {} of the sample document.", i))
        .collect::<Vec<_>>()
        .join(" ")
}
