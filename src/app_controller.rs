/*!
 * Application controller.
 *
 * Wires configuration, the service registry, the glossary, and the parallel
 * dispatcher into the run-one-batch flow the CLI drives: read the input
 * document, translate it through every selected service with a progress
 * bar, print or write the per-service results, and record the batch in
 * history.
 */

use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils;
use crate::history::{HistoryEntry, HistoryStore};
use crate::services::ServiceRegistry;
use crate::translation::{DispatchOptions, Glossary, ParallelDispatcher, ProgressCallback};

/// Application controller that coordinates one translation batch
pub struct AppController {
    config: Config,
    registry: Arc<ServiceRegistry>,
}

impl AppController {
    /// Create a controller from loaded configuration
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(ServiceRegistry::from_config(&config));
        Self { config, registry }
    }

    /// Translate a document through the selected services
    ///
    /// Results go to stdout; with `output_file` set, each service's output is
    /// also written to a per-service file derived from that path.
    pub async fn run(&self, input_file: &Path, output_file: Option<&Path>) -> Result<()> {
        self.config.validate()?;

        let text = file_utils::read_document(input_file)?;
        if text.is_empty() {
            return Err(anyhow!("Input file is empty: {}", input_file.display()));
        }
        info!(
            "Translating {} ({} chars) from {} to {} via [{}]",
            input_file.display(),
            text.chars().count(),
            self.config.source_language,
            self.config.target_language,
            self.config.selected_services.join(", ")
        );

        let glossary = Glossary::load(Path::new(&self.config.glossary_path));
        let options = DispatchOptions {
            chunk_size: self.config.chunk_size,
            max_workers: self.config.max_workers,
        };
        let dispatcher =
            ParallelDispatcher::with_options(Arc::clone(&self.registry), glossary, options);

        // One progress tick per (chunk, service) unit
        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} units ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let callback: ProgressCallback = Arc::new(move |completed, total| {
            pb.set_length(total as u64);
            pb.set_position(completed as u64);
        });

        let results = dispatcher
            .translate_parallel(
                &text,
                &self.config.source_language,
                &self.config.target_language,
                &self.config.selected_services,
                Some(callback),
            )
            .await?;
        progress_bar.finish_and_clear();

        let mut service_ids: Vec<&String> = results.keys().collect();
        service_ids.sort();
        for service_id in &service_ids {
            let result = &results[service_id.as_str()];
            println!("--- {} ---", service_id);
            println!("{}\n", result.joined_text);
            if let Some(output) = output_file {
                let path = output_path_for(output, service_id);
                file_utils::write_output(&path, &result.joined_text)?;
                info!("Wrote {}", path.display());
            }
        }

        self.record_history(&text, &results);
        Ok(())
    }

    /// Append the finished batch to history; failures only warn
    fn record_history(
        &self,
        source_text: &str,
        results: &HashMap<String, crate::translation::ServiceBatchResult>,
    ) {
        let joined: HashMap<String, String> = results
            .iter()
            .map(|(id, result)| (id.clone(), result.joined_text.clone()))
            .collect();
        let entry = HistoryEntry::new(
            &self.config.source_language,
            &self.config.target_language,
            source_text,
            joined,
        );
        let mut store = HistoryStore::load(Path::new(&self.config.history_path));
        if let Err(e) = store.append(entry) {
            warn!("Failed to record history: {}", e);
        }
    }

    /// Print the registered services and their configuration state
    pub fn list_services(&self) {
        for id in self.registry.service_ids() {
            if let Some(service) = self.registry.get(&id) {
                let state = if service.is_configured() {
                    "ready"
                } else {
                    "not configured"
                };
                println!("{:<12} {:<20} [{}]", id, service.name(), state);
            }
        }
    }

    /// Print past translation batches, newest first
    pub fn show_history(&self, limit: usize) -> Result<()> {
        let store = HistoryStore::load(Path::new(&self.config.history_path));
        if store.is_empty() {
            println!("No translation history.");
            return Ok(());
        }
        for entry in store.entries().iter().take(limit) {
            println!(
                "{}  {} -> {}  [{}]",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.source_language,
                entry.target_language,
                entry.services.join(", ")
            );
            println!("  {}", entry.preview);
        }
        Ok(())
    }

    /// Access to the loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Derive a per-service output path: `out.txt` -> `out.deepl.txt`
fn output_path_for(base: &Path, service_id: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let file_name = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}.{}", stem, service_id, ext),
        None => format!("{}.{}", stem, service_id),
    };
    base.with_file_name(file_name)
}
