/*!
 * Result assembly for completed service batches.
 *
 * Takes the per-chunk translations a service produced, in chunk-index order,
 * joins them into the externally visible document and runs the glossary
 * post-processing pass over the joined text.
 */

use super::glossary::Glossary;

/// Final per-service output of a translation batch
#[derive(Debug, Clone)]
pub struct ServiceBatchResult {
    /// Registry id of the service that produced this result
    pub service_id: String,
    /// One entry per chunk, in chunk-index order; failed units hold their
    /// `[Error: ...]` marker
    pub ordered_text: Vec<String>,
    /// Space-joined, glossary-processed document text
    ///
    /// Joining with a single literal space is a known lossy transform for
    /// sources with significant whitespace; `ordered_text` is kept so a
    /// caller can implement its own join strategy.
    pub joined_text: String,
}

/// Assemble a service's ordered chunk translations into its final result
pub fn assemble(service_id: &str, ordered_text: Vec<String>, glossary: &Glossary) -> ServiceBatchResult {
    let joined = ordered_text.join(" ");
    let joined_text = glossary.apply(&joined);
    ServiceBatchResult {
        service_id: service_id.to_string(),
        ordered_text,
        joined_text,
    }
}
