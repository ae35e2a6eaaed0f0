/*!
 * The translation core: chunking, parallel dispatch, assembly, glossary.
 *
 * Data flows through this module in one direction: raw text is split into
 * sentence-aligned chunks (`chunker`), each (chunk, service) pair runs on
 * the bounded worker pool (`dispatcher`), per-service results are restored
 * to chunk order and joined (`assembler`), and the user's term glossary is
 * applied to the joined output (`glossary`).
 */

// Re-export main types for easier usage
pub use self::assembler::ServiceBatchResult;
pub use self::chunker::Chunk;
pub use self::dispatcher::{CancelFlag, DispatchOptions, ParallelDispatcher, ProgressCallback};
pub use self::glossary::Glossary;

// Submodules
pub mod assembler;
pub mod chunker;
pub mod dispatcher;
pub mod glossary;
