/*!
 * # multitrans - Parallel multi-service document translator
 *
 * A Rust library for translating documents through several machine
 * translation services at once and comparing the results side by side.
 *
 * ## Features
 *
 * - Sentence-aligned chunking of arbitrarily large documents
 * - Parallel dispatch of every (chunk, service) pair on a bounded worker pool
 * - Per-unit error absorption: one failed request never aborts a batch
 * - Supported backends: DeepL (keyed or free), Google, Yandex, OpenAI,
 *   OpenRouter, Groq, Anthropic Claude, and self-hosted LocalAI
 * - User glossary with longest-match-first term substitution
 * - Plain text, Markdown, HTML, SRT, CSV, and Ren'Py input formats
 * - Persistent translation history
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The translation core:
 *   - `translation::chunker`: Sentence-aligned text chunking
 *   - `translation::dispatcher`: Parallel multi-service dispatch
 *   - `translation::assembler`: Chunk-order reassembly
 *   - `translation::glossary`: Term substitution
 * - `services`: Client implementations for the translation backends
 * - `file_utils`: Document reading and text extraction
 * - `history`: Persistent batch history
 * - `language_utils`: ISO language code utilities
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod history;
pub mod language_utils;
pub mod services;
pub mod translation;

pub use app_config::Config;
pub use app_controller::AppController;
pub use errors::{AppError, BatchError, ProviderError};
pub use services::{ServiceRegistry, TranslationService};
pub use translation::{CancelFlag, DispatchOptions, Glossary, ParallelDispatcher};
