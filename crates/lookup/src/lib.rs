//! # lookup
//!
//! Read-through definition lookup: serve from the history store on a hit,
//! fetch and normalize dictionary markup on a miss, then populate the
//! store before serving.
//!
//! ## Pipeline
//! - **Client**: one HTTP GET per miss against the definition source
//! - **Normalizer**: raw HTML to one canonical markdown document
//! - **Orchestrator**: hit/miss decision plus the cache-coherency contract

#![warn(missing_docs)]

mod client;
mod normalize;
mod pipeline;

pub use client::{DefinitionSource, FetchOutcome, TransportError, VocabularyClient};
pub use normalize::normalize;
pub use pipeline::{error_document, not_found_document, Lookup};
