pub mod block;
pub mod differ;
pub mod error;
pub mod orchestrator;
pub mod queue;
pub mod tokenizer;

// Re-export main types for convenient access
pub use block::{BlockId, ChangeEvent, CorrectionBlock, FetchedBlock};
pub use differ::{diff_sentences, DiffRun};
pub use error::{EngineError, FetchError};
pub use orchestrator::{ChangeSink, CorrectionFetcher, CorrectionOrchestrator, ErrorReporter};
pub use queue::BlockQueue;
pub use tokenizer::{segment, SentenceSegmenter};
