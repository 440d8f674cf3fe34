// WHY: Reconciliation core — one diff-and-fetch pass at a time over shared state
// The persisted sentence/block lists live behind a tokio mutex; every public
// operation holds it for its full duration, so passes queue fairly and never
// interleave their mutations or event deliveries

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::block::{BlockId, ChangeEvent, CorrectionBlock, FetchedBlock};
use crate::differ::{diff_sentences, DiffRun};
use crate::error::{EngineError, FetchError};
use crate::queue::BlockQueue;
use crate::tokenizer::segment;

/// Fetches correction blocks for a stretch of text from the backend model
///
/// Returned offsets are 0-based relative to `text`; the orchestrator
/// translates them into absolute document coordinates. Implementations should
/// honor `token` to abort in-flight network calls early.
#[async_trait]
pub trait CorrectionFetcher: Send + Sync {
    async fn fetch_blocks(
        &self,
        text: &str,
        language: &str,
        token: &CancellationToken,
    ) -> Result<Vec<FetchedBlock>, FetchError>;
}

/// Receives ordered change events; consumed by the rendering layer
#[async_trait]
pub trait ChangeSink: Send + Sync {
    async fn emit(&self, event: ChangeEvent) -> anyhow::Result<()>;
}

/// Surfaces user-facing error messages; invoked once per failed pass
pub trait ErrorReporter: Send + Sync {
    fn report(&self, message: &str);
}

/// Persisted engine state, replaced atomically at the end of a successful pass
#[derive(Debug, Default)]
struct EngineState {
    sentences: Vec<String>,
    blocks: Vec<CorrectionBlock>,
    language: String,
}

/// Accumulated output of one reconciliation pass
struct PassResult {
    sentences: Vec<String>,
    blocks: Vec<CorrectionBlock>,
    events: Vec<ChangeEvent>,
}

/// Owns the current block set and runs serialized reconciliation passes
///
/// Construct one instance per document/editing session; there is no
/// process-wide state. Collaborators are injected as trait objects so tests
/// can substitute mocks for the network-backed implementations.
pub struct CorrectionOrchestrator {
    fetcher: Arc<dyn CorrectionFetcher>,
    sink: Arc<dyn ChangeSink>,
    reporter: Arc<dyn ErrorReporter>,
    state: Mutex<EngineState>,
    next_block_id: AtomicU64,
}

impl CorrectionOrchestrator {
    pub fn new(
        fetcher: Arc<dyn CorrectionFetcher>,
        sink: Arc<dyn ChangeSink>,
        reporter: Arc<dyn ErrorReporter>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            sink,
            reporter,
            state: Mutex::new(EngineState {
                sentences: Vec::new(),
                blocks: Vec::new(),
                language: language.into(),
            }),
            next_block_id: AtomicU64::new(1),
        }
    }

    fn allocate_id(&self) -> BlockId {
        BlockId(self.next_block_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Run one reconciliation pass for the given document text
    ///
    /// Serialized against all other public operations. Fetch failures are
    /// surfaced through the error reporter and cancellations through a debug
    /// log; neither escapes as `Err`. Only `InvariantViolation` propagates.
    pub async fn correct_text(
        &self,
        text: &str,
        token: &CancellationToken,
    ) -> Result<(), EngineError> {
        let mut state = self.state.lock().await;

        match self.run_pass(&state, text, token).await {
            Ok(result) => {
                state.sentences = result.sentences;
                state.blocks = result.blocks;
                // Delivered under the lock: at most one pass's events in flight
                self.deliver(result.events).await;
                Ok(())
            }
            Err(EngineError::Aborted) => {
                debug!("Correction pass cancelled; keeping previous state");
                Ok(())
            }
            Err(EngineError::FetchFailed(message)) => {
                warn!(error = %message, "Correction fetch failed; keeping previous state");
                self.reporter.report(&message);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Emit a `Remove` for every persisted block, then clear all state
    pub async fn invalidate_all(&self) {
        let mut state = self.state.lock().await;
        let removed: Vec<ChangeEvent> = state
            .blocks
            .drain(..)
            .map(ChangeEvent::Remove)
            .collect();
        state.sentences.clear();
        debug!(count = removed.len(), "Invalidating all correction blocks");
        self.deliver(removed).await;
    }

    /// Change the correction language; invalidates all blocks when it differs
    ///
    /// Corrections are language-specific, so every block is retired and the
    /// next pass re-fetches the full document under the new language.
    pub async fn switch_language(&self, language: &str) {
        let mut state = self.state.lock().await;
        if state.language == language {
            return;
        }
        state.language = language.to_string();
        debug!(language, "Switched correction language");
        let removed: Vec<ChangeEvent> = state
            .blocks
            .drain(..)
            .map(ChangeEvent::Remove)
            .collect();
        state.sentences.clear();
        self.deliver(removed).await;
    }

    /// Snapshot of the persisted block list (tests and diagnostics only;
    /// live consumers must follow emitted change events)
    pub async fn blocks(&self) -> Vec<CorrectionBlock> {
        self.state.lock().await.blocks.clone()
    }

    /// Currently configured correction language
    pub async fn language(&self) -> String {
        self.state.lock().await.language.clone()
    }

    /// Walk the diff runs, consuming the previous block queue and fetching
    /// corrections for added stretches
    ///
    /// Pointers are 1-based document character coordinates. `old_ptr` tracks
    /// the position in the previous document, `new_ptr` in the new one; the
    /// difference between them is the offset drift applied to blocks
    /// downstream of an edit.
    async fn run_pass(
        &self,
        state: &EngineState,
        text: &str,
        token: &CancellationToken,
    ) -> Result<PassResult, EngineError> {
        let new_sentences: Vec<String> = segment(text).map(str::to_string).collect();
        let runs = diff_sentences(&state.sentences, &new_sentences);
        debug!(
            runs = runs.len(),
            sentences = new_sentences.len(),
            "Starting reconciliation pass"
        );

        let mut queue = BlockQueue::new(state.blocks.clone());
        let mut old_ptr: usize = 1;
        let mut new_ptr: usize = 1;
        let mut has_changes = false;
        let mut blocks: Vec<CorrectionBlock> = Vec::new();
        let mut events: Vec<ChangeEvent> = Vec::new();

        for run in runs {
            if token.is_cancelled() {
                return Err(EngineError::Aborted);
            }

            let span = run.span();
            match run {
                DiffRun::Removed(_) => {
                    while queue.peek().is_some_and(|b| b.offset < old_ptr + span) {
                        let block = queue.dequeue()?;
                        events.push(ChangeEvent::Remove(block));
                    }
                    old_ptr += span;
                    has_changes = true;
                }
                DiffRun::Added(sentences) => {
                    let fetched_text = sentences.concat();
                    let fetched = self
                        .fetcher
                        .fetch_blocks(&fetched_text, &state.language, token)
                        .await?;
                    for fb in fetched {
                        let block = self.promote(fb, new_ptr);
                        events.push(ChangeEvent::Add(block.clone()));
                        blocks.push(block);
                    }
                    new_ptr += span;
                    has_changes = true;
                }
                DiffRun::Unchanged(_) => {
                    while queue.peek().is_some_and(|b| b.offset < old_ptr + span) {
                        let block = queue.dequeue()?;
                        if has_changes {
                            let shifted_offset = (block.offset + new_ptr)
                                .checked_sub(old_ptr)
                                .ok_or_else(|| {
                                    EngineError::InvariantViolation(format!(
                                        "offset drift underflow: block at {} with old_ptr {} new_ptr {}",
                                        block.offset, old_ptr, new_ptr
                                    ))
                                })?;
                            let shifted = block.with_offset(shifted_offset);
                            events.push(ChangeEvent::Update(shifted.clone()));
                            blocks.push(shifted);
                        } else {
                            // Nothing observable changed yet; carry unmodified
                            blocks.push(block);
                        }
                    }
                    old_ptr += span;
                    new_ptr += span;
                }
            }
        }

        debug!(
            blocks = blocks.len(),
            events = events.len(),
            "Reconciliation pass complete"
        );
        Ok(PassResult {
            sentences: new_sentences,
            blocks,
            events,
        })
    }

    /// Translate a fetched block into document coordinates with a fresh id
    fn promote(&self, fetched: FetchedBlock, run_start: usize) -> CorrectionBlock {
        CorrectionBlock {
            id: self.allocate_id(),
            original: fetched.original,
            corrected: fetched.corrected,
            explanation: fetched.explanation,
            offset: fetched.offset + run_start,
            length: fetched.length,
        }
    }

    /// Deliver accumulated events in order; per-event failures are logged
    /// and do not abort the remaining deliveries
    async fn deliver(&self, events: Vec<ChangeEvent>) {
        for event in events {
            if let Err(err) = self.sink.emit(event).await {
                warn!(error = %err, "Change event delivery failed");
            }
        }
    }
}
