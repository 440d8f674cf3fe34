// WHY: Value types shared between the orchestrator and its collaborators
// Blocks are immutable values; positional changes produce new values with the same id

use serde::{Deserialize, Serialize};

/// Opaque unique identifier for a correction block, never reused
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct BlockId(pub u64);

impl From<BlockId> for u64 {
    fn from(id: BlockId) -> Self {
        id.0
    }
}

/// A flagged span in the current document coordinate space
///
/// `offset` is a 1-based character offset into the full document text (the
/// first character of the document is offset 1). `length` is measured in
/// characters; `offset + length - 1` never exceeds the document length while
/// the block is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionBlock {
    pub id: BlockId,
    /// The flagged substring as observed at fetch time
    pub original: String,
    /// Ordered replacement suggestions; may be empty while pending or filtered
    pub corrected: Vec<String>,
    /// Human-readable rationale
    pub explanation: String,
    pub offset: usize,
    pub length: usize,
}

impl CorrectionBlock {
    /// Produce a repositioned copy sharing the same id
    pub fn with_offset(&self, offset: usize) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }
}

/// A block as returned by the fetch collaborator
///
/// `offset`/`length` are 0-based relative to the fetched text, not the
/// document; the orchestrator performs the translation to absolute offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedBlock {
    pub original: String,
    pub corrected: Vec<String>,
    pub explanation: String,
    pub offset: usize,
    pub length: usize,
}

/// Ordered change notification delivered to the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeEvent {
    Add(CorrectionBlock),
    Remove(CorrectionBlock),
    Update(CorrectionBlock),
}

impl ChangeEvent {
    /// The block this event carries
    pub fn block(&self) -> &CorrectionBlock {
        match self {
            ChangeEvent::Add(b) | ChangeEvent::Remove(b) | ChangeEvent::Update(b) => b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_offset_preserves_identity() {
        let block = CorrectionBlock {
            id: BlockId(7),
            original: "teh".to_string(),
            corrected: vec!["the".to_string()],
            explanation: "possible typo".to_string(),
            offset: 4,
            length: 3,
        };
        let shifted = block.with_offset(12);
        assert_eq!(shifted.id, block.id);
        assert_eq!(shifted.offset, 12);
        assert_eq!(shifted.original, block.original);
        assert_eq!(shifted.length, block.length);
    }
}
