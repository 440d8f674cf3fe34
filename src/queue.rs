// WHY: FIFO walk over the previous pass's blocks in ascending-offset order
// The diff/offset arithmetic guarantees heads are consumed strictly in order,
// so an empty dequeue is a programming error, not a recoverable condition

use std::collections::VecDeque;

use crate::block::CorrectionBlock;
use crate::error::EngineError;

/// FIFO queue of correction blocks consumed while reconciling diff runs
#[derive(Debug, Default)]
pub struct BlockQueue {
    inner: VecDeque<CorrectionBlock>,
}

impl BlockQueue {
    /// Seed the queue with the previous pass's blocks (already offset-ordered)
    pub fn new(blocks: Vec<CorrectionBlock>) -> Self {
        Self {
            inner: blocks.into(),
        }
    }

    /// Peek at the head block without consuming it
    pub fn peek(&self) -> Option<&CorrectionBlock> {
        self.inner.front()
    }

    /// Consume the head block; fast-fails when the queue is empty
    pub fn dequeue(&mut self) -> Result<CorrectionBlock, EngineError> {
        self.inner.pop_front().ok_or_else(|| {
            EngineError::InvariantViolation("dequeue from empty block queue".to_string())
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockId;

    fn block(id: u64, offset: usize) -> CorrectionBlock {
        CorrectionBlock {
            id: BlockId(id),
            original: "x".to_string(),
            corrected: vec![],
            explanation: String::new(),
            offset,
            length: 1,
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = BlockQueue::new(vec![block(1, 3), block(2, 9)]);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek().map(|b| b.offset), Some(3));
        assert_eq!(queue.dequeue().unwrap().id, BlockId(1));
        assert_eq!(queue.dequeue().unwrap().id, BlockId(2));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_dequeue_fast_fails() {
        let mut queue = BlockQueue::new(vec![]);
        let err = queue.dequeue().unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }
}
