//! Control flow graph: per-block predecessor and successor index.
//!
//! Computed once from a frozen [`Function`] and consumed by the dataflow
//! passes. A predecessor edge carries both the predecessor block and its
//! branch instruction — the program point at which a value must be live for
//! it to be live-in to the successor.

use rustc_hash::FxHashSet;

use crate::entities::{Block, Inst};
use crate::function::Function;

/// A CFG edge seen from the successor side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockPredecessor {
    /// The predecessor block.
    pub block: Block,
    /// The branch or jump in `block` that targets the successor.
    pub inst: Inst,
}

/// Predecessor and successor lists for every block of one function.
///
/// Invalidated by any structural edit to the function.
#[derive(Clone, Debug)]
pub struct ControlFlowGraph {
    preds: Vec<Vec<BlockPredecessor>>,
    succs: Vec<Vec<Block>>,
}

impl ControlFlowGraph {
    /// Build the predecessor and successor index for `func`.
    ///
    /// Successor lists are deduplicated per block, so a branch with both
    /// edges to the same target contributes a single edge.
    pub fn compute(func: &Function) -> Self {
        let num_blocks = func.num_blocks();
        let mut preds: Vec<Vec<BlockPredecessor>> = vec![Vec::new(); num_blocks];
        let mut succs: Vec<Vec<Block>> = vec![Vec::new(); num_blocks];

        for block in func.blocks() {
            let Some(term) = func.terminator(block) else {
                continue;
            };
            let mut seen = FxHashSet::default();
            for succ in func.inst_data(term).successors() {
                if seen.insert(succ) {
                    preds[succ.index()].push(BlockPredecessor { block, inst: term });
                    succs[block.index()].push(succ);
                }
            }
        }

        Self { preds, succs }
    }

    /// The predecessor edges of `block`.
    pub fn preds(&self, block: Block) -> &[BlockPredecessor] {
        &self.preds[block.index()]
    }

    /// The successor blocks of `block`.
    pub fn succs(&self, block: Block) -> &[Block] {
        &self.succs[block.index()]
    }
}
