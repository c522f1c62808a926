//! Live range of a single SSA value.
//!
//! A live range is the disjoint union of at most one local interval per
//! block:
//!
//! 1. The **def interval** in the defining block, from the defining program
//!    point (an instruction, or the block entry for a block parameter) to
//!    the last local use or the last branch that can reach a use.
//! 2. **Live-in intervals** in every other block the value is live in.
//!    A live-in interval always begins at the block entry, so it is fully
//!    described by its end instruction.
//!
//! Most values never leave their defining block, so the live-in list is
//! empty for the common case and stored inline ([`SmallVec`]). The list is
//! kept sorted by block number; block numbers are allocated in layout
//! order, so this is also program order and lookups are a binary search
//! with no indirection through the [`ProgramOrder`].
//!
//! Extension is monotonic: ends only ever move later. That is what makes
//! the whole-function computation order-independent and guarantees that a
//! `(value, block)` pair triggers at most one live-in insertion.

use std::cmp::Ordering;

use smallvec::SmallVec;

use cinder_ir::{Block, Inst, ProgramOrder, ProgramPoint};

/// A live-in interval: the value is live from the entry of `block` to
/// `end` (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveIn {
    /// The block the value is live-in to.
    pub block: Block,
    /// Last point in `block` where the value is needed: the last local
    /// use, or the terminator if the value is live-out.
    pub end: Inst,
}

/// Live range of a single SSA value.
///
/// Created as a *dead* range covering only the defining point, then
/// extended use by use. Frozen once the computation finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveRange {
    /// The block containing the definition.
    def_block: Block,
    /// The defining program point.
    def_begin: ProgramPoint,
    /// End of the def interval; always in `def_block`, and
    /// `def_begin <= def_end` with equality meaning a dead value.
    def_end: ProgramPoint,
    /// Live-in intervals, sorted by block number, at most one per block,
    /// never containing `def_block`.
    live_ins: SmallVec<[LiveIn; 2]>,
}

impl LiveRange {
    /// Create a dead live range for a value defined at `def` in
    /// `def_block`.
    pub(crate) fn new(def_block: Block, def: ProgramPoint) -> Self {
        Self {
            def_block,
            def_begin: def,
            def_end: def,
            live_ins: SmallVec::new(),
        }
    }

    /// Extend the local interval for `block` so it reaches `to`, which
    /// must belong to `block`. Creates a live-in interval if needed.
    ///
    /// Returns `true` iff this is the first liveness recorded for `block`,
    /// i.e. the value just became live-in there and the caller must
    /// propagate to the block's predecessors. Extending an interval that
    /// already covers `to` is a no-op.
    pub(crate) fn extend_in_block(&mut self, block: Block, to: Inst, order: &ProgramOrder) -> bool {
        if block == self.def_block {
            debug_assert!(
                order.cmp(to, self.def_begin) != Ordering::Less,
                "use of a value above its definition in {block}"
            );
            if order.cmp(to, self.def_end) == Ordering::Greater {
                self.def_end = to.into();
            }
            return false;
        }

        match self.find_live_in(block) {
            Ok(i) => {
                if order.cmp(to, self.live_ins[i].end) == Ordering::Greater {
                    self.live_ins[i].end = to;
                }
                false
            }
            Err(i) => {
                self.live_ins.insert(i, LiveIn { block, end: to });
                true
            }
        }
    }

    /// The defining program point: the block entry for a block parameter,
    /// otherwise the defining instruction.
    pub fn def(&self) -> ProgramPoint {
        self.def_begin
    }

    /// The block containing the definition.
    pub fn def_block(&self) -> Block {
        self.def_block
    }

    /// The local end point in the defining block.
    ///
    /// For a dead value this is the defining point itself; otherwise the
    /// last local use or the last branch that can reach a use.
    pub fn def_local_end(&self) -> ProgramPoint {
        self.def_end
    }

    /// The local end point in a block where the value is live-in, or
    /// `None` if the value is not live-in to `block`.
    pub fn livein_local_end(&self, block: Block) -> Option<Inst> {
        self.find_live_in(block).ok().map(|i| self.live_ins[i].end)
    }

    /// The live-in intervals, sorted by block number.
    pub fn live_ins(&self) -> &[LiveIn] {
        &self.live_ins
    }

    /// The blocks the value is live-in to, in ascending block order.
    pub fn livein_blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.live_ins.iter().map(|li| li.block)
    }

    /// Is this value never used at all?
    pub fn is_dead(&self) -> bool {
        self.def_begin == self.def_end
    }

    /// Does this value's liveness never escape its defining block?
    pub fn is_local(&self) -> bool {
        self.live_ins.is_empty()
    }

    fn find_live_in(&self, block: Block) -> Result<usize, usize> {
        self.live_ins.binary_search_by(|li| li.block.cmp(&block))
    }
}

#[cfg(test)]
mod tests;
