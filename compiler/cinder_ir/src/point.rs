//! Program points and the total order over them.
//!
//! A [`ProgramPoint`] identifies a position in a function where an SSA value
//! can begin or end being live: either a block entry (where block parameters
//! are defined and live-in values arrive) or an instruction. Points have no
//! intrinsic order; a [`ProgramOrder`] computed from the function layout
//! makes any two points in the same function comparable, within and across
//! blocks.

use std::cmp::Ordering;
use std::fmt;

use crate::entities::{Block, Inst};
use crate::function::Function;

/// A position in a function, totally ordered by [`ProgramOrder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProgramPoint {
    /// The entry of a block, before any of its instructions.
    ///
    /// Block parameters are defined here, and values that are live-in to
    /// the block become live here.
    Block(Block),
    /// An instruction.
    Inst(Inst),
}

impl From<Block> for ProgramPoint {
    fn from(block: Block) -> Self {
        Self::Block(block)
    }
}

impl From<Inst> for ProgramPoint {
    fn from(inst: Inst) -> Self {
        Self::Inst(inst)
    }
}

impl fmt::Display for ProgramPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(block) => block.fmt(f),
            Self::Inst(inst) => inst.fmt(f),
        }
    }
}

/// Total order over the program points of one function.
///
/// Built once from the function layout: every block header and every
/// instruction gets a sequence number, assigned in layout order with the
/// block header numbered before the block's instructions. Comparisons are
/// then two array lookups and an integer compare.
///
/// The order is invalidated by any structural edit to the function
/// (inserting or removing blocks or instructions) and must be recomputed
/// along with everything derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramOrder {
    /// Sequence number of each block header, indexed by `Block::index()`.
    block_seq: Vec<u32>,
    /// Sequence number of each instruction, indexed by `Inst::index()`.
    inst_seq: Vec<u32>,
    /// Containing block of each instruction, indexed by `Inst::index()`.
    inst_block: Vec<Block>,
}

impl ProgramOrder {
    /// Number the program points of `func` in layout order.
    pub fn compute(func: &Function) -> Self {
        let mut block_seq = vec![0_u32; func.num_blocks()];
        let mut inst_seq = vec![0_u32; func.num_insts()];
        let mut inst_block = vec![Block::new(0); func.num_insts()];

        let mut seq = 0_u32;
        for block in func.blocks() {
            block_seq[block.index()] = seq;
            seq += 1;
            for inst in func.block_insts(block) {
                inst_seq[inst.index()] = seq;
                seq += 1;
                inst_block[inst.index()] = block;
            }
        }

        Self {
            block_seq,
            inst_seq,
            inst_block,
        }
    }

    fn seq(&self, point: ProgramPoint) -> u32 {
        match point {
            ProgramPoint::Block(block) => self.block_seq[block.index()],
            ProgramPoint::Inst(inst) => self.inst_seq[inst.index()],
        }
    }

    /// Compare two program points in program order.
    pub fn cmp(&self, a: impl Into<ProgramPoint>, b: impl Into<ProgramPoint>) -> Ordering {
        self.seq(a.into()).cmp(&self.seq(b.into()))
    }

    /// Does `a` come at or after `b` in program order?
    pub fn is_at_or_after(&self, a: impl Into<ProgramPoint>, b: impl Into<ProgramPoint>) -> bool {
        self.cmp(a, b) != Ordering::Less
    }

    /// The block containing `inst`.
    pub fn inst_block(&self, inst: Inst) -> Block {
        self.inst_block[inst.index()]
    }

    /// The block containing `point` — the block itself for a block-entry
    /// point.
    pub fn block_of(&self, point: impl Into<ProgramPoint>) -> Block {
        match point.into() {
            ProgramPoint::Block(block) => block,
            ProgramPoint::Inst(inst) => self.inst_block(inst),
        }
    }
}
