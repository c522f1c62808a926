//! SSA function model: blocks, instructions, and value definitions.
//!
//! The representation is deliberately minimal — a liveness or register
//! allocation pass only needs to know, for each instruction, which values
//! it uses, which value it defines, and where control flow goes next.
//! Instruction payloads (opcodes, immediates, types) live in later layers
//! and are irrelevant here.

use smallvec::{smallvec, SmallVec};

use crate::entities::{Block, Inst, Value};
use crate::point::ProgramPoint;

/// A single instruction.
///
/// The last instruction of every block must be a terminator
/// ([`Jump`](InstData::Jump), [`Branch`](InstData::Branch), or
/// [`Return`](InstData::Return)); terminators may not appear anywhere else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstData {
    /// An ordinary computation: uses `args`, optionally defines `result`.
    Op {
        result: Option<Value>,
        args: Vec<Value>,
    },
    /// Unconditional jump. `args` are forwarded to the target's block
    /// parameters and count as uses at the jump.
    Jump { target: Block, args: Vec<Value> },
    /// Two-way conditional branch on `cond`.
    Branch {
        cond: Value,
        then_block: Block,
        else_block: Block,
    },
    /// Return from the function, using `args`.
    Return { args: Vec<Value> },
}

impl InstData {
    /// The values used by this instruction.
    pub fn args(&self) -> &[Value] {
        match self {
            Self::Op { args, .. } | Self::Jump { args, .. } | Self::Return { args } => args,
            Self::Branch { cond, .. } => std::slice::from_ref(cond),
        }
    }

    /// The value defined by this instruction, if any.
    pub fn result(&self) -> Option<Value> {
        match self {
            Self::Op { result, .. } => *result,
            _ => None,
        }
    }

    /// The blocks this instruction can transfer control to.
    ///
    /// Empty for non-terminators and for `Return`.
    pub fn successors(&self) -> SmallVec<[Block; 2]> {
        match self {
            Self::Op { .. } | Self::Return { .. } => SmallVec::new(),
            Self::Jump { target, .. } => smallvec![*target],
            Self::Branch {
                then_block,
                else_block,
                ..
            } => smallvec![*then_block, *else_block],
        }
    }

    /// Is this a block terminator?
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::Jump { .. } | Self::Branch { .. } | Self::Return { .. }
        )
    }
}

/// Where a value is defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueDef {
    /// Result of an instruction.
    Inst(Inst),
    /// Parameter of a block, defined at the block entry.
    Param(Block),
}

impl From<ValueDef> for ProgramPoint {
    fn from(def: ValueDef) -> Self {
        match def {
            ValueDef::Inst(inst) => Self::Inst(inst),
            ValueDef::Param(block) => Self::Block(block),
        }
    }
}

/// A basic block: entry parameters plus an ordered instruction list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockData {
    /// Values defined at the block entry.
    pub params: Vec<Value>,
    /// Instructions in execution order. The last one is the terminator.
    pub insts: Vec<Inst>,
}

/// An SSA function, frozen after construction.
///
/// Blocks are stored in layout order. Instruction and value payloads are
/// stored in flat tables indexed by their IDs. Use
/// [`FunctionBuilder`](crate::builder::FunctionBuilder) to construct one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    /// Function name, for diagnostics only.
    pub name: String,
    blocks: Vec<BlockData>,
    insts: Vec<InstData>,
    value_defs: Vec<ValueDef>,
}

impl Function {
    pub(crate) fn new(
        name: String,
        blocks: Vec<BlockData>,
        insts: Vec<InstData>,
        value_defs: Vec<ValueDef>,
    ) -> Self {
        Self {
            name,
            blocks,
            insts,
            value_defs,
        }
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Number of instructions.
    pub fn num_insts(&self) -> usize {
        self.insts.len()
    }

    /// Number of values.
    pub fn num_values(&self) -> usize {
        self.value_defs.len()
    }

    /// Iterate over the blocks in layout order.
    pub fn blocks(&self) -> impl Iterator<Item = Block> {
        (0..self.blocks.len()).map(|i| Block::new(i as u32))
    }

    /// Iterate over all values of the function.
    pub fn values(&self) -> impl Iterator<Item = Value> {
        (0..self.value_defs.len()).map(|i| Value::new(i as u32))
    }

    /// The entry parameters of `block`.
    pub fn block_params(&self, block: Block) -> &[Value] {
        &self.blocks[block.index()].params
    }

    /// Iterate over the instructions of `block` in execution order.
    pub fn block_insts(&self, block: Block) -> impl Iterator<Item = Inst> + '_ {
        self.blocks[block.index()].insts.iter().copied()
    }

    /// The terminator instruction of `block`.
    pub fn terminator(&self, block: Block) -> Option<Inst> {
        self.blocks[block.index()].insts.last().copied()
    }

    /// The payload of `inst`.
    pub fn inst_data(&self, inst: Inst) -> &InstData {
        &self.insts[inst.index()]
    }

    /// Where `value` is defined, or `None` if it has no definition in this
    /// function. A use of such a value is malformed input.
    pub fn value_def(&self, value: Value) -> Option<ValueDef> {
        self.value_defs.get(value.index()).copied()
    }
}
