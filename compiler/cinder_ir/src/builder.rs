//! Builder for SSA functions.
//!
//! Follows the "create blocks, emit instructions into them, terminate"
//! pattern. `Value` and `Inst` IDs are allocated sequentially; blocks are
//! laid out in creation order.

use crate::entities::{Block, Inst, Value};
use crate::function::{BlockData, Function, InstData, ValueDef};

/// Builder for an in-progress [`Function`].
///
/// Consumed by [`finish`](FunctionBuilder::finish) to produce the frozen
/// function.
pub struct FunctionBuilder {
    name: String,
    blocks: Vec<BlockData>,
    insts: Vec<InstData>,
    value_defs: Vec<ValueDef>,
}

impl FunctionBuilder {
    /// Create a builder for a function named `name`, with no blocks yet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            blocks: Vec::new(),
            insts: Vec::new(),
            value_defs: Vec::new(),
        }
    }

    /// Append a new empty block at the end of the layout.
    pub fn create_block(&mut self) -> Block {
        let block = Block::new(self.blocks.len() as u32);
        self.blocks.push(BlockData {
            params: Vec::new(),
            insts: Vec::new(),
        });
        block
    }

    /// Append a parameter to `block`, defining a new value at its entry.
    pub fn append_block_param(&mut self, block: Block) -> Value {
        let value = self.make_value(ValueDef::Param(block));
        self.blocks[block.index()].params.push(value);
        value
    }

    /// Emit an ordinary instruction in `block` that uses `args` and defines
    /// a new result value.
    pub fn op(&mut self, block: Block, args: &[Value]) -> Value {
        let inst = Inst::new(self.insts.len() as u32);
        let result = self.make_value(ValueDef::Inst(inst));
        self.push_inst(
            block,
            InstData::Op {
                result: Some(result),
                args: args.to_vec(),
            },
        );
        result
    }

    /// Emit an effect-only instruction in `block` that uses `args` and
    /// defines nothing.
    pub fn effect(&mut self, block: Block, args: &[Value]) -> Inst {
        self.push_inst(
            block,
            InstData::Op {
                result: None,
                args: args.to_vec(),
            },
        )
    }

    /// Terminate `block` with an unconditional jump.
    pub fn jump(&mut self, block: Block, target: Block, args: &[Value]) -> Inst {
        self.push_inst(
            block,
            InstData::Jump {
                target,
                args: args.to_vec(),
            },
        )
    }

    /// Terminate `block` with a conditional branch on `cond`.
    pub fn branch(
        &mut self,
        block: Block,
        cond: Value,
        then_block: Block,
        else_block: Block,
    ) -> Inst {
        self.push_inst(
            block,
            InstData::Branch {
                cond,
                then_block,
                else_block,
            },
        )
    }

    /// Terminate `block` with a return.
    pub fn ret(&mut self, block: Block, args: &[Value]) -> Inst {
        self.push_inst(block, InstData::Return { args: args.to_vec() })
    }

    /// Finish construction.
    ///
    /// # Panics
    ///
    /// Panics if any block is empty, unterminated, or branches to a block
    /// that was never created.
    pub fn finish(self) -> Function {
        for (i, block) in self.blocks.iter().enumerate() {
            let terminated = block
                .insts
                .last()
                .is_some_and(|inst| self.insts[inst.index()].is_terminator());
            assert!(terminated, "block{i} has no terminator");
            for inst in &block.insts {
                for succ in self.insts[inst.index()].successors() {
                    assert!(
                        succ.index() < self.blocks.len(),
                        "block{i} branches to undeclared {succ}"
                    );
                }
            }
        }
        Function::new(self.name, self.blocks, self.insts, self.value_defs)
    }

    fn make_value(&mut self, def: ValueDef) -> Value {
        let value = Value::new(self.value_defs.len() as u32);
        self.value_defs.push(def);
        value
    }

    fn push_inst(&mut self, block: Block, data: InstData) -> Inst {
        let already_terminated = self.blocks[block.index()]
            .insts
            .last()
            .is_some_and(|inst| self.insts[inst.index()].is_terminator());
        assert!(!already_terminated, "{block} is already terminated");

        let inst = Inst::new(self.insts.len() as u32);
        self.insts.push(data);
        self.blocks[block.index()].insts.push(inst);
        inst
    }
}
