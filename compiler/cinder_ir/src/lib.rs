//! SSA intermediate representation for the Cinder backend.
//!
//! This crate provides the input side of the backend analyses:
//!
//! - **Entity references** ([`Value`], [`Block`], [`Inst`]): compact IDs
//!   for everything in a function.
//! - **Program points** ([`ProgramPoint`], [`ProgramOrder`]): positions in
//!   a function and the total order over them.
//! - **Function model** ([`Function`], [`BlockData`], [`InstData`],
//!   [`ValueDef`]): blocks in layout order, instructions with explicit
//!   uses and defs, and a per-value definition table.
//! - **Builder** ([`FunctionBuilder`]): construction surface for front
//!   ends and tests.
//! - **CFG index** ([`ControlFlowGraph`]): per-block predecessor edges,
//!   each carrying the branch instruction of the edge.
//!
//! The representation is opcode-free on purpose: liveness, coloring, and
//! spilling only care about use/def sets and control flow, so instruction
//! payloads are left to later layers.

pub mod builder;
pub mod cfg;
pub mod entities;
pub mod function;
pub mod point;

pub use builder::FunctionBuilder;
pub use cfg::{BlockPredecessor, ControlFlowGraph};
pub use entities::{Block, Inst, Value};
pub use function::{BlockData, Function, InstData, ValueDef};
pub use point::{ProgramOrder, ProgramPoint};
