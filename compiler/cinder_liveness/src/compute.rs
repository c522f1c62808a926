//! Whole-function live range computation.
//!
//! All live ranges are built in a single traversal of the function. Every
//! instruction is visited exactly once; the visitation order affects only
//! the growth pattern of the worklist, never the result, because range
//! extension is monotonic.
//!
//! For each used value:
//!
//! - The first encounter creates a dead range anchored at the value's
//!   definition point (block parameters and instruction results are also
//!   visited, so unused values get a range too).
//! - The range is extended in the using block up to the use. If the block
//!   newly became live-in, it goes on a worklist.
//! - Draining the worklist treats each predecessor's branch instruction as
//!   a use, which may make further blocks live-in. A `(value, block)` pair
//!   can trigger at most one enqueue (an already-live-in block never
//!   re-propagates), so total work is bounded by the number of live-in
//!   edges, not by the square of the block count.
//!
//! The result is a frozen table of [`LiveRange`]s keyed by value, served
//! read-only to the coloring and spilling passes. Any structural edit to
//! the function invalidates the whole table; there is no incremental
//! repair, only recomputation.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::ops::Index;

use rustc_hash::FxHashMap;

use cinder_ir::{
    Block, ControlFlowGraph, Function, Inst, ProgramOrder, ProgramPoint, Value, ValueDef,
};

use crate::error::LivenessError;
use crate::liverange::LiveRange;

/// Live ranges for every value of one function, plus the program order
/// they are expressed in.
///
/// Exclusively owned and mutated during [`compute`](Liveness::compute),
/// then frozen; all query methods are read-only, so shared references can
/// be handed to any number of concurrent consumers.
#[derive(Clone, Debug, PartialEq)]
pub struct Liveness {
    ranges: FxHashMap<Value, LiveRange>,
    order: ProgramOrder,
}

impl Liveness {
    /// Compute the live ranges of all SSA values in `func`.
    ///
    /// `cfg` must be the predecessor index of `func`. Fails with
    /// [`LivenessError::UndefinedValue`] if some instruction uses a value
    /// that is defined nowhere in the function.
    pub fn compute(func: &Function, cfg: &ControlFlowGraph) -> Result<Self, LivenessError> {
        let order = ProgramOrder::compute(func);
        let mut ranges =
            FxHashMap::with_capacity_and_hasher(func.num_values(), Default::default());
        let mut worklist: Vec<Block> = Vec::new();

        tracing::debug!(
            function = %func.name,
            blocks = func.num_blocks(),
            values = func.num_values(),
            "computing live ranges"
        );

        for block in func.blocks() {
            // Dead block parameters still get a (dead) range.
            for &param in func.block_params(block) {
                get_or_create(&mut ranges, func, &order, param, block.into())?;
            }

            for inst in func.block_insts(block) {
                let data = func.inst_data(inst);

                // Dead instruction results still get a (dead) range.
                if let Some(result) = data.result() {
                    get_or_create(&mut ranges, func, &order, result, inst.into())?;
                }

                for &arg in data.args() {
                    let lr = get_or_create(&mut ranges, func, &order, arg, inst.into())?;
                    extend_to_use(lr, block, inst, &mut worklist, cfg, &order);
                }
            }
        }

        tracing::debug!(ranges = ranges.len(), "live ranges computed");

        Ok(Self { ranges, order })
    }

    /// The live range of `value`, if it has one.
    pub fn get(&self, value: Value) -> Option<&LiveRange> {
        self.ranges.get(&value)
    }

    /// The program order the ranges are expressed in.
    pub fn order(&self) -> &ProgramOrder {
        &self.order
    }

    /// Iterate over all `(value, live range)` pairs, in no particular
    /// order.
    pub fn ranges(&self) -> impl Iterator<Item = (Value, &LiveRange)> + '_ {
        self.ranges.iter().map(|(&value, lr)| (value, lr))
    }

    /// The local end of `value`'s range in the block that defines it, or
    /// `None` if `block` is not where `value` is defined.
    pub fn def_local_end(&self, value: Value, block: Block) -> Option<ProgramPoint> {
        self.ranges
            .get(&value)
            .filter(|lr| lr.def_block() == block)
            .map(LiveRange::def_local_end)
    }

    /// The local end of `value`'s range in a block where it arrives
    /// live-in, or `None` if it is not live-in to `block`.
    pub fn livein_local_end(&self, value: Value, block: Block) -> Option<Inst> {
        self.ranges.get(&value)?.livein_local_end(block)
    }

    /// Is `value` live at `point`?
    ///
    /// A value is live at its defining point and stays live through its
    /// local end in each covered block.
    pub fn is_live_at(&self, value: Value, point: impl Into<ProgramPoint>) -> bool {
        let point = point.into();
        let Some(lr) = self.ranges.get(&value) else {
            return false;
        };
        let block = self.order.block_of(point);
        if block == lr.def_block() {
            self.order.is_at_or_after(point, lr.def())
                && self.order.cmp(point, lr.def_local_end()) != Ordering::Greater
        } else {
            lr.livein_local_end(block)
                .is_some_and(|end| self.order.cmp(point, end) != Ordering::Greater)
        }
    }

    /// Does `value`'s liveness never escape its defining block?
    ///
    /// Values without a range (never defined in this function) are
    /// trivially local.
    pub fn is_local(&self, value: Value) -> bool {
        self.ranges.get(&value).map_or(true, LiveRange::is_local)
    }
}

impl Index<Value> for Liveness {
    type Output = LiveRange;

    fn index(&self, value: Value) -> &LiveRange {
        match self.ranges.get(&value) {
            Some(lr) => lr,
            None => panic!("{value} has no live range"),
        }
    }
}

/// Get the live range for `value`, creating a dead range anchored at its
/// definition point on first encounter.
///
/// `use_point` is only used for error reporting when the value turns out
/// to have no definition at all.
fn get_or_create<'a>(
    ranges: &'a mut FxHashMap<Value, LiveRange>,
    func: &Function,
    order: &ProgramOrder,
    value: Value,
    use_point: ProgramPoint,
) -> Result<&'a mut LiveRange, LivenessError> {
    match ranges.entry(value) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => {
            let Some(def) = func.value_def(value) else {
                return Err(LivenessError::UndefinedValue {
                    value,
                    point: use_point,
                });
            };
            let def_block = match def {
                ValueDef::Inst(inst) => order.inst_block(inst),
                ValueDef::Param(block) => block,
            };
            Ok(entry.insert(LiveRange::new(def_block, def.into())))
        }
    }
}

/// Extend `lr` so it reaches the use at `to` inside `block`, then drain
/// the resulting live-in propagation.
///
/// The worklist holds blocks the value just became live-in to; each is
/// popped and the value is extended to every predecessor's branch, as if
/// the edge were a use at that branch. The live range itself doubles as
/// the visited set: `extend_in_block` never returns `true` twice for the
/// same block, which both terminates cycles and bounds the total work.
fn extend_to_use(
    lr: &mut LiveRange,
    block: Block,
    to: Inst,
    worklist: &mut Vec<Block>,
    cfg: &ControlFlowGraph,
    order: &ProgramOrder,
) {
    // Scratch space borrowed from the caller; always left empty.
    debug_assert!(worklist.is_empty());

    if lr.extend_in_block(block, to, order) {
        worklist.push(block);
    }

    while let Some(livein) = worklist.pop() {
        for pred in cfg.preds(livein) {
            if lr.extend_in_block(pred.block, pred.inst, order) {
                worklist.push(pred.block);
            }
        }
    }
}
