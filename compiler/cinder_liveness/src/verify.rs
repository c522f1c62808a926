//! Consistency checks over a computed liveness table.
//!
//! Used by tests and debug-time callers to check the structural invariants
//! of every [`LiveRange`](crate::liverange::LiveRange):
//!
//! - the def interval stays within the defining block and is not backwards,
//! - live-in intervals are sorted by block, unique, never in the defining
//!   block, and end inside their block,
//! - dominance consistency: if a value is live-in to a block, every
//!   predecessor either defines the value and keeps it live through its
//!   branch, or is itself live-in with an end covering its branch,
//! - every defined value has a range.

use std::cmp::Ordering;

use cinder_ir::{Block, ControlFlowGraph, Function, ValueDef};

use crate::compute::Liveness;
use crate::error::LivenessError;

/// Check `liveness` against `func` and `cfg`.
///
/// Returns the first violation found as a
/// [`LivenessError::Inconsistent`]. A table produced by
/// [`Liveness::compute`] on well-formed input always passes.
pub fn verify_liveness(
    func: &Function,
    cfg: &ControlFlowGraph,
    liveness: &Liveness,
) -> Result<(), LivenessError> {
    let order = liveness.order();

    for (value, lr) in liveness.ranges() {
        let fail = |block: Block, reason: &'static str| {
            Err(LivenessError::Inconsistent {
                value,
                block,
                reason,
            })
        };

        if order.cmp(lr.def(), lr.def_local_end()) == Ordering::Greater {
            return fail(lr.def_block(), "backwards def interval");
        }
        if order.block_of(lr.def_local_end()) != lr.def_block() {
            return fail(lr.def_block(), "def interval escapes the defining block");
        }

        let mut prev: Option<Block> = None;
        for li in lr.live_ins() {
            if li.block == lr.def_block() {
                return fail(li.block, "live-in interval in the defining block");
            }
            if prev.is_some_and(|p| p >= li.block) {
                return fail(li.block, "live-in intervals out of order");
            }
            if order.inst_block(li.end) != li.block {
                return fail(li.block, "live-in end outside its block");
            }

            // Every predecessor must carry the value to its branch.
            for pred in cfg.preds(li.block) {
                let covered_by_def = pred.block == lr.def_block()
                    && order.is_at_or_after(pred.inst, lr.def())
                    && order.is_at_or_after(lr.def_local_end(), pred.inst);
                let covered_by_livein = lr
                    .livein_local_end(pred.block)
                    .is_some_and(|end| order.is_at_or_after(end, pred.inst));
                if !covered_by_def && !covered_by_livein {
                    return fail(li.block, "live-in block with an uncovered predecessor");
                }
            }

            prev = Some(li.block);
        }
    }

    // Every defined value must have a range, even if dead.
    for value in func.values() {
        if liveness.get(value).is_none() {
            let block = match func.value_def(value) {
                Some(ValueDef::Inst(inst)) => order.inst_block(inst),
                Some(ValueDef::Param(block)) => block,
                None => Block::new(0),
            };
            return Err(LivenessError::Inconsistent {
                value,
                block,
                reason: "defined value has no live range",
            });
        }
    }

    Ok(())
}
