use pretty_assertions::assert_eq;

use cinder_ir::{Block, Function, FunctionBuilder, Inst, ProgramOrder, ProgramPoint, Value};

use crate::test_helpers::def_inst;

use super::LiveRange;

/// Three-block ladder used by most tests here:
///
/// ```text
/// block0: v0 = op; jump block1
/// block1: effect v0; jump block2
/// block2: return v0
/// ```
fn ladder() -> (Function, ProgramOrder, Value, [Inst; 4]) {
    let mut fb = FunctionBuilder::new("ladder");
    let b0 = fb.create_block();
    let b1 = fb.create_block();
    let b2 = fb.create_block();
    let v0 = fb.op(b0, &[]);
    let j0 = fb.jump(b0, b1, &[]);
    let use1 = fb.effect(b1, &[v0]);
    let j1 = fb.jump(b1, b2, &[]);
    let ret = fb.ret(b2, &[v0]);
    let func = fb.finish();
    let order = ProgramOrder::compute(&func);
    (func, order, v0, [j0, use1, j1, ret])
}

#[test]
fn dead_def_range() {
    let (func, _, v0, _) = ladder();
    let def = def_inst(&func, v0);
    let b1 = Block::new(1);

    let lr = LiveRange::new(Block::new(0), def.into());
    assert!(lr.is_dead());
    assert!(lr.is_local());
    assert_eq!(lr.def(), ProgramPoint::Inst(def));
    assert_eq!(lr.def_local_end(), ProgramPoint::Inst(def));
    assert_eq!(lr.livein_local_end(b1), None);
}

#[test]
fn local_extension_is_monotonic() {
    let (func, order, v0, [j0, _, _, _]) = ladder();
    let b0 = Block::new(0);
    let def = def_inst(&func, v0);
    let mut lr = LiveRange::new(b0, def.into());

    // Extending in the defining block never reports a new live-in.
    assert!(!lr.extend_in_block(b0, j0, &order));
    assert!(!lr.is_dead());
    assert!(lr.is_local());
    assert_eq!(lr.def_local_end(), ProgramPoint::Inst(j0));

    // A use at an already covered point is a no-op.
    assert!(!lr.extend_in_block(b0, def, &order));
    assert_eq!(lr.def_local_end(), ProgramPoint::Inst(j0));
}

#[test]
fn livein_created_once_then_extended() {
    let (func, order, v0, [_, use1, j1, _]) = ladder();
    let b0 = Block::new(0);
    let b1 = Block::new(1);
    let mut lr = LiveRange::new(b0, def_inst(&func, v0).into());

    // First liveness in block1 creates a live-in interval.
    assert!(lr.extend_in_block(b1, use1, &order));
    assert!(!lr.is_local());
    assert_eq!(lr.livein_local_end(b1), Some(use1));

    // Later uses in the same block extend without re-triggering.
    assert!(!lr.extend_in_block(b1, j1, &order));
    assert_eq!(lr.livein_local_end(b1), Some(j1));

    // Earlier uses are already covered.
    assert!(!lr.extend_in_block(b1, use1, &order));
    assert_eq!(lr.livein_local_end(b1), Some(j1));
    assert_eq!(lr.live_ins().len(), 1);
}

#[test]
fn livein_blocks_stay_sorted() {
    let (func, order, v0, [_, use1, _, ret]) = ladder();
    let b0 = Block::new(0);
    let b1 = Block::new(1);
    let b2 = Block::new(2);
    let mut lr = LiveRange::new(b0, def_inst(&func, v0).into());

    // Insert out of order; the list must come out sorted by block.
    assert!(lr.extend_in_block(b2, ret, &order));
    assert!(lr.extend_in_block(b1, use1, &order));
    let blocks: Vec<_> = lr.livein_blocks().collect();
    assert_eq!(blocks, vec![b1, b2]);
    assert_eq!(lr.livein_local_end(b1), Some(use1));
    assert_eq!(lr.livein_local_end(b2), Some(ret));
    assert_eq!(lr.livein_local_end(b0), None);
}

#[test]
fn dead_block_param_range() {
    let mut fb = FunctionBuilder::new("param");
    let b0 = fb.create_block();
    let b1 = fb.create_block();
    let p = fb.append_block_param(b1);
    let v0 = fb.op(b0, &[]);
    fb.jump(b0, b1, &[v0]);
    fb.ret(b1, &[]);
    let func = fb.finish();

    // A block parameter is defined at the block entry.
    let lr = LiveRange::new(b1, b1.into());
    assert!(lr.is_dead());
    assert_eq!(lr.def(), ProgramPoint::Block(b1));
    assert_eq!(lr.def_block(), b1);
    assert_eq!(func.block_params(b1), &[p]);
}
