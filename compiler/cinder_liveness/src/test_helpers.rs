//! Shared test utilities for the liveness tests.

use cinder_ir::{ControlFlowGraph, Function, Inst, Value, ValueDef};

use crate::compute::Liveness;
use crate::verify::verify_liveness;

/// Compute the CFG and liveness for `func`, checking the result against
/// the structural invariants before handing it to the test.
pub(crate) fn analyze(func: &Function) -> (ControlFlowGraph, Liveness) {
    let cfg = ControlFlowGraph::compute(func);
    let liveness = match Liveness::compute(func, &cfg) {
        Ok(liveness) => liveness,
        Err(e) => panic!("liveness computation failed: {e}"),
    };
    if let Err(e) = verify_liveness(func, &cfg, &liveness) {
        panic!("liveness verification failed: {e}");
    }
    (cfg, liveness)
}

/// The instruction defining `value`, which must be an instruction result.
pub(crate) fn def_inst(func: &Function, value: Value) -> Inst {
    match func.value_def(value) {
        Some(ValueDef::Inst(inst)) => inst,
        def => panic!("{value} is not an instruction result: {def:?}"),
    }
}
