//! Error type for the liveness analysis.
//!
//! "Not live here" is never an error — the queries return `None` for it.
//! Errors are reserved for malformed input (a caller-contract violation)
//! and for internal-consistency failures surfaced by
//! [`verify_liveness`](crate::verify::verify_liveness).

use cinder_ir::{Block, ProgramPoint, Value};
use thiserror::Error;

/// Fatal analysis failure for one function.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LivenessError {
    /// A value is used but has no definition anywhere in the function.
    ///
    /// Well-formed SSA input can never produce this: every use must be
    /// dominated by the single definition of its value. The analysis
    /// cannot proceed for the function.
    #[error("use of undefined value {value} at {point}")]
    UndefinedValue {
        /// The value with no known definition.
        value: Value,
        /// The use that was being processed.
        point: ProgramPoint,
    },

    /// A computed live range violates one of its invariants.
    #[error("inconsistent live range for {value} in {block}: {reason}")]
    Inconsistent {
        /// The value whose range is broken.
        value: Value,
        /// The block where the violation was observed.
        block: Block,
        /// What went wrong.
        reason: &'static str,
    },
}
