//! Per-value live range analysis for the Cinder backend.
//!
//! For every SSA value in a function this crate computes the precise set
//! of program points where the value is alive, as a compact
//! [`LiveRange`]: the def interval in the defining block plus one local
//! interval per block the value is live-in to. The frozen table
//! ([`Liveness`]) is what the register coloring and spilling passes query.
//!
//! # Why sparse per-value ranges
//!
//! The classic bit-vector live variables analysis needs a bit per value
//! per block — quadratic memory, and a dense encoding of data that is
//! almost entirely sparse: the majority of SSA values never leave their
//! defining block, and those that do rarely span many blocks. It also
//! loses last-use information inside blocks, which the coloring pass
//! needs at every instruction. Storing a per-value record with explicit
//! local end points keeps the common case at a few machine words and
//! answers last-use queries directly.
//!
//! # How consumers use it
//!
//! The coloring pass walks blocks in a topological order of the dominator
//! tree, maintaining the set of currently live values incrementally:
//! seed the set from the live-out set at the dominating branch, filter it
//! with [`Liveness::livein_local_end`], then drop values as the walk
//! passes their local end. No per-block live-out bit vector is ever
//! materialized. The spilling pass uses the same two queries to count
//! live values at each point.
//!
//! # Concurrency
//!
//! The computation is a single-threaded batch pass owning its result;
//! independent functions can be analyzed in parallel with no shared
//! state. Once [`Liveness::compute`] returns, the table is immutable and
//! safe to share across concurrent readers. An IR edit invalidates the
//! table entirely — recompute before reading again.

pub mod compute;
pub mod error;
pub mod liverange;
pub mod verify;

#[cfg(test)]
mod test_helpers;

pub use compute::Liveness;
pub use error::LivenessError;
pub use liverange::{LiveIn, LiveRange};
pub use verify::verify_liveness;
