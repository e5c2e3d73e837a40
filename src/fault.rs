//! Internal fault signal used to propagate I/O-core failures with `?`.
//!
//! The public facade never exposes this type — `read`/`write` return `bool`
//! and `start`/`resync` return [`crate::RaidStatus`], per the spec's literal
//! surface. `RaidFault` only threads failures through the private
//! checked-read/checked-write/resync plumbing, the same way
//! `splax_kernel::block::BlockError` threads failures through the block
//! layer internally.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RaidFault {
    /// A second device failure was observed; the volume is now `FAILED`.
    TooManyFailures,
}
