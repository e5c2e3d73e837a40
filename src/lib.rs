//! # RAID-5 Volume Engine
//!
//! Software RAID-5 over a fixed array of block devices, exposed as a single
//! logical sector-addressable volume. Callers address the volume purely in
//! terms of logical sector numbers; striping, rotating parity, degraded-mode
//! reconstruction and on-disk metadata are all hidden behind [`RaidVolume`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       RaidVolume<P>                       │
//! │  ┌────────────┐ ┌──────────┐ ┌─────────┐ ┌─────────────┐ │
//! │  │  geometry  │ │ metadata │ │ io core │ │   resync    │ │
//! │  └────────────┘ └──────────┘ └─────────┘ └─────────────┘ │
//! ├──────────────────────────────────────────────────────────┤
//! │                  BlockProvider (caller-supplied)          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`BlockProvider`] trait stands in for the original `TBlkDev`
//! descriptor: a fixed device/sector count plus two fallible, synchronous
//! sector I/O primitives. Allocating the backing storage, wiring up a real
//! disk or file, and any filesystem layered above the logical volume are all
//! the caller's responsibility.
//!
//! ## Example
//!
//! ```ignore
//! let mut provider = MyBlockProvider::open()?;
//! assert!(RaidVolume::<MyBlockProvider>::create(&mut provider));
//!
//! let mut vol = RaidVolume::new();
//! assert_eq!(vol.start(provider), RaidStatus::Ok);
//!
//! let mut buf = [0u8; SECTOR_SIZE];
//! assert!(vol.write(0, &buf));
//! assert!(vol.read(0, &mut buf));
//! vol.stop();
//! ```
//!
//! ## Non-goals
//!
//! No support for more than one simultaneous device failure (that state is
//! terminal, see [`RaidStatus::Failed`]). No hot-add of a replacement device
//! beyond what [`RaidVolume::resync`] achieves once a device is readable
//! again. No partial-sector I/O. No concurrent access to one volume instance
//! from multiple callers — see the crate-level note on concurrency below.
//!
//! ## Concurrency
//!
//! A `RaidVolume` is single-threaded and non-reentrant: every operation runs
//! to completion (or to a failure return) before the next one may start, and
//! the caller must serialize any multi-threaded access externally. No
//! interior-mutability wrapper is used internally.

#![no_std]

mod fault;
mod geometry;
mod io;
mod metadata;
mod provider;
mod resync;
mod status;
mod volume;

pub use provider::{BlockProvider, Sector};
pub use status::RaidStatus;
pub use volume::RaidVolume;

/// Size in bytes of a single sector. All I/O is in whole sectors.
pub const SECTOR_SIZE: usize = 512;

/// Maximum number of devices a volume descriptor may report.
pub const MAX_DEVICES: usize = 16;

/// Minimum number of sectors a device must report.
pub const MIN_SECTORS_PER_DEVICE: usize = 2048;

/// Maximum number of sectors a device may report.
pub const MAX_SECTORS_PER_DEVICE: usize = 1 << 21;
