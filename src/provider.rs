//! The block-device array capability injected into a volume at `start`.
//!
//! This is the Rust rendering of the original `TBlkDev` descriptor: a fixed
//! device count, a fixed per-device sector count, and two fallible
//! synchronous sector I/O primitives. Allocating and wiring up the actual
//! backing storage is the caller's job — see `SPEC_FULL.md`'s "Out of
//! scope" list.

use crate::SECTOR_SIZE;

/// One 512-byte sector payload.
pub type Sector = [u8; SECTOR_SIZE];

/// Capability for performing sector I/O against a fixed array of devices.
///
/// Both `read` and `write` are synchronous and must return the number of
/// sectors actually transferred; any value other than `sectors` is a
/// failure for that call. Valid arguments always satisfy
/// `device < device_count()`, `start_sector + sectors <= sector_count()`
/// and `sectors >= 1` — the engine never issues calls outside those bounds,
/// so implementations need not validate them defensively.
pub trait BlockProvider {
    /// Number of devices in the array, `3 <= device_count() <= MAX_DEVICES`.
    fn device_count(&self) -> usize;

    /// Number of sectors per device, `MIN_SECTORS_PER_DEVICE <=
    /// sector_count() <= MAX_SECTORS_PER_DEVICE`.
    fn sector_count(&self) -> usize;

    /// Reads `sectors` contiguous sectors from `device` starting at
    /// `start_sector` into `buf` (`buf.len() == sectors * SECTOR_SIZE`).
    /// Returns the number of sectors actually read.
    fn read(&mut self, device: usize, start_sector: usize, buf: &mut [u8], sectors: usize) -> usize;

    /// Writes `sectors` contiguous sectors to `device` starting at
    /// `start_sector` from `buf` (`buf.len() == sectors * SECTOR_SIZE`).
    /// Returns the number of sectors actually written.
    fn write(&mut self, device: usize, start_sector: usize, buf: &[u8], sectors: usize) -> usize;

    /// Convenience: reads exactly one sector.
    fn read_sector(&mut self, device: usize, sector: usize, out: &mut Sector) -> bool {
        self.read(device, sector, out, 1) == 1
    }

    /// Convenience: writes exactly one sector.
    fn write_sector(&mut self, device: usize, sector: usize, data: &Sector) -> bool {
        self.write(device, sector, data, 1) == 1
    }
}

/// An in-memory [`BlockProvider`] used by this crate's own unit tests.
///
/// Device failures are injected explicitly with [`MemoryProvider::fail_reads`]
/// / [`MemoryProvider::fail_writes`] rather than simulated by corrupting
/// memory, so tests can pinpoint exactly which provider call is expected to
/// fail.
#[cfg(test)]
mod memory {
    extern crate std;

    use super::{BlockProvider, SECTOR_SIZE};
    use std::vec;
    use std::vec::Vec;

    pub(crate) struct MemoryProvider {
        devices: Vec<Vec<u8>>,
        sectors: usize,
        failing_reads: Vec<bool>,
        failing_writes: Vec<bool>,
    }

    impl MemoryProvider {
        pub(crate) fn new(devices: usize, sectors: usize) -> Self {
            Self {
                devices: (0..devices).map(|_| vec![0u8; sectors * SECTOR_SIZE]).collect(),
                sectors,
                failing_reads: vec![false; devices],
                failing_writes: vec![false; devices],
            }
        }

        pub(crate) fn fail_reads(&mut self, device: usize, fail: bool) {
            self.failing_reads[device] = fail;
        }

        pub(crate) fn fail_writes(&mut self, device: usize, fail: bool) {
            self.failing_writes[device] = fail;
        }
    }

    impl BlockProvider for MemoryProvider {
        fn device_count(&self) -> usize {
            self.devices.len()
        }

        fn sector_count(&self) -> usize {
            self.sectors
        }

        fn read(&mut self, device: usize, start_sector: usize, buf: &mut [u8], sectors: usize) -> usize {
            if self.failing_reads[device] {
                return 0;
            }
            let byte_start = start_sector * SECTOR_SIZE;
            let byte_len = sectors * SECTOR_SIZE;
            buf[..byte_len].copy_from_slice(&self.devices[device][byte_start..byte_start + byte_len]);
            sectors
        }

        fn write(&mut self, device: usize, start_sector: usize, buf: &[u8], sectors: usize) -> usize {
            if self.failing_writes[device] {
                return 0;
            }
            let byte_start = start_sector * SECTOR_SIZE;
            let byte_len = sectors * SECTOR_SIZE;
            self.devices[device][byte_start..byte_start + byte_len].copy_from_slice(&buf[..byte_len]);
            sectors
        }
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryProvider;
