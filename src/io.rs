//! The I/O core: stripe-aware reads and writes with fault-aware fallback
//! and state transitions (§4.3).

use crate::fault::RaidFault;
use crate::geometry;
use crate::provider::{BlockProvider, Sector};
use crate::status::RaidStatus;
use crate::volume::{xor_into, RaidVolume};
use crate::SECTOR_SIZE;

impl<P: BlockProvider> RaidVolume<P> {
    /// Reads `buf.len() / SECTOR_SIZE` contiguous logical sectors starting
    /// at `logical_sector` into `buf`. Fails immediately if the volume is
    /// `STOPPED` or `FAILED`. `buf.len()` must be a non-zero multiple of
    /// `SECTOR_SIZE`.
    pub fn read(&mut self, logical_sector: usize, buf: &mut [u8]) -> bool {
        if self.status == RaidStatus::Stopped || self.status == RaidStatus::Failed {
            return false;
        }
        debug_assert!(!buf.is_empty() && buf.len() % SECTOR_SIZE == 0);

        for (i, chunk) in buf.chunks_exact_mut(SECTOR_SIZE).enumerate() {
            let (device, row) = geometry::locate(logical_sector + i, self.devices);
            match self.checked_read(device, row) {
                Ok(sector) => chunk.copy_from_slice(&sector),
                Err(RaidFault::TooManyFailures) => return false,
            }
        }
        true
    }

    /// Writes `buf.len() / SECTOR_SIZE` contiguous logical sectors starting
    /// at `logical_sector`. Same status precondition as `read`.
    pub fn write(&mut self, logical_sector: usize, buf: &[u8]) -> bool {
        if self.status == RaidStatus::Stopped || self.status == RaidStatus::Failed {
            return false;
        }
        debug_assert!(!buf.is_empty() && buf.len() % SECTOR_SIZE == 0);

        for (i, chunk) in buf.chunks_exact(SECTOR_SIZE).enumerate() {
            let (device, row) = geometry::locate(logical_sector + i, self.devices);
            let source: Sector = chunk.try_into().unwrap();
            if self.checked_write(device, row, &source).is_err() {
                return false;
            }
        }
        true
    }

    /// Reads device-sector `(device, row)`, reconstructing from parity if
    /// `device` is currently flagged failed, and handling a fresh fault by
    /// transitioning state and retrying via reconstruction.
    pub(crate) fn checked_read(&mut self, device: usize, row: usize) -> Result<Sector, RaidFault> {
        if !self.failed[device] {
            let mut sector = [0u8; SECTOR_SIZE];
            let provider = self.provider.as_mut().expect("checked_read requires a started volume");
            if provider.read_sector(device, row, &mut sector) {
                return Ok(sector);
            }

            log::warn!("raid5: read fault on device {device}");
            self.failed[device] = true;
            match self.status {
                RaidStatus::Ok => {
                    self.status = RaidStatus::Degraded;
                    log::warn!("raid5: transitioning to DEGRADED (device {device} failed)");
                }
                _ => {
                    self.status = RaidStatus::Failed;
                    log::error!("raid5: transitioning to FAILED (second fault on device {device})");
                    return Err(RaidFault::TooManyFailures);
                }
            }
        }

        self.reconstruct(device, row)
    }

    /// Rebuilds the content that belongs at `(device, row)` by XORing every
    /// other device's row. A read fault during reconstruction flags that
    /// device failed too and transitions to `FAILED`.
    pub(crate) fn reconstruct(&mut self, device: usize, row: usize) -> Result<Sector, RaidFault> {
        let mut rebuilt = [0u8; SECTOR_SIZE];
        let provider = self.provider.as_mut().expect("reconstruct requires a started volume");
        for other in 0..self.devices {
            if other == device {
                continue;
            }
            let mut sector = [0u8; SECTOR_SIZE];
            if !provider.read_sector(other, row, &mut sector) {
                log::error!("raid5: reconstruction of device {device} failed, device {other} also faulted");
                self.failed[other] = true;
                self.status = RaidStatus::Failed;
                return Err(RaidFault::TooManyFailures);
            }
            xor_into(&mut rebuilt, &sector);
        }
        Ok(rebuilt)
    }

    /// Updates data device `device` and its row's parity device (§4.3).
    /// Both the data device and the parity device are checked-read first
    /// (which may itself transition state via reconstruction), then the
    /// data write is attempted only if `device` is not flagged failed, and
    /// the parity write only if the parity device is not flagged failed —
    /// in that order, so a data-write fault that just flagged `device`
    /// still lets the parity write proceed using the already-read old data
    /// and the caller's new data, keeping the stripe reconstructible.
    pub(crate) fn checked_write(&mut self, device: usize, row: usize, source: &Sector) -> Result<(), RaidFault> {
        let parity = geometry::parity_device(row, self.devices);
        debug_assert_ne!(device, parity, "geometry must never route a data write at the parity device");

        let old_data = self.checked_read(device, row)?;
        let old_parity = self.checked_read(parity, row)?;

        if !self.failed[device] {
            let provider = self.provider.as_mut().expect("checked_write requires a started volume");
            if !provider.write_sector(device, row, source) {
                log::warn!("raid5: write fault on device {device}");
                self.flag_and_promote(device)?;
            }
        }

        if !self.failed[parity] {
            let mut new_parity = old_parity;
            xor_into(&mut new_parity, &old_data);
            xor_into(&mut new_parity, source);

            let provider = self.provider.as_mut().expect("checked_write requires a started volume");
            if !provider.write_sector(parity, row, &new_parity) {
                log::warn!("raid5: write fault on parity device {parity}");
                self.flag_and_promote(parity)?;
            }
        }

        Ok(())
    }

    /// Flags `device` failed and applies the `OK -> DEGRADED` /
    /// `DEGRADED -> FAILED` promotion rule shared by checked reads/writes.
    pub(crate) fn flag_and_promote(&mut self, device: usize) -> Result<(), RaidFault> {
        self.failed[device] = true;
        match self.status {
            RaidStatus::Ok => {
                self.status = RaidStatus::Degraded;
                log::warn!("raid5: transitioning to DEGRADED (device {device} failed)");
                Ok(())
            }
            _ => {
                self.status = RaidStatus::Failed;
                log::error!("raid5: transitioning to FAILED (second fault on device {device})");
                Err(RaidFault::TooManyFailures)
            }
        }
    }
}
