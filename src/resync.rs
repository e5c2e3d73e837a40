//! Rebuilds a failed device's content row-by-row from surviving devices
//! (§4.4).

use crate::provider::BlockProvider;
use crate::status::RaidStatus;
use crate::volume::{xor_into, RaidVolume};
use crate::SECTOR_SIZE;

impl<P: BlockProvider> RaidVolume<P> {
    /// Rebuilds the single failed device's data sectors from parity. A
    /// no-op returning the current status unless the volume is currently
    /// `DEGRADED`. On success every failed flag clears and status becomes
    /// `OK`. The failed device's metadata sector is not touched here — it
    /// is rewritten on the next `stop`.
    pub fn resync(&mut self) -> RaidStatus {
        if self.status != RaidStatus::Degraded {
            return self.status;
        }

        let Some(failed_device) = (0..self.devices).find(|&d| self.failed[d]) else {
            return self.status;
        };

        log::info!("raid5: resync starting for device {failed_device}");
        let provider = self.provider.as_mut().expect("resync requires a started volume");

        for row in 0..self.sectors - 1 {
            let mut rebuilt = [0u8; SECTOR_SIZE];
            for other in 0..self.devices {
                if other == failed_device {
                    continue;
                }
                let mut sector = [0u8; SECTOR_SIZE];
                if !provider.read_sector(other, row, &mut sector) {
                    log::error!("raid5: resync aborted, device {other} faulted while rebuilding row {row}");
                    self.failed[other] = true;
                    self.status = RaidStatus::Failed;
                    return self.status;
                }
                xor_into(&mut rebuilt, &sector);
            }

            if !provider.write_sector(failed_device, row, &rebuilt) {
                log::warn!("raid5: resync write to device {failed_device} failed at row {row}, staying DEGRADED");
                return self.status;
            }
        }

        self.failed = [false; crate::MAX_DEVICES];
        self.status = RaidStatus::Ok;
        log::info!("raid5: resync complete, volume OK");
        self.status
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::provider::MemoryProvider;

    const D: usize = 4;
    const S: usize = 16;

    #[test]
    fn resync_is_noop_outside_degraded() {
        let mut provider = MemoryProvider::new(D, S);
        assert!(RaidVolume::<MemoryProvider>::create(&mut provider));
        let mut vol = RaidVolume::new();
        assert_eq!(vol.start(provider), RaidStatus::Ok);
        assert_eq!(vol.resync(), RaidStatus::Ok);
    }

    #[test]
    fn resync_restores_ok_and_all_data_readable() {
        let mut provider = MemoryProvider::new(D, S);
        assert!(RaidVolume::<MemoryProvider>::create(&mut provider));
        let mut vol = RaidVolume::new();
        assert_eq!(vol.start(provider), RaidStatus::Ok);

        let size = vol.size();
        for l in 0..size {
            let payload = std::vec![(l % 200) as u8; SECTOR_SIZE];
            assert!(vol.write(l, &payload));
        }

        vol.provider.as_mut().unwrap().fail_reads(0, true);
        vol.provider.as_mut().unwrap().fail_writes(0, true);
        // Touch a sector whose data device is 0 to force the DEGRADED transition.
        let mut out = std::vec![0u8; SECTOR_SIZE];
        assert!(vol.read(3, &mut out));
        assert_eq!(vol.status(), RaidStatus::Degraded);

        vol.provider.as_mut().unwrap().fail_reads(0, false);
        vol.provider.as_mut().unwrap().fail_writes(0, false);
        assert_eq!(vol.resync(), RaidStatus::Ok);
        assert_eq!(vol.status(), RaidStatus::Ok);

        for l in 0..size {
            let mut out = std::vec![0u8; SECTOR_SIZE];
            assert!(vol.read(l, &mut out));
            assert_eq!(out, std::vec![(l % 200) as u8; SECTOR_SIZE]);
        }
    }
}
