//! The facade: `create`/`start`/`stop`/`status`/`size`, plus the struct
//! shared by the I/O core ([`crate::io`]) and resync ([`crate::resync`]).

use crate::geometry;
use crate::metadata::{self, Metadata, ReadOutcome};
use crate::provider::BlockProvider;
use crate::status::RaidStatus;
use crate::{MAX_DEVICES, SECTOR_SIZE};

/// A software RAID-5 volume over a provider `P`.
///
/// Created with [`RaidVolume::new`], which holds no persistent state until
/// [`RaidVolume::start`] captures a provider. See the crate root docs for
/// the full lifecycle and concurrency contract.
pub struct RaidVolume<P: BlockProvider> {
    pub(crate) provider: Option<P>,
    pub(crate) status: RaidStatus,
    pub(crate) failed: [bool; MAX_DEVICES],
    pub(crate) devices: usize,
    pub(crate) sectors: usize,
}

impl<P: BlockProvider> RaidVolume<P> {
    /// Creates a fresh, `STOPPED` volume instance holding no provider.
    pub fn new() -> Self {
        Self {
            provider: None,
            status: RaidStatus::Stopped,
            failed: [false; MAX_DEVICES],
            devices: 0,
            sectors: 0,
        }
    }

    /// Writes an initial metadata record (all flags clear, `STOPPED`) to
    /// every device's last sector. Returns whether every device accepted
    /// the write. This does not require a `RaidVolume` instance — it is the
    /// Rust equivalent of the original's `static bool create(const TBlkDev&)`.
    pub fn create(provider: &mut P) -> bool {
        let sector = Metadata::fresh().encode();
        let meta_row = provider.sector_count() - 1;
        for device in 0..provider.device_count() {
            if !provider.write_sector(device, meta_row, &sector) {
                log::error!("raid5: create failed writing initial metadata to device {device}");
                return false;
            }
        }
        true
    }

    /// Brings the volume up from `STOPPED`, recovering status from
    /// persisted metadata (§4.2). Idempotent: if the volume is not
    /// currently `STOPPED`, the given `provider` is dropped unused and the
    /// current status is returned unchanged.
    pub fn start(&mut self, mut provider: P) -> RaidStatus {
        if self.status != RaidStatus::Stopped {
            return self.status;
        }

        let devices = provider.device_count();
        let sectors = provider.sector_count();
        let meta_row = sectors - 1;

        let mut reads = [ReadOutcome::Unreadable; MAX_DEVICES];
        for (device, slot) in reads.iter_mut().enumerate().take(devices) {
            let mut sector = [0u8; SECTOR_SIZE];
            if provider.read_sector(device, meta_row, &mut sector) {
                *slot = ReadOutcome::Ok(Metadata::decode(&sector));
            } else {
                log::warn!("raid5: metadata sector unreadable on device {device}");
            }
        }

        self.failed = metadata::reconcile(&reads[..devices]);
        self.devices = devices;
        self.sectors = sectors;
        self.provider = Some(provider);

        let failed_count = self.failed[..devices].iter().filter(|f| **f).count();
        self.status = RaidStatus::from_failed_count(failed_count);
        match self.status {
            RaidStatus::Degraded => log::warn!("raid5: started in DEGRADED status ({failed_count} device failed)"),
            RaidStatus::Failed => log::error!("raid5: started in FAILED status ({failed_count} devices failed)"),
            _ => log::info!("raid5: started OK"),
        }
        self.status
    }

    /// Flushes current status to every device's metadata sector
    /// (best-effort — a device write failure does not change the outcome,
    /// per §4.2/§9 Open Question 2) and transitions to `STOPPED`.
    pub fn stop(&mut self) -> RaidStatus {
        if let Some(provider) = self.provider.as_mut() {
            let sector = Metadata {
                failed: self.failed,
                status: self.status,
            }
            .encode();
            for device in 0..self.devices {
                if !provider.write_sector(device, self.sectors - 1, &sector) {
                    log::warn!("raid5: failed to flush metadata to device {device} on stop");
                }
            }
        }
        self.provider = None;
        self.status = RaidStatus::Stopped;
        self.status
    }

    /// Pure accessor for the current status.
    pub fn status(&self) -> RaidStatus {
        self.status
    }

    /// Logical capacity in sectors, `(devices - 1) * (sectors - 1)`.
    /// Undefined (returns 0) before the first successful `start`.
    pub fn size(&self) -> usize {
        if self.devices == 0 {
            return 0;
        }
        geometry::capacity(self.devices, self.sectors)
    }
}

impl<P: BlockProvider> Default for RaidVolume<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// XORs `src` into `dst` in place.
pub(crate) fn xor_into(dst: &mut [u8; SECTOR_SIZE], src: &[u8; SECTOR_SIZE]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= *s;
    }
}
