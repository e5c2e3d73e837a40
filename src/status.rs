//! RAID status values and their on-disk wire encoding.

/// Operating status of a [`crate::RaidVolume`].
///
/// ```text
/// STOPPED --start(ok metadata, 0 failures)--> OK
/// STOPPED --start(1 failure)---------------->  DEGRADED
/// STOPPED --start(>=2 failures)------------->  FAILED
/// OK -------I/O fault on any device--------->  DEGRADED
/// DEGRADED -I/O fault on a 2nd device------->  FAILED
/// DEGRADED -resync completes----------------> OK
/// (any)----stop------------------------------> STOPPED
/// FAILED is terminal within a session.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidStatus {
    /// No I/O may proceed; all persistent state has been flushed (best-effort).
    Stopped,
    /// All devices healthy.
    Ok,
    /// Exactly one device failed; reads/writes continue via parity.
    Degraded,
    /// Two or more devices failed. Terminal within the session.
    Failed,
}

impl RaidStatus {
    /// Derives status from a count of currently-failed devices.
    pub(crate) fn from_failed_count(failed: usize) -> Self {
        match failed {
            0 => RaidStatus::Ok,
            1 => RaidStatus::Degraded,
            _ => RaidStatus::Failed,
        }
    }

    /// The wire encoding used in the metadata sector (§4.2): 0/1/2/3.
    pub(crate) fn to_wire(self) -> u32 {
        match self {
            RaidStatus::Stopped => 0,
            RaidStatus::Ok => 1,
            RaidStatus::Degraded => 2,
            RaidStatus::Failed => 3,
        }
    }

    /// Decodes the wire encoding. Unknown values fall back to `Stopped`,
    /// matching the fact that a freshly zeroed/garbage metadata sector must
    /// not be mistaken for a healthy array.
    pub(crate) fn from_wire(value: u32) -> Self {
        match value {
            1 => RaidStatus::Ok,
            2 => RaidStatus::Degraded,
            3 => RaidStatus::Failed,
            _ => RaidStatus::Stopped,
        }
    }
}

impl Default for RaidStatus {
    fn default() -> Self {
        RaidStatus::Stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roundtrip() {
        for s in [RaidStatus::Stopped, RaidStatus::Ok, RaidStatus::Degraded, RaidStatus::Failed] {
            assert_eq!(RaidStatus::from_wire(s.to_wire()), s);
        }
    }

    #[test]
    fn failed_count_derivation() {
        assert_eq!(RaidStatus::from_failed_count(0), RaidStatus::Ok);
        assert_eq!(RaidStatus::from_failed_count(1), RaidStatus::Degraded);
        assert_eq!(RaidStatus::from_failed_count(2), RaidStatus::Failed);
        assert_eq!(RaidStatus::from_failed_count(16), RaidStatus::Failed);
    }
}
