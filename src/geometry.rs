//! Logical sector <-> (device, device-sector) translation.
//!
//! Every device has `sectors` device-sector rows, `r in [0, sectors - 1)`.
//! Row `sectors - 1` is reserved for the metadata record and is never
//! addressed by a logical sector. Within a data row `r`, exactly one device
//! holds parity — device `r mod devices`, rotating left-symmetrically over
//! rows — and the remaining `devices - 1` positions hold data.
//!
//! Each row therefore contributes `devices - 1` logical sectors. Given a
//! logical sector `l`, its row is `l / (devices - 1)` and its offset within
//! the row is `l % (devices - 1)`; the data device is the device at that
//! offset among the `devices - 1` non-parity positions of the row, taken in
//! ascending device-index order. This is the scheme `SPEC_FULL.md` §3 pins
//! down as the resolution of the original source's under-specified
//! arithmetic — any deterministic, bijective scheme would satisfy the
//! invariants, but this is the one this crate commits to.

/// The parity device for device-sector row `row`, rotating over `devices`.
pub(crate) fn parity_device(row: usize, devices: usize) -> usize {
    row % devices
}

/// Usable logical capacity in sectors for an array of `devices` devices of
/// `sectors` sectors each.
pub(crate) fn capacity(devices: usize, sectors: usize) -> usize {
    (devices - 1) * (sectors - 1)
}

/// Maps a logical sector to its `(data device, device-sector row)`.
///
/// Panics if `logical_sector >= capacity(devices, sectors)` — callers must
/// bounds-check before calling, which `RaidVolume::read`/`write` always do.
pub(crate) fn locate(logical_sector: usize, devices: usize) -> (usize, usize) {
    let data_per_row = devices - 1;
    let row = logical_sector / data_per_row;
    let offset = logical_sector % data_per_row;
    let parity = parity_device(row, devices);
    let device = (0..devices)
        .filter(|d| *d != parity)
        .nth(offset)
        .expect("offset is within a row's data-device count");
    (device, row)
}
