//! Bit-level read and write cursors.
//!
//! KNX structures pack fields of arbitrary width (a 3-bit hop count, a 12-bit
//! start index, a 4-bit APCI split across two bytes), so both buffers address
//! the underlying byte slice in bits. All quantities are big-endian and the
//! most significant bit of each byte is read first.
//!
//! ```text
//! byte:   0                 1
//! bit:    7 6 5 4 3 2 1 0   7 6 5 4 3 2 1 0
//! cursor: 0 1 2 3 4 5 6 7   8 9 ...
//! ```

pub mod read;
pub mod write;

pub use read::ReadBuffer;
pub use write::WriteBuffer;

/// Mask with the low `bits` bits set.
#[inline(always)]
pub(crate) const fn low_mask(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
