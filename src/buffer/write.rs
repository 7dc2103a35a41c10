//! Write cursor over a caller-provided byte slice.

use super::low_mask;
use crate::error::{KnxError, Result};

/// Bit cursor for encoding.
///
/// Only the bits covered by a write are touched; everything else in the
/// target slice keeps its previous value.
///
/// # Examples
///
/// ```
/// use knxnetip_codec::buffer::WriteBuffer;
///
/// let mut buf = [0u8; 2];
/// let mut wb = WriteBuffer::new(&mut buf);
/// wb.write_bit(true)?;
/// wb.write_u8(3, 0b011)?;
/// wb.write_i8(4, -2)?;
/// wb.write_u8(8, 0xFF)?;
/// assert_eq!(wb.written(), &[0b1011_1110, 0xFF]);
/// # Ok::<(), knxnetip_codec::KnxError>(())
/// ```
#[derive(Debug)]
pub struct WriteBuffer<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> WriteBuffer<'a> {
    /// Create a cursor at bit 0 of `data`.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current position in bits.
    #[inline(always)]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes touched so far, counting a partially written byte.
    #[inline(always)]
    pub const fn pos_bytes(&self) -> usize {
        self.pos.div_ceil(8)
    }

    /// Capacity of the target slice in bytes.
    #[inline(always)]
    pub const fn total_bytes(&self) -> usize {
        self.data.len()
    }

    /// Bits left before the end of the target slice.
    #[inline(always)]
    pub const fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    /// Whether the cursor sits on a byte boundary.
    #[inline(always)]
    pub const fn is_aligned(&self) -> bool {
        self.pos % 8 == 0
    }

    /// The written prefix of the target slice.
    pub fn written(&self) -> &[u8] {
        &self.data[..self.pos_bytes()]
    }

    /// Write the low `bits` (1-64) bits of `value`.
    ///
    /// `value` must fit in `bits` bits.
    pub fn write_bits(&mut self, bits: u8, value: u64) -> Result<()> {
        if bits == 0 || bits > 64 {
            return Err(KnxError::invalid_bit_length());
        }
        if value & !low_mask(bits) != 0 {
            return Err(KnxError::value_out_of_range());
        }
        if self.remaining_bits() < usize::from(bits) {
            return Err(KnxError::buffer_too_small());
        }

        let mut remaining = bits;
        while remaining > 0 {
            let offset = (self.pos % 8) as u8;
            let available = 8 - offset;
            let take = available.min(remaining);
            let shift = available - take;
            let chunk = ((value >> (remaining - take)) & low_mask(take)) as u8;
            let mask = (low_mask(take) as u8) << shift;
            let byte = &mut self.data[self.pos / 8];
            *byte = (*byte & !mask) | (chunk << shift);
            self.pos += usize::from(take);
            remaining -= take;
        }
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, value: bool) -> Result<()> {
        self.write_bits(1, u64::from(value))
    }

    #[inline]
    fn write_unsigned(&mut self, bits: u8, width: u8, value: u64) -> Result<()> {
        if bits > width {
            return Err(KnxError::invalid_bit_length());
        }
        self.write_bits(bits, value)
    }

    #[inline]
    fn write_signed(&mut self, bits: u8, width: u8, value: i64) -> Result<()> {
        if bits == 0 || bits > width {
            return Err(KnxError::invalid_bit_length());
        }
        let min = -(1i128 << (bits - 1));
        let max = (1i128 << (bits - 1)) - 1;
        if !(min..=max).contains(&i128::from(value)) {
            return Err(KnxError::value_out_of_range());
        }
        self.write_bits(bits, (value as u64) & low_mask(bits))
    }

    /// Write `value` in `bits` (1-8) bits.
    pub fn write_u8(&mut self, bits: u8, value: u8) -> Result<()> {
        self.write_unsigned(bits, 8, u64::from(value))
    }

    /// Write `value` in `bits` (1-16) bits.
    pub fn write_u16(&mut self, bits: u8, value: u16) -> Result<()> {
        self.write_unsigned(bits, 16, u64::from(value))
    }

    /// Write `value` in `bits` (1-32) bits.
    pub fn write_u32(&mut self, bits: u8, value: u32) -> Result<()> {
        self.write_unsigned(bits, 32, u64::from(value))
    }

    /// Write `value` in `bits` (1-64) bits.
    pub fn write_u64(&mut self, bits: u8, value: u64) -> Result<()> {
        self.write_unsigned(bits, 64, value)
    }

    /// Write a two's complement `value` in `bits` (1-8) bits.
    pub fn write_i8(&mut self, bits: u8, value: i8) -> Result<()> {
        self.write_signed(bits, 8, i64::from(value))
    }

    /// Write a two's complement `value` in `bits` (1-16) bits.
    pub fn write_i16(&mut self, bits: u8, value: i16) -> Result<()> {
        self.write_signed(bits, 16, i64::from(value))
    }

    /// Write a two's complement `value` in `bits` (1-32) bits.
    pub fn write_i32(&mut self, bits: u8, value: i32) -> Result<()> {
        self.write_signed(bits, 32, i64::from(value))
    }

    /// Write a two's complement `value` in `bits` (1-64) bits.
    pub fn write_i64(&mut self, bits: u8, value: i64) -> Result<()> {
        self.write_signed(bits, 64, value)
    }

    /// Write an IEEE 754 single precision float.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_u32(32, value.to_bits())
    }

    /// Write an IEEE 754 double precision float.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_u64(64, value.to_bits())
    }

    /// Write raw bytes at the current (possibly unaligned) position.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.remaining_bits() < bytes.len() * 8 {
            return Err(KnxError::buffer_too_small());
        }
        if self.is_aligned() {
            let start = self.pos / 8;
            self.data[start..start + bytes.len()].copy_from_slice(bytes);
            self.pos += bytes.len() * 8;
            return Ok(());
        }
        for &byte in bytes {
            self.write_u8(8, byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_unaligned_fields() {
        let mut buf = [0u8; 3];
        let mut wb = WriteBuffer::new(&mut buf);
        wb.write_u8(3, 0b101).unwrap();
        wb.write_u16(10, 0b11_0011_1100).unwrap();
        wb.write_u8(4, 0b0011).unwrap();
        assert_eq!(wb.pos(), 17);
        assert_eq!(wb.written(), &[0b1011_1001, 0b1110_0001, 0b1000_0000]);
    }

    #[test]
    fn test_write_preserves_other_bits() {
        let mut buf = [0xFF, 0xFF];
        let mut wb = WriteBuffer::new(&mut buf);
        wb.write_u8(4, 0).unwrap();
        wb.write_u8(8, 0).unwrap();
        assert_eq!(buf, [0x00, 0x0F]);
    }

    #[test]
    fn test_write_value_out_of_range() {
        let mut buf = [0u8; 2];
        let mut wb = WriteBuffer::new(&mut buf);
        let err = wb.write_u8(3, 8).unwrap_err();
        assert!(err.as_codec().unwrap().is_value_out_of_range());
        let err = wb.write_i8(4, 8).unwrap_err();
        assert!(err.as_codec().unwrap().is_value_out_of_range());
        let err = wb.write_i8(4, -9).unwrap_err();
        assert!(err.as_codec().unwrap().is_value_out_of_range());
        wb.write_i8(4, -8).unwrap();
        assert_eq!(wb.pos(), 4);
    }

    #[test]
    fn test_write_buffer_too_small() {
        let mut buf = [0u8; 1];
        let mut wb = WriteBuffer::new(&mut buf);
        wb.write_u8(6, 0).unwrap();
        let err = wb.write_u8(3, 0).unwrap_err();
        assert!(err.as_codec().unwrap().is_buffer_too_small());
        assert!(wb.write_bytes(&[1]).is_err());
    }

    #[test]
    fn test_write_bytes_unaligned() {
        let mut buf = [0u8; 3];
        let mut wb = WriteBuffer::new(&mut buf);
        wb.write_u8(4, 0).unwrap();
        wb.write_bytes(&[0xAB, 0xCD]).unwrap();
        assert_eq!(wb.written(), &[0x0A, 0xBC, 0xD0]);
    }

    #[test]
    fn test_write_full_width() {
        let mut buf = [0u8; 8];
        let mut wb = WriteBuffer::new(&mut buf);
        wb.write_i64(64, -2).unwrap();
        assert_eq!(buf, [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]);
    }
}
