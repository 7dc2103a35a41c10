//! Read cursor over a borrowed byte slice.

use crate::codec::CodecOptions;
use crate::error::{KnxError, Result};

/// Bit cursor for decoding.
///
/// A failed read leaves the cursor where it was.
///
/// # Examples
///
/// ```
/// use knxnetip_codec::buffer::ReadBuffer;
///
/// let mut rb = ReadBuffer::new(&[0b1011_0010, 0xFF]);
/// assert!(rb.read_bit()?);
/// assert_eq!(rb.read_u8(3)?, 0b011);
/// assert_eq!(rb.read_i8(4)?, 0b0010);
/// assert_eq!(rb.read_i8(8)?, -1);
/// assert!(!rb.has_more(1));
/// # Ok::<(), knxnetip_codec::KnxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReadBuffer<'a> {
    data: &'a [u8],
    pos: usize,
    options: CodecOptions,
}

impl<'a> ReadBuffer<'a> {
    /// Create a cursor at bit 0 using the built-in codec options.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, CodecOptions::default())
    }

    /// Create a cursor with explicit codec options.
    pub fn with_options(data: &'a [u8], options: CodecOptions) -> Self {
        Self { data, pos: 0, options }
    }

    /// Options in effect for this parse.
    #[inline(always)]
    pub const fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Current position in bits.
    #[inline(always)]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Current position in bytes, counting a partially read byte.
    #[inline(always)]
    pub const fn pos_bytes(&self) -> usize {
        self.pos.div_ceil(8)
    }

    /// Length of the underlying slice in bytes.
    #[inline(always)]
    pub const fn total_bytes(&self) -> usize {
        self.data.len()
    }

    /// Bits left before the end of input.
    #[inline(always)]
    pub const fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    /// Whether at least `bits` more bits can be read.
    #[inline(always)]
    pub const fn has_more(&self, bits: usize) -> bool {
        self.remaining_bits() >= bits
    }

    /// Whether the cursor sits on a byte boundary.
    #[inline(always)]
    pub const fn is_aligned(&self) -> bool {
        self.pos % 8 == 0
    }

    /// Read `bits` (1-64) bits as an unsigned quantity.
    pub fn read_bits(&mut self, bits: u8) -> Result<u64> {
        if bits == 0 || bits > 64 {
            return Err(KnxError::invalid_bit_length());
        }
        if !self.has_more(usize::from(bits)) {
            return Err(KnxError::unexpected_eof());
        }

        let mut value = 0u64;
        let mut remaining = bits;
        while remaining > 0 {
            let byte = self.data[self.pos / 8];
            let available = 8 - (self.pos % 8) as u8;
            let take = available.min(remaining);
            let chunk = (byte >> (available - take)) & (super::low_mask(take) as u8);
            value = (value << take) | u64::from(chunk);
            self.pos += usize::from(take);
            remaining -= take;
        }
        Ok(value)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    #[inline]
    fn read_unsigned(&mut self, bits: u8, width: u8) -> Result<u64> {
        if bits > width {
            return Err(KnxError::invalid_bit_length());
        }
        self.read_bits(bits)
    }

    #[inline]
    fn read_signed(&mut self, bits: u8, width: u8) -> Result<i64> {
        let raw = self.read_unsigned(bits, width)?;
        let shift = 64 - u32::from(bits);
        Ok(((raw << shift) as i64) >> shift)
    }

    /// Read up to 8 bits as `u8`.
    pub fn read_u8(&mut self, bits: u8) -> Result<u8> {
        self.read_unsigned(bits, 8).map(|v| v as u8)
    }

    /// Read up to 16 bits as `u16`.
    pub fn read_u16(&mut self, bits: u8) -> Result<u16> {
        self.read_unsigned(bits, 16).map(|v| v as u16)
    }

    /// Read up to 32 bits as `u32`.
    pub fn read_u32(&mut self, bits: u8) -> Result<u32> {
        self.read_unsigned(bits, 32).map(|v| v as u32)
    }

    /// Read up to 64 bits as `u64`.
    pub fn read_u64(&mut self, bits: u8) -> Result<u64> {
        self.read_unsigned(bits, 64)
    }

    /// Read up to 8 bits as a two's complement `i8`.
    pub fn read_i8(&mut self, bits: u8) -> Result<i8> {
        self.read_signed(bits, 8).map(|v| v as i8)
    }

    /// Read up to 16 bits as a two's complement `i16`.
    pub fn read_i16(&mut self, bits: u8) -> Result<i16> {
        self.read_signed(bits, 16).map(|v| v as i16)
    }

    /// Read up to 32 bits as a two's complement `i32`.
    pub fn read_i32(&mut self, bits: u8) -> Result<i32> {
        self.read_signed(bits, 32).map(|v| v as i32)
    }

    /// Read up to 64 bits as a two's complement `i64`.
    pub fn read_i64(&mut self, bits: u8) -> Result<i64> {
        self.read_signed(bits, 64)
    }

    /// Read an IEEE 754 single precision float.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_u32(32).map(f32::from_bits)
    }

    /// Read an IEEE 754 double precision float.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_u64(64).map(f64::from_bits)
    }

    /// Read `count` bytes into a bounded vector. Works at any bit offset.
    pub fn read_bytes<const N: usize>(&mut self, count: usize) -> Result<heapless::Vec<u8, N>> {
        if count > N {
            return Err(KnxError::capacity_exceeded());
        }
        if !self.has_more(count * 8) {
            return Err(KnxError::unexpected_eof());
        }
        let mut out = heapless::Vec::new();
        if self.is_aligned() {
            let start = self.pos / 8;
            out.extend_from_slice(&self.data[start..start + count])
                .map_err(|_full| KnxError::capacity_exceeded())?;
            self.pos += count * 8;
        } else {
            for _ in 0..count {
                out.push(self.read_bits(8)? as u8)
                    .map_err(|_rejected| KnxError::capacity_exceeded())?;
            }
        }
        Ok(out)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        if !self.has_more(N * 8) {
            return Err(KnxError::unexpected_eof());
        }
        let mut out = [0u8; N];
        for byte in &mut out {
            *byte = self.read_bits(8)? as u8;
        }
        Ok(out)
    }

    /// Borrow the next `count` bytes without copying.
    ///
    /// The cursor must be byte aligned.
    pub fn read_slice(&mut self, count: usize) -> Result<&'a [u8]> {
        if !self.is_aligned() {
            return Err(KnxError::invalid_bit_length());
        }
        if !self.has_more(count * 8) {
            return Err(KnxError::unexpected_eof());
        }
        let start = self.pos / 8;
        self.pos += count * 8;
        Ok(&self.data[start..start + count])
    }
}
