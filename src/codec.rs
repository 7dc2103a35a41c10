//! The `Codec` trait and the field helpers shared by every model type.
//!
//! Every structure in this crate is parsed by reading its fields in declared
//! order from a [`ReadBuffer`] and serialized by writing the same fields in
//! the same order to a [`WriteBuffer`]. Discriminated families (messages,
//! cEMI frames, APDUs) are enums: the parent reads the discriminator, picks
//! the variant and lets the variant parse the rest. On the way out the
//! discriminator is derived from the variant, so the two can never disagree.
//!
//! Field kinds handled here:
//!
//! - **const** fields must hold a fixed value ([`read_const`])
//! - **reserved** fields should hold a fixed value; a mismatch is logged
//!   and otherwise ignored ([`read_reserved`])
//! - **implicit** fields are computed from the payload on write and checked
//!   against it on read when enabled ([`check_implicit`])
//! - **arrays** are bounded by an element count ([`read_count_array`]) or by
//!   a byte count ([`read_length_array`])

use crate::addressing::NumLevels;
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::error::{CodecError, KnxError, Result};
use crate::utility::{config_value, get_group_address_levels, get_validate_implicit_fields, parse_flag, parse_levels};

/// Knobs that change how ambiguous input is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodecOptions {
    /// Level count used when a group address is decoded without one.
    pub group_address_levels: NumLevels,
    /// Reject input whose implicit length fields disagree with the payload.
    pub validate_implicit_fields: bool,
}

impl CodecOptions {
    /// Build options from a `KEY=VALUE` configuration text.
    ///
    /// Missing or malformed keys fall back to three-level group addresses
    /// and enabled validation.
    ///
    /// ```
    /// use knxnetip_codec::addressing::NumLevels;
    /// use knxnetip_codec::codec::CodecOptions;
    ///
    /// let options = CodecOptions::from_config("GROUP_ADDRESS_LEVELS=2\n");
    /// assert_eq!(options.group_address_levels, NumLevels::Two);
    /// assert!(options.validate_implicit_fields);
    /// ```
    pub fn from_config(config: &str) -> Self {
        Self {
            group_address_levels: parse_levels(config_value(config, "GROUP_ADDRESS_LEVELS")),
            validate_implicit_fields: parse_flag(config_value(config, "VALIDATE_IMPLICIT_FIELDS"), true),
        }
    }

    /// Same options with a different group address level count.
    #[must_use]
    pub const fn with_group_address_levels(mut self, levels: NumLevels) -> Self {
        self.group_address_levels = levels;
        self
    }

    /// Same options with implicit field validation switched on or off.
    #[must_use]
    pub const fn with_validation(mut self, validate: bool) -> Self {
        self.validate_implicit_fields = validate;
        self
    }
}

impl Default for CodecOptions {
    /// Options from the built-in [`CONFIG`](crate::configuration::CONFIG).
    fn default() -> Self {
        Self {
            group_address_levels: get_group_address_levels(),
            validate_implicit_fields: get_validate_implicit_fields(),
        }
    }
}

/// A structure with a self-contained bit layout.
///
/// Types whose layout depends on a value supplied by an enclosing structure
/// (a byte count, a level count, a firmware type) do not implement this trait
/// and instead expose an inherent `parse_*` function taking that value.
pub trait Codec: Sized {
    /// Read the structure starting at the cursor.
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self>;

    /// Write the structure at the cursor.
    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()>;

    /// Encoded size in bits.
    fn length_in_bits(&self) -> usize;

    /// Encoded size in bytes, rounded up.
    fn length_in_bytes(&self) -> usize {
        self.length_in_bits().div_ceil(8)
    }

    /// Parse from the start of `data` with default options.
    fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(&mut ReadBuffer::new(data))
    }

    /// Serialize into `buf`, returning the number of bytes written.
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize> {
        let mut wb = WriteBuffer::new(buf);
        self.serialize(&mut wb)?;
        Ok(wb.pos_bytes())
    }
}

/// Read exactly `count` elements.
pub fn read_count_array<T: Codec, const N: usize>(
    rb: &mut ReadBuffer<'_>,
    count: usize,
) -> Result<heapless::Vec<T, N>> {
    if count > N {
        return Err(KnxError::capacity_exceeded());
    }
    let mut items = heapless::Vec::new();
    for _ in 0..count {
        let item = T::parse(rb)?;
        items.push(item).map_err(|_rejected| KnxError::capacity_exceeded())?;
    }
    Ok(items)
}

/// Read elements until exactly `byte_len` bytes have been consumed.
///
/// An element that runs past the bound is a length mismatch, also when it
/// runs past the end of the input while doing so.
pub fn read_length_array<T: Codec, const N: usize>(
    rb: &mut ReadBuffer<'_>,
    byte_len: usize,
) -> Result<heapless::Vec<T, N>> {
    if !rb.has_more(byte_len * 8) {
        return Err(KnxError::unexpected_eof());
    }
    let end = rb.pos() + byte_len * 8;
    let mut items = heapless::Vec::new();
    while rb.pos() < end {
        let item = T::parse(rb).map_err(|e| {
            if e.as_codec().is_some_and(CodecError::is_unexpected_eof) {
                KnxError::length_mismatch()
            } else {
                e
            }
        })?;
        if rb.pos() > end {
            return Err(KnxError::length_mismatch());
        }
        items.push(item).map_err(|_rejected| KnxError::capacity_exceeded())?;
    }
    Ok(items)
}

/// Write every element in order.
pub fn write_array<T: Codec>(wb: &mut WriteBuffer<'_>, items: &[T]) -> Result<()> {
    items.iter().try_for_each(|item| item.serialize(wb))
}

/// Sum of the element sizes in bits.
pub fn array_length_in_bits<T: Codec>(items: &[T]) -> usize {
    items.iter().map(Codec::length_in_bits).sum()
}

/// Read a field that must hold `expected`.
pub fn read_const(rb: &mut ReadBuffer<'_>, bits: u8, expected: u64) -> Result<()> {
    let actual = rb.read_bits(bits)?;
    if actual != expected {
        return Err(KnxError::const_mismatch(expected, actual));
    }
    Ok(())
}

/// Read a reserved field. A value other than `expected` is logged and skipped.
pub fn read_reserved(rb: &mut ReadBuffer<'_>, bits: u8, expected: u64) -> Result<()> {
    let actual = rb.read_bits(bits)?;
    if actual != expected {
        knx_log!(warn, "reserved field expected {} but got {}, ignoring", expected, actual);
    }
    Ok(())
}

/// Write a reserved field.
pub fn write_reserved(wb: &mut WriteBuffer<'_>, bits: u8, value: u64) -> Result<()> {
    wb.write_bits(bits, value)
}

/// Compare a received implicit field against the value derived from the payload.
pub fn check_implicit(rb: &ReadBuffer<'_>, received: u64, computed: u64) -> Result<()> {
    if rb.options().validate_implicit_fields && received != computed {
        knx_log!(debug, "implicit field is {} but payload implies {}", received, computed);
        return Err(KnxError::length_mismatch());
    }
    Ok(())
}

/// Convert a computed length into an implicit field of `bits` bits.
pub(crate) fn implicit_length(length: usize, bits: u8) -> Result<u64> {
    let value = length as u64;
    if value > crate::buffer::low_mask(bits) {
        return Err(KnxError::value_out_of_range());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldContext;

    /// Minimal variable-size element: a length byte followed by that many bytes.
    #[derive(Debug, PartialEq)]
    struct Chunk(heapless::Vec<u8, 4>);

    impl Codec for Chunk {
        fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
            let len = rb.read_u8(8).field("len")?;
            Ok(Self(rb.read_bytes(usize::from(len)).field("data")?))
        }

        fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
            wb.write_u8(8, self.0.len() as u8)?;
            wb.write_bytes(&self.0)
        }

        fn length_in_bits(&self) -> usize {
            8 + self.0.len() * 8
        }
    }

    #[test]
    fn test_length_array_exact() {
        let data = [1, 0xAA, 2, 0xBB, 0xCC, 0xFF];
        let mut rb = ReadBuffer::new(&data);
        let items: heapless::Vec<Chunk, 4> = read_length_array(&mut rb, 5).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].0.as_slice(), &[0xBB, 0xCC]);
        assert_eq!(rb.pos_bytes(), 5);
        assert_eq!(array_length_in_bits(&items), 40);
    }

    #[test]
    fn test_length_array_overrun() {
        // Second element claims two bytes but only one is inside the bound.
        let data = [1, 0xAA, 2, 0xBB, 0xCC];
        let mut rb = ReadBuffer::new(&data);
        let err = read_length_array::<Chunk, 4>(&mut rb, 4).unwrap_err();
        assert!(err.as_codec().unwrap().is_length_mismatch());
    }

    #[test]
    fn test_length_array_overrun_past_input() {
        // Second element claims three bytes, past both the bound and the input.
        let data = [1, 0xAA, 3, 0xBB];
        let mut rb = ReadBuffer::new(&data);
        let err = read_length_array::<Chunk, 4>(&mut rb, 4).unwrap_err();
        assert!(err.as_codec().unwrap().is_length_mismatch());
    }

    #[test]
    fn test_length_array_eof() {
        let mut rb = ReadBuffer::new(&[1, 0xAA]);
        let err = read_length_array::<Chunk, 4>(&mut rb, 3).unwrap_err();
        assert!(err.as_codec().unwrap().is_unexpected_eof());
    }

    #[test]
    fn test_count_array_capacity() {
        let mut rb = ReadBuffer::new(&[0; 8]);
        let err = read_count_array::<Chunk, 2>(&mut rb, 3).unwrap_err();
        assert!(err.as_codec().unwrap().is_capacity_exceeded());
    }

    #[test]
    fn test_write_array() {
        let items = [Chunk(heapless::Vec::from_slice(&[7]).unwrap()), Chunk(heapless::Vec::new())];
        let mut buf = [0u8; 4];
        let mut wb = WriteBuffer::new(&mut buf);
        write_array(&mut wb, &items).unwrap();
        assert_eq!(wb.written(), &[1, 7, 0]);
    }

    #[test]
    fn test_const_and_reserved() {
        let mut rb = ReadBuffer::new(&[0x10, 0x01]);
        read_const(&mut rb, 8, 0x10).unwrap();
        read_reserved(&mut rb, 8, 0x00).unwrap();

        let mut rb = ReadBuffer::new(&[0x20]);
        let err = read_const(&mut rb, 8, 0x10).unwrap_err();
        assert!(err.as_codec().unwrap().is_const_mismatch());
    }

    #[test]
    fn test_check_implicit_respects_options() {
        let rb = ReadBuffer::new(&[]);
        assert!(check_implicit(&rb, 6, 8).is_err());
        let rb = ReadBuffer::with_options(&[], CodecOptions::default().with_validation(false));
        assert!(check_implicit(&rb, 6, 8).is_ok());
    }

    #[test]
    fn test_options_from_config() {
        let options = CodecOptions::from_config("GROUP_ADDRESS_LEVELS=1\nVALIDATE_IMPLICIT_FIELDS=false\n");
        assert_eq!(options.group_address_levels, NumLevels::One);
        assert!(!options.validate_implicit_fields);
        assert_eq!(CodecOptions::from_config(""), CodecOptions::default());
    }

    #[test]
    fn test_implicit_length_range() {
        assert_eq!(implicit_length(255, 8).unwrap(), 255);
        assert!(implicit_length(256, 8).is_err());
    }
}
