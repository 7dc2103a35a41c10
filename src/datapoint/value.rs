//! Typed datapoint values.
//!
//! A [`KnxValue`] is decoded from and encoded to the payload of a group value
//! telegram according to a [`ValueFormat`], the format name column of the
//! datapoint type table (`B1`, `F16`, `N3N5r2N6r2N6`, ...).
//!
//! ## Group values
//!
//! A group value write or response carries the first six bits of its payload
//! in the APCI byte (`dataFirstByte`). Formats of six bits or less live
//! entirely there, everything else follows as whole bytes:
//!
//! ```text
//! B1 = true         dataFirstByte = 0x01, data = []
//! F16 = 21.5        dataFirstByte = 0x00, data = [0x0C, 0x33]
//! ```
//!
//! ## Example
//!
//! ```
//! use knxnetip_codec::datapoint::{DatapointType, KnxValue};
//!
//! let format = DatapointType::ValueTemp.value_format()?;
//! let (first, data) = KnxValue::Float(21.5).to_group_value(format)?;
//! assert_eq!((first, data.as_slice()), (0, &[0x0C, 0x33][..]));
//!
//! let value = KnxValue::from_group_value(format, first, &data)?;
//! assert!(matches!(value, KnxValue::Float(t) if (t - 21.5).abs() < 0.01));
//! # Ok::<(), knxnetip_codec::KnxError>(())
//! ```

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{read_reserved, write_reserved};
use crate::datapoint::DatapointType;
use crate::error::{FieldContext, KnxError, Result};
use crate::protocol::apdu::{Apdu, ApduBytes, ApduData, ApduPayload};

/// Characters of an `A112` string.
pub const STRING_LENGTH: usize = 14;

/// UTF-8 storage for an `A112` string; Latin-1 characters take up to two bytes.
pub type KnxString = heapless::String<{ STRING_LENGTH * 2 }>;

/// Value formats supported by [`KnxValue`].
///
/// Lowercase `r` in a format name marks reserved bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueFormat {
    /// `B1`: boolean
    B1,
    /// `B2`: boolean with control bit
    B2,
    /// `B1U3`: control bit and 3-bit step code
    B1U3,
    /// `A8_ASCII`: one ASCII character
    A8Ascii,
    /// `A8_8859_1`: one Latin-1 character
    A8Latin1,
    /// `U8`: unsigned 8-bit
    U8,
    /// `V8`: signed 8-bit
    V8,
    /// `N8`: 8-bit enumeration
    N8,
    /// `B8`: 8-bit bitmap
    B8,
    /// `U16`: unsigned 16-bit
    U16,
    /// `V16`: signed 16-bit
    V16,
    /// `B16`: 16-bit bitmap
    B16,
    /// `F16`: KNX 2-byte float
    F16,
    /// `U32`: unsigned 32-bit
    U32,
    /// `V32`: signed 32-bit
    V32,
    /// `B32`: 32-bit bitmap
    B32,
    /// `F32`: IEEE 754 single precision
    F32,
    /// `V64`: signed 64-bit
    V64,
    /// `N2`: 2-bit enumeration
    N2,
    /// `N3`: 3-bit enumeration
    N3,
    /// `r2U6`: 6-bit unsigned, e.g. a scene number
    R2U6,
    /// `U8r7B1`: set value and channel activation flag
    U8R7B1,
    /// `U4U4`: two nibbles (busy, nak)
    U4U4,
    /// `N3N5r2N6r2N6`: day of week and time of day
    TimeOfDay,
    /// `r3N5r4N4r1U7`: calendar date
    Date,
    /// `A112_ASCII`: 14 character ASCII string
    A112Ascii,
    /// `A112_8859_1`: 14 character Latin-1 string
    A112Latin1,
}

const FORMAT_NAMES: &[(&str, ValueFormat)] = &[
    ("B1", ValueFormat::B1),
    ("B2", ValueFormat::B2),
    ("B1U3", ValueFormat::B1U3),
    ("A8_ASCII", ValueFormat::A8Ascii),
    ("A8_8859_1", ValueFormat::A8Latin1),
    ("U8", ValueFormat::U8),
    ("V8", ValueFormat::V8),
    ("N8", ValueFormat::N8),
    ("B8", ValueFormat::B8),
    ("U16", ValueFormat::U16),
    ("V16", ValueFormat::V16),
    ("B16", ValueFormat::B16),
    ("F16", ValueFormat::F16),
    ("U32", ValueFormat::U32),
    ("V32", ValueFormat::V32),
    ("B32", ValueFormat::B32),
    ("F32", ValueFormat::F32),
    ("V64", ValueFormat::V64),
    ("N2", ValueFormat::N2),
    ("N3", ValueFormat::N3),
    ("r2U6", ValueFormat::R2U6),
    ("U8r7B1", ValueFormat::U8R7B1),
    ("U4U4", ValueFormat::U4U4),
    ("N3N5r2N6r2N6", ValueFormat::TimeOfDay),
    ("r3N5r4N4r1U7", ValueFormat::Date),
    ("A112_ASCII", ValueFormat::A112Ascii),
    ("A112_8859_1", ValueFormat::A112Latin1),
];

impl ValueFormat {
    /// Look up a format by its name in the datapoint type table.
    ///
    /// Returns `None` for formats the value codec does not handle.
    pub fn from_name(name: &str) -> Option<Self> {
        FORMAT_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, format)| *format)
    }

    /// The format name as written in the datapoint type table.
    pub fn name(self) -> &'static str {
        FORMAT_NAMES
            .iter()
            .find(|(_, format)| *format == self)
            .map_or("", |(name, _)| *name)
    }

    /// Encoded width in bits, reserved bits included.
    pub const fn length_in_bits(self) -> usize {
        match self {
            Self::B1
            | Self::B2
            | Self::B1U3
            | Self::A8Ascii
            | Self::A8Latin1
            | Self::U8
            | Self::V8
            | Self::N8
            | Self::B8
            | Self::N2
            | Self::N3
            | Self::R2U6
            | Self::U4U4 => 8,
            Self::U16 | Self::V16 | Self::B16 | Self::F16 | Self::U8R7B1 => 16,
            Self::TimeOfDay | Self::Date => 24,
            Self::U32 | Self::V32 | Self::B32 | Self::F32 => 32,
            Self::V64 => 64,
            Self::A112Ascii | Self::A112Latin1 => STRING_LENGTH * 8,
        }
    }

    /// Encoded width in bytes.
    pub const fn length_in_bytes(self) -> usize {
        self.length_in_bits() / 8
    }

    /// Whether values of this format travel in `dataFirstByte` of a group value telegram.
    pub const fn fits_first_byte(self) -> bool {
        matches!(self, Self::B1 | Self::B2 | Self::B1U3 | Self::N2 | Self::N3 | Self::R2U6)
    }
}

impl DatapointType {
    /// The value format of this datapoint type.
    ///
    /// Fails with an unsupported type error when [`KnxValue`] cannot encode it.
    pub fn value_format(self) -> Result<ValueFormat> {
        ValueFormat::from_name(self.format_name()).ok_or_else(KnxError::unsupported_dpt)
    }
}

/// A decoded datapoint value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnxValue {
    /// `B1`
    Bool(bool),
    /// `B2`
    Control { control: bool, value: bool },
    /// `B1U3`: dimming or blind step; a step code of 0 means stop
    Step { control: bool, step_code: u8 },
    /// `A8_ASCII`, `A8_8859_1`
    Char(char),
    /// `U8`, `N8`, `N2`, `N3`, `r2U6`
    Unsigned8(u8),
    /// `V8`
    Signed8(i8),
    /// `B8`
    Bitmap8(u8),
    /// `U16`
    Unsigned16(u16),
    /// `V16`
    Signed16(i16),
    /// `B16`
    Bitmap16(u16),
    /// `U32`
    Unsigned32(u32),
    /// `V32`
    Signed32(i32),
    /// `B32`
    Bitmap32(u32),
    /// `V64`
    Signed64(i64),
    /// `F16`, `F32`
    Float(f32),
    /// `U8r7B1`
    ChannelActivation { set_value: u8, channel_activation_active: bool },
    /// `U4U4`
    Nibbles { busy: u8, nak: u8 },
    /// `N3N5r2N6r2N6`; day 0 means no day, 1 is Monday
    TimeOfDay { day: u8, hour: u8, minutes: u8, seconds: u8 },
    /// `r3N5r4N4r1U7`; two digit years map to 1990-2089
    Date { year: u16, month: u8, day: u8 },
    /// `A112_ASCII`, `A112_8859_1`; trailing NULs are not part of the value
    String(KnxString),
}

impl KnxValue {
    /// Decode a value of the given format.
    pub fn parse(rb: &mut ReadBuffer<'_>, format: ValueFormat) -> Result<Self> {
        knx_log!(trace, "parsing datapoint value as {}", format.name());
        let value = match format {
            ValueFormat::B1 => {
                read_reserved(rb, 7, 0)?;
                Self::Bool(rb.read_bit().field("value")?)
            }
            ValueFormat::B2 => {
                read_reserved(rb, 6, 0)?;
                let control = rb.read_bit().field("control")?;
                let value = rb.read_bit().field("value")?;
                Self::Control { control, value }
            }
            ValueFormat::B1U3 => {
                read_reserved(rb, 4, 0)?;
                let control = rb.read_bit().field("control")?;
                let step_code = rb.read_u8(3).field("stepCode")?;
                Self::Step { control, step_code }
            }
            ValueFormat::A8Ascii => Self::Char(ascii(rb.read_u8(8).field("value")?)?),
            ValueFormat::A8Latin1 => Self::Char(char::from(rb.read_u8(8).field("value")?)),
            ValueFormat::U8 | ValueFormat::N8 => Self::Unsigned8(rb.read_u8(8).field("value")?),
            ValueFormat::V8 => Self::Signed8(rb.read_i8(8).field("value")?),
            ValueFormat::B8 => Self::Bitmap8(rb.read_u8(8).field("value")?),
            ValueFormat::U16 => Self::Unsigned16(rb.read_u16(16).field("value")?),
            ValueFormat::V16 => Self::Signed16(rb.read_i16(16).field("value")?),
            ValueFormat::B16 => Self::Bitmap16(rb.read_u16(16).field("value")?),
            ValueFormat::F16 => Self::Float(decode_f16(rb.read_u16(16).field("value")?)),
            ValueFormat::U32 => Self::Unsigned32(rb.read_u32(32).field("value")?),
            ValueFormat::V32 => Self::Signed32(rb.read_i32(32).field("value")?),
            ValueFormat::B32 => Self::Bitmap32(rb.read_u32(32).field("value")?),
            ValueFormat::F32 => Self::Float(rb.read_f32().field("value")?),
            ValueFormat::V64 => Self::Signed64(rb.read_i64(64).field("value")?),
            ValueFormat::N2 => {
                read_reserved(rb, 6, 0)?;
                Self::Unsigned8(rb.read_u8(2).field("value")?)
            }
            ValueFormat::N3 => {
                read_reserved(rb, 5, 0)?;
                Self::Unsigned8(rb.read_u8(3).field("value")?)
            }
            ValueFormat::R2U6 => {
                read_reserved(rb, 2, 0)?;
                Self::Unsigned8(rb.read_u8(6).field("value")?)
            }
            ValueFormat::U8R7B1 => {
                let set_value = rb.read_u8(8).field("setValue")?;
                read_reserved(rb, 7, 0)?;
                let channel_activation_active = rb.read_bit().field("channelActivationActive")?;
                Self::ChannelActivation {
                    set_value,
                    channel_activation_active,
                }
            }
            ValueFormat::U4U4 => {
                let busy = rb.read_u8(4).field("busy")?;
                let nak = rb.read_u8(4).field("nak")?;
                Self::Nibbles { busy, nak }
            }
            ValueFormat::TimeOfDay => {
                let day = rb.read_u8(3).field("day")?;
                let hour = rb.read_u8(5).field("hour")?;
                read_reserved(rb, 2, 0)?;
                let minutes = rb.read_u8(6).field("minutes")?;
                read_reserved(rb, 2, 0)?;
                let seconds = rb.read_u8(6).field("seconds")?;
                Self::TimeOfDay {
                    day,
                    hour,
                    minutes,
                    seconds,
                }
            }
            ValueFormat::Date => {
                read_reserved(rb, 3, 0)?;
                let day = rb.read_u8(5).field("day")?;
                read_reserved(rb, 4, 0)?;
                let month = rb.read_u8(4).field("month")?;
                read_reserved(rb, 1, 0)?;
                let year = expand_year(rb.read_u8(7).field("year")?)?;
                Self::Date { year, month, day }
            }
            ValueFormat::A112Ascii | ValueFormat::A112Latin1 => {
                let raw = rb.read_array::<STRING_LENGTH>().field("value")?;
                let text = raw.split(|byte| *byte == 0).next().unwrap_or(&[]);
                let mut value = KnxString::new();
                for &byte in text {
                    let c = if format == ValueFormat::A112Ascii {
                        ascii(byte)?
                    } else {
                        char::from(byte)
                    };
                    value.push(c).map_err(|_full| KnxError::capacity_exceeded())?;
                }
                Self::String(value)
            }
        };
        Ok(value)
    }

    /// Decode a value using the format named in the datapoint type table.
    pub fn parse_named(rb: &mut ReadBuffer<'_>, format_name: &str) -> Result<Self> {
        let format = ValueFormat::from_name(format_name).ok_or_else(KnxError::unsupported_dpt)?;
        Self::parse(rb, format)
    }

    /// Encode the value in the given format.
    ///
    /// Fails with invalid data when the value variant does not belong to
    /// `format`, and with out of range when a field exceeds its width.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>, format: ValueFormat) -> Result<()> {
        match (format, self) {
            (ValueFormat::B1, Self::Bool(value)) => {
                write_reserved(wb, 7, 0)?;
                wb.write_bit(*value).field("value")
            }
            (ValueFormat::B2, Self::Control { control, value }) => {
                write_reserved(wb, 6, 0)?;
                wb.write_bit(*control).field("control")?;
                wb.write_bit(*value).field("value")
            }
            (ValueFormat::B1U3, Self::Step { control, step_code }) => {
                write_reserved(wb, 4, 0)?;
                wb.write_bit(*control).field("control")?;
                wb.write_u8(3, *step_code).field("stepCode")
            }
            (ValueFormat::A8Ascii, Self::Char(c)) => wb.write_u8(8, to_ascii(*c)?).field("value"),
            (ValueFormat::A8Latin1, Self::Char(c)) => wb.write_u8(8, to_latin1(*c)?).field("value"),
            (ValueFormat::U8 | ValueFormat::N8, Self::Unsigned8(value)) => wb.write_u8(8, *value).field("value"),
            (ValueFormat::V8, Self::Signed8(value)) => wb.write_i8(8, *value).field("value"),
            (ValueFormat::B8, Self::Bitmap8(value)) => wb.write_u8(8, *value).field("value"),
            (ValueFormat::U16, Self::Unsigned16(value)) => wb.write_u16(16, *value).field("value"),
            (ValueFormat::V16, Self::Signed16(value)) => wb.write_i16(16, *value).field("value"),
            (ValueFormat::B16, Self::Bitmap16(value)) => wb.write_u16(16, *value).field("value"),
            (ValueFormat::F16, Self::Float(value)) => wb.write_u16(16, encode_f16(*value)?).field("value"),
            (ValueFormat::U32, Self::Unsigned32(value)) => wb.write_u32(32, *value).field("value"),
            (ValueFormat::V32, Self::Signed32(value)) => wb.write_i32(32, *value).field("value"),
            (ValueFormat::B32, Self::Bitmap32(value)) => wb.write_u32(32, *value).field("value"),
            (ValueFormat::F32, Self::Float(value)) => wb.write_f32(*value).field("value"),
            (ValueFormat::V64, Self::Signed64(value)) => wb.write_i64(64, *value).field("value"),
            (ValueFormat::N2, Self::Unsigned8(value)) => {
                write_reserved(wb, 6, 0)?;
                wb.write_u8(2, *value).field("value")
            }
            (ValueFormat::N3, Self::Unsigned8(value)) => {
                write_reserved(wb, 5, 0)?;
                wb.write_u8(3, *value).field("value")
            }
            (ValueFormat::R2U6, Self::Unsigned8(value)) => {
                write_reserved(wb, 2, 0)?;
                wb.write_u8(6, *value).field("value")
            }
            (
                ValueFormat::U8R7B1,
                Self::ChannelActivation {
                    set_value,
                    channel_activation_active,
                },
            ) => {
                wb.write_u8(8, *set_value).field("setValue")?;
                write_reserved(wb, 7, 0)?;
                wb.write_bit(*channel_activation_active).field("channelActivationActive")
            }
            (ValueFormat::U4U4, Self::Nibbles { busy, nak }) => {
                wb.write_u8(4, *busy).field("busy")?;
                wb.write_u8(4, *nak).field("nak")
            }
            (
                ValueFormat::TimeOfDay,
                Self::TimeOfDay {
                    day,
                    hour,
                    minutes,
                    seconds,
                },
            ) => {
                wb.write_u8(3, *day).field("day")?;
                wb.write_u8(5, *hour).field("hour")?;
                write_reserved(wb, 2, 0)?;
                wb.write_u8(6, *minutes).field("minutes")?;
                write_reserved(wb, 2, 0)?;
                wb.write_u8(6, *seconds).field("seconds")
            }
            (ValueFormat::Date, Self::Date { year, month, day }) => {
                write_reserved(wb, 3, 0)?;
                wb.write_u8(5, *day).field("day")?;
                write_reserved(wb, 4, 0)?;
                wb.write_u8(4, *month).field("month")?;
                write_reserved(wb, 1, 0)?;
                wb.write_u8(7, compress_year(*year)?).field("year")
            }
            (ValueFormat::A112Ascii | ValueFormat::A112Latin1, Self::String(value)) => {
                let mut raw = [0u8; STRING_LENGTH];
                let mut len = 0;
                for c in value.chars() {
                    let byte = if format == ValueFormat::A112Ascii {
                        to_ascii(c)?
                    } else {
                        to_latin1(c)?
                    };
                    *raw.get_mut(len).ok_or_else(KnxError::dpt_value_out_of_range)? = byte;
                    len += 1;
                }
                wb.write_bytes(&raw).field("value")
            }
            _ => Err(KnxError::invalid_dpt_data()),
        }
    }

    /// Decode the payload of a group value write or response.
    ///
    /// `data` must hold exactly the bytes of `format`, or nothing when the
    /// format fits `data_first_byte`.
    pub fn from_group_value(format: ValueFormat, data_first_byte: u8, data: &[u8]) -> Result<Self> {
        if format.fits_first_byte() {
            if !data.is_empty() {
                return Err(KnxError::invalid_dpt_data());
            }
            return Self::parse(&mut ReadBuffer::new(&[data_first_byte]), format);
        }
        if data.len() != format.length_in_bytes() {
            return Err(KnxError::invalid_dpt_data());
        }
        Self::parse(&mut ReadBuffer::new(data), format)
    }

    /// Encode the value as `(dataFirstByte, data)` of a group value write or response.
    pub fn to_group_value(&self, format: ValueFormat) -> Result<(u8, ApduBytes)> {
        let mut buf = [0u8; STRING_LENGTH];
        let mut wb = WriteBuffer::new(&mut buf);
        self.serialize(&mut wb, format)?;
        if format.fits_first_byte() {
            return Ok((buf[0], ApduBytes::new()));
        }
        let data = ApduBytes::from_slice(wb.written()).map_err(|_full| KnxError::capacity_exceeded())?;
        Ok((0, data))
    }

    /// Decode the value carried by a group value write or response APDU.
    pub fn from_apdu(apdu: &Apdu, format: ValueFormat) -> Result<Self> {
        match &apdu.payload {
            ApduPayload::Data(
                ApduData::GroupValueWrite { data_first_byte, data }
                | ApduData::GroupValueResponse { data_first_byte, data },
            ) => Self::from_group_value(format, *data_first_byte, data),
            _ => Err(KnxError::invalid_dpt_data()),
        }
    }

    /// Build a group value write APDU carrying this value.
    pub fn to_group_write(&self, format: ValueFormat) -> Result<Apdu> {
        let (first, data) = self.to_group_value(format)?;
        Apdu::group_value_write(first, &data)
    }
}

fn ascii(byte: u8) -> Result<char> {
    if byte.is_ascii() {
        Ok(char::from(byte))
    } else {
        Err(KnxError::invalid_dpt_data())
    }
}

fn to_ascii(c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(KnxError::dpt_value_out_of_range())
    }
}

fn to_latin1(c: char) -> Result<u8> {
    u8::try_from(c).map_err(|_not_latin1| KnxError::dpt_value_out_of_range())
}

fn expand_year(year: u8) -> Result<u16> {
    match year {
        0..=89 => Ok(2000 + u16::from(year)),
        90..=99 => Ok(1900 + u16::from(year)),
        _ => Err(KnxError::invalid_dpt_data()),
    }
}

fn compress_year(year: u16) -> Result<u8> {
    match year {
        1990..=2089 => Ok((year % 100) as u8),
        _ => Err(KnxError::dpt_value_out_of_range()),
    }
}

// F16: MEEE EMMM MMMM MMMM, value = 0.01 * M * 2^E with M a 12-bit two's
// complement whose sign is the top bit.

const F16_MANTISSA_MIN: i32 = -2048;
const F16_MANTISSA_MAX: i32 = 2047;

fn decode_f16(raw: u16) -> f32 {
    let exponent = (raw >> 11) & 0x0F;
    let mut mantissa = i32::from(raw & 0x07FF);
    if raw & 0x8000 != 0 {
        mantissa -= 2048;
    }
    0.01 * mantissa as f32 * f32::from(1u16 << exponent)
}

fn encode_f16(value: f32) -> Result<u16> {
    let scaled = value * 100.0;
    for exponent in 0..16u16 {
        let mantissa = round(scaled / f32::from(1u16 << exponent));
        if (F16_MANTISSA_MIN..=F16_MANTISSA_MAX).contains(&mantissa) {
            let sign = if mantissa < 0 { 0x8000 } else { 0 };
            let bits = (mantissa as u16) & 0x07FF;
            return Ok(sign | (exponent << 11) | bits);
        }
    }
    Err(KnxError::dpt_value_out_of_range())
}

// No `f32::round` without std. NaN maps outside every mantissa range.
fn round(value: f32) -> i32 {
    if value.is_nan() {
        return i32::MAX;
    }
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}
