//! KNX Individual Address implementation.
//!
//! Individual addresses identify physical devices on the KNX bus.
//! Format: Area.Line.Device (e.g., 1.1.5)
//! - Area: 0-15 (4 bits)
//! - Line: 0-15 (4 bits)
//! - Device: 0-255 (8 bits)

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::Codec;
use crate::error::{FieldContext, KnxError, Result};
use core::fmt;

/// KNX Individual Address (Area.Line.Device)
///
/// Used to identify physical devices on the KNX bus and as the source of
/// every `L_Data` frame.
///
/// # Examples
///
/// ```
/// use knxnetip_codec::IndividualAddress;
///
/// // Create from components
/// let addr = IndividualAddress::new(1, 1, 5).unwrap();
/// assert_eq!(addr.to_string(), "1.1.5");
///
/// // Create from raw u16
/// let addr = IndividualAddress::from(0x1105u16);
/// assert_eq!(addr.area(), 1);
/// assert_eq!(addr.line(), 1);
/// assert_eq!(addr.device(), 5);
///
/// // Parse from string
/// let addr: IndividualAddress = "1.1.5".parse().unwrap();
/// assert_eq!(u16::from(addr), 0x1105);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndividualAddress {
    raw: u16,
}

impl IndividualAddress {
    /// Maximum area value (4 bits)
    pub const MAX_AREA: u8 = 15;
    /// Maximum line value (4 bits)
    pub const MAX_LINE: u8 = 15;
    /// Maximum device value (8 bits)
    pub const MAX_DEVICE: u8 = 255;

    /// Create a new Individual Address from components.
    ///
    /// # Arguments
    ///
    /// * `area` - Area (0-15)
    /// * `line` - Line (0-15)
    /// * `device` - Device (0-255)
    ///
    /// # Errors
    ///
    /// Returns an addressing error if any component is out of range.
    pub fn new(area: u8, line: u8, device: u8) -> Result<Self> {
        if area > Self::MAX_AREA || line > Self::MAX_LINE {
            return Err(KnxError::address_out_of_range());
        }
        Ok(Self::from_parts(area, line, device))
    }

    const fn from_parts(area: u8, line: u8, device: u8) -> Self {
        Self {
            raw: ((area as u16) << 12) | ((line as u16) << 8) | device as u16,
        }
    }

    /// Get the raw u16 representation of the address.
    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Get the area component (0-15).
    #[inline(always)]
    pub const fn area(self) -> u8 {
        ((self.raw >> 12) & 0x0F) as u8
    }

    /// Get the line component (0-15).
    #[inline(always)]
    pub const fn line(self) -> u8 {
        ((self.raw >> 8) & 0x0F) as u8
    }

    /// Get the device component (0-255).
    #[inline(always)]
    pub const fn device(self) -> u8 {
        (self.raw & 0xFF) as u8
    }
}

impl Codec for IndividualAddress {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let area = rb.read_u8(4).field("area")?;
        let line = rb.read_u8(4).field("line")?;
        let device = rb.read_u8(8).field("device")?;
        Ok(Self::from_parts(area, line, device))
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(4, self.area()).field("area")?;
        wb.write_u8(4, self.line()).field("line")?;
        wb.write_u8(8, self.device()).field("device")
    }

    fn length_in_bits(&self) -> usize {
        16
    }
}

impl fmt::Display for IndividualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.area(), self.line(), self.device())
    }
}

impl From<u16> for IndividualAddress {
    #[inline(always)]
    fn from(raw: u16) -> Self {
        Self { raw }
    }
}

impl From<IndividualAddress> for u16 {
    #[inline(always)]
    fn from(addr: IndividualAddress) -> u16 {
        addr.raw
    }
}

impl core::str::FromStr for IndividualAddress {
    type Err = KnxError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('.').map(|part| part.parse::<u8>().ok());
        let mut next = || parts.next().flatten().ok_or_else(KnxError::invalid_individual_address);

        let area = next()?;
        let line = next()?;
        let device = next()?;

        // Ensure no extra parts
        if parts.next().is_some() {
            return Err(KnxError::invalid_individual_address());
        }

        Self::new(area, line, device)
    }
}
