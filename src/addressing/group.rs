//! KNX Group Address implementation.
//!
//! Group addresses represent logical groupings of devices for functional control.
//! The 16 bits on the wire are always the same; how they are split is a
//! property of the installation, so the level count is supplied by the caller
//! (or by [`CodecOptions`](crate::codec::CodecOptions)):
//!
//! ```text
//! 3-level: MMMMM III SSSSSSSS   main 0-31 / middle 0-7 / sub 0-255
//! 2-level: MMMMM SSSSSSSSSSS    main 0-31 / sub 0-2047
//! free:    SSSSSSSSSSSSSSSS     sub 0-65535
//! ```

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::Codec;
use crate::error::{FieldContext, KnxError, Result};
use core::fmt;

/// Number of levels a group address is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NumLevels {
    /// Free addressing, one 16-bit number
    One = 1,
    /// Main/Sub
    Two = 2,
    /// Main/Middle/Sub (most common)
    Three = 3,
}

impl NumLevels {
    /// Convert a level count to `NumLevels`
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    /// Convert `NumLevels` to its level count
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// KNX Group Address
///
/// Used for logical grouping of devices and functions.
///
/// Two addresses with different level counts compare unequal even when
/// they share the same [`raw`](Self::raw) value.
///
/// # Examples
///
/// ```
/// use knxnetip_codec::GroupAddress;
/// use knxnetip_codec::addressing::NumLevels;
///
/// // Create 3-level address
/// let addr = GroupAddress::new(1, 2, 3).unwrap();
/// assert_eq!(addr.to_string(), "1/2/3");
/// assert_eq!(addr.raw(), 0x0A03);
///
/// // Same bits seen as a 2-level address
/// let two = addr.with_levels(NumLevels::Two);
/// assert_eq!(two.to_string(), "1/515");
///
/// // Parse from string (auto-detects format)
/// let addr: GroupAddress = "1/234".parse().unwrap();
/// assert_eq!(addr.levels(), NumLevels::Two);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupAddress {
    /// Free-level address
    FreeLevel {
        /// Whole 16-bit address
        sub_group: u16,
    },
    /// 2-level address (Main/Sub)
    TwoLevel {
        /// Main group (0-31)
        main_group: u8,
        /// Sub group (0-2047)
        sub_group: u16,
    },
    /// 3-level address (Main/Middle/Sub)
    ThreeLevel {
        /// Main group (0-31)
        main_group: u8,
        /// Middle group (0-7)
        middle_group: u8,
        /// Sub group (0-255)
        sub_group: u8,
    },
}

impl GroupAddress {
    /// Maximum main group value (5 bits)
    pub const MAX_MAIN: u8 = 31;
    /// Maximum middle group value (3 bits)
    pub const MAX_MIDDLE: u8 = 7;
    /// Maximum sub value for 2-level format (11 bits)
    pub const MAX_SUB_2LEVEL: u16 = 2047;

    /// Create a new 3-level Group Address (Main/Middle/Sub).
    ///
    /// # Errors
    ///
    /// Returns an addressing error if any component is out of range.
    pub fn new(main: u8, middle: u8, sub: u8) -> Result<Self> {
        if main > Self::MAX_MAIN || middle > Self::MAX_MIDDLE {
            return Err(KnxError::address_out_of_range());
        }
        Ok(Self::ThreeLevel { main_group: main, middle_group: middle, sub_group: sub })
    }

    /// Create a new 2-level Group Address (Main/Sub).
    ///
    /// # Errors
    ///
    /// Returns an addressing error if any component is out of range.
    pub fn new_2level(main: u8, sub: u16) -> Result<Self> {
        if main > Self::MAX_MAIN || sub > Self::MAX_SUB_2LEVEL {
            return Err(KnxError::address_out_of_range());
        }
        Ok(Self::TwoLevel { main_group: main, sub_group: sub })
    }

    /// Create a free-level Group Address.
    pub const fn new_free(sub: u16) -> Self {
        Self::FreeLevel { sub_group: sub }
    }

    /// Split a raw 16-bit address into `levels`.
    pub const fn from_raw(raw: u16, levels: NumLevels) -> Self {
        match levels {
            NumLevels::One => Self::FreeLevel { sub_group: raw },
            NumLevels::Two => Self::TwoLevel {
                main_group: ((raw >> 11) & 0x1F) as u8,
                sub_group: raw & 0x07FF,
            },
            NumLevels::Three => Self::ThreeLevel {
                main_group: ((raw >> 11) & 0x1F) as u8,
                middle_group: ((raw >> 8) & 0x07) as u8,
                sub_group: (raw & 0xFF) as u8,
            },
        }
    }

    /// Get the raw u16 representation of the address.
    pub const fn raw(self) -> u16 {
        match self {
            Self::FreeLevel { sub_group } => sub_group,
            Self::TwoLevel { main_group, sub_group } => {
                (((main_group & 0x1F) as u16) << 11) | (sub_group & 0x07FF)
            }
            Self::ThreeLevel { main_group, middle_group, sub_group } => {
                (((main_group & 0x1F) as u16) << 11)
                    | (((middle_group & 0x07) as u16) << 8)
                    | sub_group as u16
            }
        }
    }

    /// Level count of this address.
    pub const fn levels(self) -> NumLevels {
        match self {
            Self::FreeLevel { .. } => NumLevels::One,
            Self::TwoLevel { .. } => NumLevels::Two,
            Self::ThreeLevel { .. } => NumLevels::Three,
        }
    }

    /// The same address bits split into `levels`.
    #[must_use]
    pub const fn with_levels(self, levels: NumLevels) -> Self {
        Self::from_raw(self.raw(), levels)
    }

    /// Read a group address split into `levels`.
    pub fn parse_with_levels(rb: &mut ReadBuffer<'_>, levels: NumLevels) -> Result<Self> {
        knx_log!(trace, "group address with {} levels", levels.to_u8());
        match levels {
            NumLevels::One => Ok(Self::FreeLevel {
                sub_group: rb.read_u16(16).field("subGroup")?,
            }),
            NumLevels::Two => Ok(Self::TwoLevel {
                main_group: rb.read_u8(5).field("mainGroup")?,
                sub_group: rb.read_u16(11).field("subGroup")?,
            }),
            NumLevels::Three => Ok(Self::ThreeLevel {
                main_group: rb.read_u8(5).field("mainGroup")?,
                middle_group: rb.read_u8(3).field("middleGroup")?,
                sub_group: rb.read_u8(8).field("subGroup")?,
            }),
        }
    }

    /// Format into a fixed-capacity string.
    pub fn to_heapless_string(&self) -> heapless::String<16> {
        use core::fmt::Write;
        let mut s = heapless::String::new();
        // "31/7/255" and "65535" both fit comfortably
        let _ = write!(s, "{self}");
        s
    }
}

impl Codec for GroupAddress {
    /// Uses the level count from the buffer's options.
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let levels = rb.options().group_address_levels;
        Self::parse_with_levels(rb, levels)
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        match *self {
            Self::FreeLevel { sub_group } => wb.write_u16(16, sub_group).field("subGroup"),
            Self::TwoLevel { main_group, sub_group } => {
                wb.write_u8(5, main_group).field("mainGroup")?;
                wb.write_u16(11, sub_group).field("subGroup")
            }
            Self::ThreeLevel { main_group, middle_group, sub_group } => {
                wb.write_u8(5, main_group).field("mainGroup")?;
                wb.write_u8(3, middle_group).field("middleGroup")?;
                wb.write_u8(8, sub_group).field("subGroup")
            }
        }
    }

    fn length_in_bits(&self) -> usize {
        16
    }
}

impl From<GroupAddress> for u16 {
    #[inline(always)]
    fn from(addr: GroupAddress) -> u16 {
        addr.raw()
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FreeLevel { sub_group } => write!(f, "{sub_group}"),
            Self::TwoLevel { main_group, sub_group } => write!(f, "{main_group}/{sub_group}"),
            Self::ThreeLevel { main_group, middle_group, sub_group } => {
                write!(f, "{main_group}/{middle_group}/{sub_group}")
            }
        }
    }
}

impl core::str::FromStr for GroupAddress {
    type Err = KnxError;

    /// Accepts `sub`, `main/sub` and `main/middle/sub`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts: heapless::Vec<u16, 3> = heapless::Vec::new();
        for part in s.split('/') {
            let value = part.parse::<u16>().map_err(|_bad| KnxError::invalid_group_address())?;
            parts.push(value).map_err(|_extra| KnxError::invalid_group_address())?;
        }

        let narrow = |v: u16| u8::try_from(v).map_err(|_wide| KnxError::address_out_of_range());
        match parts.as_slice() {
            [sub] => Ok(Self::new_free(*sub)),
            [main, sub] => Self::new_2level(narrow(*main)?, *sub),
            [main, middle, sub] => Self::new(narrow(*main)?, narrow(*middle)?, narrow(*sub)?),
            _ => Err(KnxError::invalid_group_address()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecOptions;

    #[test]
    fn test_new_3level_valid() {
        let addr = GroupAddress::new(1, 2, 3).unwrap();
        assert_eq!(addr.raw(), 0x0A03);
        assert_eq!(addr.levels(), NumLevels::Three);
    }

    #[test]
    fn test_new_invalid() {
        assert!(GroupAddress::new(32, 0, 0).is_err());
        assert!(GroupAddress::new(0, 8, 0).is_err());
        assert!(GroupAddress::new_2level(0, 2048).is_err());
    }

    #[test]
    fn test_from_raw_levels() {
        assert_eq!(
            GroupAddress::from_raw(0x0A03, NumLevels::Three),
            GroupAddress::ThreeLevel { main_group: 1, middle_group: 2, sub_group: 3 }
        );
        assert_eq!(
            GroupAddress::from_raw(0x0A03, NumLevels::Two),
            GroupAddress::TwoLevel { main_group: 1, sub_group: 515 }
        );
        assert_eq!(GroupAddress::from_raw(0x0A03, NumLevels::One), GroupAddress::new_free(2563));
    }

    #[test]
    fn test_raw_survives_level_change() {
        let addr = GroupAddress::new(31, 7, 255).unwrap();
        for levels in [NumLevels::One, NumLevels::Two, NumLevels::Three] {
            assert_eq!(addr.with_levels(levels).raw(), 0xFFFF);
        }
    }

    #[test]
    fn test_parse_with_levels() {
        let mut rb = ReadBuffer::new(&[0x0A, 0x03]);
        let addr = GroupAddress::parse_with_levels(&mut rb, NumLevels::Two).unwrap();
        assert_eq!(addr.to_string(), "1/515");
    }

    #[test]
    fn test_parse_uses_options() {
        let options = CodecOptions::default().with_group_address_levels(NumLevels::One);
        let mut rb = ReadBuffer::with_options(&[0x0A, 0x03], options);
        let addr = GroupAddress::parse(&mut rb).unwrap();
        assert_eq!(addr.to_string(), "2563");

        let addr = GroupAddress::from_bytes(&[0x0A, 0x03]).unwrap();
        assert_eq!(addr.to_string(), "1/2/3");
    }

    #[test]
    fn test_serialize_each_level() {
        let mut buf = [0u8; 2];
        for addr in [
            GroupAddress::new_free(0x0A03),
            GroupAddress::new_2level(1, 515).unwrap(),
            GroupAddress::new(1, 2, 3).unwrap(),
        ] {
            addr.to_bytes(&mut buf).unwrap();
            assert_eq!(buf, [0x0A, 0x03]);
        }
    }

    #[test]
    fn test_serialize_rejects_out_of_range_parts() {
        let addr = GroupAddress::ThreeLevel { main_group: 1, middle_group: 9, sub_group: 0 };
        let err = addr.to_bytes(&mut [0u8; 2]).unwrap_err();
        assert_eq!(err.as_codec().unwrap().field(), Some("middleGroup"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1/2/3".parse::<GroupAddress>().unwrap(), GroupAddress::new(1, 2, 3).unwrap());
        assert_eq!("1/234".parse::<GroupAddress>().unwrap(), GroupAddress::new_2level(1, 234).unwrap());
        assert_eq!("4660".parse::<GroupAddress>().unwrap(), GroupAddress::new_free(4660));
    }

    #[test]
    fn test_from_str_invalid() {
        // Out of range (main)
        assert!("32/0/0".parse::<GroupAddress>().is_err());
        // Too many parts
        assert!("1/2/3/4".parse::<GroupAddress>().is_err());
        // Non-numeric
        assert!("a/b/c".parse::<GroupAddress>().is_err());
        // Empty
        assert!("".parse::<GroupAddress>().is_err());
        // Out of range (2-level sub)
        assert!("1/2048".parse::<GroupAddress>().is_err());
        // Out of range (3-level sub)
        assert!("1/2/256".parse::<GroupAddress>().is_err());
    }

    #[test]
    fn test_heapless_string() {
        let addr = GroupAddress::new(31, 7, 255).unwrap();
        assert_eq!(addr.to_heapless_string().as_str(), "31/7/255");
    }
}
