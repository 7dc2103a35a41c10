//! Convenience macros for working with KNX addresses and types.
//!
//! This module provides declarative macros that simplify common KNX operations
//! and generate the repetitive parts of the protocol model.

/// Creates a [`GroupAddress`](crate::addressing::GroupAddress) from 3-level
/// or 2-level notation.
///
/// # Syntax
///
/// ```text
/// ga!(main/middle/sub)
/// ga!(main/sub)
/// ```
///
/// Where:
/// - `main`: Main group (0-31)
/// - `middle`: Middle group (0-7)
/// - `sub`: Sub group (0-255 with three levels, 0-2047 with two)
///
/// # Examples
///
/// ```
/// use knxnetip_codec::ga;
///
/// let light_switch = ga!(1/2/3);
/// assert_eq!(light_switch.raw(), 0x0A03);
///
/// let two_level = ga!(1/515);
/// assert_eq!(two_level.raw(), 0x0A03);
/// ```
///
/// # Compile-Time Validation
///
/// The macro validates address components at compile time:
///
/// ```compile_fail
/// // This will fail to compile: main group > 31
/// let addr = knxnetip_codec::ga!(32/0/0);
/// ```
///
/// ```compile_fail
/// // This will fail to compile: middle group > 7
/// let addr = knxnetip_codec::ga!(1/8/0);
/// ```
#[macro_export]
macro_rules! ga {
    ($main:literal / $middle:literal / $sub:literal) => {{
        // Compile-time validation
        const _: () = {
            if $main > 31 {
                panic!("Main group must be 0-31");
            }
            if $middle > 7 {
                panic!("Middle group must be 0-7");
            }
            if $sub > 255 {
                panic!("Sub group must be 0-255");
            }
        };

        $crate::addressing::GroupAddress::ThreeLevel {
            main_group: $main,
            middle_group: $middle,
            sub_group: $sub,
        }
    }};
    ($main:literal / $sub:literal) => {{
        const _: () = {
            if $main > 31 {
                panic!("Main group must be 0-31");
            }
            if $sub > 2047 {
                panic!("Sub group must be 0-2047");
            }
        };

        $crate::addressing::GroupAddress::TwoLevel {
            main_group: $main,
            sub_group: $sub,
        }
    }};
}

/// Declares a closed protocol enumeration with a fixed bit width.
///
/// Generates `from_raw`/`to_raw` and a [`Codec`](crate::codec::Codec)
/// implementation. A value without a matching variant is reported as an
/// unknown discriminator.
///
/// ```text
/// knx_enum! {
///     /// Doc
///     pub enum Name: u8, 8, read_u8, write_u8 {
///         /// Doc
///         Variant = 0x01,
///     }
/// }
/// ```
macro_rules! knx_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty, $bits:literal, $read:ident, $write:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Encoded width in bits.
            pub const BITS: u8 = $bits;

            /// Look up the variant for a raw value.
            pub const fn from_raw(value: $repr) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Raw value of the variant.
            pub const fn to_raw(self) -> $repr {
                match self {
                    $( Self::$variant => $value, )+
                }
            }
        }

        impl $crate::codec::Codec for $name {
            fn parse(rb: &mut $crate::buffer::ReadBuffer<'_>) -> $crate::error::Result<Self> {
                let raw = rb.$read($bits)?;
                Self::from_raw(raw).ok_or_else(|| $crate::error::KnxError::unknown_discriminator(u32::from(raw)))
            }

            fn serialize(&self, wb: &mut $crate::buffer::WriteBuffer<'_>) -> $crate::error::Result<()> {
                wb.$write($bits, self.to_raw())
            }

            fn length_in_bits(&self) -> usize {
                $bits
            }
        }
    };
}

/// Declares the datapoint type table.
///
/// Each entry maps a variant to its symbolic name, value format, main and
/// sub number. The generated enum carries const accessors for each column and
/// an `ALL` slice in declaration order.
macro_rules! datapoint_types {
    (
        $( $variant:ident => ($name:literal, $format:literal, $main:literal, $sub:literal) ),+ $(,)?
    ) => {
        /// A KNX datapoint type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum DatapointType {
            $( #[doc = $name] $variant, )+
        }

        impl DatapointType {
            /// Every datapoint type in table order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            /// Symbolic name, e.g. `DPT_Value_Temp`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                }
            }

            /// Value format, e.g. `F16`.
            pub const fn format_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $format, )+
                }
            }

            /// Main number, e.g. `9` for `9.001`.
            pub const fn main_number(self) -> u16 {
                match self {
                    $( Self::$variant => $main, )+
                }
            }

            /// Sub number, e.g. `1` for `9.001`.
            pub const fn sub_number(self) -> u16 {
                match self {
                    $( Self::$variant => $sub, )+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::addressing::GroupAddress;
    use crate::buffer::ReadBuffer;
    use crate::codec::Codec;

    knx_enum! {
        /// Test enumeration
        enum Flavour: u8, 3, read_u8, write_u8 {
            Sweet = 1,
            Sour = 5,
        }
    }

    #[test]
    fn test_ga_macro_basic() {
        let addr = ga!(1 / 2 / 3);
        assert_eq!(addr, GroupAddress::new(1, 2, 3).unwrap());
        assert_eq!(addr.raw(), 0x0A03);
    }

    #[test]
    fn test_ga_macro_various_addresses() {
        // Test common address patterns
        assert_eq!(ga!(0 / 0 / 1).raw(), 0x0001);
        assert_eq!(ga!(1 / 0 / 0).raw(), 0x0800);
        assert_eq!(ga!(5 / 3 / 100).raw(), 0x2B64);
        assert_eq!(ga!(31 / 7 / 255).raw(), 0xFFFF);
    }

    #[test]
    fn test_ga_macro_two_level() {
        assert_eq!(ga!(1 / 234), GroupAddress::new_2level(1, 234).unwrap());
    }

    #[test]
    fn test_knx_enum_roundtrip() {
        assert_eq!(Flavour::from_raw(5), Some(Flavour::Sour));
        assert_eq!(Flavour::from_raw(2), None);
        assert_eq!(Flavour::Sweet.to_raw(), 1);
        assert_eq!(Flavour::BITS, 3);

        // 101 then 010
        let mut rb = ReadBuffer::new(&[0b1010_1000]);
        assert_eq!(Flavour::parse(&mut rb).unwrap(), Flavour::Sour);
        let err = Flavour::parse(&mut rb).unwrap_err();
        assert_eq!(err.as_codec().unwrap().discriminator(), Some(2));

        let mut buf = [0u8; 1];
        Flavour::Sour.to_bytes(&mut buf).unwrap();
        assert_eq!(buf, [0b1010_0000]);
    }
}
