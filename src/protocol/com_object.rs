//! Group object (communication object) tables read from device memory.
//!
//! The table layout depends on the device's mask version, so the table is
//! parsed with a [`FirmwareType`] obtained beforehand (typically from a
//! device descriptor read).
//!
//! ```text
//! ┌─────────────┬──────────────────┬──────────────────────────────┐
//! │ Num Entries │ RAM Flags Table  │ Descriptors (3 bytes each)   │
//! │  (1 byte)   │ Pointer (1 byte) │                              │
//! └─────────────┴──────────────────┴──────────────────────────────┘
//! ```

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{
    array_length_in_bits, implicit_length, read_count_array, read_reserved, write_array, write_reserved, Codec,
};
use crate::error::{FieldContext, KnxError, Result};
use crate::protocol::constants::{ComObjectValueType, FirmwareType, Priority, MAX_COM_OBJECTS};

/// Group object table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComObjectTable {
    /// System 1 table
    RealisationType1 {
        /// Pointer to the RAM flags table
        ram_flags_table_pointer: u8,
        /// One descriptor per group object
        com_object_descriptors: heapless::Vec<GroupObjectDescriptorRealisationType1, MAX_COM_OBJECTS>,
    },
    /// System 2 table
    RealisationType2 {
        /// Pointer to the RAM flags table
        ram_flags_table_pointer: u8,
        /// One descriptor per group object
        com_object_descriptors: heapless::Vec<GroupObjectDescriptorRealisationType2, MAX_COM_OBJECTS>,
    },
    /// System 300 table, without a memory representation
    RealisationType6 {
        /// Placeholder descriptor
        com_object_descriptors: GroupObjectDescriptorRealisationType6,
    },
}

impl ComObjectTable {
    /// Firmware type whose layout this table uses.
    pub const fn firmware_type(&self) -> FirmwareType {
        match self {
            Self::RealisationType1 { .. } => FirmwareType::System1,
            Self::RealisationType2 { .. } => FirmwareType::System2,
            Self::RealisationType6 { .. } => FirmwareType::System300,
        }
    }

    /// Number of group objects described.
    pub fn len(&self) -> usize {
        match self {
            Self::RealisationType1 { com_object_descriptors, .. } => com_object_descriptors.len(),
            Self::RealisationType2 { com_object_descriptors, .. } => com_object_descriptors.len(),
            Self::RealisationType6 { .. } => 0,
        }
    }

    /// Whether the table describes no group objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a table laid out for `firmware_type`.
    pub fn parse_with_firmware(rb: &mut ReadBuffer<'_>, firmware_type: FirmwareType) -> Result<Self> {
        knx_log!(trace, "com object table for firmware {}", firmware_type.to_raw());
        match firmware_type {
            FirmwareType::System1 => {
                let num_entries = rb.read_u8(8).field("numEntries")?;
                let ram_flags_table_pointer = rb.read_u8(8).field("ramFlagsTablePointer")?;
                let com_object_descriptors =
                    read_count_array(rb, usize::from(num_entries)).field("comObjectDescriptors")?;
                Ok(Self::RealisationType1 { ram_flags_table_pointer, com_object_descriptors })
            }
            FirmwareType::System2 => {
                let num_entries = rb.read_u8(8).field("numEntries")?;
                let ram_flags_table_pointer = rb.read_u8(8).field("ramFlagsTablePointer")?;
                let com_object_descriptors =
                    read_count_array(rb, usize::from(num_entries)).field("comObjectDescriptors")?;
                Ok(Self::RealisationType2 { ram_flags_table_pointer, com_object_descriptors })
            }
            FirmwareType::System300 => Ok(Self::RealisationType6 {
                com_object_descriptors: GroupObjectDescriptorRealisationType6::parse(rb)
                    .field("comObjectDescriptors")?,
            }),
            other => {
                Err(KnxError::unknown_discriminator(u32::from(other.to_raw()))).field("firmwareType")
            }
        }
    }

    /// Write the table.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        match self {
            Self::RealisationType1 { ram_flags_table_pointer, com_object_descriptors } => {
                wb.write_bits(8, implicit_length(com_object_descriptors.len(), 8)?).field("numEntries")?;
                wb.write_u8(8, *ram_flags_table_pointer).field("ramFlagsTablePointer")?;
                write_array(wb, com_object_descriptors).field("comObjectDescriptors")
            }
            Self::RealisationType2 { ram_flags_table_pointer, com_object_descriptors } => {
                wb.write_bits(8, implicit_length(com_object_descriptors.len(), 8)?).field("numEntries")?;
                wb.write_u8(8, *ram_flags_table_pointer).field("ramFlagsTablePointer")?;
                write_array(wb, com_object_descriptors).field("comObjectDescriptors")
            }
            Self::RealisationType6 { com_object_descriptors } => {
                com_object_descriptors.serialize(wb).field("comObjectDescriptors")
            }
        }
    }

    /// Encoded size in bits.
    pub fn length_in_bits(&self) -> usize {
        match self {
            Self::RealisationType1 { com_object_descriptors, .. } => 16 + array_length_in_bits(com_object_descriptors),
            Self::RealisationType2 { com_object_descriptors, .. } => 16 + array_length_in_bits(com_object_descriptors),
            Self::RealisationType6 { com_object_descriptors } => com_object_descriptors.length_in_bits(),
        }
    }
}

/// Group object descriptor of a System 1 device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupObjectDescriptorRealisationType1 {
    /// Offset of the value in RAM
    pub data_pointer: u8,
    /// Transmit flag
    pub transmit_enable: bool,
    /// Value lives in EEPROM instead of RAM
    pub segment_selector_enable: bool,
    /// Write flag
    pub write_enable: bool,
    /// Read flag
    pub read_enable: bool,
    /// Communication flag
    pub communication_enable: bool,
    /// Transmission priority
    pub priority: Priority,
    /// Value size
    pub value_type: ComObjectValueType,
}

impl Codec for GroupObjectDescriptorRealisationType1 {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let data_pointer = rb.read_u8(8).field("dataPointer")?;
        read_reserved(rb, 1, 1).field("reserved")?;
        Ok(Self {
            data_pointer,
            transmit_enable: rb.read_bit().field("transmitEnable")?,
            segment_selector_enable: rb.read_bit().field("segmentSelectorEnable")?,
            write_enable: rb.read_bit().field("writeEnable")?,
            read_enable: rb.read_bit().field("readEnable")?,
            communication_enable: rb.read_bit().field("communicationEnable")?,
            priority: Priority::parse(rb).field("priority")?,
            value_type: ComObjectValueType::parse(rb).field("valueType")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.data_pointer).field("dataPointer")?;
        write_reserved(wb, 1, 1).field("reserved")?;
        wb.write_bit(self.transmit_enable).field("transmitEnable")?;
        wb.write_bit(self.segment_selector_enable).field("segmentSelectorEnable")?;
        wb.write_bit(self.write_enable).field("writeEnable")?;
        wb.write_bit(self.read_enable).field("readEnable")?;
        wb.write_bit(self.communication_enable).field("communicationEnable")?;
        self.priority.serialize(wb).field("priority")?;
        self.value_type.serialize(wb).field("valueType")
    }

    fn length_in_bits(&self) -> usize {
        24
    }
}

/// Group object descriptor of a System 2 device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupObjectDescriptorRealisationType2 {
    /// Offset of the value in RAM
    pub data_pointer: u8,
    /// Update on response flag
    pub update_enable: bool,
    /// Transmit flag
    pub transmit_enable: bool,
    /// Value lives in EEPROM instead of RAM
    pub segment_selector_enable: bool,
    /// Write flag
    pub write_enable: bool,
    /// Read flag
    pub read_enable: bool,
    /// Communication flag
    pub communication_enable: bool,
    /// Transmission priority
    pub priority: Priority,
    /// Value size
    pub value_type: ComObjectValueType,
}

impl Codec for GroupObjectDescriptorRealisationType2 {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self {
            data_pointer: rb.read_u8(8).field("dataPointer")?,
            update_enable: rb.read_bit().field("updateEnable")?,
            transmit_enable: rb.read_bit().field("transmitEnable")?,
            segment_selector_enable: rb.read_bit().field("segmentSelectorEnable")?,
            write_enable: rb.read_bit().field("writeEnable")?,
            read_enable: rb.read_bit().field("readEnable")?,
            communication_enable: rb.read_bit().field("communicationEnable")?,
            priority: Priority::parse(rb).field("priority")?,
            value_type: ComObjectValueType::parse(rb).field("valueType")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.data_pointer).field("dataPointer")?;
        wb.write_bit(self.update_enable).field("updateEnable")?;
        wb.write_bit(self.transmit_enable).field("transmitEnable")?;
        wb.write_bit(self.segment_selector_enable).field("segmentSelectorEnable")?;
        wb.write_bit(self.write_enable).field("writeEnable")?;
        wb.write_bit(self.read_enable).field("readEnable")?;
        wb.write_bit(self.communication_enable).field("communicationEnable")?;
        self.priority.serialize(wb).field("priority")?;
        self.value_type.serialize(wb).field("valueType")
    }

    fn length_in_bits(&self) -> usize {
        24
    }
}

/// Group object descriptor of a System 300 device (no memory layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupObjectDescriptorRealisationType6;

impl Codec for GroupObjectDescriptorRealisationType6 {
    fn parse(_rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self)
    }

    fn serialize(&self, _wb: &mut WriteBuffer<'_>) -> Result<()> {
        Ok(())
    }

    fn length_in_bits(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two entries, RAM flags at 0x64
    const SYSTEM1_TABLE: [u8; 8] = [0x02, 0x64, 0x10, 0xDF, 0x00, 0x11, 0xC7, 0x07];

    #[test]
    fn test_system1_table() {
        let table = ComObjectTable::parse_with_firmware(&mut ReadBuffer::new(&SYSTEM1_TABLE), FirmwareType::System1)
            .unwrap();
        let ComObjectTable::RealisationType1 { ram_flags_table_pointer, com_object_descriptors } = &table else {
            panic!("expected realisation type 1");
        };
        assert_eq!(*ram_flags_table_pointer, 0x64);
        assert_eq!(com_object_descriptors.len(), 2);

        let first = com_object_descriptors[0];
        assert_eq!(first.data_pointer, 0x10);
        assert!(first.transmit_enable);
        assert!(!first.segment_selector_enable);
        assert!(first.write_enable);
        assert!(first.read_enable);
        assert!(first.communication_enable);
        assert_eq!(first.priority, Priority::Low);
        assert_eq!(first.value_type, ComObjectValueType::Bit1);

        let second = com_object_descriptors[1];
        assert!(!second.read_enable);
        assert_eq!(second.value_type, ComObjectValueType::Byte1);

        assert_eq!(table.firmware_type(), FirmwareType::System1);
        let mut buf = [0u8; 8];
        let mut wb = WriteBuffer::new(&mut buf);
        table.serialize(&mut wb).unwrap();
        assert_eq!(buf, SYSTEM1_TABLE);
    }

    #[test]
    fn test_system2_table() {
        let data = [0x01, 0x20, 0x05, 0xDF, 0x08];
        let table = ComObjectTable::parse_with_firmware(&mut ReadBuffer::new(&data), FirmwareType::System2).unwrap();
        let ComObjectTable::RealisationType2 { com_object_descriptors, .. } = &table else {
            panic!("expected realisation type 2");
        };
        let descriptor = com_object_descriptors[0];
        assert!(descriptor.update_enable);
        assert!(descriptor.transmit_enable);
        assert_eq!(descriptor.priority, Priority::Low);
        assert_eq!(descriptor.value_type, ComObjectValueType::Byte2);
        assert_eq!(table.length_in_bits(), data.len() * 8);
    }

    #[test]
    fn test_system300_table_is_empty() {
        let table = ComObjectTable::parse_with_firmware(&mut ReadBuffer::new(&[]), FirmwareType::System300).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.length_in_bits(), 0);
    }

    #[test]
    fn test_unsupported_firmware() {
        let err = ComObjectTable::parse_with_firmware(&mut ReadBuffer::new(&SYSTEM1_TABLE), FirmwareType::System7)
            .unwrap_err();
        let codec = err.as_codec().unwrap();
        assert_eq!(codec.discriminator(), Some(0x0700));
        assert_eq!(codec.field(), Some("firmwareType"));
    }

    #[test]
    fn test_truncated_table() {
        let err = ComObjectTable::parse_with_firmware(&mut ReadBuffer::new(&SYSTEM1_TABLE[..6]), FirmwareType::System1)
            .unwrap_err();
        let codec = err.as_codec().unwrap();
        assert!(codec.is_unexpected_eof());
        assert_eq!(codec.path().next(), Some("comObjectDescriptors"));
    }
}
