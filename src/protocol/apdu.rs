//! Application layer protocol data units (APDU).
//!
//! An APDU starts with the transport control bits and, for data APDUs, the
//! 4-bit APCI split across the first two bytes:
//!
//! ```text
//! byte 0            byte 1
//! ┌─┬─┬────┬──┐     ┌──┬──────┐
//! │C│N│SEQ │AP│     │CI│ data │ ...
//! └─┴─┴────┴──┘     └──┴──────┘
//!  C    control (1 = transport control, 0 = data)
//!  N    numbered
//!  SEQ  sequence counter (4 bits)
//!  APCI application service (4 bits), followed by 6 bits of service data
//! ```
//!
//! The size of the payload is not self-describing: the enclosing `L_Data`
//! frame carries `dataLength` (APDU bytes minus one) and every variable
//! length service derives its payload size from it.
//!
//! ## Example
//!
//! ```
//! use knxnetip_codec::buffer::ReadBuffer;
//! use knxnetip_codec::protocol::apdu::{Apdu, ApduData, ApduPayload};
//!
//! // GroupValueWrite of a single bit set to 1
//! let mut rb = ReadBuffer::new(&[0x00, 0x81]);
//! let apdu = Apdu::parse(&mut rb, 1)?;
//! assert!(matches!(
//!     apdu.payload,
//!     ApduPayload::Data(ApduData::GroupValueWrite { data_first_byte: 1, .. })
//! ));
//! # Ok::<(), knxnetip_codec::KnxError>(())
//! ```

use crate::addressing::IndividualAddress;
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{implicit_length, read_reserved, write_reserved, Codec};
use crate::error::{FieldContext, KnxError, Result};
use crate::protocol::constants::MAX_APDU_DATA;

/// Variable APDU payload storage
pub type ApduBytes = heapless::Vec<u8, MAX_APDU_DATA>;

/// `dataLength - offset`, failing when the frame is too short for the service.
fn payload_len(data_length: u8, offset: u8) -> Result<usize> {
    data_length
        .checked_sub(offset)
        .map(usize::from)
        .ok_or_else(KnxError::length_mismatch)
}

/// Application layer PDU
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Apdu {
    /// Numbered (connection oriented) transport
    pub numbered: bool,
    /// Transport sequence counter (0-15)
    pub counter: u8,
    /// Control or data payload
    pub payload: ApduPayload,
}

/// Payload selected by the control bit
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApduPayload {
    /// Transport layer control (control bit 1)
    Control(ApduControl),
    /// Application data (control bit 0)
    Data(ApduData),
}

knx_enum! {
    /// Transport layer control services
    pub enum ApduControl: u8, 2, read_u8, write_u8 {
        /// `T_Connect`
        Connect = 0x0,
        /// `T_Disconnect`
        Disconnect = 0x1,
        /// `T_ACK`
        Ack = 0x2,
        /// `T_NAK`
        Nack = 0x3,
    }
}

impl Apdu {
    /// Unnumbered data APDU
    pub const fn data(data: ApduData) -> Self {
        Self { numbered: false, counter: 0, payload: ApduPayload::Data(data) }
    }

    /// Unnumbered `A_GroupValue_Read`
    pub const fn group_value_read() -> Self {
        Self::data(ApduData::GroupValueRead)
    }

    /// Unnumbered `A_GroupValue_Write`
    pub fn group_value_write(data_first_byte: u8, data: &[u8]) -> Result<Self> {
        Ok(Self::data(ApduData::GroupValueWrite {
            data_first_byte,
            data: ApduBytes::from_slice(data).map_err(|_full| KnxError::capacity_exceeded())?,
        }))
    }

    /// Read an APDU whose enclosing frame announced `data_length`.
    pub fn parse(rb: &mut ReadBuffer<'_>, data_length: u8) -> Result<Self> {
        let control = rb.read_bit().field("control")?;
        let numbered = rb.read_bit().field("numbered")?;
        let counter = rb.read_u8(4).field("counter")?;
        let payload = if control {
            ApduPayload::Control(ApduControl::parse(rb).field("controlType")?)
        } else {
            ApduPayload::Data(ApduData::parse(rb, data_length).field("dataApdu")?)
        };
        Ok(Self { numbered, counter, payload })
    }

    /// Write the APDU.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_bit(matches!(self.payload, ApduPayload::Control(_))).field("control")?;
        wb.write_bit(self.numbered).field("numbered")?;
        wb.write_u8(4, self.counter).field("counter")?;
        match &self.payload {
            ApduPayload::Control(control) => control.serialize(wb).field("controlType"),
            ApduPayload::Data(data) => data.serialize(wb).field("dataApdu"),
        }
    }

    /// Encoded size in bits.
    pub fn length_in_bits(&self) -> usize {
        6 + match &self.payload {
            ApduPayload::Control(_) => 2,
            ApduPayload::Data(data) => data.length_in_bits(),
        }
    }

    /// Encoded size in bytes.
    pub fn length_in_bytes(&self) -> usize {
        self.length_in_bits().div_ceil(8)
    }

    /// Value of the enclosing frame's `dataLength` field.
    pub fn data_length(&self) -> usize {
        self.length_in_bytes() - 1
    }
}

/// Application layer data services, selected by the 4-bit APCI
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApduData {
    /// `A_GroupValue_Read` (0x0)
    GroupValueRead,
    /// `A_GroupValue_Response` (0x1)
    GroupValueResponse {
        /// Low 6 bits of the APCI byte, holding values of 6 bits or less
        data_first_byte: u8,
        /// Remaining bytes for wider values
        data: ApduBytes,
    },
    /// `A_GroupValue_Write` (0x2)
    GroupValueWrite {
        /// Low 6 bits of the APCI byte, holding values of 6 bits or less
        data_first_byte: u8,
        /// Remaining bytes for wider values
        data: ApduBytes,
    },
    /// `A_IndividualAddress_Write` (0x3)
    IndividualAddressWrite {
        /// Address to assign
        new_address: IndividualAddress,
    },
    /// `A_IndividualAddress_Read` (0x4)
    IndividualAddressRead,
    /// `A_IndividualAddress_Response` (0x5)
    IndividualAddressResponse,
    /// `A_ADC_Read` (0x6)
    AdcRead {
        /// ADC channel (6 bits)
        channel_nr: u8,
        /// Number of samples
        read_count: u8,
    },
    /// `A_ADC_Response` (0x7)
    AdcResponse {
        /// ADC channel (6 bits)
        channel_nr: u8,
        /// Number of samples
        read_count: u8,
        /// Sum of the samples
        value: u16,
    },
    /// `A_Memory_Read` (0x8)
    MemoryRead {
        /// Bytes requested (6 bits)
        num_bytes: u8,
        /// Start address
        address: u16,
    },
    /// `A_Memory_Response` (0x9)
    MemoryResponse {
        /// Start address
        address: u16,
        /// Memory content (at most 63 bytes)
        data: ApduBytes,
    },
    /// `A_Memory_Write` (0xA)
    MemoryWrite {
        /// Start address
        address: u16,
        /// Memory content (at most 63 bytes)
        data: ApduBytes,
    },
    /// User message services (0xB)
    UserMessage {
        /// Low 6 bits of the APCI byte
        service: u8,
        /// Service payload
        data: ApduBytes,
    },
    /// `A_DeviceDescriptor_Read` (0xC)
    DeviceDescriptorRead {
        /// Requested descriptor type (6 bits)
        descriptor_type: u8,
    },
    /// `A_DeviceDescriptor_Response` (0xD)
    DeviceDescriptorResponse {
        /// Descriptor type (6 bits)
        descriptor_type: u8,
        /// Descriptor content
        data: ApduBytes,
    },
    /// `A_Restart` (0xE)
    Restart {
        /// Low 6 bits of the APCI byte (restart type)
        restart_type: u8,
        /// Extra parameters of an extended restart
        data: ApduBytes,
    },
    /// Extended services (0xF)
    Other(ApduDataExt),
}

impl ApduData {
    /// APCI code of the variant.
    pub const fn apci_type(&self) -> u8 {
        match self {
            Self::GroupValueRead => 0x0,
            Self::GroupValueResponse { .. } => 0x1,
            Self::GroupValueWrite { .. } => 0x2,
            Self::IndividualAddressWrite { .. } => 0x3,
            Self::IndividualAddressRead => 0x4,
            Self::IndividualAddressResponse => 0x5,
            Self::AdcRead { .. } => 0x6,
            Self::AdcResponse { .. } => 0x7,
            Self::MemoryRead { .. } => 0x8,
            Self::MemoryResponse { .. } => 0x9,
            Self::MemoryWrite { .. } => 0xA,
            Self::UserMessage { .. } => 0xB,
            Self::DeviceDescriptorRead { .. } => 0xC,
            Self::DeviceDescriptorResponse { .. } => 0xD,
            Self::Restart { .. } => 0xE,
            Self::Other(_) => 0xF,
        }
    }

    /// Read the APCI and the service that follows it.
    pub fn parse(rb: &mut ReadBuffer<'_>, data_length: u8) -> Result<Self> {
        let apci_type = rb.read_u8(4).field("apciType")?;
        knx_log!(trace, "APCI {} with dataLength {}", apci_type, data_length);
        // Services whose value spills past the APCI byte
        let tail = || usize::from(data_length.saturating_sub(1));
        let data = match apci_type {
            0x0 => {
                read_reserved(rb, 6, 0).field("reserved")?;
                Self::GroupValueRead
            }
            0x1 => Self::GroupValueResponse {
                data_first_byte: rb.read_u8(6).field("dataFirstByte")?,
                data: rb.read_bytes(tail()).field("data")?,
            },
            0x2 => Self::GroupValueWrite {
                data_first_byte: rb.read_u8(6).field("dataFirstByte")?,
                data: rb.read_bytes(tail()).field("data")?,
            },
            0x3 => {
                read_reserved(rb, 6, 0).field("reserved")?;
                Self::IndividualAddressWrite {
                    new_address: IndividualAddress::parse(rb).field("newAddress")?,
                }
            }
            0x4 => {
                read_reserved(rb, 6, 0).field("reserved")?;
                Self::IndividualAddressRead
            }
            0x5 => {
                read_reserved(rb, 6, 0).field("reserved")?;
                Self::IndividualAddressResponse
            }
            0x6 => Self::AdcRead {
                channel_nr: rb.read_u8(6).field("channelNr")?,
                read_count: rb.read_u8(8).field("readCount")?,
            },
            0x7 => Self::AdcResponse {
                channel_nr: rb.read_u8(6).field("channelNr")?,
                read_count: rb.read_u8(8).field("readCount")?,
                value: rb.read_u16(16).field("value")?,
            },
            0x8 => Self::MemoryRead {
                num_bytes: rb.read_u8(6).field("numBytes")?,
                address: rb.read_u16(16).field("address")?,
            },
            0x9 | 0xA => {
                let num_bytes = rb.read_u8(6).field("numBytes")?;
                let address = rb.read_u16(16).field("address")?;
                let data = rb.read_bytes(usize::from(num_bytes)).field("data")?;
                if apci_type == 0x9 {
                    Self::MemoryResponse { address, data }
                } else {
                    Self::MemoryWrite { address, data }
                }
            }
            0xB => Self::UserMessage {
                service: rb.read_u8(6).field("service")?,
                data: rb.read_bytes(tail()).field("data")?,
            },
            0xC => Self::DeviceDescriptorRead {
                descriptor_type: rb.read_u8(6).field("descriptorType")?,
            },
            0xD => Self::DeviceDescriptorResponse {
                descriptor_type: rb.read_u8(6).field("descriptorType")?,
                data: rb.read_bytes(tail()).field("data")?,
            },
            0xE => Self::Restart {
                restart_type: rb.read_u8(6).field("restartType")?,
                data: rb.read_bytes(tail()).field("data")?,
            },
            _ => Self::Other(ApduDataExt::parse(rb, data_length).field("extendedApdu")?),
        };
        Ok(data)
    }

    /// Write the APCI and the service.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(4, self.apci_type()).field("apciType")?;
        match self {
            Self::GroupValueRead | Self::IndividualAddressRead | Self::IndividualAddressResponse => {
                write_reserved(wb, 6, 0).field("reserved")
            }
            Self::GroupValueResponse { data_first_byte, data }
            | Self::GroupValueWrite { data_first_byte, data } => {
                wb.write_u8(6, *data_first_byte).field("dataFirstByte")?;
                wb.write_bytes(data).field("data")
            }
            Self::IndividualAddressWrite { new_address } => {
                write_reserved(wb, 6, 0).field("reserved")?;
                new_address.serialize(wb).field("newAddress")
            }
            Self::AdcRead { channel_nr, read_count } => {
                wb.write_u8(6, *channel_nr).field("channelNr")?;
                wb.write_u8(8, *read_count).field("readCount")
            }
            Self::AdcResponse { channel_nr, read_count, value } => {
                wb.write_u8(6, *channel_nr).field("channelNr")?;
                wb.write_u8(8, *read_count).field("readCount")?;
                wb.write_u16(16, *value).field("value")
            }
            Self::MemoryRead { num_bytes, address } => {
                wb.write_u8(6, *num_bytes).field("numBytes")?;
                wb.write_u16(16, *address).field("address")
            }
            Self::MemoryResponse { address, data } | Self::MemoryWrite { address, data } => {
                wb.write_bits(6, implicit_length(data.len(), 6)?).field("numBytes")?;
                wb.write_u16(16, *address).field("address")?;
                wb.write_bytes(data).field("data")
            }
            Self::UserMessage { service: bits, data }
            | Self::DeviceDescriptorResponse { descriptor_type: bits, data }
            | Self::Restart { restart_type: bits, data } => {
                wb.write_u8(6, *bits).field("data")?;
                wb.write_bytes(data).field("data")
            }
            Self::DeviceDescriptorRead { descriptor_type } => {
                wb.write_u8(6, *descriptor_type).field("descriptorType")
            }
            Self::Other(ext) => ext.serialize(wb).field("extendedApdu"),
        }
    }

    /// Encoded size in bits, APCI included.
    pub fn length_in_bits(&self) -> usize {
        4 + match self {
            Self::GroupValueRead
            | Self::IndividualAddressRead
            | Self::IndividualAddressResponse
            | Self::DeviceDescriptorRead { .. } => 6,
            Self::GroupValueResponse { data, .. }
            | Self::GroupValueWrite { data, .. }
            | Self::UserMessage { data, .. }
            | Self::DeviceDescriptorResponse { data, .. }
            | Self::Restart { data, .. } => 6 + data.len() * 8,
            Self::IndividualAddressWrite { .. } | Self::MemoryRead { .. } => 6 + 16,
            Self::AdcRead { .. } => 6 + 8,
            Self::AdcResponse { .. } => 6 + 8 + 16,
            Self::MemoryResponse { data, .. } | Self::MemoryWrite { data, .. } => 6 + 16 + data.len() * 8,
            Self::Other(ext) => ext.length_in_bits(),
        }
    }
}

/// Addressing of an interface object property value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyValueAddress {
    /// Interface object index
    pub object_index: u8,
    /// Property id
    pub property_id: u8,
    /// Number of elements (4 bits)
    pub count: u8,
    /// Start index (12 bits)
    pub index: u16,
}

impl Codec for PropertyValueAddress {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self {
            object_index: rb.read_u8(8).field("objectIndex")?,
            property_id: rb.read_u8(8).field("propertyId")?,
            count: rb.read_u8(4).field("count")?,
            index: rb.read_u16(12).field("index")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.object_index).field("objectIndex")?;
        wb.write_u8(8, self.property_id).field("propertyId")?;
        wb.write_u8(4, self.count).field("count")?;
        wb.write_u16(12, self.index).field("index")
    }

    fn length_in_bits(&self) -> usize {
        32
    }
}

/// Body of `A_PropertyDescription_Response`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyDescription {
    /// Interface object index
    pub object_index: u8,
    /// Property id
    pub property_id: u8,
    /// Property index
    pub index: u8,
    /// Property is writable
    pub write_enabled: bool,
    /// Property data type (6 bits)
    pub property_data_type: u8,
    /// Maximum number of elements (12 bits)
    pub max_nr_of_elements: u16,
    /// Access level needed to read (4 bits)
    pub read_level: u8,
    /// Access level needed to write (4 bits)
    pub write_level: u8,
}

impl Codec for PropertyDescription {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let object_index = rb.read_u8(8).field("objectIndex")?;
        let property_id = rb.read_u8(8).field("propertyId")?;
        let index = rb.read_u8(8).field("index")?;
        let write_enabled = rb.read_bit().field("writeEnabled")?;
        read_reserved(rb, 1, 0).field("reserved")?;
        let property_data_type = rb.read_u8(6).field("propertyDataType")?;
        read_reserved(rb, 4, 0).field("reserved")?;
        Ok(Self {
            object_index,
            property_id,
            index,
            write_enabled,
            property_data_type,
            max_nr_of_elements: rb.read_u16(12).field("maxNrOfElements")?,
            read_level: rb.read_u8(4).field("readLevel")?,
            write_level: rb.read_u8(4).field("writeLevel")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.object_index).field("objectIndex")?;
        wb.write_u8(8, self.property_id).field("propertyId")?;
        wb.write_u8(8, self.index).field("index")?;
        wb.write_bit(self.write_enabled).field("writeEnabled")?;
        write_reserved(wb, 1, 0).field("reserved")?;
        wb.write_u8(6, self.property_data_type).field("propertyDataType")?;
        write_reserved(wb, 4, 0).field("reserved")?;
        wb.write_u16(12, self.max_nr_of_elements).field("maxNrOfElements")?;
        wb.write_u8(4, self.read_level).field("readLevel")?;
        wb.write_u8(4, self.write_level).field("writeLevel")
    }

    fn length_in_bits(&self) -> usize {
        7 * 8
    }
}

/// Extended application services, selected by the 6-bit extended APCI
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApduDataExt {
    /// `A_Authorize_Request` (0x11)
    AuthorizeRequest {
        /// Reserved level byte
        level: u8,
        /// Access key
        key: [u8; 4],
    },
    /// `A_Authorize_Response` (0x12)
    AuthorizeResponse {
        /// Granted access level
        level: u8,
    },
    /// `A_Key_Write` (0x13)
    KeyWrite {
        /// Level the key is set for
        level: u8,
        /// New key
        key: [u8; 4],
    },
    /// `A_Key_Response` (0x14)
    KeyResponse {
        /// Level the key was set for
        level: u8,
    },
    /// `A_PropertyValue_Read` (0x15)
    PropertyValueRead(PropertyValueAddress),
    /// `A_PropertyValue_Response` (0x16)
    PropertyValueResponse {
        /// Addressed property
        address: PropertyValueAddress,
        /// Property value
        data: ApduBytes,
    },
    /// `A_PropertyValue_Write` (0x17)
    PropertyValueWrite {
        /// Addressed property
        address: PropertyValueAddress,
        /// Property value
        data: ApduBytes,
    },
    /// `A_PropertyDescription_Read` (0x18)
    PropertyDescriptionRead {
        /// Interface object index
        object_index: u8,
        /// Property id
        property_id: u8,
        /// Property index
        index: u8,
    },
    /// `A_PropertyDescription_Response` (0x19)
    PropertyDescriptionResponse(PropertyDescription),
    /// Any other extended service, kept verbatim
    Other {
        /// Extended APCI code (6 bits)
        ext_apci_type: u8,
        /// Service payload
        data: ApduBytes,
    },
}

impl ApduDataExt {
    /// Extended APCI code of the variant.
    pub const fn ext_apci_type(&self) -> u8 {
        match self {
            Self::AuthorizeRequest { .. } => 0x11,
            Self::AuthorizeResponse { .. } => 0x12,
            Self::KeyWrite { .. } => 0x13,
            Self::KeyResponse { .. } => 0x14,
            Self::PropertyValueRead(_) => 0x15,
            Self::PropertyValueResponse { .. } => 0x16,
            Self::PropertyValueWrite { .. } => 0x17,
            Self::PropertyDescriptionRead { .. } => 0x18,
            Self::PropertyDescriptionResponse(_) => 0x19,
            Self::Other { ext_apci_type, .. } => *ext_apci_type,
        }
    }

    /// Read the extended APCI and the service that follows it.
    pub fn parse(rb: &mut ReadBuffer<'_>, length: u8) -> Result<Self> {
        let ext_apci_type = rb.read_u8(6).field("extApciType")?;
        knx_log!(trace, "extended APCI {}", ext_apci_type);
        let ext = match ext_apci_type {
            0x11 | 0x13 => {
                let level = rb.read_u8(8).field("level")?;
                let key = rb.read_array().field("data")?;
                if ext_apci_type == 0x11 {
                    Self::AuthorizeRequest { level, key }
                } else {
                    Self::KeyWrite { level, key }
                }
            }
            0x12 => Self::AuthorizeResponse { level: rb.read_u8(8).field("level")? },
            0x14 => Self::KeyResponse { level: rb.read_u8(8).field("level")? },
            0x15 => Self::PropertyValueRead(PropertyValueAddress::parse(rb)?),
            0x16 | 0x17 => {
                let address = PropertyValueAddress::parse(rb)?;
                let count = payload_len(length, 5).field("data")?;
                let data = rb.read_bytes(count).field("data")?;
                if ext_apci_type == 0x16 {
                    Self::PropertyValueResponse { address, data }
                } else {
                    Self::PropertyValueWrite { address, data }
                }
            }
            0x18 => Self::PropertyDescriptionRead {
                object_index: rb.read_u8(8).field("objectIndex")?,
                property_id: rb.read_u8(8).field("propertyId")?,
                index: rb.read_u8(8).field("index")?,
            },
            0x19 => Self::PropertyDescriptionResponse(PropertyDescription::parse(rb)?),
            _ => {
                let count = payload_len(length, 1).field("data")?;
                Self::Other { ext_apci_type, data: rb.read_bytes(count).field("data")? }
            }
        };
        Ok(ext)
    }

    /// Write the extended APCI and the service.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(6, self.ext_apci_type()).field("extApciType")?;
        match self {
            Self::AuthorizeRequest { level, key } | Self::KeyWrite { level, key } => {
                wb.write_u8(8, *level).field("level")?;
                wb.write_bytes(key).field("data")
            }
            Self::AuthorizeResponse { level } | Self::KeyResponse { level } => {
                wb.write_u8(8, *level).field("level")
            }
            Self::PropertyValueRead(address) => address.serialize(wb),
            Self::PropertyValueResponse { address, data } | Self::PropertyValueWrite { address, data } => {
                address.serialize(wb)?;
                wb.write_bytes(data).field("data")
            }
            Self::PropertyDescriptionRead { object_index, property_id, index } => {
                wb.write_u8(8, *object_index).field("objectIndex")?;
                wb.write_u8(8, *property_id).field("propertyId")?;
                wb.write_u8(8, *index).field("index")
            }
            Self::PropertyDescriptionResponse(description) => description.serialize(wb),
            Self::Other { data, .. } => wb.write_bytes(data).field("data"),
        }
    }

    /// Encoded size in bits, extended APCI included.
    pub fn length_in_bits(&self) -> usize {
        6 + match self {
            Self::AuthorizeRequest { .. } | Self::KeyWrite { .. } => 8 + 32,
            Self::AuthorizeResponse { .. } | Self::KeyResponse { .. } => 8,
            Self::PropertyValueRead(address) => address.length_in_bits(),
            Self::PropertyValueResponse { address, data } | Self::PropertyValueWrite { address, data } => {
                address.length_in_bits() + data.len() * 8
            }
            Self::PropertyDescriptionRead { .. } => 24,
            Self::PropertyDescriptionResponse(description) => description.length_in_bits(),
            Self::Other { data, .. } => data.len() * 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bytes: &[u8]) -> Apdu {
        let data_length = (bytes.len() - 1) as u8;
        Apdu::parse(&mut ReadBuffer::new(bytes), data_length).unwrap()
    }

    fn serialize(apdu: &Apdu) -> heapless::Vec<u8, 32> {
        let mut buf = [0u8; 32];
        let mut wb = WriteBuffer::new(&mut buf);
        apdu.serialize(&mut wb).unwrap();
        assert_eq!(wb.pos_bytes(), apdu.length_in_bytes());
        heapless::Vec::from_slice(wb.written()).unwrap()
    }

    #[test]
    fn test_group_value_read() {
        let apdu = parse(&[0x00, 0x00]);
        assert_eq!(apdu, Apdu::group_value_read());
        assert_eq!(apdu.data_length(), 1);
    }

    #[test]
    fn test_group_value_write_small() {
        let apdu = parse(&[0x00, 0x81]);
        assert_eq!(apdu, Apdu::group_value_write(1, &[]).unwrap());
        assert_eq!(serialize(&apdu).as_slice(), &[0x00, 0x81]);
    }

    #[test]
    fn test_group_value_write_wide() {
        // DPT 9 value 0x0C1A
        let apdu = parse(&[0x00, 0x80, 0x0C, 0x1A]);
        match &apdu.payload {
            ApduPayload::Data(ApduData::GroupValueWrite { data_first_byte, data }) => {
                assert_eq!(*data_first_byte, 0);
                assert_eq!(data.as_slice(), &[0x0C, 0x1A]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
        assert_eq!(apdu.data_length(), 3);
    }

    #[test]
    fn test_group_value_response() {
        let apdu = parse(&[0x00, 0x40, 0x55]);
        assert!(matches!(apdu.payload, ApduPayload::Data(ApduData::GroupValueResponse { .. })));
        assert_eq!(serialize(&apdu).as_slice(), &[0x00, 0x40, 0x55]);
    }

    #[test]
    fn test_control_apdu() {
        // T_ACK numbered, sequence 3
        let apdu = Apdu::parse(&mut ReadBuffer::new(&[0xCE]), 0).unwrap();
        assert!(apdu.numbered);
        assert_eq!(apdu.counter, 3);
        assert_eq!(apdu.payload, ApduPayload::Control(ApduControl::Ack));
        assert_eq!(apdu.length_in_bytes(), 1);
        assert_eq!(serialize(&apdu).as_slice(), &[0xCE]);
    }

    #[test]
    fn test_memory_read_and_response() {
        // Numbered, sequence 1: A_Memory_Read 2 bytes at 0x0104
        let apdu = parse(&[0x46, 0x02, 0x01, 0x04]);
        assert_eq!(apdu.payload, ApduPayload::Data(ApduData::MemoryRead { num_bytes: 2, address: 0x0104 }));

        let bytes = [0x42, 0x42, 0x01, 0x04, 0xAB, 0xCD];
        let apdu = parse(&bytes);
        match &apdu.payload {
            ApduPayload::Data(ApduData::MemoryResponse { address, data }) => {
                assert_eq!(*address, 0x0104);
                assert_eq!(data.as_slice(), &[0xAB, 0xCD]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
        assert_eq!(serialize(&apdu).as_slice(), &bytes);
    }

    #[test]
    fn test_individual_address_write() {
        let bytes = [0x00, 0xC0, 0x11, 0x05];
        let apdu = parse(&bytes);
        assert_eq!(
            apdu.payload,
            ApduPayload::Data(ApduData::IndividualAddressWrite {
                new_address: IndividualAddress::new(1, 1, 5).unwrap()
            })
        );
        assert_eq!(serialize(&apdu).as_slice(), &bytes);
    }

    #[test]
    fn test_device_descriptor_response() {
        let bytes = [0x43, 0x40, 0x07, 0xB0];
        let apdu = parse(&bytes);
        assert!(matches!(
            apdu.payload,
            ApduPayload::Data(ApduData::DeviceDescriptorResponse { descriptor_type: 0, .. })
        ));
        assert_eq!(serialize(&apdu).as_slice(), &bytes);
    }

    #[test]
    fn test_property_value_read() {
        // A_PropertyValue_Read object 0, property 0x0B, 1 element from 1
        let bytes = [0x03, 0xD5, 0x00, 0x0B, 0x10, 0x01];
        let apdu = parse(&bytes);
        assert_eq!(
            apdu.payload,
            ApduPayload::Data(ApduData::Other(ApduDataExt::PropertyValueRead(PropertyValueAddress {
                object_index: 0,
                property_id: 0x0B,
                count: 1,
                index: 1,
            })))
        );
        assert_eq!(serialize(&apdu).as_slice(), &bytes);
    }

    #[test]
    fn test_property_value_response() {
        let bytes = [0x03, 0xD6, 0x00, 0x0B, 0x10, 0x01, 0x00, 0xC5, 0x01, 0x02, 0x03, 0x04];
        let apdu = parse(&bytes);
        match &apdu.payload {
            ApduPayload::Data(ApduData::Other(ApduDataExt::PropertyValueResponse { data, .. })) => {
                assert_eq!(data.len(), 6);
            }
            other => panic!("unexpected payload {other:?}"),
        }
        assert_eq!(serialize(&apdu).as_slice(), &bytes);
    }

    #[test]
    fn test_property_value_response_too_short() {
        // dataLength 3 cannot hold the property address
        let err = Apdu::parse(&mut ReadBuffer::new(&[0x03, 0xD6, 0x00, 0x0B, 0x10, 0x01]), 3).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert!(codec.is_length_mismatch());
        assert_eq!(codec.path().next(), Some("dataApdu"));
    }

    #[test]
    fn test_property_description_response() {
        let bytes = [0x03, 0xD9, 0x00, 0x0B, 0x00, 0x93, 0x00, 0x01, 0x31];
        let apdu = parse(&bytes);
        match &apdu.payload {
            ApduPayload::Data(ApduData::Other(ApduDataExt::PropertyDescriptionResponse(d))) => {
                assert!(d.write_enabled);
                assert_eq!(d.property_data_type, 0x13);
                assert_eq!(d.max_nr_of_elements, 1);
                assert_eq!(d.read_level, 3);
                assert_eq!(d.write_level, 1);
            }
            other => panic!("unexpected payload {other:?}"),
        }
        assert_eq!(serialize(&apdu).as_slice(), &bytes);
    }

    #[test]
    fn test_unknown_extended_service_kept() {
        // A_DomainAddress_Read (ext 0x23)
        let bytes = [0x03, 0xE3, 0x12];
        let apdu = parse(&bytes);
        assert!(matches!(
            apdu.payload,
            ApduPayload::Data(ApduData::Other(ApduDataExt::Other { ext_apci_type: 0x23, .. }))
        ));
        assert_eq!(serialize(&apdu).as_slice(), &bytes);
    }

    #[test]
    fn test_authorize_request() {
        let bytes = [0x03, 0xD1, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
        let apdu = parse(&bytes);
        assert_eq!(
            apdu.payload,
            ApduPayload::Data(ApduData::Other(ApduDataExt::AuthorizeRequest { level: 0, key: [0xFF; 4] }))
        );
        assert_eq!(serialize(&apdu).as_slice(), &bytes);
    }

    #[test]
    fn test_memory_response_too_large() {
        let data = ApduBytes::from_slice(&[0u8; 64]).unwrap();
        let apdu = Apdu::data(ApduData::MemoryResponse { address: 0, data });
        let mut buf = [0u8; 80];
        let err = apdu.serialize(&mut WriteBuffer::new(&mut buf)).unwrap_err();
        assert!(err.as_codec().unwrap().is_value_out_of_range());
    }
}
