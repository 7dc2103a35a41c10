//! Common External Message Interface (cEMI) implementation.
//!
//! cEMI provides the standardized interface for KNX communication, encapsulating
//! KNX telegrams within KNXnet/IP frames. The first byte (message code)
//! selects the service; its size is supplied by the enclosing KNXnet/IP
//! message.
//!
//! ## Frame Structure
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Message Code (1 byte)                    │
//! ├──────────────────────────────────────────┤
//! │ Additional Info Length (1 byte)          │  L_Data / L_Busmon only
//! ├──────────────────────────────────────────┤
//! │ Additional Info (variable)               │
//! ├──────────────────────────────────────────┤
//! │ Service Information (L_Data)             │
//! │  ├─ Control Field 1 (1 byte)             │
//! │  ├─ Control Field 2 (1 byte)             │
//! │  ├─ Source Address (2 bytes)             │
//! │  ├─ Destination Address (2 bytes)        │
//! │  ├─ Data Length (1 byte)                 │
//! │  └─ APDU (variable)                      │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Services without a structured body in this crate (raw frames, transport
//! layer services, function properties) keep their `size - 1` payload bytes
//! so they serialize back unchanged.
//!
//! ## Example
//!
//! ```
//! use knxnetip_codec::addressing::NumLevels;
//! use knxnetip_codec::buffer::ReadBuffer;
//! use knxnetip_codec::protocol::cemi::Cemi;
//!
//! let data = [0x29, 0x00, 0xBC, 0xE0, 0x11, 0x01, 0x0A, 0x03, 0x01, 0x00, 0x81];
//! let cemi = Cemi::parse(&mut ReadBuffer::new(&data), data.len())?;
//!
//! let ldata = cemi.as_ldata().unwrap();
//! assert!(ldata.is_group_write());
//! assert_eq!(ldata.destination_group(NumLevels::Three).unwrap().to_string(), "1/2/3");
//! # Ok::<(), knxnetip_codec::KnxError>(())
//! ```

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{
    array_length_in_bits, implicit_length, read_const, read_length_array, write_array, Codec,
};
use crate::error::{FieldContext, KnxError, Result};
use crate::protocol::constants::{MAX_ADDITIONAL_INFO, MAX_ADDITIONAL_INFO_DATA, MAX_RAW_DATA};
use crate::protocol::ldata::LDataFrame;

/// Opaque service payload
pub type RawPayload = heapless::Vec<u8, MAX_RAW_DATA>;

/// Additional information blocks preceding an `L_Data` frame
pub type AdditionalInformation = heapless::Vec<CemiAdditionalInformation, MAX_ADDITIONAL_INFO>;

/// `size - offset`, failing when the message is shorter than its fixed part.
fn remaining(size: usize, offset: usize) -> Result<usize> {
    size.checked_sub(offset).ok_or_else(KnxError::length_mismatch)
}

/// Payload filling the rest of a `size` byte message.
fn read_raw(rb: &mut ReadBuffer<'_>, size: usize) -> Result<RawPayload> {
    rb.read_bytes(remaining(size, 1)?).field("data")
}

/// A cEMI message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cemi {
    /// `L_Raw.req` (0x10)
    LRawReq(RawPayload),
    /// `L_Data.req` (0x11)
    LDataReq(LDataMessage),
    /// `L_PollData.req` (0x13)
    LPollDataReq(RawPayload),
    /// `L_PollData.con` (0x25)
    LPollDataCon(RawPayload),
    /// `L_Data.ind` (0x29)
    LDataInd(LDataMessage),
    /// `L_Busmon.ind` (0x2B)
    LBusmonInd(LBusmonInd),
    /// `L_Raw.ind` (0x2D)
    LRawInd(RawPayload),
    /// `L_Data.con` (0x2E)
    LDataCon(LDataMessage),
    /// `L_Raw.con` (0x2F)
    LRawCon(RawPayload),
    /// `T_Data_Connected.req` (0x41)
    TDataConnectedReq(RawPayload),
    /// `T_Data_Individual.req` (0x4A)
    TDataIndividualReq(RawPayload),
    /// `T_Data_Connected.ind` (0x89)
    TDataConnectedInd(RawPayload),
    /// `T_Data_Individual.ind` (0x94)
    TDataIndividualInd(RawPayload),
    /// `M_Reset.ind` (0xF0)
    MResetInd,
    /// `M_Reset.req` (0xF1)
    MResetReq,
    /// `M_PropWrite.con` (0xF5)
    MPropWriteCon(PropertyHeader),
    /// `M_PropWrite.req` (0xF6)
    MPropWriteReq(PropertyMessage),
    /// `M_PropInfo.ind` (0xF7)
    MPropInfoInd(PropertyMessage),
    /// `M_FuncPropCommand.req` (0xF8)
    MFuncPropCommandReq(RawPayload),
    /// `M_FuncPropStateRead.req` (0xF9)
    MFuncPropStateReadReq(RawPayload),
    /// `M_FuncPropCommand.con` / `M_FuncPropStateRead.con` (0xFA)
    MFuncPropCon(RawPayload),
    /// `M_PropRead.con` (0xFB)
    MPropReadCon(PropertyMessage),
    /// `M_PropRead.req` (0xFC)
    MPropReadReq(PropertyHeader),
}

impl Cemi {
    /// Message code of the variant.
    pub const fn message_code(&self) -> u8 {
        match self {
            Self::LRawReq(_) => 0x10,
            Self::LDataReq(_) => 0x11,
            Self::LPollDataReq(_) => 0x13,
            Self::LPollDataCon(_) => 0x25,
            Self::LDataInd(_) => 0x29,
            Self::LBusmonInd(_) => 0x2B,
            Self::LRawInd(_) => 0x2D,
            Self::LDataCon(_) => 0x2E,
            Self::LRawCon(_) => 0x2F,
            Self::TDataConnectedReq(_) => 0x41,
            Self::TDataIndividualReq(_) => 0x4A,
            Self::TDataConnectedInd(_) => 0x89,
            Self::TDataIndividualInd(_) => 0x94,
            Self::MResetInd => 0xF0,
            Self::MResetReq => 0xF1,
            Self::MPropWriteCon(_) => 0xF5,
            Self::MPropWriteReq(_) => 0xF6,
            Self::MPropInfoInd(_) => 0xF7,
            Self::MFuncPropCommandReq(_) => 0xF8,
            Self::MFuncPropStateReadReq(_) => 0xF9,
            Self::MFuncPropCon(_) => 0xFA,
            Self::MPropReadCon(_) => 0xFB,
            Self::MPropReadReq(_) => 0xFC,
        }
    }

    /// Whether this is an `L_Data` request, indication or confirmation.
    pub const fn is_ldata(&self) -> bool {
        matches!(self, Self::LDataReq(_) | Self::LDataInd(_) | Self::LDataCon(_))
    }

    /// Link layer frame of an `L_Data` message.
    pub const fn as_ldata(&self) -> Option<&LDataFrame> {
        match self {
            Self::LDataReq(msg) | Self::LDataInd(msg) | Self::LDataCon(msg) => Some(&msg.data_frame),
            _ => None,
        }
    }

    /// Read a cEMI message of `size` bytes, message code included.
    ///
    /// The service body must end exactly at `size`; trailing bytes that no
    /// field accounts for are a length mismatch whatever the codec options.
    pub fn parse(rb: &mut ReadBuffer<'_>, size: usize) -> Result<Self> {
        let start = rb.pos();
        let message_code = rb.read_u8(8).field("messageCode")?;
        knx_log!(trace, "cEMI message code {} size {}", message_code, size);

        let cemi = match message_code {
            0x10 => Self::LRawReq(read_raw(rb, size)?),
            0x11 => Self::LDataReq(LDataMessage::parse(rb)?),
            0x13 => Self::LPollDataReq(read_raw(rb, size)?),
            0x25 => Self::LPollDataCon(read_raw(rb, size)?),
            0x29 => Self::LDataInd(LDataMessage::parse(rb)?),
            0x2B => Self::LBusmonInd(LBusmonInd::parse(rb)?),
            0x2D => Self::LRawInd(read_raw(rb, size)?),
            0x2E => Self::LDataCon(LDataMessage::parse(rb)?),
            0x2F => Self::LRawCon(read_raw(rb, size)?),
            0x41 => Self::TDataConnectedReq(read_raw(rb, size)?),
            0x4A => Self::TDataIndividualReq(read_raw(rb, size)?),
            0x89 => Self::TDataConnectedInd(read_raw(rb, size)?),
            0x94 => Self::TDataIndividualInd(read_raw(rb, size)?),
            0xF0 => Self::MResetInd,
            0xF1 => Self::MResetReq,
            0xF5 => Self::MPropWriteCon(PropertyHeader::parse(rb).field("propertyHeader")?),
            0xF6 => Self::MPropWriteReq(PropertyMessage::parse_sized(rb, size)?),
            0xF7 => Self::MPropInfoInd(PropertyMessage::parse_sized(rb, size)?),
            0xF8 => Self::MFuncPropCommandReq(read_raw(rb, size)?),
            0xF9 => Self::MFuncPropStateReadReq(read_raw(rb, size)?),
            0xFA => Self::MFuncPropCon(read_raw(rb, size)?),
            0xFB => Self::MPropReadCon(PropertyMessage::parse_sized(rb, size)?),
            0xFC => Self::MPropReadReq(PropertyHeader::parse(rb).field("propertyHeader")?),
            other => {
                return Err(KnxError::unknown_discriminator(u32::from(other))).field("messageCode");
            }
        };
        let consumed = (rb.pos() - start).div_ceil(8);
        if consumed != size {
            knx_log!(debug, "cEMI message takes {} of {} bytes", consumed, size);
            return Err(KnxError::length_mismatch());
        }
        Ok(cemi)
    }

    /// Write the message code and service body.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.message_code()).field("messageCode")?;
        match self {
            Self::LRawReq(data)
            | Self::LPollDataReq(data)
            | Self::LPollDataCon(data)
            | Self::LRawInd(data)
            | Self::LRawCon(data)
            | Self::TDataConnectedReq(data)
            | Self::TDataIndividualReq(data)
            | Self::TDataConnectedInd(data)
            | Self::TDataIndividualInd(data)
            | Self::MFuncPropCommandReq(data)
            | Self::MFuncPropStateReadReq(data)
            | Self::MFuncPropCon(data) => wb.write_bytes(data).field("data"),
            Self::LDataReq(msg) | Self::LDataInd(msg) | Self::LDataCon(msg) => msg.serialize(wb),
            Self::LBusmonInd(msg) => msg.serialize(wb),
            Self::MResetInd | Self::MResetReq => Ok(()),
            Self::MPropWriteCon(header) | Self::MPropReadReq(header) => header.serialize(wb).field("propertyHeader"),
            Self::MPropWriteReq(msg) | Self::MPropInfoInd(msg) | Self::MPropReadCon(msg) => msg.serialize(wb),
        }
    }

    /// Encoded size in bits, message code included.
    pub fn length_in_bits(&self) -> usize {
        8 + match self {
            Self::LRawReq(data)
            | Self::LPollDataReq(data)
            | Self::LPollDataCon(data)
            | Self::LRawInd(data)
            | Self::LRawCon(data)
            | Self::TDataConnectedReq(data)
            | Self::TDataIndividualReq(data)
            | Self::TDataConnectedInd(data)
            | Self::TDataIndividualInd(data)
            | Self::MFuncPropCommandReq(data)
            | Self::MFuncPropStateReadReq(data)
            | Self::MFuncPropCon(data) => data.len() * 8,
            Self::LDataReq(msg) | Self::LDataInd(msg) | Self::LDataCon(msg) => msg.length_in_bits(),
            Self::LBusmonInd(msg) => msg.length_in_bits(),
            Self::MResetInd | Self::MResetReq => 0,
            Self::MPropWriteCon(header) | Self::MPropReadReq(header) => header.length_in_bits(),
            Self::MPropWriteReq(msg) | Self::MPropInfoInd(msg) | Self::MPropReadCon(msg) => msg.length_in_bits(),
        }
    }

    /// Encoded size in bytes.
    pub fn length_in_bytes(&self) -> usize {
        self.length_in_bits().div_ceil(8)
    }
}

/// Body of `L_Data.req`, `L_Data.ind` and `L_Data.con`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LDataMessage {
    /// Medium specific information blocks
    pub additional_information: AdditionalInformation,
    /// Link layer frame
    pub data_frame: LDataFrame,
}

impl LDataMessage {
    /// Message without additional information.
    pub fn new(data_frame: LDataFrame) -> Self {
        Self { additional_information: heapless::Vec::new(), data_frame }
    }
}

fn read_additional_information(rb: &mut ReadBuffer<'_>) -> Result<AdditionalInformation> {
    let length = rb.read_u8(8).field("additionalInformationLength")?;
    read_length_array(rb, usize::from(length)).field("additionalInformation")
}

fn write_additional_information(wb: &mut WriteBuffer<'_>, info: &[CemiAdditionalInformation]) -> Result<()> {
    let length = implicit_length(array_length_in_bits(info) / 8, 8)?;
    wb.write_bits(8, length).field("additionalInformationLength")?;
    write_array(wb, info).field("additionalInformation")
}

impl Codec for LDataMessage {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self {
            additional_information: read_additional_information(rb)?,
            data_frame: LDataFrame::parse(rb).field("dataFrame")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        write_additional_information(wb, &self.additional_information)?;
        self.data_frame.serialize(wb).field("dataFrame")
    }

    fn length_in_bits(&self) -> usize {
        8 + array_length_in_bits(&self.additional_information) + self.data_frame.length_in_bits()
    }
}

/// Body of `L_Busmon.ind`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LBusmonInd {
    /// Medium specific information blocks
    pub additional_information: AdditionalInformation,
    /// Monitored frame
    pub data_frame: LDataFrame,
    /// Frame check byte; required for data and poll frames, absent for
    /// acknowledgement frames
    pub crc: Option<u8>,
}

impl Codec for LBusmonInd {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let additional_information = read_additional_information(rb)?;
        let data_frame = LDataFrame::parse(rb).field("dataFrame")?;
        let crc = if data_frame.is_ack() { None } else { Some(rb.read_u8(8).field("crc")?) };
        Ok(Self { additional_information, data_frame, crc })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        if self.crc.is_some() == self.data_frame.is_ack() {
            return Err(KnxError::inconsistent_fields().with_field("crc"));
        }
        write_additional_information(wb, &self.additional_information)?;
        self.data_frame.serialize(wb).field("dataFrame")?;
        if let Some(crc) = self.crc {
            wb.write_u8(8, crc).field("crc")?;
        }
        Ok(())
    }

    fn length_in_bits(&self) -> usize {
        let crc = if self.crc.is_some() { 8 } else { 0 };
        8 + array_length_in_bits(&self.additional_information) + self.data_frame.length_in_bits() + crc
    }
}

/// Additional information block of an `L_Data` or `L_Busmon` message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CemiAdditionalInformation {
    /// Busmonitor status (type 0x03)
    BusmonitorInfo {
        /// Frame error
        frame_error_flag: bool,
        /// Bit error
        bit_error_flag: bool,
        /// Parity error
        parity_error_flag: bool,
        /// Unknown flag
        unknown_flag: bool,
        /// Lost frames
        lost_flag: bool,
        /// Sequence number (3 bits)
        sequence_number: u8,
    },
    /// Relative timestamp (type 0x04)
    RelativeTimestamp {
        /// Timestamp in medium specific ticks
        relative_timestamp: u16,
    },
    /// Any other block, kept verbatim
    Other {
        /// Block type
        additional_info_type: u8,
        /// Block content
        data: heapless::Vec<u8, MAX_ADDITIONAL_INFO_DATA>,
    },
}

impl CemiAdditionalInformation {
    /// Type code of the block.
    pub const fn additional_info_type(&self) -> u8 {
        match self {
            Self::BusmonitorInfo { .. } => 0x03,
            Self::RelativeTimestamp { .. } => 0x04,
            Self::Other { additional_info_type, .. } => *additional_info_type,
        }
    }
}

impl Codec for CemiAdditionalInformation {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let additional_info_type = rb.read_u8(8).field("additionalInformationType")?;
        let info = match additional_info_type {
            0x03 => {
                read_const(rb, 8, 1).field("len")?;
                Self::BusmonitorInfo {
                    frame_error_flag: rb.read_bit().field("frameErrorFlag")?,
                    bit_error_flag: rb.read_bit().field("bitErrorFlag")?,
                    parity_error_flag: rb.read_bit().field("parityErrorFlag")?,
                    unknown_flag: rb.read_bit().field("unknownFlag")?,
                    lost_flag: rb.read_bit().field("lostFlag")?,
                    sequence_number: rb.read_u8(3).field("sequenceNumber")?,
                }
            }
            0x04 => {
                read_const(rb, 8, 2).field("len")?;
                Self::RelativeTimestamp { relative_timestamp: rb.read_u16(16).field("relativeTimestamp")? }
            }
            _ => {
                let len = rb.read_u8(8).field("len")?;
                Self::Other { additional_info_type, data: rb.read_bytes(usize::from(len)).field("data")? }
            }
        };
        Ok(info)
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.additional_info_type()).field("additionalInformationType")?;
        match self {
            Self::BusmonitorInfo {
                frame_error_flag,
                bit_error_flag,
                parity_error_flag,
                unknown_flag,
                lost_flag,
                sequence_number,
            } => {
                wb.write_u8(8, 1).field("len")?;
                wb.write_bit(*frame_error_flag).field("frameErrorFlag")?;
                wb.write_bit(*bit_error_flag).field("bitErrorFlag")?;
                wb.write_bit(*parity_error_flag).field("parityErrorFlag")?;
                wb.write_bit(*unknown_flag).field("unknownFlag")?;
                wb.write_bit(*lost_flag).field("lostFlag")?;
                wb.write_u8(3, *sequence_number).field("sequenceNumber")
            }
            Self::RelativeTimestamp { relative_timestamp } => {
                wb.write_u8(8, 2).field("len")?;
                wb.write_u16(16, *relative_timestamp).field("relativeTimestamp")
            }
            Self::Other { data, .. } => {
                wb.write_bits(8, implicit_length(data.len(), 8)?).field("len")?;
                wb.write_bytes(data).field("data")
            }
        }
    }

    fn length_in_bits(&self) -> usize {
        16 + match self {
            Self::BusmonitorInfo { .. } => 8,
            Self::RelativeTimestamp { .. } => 16,
            Self::Other { data, .. } => data.len() * 8,
        }
    }
}

/// Interface object property addressed by the `M_Prop*` services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyHeader {
    /// Interface object type
    pub interface_object_type: u16,
    /// Object instance
    pub object_instance: u8,
    /// Property id
    pub property_id: u8,
    /// Number of elements (4 bits)
    pub number_of_elements: u8,
    /// Start index (12 bits)
    pub start_index: u16,
}

impl PropertyHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = 6;
}

impl Codec for PropertyHeader {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self {
            interface_object_type: rb.read_u16(16).field("interfaceObjectType")?,
            object_instance: rb.read_u8(8).field("objectInstance")?,
            property_id: rb.read_u8(8).field("propertyId")?,
            number_of_elements: rb.read_u8(4).field("numberOfElements")?,
            start_index: rb.read_u16(12).field("startIndex")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u16(16, self.interface_object_type).field("interfaceObjectType")?;
        wb.write_u8(8, self.object_instance).field("objectInstance")?;
        wb.write_u8(8, self.property_id).field("propertyId")?;
        wb.write_u8(4, self.number_of_elements).field("numberOfElements")?;
        wb.write_u16(12, self.start_index).field("startIndex")
    }

    fn length_in_bits(&self) -> usize {
        Self::SIZE * 8
    }
}

/// Property header followed by property data
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyMessage {
    /// Addressed property
    pub header: PropertyHeader,
    /// Property data (`size - 7` bytes)
    pub data: RawPayload,
}

impl PropertyMessage {
    /// Read the header and the data that fills the rest of a `size` byte message.
    pub fn parse_sized(rb: &mut ReadBuffer<'_>, size: usize) -> Result<Self> {
        let header = PropertyHeader::parse(rb).field("propertyHeader")?;
        let count = remaining(size, 1 + PropertyHeader::SIZE).field("data")?;
        Ok(Self { header, data: rb.read_bytes(count).field("data")? })
    }

    /// Write the header and data.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.header.serialize(wb).field("propertyHeader")?;
        wb.write_bytes(&self.data).field("data")
    }

    /// Encoded size in bits.
    pub fn length_in_bits(&self) -> usize {
        self.header.length_in_bits() + self.data.len() * 8
    }
}
