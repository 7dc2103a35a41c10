//! KNXnet/IP frame parsing and encoding.
//!
//! Every KNXnet/IP datagram starts with a 6-byte header whose `msgType`
//! selects the service body and whose `totalLength` covers the whole frame.
//!
//! ## Frame Structure
//!
//! ```text
//! ┌─────────────────────────────┐
//! │  Header (6 bytes)           │
//! │  - Header Length: 0x06      │
//! │  - Protocol Version: 0x10   │
//! │  - Message Type: 2 bytes    │
//! │  - Total Length: 2 bytes    │
//! ├─────────────────────────────┤
//! │  Body (variable)            │
//! │  - Service-specific data    │
//! └─────────────────────────────┘
//! ```
//!
//! Both length fields are implicit: they are computed on write and, when
//! [`CodecOptions::validate_implicit_fields`](crate::codec::CodecOptions) is
//! set, checked against the parsed frame on read.
//!
//! ## Example
//!
//! ```
//! use knxnetip_codec::codec::Codec;
//! use knxnetip_codec::protocol::frame::KnxNetIpMessage;
//!
//! let data = [
//!     0x06, 0x10, 0x04, 0x21, 0x00, 0x0A, // header: TUNNELING_ACK, 10 bytes
//!     0x04, 0x15, 0x00, 0x00,             // channel 0x15, sequence 0, E_NO_ERROR
//! ];
//! let message = KnxNetIpMessage::from_bytes(&data)?;
//! assert_eq!(message.msg_type(), 0x0421);
//!
//! let mut buf = [0u8; 16];
//! let len = message.to_bytes(&mut buf)?;
//! assert_eq!(&buf[..len], &data);
//! # Ok::<(), knxnetip_codec::KnxError>(())
//! ```

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{check_implicit, implicit_length, read_const, Codec};
use crate::error::{FieldContext, KnxError, Result};
use crate::protocol::constants::{HEADER_SIZE_10, KNXNETIP_VERSION_10};
use crate::protocol::services::{
    ChannelRequest, ChannelResponse, ConnectedAck, ConnectedRequest, ConnectionRequest, ConnectionResponse,
    DescriptionRequest, DescriptionResponse, RoutingIndication, SearchRequest, SearchResponse, UnknownMessage,
};

/// KNXnet/IP frame header (6 bytes)
///
/// ```text
/// ┌──────────────┬──────────────┬─────────────────────┐
/// │ Header Len   │ Protocol Ver │  Message Type       │
/// │   (1 byte)   │   (1 byte)   │     (2 bytes)       │
/// ├──────────────┴──────────────┴─────────────────────┤
/// │           Total Length (2 bytes)                   │
/// └────────────────────────────────────────────────────┘
/// ```
///
/// The header can be parsed on its own to frame a datagram before the body is
/// decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnxNetIpHeader {
    /// Message type identifier
    pub msg_type: u16,
    /// Total length of frame (header + body)
    pub total_length: u16,
}

impl KnxNetIpHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = HEADER_SIZE_10 as usize;

    /// Get the expected body length from the header
    pub const fn body_length(&self) -> u16 {
        self.total_length.saturating_sub(Self::SIZE as u16)
    }
}

impl Codec for KnxNetIpHeader {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let header_length = rb.read_u8(8).field("headerLength")?;
        check_implicit(rb, u64::from(header_length), u64::from(HEADER_SIZE_10)).field("headerLength")?;
        read_const(rb, 8, u64::from(KNXNETIP_VERSION_10)).field("protocolVersion")?;
        let msg_type = rb.read_u16(16).field("msgType")?;
        let total_length = rb.read_u16(16).field("totalLength")?;
        if usize::from(total_length) < Self::SIZE {
            return Err(KnxError::length_mismatch()).field("totalLength");
        }
        Ok(Self { msg_type, total_length })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, HEADER_SIZE_10).field("headerLength")?;
        wb.write_u8(8, KNXNETIP_VERSION_10).field("protocolVersion")?;
        wb.write_u16(16, self.msg_type).field("msgType")?;
        wb.write_u16(16, self.total_length).field("totalLength")
    }

    fn length_in_bits(&self) -> usize {
        Self::SIZE * 8
    }
}

/// A complete KNXnet/IP message, selected by the header's message type
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnxNetIpMessage {
    /// `SEARCH_REQUEST` (0x0201)
    SearchRequest(SearchRequest),
    /// `SEARCH_RESPONSE` (0x0202)
    SearchResponse(SearchResponse),
    /// `DESCRIPTION_REQUEST` (0x0203)
    DescriptionRequest(DescriptionRequest),
    /// `DESCRIPTION_RESPONSE` (0x0204)
    DescriptionResponse(DescriptionResponse),
    /// `CONNECT_REQUEST` (0x0205)
    ConnectionRequest(ConnectionRequest),
    /// `CONNECT_RESPONSE` (0x0206)
    ConnectionResponse(ConnectionResponse),
    /// `CONNECTIONSTATE_REQUEST` (0x0207)
    ConnectionStateRequest(ChannelRequest),
    /// `CONNECTIONSTATE_RESPONSE` (0x0208)
    ConnectionStateResponse(ChannelResponse),
    /// `DISCONNECT_REQUEST` (0x0209)
    DisconnectRequest(ChannelRequest),
    /// `DISCONNECT_RESPONSE` (0x020A)
    DisconnectResponse(ChannelResponse),
    /// Message type 0x020B, body kept verbatim
    UnknownMessage(UnknownMessage),
    /// `DEVICE_CONFIGURATION_REQUEST` (0x0310)
    DeviceConfigurationRequest(ConnectedRequest),
    /// `DEVICE_CONFIGURATION_ACK` (0x0311)
    DeviceConfigurationAck(ConnectedAck),
    /// `TUNNELING_REQUEST` (0x0420)
    TunnelingRequest(ConnectedRequest),
    /// `TUNNELING_ACK` (0x0421)
    TunnelingResponse(ConnectedAck),
    /// `ROUTING_INDICATION` (0x0530)
    RoutingIndication(RoutingIndication),
}

impl KnxNetIpMessage {
    /// Message type of the variant.
    pub const fn msg_type(&self) -> u16 {
        match self {
            Self::SearchRequest(_) => 0x0201,
            Self::SearchResponse(_) => 0x0202,
            Self::DescriptionRequest(_) => 0x0203,
            Self::DescriptionResponse(_) => 0x0204,
            Self::ConnectionRequest(_) => 0x0205,
            Self::ConnectionResponse(_) => 0x0206,
            Self::ConnectionStateRequest(_) => 0x0207,
            Self::ConnectionStateResponse(_) => 0x0208,
            Self::DisconnectRequest(_) => 0x0209,
            Self::DisconnectResponse(_) => 0x020A,
            Self::UnknownMessage(_) => 0x020B,
            Self::DeviceConfigurationRequest(_) => 0x0310,
            Self::DeviceConfigurationAck(_) => 0x0311,
            Self::TunnelingRequest(_) => 0x0420,
            Self::TunnelingResponse(_) => 0x0421,
            Self::RoutingIndication(_) => 0x0530,
        }
    }

    /// Header describing this message.
    pub fn header(&self) -> Result<KnxNetIpHeader> {
        let total_length = implicit_length(self.length_in_bytes(), 16).field("totalLength")?;
        Ok(KnxNetIpHeader { msg_type: self.msg_type(), total_length: total_length as u16 })
    }

    /// Read the body announced by an already parsed `header`.
    pub fn parse_body(rb: &mut ReadBuffer<'_>, header: &KnxNetIpHeader) -> Result<Self> {
        let total_length = header.total_length;
        knx_log!(trace, "KNXnet/IP msgType {} totalLength {}", header.msg_type, total_length);
        let message = match header.msg_type {
            0x0201 => Self::SearchRequest(SearchRequest::parse(rb)?),
            0x0202 => Self::SearchResponse(SearchResponse::parse(rb)?),
            0x0203 => Self::DescriptionRequest(DescriptionRequest::parse(rb)?),
            0x0204 => Self::DescriptionResponse(DescriptionResponse::parse(rb)?),
            0x0205 => Self::ConnectionRequest(ConnectionRequest::parse(rb)?),
            0x0206 => Self::ConnectionResponse(ConnectionResponse::parse(rb)?),
            0x0207 => Self::ConnectionStateRequest(ChannelRequest::parse(rb)?),
            0x0208 => Self::ConnectionStateResponse(ChannelResponse::parse(rb)?),
            0x0209 => Self::DisconnectRequest(ChannelRequest::parse(rb)?),
            0x020A => Self::DisconnectResponse(ChannelResponse::parse(rb)?),
            0x020B => Self::UnknownMessage(UnknownMessage::parse_sized(rb, total_length)?),
            0x0310 => Self::DeviceConfigurationRequest(ConnectedRequest::parse_sized(rb, total_length)?),
            0x0311 => Self::DeviceConfigurationAck(ConnectedAck::parse(rb)?),
            0x0420 => Self::TunnelingRequest(ConnectedRequest::parse_sized(rb, total_length)?),
            0x0421 => Self::TunnelingResponse(ConnectedAck::parse(rb)?),
            0x0530 => Self::RoutingIndication(RoutingIndication::parse_sized(rb, total_length)?),
            other => {
                return Err(KnxError::unknown_discriminator(u32::from(other))).field("msgType");
            }
        };
        check_implicit(rb, u64::from(total_length), message.length_in_bytes() as u64).field("totalLength")?;
        Ok(message)
    }

    fn serialize_body(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        match self {
            Self::SearchRequest(body) => body.serialize(wb),
            Self::SearchResponse(body) => body.serialize(wb),
            Self::DescriptionRequest(body) => body.serialize(wb),
            Self::DescriptionResponse(body) => body.serialize(wb),
            Self::ConnectionRequest(body) => body.serialize(wb),
            Self::ConnectionResponse(body) => body.serialize(wb),
            Self::ConnectionStateRequest(body) | Self::DisconnectRequest(body) => body.serialize(wb),
            Self::ConnectionStateResponse(body) | Self::DisconnectResponse(body) => body.serialize(wb),
            Self::UnknownMessage(body) => body.serialize(wb),
            Self::DeviceConfigurationRequest(body) | Self::TunnelingRequest(body) => body.serialize(wb),
            Self::DeviceConfigurationAck(body) | Self::TunnelingResponse(body) => body.serialize(wb),
            Self::RoutingIndication(body) => body.serialize(wb),
        }
    }

    fn body_length_in_bits(&self) -> usize {
        match self {
            Self::SearchRequest(body) => body.length_in_bits(),
            Self::SearchResponse(body) => body.length_in_bits(),
            Self::DescriptionRequest(body) => body.length_in_bits(),
            Self::DescriptionResponse(body) => body.length_in_bits(),
            Self::ConnectionRequest(body) => body.length_in_bits(),
            Self::ConnectionResponse(body) => body.length_in_bits(),
            Self::ConnectionStateRequest(body) | Self::DisconnectRequest(body) => body.length_in_bits(),
            Self::ConnectionStateResponse(body) | Self::DisconnectResponse(body) => body.length_in_bits(),
            Self::UnknownMessage(body) => body.length_in_bits(),
            Self::DeviceConfigurationRequest(body) | Self::TunnelingRequest(body) => body.length_in_bits(),
            Self::DeviceConfigurationAck(body) | Self::TunnelingResponse(body) => body.length_in_bits(),
            Self::RoutingIndication(body) => body.length_in_bits(),
        }
    }
}

impl Codec for KnxNetIpMessage {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let header = KnxNetIpHeader::parse(rb)?;
        Self::parse_body(rb, &header)
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.header()?.serialize(wb)?;
        self.serialize_body(wb)
    }

    fn length_in_bits(&self) -> usize {
        KnxNetIpHeader::SIZE * 8 + self.body_length_in_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecOptions;
    use crate::protocol::blocks::Hpai;
    use crate::protocol::constants::Status;

    #[test]
    fn test_header_parse() {
        let data = [
            0x06, // header length
            0x10, // protocol version
            0x02, 0x01, // msg type (SEARCH_REQUEST)
            0x00, 0x0E, // total length (14 bytes)
        ];

        let header = KnxNetIpHeader::from_bytes(&data).unwrap();
        assert_eq!(header.msg_type, 0x0201);
        assert_eq!(header.total_length, 14);
        assert_eq!(header.body_length(), 8);
    }

    #[test]
    fn test_header_encode() {
        let header = KnxNetIpHeader { msg_type: 0x0201, total_length: 14 };
        let mut buf = [0u8; 6];
        let size = header.to_bytes(&mut buf).unwrap();

        assert_eq!(size, 6);
        assert_eq!(buf, [0x06, 0x10, 0x02, 0x01, 0x00, 0x0E]);
    }

    #[test]
    fn test_header_bad_version() {
        let err = KnxNetIpHeader::from_bytes(&[0x06, 0x20, 0x02, 0x01, 0x00, 0x0E]).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert!(codec.is_const_mismatch());
        assert_eq!(codec.field(), Some("protocolVersion"));
    }

    #[test]
    fn test_header_bad_header_length() {
        let data = [0x08, 0x10, 0x02, 0x01, 0x00, 0x0E];
        let err = KnxNetIpHeader::from_bytes(&data).unwrap_err();
        assert_eq!(err.as_codec().unwrap().field(), Some("headerLength"));

        let options = CodecOptions::default().with_validation(false);
        assert!(KnxNetIpHeader::parse(&mut ReadBuffer::with_options(&data, options)).is_ok());
    }

    #[test]
    fn test_total_length_below_header() {
        let err = KnxNetIpHeader::from_bytes(&[0x06, 0x10, 0x02, 0x01, 0x00, 0x05]).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert!(codec.is_length_mismatch());
        assert_eq!(codec.field(), Some("totalLength"));
    }

    #[test]
    fn test_search_request() {
        let data = [
            0x06, 0x10, 0x02, 0x01, 0x00, 0x0E, // header
            0x08, 0x01, 192, 168, 1, 100, 0x0E, 0x57, // discovery endpoint
        ];
        let message = KnxNetIpMessage::from_bytes(&data).unwrap();
        assert_eq!(
            message,
            KnxNetIpMessage::SearchRequest(SearchRequest { discovery_endpoint: Hpai::new([192, 168, 1, 100], 3671) })
        );
        assert_eq!(message.length_in_bytes(), 14);
    }

    #[test]
    fn test_total_length_mismatch() {
        let data = [0x06, 0x10, 0x02, 0x08, 0x00, 0x09, 0x15, 0x00];
        let err = KnxNetIpMessage::from_bytes(&data).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert!(codec.is_length_mismatch());
        assert_eq!(codec.field(), Some("totalLength"));
    }

    #[test]
    fn test_unknown_msg_type() {
        let data = [0x06, 0x10, 0x09, 0x99, 0x00, 0x06];
        let err = KnxNetIpMessage::from_bytes(&data).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert_eq!(codec.discriminator(), Some(0x0999));
        assert_eq!(codec.field(), Some("msgType"));
    }

    #[test]
    fn test_serialize_computes_lengths() {
        let message = KnxNetIpMessage::DisconnectResponse(ChannelResponse {
            communication_channel_id: 0x15,
            status: Status::NoError,
        });
        let mut buf = [0u8; 16];
        let len = message.to_bytes(&mut buf).unwrap();
        assert_eq!(&buf[..len], &[0x06, 0x10, 0x02, 0x0A, 0x00, 0x08, 0x15, 0x00]);
        assert_eq!(message.header().unwrap().body_length(), 2);
    }

    #[test]
    fn test_serialize_buffer_too_small() {
        let message = KnxNetIpMessage::DisconnectResponse(ChannelResponse {
            communication_channel_id: 0x15,
            status: Status::NoError,
        });
        let mut buf = [0u8; 7];
        let err = message.to_bytes(&mut buf).unwrap_err();
        assert!(err.as_codec().unwrap().is_buffer_too_small());
    }
}
