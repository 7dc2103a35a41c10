//! KNXnet/IP service bodies.
//!
//! One type per service. Each body follows the 6-byte KNXnet/IP header and is
//! wrapped by [`KnxNetIpMessage`](crate::protocol::frame::KnxNetIpMessage),
//! which supplies the header.
//!
//! ## Protocol Flow
//!
//! ```text
//! Client                          Gateway
//!   |                                |
//!   |------- SEARCH_REQUEST -------->|
//!   |<------ SEARCH_RESPONSE --------|
//!   |                                |
//!   |------- CONNECT_REQUEST ------->|
//!   |<------ CONNECT_RESPONSE -------|
//!   |                                |
//!   |------ TUNNELING_REQUEST ------>|
//!   |<------ TUNNELING_ACK ----------|
//!   |                                |
//!   |--- CONNECTIONSTATE_REQUEST --->|
//!   |<-- CONNECTIONSTATE_RESPONSE ---|
//!   |                                |
//!   |------ DISCONNECT_REQUEST ----->|
//!   |<----- DISCONNECT_RESPONSE -----|
//! ```
//!
//! Bodies that end in a cEMI message take the header's `totalLength` to size
//! it and expose an inherent `parse_sized` instead of [`Codec::parse`].

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{read_reserved, write_reserved, Codec};
use crate::error::{FieldContext, KnxError, Result};
use crate::protocol::blocks::{
    ConnectionAck, ConnectionHeader, ConnectionRequestInformation, ConnectionResponseDataBlock, DibDeviceInfo,
    DibSuppSvcFamilies, Hpai,
};
use crate::protocol::cemi::{Cemi, RawPayload};
use crate::protocol::constants::{Status, HEADER_SIZE_10};

/// Size of the cEMI message that fills a `total_length` message after `offset` body bytes.
fn cemi_size(total_length: u16, offset: usize) -> Result<usize> {
    usize::from(total_length)
        .checked_sub(usize::from(HEADER_SIZE_10) + offset)
        .ok_or_else(KnxError::length_mismatch)
}

/// `SEARCH_REQUEST` (0x0201)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchRequest {
    /// Where responses should be sent
    pub discovery_endpoint: Hpai,
}

impl Codec for SearchRequest {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self { discovery_endpoint: Hpai::parse(rb).field("hpaiIDiscoveryEndpoint")? })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.discovery_endpoint.serialize(wb).field("hpaiIDiscoveryEndpoint")
    }

    fn length_in_bits(&self) -> usize {
        self.discovery_endpoint.length_in_bits()
    }
}

/// `SEARCH_RESPONSE` (0x0202)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResponse {
    /// Control endpoint of the responding server
    pub control_endpoint: Hpai,
    /// Device description
    pub device_info: DibDeviceInfo,
    /// Supported service families
    pub supported_service_families: DibSuppSvcFamilies,
}

impl Codec for SearchResponse {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self {
            control_endpoint: Hpai::parse(rb).field("hpaiControlEndpoint")?,
            device_info: DibDeviceInfo::parse(rb).field("dibDeviceInfo")?,
            supported_service_families: DibSuppSvcFamilies::parse(rb).field("dibSuppSvcFamilies")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.control_endpoint.serialize(wb).field("hpaiControlEndpoint")?;
        self.device_info.serialize(wb).field("dibDeviceInfo")?;
        self.supported_service_families.serialize(wb).field("dibSuppSvcFamilies")
    }

    fn length_in_bits(&self) -> usize {
        self.control_endpoint.length_in_bits()
            + self.device_info.length_in_bits()
            + self.supported_service_families.length_in_bits()
    }
}

/// `DESCRIPTION_REQUEST` (0x0203)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptionRequest {
    /// Where the response should be sent
    pub control_endpoint: Hpai,
}

impl Codec for DescriptionRequest {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self { control_endpoint: Hpai::parse(rb).field("hpaiControlEndpoint")? })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.control_endpoint.serialize(wb).field("hpaiControlEndpoint")
    }

    fn length_in_bits(&self) -> usize {
        self.control_endpoint.length_in_bits()
    }
}

/// `DESCRIPTION_RESPONSE` (0x0204)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptionResponse {
    /// Device description
    pub device_info: DibDeviceInfo,
    /// Supported service families
    pub supported_service_families: DibSuppSvcFamilies,
}

impl Codec for DescriptionResponse {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self {
            device_info: DibDeviceInfo::parse(rb).field("dibDeviceInfo")?,
            supported_service_families: DibSuppSvcFamilies::parse(rb).field("dibSuppSvcFamilies")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.device_info.serialize(wb).field("dibDeviceInfo")?;
        self.supported_service_families.serialize(wb).field("dibSuppSvcFamilies")
    }

    fn length_in_bits(&self) -> usize {
        self.device_info.length_in_bits() + self.supported_service_families.length_in_bits()
    }
}

/// `CONNECT_REQUEST` (0x0205)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionRequest {
    /// Control endpoint (for connection management)
    pub discovery_endpoint: Hpai,
    /// Data endpoint (for tunneling data)
    pub data_endpoint: Hpai,
    /// Requested connection
    pub connection_request_information: ConnectionRequestInformation,
}

impl ConnectionRequest {
    /// Request a link layer tunnel.
    pub const fn tunnel(discovery_endpoint: Hpai, data_endpoint: Hpai) -> Self {
        Self {
            discovery_endpoint,
            data_endpoint,
            connection_request_information: ConnectionRequestInformation::tunnel_link_layer(),
        }
    }
}

impl Codec for ConnectionRequest {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self {
            discovery_endpoint: Hpai::parse(rb).field("hpaiDiscoveryEndpoint")?,
            data_endpoint: Hpai::parse(rb).field("hpaiDataEndpoint")?,
            connection_request_information: ConnectionRequestInformation::parse(rb)
                .field("connectionRequestInformation")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.discovery_endpoint.serialize(wb).field("hpaiDiscoveryEndpoint")?;
        self.data_endpoint.serialize(wb).field("hpaiDataEndpoint")?;
        self.connection_request_information.serialize(wb).field("connectionRequestInformation")
    }

    fn length_in_bits(&self) -> usize {
        self.discovery_endpoint.length_in_bits()
            + self.data_endpoint.length_in_bits()
            + self.connection_request_information.length_in_bits()
    }
}

/// Endpoint and connection data of a successful `CONNECT_RESPONSE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionResponseData {
    /// Data endpoint of the server
    pub data_endpoint: Hpai,
    /// Connection details, e.g. the assigned tunnel address
    pub connection_response_data_block: ConnectionResponseDataBlock,
}

/// `CONNECT_RESPONSE` (0x0206)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionResponse {
    /// Assigned communication channel
    pub communication_channel_id: u8,
    /// Outcome of the request
    pub status: Status,
    /// Present exactly when `status` is [`Status::NoError`]; serializing
    /// any other combination fails with an inconsistent-fields error
    pub data: Option<ConnectionResponseData>,
}

impl ConnectionResponse {
    /// Successful response assigning `communication_channel_id`.
    pub const fn accepted(communication_channel_id: u8, data: ConnectionResponseData) -> Self {
        Self { communication_channel_id, status: Status::NoError, data: Some(data) }
    }

    /// Refusal with an error `status`.
    pub const fn rejected(communication_channel_id: u8, status: Status) -> Self {
        Self { communication_channel_id, status, data: None }
    }
}

impl Codec for ConnectionResponse {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let communication_channel_id = rb.read_u8(8).field("communicationChannelId")?;
        let status = Status::parse(rb).field("status")?;
        let data = if status == Status::NoError {
            Some(ConnectionResponseData {
                data_endpoint: Hpai::parse(rb).field("hpaiDataEndpoint")?,
                connection_response_data_block: ConnectionResponseDataBlock::parse(rb)
                    .field("connectionResponseDataBlock")?,
            })
        } else {
            None
        };
        Ok(Self { communication_channel_id, status, data })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        if self.data.is_some() != (self.status == Status::NoError) {
            return Err(KnxError::inconsistent_fields().with_field("data"));
        }
        wb.write_u8(8, self.communication_channel_id).field("communicationChannelId")?;
        self.status.serialize(wb).field("status")?;
        if let Some(data) = &self.data {
            data.data_endpoint.serialize(wb).field("hpaiDataEndpoint")?;
            data.connection_response_data_block.serialize(wb).field("connectionResponseDataBlock")?;
        }
        Ok(())
    }

    fn length_in_bits(&self) -> usize {
        16 + self.data.as_ref().map_or(0, |data| {
            data.data_endpoint.length_in_bits() + data.connection_response_data_block.length_in_bits()
        })
    }
}

/// `CONNECTIONSTATE_REQUEST` (0x0207) and `DISCONNECT_REQUEST` (0x0209) body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelRequest {
    /// Communication channel
    pub communication_channel_id: u8,
    /// Control endpoint of the client
    pub control_endpoint: Hpai,
}

impl ChannelRequest {
    /// Request for `communication_channel_id` answered at `control_endpoint`.
    pub const fn new(communication_channel_id: u8, control_endpoint: Hpai) -> Self {
        Self { communication_channel_id, control_endpoint }
    }
}

impl Codec for ChannelRequest {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let communication_channel_id = rb.read_u8(8).field("communicationChannelId")?;
        read_reserved(rb, 8, 0).field("reserved")?;
        let control_endpoint = Hpai::parse(rb).field("hpaiControlEndpoint")?;
        Ok(Self { communication_channel_id, control_endpoint })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.communication_channel_id).field("communicationChannelId")?;
        write_reserved(wb, 8, 0).field("reserved")?;
        self.control_endpoint.serialize(wb).field("hpaiControlEndpoint")
    }

    fn length_in_bits(&self) -> usize {
        16 + self.control_endpoint.length_in_bits()
    }
}

/// `CONNECTIONSTATE_RESPONSE` (0x0208) and `DISCONNECT_RESPONSE` (0x020A) body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelResponse {
    /// Communication channel
    pub communication_channel_id: u8,
    /// Outcome of the request
    pub status: Status,
}

impl Codec for ChannelResponse {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self {
            communication_channel_id: rb.read_u8(8).field("communicationChannelId")?,
            status: Status::parse(rb).field("status")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.communication_channel_id).field("communicationChannelId")?;
        self.status.serialize(wb).field("status")
    }

    fn length_in_bits(&self) -> usize {
        16
    }
}

/// `TUNNELING_REQUEST` (0x0420) and `DEVICE_CONFIGURATION_REQUEST` (0x0310) body
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectedRequest {
    /// Channel and sequence number
    pub connection_header: ConnectionHeader,
    /// Carried cEMI message
    pub cemi: Cemi,
}

impl ConnectedRequest {
    /// Request carrying `cemi` on `channel_id`.
    pub fn new(channel_id: u8, sequence_counter: u8, cemi: Cemi) -> Self {
        Self { connection_header: ConnectionHeader { channel_id, sequence_counter }, cemi }
    }

    /// Read the body of a message of `total_length` bytes.
    pub fn parse_sized(rb: &mut ReadBuffer<'_>, total_length: u16) -> Result<Self> {
        let connection_header = ConnectionHeader::parse(rb).field("connectionHeader")?;
        let size = cemi_size(total_length, connection_header.length_in_bytes()).field("cemi")?;
        let cemi = Cemi::parse(rb, size).field("cemi")?;
        Ok(Self { connection_header, cemi })
    }

    /// Write the body.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.connection_header.serialize(wb).field("connectionHeader")?;
        self.cemi.serialize(wb).field("cemi")
    }

    /// Encoded size in bits.
    pub fn length_in_bits(&self) -> usize {
        self.connection_header.length_in_bits() + self.cemi.length_in_bits()
    }
}

/// `TUNNELING_ACK` (0x0421) and `DEVICE_CONFIGURATION_ACK` (0x0311) body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectedAck {
    /// Acknowledged channel, sequence number and status
    pub connection_ack: ConnectionAck,
}

impl ConnectedAck {
    /// Positive acknowledgement of `sequence_counter`.
    pub const fn ok(channel_id: u8, sequence_counter: u8) -> Self {
        Self { connection_ack: ConnectionAck { channel_id, sequence_counter, status: Status::NoError } }
    }
}

impl Codec for ConnectedAck {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self { connection_ack: ConnectionAck::parse(rb).field("connectionAck")? })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.connection_ack.serialize(wb).field("connectionAck")
    }

    fn length_in_bits(&self) -> usize {
        self.connection_ack.length_in_bits()
    }
}

/// `ROUTING_INDICATION` (0x0530)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingIndication {
    /// Routed cEMI message
    pub cemi: Cemi,
}

impl RoutingIndication {
    /// Read the body of a message of `total_length` bytes.
    pub fn parse_sized(rb: &mut ReadBuffer<'_>, total_length: u16) -> Result<Self> {
        let size = cemi_size(total_length, 0).field("cemi")?;
        Ok(Self { cemi: Cemi::parse(rb, size).field("cemi")? })
    }

    /// Write the body.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.cemi.serialize(wb).field("cemi")
    }

    /// Encoded size in bits.
    pub fn length_in_bits(&self) -> usize {
        self.cemi.length_in_bits()
    }
}

/// Body of a message type without a structured layout
///
/// At most [`MAX_RAW_DATA`](crate::protocol::constants::MAX_RAW_DATA) bytes
/// are kept; a longer body is a capacity error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnknownMessage {
    /// `totalLength - 6` bytes
    pub unknown_data: RawPayload,
}

impl UnknownMessage {
    /// Read the body of a message of `total_length` bytes.
    pub fn parse_sized(rb: &mut ReadBuffer<'_>, total_length: u16) -> Result<Self> {
        let count = cemi_size(total_length, 0).field("unknownData")?;
        Ok(Self { unknown_data: rb.read_bytes(count).field("unknownData")? })
    }

    /// Write the body.
    pub fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_bytes(&self.unknown_data).field("unknownData")
    }

    /// Encoded size in bits.
    pub fn length_in_bits(&self) -> usize {
        self.unknown_data.len() * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::IndividualAddress;
    use crate::protocol::constants::{KnxLayer, MAX_RAW_DATA};

    #[test]
    fn test_connect_request_build() {
        let control = Hpai::new([192, 168, 1, 100], 3671);
        let request = ConnectionRequest::tunnel(control, control);

        let mut buf = [0u8; 32];
        let len = request.to_bytes(&mut buf).unwrap();
        assert_eq!(len, 20);
        assert_eq!(&buf[16..20], &[0x04, 0x04, 0x02, 0x00]);
        assert_eq!(
            request.connection_request_information,
            ConnectionRequestInformation::TunnelConnection { knx_layer: KnxLayer::TunnelLinkLayer }
        );
        assert_eq!(ConnectionRequest::from_bytes(&buf[..len]).unwrap(), request);
    }

    #[test]
    fn test_connect_response_success() {
        let data = [
            0x15, 0x00, // channel 0x15, E_NO_ERROR
            0x08, 0x01, 192, 168, 1, 10, 0x0E, 0x57, // data endpoint
            0x04, 0x04, 0x11, 0xFF, // tunnel address 1.1.255
        ];
        let response = ConnectionResponse::from_bytes(&data).unwrap();
        assert_eq!(response.communication_channel_id, 0x15);
        let body = response.data.unwrap();
        assert_eq!(body.data_endpoint.ip_address, [192, 168, 1, 10]);
        assert_eq!(
            body.connection_response_data_block,
            ConnectionResponseDataBlock::TunnelConnection { knx_address: IndividualAddress::new(1, 1, 255).unwrap() }
        );
        assert_eq!(response.length_in_bytes(), data.len());
    }

    #[test]
    fn test_connect_response_error_has_no_body() {
        let response = ConnectionResponse::from_bytes(&[0x00, 0x24]).unwrap();
        assert_eq!(response.status, Status::NoMoreConnections);
        assert_eq!(response.data, None);
        assert_eq!(response.length_in_bytes(), 2);
    }

    #[test]
    fn test_connect_response_rejects_missing_body() {
        let response = ConnectionResponse {
            communication_channel_id: 1,
            status: Status::NoError,
            data: None,
        };
        let mut buf = [0u8; 16];
        let err = response.to_bytes(&mut buf).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert!(codec.is_inconsistent_fields());
        assert_eq!(codec.field(), Some("data"));
    }

    #[test]
    fn test_connect_response_rejects_body_on_error_status() {
        let data = ConnectionResponseData {
            data_endpoint: Hpai::nat(),
            connection_response_data_block: ConnectionResponseDataBlock::DeviceManagement,
        };
        let response = ConnectionResponse { status: Status::NoMoreConnections, ..ConnectionResponse::accepted(1, data) };
        let mut buf = [0u8; 16];
        let err = response.to_bytes(&mut buf).unwrap_err();
        assert!(err.as_codec().unwrap().is_inconsistent_fields());

        let mut buf = [0u8; 2];
        let rejected = ConnectionResponse::rejected(1, Status::NoMoreConnections);
        assert_eq!(rejected.to_bytes(&mut buf).unwrap(), 2);
        assert_eq!(buf, [0x01, 0x24]);
    }

    #[test]
    fn test_channel_request() {
        let request = ChannelRequest::new(0x15, Hpai::nat());
        let mut buf = [0u8; 10];
        assert_eq!(request.to_bytes(&mut buf).unwrap(), 10);
        assert_eq!(&buf[..4], &[0x15, 0x00, 0x08, 0x01]);
        assert_eq!(ChannelRequest::from_bytes(&buf).unwrap(), request);
    }

    #[test]
    fn test_channel_response() {
        let response = ChannelResponse::from_bytes(&[0x15, 0x21]).unwrap();
        assert_eq!(response.status, Status::InvalidConnectionId);
    }

    #[test]
    fn test_tunneling_ack() {
        let ack = ConnectedAck::ok(0x15, 3);
        let mut buf = [0u8; 4];
        ack.to_bytes(&mut buf).unwrap();
        assert_eq!(buf, [0x04, 0x15, 0x03, 0x00]);
    }

    #[test]
    fn test_tunneling_request_sized() {
        let body = [
            0x04, 0x15, 0x00, 0x00, // connection header
            0x11, 0x00, 0xBC, 0xE0, 0x11, 0x01, 0x0A, 0x03, 0x01, 0x00, 0x81, // L_Data.req
        ];
        let total = (6 + body.len()) as u16;
        let request = ConnectedRequest::parse_sized(&mut ReadBuffer::new(&body), total).unwrap();
        assert_eq!(request.connection_header.channel_id, 0x15);
        assert!(request.cemi.as_ldata().unwrap().is_group_write());
        assert_eq!(request.length_in_bits(), body.len() * 8);
    }

    #[test]
    fn test_tunneling_request_total_length_too_small() {
        let body = [0x04, 0x15, 0x00, 0x00, 0x11];
        let err = ConnectedRequest::parse_sized(&mut ReadBuffer::new(&body), 8).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert!(codec.is_length_mismatch());
        assert_eq!(codec.field(), Some("cemi"));
    }

    #[test]
    fn test_unknown_message() {
        let body = [0xAA, 0xBB];
        let msg = UnknownMessage::parse_sized(&mut ReadBuffer::new(&body), 8).unwrap();
        assert_eq!(msg.unknown_data.as_slice(), &body);
    }

    #[test]
    fn test_unknown_message_capacity() {
        let body = [0x55; MAX_RAW_DATA + 1];
        let msg = UnknownMessage::parse_sized(&mut ReadBuffer::new(&body), (6 + MAX_RAW_DATA) as u16).unwrap();
        assert_eq!(msg.unknown_data.len(), MAX_RAW_DATA);

        let err = UnknownMessage::parse_sized(&mut ReadBuffer::new(&body), (7 + MAX_RAW_DATA) as u16).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert!(codec.is_capacity_exceeded());
        assert_eq!(codec.field(), Some("unknownData"));
    }
}
