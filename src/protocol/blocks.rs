//! Self-describing structures carried in KNXnet/IP service bodies.
//!
//! Every block starts with its own length byte. The length is never stored:
//! it is computed from the block contents on write and, when validation is
//! enabled, compared against the contents on read.
//!
//! ```text
//! ┌──────────────┬───────────────────────────────┐
//! │ Structure Len│ Block specific fields ...     │
//! │   (1 byte)   │                               │
//! └──────────────┴───────────────────────────────┘
//! ```

use crate::addressing::IndividualAddress;
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{
    array_length_in_bits, check_implicit, implicit_length, read_length_array, read_reserved, write_array,
    write_reserved, Codec,
};
use crate::error::{FieldContext, KnxError, Result};
use crate::protocol::constants::{
    HostProtocolCode, KnxLayer, KnxMedium, Status, DEVICE_MGMT_CONNECTION, KNXNETIP_DEFAULT_PORT,
    MAX_SERVICE_FAMILIES, TUNNEL_CONNECTION,
};
use crate::protocol::service_id::ServiceId;

/// Read the leading length byte of a block.
#[inline]
fn read_structure_length(rb: &mut ReadBuffer<'_>) -> Result<u8> {
    rb.read_u8(8).field("structureLength")
}

/// Write the leading length byte of a block of `length` bytes.
#[inline]
fn write_structure_length(wb: &mut WriteBuffer<'_>, length: usize) -> Result<()> {
    wb.write_bits(8, implicit_length(length, 8)?).field("structureLength")
}

/// Check a received length byte against the parsed block.
#[inline]
fn check_structure_length<T: Codec>(rb: &ReadBuffer<'_>, received: u8, block: &T) -> Result<()> {
    check_implicit(rb, u64::from(received), block.length_in_bytes() as u64).field("structureLength")
}

/// Host Protocol Address Information (HPAI)
///
/// Structure containing endpoint information (IP address and port).
///
/// ```text
/// ┌──────────────┬──────────────┬─────────────────────┐
/// │ Structure Len│ Host Protocol│   IP Address        │
/// │   (1 byte)   │   (1 byte)   │   (4 bytes IPv4)    │
/// ├──────────────┴──────────────┴─────────────────────┤
/// │                Port (2 bytes)                      │
/// └────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hpai {
    /// Host protocol code
    pub host_protocol: HostProtocolCode,
    /// IPv4 address (4 bytes)
    pub ip_address: [u8; 4],
    /// UDP or TCP port
    pub port: u16,
}

impl Hpai {
    /// Size of HPAI structure for IPv4
    pub const SIZE: usize = 8;

    /// Create a new HPAI for IPv4 UDP
    pub const fn new(ip_address: [u8; 4], port: u16) -> Self {
        Self {
            host_protocol: HostProtocolCode::Ipv4Udp,
            ip_address,
            port,
        }
    }

    /// The "route back" endpoint 0.0.0.0:0 used behind NAT
    pub const fn nat() -> Self {
        Self::new([0, 0, 0, 0], 0)
    }
}

impl Default for Hpai {
    fn default() -> Self {
        Self::new([0, 0, 0, 0], KNXNETIP_DEFAULT_PORT)
    }
}

impl Codec for Hpai {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let structure_length = read_structure_length(rb)?;
        let hpai = Self {
            host_protocol: HostProtocolCode::parse(rb).field("hostProtocolCode")?,
            ip_address: rb.read_array().field("ipAddress")?,
            port: rb.read_u16(16).field("ipPort")?,
        };
        check_structure_length(rb, structure_length, &hpai)?;
        Ok(hpai)
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        write_structure_length(wb, Self::SIZE)?;
        self.host_protocol.serialize(wb).field("hostProtocolCode")?;
        wb.write_bytes(&self.ip_address).field("ipAddress")?;
        wb.write_u16(16, self.port).field("ipPort")
    }

    fn length_in_bits(&self) -> usize {
        Self::SIZE * 8
    }
}

/// Device status flags of a device information DIB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceStatus {
    /// Device is in programming mode
    pub program_mode: bool,
}

impl Codec for DeviceStatus {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        read_reserved(rb, 7, 0).field("reserved")?;
        Ok(Self { program_mode: rb.read_bit().field("programMode")? })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        write_reserved(wb, 7, 0).field("reserved")?;
        wb.write_bit(self.program_mode).field("programMode")
    }

    fn length_in_bits(&self) -> usize {
        8
    }
}

/// ETS project and installation a device belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectInstallationIdentifier {
    /// Project number
    pub project_number: u8,
    /// Installation number
    pub installation_number: u8,
}

impl Codec for ProjectInstallationIdentifier {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        Ok(Self {
            project_number: rb.read_u8(8).field("projectNumber")?,
            installation_number: rb.read_u8(8).field("installationNumber")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.project_number).field("projectNumber")?;
        wb.write_u8(8, self.installation_number).field("installationNumber")
    }

    fn length_in_bits(&self) -> usize {
        16
    }
}

/// Device information DIB (54 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DibDeviceInfo {
    /// Description type code (`DEVICE_INFO` = 0x01)
    pub description_type: u8,
    /// Medium the device is attached to
    pub knx_medium: KnxMedium,
    /// Device status flags
    pub device_status: DeviceStatus,
    /// Individual address of the device
    pub knx_address: IndividualAddress,
    /// Project installation identifier
    pub project_installation_identifier: ProjectInstallationIdentifier,
    /// KNX serial number
    pub serial_number: [u8; 6],
    /// Routing multicast address
    pub multicast_address: [u8; 4],
    /// MAC address
    pub mac_address: [u8; 6],
    /// Friendly name, ISO 8859-1, zero padded
    pub friendly_name: [u8; 30],
}

impl DibDeviceInfo {
    /// Size of the DIB in bytes
    pub const SIZE: usize = 54;

    /// Description type code of this DIB
    pub const DESCRIPTION_TYPE: u8 = 0x01;

    /// Friendly name up to the first zero byte.
    ///
    /// Returns `None` if the name is not ASCII.
    pub fn friendly_name_str(&self) -> Option<&str> {
        let end = self.friendly_name.iter().position(|&b| b == 0).unwrap_or(self.friendly_name.len());
        let name = &self.friendly_name[..end];
        if name.is_ascii() {
            core::str::from_utf8(name).ok()
        } else {
            None
        }
    }
}

impl Codec for DibDeviceInfo {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let structure_length = read_structure_length(rb)?;
        let dib = Self {
            description_type: rb.read_u8(8).field("descriptionType")?,
            knx_medium: KnxMedium::parse(rb).field("knxMedium")?,
            device_status: DeviceStatus::parse(rb).field("deviceStatus")?,
            knx_address: IndividualAddress::parse(rb).field("knxAddress")?,
            project_installation_identifier: ProjectInstallationIdentifier::parse(rb)
                .field("projectInstallationIdentifier")?,
            serial_number: rb.read_array().field("knxNetIpDeviceSerialNumber")?,
            multicast_address: rb.read_array().field("knxNetIpDeviceMulticastAddress")?,
            mac_address: rb.read_array().field("knxNetIpDeviceMacAddress")?,
            friendly_name: rb.read_array().field("deviceFriendlyName")?,
        };
        check_structure_length(rb, structure_length, &dib)?;
        Ok(dib)
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        write_structure_length(wb, Self::SIZE)?;
        wb.write_u8(8, self.description_type).field("descriptionType")?;
        self.knx_medium.serialize(wb).field("knxMedium")?;
        self.device_status.serialize(wb).field("deviceStatus")?;
        self.knx_address.serialize(wb).field("knxAddress")?;
        self.project_installation_identifier
            .serialize(wb)
            .field("projectInstallationIdentifier")?;
        wb.write_bytes(&self.serial_number).field("knxNetIpDeviceSerialNumber")?;
        wb.write_bytes(&self.multicast_address).field("knxNetIpDeviceMulticastAddress")?;
        wb.write_bytes(&self.mac_address).field("knxNetIpDeviceMacAddress")?;
        wb.write_bytes(&self.friendly_name).field("deviceFriendlyName")
    }

    fn length_in_bits(&self) -> usize {
        Self::SIZE * 8
    }
}

/// Supported service families DIB
///
/// The family list has no count of its own: it fills the block up to its
/// structure length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DibSuppSvcFamilies {
    /// Description type code (`SUPP_SVC_FAMILIES` = 0x02)
    pub description_type: u8,
    /// Service families and their versions
    pub service_ids: heapless::Vec<ServiceId, MAX_SERVICE_FAMILIES>,
}

impl DibSuppSvcFamilies {
    /// Description type code of this DIB
    pub const DESCRIPTION_TYPE: u8 = 0x02;
}

impl Codec for DibSuppSvcFamilies {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let structure_length = read_structure_length(rb)?;
        let description_type = rb.read_u8(8).field("descriptionType")?;
        let body = usize::from(structure_length)
            .checked_sub(2)
            .ok_or_else(KnxError::length_mismatch)
            .field("structureLength")?;
        Ok(Self {
            description_type,
            service_ids: read_length_array(rb, body).field("serviceIds")?,
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        write_structure_length(wb, self.length_in_bytes())?;
        wb.write_u8(8, self.description_type).field("descriptionType")?;
        write_array(wb, &self.service_ids).field("serviceIds")
    }

    fn length_in_bits(&self) -> usize {
        16 + array_length_in_bits(&self.service_ids)
    }
}

/// Connection Request Information (CRI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionRequestInformation {
    /// `DEVICE_MGMT_CONNECTION` (0x03)
    DeviceManagement,
    /// `TUNNEL_CONNECTION` (0x04)
    TunnelConnection {
        /// Requested tunnelling layer
        knx_layer: KnxLayer,
    },
}

impl ConnectionRequestInformation {
    /// CRI for a link layer tunnel
    pub const fn tunnel_link_layer() -> Self {
        Self::TunnelConnection { knx_layer: KnxLayer::TunnelLinkLayer }
    }

    /// Connection type code of the variant.
    pub const fn connection_type(&self) -> u8 {
        match self {
            Self::DeviceManagement => DEVICE_MGMT_CONNECTION,
            Self::TunnelConnection { .. } => TUNNEL_CONNECTION,
        }
    }
}

impl Codec for ConnectionRequestInformation {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let structure_length = read_structure_length(rb)?;
        let connection_type = rb.read_u8(8).field("connectionType")?;
        knx_log!(trace, "CRI connection type {}", connection_type);
        let cri = match connection_type {
            DEVICE_MGMT_CONNECTION => Self::DeviceManagement,
            TUNNEL_CONNECTION => {
                let knx_layer = KnxLayer::parse(rb).field("knxLayer")?;
                read_reserved(rb, 8, 0).field("reserved")?;
                Self::TunnelConnection { knx_layer }
            }
            other => {
                return Err(KnxError::unknown_discriminator(u32::from(other))).field("connectionType");
            }
        };
        check_structure_length(rb, structure_length, &cri)?;
        Ok(cri)
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        write_structure_length(wb, self.length_in_bytes())?;
        wb.write_u8(8, self.connection_type()).field("connectionType")?;
        if let Self::TunnelConnection { knx_layer } = self {
            knx_layer.serialize(wb).field("knxLayer")?;
            write_reserved(wb, 8, 0).field("reserved")?;
        }
        Ok(())
    }

    fn length_in_bits(&self) -> usize {
        match self {
            Self::DeviceManagement => 16,
            Self::TunnelConnection { .. } => 32,
        }
    }
}

/// Connection Response Data Block (CRD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionResponseDataBlock {
    /// `DEVICE_MGMT_CONNECTION` (0x03)
    DeviceManagement,
    /// `TUNNEL_CONNECTION` (0x04)
    TunnelConnection {
        /// Individual address assigned to the tunnel
        knx_address: IndividualAddress,
    },
}

impl ConnectionResponseDataBlock {
    /// Connection type code of the variant.
    pub const fn connection_type(&self) -> u8 {
        match self {
            Self::DeviceManagement => DEVICE_MGMT_CONNECTION,
            Self::TunnelConnection { .. } => TUNNEL_CONNECTION,
        }
    }
}

impl Codec for ConnectionResponseDataBlock {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let structure_length = read_structure_length(rb)?;
        let connection_type = rb.read_u8(8).field("connectionType")?;
        let crd = match connection_type {
            DEVICE_MGMT_CONNECTION => Self::DeviceManagement,
            TUNNEL_CONNECTION => Self::TunnelConnection {
                knx_address: IndividualAddress::parse(rb).field("knxAddress")?,
            },
            other => {
                return Err(KnxError::unknown_discriminator(u32::from(other))).field("connectionType");
            }
        };
        check_structure_length(rb, structure_length, &crd)?;
        Ok(crd)
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        write_structure_length(wb, self.length_in_bytes())?;
        wb.write_u8(8, self.connection_type()).field("connectionType")?;
        if let Self::TunnelConnection { knx_address } = self {
            knx_address.serialize(wb).field("knxAddress")?;
        }
        Ok(())
    }

    fn length_in_bits(&self) -> usize {
        match self {
            Self::DeviceManagement => 16,
            Self::TunnelConnection { .. } => 32,
        }
    }
}

/// Connection header of tunnelling and device configuration requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionHeader {
    /// Communication channel id
    pub channel_id: u8,
    /// Sequence counter
    pub sequence_counter: u8,
}

impl ConnectionHeader {
    /// Size of the block in bytes
    pub const SIZE: usize = 4;
}

impl Codec for ConnectionHeader {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let structure_length = read_structure_length(rb)?;
        let header = Self {
            channel_id: rb.read_u8(8).field("communicationChannelId")?,
            sequence_counter: rb.read_u8(8).field("sequenceCounter")?,
        };
        read_reserved(rb, 8, 0).field("reserved")?;
        check_structure_length(rb, structure_length, &header)?;
        Ok(header)
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        write_structure_length(wb, Self::SIZE)?;
        wb.write_u8(8, self.channel_id).field("communicationChannelId")?;
        wb.write_u8(8, self.sequence_counter).field("sequenceCounter")?;
        write_reserved(wb, 8, 0).field("reserved")
    }

    fn length_in_bits(&self) -> usize {
        Self::SIZE * 8
    }
}

/// Connection header of tunnelling and device configuration acknowledgements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionAck {
    /// Communication channel id
    pub channel_id: u8,
    /// Sequence counter of the acknowledged request
    pub sequence_counter: u8,
    /// Result of the request
    pub status: Status,
}

impl ConnectionAck {
    /// Size of the block in bytes
    pub const SIZE: usize = 4;
}

impl Codec for ConnectionAck {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let structure_length = read_structure_length(rb)?;
        let ack = Self {
            channel_id: rb.read_u8(8).field("communicationChannelId")?,
            sequence_counter: rb.read_u8(8).field("sequenceCounter")?,
            status: Status::parse(rb).field("status")?,
        };
        check_structure_length(rb, structure_length, &ack)?;
        Ok(ack)
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        write_structure_length(wb, Self::SIZE)?;
        wb.write_u8(8, self.channel_id).field("communicationChannelId")?;
        wb.write_u8(8, self.sequence_counter).field("sequenceCounter")?;
        self.status.serialize(wb).field("status")
    }

    fn length_in_bits(&self) -> usize {
        Self::SIZE * 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecOptions;

    #[test]
    fn test_hpai_parse() {
        let data = [0x08, 0x01, 192, 168, 1, 10, 0x0E, 0x57];
        let hpai = Hpai::from_bytes(&data).unwrap();
        assert_eq!(hpai, Hpai::new([192, 168, 1, 10], 3671));

        let mut buf = [0u8; 8];
        assert_eq!(hpai.to_bytes(&mut buf).unwrap(), 8);
        assert_eq!(buf, data);
    }

    #[test]
    fn test_hpai_bad_length() {
        let data = [0x07, 0x01, 192, 168, 1, 10, 0x0E, 0x57];
        let err = Hpai::from_bytes(&data).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert!(codec.is_length_mismatch());
        assert_eq!(codec.field(), Some("structureLength"));

        // Accepted when validation is off
        let options = CodecOptions::default().with_validation(false);
        let hpai = Hpai::parse(&mut ReadBuffer::with_options(&data, options)).unwrap();
        assert_eq!(hpai.port, 3671);
    }

    #[test]
    fn test_hpai_unknown_protocol() {
        let data = [0x08, 0x07, 0, 0, 0, 0, 0, 0];
        let err = Hpai::from_bytes(&data).unwrap_err();
        assert_eq!(err.as_codec().unwrap().field(), Some("hostProtocolCode"));
    }

    #[test]
    fn test_device_status() {
        assert!(DeviceStatus::from_bytes(&[0x01]).unwrap().program_mode);
        assert!(!DeviceStatus::from_bytes(&[0x00]).unwrap().program_mode);
    }

    #[test]
    fn test_device_info_roundtrip() {
        let mut name = [0u8; 30];
        name[..7].copy_from_slice(b"Gateway");
        let dib = DibDeviceInfo {
            description_type: DibDeviceInfo::DESCRIPTION_TYPE,
            knx_medium: KnxMedium::Tp1,
            device_status: DeviceStatus { program_mode: false },
            knx_address: IndividualAddress::new(1, 1, 0).unwrap(),
            project_installation_identifier: ProjectInstallationIdentifier::default(),
            serial_number: [0x00, 0xC5, 0x01, 0x02, 0x03, 0x04],
            multicast_address: [224, 0, 23, 12],
            mac_address: [0x00, 0x24, 0x6D, 0x01, 0x02, 0x03],
            friendly_name: name,
        };
        let mut buf = [0u8; 54];
        assert_eq!(dib.to_bytes(&mut buf).unwrap(), 54);
        assert_eq!(&buf[..6], &[54, 0x01, 0x02, 0x00, 0x11, 0x00]);
        let parsed = DibDeviceInfo::from_bytes(&buf).unwrap();
        assert_eq!(parsed, dib);
        assert_eq!(parsed.friendly_name_str(), Some("Gateway"));
    }

    #[test]
    fn test_supp_svc_families() {
        let data = [0x08, 0x02, 0x02, 0x01, 0x03, 0x02, 0x04, 0x01];
        let dib = DibSuppSvcFamilies::from_bytes(&data).unwrap();
        assert_eq!(dib.service_ids.len(), 3);
        assert_eq!(dib.service_ids[2], ServiceId::Tunneling { version: 1 });

        let mut buf = [0u8; 8];
        assert_eq!(dib.to_bytes(&mut buf).unwrap(), 8);
        assert_eq!(buf, data);
    }

    #[test]
    fn test_supp_svc_families_odd_length() {
        // Length claims 5 bytes: the second family would straddle the bound
        let data = [0x05, 0x02, 0x02, 0x01, 0x03, 0x02];
        let err = DibSuppSvcFamilies::from_bytes(&data).unwrap_err();
        assert!(err.as_codec().unwrap().is_length_mismatch());
    }

    #[test]
    fn test_cri_tunnel() {
        let data = [0x04, 0x04, 0x02, 0x00];
        let cri = ConnectionRequestInformation::from_bytes(&data).unwrap();
        assert_eq!(cri, ConnectionRequestInformation::tunnel_link_layer());

        let mut buf = [0u8; 4];
        cri.to_bytes(&mut buf).unwrap();
        assert_eq!(buf, data);
    }

    #[test]
    fn test_cri_device_management() {
        let cri = ConnectionRequestInformation::from_bytes(&[0x02, 0x03]).unwrap();
        assert_eq!(cri, ConnectionRequestInformation::DeviceManagement);
        assert_eq!(cri.length_in_bytes(), 2);
    }

    #[test]
    fn test_cri_unknown_type() {
        let err = ConnectionRequestInformation::from_bytes(&[0x02, 0x06]).unwrap_err();
        let codec = err.as_codec().unwrap();
        assert_eq!(codec.discriminator(), Some(0x06));
        assert_eq!(codec.field(), Some("connectionType"));
    }

    #[test]
    fn test_crd_tunnel() {
        let data = [0x04, 0x04, 0x11, 0xFF];
        let crd = ConnectionResponseDataBlock::from_bytes(&data).unwrap();
        assert_eq!(
            crd,
            ConnectionResponseDataBlock::TunnelConnection { knx_address: IndividualAddress::new(1, 1, 255).unwrap() }
        );
    }

    #[test]
    fn test_connection_header_and_ack() {
        let header = ConnectionHeader::from_bytes(&[0x04, 0x15, 0x00, 0x00]).unwrap();
        assert_eq!(header, ConnectionHeader { channel_id: 0x15, sequence_counter: 0 });

        let ack = ConnectionAck::from_bytes(&[0x04, 0x15, 0x07, 0x00]).unwrap();
        assert_eq!(ack.sequence_counter, 7);
        assert_eq!(ack.status, Status::NoError);

        let mut buf = [0u8; 4];
        ack.to_bytes(&mut buf).unwrap();
        assert_eq!(buf, [0x04, 0x15, 0x07, 0x00]);
    }
}
