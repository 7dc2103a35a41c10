//! Service family identifiers advertised in a supported service families DIB.

use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::Codec;
use crate::error::{FieldContext, KnxError, Result};

/// A service family and the version the device implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceId {
    /// KNXnet/IP Core (0x02)
    KnxNetIpCore { version: u8 },
    /// Device Management (0x03)
    DeviceManagement { version: u8 },
    /// Tunnelling (0x04)
    Tunneling { version: u8 },
    /// Routing (0x05)
    Routing { version: u8 },
    /// Remote Logging (0x06)
    RemoteLogging { version: u8 },
    /// Remote Configuration and Diagnosis (0x07)
    RemoteConfigurationAndDiagnosis { version: u8 },
    /// Object Server (0x08)
    ObjectServer { version: u8 },
}

impl ServiceId {
    /// Service family code of the variant.
    pub const fn service_type(&self) -> u8 {
        match self {
            Self::KnxNetIpCore { .. } => 0x02,
            Self::DeviceManagement { .. } => 0x03,
            Self::Tunneling { .. } => 0x04,
            Self::Routing { .. } => 0x05,
            Self::RemoteLogging { .. } => 0x06,
            Self::RemoteConfigurationAndDiagnosis { .. } => 0x07,
            Self::ObjectServer { .. } => 0x08,
        }
    }

    /// Implemented version of the service family.
    pub const fn version(&self) -> u8 {
        match *self {
            Self::KnxNetIpCore { version }
            | Self::DeviceManagement { version }
            | Self::Tunneling { version }
            | Self::Routing { version }
            | Self::RemoteLogging { version }
            | Self::RemoteConfigurationAndDiagnosis { version }
            | Self::ObjectServer { version } => version,
        }
    }
}

impl Codec for ServiceId {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let service_type = rb.read_u8(8).field("serviceType")?;
        knx_log!(trace, "service family {}", service_type);
        let version = match service_type {
            0x02..=0x08 => rb.read_u8(8).field("version")?,
            other => {
                return Err(KnxError::unknown_discriminator(u32::from(other))).field("serviceType");
            }
        };
        Ok(match service_type {
            0x02 => Self::KnxNetIpCore { version },
            0x03 => Self::DeviceManagement { version },
            0x04 => Self::Tunneling { version },
            0x05 => Self::Routing { version },
            0x06 => Self::RemoteLogging { version },
            0x07 => Self::RemoteConfigurationAndDiagnosis { version },
            _ => Self::ObjectServer { version },
        })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_u8(8, self.service_type()).field("serviceType")?;
        wb.write_u8(8, self.version()).field("version")
    }

    fn length_in_bits(&self) -> usize {
        16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_family() {
        for code in 0x02..=0x08u8 {
            let id = ServiceId::from_bytes(&[code, 0x02]).unwrap();
            assert_eq!(id.service_type(), code);
            assert_eq!(id.version(), 2);
        }
    }

    #[test]
    fn test_unknown_family() {
        let err = ServiceId::from_bytes(&[0x09, 0x01]).unwrap_err();
        assert_eq!(err.as_codec().unwrap().discriminator(), Some(0x09));
    }

    #[test]
    fn test_serialize() {
        let mut buf = [0u8; 2];
        ServiceId::Routing { version: 1 }.to_bytes(&mut buf).unwrap();
        assert_eq!(buf, [0x05, 0x01]);
    }
}
