//! KNXnet/IP protocol constants and closed enumerations.

/// KNXnet/IP protocol version 1.0
pub const KNXNETIP_VERSION_10: u8 = 0x10;

/// Standard KNXnet/IP header length (6 bytes)
pub const HEADER_SIZE_10: u8 = 0x06;

/// Standard UDP port for KNXnet/IP communication
pub const KNXNETIP_DEFAULT_PORT: u16 = 3671;

/// Maximum APDU payload after the APCI byte (`dataLength` is 8 bits)
pub const MAX_APDU_DATA: usize = 254;

/// Maximum payload kept for opaque cEMI services and unknown messages.
///
/// Storage is inline, so larger payloads fail with a capacity error even
/// though `totalLength` allows up to 0xFFFF bytes. 512 covers the largest
/// KNXnet/IP frame a gateway sends over UDP in practice.
pub const MAX_RAW_DATA: usize = 512;

/// Maximum number of additional information blocks in one cEMI frame
pub const MAX_ADDITIONAL_INFO: usize = 16;

/// Maximum payload of one additional information block kept verbatim
pub const MAX_ADDITIONAL_INFO_DATA: usize = 32;

/// Maximum number of service families listed in a DIB
pub const MAX_SERVICE_FAMILIES: usize = 16;

/// Maximum number of entries in a group object table
pub const MAX_COM_OBJECTS: usize = 255;

// =============================================================================
// Connection Type Codes
// =============================================================================

/// Connection type for `DEVICE_MGMT_CONNECTION`
pub const DEVICE_MGMT_CONNECTION: u8 = 0x03;

/// Connection type for `TUNNEL_CONNECTION`
pub const TUNNEL_CONNECTION: u8 = 0x04;

knx_enum! {
    /// KNXnet/IP status and error codes
    pub enum Status: u8, 8, read_u8, write_u8 {
        /// `E_NO_ERROR`
        NoError = 0x00,
        /// `E_HOST_PROTOCOL_TYPE`
        ProtocolTypeNotSupported = 0x01,
        /// `E_VERSION_NOT_SUPPORTED`
        UnsupportedProtocolVersion = 0x02,
        /// `E_SEQUENCE_NUMBER`
        OutOfOrderSequenceNumber = 0x04,
        /// `E_CONNECTION_ID`
        InvalidConnectionId = 0x21,
        /// `E_CONNECTION_TYPE`
        ConnectionTypeNotSupported = 0x22,
        /// `E_CONNECTION_OPTION`
        ConnectionOptionNotSupported = 0x23,
        /// `E_NO_MORE_CONNECTIONS`
        NoMoreConnections = 0x24,
        /// `E_NO_MORE_UNIQUE_CONNECTIONS`
        NoMoreUniqueConnections = 0x25,
        /// `E_DATA_CONNECTION`
        DataConnection = 0x26,
        /// `E_KNX_CONNECTION`
        KnxConnection = 0x27,
        /// `E_TUNNELLING_LAYER`
        TunnellingLayerNotSupported = 0x29,
    }
}

knx_enum! {
    /// Transport protocol of an HPAI endpoint
    pub enum HostProtocolCode: u8, 8, read_u8, write_u8 {
        /// IPv4 UDP protocol
        Ipv4Udp = 0x01,
        /// IPv4 TCP protocol
        Ipv4Tcp = 0x02,
    }
}

knx_enum! {
    /// Layer a tunnel connection attaches to
    pub enum KnxLayer: u8, 8, read_u8, write_u8 {
        /// `TUNNEL_LINKLAYER`
        TunnelLinkLayer = 0x02,
        /// `TUNNEL_RAW`
        TunnelRaw = 0x04,
        /// `TUNNEL_BUSMONITOR`
        TunnelBusmonitor = 0x80,
    }
}

knx_enum! {
    /// Physical KNX medium of a device
    pub enum KnxMedium: u8, 8, read_u8, write_u8 {
        /// Twisted pair 0
        Tp0 = 0x01,
        /// Twisted pair 1
        Tp1 = 0x02,
        /// Powerline 110
        Pl110 = 0x04,
        /// Powerline 132
        Pl132 = 0x08,
        /// Radio frequency
        Rf = 0x10,
        /// KNXnet/IP
        Ip = 0x20,
    }
}

knx_enum! {
    /// KNX message priority levels
    pub enum Priority: u8, 2, read_u8, write_u8 {
        /// System priority
        System = 0b00,
        /// Normal priority
        Normal = 0b01,
        /// Urgent priority
        Urgent = 0b10,
        /// Low priority (default for runtime communication)
        Low = 0b11,
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Low
    }
}

knx_enum! {
    /// Size of the value behind a group object
    pub enum ComObjectValueType: u8, 8, read_u8, write_u8 {
        /// 1 bit
        Bit1 = 0x00,
        /// 2 bits
        Bit2 = 0x01,
        /// 3 bits
        Bit3 = 0x02,
        /// 4 bits
        Bit4 = 0x03,
        /// 5 bits
        Bit5 = 0x04,
        /// 6 bits
        Bit6 = 0x05,
        /// 7 bits
        Bit7 = 0x06,
        /// 1 byte
        Byte1 = 0x07,
        /// 2 bytes
        Byte2 = 0x08,
        /// 3 bytes
        Byte3 = 0x09,
        /// 4 bytes
        Byte4 = 0x0A,
        /// 6 bytes
        Byte6 = 0x0B,
        /// 8 bytes
        Byte8 = 0x0C,
        /// 10 bytes
        Byte10 = 0x0D,
        /// 14 bytes
        Byte14 = 0x0E,
    }
}

knx_enum! {
    /// Mask version of a KNX device, selecting its memory layouts
    pub enum FirmwareType: u16, 16, read_u16, write_u16 {
        /// System 1 (BCU 1)
        System1 = 0x0010,
        /// System 2 (BCU 2)
        System2 = 0x0020,
        /// System 300
        System300 = 0x0300,
        /// System 7 (BIM M 112)
        System7 = 0x0700,
        /// System B
        SystemB = 0x07B0,
        /// IR decoder
        IrDecoder = 0x0810,
        /// Coupler
        Coupler = 0x0910,
        /// No firmware (`NONE`)
        NoFirmware = 0x0AF0,
        /// System 1 powerline
        System1Pl110 = 0x10B0,
        /// System B powerline
        SystemBPl110 = 0x17B0,
        /// Media coupler PL/TP
        MediaCouplerPlTp = 0x1900,
        /// RF bidirectional devices
        RfBiDirectionalDevices = 0x2000,
        /// RF unidirectional devices
        RfUniDirectionalDevices = 0x2100,
        /// System 1 TP0
        System1Tp0 = 0x3012,
        /// System 1 PL132
        System1Pl132 = 0x4012,
        /// System 7 KNXnet/IP
        System7KnxNetIp = 0x5705,
    }
}
