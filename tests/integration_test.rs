//! Integration tests for knxnetip-codec
//!
//! These tests decode complete KNXnet/IP datagrams as they appear on the wire,
//! check the decoded model and encode it again byte for byte.

use knxnetip_codec::addressing::{GroupAddress, IndividualAddress, NumLevels};
use knxnetip_codec::buffer::{ReadBuffer, WriteBuffer};
use knxnetip_codec::codec::{Codec, CodecOptions};
use knxnetip_codec::datapoint::{DatapointType, KnxValue};
use knxnetip_codec::protocol::{
    Cemi, ConnectionRequest, ConnectionRequestInformation, ConnectionResponse, ConnectionResponseDataBlock,
    FirmwareType, Hpai, KnxMedium, KnxNetIpMessage, ServiceId, Status,
};
use knxnetip_codec::protocol::com_object::ComObjectTable;

/// TUNNELING_REQUEST carrying an L_Data.req group write of `1/2/3 = on`
const TUNNEL_GROUP_WRITE: [u8; 21] = [
    0x06, 0x10, 0x04, 0x20, 0x00, 0x15, // header
    0x04, 0x15, 0x00, 0x00, // connection header: channel 0x15, sequence 0
    0x11, 0x00, // L_Data.req, no additional info
    0xBC, 0xE0, 0x11, 0x05, 0x0A, 0x03, // ctrl1, ctrl2, 1.1.5 -> 1/2/3
    0x01, 0x00, 0x81, // dataLength 1, GroupValueWrite 1
];

/// ROUTING_INDICATION carrying an L_Data.ind group write of `1/2/3 = off`
const ROUTING_GROUP_WRITE: [u8; 17] = [
    0x06, 0x10, 0x05, 0x30, 0x00, 0x11, // header
    0x29, 0x00, // L_Data.ind, no additional info
    0xBC, 0xD0, 0x11, 0x05, 0x0A, 0x03, // hop count 5
    0x01, 0x00, 0x80,
];

/// Helper to decode and re-encode a message
fn round_trip(data: &[u8]) -> KnxNetIpMessage {
    let message = KnxNetIpMessage::from_bytes(data).expect("Failed to parse message");
    let mut buf = [0u8; 256];
    let len = message.to_bytes(&mut buf).expect("Failed to serialize message");
    assert_eq!(&buf[..len], data, "re-encoded message differs");
    assert_eq!(message.length_in_bytes(), data.len());
    message
}

/// Helper to prefix a body with a KNXnet/IP header of the matching totalLength
fn with_header(msg_type: u16, body: &[u8]) -> Vec<u8> {
    let total = u16::try_from(6 + body.len()).unwrap();
    let mut data = vec![0x06, 0x10];
    data.extend_from_slice(&msg_type.to_be_bytes());
    data.extend_from_slice(&total.to_be_bytes());
    data.extend_from_slice(body);
    data
}

/// Helper to build a SEARCH_RESPONSE datagram
fn search_response_bytes() -> Vec<u8> {
    let mut name = [0u8; 30];
    name[..12].copy_from_slice(b"KNX IP Route");

    let mut data = vec![0x06, 0x10, 0x02, 0x02, 0x00, 0x4C];
    data.extend_from_slice(&[0x08, 0x01, 192, 168, 1, 10, 0x0E, 0x57]);
    data.extend_from_slice(&[0x36, 0x01, 0x02, 0x01, 0x11, 0x00, 0x00, 0x00]);
    data.extend_from_slice(&[0x00, 0xFA, 0x12, 0x34, 0x56, 0x78]); // serial number
    data.extend_from_slice(&[224, 0, 23, 12]); // routing multicast
    data.extend_from_slice(&[0x00, 0x24, 0x6D, 0x01, 0x02, 0x03]); // MAC
    data.extend_from_slice(&name);
    data.extend_from_slice(&[0x08, 0x02, 0x02, 0x01, 0x04, 0x01, 0x05, 0x01]);
    assert_eq!(data.len(), 0x4C);
    data
}

#[test]
fn test_tunneling_group_write() {
    let message = round_trip(&TUNNEL_GROUP_WRITE);
    let KnxNetIpMessage::TunnelingRequest(request) = &message else {
        panic!("expected TUNNELING_REQUEST, got {message:?}");
    };
    assert_eq!(request.connection_header.channel_id, 0x15);
    assert_eq!(request.connection_header.sequence_counter, 0);

    let Cemi::LDataReq(ldata) = &request.cemi else {
        panic!("expected L_Data.req");
    };
    let frame = ldata.data_frame.as_data().expect("data frame");
    assert_eq!(frame.source_address, IndividualAddress::new(1, 1, 5).unwrap());
    assert_eq!(frame.destination_group(NumLevels::Three), Some(GroupAddress::new(1, 2, 3).unwrap()));
    assert!(frame.is_group_write());

    let format = DatapointType::Switch.value_format().unwrap();
    assert_eq!(KnxValue::from_apdu(&frame.apdu, format).unwrap(), KnxValue::Bool(true));
}

#[test]
fn test_routing_indication() {
    let message = round_trip(&ROUTING_GROUP_WRITE);
    let KnxNetIpMessage::RoutingIndication(indication) = &message else {
        panic!("expected ROUTING_INDICATION");
    };
    let frame = indication.cemi.as_ldata().and_then(|f| f.as_data()).expect("L_Data.ind");
    assert_eq!(frame.hop_count, 5);
    assert_eq!(
        KnxValue::from_apdu(&frame.apdu, DatapointType::Switch.value_format().unwrap()).unwrap(),
        KnxValue::Bool(false)
    );
}

#[test]
fn test_tunneling_temperature_write() {
    let data = [
        0x06, 0x10, 0x04, 0x20, 0x00, 0x17, //
        0x04, 0x15, 0x07, 0x00, //
        0x11, 0x00, 0xBC, 0xE0, 0x11, 0x05, 0x0A, 0x04, //
        0x03, 0x00, 0x80, 0x0C, 0x33, // 21.5 °C
    ];
    let message = round_trip(&data);
    let KnxNetIpMessage::TunnelingRequest(request) = &message else {
        panic!("expected TUNNELING_REQUEST");
    };
    let frame = request.cemi.as_ldata().and_then(|f| f.as_data()).unwrap();
    let value = KnxValue::from_apdu(&frame.apdu, DatapointType::ValueTemp.value_format().unwrap()).unwrap();
    assert!(matches!(value, KnxValue::Float(t) if (t - 21.5).abs() < 0.01));
}

#[test]
fn test_tunneling_ack() {
    let message = round_trip(&[0x06, 0x10, 0x04, 0x21, 0x00, 0x0A, 0x04, 0x15, 0x00, 0x00]);
    let KnxNetIpMessage::TunnelingResponse(ack) = message else {
        panic!("expected TUNNELING_ACK");
    };
    assert_eq!(ack.connection_ack.status, Status::NoError);
}

#[test]
fn test_search_response() {
    let data = search_response_bytes();
    let message = round_trip(&data);
    let KnxNetIpMessage::SearchResponse(response) = &message else {
        panic!("expected SEARCH_RESPONSE");
    };
    assert_eq!(response.control_endpoint, Hpai::new([192, 168, 1, 10], 3671));
    assert_eq!(response.device_info.knx_medium, KnxMedium::Tp1);
    assert_eq!(response.device_info.knx_address, IndividualAddress::new(1, 1, 0).unwrap());
    assert!(response.device_info.device_status.program_mode);
    assert_eq!(response.device_info.friendly_name_str(), Some("KNX IP Route"));
    assert_eq!(
        response.supported_service_families.service_ids.as_slice(),
        &[
            ServiceId::KnxNetIpCore { version: 1 },
            ServiceId::Tunneling { version: 1 },
            ServiceId::Routing { version: 1 },
        ]
    );
}

#[test]
fn test_connect_request_and_response() {
    let endpoint = Hpai::new([192, 168, 1, 100], 50000);
    let request = KnxNetIpMessage::ConnectionRequest(ConnectionRequest::tunnel(endpoint, endpoint));
    let mut buf = [0u8; 64];
    let len = request.to_bytes(&mut buf).unwrap();
    assert_eq!(len, 26);
    assert_eq!(&buf[..6], &[0x06, 0x10, 0x02, 0x05, 0x00, 0x1A]);
    let parsed = round_trip(&buf[..len]);
    let KnxNetIpMessage::ConnectionRequest(parsed) = parsed else {
        panic!("expected CONNECT_REQUEST");
    };
    assert_eq!(parsed.connection_request_information, ConnectionRequestInformation::tunnel_link_layer());

    let response = round_trip(&[
        0x06, 0x10, 0x02, 0x06, 0x00, 0x14, //
        0x15, 0x00, //
        0x08, 0x01, 192, 168, 1, 10, 0x0E, 0x57, //
        0x04, 0x04, 0x11, 0xFF,
    ]);
    let KnxNetIpMessage::ConnectionResponse(response) = response else {
        panic!("expected CONNECT_RESPONSE");
    };
    assert_eq!(response.communication_channel_id, 0x15);
    assert_eq!(
        response.data.unwrap().connection_response_data_block,
        ConnectionResponseDataBlock::TunnelConnection { knx_address: IndividualAddress::new(1, 1, 255).unwrap() }
    );
}

#[test]
fn test_connect_response_error() {
    let message = round_trip(&[0x06, 0x10, 0x02, 0x06, 0x00, 0x08, 0x00, 0x24]);
    let KnxNetIpMessage::ConnectionResponse(response) = message else {
        panic!("expected CONNECT_RESPONSE");
    };
    assert_eq!(response.status, Status::NoMoreConnections);
    assert!(response.data.is_none());
}

#[test]
fn test_disconnect_round_trip() {
    round_trip(&[0x06, 0x10, 0x02, 0x09, 0x00, 0x10, 0x15, 0x00, 0x08, 0x01, 0, 0, 0, 0, 0, 0]);
    round_trip(&[0x06, 0x10, 0x02, 0x0A, 0x00, 0x08, 0x15, 0x00]);
}

#[test]
fn test_truncated_apdu_names_field_path() {
    let data = &TUNNEL_GROUP_WRITE[..TUNNEL_GROUP_WRITE.len() - 1];
    let err = KnxNetIpMessage::from_bytes(data).unwrap_err();
    let codec = err.as_codec().expect("codec error");
    assert!(codec.is_unexpected_eof());
    let path: Vec<_> = codec.path().collect();
    assert_eq!(&path[..3], &["cemi", "dataFrame", "apdu"]);
    assert!(err.to_string().contains("cemi.dataFrame.apdu"));
}

#[test]
fn test_unknown_cemi_message_code() {
    let mut data = TUNNEL_GROUP_WRITE;
    data[10] = 0x77;
    let err = KnxNetIpMessage::from_bytes(&data).unwrap_err();
    let codec = err.as_codec().unwrap();
    assert_eq!(codec.discriminator(), Some(0x77));
    assert_eq!(codec.path().collect::<Vec<_>>(), ["cemi", "messageCode"]);
}

#[test]
fn test_data_length_mismatch() {
    let mut data = TUNNEL_GROUP_WRITE;
    data[18] = 0x02;
    let err = KnxNetIpMessage::from_bytes(&data).unwrap_err();
    assert!(err.as_codec().is_some());

    // Without validation the short APDU still cannot be read.
    let options = CodecOptions::default().with_validation(false);
    let result = KnxNetIpMessage::parse(&mut ReadBuffer::with_options(&data, options));
    assert!(result.is_err());
}

#[test]
fn test_total_length_checked() {
    let mut data = ROUTING_GROUP_WRITE.to_vec();
    data.push(0xFF);
    data[5] = 0x12;
    // totalLength covers a trailing byte that no field accounts for.
    assert!(KnxNetIpMessage::from_bytes(&data).is_err());
}

#[test]
fn test_group_object_table() {
    let data = [0x02, 0x64, 0x10, 0xDF, 0x00, 0x11, 0xC7, 0x07];
    let table = ComObjectTable::parse_with_firmware(&mut ReadBuffer::new(&data), FirmwareType::System1).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.length_in_bits(), data.len() * 8);
    let mut buf = [0u8; 8];
    let mut wb = WriteBuffer::new(&mut buf);
    table.serialize(&mut wb).unwrap();
    assert_eq!(wb.written(), &data);
}

#[test]
fn test_group_address_levels() {
    let addr = GroupAddress::from_raw(0x0A03, NumLevels::Three);
    assert_eq!(addr.to_string(), "1/2/3");
    assert_eq!(GroupAddress::from_raw(0x0A03, NumLevels::Two).to_string(), "1/515");
    assert_eq!(GroupAddress::from_raw(0x0A03, NumLevels::One).to_string(), "2563");
    assert_eq!("1/2/3".parse::<GroupAddress>().unwrap(), addr);
}

#[test]
fn test_individual_address_creation() {
    let addr = IndividualAddress::new(1, 1, 250).unwrap();
    assert_eq!(addr.to_string(), "1.1.250");
    assert_eq!(u16::from(addr), 0x11FA);
    assert_eq!("1.1.250".parse::<IndividualAddress>().unwrap(), addr);
}

#[test]
fn test_every_message_type_round_trips() {
    const ENDPOINT: [u8; 8] = [0x08, 0x01, 192, 168, 1, 100, 0x0E, 0x57];
    let search_response = search_response_bytes();
    let descriptions = &search_response[14..];
    let endpoints = [ENDPOINT, ENDPOINT].concat();

    let cases: Vec<(u16, Vec<u8>)> = vec![
        (0x0201, with_header(0x0201, &ENDPOINT)),
        (0x0202, search_response.clone()),
        (0x0203, with_header(0x0203, &ENDPOINT)),
        (0x0204, with_header(0x0204, descriptions)),
        (0x0205, with_header(0x0205, &[endpoints.as_slice(), &[0x04, 0x04, 0x02, 0x00]].concat())),
        (0x0205, with_header(0x0205, &[endpoints.as_slice(), &[0x02, 0x03]].concat())),
        (0x0206, with_header(0x0206, &[&[0x15, 0x00][..], &ENDPOINT, &[0x04, 0x04, 0x11, 0xFF]].concat())),
        (0x0206, with_header(0x0206, &[&[0x16, 0x00][..], &ENDPOINT, &[0x02, 0x03]].concat())),
        (0x0206, with_header(0x0206, &[0x00, 0x22])),
        (0x0207, with_header(0x0207, &[&[0x15, 0x00][..], &ENDPOINT].concat())),
        (0x0208, with_header(0x0208, &[0x15, 0x21])),
        (0x0209, with_header(0x0209, &[&[0x15, 0x00][..], &ENDPOINT].concat())),
        (0x020A, with_header(0x020A, &[0x15, 0x00])),
        (0x020B, with_header(0x020B, &[0xDE, 0xAD, 0xBE, 0xEF])),
        (0x020B, with_header(0x020B, &[])),
        (0x0310, with_header(0x0310, &[0x04, 0x01, 0x02, 0x00, 0xFC, 0x00, 0x0B, 0x01, 0x35, 0x10, 0x01])),
        (0x0311, with_header(0x0311, &[0x04, 0x01, 0x02, 0x00])),
        (0x0420, TUNNEL_GROUP_WRITE.to_vec()),
        (0x0421, with_header(0x0421, &[0x04, 0x15, 0x00, 0x29])),
        (0x0530, ROUTING_GROUP_WRITE.to_vec()),
    ];

    for (msg_type, data) in &cases {
        let message = round_trip(data);
        assert_eq!(message.msg_type(), *msg_type, "wrong variant for {data:02X?}");
    }
}

#[test]
fn test_every_cemi_message_code_round_trips() {
    let cases: [&[u8]; 27] = [
        &[0x10, 0xBC, 0xE0, 0x11, 0x05],                                     // L_Raw.req
        &[0x11, 0x00, 0xBC, 0xE0, 0x11, 0x05, 0x0A, 0x03, 0x01, 0x00, 0x81], // L_Data.req
        &[0x13, 0x11, 0x05, 0x00, 0x01, 0x03],                               // L_PollData.req
        &[0x25, 0x11, 0x05, 0x00, 0x01, 0x01, 0xAA],                         // L_PollData.con
        &[0x29, 0x00, 0xBC, 0xD0, 0x11, 0x05, 0x0A, 0x03, 0x01, 0x00, 0x40], // L_Data.ind read response
        &[0x29, 0x00, 0xF0, 0x11, 0x05, 0x00, 0x01, 0x00, 0xC0],             // L_Data.ind poll data frame
        &[0x29, 0x04, 0x04, 0x02, 0x12, 0x34, 0xB0, 0x60, 0x11, 0x05, 0x11, 0x01, 0x00, 0x80], // timestamped
        &[0x2B, 0x00, 0xBC, 0xE0, 0x11, 0x01, 0x0A, 0x03, 0x01, 0x00, 0x80, 0x5A], // L_Busmon.ind data + crc
        &[0x2B, 0x03, 0x03, 0x01, 0x05, 0xA0],                               // L_Busmon.ind ack, no crc
        &[0x2D, 0x01, 0x02, 0x03],                                           // L_Raw.ind
        &[0x2E, 0x00, 0xBC, 0xE0, 0x11, 0x05, 0x0A, 0x03, 0x01, 0x00, 0x00], // L_Data.con group read
        &[0x2F, 0xFF],                                                       // L_Raw.con
        &[0x41, 0x00, 0x01, 0x43, 0x00],                                     // T_Data_Connected.req
        &[0x4A, 0x00, 0x01, 0x03, 0x00],                                     // T_Data_Individual.req
        &[0x89, 0x00, 0x01, 0x43, 0x40],                                     // T_Data_Connected.ind
        &[0x94, 0x00, 0x01, 0x03, 0x40],                                     // T_Data_Individual.ind
        &[0xF0],                                                             // M_Reset.ind
        &[0xF1],                                                             // M_Reset.req
        &[0xF5, 0x00, 0x0B, 0x01, 0x35, 0x10, 0x01],                         // M_PropWrite.con
        &[0xF6, 0x00, 0x00, 0x01, 0x38, 0x10, 0x01, 0x12, 0x34],             // M_PropWrite.req
        &[0xF7, 0x00, 0x00, 0x01, 0x36, 0x10, 0x01, 0x01],                   // M_PropInfo.ind
        &[0xF8, 0x00, 0x0B, 0x01, 0x35, 0x01],                               // M_FuncPropCommand.req
        &[0xF9, 0x00, 0x0B, 0x01, 0x35],                                     // M_FuncPropStateRead.req
        &[0xFA, 0x00, 0x0B, 0x01, 0x35, 0x00, 0x01],                         // M_FuncProp*.con
        &[0xFB, 0x00, 0x00, 0x01, 0x0B, 0x10, 0x01, 0x00, 0xC5, 0x01, 0x02, 0x03, 0x04], // M_PropRead.con
        &[0xFB, 0x00, 0x00, 0x01, 0x0B, 0x00, 0x01],                         // M_PropRead.con, error
        &[0xFC, 0x00, 0x0B, 0x01, 0x35, 0x10, 0x01],                         // M_PropRead.req
    ];

    for cemi_bytes in cases {
        let data = with_header(0x0530, cemi_bytes);
        let message = round_trip(&data);
        let KnxNetIpMessage::RoutingIndication(indication) = &message else {
            panic!("expected ROUTING_INDICATION for {cemi_bytes:02X?}");
        };
        assert_eq!(indication.cemi.message_code(), cemi_bytes[0]);
        assert_eq!(indication.cemi.length_in_bytes(), cemi_bytes.len());
    }
}

#[test]
fn test_busmonitor_crc_follows_frame_type() {
    let data = with_header(0x0530, &[0x2B, 0x00, 0xA0]);
    let KnxNetIpMessage::RoutingIndication(indication) = round_trip(&data) else {
        panic!("expected ROUTING_INDICATION");
    };
    let Cemi::LBusmonInd(mut busmon) = indication.cemi else {
        panic!("expected L_Busmon.ind");
    };
    assert!(busmon.data_frame.is_ack());
    assert_eq!(busmon.crc, None);

    // An ack frame carrying a check byte cannot be encoded.
    busmon.crc = Some(0x00);
    let mut buf = [0u8; 16];
    let err = Cemi::LBusmonInd(busmon).serialize(&mut WriteBuffer::new(&mut buf)).unwrap_err();
    assert!(err.as_codec().unwrap().is_inconsistent_fields());
}

#[test]
fn test_connect_response_status_must_match_body() {
    let response = ConnectionResponse { communication_channel_id: 1, status: Status::NoError, data: None };
    let mut buf = [0u8; 32];
    let err = KnxNetIpMessage::ConnectionResponse(response).to_bytes(&mut buf).unwrap_err();
    let codec = err.as_codec().unwrap();
    assert!(codec.is_inconsistent_fields());
    assert_eq!(codec.field(), Some("data"));

    let rejected = KnxNetIpMessage::ConnectionResponse(ConnectionResponse::rejected(1, Status::NoMoreConnections));
    let len = rejected.to_bytes(&mut buf).unwrap();
    assert_eq!(round_trip(&buf[..len]), rejected);
}

#[test]
fn test_trailing_bytes_after_cemi_rejected() {
    let data = with_header(0x0530, &[0x29, 0x00, 0xBC, 0xD0, 0x11, 0x05, 0x0A, 0x03, 0x01, 0x00, 0x80, 0xEE]);
    assert!(KnxNetIpMessage::from_bytes(&data).unwrap_err().as_codec().unwrap().is_length_mismatch());

    let options = CodecOptions::default().with_validation(false);
    let err = KnxNetIpMessage::parse(&mut ReadBuffer::with_options(&data, options)).unwrap_err();
    let codec = err.as_codec().unwrap();
    assert!(codec.is_length_mismatch());
    assert_eq!(codec.path().next(), Some("cemi"));
}
