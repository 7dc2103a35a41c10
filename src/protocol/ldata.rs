//! Link layer frames (`L_Data`, `L_PollData` and acknowledgements).
//!
//! The first byte is shared by every frame kind. Two of its bits select the
//! frame that follows:
//!
//! ```text
//! Bit 7: Frame Type
//! Bit 6: Polling          ┐ discriminators
//! Bit 4: Not Ack Frame    ┘
//! Bit 5: Not Repeated
//! Bit 3-2: Priority (00=system, 01=normal, 10=urgent, 11=low)
//! Bit 1: Acknowledge Request
//! Bit 0: Error Flag
//! ```
//!
//! | notAckFrame | polling | frame |
//! |---|---|---|
//! | 1 | 0 | [`LDataExtended`] |
//! | 1 | 1 | [`LPollData`] |
//! | 0 | - | acknowledgement, no further fields |

use crate::addressing::{GroupAddress, IndividualAddress, NumLevels};
use crate::buffer::{ReadBuffer, WriteBuffer};
use crate::codec::{check_implicit, implicit_length, read_reserved, write_reserved, Codec};
use crate::error::{FieldContext, Result};
use crate::protocol::apdu::{Apdu, ApduData, ApduPayload};
use crate::protocol::constants::Priority;

/// Link layer frame with its shared control bits
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LDataFrame {
    /// Frame type bit (set for standard frames)
    pub frame_type: bool,
    /// Do not repeat on the medium
    pub not_repeated: bool,
    /// Transmission priority
    pub priority: Priority,
    /// Link layer acknowledge requested
    pub acknowledge_requested: bool,
    /// Confirmation error flag
    pub error_flag: bool,
    /// Frame kind selected by the polling and ack bits
    pub body: LDataBody,
}

/// Frame kind of an [`LDataFrame`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LDataBody {
    /// Data frame carrying an APDU
    Extended(LDataExtended),
    /// Poll data request
    PollData(LPollData),
    /// Link layer acknowledgement
    Ack,
}

impl LDataBody {
    const fn polling(&self) -> bool {
        matches!(self, Self::PollData(_))
    }

    const fn not_ack_frame(&self) -> bool {
        !matches!(self, Self::Ack)
    }
}

impl LDataFrame {
    /// Standard, non-repeated data frame with low priority.
    pub const fn data(body: LDataExtended) -> Self {
        Self {
            frame_type: true,
            not_repeated: true,
            priority: Priority::Low,
            acknowledge_requested: false,
            error_flag: false,
            body: LDataBody::Extended(body),
        }
    }

    /// Whether this frame is a link layer acknowledgement.
    #[inline]
    pub const fn is_ack(&self) -> bool {
        matches!(self.body, LDataBody::Ack)
    }

    /// Borrow the data frame, if this is one.
    pub const fn as_data(&self) -> Option<&LDataExtended> {
        match &self.body {
            LDataBody::Extended(data) => Some(data),
            _ => None,
        }
    }

    /// Group destination of a data frame.
    pub fn destination_group(&self, levels: NumLevels) -> Option<GroupAddress> {
        self.as_data().and_then(|data| data.destination_group(levels))
    }

    /// Individual destination of a data frame.
    pub fn destination_individual(&self) -> Option<IndividualAddress> {
        self.as_data().and_then(LDataExtended::destination_individual)
    }

    /// Whether this is a group value write.
    pub fn is_group_write(&self) -> bool {
        self.as_data().is_some_and(LDataExtended::is_group_write)
    }

    /// Whether this is a group value read.
    pub fn is_group_read(&self) -> bool {
        self.as_data().is_some_and(LDataExtended::is_group_read)
    }

    /// Whether this is a group value response.
    pub fn is_group_response(&self) -> bool {
        self.as_data().is_some_and(LDataExtended::is_group_response)
    }
}

impl Codec for LDataFrame {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let frame_type = rb.read_bit().field("frameType")?;
        let polling = rb.read_bit().field("polling")?;
        let not_repeated = rb.read_bit().field("notRepeated")?;
        let not_ack_frame = rb.read_bit().field("notAckFrame")?;
        let priority = Priority::parse(rb).field("priority")?;
        let acknowledge_requested = rb.read_bit().field("acknowledgeRequested")?;
        let error_flag = rb.read_bit().field("errorFlag")?;
        knx_log!(trace, "L_Data notAckFrame={} polling={}", not_ack_frame, polling);
        let body = match (not_ack_frame, polling) {
            (true, false) => LDataBody::Extended(LDataExtended::parse(rb)?),
            (true, true) => LDataBody::PollData(LPollData::parse(rb)?),
            (false, _) => LDataBody::Ack,
        };
        Ok(Self { frame_type, not_repeated, priority, acknowledge_requested, error_flag, body })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_bit(self.frame_type).field("frameType")?;
        wb.write_bit(self.body.polling()).field("polling")?;
        wb.write_bit(self.not_repeated).field("notRepeated")?;
        wb.write_bit(self.body.not_ack_frame()).field("notAckFrame")?;
        self.priority.serialize(wb).field("priority")?;
        wb.write_bit(self.acknowledge_requested).field("acknowledgeRequested")?;
        wb.write_bit(self.error_flag).field("errorFlag")?;
        match &self.body {
            LDataBody::Extended(data) => data.serialize(wb),
            LDataBody::PollData(poll) => poll.serialize(wb),
            LDataBody::Ack => Ok(()),
        }
    }

    fn length_in_bits(&self) -> usize {
        8 + match &self.body {
            LDataBody::Extended(data) => data.length_in_bits(),
            LDataBody::PollData(poll) => poll.length_in_bits(),
            LDataBody::Ack => 0,
        }
    }
}

/// `L_Data` frame body: addressing, hop count and the APDU
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LDataExtended {
    /// Destination is a group address
    pub group_address: bool,
    /// Routing counter (0-7)
    pub hop_count: u8,
    /// Extended frame format (4 bits)
    pub extended_frame_format: u8,
    /// Sender
    pub source_address: IndividualAddress,
    /// Raw destination, group or individual depending on `group_address`
    pub destination_address: [u8; 2],
    /// Application layer payload
    pub apdu: Apdu,
}

impl LDataExtended {
    /// Frame addressed to a group with the usual hop count of 6.
    pub fn new_group(source_address: IndividualAddress, destination: GroupAddress, apdu: Apdu) -> Self {
        Self {
            group_address: true,
            hop_count: 6,
            extended_frame_format: 0,
            source_address,
            destination_address: destination.raw().to_be_bytes(),
            apdu,
        }
    }

    /// Raw destination address.
    #[inline]
    pub const fn destination_raw(&self) -> u16 {
        u16::from_be_bytes(self.destination_address)
    }

    /// Destination interpreted with `levels`, if it is a group address.
    pub const fn destination_group(&self, levels: NumLevels) -> Option<GroupAddress> {
        if self.group_address {
            Some(GroupAddress::from_raw(self.destination_raw(), levels))
        } else {
            None
        }
    }

    /// Destination, if it is an individual address.
    pub fn destination_individual(&self) -> Option<IndividualAddress> {
        (!self.group_address).then(|| IndividualAddress::from(self.destination_raw()))
    }

    /// Borrow the data service of the APDU.
    pub const fn apdu_data(&self) -> Option<&ApduData> {
        match &self.apdu.payload {
            ApduPayload::Data(data) => Some(data),
            ApduPayload::Control(_) => None,
        }
    }

    /// Whether this is a group value write.
    pub fn is_group_write(&self) -> bool {
        self.group_address && matches!(self.apdu_data(), Some(ApduData::GroupValueWrite { .. }))
    }

    /// Whether this is a group value read.
    pub fn is_group_read(&self) -> bool {
        self.group_address && matches!(self.apdu_data(), Some(ApduData::GroupValueRead))
    }

    /// Whether this is a group value response.
    pub fn is_group_response(&self) -> bool {
        self.group_address && matches!(self.apdu_data(), Some(ApduData::GroupValueResponse { .. }))
    }
}

impl Codec for LDataExtended {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let group_address = rb.read_bit().field("groupAddress")?;
        let hop_count = rb.read_u8(3).field("hopCount")?;
        let extended_frame_format = rb.read_u8(4).field("extendedFrameFormat")?;
        let source_address = IndividualAddress::parse(rb).field("sourceAddress")?;
        let destination_address = rb.read_array().field("destinationAddress")?;
        let data_length = rb.read_u8(8).field("dataLength")?;
        let apdu = Apdu::parse(rb, data_length).field("apdu")?;
        check_implicit(rb, u64::from(data_length), apdu.data_length() as u64).field("dataLength")?;
        Ok(Self { group_address, hop_count, extended_frame_format, source_address, destination_address, apdu })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        wb.write_bit(self.group_address).field("groupAddress")?;
        wb.write_u8(3, self.hop_count).field("hopCount")?;
        wb.write_u8(4, self.extended_frame_format).field("extendedFrameFormat")?;
        self.source_address.serialize(wb).field("sourceAddress")?;
        wb.write_bytes(&self.destination_address).field("destinationAddress")?;
        wb.write_bits(8, implicit_length(self.apdu.data_length(), 8)?).field("dataLength")?;
        self.apdu.serialize(wb).field("apdu")
    }

    fn length_in_bits(&self) -> usize {
        8 + 16 + 16 + 8 + self.apdu.length_in_bits()
    }
}

/// `L_PollData` request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LPollData {
    /// Polling master
    pub source_address: IndividualAddress,
    /// Poll group
    pub target_address: [u8; 2],
    /// Number of poll data slots expected (6 bits)
    pub number_expected_poll_data: u8,
}

impl Codec for LPollData {
    fn parse(rb: &mut ReadBuffer<'_>) -> Result<Self> {
        let source_address = IndividualAddress::parse(rb).field("sourceAddress")?;
        let target_address = rb.read_array().field("targetAddress")?;
        read_reserved(rb, 4, 0).field("reserved")?;
        let number_expected_poll_data = rb.read_u8(6).field("numberExpectedPollData")?;
        Ok(Self { source_address, target_address, number_expected_poll_data })
    }

    fn serialize(&self, wb: &mut WriteBuffer<'_>) -> Result<()> {
        self.source_address.serialize(wb).field("sourceAddress")?;
        wb.write_bytes(&self.target_address).field("targetAddress")?;
        write_reserved(wb, 4, 0).field("reserved")?;
        wb.write_u8(6, self.number_expected_poll_data).field("numberExpectedPollData")
    }

    fn length_in_bits(&self) -> usize {
        16 + 16 + 4 + 6
    }
}
