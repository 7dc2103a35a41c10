//! KNXnet/IP protocol model.
//!
//! This module contains the message structures and their bit layouts, from the
//! KNXnet/IP frame down to the application layer:
//!
//! ```text
//! frame ── services ── blocks ── service_id
//!             └─ cemi ── ldata ── apdu
//! ```
//!
//! [`com_object`] holds the group object tables read from device memory.

pub mod apdu;
pub mod blocks;
pub mod cemi;
pub mod com_object;
pub mod constants;
pub mod frame;
pub mod ldata;
pub mod service_id;
pub mod services;

pub use apdu::{Apdu, ApduControl, ApduData, ApduDataExt, ApduPayload};
pub use blocks::*;
pub use cemi::{Cemi, CemiAdditionalInformation, LBusmonInd, LDataMessage, PropertyHeader, PropertyMessage};
pub use com_object::ComObjectTable;
pub use constants::*;
pub use frame::{KnxNetIpHeader, KnxNetIpMessage};
pub use ldata::{LDataBody, LDataExtended, LDataFrame, LPollData};
pub use service_id::ServiceId;
pub use services::*;
