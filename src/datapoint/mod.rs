//! KNX Datapoint Types (DPT)
//!
//! Datapoint types define how the payload of a group telegram is interpreted.
//! This module provides the static datapoint type table and a value codec for
//! the common formats.
//!
//! ## Usage
//!
//! ```rust
//! use knxnetip_codec::datapoint::{DatapointType, KnxValue};
//! use knxnetip_codec::buffer::ReadBuffer;
//!
//! let dpt = DatapointType::from_id("5.001").unwrap();
//! assert_eq!(dpt.name(), "DPT_Scaling");
//!
//! let value = KnxValue::parse_named(&mut ReadBuffer::new(&[0x80]), dpt.format_name())?;
//! assert_eq!(value, KnxValue::Unsigned8(0x80));
//! # Ok::<(), knxnetip_codec::KnxError>(())
//! ```

pub mod types;
pub mod value;

pub use types::DatapointType;
pub use value::{KnxString, KnxValue, ValueFormat};
