#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! ## Crate layout
//!
//! - [`buffer`] - bit-level read and write cursors
//! - [`codec`] - the [`Codec`] trait and shared field helpers
//! - [`protocol`] - KNXnet/IP frames, service blocks, cEMI, APDU
//! - [`addressing`] - individual and group addresses
//! - [`datapoint`] - datapoint type table and typed values
//! - [`error`] - error types with field paths

// Macro modules (must be declared before use)
#[macro_use]
pub mod logging;
#[macro_use]
pub mod macros;

pub mod addressing;
pub mod buffer;
pub mod codec;
pub mod configuration;
pub mod datapoint;
pub mod error;
pub mod protocol;
pub mod utility;

// Re-export commonly used types
#[doc(inline)]
pub use addressing::{GroupAddress, IndividualAddress, NumLevels};
#[doc(inline)]
pub use buffer::{ReadBuffer, WriteBuffer};
#[doc(inline)]
pub use codec::{Codec, CodecOptions};
#[doc(inline)]
pub use datapoint::{DatapointType, KnxValue, ValueFormat};
#[doc(inline)]
pub use error::{FieldContext, KnxError, Result};
#[doc(inline)]
pub use protocol::{Apdu, Cemi, KnxNetIpMessage};
