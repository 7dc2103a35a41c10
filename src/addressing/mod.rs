//! KNX addressing system.
//!
//! KNX uses two types of addresses:
//! - Individual addresses for physical devices (Area.Line.Device)
//! - Group addresses for logical grouping (Main/Middle/Sub, Main/Sub or free)

pub mod group;
pub mod individual;

pub use group::{GroupAddress, NumLevels};
pub use individual::IndividualAddress;
