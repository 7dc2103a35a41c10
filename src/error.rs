//! Error types for KNX codec operations following M-ERRORS-CANONICAL-STRUCTS guideline.
//!
//! This module provides structured error types with backtraces (when std is enabled)
//! and helper methods for error information. Codec errors additionally carry the
//! path of field names that were being decoded or encoded when the failure
//! happened, so `Display` reads like `Codec error: UnexpectedEof (at cemi.dataFrame.apdu)`.

use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for KNX operations.
pub type Result<T> = core::result::Result<T, KnxError>;

/// Maximum nesting depth recorded in a field path.
pub const MAX_FIELD_DEPTH: usize = 8;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

/// Codec error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum CodecErrorKind {
    /// Read past the end of the input
    UnexpectedEof,
    /// Write past the end of the output buffer
    BufferTooSmall,
    /// Bit width outside the range supported by the target type
    InvalidBitLength,
    /// Value does not fit the declared bit width
    ValueOutOfRange,
    /// No variant registered for the discriminator value
    UnknownDiscriminator(u32),
    /// Constant field does not hold its fixed value
    ConstMismatch { expected: u64, actual: u64 },
    /// Implicit length field disagrees with the parsed payload
    LengthMismatch,
    /// Payload does not fit the fixed capacity of its storage
    CapacityExceeded,
    /// Presence of an optional field contradicts the field that selects it
    InconsistentFields,
}

/// Addressing error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum AddressingErrorKind {
    InvalidIndividualAddress,
    InvalidGroupAddress,
    OutOfRange,
}

/// DPT error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum DptErrorKind {
    InvalidData,
    ValueOutOfRange,
    UnsupportedType,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// KNX codec error types.
///
/// This is the main error type returned by all parse and serialize operations.
/// It contains a backtrace (when std feature is enabled) and detailed
/// error information through helper methods.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KnxError {
    /// Bit-level codec errors (end of input, discriminators, lengths, etc.)
    Codec(CodecError),
    /// Addressing errors (invalid address format, etc.)
    Addressing(AddressingError),
    /// Datapoint Type errors (encoding, decoding, etc.)
    Dpt(DptError),
}

// =============================================================================
// Structured Error Types
// =============================================================================

/// Codec error with field path and optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CodecError {
    kind: CodecErrorKind,
    /// Innermost field first.
    path: heapless::Vec<&'static str, MAX_FIELD_DEPTH>,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl CodecError {
    pub(crate) fn new(kind: CodecErrorKind) -> Self {
        Self {
            kind,
            path: heapless::Vec::new(),
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the input ended before the field was complete
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self.kind, CodecErrorKind::UnexpectedEof)
    }

    /// Check if the output buffer was too small
    pub fn is_buffer_too_small(&self) -> bool {
        matches!(self.kind, CodecErrorKind::BufferTooSmall)
    }

    /// Check if an invalid bit width was requested
    pub fn is_invalid_bit_length(&self) -> bool {
        matches!(self.kind, CodecErrorKind::InvalidBitLength)
    }

    /// Check if a value did not fit its bit width
    pub fn is_value_out_of_range(&self) -> bool {
        matches!(self.kind, CodecErrorKind::ValueOutOfRange)
    }

    /// Check if a discriminator had no matching variant
    pub fn is_unknown_discriminator(&self) -> bool {
        matches!(self.kind, CodecErrorKind::UnknownDiscriminator(_))
    }

    /// The unmatched discriminator value, if this is an unknown discriminator error
    pub fn discriminator(&self) -> Option<u32> {
        match self.kind {
            CodecErrorKind::UnknownDiscriminator(value) => Some(value),
            _ => None,
        }
    }

    /// Check if a constant field held an unexpected value
    pub fn is_const_mismatch(&self) -> bool {
        matches!(self.kind, CodecErrorKind::ConstMismatch { .. })
    }

    /// Check if a length field disagreed with its payload
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self.kind, CodecErrorKind::LengthMismatch)
    }

    /// Check if a payload exceeded its storage capacity
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self.kind, CodecErrorKind::CapacityExceeded)
    }

    /// Check if an optional field disagrees with its selector, e.g. a status
    pub fn is_inconsistent_fields(&self) -> bool {
        matches!(self.kind, CodecErrorKind::InconsistentFields)
    }

    /// Name of the innermost field that failed.
    pub fn field(&self) -> Option<&'static str> {
        self.path.first().copied()
    }

    /// Field names from the outermost to the innermost.
    pub fn path(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.path.iter().rev().copied()
    }

    fn push_field(&mut self, name: &'static str) {
        // Deeper paths keep their innermost segments.
        let _ = self.path.push(name);
    }
}

/// Addressing error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressingError {
    kind: AddressingErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl AddressingError {
    pub(crate) fn new(kind: AddressingErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if address is out of range
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, AddressingErrorKind::OutOfRange)
    }

    /// Check if a group address string could not be parsed
    pub fn is_invalid_group_address(&self) -> bool {
        matches!(self.kind, AddressingErrorKind::InvalidGroupAddress)
    }
}

/// DPT error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DptError {
    kind: DptErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl DptError {
    pub(crate) fn new(kind: DptErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if value is out of range
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, DptErrorKind::ValueOutOfRange)
    }

    /// Check if the payload does not hold a valid value for its format
    pub fn is_invalid_data(&self) -> bool {
        matches!(self.kind, DptErrorKind::InvalidData)
    }

    /// Check if the datapoint format is not supported by the value codec
    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, DptErrorKind::UnsupportedType)
    }
}

// =============================================================================
// Convenience Constructors for KnxError
// =============================================================================

impl KnxError {
    // Codec errors (hot path, no backtrace)
    #[inline]
    pub(crate) const fn unexpected_eof() -> Self {
        Self::Codec(CodecError { kind: CodecErrorKind::UnexpectedEof, path: heapless::Vec::new(), #[cfg(feature = "std")] backtrace: Backtrace::disabled() })
    }

    #[inline]
    pub(crate) const fn buffer_too_small() -> Self {
        Self::Codec(CodecError { kind: CodecErrorKind::BufferTooSmall, path: heapless::Vec::new(), #[cfg(feature = "std")] backtrace: Backtrace::disabled() })
    }

    pub(crate) fn invalid_bit_length() -> Self {
        Self::Codec(CodecError::new(CodecErrorKind::InvalidBitLength))
    }

    pub(crate) fn value_out_of_range() -> Self {
        Self::Codec(CodecError::new(CodecErrorKind::ValueOutOfRange))
    }

    pub(crate) fn unknown_discriminator(value: u32) -> Self {
        Self::Codec(CodecError::new(CodecErrorKind::UnknownDiscriminator(value)))
    }

    pub(crate) fn const_mismatch(expected: u64, actual: u64) -> Self {
        Self::Codec(CodecError::new(CodecErrorKind::ConstMismatch { expected, actual }))
    }

    pub(crate) fn length_mismatch() -> Self {
        Self::Codec(CodecError::new(CodecErrorKind::LengthMismatch))
    }

    pub(crate) fn capacity_exceeded() -> Self {
        Self::Codec(CodecError::new(CodecErrorKind::CapacityExceeded))
    }

    pub(crate) fn inconsistent_fields() -> Self {
        Self::Codec(CodecError::new(CodecErrorKind::InconsistentFields))
    }

    // Addressing errors
    pub(crate) fn invalid_group_address() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidGroupAddress))
    }

    pub(crate) fn invalid_individual_address() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidIndividualAddress))
    }

    pub(crate) fn address_out_of_range() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::OutOfRange))
    }

    // DPT errors
    pub(crate) fn invalid_dpt_data() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::InvalidData))
    }

    pub(crate) fn dpt_value_out_of_range() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::ValueOutOfRange))
    }

    pub(crate) fn unsupported_dpt() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::UnsupportedType))
    }

    /// Record the field that was being processed when this error surfaced.
    ///
    /// Only codec errors carry a path; other categories are returned as-is.
    #[must_use]
    pub fn with_field(mut self, name: &'static str) -> Self {
        if let Self::Codec(e) = &mut self {
            e.push_field(name);
        }
        self
    }

    /// Borrow the codec error, if this is one.
    pub fn as_codec(&self) -> Option<&CodecError> {
        match self {
            Self::Codec(e) => Some(e),
            _ => None,
        }
    }
}

/// Attach field names to errors as they propagate out of nested parsers.
///
/// ```
/// use knxnetip_codec::buffer::ReadBuffer;
/// use knxnetip_codec::error::FieldContext;
///
/// let mut rb = ReadBuffer::new(&[]);
/// let err = rb.read_u8(8).field("channelId").unwrap_err();
/// assert_eq!(err.as_codec().unwrap().field(), Some("channelId"));
/// ```
pub trait FieldContext<T> {
    /// Tag the error (if any) with `name`.
    fn field(self, name: &'static str) -> Result<T>;
}

impl<T> FieldContext<T> for Result<T> {
    #[inline]
    fn field(self, name: &'static str) -> Result<T> {
        self.map_err(|e| e.with_field(name))
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CodecErrorKind::UnknownDiscriminator(value) => {
                write!(f, "no variant for discriminator {value:#x}")?;
            }
            CodecErrorKind::ConstMismatch { expected, actual } => {
                write!(f, "expected constant value {expected:#x} but got {actual:#x}")?;
            }
            kind => write!(f, "{kind:?}")?,
        }
        if !self.path.is_empty() {
            f.write_str(" (at ")?;
            for (i, name) in self.path().enumerate() {
                if i > 0 {
                    f.write_str(".")?;
                }
                f.write_str(name)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for KnxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnxError::Codec(e) => write!(f, "Codec error: {e}"),
            KnxError::Addressing(e) => write!(f, "Addressing error: {:?}", e.kind),
            KnxError::Dpt(e) => write!(f, "DPT error: {:?}", e.kind),
        }

        // Note: Backtrace will be printed when std::error::Error::source() is called
    }
}

// Implement std::error::Error for std-based applications
#[cfg(feature = "std")]
impl std::error::Error for KnxError {}
