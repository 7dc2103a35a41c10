//! Codec configuration, edited to match the installation the codec talks to.
//!
//! `GROUP_ADDRESS_LEVELS` selects how group addresses are split when no
//! explicit level count is given (1, 2 or 3). `VALIDATE_IMPLICIT_FIELDS`
//! turns on cross-checking of received length fields against the payload.

pub const CONFIG: &str = r#"
GROUP_ADDRESS_LEVELS=3
VALIDATE_IMPLICIT_FIELDS=true
"#;
