//! Utility functions for configuration parsing

use crate::addressing::NumLevels;
use crate::configuration::CONFIG;

/// Looks up `key` in a `KEY=VALUE` configuration text.
///
/// Leading and trailing whitespace around lines and values is ignored.
pub fn config_value<'a>(config: &'a str, key: &str) -> Option<&'a str> {
    config
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(key)?.trim_start().strip_prefix('='))
        .map(str::trim)
}

/// Extracts the default group address level count from configuration.
///
/// # Returns
/// * `NumLevels` - defaults to three levels on a missing or invalid entry
pub fn get_group_address_levels() -> NumLevels {
    parse_levels(config_value(CONFIG, "GROUP_ADDRESS_LEVELS"))
}

/// Extracts whether implicit length fields are validated on parse.
pub fn get_validate_implicit_fields() -> bool {
    parse_flag(config_value(CONFIG, "VALIDATE_IMPLICIT_FIELDS"), true)
}

pub(crate) fn parse_levels(value: Option<&str>) -> NumLevels {
    value
        .and_then(|v| v.parse::<u8>().ok())
        .and_then(NumLevels::from_u8)
        .unwrap_or(NumLevels::Three)
}

pub(crate) fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some("true" | "1" | "yes") => true,
        Some("false" | "0" | "no") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_value() {
        let text = "\nA=1\n  B = two \nAB=3\n";
        assert_eq!(config_value(text, "A"), Some("1"));
        assert_eq!(config_value(text, "B"), Some("two"));
        assert_eq!(config_value(text, "AB"), Some("3"));
        assert_eq!(config_value(text, "C"), None);
    }

    #[test]
    fn test_builtin_defaults() {
        assert_eq!(get_group_address_levels(), NumLevels::Three);
        assert!(get_validate_implicit_fields());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        assert_eq!(parse_levels(Some("7")), NumLevels::Three);
        assert_eq!(parse_levels(Some("2")), NumLevels::Two);
        assert!(!parse_flag(Some("false"), true));
        assert!(parse_flag(Some("maybe"), true));
    }
}
