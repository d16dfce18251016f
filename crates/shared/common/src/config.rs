//! Shared configuration helpers.

use std::env;
use std::str::FromStr;

/// Deployment platform. Destructive admin routes only run on `Dev`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    Dev,
    #[default]
    Production,
}

impl Platform {
    pub fn is_dev(&self) -> bool {
        matches!(self, Platform::Dev)
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Platform::Dev,
            _ => Platform::Production,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Dev => write!(f, "dev"),
            Platform::Production => write!(f, "production"),
        }
    }
}

/// Read the first set variable among `keys`, falling back to `default`.
pub fn env_or(keys: &[&str], default: &str) -> String {
    env_first(keys).unwrap_or_else(|| default.to_string())
}

/// Parse the first set variable among `keys`; unset or unparsable → `default`.
pub fn env_parse_or<T: FromStr>(keys: &[&str], default: T) -> T {
    env_first(keys)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read the first set, non-empty variable among `keys`.
pub fn env_first(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parsing() {
        assert_eq!(Platform::from("dev"), Platform::Dev);
        assert_eq!(Platform::from(" DEV "), Platform::Dev);
        assert_eq!(Platform::from("prod"), Platform::Production);
        assert_eq!(Platform::from(""), Platform::Production);
        assert!(!Platform::default().is_dev());
    }

    #[test]
    fn test_env_fallbacks() {
        // Variable names are unique to this test
        env::set_var("COMMON_TEST_PORT_B", "9090");
        env::set_var("COMMON_TEST_BAD_PORT", "not-a-number");

        assert_eq!(env_parse_or(&["COMMON_TEST_PORT_A", "COMMON_TEST_PORT_B"], 1u16), 9090);
        assert_eq!(env_parse_or(&["COMMON_TEST_BAD_PORT"], 1u16), 1);
        assert_eq!(env_or(&["COMMON_TEST_UNSET"], "fallback"), "fallback");
    }
}
