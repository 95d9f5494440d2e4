//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get an environment variable, falling back to `default` when unset or blank.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    match get_env(name) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

/// Parse an environment variable when set; a present but malformed value is an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_parse(name) {
        Err(Error::MissingEnv(_)) => Ok(default),
        other => other,
    }
}

/// Boolean flag: `1`, `true`, `yes` and `on` (any case) are true.
pub fn get_env_bool(name: &'static str) -> bool {
    get_env(name)
        .map(|val| matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_falls_back() {
        assert_eq!(get_env_or("LIB_UTILS_TEST_UNSET_VAR", "fallback"), "fallback");
        assert_eq!(get_env_parse_or::<u64>("LIB_UTILS_TEST_UNSET_VAR", 7), Ok(7));
        assert!(!get_env_bool("LIB_UTILS_TEST_UNSET_VAR"));
        assert_eq!(get_env("LIB_UTILS_TEST_UNSET_VAR"), Err(Error::MissingEnv("LIB_UTILS_TEST_UNSET_VAR")));
    }

    #[test]
    fn test_wrong_format_is_reported() {
        env::set_var("LIB_UTILS_TEST_NUMBER", "ten");
        assert_eq!(
            get_env_parse_or::<u64>("LIB_UTILS_TEST_NUMBER", 7),
            Err(Error::WrongFormat("LIB_UTILS_TEST_NUMBER"))
        );
        env::set_var("LIB_UTILS_TEST_NUMBER", " 10 ");
        assert_eq!(get_env_parse::<u64>("LIB_UTILS_TEST_NUMBER"), Ok(10));
    }

    #[test]
    fn test_bool_flags() {
        env::set_var("LIB_UTILS_TEST_FLAG", "Yes");
        assert!(get_env_bool("LIB_UTILS_TEST_FLAG"));
        env::set_var("LIB_UTILS_TEST_FLAG", "0");
        assert!(!get_env_bool("LIB_UTILS_TEST_FLAG"));
    }
}
