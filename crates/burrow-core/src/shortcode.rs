use crate::error::ShortenerError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of characters in a generated short code.
pub const CODE_LENGTH: usize = 6;

/// The 62 symbols a short code is drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The identifier a shortened URL is stored and resolved under.
///
/// Well-formed codes are exactly [`CODE_LENGTH`] characters from
/// [`ALPHABET`]. Lookups accept arbitrary input through
/// [`ShortCode::new_unchecked`], so an unknown code is reported as not found
/// rather than malformed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a `ShortCode` after checking its shape.
    pub fn parse(code: impl Into<String>) -> std::result::Result<Self, ShortenerError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this for codes produced by the generator or for lookup keys
    /// taken verbatim from a caller.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns true if the code has the shape of a generated code.
    pub fn is_well_formed(&self) -> bool {
        Self::validate(&self.0).is_ok()
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> std::result::Result<(), ShortenerError> {
        if code.len() != CODE_LENGTH {
            return Err(ShortenerError::InvalidShortCode(format!(
                "length must be {}, got {}",
                CODE_LENGTH,
                code.len()
            )));
        }

        if !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(ShortenerError::InvalidShortCode(format!(
                "must contain only ASCII letters and digits: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
