//! Platform identifiers
//!
//! Guilds, users and channels are identified by opaque strings issued by the
//! chat platform (Discord snowflakes in practice). They are stored verbatim as
//! TEXT, so no numeric interpretation is applied here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum accepted identifier length
const MAX_ID_LEN: usize = 64;

/// Error when parsing an identifier from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier is longer than {MAX_ID_LEN} characters")]
    TooLong,

    #[error("identifier contains whitespace or control characters")]
    InvalidCharacter,
}

fn validate(raw: &str) -> Result<(), IdParseError> {
    if raw.is_empty() {
        return Err(IdParseError::Empty);
    }
    if raw.len() > MAX_ID_LEN {
        return Err(IdParseError::TooLong);
    }
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(IdParseError::InvalidCharacter);
    }
    Ok(())
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse and validate an identifier
            pub fn parse(raw: &str) -> Result<Self, IdParseError> {
                let trimmed = raw.trim();
                validate(trimmed)?;
                Ok(Self(trimmed.to_owned()))
            }

            /// Wrap a value read back from storage without validation
            #[inline]
            pub fn from_stored(raw: String) -> Self {
                Self(raw)
            }

            /// Borrow the raw identifier
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Take the raw identifier
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Guild (tenant) identifier
    GuildId
);
opaque_id!(
    /// User identifier, scoped by nothing; pair it with a [`GuildId`] for wallet/punishment keys
    UserId
);
opaque_id!(
    /// Channel identifier, used as the audit-log destination
    ChannelId
);
