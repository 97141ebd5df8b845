use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Client-assigned identifier for a draft variant, wrapping a UUID v7.
///
/// Assigned when a variant enters the draft store and stable for the lifetime
/// of the editing session. Never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalVariantId(pub Uuid);

impl LocalVariantId {
    /// Create a new LocalVariantId using UUID v7 (time-sortable).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for LocalVariantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalVariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocalVariantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Declares an integer identifier assigned by the backend.
macro_rules! server_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

server_id!(
    /// Durable identifier of a persisted variant.
    VariantId
);
server_id!(
    /// Durable identifier of a content record.
    ContentId
);
server_id!(
    /// Identifier of a channel definition. Doubles as the correlation key
    /// between a local draft variant and its durable counterpart.
    ChannelId
);
server_id!(
    /// Identifier of a configured language model.
    ModelId
);
server_id!(SectionId);
server_id!(ProjectId);
