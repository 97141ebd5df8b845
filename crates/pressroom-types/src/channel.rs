//! Canonical channel taxonomy.
//!
//! The backend labels generated variants with free text ("Impreso",
//! "Twitter/X", "Web Digital", ...). The pipeline groups them into this fixed
//! set of keys; anything it cannot place lands in [`ChannelKey::Unclassified`].

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// A canonical publication channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelKey {
    Print,
    Web,
    SocialX,
    SocialInstagram,
    SocialFacebook,
    Unclassified,
}

impl ChannelKey {
    /// Every key, in canonical display order.
    pub const ALL: [ChannelKey; 6] = [
        ChannelKey::Print,
        ChannelKey::Web,
        ChannelKey::SocialX,
        ChannelKey::SocialInstagram,
        ChannelKey::SocialFacebook,
        ChannelKey::Unclassified,
    ];

    /// Stable machine name (`print`, `web`, `social-x`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKey::Print => "print",
            ChannelKey::Web => "web",
            ChannelKey::SocialX => "social-x",
            ChannelKey::SocialInstagram => "social-instagram",
            ChannelKey::SocialFacebook => "social-facebook",
            ChannelKey::Unclassified => "unclassified",
        }
    }

    /// Human-readable tab label.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelKey::Print => "Print",
            ChannelKey::Web => "Web",
            ChannelKey::SocialX => "Twitter/X",
            ChannelKey::SocialInstagram => "Instagram",
            ChannelKey::SocialFacebook => "Facebook",
            ChannelKey::Unclassified => "Other",
        }
    }

    /// Position in [`ChannelKey::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown channel key: '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_key_roundtrip() {
        for key in ChannelKey::ALL {
            let parsed: ChannelKey = key.as_str().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn test_channel_key_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ChannelKey::SocialInstagram).unwrap();
        assert_eq!(json, "\"social-instagram\"");
    }

    #[test]
    fn test_index_matches_canonical_order() {
        for (i, key) in ChannelKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!("radio".parse::<ChannelKey>().is_err());
    }
}
