//! Channel classification.
//!
//! Maps free-text channel labels coming back from the backend ("Impreso",
//! "Web Digital", "Twitter/X") onto the fixed [`ChannelKey`] taxonomy using an
//! ordered pattern table. First match wins; anything unmatched degrades to
//! [`ChannelKey::Unclassified`] instead of failing.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use pressroom_types::channel::ChannelKey;

/// How a pattern is tested against a normalized label.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Matches anywhere in the label.
    Contains(&'static str),
    /// Matches the whole label, or a `/`-separated segment of it.
    Segment(&'static str),
}

impl Pattern {
    fn matches(&self, label: &str) -> bool {
        match self {
            Pattern::Contains(needle) => label.contains(needle),
            Pattern::Segment(needle) => label.split('/').any(|part| part == *needle),
        }
    }
}

/// Ordered classification table. Order is the tie-break.
const PATTERNS: &[(ChannelKey, &[Pattern])] = &[
    (
        ChannelKey::Print,
        &[Pattern::Contains("impreso"), Pattern::Contains("print")],
    ),
    (
        ChannelKey::Web,
        &[Pattern::Contains("web"), Pattern::Contains("digital")],
    ),
    (
        ChannelKey::SocialX,
        &[
            Pattern::Contains("twitter"),
            Pattern::Segment("x"),
            Pattern::Contains("social-x"),
        ],
    ),
    (ChannelKey::SocialInstagram, &[Pattern::Contains("instagram")]),
    (ChannelKey::SocialFacebook, &[Pattern::Contains("facebook")]),
];

/// Normalize a raw label: decompose, drop diacritics and whitespace,
/// lower-case.
pub fn normalize_label(raw: &str) -> String {
    raw.nfd()
        .filter(|ch| !is_combining_mark(*ch) && !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Classify a free-text channel label.
pub fn classify(raw_label: &str) -> ChannelKey {
    let label = normalize_label(raw_label);
    if label.is_empty() {
        return ChannelKey::Unclassified;
    }

    PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| p.matches(&label)))
        .map(|(key, _)| *key)
        .unwrap_or(ChannelKey::Unclassified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_labels_ignore_case_whitespace_and_diacritics() {
        for label in ["WEB", "Web ", "wéb", " w e b", "Web Digital", "DIGITAL"] {
            assert_eq!(classify(label), ChannelKey::Web, "label {label:?}");
        }
    }

    #[test]
    fn test_print_labels() {
        assert_eq!(classify("Impreso"), ChannelKey::Print);
        assert_eq!(classify("Edición impresa"), ChannelKey::Unclassified);
        assert_eq!(classify("Print edition"), ChannelKey::Print);
        assert_eq!(classify("ÍMPRESO"), ChannelKey::Print);
    }

    #[test]
    fn test_social_labels() {
        assert_eq!(classify("Twitter/X"), ChannelKey::SocialX);
        assert_eq!(classify("X"), ChannelKey::SocialX);
        assert_eq!(classify("X / Twitter"), ChannelKey::SocialX);
        assert_eq!(classify("Instagram Reels"), ChannelKey::SocialInstagram);
        assert_eq!(classify("facebook"), ChannelKey::SocialFacebook);
    }

    #[test]
    fn test_bare_x_inside_words_does_not_match() {
        assert_eq!(classify("Experimental"), ChannelKey::Unclassified);
        assert_eq!(classify("Inbox"), ChannelKey::Unclassified);
    }

    #[test]
    fn test_first_match_wins() {
        // Contains both "web" and "facebook"; web comes first in the table.
        assert_eq!(classify("Facebook web embed"), ChannelKey::Web);
        assert_eq!(classify("Print + Web"), ChannelKey::Print);
    }

    #[test]
    fn test_unknown_and_empty_labels_are_unclassified() {
        assert_eq!(classify("Podcast"), ChannelKey::Unclassified);
        assert_eq!(classify(""), ChannelKey::Unclassified);
        assert_eq!(classify("   "), ChannelKey::Unclassified);
    }

    #[test]
    fn test_classification_is_idempotent_on_canonical_names() {
        for key in ChannelKey::ALL {
            assert_eq!(classify(key.as_str()), key);
            assert_eq!(classify(key.as_str()), classify(key.as_str()));
        }
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label(" Edición  Web "), "edicionweb");
    }
}
