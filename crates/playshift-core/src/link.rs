//! Platform URL parsing.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

fn playlist_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Pattern: .../playlist/{id}; the id stops at the first non-alphanumeric char
    RE.get_or_init(|| Regex::new(r"playlist/([a-zA-Z0-9]+)").expect("static regex"))
}

/// Extract the platform-native playlist id from a share URL.
pub fn extract_playlist_id(url: &str) -> Result<String> {
    playlist_re()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))
}

/// Check if URL carries a playlist id
pub fn is_playlist_url(url: &str) -> bool {
    playlist_re().is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_spotify_id() {
        assert_eq!(
            extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M")
                .unwrap(),
            "37i9dQZF1DXcBWIGoYBM5M"
        );
    }

    #[test]
    fn test_stops_at_query_string() {
        assert_eq!(
            extract_playlist_id("https://open.spotify.com/playlist/ABC123?si=xyz").unwrap(),
            "ABC123"
        );
    }

    #[test]
    fn test_rejects_non_playlist_urls() {
        for url in [
            "https://open.spotify.com/album/xyz",
            "https://open.spotify.com/playlist/",
            "playlist",
            "",
            "https://www.youtube.com/playlist?list=PL123",
        ] {
            assert!(
                matches!(extract_playlist_id(url), Err(Error::InvalidUrl(_))),
                "expected InvalidUrl for {:?}",
                url
            );
            assert!(!is_playlist_url(url));
        }
    }
}
