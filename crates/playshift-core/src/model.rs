//! Domain types shared by every view: platforms, songs, playlists and the
//! request/response shapes of the conversion backend.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// One of the two supported streaming services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Spotify,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Spotify, Platform::Youtube];

    /// The counterpart platform a conversion targets.
    pub fn complement(self) -> Self {
        match self {
            Self::Spotify => Self::Youtube,
            Self::Youtube => Self::Spotify,
        }
    }

    /// Wire tag (`"spotify"` / `"youtube"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spotify => "spotify",
            Self::Youtube => "youtube",
        }
    }

    /// Human-facing name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::Youtube => "YouTube",
        }
    }

    /// Public web link for a playlist living on this platform.
    pub fn playlist_url(self, external_id: &str) -> String {
        match self {
            Self::Spotify => format!("https://open.spotify.com/playlist/{}", external_id),
            Self::Youtube => format!("https://www.youtube.com/playlist?list={}", external_id),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spotify" => Ok(Self::Spotify),
            "youtube" => Ok(Self::Youtube),
            other => Err(Error::InvalidInput(format!("unknown platform: {:?}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    /// Length in seconds.
    #[serde(default)]
    pub duration: u32,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub spotify_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Song {
    pub fn is_on(&self, platform: Platform) -> bool {
        match platform {
            Platform::Spotify => self.spotify_id.is_some(),
            Platform::Youtube => self.youtube_id.is_some(),
        }
    }

    pub fn url_for(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Spotify => self.spotify_url.as_deref(),
            Platform::Youtube => self.youtube_url.as_deref(),
        }
    }

    pub fn id_for(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Spotify => self.spotify_id.as_deref(),
            Platform::Youtube => self.youtube_id.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user_id: String,
    pub platform: Platform,
    #[serde(default)]
    pub external_id: String,
    /// Track order as stored by the backend; ids are unique.
    #[serde(default, deserialize_with = "unique_songs")]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    /// Total running time rounded to whole minutes.
    pub fn total_minutes(&self) -> u64 {
        let secs: u64 = self.songs.iter().map(|s| u64::from(s.duration)).sum();
        (secs + 30) / 60
    }

    /// First `n` songs plus the number left out.
    pub fn preview(&self, n: usize) -> (&[Song], usize) {
        let shown = &self.songs[..self.songs.len().min(n)];
        (shown, self.songs.len() - shown.len())
    }

    pub fn external_url(&self) -> String {
        self.platform.playlist_url(&self.external_id)
    }
}

/// Intent to convert a playlist to the other platform. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub playlist_id: String,
    pub source_platform: Platform,
    pub target_platform: Platform,
}

impl ConversionRequest {
    pub fn new(
        playlist_id: impl Into<String>,
        source_platform: Platform,
        target_platform: Platform,
    ) -> Result<Self, Error> {
        if source_platform == target_platform {
            return Err(Error::InvalidInput(format!(
                "source and target platform are both {}",
                source_platform
            )));
        }
        Ok(Self {
            playlist_id: playlist_id.into(),
            source_platform,
            target_platform,
        })
    }

    /// Source is the playlist's current platform, target its complement.
    pub fn for_playlist(playlist: &Playlist) -> Self {
        Self {
            playlist_id: playlist.id.clone(),
            source_platform: playlist.platform,
            target_platform: playlist.platform.complement(),
        }
    }
}

/// Body returned by `POST /playlists/{id}/convert`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConversionResult {
    pub success: bool,
    pub converted_songs: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub failed_songs: Vec<String>,
    pub new_playlist_id: String,
    pub message: String,
}

/// Partial playlist used for create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaylistDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Partial song used for create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SongDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

/// Body of `POST /songs/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongQuery {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Body of `GET /auth/{platform}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUrl {
    pub auth_url: String,
}

fn empty_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<String> = Option::deserialize(de)?;
    Ok(v.filter(|s| !s.trim().is_empty()))
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Keeps the first occurrence of each song id; `null` decodes as empty.
fn unique_songs<'de, D>(de: D) -> Result<Vec<Song>, D::Error>
where
    D: Deserializer<'de>,
{
    let songs: Vec<Song> = null_as_default(de)?;
    let mut seen = HashSet::new();
    Ok(songs
        .into_iter()
        .filter(|s| seen.insert(s.id.clone()))
        .collect())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn song(id: &str, title: &str, artist: &str, album: &str, duration: u32) -> Song {
        Song {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            duration,
            spotify_id: None,
            youtube_id: None,
            spotify_url: None,
            youtube_url: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }

    pub fn playlist(id: &str, platform: Platform) -> Playlist {
        Playlist {
            id: id.to_string(),
            name: format!("Playlist {}", id),
            description: String::new(),
            user_id: "user123".to_string(),
            platform,
            external_id: format!("ext{}", id),
            songs: Vec::new(),
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}
