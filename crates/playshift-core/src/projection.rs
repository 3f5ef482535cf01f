//! Derived, in-memory views over fetched collections: the platform filter of
//! the playlist list, the song search and the dashboard aggregates.

use crate::model::{Platform, Playlist, Song};

/// Three-way platform selector of the playlist view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformFilter {
    #[default]
    All,
    Only(Platform),
}

impl PlatformFilter {
    pub const ALL: [PlatformFilter; 3] = [
        PlatformFilter::All,
        PlatformFilter::Only(Platform::Spotify),
        PlatformFilter::Only(Platform::Youtube),
    ];

    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(Platform::Spotify),
            Self::Only(Platform::Spotify) => Self::Only(Platform::Youtube),
            Self::Only(Platform::Youtube) => Self::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::All => Self::Only(Platform::Youtube),
            Self::Only(Platform::Spotify) => Self::All,
            Self::Only(Platform::Youtube) => Self::Only(Platform::Spotify),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(p) => p.label(),
        }
    }

    pub fn matches(self, playlist: &Playlist) -> bool {
        match self {
            Self::All => true,
            Self::Only(p) => playlist.platform == p,
        }
    }
}

/// Playlists passing `filter`, in fetched order.
pub fn filter_playlists(playlists: &[Playlist], filter: PlatformFilter) -> Vec<&Playlist> {
    playlists.iter().filter(|p| filter.matches(p)).collect()
}

/// Number of playlists each selector would show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformCounts {
    pub all: usize,
    pub spotify: usize,
    pub youtube: usize,
}

impl PlatformCounts {
    pub fn of(playlists: &[Playlist]) -> Self {
        playlists.iter().fold(Self::default(), |mut acc, p| {
            acc.all += 1;
            match p.platform {
                Platform::Spotify => acc.spotify += 1,
                Platform::Youtube => acc.youtube += 1,
            }
            acc
        })
    }

    pub fn for_filter(&self, filter: PlatformFilter) -> usize {
        match filter {
            PlatformFilter::All => self.all,
            PlatformFilter::Only(Platform::Spotify) => self.spotify,
            PlatformFilter::Only(Platform::Youtube) => self.youtube,
        }
    }
}

/// Case-insensitive substring match over title, artist and album.
/// A query that is blank after trimming matches everything.
pub fn song_matches(song: &Song, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    song.title.to_lowercase().contains(&q)
        || song.artist.to_lowercase().contains(&q)
        || song.album.to_lowercase().contains(&q)
}

pub fn search_songs<'a>(songs: &'a [Song], query: &str) -> Vec<&'a Song> {
    songs.iter().filter(|s| song_matches(s, query)).collect()
}

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_playlists: usize,
    pub total_songs: usize,
    pub spotify_playlists: usize,
    pub youtube_playlists: usize,
}

impl DashboardStats {
    pub fn compute(playlists: &[Playlist], songs: &[Song]) -> Self {
        let counts = PlatformCounts::of(playlists);
        Self {
            total_playlists: counts.all,
            total_songs: songs.len(),
            spotify_playlists: counts.spotify,
            youtube_playlists: counts.youtube,
        }
    }
}

/// How many playlists the dashboard lists as recent.
pub const RECENT_PLAYLISTS: usize = 5;

pub fn recent_playlists(playlists: &[Playlist]) -> &[Playlist] {
    &playlists[..playlists.len().min(RECENT_PLAYLISTS)]
}
