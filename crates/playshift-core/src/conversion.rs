//! Per-playlist lifecycle of convert and sync calls.
//!
//! Each playlist id is either idle or has exactly one job in flight. A second
//! trigger for a busy id is refused; other ids proceed independently.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{ConversionRequest, Playlist};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Converting,
    Syncing,
}

impl Job {
    pub fn label(self) -> &'static str {
        match self {
            Job::Converting => "Converting...",
            Job::Syncing => "Syncing...",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConversionTracker {
    in_flight: HashMap<String, Job>,
}

impl ConversionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Job currently running for `playlist_id`, if any.
    pub fn job(&self, playlist_id: &str) -> Option<Job> {
        self.in_flight.get(playlist_id).copied()
    }

    pub fn is_busy(&self, playlist_id: &str) -> bool {
        self.in_flight.contains_key(playlist_id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Mark `playlist` as converting and build the request, targeting the
    /// complement of its current platform. `None` while a job is running.
    pub fn begin_conversion(&mut self, playlist: &Playlist) -> Option<ConversionRequest> {
        if !self.claim(&playlist.id, Job::Converting) {
            return None;
        }
        Some(ConversionRequest::for_playlist(playlist))
    }

    /// Mark `playlist_id` as syncing. `false` while a job is running.
    pub fn begin_sync(&mut self, playlist_id: &str) -> bool {
        self.claim(playlist_id, Job::Syncing)
    }

    /// Back to idle, whatever the result was.
    pub fn finish(&mut self, playlist_id: &str) -> Option<Job> {
        self.in_flight.remove(playlist_id)
    }

    fn claim(&mut self, playlist_id: &str, job: Job) -> bool {
        if let Some(running) = self.job(playlist_id) {
            debug!("{} already {:?}, ignoring {:?}", playlist_id, running, job);
            return false;
        }
        self.in_flight.insert(playlist_id.to_string(), job);
        true
    }
}
