//! Dashboard: headline counts and the most recent playlists.

use crate::effects::Effect;
use crate::model::{Playlist, Song};
use crate::projection::{recent_playlists, DashboardStats};
use crate::view_state::{FetchEvent, Ticket, ViewState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub playlists: Vec<Playlist>,
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardMsg {
    Mount,
    Refresh,
    Fetched(Ticket, Result<(Vec<Playlist>, Vec<Song>), String>),
    DismissError,
}

#[derive(Debug, Default)]
pub struct DashboardView {
    state: ViewState<DashboardData>,
}

impl DashboardView {
    pub fn state(&self) -> &ViewState<DashboardData> {
        &self.state
    }

    pub fn stats(&self) -> DashboardStats {
        let data = self.state.data();
        DashboardStats::compute(&data.playlists, &data.songs)
    }

    pub fn recent(&self) -> &[Playlist] {
        recent_playlists(&self.state.data().playlists)
    }

    pub fn update(&mut self, msg: DashboardMsg) -> Vec<Effect> {
        match msg {
            DashboardMsg::Mount | DashboardMsg::Refresh => {
                vec![Effect::FetchDashboard(ViewState::begin(&mut self.state))]
            }
            DashboardMsg::Fetched(ticket, result) => {
                let event = match result {
                    Ok((playlists, songs)) => {
                        FetchEvent::Succeeded(ticket, DashboardData { playlists, songs })
                    }
                    Err(message) => FetchEvent::Failed(ticket, message),
                };
                ViewState::step(&mut self.state, event);
                Vec::new()
            }
            DashboardMsg::DismissError => {
                self.state = std::mem::take(&mut self.state).dismiss_error();
                Vec::new()
            }
        }
    }
}
