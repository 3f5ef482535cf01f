//! Playlist list: platform filter, convert, sync and delete.

use tracing::{info, warn};

use super::Notice;
use crate::conversion::{ConversionTracker, Job};
use crate::deletion::{DeleteFlow, DeleteTarget};
use crate::effects::Effect;
use crate::model::{ConversionResult, Playlist};
use crate::projection::{filter_playlists, PlatformCounts, PlatformFilter};
use crate::view_state::{FetchEvent, Ticket, ViewState};

/// Songs listed on each playlist card before the "+N more" line.
pub const PREVIEW_SONGS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistsMsg {
    Mount,
    Refresh,
    Fetched(Ticket, Result<Vec<Playlist>, String>),
    SetFilter(PlatformFilter),
    NextFilter,
    PrevFilter,
    Convert(String),
    Converted(String, Result<ConversionResult, String>),
    Sync(String),
    Synced(String, Result<(), String>),
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
    Deleted(String, Result<(), String>),
    DismissNotice,
}

#[derive(Debug, Default)]
pub struct PlaylistsView {
    state: ViewState<Vec<Playlist>>,
    filter: PlatformFilter,
    jobs: ConversionTracker,
    delete: DeleteFlow,
    notice: Option<Notice>,
}

impl PlaylistsView {
    pub fn state(&self) -> &ViewState<Vec<Playlist>> {
        &self.state
    }

    pub fn filter(&self) -> PlatformFilter {
        self.filter
    }

    pub fn visible(&self) -> Vec<&Playlist> {
        filter_playlists(self.state.data(), self.filter)
    }

    pub fn counts(&self) -> PlatformCounts {
        PlatformCounts::of(self.state.data())
    }

    pub fn job(&self, playlist_id: &str) -> Option<Job> {
        self.jobs.job(playlist_id)
    }

    pub fn pending_delete(&self) -> Option<&DeleteTarget> {
        self.delete.pending()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Empty-state text when the filtered projection has nothing to show.
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.state.has_loaded() && self.visible().is_empty() {
            Some("No playlists found")
        } else {
            None
        }
    }

    pub fn update(&mut self, msg: PlaylistsMsg) -> Vec<Effect> {
        match msg {
            PlaylistsMsg::Mount | PlaylistsMsg::Refresh => vec![self.refetch()],
            PlaylistsMsg::Fetched(ticket, result) => {
                let event = match result {
                    Ok(list) => FetchEvent::Succeeded(ticket, list),
                    Err(message) => FetchEvent::Failed(ticket, message),
                };
                ViewState::step(&mut self.state, event);
                Vec::new()
            }
            PlaylistsMsg::SetFilter(filter) => {
                self.filter = filter;
                Vec::new()
            }
            PlaylistsMsg::NextFilter => {
                self.filter = self.filter.next();
                Vec::new()
            }
            PlaylistsMsg::PrevFilter => {
                self.filter = self.filter.prev();
                Vec::new()
            }
            PlaylistsMsg::Convert(id) => {
                let Some(playlist) = self.state.data().iter().find(|p| p.id == id) else {
                    return Vec::new();
                };
                match self.jobs.begin_conversion(playlist) {
                    Some(req) => vec![Effect::ConvertPlaylist(req)],
                    None => Vec::new(),
                }
            }
            PlaylistsMsg::Converted(id, result) => {
                self.jobs.finish(&id);
                self.notice = Some(match result {
                    Ok(res) => {
                        info!(
                            "converted {}: {} songs, {} failed",
                            id,
                            res.converted_songs,
                            res.failed_songs.len()
                        );
                        if res.success {
                            Notice::Info(conversion_summary(&res))
                        } else {
                            warn!("conversion of {} reported failure: {}", id, res.message);
                            Notice::Error(conversion_summary(&res))
                        }
                    }
                    Err(message) => Notice::Error(format!("Conversion failed: {}", message)),
                });
                // A counterpart playlist may now exist either way.
                vec![self.refetch()]
            }
            PlaylistsMsg::Sync(id) => {
                if self.jobs.begin_sync(&id) {
                    vec![Effect::SyncPlaylist(id)]
                } else {
                    Vec::new()
                }
            }
            PlaylistsMsg::Synced(id, result) => {
                self.jobs.finish(&id);
                self.notice = Some(match result {
                    Ok(()) => Notice::Info("Playlist synced".into()),
                    Err(message) => Notice::Error(format!("Sync failed: {}", message)),
                });
                vec![self.refetch()]
            }
            PlaylistsMsg::RequestDelete(id) => {
                self.delete.request(DeleteTarget::Playlist(id));
                Vec::new()
            }
            PlaylistsMsg::ConfirmDelete => match self.delete.confirm() {
                Some(target) => vec![Effect::Delete(target)],
                None => Vec::new(),
            },
            PlaylistsMsg::CancelDelete => {
                self.delete.cancel();
                Vec::new()
            }
            PlaylistsMsg::Deleted(_, Ok(())) => {
                self.notice = Some(Notice::Info("Playlist deleted".into()));
                vec![self.refetch()]
            }
            PlaylistsMsg::Deleted(_, Err(message)) => {
                self.notice = Some(Notice::Error(format!(
                    "Failed to delete playlist: {}",
                    message
                )));
                Vec::new()
            }
            PlaylistsMsg::DismissNotice => {
                self.notice = None;
                self.state = std::mem::take(&mut self.state).dismiss_error();
                Vec::new()
            }
        }
    }

    fn refetch(&mut self) -> Effect {
        Effect::FetchPlaylists(ViewState::begin(&mut self.state))
    }
}

fn conversion_summary(res: &ConversionResult) -> String {
    if !res.message.is_empty() {
        return res.message.clone();
    }
    if !res.success {
        return "Conversion failed".to_string();
    }
    if res.failed_songs.is_empty() {
        format!("Converted {} songs", res.converted_songs)
    } else {
        format!(
            "Converted {} songs, {} not found",
            res.converted_songs,
            res.failed_songs.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::playlist;
    use crate::model::Platform;

    fn loaded() -> PlaylistsView {
        let mut v = PlaylistsView::default();
        let t = match v.update(PlaylistsMsg::Mount).as_slice() {
            [Effect::FetchPlaylists(t)] => *t,
            other => panic!("unexpected {:?}", other),
        };
        v.update(PlaylistsMsg::Fetched(
            t,
            Ok(vec![
                playlist("1", Platform::Spotify),
                playlist("2", Platform::Youtube),
                playlist("3", Platform::Spotify),
            ]),
        ));
        v
    }

    fn fetches(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::FetchPlaylists(_)))
            .count()
    }

    #[test]
    fn test_filter_and_counts() {
        let mut v = loaded();
        assert_eq!(v.visible().len(), 3);
        v.update(PlaylistsMsg::NextFilter);
        assert_eq!(v.filter(), PlatformFilter::Only(Platform::Spotify));
        assert_eq!(v.visible().len(), v.counts().spotify);
        v.update(PlaylistsMsg::SetFilter(PlatformFilter::Only(Platform::Youtube)));
        assert_eq!(v.visible()[0].id, "2");
    }

    #[test]
    fn test_convert_lifecycle() {
        let mut v = loaded();
        let effects = v.update(PlaylistsMsg::Convert("2".into()));
        match effects.as_slice() {
            [Effect::ConvertPlaylist(req)] => {
                assert_eq!(req.source_platform, Platform::Youtube);
                assert_eq!(req.target_platform, Platform::Spotify);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(v.job("2"), Some(Job::Converting));
        assert!(v.update(PlaylistsMsg::Convert("2".into())).is_empty());
        // another playlist converts concurrently
        assert_eq!(v.update(PlaylistsMsg::Convert("1".into())).len(), 1);

        let after = v.update(PlaylistsMsg::Converted(
            "2".into(),
            Ok(ConversionResult {
                success: true,
                converted_songs: 12,
                ..Default::default()
            }),
        ));
        assert_eq!(fetches(&after), 1);
        assert_eq!(v.job("2"), None);
        assert_eq!(v.notice().unwrap().text(), "Converted 12 songs");
    }

    #[test]
    fn test_failed_conversion_still_refetches() {
        let mut v = loaded();
        v.update(PlaylistsMsg::Convert("1".into()));
        let after = v.update(PlaylistsMsg::Converted("1".into(), Err("HTTP 500: x".into())));
        assert_eq!(fetches(&after), 1);
        assert!(v.notice().unwrap().is_error());
        assert_eq!(v.job("1"), None);
    }

    #[test]
    fn test_unsuccessful_conversion_is_an_error() {
        let mut v = loaded();
        v.update(PlaylistsMsg::Convert("1".into()));
        let after = v.update(PlaylistsMsg::Converted(
            "1".into(),
            Ok(ConversionResult {
                success: false,
                message: "YouTube quota exceeded".into(),
                ..Default::default()
            }),
        ));
        assert_eq!(fetches(&after), 1);
        let notice = v.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.text(), "YouTube quota exceeded");
        assert_eq!(v.job("1"), None);
    }

    #[test]
    fn test_convert_unknown_id_is_noop() {
        let mut v = loaded();
        assert!(v.update(PlaylistsMsg::Convert("nope".into())).is_empty());
    }

    #[test]
    fn test_sync_guard() {
        let mut v = loaded();
        assert_eq!(
            v.update(PlaylistsMsg::Sync("3".into())),
            vec![Effect::SyncPlaylist("3".into())]
        );
        assert!(v.update(PlaylistsMsg::Sync("3".into())).is_empty());
        assert!(v.update(PlaylistsMsg::Convert("3".into())).is_empty());
        let after = v.update(PlaylistsMsg::Synced("3".into(), Ok(())));
        assert_eq!(fetches(&after), 1);
    }

    #[test]
    fn test_delete_cancel_makes_no_call() {
        let mut v = loaded();
        assert!(v.update(PlaylistsMsg::RequestDelete("1".into())).is_empty());
        assert!(v.pending_delete().is_some());
        assert!(v.update(PlaylistsMsg::CancelDelete).is_empty());
        assert!(v.update(PlaylistsMsg::ConfirmDelete).is_empty());
    }

    #[test]
    fn test_delete_confirm_then_single_refetch() {
        let mut v = loaded();
        v.update(PlaylistsMsg::RequestDelete("1".into()));
        assert_eq!(
            v.update(PlaylistsMsg::ConfirmDelete),
            vec![Effect::Delete(DeleteTarget::Playlist("1".into()))]
        );
        let after = v.update(PlaylistsMsg::Deleted("1".into(), Ok(())));
        assert_eq!(fetches(&after), 1);
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn test_delete_failure_keeps_rows() {
        let mut v = loaded();
        v.update(PlaylistsMsg::RequestDelete("1".into()));
        v.update(PlaylistsMsg::ConfirmDelete);
        let after = v.update(PlaylistsMsg::Deleted("1".into(), Err("HTTP 404: gone".into())));
        assert!(after.is_empty());
        assert_eq!(v.visible().len(), 3);
        assert!(v.notice().unwrap().is_error());
    }

    #[test]
    fn test_empty_message() {
        let mut v = PlaylistsView::default();
        assert_eq!(v.empty_message(), None);
        let t = match v.update(PlaylistsMsg::Refresh).as_slice() {
            [Effect::FetchPlaylists(t)] => *t,
            _ => unreachable!(),
        };
        v.update(PlaylistsMsg::Fetched(t, Ok(Vec::new())));
        assert_eq!(v.empty_message(), Some("No playlists found"));
    }
}
