//! Song manager: live search, detail overlay and delete.

use super::Notice;
use crate::deletion::{DeleteFlow, DeleteTarget};
use crate::effects::Effect;
use crate::model::Song;
use crate::projection::search_songs;
use crate::view_state::{FetchEvent, Ticket, ViewState};

#[derive(Debug, Clone, PartialEq)]
pub enum SongsMsg {
    Mount,
    Refresh,
    Fetched(Ticket, Result<Vec<Song>, String>),
    /// Replace the search query.
    Query(String),
    Select(String),
    CloseDetail,
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
    Deleted(String, Result<(), String>),
    DismissNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Default)]
pub struct SongsView {
    state: ViewState<Vec<Song>>,
    query: String,
    /// Copy taken when the overlay opened; refetches leave it alone.
    selected: Option<Song>,
    delete: DeleteFlow,
    notice: Option<Notice>,
}

impl SongsView {
    pub fn state(&self) -> &ViewState<Vec<Song>> {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible(&self) -> Vec<&Song> {
        search_songs(self.state.data(), &self.query)
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} songs",
            self.visible().len(),
            self.state.data().len()
        )
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.state.has_loaded() || !self.visible().is_empty() {
            return None;
        }
        let hint = if self.query.trim().is_empty() {
            "Songs will appear here when you import playlists"
        } else {
            "Try adjusting your search criteria"
        };
        Some(EmptyState {
            title: "No songs found",
            hint,
        })
    }

    pub fn selected(&self) -> Option<&Song> {
        self.selected.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&DeleteTarget> {
        self.delete.pending()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn update(&mut self, msg: SongsMsg) -> Vec<Effect> {
        match msg {
            SongsMsg::Mount | SongsMsg::Refresh => vec![self.refetch()],
            SongsMsg::Fetched(ticket, result) => {
                let event = match result {
                    Ok(list) => FetchEvent::Succeeded(ticket, list),
                    Err(message) => FetchEvent::Failed(ticket, message),
                };
                ViewState::step(&mut self.state, event);
                Vec::new()
            }
            SongsMsg::Query(q) => {
                self.query = q;
                Vec::new()
            }
            SongsMsg::Select(id) => {
                self.selected = self.state.data().iter().find(|s| s.id == id).cloned();
                Vec::new()
            }
            SongsMsg::CloseDetail => {
                self.selected = None;
                Vec::new()
            }
            SongsMsg::RequestDelete(id) => {
                self.delete.request(DeleteTarget::Song(id));
                Vec::new()
            }
            SongsMsg::ConfirmDelete => match self.delete.confirm() {
                Some(target) => vec![Effect::Delete(target)],
                None => Vec::new(),
            },
            SongsMsg::CancelDelete => {
                self.delete.cancel();
                Vec::new()
            }
            SongsMsg::Deleted(id, Ok(())) => {
                if self.selected.as_ref().is_some_and(|s| s.id == id) {
                    self.selected = None;
                }
                self.notice = Some(Notice::Info("Song deleted".into()));
                vec![self.refetch()]
            }
            SongsMsg::Deleted(_, Err(message)) => {
                self.notice = Some(Notice::Error(format!("Failed to delete song: {}", message)));
                Vec::new()
            }
            SongsMsg::DismissNotice => {
                self.notice = None;
                self.state = std::mem::take(&mut self.state).dismiss_error();
                Vec::new()
            }
        }
    }

    fn refetch(&mut self) -> Effect {
        Effect::FetchSongs(ViewState::begin(&mut self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::song;

    fn ticket(effects: &[Effect]) -> Ticket {
        match effects {
            [Effect::FetchSongs(t)] => *t,
            other => panic!("unexpected {:?}", other),
        }
    }

    fn loaded() -> SongsView {
        let mut v = SongsView::default();
        let t = ticket(&v.update(SongsMsg::Mount));
        v.update(SongsMsg::Fetched(
            t,
            Ok(vec![
                song("a", "Hurt", "Johnny Cash", "American IV", 218),
                song("b", "Hurt", "Nine Inch Nails", "The Downward Spiral", 373),
                song("c", "Closer", "Nine Inch Nails", "The Downward Spiral", 373),
            ]),
        ));
        v
    }

    #[test]
    fn test_search_and_summary() {
        let mut v = loaded();
        assert_eq!(v.summary(), "Showing 3 of 3 songs");
        v.update(SongsMsg::Query("nine inch".into()));
        assert_eq!(v.summary(), "Showing 2 of 3 songs");
        v.update(SongsMsg::Query("  ".into()));
        assert_eq!(v.visible().len(), 3);
    }

    #[test]
    fn test_empty_states() {
        let mut v = loaded();
        assert!(v.empty_state().is_none());
        v.update(SongsMsg::Query("polka".into()));
        let empty = v.empty_state().unwrap();
        assert_eq!(empty.title, "No songs found");
        assert_eq!(empty.hint, "Try adjusting your search criteria");

        let mut fresh = SongsView::default();
        assert!(fresh.empty_state().is_none());
        let t = ticket(&fresh.update(SongsMsg::Refresh));
        fresh.update(SongsMsg::Fetched(t, Ok(Vec::new())));
        assert_eq!(
            fresh.empty_state().unwrap().hint,
            "Songs will appear here when you import playlists"
        );
    }

    #[test]
    fn test_detail_snapshot_survives_refetch() {
        let mut v = loaded();
        v.update(SongsMsg::Select("b".into()));
        assert_eq!(v.selected().unwrap().artist, "Nine Inch Nails");

        let t = ticket(&v.update(SongsMsg::Refresh));
        let mut renamed = song("b", "Hurt (Live)", "Nine Inch Nails", "Live", 400);
        renamed.youtube_id = Some("yt".into());
        v.update(SongsMsg::Fetched(t, Ok(vec![renamed])));
        assert_eq!(v.selected().unwrap().title, "Hurt");

        v.update(SongsMsg::CloseDetail);
        assert!(v.selected().is_none());
        v.update(SongsMsg::Select("b".into()));
        assert_eq!(v.selected().unwrap().title, "Hurt (Live)");
    }

    #[test]
    fn test_select_unknown_clears() {
        let mut v = loaded();
        v.update(SongsMsg::Select("zz".into()));
        assert!(v.selected().is_none());
    }

    #[test]
    fn test_delete_flow() {
        let mut v = loaded();
        v.update(SongsMsg::RequestDelete("c".into()));
        v.update(SongsMsg::CancelDelete);
        assert!(v.update(SongsMsg::ConfirmDelete).is_empty());

        v.update(SongsMsg::RequestDelete("c".into()));
        assert_eq!(
            v.update(SongsMsg::ConfirmDelete),
            vec![Effect::Delete(DeleteTarget::Song("c".into()))]
        );
        let after = v.update(SongsMsg::Deleted("c".into(), Ok(())));
        ticket(&after);
    }

    #[test]
    fn test_delete_failure_surfaces_without_refetch() {
        let mut v = loaded();
        v.update(SongsMsg::RequestDelete("a".into()));
        v.update(SongsMsg::ConfirmDelete);
        assert!(v
            .update(SongsMsg::Deleted("a".into(), Err("HTTP 500: x".into())))
            .is_empty());
        assert_eq!(v.visible().len(), 3);
        assert_eq!(v.notice().unwrap().text(), "Failed to delete song: HTTP 500: x");
    }
}
