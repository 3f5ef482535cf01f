//! Import form and per-platform sign-in.

use std::collections::HashSet;

use tracing::info;

use super::Notice;
use crate::effects::Effect;
use crate::error::Error;
use crate::link::extract_playlist_id;
use crate::model::{Platform, Playlist, PlaylistDraft};
use crate::session::SessionContext;

// Placeholder metadata until the backend enriches imports from the source catalog.
pub const IMPORTED_NAME: &str = "Imported Playlist";
pub const IMPORTED_DESCRIPTION: &str = "Imported from Spotify";

#[derive(Debug, Clone, PartialEq)]
pub enum ImportMsg {
    /// Replace the URL field with the given text.
    Input(String),
    Submit,
    Created(Result<Playlist, String>),
    Authorize(Platform),
    AuthUrl(Platform, Result<String, String>),
    Redirected(String, Result<(), String>),
    DismissNotice,
}

#[derive(Debug)]
pub struct ImportView {
    session: SessionContext,
    input: String,
    submitting: bool,
    authorizing: HashSet<Platform>,
    notice: Option<Notice>,
}

/// Draft sent for an imported playlist id.
pub fn import_draft(external_id: String, session: &SessionContext) -> PlaylistDraft {
    PlaylistDraft {
        name: Some(IMPORTED_NAME.to_string()),
        description: Some(IMPORTED_DESCRIPTION.to_string()),
        user_id: Some(session.user_id.clone()),
        platform: Some(Platform::Spotify),
        external_id: Some(external_id),
    }
}

impl ImportView {
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            input: String::new(),
            submitting: false,
            authorizing: HashSet::new(),
            notice: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_authorizing(&self, platform: Platform) -> bool {
        self.authorizing.contains(&platform)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn update(&mut self, msg: ImportMsg) -> Vec<Effect> {
        match msg {
            ImportMsg::Input(text) => {
                self.input = text;
                Vec::new()
            }
            ImportMsg::Submit => self.submit(),
            ImportMsg::Created(Ok(playlist)) => {
                info!("imported playlist {} ({})", playlist.id, playlist.external_id);
                self.submitting = false;
                self.input.clear();
                self.notice = Some(Notice::Info("Playlist imported successfully!".into()));
                Vec::new()
            }
            ImportMsg::Created(Err(message)) => {
                self.submitting = false;
                self.notice = Some(Notice::Error(format!("Failed to import playlist: {}", message)));
                Vec::new()
            }
            ImportMsg::Authorize(platform) => {
                if !self.authorizing.insert(platform) {
                    return Vec::new();
                }
                vec![Effect::Authorize(platform)]
            }
            ImportMsg::AuthUrl(platform, result) => {
                self.authorizing.remove(&platform);
                match result {
                    Ok(url) => vec![Effect::Redirect(url)],
                    Err(_) => {
                        self.notice = Some(Notice::Error(format!(
                            "Failed to authenticate with {}",
                            platform.label()
                        )));
                        Vec::new()
                    }
                }
            }
            ImportMsg::Redirected(url, result) => {
                self.notice = Some(match result {
                    Ok(()) => Notice::Info(format!("Continue sign-in at {}", url)),
                    Err(message) => Notice::Error(format!("Open {} manually ({})", url, message)),
                });
                Vec::new()
            }
            ImportMsg::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if self.submitting {
            return Vec::new();
        }
        match self.validate() {
            Ok(external_id) => {
                self.submitting = true;
                self.notice = None;
                vec![Effect::CreatePlaylist(import_draft(external_id, &self.session))]
            }
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
                Vec::new()
            }
        }
    }

    fn validate(&self) -> Result<String, Error> {
        let url = self.input.trim();
        if url.is_empty() {
            return Err(Error::InvalidInput("playlist URL is required".into()));
        }
        extract_playlist_id(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::playlist;

    fn view() -> ImportView {
        ImportView::new(SessionContext::new("user-9"))
    }

    #[test]
    fn test_submit_builds_draft_from_session() {
        let mut v = view();
        v.update(ImportMsg::Input(
            "https://open.spotify.com/playlist/ABC123".into(),
        ));
        let effects = v.update(ImportMsg::Submit);
        assert_eq!(
            effects,
            vec![Effect::CreatePlaylist(PlaylistDraft {
                name: Some("Imported Playlist".into()),
                description: Some("Imported from Spotify".into()),
                user_id: Some("user-9".into()),
                platform: Some(Platform::Spotify),
                external_id: Some("ABC123".into()),
            })]
        );
        assert!(v.is_submitting());
    }

    #[test]
    fn test_submit_ignored_while_in_flight() {
        let mut v = view();
        v.update(ImportMsg::Input("https://open.spotify.com/playlist/X1".into()));
        assert_eq!(v.update(ImportMsg::Submit).len(), 1);
        assert!(v.update(ImportMsg::Submit).is_empty());
    }

    #[test]
    fn test_success_clears_input() {
        let mut v = view();
        v.update(ImportMsg::Input("https://open.spotify.com/playlist/X1".into()));
        v.update(ImportMsg::Submit);
        v.update(ImportMsg::Created(Ok(playlist("p1", Platform::Spotify))));
        assert_eq!(v.input(), "");
        assert!(!v.is_submitting());
        assert!(matches!(v.notice(), Some(Notice::Info(_))));
    }

    #[test]
    fn test_invalid_url_keeps_input() {
        let mut v = view();
        v.update(ImportMsg::Input("https://open.spotify.com/album/xyz".into()));
        assert!(v.update(ImportMsg::Submit).is_empty());
        assert_eq!(v.input(), "https://open.spotify.com/album/xyz");
        assert!(v.notice().unwrap().is_error());
        assert!(!v.is_submitting());
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let mut v = view();
        v.update(ImportMsg::Input("   ".into()));
        assert!(v.update(ImportMsg::Submit).is_empty());
        assert_eq!(v.notice().unwrap().text(), "playlist URL is required");
    }

    #[test]
    fn test_network_failure_keeps_input() {
        let mut v = view();
        v.update(ImportMsg::Input("https://open.spotify.com/playlist/X1".into()));
        v.update(ImportMsg::Submit);
        v.update(ImportMsg::Created(Err("HTTP 500: db down".into())));
        assert_eq!(v.input(), "https://open.spotify.com/playlist/X1");
        assert_eq!(
            v.notice().unwrap().text(),
            "Failed to import playlist: HTTP 500: db down"
        );
        // resubmitting is allowed again
        assert_eq!(v.update(ImportMsg::Submit).len(), 1);
    }

    #[test]
    fn test_auth_flow_redirects() {
        let mut v = view();
        assert_eq!(
            v.update(ImportMsg::Authorize(Platform::Youtube)),
            vec![Effect::Authorize(Platform::Youtube)]
        );
        assert!(v.update(ImportMsg::Authorize(Platform::Youtube)).is_empty());
        let effects = v.update(ImportMsg::AuthUrl(
            Platform::Youtube,
            Ok("https://accounts.google.com/o/oauth2".into()),
        ));
        assert_eq!(
            effects,
            vec![Effect::Redirect("https://accounts.google.com/o/oauth2".into())]
        );
        assert!(!v.is_authorizing(Platform::Youtube));
    }

    #[test]
    fn test_auth_failure_message() {
        let mut v = view();
        v.update(ImportMsg::Authorize(Platform::Spotify));
        let effects = v.update(ImportMsg::AuthUrl(Platform::Spotify, Err("HTTP 503".into())));
        assert!(effects.is_empty());
        assert_eq!(
            v.notice().unwrap().text(),
            "Failed to authenticate with Spotify"
        );
    }
}
