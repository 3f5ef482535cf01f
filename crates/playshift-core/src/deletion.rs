//! Confirm-before-delete step shared by the playlist and song views.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Playlist(String),
    Song(String),
}

impl DeleteTarget {
    pub fn id(&self) -> &str {
        match self {
            DeleteTarget::Playlist(id) | DeleteTarget::Song(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DeleteTarget::Playlist(_) => "playlist",
            DeleteTarget::Song(_) => "song",
        }
    }

    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete this {}?", self.kind())
    }
}

/// `Idle → Pending → (confirm | cancel) → Idle`.
///
/// Only a confirm hands back the target; the caller turns it into exactly one
/// delete call.
#[derive(Debug, Default, Clone)]
pub struct DeleteFlow {
    pending: Option<DeleteTarget>,
}

impl DeleteFlow {
    /// Open the confirmation step. Replaces any earlier unanswered request.
    pub fn request(&mut self, target: DeleteTarget) {
        self.pending = Some(target);
    }

    pub fn pending(&self) -> Option<&DeleteTarget> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn confirm(&mut self) -> Option<DeleteTarget> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_yields_target_once() {
        let mut flow = DeleteFlow::default();
        flow.request(DeleteTarget::Song("s1".into()));
        assert!(flow.is_pending());
        assert_eq!(flow.confirm(), Some(DeleteTarget::Song("s1".into())));
        assert_eq!(flow.confirm(), None);
    }

    #[test]
    fn test_cancel_yields_nothing() {
        let mut flow = DeleteFlow::default();
        flow.request(DeleteTarget::Playlist("p1".into()));
        flow.cancel();
        assert!(!flow.is_pending());
        assert_eq!(flow.confirm(), None);
    }

    #[test]
    fn test_confirm_without_request() {
        assert_eq!(DeleteFlow::default().confirm(), None);
    }

    #[test]
    fn test_prompt_names_kind() {
        let t = DeleteTarget::Playlist("p1".into());
        assert_eq!(t.prompt(), "Are you sure you want to delete this playlist?");
        assert_eq!(t.id(), "p1");
    }
}
