//! Injected capabilities: who the user is and how to send them elsewhere.

use crate::config::SessionConfig;

/// The signed-in user as far as this client knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: String,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl From<&SessionConfig> for SessionContext {
    fn from(cfg: &SessionConfig) -> Self {
        Self::new(cfg.user_id.clone())
    }
}

/// Leaves the client for an external URL, e.g. an OAuth consent page.
pub trait Navigator {
    fn redirect(&mut self, url: &str) -> anyhow::Result<()>;
}

/// Records URLs instead of opening them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn redirect(&mut self, url: &str) -> anyhow::Result<()> {
        self.visited.push(url.to_string());
        Ok(())
    }
}
