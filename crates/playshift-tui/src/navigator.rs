//! TerminalNavigator: sends an external URL to the desktop.
//!
//! A terminal client cannot replace its own page, so a redirect means:
//! put the URL on the clipboard and ask the platform opener to show it.

use std::process::{Command, Stdio};

use anyhow::anyhow;
use tracing::{info, warn};

use playshift_core::session::Navigator;

#[derive(Debug, Default)]
pub struct TerminalNavigator {
    /// Skip the browser launch and only copy. Set over SSH.
    copy_only: bool,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self {
            copy_only: std::env::var_os("SSH_CONNECTION").is_some(),
        }
    }
}

fn opener(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    }
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

fn launch(url: &str) -> anyhow::Result<()> {
    opener(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}

fn copy(url: &str) -> anyhow::Result<()> {
    arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url.to_string()))?;
    Ok(())
}

impl Navigator for TerminalNavigator {
    fn redirect(&mut self, url: &str) -> anyhow::Result<()> {
        let copied = copy(url);
        if let Err(e) = &copied {
            warn!("redirect: clipboard unavailable: {}", e);
        }
        let launched = if self.copy_only {
            Err(anyhow!("browser launch disabled over ssh"))
        } else {
            launch(url)
        };
        match (&copied, &launched) {
            (Err(c), Err(l)) => Err(anyhow!("{}; {}", l, c)),
            _ => {
                info!(
                    "redirect to {} (copied: {}, opened: {})",
                    url,
                    copied.is_ok(),
                    launched.is_ok()
                );
                Ok(())
            }
        }
    }
}
