//! Window-surface models shared between the session and the shell
//!
//! The shell owns the real tray popup and the authorization browser
//! window; the session only tracks the flags and signals that drive its
//! command semantics.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

/// Shared view of the tray popup window
///
/// Cloneable so the shell (and tests) can observe the visibility and
/// pin transitions the session performs. `pinned` models the "keep the
/// window visible" flag that holds the popup open during a modal
/// sub-flow (handshake, file dialog).
#[derive(Clone, Default)]
pub struct TrayWindow {
    visible: Arc<AtomicBool>,
    pinned: Arc<AtomicBool>,
}

impl TrayWindow {
    /// New hidden, unpinned window state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the popup visible
    pub fn show(&self) {
        self.visible.store(true, Ordering::Relaxed);
    }

    /// Mark the popup hidden
    pub fn hide(&self) {
        self.visible.store(false, Ordering::Relaxed);
    }

    /// Flip visibility, as the global shortcut does
    pub fn toggle_visible(&self) {
        self.visible.fetch_xor(true, Ordering::Relaxed);
    }

    /// Whether the popup is currently visible
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    /// Set or clear the keep-visible pin
    pub fn set_pinned(&self, pinned: bool) {
        self.pinned.store(pinned, Ordering::Relaxed);
    }

    /// Whether the popup is pinned open
    pub fn is_pinned(&self) -> bool {
        self.pinned.load(Ordering::Relaxed)
    }
}

/// Browser-window signals forwarded by the shell
#[derive(Debug, Clone)]
pub enum WindowEvent {
    /// The authorization window navigated to a new URL
    Navigated(String),
    /// The user closed the authorization window
    Closed,
}

/// Shell-facing handle for the single authorization window surface
///
/// There is exactly one per session; a second handshake repurposes it.
/// Signals sent while no handshake is live are ignored by the session.
#[derive(Clone)]
pub struct WindowProxy {
    tx: mpsc::Sender<WindowEvent>,
}

impl WindowProxy {
    pub(crate) fn new(tx: mpsc::Sender<WindowEvent>) -> Self {
        Self { tx }
    }

    /// Report a navigation inside the authorization window
    pub async fn navigated(&self, url: &str) {
        let _ = self.tx.send(WindowEvent::Navigated(url.to_string())).await;
    }

    /// Report that the user closed the authorization window
    pub async fn closed(&self) {
        let _ = self.tx.send(WindowEvent::Closed).await;
    }
}

/// Extract the path component of a URL, without query or fragment
pub(crate) fn url_path(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = rest.find('/').map_or("", |i| &rest[i..]);
    let end = path.find(['?', '#']).unwrap_or(path.len());
    if end == 0 { "/" } else { &path[..end] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_path_strips_query() {
        assert_eq!(
            url_path("https://api.twitter.com/oauth/authenticate?oauth_token=t1"),
            "/oauth/authenticate"
        );
    }

    #[test]
    fn test_url_path_bare_host() {
        assert_eq!(url_path("https://api.twitter.com"), "/");
    }

    #[test]
    fn test_url_path_fragment() {
        assert_eq!(url_path("https://example.com/login#top"), "/login");
    }

    #[test]
    fn test_tray_window_toggle() {
        let tray = TrayWindow::new();
        assert!(!tray.is_visible());
        tray.toggle_visible();
        assert!(tray.is_visible());
        tray.toggle_visible();
        assert!(!tray.is_visible());
    }
}
