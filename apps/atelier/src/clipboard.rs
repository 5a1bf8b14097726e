//! # Clipboard Port
//!
//! Share links and the CSS variable block go to the clipboard through the
//! [`Clipboard`] trait. The app uses [`SystemClipboard`]; tests and headless
//! sessions use [`MemoryClipboard`].
//!
//! ```text
//! copy_share_url ──┐                      ┌── SystemClipboard (arboard)
//!                  ├──► dyn Clipboard ────┤
//! copy_css_vars  ──┘                      └── MemoryClipboard
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Clipboard failures. Always reported to the user as a toast.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard on this system (headless session, no display server).
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard refused the write.
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Text clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

// =============================================================================
// System Clipboard
// =============================================================================

/// The platform clipboard.
///
/// The arboard handle is opened on first use and kept for the life of the
/// process; on X11 the copied text only survives while its owner does.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Arc<Mutex<Option<arboard::Clipboard>>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        SystemClipboard::default()
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let mut guard = inner.lock().expect("Clipboard mutex poisoned");
            if guard.is_none() {
                let clipboard = arboard::Clipboard::new()
                    .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
                *guard = Some(clipboard);
            }

            match guard.as_mut() {
                Some(clipboard) => clipboard
                    .set_text(text)
                    .map_err(|e| ClipboardError::WriteFailed(e.to_string())),
                None => Err(ClipboardError::Unavailable("not initialized".to_string())),
            }
        })
        .await
        .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?
    }
}

// =============================================================================
// Memory Clipboard
// =============================================================================

/// An in-process clipboard. Optionally refuses every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        MemoryClipboard::default()
    }

    /// A clipboard whose writes always fail.
    pub fn unavailable() -> Self {
        MemoryClipboard {
            contents: Arc::default(),
            unavailable: true,
        }
    }

    /// The last text written.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().expect("Clipboard mutex poisoned").clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable("clipboard disabled".to_string()));
        }
        debug!(bytes = text.len(), "Writing memory clipboard");
        *self.contents.lock().expect("Clipboard mutex poisoned") = Some(text.to_string());
        Ok(())
    }
}
