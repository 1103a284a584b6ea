//! The dismissible memory notice.
//!
//! The notice hides itself after a delay.  At most one hide timer exists per
//! notice: showing the notice again replaces the running timer, dismissing
//! it cancels the timer, and dropping the notice cancels it too so that no
//! callback fires after the surface is gone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::observability::NOTICE_AUTO_HIDDEN;

/// Default delay before the notice hides itself.
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_secs(10);

/// Default notice text.
pub const DEFAULT_NOTICE: &str = "The assistant can remember this conversation for up to 15 minutes. \
After that, its memory resets. Restarting the terminal also clears its memory.";

/// A notice that auto-hides after a delay.
#[derive(Debug)]
pub struct Notice {
    text: String,
    auto_hide: Duration,
    visible: Arc<AtomicBool>,
    timer: Option<JoinHandle<()>>,
}

impl Notice {
    /// Creates a hidden notice.
    pub fn new(text: impl Into<String>, auto_hide: Duration) -> Self {
        Self {
            text: text.into(),
            auto_hide,
            visible: Arc::new(AtomicBool::new(false)),
            timer: None,
        }
    }

    /// Returns the notice text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true while the notice is shown.
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    /// Returns true while a hide timer is pending.
    pub fn is_timer_active(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Shows the notice and (re)starts the hide timer.
    ///
    /// Must be called within a tokio runtime.
    pub fn show(&mut self) {
        self.clear_timer();
        self.visible.store(true, Ordering::Relaxed);
        let visible = Arc::clone(&self.visible);
        let delay = self.auto_hide;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            visible.store(false, Ordering::Relaxed);
            NOTICE_AUTO_HIDDEN.click();
        }));
    }

    /// Hides the notice and cancels the hide timer.
    pub fn dismiss(&mut self) {
        self.clear_timer();
        self.visible.store(false, Ordering::Relaxed);
    }

    fn clear_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Default for Notice {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE, DEFAULT_AUTO_HIDE)
    }
}

impl Drop for Notice {
    fn drop(&mut self) {
        self.clear_timer();
    }
}
