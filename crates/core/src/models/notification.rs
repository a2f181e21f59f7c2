use std::time::Duration;

use uuid::Uuid;

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// Background colour of the toast.
    pub fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#10b981",
            NotificationKind::Error => "#ef4444",
        }
    }

    /// Font Awesome icon shown before the message.
    pub fn icon_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "fas fa-check-circle me-2",
            NotificationKind::Error => "fas fa-times-circle me-2",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

/// A transient toast.
///
/// Each notification owns its own timers: it stays for `display`, then
/// fades for `fade`, then is removed. Overlapping toasts never interact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub display: Duration,
    pub fade: Duration,
}

impl Notification {
    pub fn new(
        message: impl Into<String>,
        kind: NotificationKind,
        display: Duration,
        fade: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            display,
            fade,
        }
    }

    /// Time from insertion until the element is gone.
    pub fn lifetime(&self) -> Duration {
        self.display + self.fade
    }

    /// Inline style of the toast container.
    pub fn css_text(&self) -> String {
        format!(
            "position: fixed; top: 80px; right: 20px; padding: 16px 24px; \
             background: {}; color: white; border-radius: 12px; \
             box-shadow: 0 10px 40px rgba(0,0,0,0.3); z-index: 10000; \
             animation: slideIn 0.3s ease; font-weight: 500;",
            self.kind.background()
        )
    }

    /// Animation applied once the display period is over.
    pub fn fade_out_animation(&self) -> String {
        format!("fadeOut {:.1}s ease", self.fade.as_secs_f64())
    }
}
