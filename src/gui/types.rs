//! GUI type definitions.

/// Tabs of the preferences dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    General,
    Shortcuts,
    Presets,
}

/// A question waiting for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    RestoreDefaults,
    DeletePreset { rowid: i64, name: String },
}

/// Whether a notification reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}
