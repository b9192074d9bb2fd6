//! Host application facade
//!
//! The hotkey controller never talks to the media application directly.
//! Everything it needs from the host (hotkey registration, persisted key
//! bindings, the source list, media control and the script log) goes
//! through this trait, so the host's plugin loader owns the lifecycle and
//! tests can substitute an in-memory host.

use log::Level;

/// Handle the host returns when a hotkey is registered
pub type HotkeyId = u64;

/// Media control applied to a slideshow source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideAction {
    Next,
    Back,
    Reset,
}

impl std::fmt::Display for SlideAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlideAction::Next => write!(f, "next"),
            SlideAction::Back => write!(f, "back"),
            SlideAction::Reset => write!(f, "reset"),
        }
    }
}

/// A source as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Unversioned source type id, e.g. `slideshow`
    pub kind: String,
    /// User-visible source name
    pub name: String,
    /// Shown on the final output mix
    pub active: bool,
    /// Displayed anywhere, including preview and projectors
    pub showing: bool,
}

/// Capabilities the hotkey controller needs from its host
pub trait HostFacade {
    /// Register a frontend hotkey under a persistent key
    fn register_hotkey(&mut self, key: &str, description: &str) -> HotkeyId;

    /// Remove a previously registered hotkey
    fn unregister_hotkey(&mut self, id: HotkeyId);

    /// Bind key combinations to a registered hotkey
    fn apply_bindings(&mut self, id: HotkeyId, bindings: &[String]);

    /// Key combinations currently bound to a hotkey
    fn current_bindings(&self, id: HotkeyId) -> Vec<String>;

    /// Read persisted key combinations stored under `key`
    fn load_bindings(&self, key: &str) -> Vec<String>;

    /// Persist key combinations under `key`
    fn store_bindings(&mut self, key: &str, bindings: &[String]);

    /// Snapshot of every source the host knows about
    fn sources(&self) -> Vec<SourceInfo>;

    /// Apply a media action to one source
    fn step(&mut self, source: &SourceInfo, action: SlideAction);

    /// Write to the host's script log
    fn log(&self, level: Level, message: &str);
}
