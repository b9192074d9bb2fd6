//! Slideshow hotkeys for the OBS frontend
//!
//! Registers global hotkeys that step image slideshow sources forward, back
//! or to the start. The controller is a plain value owned by whatever loads
//! the plugin; every interaction with OBS goes through [`HostFacade`].
//!
//! # Example
//!
//! ```rust,ignore
//! use obs_toolkit::slideshow::SlideshowHotkeys;
//!
//! // on load
//! let hotkeys = SlideshowHotkeys::init(&mut host);
//! // from the host's hotkey callback
//! hotkeys.handle(&mut host, id, pressed);
//! // on save / unload
//! hotkeys.save(&mut host);
//! hotkeys.teardown(&mut host);
//! ```

mod host;
mod hotkeys;

pub use host::{HostFacade, HotkeyId, SlideAction, SourceInfo};
pub use hotkeys::{Hotkey, SlideshowHotkeys, SourceFilter, SLIDESHOW_SOURCE_KIND};
