//! Slideshow hotkey controller
//!
//! Six hotkeys step slideshows: next / back / reset, each for slideshows on
//! the output mix ("active") and for slideshows that are showing somewhere
//! but not on the output mix.

use log::Level;

use super::host::{HostFacade, HotkeyId, SlideAction, SourceInfo};

/// Source type id of image slideshows
pub const SLIDESHOW_SOURCE_KIND: &str = "slideshow";

/// Prefix of the settings key each hotkey's bindings are stored under
const BINDING_KEY_PREFIX: &str = "htk_id";

/// Which slideshows a hotkey applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFilter {
    /// Shown on the final output mix
    Active,
    /// Showing somewhere, but not on the final output mix
    ShowingInactive,
}

impl SourceFilter {
    pub fn matches(self, source: &SourceInfo) -> bool {
        match self {
            SourceFilter::Active => source.active,
            SourceFilter::ShowingInactive => source.showing && !source.active,
        }
    }
}

const HOTKEYS: &[(&str, &str, SourceFilter, SlideAction)] = &[
    ("ush_active_next", "Active slideshow: Next", SourceFilter::Active, SlideAction::Next),
    ("ush_active_back", "Active slideshow: Back", SourceFilter::Active, SlideAction::Back),
    ("ush_active_reset", "Active slideshow: Reset", SourceFilter::Active, SlideAction::Reset),
    (
        "ush_showing_inactive_next",
        "Showing but not active slideshow: Next",
        SourceFilter::ShowingInactive,
        SlideAction::Next,
    ),
    (
        "ush_showing_inactive_back",
        "Showing but not active slideshow: Back",
        SourceFilter::ShowingInactive,
        SlideAction::Back,
    ),
    (
        "ush_showing_inactive_reset",
        "Showing but not active slideshow: Reset",
        SourceFilter::ShowingInactive,
        SlideAction::Reset,
    ),
];

/// One registered hotkey
#[derive(Debug, Clone)]
pub struct Hotkey {
    pub key: &'static str,
    pub description: &'static str,
    pub filter: SourceFilter,
    pub action: SlideAction,
    pub id: HotkeyId,
}

impl Hotkey {
    fn settings_key(&self) -> String {
        format!("{}{}", BINDING_KEY_PREFIX, self.key)
    }
}

/// Hotkey state owned by the plugin's lifecycle
///
/// Created on load with [`SlideshowHotkeys::init`] and consumed on unload by
/// [`SlideshowHotkeys::teardown`].
#[derive(Debug)]
pub struct SlideshowHotkeys {
    hotkeys: Vec<Hotkey>,
}

impl SlideshowHotkeys {
    /// Register every hotkey, restore its saved bindings and persist them again
    pub fn init<H: HostFacade + ?Sized>(host: &mut H) -> Self {
        host.log(Level::Debug, "Loading universal slideshow hotkeys");

        let mut hotkeys = Vec::with_capacity(HOTKEYS.len());
        for &(key, description, filter, action) in HOTKEYS {
            let mut hotkey = Hotkey {
                key,
                description,
                filter,
                action,
                id: 0,
            };
            let settings_key = hotkey.settings_key();

            let saved = host.load_bindings(&settings_key);
            host.log(Level::Debug, &format!("Registering hotkey {}", key));
            hotkey.id = host.register_hotkey(&settings_key, description);
            host.apply_bindings(hotkey.id, &saved);

            let current = host.current_bindings(hotkey.id);
            host.store_bindings(&settings_key, &current);

            hotkeys.push(hotkey);
        }

        Self { hotkeys }
    }

    pub fn hotkeys(&self) -> &[Hotkey] {
        &self.hotkeys
    }

    /// Find the hotkey registered under a persistent key
    pub fn find(&self, key: &str) -> Option<&Hotkey> {
        self.hotkeys.iter().find(|hotkey| hotkey.key == key)
    }

    /// Persist the current bindings of every hotkey
    pub fn save<H: HostFacade + ?Sized>(&self, host: &mut H) {
        for hotkey in &self.hotkeys {
            host.log(Level::Debug, &format!("Saving hotkey {}", hotkey.key));
            let current = host.current_bindings(hotkey.id);
            host.store_bindings(&hotkey.settings_key(), &current);
        }
    }

    /// Unregister every hotkey
    pub fn teardown<H: HostFacade + ?Sized>(self, host: &mut H) {
        host.log(Level::Debug, "Unloading universal slideshow hotkeys");
        for hotkey in self.hotkeys {
            host.log(Level::Debug, &format!("Unregistering hotkey {}", hotkey.key));
            host.unregister_hotkey(hotkey.id);
        }
    }

    /// React to a hotkey event from the host
    ///
    /// Releases are ignored. Returns the number of slideshows stepped.
    pub fn handle<H: HostFacade + ?Sized>(&self, host: &mut H, id: HotkeyId, pressed: bool) -> usize {
        let Some(hotkey) = self.hotkeys.iter().find(|hotkey| hotkey.id == id) else {
            host.log(Level::Warn, &format!("Unknown hotkey id {}", id));
            return 0;
        };

        host.log(
            Level::Debug,
            &format!("{} callback received: pressed={}", hotkey.key, pressed),
        );
        if !pressed {
            return 0;
        }

        let mut stepped = 0;
        for source in host.sources() {
            if source.kind == SLIDESHOW_SOURCE_KIND && hotkey.filter.matches(&source) {
                host.log(
                    Level::Debug,
                    &format!("Performing {} on {} {}", hotkey.action, source.kind, source.name),
                );
                host.step(&source, hotkey.action);
                stepped += 1;
            }
        }
        stepped
    }
}
